//! Service layer for voice activity logging.
//!
//! - **transition** - Classifies a voice state change as join, leave, move, or no change
//! - **session** - Measures stay durations from recorded join times
//! - **duration** - Renders stay durations for log messages
//! - **voice_log** - Orchestrates classification, bookkeeping, and delivery per event
//! - **log_channel** - Resolves or creates per-member log channels and posts messages

pub mod duration;
pub mod log_channel;
pub mod session;
pub mod transition;
pub mod voice_log;
