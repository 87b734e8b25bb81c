//! Domain models shared by the service, data, and bot layers.
//!
//! These types carry only what the voice log needs from Discord's voice state and
//! member objects, so the classification and bookkeeping logic never depends on
//! Serenity's gateway structures.

pub mod session;
pub mod voice;
