//! Discord bot integration for voice activity logging.
//!
//! The bot listens for voice state updates in the configured guild and writes a line to
//! the member's private log channel whenever they join, leave, or move between voice
//! channels.
//!
//! # Gateway Intents
//!
//! The bot requires the following gateway intents:
//! - `GUILDS` - Populate the cache with guild channels for name lookups
//! - `GUILD_VOICE_STATES` - Receive voice state updates
//! - `GUILD_MEMBERS` - Resolve member data when a voice state omits it (privileged intent)
//!
//! Note: `GUILD_MEMBERS` is a privileged intent and must be explicitly enabled
//! in the Discord Developer Portal for the bot application.

pub mod handler;
pub mod start;
