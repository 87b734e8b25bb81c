//! Storage layer for voice session bookkeeping.
//!
//! The bot keeps no database; join timestamps live in memory for the lifetime of the
//! process. Storage sits behind the `SessionStore` trait so the service layer can be
//! exercised against an injected store.

pub mod session;
