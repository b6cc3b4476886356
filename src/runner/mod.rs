//! Actor host for a game session.
//!
//! Provides the session runner (pacing, purchases, broadcasting), its messages,
//! and a terminal renderer used by the demo binary.

pub mod messages;
pub mod server;
pub mod console;
