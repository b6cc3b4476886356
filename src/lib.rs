//! Turn-based grid dungeon crawler engine.
//!
//! `game` holds the simulation core, `runner` hosts a session on an actor and
//! paces queued commands for presentation, `config` gathers the tunables.

pub mod config;
pub mod game;
pub mod runner;
