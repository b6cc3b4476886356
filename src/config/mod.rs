/// Main configuration module.
///
/// Re-exports submodules for gameplay and session pacing configuration.
pub mod game;
pub mod session;

pub use game::GameConfig;
