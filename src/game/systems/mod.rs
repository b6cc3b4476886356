pub mod movement;
pub mod combat;
pub mod pickup;
pub mod enemy_ai;

pub use movement::*;
pub use combat::*;
pub use pickup::*;
pub use enemy_ai::*;
