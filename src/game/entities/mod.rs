//! Game entities module.
//!
//! This module organizes the entity registry and random entity placement.

pub mod registry;
pub mod placement;

pub use registry::*;
pub use placement::*;
