//! Tether Core
//!
//! Plain data shared by both sides of the scripting bridge:
//! - Geometric value types (`Vector3`, `Quaternion`)
//! - Opaque entity identifiers
//! - Key codes
//! - Fixed-rate simulation clock

pub mod entity;
pub mod input;
pub mod math;
pub mod time;

pub use entity::EntityId;
pub use input::KeyCode;
pub use math::{Quaternion, Vector3};
pub use time::SimulationClock;

pub use glam;

/// Bridge version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
