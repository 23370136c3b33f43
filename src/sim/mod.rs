//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Snapshots are immutable; every step returns a new one
//! - Input arrives as an explicit snapshot, never from global state
//! - Randomness only from an explicit seed at level parse time
//! - No rendering or platform dependencies

pub mod actor;
pub mod collision;
pub mod error;
pub mod geom;
pub mod input;
pub mod level;
pub mod state;
pub mod tick;

pub use actor::{Actor, ActorKind, Chaser, Collectible, Hazard, Player};
pub use collision::{collide, overlap};
pub use error::{LevelFormatError, StepError};
pub use geom::{Aabb, Vector};
pub use input::{InputSnapshot, Key, UnknownKey};
pub use level::{CellKind, GridLevel};
pub use state::{Status, WorldState};
pub use tick::tick;
