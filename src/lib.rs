//! Lava Leap - A tile-grid platformer simulation
//!
//! Core modules:
//! - `sim`: Deterministic simulation (grid, actors, collisions, world state)
//! - `session`: Headless host loop (frame clock, level runs, lives)
//! - `settings`: Session configuration persisted as JSON
//! - `levels`: Built-in level plans
//! - `script`: Scripted input for headless runs

pub mod levels;
pub mod script;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{FrameClock, Game, LevelRun, Progress};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Horizontal walking speed of the player (cells/s)
    pub const PLAYER_X_SPEED: f32 = 7.0;
    /// Downward acceleration applied to the player (cells/s²)
    pub const GRAVITY: f32 = 30.0;
    /// Upward speed set when a jump starts (cells/s)
    pub const JUMP_SPEED: f32 = 17.0;

    /// Collectible wobble angular speed (radians/s)
    pub const WOBBLE_SPEED: f32 = 8.0;
    /// Collectible wobble amplitude (cells)
    pub const WOBBLE_DIST: f32 = 0.07;

    /// Horizontal chase speed (cells/s)
    pub const CHASER_SPEED: f32 = 4.0;
    /// How far the player's feet may sink into a chaser and still count as a stomp
    pub const STOMP_TOLERANCE: f32 = 0.05;

    /// Hazard speeds per spawn character
    pub const HAZARD_HORIZONTAL_SPEED: f32 = 2.0;
    pub const HAZARD_VERTICAL_SPEED: f32 = 2.0;
    pub const HAZARD_DRIP_SPEED: f32 = 3.0;

    /// Largest frame step the host passes to the kernel (seconds)
    pub const MAX_FRAME_STEP: f32 = 0.1;
    /// Time the finished level keeps animating before the session moves on (seconds)
    pub const ENDING_DELAY: f32 = 1.0;
    /// Lives at the start of a game
    pub const START_LIVES: u32 = 3;

    /// Seed used by `GridLevel::parse` for collectible phases
    pub const DEFAULT_LEVEL_SEED: u64 = 0x1ea9_1ea9;
}
