//! Parkour Runner - A side-scrolling obstacle-avoidance game
//!
//! Core modules:
//! - `sim`: Simulation (physics, collisions, spawning, game phases)
//! - `skin`: Skin catalog and asset-role resolution
//! - `assets`: Startup asset loading and flat-color fallbacks
//! - `tuning`: Data-driven game balance
//! - `driver`: Per-frame driver and renderer snapshots

pub mod assets;
pub mod driver;
pub mod error;
pub mod sim;
pub mod skin;
pub mod tuning;

pub use driver::{FrameSnapshot, Game};
pub use error::{AssetError, SkinError, TuningError};
pub use tuning::Tuning;

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Logical canvas dimensions
    pub const CANVAS_WIDTH: f32 = 800.0;
    pub const CANVAS_HEIGHT: f32 = 600.0;

    /// Ground strip along the bottom of the canvas
    pub const GROUND_THICKNESS: f32 = 50.0;
    /// Segments alive at once; each is half the canvas wide
    pub const GROUND_SEGMENT_COUNT: usize = 3;

    /// Downward acceleration (units/tick²)
    pub const GRAVITY: f32 = 0.8;
    /// Initial vertical velocity of a jump (negative = up)
    pub const JUMP_FORCE: f32 = -18.0;
    /// Slide duration in ticks
    pub const MAX_SLIDE_TICKS: u32 = 60;

    /// Player defaults
    pub const PLAYER_X: f32 = 100.0;
    pub const PLAYER_WIDTH: f32 = 60.0;
    pub const PLAYER_HEIGHT: f32 = 100.0;
    pub const MAX_HEALTH: u32 = 100;

    /// Scroll speed at run start and its per-tick increase
    pub const INITIAL_SPEED: f32 = 5.0;
    pub const SPEED_RAMP: f32 = 0.0005;

    /// Score for clearing an enemy mid-jump (per overlapping tick)
    pub const ENEMY_JUMP_BONUS: u64 = 10;

    /// Coin defaults
    pub const COIN_SIZE: f32 = 20.0;
    pub const COIN_VALUE: u64 = 5;
}
