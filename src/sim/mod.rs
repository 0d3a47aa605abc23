//! Simulation module
//!
//! All gameplay logic lives here:
//! - One tick per rendered frame, no wall-clock dependencies
//! - Fixed per-tick update order (ground, obstacles, collectibles, player)
//! - All RNG draws go through the [`Spawner`]
//! - No rendering or platform dependencies

pub mod collision;
pub mod flow;
pub mod rect;
pub mod scoring;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod tutorial;

pub use collision::{Contact, ObstacleRule, resolve_obstacle, touches_collectible};
pub use flow::{Command, apply_command};
pub use rect::Rect;
pub use spawn::{Spawner, spawn_collectibles, spawn_obstacles};
pub use state::{
    Collectible, GameEvent, GamePhase, GameState, GroundSegment, Obstacle, ObstacleKind, Player,
    PlayerState,
};
pub use tick::{TickInput, tick};
pub use tutorial::{Advance, NextButton, StepKind, TUTORIAL_STEPS, TutorialAction, TutorialProgress};
