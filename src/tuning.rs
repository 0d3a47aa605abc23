//! Data-driven game balance
//!
//! Every gameplay constant the simulation reads lives in [`Tuning`]. The
//! defaults are the canonical values; a host may override any subset from
//! JSON.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::TuningError;
use crate::sim::ObstacleKind;

/// Half-open numeric range `[min, max)` sampled uniformly
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Span {
    pub min: f32,
    pub max: f32,
}

impl Span {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Uniform sample; degenerate spans collapse to `min`
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f32 {
        if self.max > self.min {
            rng.random_range(self.min..self.max)
        } else {
            self.min
        }
    }

    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value < self.max
    }
}

/// Fixed per-type obstacle geometry and damage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub width: f32,
    pub height: f32,
    /// Lift of the obstacle's bottom edge above the ground line
    pub y_offset: f32,
    pub damage: u32,
}

/// Obstacle lookup table, one row per [`ObstacleKind`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObstacleTable {
    pub spike: ObstacleSpec,
    pub blocker: ObstacleSpec,
    pub enemy: ObstacleSpec,
}

impl Default for ObstacleTable {
    fn default() -> Self {
        Self {
            spike: ObstacleSpec {
                width: 40.0,
                height: 30.0,
                y_offset: 0.0,
                damage: 20,
            },
            // Raised off the ground: slide under it
            blocker: ObstacleSpec {
                width: 60.0,
                height: 50.0,
                y_offset: 50.0,
                damage: 10,
            },
            enemy: ObstacleSpec {
                width: 50.0,
                height: 70.0,
                y_offset: 0.0,
                damage: 25,
            },
        }
    }
}

impl ObstacleTable {
    pub fn get(&self, kind: ObstacleKind) -> &ObstacleSpec {
        match kind {
            ObstacleKind::Spike => &self.spike,
            ObstacleKind::Blocker => &self.blocker,
            ObstacleKind::Enemy => &self.enemy,
        }
    }
}

/// Complete gameplay configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === World ===
    pub canvas_width: f32,
    pub canvas_height: f32,
    pub ground_thickness: f32,
    pub ground_segments: usize,

    // === Player ===
    pub player_x: f32,
    pub player_width: f32,
    pub player_height: f32,
    pub max_health: u32,
    pub gravity: f32,
    pub jump_force: f32,
    pub max_slide_ticks: u32,

    // === Difficulty ===
    pub initial_speed: f32,
    pub speed_ramp: f32,

    // === Obstacles ===
    pub obstacles: ObstacleTable,
    pub enemy_jump_bonus: u64,
    /// Spawn when the newest obstacle is this close to the right edge
    pub obstacle_trigger_margin: f32,
    /// Distance from the spawn cursor to the next obstacle
    pub obstacle_gap: Span,
    /// Spawns beyond `canvas_width * runaway_factor` are re-anchored
    pub runaway_factor: f32,
    /// Offset past the right edge used when re-anchoring
    pub reanchor_gap: Span,

    // === Coins ===
    /// Coins spawn once the newest obstacle is this close to the right edge
    pub coin_trigger_margin: f32,
    pub coins_min: u32,
    pub coins_max: u32,
    pub coin_size: f32,
    pub coin_value: u64,
    /// Horizontal step between coins in a cluster
    pub coin_spacing: f32,
    pub coin_jitter: Span,
    /// Height of a coin's bottom edge above the ground line
    pub coin_lift: Span,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            ground_thickness: GROUND_THICKNESS,
            ground_segments: GROUND_SEGMENT_COUNT,

            player_x: PLAYER_X,
            player_width: PLAYER_WIDTH,
            player_height: PLAYER_HEIGHT,
            max_health: MAX_HEALTH,
            gravity: GRAVITY,
            jump_force: JUMP_FORCE,
            max_slide_ticks: MAX_SLIDE_TICKS,

            initial_speed: INITIAL_SPEED,
            speed_ramp: SPEED_RAMP,

            obstacles: ObstacleTable::default(),
            enemy_jump_bonus: ENEMY_JUMP_BONUS,
            obstacle_trigger_margin: 200.0,
            obstacle_gap: Span::new(150.0, 350.0),
            runaway_factor: 1.5,
            reanchor_gap: Span::new(50.0, 150.0),

            coin_trigger_margin: 300.0,
            coins_min: 1,
            coins_max: 3,
            coin_size: COIN_SIZE,
            coin_value: COIN_VALUE,
            coin_spacing: 30.0,
            coin_jitter: Span::new(-10.0, 10.0),
            coin_lift: Span::new(50.0, 100.0),
        }
    }
}

impl Tuning {
    /// Parse from JSON; omitted fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        log::info!("Loaded tuning overrides");
        Ok(tuning)
    }

    /// Reject configurations the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        let positive = [
            ("canvas_width", self.canvas_width),
            ("canvas_height", self.canvas_height),
            ("ground_thickness", self.ground_thickness),
            ("player_width", self.player_width),
            ("player_height", self.player_height),
            ("coin_size", self.coin_size),
            ("initial_speed", self.initial_speed),
            ("gravity", self.gravity),
            ("runaway_factor", self.runaway_factor),
        ];
        for (name, value) in positive {
            if !(value > 0.0) {
                return Err(TuningError::Invalid(format!("{name} must be positive")));
            }
        }

        if self.ground_segments == 0 {
            return Err(TuningError::Invalid("ground_segments must be at least 1".into()));
        }
        if self.max_health == 0 {
            return Err(TuningError::Invalid("max_health must be at least 1".into()));
        }
        if self.speed_ramp < 0.0 {
            return Err(TuningError::Invalid("speed_ramp must not be negative".into()));
        }
        if self.jump_force >= 0.0 {
            return Err(TuningError::Invalid("jump_force must point upward".into()));
        }
        if self.coins_min == 0 || self.coins_min > self.coins_max {
            return Err(TuningError::Invalid("coin count range is empty".into()));
        }

        let spans = [
            ("obstacle_gap", self.obstacle_gap),
            ("reanchor_gap", self.reanchor_gap),
            ("coin_jitter", self.coin_jitter),
            ("coin_lift", self.coin_lift),
        ];
        for (name, span) in spans {
            if span.min > span.max {
                return Err(TuningError::Invalid(format!("{name}: min exceeds max")));
            }
        }
        if self.obstacle_gap.min <= 0.0 {
            return Err(TuningError::Invalid("obstacle_gap must be positive".into()));
        }
        if self.reanchor_gap.min <= 0.0 {
            return Err(TuningError::Invalid("reanchor_gap must be positive".into()));
        }

        for kind in ObstacleKind::ALL {
            let spec = self.obstacles.get(kind);
            if !(spec.width > 0.0 && spec.height > 0.0) {
                return Err(TuningError::Invalid(format!("{kind:?} has empty dimensions")));
            }
        }

        Ok(())
    }

    /// Y coordinate of the ground line (top edge of the ground strip)
    #[inline]
    pub fn ground_top(&self) -> f32 {
        self.canvas_height - self.ground_thickness
    }

    /// Width of one ground segment
    #[inline]
    pub fn ground_segment_width(&self) -> f32 {
        self.canvas_width / 2.0
    }

    /// Standing player's top edge
    #[inline]
    pub fn player_start_y(&self) -> f32 {
        self.ground_top() - self.player_height
    }
}
