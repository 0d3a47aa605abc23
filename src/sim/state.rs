//! Game state and core simulation types
//!
//! [`GameState`] is the single simulation context: player, entity sequences,
//! phase, speed and spawn cursor all live here and nowhere else.

use std::collections::VecDeque;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::rect::Rect;
use super::spawn::Spawner;
use super::tutorial::TutorialProgress;
use crate::tuning::Tuning;

/// Coarse game mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Menus; no simulation
    Home,
    /// Scripted walkthrough. The run is paused: ground scrolls and the
    /// player animates, but nothing spawns or collides.
    Tutorial,
    /// Full simulation and input
    Running,
    /// Simulation frozen, final score exposed
    GameOver,
}

/// Discrete player pose. Jumping and sliding are mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PlayerState {
    #[default]
    Idle,
    Jumping,
    Sliding,
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: Vec2,
    pub vel_y: f32,
    pub width: f32,
    /// Current height (halved while sliding)
    pub height: f32,
    pub health: u32,
    pub score: u64,
    pub state: PlayerState,
    /// Ticks of slide remaining
    pub slide_ticks: u32,
    pub max_slide_ticks: u32,
    pub jump_force: f32,
    /// Standing height, restored when a slide ends
    pub original_height: f32,
    /// Standing y, restored when a slide ends
    pub original_y: f32,
}

impl Player {
    pub fn new(tuning: &Tuning) -> Self {
        let y = tuning.player_start_y();
        Self {
            pos: Vec2::new(tuning.player_x, y),
            vel_y: 0.0,
            width: tuning.player_width,
            height: tuning.player_height,
            health: tuning.max_health,
            score: 0,
            state: PlayerState::Idle,
            slide_ticks: 0,
            max_slide_ticks: tuning.max_slide_ticks,
            jump_force: tuning.jump_force,
            original_height: tuning.player_height,
            original_y: y,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    #[inline]
    pub fn is_jumping(&self) -> bool {
        self.state == PlayerState::Jumping
    }

    #[inline]
    pub fn is_sliding(&self) -> bool {
        self.state == PlayerState::Sliding
    }

    /// Start a jump. Refused while already jumping or sliding.
    pub fn jump(&mut self) -> bool {
        if self.state != PlayerState::Idle {
            return false;
        }
        self.vel_y = self.jump_force;
        self.state = PlayerState::Jumping;
        true
    }

    /// Start a slide. Refused while already jumping or sliding.
    pub fn slide(&mut self) -> bool {
        if self.state != PlayerState::Idle {
            return false;
        }
        self.state = PlayerState::Sliding;
        self.slide_ticks = self.max_slide_ticks;
        true
    }

    /// Gravity, ground contact and slide countdown for one tick
    pub fn update(&mut self, tuning: &Tuning) {
        self.vel_y += tuning.gravity;
        self.pos.y += self.vel_y;

        let ground_level = tuning.ground_top() - self.height;
        if self.pos.y >= ground_level {
            self.pos.y = ground_level;
            self.vel_y = 0.0;
            if self.state != PlayerState::Sliding {
                self.state = PlayerState::Idle;
            }
        }

        if self.state == PlayerState::Sliding {
            self.slide_ticks = self.slide_ticks.saturating_sub(1);
            // Crouch: half height, feet stay on the ground
            self.height = self.original_height / 2.0;
            self.pos.y = self.original_y + self.original_height / 2.0;
            if self.slide_ticks == 0 {
                self.state = PlayerState::Idle;
                self.height = self.original_height;
                self.pos.y = self.original_y;
            }
        }
    }
}

/// A tile of scrolling ground
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroundSegment {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl GroundSegment {
    pub fn new(x: f32, tuning: &Tuning) -> Self {
        Self {
            x,
            y: tuning.ground_top(),
            width: tuning.ground_segment_width(),
            height: tuning.ground_thickness,
        }
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    /// Low and sharp: jump it
    Spike,
    /// Raised bar: slide under it
    Blocker,
    /// Jump it for a bonus
    Enemy,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 3] = [ObstacleKind::Spike, ObstacleKind::Blocker, ObstacleKind::Enemy];
}

/// An obstacle entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub damage: u32,
    /// Set once this obstacle has dealt damage; it never deals damage again
    pub hit: bool,
    /// Set once a coin cluster has been generated for this obstacle
    pub coins_spawned: bool,
}

impl Obstacle {
    /// Build an obstacle of `kind` standing at `x`, sized from the tuning table
    pub fn new(id: u32, kind: ObstacleKind, x: f32, tuning: &Tuning) -> Self {
        let spec = tuning.obstacles.get(kind);
        let y = tuning.ground_top() - spec.height - spec.y_offset;
        Self {
            id,
            kind,
            pos: Vec2::new(x, y),
            size: Vec2::new(spec.width, spec.height),
            damage: spec.damage,
            hit: false,
            coins_spawned: false,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect {
            pos: self.pos,
            size: self.size,
        }
    }
}

/// A coin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Collectible {
    pub id: u32,
    /// Top-left corner
    pub pos: Vec2,
    /// Side of the collision square
    pub size: f32,
    pub value: u64,
    pub collected: bool,
}

impl Collectible {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }
}

/// Things that happened, for hosts (HUD, audio) to react to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged { from: GamePhase, to: GamePhase },
    ObstacleHit { id: u32, kind: ObstacleKind, damage: u32, health: u32 },
    EnemyCleared { id: u32, bonus: u64 },
    CoinCollected { id: u32, value: u64 },
    GameOver { score: u64 },
}

/// Complete simulation context
#[derive(Debug, Clone)]
pub struct GameState {
    pub tuning: Tuning,
    pub phase: GamePhase,
    pub player: Player,
    /// Ordered left to right; recycled front-to-back
    pub ground: VecDeque<GroundSegment>,
    pub obstacles: Vec<Obstacle>,
    pub collectibles: Vec<Collectible>,
    /// Current scroll speed (units/tick)
    pub speed: f32,
    /// Ticks simulated this run
    pub time_ticks: u64,
    pub spawner: Spawner,
    /// Present only while in [`GamePhase::Tutorial`]
    pub tutorial: Option<TutorialProgress>,
    pub(crate) events: Vec<GameEvent>,
    next_id: u32,
}

fn checked(tuning: Tuning) -> Tuning {
    match tuning.validate() {
        Ok(()) => tuning,
        Err(e) => {
            log::warn!("{}. Using default tuning.", e);
            Tuning::default()
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// Fresh state at the home screen with default tuning and an unseeded spawner
    pub fn new() -> Self {
        Self::with_tuning(Tuning::default())
    }

    /// Invalid tuning is replaced by the defaults, with a warning
    pub fn with_tuning(tuning: Tuning) -> Self {
        let tuning = checked(tuning);
        let spawner = Spawner::new(&tuning);
        Self::build(tuning, spawner)
    }

    /// Reproducible spawns, for tests and demos
    pub fn with_seed(tuning: Tuning, seed: u64) -> Self {
        let tuning = checked(tuning);
        let spawner = Spawner::seeded(seed, &tuning);
        Self::build(tuning, spawner)
    }

    fn build(tuning: Tuning, spawner: Spawner) -> Self {
        let mut state = Self {
            player: Player::new(&tuning),
            phase: GamePhase::Home,
            ground: VecDeque::new(),
            obstacles: Vec::new(),
            collectibles: Vec::new(),
            speed: tuning.initial_speed,
            time_ticks: 0,
            spawner,
            tutorial: None,
            events: Vec::new(),
            next_id: 1,
            tuning,
        };
        state.reset_run();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Restore every run-scoped value to its initial state.
    /// The phase is left alone.
    pub fn reset_run(&mut self) {
        self.player = Player::new(&self.tuning);
        self.obstacles.clear();
        self.collectibles.clear();
        self.ground.clear();
        let width = self.tuning.ground_segment_width();
        for i in 0..self.tuning.ground_segments {
            self.ground.push_back(GroundSegment::new(i as f32 * width, &self.tuning));
        }
        self.speed = self.tuning.initial_speed;
        self.time_ticks = 0;
        self.spawner.reset(&self.tuning);
        self.tutorial = None;
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Events recorded since the last drain
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Phase change with logging and an event
    pub(crate) fn set_phase(&mut self, to: GamePhase) {
        let from = self.phase;
        if from == to {
            return;
        }
        log::info!("Phase {:?} -> {:?}", from, to);
        self.phase = to;
        self.push_event(GameEvent::PhaseChanged { from, to });
    }
}
