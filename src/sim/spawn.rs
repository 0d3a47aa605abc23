//! Procedural obstacle and coin generation
//!
//! Keeps a steady stream of obstacles just past the right edge and drops a
//! small coin cluster next to each one as it approaches.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::state::{Collectible, GameState, Obstacle, ObstacleKind};
use crate::tuning::Tuning;

/// Spawn RNG plus the obstacle spawn cursor
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    /// Right edge of the most recently spawned obstacle, in spawn-time
    /// coordinates. Never scrolled.
    pub last_spawn_x: f32,
}

impl Spawner {
    /// Unseeded: draws its seed from the thread RNG
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            rng: Pcg32::from_rng(&mut rand::rng()),
            last_spawn_x: tuning.canvas_width,
        }
    }

    pub fn seeded(seed: u64, tuning: &Tuning) -> Self {
        Self {
            rng: Pcg32::seed_from_u64(seed),
            last_spawn_x: tuning.canvas_width,
        }
    }

    /// Rewind the cursor for a new run. The RNG stream continues.
    pub fn reset(&mut self, tuning: &Tuning) {
        self.last_spawn_x = tuning.canvas_width;
    }

    /// Uniform pick among the obstacle kinds
    pub fn pick_kind(&mut self) -> ObstacleKind {
        let index = self.rng.random_range(0..ObstacleKind::ALL.len());
        ObstacleKind::ALL[index]
    }

    /// Next obstacle x: a random gap past the cursor, pulled back to just
    /// beyond the right edge when that would leave too long an empty stretch
    pub fn next_obstacle_x(&mut self, tuning: &Tuning) -> f32 {
        let x = self.last_spawn_x + tuning.obstacle_gap.sample(&mut self.rng);
        if x > tuning.canvas_width * tuning.runaway_factor {
            tuning.canvas_width + tuning.reanchor_gap.sample(&mut self.rng)
        } else {
            x
        }
    }

    fn coin_count(&mut self, tuning: &Tuning) -> u32 {
        self.rng.random_range(tuning.coins_min..=tuning.coins_max.max(tuning.coins_min))
    }
}

/// Spawn one obstacle when the field is empty or the newest obstacle has
/// scrolled within the trigger margin of the right edge
pub fn spawn_obstacles(state: &mut GameState) {
    let trigger_x = state.tuning.canvas_width - state.tuning.obstacle_trigger_margin;
    let due = match state.obstacles.last() {
        None => true,
        Some(last) => last.pos.x < trigger_x,
    };
    if !due {
        return;
    }

    let kind = state.spawner.pick_kind();
    let x = state.spawner.next_obstacle_x(&state.tuning);
    let id = state.next_entity_id();
    let obstacle = Obstacle::new(id, kind, x, &state.tuning);
    state.spawner.last_spawn_x = x + obstacle.size.x;

    log::debug!("Spawned {:?} #{} at x={:.1}", kind, id, x);
    state.obstacles.push(obstacle);
}

/// Drop a 1-3 coin cluster beside the newest obstacle once it is within the
/// coin margin. Each obstacle gets at most one cluster.
pub fn spawn_collectibles(state: &mut GameState) {
    let trigger_x = state.tuning.canvas_width - state.tuning.coin_trigger_margin;
    let anchor_x = match state.obstacles.last_mut() {
        Some(last) if !last.coins_spawned && last.pos.x < trigger_x => {
            last.coins_spawned = true;
            last.pos.x
        }
        _ => return,
    };

    let count = state.spawner.coin_count(&state.tuning);
    let ground_top = state.tuning.ground_top();
    for i in 0..count {
        let jitter = state.tuning.coin_jitter.sample(&mut state.spawner.rng);
        let lift = state.tuning.coin_lift.sample(&mut state.spawner.rng);
        let x = anchor_x + i as f32 * state.tuning.coin_spacing + jitter;
        let y = ground_top - state.tuning.coin_size - lift;
        let id = state.next_entity_id();
        state.collectibles.push(Collectible {
            id,
            pos: glam::Vec2::new(x, y),
            size: state.tuning.coin_size,
            value: state.tuning.coin_value,
            collected: false,
        });
    }
    log::debug!("Spawned {} coins near x={:.1}", count, anchor_x);
}
