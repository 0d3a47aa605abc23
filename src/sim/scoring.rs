//! Score and health bookkeeping
//!
//! Score only ever grows. Health only shrinks and bottoms out at zero.

use super::collision::Contact;
use super::state::{GameEvent, Obstacle, Player};

impl Player {
    /// Subtract damage, clamping at zero. Returns true when health is depleted.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        self.health = self.health.saturating_sub(amount);
        self.is_depleted()
    }

    pub fn award(&mut self, points: u64) {
        self.score = self.score.saturating_add(points);
    }

    #[inline]
    pub fn is_depleted(&self) -> bool {
        self.health == 0
    }
}

/// Apply an obstacle contact to the player.
///
/// Damage marks the obstacle as hit so it cannot deal damage again.
/// Returns true when this contact depleted the player's health.
pub fn apply_contact(
    player: &mut Player,
    obstacle: &mut Obstacle,
    contact: Contact,
    events: &mut Vec<GameEvent>,
) -> bool {
    match contact {
        Contact::Damage(damage) => {
            obstacle.hit = true;
            let depleted = player.take_damage(damage);
            log::debug!(
                "{:?} #{} hit for {} (health {})",
                obstacle.kind,
                obstacle.id,
                damage,
                player.health
            );
            events.push(GameEvent::ObstacleHit {
                id: obstacle.id,
                kind: obstacle.kind,
                damage,
                health: player.health,
            });
            depleted
        }
        Contact::Bonus(bonus) => {
            player.award(bonus);
            events.push(GameEvent::EnemyCleared {
                id: obstacle.id,
                bonus,
            });
            false
        }
        Contact::Avoided => false,
    }
}
