//! Player-vs-entity collision rules
//!
//! Obstacle behavior is table driven: each kind names the pose that avoids
//! it and whether avoiding it pays a bonus.

use super::state::{Collectible, Obstacle, ObstacleKind, Player, PlayerState};
use crate::tuning::Tuning;

/// How an obstacle kind is avoided
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ObstacleRule {
    /// Pose in which contact is harmless
    pub avoided_by: PlayerState,
    /// Harmless contact awards the enemy bonus
    pub bonus_on_avoid: bool,
}

impl ObstacleKind {
    pub const fn rule(self) -> ObstacleRule {
        match self {
            ObstacleKind::Spike => ObstacleRule {
                avoided_by: PlayerState::Jumping,
                bonus_on_avoid: false,
            },
            ObstacleKind::Blocker => ObstacleRule {
                avoided_by: PlayerState::Sliding,
                bonus_on_avoid: false,
            },
            ObstacleKind::Enemy => ObstacleRule {
                avoided_by: PlayerState::Jumping,
                bonus_on_avoid: true,
            },
        }
    }
}

/// Result of the player touching an obstacle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Contact {
    /// Player takes this much damage
    Damage(u32),
    /// Player cleared an enemy and earns this bonus
    Bonus(u64),
    /// Touched in the avoiding pose, nothing happens
    Avoided,
}

/// Evaluate one obstacle against the player.
///
/// Returns `None` when there is no contact: rectangles apart, or the
/// obstacle already dealt its damage.
pub fn resolve_obstacle(player: &Player, obstacle: &Obstacle, tuning: &Tuning) -> Option<Contact> {
    if obstacle.hit || !player.rect().overlaps(&obstacle.rect()) {
        return None;
    }

    let rule = obstacle.kind.rule();
    let contact = if player.state != rule.avoided_by {
        Contact::Damage(obstacle.damage)
    } else if rule.bonus_on_avoid {
        Contact::Bonus(tuning.enemy_jump_bonus)
    } else {
        Contact::Avoided
    };
    Some(contact)
}

/// Coins are picked up on any overlap, whatever the player's pose
pub fn touches_collectible(player: &Player, coin: &Collectible) -> bool {
    !coin.collected && player.rect().overlaps(&coin.rect())
}
