//! Per-frame simulation tick
//!
//! Core game loop: one call advances the world by one frame. Within a
//! running tick the order is fixed: input, ground, obstacles, collectibles,
//! player, speed. Obstacle and coin contacts therefore see the player as it
//! stood at the end of the previous tick.

use super::collision::{resolve_obstacle, touches_collectible};
use super::flow::end_run;
use super::scoring::apply_contact;
use super::spawn::{spawn_collectibles, spawn_obstacles};
use super::state::{GameEvent, GamePhase, GameState, GroundSegment};
use super::tutorial::TutorialAction;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump request (up / space / jump button)
    pub jump: bool,
    /// Slide request (down / slide button)
    pub slide: bool,
}

/// Advance the game state by one tick
pub fn tick(state: &mut GameState, input: &TickInput) {
    match state.phase {
        GamePhase::Running => tick_running(state, input),
        GamePhase::Tutorial => tick_tutorial(state, input),
        GamePhase::Home | GamePhase::GameOver => {}
    }
}

fn tick_running(state: &mut GameState, input: &TickInput) {
    if input.jump && !state.player.jump() {
        log::debug!("Jump ignored while {:?}", state.player.state);
    }
    if input.slide && !state.player.slide() {
        log::debug!("Slide ignored while {:?}", state.player.state);
    }

    state.time_ticks += 1;

    scroll_ground(state);

    spawn_obstacles(state);
    if update_obstacles(state) {
        end_run(state);
        return;
    }

    spawn_collectibles(state);
    update_collectibles(state);

    state.player.update(&state.tuning);

    // Difficulty ramp
    state.speed += state.tuning.speed_ramp;
}

/// Paused run behind the tutorial overlay: only the backdrop and the
/// demonstrated moves animate
fn tick_tutorial(state: &mut GameState, input: &TickInput) {
    if let Some(progress) = state.tutorial.as_mut() {
        let requested = [
            (input.jump, TutorialAction::Jump),
            (input.slide, TutorialAction::Slide),
        ];
        for (pressed, action) in requested {
            if pressed && progress.awaiting() == Some(action) {
                progress.observe(action);
                match action {
                    TutorialAction::Jump => state.player.jump(),
                    TutorialAction::Slide => state.player.slide(),
                };
            }
        }
    }

    state.time_ticks += 1;
    scroll_ground(state);
    state.player.update(&state.tuning);
}

/// Scroll the ground and recycle the leftmost segment once it is fully off
/// screen, appending it flush against the rightmost one
fn scroll_ground(state: &mut GameState) {
    for segment in state.ground.iter_mut() {
        segment.x -= state.speed;
    }

    let off_screen = state.ground.front().is_some_and(|first| first.right() < 0.0);
    if off_screen {
        state.ground.pop_front();
        if let Some(last) = state.ground.back() {
            let x = last.right();
            state.ground.push_back(GroundSegment::new(x, &state.tuning));
        }
    }
}

/// Scroll obstacles, resolve contacts and drop the ones that left the
/// screen. Returns true if the player's health ran out.
fn update_obstacles(state: &mut GameState) -> bool {
    let speed = state.speed;
    for obstacle in state.obstacles.iter_mut() {
        obstacle.pos.x -= speed;
    }

    for i in 0..state.obstacles.len() {
        let Some(contact) = resolve_obstacle(&state.player, &state.obstacles[i], &state.tuning) else {
            continue;
        };
        let depleted = apply_contact(
            &mut state.player,
            &mut state.obstacles[i],
            contact,
            &mut state.events,
        );
        if depleted {
            return true;
        }
    }

    state.obstacles.retain(|o| o.rect().right() >= 0.0);
    false
}

/// Scroll coins, collect the ones the player touches and drop the ones
/// that left the screen
fn update_collectibles(state: &mut GameState) {
    let speed = state.speed;
    let mut collected = Vec::new();

    for coin in state.collectibles.iter_mut() {
        coin.pos.x -= speed;
        if touches_collectible(&state.player, coin) {
            coin.collected = true;
            state.player.award(coin.value);
            collected.push(GameEvent::CoinCollected {
                id: coin.id,
                value: coin.value,
            });
        }
    }

    state.events.extend(collected);
    state
        .collectibles
        .retain(|c| !c.collected && c.rect().right() >= 0.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::flow::{Command, apply_command};
    use crate::sim::state::{Obstacle, ObstacleKind, PlayerState};
    use crate::tuning::Tuning;

    fn running(seed: u64) -> GameState {
        let mut state = GameState::with_seed(Tuning::default(), seed);
        apply_command(&mut state, Command::Start);
        state.drain_events();
        state
    }

    #[test]
    fn test_home_does_not_tick() {
        let mut state = GameState::with_seed(Tuning::default(), 1);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.ground[0].x, 0.0);
    }

    #[test]
    fn test_first_tick_spawns_and_scrolls() {
        let mut state = running(2);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.time_ticks, 1);
        assert_eq!(state.obstacles.len(), 1);
        assert_eq!(state.ground[0].x, -5.0);
        assert!((state.speed - 5.0005).abs() < 1e-6);
    }

    #[test]
    fn test_jump_input_accepted_while_running() {
        let mut state = running(3);
        tick(
            &mut state,
            &TickInput {
                jump: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.state, PlayerState::Jumping);
        assert!(state.player.pos.y < 450.0);

        // Slide refused mid-air
        tick(
            &mut state,
            &TickInput {
                slide: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.state, PlayerState::Jumping);
    }

    #[test]
    fn test_input_applies_before_contacts() {
        let mut state = running(4);
        let tuning = state.tuning.clone();
        // Overlapping spike already under the player
        let id = state.next_entity_id();
        state.obstacles.push(Obstacle::new(id, ObstacleKind::Spike, 125.0, &tuning));

        // The jump is requested this tick, so the pose is Jumping when the
        // obstacle is evaluated
        tick(
            &mut state,
            &TickInput {
                jump: true,
                ..Default::default()
            },
        );
        assert_eq!(state.player.health, 100);
        assert!(!state.obstacles[0].hit);
    }

    #[test]
    fn test_ground_recycles_contiguously() {
        let mut state = running(5);
        for _ in 0..400 {
            tick(&mut state, &TickInput { jump: true, ..Default::default() });
            if state.phase != GamePhase::Running {
                break;
            }
            assert_eq!(state.ground.len(), 3);
            for pair in state.ground.iter().collect::<Vec<_>>().windows(2) {
                assert!((pair[0].right() - pair[1].x).abs() < 1e-3);
            }
            assert!(state.ground[0].right() >= 0.0);
        }
    }

    #[test]
    fn test_off_screen_entities_removed() {
        let mut state = running(6);
        let tuning = state.tuning.clone();
        let id = state.next_entity_id();
        let mut obstacle = Obstacle::new(id, ObstacleKind::Spike, -38.0, &tuning);
        obstacle.hit = true;
        state.obstacles.push(obstacle);
        tick(&mut state, &TickInput::default());
        assert!(state.obstacles.iter().all(|o| o.id != id));
    }

    #[test]
    fn test_tutorial_tick_scrolls_without_spawning() {
        let mut state = GameState::with_seed(Tuning::default(), 7);
        apply_command(&mut state, Command::OpenTutorial);
        for _ in 0..50 {
            tick(&mut state, &TickInput::default());
        }
        assert!(state.obstacles.is_empty());
        assert!(state.collectibles.is_empty());
        assert_eq!(state.speed, 5.0);
        assert!(state.ground[0].x < 0.0);
    }

    #[test]
    fn test_tutorial_gated_action_performs_move() {
        let mut state = GameState::with_seed(Tuning::default(), 8);
        apply_command(&mut state, Command::OpenTutorial);

        // Informational step: jump is ignored
        tick(&mut state, &TickInput { jump: true, ..Default::default() });
        assert_eq!(state.player.state, PlayerState::Idle);

        apply_command(&mut state, Command::TutorialNext);
        tick(&mut state, &TickInput { slide: true, ..Default::default() });
        assert_eq!(state.player.state, PlayerState::Idle);
        assert!(!apply_command(&mut state, Command::TutorialNext));

        tick(&mut state, &TickInput { jump: true, ..Default::default() });
        assert_eq!(state.player.state, PlayerState::Jumping);
        assert!(apply_command(&mut state, Command::TutorialNext));
    }
}
