//! Game phase state machine
//!
//! Valid transitions:
//! - Home -> Running (start)
//! - Home -> Tutorial (open tutorial)
//! - Tutorial -> Tutorial (next, while steps remain)
//! - Tutorial -> Home (exit, or next past the last step)
//! - Running -> GameOver (health depleted, see [`end_run`])
//! - GameOver -> Running (restart)
//! - GameOver -> Home (exit / acknowledge)
//!
//! Anything else is ignored.

use super::state::{GameEvent, GamePhase, GameState};
use super::tutorial::{Advance, TutorialProgress};

/// Phase requests issued by menus and screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    OpenTutorial,
    TutorialNext,
    ExitToHome,
    Restart,
}

/// Apply a phase request. Returns false when the request is not valid in
/// the current phase (a no-op, not an error).
pub fn apply_command(state: &mut GameState, command: Command) -> bool {
    match (state.phase, command) {
        (GamePhase::Home, Command::Start) | (GamePhase::GameOver, Command::Restart) => {
            start_run(state);
            true
        }
        (GamePhase::Home, Command::OpenTutorial) => {
            state.reset_run();
            state.tutorial = Some(TutorialProgress::new());
            state.set_phase(GamePhase::Tutorial);
            true
        }
        (GamePhase::Tutorial, Command::TutorialNext) => {
            let advance = match state.tutorial.as_mut() {
                Some(progress) => progress.advance(),
                None => Advance::Finished,
            };
            match advance {
                Advance::Blocked => {
                    log::debug!("Tutorial step waiting for its action");
                    false
                }
                Advance::Moved => true,
                Advance::Finished => {
                    leave_tutorial(state);
                    true
                }
            }
        }
        (GamePhase::Tutorial, Command::ExitToHome) => {
            leave_tutorial(state);
            true
        }
        (GamePhase::GameOver, Command::ExitToHome) => {
            state.set_phase(GamePhase::Home);
            true
        }
        (phase, command) => {
            log::debug!("Ignoring {:?} in {:?}", command, phase);
            false
        }
    }
}

fn start_run(state: &mut GameState) {
    state.reset_run();
    state.set_phase(GamePhase::Running);
    log::info!("Run started");
}

fn leave_tutorial(state: &mut GameState) {
    state.tutorial = None;
    state.set_phase(GamePhase::Home);
}

/// Terminal transition when health runs out mid-tick
pub(crate) fn end_run(state: &mut GameState) {
    let score = state.player.score;
    state.set_phase(GamePhase::GameOver);
    state.push_event(GameEvent::GameOver { score });
    log::info!("Game over: score {} after {} ticks", score, state.time_ticks);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::tutorial::TutorialAction;
    use crate::tuning::Tuning;

    fn home() -> GameState {
        GameState::with_seed(Tuning::default(), 11)
    }

    #[test]
    fn test_start_resets_run() {
        let mut state = home();
        state.player.score = 99;
        state.speed = 12.0;
        assert!(apply_command(&mut state, Command::Start));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.score, 0);
        assert_eq!(state.speed, 5.0);
        assert_eq!(
            state.events(),
            &[GameEvent::PhaseChanged {
                from: GamePhase::Home,
                to: GamePhase::Running
            }]
        );
    }

    #[test]
    fn test_invalid_commands_are_noops() {
        let mut state = home();
        assert!(!apply_command(&mut state, Command::Restart));
        assert!(!apply_command(&mut state, Command::TutorialNext));
        assert!(!apply_command(&mut state, Command::ExitToHome));
        assert_eq!(state.phase, GamePhase::Home);

        apply_command(&mut state, Command::Start);
        assert!(!apply_command(&mut state, Command::Start));
        assert!(!apply_command(&mut state, Command::OpenTutorial));
        assert!(!apply_command(&mut state, Command::ExitToHome));
        assert_eq!(state.phase, GamePhase::Running);
    }

    #[test]
    fn test_game_over_paths() {
        let mut state = home();
        apply_command(&mut state, Command::Start);
        state.player.score = 40;
        end_run(&mut state);
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(state.events().contains(&GameEvent::GameOver { score: 40 }));

        assert!(apply_command(&mut state, Command::Restart));
        assert_eq!(state.phase, GamePhase::Running);
        assert_eq!(state.player.score, 0);

        end_run(&mut state);
        assert!(apply_command(&mut state, Command::ExitToHome));
        assert_eq!(state.phase, GamePhase::Home);
    }

    #[test]
    fn test_tutorial_enter_and_exit() {
        let mut state = home();
        assert!(apply_command(&mut state, Command::OpenTutorial));
        assert_eq!(state.phase, GamePhase::Tutorial);
        assert_eq!(state.tutorial.as_ref().map(|t| t.step_index()), Some(0));

        assert!(apply_command(&mut state, Command::TutorialNext));
        // Gated on jump
        assert!(!apply_command(&mut state, Command::TutorialNext));
        assert_eq!(state.tutorial.as_ref().map(|t| t.step_index()), Some(1));

        assert!(apply_command(&mut state, Command::ExitToHome));
        assert_eq!(state.phase, GamePhase::Home);
        assert!(state.tutorial.is_none());
    }

    #[test]
    fn test_tutorial_runs_to_completion() {
        let mut state = home();
        apply_command(&mut state, Command::OpenTutorial);
        for _ in 0..10 {
            if state.phase != GamePhase::Tutorial {
                break;
            }
            if let Some(progress) = state.tutorial.as_mut() {
                if let Some(action) = progress.awaiting() {
                    progress.observe(action);
                }
            }
            apply_command(&mut state, Command::TutorialNext);
        }
        assert_eq!(state.phase, GamePhase::Home);

        // Reopening starts from the top
        apply_command(&mut state, Command::OpenTutorial);
        let progress = state.tutorial.as_ref().unwrap();
        assert_eq!(progress.step_index(), 0);
        assert_eq!(progress.awaiting(), None::<TutorialAction>);
    }
}
