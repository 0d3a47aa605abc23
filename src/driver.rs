//! Frame driver
//!
//! [`Game`] owns everything a running session needs: simulation state,
//! the skin catalog and the startup load report. The host calls
//! [`Game::frame`] once per rendered frame; stopping the calls stops the game.

use serde::Serialize;

use crate::assets::{self, Appearance, AssetManifest, AssetStore, LoadReport};
use crate::error::SkinError;
use crate::sim::{
    Command, GameEvent, GamePhase, GameState, NextButton, ObstacleKind, PlayerState, Rect,
    TickInput, apply_command, tick,
};
use crate::skin::{AssetRole, Skin, SkinCatalog};

/// Player as drawn this frame
#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub rect: Rect,
    pub state: PlayerState,
    pub appearance: Appearance,
}

#[derive(Debug, Clone, Serialize)]
pub struct GroundView {
    pub rect: Rect,
    pub appearance: Appearance,
}

#[derive(Debug, Clone, Serialize)]
pub struct ObstacleView {
    pub id: u32,
    pub kind: ObstacleKind,
    pub rect: Rect,
    pub hit: bool,
    pub appearance: Appearance,
}

#[derive(Debug, Clone, Serialize)]
pub struct CollectibleView {
    pub id: u32,
    pub rect: Rect,
    pub collected: bool,
    pub appearance: Appearance,
}

/// Tutorial overlay contents
#[derive(Debug, Clone, Serialize)]
pub struct TutorialPrompt {
    pub step: usize,
    pub message: &'static str,
    pub button: NextButton,
}

/// Read-only view of one frame for renderers and HUDs
#[derive(Debug, Clone, Serialize)]
pub struct FrameSnapshot {
    pub phase: GamePhase,
    pub score: u64,
    pub health: u32,
    pub skin: String,
    pub player: PlayerView,
    pub ground: Vec<GroundView>,
    pub obstacles: Vec<ObstacleView>,
    pub collectibles: Vec<CollectibleView>,
    pub tutorial: Option<TutorialPrompt>,
}

/// Game session
#[derive(Debug)]
pub struct Game {
    state: GameState,
    skins: SkinCatalog,
    assets: LoadReport,
    /// One-shot inputs collected between frames
    pending: TickInput,
}

impl Game {
    /// Load all assets, then open at the home screen. Partial or total load
    /// failure still yields a playable game.
    pub fn boot<S: AssetStore + ?Sized>(
        store: &mut S,
        manifest: &AssetManifest,
        skins: SkinCatalog,
        state: GameState,
    ) -> Self {
        let assets = assets::load_all(store, manifest);
        Self::new(state, skins, assets)
    }

    pub fn new(state: GameState, skins: SkinCatalog, assets: LoadReport) -> Self {
        Self {
            state,
            skins,
            assets,
            pending: TickInput::default(),
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn phase(&self) -> GamePhase {
        self.state.phase
    }

    pub fn score(&self) -> u64 {
        self.state.player.score
    }

    pub fn health(&self) -> u32 {
        self.state.player.health
    }

    pub fn skins(&self) -> &SkinCatalog {
        &self.skins
    }

    pub fn assets(&self) -> &LoadReport {
        &self.assets
    }

    /// Queue a jump for the next frame
    pub fn request_jump(&mut self) {
        self.pending.jump = true;
    }

    /// Queue a slide for the next frame
    pub fn request_slide(&mut self) {
        self.pending.slide = true;
    }

    /// Forward a menu request to the phase state machine
    pub fn command(&mut self, command: Command) -> bool {
        let applied = apply_command(&mut self.state, command);
        if applied {
            self.pending = TickInput::default();
        }
        applied
    }

    /// Skin picker contents. The picker is a home-screen overlay and does
    /// not change phase; unavailable during a run.
    pub fn open_skins(&self) -> Option<&[Skin]> {
        if self.state.phase == GamePhase::Running {
            log::debug!("Skin picker unavailable while running");
            return None;
        }
        Some(self.skins.skins())
    }

    /// Switch the active skin. Only allowed outside a run.
    pub fn select_skin(&mut self, id: &str) -> Result<(), SkinError> {
        if self.state.phase == GamePhase::Running {
            return Err(SkinError::SelectionDuringRun);
        }
        self.skins.select(id)?;
        Ok(())
    }

    /// Run one tick with the queued input. Returns the events raised since
    /// the previous frame, including those from menu requests.
    pub fn frame(&mut self) -> Vec<GameEvent> {
        let input = std::mem::take(&mut self.pending);
        tick(&mut self.state, &input);
        self.state.drain_events()
    }

    /// How `role` is drawn with the active skin and loaded assets
    pub fn appearance(&self, role: AssetRole) -> Appearance {
        assets::appearance(&self.skins, &self.assets, role)
    }

    pub fn snapshot(&self) -> FrameSnapshot {
        let state = &self.state;
        let player = &state.player;

        let ground_look = self.appearance(AssetRole::Ground);
        let coin_look = self.appearance(AssetRole::Coin);

        FrameSnapshot {
            phase: state.phase,
            score: player.score,
            health: player.health,
            skin: self.skins.active().id.clone(),
            player: PlayerView {
                rect: player.rect(),
                state: player.state,
                appearance: self.appearance(AssetRole::for_player(player.state)),
            },
            ground: state
                .ground
                .iter()
                .map(|segment| GroundView {
                    rect: segment.rect(),
                    appearance: ground_look.clone(),
                })
                .collect(),
            obstacles: state
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind,
                    rect: o.rect(),
                    hit: o.hit,
                    appearance: self.appearance(AssetRole::for_obstacle(o.kind)),
                })
                .collect(),
            collectibles: state
                .collectibles
                .iter()
                .map(|c| CollectibleView {
                    id: c.id,
                    rect: c.rect(),
                    collected: c.collected,
                    appearance: coin_look.clone(),
                })
                .collect(),
            tutorial: state.tutorial.as_ref().map(|t| {
                let (message, button) = t.prompt();
                TutorialPrompt {
                    step: t.step_index(),
                    message,
                    button,
                }
            }),
        }
    }
}

/// Simple demo AI: jump or slide when the next live obstacle is about to
/// reach the player
pub fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    if state.phase != GamePhase::Running {
        return input;
    }

    let player = state.player.rect();
    let reach = state.speed * 2.0;
    let next = state
        .obstacles
        .iter()
        .filter(|o| !o.hit && o.rect().right() > player.left())
        .min_by(|a, b| a.pos.x.total_cmp(&b.pos.x));

    if let Some(obstacle) = next {
        if obstacle.pos.x - player.right() < reach {
            match obstacle.kind.rule().avoided_by {
                PlayerState::Jumping => input.jump = true,
                PlayerState::Sliding => input.slide = true,
                PlayerState::Idle => {}
            }
        }
    }
    input
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Shape;
    use crate::tuning::Tuning;

    fn game() -> Game {
        Game::new(
            GameState::with_seed(Tuning::default(), 21),
            SkinCatalog::builtin(),
            LoadReport::default(),
        )
    }

    #[test]
    fn test_inputs_are_one_shot() {
        let mut game = game();
        game.command(Command::Start);
        game.request_jump();
        game.frame();
        assert_eq!(game.state().player.state, PlayerState::Jumping);

        // Land, then make sure the old request is not replayed
        for _ in 0..60 {
            game.frame();
        }
        assert_eq!(game.state().player.state, PlayerState::Idle);
    }

    #[test]
    fn test_frame_returns_command_events() {
        let mut game = game();
        assert!(game.command(Command::Start));
        let events = game.frame();
        assert_eq!(
            events.first(),
            Some(&GameEvent::PhaseChanged {
                from: GamePhase::Home,
                to: GamePhase::Running
            })
        );
        // Already drained
        assert!(
            !game
                .frame()
                .iter()
                .any(|e| matches!(e, GameEvent::PhaseChanged { .. }))
        );
    }

    #[test]
    fn test_skin_selection_blocked_during_run() {
        let mut game = game();
        let ids: Vec<_> = game.open_skins().unwrap().iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, ["classic", "desert"]);

        game.command(Command::Start);
        assert!(game.open_skins().is_none());
        assert_eq!(game.select_skin("desert"), Err(SkinError::SelectionDuringRun));
        assert_eq!(game.skins().active().id, "classic");
    }

    #[test]
    fn test_snapshot_uses_fallbacks_without_assets() {
        let mut game = game();
        game.command(Command::Start);
        game.frame();
        let snapshot = game.snapshot();
        assert_eq!(snapshot.phase, GamePhase::Running);
        assert_eq!(snapshot.ground.len(), 3);
        assert_eq!(snapshot.obstacles.len(), 1);
        assert_eq!(
            snapshot.player.appearance,
            Appearance::Flat {
                color: 0xff6347,
                shape: Shape::Rect
            }
        );
        assert!(snapshot.tutorial.is_none());
        assert!(serde_json::to_string(&snapshot).is_ok());
    }

    #[test]
    fn test_snapshot_tutorial_prompt() {
        let mut game = game();
        game.command(Command::OpenTutorial);
        let prompt = game.snapshot().tutorial.unwrap();
        assert_eq!(prompt.step, 0);
        assert_eq!(prompt.message, "Welcome to Parkour Runner!");
        assert_eq!(prompt.button, NextButton::Next);
    }

    #[test]
    fn test_autopilot_picks_avoiding_move() {
        let mut state = GameState::with_seed(Tuning::default(), 3);
        apply_command(&mut state, Command::Start);
        let tuning = state.tuning.clone();

        let id = state.next_entity_id();
        state
            .obstacles
            .push(crate::sim::Obstacle::new(id, ObstacleKind::Blocker, 165.0, &tuning));
        assert!(autopilot(&state).slide);

        state.obstacles.clear();
        let id = state.next_entity_id();
        state
            .obstacles
            .push(crate::sim::Obstacle::new(id, ObstacleKind::Spike, 165.0, &tuning));
        let input = autopilot(&state);
        assert!(input.jump && !input.slide);

        state.obstacles[0].pos.x = 500.0;
        assert!(!autopilot(&state).jump);
    }
}
