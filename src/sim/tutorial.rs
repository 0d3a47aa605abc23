//! Tutorial script
//!
//! A fixed list of steps. Informational steps advance on "next"; gated
//! steps wait until the player performs the named action, then wait for
//! "next". The last step offers "done", which leaves the tutorial.

use serde::Serialize;

/// Actions a tutorial step can wait for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TutorialAction {
    Jump,
    Slide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StepKind {
    Info,
    Gated(TutorialAction),
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TutorialStep {
    pub message: &'static str,
    pub kind: StepKind,
}

pub const TUTORIAL_STEPS: [TutorialStep; 6] = [
    TutorialStep {
        message: "Welcome to Parkour Runner!",
        kind: StepKind::Info,
    },
    TutorialStep {
        message: "Press JUMP to leap over obstacles.",
        kind: StepKind::Gated(TutorialAction::Jump),
    },
    TutorialStep {
        message: "Press SLIDE to duck under low obstacles.",
        kind: StepKind::Gated(TutorialAction::Slide),
    },
    TutorialStep {
        message: "Collect coins for points!",
        kind: StepKind::Info,
    },
    TutorialStep {
        message: "Avoid enemies and spikes!",
        kind: StepKind::Info,
    },
    TutorialStep {
        message: "Good luck, runner!",
        kind: StepKind::Finish,
    },
];

/// State of the "next" control for the current step
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum NextButton {
    /// Waiting for the gated action
    Hidden,
    Next,
    Done,
}

/// Outcome of a "next" request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Gated step whose action has not been seen yet
    Blocked,
    /// Moved to the following step
    Moved,
    /// Stepped past the last step
    Finished,
}

/// Position within the script
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TutorialProgress {
    step: usize,
    action_seen: bool,
}

impl TutorialProgress {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step_index(&self) -> usize {
        self.step
    }

    pub fn current(&self) -> &'static TutorialStep {
        &TUTORIAL_STEPS[self.step.min(TUTORIAL_STEPS.len() - 1)]
    }

    /// The action the current step is waiting for, if any
    pub fn awaiting(&self) -> Option<TutorialAction> {
        match self.current().kind {
            StepKind::Gated(action) if !self.action_seen => Some(action),
            _ => None,
        }
    }

    pub fn next_button(&self) -> NextButton {
        match self.current().kind {
            StepKind::Info => NextButton::Next,
            StepKind::Gated(_) if self.action_seen => NextButton::Next,
            StepKind::Gated(_) => NextButton::Hidden,
            StepKind::Finish => NextButton::Done,
        }
    }

    /// What the overlay shows: current message and the "next" control
    pub fn prompt(&self) -> (&'static str, NextButton) {
        (self.current().message, self.next_button())
    }

    /// Record a player action. Returns true if it satisfied the current step.
    pub fn observe(&mut self, action: TutorialAction) -> bool {
        match self.current().kind {
            StepKind::Gated(wanted) if wanted == action => {
                self.action_seen = true;
                true
            }
            _ => false,
        }
    }

    pub fn advance(&mut self) -> Advance {
        if self.next_button() == NextButton::Hidden {
            return Advance::Blocked;
        }
        self.step += 1;
        self.action_seen = false;
        if self.step >= TUTORIAL_STEPS.len() {
            Advance::Finished
        } else {
            Advance::Moved
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_walk_whole_script() {
        let mut progress = TutorialProgress::new();
        assert_eq!(progress.next_button(), NextButton::Next);
        assert_eq!(progress.advance(), Advance::Moved);

        // Jump gate
        assert_eq!(progress.awaiting(), Some(TutorialAction::Jump));
        assert_eq!(progress.next_button(), NextButton::Hidden);
        assert_eq!(progress.advance(), Advance::Blocked);
        assert!(!progress.observe(TutorialAction::Slide));
        assert!(progress.observe(TutorialAction::Jump));
        assert_eq!(progress.next_button(), NextButton::Next);
        assert_eq!(progress.advance(), Advance::Moved);

        // Slide gate
        assert_eq!(progress.awaiting(), Some(TutorialAction::Slide));
        assert!(progress.observe(TutorialAction::Slide));
        assert_eq!(progress.advance(), Advance::Moved);

        assert_eq!(progress.advance(), Advance::Moved);
        assert_eq!(progress.advance(), Advance::Moved);

        assert_eq!(progress.step_index(), 5);
        assert_eq!(progress.current().message, "Good luck, runner!");
        assert_eq!(progress.next_button(), NextButton::Done);
        assert_eq!(progress.advance(), Advance::Finished);
    }

    #[test]
    fn test_info_step_ignores_actions() {
        let mut progress = TutorialProgress::new();
        assert!(!progress.observe(TutorialAction::Jump));
        assert_eq!(progress.awaiting(), None);
    }
}
