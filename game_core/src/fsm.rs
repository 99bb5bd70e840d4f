//! Round State Machine
//!
//! Tracks whether the game is on the intro screen, counting down to a
//! serve, or in live play.

/// Round phases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Intro screen; nothing simulates
    Idle,
    /// Pre-serve pause; only the countdown timer advances
    Countdown,
    /// Ball and paddles are live
    Playing,
}

/// Actions that trigger phase transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundAction {
    Start,
    CountdownDone,
    PointScored,
    Reset,
}

/// Result of a phase transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionResult {
    pub success: bool,
    pub from_state: Phase,
    pub to_state: Phase,
    pub action: RoundAction,
}

/// Round Finite State Machine
#[derive(Debug, Clone)]
pub struct RoundFsm {
    state: Phase,
}

impl RoundFsm {
    pub fn new() -> Self {
        Self { state: Phase::Idle }
    }

    /// Get current state
    pub fn state(&self) -> Phase {
        self.state
    }

    /// Attempt a transition
    pub fn transition(&mut self, action: RoundAction) -> TransitionResult {
        let from_state = self.state;

        if let Some(next_state) = self.get_next_state(action) {
            self.state = next_state;
            TransitionResult {
                success: true,
                from_state,
                to_state: next_state,
                action,
            }
        } else {
            TransitionResult {
                success: false,
                from_state,
                to_state: from_state,
                action,
            }
        }
    }

    /// Get next state for a given action (if valid)
    fn get_next_state(&self, action: RoundAction) -> Option<Phase> {
        match (self.state, action) {
            (Phase::Idle, RoundAction::Start) => Some(Phase::Countdown),
            (Phase::Countdown, RoundAction::CountdownDone) => Some(Phase::Playing),
            (Phase::Playing, RoundAction::PointScored) => Some(Phase::Countdown),

            // Full reset is accepted everywhere
            (_, RoundAction::Reset) => Some(Phase::Idle),

            // Invalid transition
            _ => None,
        }
    }

    /// Game is running (countdown or live play)
    pub fn game_active(&self) -> bool {
        self.state != Phase::Idle
    }

    pub fn countdown_active(&self) -> bool {
        self.state == Phase::Countdown
    }
}

impl Default for RoundFsm {
    fn default() -> Self {
        Self::new()
    }
}
