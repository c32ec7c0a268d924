use serde::Serialize;
use strum::{Display, IntoStaticStr};

/// What the bot did on its most recent tick, as shown on the status display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Display, IntoStaticStr)]
pub enum LastAction {
    #[default]
    #[strum(serialize = "Waiting")]
    Waiting,
    #[strum(serialize = "JUMP")]
    Jump,
    #[strum(serialize = "RUN")]
    Run,
    #[strum(serialize = "DEAD")]
    Dead,
}

/// Bookkeeping owned by a single control loop
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoopState {
    pub running: bool,
    pub death_count: u32,
    pub last_action: LastAction,
}

impl LoopState {
    /// Reset counters for a fresh run
    pub fn begin(&mut self) {
        self.running = true;
        self.death_count = 0;
        self.last_action = LastAction::Waiting;
    }

    pub fn record_death(&mut self) -> u32 {
        self.death_count += 1;
        self.last_action = LastAction::Dead;
        self.death_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_labels() {
        assert_eq!(LastAction::Waiting.to_string(), "Waiting");
        assert_eq!(LastAction::Jump.to_string(), "JUMP");
        assert_eq!(LastAction::Run.to_string(), "RUN");
        assert_eq!(LastAction::Dead.to_string(), "DEAD");
    }

    #[test]
    fn test_begin_resets_deaths() {
        let mut state = LoopState {
            running: false,
            death_count: 4,
            last_action: LastAction::Dead,
        };
        state.begin();
        assert!(state.running);
        assert_eq!(state.death_count, 0);
        assert_eq!(state.last_action, LastAction::Waiting);

        assert_eq!(state.record_death(), 1);
        assert_eq!(state.last_action, LastAction::Dead);
    }
}
