/// Scene lifecycle. Setup -> Running on launch, Running -> Over on contact,
/// Over -> Setup only through an explicit reset.
///
/// Owned by `GameScene` rather than driven through Bevy `States`: reset must pass through
/// Setup and relaunch within the same dispatch, which deferred state transitions cannot express.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum GameState {
    #[default]
    Setup,
    Running,
    Over,
}

impl GameState {
    pub fn is_running(self) -> bool {
        self == GameState::Running
    }

    /// Setup -> Running. Returns false (and stays put) from any other state.
    pub fn launch(&mut self) -> bool {
        self.transition(GameState::Setup, GameState::Running)
    }

    /// Running -> Over. Repeated contacts after the first are no-ops.
    pub fn finish(&mut self) -> bool {
        self.transition(GameState::Running, GameState::Over)
    }

    /// Over -> Setup.
    pub fn rewind(&mut self) -> bool {
        self.transition(GameState::Over, GameState::Setup)
    }

    fn transition(&mut self, from: GameState, to: GameState) -> bool {
        if *self != from {
            return false;
        }
        *self = to;
        true
    }
}
