#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
use crate::app::state::GameState;

#[cfg(feature = "debug")]
#[derive(Resource)]
pub struct DebugState {
    pub log_interval: f32,
    pub time_accum: f32,
    pub frame_counter: u64,
}

#[cfg(feature = "debug")]
impl Default for DebugState {
    fn default() -> Self {
        Self {
            log_interval: 1.0,
            time_accum: 0.0,
            frame_counter: 0,
        }
    }
}

#[cfg(feature = "debug")]
#[derive(Resource, Default, Debug, Clone)]
pub struct DebugStats {
    pub fps: f32,
    pub frame_time_ms: f32,
    pub obstacle_count: usize,
    pub state: GameState,
    /// Relative speed of the virtual clock (0 while the game-over screen is up).
    pub speed: f32,
}
