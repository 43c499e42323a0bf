#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};

// Wall clock: the virtual clock stops on game over and the log should not.
#[cfg(feature = "debug")]
pub fn debug_logging_system(
    time: Res<Time<Real>>,
    mut state: ResMut<DebugState>,
    stats: Res<DebugStats>,
) {
    state.time_accum += time.delta_secs();
    if state.time_accum >= state.log_interval {
        state.time_accum = 0.0;
        info!(
            "SIM frame={} t={:.3}s fps={:.1} ft_ms={:.1} obstacles={} state={:?} speed={}",
            state.frame_counter,
            time.elapsed_secs(),
            stats.fps,
            stats.frame_time_ms,
            stats.obstacle_count,
            stats.state,
            stats.speed
        );
    }
}
