#[cfg(feature = "debug")]
use super::modes::{DebugState, DebugStats};
#[cfg(feature = "debug")]
use crate::core::components::Obstacle;
#[cfg(feature = "debug")]
use crate::gameplay::scene::GameScene;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub fn debug_stats_collect_system(
    real: Res<Time<Real>>,
    virt: Res<Time<Virtual>>,
    mut state: ResMut<DebugState>,
    mut stats: ResMut<DebugStats>,
    scene: Res<GameScene>,
    q_obstacles: Query<(), With<Obstacle>>,
) {
    state.frame_counter += 1;
    let dt = real.delta_secs().max(1e-6);
    let inst_fps = 1.0 / dt;
    if stats.fps == 0.0 {
        stats.fps = inst_fps;
    } else {
        stats.fps = stats.fps * 0.9 + inst_fps * 0.1;
    }
    let inst_ms = dt * 1000.0;
    if stats.frame_time_ms == 0.0 {
        stats.frame_time_ms = inst_ms;
    } else {
        stats.frame_time_ms = stats.frame_time_ms * 0.9 + inst_ms * 0.1;
    }
    stats.obstacle_count = q_obstacles.iter().count();
    stats.state = scene.state;
    stats.speed = virt.relative_speed();
}
