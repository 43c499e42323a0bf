//! Debug module: feature gated wireframe toggle & stats/logging.
//! Built only when compiled with `--features debug`.

#[cfg(feature = "debug")]
pub mod keys; // pub for testing
#[cfg(feature = "debug")]
mod logging;
#[cfg(feature = "debug")]
mod modes;
#[cfg(feature = "debug")]
mod stats;

#[cfg(feature = "debug")]
pub use modes::*;

#[cfg(feature = "debug")]
use crate::core::system::system_order::SceneSet;
#[cfg(feature = "debug")]
use bevy::prelude::*;

#[cfg(feature = "debug")]
pub struct DebugPlugin;
#[cfg(feature = "debug")]
impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        use keys::debug_key_input_system;
        use logging::debug_logging_system;
        use stats::debug_stats_collect_system;

        app.init_resource::<modes::DebugState>()
            .init_resource::<modes::DebugStats>()
            .add_systems(
                Update,
                (
                    debug_key_input_system,
                    debug_stats_collect_system,
                    debug_logging_system,
                )
                    .chain()
                    .after(SceneSet::Actions),
            );
    }
}

#[cfg(not(feature = "debug"))]
pub struct DebugPlugin;
#[cfg(not(feature = "debug"))]
impl bevy::prelude::Plugin for DebugPlugin {
    fn build(&self, _app: &mut bevy::prelude::App) {}
}

#[cfg(all(test, feature = "debug"))]
mod tests {
    use super::*;
    use crate::gameplay::scene::GameScene;

    #[test]
    fn stats_track_scene_state_and_speed() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .init_resource::<GameScene>()
            .add_plugins(DebugPlugin);
        app.world_mut()
            .resource_mut::<Time<Virtual>>()
            .set_relative_speed(0.0);
        app.update();
        let stats = app.world().resource::<DebugStats>();
        assert_eq!(stats.speed, 0.0);
        assert_eq!(stats.obstacle_count, 0);
        assert_eq!(app.world().resource::<DebugState>().frame_counter, 1);
    }
}
