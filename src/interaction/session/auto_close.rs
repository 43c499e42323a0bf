use crate::core::config::GameConfig;
use bevy::prelude::*;

/// Wall-clock timer; keeps counting while the game is frozen on the game-over screen.
#[derive(Resource, Deref, DerefMut)]
struct AutoCloseTimer(Timer);

pub struct AutoClosePlugin;

impl Plugin for AutoClosePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_autoclose)
            .add_systems(Update, check_autoclose);
    }
}

fn setup_autoclose(mut commands: Commands, cfg: Res<GameConfig>) {
    let secs = cfg.window.auto_close;
    if secs > 0.0 {
        info!(seconds = secs, "AutoClose: will exit after {secs} seconds");
        commands.insert_resource(AutoCloseTimer(Timer::from_seconds(secs, TimerMode::Once)));
    }
}

fn check_autoclose(
    time: Res<Time<Real>>,
    mut timer: Option<ResMut<AutoCloseTimer>>,
    mut ev_exit: EventWriter<AppExit>,
) {
    if let Some(t) = timer.as_mut() {
        t.tick(time.delta());
        if t.just_finished() {
            info!("AutoClose: timer finished, requesting app exit");
            ev_exit.write(AppExit::Success);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::time::TimeUpdateStrategy;
    use std::time::Duration;

    fn app_with(auto_close: f32) -> App {
        let mut cfg = GameConfig::default();
        cfg.window.auto_close = auto_close;
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(250)))
            .insert_resource(cfg)
            .add_plugins(AutoClosePlugin);
        app
    }

    #[test]
    fn exits_after_configured_seconds_even_when_paused() {
        let mut app = app_with(0.5);
        app.world_mut()
            .resource_mut::<Time<Virtual>>()
            .set_relative_speed(0.0);
        for _ in 0..4 {
            app.update();
        }
        assert_eq!(app.should_exit(), Some(AppExit::Success));
    }

    #[test]
    fn zero_disables_timer() {
        let mut app = app_with(0.0);
        for _ in 0..10 {
            app.update();
        }
        assert!(app.should_exit().is_none());
    }
}
