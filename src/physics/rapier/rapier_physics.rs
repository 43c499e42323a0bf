use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::config::GameConfig;

/// Our wrapper to install and configure Rapier from `GameConfig.physics`.
pub struct PhysicsSetupPlugin {
    pub pixels_per_meter: f32,
    /// Wireframe state at startup.
    pub debug_render: bool,
    /// Install `RapierDebugRenderPlugin` at all; it needs the gizmo and asset plugins.
    pub wireframe_plugin: bool,
}

impl PhysicsSetupPlugin {
    pub fn from_config(cfg: &GameConfig) -> Self {
        Self {
            pixels_per_meter: cfg.physics.pixels_per_meter,
            debug_render: cfg.physics.debug_render,
            wireframe_plugin: true,
        }
    }

    /// Solver only, for runs without a renderer.
    pub fn headless(cfg: &GameConfig) -> Self {
        Self {
            wireframe_plugin: false,
            ..Self::from_config(cfg)
        }
    }
}

impl Default for PhysicsSetupPlugin {
    fn default() -> Self {
        Self::from_config(&GameConfig::default())
    }
}

impl Plugin for PhysicsSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins(RapierPhysicsPlugin::<NoUserData>::pixels_per_meter(
            self.pixels_per_meter,
        ))
        .add_systems(Update, configure_gravity);
        // Installed even when off so F1 can toggle it; config picks the start state.
        if self.wireframe_plugin {
            app.add_plugins(RapierDebugRenderPlugin {
                enabled: self.debug_render,
                ..default()
            });
        }
    }
}

/// Apply configured gravity once the Rapier context exists.
fn configure_gravity(
    mut q: Query<&mut RapierConfiguration, Added<RapierConfiguration>>,
    cfg: Res<GameConfig>,
) {
    for mut rapier_cfg in q.iter_mut() {
        rapier_cfg.gravity = Vect::new(0.0, cfg.physics.gravity_y);
        info!(target: "physics", gravity_y = cfg.physics.gravity_y, "Rapier gravity configured");
    }
}
