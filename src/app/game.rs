// This file is part of Blobby Bird.
// Copyright (C) 2025 Adam and contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use bevy::prelude::*;

use crate::core::config::GameConfig;
use crate::core::system::system_order::SceneSet;
use crate::debug::DebugPlugin;
use crate::gameplay::scene::ScenePlugin;
use crate::interaction::session::auto_close::AutoClosePlugin;
use crate::physics::rapier::rapier_physics::PhysicsSetupPlugin;
use crate::rendering::camera::camera::CameraPlugin;
use crate::rendering::outline::draw_obstacle_outlines;

/// Full game on top of `DefaultPlugins`. Expects `GameConfig` and `SceneBounds` to be inserted.
pub struct GamePlugin;

impl Plugin for GamePlugin {
    fn build(&self, app: &mut App) {
        let physics = app
            .world()
            .get_resource::<GameConfig>()
            .map(PhysicsSetupPlugin::from_config)
            .unwrap_or_default();
        app.add_plugins((
            CameraPlugin,
            physics,
            ScenePlugin,
            DebugPlugin,
            AutoClosePlugin,
        ))
        .add_systems(Update, draw_obstacle_outlines.after(SceneSet::Actions));
    }
}
