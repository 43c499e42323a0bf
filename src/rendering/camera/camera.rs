use bevy::prelude::*;

use crate::core::components::SceneBounds;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(Color::BLACK))
            .add_systems(Startup, setup_camera);
    }
}

/// Centre the camera on the playfield so scene space has its origin bottom-left, y up.
pub fn camera_transform(bounds: &SceneBounds) -> Transform {
    Transform::from_translation(bounds.center().extend(0.0))
}

fn setup_camera(mut commands: Commands, bounds: Res<SceneBounds>) {
    // Bevy 0.16+: spawn Camera2d component directly; Required Components supply defaults.
    commands.spawn((Camera2d, camera_transform(&bounds)));
}
