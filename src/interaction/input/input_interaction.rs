use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::events::SceneEvent;

/// Translates engine callbacks (frame tick, pointer, Rapier contacts) into `SceneEvent`s.
/// Registered by `ScenePlugin` in `SceneSet::Collect`.
pub fn emit_tick(time: Res<Time>, mut out: EventWriter<SceneEvent>) {
    out.write(SceneEvent::Tick(time.delta_secs()));
}

fn cursor_world_pos(
    camera_q: &Query<(&Camera, &GlobalTransform)>,
    screen_pos: Vec2,
) -> Option<Vec2> {
    let (camera, cam_tf) = camera_q.iter().next()?;
    camera.viewport_to_world_2d(cam_tf, screen_pos).ok()
}

/// Mouse left button and touches. Touch positions take priority over the cursor.
pub fn collect_pointer_events(
    buttons: Option<Res<ButtonInput<MouseButton>>>,
    touches: Option<Res<Touches>>,
    windows_q: Query<&Window>,
    camera_q: Query<(&Camera, &GlobalTransform)>,
    mut out: EventWriter<SceneEvent>,
) {
    if let Some(touches) = touches.as_deref() {
        for touch in touches.iter_just_pressed() {
            if let Some(p) = cursor_world_pos(&camera_q, touch.position()) {
                out.write(SceneEvent::PressBegin(p));
            }
        }
        for touch in touches.iter_just_released() {
            if let Some(p) = cursor_world_pos(&camera_q, touch.position()) {
                out.write(SceneEvent::PressEnd(p));
            }
        }
    }

    let Some(buttons) = buttons.as_deref() else {
        return;
    };
    let pressed = buttons.just_pressed(MouseButton::Left);
    let released = buttons.just_released(MouseButton::Left);
    if !pressed && !released {
        return;
    }
    let Ok(window) = windows_q.single() else {
        return;
    };
    let Some(p) = window
        .cursor_position()
        .and_then(|c| cursor_world_pos(&camera_q, c))
    else {
        return;
    };
    if pressed {
        out.write(SceneEvent::PressBegin(p));
    }
    if released {
        out.write(SceneEvent::PressEnd(p));
    }
}

/// Only contact begin is of interest; separations are dropped.
pub fn collect_contacts(mut contacts: EventReader<CollisionEvent>, mut out: EventWriter<SceneEvent>) {
    for ev in contacts.read() {
        if let CollisionEvent::Started(a, b, _) = *ev {
            out.write(SceneEvent::ContactBegin(a, b));
        }
    }
}
