#[cfg(feature = "debug")]
use super::modes::DebugState;
#[cfg(feature = "debug")]
use bevy::prelude::*;
#[cfg(feature = "debug")]
use bevy_rapier2d::render::DebugRenderContext;

/// F1 toggles the Rapier wireframe.
#[cfg(feature = "debug")]
pub fn debug_key_input_system(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    state: Res<DebugState>,
    ctx: Option<ResMut<DebugRenderContext>>,
) {
    let (Some(keys), Some(mut ctx)) = (keys, ctx) else {
        return;
    };
    if keys.just_pressed(KeyCode::F1) {
        ctx.enabled = !ctx.enabled;
        info!(
            "MODE_CHANGE wireframe={} frame={}",
            ctx.enabled, state.frame_counter
        );
    }
}
