use bevy::prelude::*;

use crate::core::components::{GameOverUi, SceneBounds};
use crate::core::config::GameOverConfig;
use crate::ui::button::{button_bundle, ButtonCommand};

/// Draw order above the playfield.
const UI_Z: f32 = 10.0;

#[derive(Component, Debug)]
pub struct GameOverLabel;

/// "Game Over!" label at the centre and a "Play again" button at a quarter height.
pub fn game_over_ui_bundle(cfg: &GameOverConfig, bounds: &SceneBounds) -> impl Bundle {
    let center = bounds.center();
    (
        GameOverUi,
        Transform::from_xyz(0.0, 0.0, UI_Z),
        Visibility::Inherited,
        children![
            (
                GameOverLabel,
                Text2d::new(cfg.title.clone()),
                TextColor(Color::WHITE),
                Transform::from_translation(center.extend(0.0)),
            ),
            button_bundle(
                cfg.button_size.as_vec2(),
                cfg.button_title.clone(),
                ButtonCommand::ResetGame,
                Vec2::new(center.x, bounds.height / 4.0),
            ),
        ],
    )
}
