use bevy::prelude::*;

/// Root of the game scene; carries the obstacle spawn loop.
#[derive(Component, Debug)]
pub struct SceneRoot;

/// Physics body of the player (collider, velocity).
#[derive(Component, Debug)]
pub struct Player;

/// Sprite child of the player; receives the cosmetic tilt so the body never rotates.
#[derive(Component, Debug)]
pub struct PlayerVisual;

/// Parent of every live obstacle.
#[derive(Component, Debug)]
pub struct ObstacleContainer;

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Obstacle {
    pub size: Vec2,
    pub corner_radius: f32,
    /// Hangs from the ceiling instead of resting on the floor.
    pub upside_down: bool,
}

/// Static floor edge.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Ground {
    pub start: Vec2,
    pub end: Vec2,
}

/// Composite "Game Over" node (label + button), built on first game over.
#[derive(Component, Debug)]
pub struct GameOverUi;

/// Playfield size in scene units; origin bottom-left, y up.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SceneBounds {
    pub width: f32,
    pub height: f32,
}

impl SceneBounds {
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.width, self.height) * 0.5
    }
}

impl Default for SceneBounds {
    fn default() -> Self {
        Self::new(800.0, 600.0)
    }
}

/// Deterministic RNG seed resource (set once at startup / tests for reproducible obstacles).
#[derive(Resource, Debug, Copy, Clone, Default)]
pub struct RngSeed(pub u64);
