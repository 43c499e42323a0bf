//! Obstacle factory.
//!
//! Each spawn cue from the scene's spawn loop produces one obstacle: random height, floor or
//! ceiling placement, spawned just past the right edge and scrolled to `x = -width`, after
//! which it removes itself. Obstacles are always parented under the `ObstacleContainer`.

use bevy::prelude::*;
use bevy::sprite::Anchor;
use bevy_rapier2d::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::core::actions::{Action, ActionRunner};
use crate::core::components::{Obstacle, RngSeed, SceneBounds};
use crate::core::config::{GameConfig, ObstacleConfig};
use crate::core::events::{ActionCue, Cue};
use crate::gameplay::scene::GameScene;
use crate::physics::categories::PhysicsCategory;

pub const OBSTACLE_COLOR: Color = Color::srgb(1.0, 1.0, 0.0);

/// Deterministic RNG dedicated to obstacle generation.
#[derive(Resource)]
pub struct ObstacleRng(pub StdRng);

impl ObstacleRng {
    pub fn from_seed(seed: Option<&RngSeed>) -> Self {
        match seed {
            Some(s) => Self(StdRng::seed_from_u64(s.0)),
            None => Self(StdRng::from_entropy()),
        }
    }
}

/// Geometry and placement of one obstacle; `position` is its bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObstaclePlan {
    pub size: Vec2,
    pub position: Vec2,
    pub upside_down: bool,
}

/// Draw a height in `[min_height, height/2 - min_height)` and a floor/ceiling placement.
/// A degenerate range (very short screens) pins the height to `min_height`.
pub fn plan_obstacle<R: Rng>(
    rng: &mut R,
    bounds: &SceneBounds,
    cfg: &ObstacleConfig,
) -> ObstaclePlan {
    let min_h = cfg.min_height;
    let max_h = bounds.height / 2.0 - min_h;
    let height = if max_h > min_h {
        rng.gen_range(min_h..max_h)
    } else {
        min_h
    };
    let upside_down = rng.gen_bool(0.5);
    let y = if upside_down { bounds.height - height } else { 0.0 };
    ObstaclePlan {
        size: Vec2::new(cfg.width, height),
        position: Vec2::new(bounds.width + cfg.width, y),
        upside_down,
    }
}

/// Horizontal traverse to just past the left edge, then self-removal.
pub fn scroll_action(width: f32, duration: f32) -> Action {
    Action::sequence([
        Action::MoveToX {
            x: -width,
            duration,
        },
        Action::RemoveFromParent,
    ])
}

/// Visual, kinematic collider and scroll action for a planned obstacle.
pub fn obstacle_bundle(plan: &ObstaclePlan, cfg: &ObstacleConfig) -> impl Bundle {
    let half = plan.size * 0.5;
    (
        Obstacle {
            size: plan.size,
            corner_radius: cfg.corner_radius,
            upside_down: plan.upside_down,
        },
        Sprite {
            color: OBSTACLE_COLOR,
            custom_size: Some(plan.size),
            anchor: Anchor::BottomLeft,
            ..default()
        },
        Transform::from_translation(plan.position.extend(0.0)),
        RigidBody::KinematicPositionBased,
        // Node origin is the bottom-left corner; the box is offset to cover the visual.
        Collider::compound(vec![(half, 0.0, Collider::cuboid(half.x, half.y))]),
        PhysicsCategory::obstacle(),
        ActionRunner::new(scroll_action(plan.size.x, cfg.traverse_duration)),
    )
}

/// System: one obstacle per `Cue::SpawnObstacle`, parented under the obstacle container.
pub fn spawn_obstacles_on_cue(
    mut commands: Commands,
    mut cues: EventReader<ActionCue>,
    scene: Res<GameScene>,
    bounds: Res<SceneBounds>,
    cfg: Res<GameConfig>,
    mut rng: ResMut<ObstacleRng>,
) {
    for ev in cues.read() {
        if ev.cue != Cue::SpawnObstacle {
            continue;
        }
        let Some(container) = scene.obstacles else {
            continue;
        };
        let plan = plan_obstacle(&mut rng.0, &bounds, &cfg.obstacles);
        commands.spawn((obstacle_bundle(&plan, &cfg.obstacles), ChildOf(container)));
        debug!(
            target: "scene",
            height = plan.size.y,
            upside_down = plan.upside_down,
            "Obstacle spawned"
        );
    }
}
