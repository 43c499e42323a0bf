use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::core::components::{Player, PlayerVisual, SceneBounds};
use crate::core::config::PlayerConfig;
use crate::physics::categories::PhysicsCategory;

/// Flat colour used when no sprite frames are available (headless runs, missing assets).
pub const PLAYER_FALLBACK_COLOR: Color = Color::srgb(0.35, 0.75, 1.0);

/// Looped frame-sequence animation over a sprite's image.
#[derive(Component, Debug, Clone)]
pub struct SpriteAnimation {
    pub frames: Vec<Handle<Image>>,
    pub timer: Timer,
    pub index: usize,
}

impl SpriteAnimation {
    pub fn new(frames: Vec<Handle<Image>>, frame_time: f32) -> Self {
        Self {
            frames,
            timer: Timer::from_seconds(frame_time.max(f32::EPSILON), TimerMode::Repeating),
            index: 0,
        }
    }

    /// Advance by `delta`; returns the frame to show when it changed.
    pub fn advance(&mut self, delta: std::time::Duration) -> Option<&Handle<Image>> {
        if self.frames.len() < 2 {
            return None;
        }
        self.timer.tick(delta);
        let steps = self.timer.times_finished_this_tick() as usize;
        if steps == 0 {
            return None;
        }
        self.index = (self.index + steps) % self.frames.len();
        self.frames.get(self.index)
    }
}

/// Cosmetic nose-up/nose-down angle for a vertical velocity.
pub fn tilt_for_velocity(vy: f32, cfg: &PlayerConfig) -> f32 {
    // max/min instead of clamp: a misconfigured range must not panic mid-frame.
    (vy * cfg.tilt_factor).max(cfg.tilt_min).min(cfg.tilt_max)
}

/// Where launch puts the player: fixed x, vertical middle of the screen.
pub fn launch_position(cfg: &PlayerConfig, bounds: &SceneBounds) -> Vec2 {
    Vec2::new(cfg.anchor_x, bounds.height / 2.0)
}

pub fn collider_radius(cfg: &PlayerConfig) -> f32 {
    cfg.size.width / 3.0
}

/// Physics body of the player. The sprite lives on a `PlayerVisual` child so the tilt never
/// reaches the rigid body.
pub fn player_bundle(cfg: &PlayerConfig, position: Vec2) -> impl Bundle {
    (
        Player,
        Transform::from_translation(position.extend(1.0)),
        Visibility::default(),
        RigidBody::Dynamic,
        Collider::ball(collider_radius(cfg)),
        LockedAxes::ROTATION_LOCKED,
        Velocity::zero(),
        ActiveEvents::COLLISION_EVENTS,
        PhysicsCategory::player(),
    )
}

pub fn player_visual_bundle(cfg: &PlayerConfig, frames: Vec<Handle<Image>>) -> impl Bundle {
    let size = cfg.size.as_vec2();
    let sprite = match frames.first() {
        Some(first) => Sprite {
            image: first.clone(),
            custom_size: Some(size),
            ..default()
        },
        None => Sprite::from_color(PLAYER_FALLBACK_COLOR, size),
    };
    (
        PlayerVisual,
        sprite,
        Transform::default(),
        SpriteAnimation::new(frames, cfg.frame_time),
    )
}

/// System: step every sprite animation by the scaled frame delta.
pub fn animate_sprites(time: Res<Time>, mut q: Query<(&mut SpriteAnimation, &mut Sprite)>) {
    for (mut anim, mut sprite) in q.iter_mut() {
        if let Some(frame) = anim.advance(time.delta()) {
            sprite.image = frame.clone();
        }
    }
}
