//! Rounded outlines for obstacles. The sprite itself is a plain rectangle; the configured
//! corner radius is drawn on top with gizmos.

use bevy::prelude::*;

use crate::core::components::Obstacle;

pub const OUTLINE_COLOR: Color = Color::srgb(0.85, 0.65, 0.0);

/// Centre of an obstacle whose node origin is its bottom-left corner.
pub fn outline_center(origin: Vec2, size: Vec2) -> Vec2 {
    origin + size * 0.5
}

pub fn draw_obstacle_outlines(mut gizmos: Gizmos, q: Query<(&Obstacle, &GlobalTransform)>) {
    for (obstacle, tf) in q.iter() {
        let center = outline_center(tf.translation().truncate(), obstacle.size);
        let radius = obstacle
            .corner_radius
            .min(obstacle.size.x.min(obstacle.size.y) * 0.5);
        gizmos
            .rounded_rect_2d(center, obstacle.size, OUTLINE_COLOR)
            .corner_radius(radius);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centre_is_offset_by_half_size() {
        assert_eq!(
            outline_center(Vec2::new(850.0, 0.0), Vec2::new(50.0, 120.0)),
            Vec2::new(875.0, 60.0)
        );
    }
}
