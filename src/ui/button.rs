//! A white rectangular button with a centred label.
//!
//! The widget stores an explicit `ButtonCommand`; the scene dispatch executes it when a
//! press ends inside the button. There is no pressed/disabled state: a button reacts to
//! every qualifying release for as long as it is attached (not hidden).

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ButtonCommand {
    ResetGame,
}

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct SceneButton {
    pub size: Vec2,
    pub command: ButtonCommand,
}

/// Marker for the label child.
#[derive(Component, Debug)]
pub struct ButtonLabel;

impl SceneButton {
    pub fn new(size: Vec2, command: ButtonCommand) -> Self {
        Self { size, command }
    }

    /// Bounds test in the button's own space (centre anchored, max edges exclusive).
    pub fn contains_local(&self, local: Vec2) -> bool {
        let half = self.size * 0.5;
        local.x >= -half.x && local.x < half.x && local.y >= -half.y && local.y < half.y
    }

    /// Bounds test for a scene-space point.
    pub fn contains(&self, button_tf: &GlobalTransform, point: Vec2) -> bool {
        let local = button_tf
            .affine()
            .inverse()
            .transform_point3(point.extend(0.0))
            .truncate();
        self.contains_local(local)
    }
}

/// Everything needed to spawn a button at `position` (in its parent's space).
pub fn button_bundle(
    size: Vec2,
    title: impl Into<String>,
    command: ButtonCommand,
    position: Vec2,
) -> impl Bundle {
    (
        SceneButton::new(size, command),
        Sprite::from_color(Color::WHITE, size),
        Transform::from_translation(position.extend(0.0)),
        children![(
            ButtonLabel,
            Text2d::new(title),
            TextColor(Color::BLACK),
            Transform::from_xyz(0.0, 0.0, 1.0),
        )],
    )
}

/// True when neither `entity` nor any ancestor is hidden.
pub fn is_attached(
    entity: Entity,
    parents: &Query<&ChildOf>,
    hidden: impl Fn(Entity) -> bool,
) -> bool {
    let mut current = entity;
    loop {
        if hidden(current) {
            return false;
        }
        match parents.get(current) {
            Ok(child_of) => current = child_of.parent(),
            Err(_) => return true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button() -> SceneButton {
        SceneButton::new(Vec2::new(200.0, 44.0), ButtonCommand::ResetGame)
    }

    #[test]
    fn local_bounds() {
        let b = button();
        assert!(b.contains_local(Vec2::ZERO));
        assert!(b.contains_local(Vec2::new(-100.0, -22.0)));
        assert!(b.contains_local(Vec2::new(99.9, 21.9)));
        assert!(!b.contains_local(Vec2::new(100.0, 0.0)));
        assert!(!b.contains_local(Vec2::new(0.0, -22.1)));
        assert!(!b.contains_local(Vec2::new(150.0, 50.0)));
    }

    #[test]
    fn scene_space_bounds_follow_transform() {
        let b = button();
        let tf = GlobalTransform::from(Transform::from_xyz(400.0, 150.0, 0.0));
        assert!(b.contains(&tf, Vec2::new(400.0, 150.0)));
        assert!(b.contains(&tf, Vec2::new(310.0, 130.0)));
        assert!(!b.contains(&tf, Vec2::new(100.0, 150.0)));
        assert!(!b.contains(&tf, Vec2::new(400.0, 300.0)));
    }

    #[test]
    fn hidden_ancestor_detaches() {
        let mut world = World::new();
        let root = world.spawn(Visibility::Hidden).id();
        let child = world.spawn((Visibility::Inherited, ChildOf(root))).id();
        let loose = world.spawn(Visibility::Inherited).id();

        let mut system_state: bevy::ecs::system::SystemState<(Query<&ChildOf>, Query<&Visibility>)> =
            bevy::ecs::system::SystemState::new(&mut world);
        let (parents, vis) = system_state.get(&world);
        let hidden = |e: Entity| matches!(vis.get(e), Ok(Visibility::Hidden));
        assert!(!is_attached(child, &parents, hidden));
        assert!(!is_attached(root, &parents, hidden));
        assert!(is_attached(loose, &parents, hidden));
    }
}
