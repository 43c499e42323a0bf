use bevy::prelude::*;

/// Everything the scene reacts to, funnelled through one dispatch system.
///
/// Producers (input translation, Rapier contact translation, the frame tick) run in
/// `SceneSet::Collect`; `dispatch_scene_events` consumes them in `SceneSet::Dispatch`.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum SceneEvent {
    /// Once per frame; carries the scaled (virtual) delta in seconds.
    Tick(f32),
    /// Pointer went down at a scene-space position.
    PressBegin(Vec2),
    /// Pointer was released at a scene-space position.
    PressEnd(Vec2),
    /// Two collidable bodies started touching.
    ContactBegin(Entity, Entity),
}

/// Explicit callback values carried by `Action::Cue`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cue {
    SpawnObstacle,
}

/// Emitted by the action scheduler when an `Action::Cue` step runs on `entity`.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionCue {
    pub entity: Entity,
    pub cue: Cue,
}
