//! Declarative timed actions (move, wait, cue, remove, sequence, repeat).
//!
//! Each entity carries at most one `ActionRunner`. The runner advances by `Res<Time>`, which
//! in `Update` is the virtual clock: setting `Time<Virtual>`'s relative speed to 0 freezes every
//! running action without touching its progress.

use bevy::prelude::*;

use crate::core::events::{ActionCue, Cue};
use crate::core::system::system_order::SceneSet;

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Linear horizontal move from wherever the entity is when the step starts.
    MoveToX { x: f32, duration: f32 },
    Wait(f32),
    /// Emits an `ActionCue` for the owning entity.
    Cue(Cue),
    /// Despawns the entity (and its children).
    RemoveFromParent,
    Sequence(Vec<Action>),
    RepeatForever(Box<Action>),
}

impl Action {
    pub fn sequence(steps: impl IntoIterator<Item = Action>) -> Self {
        Action::Sequence(steps.into_iter().collect())
    }
    pub fn repeat_forever(action: Action) -> Self {
        Action::RepeatForever(Box::new(action))
    }
}

/// Per-step progress, shaped like the `Action` tree it tracks.
#[derive(Debug, Clone, PartialEq)]
enum Progress {
    MoveToX { from: Option<f32>, elapsed: f32 },
    Wait { elapsed: f32 },
    Instant,
    Sequence { index: usize, current: Box<Progress> },
    Repeat { current: Box<Progress> },
}

impl Progress {
    fn fresh(action: &Action) -> Self {
        match action {
            Action::MoveToX { .. } => Progress::MoveToX {
                from: None,
                elapsed: 0.0,
            },
            Action::Wait(_) => Progress::Wait { elapsed: 0.0 },
            Action::Cue(_) | Action::RemoveFromParent => Progress::Instant,
            Action::Sequence(steps) => Progress::Sequence {
                index: 0,
                current: Box::new(
                    steps
                        .first()
                        .map(Progress::fresh)
                        .unwrap_or(Progress::Instant),
                ),
            },
            Action::RepeatForever(inner) => Progress::Repeat {
                current: Box::new(Progress::fresh(inner)),
            },
        }
    }
}

/// What a step is allowed to touch on its entity.
#[derive(Debug, Default)]
pub struct ActionTarget {
    pub x: f32,
    pub cues: Vec<Cue>,
    pub remove: bool,
}

impl ActionTarget {
    pub fn at_x(x: f32) -> Self {
        Self {
            x,
            ..Default::default()
        }
    }
}

/// Summed f32 frame deltas fall short of the exact duration (ten 0.1 s steps give 0.99999994).
const TIME_SLACK: f32 = 1e-4;

fn finished(elapsed: f32, duration: f32) -> Option<f32> {
    (elapsed + TIME_SLACK >= duration).then(|| (elapsed - duration.max(0.0)).max(0.0))
}

/// Advance `action` by `dt`. Returns the unused time once the action has finished.
fn step(action: &Action, progress: &mut Progress, dt: f32, target: &mut ActionTarget) -> Option<f32> {
    match (action, progress) {
        (Action::MoveToX { x, duration }, Progress::MoveToX { from, elapsed }) => {
            let start = *from.get_or_insert(target.x);
            *elapsed += dt;
            let done = finished(*elapsed, *duration);
            target.x = match done {
                Some(_) => *x,
                None => start + (x - start) * (*elapsed / duration),
            };
            done
        }
        (Action::Wait(duration), Progress::Wait { elapsed }) => {
            *elapsed += dt;
            finished(*elapsed, *duration)
        }
        (Action::Cue(cue), Progress::Instant) => {
            target.cues.push(*cue);
            Some(dt)
        }
        (Action::RemoveFromParent, Progress::Instant) => {
            target.remove = true;
            Some(dt)
        }
        (Action::Sequence(steps), Progress::Sequence { index, current }) => {
            let mut left = dt;
            while let Some(next) = steps.get(*index) {
                left = step(next, current, left, target)?;
                *index += 1;
                if let Some(following) = steps.get(*index) {
                    **current = Progress::fresh(following);
                }
            }
            Some(left)
        }
        (Action::RepeatForever(inner), Progress::Repeat { current }) => {
            let mut left = dt;
            loop {
                let before = left;
                left = step(inner, current, left, target)?;
                **current = Progress::fresh(inner);
                // An iteration that took no time would spin forever; resume next frame.
                if left >= before {
                    return None;
                }
            }
        }
        _ => unreachable!("action progress out of sync with its action"),
    }
}

/// Drives one action tree on its entity.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct ActionRunner {
    action: Action,
    progress: Progress,
}

impl ActionRunner {
    pub fn new(action: Action) -> Self {
        let progress = Progress::fresh(&action);
        Self { action, progress }
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Advance by `dt` seconds; returns true once the whole tree has finished.
    pub fn advance(&mut self, dt: f32, target: &mut ActionTarget) -> bool {
        step(&self.action, &mut self.progress, dt, target).is_some()
    }
}

pub struct ActionsPlugin;

impl Plugin for ActionsPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ActionCue>()
            .add_systems(Update, tick_actions.in_set(SceneSet::Actions));
    }
}

/// System: advance every runner by the scaled frame delta, applying moves, cues and removals.
pub fn tick_actions(
    time: Res<Time>,
    mut commands: Commands,
    mut cues: EventWriter<ActionCue>,
    mut q: Query<(Entity, &mut ActionRunner, Option<&mut Transform>)>,
) {
    let dt = time.delta_secs();
    for (entity, mut runner, transform) in q.iter_mut() {
        let start_x = transform.as_ref().map(|t| t.translation.x).unwrap_or(0.0);
        let mut target = ActionTarget::at_x(start_x);
        let finished = runner.advance(dt, &mut target);

        if let Some(mut tf) = transform {
            if tf.translation.x != target.x {
                tf.translation.x = target.x;
            }
        }
        for cue in target.cues {
            cues.write(ActionCue { entity, cue });
        }
        if target.remove {
            commands.entity(entity).despawn();
        } else if finished {
            commands.entity(entity).remove::<ActionRunner>();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use bevy::time::TimeUpdateStrategy;

    fn scroll(x: f32, duration: f32) -> Action {
        Action::sequence([Action::MoveToX { x, duration }, Action::RemoveFromParent])
    }

    #[test]
    fn move_interpolates_and_lands_exactly() {
        let mut runner = ActionRunner::new(Action::MoveToX { x: 0.0, duration: 4.0 });
        let mut target = ActionTarget::at_x(100.0);
        assert!(!runner.advance(1.0, &mut target));
        assert!((target.x - 75.0).abs() < 1e-4);
        assert!(!runner.advance(2.0, &mut target));
        assert!((target.x - 25.0).abs() < 1e-4);
        assert!(runner.advance(5.0, &mut target));
        assert_eq!(target.x, 0.0);
    }

    #[test]
    fn zero_dt_makes_no_progress() {
        let mut runner = ActionRunner::new(scroll(-50.0, 5.0));
        let mut target = ActionTarget::at_x(850.0);
        for _ in 0..100 {
            assert!(!runner.advance(0.0, &mut target));
        }
        assert_eq!(target.x, 850.0);
        assert!(!target.remove);
    }

    #[test]
    fn sequence_removes_after_move() {
        let mut runner = ActionRunner::new(scroll(-50.0, 5.0));
        let mut target = ActionTarget::at_x(850.0);
        assert!(!runner.advance(4.9, &mut target));
        assert!(!target.remove);
        assert!(runner.advance(0.2, &mut target));
        assert_eq!(target.x, -50.0);
        assert!(target.remove);
    }

    #[test]
    fn sequence_carries_leftover_time() {
        let mut runner = ActionRunner::new(Action::sequence([
            Action::Wait(1.0),
            Action::MoveToX { x: 10.0, duration: 1.0 },
        ]));
        let mut target = ActionTarget::at_x(0.0);
        assert!(!runner.advance(1.5, &mut target));
        assert!((target.x - 5.0).abs() < 1e-4);
    }

    #[test]
    fn repeat_cues_once_per_interval() {
        let mut runner = ActionRunner::new(Action::repeat_forever(Action::sequence([
            Action::Cue(Cue::SpawnObstacle),
            Action::Wait(1.0),
        ])));
        let mut target = ActionTarget::default();
        assert!(!runner.advance(0.0, &mut target));
        assert_eq!(target.cues.len(), 1, "first cue fires immediately");
        assert!(!runner.advance(0.5, &mut target));
        assert_eq!(target.cues.len(), 1);
        assert!(!runner.advance(0.5, &mut target));
        assert_eq!(target.cues.len(), 2);
        assert!(!runner.advance(2.0, &mut target));
        assert_eq!(target.cues.len(), 4);
    }

    #[test]
    fn wait_finishes_on_last_of_ten_tenths() {
        let mut runner = ActionRunner::new(Action::Wait(1.0));
        let mut target = ActionTarget::default();
        for i in 0..9 {
            assert!(!runner.advance(0.1, &mut target), "finished early at step {i}");
        }
        assert!(runner.advance(0.1, &mut target));
    }

    #[test]
    fn repeat_does_not_drift_with_frame_sized_steps() {
        let mut runner = ActionRunner::new(Action::repeat_forever(Action::sequence([
            Action::Cue(Cue::SpawnObstacle),
            Action::Wait(1.0),
        ])));
        let mut target = ActionTarget::default();
        let mut cue_frames = Vec::new();
        for frame in 0..=30 {
            let before = target.cues.len();
            runner.advance(if frame == 0 { 0.0 } else { 0.1 }, &mut target);
            if target.cues.len() > before {
                cue_frames.push(frame);
            }
        }
        assert_eq!(cue_frames, vec![0, 10, 20, 30]);
    }

    #[test]
    fn repeat_of_instant_actions_does_not_spin() {
        let mut runner =
            ActionRunner::new(Action::repeat_forever(Action::Cue(Cue::SpawnObstacle)));
        let mut target = ActionTarget::default();
        assert!(!runner.advance(1.0, &mut target));
        assert_eq!(target.cues.len(), 1);
    }

    #[test]
    fn empty_sequence_finishes_immediately() {
        let mut runner = ActionRunner::new(Action::sequence([]));
        assert!(runner.advance(0.0, &mut ActionTarget::default()));
    }

    #[test]
    fn system_moves_and_despawns_entity() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.add_plugins(ActionsPlugin);
        let e = app
            .world_mut()
            .spawn((Transform::from_xyz(100.0, 0.0, 0.0), ActionRunner::new(scroll(0.0, 0.5))))
            .id();
        app.update(); // first frame has zero delta
        app.update();
        let x = app.world().get::<Transform>(e).unwrap().translation.x;
        assert!((x - 80.0).abs() < 1e-3, "x = {x}");
        for _ in 0..5 {
            app.update();
        }
        assert!(app.world().get_entity(e).is_err(), "entity should be removed");
    }

    #[test]
    fn system_freezes_when_virtual_time_stopped() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));
        app.add_plugins(ActionsPlugin);
        app.world_mut()
            .resource_mut::<Time<Virtual>>()
            .set_relative_speed(0.0);
        let e = app
            .world_mut()
            .spawn((Transform::from_xyz(100.0, 0.0, 0.0), ActionRunner::new(scroll(0.0, 0.5))))
            .id();
        for _ in 0..10 {
            app.update();
        }
        assert_eq!(app.world().get::<Transform>(e).unwrap().translation.x, 100.0);
    }

    #[test]
    fn finished_runner_is_removed() {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins);
        app.add_plugins(ActionsPlugin);
        let e = app
            .world_mut()
            .spawn(ActionRunner::new(Action::Cue(Cue::SpawnObstacle)))
            .id();
        app.update();
        assert!(app.world().get::<ActionRunner>(e).is_none());
        let cues = app.world().resource::<Events<ActionCue>>();
        let mut reader = cues.get_cursor();
        let got: Vec<_> = reader.read(cues).copied().collect();
        assert_eq!(got, vec![ActionCue { entity: e, cue: Cue::SpawnObstacle }]);
    }
}
