//! The game scene: setup, the state machine and the single event dispatch.
//!
//! All engine callbacks arrive as `SceneEvent`s (see `interaction::input`) and are consumed by
//! `dispatch_scene_events`, the only place that changes `GameScene::state`.

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy_rapier2d::prelude::*;

use crate::app::state::GameState;
use crate::core::actions::{tick_actions, Action, ActionRunner, ActionsPlugin};
use crate::core::components::{
    Ground, Obstacle, ObstacleContainer, Player, PlayerVisual, RngSeed, SceneBounds, SceneRoot,
};
use crate::core::config::GameConfig;
use crate::core::events::{Cue, SceneEvent};
use crate::core::system::system_order::SceneSet;
use crate::gameplay::obstacles::{spawn_obstacles_on_cue, ObstacleRng};
use crate::gameplay::player::{
    animate_sprites, launch_position, player_bundle, player_visual_bundle, tilt_for_velocity,
};
use crate::interaction::input::input_interaction::{
    collect_contacts, collect_pointer_events, emit_tick,
};
use crate::physics::categories::PhysicsCategory;
use crate::ui::button::{is_attached, ButtonCommand, SceneButton};
use crate::ui::game_over::game_over_ui_bundle;

/// The scene's own state: lifecycle plus handles to its singleton entities.
#[derive(Resource, Debug, Default)]
pub struct GameScene {
    pub state: GameState,
    pub root: Option<Entity>,
    pub player: Option<Entity>,
    pub ground: Option<Entity>,
    pub obstacles: Option<Entity>,
    /// Built on the first game over and kept for the scene's lifetime.
    pub game_over_ui: Option<Entity>,
}

/// Spawn one obstacle, wait an interval, forever.
pub fn spawn_loop(interval: f32) -> Action {
    Action::repeat_forever(Action::sequence([
        Action::Cue(Cue::SpawnObstacle),
        Action::Wait(interval),
    ]))
}

/// System (Startup): build the scene once, then launch.
pub fn setup_scene(
    mut commands: Commands,
    mut scene: ResMut<GameScene>,
    cfg: Res<GameConfig>,
    bounds: Res<SceneBounds>,
    asset_server: Option<Res<AssetServer>>,
    seed: Option<Res<RngSeed>>,
) {
    commands.insert_resource(ObstacleRng::from_seed(seed.as_deref()));

    let root = commands
        .spawn((
            SceneRoot,
            Name::new("Scene"),
            Transform::default(),
            Visibility::default(),
            ActionRunner::new(spawn_loop(cfg.obstacles.spawn_interval)),
        ))
        .id();

    let frames: Vec<Handle<Image>> = match asset_server.as_deref() {
        Some(assets) => cfg.player.frames.iter().map(|p| assets.load(p.clone())).collect(),
        None => Vec::new(),
    };
    // Spawned in place; launch below only flips the state.
    let player = commands
        .spawn((
            Name::new("Player"),
            player_bundle(&cfg.player, launch_position(&cfg.player, &bounds)),
            ChildOf(root),
        ))
        .with_children(|p| {
            p.spawn(player_visual_bundle(&cfg.player, frames));
        })
        .id();

    let edge = Ground {
        start: Vec2::ZERO,
        end: Vec2::new(bounds.width, 0.0),
    };
    let ground = commands
        .spawn((
            Name::new("Ground"),
            edge,
            Transform::default(),
            RigidBody::Fixed,
            Collider::segment(edge.start, edge.end),
            PhysicsCategory::ground(),
            ChildOf(root),
        ))
        .id();

    let obstacles = commands
        .spawn((
            Name::new("Obstacles"),
            ObstacleContainer,
            Transform::default(),
            Visibility::default(),
            ChildOf(root),
        ))
        .id();

    scene.root = Some(root);
    scene.player = Some(player);
    scene.ground = Some(ground);
    scene.obstacles = Some(obstacles);
    scene.state = GameState::Setup;
    if scene.state.launch() {
        info!(target: "scene", width = bounds.width, height = bounds.height, "Scene ready; running");
    }
}

/// Everything the dispatch needs to act on the scene.
#[derive(SystemParam)]
pub struct SceneAccess<'w, 's> {
    commands: Commands<'w, 's>,
    scene: ResMut<'w, GameScene>,
    time: ResMut<'w, Time<Virtual>>,
    cfg: Res<'w, GameConfig>,
    bounds: Res<'w, SceneBounds>,
    players: Query<'w, 's, (&'static mut Transform, &'static mut Velocity), With<Player>>,
    visuals: Query<'w, 's, &'static mut Transform, (With<PlayerVisual>, Without<Player>)>,
    obstacles: Query<'w, 's, Entity, With<Obstacle>>,
    buttons: Query<'w, 's, (Entity, &'static SceneButton, &'static GlobalTransform)>,
    parents: Query<'w, 's, &'static ChildOf>,
    visibility: Query<'w, 's, &'static mut Visibility>,
}

impl SceneAccess<'_, '_> {
    fn handle(&mut self, ev: &SceneEvent) {
        match *ev {
            SceneEvent::Tick(_) => self.apply_tilt(),
            SceneEvent::PressBegin(_) => self.jump(),
            SceneEvent::PressEnd(point) => self.release_at(point),
            SceneEvent::ContactBegin(a, b) => self.contact(a, b),
        }
    }

    /// Setup -> Running: put the player back at its anchor.
    fn launch(&mut self) {
        let pos = launch_position(&self.cfg.player, &self.bounds);
        if let Some(player) = self.scene.player {
            if let Ok((mut tf, _)) = self.players.get_mut(player) {
                tf.translation.x = pos.x;
                tf.translation.y = pos.y;
            }
        }
        if self.scene.state.launch() {
            info!(target: "scene", "Launched; running");
        }
    }

    fn jump(&mut self) {
        if !self.scene.state.is_running() {
            return;
        }
        let Some(player) = self.scene.player else { return };
        if let Ok((_, mut velocity)) = self.players.get_mut(player) {
            velocity.linvel.y += self.cfg.player.jump_speed;
        }
    }

    fn apply_tilt(&mut self) {
        let Some(player) = self.scene.player else { return };
        let Ok((_, velocity)) = self.players.get(player) else { return };
        let angle = tilt_for_velocity(velocity.linvel.y, &self.cfg.player);
        for mut tf in self.visuals.iter_mut() {
            tf.rotation = Quat::from_rotation_z(angle);
        }
    }

    fn contact(&mut self, a: Entity, b: Entity) {
        if !self.scene.state.finish() {
            debug!(target: "scene", ?a, ?b, state = ?self.scene.state, "Contact ignored");
            return;
        }
        self.time.set_relative_speed(0.0);
        self.attach_game_over_ui();
        info!(target: "scene", ?a, ?b, "Game over");
    }

    fn attach_game_over_ui(&mut self) {
        if let Some(ui) = self.scene.game_over_ui {
            if let Ok(mut vis) = self.visibility.get_mut(ui) {
                *vis = Visibility::Inherited;
            }
            return;
        }
        let mut ui = self
            .commands
            .spawn(game_over_ui_bundle(&self.cfg.game_over, &self.bounds));
        if let Some(root) = self.scene.root {
            ui.insert(ChildOf(root));
        }
        self.scene.game_over_ui = Some(ui.id());
    }

    fn detach_game_over_ui(&mut self) {
        let Some(ui) = self.scene.game_over_ui else { return };
        if let Ok(mut vis) = self.visibility.get_mut(ui) {
            *vis = Visibility::Hidden;
        }
    }

    fn release_at(&mut self, point: Vec2) {
        let visibility = &self.visibility;
        let hidden = |e: Entity| matches!(visibility.get(e), Ok(Visibility::Hidden));
        let fired: Vec<ButtonCommand> = self
            .buttons
            .iter()
            .filter(|(e, button, tf)| {
                button.contains(tf, point) && is_attached(*e, &self.parents, hidden)
            })
            .map(|(_, button, _)| button.command)
            .collect();
        for command in fired {
            match command {
                ButtonCommand::ResetGame => self.reset_game(),
            }
        }
    }

    /// Over -> Setup -> Running.
    fn reset_game(&mut self) {
        if self.scene.state != GameState::Over {
            debug!(target: "scene", state = ?self.scene.state, "Reset ignored");
            return;
        }
        for e in self.obstacles.iter() {
            self.commands.entity(e).despawn();
        }
        self.detach_game_over_ui();
        self.time.set_relative_speed(1.0);
        if let Some(player) = self.scene.player {
            if let Ok((_, mut velocity)) = self.players.get_mut(player) {
                *velocity = Velocity::zero();
            }
        }
        self.scene.state.rewind();
        info!(target: "scene", "Reset");
        self.launch();
    }
}

/// System: feed every pending `SceneEvent` through the state machine, in arrival order.
pub fn dispatch_scene_events(mut events: EventReader<SceneEvent>, mut access: SceneAccess) {
    for ev in events.read() {
        access.handle(ev);
    }
}

/// Scene setup, event collection, dispatch and the action-driven spawn loop.
///
/// Needs `GameConfig` inserted beforehand; `SceneBounds` defaults to 800x600 when absent.
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(
            Update,
            (SceneSet::Collect, SceneSet::Dispatch, SceneSet::Actions).chain(),
        )
        .add_event::<SceneEvent>()
        .add_event::<CollisionEvent>()
        .init_resource::<GameScene>()
        .init_resource::<SceneBounds>()
        .add_plugins(ActionsPlugin)
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                (emit_tick, collect_pointer_events, collect_contacts)
                    .chain()
                    .in_set(SceneSet::Collect),
                dispatch_scene_events.in_set(SceneSet::Dispatch),
                (spawn_obstacles_on_cue, animate_sprites)
                    .after(tick_actions)
                    .in_set(SceneSet::Actions),
            ),
        );
    }
}
