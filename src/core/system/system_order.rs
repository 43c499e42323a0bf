//! Central system ordering labels to make the per-frame sequence explicit.
//! Stages (high-level):
//! 1. Collect (input, contacts and the frame tick become `SceneEvent`s)
//! 2. Dispatch (the scene state machine consumes them)
//! 3. Actions (scheduled actions, cues and sprite animation advance by virtual time)
//! 4. Rapier (handled by its plugin in PostUpdate)
use bevy::prelude::*;

#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone, Copy)]
pub enum SceneSet {
    Collect,
    Dispatch,
    Actions,
}
