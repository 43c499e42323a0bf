//! Collision categories used to filter Rapier contacts.
//!
//! The three bits are disjoint. Player collides with and reports contacts against ground and
//! obstacles; ground and obstacles accept anything.

use bevy_rapier2d::prelude::{CollisionGroups, Group};

pub struct PhysicsCategory;

impl PhysicsCategory {
    pub const PLAYER: Group = Group::GROUP_1;
    pub const OBSTACLE: Group = Group::GROUP_2;
    pub const GROUND: Group = Group::GROUP_3;

    pub fn player() -> CollisionGroups {
        CollisionGroups::new(Self::PLAYER, Self::GROUND | Self::OBSTACLE)
    }
    pub fn obstacle() -> CollisionGroups {
        CollisionGroups::new(Self::OBSTACLE, Group::ALL)
    }
    pub fn ground() -> CollisionGroups {
        CollisionGroups::new(Self::GROUND, Group::ALL)
    }
}
