pub mod config;

pub use config::{
    GameConfig, GameOverConfig, ObstacleConfig, PhysicsConfig, PlayerConfig, SizeConfig,
    WindowConfig,
};
