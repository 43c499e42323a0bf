pub mod obstacles;
pub mod player;
pub mod scene;
