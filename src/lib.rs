pub mod app;
pub mod core;
pub mod debug;
pub mod gameplay;
pub mod interaction;
pub mod physics;
pub mod rendering;
pub mod ui;

// Curated re-exports
pub use app::game::GamePlugin;
pub use app::state::GameState;
pub use core::components::{Obstacle, Player, RngSeed, SceneBounds};
pub use core::config::{config::GameConfig, config::WindowConfig};
pub use core::events::SceneEvent;
pub use gameplay::scene::{GameScene, ScenePlugin};
