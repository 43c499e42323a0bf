pub mod actions;
pub mod components;
pub mod config;
pub mod events;
pub mod system;
