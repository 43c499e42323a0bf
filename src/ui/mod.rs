pub mod button;
pub mod game_over;
