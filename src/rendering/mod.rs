pub mod camera;
pub mod outline;
