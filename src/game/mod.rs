// Game logic: entities, level data and the playable scene

pub mod animation;
pub mod hero;
pub mod level;
pub mod scene;
pub mod spider;
