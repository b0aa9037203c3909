pub mod bounds;
pub mod scene;
pub mod time;
