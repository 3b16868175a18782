//! Car Avoidance - dodge the oncoming traffic
//!
//! Core modules:
//! - `sim`: Frame-stepped simulation (entities, collisions, input, game state)
//! - `renderer`: WebGPU rendering pipeline
//! - `platform`: Browser/native platform helpers (canvas sizing, seeds)
//! - `settings`: Persisted tuning and preferences
//! - `share`: Game-over share link
//! - `error`: Host setup errors

pub mod error;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod share;
pub mod sim;

pub use error::SetupError;
pub use settings::{Settings, Tuning};

/// Game configuration constants
pub mod consts {
    /// Car speed in pixels per frame (player input and slowest oncoming car)
    pub const SPEED: f32 = 5.0;
    /// Car width in pixels; height is half of it
    pub const CAR_SIZE: f32 = 60.0;
    /// One oncoming car per this many pixels of viewport width
    pub const SPAWN_SPACING: f32 = 80.0;
    /// Player spawn column
    pub const PLAYER_START_X: f32 = 20.0;
    /// Canvas size as a fraction of the viewport
    pub const CANVAS_FRACTION: f32 = 0.75;

    /// Upper bounds for loaded tuning values
    pub const MAX_SPEED: f32 = 1000.0;
    pub const MAX_CAR_SIZE: f32 = 1000.0;
    pub const MAX_PLAYER_START_X: f32 = 10_000.0;
    /// Closest allowed spacing between oncoming cars
    pub const MIN_SPAWN_SPACING: f32 = 1.0;
    /// Hard cap on oncoming cars per session
    pub const MAX_OBSTACLES: usize = 1024;

    /// Road marking grid
    pub const ROAD_COLUMNS: u32 = 7;
    pub const ROAD_ROWS: u32 = 6;
    pub const ROAD_MARK_HEIGHT: f32 = 10.0;
    pub const ROAD_SPACE_X: f32 = 15.0;
    pub const ROAD_OFFSET: f32 = 40.0;
}
