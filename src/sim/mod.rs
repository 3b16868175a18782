//! Frame-stepped simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One step per frame, no wall-clock time
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod input;
pub mod state;
pub mod tick;

pub use collision::{Aabb, first_hit};
pub use entity::{Entity, Role, Sprite};
pub use input::{ArrowKey, InputState};
pub use state::{GamePhase, GameState};
pub use tick::tick;
