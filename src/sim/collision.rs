//! Axis-aligned bounding box collision
//!
//! Cars never rotate, so a strict AABB overlap test is the whole story.
//! Edges that merely touch do not count as a crash.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Entity;

/// Axis-aligned rectangle in canvas pixels (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    /// Top-left corner
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// True iff the two rectangles share positive-area intersection
    #[inline]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && a_max.x > other.min.x
            && self.min.y < b_max.y
            && a_max.y > other.min.y
    }
}

/// Index of the first obstacle the player overlaps
pub fn first_hit(player: &Entity, obstacles: &[Entity]) -> Option<usize> {
    obstacles.iter().position(|o| player.overlaps(o))
}
