//! Cars: the player and the oncoming traffic
//!
//! Both roles share one data layout. The role decides which boundary rule the
//! tick applies: the player is clamped to the canvas, oncoming cars wrap back
//! to the right edge once they leave on the left.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::collision::Aabb;

/// Which boundary rule applies to an entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Player,
    Obstacle,
}

/// Visual handle; only the renderer knows what it looks like
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Sprite {
    Player,
    Oncoming,
}

/// A car on the road
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    /// Top-left corner
    pub pos: Vec2,
    /// Pixels per frame
    pub vel: Vec2,
    /// Fixed at construction: (base, base / 2)
    size: Vec2,
    pub role: Role,
    pub sprite: Sprite,
}

impl Entity {
    fn new(pos: Vec2, base: f32, role: Role, sprite: Sprite) -> Self {
        Self {
            pos,
            vel: Vec2::ZERO,
            size: Vec2::new(base, base / 2.0),
            role,
            sprite,
        }
    }

    /// A stationary player car
    pub fn player(pos: Vec2, base: f32) -> Self {
        Self::new(pos, base, Role::Player, Sprite::Player)
    }

    /// An oncoming car moving left at `vx` (negative)
    pub fn obstacle(pos: Vec2, vx: f32, base: f32) -> Self {
        let mut car = Self::new(pos, base, Role::Obstacle, Sprite::Oncoming);
        car.vel = Vec2::new(vx, 0.0);
        car
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.size
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.size.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn bounds(&self) -> Aabb {
        Aabb {
            min: self.pos,
            size: self.size,
        }
    }

    /// One Euler step, one frame
    #[inline]
    pub fn update(&mut self) {
        self.pos += self.vel;
    }

    /// Keep the car fully on the canvas.
    ///
    /// The upper bound is applied after the lower one, so a canvas narrower
    /// than the car pins it to `canvas - size` instead of panicking.
    pub fn clamp_to_bounds(&mut self, canvas: Vec2) {
        let max = canvas - self.size;
        if self.pos.x < 0.0 {
            self.pos.x = 0.0;
        }
        if self.pos.x > max.x {
            self.pos.x = max.x;
        }
        if self.pos.y < 0.0 {
            self.pos.y = 0.0;
        }
        if self.pos.y > max.y {
            self.pos.y = max.y;
        }
    }

    /// Move a car that has fully left the canvas back to the right edge on a
    /// random lane. Velocity is untouched. Returns true if it was moved.
    pub fn recycle_if_off_left<R: Rng>(&mut self, canvas: Vec2, rng: &mut R) -> bool {
        if self.pos.x + self.size.x >= 0.0 {
            return false;
        }
        self.pos.x = canvas.x;
        self.pos.y = random_lane(rng, canvas.y, self.size.x);
        true
    }

    pub fn overlaps(&self, other: &Entity) -> bool {
        self.bounds().overlaps(&other.bounds())
    }
}

/// Random y in `[0, canvas_height - base)`; 0 when the canvas is too short
pub fn random_lane<R: Rng>(rng: &mut R, canvas_height: f32, base: f32) -> f32 {
    let top = canvas_height - base;
    if top > 0.0 { rng.random_range(0.0..top) } else { 0.0 }
}
