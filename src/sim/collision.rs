//! Axis-aligned bounding box collisions
//!
//! Every entity in the game collides as the same fixed-size square anchored
//! at its top-left position. Entity types opt in through [`Bounded`].

use glam::Vec2;

use crate::consts::HITBOX_SIZE;

/// An axis-aligned rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec2,
    pub size: Vec2,
}

impl Aabb {
    pub fn new(min: Vec2, size: Vec2) -> Self {
        Self { min, size }
    }

    /// The standard sprite hitbox at `pos`
    pub fn sprite(pos: Vec2) -> Self {
        Self::new(pos, Vec2::splat(HITBOX_SIZE))
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    /// Strict overlap test: boxes that merely touch do not collide
    pub fn overlaps(&self, other: &Aabb) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x && a_max.x > other.min.x && self.min.y < b_max.y && a_max.y > other.min.y
    }

    /// Inclusive point test, used for screen-space button hits
    pub fn contains_point(&self, p: Vec2) -> bool {
        let max = self.max();
        p.x >= self.min.x && p.x <= max.x && p.y >= self.min.y && p.y <= max.y
    }
}

/// Anything with a position that takes part in collision tests
pub trait Bounded {
    fn position(&self) -> Vec2;

    fn bounds(&self) -> Aabb {
        Aabb::sprite(self.position())
    }
}

impl Bounded for Vec2 {
    fn position(&self) -> Vec2 {
        *self
    }
}

/// Check whether two entities' hitboxes overlap
#[inline]
pub fn collides(a: &impl Bounded, b: &impl Bounded) -> bool {
    a.bounds().overlaps(&b.bounds())
}
