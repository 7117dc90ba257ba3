//! Geometry primitives shared by every body
//!
//! Positions are quantized to whole units so that ball and paddle motion stays
//! in lockstep with the per-tick integer velocity components.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An integer-rounded position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: x.round(),
            y: y.round(),
        }
    }

    /// Move by a displacement, re-quantizing the result
    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x = (self.x + dx).round();
        self.y = (self.y + dy).round();
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Displacement from `origin` to this point
    pub fn offset_from(&self, origin: Point) -> Vector2 {
        Vector2::new(self.x - origin.x, self.y - origin.y)
    }
}

/// A displacement with a cached length
///
/// The length is floored at 1 so a vector is never treated as degenerate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    d: Vec2,
    length: f32,
}

impl Vector2 {
    pub fn new(dx: f32, dy: f32) -> Self {
        let d = Vec2::new(dx, dy);
        Self {
            d,
            length: Self::floored_length(d),
        }
    }

    #[inline]
    fn floored_length(d: Vec2) -> f32 {
        d.length().max(1.0)
    }

    #[inline]
    pub fn dx(&self) -> f32 {
        self.d.x
    }

    #[inline]
    pub fn dy(&self) -> f32 {
        self.d.y
    }

    #[inline]
    pub fn length(&self) -> f32 {
        self.length
    }

    pub fn set_dx(&mut self, dx: f32) {
        self.d.x = dx;
        self.length = Self::floored_length(self.d);
    }

    pub fn set_dy(&mut self, dy: f32) {
        self.d.y = dy;
        self.length = Self::floored_length(self.d);
    }

    /// Add another displacement component-wise
    pub fn add(&mut self, other: &Vector2) {
        self.d += other.d;
        self.length = Self::floored_length(self.d);
    }

    /// Point-reflect through the origin
    pub fn negate(&mut self) {
        self.d = -self.d;
    }

    pub fn scale(&mut self, factor: f32) {
        self.d *= factor;
        self.length = Self::floored_length(self.d);
    }

    /// 2D cross product (z component of the 3D cross)
    #[inline]
    pub fn cross(&self, other: &Vector2) -> f32 {
        self.d.perp_dot(other.d)
    }

    #[inline]
    pub fn as_vec2(&self) -> Vec2 {
        self.d
    }
}

impl std::ops::Sub for Vector2 {
    type Output = Vector2;

    fn sub(self, rhs: Vector2) -> Vector2 {
        Vector2::new(self.d.x - rhs.d.x, self.d.y - rhs.d.y)
    }
}

impl std::ops::Neg for Vector2 {
    type Output = Vector2;

    fn neg(mut self) -> Vector2 {
        self.negate();
        self
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Aabb {
    pub min: Vec2,
    pub max: Vec2,
}

impl Aabb {
    /// Build from any two opposite corners
    pub fn new(a: Vec2, b: Vec2) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn from_center_half_extents(center: Vec2, half: Vec2) -> Self {
        Self::new(center - half.abs(), center + half.abs())
    }

    /// Box-vs-box overlap; touching boxes overlap
    pub fn overlaps(&self, other: &Aabb) -> bool {
        !(self.max.x < other.min.x
            || self.min.x > other.max.x
            || self.max.y < other.min.y
            || self.min.y > other.max.y)
    }

    /// Strict containment, boundary excluded
    pub fn strictly_contains(&self, p: Vec2) -> bool {
        p.x > self.min.x && p.x < self.max.x && p.y > self.min.y && p.y < self.max.y
    }

    #[inline]
    pub fn is_well_formed(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y
    }
}
