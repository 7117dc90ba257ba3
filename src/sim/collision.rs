//! Collision detection for the ball against rectangles and circles
//!
//! The tricky part of the engine: deciding which side of a rectangle the ball
//! came through. The broad phase only says "the boxes overlap"; the side comes
//! from cross-product sign tests against the ball's previous position.

use glam::Vec2;

use super::body::{Body, Circle, EdgeSide, Rectangle, Side};
use super::geometry::{Aabb, Point};
use super::paddle::{Paddle, PaddleRole};

/// Everything the ball can be reported to touch, one variant per behavior
#[derive(Debug, Clone, Copy)]
pub enum Collider<'a> {
    Obstacle(&'a Rectangle),
    Wall(&'a Rectangle),
    Gate(Side, &'a Rectangle),
    AiPaddle(&'a Rectangle),
    PlayerPaddle(&'a Rectangle),
    CircleObstacle(&'a Circle),
}

impl<'a> From<&'a Body> for Collider<'a> {
    fn from(body: &'a Body) -> Self {
        match body {
            Body::Obstacle(r) => Collider::Obstacle(r),
            Body::Wall(r) => Collider::Wall(r),
            Body::Gate(side, r) => Collider::Gate(*side, r),
            Body::CircleObstacle(c) => Collider::CircleObstacle(c),
        }
    }
}

impl<'a> From<&'a Paddle> for Collider<'a> {
    fn from(paddle: &'a Paddle) -> Self {
        match paddle.role() {
            PaddleRole::Ai => Collider::AiPaddle(paddle.rect()),
            PaddleRole::Player => Collider::PlayerPaddle(paddle.rect()),
        }
    }
}

/// Report every body and paddle whose box overlaps the ball's box.
///
/// Static bodies come first in level order, then paddles in the order given.
pub fn broad_phase<'a>(
    ball_aabb: &Aabb,
    bodies: &'a [Body],
    paddles: &'a [Paddle],
) -> Vec<Collider<'a>> {
    let statics = bodies
        .iter()
        .filter(|b| b.check_collision(ball_aabb))
        .map(Collider::from);
    let movers = paddles
        .iter()
        .filter(|p| p.rect().check_collision(ball_aabb))
        .map(Collider::from);
    statics.chain(movers).collect()
}

/// Set of rectangle sides matched by one side test
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SideHits {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl SideHits {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, side: EdgeSide) {
        match side {
            EdgeSide::Top => self.top = true,
            EdgeSide::Right => self.right = true,
            EdgeSide::Bottom => self.bottom = true,
            EdgeSide::Left => self.left = true,
        }
    }

    pub fn contains(&self, side: EdgeSide) -> bool {
        match side {
            EdgeSide::Top => self.top,
            EdgeSide::Right => self.right,
            EdgeSide::Bottom => self.bottom,
            EdgeSide::Left => self.left,
        }
    }

    pub fn is_empty(&self) -> bool {
        !(self.top || self.right || self.bottom || self.left)
    }

    pub fn count(&self) -> usize {
        [self.top, self.right, self.bottom, self.left]
            .into_iter()
            .filter(|hit| *hit)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = EdgeSide> + '_ {
        EdgeSide::ALL.into_iter().filter(|s| self.contains(*s))
    }
}

/// True when `a` and `b` do not share a strict sign (zero counts as either)
#[inline]
fn opposite_sign(a: f32, b: f32) -> bool {
    a * b <= 0.0
}

/// Find the side(s) of `rect` the ball entered through, given the ball
/// center before its last move.
///
/// An edge matches when `v0` (previous position relative to the center) lies
/// in the wedge swept by the edge's two corner vectors and on the far side of
/// the edge from the center. A point exactly on a diagonal matches both
/// neighboring edges.
pub fn struck_sides(rect: &Rectangle, previous: Point) -> SideHits {
    let v0 = previous.offset_from(rect.center());
    let mut hits = SideHits::none();

    for edge in rect.edges() {
        let c1 = edge.from;
        let c2 = edge.to;
        let along = c2 - c1;
        let to_center = -c1;
        let to_point = v0 - c1;

        let in_wedge = opposite_sign(v0.cross(&c1), v0.cross(&c2));
        let beyond_edge = opposite_sign(along.cross(&to_center), along.cross(&to_point));

        if in_wedge && beyond_edge {
            hits.insert(edge.side);
        }
    }

    hits
}

/// Whether the previous center sits outside the rectangle (boundary included)
pub fn is_outside(rect: &Rectangle, previous: Point) -> bool {
    !rect.aabb().strictly_contains(previous.as_vec2())
}

/// Whether the approach direction lies within `tolerance` radians of the
/// rectangle's diagonal.
///
/// Wide, flat rectangles have very narrow side wedges, so a ball glancing a
/// corner can be assigned to the short side. Callers may use this to force a
/// vertical rebound in that band.
pub fn near_diagonal(rect: &Rectangle, previous: Point, tolerance: f32) -> bool {
    let v0 = previous.offset_from(rect.center()).as_vec2();
    if v0 == Vec2::ZERO {
        return false;
    }
    let diagonal = (rect.height() / rect.width().max(f32::EPSILON)).atan();
    let approach = (v0.y / v0.x).abs().atan();
    (approach - diagonal).abs() <= tolerance
}
