//! Static and dynamic body shapes
//!
//! A rectangle keeps, besides its bounding box, a center and four edges stored
//! as corner vectors relative to that center. The edges are only used to find
//! which side the ball struck; overlap tests go through the bounding box.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::{Aabb, Point, Vector2};

/// One of the two ends of the court
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

/// A named rectangle side
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeSide {
    Top,
    Right,
    Bottom,
    Left,
}

impl EdgeSide {
    pub const ALL: [EdgeSide; 4] = [EdgeSide::Top, EdgeSide::Right, EdgeSide::Bottom, EdgeSide::Left];

    /// Top and bottom edges reflect the vertical component
    pub fn is_horizontal(self) -> bool {
        matches!(self, EdgeSide::Top | EdgeSide::Bottom)
    }
}

/// An edge as the pair of center-relative corner vectors bounding it
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub side: EdgeSide,
    pub from: Vector2,
    pub to: Vector2,
}

/// Rendering tag; the core never draws
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Material {
    Wall,
    Obstacle,
    Gate,
    Paddle,
    Ball,
}

impl Material {
    /// Suggested RGBA fill
    pub fn rgba(&self) -> [f32; 4] {
        match self {
            Material::Wall => [0.55, 0.55, 0.6, 1.0],
            Material::Obstacle => [0.9, 0.6, 0.2, 1.0],
            Material::Gate => [0.2, 0.2, 0.25, 0.0],
            Material::Paddle => [0.9, 0.2, 0.2, 1.0],
            Material::Ball => [0.2, 0.8, 0.3, 1.0],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rectangle {
    /// Top-left corner
    origin: Point,
    width: f32,
    height: f32,
    center: Point,
    /// Top-left, top-right, bottom-right, bottom-left
    corners: [Point; 4],
    edges: [Edge; 4],
    aabb: Aabb,
}

impl Rectangle {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        let origin = Point::new(x, y);
        let mut rect = Self {
            origin,
            width: width.abs(),
            height: height.abs(),
            center: origin,
            corners: [origin; 4],
            edges: [Edge {
                side: EdgeSide::Top,
                from: Vector2::new(0.0, 0.0),
                to: Vector2::new(0.0, 0.0),
            }; 4],
            aabb: Aabb::new(origin.as_vec2(), origin.as_vec2()),
        };
        rect.update();
        rect
    }

    /// Move the top-left corner and rebuild the derived geometry
    pub fn set_origin(&mut self, x: f32, y: f32) {
        self.origin = Point::new(x, y);
        self.update();
    }

    fn update(&mut self) {
        let Point { x, y } = self.origin;
        let (w, h) = (self.width, self.height);

        self.center = Point::new(x + w / 2.0, y + h / 2.0);
        self.corners = [
            Point::new(x, y),
            Point::new(x + w, y),
            Point::new(x + w, y + h),
            Point::new(x, y + h),
        ];

        let rel: [Vector2; 4] = self.corners.map(|c| c.offset_from(self.center));
        let [tl, tr, br, bl] = rel;
        self.edges = [
            Edge { side: EdgeSide::Top, from: tl, to: tr },
            Edge { side: EdgeSide::Right, from: tr, to: br },
            Edge { side: EdgeSide::Bottom, from: br, to: bl },
            Edge { side: EdgeSide::Left, from: bl, to: tl },
        ];

        self.aabb = Aabb::new(self.corners[0].as_vec2(), self.corners[2].as_vec2());
    }

    #[inline]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.height
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn corners(&self) -> &[Point; 4] {
        &self.corners
    }

    #[inline]
    pub fn edges(&self) -> &[Edge; 4] {
        &self.edges
    }

    #[inline]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    /// Bottom edge y coordinate
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.origin.y + self.height
    }

    /// Broad-phase test against another box
    pub fn check_collision(&self, other: &Aabb) -> bool {
        self.aabb.overlaps(other)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Circle {
    center: Point,
    radius: f32,
    aabb: Aabb,
}

impl Circle {
    pub fn new(x: f32, y: f32, radius: f32) -> Self {
        let center = Point::new(x, y);
        let radius = radius.abs();
        Self {
            center,
            radius,
            aabb: Aabb::from_center_half_extents(center.as_vec2(), Vec2::splat(radius)),
        }
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    pub fn check_collision(&self, other: &Aabb) -> bool {
        self.aabb.overlaps(other)
    }
}

/// A static body supplied by the level
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Body {
    Obstacle(Rectangle),
    Wall(Rectangle),
    /// Transparent scoring boundary behind the paddle on `Side`
    Gate(Side, Rectangle),
    CircleObstacle(Circle),
}

impl Body {
    /// Reference point: top-left for rectangles, center for circles
    pub fn position(&self) -> Point {
        match self {
            Body::Obstacle(r) | Body::Wall(r) | Body::Gate(_, r) => r.origin(),
            Body::CircleObstacle(c) => c.center(),
        }
    }

    pub fn aabb(&self) -> &Aabb {
        match self {
            Body::Obstacle(r) | Body::Wall(r) | Body::Gate(_, r) => r.aabb(),
            Body::CircleObstacle(c) => c.aabb(),
        }
    }

    pub fn check_collision(&self, other: &Aabb) -> bool {
        self.aabb().overlaps(other)
    }

    pub fn material(&self) -> Material {
        match self {
            Body::Obstacle(_) | Body::CircleObstacle(_) => Material::Obstacle,
            Body::Wall(_) => Material::Wall,
            Body::Gate(..) => Material::Gate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rectangle_corners_and_edges() {
        let rect = Rectangle::new(90.0, 40.0, 20.0, 20.0);
        assert_eq!(rect.center(), Point::new(100.0, 50.0));
        assert_eq!(rect.corners()[0], Point::new(90.0, 40.0));
        assert_eq!(rect.corners()[2], Point::new(110.0, 60.0));

        let top = rect.edges()[0];
        assert_eq!(top.side, EdgeSide::Top);
        assert_eq!((top.from.dx(), top.from.dy()), (-10.0, -10.0));
        assert_eq!((top.to.dx(), top.to.dy()), (10.0, -10.0));

        let left = rect.edges()[3];
        assert_eq!(left.side, EdgeSide::Left);
        assert_eq!((left.from.dx(), left.from.dy()), (-10.0, 10.0));
    }

    #[test]
    fn test_rectangle_move_rebuilds_geometry() {
        let mut rect = Rectangle::new(0.0, 0.0, 25.0, 100.0);
        rect.set_origin(10.0, 30.0);
        assert_eq!(rect.aabb().min, Vec2::new(10.0, 30.0));
        assert_eq!(rect.aabb().max, Vec2::new(35.0, 130.0));
        assert_eq!(rect.bottom(), 130.0);
        assert!(rect.aabb().is_well_formed());
    }

    #[test]
    fn test_body_material_and_position() {
        let gate = Body::Gate(Side::Left, Rectangle::new(0.0, 0.0, 4.0, 540.0));
        assert_eq!(gate.material(), Material::Gate);
        assert_eq!(gate.position(), Point::new(0.0, 0.0));

        let circle = Body::CircleObstacle(Circle::new(50.0, 60.0, 8.0));
        assert_eq!(circle.position(), Point::new(50.0, 60.0));
        assert_eq!(circle.aabb().min, Vec2::new(42.0, 52.0));
    }
}
