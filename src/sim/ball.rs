//! The ball: the single moving circle
//!
//! Collision resolution runs against the position the ball had *before* its
//! last move, so the ball keeps an explicit (previous, current) pair.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{EdgeSide, Material, Rectangle, Side};
use super::collision::{Collider, is_outside, near_diagonal, struck_sides};
use super::geometry::{Aabb, Point};
use super::paddle::PaddleRole;
use super::velocity::VelocityVector;
use crate::Settings;

/// Position before and after one integration step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Motion {
    pub previous: Point,
    pub current: Point,
}

impl Motion {
    pub fn at_rest(p: Point) -> Self {
        Self {
            previous: p,
            current: p,
        }
    }
}

/// What a resolved contact amounted to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Impact {
    Wall,
    Obstacle,
    Paddle(PaddleRole),
    /// The ball crossed the gate behind the paddle on this side
    Gate(Side),
}

/// Which velocity components a reflection inverted
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Reflection {
    x: bool,
    y: bool,
}

impl Reflection {
    fn any(self) -> bool {
        self.x || self.y
    }
}

/// Rebound parameters applied during resolution
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReboundTuning {
    /// Speed added per paddle hit
    pub speed_increment: f32,
    /// No paddle hit raises the speed past this
    pub max_speed: f32,
    /// Half-width of the post-paddle angle cone, radians
    pub rebound_cone: f32,
    /// Tolerance of the diagonal-impact correction, if enabled
    pub diagonal_correction: Option<f32>,
}

impl From<&Settings> for ReboundTuning {
    fn from(settings: &Settings) -> Self {
        Self {
            speed_increment: settings.speed_increment,
            max_speed: settings.ball_max_speed,
            rebound_cone: settings.rebound_cone_deg.to_radians(),
            diagonal_correction: settings
                .diagonal_correction
                .then_some(settings.diagonal_tolerance),
        }
    }
}

impl Default for ReboundTuning {
    fn default() -> Self {
        Self::from(&Settings::default())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ball {
    motion: Motion,
    radius: f32,
    aabb: Aabb,
    velocity: VelocityVector,
}

impl Ball {
    pub fn new(center: Point, radius: f32, velocity: VelocityVector) -> Self {
        let mut ball = Self {
            motion: Motion::at_rest(center),
            radius: radius.abs(),
            aabb: Aabb::new(center.as_vec2(), center.as_vec2()),
            velocity,
        };
        ball.refresh_aabb();
        ball
    }

    #[inline]
    pub fn center(&self) -> Point {
        self.motion.current
    }

    #[inline]
    pub fn previous(&self) -> Point {
        self.motion.previous
    }

    #[inline]
    pub fn motion(&self) -> Motion {
        self.motion
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    #[inline]
    pub fn velocity(&self) -> &VelocityVector {
        &self.velocity
    }

    pub fn material(&self) -> Material {
        Material::Ball
    }

    /// Advance one tick by the velocity components
    pub fn integrate(&mut self) -> Motion {
        let mut next = self.motion.current;
        next.translate(self.velocity.dx(), self.velocity.dy());
        self.motion = Motion {
            previous: self.motion.current,
            current: next,
        };
        self.refresh_aabb();
        self.motion
    }

    /// Re-spot the ball without moving it by its velocity
    pub fn teleport(&mut self, to: Point) {
        self.motion = Motion::at_rest(to);
        self.refresh_aabb();
    }

    /// Teleport and replace the velocity; used only when serving
    pub fn serve(&mut self, to: Point, velocity: VelocityVector) {
        self.velocity = velocity;
        self.teleport(to);
    }

    fn refresh_aabb(&mut self) {
        self.aabb = Aabb::from_center_half_extents(
            self.motion.current.as_vec2(),
            Vec2::splat(self.radius),
        );
    }

    /// Apply the effect of touching `collider`.
    ///
    /// Returns `None` when the contact changed nothing (circle obstacles, or a
    /// rectangle the ball is already leaving).
    pub fn resolve_collision<R: Rng>(
        &mut self,
        collider: Collider<'_>,
        tuning: &ReboundTuning,
        rng: &mut R,
    ) -> Option<Impact> {
        match collider {
            Collider::Gate(side, _) => Some(Impact::Gate(side)),
            Collider::CircleObstacle(_) => None,
            Collider::Wall(rect) => self.reflect_off(rect, tuning).any().then_some(Impact::Wall),
            Collider::Obstacle(rect) => {
                self.reflect_off(rect, tuning).any().then_some(Impact::Obstacle)
            }
            Collider::AiPaddle(rect) => self.paddle_rebound(rect, PaddleRole::Ai, tuning, rng),
            Collider::PlayerPaddle(rect) => {
                self.paddle_rebound(rect, PaddleRole::Player, tuning, rng)
            }
        }
    }

    fn paddle_rebound<R: Rng>(
        &mut self,
        rect: &Rectangle,
        role: PaddleRole,
        tuning: &ReboundTuning,
        rng: &mut R,
    ) -> Option<Impact> {
        let reflection = self.reflect_off(rect, tuning);
        if !reflection.any() {
            return None;
        }
        let before = self.velocity.speed();
        let reflected_dy = self.velocity.dy();
        self.velocity.randomize_rebound_angle(tuning.rebound_cone, rng);
        // A top or bottom hit must leave the face it struck
        if reflection.y && self.velocity.dy().signum() != reflected_dy.signum() {
            self.velocity.set_dy(-self.velocity.dy());
        }
        self.velocity
            .increment_speed(tuning.speed_increment, tuning.max_speed);
        log::debug!(
            "{:?} paddle hit: speed {} -> {}, angle {:.3}",
            role,
            before,
            self.velocity.speed(),
            self.velocity.angle()
        );
        Some(Impact::Paddle(role))
    }

    /// Exact-side reflection, reporting which components were inverted.
    ///
    /// A side only reflects while the ball still moves into it, so a ball that
    /// overlaps for several ticks is not bounced back inside.
    fn reflect_off(&mut self, rect: &Rectangle, tuning: &ReboundTuning) -> Reflection {
        let previous = self.motion.previous;
        let hits = struck_sides(rect, previous);

        if hits.is_empty() {
            let outside = is_outside(rect, previous);
            if outside {
                log::error!("no side resolved for {:?} against {:?}", previous, rect.aabb());
            } else {
                log::warn!("ball center {:?} already inside {:?}", previous, rect.aabb());
            }
            debug_assert!(!outside, "overlap from outside resolved to no side");
            return Reflection::default();
        }

        let (dx, dy) = (self.velocity.dx(), self.velocity.dy());
        let mut flip_x = false;
        let mut flip_y = false;
        for side in hits.iter() {
            match side {
                EdgeSide::Top => flip_y |= dy > 0.0,
                EdgeSide::Bottom => flip_y |= dy < 0.0,
                EdgeSide::Left => flip_x |= dx > 0.0,
                EdgeSide::Right => flip_x |= dx < 0.0,
            }
        }

        if let Some(tolerance) = tuning.diagonal_correction {
            let above = previous.y < rect.center().y;
            let closing = if above { dy > 0.0 } else { dy < 0.0 };
            if !flip_y && closing && near_diagonal(rect, previous, tolerance) {
                flip_y = true;
            }
        }

        if flip_x {
            self.velocity.set_dx(-dx);
        }
        if flip_y {
            self.velocity.set_dy(-dy);
        }
        Reflection {
            x: flip_x,
            y: flip_y,
        }
    }
}
