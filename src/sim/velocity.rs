//! Polar velocity ("speed-vector") of the ball
//!
//! The speed and angle are authoritative; the per-tick components are derived
//! and rounded. Reflections write components back, so the angle has to be
//! rebuilt from the signs of (dx, dy) every time.

use std::f32::consts::{FRAC_PI_2, PI, TAU};

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{normalize_angle, polar_to_cartesian};

/// Horizontal heading derived from the velocity angle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum XDir {
    Rightward,
    Leftward,
}

impl XDir {
    /// +1 for rightward, -1 for leftward
    pub fn signum(self) -> f32 {
        match self {
            XDir::Rightward => 1.0,
            XDir::Leftward => -1.0,
        }
    }

    pub fn from_angle(angle: f32) -> Self {
        if (FRAC_PI_2..3.0 * FRAC_PI_2).contains(&angle) {
            XDir::Leftward
        } else {
            XDir::Rightward
        }
    }
}

/// Which velocity component a write targets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VelocityVector {
    speed: f32,
    /// Radians, always in [0, 2π)
    angle: f32,
    dx: f32,
    dy: f32,
    x_dir: XDir,
}

impl VelocityVector {
    pub fn new(speed: f32, angle_degrees: f32) -> Self {
        let mut v = Self {
            speed,
            angle: normalize_angle(angle_degrees.to_radians()),
            dx: 0.0,
            dy: 0.0,
            x_dir: XDir::Rightward,
        };
        v.derive_components();
        v
    }

    /// Build from per-tick components; the speed is their Euclidean norm
    pub fn from_components(dx: f32, dy: f32) -> Self {
        let mut v = Self {
            speed: dx.hypot(dy),
            angle: 0.0,
            dx: 1.0,
            dy: 1.0,
            x_dir: XDir::Rightward,
        };
        v.set_component(Axis::X, dx.round());
        v.set_component(Axis::Y, dy.round());
        v
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn angle(&self) -> f32 {
        self.angle
    }

    #[inline]
    pub fn dx(&self) -> f32 {
        self.dx
    }

    #[inline]
    pub fn dy(&self) -> f32 {
        self.dy
    }

    #[inline]
    pub fn x_dir(&self) -> XDir {
        self.x_dir
    }

    pub fn set_dx(&mut self, dx: f32) {
        self.set_component(Axis::X, dx);
    }

    pub fn set_dy(&mut self, dy: f32) {
        self.set_component(Axis::Y, dy);
    }

    /// Overwrite one component and rebuild the angle from the quadrant.
    ///
    /// A zero is stored as ±1, keeping the sign of the component it replaces,
    /// so the quadrant is always defined.
    pub fn set_component(&mut self, axis: Axis, value: f32) {
        let slot = match axis {
            Axis::X => &mut self.dx,
            Axis::Y => &mut self.dy,
        };
        *slot = if value == 0.0 {
            1.0_f32.copysign(*slot)
        } else {
            value
        };
        self.angle = quadrant_angle(self.dx, self.dy);
        self.x_dir = XDir::from_angle(self.angle);
    }

    /// Grow the magnitude up to `cap`, keeping the direction.
    ///
    /// A speed already above `cap` is left as is.
    pub fn increment_speed(&mut self, by: f32, cap: f32) {
        self.speed = (self.speed + by).min(cap).max(self.speed);
        self.derive_components();
    }

    /// Pick a fresh angle inside a cone around the current horizontal heading
    pub fn randomize_rebound_angle<R: Rng>(&mut self, cone: f32, rng: &mut R) {
        let base = match self.x_dir {
            XDir::Rightward => 0.0,
            XDir::Leftward => PI,
        };
        let jitter = if cone > 0.0 {
            rng.random_range(-cone..=cone)
        } else {
            0.0
        };
        self.angle = normalize_angle(base + jitter);
        self.derive_components();
    }

    fn derive_components(&mut self) {
        let d = polar_to_cartesian(self.speed, self.angle);
        self.dx = d.x.round();
        self.dy = d.y.round();

        if self.dx == 0.0 || self.dy == 0.0 {
            if self.dx == 0.0 {
                self.dx = 1.0_f32.copysign(d.x);
            }
            if self.dy == 0.0 {
                self.dy = 1.0_f32.copysign(d.y);
            }
            self.angle = quadrant_angle(self.dx, self.dy);
        }
        self.x_dir = XDir::from_angle(self.angle);
    }
}

/// Angle in [0, 2π) of a vector with non-zero components
fn quadrant_angle(dx: f32, dy: f32) -> f32 {
    let theta = (dy / dx).abs().atan();
    let angle = if dx > 0.0 && dy > 0.0 {
        theta
    } else if dx < 0.0 && dy > 0.0 {
        PI - theta
    } else if dx < 0.0 && dy < 0.0 {
        PI + theta
    } else {
        TAU - theta
    };
    normalize_angle(angle)
}
