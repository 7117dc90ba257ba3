//! Rebound Pong - two-paddle ball game simulation core
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, rebounds, paddles, ticks)
//! - `settings`: Data-driven tuning loaded from JSON

pub mod settings;
pub mod sim;

pub use settings::{Difficulty, Settings, SettingsError};

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Court dimensions
    pub const COURT_WIDTH: f32 = 960.0;
    pub const COURT_HEIGHT: f32 = 540.0;
    pub const WALL_THICKNESS: f32 = 10.0;
    pub const GATE_WIDTH: f32 = 4.0;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 25.0;
    pub const PADDLE_HEIGHT: f32 = 100.0;
    /// Gap between the court edge and a paddle's back face
    pub const PADDLE_MARGIN: f32 = 10.0;

    /// Ball defaults
    pub const BALL_RADIUS: f32 = 15.0;
    pub const BALL_START_SPEED: f32 = 4.0;
    /// Cap on paddle speed-ups; a step stays shorter than the thinnest
    /// wall or gate plus the ball diameter
    pub const BALL_MAX_SPEED: f32 = 16.0;
    /// Serve angle off the horizontal, in degrees
    pub const SERVE_ANGLE_DEG: f32 = 30.0;
    /// Gap between a paddle face and a freshly served ball
    pub const SERVE_GAP: f32 = 5.0;

    /// Speed added on every paddle hit
    pub const SPEED_INCREMENT: f32 = 0.5;
    /// Half-width of the rebound cone after a paddle hit, in degrees
    pub const REBOUND_CONE_DEG: f32 = 35.0;

    /// AI paddle kinematics (per tick)
    pub const AI_MAX_SPEED: f32 = 6.0;
    pub const AI_ACCELERATION: f32 = 0.5;
    /// Player paddle kinematics (per tick)
    pub const PLAYER_MAX_SPEED: f32 = 8.0;
    pub const PLAYER_ACCELERATION: f32 = 1.0;

    /// Distance at which a paddle counts as arrived
    pub const ARRIVAL_EPSILON: f32 = 1.0;
    /// Speed divisor applied while a tracking paddle sits on its target
    pub const ARRIVAL_DECAY: f32 = 3.0;

    /// Tolerance (radians) of the optional diagonal-impact correction
    pub const DIAGONAL_TOLERANCE: f32 = 0.1;
}

/// Normalize an angle to [0, 2π)
#[inline]
pub fn normalize_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(std::f32::consts::TAU);
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= std::f32::consts::TAU {
        0.0
    } else {
        wrapped
    }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f32, theta: f32) -> Vec2 {
    Vec2::new(r * theta.cos(), r * theta.sin())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::{PI, TAU};

    #[test]
    fn test_normalize_angle_wraps_into_range() {
        assert!((normalize_angle(-PI / 2.0) - 3.0 * PI / 2.0).abs() < 1e-5);
        assert!((normalize_angle(TAU + 0.25) - 0.25).abs() < 1e-5);
        assert_eq!(normalize_angle(0.0), 0.0);
        assert!(normalize_angle(-1e-9) < TAU);
    }

    #[test]
    fn test_polar_to_cartesian() {
        let p = polar_to_cartesian(2.0, PI / 2.0);
        assert!(p.x.abs() < 1e-5);
        assert!((p.y - 2.0).abs() < 1e-5);
    }
}
