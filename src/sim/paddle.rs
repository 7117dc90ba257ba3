//! Paddles and their controllers
//!
//! Both paddles share the same kinematics: accelerate toward a target up to a
//! speed cap, and refuse any step that would leave the play area. The AI
//! paddle picks its target from the ball; the player paddle from a command.

use serde::{Deserialize, Serialize};

use super::ball::Ball;
use super::body::{Material, Rectangle, Side};
use super::velocity::XDir;
use crate::consts::{ARRIVAL_DECAY, ARRIVAL_EPSILON};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaddleRole {
    Ai,
    Player,
}

/// Abstract per-tick command from whichever input device is active
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub enum PaddleCommand {
    MoveUp,
    MoveDown,
    /// Bring the paddle center to this y
    MoveToward(f32),
    #[default]
    Idle,
}

/// What the AI controller did on its last update
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackingState {
    /// Ball moving away: ease back to the resting position
    Returning,
    /// Ball approaching: chase its vertical center
    Tracking,
}

/// Vertical band a paddle may occupy
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayArea {
    pub border_top: f32,
    pub height: f32,
    /// Slack allowed past either border (a third of the ball radius)
    pub tolerance: f32,
}

impl PlayArea {
    pub fn new(border_top: f32, height: f32, ball_radius: f32) -> Self {
        Self {
            border_top,
            height,
            tolerance: ball_radius / 3.0,
        }
    }

    #[inline]
    pub fn top_limit(&self) -> f32 {
        self.border_top - self.tolerance
    }

    #[inline]
    pub fn bottom_limit(&self) -> f32 {
        self.border_top + self.height + self.tolerance
    }

    pub fn contains_span(&self, top: f32, bottom: f32) -> bool {
        top >= self.top_limit() && bottom <= self.bottom_limit()
    }

    /// Top y that centers a paddle of `paddle_height` vertically
    pub fn resting_y(&self, paddle_height: f32) -> f32 {
        (self.border_top + (self.height - paddle_height) / 2.0).round()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Paddle {
    role: PaddleRole,
    side: Side,
    rect: Rectangle,
    rest_y: f32,
    speed: f32,
    max_speed: f32,
    acceleration: f32,
    state: TrackingState,
}

impl Paddle {
    /// A paddle resting at `rest_y`, with its back face at `x`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        role: PaddleRole,
        side: Side,
        x: f32,
        rest_y: f32,
        width: f32,
        height: f32,
        max_speed: f32,
        acceleration: f32,
    ) -> Self {
        Self {
            role,
            side,
            rect: Rectangle::new(x, rest_y, width, height),
            rest_y: rest_y.round(),
            speed: 0.0,
            max_speed,
            acceleration,
            state: TrackingState::Returning,
        }
    }

    #[inline]
    pub fn role(&self) -> PaddleRole {
        self.role
    }

    #[inline]
    pub fn side(&self) -> Side {
        self.side
    }

    #[inline]
    pub fn rect(&self) -> &Rectangle {
        &self.rect
    }

    #[inline]
    pub fn y(&self) -> f32 {
        self.rect.origin().y
    }

    #[inline]
    pub fn rest_y(&self) -> f32 {
        self.rest_y
    }

    #[inline]
    pub fn speed(&self) -> f32 {
        self.speed
    }

    #[inline]
    pub fn max_speed(&self) -> f32 {
        self.max_speed
    }

    #[inline]
    pub fn state(&self) -> TrackingState {
        self.state
    }

    pub fn center_y(&self) -> f32 {
        self.y() + self.rect.height() / 2.0
    }

    pub fn material(&self) -> Material {
        Material::Paddle
    }

    /// X of the face turned toward the court
    pub fn face_x(&self) -> f32 {
        match self.side {
            Side::Left => self.rect.origin().x + self.rect.width(),
            Side::Right => self.rect.origin().x,
        }
    }

    /// Back to the resting position at rest; called when a round restarts
    pub fn rehome(&mut self) {
        let x = self.rect.origin().x;
        self.rect.set_origin(x, self.rest_y);
        self.speed = 0.0;
        self.state = TrackingState::Returning;
    }

    /// Whether a ball heading `x_dir` is coming toward this paddle
    fn is_approached_by(&self, x_dir: XDir) -> bool {
        matches!(
            (self.side, x_dir),
            (Side::Left, XDir::Leftward) | (Side::Right, XDir::Rightward)
        )
    }

    /// One tick of the AI controller
    pub fn track_ball(&mut self, ball: &Ball, area: &PlayArea) {
        if self.is_approached_by(ball.velocity().x_dir()) {
            self.state = TrackingState::Tracking;
            self.chase(ball.center().y, area);
        } else {
            self.state = TrackingState::Returning;
            self.return_to_rest(area);
        }
    }

    /// One tick of a command-driven paddle
    pub fn apply_command(&mut self, command: PaddleCommand, area: &PlayArea) {
        match command {
            PaddleCommand::MoveUp => {
                self.accelerate();
                self.try_step(-self.speed.round(), area);
            }
            PaddleCommand::MoveDown => {
                self.accelerate();
                self.try_step(self.speed.round(), area);
            }
            PaddleCommand::MoveToward(target_y) => self.chase(target_y, area),
            PaddleCommand::Idle => self.speed /= ARRIVAL_DECAY,
        }
    }

    /// Logarithmic ease back to `rest_y`
    fn return_to_rest(&mut self, area: &PlayArea) {
        let delta = self.rest_y - self.y();
        if delta.abs() <= ARRIVAL_EPSILON {
            self.speed = 0.0;
            return;
        }
        self.speed = (delta.abs() + 1.0).ln();
        let step = self.speed.round().max(1.0).min(delta.abs());
        self.try_step(step.copysign(delta), area);
    }

    /// Accelerate the paddle center toward `target_y` without passing it
    fn chase(&mut self, target_y: f32, area: &PlayArea) {
        let delta = target_y - self.center_y();
        if delta.abs() <= ARRIVAL_EPSILON {
            self.speed /= ARRIVAL_DECAY;
            return;
        }
        self.accelerate();
        let step = self.speed.round().min(delta.abs().round());
        if step > 0.0 {
            self.try_step(step.copysign(delta), area);
        }
    }

    fn accelerate(&mut self) {
        self.speed = (self.speed + self.acceleration).min(self.max_speed);
    }

    /// Move by `dy` unless that leaves the play area; true if moved
    fn try_step(&mut self, dy: f32, area: &PlayArea) -> bool {
        let x = self.rect.origin().x;
        let top = self.y() + dy;
        if !area.contains_span(top, top + self.rect.height()) {
            return false;
        }
        self.rect.set_origin(x, top);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::geometry::Point;
    use crate::sim::velocity::VelocityVector;
    use proptest::prelude::*;

    fn area() -> PlayArea {
        PlayArea::new(10.0, 520.0, 15.0)
    }

    fn ai_paddle() -> Paddle {
        let rest = area().resting_y(100.0);
        Paddle::new(PaddleRole::Ai, Side::Left, 10.0, rest, 25.0, 100.0, 6.0, 0.5)
    }

    fn ball_at(x: f32, y: f32, dx: f32) -> Ball {
        Ball::new(Point::new(x, y), 15.0, VelocityVector::from_components(dx, 1.0))
    }

    fn assert_contained(paddle: &Paddle, area: &PlayArea) {
        let top = paddle.y();
        let bottom = top + paddle.rect().height();
        assert!(
            area.contains_span(top, bottom),
            "paddle span {top}..{bottom} left the area"
        );
    }

    #[test]
    fn test_resting_position_is_centered() {
        assert_eq!(area().resting_y(100.0), 220.0);
        assert_eq!(ai_paddle().center_y(), 270.0);
    }

    #[test]
    fn test_ai_returns_to_center_and_stops() {
        let area = area();
        let mut paddle = ai_paddle();
        let rest = paddle.rest_y();
        paddle.rect.set_origin(10.0, rest + 40.0);

        // Ball heading right, away from the left paddle
        let ball = ball_at(400.0, 100.0, 4.0);
        let mut last_speed = f32::INFINITY;
        let mut ticks = 0;
        while (paddle.y() - rest).abs() > 1.0 {
            paddle.track_ball(&ball, &area);
            assert_eq!(paddle.state(), TrackingState::Returning);
            assert!(paddle.speed() <= last_speed, "return must decelerate");
            last_speed = paddle.speed();
            ticks += 1;
            assert!(ticks < 60, "did not converge");
        }

        paddle.track_ball(&ball, &area);
        assert_eq!(paddle.speed(), 0.0);
        assert!((paddle.y() - rest).abs() <= 1.0);

        // Stays put once there
        let y = paddle.y();
        paddle.track_ball(&ball, &area);
        assert_eq!(paddle.y(), y);
    }

    #[test]
    fn test_ai_tracks_without_overshoot() {
        let area = area();
        let mut paddle = ai_paddle();
        let ball = ball_at(300.0, 420.0, -4.0);

        let mut prev_delta = ball.center().y - paddle.center_y();
        for _ in 0..100 {
            paddle.track_ball(&ball, &area);
            assert_eq!(paddle.state(), TrackingState::Tracking);
            assert!(paddle.speed() <= paddle.max_speed());
            let delta = ball.center().y - paddle.center_y();
            assert!(delta >= 0.0, "overshot the ball");
            assert!(delta <= prev_delta);
            prev_delta = delta;
        }
        assert!(prev_delta <= 1.0);

        // Sitting on target: speed decays instead of resetting
        let before = paddle.speed();
        paddle.track_ball(&ball, &area);
        assert!((paddle.speed() - before / 3.0).abs() < 1e-6);
    }

    #[test]
    fn test_ai_rejects_moves_out_of_area() {
        let area = area();
        let mut paddle = ai_paddle();
        let ball = ball_at(300.0, 5000.0, -4.0);
        for _ in 0..500 {
            paddle.track_ball(&ball, &area);
            assert_contained(&paddle, &area);
        }
        assert!(paddle.rect().bottom() > area.bottom_limit() - paddle.max_speed() - 1.0);
    }

    #[test]
    fn test_player_commands() {
        let area = area();
        let rest = area.resting_y(100.0);
        let mut paddle = Paddle::new(PaddleRole::Player, Side::Right, 925.0, rest, 25.0, 100.0, 8.0, 1.0);

        paddle.apply_command(PaddleCommand::MoveUp, &area);
        assert_eq!(paddle.y(), rest - 1.0);
        paddle.apply_command(PaddleCommand::MoveUp, &area);
        assert_eq!(paddle.y(), rest - 3.0);

        paddle.apply_command(PaddleCommand::Idle, &area);
        assert_eq!(paddle.y(), rest - 3.0);
        assert!((paddle.speed() - 2.0 / 3.0).abs() < 1e-6);

        paddle.rehome();
        assert_eq!(paddle.y(), rest);
        assert_eq!(paddle.speed(), 0.0);

        for _ in 0..50 {
            paddle.apply_command(PaddleCommand::MoveToward(100.0), &area);
        }
        assert!((paddle.center_y() - 100.0).abs() <= 1.0);
    }

    #[test]
    fn test_face_x() {
        let paddle = ai_paddle();
        assert_eq!(paddle.face_x(), 35.0);
        let right = Paddle::new(PaddleRole::Player, Side::Right, 925.0, 220.0, 25.0, 100.0, 8.0, 1.0);
        assert_eq!(right.face_x(), 925.0);
    }

    #[test]
    fn test_paddles_report_paddle_material() {
        let paddle = ai_paddle();
        assert_eq!(paddle.material(), Material::Paddle);
        assert_ne!(paddle.material().rgba(), Material::Wall.rgba());
    }

    fn command() -> impl Strategy<Value = PaddleCommand> {
        prop_oneof![
            Just(PaddleCommand::MoveUp),
            Just(PaddleCommand::MoveDown),
            Just(PaddleCommand::Idle),
            (-200.0f32..800.0).prop_map(PaddleCommand::MoveToward),
        ]
    }

    proptest! {
        #[test]
        fn prop_player_paddle_stays_in_area(commands in prop::collection::vec(command(), 1..300)) {
            let area = area();
            let rest = area.resting_y(100.0);
            let mut paddle = Paddle::new(PaddleRole::Player, Side::Right, 925.0, rest, 25.0, 100.0, 8.0, 1.0);
            for cmd in commands {
                paddle.apply_command(cmd, &area);
                let top = paddle.y();
                prop_assert!(area.contains_span(top, top + paddle.rect().height()));
            }
        }

        #[test]
        fn prop_ai_paddle_stays_in_area(
            targets in prop::collection::vec((-300.0f32..900.0, any::<bool>()), 1..200)
        ) {
            let area = area();
            let mut paddle = ai_paddle();
            for (y, approaching) in targets {
                let ball = ball_at(300.0, y, if approaching { -4.0 } else { 4.0 });
                paddle.track_ball(&ball, &area);
                let top = paddle.y();
                prop_assert!(area.contains_span(top, top + paddle.rect().height()));
            }
        }
    }
}
