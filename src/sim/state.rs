//! Simulation state and the events it reports
//!
//! One ball, two paddles and the level's static bodies. Everything random is
//! drawn from a seeded `Pcg32` so two runs with the same seed and inputs agree
//! tick for tick.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::ball::{Ball, ReboundTuning};
use super::body::{Body, Side};
use super::geometry::Point;
use super::level::Level;
use super::paddle::{Paddle, PaddleRole, PlayArea};
use super::velocity::VelocityVector;
use crate::Settings;
use crate::consts::SERVE_GAP;

/// Something the match collaborator may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    WallHit,
    ObstacleHit,
    PaddleHit { role: PaddleRole },
    /// The ball crossed the gate on `against`'s side
    Scored { against: Side },
    /// The next serve should head toward this side
    ServeToward(Side),
    /// A new rally started from this side
    Served { from: Side },
}

/// Whether the ball is live
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RallyPhase {
    InPlay,
    /// Ball frozen after a gate hit until the next serve
    Scored { against: Side },
}

/// Borrowed view of everything a renderer draws
#[derive(Debug, Serialize)]
pub struct Frame<'a> {
    pub tick: u64,
    pub level: u32,
    pub phase: RallyPhase,
    pub ball: &'a Ball,
    pub paddles: &'a [Paddle; 2],
    pub bodies: &'a [Body],
}

/// Complete simulation state
#[derive(Debug, Clone)]
pub struct Simulation {
    pub(crate) settings: Settings,
    pub(crate) tuning: ReboundTuning,
    pub(crate) area: PlayArea,
    pub(crate) seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) level: Level,
    pub(crate) ball: Ball,
    /// AI paddle on the left, player paddle on the right
    pub(crate) paddles: [Paddle; 2],
    pub(crate) phase: RallyPhase,
    pub(crate) events: Vec<GameEvent>,
    pub(crate) time_ticks: u64,
}

impl Simulation {
    /// Level 0 with a serve from the AI side
    pub fn new(settings: Settings, seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let level = Level::generate(&settings, 0, &mut rng);
        Self::assemble(settings, level, seed, rng)
    }

    /// Use a prepared level instead of generating one
    pub fn with_level(settings: Settings, level: Level, seed: u64) -> Self {
        Self::assemble(settings, level, seed, Pcg32::seed_from_u64(seed))
    }

    fn assemble(settings: Settings, level: Level, seed: u64, rng: Pcg32) -> Self {
        let area = PlayArea::new(
            settings.wall_thickness,
            settings.area_height(),
            settings.ball_radius,
        );
        let paddles = build_paddles(&settings, &area);
        let ball = Ball::new(
            Point::new(settings.court_width / 2.0, settings.court_height / 2.0),
            settings.ball_radius,
            VelocityVector::new(settings.ball_speed, settings.serve_angle_deg),
        );

        let mut sim = Self {
            tuning: ReboundTuning::from(&settings),
            settings,
            area,
            seed,
            rng,
            level,
            ball,
            paddles,
            phase: RallyPhase::InPlay,
            events: Vec::new(),
            time_ticks: 0,
        };
        sim.serve(Side::Left);
        sim
    }

    /// Regenerate the obstacles for `index` and restart from the AI side
    pub fn start_level(&mut self, index: u32) {
        self.level = Level::generate(&self.settings, index, &mut self.rng);
        self.ball = Ball::new(
            Point::new(
                self.settings.court_width / 2.0,
                self.settings.court_height / 2.0,
            ),
            self.settings.ball_radius,
            VelocityVector::new(self.settings.ball_speed, self.settings.serve_angle_deg),
        );
        self.serve(Side::Left);
    }

    /// Put the ball in front of the `from` paddle and send it across
    pub fn serve(&mut self, from: Side) {
        for paddle in &mut self.paddles {
            paddle.rehome();
        }

        let server = self.paddle_on(from);
        let gap = self.settings.ball_radius + SERVE_GAP;
        let x = match from {
            Side::Left => server.face_x() + gap,
            Side::Right => server.face_x() - gap,
        };
        let at = Point::new(x, server.center_y());

        let tilt = if self.rng.random_bool(0.5) {
            self.settings.serve_angle_deg
        } else {
            -self.settings.serve_angle_deg
        };
        let heading = match from {
            Side::Left => tilt,
            Side::Right => 180.0 - tilt,
        };
        let velocity = VelocityVector::new(self.settings.ball_speed, heading);

        self.ball.serve(at, velocity);
        self.phase = RallyPhase::InPlay;
        self.events.push(GameEvent::Served { from });
        log::info!(
            "Serve from {} at ({}, {}) heading {:.0}°",
            from.as_str(),
            at.x,
            at.y,
            heading
        );
    }

    fn paddle_on(&self, side: Side) -> &Paddle {
        match side {
            Side::Left => &self.paddles[0],
            Side::Right => &self.paddles[1],
        }
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            tick: self.time_ticks,
            level: self.level.index,
            phase: self.phase,
            ball: &self.ball,
            paddles: &self.paddles,
            bodies: &self.level.bodies,
        }
    }

    #[inline]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[inline]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[inline]
    pub fn ball(&self) -> &Ball {
        &self.ball
    }

    #[inline]
    pub fn paddles(&self) -> &[Paddle; 2] {
        &self.paddles
    }

    pub fn ai_paddle(&self) -> &Paddle {
        &self.paddles[0]
    }

    pub fn player_paddle(&self) -> &Paddle {
        &self.paddles[1]
    }

    #[inline]
    pub fn bodies(&self) -> &[Body] {
        &self.level.bodies
    }

    #[inline]
    pub fn level_index(&self) -> u32 {
        self.level.index
    }

    #[inline]
    pub fn area(&self) -> &PlayArea {
        &self.area
    }

    #[inline]
    pub fn phase(&self) -> RallyPhase {
        self.phase
    }

    /// Events raised by the last tick (and any serve since)
    #[inline]
    pub fn events(&self) -> &[GameEvent] {
        &self.events
    }

    #[inline]
    pub fn time_ticks(&self) -> u64 {
        self.time_ticks
    }
}

fn build_paddles(settings: &Settings, area: &PlayArea) -> [Paddle; 2] {
    let rest_y = area.resting_y(settings.paddle_height);
    let ai = Paddle::new(
        PaddleRole::Ai,
        Side::Left,
        settings.paddle_margin,
        rest_y,
        settings.paddle_width,
        settings.paddle_height,
        settings.ai_max_speed,
        settings.ai_acceleration,
    );
    let player = Paddle::new(
        PaddleRole::Player,
        Side::Right,
        settings.court_width - settings.paddle_margin - settings.paddle_width,
        rest_y,
        settings.paddle_width,
        settings.paddle_height,
        settings.player_max_speed,
        settings.player_acceleration,
    );
    [ai, player]
}
