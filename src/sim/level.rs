//! Level layout: walls, gates and obstacles
//!
//! The static body list is fixed for the lifetime of a level. Obstacles are
//! scattered with the seeded RNG so a run is reproducible from its seed.

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::body::{Body, Circle, Rectangle, Side};
use super::geometry::Aabb;
use crate::Settings;

/// Placement attempts per obstacle before giving up on it
const PLACEMENT_ATTEMPTS: u32 = 32;

/// Obstacle size ranges
const OBSTACLE_MIN_SIDE: f32 = 20.0;
const OBSTACLE_MAX_WIDTH: f32 = 60.0;
const OBSTACLE_MAX_HEIGHT: f32 = 80.0;
const CIRCLE_MIN_RADIUS: f32 = 10.0;
const CIRCLE_MAX_RADIUS: f32 = 25.0;

/// Upper bound on extra obstacles added by later levels
const MAX_EXTRA_OBSTACLES: u32 = 4;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Level {
    pub index: u32,
    pub bodies: Vec<Body>,
}

impl Level {
    /// Bare court: top and bottom walls plus a gate at each end
    pub fn court(settings: &Settings) -> Self {
        let w = settings.court_width;
        let h = settings.court_height;
        let t = settings.wall_thickness;
        let gate = settings.gate_width;

        let bodies = vec![
            Body::Wall(Rectangle::new(0.0, 0.0, w, t)),
            Body::Wall(Rectangle::new(0.0, h - t, w, t)),
            Body::Gate(Side::Left, Rectangle::new(0.0, t, gate, h - 2.0 * t)),
            Body::Gate(Side::Right, Rectangle::new(w - gate, t, gate, h - 2.0 * t)),
        ];

        Self { index: 0, bodies }
    }

    /// Court plus seeded obstacles; later levels get a few more
    pub fn generate<R: Rng>(settings: &Settings, index: u32, rng: &mut R) -> Self {
        let mut level = Self::court(settings);
        level.index = index;

        let extra = index.min(MAX_EXTRA_OBSTACLES);
        let region = obstacle_region(settings);
        // Keep room for the ball to pass between any two obstacles
        let clearance = settings.ball_radius * 2.0;
        let mut placed: Vec<Aabb> = Vec::new();

        let Some((min_x, max_x, min_y, max_y)) = region else {
            log::warn!("Level {index}: court too small for obstacles");
            return level;
        };

        for _ in 0..settings.obstacle_count + extra {
            let found = (0..PLACEMENT_ATTEMPTS).find_map(|_| {
                let width = rng.random_range(OBSTACLE_MIN_SIDE..=OBSTACLE_MAX_WIDTH);
                let height = rng.random_range(OBSTACLE_MIN_SIDE..=OBSTACLE_MAX_HEIGHT);
                if max_x - width <= min_x || max_y - height <= min_y {
                    return None;
                }
                let x = rng.random_range(min_x..max_x - width);
                let y = rng.random_range(min_y..max_y - height);
                let rect = Rectangle::new(x, y, width, height);
                is_clear(rect.aabb(), &placed, clearance).then_some(rect)
            });
            if let Some(rect) = found {
                placed.push(*rect.aabb());
                level.bodies.push(Body::Obstacle(rect));
            }
        }

        for _ in 0..settings.circle_obstacle_count {
            let found = (0..PLACEMENT_ATTEMPTS).find_map(|_| {
                let r = rng.random_range(CIRCLE_MIN_RADIUS..=CIRCLE_MAX_RADIUS);
                if max_x - r <= min_x + r || max_y - r <= min_y + r {
                    return None;
                }
                let x = rng.random_range(min_x + r..max_x - r);
                let y = rng.random_range(min_y + r..max_y - r);
                let circle = Circle::new(x, y, r);
                is_clear(circle.aabb(), &placed, clearance).then_some(circle)
            });
            if let Some(circle) = found {
                placed.push(*circle.aabb());
                level.bodies.push(Body::CircleObstacle(circle));
            }
        }

        log::info!(
            "Level {}: {} bodies ({} obstacles)",
            index,
            level.bodies.len(),
            placed.len()
        );
        level
    }
}

/// Area obstacles may occupy: clear of both paddle lanes and the walls
fn obstacle_region(settings: &Settings) -> Option<(f32, f32, f32, f32)> {
    let lane = settings.paddle_margin + settings.paddle_width + settings.ball_radius * 4.0;
    let min_x = lane;
    let max_x = settings.court_width - lane;
    let min_y = settings.wall_thickness + settings.ball_radius * 2.0;
    let max_y = settings.court_height - settings.wall_thickness - settings.ball_radius * 2.0;
    (max_x > min_x && max_y > min_y).then_some((min_x, max_x, min_y, max_y))
}

fn is_clear(candidate: &Aabb, placed: &[Aabb], clearance: f32) -> bool {
    let grown = Aabb::new(
        candidate.min - glam::Vec2::splat(clearance),
        candidate.max + glam::Vec2::splat(clearance),
    );
    placed.iter().all(|other| !grown.overlaps(other))
}
