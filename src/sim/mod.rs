//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One fixed velocity step per tick
//! - Seeded RNG only
//! - Stable iteration order (level order, then paddles)
//! - No rendering or platform dependencies

pub mod ball;
pub mod body;
pub mod collision;
pub mod geometry;
pub mod level;
pub mod paddle;
pub mod state;
pub mod tick;
pub mod velocity;

pub use ball::{Ball, Impact, Motion, ReboundTuning};
pub use body::{Body, Circle, Edge, EdgeSide, Material, Rectangle, Side};
pub use collision::{Collider, SideHits, broad_phase, struck_sides};
pub use geometry::{Aabb, Point, Vector2};
pub use level::Level;
pub use paddle::{Paddle, PaddleCommand, PaddleRole, PlayArea, TrackingState};
pub use state::{Frame, GameEvent, RallyPhase, Simulation};
pub use tick::{TickInput, tick};
pub use velocity::{Axis, VelocityVector, XDir};
