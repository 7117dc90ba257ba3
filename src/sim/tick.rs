//! Fixed-step simulation tick
//!
//! Order within a tick: broad phase, per-body resolution, ball integration,
//! AI paddle, player paddle.

use serde::{Deserialize, Serialize};

use super::ball::Impact;
use super::collision::broad_phase;
use super::paddle::PaddleCommand;
use super::state::{GameEvent, RallyPhase, Simulation};

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TickInput {
    /// What the player paddle should do this tick
    pub command: PaddleCommand,
}

impl TickInput {
    pub fn new(command: PaddleCommand) -> Self {
        Self { command }
    }
}

/// Advance the simulation by one fixed step
pub fn tick(sim: &mut Simulation, input: &TickInput) {
    sim.events.clear();
    sim.time_ticks += 1;

    if sim.phase == RallyPhase::InPlay {
        step_ball(sim);
    }

    let [ai, player] = &mut sim.paddles;
    ai.track_ball(&sim.ball, &sim.area);
    player.apply_command(input.command, &sim.area);
}

fn step_ball(sim: &mut Simulation) {
    let hits = broad_phase(sim.ball.aabb(), &sim.level.bodies, &sim.paddles);

    for collider in hits {
        let Some(impact) = sim.ball.resolve_collision(collider, &sim.tuning, &mut sim.rng) else {
            continue;
        };
        match impact {
            Impact::Wall => sim.events.push(GameEvent::WallHit),
            Impact::Obstacle => sim.events.push(GameEvent::ObstacleHit),
            Impact::Paddle(role) => sim.events.push(GameEvent::PaddleHit { role }),
            Impact::Gate(against) => {
                sim.events.push(GameEvent::Scored { against });
                sim.events.push(GameEvent::ServeToward(against.opposite()));
                sim.phase = RallyPhase::Scored { against };
                log::info!(
                    "Point against {} at tick {}",
                    against.as_str(),
                    sim.time_ticks
                );
                // Ball stays where it crossed until the next serve
                return;
            }
        }
    }

    sim.ball.integrate();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Settings;
    use crate::sim::body::{Body, Side};
    use crate::sim::geometry::Point;
    use crate::sim::level::Level;
    use crate::sim::paddle::PaddleRole;
    use crate::sim::velocity::VelocityVector;
    use proptest::prelude::*;

    /// Court with walls and gates only
    fn open_court(seed: u64) -> Simulation {
        let settings = Settings::default();
        let level = Level::court(&settings);
        Simulation::with_level(settings, level, seed)
    }

    fn bot(sim: &Simulation) -> TickInput {
        TickInput::new(PaddleCommand::MoveToward(sim.ball().center().y))
    }

    #[test]
    fn test_ball_integrates_once_per_tick() {
        let mut sim = open_court(1);
        let start = sim.ball().center();
        let v = *sim.ball().velocity();
        tick(&mut sim, &TickInput::default());
        let motion = sim.ball().motion();
        assert_eq!(motion.previous, start);
        assert_eq!(motion.current.x, start.x + v.dx());
        assert_eq!(motion.current.y, start.y + v.dy());
        assert_eq!(sim.time_ticks(), 1);
    }

    #[test]
    fn test_events_cleared_each_tick() {
        let mut sim = open_court(1);
        assert!(!sim.events().is_empty());
        tick(&mut sim, &TickInput::default());
        assert!(sim.events().is_empty());
    }

    #[test]
    fn test_gate_scores_without_mirroring() {
        let mut sim = open_court(2);
        // Overlaps the left gate, clear of the AI paddle (y 220..320)
        let v = VelocityVector::from_components(-4.0, 1.0);
        sim.ball.serve(Point::new(15.0, 100.0), v);

        tick(&mut sim, &TickInput::default());

        assert!(sim.events().contains(&GameEvent::Scored { against: Side::Left }));
        assert!(sim.events().contains(&GameEvent::ServeToward(Side::Right)));
        assert_eq!(sim.phase(), RallyPhase::Scored { against: Side::Left });
        assert_eq!(sim.ball().velocity(), &v);
        assert_eq!(sim.ball().center(), Point::new(15.0, 100.0));

        // Frozen until served again
        tick(&mut sim, &TickInput::default());
        assert!(sim.events().is_empty());
        assert_eq!(sim.ball().center(), Point::new(15.0, 100.0));

        sim.serve(Side::Left);
        assert_eq!(sim.phase(), RallyPhase::InPlay);
        assert!(sim.ball().velocity().dx() > 0.0);
    }

    #[test]
    fn test_wall_hit_event_and_bounce() {
        let mut sim = open_court(3);
        // Touching the top wall (y 0..10) from below, moving up
        sim.ball.serve(Point::new(480.0, 24.0), VelocityVector::from_components(3.0, -3.0));
        tick(&mut sim, &TickInput::default());
        assert_eq!(sim.events(), &[GameEvent::WallHit]);
        assert_eq!(sim.ball().velocity().dy(), 3.0);
        assert_eq!(sim.ball().velocity().speed(), VelocityVector::from_components(3.0, -3.0).speed());
    }

    #[test]
    fn test_player_paddle_return_speeds_ball_up() {
        let mut sim = open_court(4);
        let face = sim.player_paddle().face_x();
        let y = sim.player_paddle().center_y();
        let v = VelocityVector::from_components(5.0, 1.0);
        sim.ball.serve(Point::new(face - 20.0, y), v);
        sim.ball.integrate();
        let speed = sim.ball().velocity().speed();

        tick(&mut sim, &TickInput::default());
        assert!(
            sim.events()
                .contains(&GameEvent::PaddleHit { role: PaddleRole::Player })
        );
        assert!(sim.ball().velocity().dx() < 0.0);
        assert_eq!(sim.ball().velocity().speed(), speed + Settings::default().speed_increment);
    }

    #[test]
    fn test_ai_returns_to_center_when_ball_recedes() {
        let mut sim = open_court(5);
        // Ball heads right after the serve; push the AI off-center first
        for _ in 0..40 {
            sim.paddles[0].apply_command(PaddleCommand::MoveUp, &sim.area);
        }
        assert!(sim.ai_paddle().y() < sim.ai_paddle().rest_y());
        for _ in 0..200 {
            tick(&mut sim, &TickInput::default());
        }
        let ai = sim.ai_paddle();
        assert!((ai.y() - ai.rest_y()).abs() <= 1.0);
    }

    #[test]
    fn test_same_seed_same_run() {
        let mut a = Simulation::new(Settings::default(), 1234);
        let mut b = Simulation::new(Settings::default(), 1234);
        for _ in 0..2_000 {
            let (ia, ib) = (bot(&a), bot(&b));
            tick(&mut a, &ia);
            tick(&mut b, &ib);
            if let RallyPhase::Scored { against } = a.phase() {
                a.serve(against);
                b.serve(against);
            }
            assert_eq!(a.events(), b.events());
        }
        assert_eq!(a.ball().center(), b.ball().center());
        assert_eq!(a.ball().velocity(), b.ball().velocity());
        assert_eq!(a.ai_paddle().y(), b.ai_paddle().y());
        assert_eq!(a.player_paddle().y(), b.player_paddle().y());
    }

    fn command_strategy() -> impl Strategy<Value = PaddleCommand> {
        prop_oneof![
            Just(PaddleCommand::MoveUp),
            Just(PaddleCommand::MoveDown),
            Just(PaddleCommand::Idle),
            (0.0f32..540.0).prop_map(PaddleCommand::MoveToward),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(24))]

        #[test]
        fn prop_invariants_hold_over_a_run(
            seed in any::<u64>(),
            commands in prop::collection::vec(command_strategy(), 300..600),
        ) {
            let mut sim = Simulation::new(Settings::default(), seed);
            let mut last_speed = sim.ball().velocity().speed();

            for command in commands {
                tick(&mut sim, &TickInput::new(command));

                let speed = sim.ball().velocity().speed();
                prop_assert!(speed >= last_speed);
                last_speed = speed;

                prop_assert!(sim.ball().aabb().is_well_formed());
                prop_assert!(sim.bodies().iter().all(|b| b.aabb().is_well_formed()));
                for paddle in sim.paddles() {
                    prop_assert!(paddle.rect().aabb().is_well_formed());
                    prop_assert!(sim.area().contains_span(paddle.y(), paddle.rect().bottom()));
                }
                prop_assert!(sim.ball().velocity().dx() != 0.0);
                prop_assert!(sim.ball().velocity().dy() != 0.0);

                if let RallyPhase::Scored { against } = sim.phase() {
                    sim.serve(against);
                    last_speed = sim.ball().velocity().speed();
                }
            }
        }

        #[test]
        fn prop_gate_hits_never_change_velocity(y in 40.0f32..200.0, dy in -4.0f32..4.0) {
            let mut sim = open_court(8);
            let v = VelocityVector::from_components(-5.0, dy);
            sim.ball.serve(Point::new(15.0, y), v);
            tick(&mut sim, &TickInput::default());
            prop_assert_eq!(sim.ball().velocity(), &v);
            let scored = matches!(sim.phase(), RallyPhase::Scored { against: Side::Left });
            prop_assert!(scored);
        }
    }

    #[test]
    fn test_circle_obstacles_are_passed_through() {
        let settings = Settings::default();
        let mut level = Level::court(&settings);
        level.bodies.push(Body::CircleObstacle(crate::sim::body::Circle::new(480.0, 270.0, 20.0)));
        let mut sim = Simulation::with_level(settings, level, 6);
        let v = VelocityVector::from_components(4.0, 1.0);
        sim.ball.serve(Point::new(470.0, 270.0), v);
        tick(&mut sim, &TickInput::default());
        assert!(sim.events().is_empty());
        assert_eq!(sim.ball().velocity(), &v);
        assert_eq!(sim.ball().center(), Point::new(474.0, 271.0));
    }
}
