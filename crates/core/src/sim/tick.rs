//! Per-tick state advance for a single bus.

use rand::Rng;

use crate::models::{Bus, Delay, DelayReason, Direction, Route};

use super::params::SimParams;

/// Progress value at which a bus reaches the next stop.
pub const SEGMENT_LENGTH: u32 = 100;

/// Compute the state of `bus` one tick later.
///
/// Delayed buses move at `slow_step` and may shed a delay minute; undelayed
/// buses move at `normal_step` and may pick up a new delay. Reaching the end
/// of a segment moves the bus to the next stop, and reaching either terminus
/// turns it around.
pub fn advance<R: Rng + ?Sized>(bus: &Bus, route: &Route, params: &SimParams, rng: &mut R) -> Bus {
    let mut next = bus.clone();

    match next.delay {
        Some(mut delay) => {
            next.progress += params.slow_step;
            if rng.gen_bool(params.delay_decay_probability) {
                delay.minutes_remaining = delay.minutes_remaining.saturating_sub(1);
            }
            next.delay = (delay.minutes_remaining > 0).then_some(delay);
        }
        None => {
            next.progress += params.normal_step;
            if rng.gen_bool(params.delay_onset_probability) {
                let minutes = rng.gen_range(params.delay_minutes_min..=params.delay_minutes_max);
                let reason = DelayReason::ALL[rng.gen_range(0..DelayReason::ALL.len())];
                next.delay = (minutes > 0).then_some(Delay {
                    minutes_remaining: minutes,
                    reason,
                });
            }
        }
    }

    if next.progress >= SEGMENT_LENGTH {
        next.progress = 0;
        let last = route.last_index() as isize;
        let index = next.current_stop_index as isize + next.direction.step();
        if index >= last {
            next.current_stop_index = last as usize;
            next.direction = Direction::Backward;
        } else if index <= 0 {
            next.current_stop_index = 0;
            next.direction = Direction::Forward;
        } else {
            next.current_stop_index = index as usize;
        }
    }

    next
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{fixtures, rng::SimRng};

    #[test]
    fn moves_at_normal_speed_without_delay() {
        let route = fixtures::line_route();
        let bus = fixtures::bus(1, 0, Direction::Forward);
        let next = advance(&bus, &route, &fixtures::calm_params(), &mut SimRng::default());
        assert_eq!(next.progress, 2);
        assert_eq!(next.current_stop_index, 1);
        assert!(next.delay.is_none());
    }

    #[test]
    fn delayed_bus_moves_at_half_speed() {
        let route = fixtures::line_route();
        let bus = fixtures::delayed(fixtures::bus(1, 10, Direction::Forward), 4);
        let next = advance(&bus, &route, &fixtures::calm_params(), &mut SimRng::default());
        assert_eq!(next.progress, 11);
        assert_eq!(next.delay_minutes(), 4);
    }

    #[test]
    fn delay_decays_and_is_removed_at_zero() {
        let route = fixtures::line_route();
        let params = SimParams {
            delay_decay_probability: 1.0,
            ..fixtures::calm_params()
        };
        let bus = fixtures::delayed(fixtures::bus(1, 10, Direction::Forward), 2);
        let mut rng = SimRng::default();

        let once = advance(&bus, &route, &params, &mut rng);
        assert_eq!(once.delay_minutes(), 1);
        let twice = advance(&once, &route, &params, &mut rng);
        assert!(twice.delay.is_none());
        assert_eq!(twice.progress, 12);
    }

    #[test]
    fn delay_onset_draws_bounded_minutes() {
        let route = fixtures::line_route();
        let params = SimParams {
            delay_onset_probability: 1.0,
            ..fixtures::calm_params()
        };
        let mut rng = SimRng::from_seed_u64(9);
        for _ in 0..50 {
            let bus = fixtures::bus(0, 0, Direction::Forward);
            let next = advance(&bus, &route, &params, &mut rng);
            let delay = next.delay.expect("delay should start");
            assert!((3..=7).contains(&delay.minutes_remaining));
            assert_eq!(next.progress, 2);
        }
    }

    #[test]
    fn crossing_a_segment_moves_to_next_stop() {
        let route = fixtures::line_route();
        let bus = fixtures::bus(1, 98, Direction::Forward);
        let next = advance(&bus, &route, &fixtures::calm_params(), &mut SimRng::default());
        assert_eq!(next.current_stop_index, 2);
        assert_eq!(next.progress, 0);
        assert_eq!(next.direction, Direction::Forward);
    }

    #[test]
    fn bounces_at_last_stop() {
        let route = fixtures::line_route();
        let bus = fixtures::bus(3, 99, Direction::Forward);
        let next = advance(&bus, &route, &fixtures::calm_params(), &mut SimRng::default());
        assert_eq!(next.current_stop_index, 3);
        assert_eq!(next.direction, Direction::Backward);
        assert_eq!(next.progress, 0);
    }

    #[test]
    fn reaching_a_terminus_turns_around() {
        let route = fixtures::line_route();
        let params = fixtures::calm_params();
        let mut rng = SimRng::default();

        let forward = advance(&fixtures::bus(2, 98, Direction::Forward), &route, &params, &mut rng);
        assert_eq!(forward.current_stop_index, 3);
        assert_eq!(forward.direction, Direction::Backward);

        let backward = advance(&fixtures::bus(1, 98, Direction::Backward), &route, &params, &mut rng);
        assert_eq!(backward.current_stop_index, 0);
        assert_eq!(backward.direction, Direction::Forward);

        let stranded = advance(&fixtures::bus(0, 98, Direction::Backward), &route, &params, &mut rng);
        assert_eq!(stranded.current_stop_index, 0);
        assert_eq!(stranded.direction, Direction::Forward);
    }

    #[test]
    fn stays_on_route_over_many_ticks() {
        let route = fixtures::line_route();
        let params = SimParams::default();
        let mut rng = SimRng::from_seed_u64(77);
        let mut bus = fixtures::bus(0, 0, Direction::Forward);
        for _ in 0..5_000 {
            let prev_index = bus.current_stop_index;
            bus = advance(&bus, &route, &params, &mut rng);
            assert!(bus.current_stop_index <= route.last_index());
            assert!(bus.progress < SEGMENT_LENGTH);
            if bus.current_stop_index != prev_index {
                assert_eq!(bus.progress, 0);
                if bus.current_stop_index == 0 {
                    assert_eq!(bus.direction, Direction::Forward);
                }
                if bus.current_stop_index == route.last_index() {
                    assert_eq!(bus.direction, Direction::Backward);
                }
            }
            if let Some(delay) = bus.delay {
                assert!(delay.minutes_remaining > 0);
            }
        }
    }

    #[test]
    fn same_seed_gives_same_trajectory() {
        let route = fixtures::line_route();
        let params = SimParams {
            delay_onset_probability: 0.2,
            delay_decay_probability: 0.3,
            ..SimParams::default()
        };
        let run = |seed| {
            let mut rng = SimRng::from_seed_u64(seed);
            let mut bus = fixtures::bus(0, 0, Direction::Forward);
            (0..300)
                .map(|_| {
                    bus = advance(&bus, &route, &params, &mut rng);
                    bus.clone()
                })
                .collect::<Vec<_>>()
        };
        assert_eq!(run(5), run(5));
    }
}
