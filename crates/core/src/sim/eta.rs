//! Arrival estimates consistent with the position model.

use crate::models::{Bus, Direction, Route};

use super::{params::SimParams, tick::SEGMENT_LENGTH};

/// Minutes until `bus` reaches the stop at `target` on its route.
///
/// `None` means the bus has already passed the stop in its current
/// direction, including a bus that stands at `target` but has pulled more
/// than `due_threshold` into the next segment. The estimate covers the
/// remaining share of the route between the bus and the target at
/// `minutes_per_stop` per segment, plus any active delay.
pub fn eta_minutes(bus: &Bus, target: usize, params: &SimParams) -> Option<u32> {
    let current = bus.current_stop_index;
    let stops_to_go = match bus.direction {
        Direction::Forward => target.checked_sub(current)?,
        Direction::Backward => current.checked_sub(target)?,
    };
    if stops_to_go == 0 && bus.progress > params.due_threshold {
        return None;
    }

    let travelled = f64::from(bus.progress) / f64::from(SEGMENT_LENGTH);
    let remaining = stops_to_go as f64 - travelled;
    let minutes = (remaining * f64::from(params.minutes_per_stop)).round().max(0.0) as u32;
    Some(minutes + bus.delay_minutes())
}

/// Index of the terminus `bus` is heading for.
pub fn terminus_index(bus: &Bus, route: &Route) -> usize {
    match bus.direction {
        Direction::Forward => route.last_index(),
        Direction::Backward => 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fixtures;

    #[test]
    fn counts_whole_segments_from_a_stop() {
        let params = SimParams::default();
        let bus = fixtures::bus(1, 0, Direction::Forward);
        assert_eq!(eta_minutes(&bus, 3, &params), Some(10));
        assert_eq!(eta_minutes(&bus, 2, &params), Some(5));
        assert_eq!(eta_minutes(&bus, 0, &params), None);
    }

    #[test]
    fn adds_active_delay() {
        let params = SimParams::default();
        let bus = fixtures::delayed(fixtures::bus(1, 0, Direction::Forward), 4);
        assert_eq!(eta_minutes(&bus, 3, &params), Some(14));
        assert_eq!(eta_minutes(&bus, 0, &params), None);
    }

    #[test]
    fn bus_at_stop_is_due_until_threshold() {
        let params = SimParams::default();
        for progress in 0..=10 {
            let bus = fixtures::bus(2, progress, Direction::Forward);
            assert_eq!(eta_minutes(&bus, 2, &params), Some(0));
        }
        let bus = fixtures::delayed(fixtures::bus(2, 5, Direction::Backward), 3);
        assert_eq!(eta_minutes(&bus, 2, &params), Some(3));

        let leaving = fixtures::bus(2, 11, Direction::Forward);
        assert_eq!(eta_minutes(&leaving, 2, &params), None);
    }

    #[test]
    fn partial_progress_shortens_estimate() {
        let params = SimParams::default();
        let bus = fixtures::bus(1, 50, Direction::Forward);
        assert_eq!(eta_minutes(&bus, 2, &params), Some(3));
        assert_eq!(eta_minutes(&bus, 3, &params), Some(8));
    }

    #[test]
    fn backward_direction_mirrors_indices() {
        let params = SimParams::default();
        let bus = fixtures::bus(3, 0, Direction::Backward);
        assert_eq!(eta_minutes(&bus, 0, &params), Some(15));
        assert_eq!(eta_minutes(&bus, 1, &params), Some(10));
        let moving = fixtures::bus(2, 20, Direction::Backward);
        assert_eq!(eta_minutes(&moving, 3, &params), None);
    }

    #[test]
    fn terminus_follows_direction() {
        let params = SimParams::default();
        let route = fixtures::line_route();
        let bus = fixtures::bus(1, 0, Direction::Forward);
        assert_eq!(terminus_index(&bus, &route), 3);
        assert_eq!(eta_minutes(&bus, terminus_index(&bus, &route), &params), Some(10));

        // pulled away from the last stop it turned at
        let parked = fixtures::bus(0, 30, Direction::Backward);
        assert_eq!(terminus_index(&parked, &route), 0);
        assert_eq!(eta_minutes(&parked, terminus_index(&parked, &route), &params), None);
    }
}
