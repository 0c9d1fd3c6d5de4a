//! Continuous map position of a bus between two stops.

use serde::{Deserialize, Serialize};

use crate::models::{Bus, Point, Route};

use super::tick::SEGMENT_LENGTH;

/// Interpolated location of a bus and the direction it faces.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BusPosition {
    pub x: f64,
    pub y: f64,
    /// Angle in degrees of the current segment, measured from the +x axis.
    pub heading: f64,
}

impl BusPosition {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Resolve where `bus` is on `route`.
///
/// Interpolates between the current stop and the next stop in the bus's
/// direction. A bus whose next index runs off the route stands still at its
/// current stop with heading 0. Returns `None` when the current index does
/// not exist on `route`.
pub fn position_of(bus: &Bus, route: &Route) -> Option<BusPosition> {
    let start = route.stops.get(bus.current_stop_index)?.position;
    let end = bus
        .current_stop_index
        .checked_add_signed(bus.direction.step())
        .and_then(|index| route.stops.get(index))
        .map(|stop| stop.position)
        .unwrap_or(start);

    let fraction = f64::from(bus.progress) / f64::from(SEGMENT_LENGTH);
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let heading = if dx == 0.0 && dy == 0.0 {
        0.0
    } else {
        dy.atan2(dx).to_degrees()
    };

    Some(BusPosition {
        x: start.x + dx * fraction,
        y: start.y + dy * fraction,
        heading,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{models::Direction, sim::fixtures};

    #[test]
    fn zero_progress_sits_on_current_stop() {
        let route = fixtures::line_route();
        for (index, stop) in route.stops.iter().enumerate() {
            for direction in [Direction::Forward, Direction::Backward] {
                let pos = position_of(&fixtures::bus(index, 0, direction), &route).unwrap();
                assert_eq!(pos.point(), stop.position);
            }
        }
    }

    #[test]
    fn interpolates_along_segment() {
        let route = fixtures::line_route();
        let pos = position_of(&fixtures::bus(1, 50, Direction::Forward), &route).unwrap();
        assert_eq!(pos.x, 30.0);
        assert_eq!(pos.y, 25.0);
        assert!((pos.heading - 90.0).abs() < 1e-9);

        let pos = position_of(&fixtures::bus(1, 25, Direction::Backward), &route).unwrap();
        assert_eq!(pos.x, 25.0);
        assert_eq!(pos.y, 10.0);
        assert!((pos.heading - 180.0).abs() < 1e-9);
    }

    #[test]
    fn terminus_bus_is_stationary() {
        let route = fixtures::line_route();
        let pos = position_of(&fixtures::bus(3, 40, Direction::Forward), &route).unwrap();
        assert_eq!(pos.point(), route.stops[3].position);
        assert_eq!(pos.heading, 0.0);

        let pos = position_of(&fixtures::bus(0, 40, Direction::Backward), &route).unwrap();
        assert_eq!(pos.point(), route.stops[0].position);
    }

    #[test]
    fn unknown_index_has_no_position() {
        let route = fixtures::line_route();
        assert!(position_of(&fixtures::bus(9, 0, Direction::Forward), &route).is_none());
    }
}
