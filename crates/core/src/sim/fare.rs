//! Ticket pricing between two stops on a route.

use crate::models::Route;

use super::params::FareTable;

/// Price of a ride between two stops of `route`.
///
/// Direction does not matter. Returns 0 when either stop is not on the route.
pub fn fare(route: &Route, start_stop: &str, end_stop: &str, table: &FareTable) -> u32 {
    let (Some(start), Some(end)) = (route.stop_index(start_stop), route.stop_index(end_stop))
    else {
        return 0;
    };
    let stops_travelled = start.abs_diff(end) as u32;
    table.base_fare + stops_travelled * table.per_stop_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fixtures;

    #[test]
    fn charges_base_plus_per_stop() {
        let route = fixtures::line_route();
        let table = FareTable::default();
        assert_eq!(fare(&route, "s0", "s2", &table), 20);
        assert_eq!(fare(&route, "s0", "s3", &table), 25);
        assert_eq!(fare(&route, "s1", "s1", &table), 10);
    }

    #[test]
    fn is_symmetric() {
        let route = fixtures::line_route();
        let table = FareTable::default();
        for a in &route.stops {
            for b in &route.stops {
                assert_eq!(fare(&route, &a.id, &b.id, &table), fare(&route, &b.id, &a.id, &table));
            }
        }
    }

    #[test]
    fn unknown_stop_is_free() {
        let route = fixtures::line_route();
        let table = FareTable::default();
        assert_eq!(fare(&route, "nowhere", "s1", &table), 0);
        assert_eq!(fare(&route, "s1", "nowhere", &table), 0);
    }
}
