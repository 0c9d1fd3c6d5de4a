//! Read-only projections combining routes, buses and arrival estimates.

use serde::Serialize;

use crate::models::{Bus, Direction, Route, Stop};

use super::{
    eta::{eta_minutes, terminus_index},
    params::SimParams,
};

/// Arrival state of one stop relative to a bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "minutes", rename_all = "snake_case")]
pub enum StopStatus {
    Passed,
    /// The bus is at the stop or will be within the minute.
    Due,
    Arriving(u32),
}

impl StopStatus {
    fn from_eta(eta: Option<u32>) -> Self {
        match eta {
            None => StopStatus::Passed,
            Some(0) => StopStatus::Due,
            Some(minutes) => StopStatus::Arriving(minutes),
        }
    }
}

/// One line of a route board.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BoardEntry {
    /// Position of the stop within the route's forward order.
    pub index: usize,
    pub stop: Stop,
    pub status: StopStatus,
    /// The bus is standing at this stop or is on the segment leading to it.
    pub bus_here: bool,
}

/// Stops of `route` in the order `bus` will visit them, with arrival status.
///
/// Without a bus the board lists stops in forward order with every stop
/// marked as passed.
pub fn route_board(route: &Route, bus: Option<&Bus>, params: &SimParams) -> Vec<BoardEntry> {
    let approaching = bus.map(|bus| approaching_index(bus, route, params));
    let mut entries: Vec<BoardEntry> = route
        .stops
        .iter()
        .enumerate()
        .map(|(index, stop)| BoardEntry {
            index,
            stop: stop.clone(),
            status: StopStatus::from_eta(bus.and_then(|bus| eta_minutes(bus, index, params))),
            bus_here: approaching == Some(index),
        })
        .collect();
    if bus.map(|bus| bus.direction) == Some(Direction::Backward) {
        entries.reverse();
    }
    entries
}

/// The terminus `bus` is heading for, or the route's last stop without a bus.
pub fn terminus<'a>(route: &'a Route, bus: Option<&Bus>) -> Option<&'a Stop> {
    match bus {
        Some(bus) => route.stops.get(terminus_index(bus, route)),
        None => route.stops.last(),
    }
}

/// Index of the stop `bus` is standing at, or otherwise the one it is driving toward.
fn approaching_index(bus: &Bus, route: &Route, params: &SimParams) -> usize {
    if bus.progress <= params.due_threshold {
        return bus.current_stop_index;
    }
    bus.current_stop_index
        .checked_add_signed(bus.direction.step())
        .filter(|&index| index < route.stops.len())
        .unwrap_or(bus.current_stop_index)
}

/// Next stop of one bus, for the arrivals list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Arrival {
    pub bus_id: String,
    pub route_id: String,
    pub route_name: String,
    pub stop: Stop,
    pub eta: u32,
    pub delayed: bool,
}

/// For each bus, the stop it is at or heading to, soonest first.
///
/// Buses whose route is missing from `routes` are skipped.
pub fn next_arrivals(routes: &[Route], buses: &[Bus], params: &SimParams) -> Vec<Arrival> {
    let mut arrivals: Vec<Arrival> = buses
        .iter()
        .filter_map(|bus| {
            let route = routes.iter().find(|route| route.id == bus.route_id)?;
            let index = approaching_index(bus, route, params);
            let stop = route.stops.get(index)?;
            let eta = eta_minutes(bus, index, params)?;
            Some(Arrival {
                bus_id: bus.id.clone(),
                route_id: route.id.clone(),
                route_name: route.name.clone(),
                stop: stop.clone(),
                eta,
                delayed: bus.is_delayed(),
            })
        })
        .collect();
    arrivals.sort_by_key(|arrival| arrival.eta);
    arrivals
}

/// Routes whose name or any stop name contains `query`, ignoring case.
///
/// Favourites come first; otherwise catalog order is kept. An empty query
/// matches every route.
pub fn search_routes<'a>(
    routes: &'a [Route],
    query: &str,
    is_favourite: impl Fn(&str) -> bool,
) -> Vec<&'a Route> {
    let needle = query.trim().to_lowercase();
    let mut matches: Vec<&Route> = routes
        .iter()
        .filter(|route| {
            needle.is_empty()
                || route.name.to_lowercase().contains(&needle)
                || route
                    .stops
                    .iter()
                    .any(|stop| stop.name.to_lowercase().contains(&needle))
        })
        .collect();
    matches.sort_by_key(|route| !is_favourite(&route.id));
    matches
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::fixtures;

    #[test]
    fn board_marks_passed_due_and_arriving() {
        let route = fixtures::line_route();
        let params = SimParams::default();
        let bus = fixtures::bus(1, 0, Direction::Forward);
        let board = route_board(&route, Some(&bus), &params);

        let statuses: Vec<StopStatus> = board.iter().map(|entry| entry.status).collect();
        assert_eq!(
            statuses,
            vec![
                StopStatus::Passed,
                StopStatus::Due,
                StopStatus::Arriving(5),
                StopStatus::Arriving(10)
            ]
        );
        assert!(board[1].bus_here);
        assert_eq!(board.iter().filter(|entry| entry.bus_here).count(), 1);
    }

    #[test]
    fn board_follows_backward_travel() {
        let route = fixtures::line_route();
        let params = SimParams::default();
        let bus = fixtures::bus(2, 60, Direction::Backward);
        let board = route_board(&route, Some(&bus), &params);

        let order: Vec<usize> = board.iter().map(|entry| entry.index).collect();
        assert_eq!(order, vec![3, 2, 1, 0]);
        assert_eq!(board[0].status, StopStatus::Passed);
        assert_eq!(board[1].status, StopStatus::Passed);
        assert_eq!(board[2].status, StopStatus::Arriving(2));
        assert!(board[2].bus_here);
        assert_eq!(terminus(&route, Some(&bus)).map(|stop| stop.id.as_str()), Some("s0"));
    }

    #[test]
    fn board_without_bus_lists_forward_order() {
        let route = fixtures::line_route();
        let board = route_board(&route, None, &SimParams::default());
        assert_eq!(board.first().map(|entry| entry.index), Some(0));
        assert!(board.iter().all(|entry| !entry.bus_here));
        assert_eq!(terminus(&route, None).map(|stop| stop.id.as_str()), Some("s3"));
    }

    #[test]
    fn arrivals_sorted_by_eta() {
        let routes = vec![fixtures::line_route()];
        let params = SimParams::default();
        let mut slow = fixtures::delayed(fixtures::bus(0, 50, Direction::Forward), 6);
        slow.id = "slow".to_string();
        let mut docked = fixtures::bus(2, 0, Direction::Backward);
        docked.id = "docked".to_string();
        let mut lost = fixtures::bus(0, 0, Direction::Forward);
        lost.id = "lost".to_string();
        lost.route_id = "route-missing".to_string();

        let arrivals = next_arrivals(&routes, &[slow, docked, lost], &params);
        assert_eq!(arrivals.len(), 2);
        assert_eq!(arrivals[0].bus_id, "docked");
        assert_eq!(arrivals[0].stop.id, "s2");
        assert_eq!(arrivals[0].eta, 0);
        assert_eq!(arrivals[1].bus_id, "slow");
        assert_eq!(arrivals[1].stop.id, "s1");
        assert_eq!(arrivals[1].eta, 9);
        assert!(arrivals[1].delayed);
    }

    #[test]
    fn search_matches_route_and_stop_names_with_favourites_first() {
        let mut first = fixtures::line_route();
        first.name = "Alpha Line".to_string();
        let mut second = fixtures::line_route();
        second.id = "route-t-2".to_string();
        second.name = "Beta Line".to_string();
        let routes = vec![first, second];

        let all = search_routes(&routes, "  ", |id| id == "route-t-2");
        assert_eq!(all[0].id, "route-t-2");
        assert_eq!(all[1].id, "route-t-1");

        let by_name = search_routes(&routes, "alpha", |_| false);
        assert_eq!(by_name.len(), 1);

        let by_stop = search_routes(&routes, "s2", |_| false);
        assert_eq!(by_stop.len(), 2);
        assert!(search_routes(&routes, "gamma", |_| false).is_empty());
    }
}
