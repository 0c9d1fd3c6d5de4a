//! Finding the next usable bus between two stops.

use serde::Serialize;

use crate::models::{Bus, Direction, Route};

use super::{
    eta::eta_minutes,
    fare::fare,
    params::{FareTable, SimParams},
};

/// A bus that will pick the rider up at the boarding stop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Trip {
    pub route: Route,
    pub bus: Bus,
    /// Minutes until the bus reaches the boarding stop.
    pub eta: u32,
    pub fare: u32,
}

/// Outcome of a trip search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TripMatch {
    Found(Trip),
    /// No route serves both stops.
    NoRoute,
    /// A route connects the stops but no bus on it can still pick the rider up.
    NoBus {
        /// The route that was searched.
        route_id: String,
    },
}

impl TripMatch {
    pub fn trip(&self) -> Option<&Trip> {
        match self {
            TripMatch::Found(trip) => Some(trip),
            _ => None,
        }
    }
}

/// Find the soonest bus that travels from `board_stop` toward `dest_stop`.
///
/// Only the first route in `routes` serving both stops is searched. Among
/// buses on it heading the right way that have not yet passed the boarding
/// stop, the one with the smallest ETA wins; ties keep fleet order.
pub fn find_trip(
    routes: &[Route],
    buses: &[Bus],
    board_stop: &str,
    dest_stop: &str,
    params: &SimParams,
    fares: &FareTable,
) -> TripMatch {
    let Some((route, board, dest)) = routes.iter().find_map(|route| {
        Some((route, route.stop_index(board_stop)?, route.stop_index(dest_stop)?))
    }) else {
        return TripMatch::NoRoute;
    };

    let required = if board < dest {
        Direction::Forward
    } else {
        Direction::Backward
    };

    let best = buses
        .iter()
        .filter(|bus| bus.route_id == route.id && bus.direction == required)
        .filter(|bus| match required {
            Direction::Forward => bus.current_stop_index <= board,
            Direction::Backward => bus.current_stop_index >= board,
        })
        .filter_map(|bus| eta_minutes(bus, board, params).map(|eta| (bus, eta)))
        .min_by_key(|(_, eta)| *eta);

    match best {
        Some((bus, eta)) => TripMatch::Found(Trip {
            route: route.clone(),
            bus: bus.clone(),
            eta,
            fare: fare(route, board_stop, dest_stop, fares),
        }),
        None => TripMatch::NoBus {
            route_id: route.id.clone(),
        },
    }
}
