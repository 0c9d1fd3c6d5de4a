#![allow(missing_docs)]

//! Simulation engine: tick advance, position, arrival estimates, fares and
//! trip matching, plus the fleet store and its scheduler.

pub mod driver;
pub mod eta;
pub mod fare;
pub mod fleet;
pub mod params;
pub mod position;
pub mod rng;
pub mod tick;
pub mod trip;
pub mod views;

#[cfg(test)]
pub(crate) mod fixtures;

pub use driver::{SimEvent, Simulation};
pub use eta::{eta_minutes, terminus_index};
pub use fare::fare;
pub use fleet::{advance_all, spawn_fleet, Fleet, FleetSnapshot};
pub use params::{FareTable, SimParams};
pub use position::{position_of, BusPosition};
pub use rng::SimRng;
pub use tick::advance;
pub use trip::{find_trip, Trip, TripMatch};
pub use views::{next_arrivals, route_board, search_routes, terminus, Arrival, BoardEntry, StopStatus};
