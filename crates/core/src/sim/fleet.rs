//! Fleet state: creation, whole-fleet ticks and the shared snapshot store.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::models::{Bus, Direction, Route};

use super::{
    params::SimParams,
    tick::{advance, SEGMENT_LENGTH},
};

/// Immutable view of every bus after a given tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FleetSnapshot {
    /// Number of ticks applied since the fleet was spawned.
    pub tick: u64,
    pub updated_at: DateTime<Utc>,
    pub buses: Vec<Bus>,
}

impl FleetSnapshot {
    pub fn new(buses: Vec<Bus>) -> Self {
        Self {
            tick: 0,
            updated_at: Utc::now(),
            buses,
        }
    }

    pub fn bus(&self, id: &str) -> Option<&Bus> {
        self.buses.iter().find(|bus| bus.id == id)
    }

    /// Buses running on the given route, in fleet order.
    pub fn buses_on<'a>(&'a self, route_id: &'a str) -> impl Iterator<Item = &'a Bus> + 'a {
        self.buses.iter().filter(move |bus| bus.route_id == route_id)
    }
}

/// Create one bus per route at a random point of its run.
pub fn spawn_fleet<R: Rng + ?Sized>(routes: &[Route], rng: &mut R) -> Vec<Bus> {
    let buses: Vec<Bus> = routes
        .iter()
        .enumerate()
        .map(|(index, route)| Bus {
            id: bus_id(&route.id, index),
            route_id: route.id.clone(),
            current_stop_index: rng.gen_range(0..route.last_index().max(1)),
            progress: rng.gen_range(0..SEGMENT_LENGTH),
            direction: if rng.gen_bool(0.5) {
                Direction::Forward
            } else {
                Direction::Backward
            },
            delay: None,
        })
        .collect();
    info!(buses = buses.len(), "Fleet spawned");
    buses
}

fn bus_id(route_id: &str, index: usize) -> String {
    let segment = route_id.split('-').nth(1).unwrap_or(route_id);
    format!("bus-{segment}-{}", index + 1)
}

/// Advance every bus by one tick and return the resulting snapshot.
///
/// A bus whose route is not in `routes` is carried over unchanged.
pub fn advance_all<R: Rng + ?Sized>(
    snapshot: &FleetSnapshot,
    routes: &[Route],
    params: &SimParams,
    rng: &mut R,
) -> FleetSnapshot {
    let by_id: HashMap<&str, &Route> = routes.iter().map(|route| (route.id.as_str(), route)).collect();
    let buses = snapshot
        .buses
        .iter()
        .map(|bus| match by_id.get(bus.route_id.as_str()) {
            Some(route) => advance(bus, route, params, rng),
            None => {
                warn!(bus = %bus.id, route = %bus.route_id, "Bus references unknown route; leaving unchanged");
                bus.clone()
            }
        })
        .collect::<Vec<_>>();

    let delayed = buses.iter().filter(|bus| bus.is_delayed()).count();
    debug!(tick = snapshot.tick + 1, delayed, "Fleet advanced");

    FleetSnapshot {
        tick: snapshot.tick + 1,
        updated_at: Utc::now(),
        buses,
    }
}

/// Shared handle to the current fleet snapshot.
///
/// Readers receive an `Arc` to a complete snapshot; a tick replaces the whole
/// snapshot at once, so no reader observes a half-advanced fleet.
#[derive(Debug, Clone)]
pub struct Fleet {
    inner: Arc<RwLock<Arc<FleetSnapshot>>>,
}

impl Fleet {
    pub fn new(buses: Vec<Bus>) -> Self {
        Self {
            inner: Arc::new(RwLock::new(Arc::new(FleetSnapshot::new(buses)))),
        }
    }

    /// Current snapshot.
    pub fn snapshot(&self) -> Arc<FleetSnapshot> {
        self.inner.read().clone()
    }

    /// Replace the current snapshot.
    pub fn replace(&self, snapshot: FleetSnapshot) -> Arc<FleetSnapshot> {
        let snapshot = Arc::new(snapshot);
        *self.inner.write() = snapshot.clone();
        snapshot
    }

    /// Apply one tick to the fleet and publish the result.
    pub fn advance<R: Rng + ?Sized>(
        &self,
        routes: &[Route],
        params: &SimParams,
        rng: &mut R,
    ) -> Arc<FleetSnapshot> {
        let current = self.snapshot();
        self.replace(advance_all(&current, routes, params, rng))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::Catalog,
        models::Locale,
        sim::{fixtures, rng::SimRng},
    };

    #[test]
    fn spawns_one_bus_per_route_inside_bounds() {
        let routes = Catalog::builtin().routes(Locale::En);
        let buses = spawn_fleet(&routes, &mut SimRng::from_seed_u64(3));
        assert_eq!(buses.len(), routes.len());
        for (bus, route) in buses.iter().zip(&routes) {
            assert_eq!(bus.route_id, route.id);
            assert!(bus.current_stop_index < route.last_index());
            assert!(bus.progress < SEGMENT_LENGTH);
            assert!(bus.delay.is_none());
        }
        assert_eq!(buses[0].id, "bus-sr-1");
        assert_eq!(buses[12].id, "bus-jal-13");
    }

    #[test]
    fn spawning_is_reproducible() {
        let routes = Catalog::builtin().routes(Locale::En);
        let a = spawn_fleet(&routes, &mut SimRng::from_seed_u64(11));
        let b = spawn_fleet(&routes, &mut SimRng::from_seed_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn unknown_route_leaves_bus_untouched() {
        let routes = vec![fixtures::line_route()];
        let mut orphan = fixtures::bus(1, 30, Direction::Forward);
        orphan.id = "orphan".to_string();
        orphan.route_id = "route-missing".to_string();
        let healthy = fixtures::bus(1, 30, Direction::Forward);
        let snapshot = FleetSnapshot::new(vec![orphan.clone(), healthy]);

        let next = advance_all(&snapshot, &routes, &fixtures::calm_params(), &mut SimRng::default());
        assert_eq!(next.tick, 1);
        assert_eq!(next.buses[0], orphan);
        assert_eq!(next.buses[1].progress, 32);
    }

    #[test]
    fn store_swaps_whole_snapshots() {
        let routes = vec![fixtures::line_route()];
        let fleet = Fleet::new(vec![fixtures::bus(0, 0, Direction::Forward)]);
        let before = fleet.snapshot();
        let after = fleet.advance(&routes, &fixtures::calm_params(), &mut SimRng::default());

        assert_eq!(before.tick, 0);
        assert_eq!(before.buses[0].progress, 0);
        assert_eq!(after.tick, 1);
        assert_eq!(fleet.snapshot().buses[0].progress, 2);
        assert!(fleet.snapshot().bus("bus-t-1").is_some());
        assert_eq!(fleet.snapshot().buses_on("route-t-1").count(), 1);
    }

    #[test]
    fn fleet_invariants_hold_over_long_runs() {
        let routes = Catalog::builtin().routes(Locale::En);
        let mut rng = SimRng::from_seed_u64(2024);
        let fleet = Fleet::new(spawn_fleet(&routes, &mut rng));
        let params = SimParams {
            delay_onset_probability: 0.05,
            ..SimParams::default()
        };
        for _ in 0..2_000 {
            let snapshot = fleet.advance(&routes, &params, &mut rng);
            for bus in &snapshot.buses {
                let route = routes.iter().find(|route| route.id == bus.route_id).unwrap();
                assert!(bus.current_stop_index <= route.last_index());
                assert!(bus.progress < SEGMENT_LENGTH);
            }
        }
    }
}
