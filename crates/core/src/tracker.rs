#![allow(missing_docs)]

//! Query surface handed to frontends.

use std::sync::Arc;

use crate::{
    catalog::Catalog,
    config::AppConfig,
    models::{Bus, Locale, Route},
    sim::{
        eta_minutes, fare, find_trip, position_of, BusPosition, FareTable, Fleet, FleetSnapshot,
        SimParams, TripMatch,
    },
};

/// Read-only view over the catalog and the live fleet.
#[derive(Debug, Clone)]
pub struct Tracker {
    catalog: &'static Catalog,
    fleet: Fleet,
    params: SimParams,
    fares: FareTable,
}

impl Tracker {
    pub fn new(catalog: &'static Catalog, fleet: Fleet, params: SimParams, fares: FareTable) -> Self {
        Self {
            catalog,
            fleet,
            params,
            fares,
        }
    }

    /// Tracker over the built-in catalog using the configured constants.
    pub fn from_config(config: &AppConfig, fleet: Fleet) -> Self {
        Self::new(Catalog::builtin(), fleet, config.sim.clone(), config.fares)
    }

    pub fn catalog(&self) -> &'static Catalog {
        self.catalog
    }

    pub fn params(&self) -> &SimParams {
        &self.params
    }

    /// Routes with names resolved for `locale`.
    pub fn routes(&self, locale: Locale) -> Vec<Route> {
        self.catalog.routes(locale)
    }

    /// Current fleet snapshot.
    pub fn buses(&self) -> Arc<FleetSnapshot> {
        self.fleet.snapshot()
    }

    pub fn position_of(&self, bus: &Bus, route: &Route) -> Option<BusPosition> {
        position_of(bus, route)
    }

    /// Minutes until `bus` reaches stop `target` of its route. `None` when the
    /// stop is passed, the index is not on the route, or the route is unknown.
    pub fn eta_minutes(&self, bus: &Bus, target: usize) -> Option<u32> {
        let route = self.catalog.route(&bus.route_id)?;
        if target >= route.stops.len() {
            return None;
        }
        eta_minutes(bus, target, &self.params)
    }

    pub fn fare(&self, route: &Route, start_stop: &str, end_stop: &str) -> u32 {
        fare(route, start_stop, end_stop, &self.fares)
    }

    /// Search `snapshot` for a bus from `board_stop` to `dest_stop`. The
    /// matched route comes from `routes`, so its names follow the caller's locale.
    pub fn find_trip(
        &self,
        routes: &[Route],
        snapshot: &FleetSnapshot,
        board_stop: &str,
        dest_stop: &str,
    ) -> TripMatch {
        find_trip(
            routes,
            &snapshot.buses,
            board_stop,
            dest_stop,
            &self.params,
            &self.fares,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Direction;

    fn tracker_with(buses: Vec<Bus>) -> Tracker {
        Tracker::from_config(&AppConfig::default(), Fleet::new(buses))
    }

    fn bus_on(route_id: &str, index: usize, direction: Direction) -> Bus {
        Bus {
            id: format!("bus-{route_id}"),
            route_id: route_id.to_string(),
            current_stop_index: index,
            progress: 0,
            direction,
            delay: None,
        }
    }

    fn search(tracker: &Tracker, board: &str, dest: &str, locale: Locale) -> TripMatch {
        tracker.find_trip(&tracker.routes(locale), &tracker.buses(), board, dest)
    }

    #[test]
    fn finds_trip_on_builtin_network() {
        // route-chd-3: chandigarh, balongi, daun, kharar
        let tracker = tracker_with(vec![bus_on("route-chd-3", 0, Direction::Forward)]);
        let result = search(&tracker, "balongi", "kharar", Locale::En);
        let trip = result.trip().expect("trip on route-chd-3");
        assert_eq!(trip.route.name, "Chandigarh-Kharar");
        assert_eq!(trip.eta, 5);
        assert_eq!(trip.fare, 20);

        assert!(matches!(
            search(&tracker, "kharar", "balongi", Locale::En),
            TripMatch::NoBus { .. }
        ));
        assert_eq!(
            search(&tracker, "balongi", "amritsar", Locale::En),
            TripMatch::NoRoute
        );
    }

    #[test]
    fn resolves_trip_route_in_requested_locale() {
        let tracker = tracker_with(vec![bus_on("route-chd-3", 0, Direction::Forward)]);
        let result = search(&tracker, "chandigarh", "daun", Locale::Pa);
        assert_eq!(result.trip().map(|trip| trip.route.name.as_str()), Some("ਚੰਡੀਗੜ੍ਹ-ਖਰੜ"));
    }

    #[test]
    fn queries_delegate_to_engine() {
        let bus = bus_on("route-sr-5", 0, Direction::Forward);
        let tracker = tracker_with(vec![bus.clone()]);
        let routes = tracker.routes(Locale::En);
        let route = routes.iter().find(|route| route.id == "route-sr-5").unwrap();

        assert_eq!(tracker.buses().buses.len(), 1);
        assert_eq!(tracker.eta_minutes(&bus, 2), Some(10));
        assert_eq!(tracker.fare(route, "sangrur", "nabha"), 20);
        assert_eq!(tracker.fare(route, "sangrur", "amritsar"), 0);
        let pos = tracker.position_of(&bus, route).unwrap();
        assert_eq!((pos.x, pos.y), (48.0, 65.0));
    }

    #[test]
    fn eta_is_none_off_route_or_for_unknown_routes() {
        // route-sr-5 has three stops
        let bus = bus_on("route-sr-5", 0, Direction::Forward);
        let tracker = tracker_with(vec![bus.clone()]);
        assert_eq!(tracker.eta_minutes(&bus, 2), Some(10));
        assert_eq!(tracker.eta_minutes(&bus, 3), None);
        assert_eq!(tracker.eta_minutes(&bus, 99), None);

        let lost = bus_on("route-missing", 0, Direction::Forward);
        assert_eq!(tracker.eta_minutes(&lost, 1), None);
    }

    #[test]
    fn trip_search_uses_the_given_snapshot() {
        let tracker = tracker_with(Vec::new());
        let routes = tracker.routes(Locale::En);
        let held = FleetSnapshot::new(vec![bus_on("route-chd-3", 0, Direction::Forward)]);

        assert!(matches!(
            search(&tracker, "balongi", "kharar", Locale::En),
            TripMatch::NoBus { .. }
        ));
        let trip = tracker.find_trip(&routes, &held, "balongi", "kharar");
        assert_eq!(trip.trip().map(|trip| trip.eta), Some(5));
    }
}
