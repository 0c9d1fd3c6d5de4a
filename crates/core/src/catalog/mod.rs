#![allow(missing_docs)]

//! Static stop and route reference data.
//!
//! Entries keep every language variant of their names; [`Catalog::routes`]
//! projects them into plain [`Route`] values for one [`Locale`] on demand.

mod data;

use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::{
    error::CatalogError,
    models::{Locale, Point, Route, Stop},
};

/// Compiled-in stop row.
#[derive(Debug, Clone, Copy)]
pub struct StopRecord {
    pub id: &'static str,
    pub en: &'static str,
    pub pa: &'static str,
    pub x: f64,
    pub y: f64,
}

impl StopRecord {
    pub const fn new(id: &'static str, en: &'static str, pa: &'static str, x: f64, y: f64) -> Self {
        Self { id, en, pa, x, y }
    }
}

/// Compiled-in route row referencing stops by id.
#[derive(Debug, Clone, Copy)]
pub struct RouteRecord {
    pub id: &'static str,
    pub en: &'static str,
    pub pa: &'static str,
    pub color: &'static str,
    pub stops: &'static [&'static str],
}

/// A name carrying every available language variant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalizedName {
    pub en: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pa: Option<String>,
}

impl LocalizedName {
    pub fn new(en: &str, pa: &str) -> Self {
        let pa = pa.trim();
        Self {
            en: en.to_string(),
            pa: (!pa.is_empty()).then(|| pa.to_string()),
        }
    }

    /// Name for `locale`, falling back to English when no translation exists.
    pub fn get(&self, locale: Locale) -> &str {
        match locale {
            Locale::En => &self.en,
            Locale::Pa => self.pa.as_deref().unwrap_or(&self.en),
        }
    }
}

/// Catalog view of a stop, before locale resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogStop {
    pub id: String,
    pub name: LocalizedName,
    pub position: Point,
}

/// Catalog view of a route, before locale resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRoute {
    pub id: String,
    pub name: LocalizedName,
    pub color: String,
    /// Stop ids in forward order.
    pub stops: Vec<String>,
}

/// Immutable, validated set of stops and routes.
#[derive(Debug, Clone)]
pub struct Catalog {
    stops: Vec<CatalogStop>,
    stop_index: HashMap<String, usize>,
    routes: Vec<CatalogRoute>,
}

static BUILTIN: Lazy<Catalog> = Lazy::new(|| {
    Catalog::from_records(data::STOPS, data::ROUTES).expect("built-in catalog tables are invalid")
});

impl Catalog {
    /// Validate and index the given entries.
    pub fn new(stops: Vec<CatalogStop>, routes: Vec<CatalogRoute>) -> Result<Self, CatalogError> {
        let mut stop_index = HashMap::with_capacity(stops.len());
        for (idx, stop) in stops.iter().enumerate() {
            if !stop.position.in_bounds() {
                return Err(CatalogError::OutOfBounds {
                    id: stop.id.clone(),
                    x: stop.position.x,
                    y: stop.position.y,
                });
            }
            if stop_index.insert(stop.id.clone(), idx).is_some() {
                return Err(CatalogError::DuplicateStop(stop.id.clone()));
            }
        }

        let mut route_ids = HashSet::with_capacity(routes.len());
        for route in &routes {
            if !route_ids.insert(route.id.as_str()) {
                return Err(CatalogError::DuplicateRoute(route.id.clone()));
            }
            if route.stops.len() < 2 {
                return Err(CatalogError::TooFewStops {
                    route: route.id.clone(),
                    count: route.stops.len(),
                });
            }
            let mut seen = HashSet::with_capacity(route.stops.len());
            for stop_id in &route.stops {
                if !stop_index.contains_key(stop_id) {
                    return Err(CatalogError::UnknownStop {
                        route: route.id.clone(),
                        stop: stop_id.clone(),
                    });
                }
                if !seen.insert(stop_id.as_str()) {
                    return Err(CatalogError::RepeatedStop {
                        route: route.id.clone(),
                        stop: stop_id.clone(),
                    });
                }
            }
        }

        Ok(Self {
            stops,
            stop_index,
            routes,
        })
    }

    /// Build a catalog from compiled-in tables.
    pub fn from_records(stops: &[StopRecord], routes: &[RouteRecord]) -> Result<Self, CatalogError> {
        let stops = stops
            .iter()
            .map(|record| CatalogStop {
                id: record.id.to_string(),
                name: LocalizedName::new(record.en, record.pa),
                position: Point::new(record.x, record.y),
            })
            .collect();
        let routes = routes
            .iter()
            .map(|record| CatalogRoute {
                id: record.id.to_string(),
                name: LocalizedName::new(record.en, record.pa),
                color: record.color.to_string(),
                stops: record.stops.iter().map(|id| id.to_string()).collect(),
            })
            .collect();
        Self::new(stops, routes)
    }

    /// The Punjab network shipped with the application.
    pub fn builtin() -> &'static Catalog {
        &BUILTIN
    }

    pub fn stop(&self, id: &str) -> Option<&CatalogStop> {
        self.stop_index.get(id).map(|&idx| &self.stops[idx])
    }

    pub fn route(&self, id: &str) -> Option<&CatalogRoute> {
        self.routes.iter().find(|route| route.id == id)
    }

    /// Route entries in catalog order.
    pub fn route_entries(&self) -> &[CatalogRoute] {
        &self.routes
    }

    /// Project a stop entry into `locale`.
    pub fn resolve_stop(stop: &CatalogStop, locale: Locale) -> Stop {
        Stop {
            id: stop.id.clone(),
            name: stop.name.get(locale).to_string(),
            position: stop.position,
        }
    }

    /// Project a route entry into `locale`, resolving its stop ids.
    pub fn resolve_route(&self, route: &CatalogRoute, locale: Locale) -> Route {
        Route {
            id: route.id.clone(),
            name: route.name.get(locale).to_string(),
            color: route.color.clone(),
            stops: route
                .stops
                .iter()
                .filter_map(|id| self.stop(id))
                .map(|stop| Self::resolve_stop(stop, locale))
                .collect(),
        }
    }

    /// Every route resolved for `locale`, in catalog order.
    pub fn routes(&self, locale: Locale) -> Vec<Route> {
        self.routes
            .iter()
            .map(|route| self.resolve_route(route, locale))
            .collect()
    }

    /// Every stop resolved for `locale`, sorted by display name.
    pub fn stops(&self, locale: Locale) -> Vec<Stop> {
        let mut stops: Vec<Stop> = self
            .stops
            .iter()
            .map(|stop| Self::resolve_stop(stop, locale))
            .collect();
        stops.sort_by(|a, b| a.name.cmp(&b.name));
        stops
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop(id: &str, x: f64, y: f64) -> CatalogStop {
        CatalogStop {
            id: id.to_string(),
            name: LocalizedName::new(id, ""),
            position: Point::new(x, y),
        }
    }

    fn route(id: &str, stops: &[&str]) -> CatalogRoute {
        CatalogRoute {
            id: id.to_string(),
            name: LocalizedName::new(id, ""),
            color: "#000000".to_string(),
            stops: stops.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn builtin_catalog_is_valid() {
        let catalog = Catalog::builtin();
        assert_eq!(catalog.route_entries().len(), 13);
        assert_eq!(catalog.stops(Locale::En).len(), 44);
        assert!(catalog.route("route-chd-3").is_some());
    }

    #[test]
    fn resolves_names_per_locale() {
        let catalog = Catalog::builtin();
        let entry = catalog.route("route-sr-1").unwrap();
        let en = catalog.resolve_route(entry, Locale::En);
        let pa = catalog.resolve_route(entry, Locale::Pa);
        assert_eq!(en.name, "Sangrur-Patrana");
        assert_eq!(pa.name, "ਸੰਗਰੂਰ-ਪਾਤੜਾਂ");
        assert_eq!(en.stops[0].name, "Sangrur");
        assert_eq!(pa.stops[0].name, "ਸੰਗਰੂਰ");
        assert_eq!(en.stops[0].position, pa.stops[0].position);
    }

    #[test]
    fn missing_translation_falls_back_to_english() {
        let name = LocalizedName::new("Depot", "  ");
        assert_eq!(name.get(Locale::Pa), "Depot");
    }

    #[test]
    fn rejects_short_routes() {
        let err = Catalog::new(vec![stop("a", 1.0, 1.0)], vec![route("r", &["a"])]).unwrap_err();
        assert_eq!(
            err,
            CatalogError::TooFewStops {
                route: "r".to_string(),
                count: 1
            }
        );
    }

    #[test]
    fn rejects_repeated_and_unknown_stops() {
        let stops = vec![stop("a", 1.0, 1.0), stop("b", 2.0, 2.0)];
        let err = Catalog::new(stops.clone(), vec![route("r", &["a", "b", "a"])]).unwrap_err();
        assert!(matches!(err, CatalogError::RepeatedStop { .. }));

        let err = Catalog::new(stops, vec![route("r", &["a", "z"])]).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownStop { .. }));
    }

    #[test]
    fn rejects_out_of_bounds_and_duplicate_ids() {
        let err = Catalog::new(vec![stop("a", 101.0, 5.0)], Vec::new()).unwrap_err();
        assert!(matches!(err, CatalogError::OutOfBounds { .. }));

        let err = Catalog::new(vec![stop("a", 1.0, 1.0), stop("a", 2.0, 2.0)], Vec::new())
            .unwrap_err();
        assert_eq!(err, CatalogError::DuplicateStop("a".to_string()));

        let stops = vec![stop("a", 1.0, 1.0), stop("b", 2.0, 2.0)];
        let routes = vec![route("r", &["a", "b"]), route("r", &["b", "a"])];
        let err = Catalog::new(stops, routes).unwrap_err();
        assert_eq!(err, CatalogError::DuplicateRoute("r".to_string()));
    }
}
