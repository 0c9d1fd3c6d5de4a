//! Typed errors raised while building reference data.

use thiserror::Error;

/// Problems detected while validating catalog tables.
#[derive(Debug, Error, PartialEq)]
pub enum CatalogError {
    /// Two stops share the same identifier.
    #[error("duplicate stop id '{0}'")]
    DuplicateStop(String),
    /// Two routes share the same identifier.
    #[error("duplicate route id '{0}'")]
    DuplicateRoute(String),
    /// A stop lies outside the `[0, 100]` map plane.
    #[error("stop '{id}' has coordinates ({x}, {y}) outside the map plane")]
    OutOfBounds {
        /// Offending stop.
        id: String,
        /// Horizontal coordinate.
        x: f64,
        /// Vertical coordinate.
        y: f64,
    },
    /// A route lists fewer than two stops.
    #[error("route '{route}' has {count} stop(s); at least two are required")]
    TooFewStops {
        /// Offending route.
        route: String,
        /// Number of stops listed.
        count: usize,
    },
    /// A route visits the same stop twice.
    #[error("route '{route}' lists stop '{stop}' more than once")]
    RepeatedStop {
        /// Offending route.
        route: String,
        /// Stop listed twice.
        stop: String,
    },
    /// A route references a stop missing from the stop table.
    #[error("route '{route}' references unknown stop '{stop}'")]
    UnknownStop {
        /// Offending route.
        route: String,
        /// Missing stop id.
        stop: String,
    },
}

/// Failure to interpret a locale code.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LocaleError {
    /// The code is not one of the supported languages.
    #[error("unsupported locale '{0}' (expected 'en' or 'pa')")]
    Unknown(String),
}
