#![allow(missing_docs)]

//! Shared domain models.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::error::LocaleError;

/// Language variant used when resolving stop, route and delay names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    /// English.
    #[default]
    En,
    /// Punjabi (Gurmukhi script).
    Pa,
}

impl Locale {
    /// All supported locales in display order.
    pub const ALL: [Locale; 2] = [Locale::En, Locale::Pa];

    /// Two-letter language code.
    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Pa => "pa",
        }
    }

    /// The other supported locale, used by the frontend's language toggle.
    pub fn toggled(self) -> Self {
        match self {
            Locale::En => Locale::Pa,
            Locale::Pa => Locale::En,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = LocaleError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "pa" => Ok(Locale::Pa),
            other => Err(LocaleError::Unknown(other.to_string())),
        }
    }
}

/// Point on the map plane, both axes expressed as a percentage in `[0, 100]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Whether both coordinates fall inside the map plane.
    pub fn in_bounds(&self) -> bool {
        (0.0..=100.0).contains(&self.x) && (0.0..=100.0).contains(&self.y)
    }
}

/// A named stop with fixed coordinates, resolved for one locale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    /// Stable identifier shared across routes.
    pub id: String,
    /// Localized display name.
    pub name: String,
    pub position: Point,
}

/// An ordered path of stops. Stop order defines the forward direction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub id: String,
    /// Localized display name.
    pub name: String,
    /// Display color as `#rrggbb`.
    pub color: String,
    pub stops: Vec<Stop>,
}

impl Route {
    /// Index of the stop with the given id, if it lies on this route.
    pub fn stop_index(&self, stop_id: &str) -> Option<usize> {
        self.stops.iter().position(|stop| stop.id == stop_id)
    }

    /// Whether the route serves the given stop.
    pub fn serves(&self, stop_id: &str) -> bool {
        self.stop_index(stop_id).is_some()
    }

    /// Index of the final stop.
    pub fn last_index(&self) -> usize {
        self.stops.len().saturating_sub(1)
    }
}

/// Travel direction along a route's stop sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    /// Toward the last stop.
    Forward,
    /// Toward the first stop.
    Backward,
}

impl Direction {
    /// Signed index step: `+1` forward, `-1` backward.
    pub fn step(self) -> isize {
        match self {
            Direction::Forward => 1,
            Direction::Backward => -1,
        }
    }

    pub fn reversed(self) -> Self {
        match self {
            Direction::Forward => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }
}

/// Cause attached to a delay. Localized on display, not when the delay starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DelayReason {
    HeavyTraffic,
    Roadblock,
    MechanicalIssue,
}

impl DelayReason {
    /// Every reason a delay can be drawn from.
    pub const ALL: [DelayReason; 3] = [
        DelayReason::HeavyTraffic,
        DelayReason::Roadblock,
        DelayReason::MechanicalIssue,
    ];

    /// Localized label for this reason.
    pub fn label(self, locale: Locale) -> &'static str {
        match (self, locale) {
            (DelayReason::HeavyTraffic, Locale::En) => "Heavy Traffic",
            (DelayReason::HeavyTraffic, Locale::Pa) => "ਭਾਰੀ ਆਵਾਜਾਈ",
            (DelayReason::Roadblock, Locale::En) => "Roadblock",
            (DelayReason::Roadblock, Locale::Pa) => "ਸੜਕ ਰੋਕ",
            (DelayReason::MechanicalIssue, Locale::En) => "Mechanical Issue",
            (DelayReason::MechanicalIssue, Locale::Pa) => "ਮਕੈਨੀਕਲ ਸਮੱਸਿਆ",
        }
    }
}

/// Active delay on a bus. Only present while `minutes_remaining > 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delay {
    pub minutes_remaining: u32,
    pub reason: DelayReason,
}

/// Simulated vehicle state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bus {
    pub id: String,
    pub route_id: String,
    /// Index of the stop the bus last reached on its route.
    pub current_stop_index: usize,
    /// Share of the current segment already travelled, in `[0, 100)`.
    pub progress: u32,
    pub direction: Direction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delay: Option<Delay>,
}

impl Bus {
    /// Minutes of delay currently added to every ETA for this bus.
    pub fn delay_minutes(&self) -> u32 {
        self.delay.map(|delay| delay.minutes_remaining).unwrap_or(0)
    }

    pub fn is_delayed(&self) -> bool {
        self.delay.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_parses_codes_case_insensitively() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::En);
        assert_eq!(" pa ".parse::<Locale>().unwrap(), Locale::Pa);
        assert!("fr".parse::<Locale>().is_err());
    }

    #[test]
    fn direction_steps_are_signed() {
        assert_eq!(Direction::Forward.step(), 1);
        assert_eq!(Direction::Backward.step(), -1);
        assert_eq!(Direction::Forward.reversed(), Direction::Backward);
    }

    #[test]
    fn bus_serializes_without_absent_delay() {
        let bus = Bus {
            id: "bus-sr-1".to_string(),
            route_id: "route-sr-1".to_string(),
            current_stop_index: 1,
            progress: 40,
            direction: Direction::Backward,
            delay: None,
        };
        let value = serde_json::to_value(&bus).unwrap();
        assert!(value.get("delay").is_none());
        assert_eq!(value["direction"], "backward");
    }
}
