#![warn(clippy::all, missing_docs)]

//! Core engine for the live bus tracker.
//!
//! This crate hosts the stop/route catalog, the bus model, the tick-driven
//! fleet simulation with its arrival, position and fare queries, and the
//! configuration used by the terminal UI and any future frontends.

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod sim;
pub mod tracker;

pub use catalog::Catalog;
pub use config::AppConfig;
pub use error::{CatalogError, LocaleError};
pub use models::{Bus, Delay, DelayReason, Direction, Locale, Point, Route, Stop};
pub use sim::{Fleet, FleetSnapshot, SimEvent, SimRng, Simulation, TripMatch};
pub use tracker::Tracker;
