//! Tunable constants for the simulation and pricing.

use serde::{Deserialize, Serialize};

/// Movement, delay and ETA constants shared by the advancer and the estimators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimParams {
    /// Progress gained per tick without a delay.
    pub normal_step: u32,
    /// Progress gained per tick while delayed.
    pub slow_step: u32,
    /// Per-tick chance that an active delay loses a minute.
    pub delay_decay_probability: f64,
    /// Per-tick chance that an undelayed bus picks up a delay.
    pub delay_onset_probability: f64,
    pub delay_minutes_min: u32,
    pub delay_minutes_max: u32,
    /// Travel time of one full segment.
    pub minutes_per_stop: u32,
    /// Progress up to which a bus still counts as standing at its current stop.
    pub due_threshold: u32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            normal_step: 2,
            slow_step: 1,
            delay_decay_probability: 0.02,
            delay_onset_probability: 0.005,
            delay_minutes_min: 3,
            delay_minutes_max: 7,
            minutes_per_stop: 5,
            due_threshold: 10,
        }
    }
}

/// Ticket pricing: a flat base plus a charge per stop travelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FareTable {
    pub base_fare: u32,
    pub per_stop_rate: u32,
}

impl Default for FareTable {
    fn default() -> Self {
        Self {
            base_fare: 10,
            per_stop_rate: 5,
        }
    }
}
