use crate::models::{Bus, Delay, DelayReason, Direction, Point, Route, Stop};

use super::params::SimParams;

pub(crate) fn stop(id: &str, x: f64, y: f64) -> Stop {
    Stop {
        id: id.to_string(),
        name: id.to_uppercase(),
        position: Point::new(x, y),
    }
}

/// Four stops `s0..s3` laid out as a staircase.
pub(crate) fn line_route() -> Route {
    Route {
        id: "route-t-1".to_string(),
        name: "Test Line".to_string(),
        color: "#123456".to_string(),
        stops: vec![
            stop("s0", 10.0, 10.0),
            stop("s1", 30.0, 10.0),
            stop("s2", 30.0, 40.0),
            stop("s3", 60.0, 40.0),
        ],
    }
}

pub(crate) fn bus(index: usize, progress: u32, direction: Direction) -> Bus {
    Bus {
        id: "bus-t-1".to_string(),
        route_id: "route-t-1".to_string(),
        current_stop_index: index,
        progress,
        direction,
        delay: None,
    }
}

pub(crate) fn delayed(mut bus: Bus, minutes: u32) -> Bus {
    bus.delay = Some(Delay {
        minutes_remaining: minutes,
        reason: DelayReason::Roadblock,
    });
    bus
}

/// Default movement with every random event switched off.
pub(crate) fn calm_params() -> SimParams {
    SimParams {
        delay_decay_probability: 0.0,
        delay_onset_probability: 0.0,
        ..SimParams::default()
    }
}
