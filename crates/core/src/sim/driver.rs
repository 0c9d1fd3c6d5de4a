use std::{sync::Arc, time::Duration};

use tokio::{sync::mpsc, time::MissedTickBehavior};
use tracing::info;

use crate::models::Route;

use super::{
    fleet::{Fleet, FleetSnapshot},
    params::SimParams,
    rng::SimRng,
};

/// Events emitted by the background simulation loop.
#[derive(Debug, Clone)]
pub enum SimEvent {
    /// A tick completed and the fleet holds a new snapshot.
    Advanced(Arc<FleetSnapshot>),
}

/// Owns everything needed to tick a fleet on a schedule.
pub struct Simulation {
    fleet: Fleet,
    routes: Arc<Vec<Route>>,
    params: SimParams,
    rng: SimRng,
    interval: Duration,
}

impl Simulation {
    pub fn new(
        fleet: Fleet,
        routes: Arc<Vec<Route>>,
        params: SimParams,
        rng: SimRng,
        interval: Duration,
    ) -> Self {
        Self {
            fleet,
            routes,
            params,
            rng,
            interval,
        }
    }

    /// Handle to the fleet this simulation advances.
    pub fn fleet(&self) -> Fleet {
        self.fleet.clone()
    }

    /// Advance the fleet by one tick.
    pub fn step(&mut self) -> Arc<FleetSnapshot> {
        self.fleet.advance(&self.routes, &self.params, &mut self.rng)
    }

    /// Tick on a fixed interval until the receiving side goes away.
    ///
    /// The first tick fires one interval after start. Dropping the receiver
    /// stops further ticks; the last published snapshot stays in the fleet.
    pub async fn run(mut self, sender: mpsc::Sender<SimEvent>) {
        info!(
            interval_ms = self.interval.as_millis() as u64,
            seed = self.rng.seed(),
            "Simulation started"
        );
        let mut ticker = tokio::time::interval_at(
            tokio::time::Instant::now() + self.interval,
            self.interval,
        );
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let snapshot = self.step();
            if sender.send(SimEvent::Advanced(snapshot)).await.is_err() {
                break;
            }
        }
        info!(tick = self.fleet.snapshot().tick, "Simulation stopped");
    }
}
