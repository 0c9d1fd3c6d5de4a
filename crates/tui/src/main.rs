mod app;
mod i18n;
mod prefs;

use std::{
    fs::{self, OpenOptions},
    sync::{Arc, Mutex},
};

use anyhow::{Context, Result};
use bustrack_core::{
    config::{self, AppConfig},
    sim::spawn_fleet,
    Catalog, Fleet, Locale, SimRng, Simulation, Tracker,
};
use tokio::sync::mpsc;
use tracing::{info, warn};
use tracing_subscriber::{prelude::*, EnvFilter};

use crate::prefs::Preferences;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let config_path = config::ensure_default_config()?;
    let config = AppConfig::load()?;
    info!(path = %config_path.display(), "Configuration loaded");

    let prefs_path = prefs::preferences_path();
    let prefs = match Preferences::load(&prefs_path) {
        Ok(prefs) => prefs.unwrap_or_default(),
        Err(err) => {
            warn!(?err, "Ignoring unreadable preferences");
            Preferences::default()
        }
    };
    let locale = prefs.locale.unwrap_or(config.locale);

    // Simulated routes keep English names; only the display layer localizes.
    let routes = Arc::new(Catalog::builtin().routes(Locale::En));
    let mut rng = SimRng::from_optional_seed(config.seed);
    info!(seed = rng.seed(), "Simulation seeded");
    let fleet = Fleet::new(spawn_fleet(&routes, &mut rng));

    let simulation = Simulation::new(
        fleet.clone(),
        routes,
        config.sim.clone(),
        rng,
        config.tick_interval(),
    );
    let (sim_tx, sim_rx) = mpsc::channel(8);
    tokio::spawn(simulation.run(sim_tx));

    let tracker = Tracker::from_config(&config, fleet);
    let mut app = app::BusTrackApp::new(tracker, locale, prefs, prefs_path);
    app.attach_simulation(sim_rx);
    app.run().await
}

fn init_logging() -> Result<()> {
    let log_dir = std::env::current_dir()?.join("logs");
    fs::create_dir_all(&log_dir)?;
    let log_path = log_dir.join("bustrack.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open log file {}", log_path.display()))?;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    // The terminal belongs to the UI, so logs only go to the file.
    let file_layer = tracing_subscriber::fmt::layer()
        .with_target(true)
        .with_ansi(false)
        .compact()
        .with_writer(Mutex::new(log_file));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .init();

    Ok(())
}
