//! Console driver for the reef ecosystem simulation.
//!
//! Usage: `reef [config.json]`. Without an argument the stock scenario
//! runs: a 200x200 field, 700 steps, seed 0.

use anyhow::Result;
use reef_core::SimConfig;
use reef_world::{Field, OrganismArena, Simulation, StatusView};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Prints one census line per step.
struct ConsoleView;

impl StatusView for ConsoleView {
    fn show_status(&mut self, step: u64, time_label: &str, field: &Field, arena: &OrganismArena) {
        let census = field.census(arena);
        println!(
            "step {step:>4}  {time_label}  [{weather}]  {census}",
            weather = field.weather()
        );
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,reef_world=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => SimConfig::from_path(&path)?,
        None => SimConfig::default(),
    };

    info!(
        depth = config.depth,
        width = config.width,
        num_steps = config.num_steps,
        seed = config.seed,
        "starting reef simulation"
    );

    let num_steps = config.num_steps;
    let delay = Duration::from_millis(config.step_delay_ms);
    let mut sim = Simulation::new(config);
    sim.attach_view(Box::new(ConsoleView));

    let mut completed = 0;
    for _ in 0..num_steps {
        if !sim.is_viable() {
            info!(step = sim.step_count(), "field no longer viable");
            break;
        }
        sim.step();
        completed += 1;
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }

    info!(completed, "simulation finished");
    Ok(())
}
