//! Simulation driver: owns the field, clock, weather and RNG, and runs the
//! per-tick update.
//!
//! One step is a plain sequential scan over the current field's roster in
//! placement order. Each organism is lifted out of the shared arena, acts
//! against the immutable current field while writing into the next field,
//! and is put back. The current field's structure is never touched during
//! the scan; organism state inside the arena is, which is how kills and
//! infections land mid-tick. When the scan ends the arena is compacted to
//! the next field's roster and the fields swap.

use crate::clock::Clock;
use crate::field::{Field, OrganismArena, OrganismId};
use crate::organism::{Organism, StepCtx};
use crate::weather::Weather;
use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use reef_core::{Location, SimConfig, SpawnConfig};
use tracing::{debug, info, trace, warn};

/// Ticks between weather re-rolls.
const WEATHER_PERIOD: u64 = 8;

/// Observational status sink, invoked after every step and when a view is
/// first attached. Must not mutate simulation state.
pub trait StatusView {
    fn show_status(&mut self, step: u64, time_label: &str, field: &Field, arena: &OrganismArena);
}

pub struct Simulation {
    config: SimConfig,
    clock: Clock,
    weather: Weather,
    field: Field,
    arena: OrganismArena,
    rng: ChaCha8Rng,
    view: Option<Box<dyn StatusView>>,
}

impl Simulation {
    /// Build and populate a simulation. Non-positive dimensions are a
    /// caller error; the driver substitutes the defaults rather than
    /// failing.
    pub fn new(config: SimConfig) -> Self {
        let mut config = config;
        if config.depth <= 0 || config.width <= 0 {
            warn!(
                depth = config.depth,
                width = config.width,
                "non-positive field dimensions, using defaults"
            );
            let defaults = SimConfig::default();
            config.depth = defaults.depth;
            config.width = defaults.width;
        }

        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut sim = Self {
            clock: Clock::new(),
            weather: Weather::new(),
            field: Field::new(config.depth, config.width),
            arena: OrganismArena::new(),
            rng,
            view: None,
            config,
        };
        sim.reset();
        sim
    }

    /// Attach a status sink. It immediately receives the current snapshot.
    pub fn attach_view(&mut self, mut view: Box<dyn StatusView>) {
        view.show_status(
            self.clock.step_count(),
            self.clock.time_label(),
            &self.field,
            &self.arena,
        );
        self.view = Some(view);
    }

    /// Return the simulation to a freshly seeded starting state.
    pub fn reset(&mut self) {
        self.clock.reset();
        self.weather.reset();
        self.field = Field::new(self.config.depth, self.config.width);
        self.field.set_weather(self.weather.current());
        self.arena = OrganismArena::new();
        self.populate();

        if let Some(view) = self.view.as_mut() {
            view.show_status(
                self.clock.step_count(),
                self.clock.time_label(),
                &self.field,
                &self.arena,
            );
        }
    }

    /// Seeding sweep: every cell is offered to each species in priority
    /// order with an independent draw; the first success claims the cell.
    fn populate(&mut self) {
        for row in 0..self.config.depth {
            for col in 0..self.config.width {
                let location = Location::new(row, col);
                for species in SpawnConfig::PRIORITY {
                    if self.rng.gen::<f64>() <= self.config.spawn.rate(species) {
                        let organism = Organism::spawn(species, location, &mut self.rng);
                        let id = self.arena.insert(organism);
                        self.field.place(id, location);
                        break;
                    }
                }
            }
        }

        let census = self.field.census(&self.arena);
        info!(
            population = census.total(),
            census = %census,
            "field populated"
        );
    }

    /// Run up to `num_steps` steps, stopping early once the field is no
    /// longer viable. Returns the number of steps actually taken.
    pub fn simulate(&mut self, num_steps: u64) -> u64 {
        let mut completed = 0;
        for _ in 0..num_steps {
            if !self.field.is_viable(&self.arena) {
                info!(
                    step = self.clock.step_count(),
                    "field no longer viable, stopping"
                );
                break;
            }
            self.step();
            completed += 1;
        }
        completed
    }

    /// Run the configured number of steps.
    pub fn run(&mut self) -> u64 {
        info!(num_steps = self.config.num_steps, "starting simulation run");
        self.simulate(self.config.num_steps)
    }

    /// Advance the simulation by one tick.
    pub fn step(&mut self) {
        self.clock.tick();
        if self.clock.step_count() % WEATHER_PERIOD == 0 {
            self.weather.update(&mut self.rng);
            debug!(
                step = self.clock.step_count(),
                weather = %self.weather.current(),
                "weather updated"
            );
        }

        let mut next = Field::new(self.config.depth, self.config.width);
        next.set_weather(self.weather.current());

        let roster: Vec<OrganismId> = self.field.roster().to_vec();
        for id in roster {
            let Some(mut organism) = self.arena.take(id) else {
                continue;
            };
            let mut ctx = StepCtx {
                arena: &mut self.arena,
                current: &self.field,
                next: &mut next,
                time: self.clock.time(),
                rng: &mut self.rng,
            };
            organism.act(id, &mut ctx);
            self.arena.restore(id, organism);
        }

        self.arena.compact(&mut next);
        self.field = next;

        trace!(
            step = self.clock.step_count(),
            tracked = self.arena.len(),
            "step complete"
        );
        if self.clock.step_count() % 100 == 0 {
            self.log_population_metrics();
        }

        if let Some(view) = self.view.as_mut() {
            view.show_status(
                self.clock.step_count(),
                self.clock.time_label(),
                &self.field,
                &self.arena,
            );
        }
    }

    fn log_population_metrics(&self) {
        let census = self.field.census(&self.arena);
        info!(
            step = self.clock.step_count(),
            time = self.clock.time_label(),
            weather = %self.field.weather(),
            population = census.total(),
            census = %census,
            "population snapshot"
        );
    }

    pub fn is_viable(&self) -> bool {
        self.field.is_viable(&self.arena)
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn arena(&self) -> &OrganismArena {
        &self.arena
    }

    pub fn step_count(&self) -> u64 {
        self.clock.step_count()
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
