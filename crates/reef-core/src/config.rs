//! Configuration types for the simulation.

use crate::error::Result;
use crate::types::Species;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Simulation configuration.
///
/// Defaults reproduce the stock scenario: a 200x200 field populated by the
/// seeding sweep and run for 700 steps.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Number of rows in the field. Must be greater than zero; the driver
    /// substitutes the default otherwise.
    pub depth: i32,
    /// Number of columns in the field. Must be greater than zero; the
    /// driver substitutes the default otherwise.
    pub width: i32,
    /// Number of steps a full run attempts before stopping.
    pub num_steps: u64,
    /// Random seed for reproducibility.
    pub seed: u64,
    /// Pause between steps, consumed by the console driver. Zero disables.
    pub step_delay_ms: u64,
    /// Per-species seeding probabilities.
    pub spawn: SpawnConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            depth: 200,
            width: 200,
            num_steps: 700,
            seed: 0,
            step_delay_ms: 0,
            spawn: SpawnConfig::default(),
        }
    }
}

impl SimConfig {
    /// Load a configuration from a JSON file. Missing fields fall back to
    /// their defaults.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }
}

/// Chance that each species is created in any given cell during the
/// seeding sweep. Cells are offered to species in a fixed priority order
/// (see [`SpawnConfig::PRIORITY`]); the first successful draw wins the cell.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpawnConfig {
    pub tiger_shark: f64,
    pub octopus: f64,
    pub parrotfish: f64,
    pub krill: f64,
    pub hermit_crab: f64,
    pub marine_algae: f64,
    pub kelp: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            tiger_shark: 0.02,
            octopus: 0.15,
            parrotfish: 0.10,
            krill: 0.10,
            hermit_crab: 0.10,
            marine_algae: 0.15,
            kelp: 0.15,
        }
    }
}

impl SpawnConfig {
    /// Seeding order: earlier species get first claim on each cell.
    pub const PRIORITY: [Species; 7] = [
        Species::TigerShark,
        Species::Octopus,
        Species::Parrotfish,
        Species::Krill,
        Species::HermitCrab,
        Species::MarineAlgae,
        Species::Kelp,
    ];

    pub fn rate(&self, species: Species) -> f64 {
        match species {
            Species::TigerShark => self.tiger_shark,
            Species::Octopus => self.octopus,
            Species::Parrotfish => self.parrotfish,
            Species::Krill => self.krill,
            Species::HermitCrab => self.hermit_crab,
            Species::MarineAlgae => self.marine_algae,
            Species::Kelp => self.kelp,
        }
    }

    /// An empty sweep; useful for tests that place organisms by hand.
    pub fn none() -> Self {
        Self {
            tiger_shark: 0.0,
            octopus: 0.0,
            parrotfish: 0.0,
            krill: 0.0,
            hermit_crab: 0.0,
            marine_algae: 0.0,
            kelp: 0.0,
        }
    }
}
