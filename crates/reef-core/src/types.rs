//! Core type definitions for the simulation.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell position in the rectangular field, identified by row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    pub row: i32,
    pub col: i32,
}

impl Location {
    pub fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Biological sex of an animal, drawn uniformly at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sex {
    Male,
    Female,
}

impl Sex {
    /// Draw a sex uniformly at random.
    pub fn sample<R: Rng>(rng: &mut R) -> Self {
        if rng.gen_range(0..2) == 0 {
            Sex::Male
        } else {
            Sex::Female
        }
    }
}

/// The four phases of the day cycle.
///
/// Phases advance in declaration order and wrap around, so a full day is
/// four ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeOfDay {
    Midnight,
    Dawn,
    Midday,
    Dusk,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 4] = [
        TimeOfDay::Midnight,
        TimeOfDay::Dawn,
        TimeOfDay::Midday,
        TimeOfDay::Dusk,
    ];

    /// The cyclic successor of this phase.
    pub fn next(self) -> Self {
        match self {
            TimeOfDay::Midnight => TimeOfDay::Dawn,
            TimeOfDay::Dawn => TimeOfDay::Midday,
            TimeOfDay::Midday => TimeOfDay::Dusk,
            TimeOfDay::Dusk => TimeOfDay::Midnight,
        }
    }

    pub fn hour(self) -> u32 {
        match self {
            TimeOfDay::Midnight => 0,
            TimeOfDay::Dawn => 6,
            TimeOfDay::Midday => 12,
            TimeOfDay::Dusk => 18,
        }
    }

    /// Clock-face label used by status reporting.
    pub fn label(self) -> &'static str {
        match self {
            TimeOfDay::Midnight => "00:00",
            TimeOfDay::Dawn => "06:00",
            TimeOfDay::Midday => "12:00",
            TimeOfDay::Dusk => "18:00",
        }
    }
}

/// Current weather condition over the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherKind {
    Clear,
    Rain,
    Storm,
    Cloudy,
}

impl fmt::Display for WeatherKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WeatherKind::Clear => "clear",
            WeatherKind::Rain => "rain",
            WeatherKind::Storm => "storm",
            WeatherKind::Cloudy => "cloudy",
        };
        write!(f, "{name}")
    }
}

/// Concrete organism kind. The tag determines the species' fixed parameter
/// set (see [`crate::species`]) and is compared by value for mate matching
/// and edibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    TigerShark,
    Octopus,
    Parrotfish,
    Krill,
    HermitCrab,
    MarineAlgae,
    Kelp,
}

impl Species {
    pub const ALL: [Species; 7] = [
        Species::TigerShark,
        Species::Octopus,
        Species::Parrotfish,
        Species::Krill,
        Species::HermitCrab,
        Species::MarineAlgae,
        Species::Kelp,
    ];

    pub fn common_name(self) -> &'static str {
        match self {
            Species::TigerShark => "tiger shark",
            Species::Octopus => "octopus",
            Species::Parrotfish => "parrotfish",
            Species::Krill => "krill",
            Species::HermitCrab => "hermit crab",
            Species::MarineAlgae => "marine algae",
            Species::Kelp => "kelp",
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.common_name())
    }
}
