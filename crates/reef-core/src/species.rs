//! Species parameter tables.
//!
//! Every species-fixed constant lives here as data rather than behavior:
//! behavior code looks its parameters up by [`Species`] tag. The diet of an
//! animal species doubles as its trophic classification: a species that
//! eats animals is a predator, one that eats plants is a prey.

use crate::types::{Species, TimeOfDay};

/// What an animal species can eat. Edibility is plain set membership
/// against the listed species tags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Diet {
    Animals(&'static [Species]),
    Plants(&'static [Species]),
}

/// Fixed parameter set for an animal species.
#[derive(Debug, Clone, Copy)]
pub struct AnimalSpec {
    /// Age at which the animal dies of old age.
    pub death_age: u32,
    /// Minimum age required for breeding.
    pub breeding_age: u32,
    /// Chance of a successful pregnancy once a partner has been found.
    pub breeding_probability: f64,
    /// Ticks from conception to birth.
    pub pregnancy_duration: u32,
    /// Upper bound on offspring per pregnancy.
    pub max_litter_size: u32,
    /// Stomach capacity; a feeding action must not reach this level.
    pub max_food_level: i32,
    /// Hunger level at construction.
    pub initial_food_level: i32,
    /// Hunger restored to whoever eats this animal (0 for apex species).
    pub food_value: i32,
    /// Chance of carrying the disease at construction.
    pub initial_infection_chance: f64,
    /// Per-neighbor chance of passing the disease on each tick.
    pub disease_spread: f64,
    /// Infected ticks survived before the disease is terminal.
    pub disease_duration: u32,
    /// Day phases during which the animal feeds and moves.
    pub active_times: &'static [TimeOfDay],
    pub diet: Diet,
}

/// Fixed parameter set for a plant species.
#[derive(Debug, Clone, Copy)]
pub struct PlantSpec {
    /// Age at which the plant dies, before weather adjustment.
    pub max_age: u32,
    /// Per-tick chance of producing a seedling, before weather adjustment.
    pub spread_chance: f64,
    /// Hunger restored to whoever eats this plant.
    pub food_value: i32,
}

const TIGER_SHARK: AnimalSpec = AnimalSpec {
    death_age: 480,
    breeding_age: 40,
    breeding_probability: 0.7,
    pregnancy_duration: 5,
    max_litter_size: 6,
    max_food_level: 75,
    initial_food_level: 30,
    food_value: 0,
    initial_infection_chance: 0.01,
    disease_spread: 0.1,
    disease_duration: 20,
    active_times: &[TimeOfDay::Midday, TimeOfDay::Dawn],
    diet: Diet::Animals(&[Species::Parrotfish, Species::Krill]),
};

const OCTOPUS: AnimalSpec = AnimalSpec {
    death_age: 480,
    breeding_age: 60,
    breeding_probability: 0.6,
    pregnancy_duration: 6,
    max_litter_size: 8,
    max_food_level: 120,
    initial_food_level: 30,
    food_value: 0,
    initial_infection_chance: 0.01,
    disease_spread: 0.1,
    disease_duration: 20,
    active_times: &[TimeOfDay::Midnight, TimeOfDay::Dawn],
    diet: Diet::Animals(&[Species::HermitCrab, Species::Krill]),
};

const PARROTFISH: AnimalSpec = AnimalSpec {
    death_age: 320,
    breeding_age: 40,
    breeding_probability: 0.26,
    pregnancy_duration: 3,
    max_litter_size: 8,
    max_food_level: 90,
    initial_food_level: 65,
    food_value: 14,
    initial_infection_chance: 0.01,
    disease_spread: 0.1,
    disease_duration: 20,
    active_times: &[TimeOfDay::Midday, TimeOfDay::Dawn],
    diet: Diet::Plants(&[Species::MarineAlgae, Species::Kelp]),
};

const KRILL: AnimalSpec = AnimalSpec {
    death_age: 160,
    breeding_age: 16,
    breeding_probability: 0.22,
    pregnancy_duration: 2,
    max_litter_size: 8,
    max_food_level: 75,
    initial_food_level: 65,
    food_value: 6,
    initial_infection_chance: 0.01,
    disease_spread: 0.1,
    disease_duration: 20,
    active_times: &[
        TimeOfDay::Dawn,
        TimeOfDay::Midday,
        TimeOfDay::Dusk,
        TimeOfDay::Midnight,
    ],
    diet: Diet::Plants(&[Species::MarineAlgae, Species::Kelp]),
};

const HERMIT_CRAB: AnimalSpec = AnimalSpec {
    death_age: 360,
    breeding_age: 30,
    breeding_probability: 0.2,
    pregnancy_duration: 4,
    max_litter_size: 5,
    max_food_level: 85,
    initial_food_level: 65,
    food_value: 10,
    initial_infection_chance: 0.01,
    disease_spread: 0.1,
    disease_duration: 20,
    active_times: &[TimeOfDay::Dawn, TimeOfDay::Dusk],
    diet: Diet::Plants(&[Species::MarineAlgae]),
};

const MARINE_ALGAE: PlantSpec = PlantSpec {
    max_age: 120,
    spread_chance: 0.03,
    food_value: 15,
};

const KELP: PlantSpec = PlantSpec {
    max_age: 120,
    spread_chance: 0.032,
    food_value: 14,
};

impl Species {
    /// Parameter table entry for an animal species, `None` for plants.
    pub fn animal_spec(self) -> Option<&'static AnimalSpec> {
        match self {
            Species::TigerShark => Some(&TIGER_SHARK),
            Species::Octopus => Some(&OCTOPUS),
            Species::Parrotfish => Some(&PARROTFISH),
            Species::Krill => Some(&KRILL),
            Species::HermitCrab => Some(&HERMIT_CRAB),
            Species::MarineAlgae | Species::Kelp => None,
        }
    }

    /// Parameter table entry for a plant species, `None` for animals.
    pub fn plant_spec(self) -> Option<&'static PlantSpec> {
        match self {
            Species::MarineAlgae => Some(&MARINE_ALGAE),
            Species::Kelp => Some(&KELP),
            _ => None,
        }
    }

    /// An animal species that eats other animals.
    pub fn is_predator(self) -> bool {
        matches!(
            self.animal_spec().map(|spec| spec.diet),
            Some(Diet::Animals(_))
        )
    }

    /// An animal species that eats plants.
    pub fn is_prey(self) -> bool {
        matches!(
            self.animal_spec().map(|spec| spec.diet),
            Some(Diet::Plants(_))
        )
    }

    pub fn is_plant(self) -> bool {
        self.plant_spec().is_some()
    }
}
