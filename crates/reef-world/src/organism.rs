//! Organism dispatch: every entity in the field is an animal or a plant.

use crate::animal::Animal;
use crate::field::{Field, OrganismArena, OrganismId};
use crate::plant::Plant;
use rand::Rng;
use reef_core::{Location, Species, TimeOfDay};

/// Everything an organism needs to act for one tick: mutable access to the
/// shared arena (its own slot is vacated while it acts), the immutable
/// current field it reads, and the next field it writes itself and any
/// offspring into.
pub(crate) struct StepCtx<'a, R: Rng> {
    pub(crate) arena: &'a mut OrganismArena,
    pub(crate) current: &'a Field,
    pub(crate) next: &'a mut Field,
    pub(crate) time: TimeOfDay,
    pub(crate) rng: &'a mut R,
}

/// A single entity on the field.
#[derive(Debug, Clone)]
pub enum Organism {
    Animal(Animal),
    Plant(Plant),
}

impl Organism {
    /// Species factory: construct a fresh organism of the given species.
    /// Used by the seeding sweep; offspring and seedlings go through
    /// [`Animal::new`] and [`Plant::new`] directly.
    pub fn spawn<R: Rng>(species: Species, location: Location, rng: &mut R) -> Self {
        if species.is_plant() {
            Organism::Plant(Plant::new(species, location))
        } else {
            Organism::Animal(Animal::new(species, location, rng))
        }
    }

    pub fn species(&self) -> Species {
        match self {
            Organism::Animal(animal) => animal.species,
            Organism::Plant(plant) => plant.species,
        }
    }

    pub fn is_alive(&self) -> bool {
        match self {
            Organism::Animal(animal) => animal.is_alive(),
            Organism::Plant(plant) => plant.is_alive(),
        }
    }

    /// Current location; `None` once dead.
    pub fn location(&self) -> Option<Location> {
        match self {
            Organism::Animal(animal) => animal.location(),
            Organism::Plant(plant) => plant.location(),
        }
    }

    /// Mark the organism dead. One-way: there is no resurrection path.
    pub fn set_dead(&mut self) {
        match self {
            Organism::Animal(animal) => animal.set_dead(),
            Organism::Plant(plant) => plant.set_dead(),
        }
    }

    /// Hunger restored to whoever eats this organism.
    pub fn food_value(&self) -> i32 {
        match self {
            Organism::Animal(animal) => animal.food_value(),
            Organism::Plant(plant) => plant.food_value(),
        }
    }

    pub fn as_animal(&self) -> Option<&Animal> {
        match self {
            Organism::Animal(animal) => Some(animal),
            Organism::Plant(_) => None,
        }
    }

    pub fn as_plant(&self) -> Option<&Plant> {
        match self {
            Organism::Plant(plant) => Some(plant),
            Organism::Animal(_) => None,
        }
    }

    pub(crate) fn act<R: Rng>(&mut self, id: OrganismId, ctx: &mut StepCtx<'_, R>) {
        match self {
            Organism::Animal(animal) => animal.act(id, ctx),
            Organism::Plant(plant) => plant.act(id, ctx),
        }
    }
}
