//! Plant state and per-tick behavior.
//!
//! A plant never moves. It ages each tick, dies at a weather-adjusted
//! maximum age, and may drop a seedling into a neighboring free cell.

use crate::field::OrganismId;
use crate::organism::{Organism, StepCtx};
use rand::Rng;
use reef_core::{Location, PlantSpec, Species, WeatherKind};

/// A stationary organism that spreads by seeding adjacent cells.
#[derive(Debug, Clone)]
pub struct Plant {
    pub species: Species,
    pub(crate) alive: bool,
    pub(crate) location: Option<Location>,
    pub age: u32,
}

impl Plant {
    pub fn new(species: Species, location: Location) -> Self {
        debug_assert!(species.is_plant(), "species has no plant parameter set");
        Self {
            species,
            alive: true,
            location: Some(location),
            age: 0,
        }
    }

    fn spec(&self) -> &'static PlantSpec {
        self.species
            .plant_spec()
            .expect("species has no plant parameter set")
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// Mark the plant dead and clear its location. One-way.
    pub fn set_dead(&mut self) {
        self.alive = false;
        self.location = None;
    }

    pub fn food_value(&self) -> i32 {
        self.spec().food_value
    }

    pub fn increment_age(&mut self) {
        self.age += 1;
        if self.age >= self.spec().max_age {
            self.set_dead();
        }
    }

    /// Try to drop one seedling into a free cell next to this plant. The
    /// seedling goes to the first entry of the (already randomized) free
    /// list of the current field, and is placed into the next field.
    fn spread<R: Rng>(&self, ctx: &mut StepCtx<'_, R>) {
        let chance = weather_adjusted_spread_chance(self.spec().spread_chance, ctx.current.weather());
        if ctx.rng.gen::<f64>() <= chance {
            let Some(here) = self.location else {
                return;
            };
            let free = ctx
                .current
                .free_adjacent_locations(ctx.arena, here, ctx.rng);
            if let Some(&seed_loc) = free.first() {
                let seedling = Plant::new(self.species, seed_loc);
                let id = ctx.arena.insert(Organism::Plant(seedling));
                ctx.next.place(id, seed_loc);
            }
        }
    }

    /// One tick of life: age (which may kill outright), re-check death
    /// against the weather-adjusted maximum age, then stay in place and
    /// possibly spread.
    pub(crate) fn act<R: Rng>(&mut self, id: OrganismId, ctx: &mut StepCtx<'_, R>) {
        self.increment_age();
        if !self.alive {
            return;
        }
        let Some(here) = self.location else {
            return;
        };

        // Weather can pull the maximum age below the current age.
        let max_age = weather_adjusted_max_age(self.spec().max_age, ctx.current.weather());
        if self.age >= max_age {
            self.set_dead();
            return;
        }

        ctx.next.place(id, here);
        self.spread(ctx);
    }
}

/// Rain stretches a plant's lifespan slightly, storms shorten it. Never
/// drops below one tick.
pub(crate) fn weather_adjusted_max_age(base: u32, weather: WeatherKind) -> u32 {
    let mut max_age = base as i32;
    match weather {
        WeatherKind::Rain => max_age += 2,
        WeatherKind::Storm => max_age -= 2,
        WeatherKind::Clear | WeatherKind::Cloudy => {}
    }
    max_age.max(1) as u32
}

/// Rain helps seedlings take, storms hamper them.
pub(crate) fn weather_adjusted_spread_chance(base: f64, weather: WeatherKind) -> f64 {
    let mut chance = base;
    match weather {
        WeatherKind::Rain => chance *= 1.5,
        WeatherKind::Storm => chance *= 0.5,
        WeatherKind::Clear | WeatherKind::Cloudy => {}
    }
    chance.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::{Field, OrganismArena};
    use rand::rngs::mock::StepRng;
    use reef_core::TimeOfDay;

    fn pass_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    fn fail_rng() -> StepRng {
        StepRng::new(u64::MAX, 0)
    }

    #[test]
    fn test_weather_adjusted_max_age() {
        assert_eq!(weather_adjusted_max_age(120, WeatherKind::Clear), 120);
        assert_eq!(weather_adjusted_max_age(120, WeatherKind::Cloudy), 120);
        assert_eq!(weather_adjusted_max_age(120, WeatherKind::Rain), 122);
        assert_eq!(weather_adjusted_max_age(120, WeatherKind::Storm), 118);
        // Never below one tick, even for a very short-lived plant.
        assert_eq!(weather_adjusted_max_age(2, WeatherKind::Storm), 1);
        assert_eq!(weather_adjusted_max_age(1, WeatherKind::Storm), 1);
    }

    #[test]
    fn test_weather_adjusted_spread_chance() {
        assert_eq!(weather_adjusted_spread_chance(0.03, WeatherKind::Clear), 0.03);
        assert!(
            (weather_adjusted_spread_chance(0.03, WeatherKind::Rain) - 0.045).abs() < 1e-12
        );
        assert_eq!(weather_adjusted_spread_chance(0.03, WeatherKind::Storm), 0.015);
        // Rain cannot push the chance past certainty.
        assert_eq!(weather_adjusted_spread_chance(0.8, WeatherKind::Rain), 1.0);
    }

    #[test]
    fn test_aging_kills_at_max_age() {
        let mut kelp = Plant::new(Species::Kelp, Location::new(0, 0));
        kelp.age = 118;
        kelp.increment_age();
        assert!(kelp.is_alive());
        kelp.increment_age();
        assert!(!kelp.is_alive());
        assert_eq!(kelp.location(), None);
    }

    #[test]
    fn test_act_storm_retroactively_shortens_lifespan() {
        let mut arena = OrganismArena::new();
        let mut current = Field::new(3, 3);
        current.set_weather(WeatherKind::Storm);
        let mut next = Field::new(3, 3);

        let here = Location::new(1, 1);
        let mut kelp = Plant::new(Species::Kelp, here);
        kelp.age = 117;
        let kelp_id = arena.insert(Organism::Plant(kelp.clone()));
        current.place(kelp_id, here);

        let mut rng = fail_rng();
        let mut ctx = StepCtx {
            arena: &mut arena,
            current: &current,
            next: &mut next,
            time: TimeOfDay::Dawn,
            rng: &mut rng,
        };
        kelp.act(kelp_id, &mut ctx);

        // Alive by the base max age (118 < 120) but not by the storm's.
        assert!(!kelp.is_alive());
        assert_eq!(next.occupant(here), None);
    }

    #[test]
    fn test_act_places_self_and_spreads() {
        let mut arena = OrganismArena::new();
        let mut current = Field::new(3, 3);
        let mut next = Field::new(3, 3);

        let here = Location::new(1, 1);
        let mut algae = Plant::new(Species::MarineAlgae, here);
        let algae_id = arena.insert(Organism::Plant(algae.clone()));
        current.place(algae_id, here);

        let mut rng = pass_rng();
        let mut ctx = StepCtx {
            arena: &mut arena,
            current: &current,
            next: &mut next,
            time: TimeOfDay::Dawn,
            rng: &mut rng,
        };
        algae.act(algae_id, &mut ctx);

        assert_eq!(next.occupant(here), Some(algae_id));
        // The all-zero RNG passes the spread roll, so exactly one seedling
        // landed in a neighboring cell.
        assert_eq!(next.roster().len(), 2);
        let seedling_id = next
            .roster()
            .iter()
            .copied()
            .find(|&id| id != algae_id)
            .unwrap();
        let seedling = arena.get(seedling_id).unwrap();
        assert_eq!(seedling.species(), Species::MarineAlgae);
        let seed_loc = seedling.location().unwrap();
        assert_ne!(seed_loc, here);
        assert!((seed_loc.row - here.row).abs() <= 1 && (seed_loc.col - here.col).abs() <= 1);
    }

    #[test]
    fn test_act_spread_roll_can_fail() {
        let mut arena = OrganismArena::new();
        let mut current = Field::new(3, 3);
        let mut next = Field::new(3, 3);

        let here = Location::new(1, 1);
        let mut kelp = Plant::new(Species::Kelp, here);
        let kelp_id = arena.insert(Organism::Plant(kelp.clone()));
        current.place(kelp_id, here);

        let mut rng = fail_rng();
        let mut ctx = StepCtx {
            arena: &mut arena,
            current: &current,
            next: &mut next,
            time: TimeOfDay::Dawn,
            rng: &mut rng,
        };
        kelp.act(kelp_id, &mut ctx);

        assert_eq!(next.roster().len(), 1);
        assert_eq!(next.occupant(here), Some(kelp_id));
    }

    #[test]
    fn test_spread_needs_a_free_cell() {
        let mut arena = OrganismArena::new();
        let mut current = Field::new(1, 2);
        let mut next = Field::new(1, 2);

        let here = Location::new(0, 0);
        let mut algae = Plant::new(Species::MarineAlgae, here);
        let algae_id = arena.insert(Organism::Plant(algae.clone()));
        current.place(algae_id, here);

        // The only neighbor is taken by a living plant in the current field.
        let blocker_loc = Location::new(0, 1);
        let blocker = arena.insert(Organism::Plant(Plant::new(Species::Kelp, blocker_loc)));
        current.place(blocker, blocker_loc);

        let mut rng = pass_rng();
        let mut ctx = StepCtx {
            arena: &mut arena,
            current: &current,
            next: &mut next,
            time: TimeOfDay::Dawn,
            rng: &mut rng,
        };
        algae.act(algae_id, &mut ctx);

        // Only the plant itself made it into the next field.
        assert_eq!(next.roster().len(), 1);
    }
}
