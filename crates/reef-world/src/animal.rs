//! Animal state and per-tick behavior, shared by predators and prey.
//!
//! The two trophic roles run the same act sequence; the only differences
//! come out of the species parameter table (what counts as edible, how long
//! the animal lasts without food). Hunger, aging, disease and pregnancy are
//! all handled here.

use crate::field::OrganismId;
use crate::organism::{Organism, StepCtx};
use rand::Rng;
use reef_core::{AnimalSpec, Diet, Location, Sex, Species, WeatherKind};

/// A mobile organism: hunts or grazes, breeds, ages, and can carry disease.
#[derive(Debug, Clone)]
pub struct Animal {
    pub species: Species,
    pub(crate) alive: bool,
    pub(crate) location: Option<Location>,
    pub age: u32,
    pub sex: Sex,
    /// Remaining ticks the animal can go without eating.
    pub hunger: i32,
    pub infected: bool,
    pub infection_days: u32,
    /// Ticks until birth; -1 while not pregnant.
    pub pregnancy_counter: i32,
    /// Litter size decided at conception.
    pub num_births: u32,
    pub pregnant: bool,
}

impl Animal {
    /// Construct a newborn of the given species. Sex is drawn uniformly and
    /// the animal may start out carrying the disease.
    pub fn new<R: Rng>(species: Species, location: Location, rng: &mut R) -> Self {
        let spec = species
            .animal_spec()
            .expect("species has no animal parameter set");
        Self {
            species,
            alive: true,
            location: Some(location),
            age: 0,
            sex: Sex::sample(rng),
            hunger: spec.initial_food_level,
            infected: rng.gen::<f64>() <= spec.initial_infection_chance,
            infection_days: 0,
            pregnancy_counter: -1,
            num_births: 0,
            pregnant: false,
        }
    }

    fn spec(&self) -> &'static AnimalSpec {
        self.species
            .animal_spec()
            .expect("species has no animal parameter set")
    }

    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn location(&self) -> Option<Location> {
        self.location
    }

    /// Mark the animal dead and clear its location. One-way.
    pub fn set_dead(&mut self) {
        self.alive = false;
        self.location = None;
    }

    pub fn food_value(&self) -> i32 {
        self.spec().food_value
    }

    pub fn increment_age(&mut self) {
        self.age += 1;
        if self.age >= self.spec().death_age {
            self.set_dead();
        }
    }

    pub fn decrement_hunger(&mut self) {
        self.hunger -= 1;
        if self.hunger <= 0 {
            self.set_dead();
        }
    }

    /// Absorb food. No cap is applied here; the feeding scan refuses any
    /// candidate that would reach the species' stomach capacity.
    pub fn eat(&mut self, food_value: i32) {
        self.hunger += food_value;
    }

    /// Catch the disease. A no-op on an already infected animal: the
    /// incubation counter is not restarted.
    pub fn infect(&mut self) {
        if !self.infected {
            self.infected = true;
            self.infection_days = 0;
        }
    }

    /// Advance the disease by one tick; terminal once it has run its course.
    pub fn update_infection(&mut self) {
        if self.infected {
            self.infection_days += 1;
            if self.infection_days >= self.spec().disease_duration {
                self.set_dead();
            }
        }
    }

    /// Try to pass the disease to every adjacent living, uninfected animal.
    pub(crate) fn spread_infection<R: Rng>(&self, ctx: &mut StepCtx<'_, R>) {
        if !self.infected || !self.alive {
            return;
        }
        let Some(here) = self.location else {
            return;
        };
        let chance =
            weather_adjusted_disease_spread(self.spec().disease_spread, ctx.current.weather());
        for loc in ctx.current.adjacent_locations(here, ctx.rng) {
            let Some(id) = ctx.current.occupant(loc) else {
                continue;
            };
            let Some(Organism::Animal(other)) = ctx.arena.get_mut(id) else {
                continue;
            };
            if other.alive && !other.infected && ctx.rng.gen::<f64>() <= chance {
                other.infect();
            }
        }
    }

    /// Whether this animal can conceive right now: female, of breeding age,
    /// not already pregnant, lucky on the weather-adjusted probability roll,
    /// and next to a living male of the same species.
    pub(crate) fn check_pregnancy_possible<R: Rng>(&self, ctx: &mut StepCtx<'_, R>) -> bool {
        if self.sex == Sex::Male
            || self.age < self.spec().breeding_age
            || self.pregnancy_counter != -1
        {
            return false;
        }

        let chance = weather_adjusted_breeding_probability(
            self.spec().breeding_probability,
            ctx.current.weather(),
        );
        if ctx.rng.gen::<f64>() > chance {
            return false;
        }

        let Some(here) = self.location else {
            return false;
        };
        for loc in ctx.current.adjacent_locations(here, ctx.rng) {
            if let Some(Organism::Animal(other)) = ctx.current.organism_at(ctx.arena, loc) {
                if other.alive && other.species == self.species && other.sex == Sex::Male {
                    return true;
                }
            }
        }
        false
    }

    pub(crate) fn start_pregnancy<R: Rng>(&mut self, rng: &mut R) {
        self.pregnancy_counter = self.spec().pregnancy_duration as i32;
        self.pregnant = true;
        self.num_births = rng.gen_range(1..=self.spec().max_litter_size);
    }

    /// Give birth: place up to `num_births` offspring into free cells next
    /// to the mother in the next field, stopping early when space runs out.
    /// Pregnancy state resets regardless of how many were actually born.
    pub(crate) fn end_pregnancy<R: Rng>(&mut self, ctx: &mut StepCtx<'_, R>) {
        if let Some(here) = self.location {
            let mut free = ctx.next.free_adjacent_locations(ctx.arena, here, ctx.rng);
            for _ in 0..self.num_births {
                if free.is_empty() {
                    break;
                }
                let birth_loc = free.remove(0);
                let offspring = Animal::new(self.species, birth_loc, ctx.rng);
                let child = ctx.arena.insert(Organism::Animal(offspring));
                ctx.next.place(child, birth_loc);
            }
        }
        self.pregnancy_counter = -1;
        self.num_births = 0;
        self.pregnant = false;
    }

    /// Whether the target can be eaten by this species: set membership in
    /// the configured diet, with the animal/plant split enforced by type.
    pub fn is_edible(&self, target: &Organism) -> bool {
        match (self.spec().diet, target) {
            (Diet::Animals(list), Organism::Animal(other)) => list.contains(&other.species),
            (Diet::Plants(list), Organism::Plant(plant)) => list.contains(&plant.species),
            _ => false,
        }
    }

    /// Scan adjacent cells of the current field for the first living edible
    /// organism, kill it and absorb its food value. Returns the victim's
    /// location, or `None` if nothing was eaten. A candidate whose food
    /// value would reach stomach capacity aborts the whole scan rather than
    /// being skipped.
    fn food_location<R: Rng>(&mut self, ctx: &mut StepCtx<'_, R>) -> Option<Location> {
        let here = self.location?;
        for loc in ctx.current.adjacent_locations(here, ctx.rng) {
            let Some(id) = ctx.current.occupant(loc) else {
                continue;
            };
            let Some(target) = ctx.arena.get(id) else {
                continue;
            };
            if !target.is_alive() || !self.is_edible(target) {
                continue;
            }
            let value = target.food_value();
            if self.hunger + value >= self.spec().max_food_level {
                return None;
            }
            if let Some(target) = ctx.arena.get_mut(id) {
                target.set_dead();
            }
            self.eat(value);
            return Some(loc);
        }
        None
    }

    /// One tick of life: age, hunger, disease, then (if still standing)
    /// storm check, pregnancy bookkeeping, activity check, feeding and
    /// movement. An animal with no food in reach and no free cell to move
    /// to dies of overcrowding.
    pub(crate) fn act<R: Rng>(&mut self, id: OrganismId, ctx: &mut StepCtx<'_, R>) {
        self.increment_age();
        self.decrement_hunger();
        self.update_infection();
        self.spread_infection(ctx);

        let weather = ctx.current.weather();
        for _ in 0..weather_hunger_hit(weather) {
            self.decrement_hunger();
        }

        if !self.alive {
            return;
        }
        let Some(here) = self.location else {
            return;
        };

        // Storms pin an animal in place half the time.
        if weather == WeatherKind::Storm && ctx.rng.gen::<f64>() < 0.5 {
            ctx.next.place(id, here);
            return;
        }

        // Captured before any births this animal produces; a mother can end
        // up moving onto a cell she just filled, and the later placement
        // wins.
        let mut free = ctx.next.free_adjacent_locations(ctx.arena, here, ctx.rng);

        if self.pregnant {
            self.pregnancy_counter -= 1;
            if self.pregnancy_counter <= 0 {
                self.end_pregnancy(ctx);
            }
        } else if self.check_pregnancy_possible(ctx) {
            self.start_pregnancy(ctx.rng);
        }

        if !self.spec().active_times.contains(&ctx.time) {
            ctx.next.place(id, here);
            return;
        }

        let mut destination = self.food_location(ctx);
        if destination.is_none() && !free.is_empty() {
            destination = Some(free.remove(0));
        }

        match destination {
            Some(next_loc) => {
                self.location = Some(next_loc);
                ctx.next.place(id, next_loc);
            }
            None => self.set_dead(),
        }
    }
}

/// Storms double the spread chance, cloud cover dampens it.
pub(crate) fn weather_adjusted_disease_spread(base: f64, weather: WeatherKind) -> f64 {
    let mut chance = base;
    match weather {
        WeatherKind::Storm => chance *= 2.0,
        WeatherKind::Cloudy => chance *= 0.7,
        WeatherKind::Clear | WeatherKind::Rain => {}
    }
    chance.min(1.0)
}

/// Extra hunger decrements caused by the weather this tick.
pub(crate) fn weather_hunger_hit(weather: WeatherKind) -> u32 {
    match weather {
        WeatherKind::Storm | WeatherKind::Cloudy => 1,
        WeatherKind::Clear | WeatherKind::Rain => 0,
    }
}

/// Storms halve the breeding chance, cloud cover dampens it, rain helps.
pub(crate) fn weather_adjusted_breeding_probability(base: f64, weather: WeatherKind) -> f64 {
    let mut chance = base;
    match weather {
        WeatherKind::Storm => chance *= 0.5,
        WeatherKind::Cloudy => chance *= 0.8,
        WeatherKind::Rain => chance *= 1.1,
        WeatherKind::Clear => {}
    }
    chance.clamp(0.0, 1.0)
}
