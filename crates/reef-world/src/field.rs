//! The field: a rectangular grid of cells plus the organism arena backing it.
//!
//! A field holds at most one organism per cell. Organisms themselves live in
//! an [`OrganismArena`] of index-stable slots; the field only stores slot
//! ids. During a tick both the current and the next field point into the
//! same arena, which is what lets an organism killed late in a tick show up
//! dead in the next field even if it was already placed there.

use crate::organism::Organism;
use rand::seq::SliceRandom;
use rand::Rng;
use reef_core::{Location, Species, WeatherKind};
use std::collections::HashMap;
use std::fmt;

/// Index-stable handle to an organism slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrganismId(pub(crate) usize);

/// Slot storage for every organism referenced by a field.
///
/// Slots are append-only within a tick; [`OrganismArena::compact`] rebuilds
/// the storage from the surviving roster at the end of each tick.
#[derive(Debug, Default)]
pub struct OrganismArena {
    entries: Vec<Option<Organism>>,
}

impl OrganismArena {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, organism: Organism) -> OrganismId {
        let id = OrganismId(self.entries.len());
        self.entries.push(Some(organism));
        id
    }

    pub fn get(&self, id: OrganismId) -> Option<&Organism> {
        self.entries.get(id.0).and_then(|slot| slot.as_ref())
    }

    pub fn get_mut(&mut self, id: OrganismId) -> Option<&mut Organism> {
        self.entries.get_mut(id.0).and_then(|slot| slot.as_mut())
    }

    /// Remove an organism from its slot so it can act while the arena stays
    /// borrowable. The slot must be refilled with [`OrganismArena::restore`]
    /// before the next organism acts.
    pub(crate) fn take(&mut self, id: OrganismId) -> Option<Organism> {
        self.entries.get_mut(id.0).and_then(|slot| slot.take())
    }

    pub(crate) fn restore(&mut self, id: OrganismId, organism: Organism) {
        if let Some(slot) = self.entries.get_mut(id.0) {
            *slot = Some(organism);
        }
    }

    /// Number of slots, including organisms that have died this tick.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every organism the given field no longer tracks and renumber the
    /// survivors, rewriting the field's roster and occupancy map in place.
    /// Called once per tick after the field swap.
    pub(crate) fn compact(&mut self, field: &mut Field) {
        let mut entries: Vec<Option<Organism>> = Vec::with_capacity(field.roster.len());
        let mut remap: HashMap<OrganismId, OrganismId> =
            HashMap::with_capacity(field.roster.len());

        for &old_id in &field.roster {
            if let Some(organism) = self.entries.get_mut(old_id.0).and_then(|slot| slot.take()) {
                remap.insert(old_id, OrganismId(entries.len()));
                entries.push(Some(organism));
            }
        }

        self.entries = entries;

        let roster: Vec<OrganismId> = field
            .roster
            .iter()
            .filter_map(|id| remap.get(id).copied())
            .collect();
        let cells: HashMap<Location, OrganismId> = field
            .cells
            .iter()
            .filter_map(|(loc, id)| remap.get(id).map(|new_id| (*loc, *new_id)))
            .collect();
        field.roster = roster;
        field.cells = cells;
    }
}

/// A rectangular grid of cells, each holding at most one organism, plus the
/// weather condition in force for its tick.
#[derive(Debug)]
pub struct Field {
    depth: i32,
    width: i32,
    weather: WeatherKind,
    cells: HashMap<Location, OrganismId>,
    roster: Vec<OrganismId>,
}

impl Field {
    pub fn new(depth: i32, width: i32) -> Self {
        Self {
            depth,
            width,
            weather: WeatherKind::Clear,
            cells: HashMap::new(),
            roster: Vec::new(),
        }
    }

    pub fn depth(&self) -> i32 {
        self.depth
    }

    pub fn width(&self) -> i32 {
        self.width
    }

    pub fn weather(&self) -> WeatherKind {
        self.weather
    }

    pub fn set_weather(&mut self, weather: WeatherKind) {
        self.weather = weather;
    }

    /// Place an organism at a location. A different occupant already mapped
    /// to that cell is evicted from the roster; the cell itself is simply
    /// overwritten (last write wins).
    pub fn place(&mut self, id: OrganismId, location: Location) {
        if let Some(&previous) = self.cells.get(&location) {
            self.roster.retain(|&tracked| tracked != previous);
        }
        self.cells.insert(location, id);
        self.roster.push(id);
    }

    /// The id occupying a cell, dead or alive.
    pub fn occupant(&self, location: Location) -> Option<OrganismId> {
        self.cells.get(&location).copied()
    }

    /// The organism occupying a cell, dead or alive.
    pub fn organism_at<'a>(
        &self,
        arena: &'a OrganismArena,
        location: Location,
    ) -> Option<&'a Organism> {
        self.cells.get(&location).and_then(|id| arena.get(*id))
    }

    /// The in-bounds neighbors of a location, excluding the location itself,
    /// in a freshly randomized order. Callers scanning for food, mates or
    /// empty cells rely on the order changing between calls.
    pub fn adjacent_locations<R: Rng>(&self, location: Location, rng: &mut R) -> Vec<Location> {
        let mut locations = Vec::with_capacity(8);
        for row_offset in -1..=1 {
            let row = location.row + row_offset;
            if row < 0 || row >= self.depth {
                continue;
            }
            for col_offset in -1..=1 {
                let col = location.col + col_offset;
                if col < 0 || col >= self.width || (row_offset == 0 && col_offset == 0) {
                    continue;
                }
                locations.push(Location::new(row, col));
            }
        }
        locations.shuffle(rng);
        locations
    }

    /// Adjacent locations holding no organism or a dead one. A cell whose
    /// occupant was killed earlier in the same tick is claimable.
    pub fn free_adjacent_locations<R: Rng>(
        &self,
        arena: &OrganismArena,
        location: Location,
        rng: &mut R,
    ) -> Vec<Location> {
        self.adjacent_locations(location, rng)
            .into_iter()
            .filter(|loc| match self.organism_at(arena, *loc) {
                None => true,
                Some(organism) => !organism.is_alive(),
            })
            .collect()
    }

    /// Whether the simulation can continue: at least one living predator and
    /// at least one living prey among the tracked organisms.
    pub fn is_viable(&self, arena: &OrganismArena) -> bool {
        let mut predator_found = false;
        let mut prey_found = false;
        for &id in &self.roster {
            if predator_found && prey_found {
                break;
            }
            let Some(organism) = arena.get(id) else {
                continue;
            };
            if !organism.is_alive() {
                continue;
            }
            let species = organism.species();
            if species.is_predator() {
                predator_found = true;
            } else if species.is_prey() {
                prey_found = true;
            }
        }
        predator_found && prey_found
    }

    /// Living head count per species over the occupied cells.
    pub fn census(&self, arena: &OrganismArena) -> Census {
        let mut counts: Vec<(Species, usize)> =
            Species::ALL.iter().map(|species| (*species, 0)).collect();
        for id in self.cells.values() {
            let Some(organism) = arena.get(*id) else {
                continue;
            };
            if !organism.is_alive() {
                continue;
            }
            if let Some(entry) = counts
                .iter_mut()
                .find(|(species, _)| *species == organism.species())
            {
                entry.1 += 1;
            }
        }
        Census { counts }
    }

    /// Remove every organism reference from the field.
    pub fn clear(&mut self) {
        self.cells.clear();
        self.roster.clear();
    }

    /// Tracked organism ids in placement order. This is the per-tick
    /// iteration order: earlier-placed organisms act first.
    pub fn roster(&self) -> &[OrganismId] {
        &self.roster
    }
}

/// Per-species living counts for one field.
#[derive(Debug, Clone)]
pub struct Census {
    counts: Vec<(Species, usize)>,
}

impl Census {
    pub fn count(&self, species: Species) -> usize {
        self.counts
            .iter()
            .find(|(s, _)| *s == species)
            .map(|(_, n)| *n)
            .unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, n)| n).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Species, usize)> + '_ {
        self.counts.iter().copied()
    }
}

impl fmt::Display for Census {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (species, count) in &self.counts {
            if !first {
                write!(f, "  ")?;
            }
            write!(f, "{species}: {count}")?;
            first = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animal::Animal;
    use crate::plant::Plant;
    use proptest::prelude::*;
    use rand::rngs::mock::StepRng;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use std::collections::HashSet;

    fn quiet_rng() -> StepRng {
        StepRng::new(0, 0)
    }

    fn kelp_at(arena: &mut OrganismArena, field: &mut Field, loc: Location) -> OrganismId {
        let id = arena.insert(Organism::Plant(Plant::new(Species::Kelp, loc)));
        field.place(id, loc);
        id
    }

    fn animal_at(
        arena: &mut OrganismArena,
        field: &mut Field,
        species: Species,
        loc: Location,
    ) -> OrganismId {
        let mut rng = StepRng::new(u64::MAX, 0);
        let id = arena.insert(Organism::Animal(Animal::new(species, loc, &mut rng)));
        field.place(id, loc);
        id
    }

    #[test]
    fn test_place_then_lookup_round_trip() {
        let mut arena = OrganismArena::new();
        let mut field = Field::new(5, 5);
        let loc = Location::new(2, 3);
        let id = kelp_at(&mut arena, &mut field, loc);

        assert_eq!(field.occupant(loc), Some(id));
        let organism = field.organism_at(&arena, loc).unwrap();
        assert_eq!(organism.species(), Species::Kelp);
        assert!(field.organism_at(&arena, Location::new(0, 0)).is_none());
    }

    #[test]
    fn test_place_evicts_previous_occupant_from_roster() {
        let mut arena = OrganismArena::new();
        let mut field = Field::new(3, 3);
        let loc = Location::new(1, 1);
        let first = kelp_at(&mut arena, &mut field, loc);
        let second = kelp_at(&mut arena, &mut field, loc);

        assert_eq!(field.occupant(loc), Some(second));
        assert_eq!(field.roster(), &[second]);
        // The evicted organism still exists in the arena, just untracked.
        assert!(arena.get(first).is_some());
    }

    #[test]
    fn test_adjacent_locations_corner_edge_center() {
        let field = Field::new(3, 3);
        let mut rng = quiet_rng();

        assert_eq!(
            field
                .adjacent_locations(Location::new(0, 0), &mut rng)
                .len(),
            3
        );
        assert_eq!(
            field
                .adjacent_locations(Location::new(0, 1), &mut rng)
                .len(),
            5
        );
        assert_eq!(
            field
                .adjacent_locations(Location::new(1, 1), &mut rng)
                .len(),
            8
        );
    }

    #[test]
    fn test_adjacent_locations_single_cell_field() {
        let field = Field::new(1, 1);
        let mut rng = quiet_rng();
        assert!(field
            .adjacent_locations(Location::new(0, 0), &mut rng)
            .is_empty());
    }

    #[test]
    fn test_free_adjacent_counts_dead_occupants_as_free() {
        let mut arena = OrganismArena::new();
        let mut field = Field::new(3, 3);
        let center = Location::new(1, 1);

        let living = kelp_at(&mut arena, &mut field, Location::new(0, 0));
        let dead = kelp_at(&mut arena, &mut field, Location::new(0, 1));
        arena.get_mut(dead).unwrap().set_dead();

        let mut rng = quiet_rng();
        let free = field.free_adjacent_locations(&arena, center, &mut rng);

        assert_eq!(free.len(), 7);
        assert!(!free.contains(&Location::new(0, 0)));
        assert!(free.contains(&Location::new(0, 1)));
        // Sanity: the living occupant really is alive.
        assert!(arena.get(living).unwrap().is_alive());
    }

    #[test]
    fn test_viability_truth_table() {
        // Empty field.
        let arena = OrganismArena::new();
        let field = Field::new(3, 3);
        assert!(!field.is_viable(&arena));

        // Predator only.
        let mut arena = OrganismArena::new();
        let mut field = Field::new(3, 3);
        animal_at(
            &mut arena,
            &mut field,
            Species::TigerShark,
            Location::new(0, 0),
        );
        assert!(!field.is_viable(&arena));

        // Predator and prey, both alive.
        let krill = animal_at(&mut arena, &mut field, Species::Krill, Location::new(1, 1));
        assert!(field.is_viable(&arena));

        // Prey dies.
        arena.get_mut(krill).unwrap().set_dead();
        assert!(!field.is_viable(&arena));
    }

    #[test]
    fn test_plants_do_not_make_a_field_viable() {
        let mut arena = OrganismArena::new();
        let mut field = Field::new(3, 3);
        kelp_at(&mut arena, &mut field, Location::new(0, 0));
        animal_at(
            &mut arena,
            &mut field,
            Species::Octopus,
            Location::new(1, 1),
        );
        assert!(!field.is_viable(&arena));
    }

    #[test]
    fn test_census_counts_living_only() {
        let mut arena = OrganismArena::new();
        let mut field = Field::new(4, 4);
        animal_at(&mut arena, &mut field, Species::Krill, Location::new(0, 0));
        animal_at(&mut arena, &mut field, Species::Krill, Location::new(0, 1));
        let dead = animal_at(&mut arena, &mut field, Species::Krill, Location::new(0, 2));
        arena.get_mut(dead).unwrap().set_dead();
        kelp_at(&mut arena, &mut field, Location::new(1, 0));

        let census = field.census(&arena);
        assert_eq!(census.count(Species::Krill), 2);
        assert_eq!(census.count(Species::Kelp), 1);
        assert_eq!(census.count(Species::TigerShark), 0);
        assert_eq!(census.total(), 3);
    }

    #[test]
    fn test_clear_empties_field() {
        let mut arena = OrganismArena::new();
        let mut field = Field::new(3, 3);
        kelp_at(&mut arena, &mut field, Location::new(1, 1));
        field.clear();
        assert!(field.roster().is_empty());
        assert_eq!(field.occupant(Location::new(1, 1)), None);
    }

    #[test]
    fn test_compact_drops_untracked_organisms() {
        let mut arena = OrganismArena::new();
        let mut field = Field::new(3, 3);
        let loc = Location::new(1, 1);
        kelp_at(&mut arena, &mut field, loc); // evicted below
        kelp_at(&mut arena, &mut field, loc);
        kelp_at(&mut arena, &mut field, Location::new(0, 0));
        assert_eq!(arena.len(), 3);

        arena.compact(&mut field);

        assert_eq!(arena.len(), 2);
        assert_eq!(field.roster().len(), 2);
        // Lookups still resolve after renumbering.
        let survivor = field.organism_at(&arena, loc).unwrap();
        assert_eq!(survivor.species(), Species::Kelp);
        for &id in field.roster() {
            assert!(arena.get(id).is_some());
        }
    }

    proptest! {
        #[test]
        fn prop_adjacent_locations_are_in_bounds_and_exact(
            depth in 1i32..9,
            width in 1i32..9,
            row in 0i32..9,
            col in 0i32..9,
            seed in any::<u64>(),
        ) {
            prop_assume!(row < depth && col < width);
            let field = Field::new(depth, width);
            let origin = Location::new(row, col);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let adjacent = field.adjacent_locations(origin, &mut rng);

            let rows = (row + 1).min(depth - 1) - (row - 1).max(0) + 1;
            let cols = (col + 1).min(width - 1) - (col - 1).max(0) + 1;
            prop_assert_eq!(adjacent.len(), (rows * cols - 1) as usize);
            prop_assert!(adjacent.len() <= 8);

            let distinct: HashSet<Location> = adjacent.iter().copied().collect();
            prop_assert_eq!(distinct.len(), adjacent.len());

            for loc in adjacent {
                prop_assert!(loc != origin);
                prop_assert!(loc.row >= 0 && loc.row < depth);
                prop_assert!(loc.col >= 0 && loc.col < width);
                prop_assert!((loc.row - row).abs() <= 1 && (loc.col - col).abs() <= 1);
            }
        }

        #[test]
        fn prop_free_adjacent_is_the_empty_or_dead_subset(
            occupied in proptest::collection::hash_map(
                (0i32..4, 0i32..4),
                any::<bool>(),
                0..8,
            ),
            seed in any::<u64>(),
        ) {
            let mut arena = OrganismArena::new();
            let mut field = Field::new(4, 4);
            for (&(row, col), &alive) in &occupied {
                let loc = Location::new(row, col);
                let id = arena.insert(Organism::Plant(Plant::new(Species::MarineAlgae, loc)));
                field.place(id, loc);
                if !alive {
                    arena.get_mut(id).unwrap().set_dead();
                }
            }

            let origin = Location::new(1, 1);
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let free: HashSet<Location> = field
                .free_adjacent_locations(&arena, origin, &mut rng)
                .into_iter()
                .collect();
            let adjacent = field.adjacent_locations(origin, &mut rng);

            for loc in adjacent {
                let expected_free = match field.organism_at(&arena, loc) {
                    None => true,
                    Some(organism) => !organism.is_alive(),
                };
                prop_assert_eq!(free.contains(&loc), expected_free);
            }
        }
    }
}
