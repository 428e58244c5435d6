//! Static plant catalog
//!
//! The catalog is built once and never mutated. Catalog order matters: it is
//! the tie-break order when two plants end up with the same match score.

use crate::types::{Difficulty, Level, MatchScore, PlantRecord, PlantType, Space};
use rustc_hash::FxHashMap;

/// Immutable list of known plants with a name index
#[derive(Debug, Clone)]
pub struct Catalog {
    plants: Vec<PlantRecord>,
    by_name: FxHashMap<String, usize>,
}

impl Catalog {
    /// Build a catalog from records. A later record with a duplicate name
    /// is dropped so names stay unique.
    pub fn new(records: Vec<PlantRecord>) -> Self {
        let mut plants = Vec::with_capacity(records.len());
        let mut by_name = FxHashMap::default();

        for record in records {
            if by_name.contains_key(&record.name) {
                continue;
            }
            by_name.insert(record.name.clone(), plants.len());
            plants.push(record);
        }

        Self { plants, by_name }
    }

    pub fn plants(&self) -> &[PlantRecord] {
        &self.plants
    }

    pub fn len(&self) -> usize {
        self.plants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&PlantRecord> {
        self.by_name.get(name).map(|&idx| &self.plants[idx])
    }

    /// Plants carrying a precomputed match, in catalog order
    pub fn featured(&self) -> impl Iterator<Item = &PlantRecord> {
        self.plants.iter().filter(|p| p.is_featured())
    }

    pub fn plant_type_of(&self, name: &str) -> Option<PlantType> {
        self.get(name).map(|p| p.plant_type)
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new(default_catalog())
    }
}

#[allow(clippy::too_many_arguments)]
fn plant(
    name: &str,
    plant_type: PlantType,
    difficulty: Difficulty,
    space: Space,
    light: Level,
    water: Level,
    indoor: bool,
    featured_match: Option<u8>,
) -> PlantRecord {
    PlantRecord {
        name: name.to_string(),
        plant_type,
        difficulty,
        space,
        light,
        water,
        indoor,
        featured_match: featured_match.map(MatchScore::new),
    }
}

/// The eight plants shipped with the app
pub fn default_catalog() -> Vec<PlantRecord> {
    use Difficulty as D;
    use Level as L;
    use PlantType as T;

    vec![
        // Featured (AI recommended)
        plant("Basil", T::Herb, D::Easy, Space::Small, L::Medium, L::Medium, true, Some(98)),
        plant("Mint", T::Herb, D::Easy, Space::Small, L::Medium, L::High, true, Some(95)),
        plant("Aloe Vera", T::Succulent, D::Easy, Space::Small, L::Medium, L::Low, true, Some(92)),
        // Rest of the catalog
        plant("Tomato", T::Vegetable, D::Medium, Space::Medium, L::High, L::Medium, false, None),
        plant("Lavender", T::Herb, D::Medium, Space::Small, L::High, L::Low, true, None),
        plant("Strawberry", T::Fruit, D::Medium, Space::Medium, L::High, L::Medium, false, None),
        plant("Cactus", T::Succulent, D::Easy, Space::Small, L::High, L::Low, true, None),
        plant("Peace Lily", T::Flower, D::Easy, Space::Medium, L::Low, L::Medium, true, None),
    ]
}
