//! Plant Matcher
//!
//! Maps slider/toggle preferences to a ranked, filtered list of catalog plants
//! plus the list of human-readable active filter labels.
//!
//! **Filtering**: a plant is kept only when every rule holds
//!   1. indoor only -> plant must be indoor
//!   2. edible only -> plant type must be Herb, Vegetable or Fruit
//!   3. selected types non-empty -> plant type must be selected
//!   4. plant light within one step of the target light level
//!   5. plant water within one step of the target water level
//!
//! **Scoring**: featured plants keep their precomputed match. Every other
//! survivor gets `80 + jitter(0..=14)` plus one point per exact agreement
//! (light, water, indoor flag, selected type), capped at 99. The jitter comes
//! from an injected [`ScoreJitter`] so tests can pin it.
//!
//! The matcher holds no state; callers own the criteria and the catalog.

use crate::types::{Level, MatchScore, PlantRecord, PlantType};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Deserializer, Serialize};
use smallvec::SmallVec;
use std::fmt;

/// Slider values below this resolve to Low
pub const LOW_UPPER_BOUND: f64 = 33.0;
/// Slider values below this (and at least `LOW_UPPER_BOUND`) resolve to Medium
pub const MEDIUM_UPPER_BOUND: f64 = 66.0;

pub const DEFAULT_LIGHT_REQUIREMENT: f64 = 50.0;
/// Resolves to Low, not Medium. Kept as shipped.
pub const DEFAULT_WATER_REQUIREMENT: f64 = 25.0;

pub const BASE_SCORE: u8 = 80;
pub const MAX_JITTER: u8 = 14;
pub const SCORE_CAP: u8 = 99;

/// Slider value -> level. No bounds are enforced on `value`.
pub fn resolve_level(value: f64) -> Level {
    if value < LOW_UPPER_BOUND {
        Level::Low
    } else if value < MEDIUM_UPPER_BOUND {
        Level::Medium
    } else {
        Level::High
    }
}

// ============================================================================
// Criteria
// ============================================================================

/// User-adjustable filter state, owned by the screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PreferenceCriteria {
    pub light_requirement: f64,
    pub water_requirement: f64,
    pub indoor_only: bool,
    pub edible_only: bool,
    /// Insertion-ordered, no duplicates
    #[serde(deserialize_with = "deserialize_type_set")]
    pub selected_types: Vec<PlantType>,
}

/// Repeated types collapse to their first occurrence
fn deserialize_type_set<'de, D>(deserializer: D) -> Result<Vec<PlantType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<PlantType>::deserialize(deserializer)?;
    let mut types = Vec::with_capacity(raw.len());
    for plant_type in raw {
        if !types.contains(&plant_type) {
            types.push(plant_type);
        }
    }
    Ok(types)
}

impl Default for PreferenceCriteria {
    fn default() -> Self {
        Self {
            light_requirement: DEFAULT_LIGHT_REQUIREMENT,
            water_requirement: DEFAULT_WATER_REQUIREMENT,
            indoor_only: true,
            edible_only: false,
            selected_types: vec![PlantType::Herb],
        }
    }
}

impl PreferenceCriteria {
    pub fn light_level(&self) -> Level {
        resolve_level(self.light_requirement)
    }

    pub fn water_level(&self) -> Level {
        resolve_level(self.water_requirement)
    }

    pub fn is_type_selected(&self, plant_type: PlantType) -> bool {
        self.selected_types.contains(&plant_type)
    }

    /// Select an unselected type (appended last) or deselect a selected one
    pub fn toggle_type(&mut self, plant_type: PlantType) {
        if let Some(pos) = self.selected_types.iter().position(|t| *t == plant_type) {
            self.selected_types.remove(pos);
        } else {
            self.selected_types.push(plant_type);
        }
    }

    pub fn set_light(&mut self, value: f64) {
        self.light_requirement = value.clamp(0.0, 100.0);
    }

    pub fn set_water(&mut self, value: f64) {
        self.water_requirement = value.clamp(0.0, 100.0);
    }

    /// Undo the criterion behind one active-filter label.
    ///
    /// Returns false for labels that map to nothing; the criteria are left
    /// untouched in that case.
    pub fn clear_filter(&mut self, label: &str) -> bool {
        match label {
            "Indoor" => self.indoor_only = false,
            "Edible" => self.edible_only = false,
            l => {
                if let Some(level) = l.strip_suffix(" Light") {
                    if Level::from_label(level).is_none() {
                        return false;
                    }
                    self.light_requirement = DEFAULT_LIGHT_REQUIREMENT;
                } else if let Some(level) = l.strip_suffix(" Water") {
                    if Level::from_label(level).is_none() {
                        return false;
                    }
                    self.water_requirement = DEFAULT_WATER_REQUIREMENT;
                } else {
                    match PlantType::from_label(l) {
                        Some(plant_type) => self.selected_types.retain(|t| *t != plant_type),
                        None => return false,
                    }
                }
            }
        }
        true
    }

    /// Labels for the criteria currently in effect, in display order
    pub fn active_filters(&self) -> Vec<String> {
        let mut labels = Vec::new();

        if self.indoor_only {
            labels.push("Indoor".to_string());
        }
        if self.edible_only {
            labels.push("Edible".to_string());
        }
        labels.extend(self.selected_types.iter().map(|t| t.label().to_string()));

        let light = self.light_level();
        if light != Level::Medium {
            labels.push(format!("{} Light", light));
        }
        let water = self.water_level();
        if water != Level::Medium {
            labels.push(format!("{} Water", water));
        }

        labels
    }
}

/// Criteria after removing one active filter. Unknown labels are a no-op.
pub fn remove_filter(criteria: &PreferenceCriteria, label: &str) -> PreferenceCriteria {
    let mut updated = criteria.clone();
    updated.clear_filter(label);
    updated
}

/// Factory defaults: light 50, water 25, indoor only, Herb selected
pub fn reset_filters() -> PreferenceCriteria {
    PreferenceCriteria::default()
}

// ============================================================================
// Rules
// ============================================================================

/// One of the five retention rules
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterRule {
    IndoorOnly,
    EdibleOnly,
    SelectedTypes,
    LightLevel,
    WaterLevel,
}

impl fmt::Display for FilterRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            FilterRule::IndoorOnly => "not suited to indoor growing",
            FilterRule::EdibleOnly => "not edible",
            FilterRule::SelectedTypes => "type not selected",
            FilterRule::LightLevel => "light requirement too far from target",
            FilterRule::WaterLevel => "water requirement too far from target",
        };
        f.write_str(text)
    }
}

pub type Violations = SmallVec<[FilterRule; 5]>;

/// Every rule that rejects `plant` under `criteria` (empty = kept)
pub fn rule_violations(plant: &PlantRecord, criteria: &PreferenceCriteria) -> Violations {
    let mut violations = Violations::new();

    if criteria.indoor_only && !plant.indoor {
        violations.push(FilterRule::IndoorOnly);
    }
    if criteria.edible_only && !plant.plant_type.is_edible() {
        violations.push(FilterRule::EdibleOnly);
    }
    if !criteria.selected_types.is_empty() && !criteria.is_type_selected(plant.plant_type) {
        violations.push(FilterRule::SelectedTypes);
    }
    if plant.light.steps_to(criteria.light_level()) > 1 {
        violations.push(FilterRule::LightLevel);
    }
    if plant.water.steps_to(criteria.water_level()) > 1 {
        violations.push(FilterRule::WaterLevel);
    }

    violations
}

// ============================================================================
// Score Jitter
// ============================================================================

/// Source of the random offset added to the base score
pub trait ScoreJitter {
    /// Offset in `0..=MAX_JITTER`
    fn next_offset(&mut self) -> u8;
}

/// Uniform offsets drawn from any `rand` generator
#[derive(Debug, Clone)]
pub struct RandomJitter<R = StdRng> {
    rng: R,
}

impl RandomJitter<StdRng> {
    pub fn from_entropy() -> Self {
        Self { rng: StdRng::from_entropy() }
    }

    pub fn seeded(seed: u64) -> Self {
        Self { rng: StdRng::seed_from_u64(seed) }
    }
}

impl<R: Rng> RandomJitter<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ScoreJitter for RandomJitter<R> {
    fn next_offset(&mut self) -> u8 {
        self.rng.gen_range(0..=MAX_JITTER)
    }
}

/// Cycles through a fixed sequence (values above `MAX_JITTER` are clamped)
#[derive(Debug, Clone, Default)]
pub struct FixedJitter {
    sequence: Vec<u8>,
    position: usize,
}

impl FixedJitter {
    pub fn new(sequence: impl Into<Vec<u8>>) -> Self {
        Self { sequence: sequence.into(), position: 0 }
    }

    pub fn constant(offset: u8) -> Self {
        Self::new(vec![offset])
    }
}

impl ScoreJitter for FixedJitter {
    fn next_offset(&mut self) -> u8 {
        if self.sequence.is_empty() {
            return 0;
        }
        let offset = self.sequence[self.position % self.sequence.len()];
        self.position += 1;
        offset.min(MAX_JITTER)
    }
}

// ============================================================================
// Matching
// ============================================================================

/// A retained plant with its resolved match score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredPlant {
    pub plant: PlantRecord,
    #[serde(rename = "match")]
    pub score: MatchScore,
    /// True when `score` is the record's precomputed match
    pub precomputed: bool,
}

/// Ranked plants plus the active filter labels
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchResult {
    pub plants: Vec<ScoredPlant>,
    pub active_filters: Vec<String>,
}

impl MatchResult {
    pub fn names(&self) -> Vec<&str> {
        self.plants.iter().map(|p| p.plant.name.as_str()).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.plants.is_empty()
    }
}

fn synthetic_score(plant: &PlantRecord, criteria: &PreferenceCriteria, offset: u8) -> MatchScore {
    let bonus = [
        plant.light == criteria.light_level(),
        plant.water == criteria.water_level(),
        plant.indoor == criteria.indoor_only,
        criteria.is_type_selected(plant.plant_type),
    ]
    .iter()
    .filter(|hit| **hit)
    .count() as u8;

    let score = BASE_SCORE + offset.min(MAX_JITTER) + bonus;
    MatchScore::new(score.min(SCORE_CAP))
}

/// Filter, score and rank `catalog` under `criteria`.
///
/// One jitter offset is drawn per retained non-featured plant, in catalog
/// order. Ties keep catalog order.
pub fn apply_filters<J>(
    catalog: &[PlantRecord],
    criteria: &PreferenceCriteria,
    jitter: &mut J,
) -> MatchResult
where
    J: ScoreJitter + ?Sized,
{
    let mut plants: Vec<ScoredPlant> = catalog
        .iter()
        .filter(|plant| rule_violations(plant, criteria).is_empty())
        .map(|plant| match plant.featured_match {
            Some(score) => ScoredPlant { plant: plant.clone(), score, precomputed: true },
            None => ScoredPlant {
                plant: plant.clone(),
                score: synthetic_score(plant, criteria, jitter.next_offset()),
                precomputed: false,
            },
        })
        .collect();

    // Vec::sort_by is stable
    plants.sort_by(|a, b| b.score.cmp(&a.score));

    MatchResult {
        plants,
        active_filters: criteria.active_filters(),
    }
}
