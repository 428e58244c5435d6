//! Shared plant vocabulary
//!
//! Ordered requirement levels, plant categories and the catalog record type.
//! All enums serialize as their display label ("Low", "Herb", ...) so the
//! JSON surface matches what the screens render.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Ordered requirement level used for both light and water.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Level {
    Low,
    Medium,
    High,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Low, Level::Medium, Level::High];

    /// Position on the Low < Medium < High scale
    pub fn rank(self) -> u8 {
        match self {
            Level::Low => 0,
            Level::Medium => 1,
            Level::High => 2,
        }
    }

    /// Number of steps between two levels (0, 1 or 2)
    pub fn steps_to(self, other: Level) -> u8 {
        self.rank().abs_diff(other.rank())
    }

    pub fn label(self) -> &'static str {
        match self {
            Level::Low => "Low",
            Level::Medium => "Medium",
            Level::High => "High",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|l| l.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Plant category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantType {
    Herb,
    Vegetable,
    Fruit,
    Flower,
    Succulent,
}

impl PlantType {
    /// Display order of the type chips
    pub const ALL: [PlantType; 5] = [
        PlantType::Herb,
        PlantType::Vegetable,
        PlantType::Fruit,
        PlantType::Flower,
        PlantType::Succulent,
    ];

    /// Herbs, vegetables and fruit count as edible
    pub fn is_edible(self) -> bool {
        matches!(self, PlantType::Herb | PlantType::Vegetable | PlantType::Fruit)
    }

    pub fn label(self) -> &'static str {
        match self {
            PlantType::Herb => "Herb",
            PlantType::Vegetable => "Vegetable",
            PlantType::Fruit => "Fruit",
            PlantType::Flower => "Flower",
            PlantType::Succulent => "Succulent",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.label().eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for PlantType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Care difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Qualitative space requirement (display only, never filtered on)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Space {
    Small,
    Medium,
    Large,
}

// ============================================================================
// Match Score
// ============================================================================

/// Match percentage (0-100), rendered as "N%"
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MatchScore(u8);

impl MatchScore {
    pub const MAX: u8 = 100;

    /// Values above 100 are clamped
    pub fn new(percent: u8) -> Self {
        Self(percent.min(Self::MAX))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Parse "98%" or "98"
    pub fn parse(s: &str) -> Option<Self> {
        let digits = s.trim().trim_end_matches('%').trim();
        digits.parse::<u8>().ok().filter(|v| *v <= Self::MAX).map(Self)
    }
}

impl fmt::Display for MatchScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

impl Serialize for MatchScore {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for MatchScore {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(u8),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(n) if n <= MatchScore::MAX => Ok(MatchScore(n)),
            Raw::Number(n) => Err(serde::de::Error::custom(format!(
                "match score {} exceeds 100",
                n
            ))),
            Raw::Text(s) => MatchScore::parse(&s).ok_or_else(|| {
                serde::de::Error::custom(format!("invalid match score '{}'", s))
            }),
        }
    }
}

// ============================================================================
// Plant Record
// ============================================================================

/// Static catalog entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantRecord {
    pub name: String,
    #[serde(rename = "type")]
    pub plant_type: PlantType,
    pub difficulty: Difficulty,
    pub space: Space,
    pub light: Level,
    pub water: Level,
    pub indoor: bool,
    /// Precomputed match for featured plants
    #[serde(rename = "match", default, skip_serializing_if = "Option::is_none")]
    pub featured_match: Option<MatchScore>,
}

impl PlantRecord {
    pub fn is_featured(&self) -> bool {
        self.featured_match.is_some()
    }
}
