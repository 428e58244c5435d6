//! PlantPal
//!
//! Plant matching and care guidance behind the PlantPal screens.
//!
//! - `matcher/`: preference criteria -> ranked, filtered plants + active filter labels
//! - `catalog/`: the static plant catalog
//! - `care/`, `growth_plan/`, `diagnostics/`: mocked guidance content
//! - `selection_store/`, `location/`: small persisted user choices
//! - `recommend/`, `api_server/`: HTTP surface (feature `api`)
//!
//! The matcher is pure: callers own the criteria and pass in the jitter source.

pub mod types;
pub mod catalog;
pub mod matcher;
pub mod care;
pub mod growth_plan;
pub mod diagnostics;
pub mod location;
pub mod selection_store;
pub mod config;
pub mod error;
pub mod recommend;
pub mod api_server;

// Re-export commonly used types
pub use types::{Difficulty, Level, MatchScore, PlantRecord, PlantType, Space};
pub use catalog::{default_catalog, Catalog};
pub use matcher::{
    apply_filters, remove_filter, reset_filters, resolve_level, FilterRule, FixedJitter,
    MatchResult, PreferenceCriteria, RandomJitter, ScoreJitter, ScoredPlant,
};
pub use config::ServerConfig;
pub use error::{PlantPalError, Result};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
#[cfg(feature = "api")]
pub use recommend::{recommend_with_fallback, RecommendationClient, RemoteOutcome};
