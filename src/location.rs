//! User location
//!
//! The prototype sends one hardcoded location with every recommendation
//! request. A manually entered location from onboarding is remembered in the
//! selection store but is not geocoded.

use crate::selection_store::SelectionStore;
use crate::error::Result;
use serde::{Deserialize, Serialize};

/// Store key for the manually entered location
pub const USER_LOCATION_KEY: &str = "userLocation";

/// Geographic location attached to recommendation requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub city: String,
    pub region: String,
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Location {
    /// "City, Country" for display
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.city, self.country)
    }
}

/// Tunis, Tunisia - the fixed request location
pub fn tunis() -> Location {
    Location {
        city: "Tunis".to_string(),
        region: "Tunis Governorate".to_string(),
        country: "Tunisia".to_string(),
        latitude: 36.8065,
        longitude: 10.1815,
    }
}

/// Remember a manually entered location. Blank input is ignored and
/// returns `Ok(false)`.
pub fn remember_manual_location<S>(store: &S, input: &str) -> Result<bool>
where
    S: SelectionStore + ?Sized,
{
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(false);
    }
    store.set(USER_LOCATION_KEY, trimmed)?;
    Ok(true)
}

pub fn manual_location<S>(store: &S) -> Result<Option<String>>
where
    S: SelectionStore + ?Sized,
{
    store.get(USER_LOCATION_KEY)
}
