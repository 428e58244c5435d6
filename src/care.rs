//! Plant details and care recommendations
//!
//! Details are synthesized from the catalog record; names outside the
//! catalog still get a generic profile (type "Unknown", Easy/Medium/Medium).

use crate::catalog::Catalog;
use crate::types::{Difficulty, Level};
use serde::{Deserialize, Serialize};

pub const UNKNOWN_TYPE: &str = "Unknown";

/// Profile shown on the details screen
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlantDetails {
    pub name: String,
    pub scientific_name: String,
    #[serde(rename = "type")]
    pub plant_type: String,
    pub description: String,
    pub difficulty: Difficulty,
    pub light: Level,
    pub water: Level,
    pub temperature: String,
    pub humidity: Level,
    pub growth_rate: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CareRecommendation {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<String>,
    pub importance: Importance,
}

/// Build the details profile for `name`
pub fn plant_details(catalog: &Catalog, name: &str) -> PlantDetails {
    let name = name.trim();
    let record = catalog.get(name);

    let (display_name, scientific_name, subject) = if name.is_empty() {
        ("Unknown Plant".to_string(), "Plantae unknown".to_string(), "This plant".to_string())
    } else {
        (name.to_string(), format!("{} scientificus", name), name.to_string())
    };

    let image_text = if name.is_empty() { "Plant" } else { name };

    PlantDetails {
        scientific_name,
        plant_type: catalog
            .plant_type_of(name)
            .map_or(UNKNOWN_TYPE, |t| t.label())
            .to_string(),
        description: format!(
            "{} is a popular plant known for its beautiful appearance and easy care requirements.",
            subject
        ),
        difficulty: record.map_or(Difficulty::Easy, |r| r.difficulty),
        light: record.map_or(Level::Medium, |r| r.light),
        water: record.map_or(Level::Medium, |r| r.water),
        temperature: "65-80°F".to_string(),
        humidity: Level::Medium,
        growth_rate: "Moderate".to_string(),
        image_url: format!(
            "/{}.jpg?height=200&width=400&text={}",
            display_name,
            urlencoding::encode(image_text)
        ),
        name: display_name,
    }
}

/// How often to water at a given water requirement
pub fn watering_schedule(water: Level) -> &'static str {
    match water {
        Level::Low => "Every 10-14 days",
        Level::Medium => "Every 5-7 days",
        Level::High => "Every 2-3 days",
    }
}

/// The four care cards for a plant, most important first
pub fn care_recommendations(details: &PlantDetails) -> Vec<CareRecommendation> {
    let name = &details.name;

    vec![
        CareRecommendation {
            title: format!("Watering Schedule for {}", name),
            description: format!(
                "Water your {} when the top inch of soil feels dry to the touch. \
                 Avoid overwatering as it can lead to root rot.",
                name
            ),
            schedule: Some(watering_schedule(details.water).to_string()),
            importance: Importance::High,
        },
        CareRecommendation {
            title: "Light Positioning".to_string(),
            description: format!(
                "Place your {} in an area with {} light for optimal growth. \
                 Avoid direct sunlight during peak hours to prevent leaf burn.",
                name,
                details.light.label().to_lowercase()
            ),
            schedule: None,
            importance: Importance::Medium,
        },
        CareRecommendation {
            title: "Seasonal Care".to_string(),
            description: "During winter months, reduce watering frequency by about 50% as growth \
                          slows down. Maintain consistent temperature and protect from cold drafts."
                .to_string(),
            schedule: None,
            importance: Importance::Medium,
        },
        CareRecommendation {
            title: "Fertilization Guide".to_string(),
            description: format!(
                "Feed your {} with a balanced, water-soluble fertilizer diluted to half strength \
                 once every 4-6 weeks during growing season.",
                name
            ),
            schedule: Some("Monthly during growing season".to_string()),
            importance: Importance::Low,
        },
    ]
}
