//! Growth plans
//!
//! Three fixed plans plus a location-flavoured AI plan. Every plan runs over
//! the same 16-week phase layout; progress is reported against it.

use crate::location::Location;
use crate::types::Difficulty;
use serde::{Deserialize, Serialize};

pub const TOTAL_WEEKS: u32 = 16;

/// Id of the generated plan
pub const AI_PLAN_ID: &str = "ai";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPlan {
    pub id: String,
    pub name: String,
    pub description: String,
    pub duration_months: u32,
    /// None for the AI plan ("Custom")
    pub difficulty: Option<Difficulty>,
    pub minutes_per_week: u32,
    pub features: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPhase {
    pub name: String,
    pub first_week: u32,
    pub last_week: u32,
    pub tasks: Vec<PhaseTask>,
}

impl GrowthPhase {
    pub fn contains(&self, week: u32) -> bool {
        (self.first_week..=self.last_week).contains(&week)
    }

    /// "Week 3-6: Vegetative Growth"
    pub fn heading(&self) -> String {
        format!("Week {}-{}: {}", self.first_week, self.last_week, self.name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PhaseTask {
    pub task: String,
    pub detail: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanProgress {
    pub week: u32,
    pub total_weeks: u32,
    pub percent: f64,
    pub phase: String,
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn plan(
    id: &str,
    name: &str,
    description: &str,
    duration_months: u32,
    difficulty: Difficulty,
    minutes_per_week: u32,
    features: &[&str],
) -> GrowthPlan {
    GrowthPlan {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        duration_months,
        difficulty: Some(difficulty),
        minutes_per_week,
        features: strings(features),
    }
}

/// Beginner, Optimal Growth and Expert Cultivation
pub fn standard_plans() -> Vec<GrowthPlan> {
    vec![
        plan(
            "beginner",
            "Beginner Plan",
            "Simple care routine for new gardeners",
            3,
            Difficulty::Easy,
            5,
            &["Basic watering schedule", "Simple light management", "Minimal maintenance"],
        ),
        plan(
            "optimal",
            "Optimal Growth",
            "Balanced plan for healthy, productive plants",
            4,
            Difficulty::Medium,
            15,
            &["Optimized watering", "Fertilization schedule", "Pruning guidance"],
        ),
        plan(
            "expert",
            "Expert Cultivation",
            "Advanced techniques for maximum yield",
            5,
            Difficulty::Hard,
            30,
            &["Precision watering", "Advanced nutrient management", "Strategic pruning"],
        ),
    ]
}

/// Personalized plan for the user's location
pub fn ai_plan(location: &Location) -> GrowthPlan {
    GrowthPlan {
        id: AI_PLAN_ID.to_string(),
        name: "AI-Generated Plan".to_string(),
        description: "Personalized plan based on your location and plant needs".to_string(),
        duration_months: 4,
        difficulty: None,
        minutes_per_week: 10,
        features: vec![
            "Climate-optimized watering schedule".to_string(),
            format!("Seasonal adjustments for {}", location.country),
            "Personalized care reminders".to_string(),
        ],
    }
}

/// Look up a plan by id; `ai` resolves against `location`
pub fn find_plan(id: &str, location: &Location) -> Option<GrowthPlan> {
    if id == AI_PLAN_ID {
        return Some(ai_plan(location));
    }
    standard_plans().into_iter().find(|p| p.id == id)
}

fn phase(name: &str, first_week: u32, last_week: u32, tasks: &[(&str, &str)]) -> GrowthPhase {
    GrowthPhase {
        name: name.to_string(),
        first_week,
        last_week,
        tasks: tasks
            .iter()
            .map(|(task, detail)| PhaseTask {
                task: task.to_string(),
                detail: detail.to_string(),
            })
            .collect(),
    }
}

/// The four phases covering weeks 1-16, in order
pub fn growth_phases() -> Vec<GrowthPhase> {
    vec![
        phase(
            "Seedling",
            1,
            2,
            &[
                ("Keep soil consistently moist", "Water when top 1cm of soil feels dry"),
                ("Provide 6 hours of indirect sunlight", "Morning sun is ideal"),
            ],
        ),
        phase(
            "Vegetative Growth",
            3,
            6,
            &[
                ("Begin fertilizing with diluted solution", "Half-strength, once every two weeks"),
                (
                    "Pinch tops to encourage bushier growth",
                    "Remove top set of leaves when plant has 3-4 sets",
                ),
            ],
        ),
        phase(
            "Mature Growth",
            7,
            12,
            &[
                ("Begin regular harvesting", "Take leaves from the top, never more than 1/3 of plant"),
                ("Increase water during hot periods", "Monitor soil moisture daily in summer"),
            ],
        ),
        phase(
            "Peak Harvest",
            13,
            16,
            &[
                ("Remove flower buds immediately", "Prevents bitter taste in leaves"),
                ("Consider propagation", "Take cuttings to grow new plants"),
            ],
        ),
    ]
}

/// Progress through the 16-week layout. `week` is clamped to 1..=16.
pub fn plan_progress(week: u32) -> PlanProgress {
    let week = week.clamp(1, TOTAL_WEEKS);
    let phase = growth_phases()
        .into_iter()
        .find(|p| p.contains(week))
        .map(|p| p.name)
        .unwrap_or_default();

    PlanProgress {
        week,
        total_weeks: TOTAL_WEEKS,
        percent: f64::from(week) / f64::from(TOTAL_WEEKS) * 100.0,
        phase,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::location::tunis;
    use approx::assert_relative_eq;

    #[test]
    fn test_standard_plans() {
        let plans = standard_plans();
        let ids: Vec<_> = plans.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["beginner", "optimal", "expert"]);
        assert_eq!(plans.iter().map(|p| p.minutes_per_week).collect::<Vec<_>>(), vec![5, 15, 30]);
    }

    #[test]
    fn test_ai_plan_mentions_country() {
        let plan = find_plan("ai", &tunis()).unwrap();
        assert_eq!(plan.difficulty, None);
        assert!(plan.features.contains(&"Seasonal adjustments for Tunisia".to_string()));
        assert!(find_plan("hydroponic", &tunis()).is_none());
    }

    #[test]
    fn test_phases_cover_all_weeks() {
        let phases = growth_phases();
        for week in 1..=TOTAL_WEEKS {
            let hits = phases.iter().filter(|p| p.contains(week)).count();
            assert_eq!(hits, 1, "week {}", week);
        }
        assert_eq!(phases[1].heading(), "Week 3-6: Vegetative Growth");
    }

    #[test]
    fn test_progress() {
        let progress = plan_progress(2);
        assert_relative_eq!(progress.percent, 12.5);
        assert_eq!(progress.phase, "Seedling");

        assert_eq!(plan_progress(0).week, 1);
        let last = plan_progress(40);
        assert_eq!(last.week, 16);
        assert_eq!(last.phase, "Peak Harvest");
        assert_relative_eq!(last.percent, 100.0);
    }
}
