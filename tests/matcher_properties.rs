//! Matcher Property Tests
//!
//! Sweeps slider positions and toggle combinations over the default catalog
//! and checks the filtering, scoring and ordering guarantees for each.

use plantpal::matcher::rule_violations;
use plantpal::{
    apply_filters, default_catalog, remove_filter, reset_filters, FixedJitter, Level,
    PlantType, PreferenceCriteria, RandomJitter,
};
use std::collections::BTreeSet;

const SLIDER_STEPS: &[f64] = &[0.0, 20.0, 32.0, 33.0, 50.0, 65.0, 66.0, 90.0, 100.0];

/// Every combination of sliders, toggles and a few type selections
fn criteria_grid() -> Vec<PreferenceCriteria> {
    let type_sets: Vec<Vec<PlantType>> = vec![
        vec![],
        vec![PlantType::Herb],
        vec![PlantType::Succulent, PlantType::Flower],
        PlantType::ALL.to_vec(),
    ];

    let mut grid = Vec::new();
    for &light in SLIDER_STEPS {
        for &water in SLIDER_STEPS {
            for indoor_only in [false, true] {
                for edible_only in [false, true] {
                    for types in &type_sets {
                        grid.push(PreferenceCriteria {
                            light_requirement: light,
                            water_requirement: water,
                            indoor_only,
                            edible_only,
                            selected_types: types.clone(),
                        });
                    }
                }
            }
        }
    }
    grid
}

#[test]
fn test_kept_plants_satisfy_rules_and_excluded_violate_one() {
    let catalog = default_catalog();

    for criteria in criteria_grid() {
        let result = apply_filters(&catalog, &criteria, &mut FixedJitter::constant(7));
        let kept: BTreeSet<&str> = result.names().into_iter().collect();

        for plant in &catalog {
            let violations = rule_violations(plant, &criteria);
            assert_eq!(
                violations.is_empty(),
                kept.contains(plant.name.as_str()),
                "{} under {:?}: {:?}",
                plant.name,
                criteria,
                violations
            );
        }

        for scored in &result.plants {
            let p = &scored.plant;
            if criteria.indoor_only {
                assert!(p.indoor);
            }
            if criteria.edible_only {
                assert!(p.plant_type.is_edible());
            }
            if !criteria.selected_types.is_empty() {
                assert!(criteria.selected_types.contains(&p.plant_type));
            }
            assert!(p.light.steps_to(criteria.light_level()) <= 1);
            assert!(p.water.steps_to(criteria.water_level()) <= 1);
        }
    }
}

#[test]
fn test_filtering_decision_is_repeatable() {
    let catalog = default_catalog();

    for (i, criteria) in criteria_grid().iter().enumerate() {
        let first = apply_filters(&catalog, criteria, &mut RandomJitter::seeded(i as u64));
        let second = apply_filters(&catalog, criteria, &mut RandomJitter::seeded(i as u64 + 10_000));

        let a: BTreeSet<_> = first.names().into_iter().collect();
        let b: BTreeSet<_> = second.names().into_iter().collect();
        assert_eq!(a, b);
        assert_eq!(first.active_filters, second.active_filters);
    }
}

#[test]
fn test_scores_in_range_and_sorted() {
    let catalog = default_catalog();

    for (i, criteria) in criteria_grid().iter().enumerate() {
        let result = apply_filters(&catalog, criteria, &mut RandomJitter::seeded(i as u64));

        for scored in &result.plants {
            match scored.plant.featured_match {
                Some(featured) => {
                    assert!(scored.precomputed);
                    assert_eq!(scored.score, featured);
                }
                None => {
                    assert!(!scored.precomputed);
                    assert!((80..=99).contains(&scored.score.value()));
                }
            }
        }

        for pair in result.plants.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }
}

#[test]
fn test_equal_scores_keep_catalog_order() {
    let catalog = default_catalog();
    let position = |name: &str| catalog.iter().position(|p| p.name == name).unwrap();

    for criteria in criteria_grid() {
        let result = apply_filters(&catalog, &criteria, &mut FixedJitter::constant(0));
        for pair in result.plants.windows(2) {
            if pair[0].score == pair[1].score {
                assert!(position(&pair[0].plant.name) < position(&pair[1].plant.name));
            }
        }
    }
}

#[test]
fn test_active_filter_order() {
    let criteria = PreferenceCriteria {
        light_requirement: 10.0,
        water_requirement: 95.0,
        indoor_only: true,
        edible_only: true,
        selected_types: vec![PlantType::Fruit, PlantType::Herb],
    };
    assert_eq!(
        criteria.active_filters(),
        vec!["Indoor", "Edible", "Fruit", "Herb", "Low Light", "High Water"]
    );
}

#[test]
fn test_every_active_filter_label_is_removable() {
    for criteria in criteria_grid() {
        for label in criteria.active_filters() {
            let updated = remove_filter(&criteria, &label);
            assert!(
                !updated.active_filters().contains(&label) || label == "Low Water",
                "{} still active after removal",
                label
            );
        }
    }
}

#[test]
fn test_removing_water_filter_resets_to_low_default() {
    let criteria = PreferenceCriteria {
        water_requirement: 90.0,
        ..reset_filters()
    };
    let updated = remove_filter(&criteria, "High Water");
    assert_eq!(updated.water_requirement, 25.0);
    assert_eq!(updated.water_level(), Level::Low);
    assert!(updated.active_filters().contains(&"Low Water".to_string()));
}

#[test]
fn test_removing_indoor_admits_outdoor_plants() {
    let catalog = default_catalog();
    let criteria = PreferenceCriteria {
        selected_types: vec![],
        water_requirement: 50.0,
        ..reset_filters()
    };

    let before = apply_filters(&catalog, &criteria, &mut FixedJitter::constant(0));
    assert!(before.plants.iter().all(|p| p.plant.indoor));

    let after = apply_filters(
        &catalog,
        &remove_filter(&criteria, "Indoor"),
        &mut FixedJitter::constant(0),
    );
    let names = after.names();
    assert!(names.contains(&"Tomato"));
    assert!(names.contains(&"Strawberry"));
}

#[test]
fn test_reset_literal_defaults() {
    let json = serde_json::to_value(reset_filters()).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "lightRequirement": 50.0,
            "waterRequirement": 25.0,
            "indoorOnly": true,
            "edibleOnly": false,
            "selectedTypes": ["Herb"],
        })
    );
}
