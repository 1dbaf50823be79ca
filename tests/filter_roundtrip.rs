//! Integration tests for filter criteria and query presets.

use chrono::NaiveDate;
use neoscope::core::filter::FilterCriteria;
use neoscope::core::filter_preset::QueryPreset;
use neoscope::{CloseApproach, NearEarthObject, NeoDatabase};

#[test]
fn default_criteria_produce_no_filters() {
    let criteria = FilterCriteria::default();
    assert!(criteria.is_empty());
    assert!(criteria.create_filters().is_empty());
}

#[test]
fn every_criterion_produces_one_filter() {
    let day = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    let criteria = FilterCriteria {
        date: Some(day),
        start_date: Some(day),
        end_date: Some(day),
        distance_min: Some(0.0),
        distance_max: Some(1.0),
        velocity_min: Some(0.0),
        velocity_max: Some(50.0),
        diameter_min: Some(0.0),
        diameter_max: Some(10.0),
        hazardous: Some(false),
    };
    assert_eq!(criteria.create_filters().len(), 10);
}

#[test]
fn not_hazardous_selects_only_non_hazardous_objects() {
    let neos = (0..5)
        .map(|i| NearEarthObject::new(format!("N{i}"), None, Some(1.0), Some(i < 2)))
        .collect();
    let approaches = (0..5)
        .map(|i| CloseApproach::new(format!("N{i}"), Some("2020-Jan-01 00:00"), Some(0.1), Some(5.0)))
        .collect();
    let db = NeoDatabase::new(neos, approaches);

    let criteria = FilterCriteria {
        hazardous: Some(false),
        ..Default::default()
    };
    let filters = criteria.create_filters();
    let hits: Vec<String> = db
        .query(&filters)
        .map(|r| r.unwrap().designation.clone())
        .collect();
    assert_eq!(hits, vec!["N2", "N3", "N4"]);
}

#[test]
fn preset_file_roundtrip_preserves_criteria() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("close.json");

    let criteria = FilterCriteria {
        start_date: NaiveDate::from_ymd_opt(2020, 1, 1),
        distance_max: Some(0.1),
        hazardous: Some(false),
        ..Default::default()
    };
    QueryPreset::new("close", criteria.clone(), Some(20))
        .save(&path)
        .unwrap();

    let restored = QueryPreset::load(&path).unwrap();
    assert_eq!(restored.name, "close");
    assert_eq!(restored.criteria, criteria);
    assert_eq!(restored.limit, Some(20));
}

#[test]
fn preset_overrides_take_precedence() {
    let preset = QueryPreset::new(
        "base",
        FilterCriteria {
            velocity_min: Some(5.0),
            hazardous: Some(true),
            ..Default::default()
        },
        None,
    );
    let overrides = FilterCriteria {
        hazardous: Some(false),
        ..Default::default()
    };
    let merged = preset.criteria_with(&overrides);
    assert_eq!(merged.velocity_min, Some(5.0));
    assert_eq!(merged.hazardous, Some(false));
}

#[test]
fn invalid_preset_is_a_load_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = QueryPreset::load(&path).unwrap_err();
    assert!(matches!(err, neoscope::NeoError::Load(_)), "got: {err}");
}
