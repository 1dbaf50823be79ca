//! Tests for attribute filters, criteria compilation and limiting.

use super::*;
use crate::core::database::NeoDatabase;
use crate::core::model::{CloseApproach, NearEarthObject};

fn make_neo(designation: &str, diameter: Option<f64>, hazardous: bool) -> NearEarthObject {
    NearEarthObject::new(designation, None, diameter, Some(hazardous))
}

fn make_approach(designation: &str, cd: &str, distance: f64, velocity: f64) -> CloseApproach {
    CloseApproach::new(designation, Some(cd), Some(distance), Some(velocity))
}

/// Five NEOs, two hazardous, one approach each, plus one unresolved approach
/// kept out of the default set.
fn make_db(with_orphan: bool) -> NeoDatabase {
    let neos = vec![
        make_neo("A", Some(0.5), false),
        make_neo("B", Some(1.5), true),
        make_neo("C", None, false),
        make_neo("D", Some(3.0), true),
        make_neo("E", Some(0.1), false),
    ];
    let mut approaches = vec![
        make_approach("A", "2020-Jan-01 00:00", 0.05, 10.0),
        make_approach("B", "2020-Jan-01 23:59", 0.2, 20.0),
        make_approach("C", "2020-Jan-02 12:00", 0.5, 5.0),
        make_approach("D", "2020-Jan-03 08:15", 0.01, 30.0),
        make_approach("E", "2020-Jan-04 00:00", 0.3, 15.0),
    ];
    if with_orphan {
        approaches.push(make_approach("Z", "2020-Jan-05 00:00", 0.1, 1.0));
    }
    NeoDatabase::new(neos, approaches)
}

fn designations(db: &NeoDatabase, filters: &[AttributeFilter]) -> Vec<String> {
    db.query(filters)
        .map(|r| r.expect("filter evaluation").designation.clone())
        .collect()
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_empty_filters_yield_everything_in_order() {
    let db = make_db(true);
    assert_eq!(designations(&db, &[]), vec!["A", "B", "C", "D", "E", "Z"]);
}

#[test]
fn test_date_equal_strips_time_of_day() {
    let db = make_db(false);
    let f = [AttributeFilter::date(Comparison::Equal, ymd(2020, 1, 1))];
    assert_eq!(designations(&db, &f), vec!["A", "B"]);
}

#[test]
fn test_date_range_is_inclusive() {
    let db = make_db(false);
    let criteria = FilterCriteria {
        start_date: Some(ymd(2020, 1, 2)),
        end_date: Some(ymd(2020, 1, 3)),
        ..Default::default()
    };
    assert_eq!(designations(&db, &criteria.create_filters()), vec!["C", "D"]);
}

#[test]
fn test_distance_max() {
    let db = make_db(false);
    let f = [AttributeFilter::distance(Comparison::LessEqual, 0.2)];
    assert_eq!(designations(&db, &f), vec!["A", "B", "D"]);
}

#[test]
fn test_velocity_bounds() {
    let db = make_db(false);
    let criteria = FilterCriteria {
        velocity_min: Some(10.0),
        velocity_max: Some(20.0),
        ..Default::default()
    };
    assert_eq!(designations(&db, &criteria.create_filters()), vec!["A", "B", "E"]);
}

#[test]
fn test_unknown_diameter_never_matches() {
    let db = make_db(false);
    let min = [AttributeFilter::diameter(Comparison::GreaterEqual, 0.0)];
    assert_eq!(designations(&db, &min), vec!["A", "B", "D", "E"]);
    let max = [AttributeFilter::diameter(Comparison::LessEqual, 100.0)];
    assert_eq!(designations(&db, &max), vec!["A", "B", "D", "E"]);
}

#[test]
fn test_not_hazardous_is_a_real_criterion() {
    let db = make_db(false);
    let criteria = FilterCriteria {
        hazardous: Some(false),
        ..Default::default()
    };
    let filters = criteria.create_filters();
    assert_eq!(filters.len(), 1);
    assert_eq!(designations(&db, &filters), vec!["A", "C", "E"]);
}

#[test]
fn test_hazardous_true() {
    let db = make_db(false);
    let criteria = FilterCriteria {
        hazardous: Some(true),
        ..Default::default()
    };
    assert_eq!(designations(&db, &criteria.create_filters()), vec!["B", "D"]);
}

#[test]
fn test_zero_bound_is_not_unspecified() {
    let criteria = FilterCriteria {
        distance_min: Some(0.0),
        ..Default::default()
    };
    assert_eq!(criteria.create_filters().len(), 1);
    assert!(!criteria.is_empty());
    assert!(FilterCriteria::default().create_filters().is_empty());
}

#[test]
fn test_contradictory_criteria_match_nothing() {
    let db = make_db(false);
    let criteria = FilterCriteria {
        date: Some(ymd(2020, 1, 1)),
        start_date: Some(ymd(2020, 1, 3)),
        ..Default::default()
    };
    assert!(designations(&db, &criteria.create_filters()).is_empty());
}

#[test]
fn test_missing_neo_is_attributable_error() {
    let db = make_db(true);
    let f = [AttributeFilter::diameter(Comparison::GreaterEqual, 0.0)];
    let err = db
        .query(&f)
        .find_map(|r| r.err())
        .expect("orphan approach should fail");
    match err {
        NeoError::MissingAttribute { designation, .. } => assert_eq!(designation, "Z"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unparseable_time_fails_date_filter() {
    let neos = vec![make_neo("A", Some(0.5), false), make_neo("B", Some(1.5), true)];
    let approaches = vec![
        make_approach("A", "2020-Jan-01 00:00", 0.05, 10.0),
        make_approach("B", "garbage", 0.2, 20.0),
        make_approach("A", "2020-Jan-03 00:00", 0.3, 12.0),
    ];
    let db = NeoDatabase::new(neos, approaches);
    assert!(db.approaches()[1].time.is_none());

    let criteria = FilterCriteria {
        start_date: Some(ymd(2019, 12, 1)),
        ..Default::default()
    };
    let filters = criteria.create_filters();
    let mut results = db.query(&filters);

    assert_eq!(results.next().unwrap().unwrap().designation, "A");
    match results.next() {
        Some(Err(NeoError::MissingAttribute { designation, .. })) => assert_eq!(designation, "B"),
        other => panic!("expected MissingAttribute for B, got {other:?}"),
    }
    assert!(results.next().is_none());
}

#[test]
fn test_mismatched_value_is_unsupported() {
    let err = AttributeFilter::new(
        Attribute::Diameter,
        Comparison::Equal,
        FilterValue::Date(ymd(2020, 1, 1)),
    )
    .unwrap_err();
    assert!(matches!(err, NeoError::UnsupportedCriterion { .. }));

    let ok = AttributeFilter::new(Attribute::Hazardous, Comparison::Equal, FilterValue::Flag(true));
    assert!(ok.is_ok());
}

#[test]
fn test_filter_display() {
    let f = AttributeFilter::diameter(Comparison::GreaterEqual, 1.5);
    assert_eq!(f.to_string(), "DiameterFilter(op=>=, value=1.5)");
}

#[test]
fn test_criteria_merge_prefers_overrides() {
    let base = FilterCriteria {
        distance_max: Some(0.1),
        hazardous: Some(true),
        ..Default::default()
    };
    let overrides = FilterCriteria {
        hazardous: Some(false),
        ..Default::default()
    };
    let merged = base.merged_with(&overrides);
    assert_eq!(merged.distance_max, Some(0.1));
    assert_eq!(merged.hazardous, Some(false));
}

// ── Limit ───────────────────────────────────────────────────────────────

#[test]
fn test_limit_truncates() {
    let out: Vec<_> = limit(1..=5, Some(3)).collect();
    assert_eq!(out, vec![1, 2, 3]);
}

#[test]
fn test_limit_zero_or_none_is_unlimited() {
    assert_eq!(limit(1..=5, Some(0)).count(), 5);
    assert_eq!(limit(1..=5, None).count(), 5);
}

#[test]
fn test_limit_larger_than_stream() {
    assert_eq!(limit(1..=2, Some(10)).count(), 2);
}

#[test]
fn test_limit_does_not_pull_past_bound() {
    let mut pulled = 0;
    let counted = (0..100).inspect(|_| pulled += 1);
    let out: Vec<_> = limit(counted, Some(2)).collect();
    assert_eq!(out, vec![0, 1]);
    assert_eq!(pulled, 2);
}
