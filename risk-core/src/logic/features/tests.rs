//! Tests for attribute parsing and feature derivation

use super::{derive_features, EmployeeAttributes, FeatureVector, Performance};

#[test]
fn test_performance_scores() {
    assert_eq!(Performance::Excellent.score(), 3);
    assert_eq!(Performance::Good.score(), 2);
    assert_eq!(Performance::Average.score(), 1);
    assert_eq!(Performance::BelowAverage.score(), 0);

    for perf in Performance::ALL {
        assert_eq!(Performance::from_label(perf.as_str()), Some(perf));
    }
}

#[test]
fn test_performance_mapping_through_deriver() {
    let expected = [("Excellent", 3), ("Good", 2), ("Average", 1), ("Below Average", 0)];

    for (label, score) in expected {
        let attrs = EmployeeAttributes {
            performance: Some(label.to_string()),
            ..Default::default()
        };
        assert_eq!(derive_features(&attrs).performance_score(), score, "label {label}");
    }
}

#[test]
fn test_unrecognized_performance_defaults_to_one() {
    for label in ["Outstanding", "excellent", "", "Below  Average"] {
        let attrs = EmployeeAttributes {
            performance: Some(label.to_string()),
            ..Default::default()
        };
        assert_eq!(derive_features(&attrs).performance_score(), 1, "label {label:?}");
    }
}

#[test]
fn test_missing_fields_use_defaults() {
    let features = derive_features(&EmployeeAttributes::default());
    assert_eq!(features, FeatureVector::new(0, 30_000, 1, 0));
}

#[test]
fn test_absent_employee_scenario() {
    let attrs = EmployeeAttributes::new(1, 45_000, Performance::Average, 6, false);
    assert_eq!(derive_features(&attrs), FeatureVector::new(1, 45_000, 1, 6));
}

#[test]
fn test_excellent_employee_scenario() {
    let attrs = EmployeeAttributes::new(5, 50_000, Performance::Excellent, 1, false);
    let features = derive_features(&attrs);
    assert_eq!(features.as_array(), &[5, 50_000, 3, 1]);
    assert_eq!(features.get_by_name("salary"), Some(50_000));
}

#[test]
fn test_performance_serde_label() {
    let json = serde_json::to_string(&Performance::BelowAverage).unwrap();
    assert_eq!(json, "\"Below Average\"");

    let attrs: EmployeeAttributes =
        serde_json::from_str(r#"{"salary": 41000, "performance": "Good"}"#).unwrap();
    assert_eq!(derive_features(&attrs), FeatureVector::new(0, 41_000, 2, 0));
}

#[test]
fn test_log_entry_uses_layout_names() {
    let entry = FeatureVector::new(2, 40_000, 3, 1).to_log_entry();
    assert_eq!(entry["tenure_years"], 2);
    assert_eq!(entry["absence_count"], 1);
}
