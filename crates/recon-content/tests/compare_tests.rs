//! Tests for coercion-aware comparison

use proptest::prelude::*;
use recon_content::{Mismatch, differs, differs_at, documents_match, mismatches, yaml};
use recon_test_utils::logs::capture_warnings;
use serde_yaml::Value;

#[test]
fn test_integer_round_tripped_through_string_matches() {
    let observed = yaml::parse("access:\n  token:\n    expiry: \"3600\"\n").unwrap();
    assert!(!differs_at(&Value::from(3600), &observed, &["access", "token", "expiry"]));
}

#[test]
fn test_non_integer_string_falls_back_to_plain_comparison() {
    assert!(differs(&Value::from(5), &Value::from("six")));
}

#[test]
fn test_documents_differ_on_extra_actual_key() {
    let desired = yaml::parse("a: 1\n").unwrap();
    let actual = yaml::parse("a: 1\nb: 2\n").unwrap();

    assert!(!documents_match(&desired, &actual));
    assert_eq!(
        mismatches(&desired, &actual),
        vec![Mismatch::Unexpected {
            path: "b".to_string()
        }]
    );
}

#[test]
fn test_sequences_compare_elementwise_with_coercion() {
    let desired = yaml::parse("ports: [80, 443]\n").unwrap();
    let actual = yaml::parse("ports: [\"80\", \"443\"]\n").unwrap();
    assert!(documents_match(&desired, &actual));

    let reordered = yaml::parse("ports: [\"443\", \"80\"]\n").unwrap();
    assert!(!documents_match(&desired, &reordered));
}

#[test]
fn test_lookup_through_scalar_differs_and_warns() {
    let observed = yaml::parse("access: disabled\n").unwrap();

    let (differs, logs) =
        capture_warnings(|| differs_at(&Value::from(60), &observed, &["access", "token", "expiry"]));

    assert!(differs);
    let warnings = logs.warnings();
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("access"));
}

#[test]
fn test_lookup_of_missing_key_does_not_warn() {
    let observed = yaml::parse("other: 1\n").unwrap();
    let (differs, logs) = capture_warnings(|| differs_at(&Value::from(60), &observed, &["a", "b"]));

    assert!(differs);
    assert!(logs.warnings().is_empty());
}

#[test]
fn test_coercion_is_limited_to_decimal_integer_strings() {
    assert!(!differs(&Value::from(16), &Value::from(" 16 ")));
    assert!(!differs(&Value::from(-3), &Value::from("-3")));
    assert!(differs(&Value::from(16), &Value::from("0x10")));
    assert!(differs(&Value::from(1000), &Value::from("1_000")));
    assert!(differs(&Value::from(5), &Value::from(5.0)));
}

proptest! {
    #[test]
    fn prop_integer_matches_its_decimal_string(n in any::<i64>()) {
        prop_assert!(!differs(&Value::from(n), &Value::from(n.to_string())));
    }

    #[test]
    fn prop_integer_differs_from_other_integer_strings(a in any::<i64>(), b in any::<i64>()) {
        prop_assume!(a != b);
        prop_assert!(differs(&Value::from(a), &Value::from(b.to_string())));
    }
}
