//! Coercion-aware value comparison
//!
//! The downstream consumer imports integer settings and writes them back as
//! strings, so `5` on the desired side matches `"5"` on the observed side.
//! The rule is deliberately narrow: only an integer expected value is coerced,
//! and only against a string that parses as an integer. Floats and booleans
//! compare with plain equality.

use serde_yaml::Value;

use crate::path::{dig, kind};

/// Maximum recursion depth for document comparison
const MAX_COMPARE_DEPTH: usize = 128;

/// Returns `true` when `expected` does not match `actual`.
///
/// A missing observed value should be passed as [`Value::Null`].
///
/// ```
/// use recon_content::differs;
/// use serde_yaml::Value;
///
/// assert!(!differs(&Value::from(5), &Value::from("5")));
/// assert!(differs(&Value::from(5), &Value::from("six")));
/// assert!(!differs(&Value::from("5"), &Value::from("5")));
/// ```
pub fn differs(expected: &Value, actual: &Value) -> bool {
    !leaf_matches(expected, actual)
}

/// Look `segments` up in `observed` and compare the result with `expected`.
///
/// A lookup that has to descend through a scalar or a sequence counts as a
/// difference, so the caller rewrites rather than silently skipping.
pub fn differs_at<S: AsRef<str>>(expected: &Value, observed: &Value, segments: &[S]) -> bool {
    match dig(observed, segments) {
        Ok(actual) => differs(expected, actual.unwrap_or(&Value::Null)),
        Err(e) => {
            tracing::warn!("Cannot look up observed value: {}", e);
            true
        }
    }
}

/// A position where two documents disagree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mismatch {
    /// Present in the desired document, absent from the actual one
    Missing { path: String },
    /// Present in the actual document only
    Unexpected { path: String },
    /// Present in both with different values or shapes
    Differs { path: String },
}

impl Mismatch {
    pub fn path(&self) -> &str {
        match self {
            Self::Missing { path } | Self::Unexpected { path } | Self::Differs { path } => path,
        }
    }
}

/// Deep structural equality with the integer/string coercion applied at every leaf.
pub fn documents_match(desired: &Value, actual: &Value) -> bool {
    mismatches(desired, actual).is_empty()
}

/// Collect every position where `actual` disagrees with `desired`.
///
/// Paths use the dotted notation, with `[i]` for sequence elements. Only
/// paths are recorded so the result is safe to log for secret documents.
pub fn mismatches(desired: &Value, actual: &Value) -> Vec<Mismatch> {
    let mut found = Vec::new();
    collect_mismatches(desired, actual, String::new(), &mut found, 0);
    found
}

fn collect_mismatches(
    desired: &Value,
    actual: &Value,
    path: String,
    found: &mut Vec<Mismatch>,
    depth: usize,
) {
    if depth > MAX_COMPARE_DEPTH {
        if desired != actual {
            found.push(Mismatch::Differs { path });
        }
        return;
    }

    match (desired, actual) {
        (Value::Mapping(desired_map), Value::Mapping(actual_map)) => {
            for (key, desired_value) in desired_map {
                let child_path = child_key_path(&path, key);
                match actual_map.get(key) {
                    Some(actual_value) => collect_mismatches(
                        desired_value,
                        actual_value,
                        child_path,
                        found,
                        depth + 1,
                    ),
                    None => found.push(Mismatch::Missing { path: child_path }),
                }
            }

            for key in actual_map.keys() {
                if !desired_map.contains_key(key) {
                    found.push(Mismatch::Unexpected {
                        path: child_key_path(&path, key),
                    });
                }
            }
        }

        (Value::Sequence(desired_seq), Value::Sequence(actual_seq)) => {
            for (i, (d, a)) in desired_seq.iter().zip(actual_seq).enumerate() {
                collect_mismatches(d, a, format!("{}[{}]", path, i), found, depth + 1);
            }

            let common = desired_seq.len().min(actual_seq.len());
            for i in common..desired_seq.len() {
                found.push(Mismatch::Missing {
                    path: format!("{}[{}]", path, i),
                });
            }
            for i in common..actual_seq.len() {
                found.push(Mismatch::Unexpected {
                    path: format!("{}[{}]", path, i),
                });
            }
        }

        (Value::Tagged(desired_tagged), Value::Tagged(actual_tagged))
            if desired_tagged.tag == actual_tagged.tag =>
        {
            collect_mismatches(
                &desired_tagged.value,
                &actual_tagged.value,
                path,
                found,
                depth + 1,
            );
        }

        _ => {
            if !leaf_matches(desired, actual) {
                found.push(Mismatch::Differs { path });
            }
        }
    }
}

fn leaf_matches(expected: &Value, actual: &Value) -> bool {
    if expected == actual {
        return true;
    }

    match (as_integer(expected), actual) {
        (Some(wanted), Value::String(s)) => parse_integer(s) == Some(wanted),
        _ => false,
    }
}

fn as_integer(value: &Value) -> Option<i128> {
    match value {
        Value::Number(n) if n.is_i64() => n.as_i64().map(i128::from),
        Value::Number(n) if n.is_u64() => n.as_u64().map(i128::from),
        _ => None,
    }
}

/// Parse a decimal integer with an optional sign, ignoring surrounding whitespace.
fn parse_integer(s: &str) -> Option<i128> {
    s.trim().parse().ok()
}

fn child_key_path(parent: &str, key: &Value) -> String {
    let key = match key {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        other => format!("<{}>", kind(other)),
    };

    if parent.is_empty() {
        key
    } else {
        format!("{}.{}", parent, key)
    }
}
