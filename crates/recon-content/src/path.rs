//! Dotted path parsing and traversal
//!
//! Settings are addressed with dot-separated paths such as
//! `security.ldap.enabled`. This module folds a flat list of such settings
//! into a nested document ([`undot`]) and looks values up in an arbitrary
//! document ([`dig`]).
//!
//! # Examples
//!
//! ```
//! use recon_content::{Setting, dig, undot};
//! use serde_yaml::Value;
//!
//! let settings = vec![Setting::new("a.b.c", 1), Setting::new("a.b.d", 2)];
//! let tree = Value::Mapping(undot(&settings));
//!
//! assert_eq!(dig(&tree, &["a", "b", "c"]).unwrap(), Some(&Value::from(1)));
//! assert_eq!(dig(&tree, &["a", "x"]).unwrap(), None);
//! ```

use serde_yaml::{Mapping, Value};

use crate::setting::Setting;

/// Lookup failure: a path tried to descend through a value that is not a mapping.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("cannot descend into {found} at '{at}'")]
pub struct DigError {
    /// The path prefix that resolved to the non-mapping value.
    pub at: String,
    /// What was found there (`string`, `sequence`, ...).
    pub found: &'static str,
}

/// Split a dotted path into its segments.
///
/// Every `.` is a separator; empty segments are kept as empty keys.
///
/// ```
/// use recon_content::split_path;
///
/// assert_eq!(split_path("security.ldap.enabled"), vec!["security", "ldap", "enabled"]);
/// assert_eq!(split_path("name"), vec!["name"]);
/// ```
pub fn split_path(path: &str) -> Vec<&str> {
    path.split('.').collect()
}

/// Descend `tree` one segment at a time.
///
/// Returns `Ok(None)` when a key is absent or an intermediate value is null,
/// and a [`DigError`] when an intermediate value is a scalar or a sequence.
pub fn dig<'a, S: AsRef<str>>(
    tree: &'a Value,
    segments: &[S],
) -> std::result::Result<Option<&'a Value>, DigError> {
    let mut node = tree;

    for (depth, segment) in segments.iter().enumerate() {
        node = match untagged(node) {
            Value::Mapping(map) => match map.get(segment.as_ref()) {
                Some(child) => child,
                None => return Ok(None),
            },
            Value::Null => return Ok(None),
            other => {
                return Err(DigError {
                    at: join_segments(&segments[..depth]),
                    found: kind(other),
                });
            }
        };
    }

    Ok(Some(node))
}

/// Fold dotted settings into a nested mapping.
///
/// Intermediate mappings are created on demand and reused when revisited.
/// When paths collide the last setting processed wins: descending through an
/// existing scalar replaces it with a mapping, and assigning a leaf over an
/// existing mapping replaces the mapping. Both cases are logged as warnings.
pub fn undot<'a>(settings: impl IntoIterator<Item = &'a Setting>) -> Mapping {
    let mut root = Mapping::new();

    'settings: for setting in settings {
        let segments = setting.segments();
        let Some((leaf, parents)) = segments.split_last() else {
            continue;
        };

        let mut node = &mut root;
        for (depth, key) in parents.iter().enumerate() {
            let entry = node
                .entry(Value::String((*key).to_string()))
                .or_insert_with(|| Value::Mapping(Mapping::new()));

            if !entry.is_mapping() {
                tracing::warn!(
                    path = %setting.path,
                    at = %parents[..=depth].join("."),
                    "Dotted path descends through a scalar, replacing it with a mapping"
                );
                *entry = Value::Mapping(Mapping::new());
            }

            let Some(map) = entry.as_mapping_mut() else {
                continue 'settings;
            };
            node = map;
        }

        if node.get(*leaf).is_some_and(Value::is_mapping) {
            tracing::warn!(
                path = %setting.path,
                "Setting overwrites a mapping created by a longer dotted path"
            );
        }
        node.insert(Value::String((*leaf).to_string()), setting.value.clone());
    }

    root
}

/// Human-readable name of a value's kind, used in diagnostics.
pub(crate) fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Sequence(_) => "sequence",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

fn untagged(value: &Value) -> &Value {
    match value {
        Value::Tagged(tagged) => untagged(&tagged.value),
        other => other,
    }
}

fn join_segments<S: AsRef<str>>(segments: &[S]) -> String {
    segments
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(".")
}
