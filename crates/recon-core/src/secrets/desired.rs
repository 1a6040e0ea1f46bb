//! Desired documents that may contain sensitive values

use serde_yaml::{Mapping, Value};

/// A desired document as declared by the host.
///
/// Any subtree may be wrapped as [`Desired::Sensitive`]; the wrapper marks
/// content that must not appear in diffs or reports.
#[derive(Debug, Clone, PartialEq)]
pub enum Desired {
    /// A plain subtree with no sensitive values inside
    Plain(Value),
    Sequence(Vec<Desired>),
    Mapping(Vec<(Value, Desired)>),
    Sensitive(Box<Desired>),
}

impl Desired {
    pub fn sensitive(inner: impl Into<Desired>) -> Self {
        Self::Sensitive(Box::new(inner.into()))
    }

    /// Build a mapping from string keys.
    pub fn mapping<K: Into<String>>(entries: impl IntoIterator<Item = (K, Desired)>) -> Self {
        Self::Mapping(
            entries
                .into_iter()
                .map(|(k, v)| (Value::String(k.into()), v))
                .collect(),
        )
    }
}

impl From<Value> for Desired {
    fn from(value: Value) -> Self {
        Self::Plain(value)
    }
}

/// Whether any part of a document was marked sensitive
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Sensitivity {
    #[default]
    Public,
    Sensitive,
}

impl Sensitivity {
    pub fn is_sensitive(self) -> bool {
        self == Self::Sensitive
    }

    fn or(self, other: Self) -> Self {
        if self.is_sensitive() || other.is_sensitive() {
            Self::Sensitive
        } else {
            Self::Public
        }
    }
}

/// Strip every sensitive wrapper, reporting whether any was found.
pub fn unwrap_sensitive(desired: &Desired) -> (Value, Sensitivity) {
    match desired {
        Desired::Plain(value) => (value.clone(), Sensitivity::Public),
        Desired::Sensitive(inner) => {
            let (value, _) = unwrap_sensitive(inner);
            (value, Sensitivity::Sensitive)
        }
        Desired::Sequence(items) => {
            let mut sensitivity = Sensitivity::Public;
            let values = items
                .iter()
                .map(|item| {
                    let (value, item_sensitivity) = unwrap_sensitive(item);
                    sensitivity = sensitivity.or(item_sensitivity);
                    value
                })
                .collect();
            (Value::Sequence(values), sensitivity)
        }
        Desired::Mapping(entries) => {
            let mut sensitivity = Sensitivity::Public;
            let mut map = Mapping::new();
            for (key, item) in entries {
                let (value, item_sensitivity) = unwrap_sensitive(item);
                sensitivity = sensitivity.or(item_sensitivity);
                map.insert(key.clone(), value);
            }
            (Value::Mapping(map), sensitivity)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_document_is_public() {
        let value: Value = serde_yaml::from_str("a:\n  b: 1\n").unwrap();
        let (unwrapped, sensitivity) = unwrap_sensitive(&Desired::from(value.clone()));
        assert_eq!(unwrapped, value);
        assert_eq!(sensitivity, Sensitivity::Public);
    }

    #[test]
    fn test_deeply_nested_sensitive_value() {
        let desired = Desired::mapping([(
            "shared",
            Desired::mapping([
                ("user", Desired::from(Value::from("admin"))),
                (
                    "passwords",
                    Desired::Sequence(vec![
                        Desired::from(Value::from("public")),
                        Desired::sensitive(Value::from("hunter2")),
                    ]),
                ),
            ]),
        )]);

        let (unwrapped, sensitivity) = unwrap_sensitive(&desired);
        let expected: Value =
            serde_yaml::from_str("shared:\n  user: admin\n  passwords:\n    - public\n    - hunter2\n")
                .unwrap();

        assert_eq!(unwrapped, expected);
        assert!(sensitivity.is_sensitive());
    }

    #[test]
    fn test_sensitive_root() {
        let desired = Desired::sensitive(Desired::mapping([("a", Desired::from(Value::from(1)))]));
        let (unwrapped, sensitivity) = unwrap_sensitive(&desired);
        assert_eq!(unwrapped["a"], Value::from(1));
        assert_eq!(sensitivity, Sensitivity::Sensitive);
    }
}
