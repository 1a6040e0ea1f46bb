//! Desired settings addressed by dotted path

use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::path::split_path;

/// A single desired setting, e.g. `security.ldap.enabled = true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Setting {
    /// Dotted location of the setting. There is no escaping for literal dots.
    pub path: String,
    /// The desired scalar value.
    pub value: Value,
}

impl Setting {
    pub fn new(path: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            path: path.into(),
            value: value.into(),
        }
    }

    /// The path split into its segments.
    pub fn segments(&self) -> Vec<&str> {
        split_path(&self.path)
    }
}
