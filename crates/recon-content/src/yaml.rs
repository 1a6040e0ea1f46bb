//! YAML parsing and rendering using serde_yaml

use serde_yaml::Value;

use crate::error::{Error, Result};

/// Parse YAML source into a document.
///
/// Empty input parses to [`Value::Null`].
pub fn parse(source: &str) -> Result<Value> {
    serde_yaml::from_str(source).map_err(|e| Error::parse("YAML", e.to_string()))
}

/// Render a document as YAML text.
pub fn render(value: &Value) -> Result<String> {
    serde_yaml::to_string(value).map_err(|e| Error::render("YAML", e.to_string()))
}
