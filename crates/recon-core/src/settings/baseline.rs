//! Loading the observed baseline document

use recon_content::yaml;
use serde_yaml::{Mapping, Value};
use std::path::Path;

use crate::file::{ReadOutcome, read_optional};

/// Load the baseline at `path`, never failing.
///
/// A missing file is expected before the first apply and is treated as an
/// empty document. Unreadable or unparseable files, and documents whose root
/// is not a mapping, are treated as empty too, with a warning: re-patching
/// every setting is always safe.
pub fn load_baseline(path: &Path) -> Value {
    let empty = || Value::Mapping(Mapping::new());

    let source = match read_optional(path) {
        Ok(ReadOutcome::Present(source)) => source,
        Ok(ReadOutcome::Absent) => {
            tracing::info!(
                path = %path.display(),
                "Baseline not found. Treating as empty document."
            );
            return empty();
        }
        Err(e) => {
            tracing::warn!("Error reading baseline: {}", e);
            return empty();
        }
    };

    match yaml::parse(&source) {
        Ok(document @ Value::Mapping(_)) => document,
        Ok(Value::Null) => empty(),
        Ok(_) => {
            tracing::warn!(
                path = %path.display(),
                "Baseline root is not a mapping. Treating as empty document."
            );
            empty()
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), "Error parsing baseline: {}", e);
            empty()
        }
    }
}
