//! Minimal patch between desired settings and an observed document

use recon_content::{Result, Setting, differs_at, undot, yaml};
use serde_yaml::{Mapping, Value};

/// Outcome of planning one settings patch
#[derive(Debug, Clone, PartialEq)]
pub enum PatchDecision {
    /// Every desired setting already matches; no patch file should exist.
    NoPatch,
    /// Nested document holding only the settings that differ.
    Patch(Mapping),
}

impl PatchDecision {
    pub fn is_no_patch(&self) -> bool {
        matches!(self, Self::NoPatch)
    }

    /// Serialized patch content, `None` when no patch is needed.
    pub fn render(&self) -> Result<Option<String>> {
        match self {
            Self::NoPatch => Ok(None),
            Self::Patch(patch) => yaml::render(&Value::Mapping(patch.clone())).map(Some),
        }
    }
}

/// Keep the settings that differ from `observed` and fold them into a tree.
pub fn plan(desired: &[Setting], observed: &Value) -> PatchDecision {
    let changed: Vec<&Setting> = desired
        .iter()
        .filter(|setting| differs_at(&setting.value, observed, &setting.segments()))
        .collect();

    // Paths only: values may be secrets
    tracing::debug!(
        paths = ?changed.iter().map(|s| s.path.as_str()).collect::<Vec<_>>(),
        "Values to set"
    );

    let patch = undot(changed);
    if patch.is_empty() {
        PatchDecision::NoPatch
    } else {
        PatchDecision::Patch(patch)
    }
}
