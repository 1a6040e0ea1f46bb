//! YAML secrets file reconciliation
//!
//! This module provides:
//! - **desired**: desired documents with sensitive wrappers, and unwrapping
//! - **reconciler**: the rewrite-or-leave decision for one secrets file
//! - [`YamlFile`]: the resource that turns a decision into a file instruction

mod desired;
mod reconciler;

pub use desired::{Desired, Sensitivity, unwrap_sensitive};
pub use reconciler::{ContentDecision, decide};

use recon_cipher::KeyMaterial;

use crate::Result;
use crate::file::{FileEnsure, FileInstruction, ReadOutcome, read_optional};
use crate::params::{Ensure, YamlFileParams};

/// A YAML file whose content is only replaced when its decrypted form differs.
pub struct YamlFile<'a> {
    params: &'a YamlFileParams,
}

impl<'a> YamlFile<'a> {
    /// Fails if the parameters are invalid.
    pub fn new(params: &'a YamlFileParams) -> Result<Self> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Current on-disk content, `None` when there is nothing usable to compare.
    pub fn current_content(&self) -> Option<String> {
        match read_optional(&self.params.path) {
            Ok(ReadOutcome::Present(content)) => Some(content),
            Ok(ReadOutcome::Absent) => {
                tracing::debug!(path = %self.params.path.display(), "File doesn't exist yet");
                None
            }
            Err(e) => {
                tracing::warn!("Cannot read current content, it will be replaced: {}", e);
                None
            }
        }
    }

    /// Describe the file the host should converge to.
    ///
    /// The key is loaded for this call only and dropped before returning.
    pub fn instruction(&self, desired: &Desired) -> Result<FileInstruction> {
        let params = self.params;
        let base = FileInstruction {
            owner: params.owner.clone(),
            group: params.group.clone(),
            mode: params.mode.clone(),
            show_diff: params.show_diff,
            ..FileInstruction::file(&params.path)
        };

        if params.ensure == Ensure::Absent {
            return Ok(FileInstruction {
                ensure: FileEnsure::Absent,
                ..base
            });
        }

        let key = match &params.key {
            Some(source) => KeyMaterial::resolve(source)?,
            None => None,
        };
        let current = self.current_content();

        let decision = decide(desired, current.as_deref(), key.as_ref())?;
        let sensitive = params.sensitive || decision.is_sensitive();

        match decision {
            ContentDecision::Unchanged { .. } => Ok(FileInstruction { sensitive, ..base }),
            ContentDecision::Replace { content, .. } => Ok(FileInstruction {
                content: Some(content),
                sensitive,
                ..base
            }),
        }
    }
}
