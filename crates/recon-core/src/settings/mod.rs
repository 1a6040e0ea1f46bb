//! Access settings patch planning
//!
//! This module provides:
//! - **baseline**: tolerant loading of the last applied configuration snapshot
//! - **planner**: the minimal patch between desired settings and the baseline
//! - [`AccessSettings`]: the resource that turns a plan into a file instruction

mod baseline;
mod planner;

pub use baseline::load_baseline;
pub use planner::{PatchDecision, plan};

use recon_content::Setting;
use std::path::PathBuf;

use crate::Result;
use crate::file::{FileEnsure, FileInstruction};
use crate::params::AccessSettingsParams;

/// Snapshot of the configuration the consumer last applied
pub const BASELINE_FILE: &str = "access.config.latest.yml";

/// Generated patch file, picked up by the consumer on start
pub const PATCH_FILE: &str = "access.config.patch.yml";

/// Permissions of the generated patch file
pub const PATCH_FILE_MODE: &str = "0640";

/// The access settings patch file of one configuration directory.
pub struct AccessSettings<'a> {
    params: &'a AccessSettingsParams,
}

impl<'a> AccessSettings<'a> {
    pub fn new(params: &'a AccessSettingsParams) -> Self {
        Self { params }
    }

    pub fn baseline_path(&self) -> PathBuf {
        self.params.path.join(BASELINE_FILE)
    }

    pub fn patch_file_path(&self) -> PathBuf {
        self.params.path.join(PATCH_FILE)
    }

    /// Compare `settings` with the on-disk baseline.
    pub fn plan(&self, settings: &[Setting]) -> PatchDecision {
        let observed = load_baseline(&self.baseline_path());
        plan(settings, &observed)
    }

    /// Plan and describe the patch file the host should converge to.
    ///
    /// The file is removed when every setting already matches the baseline.
    pub fn instruction(&self, settings: &[Setting]) -> Result<FileInstruction> {
        let content = self.plan(settings).render()?;

        let ensure = match content {
            Some(_) => FileEnsure::File,
            None => FileEnsure::Absent,
        };

        Ok(FileInstruction {
            ensure,
            content,
            owner: Some(self.params.owner.clone()),
            group: Some(self.params.group.clone()),
            mode: Some(PATCH_FILE_MODE.to_string()),
            ..FileInstruction::file(self.patch_file_path())
        })
    }
}
