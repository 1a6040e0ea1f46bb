//! Host-supplied parameters
//!
//! Each managed resource receives a fixed, explicit parameter struct. They
//! deserialize from whatever format the host declares resources in.

use recon_cipher::KeySource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Default owner and group of generated access configuration files
pub const DEFAULT_ACCESS_USER: &str = "artifactory";

fn default_access_user() -> String {
    DEFAULT_ACCESS_USER.to_string()
}

/// Parameters of the access settings patch resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessSettingsParams {
    /// Access configuration directory holding the baseline and the patch file
    pub path: PathBuf,

    #[serde(default = "default_access_user")]
    pub owner: String,

    #[serde(default = "default_access_user")]
    pub group: String,
}

impl AccessSettingsParams {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            owner: default_access_user(),
            group: default_access_user(),
        }
    }
}

/// Desired presence of a managed file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ensure {
    #[default]
    Present,
    Absent,
}

/// Parameters of the YAML secrets file resource.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct YamlFileParams {
    /// Absolute path of the managed file
    pub path: PathBuf,

    #[serde(default)]
    pub ensure: Ensure,

    pub owner: Option<String>,
    pub group: Option<String>,
    /// Octal permission string, e.g. `"0640"`
    pub mode: Option<String>,
    pub show_diff: Option<bool>,

    /// Master key used to decrypt the on-disk file before comparing
    pub key: Option<KeySource>,

    /// The host flagged the desired document as sensitive
    #[serde(default)]
    pub sensitive: bool,
}

impl YamlFileParams {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ensure: Ensure::Present,
            owner: None,
            group: None,
            mode: None,
            show_diff: None,
            key: None,
            sensitive: false,
        }
    }

    pub fn with_key(mut self, key: KeySource) -> Self {
        self.key = Some(key);
        self
    }

    pub fn validate(&self) -> Result<()> {
        require_absolute(&self.path)
    }
}

fn require_absolute(path: &Path) -> Result<()> {
    if path.is_absolute() {
        Ok(())
    } else {
        Err(Error::RelativePath {
            path: path.to_path_buf(),
        })
    }
}
