//! [`ConfigDir`] builder for reconciliation test scenarios.

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary configuration directory with helpers for writing inputs and
/// applying outputs the way a host would.
///
/// # Example
///
/// ```rust,no_run
/// use recon_test_utils::dir::ConfigDir;
///
/// let dir = ConfigDir::new();
/// dir.write("access.config.latest.yml", "security:\n  tls: false\n");
/// dir.assert_file_exists("access.config.latest.yml");
/// ```
pub struct ConfigDir {
    temp_dir: TempDir,
}

impl Default for ConfigDir {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigDir {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().expect("ConfigDir::new: failed to create temp dir"),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    /// Absolute path of `name` inside the directory.
    pub fn path(&self, name: &str) -> PathBuf {
        self.root().join(name)
    }

    /// Write `content` to `name`, creating parent directories.
    pub fn write(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("ConfigDir::write: failed to create parent");
        }
        fs::write(&path, content).expect("ConfigDir::write: failed to write file");
        path
    }

    /// Read `name`, or `None` if it does not exist.
    pub fn read(&self, name: &str) -> Option<String> {
        fs::read_to_string(self.path(name)).ok()
    }

    /// Remove `name` if it exists.
    pub fn remove(&self, name: &str) {
        let _ = fs::remove_file(self.path(name));
    }

    pub fn assert_file_exists(&self, name: &str) {
        assert!(
            self.path(name).exists(),
            "Expected file {} to exist",
            self.path(name).display()
        );
    }

    pub fn assert_file_absent(&self, name: &str) {
        assert!(
            !self.path(name).exists(),
            "Expected file {} to be absent",
            self.path(name).display()
        );
    }
}
