//! File instructions handed back to the host
//!
//! The core never writes files itself. Each reconciliation pass ends with a
//! [`FileInstruction`] that the host applies with its own file primitive.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// Whether the host should keep a file or make sure it is gone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileEnsure {
    File,
    Absent,
}

/// What the host should do with one managed file.
#[derive(Clone, PartialEq, Eq)]
pub struct FileInstruction {
    pub path: PathBuf,
    pub ensure: FileEnsure,
    /// New content, or `None` to leave existing content untouched.
    pub content: Option<String>,
    /// Content must be redacted from diffs and reports.
    pub sensitive: bool,
    pub owner: Option<String>,
    pub group: Option<String>,
    pub mode: Option<String>,
    pub show_diff: Option<bool>,
}

impl FileInstruction {
    /// A file to keep, with no content change and no metadata.
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            ensure: FileEnsure::File,
            content: None,
            sensitive: false,
            owner: None,
            group: None,
            mode: None,
            show_diff: None,
        }
    }

    /// Does this instruction replace the file's content?
    pub fn replaces_content(&self) -> bool {
        self.content.is_some()
    }
}

impl fmt::Debug for FileInstruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let content = match (&self.content, self.sensitive) {
            (Some(_), true) => Some("<sensitive>"),
            (Some(content), false) => Some(content.as_str()),
            (None, _) => None,
        };

        f.debug_struct("FileInstruction")
            .field("path", &self.path)
            .field("ensure", &self.ensure)
            .field("content", &content)
            .field("sensitive", &self.sensitive)
            .field("owner", &self.owner)
            .field("group", &self.group)
            .field("mode", &self.mode)
            .field("show_diff", &self.show_diff)
            .finish()
    }
}

/// Result of reading a file that may legitimately not exist
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Present(String),
    Absent,
}

impl ReadOutcome {
    pub fn into_option(self) -> Option<String> {
        match self {
            Self::Present(content) => Some(content),
            Self::Absent => None,
        }
    }
}

/// Read a text file, mapping "not found" to [`ReadOutcome::Absent`].
pub fn read_optional(path: &Path) -> Result<ReadOutcome> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(ReadOutcome::Present(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(ReadOutcome::Absent),
        Err(e) => Err(Error::io(path, e)),
    }
}
