//! Document model, dotted paths, and comparison for the config reconciler
//!
//! Documents are plain [`serde_yaml::Value`] trees. This crate provides the
//! pieces every reconciliation pass is built from: folding dotted settings into
//! a nested tree, looking values up by path, and deciding whether a desired
//! value matches what is already on disk.

pub mod compare;
pub mod error;
pub mod path;
pub mod setting;
pub mod yaml;

pub use compare::{Mismatch, differs, differs_at, documents_match, mismatches};
pub use error::{Error, Result};
pub use path::{DigError, dig, split_path, undot};
pub use setting::Setting;

/// A parsed nested document.
pub type Document = serde_yaml::Value;
