//! Convergence decisions for generated configuration files
//!
//! This crate answers one question per reconciliation pass: given current
//! and desired state, what content, if any, should be written?
//!
//! - **settings**: a YAML patch holding only the dotted settings that differ
//!   from the consumer's last applied configuration
//! - **secrets**: a YAML file that is rewritten only when its decrypted
//!   content differs from the desired plaintext
//!
//! # Architecture
//!
//! `recon-core` sits above the Layer 0 crates and below the host runtime,
//! which applies the returned [`FileInstruction`]s:
//!
//! ```text
//!               host runtime
//!                    |
//!               recon-core
//!                    |
//!          +---------+---------+
//!          |                   |
//!   recon-content        recon-cipher
//! ```
//!
//! # Example
//!
//! ```no_run
//! use recon_content::Setting;
//! use recon_core::{AccessSettings, AccessSettingsParams};
//!
//! fn example() -> recon_core::Result<()> {
//!     let params = AccessSettingsParams::new("/opt/jfrog/artifactory/var/etc/access");
//!     let settings = vec![Setting::new("security.password.expiry", 60)];
//!     let instruction = AccessSettings::new(&params).instruction(&settings)?;
//!     println!("{:?}", instruction.ensure);
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod file;
pub mod params;
pub mod secrets;
pub mod settings;

pub use error::{Error, Result};
pub use file::{FileEnsure, FileInstruction, ReadOutcome};
pub use params::{AccessSettingsParams, Ensure, YamlFileParams};
pub use secrets::{ContentDecision, Desired, Sensitivity, YamlFile, decide, unwrap_sensitive};
pub use settings::{AccessSettings, PatchDecision, load_baseline, plan};
