//! Shared test utilities for the config-reconciler workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only and is never published.
//!
//! # Modules
//!
//! - [`keys`]: fixed key material and ciphertext produced independently
//! - [`dir`]: [`ConfigDir`](dir::ConfigDir) temporary directory builder
//! - [`logs`]: capture of warnings logged while a closure runs

pub mod dir;
pub mod keys;
pub mod logs;
