//! Configuration system for typeprint.
//!
//! This crate is pure data: it knows how to read and write the settings file
//! and the declarative printer manifests, but not how printers are registered
//! or looked up. It includes:
//!
//! - [`Config`]: host settings (verbosity, manifests to load, disabled selections)
//! - [`ManifestFile`] / [`PrinterDecl`] / [`SubprinterDecl`]: printer declarations
//! - [`ConfigError`]: typed I/O and parse failures

mod config;
mod error;
pub mod manifest;

pub use config::Config;
pub use error::ConfigError;
pub use manifest::{ManifestFile, PrinterDecl, SubprinterDecl};
