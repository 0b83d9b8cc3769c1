//! typeprint: a scoped registry of value pretty-printers.
//!
//! See [`printing`] for the registry itself. The `typeprint` binary drives it
//! from YAML manifests for inspection and testing.

/// Crate version, reported by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod debug;
pub mod printing;
