//! Pretty-printer registry.
//!
//! Keeps per-scope lists of printers that turn a debugged value into a
//! display formatter, and resolves a value against them. Printers are
//! registered programmatically or from declarative YAML manifests.
//!
//! # Module Structure
//!
//! ## Printers
//! - [`traits`]: `TypedValue`, `Formatter`, `PrettyPrinter` and `SubPrinter`.
//! - [`types`]: `Entry` (named printer or legacy lookup function) and
//!   `FunctionPrinter`.
//! - [`regex_collection`]: `RegexCollectionPrinter`, a named printer that
//!   dispatches on the value's basic type name through regex sub-printers.
//! - [`value`]: `TypeName`, a value that is nothing but its written type.
//!
//! ## Registration
//! - [`scope`]: `Scope`, an ordered printer list owned by the global
//!   context, a loaded module or a session.
//! - [`registry`]: `register_pretty_printer` and its validation rules.
//! - [`host`]: `PrinterHost`, which owns every scope and drives lookup.
//! - [`manifest`] / [`catalog`]: build entries from YAML declarations,
//!   resolving function ids through a `FunctionCatalog`.
//!
//! ## Management
//! - [`selection`]: enable/disable by `printer;subprinter` regexps, counts.
//! - [`listing`]: serializable snapshot of registered printers.
//!
//! ```
//! use typeprint::printing::{
//!     Entry, Formatter, PrinterHost, RegexCollectionBuilder, RegistrationSettings, TypeName,
//! };
//! use std::sync::Arc;
//!
//! struct Shown(String);
//!
//! impl Formatter for Shown {
//!     fn render(&self) -> String {
//!         self.0.clone()
//!     }
//! }
//!
//! fn show(value: &TypeName) -> Option<Box<dyn Formatter>> {
//!     Some(Box::new(Shown(format!("<{}>", value.written()?))))
//! }
//!
//! let mut host = PrinterHost::new(RegistrationSettings::default());
//! let printer = RegexCollectionBuilder::<TypeName>::new("mylib")
//!     .printer("widget", "^Widget$", Arc::new(show))
//!     .unwrap()
//!     .build();
//! host.register(None, Entry::named(printer)).unwrap();
//!
//! let formatter = host.lookup(&TypeName::new("const Widget")).unwrap();
//! assert_eq!(formatter.render(), "<const Widget>");
//! assert!(host.lookup(&TypeName::new("Gadget")).is_none());
//! ```

pub mod catalog;
pub mod host;
pub mod listing;
pub mod manifest;
pub mod regex_collection;
pub mod registry;
pub mod scope;
pub mod selection;
pub mod traits;
pub mod types;
pub mod value;

#[cfg(test)]
mod testing;

pub use catalog::*;
pub use host::*;
pub use listing::*;
pub use manifest::*;
pub use regex_collection::*;
pub use registry::*;
pub use scope::*;
pub use selection::*;
pub use traits::*;
pub use types::*;
pub use value::*;
