//! Read-only snapshot of registered printers, for display and export.

use std::fmt;

use serde::Serialize;

use super::host::PrinterHost;
use super::scope::Scope;
use super::selection::Selection;
use super::types::Entry;

/// Printers of every scope a selection matched, in lookup order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Listing {
    pub scopes: Vec<ScopeListing>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScopeListing {
    /// Scope description, e.g. `global` or `module /usr/lib/libfoo.so`.
    pub scope: String,
    /// Sorted by name.
    pub printers: Vec<PrinterListing>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrinterListing {
    pub name: String,
    pub enabled: bool,
    /// Bare lookup function rather than a named printer.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub legacy: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub subprinters: Vec<SubprinterListing>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubprinterListing {
    pub name: String,
    pub enabled: bool,
}

impl Listing {
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

/// Describe the printers of `scope` that `selection` matches.
///
/// Returns `None` when the scope itself is filtered out or nothing in it
/// matches.
pub fn list_scope<V: ?Sized>(scope: &Scope<V>, selection: &Selection) -> Option<ScopeListing> {
    if !selection.matches_scope(scope.kind()) {
        return None;
    }

    let mut printers: Vec<PrinterListing> = scope
        .printers()
        .iter()
        .filter(|entry| selection.matches_printer(entry.display_name()))
        .map(|entry| list_entry(entry, selection))
        .collect();
    if printers.is_empty() {
        return None;
    }
    printers.sort_by(|a, b| a.name.cmp(&b.name));

    Some(ScopeListing {
        scope: scope.kind().to_string(),
        printers,
    })
}

fn list_entry<V: ?Sized>(entry: &Entry<V>, selection: &Selection) -> PrinterListing {
    let mut subprinters: Vec<SubprinterListing> = entry
        .as_printer()
        .and_then(|printer| printer.subprinters())
        .unwrap_or_default()
        .into_iter()
        .filter(|sub| selection.matches_subprinter(sub.name()))
        .map(|sub| SubprinterListing {
            name: sub.name().to_string(),
            enabled: sub.enabled(),
        })
        .collect();
    subprinters.sort_by(|a, b| a.name.cmp(&b.name));

    PrinterListing {
        name: entry.display_name().to_string(),
        enabled: entry.is_enabled(),
        legacy: matches!(entry, Entry::Legacy(_)),
        subprinters,
    }
}

impl fmt::Display for Listing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for scope in &self.scopes {
            writeln!(f, "{} pretty-printers:", scope.scope)?;
            for printer in &scope.printers {
                writeln!(f, "  {}{}", printer.name, disabled_marker(printer.enabled))?;
                for sub in &printer.subprinters {
                    writeln!(f, "    {}{}", sub.name, disabled_marker(sub.enabled))?;
                }
            }
        }
        Ok(())
    }
}

fn disabled_marker(enabled: bool) -> &'static str {
    if enabled { "" } else { " [disabled]" }
}

impl<V: ?Sized> PrinterHost<V> {
    /// Snapshot of everything `selection` matches.
    pub fn listing(&self, selection: &Selection) -> Listing {
        Listing {
            scopes: self
                .scopes()
                .filter_map(|scope| list_scope(scope, selection))
                .collect(),
        }
    }
}
