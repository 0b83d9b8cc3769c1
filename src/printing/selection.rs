//! Enable/disable selections over printers and sub-printers.
//!
//! A selection is an optional scope regexp plus an optional name regexp of the
//! form `printer-regexp[;subprinter-regexp]`. Every regexp matches from the
//! start of the name. Without a sub-printer part a selection addresses whole
//! printers; with one it addresses the matching sub-printers of the matching
//! printers. Legacy lookup functions are never toggled.

use std::fmt;
use std::str::FromStr;

use regex::Regex;

use super::host::PrinterHost;
use super::scope::{Scope, ScopeKind};
use super::traits::{PrettyPrinter, SubPrinter};
use super::types::{Entry, NAME_DELIMITER};

#[derive(Debug, thiserror::Error)]
pub enum SelectionError {
    #[error("invalid {what} regexp {pattern:?}: {source}")]
    InvalidRegex {
        what: &'static str,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}

/// Which printers a toggle, listing or count applies to.
#[derive(Debug, Clone, Default)]
pub struct Selection {
    scope: Option<Regex>,
    printer: Option<Regex>,
    subprinter: Option<Regex>,
}

impl Selection {
    /// Everything in every scope.
    pub fn all() -> Self {
        Self::default()
    }

    /// Parse a scope regexp and a `printer[;subprinter]` name regexp.
    ///
    /// Missing or empty parts match everything. A `;` always makes this a
    /// sub-printer selection, even when nothing follows it.
    pub fn parse(scope: Option<&str>, name: Option<&str>) -> Result<Self, SelectionError> {
        let (printer, subprinter) = match name {
            Some(name) => match name.split_once(NAME_DELIMITER) {
                Some((printer, subprinter)) => (Some(printer), Some(subprinter)),
                None => (Some(name), None),
            },
            None => (None, None),
        };

        Ok(Self {
            scope: compile("scope", scope)?,
            printer: compile("printer", printer)?,
            subprinter: subprinter
                .map(|pattern| anchored("subprinter", pattern))
                .transpose()?,
        })
    }

    /// A name-only selection, as written in the settings file.
    pub fn from_name(name: &str) -> Result<Self, SelectionError> {
        Self::parse(None, Some(name))
    }

    /// Whether this selection addresses sub-printers rather than printers.
    pub fn targets_subprinters(&self) -> bool {
        self.subprinter.is_some()
    }

    pub fn matches_scope(&self, kind: &ScopeKind) -> bool {
        matches(&self.scope, kind.label())
    }

    pub fn matches_printer(&self, name: &str) -> bool {
        matches(&self.printer, name)
    }

    pub fn matches_subprinter(&self, name: &str) -> bool {
        matches(&self.subprinter, name)
    }
}

impl FromStr for Selection {
    type Err = SelectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = |re: &Option<Regex>| re.as_ref().map_or(String::new(), |re| source_of(re).to_string());
        write!(f, "{} {}", or_any(&part(&self.scope)), or_any(&part(&self.printer)))?;
        if self.subprinter.is_some() {
            write!(f, "{NAME_DELIMITER}{}", or_any(&part(&self.subprinter)))?;
        }
        Ok(())
    }
}

fn or_any(part: &str) -> &str {
    if part.is_empty() { "*" } else { part }
}

/// The user-written pattern inside the `^(?:...)` anchor.
fn source_of(re: &Regex) -> &str {
    let anchored = re.as_str();
    anchored
        .strip_prefix("^(?:")
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(anchored)
}

fn compile(what: &'static str, pattern: Option<&str>) -> Result<Option<Regex>, SelectionError> {
    match pattern {
        None | Some("") => Ok(None),
        Some(pattern) => anchored(what, pattern).map(Some),
    }
}

fn anchored(what: &'static str, pattern: &str) -> Result<Regex, SelectionError> {
    Regex::new(&format!("^(?:{pattern})")).map_err(|source| SelectionError::InvalidRegex {
        what,
        pattern: pattern.to_string(),
        source,
    })
}

fn matches(re: &Option<Regex>, name: &str) -> bool {
    re.as_ref().is_none_or(|re| re.is_match(name))
}

/// Enabled and total printer counts.
///
/// A collection contributes its sub-printers rather than itself, and its
/// sub-printers only count as enabled while the collection is.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrinterCounts {
    pub enabled: usize,
    pub total: usize,
}

impl fmt::Display for PrinterCounts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {} printers enabled", self.enabled, self.total)
    }
}

impl std::ops::AddAssign for PrinterCounts {
    fn add_assign(&mut self, other: Self) {
        self.enabled += other.enabled;
        self.total += other.total;
    }
}

/// Count the printers of one scope.
pub fn count_printers<V: ?Sized>(scope: &Scope<V>) -> PrinterCounts {
    let mut counts = PrinterCounts::default();
    for entry in scope.printers() {
        let Some(printer) = entry.as_printer() else {
            counts.enabled += 1;
            counts.total += 1;
            continue;
        };
        match printer.subprinters() {
            Some(subs) => {
                if printer.enabled() {
                    counts.enabled += subs.iter().filter(|sub| sub.enabled()).count();
                }
                counts.total += subs.len();
            }
            None => {
                counts.enabled += usize::from(printer.enabled());
                counts.total += 1;
            }
        }
    }
    counts
}

/// Apply `selection` to the printers of one scope.
///
/// Individual sub-printer states survive toggling their collection. Returns
/// how many printers (counted as in [`PrinterCounts`]) changed their
/// effective state.
pub fn set_enabled_in_scope<V: ?Sized>(
    scope: &mut Scope<V>,
    selection: &Selection,
    enabled: bool,
) -> usize {
    if !selection.matches_scope(scope.kind()) {
        return 0;
    }

    let mut changed = 0;
    for entry in scope.printers_mut() {
        let Entry::Named(printer) = entry else {
            continue;
        };
        if !selection.matches_printer(printer.name()) {
            continue;
        }
        changed += toggle_printer(&mut **printer, selection, enabled);
    }
    changed
}

fn toggle_printer<V: ?Sized>(
    printer: &mut dyn PrettyPrinter<V>,
    selection: &Selection,
    enabled: bool,
) -> usize {
    let parent_enabled = printer.enabled();

    if printer.subprinters().is_none() {
        if selection.targets_subprinters() {
            return 0;
        }
        printer.set_enabled(enabled);
        return usize::from(parent_enabled != enabled);
    }

    if selection.targets_subprinters() {
        let mut changed = 0;
        for sub in printer.subprinters_mut().into_iter().flatten() {
            if !selection.matches_subprinter(sub.name()) {
                continue;
            }
            if parent_enabled && sub.enabled() != enabled {
                changed += 1;
            }
            SubPrinter::set_enabled(sub, enabled);
        }
        return changed;
    }

    let changed = if parent_enabled != enabled {
        printer
            .subprinters()
            .map_or(0, |subs| subs.iter().filter(|sub| sub.enabled()).count())
    } else {
        0
    };
    printer.set_enabled(enabled);
    changed
}

impl<V: ?Sized> PrinterHost<V> {
    /// Enable or disable everything `selection` addresses, in every scope.
    ///
    /// Returns how many printers changed state.
    pub fn set_enabled(&mut self, selection: &Selection, enabled: bool) -> usize {
        let changed = self
            .scopes_mut()
            .map(|scope| set_enabled_in_scope(scope, selection, enabled))
            .sum();
        log::debug!(
            "{} {} printer(s) for selection '{}'",
            if enabled { "Enabled" } else { "Disabled" },
            changed,
            selection
        );
        changed
    }

    /// Printer counts across every scope.
    pub fn counts(&self) -> PrinterCounts {
        let mut counts = PrinterCounts::default();
        for scope in self.scopes() {
            counts += count_printers(scope);
        }
        counts
    }
}
