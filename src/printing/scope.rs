//! Registration scopes and their ordered printer lists.

use std::fmt;

use super::traits::{Formatter, PrettyPrinter};
use super::types::Entry;

/// What a scope is bound to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopeKind {
    /// The host-wide default scope.
    Global,
    /// A loaded module (object file, shared library, manifest), by filename.
    Module { filename: String },
    /// A debugging session / program space.
    Session { label: String },
}

impl ScopeKind {
    /// The identifying label used in diagnostics and selections.
    ///
    /// The global scope has no label of its own and answers `"global"`.
    pub fn label(&self) -> &str {
        match self {
            ScopeKind::Global => "global",
            ScopeKind::Module { filename } => filename,
            ScopeKind::Session { label } => label,
        }
    }
}

impl fmt::Display for ScopeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScopeKind::Global => write!(f, "global"),
            ScopeKind::Module { filename } => write!(f, "module {filename}"),
            ScopeKind::Session { label } => write!(f, "session {label}"),
        }
    }
}

/// An ordered list of printers owned by one scope.
///
/// Index 0 is the most recently registered entry and is tried first.
pub struct Scope<V: ?Sized> {
    kind: ScopeKind,
    printers: Vec<Entry<V>>,
}

impl<V: ?Sized> Scope<V> {
    pub fn new(kind: ScopeKind) -> Self {
        Self {
            kind,
            printers: Vec::new(),
        }
    }

    pub fn global() -> Self {
        Self::new(ScopeKind::Global)
    }

    pub fn module(filename: impl Into<String>) -> Self {
        Self::new(ScopeKind::Module {
            filename: filename.into(),
        })
    }

    pub fn session(label: impl Into<String>) -> Self {
        Self::new(ScopeKind::Session {
            label: label.into(),
        })
    }

    pub fn kind(&self) -> &ScopeKind {
        &self.kind
    }

    pub fn label(&self) -> &str {
        self.kind.label()
    }

    /// Entries in lookup order.
    pub fn printers(&self) -> &[Entry<V>] {
        &self.printers
    }

    pub fn printers_mut(&mut self) -> &mut [Entry<V>] {
        &mut self.printers
    }

    pub fn len(&self) -> usize {
        self.printers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.printers.is_empty()
    }

    /// Whether a named printer called `name` is registered here.
    ///
    /// Legacy lookup functions are never considered.
    pub fn contains_name(&self, name: &str) -> bool {
        self.printers
            .iter()
            .any(|entry| entry.name() == Some(name))
    }

    /// The named printer called `name`.
    pub fn get(&self, name: &str) -> Option<&dyn PrettyPrinter<V>> {
        self.printers
            .iter()
            .find(|entry| entry.name() == Some(name))
            .and_then(Entry::as_printer)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut (dyn PrettyPrinter<V> + 'static)> {
        self.printers
            .iter_mut()
            .find(|entry| entry.name() == Some(name))
            .and_then(Entry::as_printer_mut)
    }

    /// Remove and return the named printer called `name`.
    pub fn remove(&mut self, name: &str) -> Option<Entry<V>> {
        let idx = self
            .printers
            .iter()
            .position(|entry| entry.name() == Some(name))?;
        Some(self.printers.remove(idx))
    }

    /// Try each entry front to back; the first formatter wins.
    ///
    /// Disabled named printers are skipped.
    pub fn lookup(&self, value: &V) -> Option<Box<dyn Formatter>> {
        self.printers.iter().find_map(|entry| entry.lookup(value))
    }

    /// Insert at the front. Validation is the caller's job.
    pub(crate) fn insert_front(&mut self, entry: Entry<V>) {
        self.printers.insert(0, entry);
    }
}

impl<V: ?Sized> fmt::Debug for Scope<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scope")
            .field("kind", &self.kind)
            .field("printers", &self.printers)
            .finish()
    }
}
