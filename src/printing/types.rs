//! Entry types stored in a scope's printer list.

use std::fmt;
use std::sync::Arc;

use super::traits::{Formatter, LookupFn, PrettyPrinter};

/// Delimits a printer name from a sub-printer name in selections
/// (`"libstdc++;vector"`). Never allowed inside a registered name.
pub const NAME_DELIMITER: char = ';';

/// One element of a scope's printer list.
///
/// A printer is either a full [`PrettyPrinter`] (named, enable-able, subject to
/// the uniqueness check) or a legacy lookup function that only carries the
/// identifier it was defined under.
pub enum Entry<V: ?Sized> {
    Named(Box<dyn PrettyPrinter<V>>),
    Legacy(LegacyLookup<V>),
}

impl<V: ?Sized> Entry<V> {
    /// Wrap a named printer.
    pub fn named(printer: impl PrettyPrinter<V> + 'static) -> Self {
        Entry::Named(Box::new(printer))
    }

    /// Wrap a bare lookup function under its implicit identifier.
    pub fn legacy(
        ident: impl Into<String>,
        lookup: impl Fn(&V) -> Option<Box<dyn Formatter>> + Send + Sync + 'static,
    ) -> Self {
        Entry::Legacy(LegacyLookup::new(ident, Arc::new(lookup)))
    }

    /// The registered name, for named printers only.
    pub fn name(&self) -> Option<&str> {
        match self {
            Entry::Named(printer) => Some(printer.name()),
            Entry::Legacy(_) => None,
        }
    }

    /// The name shown in listings and diagnostics: the registered name, or a
    /// legacy function's identifier.
    pub fn display_name(&self) -> &str {
        match self {
            Entry::Named(printer) => printer.name(),
            Entry::Legacy(legacy) => legacy.ident(),
        }
    }

    /// Legacy functions cannot be disabled and always count as enabled.
    pub fn is_enabled(&self) -> bool {
        match self {
            Entry::Named(printer) => printer.enabled(),
            Entry::Legacy(_) => true,
        }
    }

    pub fn as_printer(&self) -> Option<&dyn PrettyPrinter<V>> {
        match self {
            Entry::Named(printer) => Some(printer.as_ref()),
            Entry::Legacy(_) => None,
        }
    }

    pub fn as_printer_mut(&mut self) -> Option<&mut (dyn PrettyPrinter<V> + 'static)> {
        match self {
            Entry::Named(printer) => Some(printer.as_mut()),
            Entry::Legacy(_) => None,
        }
    }

    /// Invoke the entry with `value`.
    ///
    /// A disabled named printer declines without being called.
    pub fn lookup(&self, value: &V) -> Option<Box<dyn Formatter>> {
        match self {
            Entry::Named(printer) if printer.enabled() => printer.lookup(value),
            Entry::Named(_) => None,
            Entry::Legacy(legacy) => legacy.call(value),
        }
    }
}

impl<V: ?Sized> fmt::Debug for Entry<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Named(printer) => f
                .debug_struct("Named")
                .field("name", &printer.name())
                .field("enabled", &printer.enabled())
                .finish(),
            Entry::Legacy(legacy) => fmt::Debug::fmt(legacy, f),
        }
    }
}

/// A bare lookup function registered the old way.
///
/// It has no `enabled` flag and is never checked for name uniqueness; its
/// identifier is only used for listings and diagnostics.
pub struct LegacyLookup<V: ?Sized> {
    ident: String,
    lookup: LookupFn<V>,
}

impl<V: ?Sized> LegacyLookup<V> {
    pub fn new(ident: impl Into<String>, lookup: LookupFn<V>) -> Self {
        Self {
            ident: ident.into(),
            lookup,
        }
    }

    pub fn ident(&self) -> &str {
        &self.ident
    }

    pub fn call(&self, value: &V) -> Option<Box<dyn Formatter>> {
        (self.lookup)(value)
    }
}

impl<V: ?Sized> fmt::Debug for LegacyLookup<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Legacy").field("ident", &self.ident).finish()
    }
}

/// A named printer backed by a single lookup function.
pub struct FunctionPrinter<V: ?Sized> {
    name: String,
    enabled: bool,
    lookup: LookupFn<V>,
}

impl<V: ?Sized> FunctionPrinter<V> {
    /// New printers start enabled.
    pub fn new(name: impl Into<String>, lookup: LookupFn<V>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            lookup,
        }
    }
}

impl<V: ?Sized> PrettyPrinter<V> for FunctionPrinter<V> {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    fn lookup(&self, value: &V) -> Option<Box<dyn Formatter>> {
        (self.lookup)(value)
    }
}
