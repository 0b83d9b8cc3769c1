//! Core traits for the printer registry.
//!
//! The host supplies values through [`TypedValue`]; printers hand back opaque
//! [`Formatter`]s. Everything in between is a [`PrettyPrinter`] or a legacy
//! lookup function.

use std::borrow::Cow;
use std::sync::Arc;

/// Host-side introspection of a value to be displayed.
pub trait TypedValue {
    /// The value's basic type name: typedefs resolved, qualifiers and
    /// references stripped.
    ///
    /// Returns `None` for types without a usable name (anonymous structs,
    /// function types, ...). That is an ordinary outcome, not an error.
    fn basic_type_name(&self) -> Option<Cow<'_, str>>;
}

/// A formatter produced for one value.
///
/// Opaque to the registry: it is created by a factory and handed straight
/// back to the host's display loop.
pub trait Formatter {
    /// Render the value for display.
    fn render(&self) -> String;

    /// Optional hint for how the host should lay out the output
    /// (e.g. "array", "map", "string").
    fn display_hint(&self) -> Option<&str> {
        None
    }
}

/// A formatter factory or legacy lookup function.
///
/// Returns `None` when it declines the value.
pub type LookupFn<V> = Arc<dyn Fn(&V) -> Option<Box<dyn Formatter>> + Send + Sync>;

/// A sub-printer inside a collection printer.
///
/// Only the name and the enabled flag are visible to the registry; how a
/// sub-printer decides whether it applies is up to its parent.
pub trait SubPrinter: Send + Sync {
    fn name(&self) -> &str;

    fn enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);
}

/// A named, individually enable-able printer.
///
/// Implementations must be `Send + Sync` so a host can keep its scopes behind
/// its own synchronization.
pub trait PrettyPrinter<V: ?Sized>: Send + Sync {
    /// Unique name within the scope the printer is registered in.
    ///
    /// Must not contain `;`, which delimits printer and sub-printer names in
    /// enable/disable selections.
    fn name(&self) -> &str;

    fn enabled(&self) -> bool;

    fn set_enabled(&mut self, enabled: bool);

    /// Produce a formatter for `value`, or `None` to let the next printer try.
    fn lookup(&self, value: &V) -> Option<Box<dyn Formatter>>;

    /// The sub-printers, if this printer is a collection.
    ///
    /// `Some(vec![])` is a collection that happens to be empty; `None` is a
    /// plain printer.
    fn subprinters(&self) -> Option<Vec<&dyn SubPrinter>> {
        None
    }

    /// Mutable access to the sub-printers, for enable/disable selections.
    fn subprinters_mut(&mut self) -> Option<Vec<&mut dyn SubPrinter>> {
        None
    }
}
