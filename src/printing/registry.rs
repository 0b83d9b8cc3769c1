//! Printer registration.
//!
//! `register_pretty_printer` validates an entry against the contracts the
//! lookup loop relies on and inserts it at the front of a scope's list, so the
//! newest registration overrides older ones for the types both handle.

use std::fmt;
use std::io::{self, Write};

use super::scope::{Scope, ScopeKind};
use super::types::{Entry, NAME_DELIMITER};

/// A capability a printer must expose.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    /// An explicit name, or an implicit identifier for legacy functions.
    Name,
    /// The enabled flag, required of every named printer.
    Enabled,
    /// The ability to be invoked with a value.
    Call,
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Attribute::Name => "name",
            Attribute::Enabled => "enabled",
            Attribute::Call => "__call__",
        })
    }
}

/// Errors raised while registering a printer.
///
/// A failed registration never modifies the target scope.
#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("printer missing attribute: {0}")]
    MissingAttribute(Attribute),

    #[error("printer {0} has the wrong type")]
    TypeMismatch(Attribute),

    #[error("semicolon ';' in printer name: {0}")]
    InvalidName(String),

    #[error("pretty-printer already registered: {0}")]
    DuplicateName(String),

    /// A manifest referenced a function or factory the host does not provide.
    #[error("unknown lookup function or factory: {0}")]
    UnknownFunction(String),

    /// A manifest sub-printer pattern failed to compile.
    #[error("invalid pattern for subprinter {name}: {source}")]
    InvalidPattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    #[error("no such scope: {0}")]
    UnknownScope(super::host::ScopeId),
}

/// Host settings consulted during registration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegistrationSettings {
    /// Emit a notice through the diagnostic sink for every registration.
    pub verbose: bool,
}

/// Where human-readable registration notices go.
pub trait DiagnosticSink {
    fn write(&mut self, message: &str) -> io::Result<()>;
}

/// Sends notices to the `log` facade at info level.
#[derive(Debug, Default)]
pub struct LogSink;

impl DiagnosticSink for LogSink {
    fn write(&mut self, message: &str) -> io::Result<()> {
        log::info!("{}", message.trim_end());
        Ok(())
    }
}

/// Writes notices to any `io::Write`, one per line.
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> DiagnosticSink for WriterSink<W> {
    fn write(&mut self, message: &str) -> io::Result<()> {
        writeln!(self.writer, "{message}")
    }
}

/// Register `entry` in `scope`.
///
/// Checks, in order:
/// 1. a legacy function carries a non-empty identifier;
/// 2. a named printer's name does not contain `;`;
/// 3. no named printer with the same name is already in `scope`.
///
/// The verbose notice goes out after the capability check (1) and before
/// the name checks (2, 3), so a printer rejected for its name has still
/// been announced.
///
/// The remaining capability checks (enabled flag, invocability, textual
/// name) are guaranteed by [`Entry`]'s types here and are enforced for
/// declarative manifests by [`super::manifest::entry_from_decl`], before
/// any notice.
///
/// On success the entry is inserted at index 0.
pub fn register_pretty_printer<V: ?Sized>(
    scope: &mut Scope<V>,
    entry: Entry<V>,
    settings: &RegistrationSettings,
    sink: &mut dyn DiagnosticSink,
) -> Result<(), RegistrationError> {
    check_capabilities(&entry)?;

    if settings.verbose {
        let message = registration_notice(scope.kind(), entry.display_name());
        if let Err(e) = sink.write(&message) {
            log::warn!("Failed to write registration notice: {e}");
        }
    }

    check_name(scope, &entry)?;

    log::debug!(
        "Registered {} in {} scope at position 0 ({} entries)",
        entry.display_name(),
        scope.kind(),
        scope.len() + 1
    );
    scope.insert_front(entry);
    Ok(())
}

fn check_capabilities<V: ?Sized>(entry: &Entry<V>) -> Result<(), RegistrationError> {
    match entry {
        Entry::Legacy(legacy) if legacy.ident().is_empty() => {
            Err(RegistrationError::MissingAttribute(Attribute::Name))
        }
        _ => Ok(()),
    }
}

/// Legacy identifiers are exempt: many share a name like `lookup_function`.
fn check_name<V: ?Sized>(scope: &Scope<V>, entry: &Entry<V>) -> Result<(), RegistrationError> {
    let Entry::Named(printer) = entry else {
        return Ok(());
    };
    let name = printer.name();
    if name.contains(NAME_DELIMITER) {
        return Err(RegistrationError::InvalidName(name.to_string()));
    }
    if scope.contains_name(name) {
        return Err(RegistrationError::DuplicateName(name.to_string()));
    }
    Ok(())
}

fn registration_notice(kind: &ScopeKind, name: &str) -> String {
    match kind {
        ScopeKind::Global => format!("Registering global {name} pretty-printer ..."),
        other => format!("Registering {name} pretty-printer for {} ...", other.label()),
    }
}
