//! The printer host: owner of every scope and driver of value lookup.
//!
//! One `PrinterHost` lives for the lifetime of the inspecting process. It owns
//! the global scope outright; module and session scopes come and go as the
//! host loads and unloads them.
//!
//! Lookup walks module scopes in load order, then session scopes, then the
//! global scope, so printers shipped with a module win over site-wide ones.

use std::fmt;

use typeprint_config::{ManifestFile, PrinterDecl};

use super::catalog::FunctionCatalog;
use super::manifest::entry_from_decl;
use super::registry::{
    DiagnosticSink, LogSink, RegistrationError, RegistrationSettings, register_pretty_printer,
};
use super::scope::Scope;
use super::traits::{Formatter, TypedValue};
use super::types::Entry;

/// Handle to a module or session scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(u64);

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

pub struct PrinterHost<V: ?Sized> {
    settings: RegistrationSettings,
    sink: Box<dyn DiagnosticSink>,
    global: Scope<V>,
    /// Load order.
    modules: Vec<(ScopeId, Scope<V>)>,
    sessions: Vec<(ScopeId, Scope<V>)>,
    next_id: u64,
}

impl<V: ?Sized> PrinterHost<V> {
    /// A host whose registration notices go to the `log` facade.
    pub fn new(settings: RegistrationSettings) -> Self {
        Self::with_sink(settings, Box::new(LogSink))
    }

    pub fn with_sink(settings: RegistrationSettings, sink: Box<dyn DiagnosticSink>) -> Self {
        Self {
            settings,
            sink,
            global: Scope::global(),
            modules: Vec::new(),
            sessions: Vec::new(),
            next_id: 0,
        }
    }

    pub fn settings(&self) -> &RegistrationSettings {
        &self.settings
    }

    pub fn set_verbose(&mut self, verbose: bool) {
        self.settings.verbose = verbose;
    }

    /// Create an empty scope for a newly loaded module.
    pub fn load_module(&mut self, filename: impl Into<String>) -> ScopeId {
        let id = self.allocate_id();
        let scope = Scope::module(filename);
        log::debug!("Loaded module scope {} ({})", id, scope.label());
        self.modules.push((id, scope));
        id
    }

    /// Create an empty scope for a new session.
    pub fn open_session(&mut self, label: impl Into<String>) -> ScopeId {
        let id = self.allocate_id();
        let scope = Scope::session(label);
        log::debug!("Opened session scope {} ({})", id, scope.label());
        self.sessions.push((id, scope));
        id
    }

    /// Drop a module or session scope together with its printers.
    pub fn unload(&mut self, id: ScopeId) -> Option<Scope<V>> {
        for list in [&mut self.modules, &mut self.sessions] {
            if let Some(idx) = list.iter().position(|(sid, _)| *sid == id) {
                let (_, scope) = list.remove(idx);
                log::debug!("Unloaded scope {} ({})", id, scope.label());
                return Some(scope);
            }
        }
        None
    }

    pub fn global(&self) -> &Scope<V> {
        &self.global
    }

    /// The scope for `id`, or the global scope for `None`.
    pub fn scope(&self, id: Option<ScopeId>) -> Option<&Scope<V>> {
        match id {
            None => Some(&self.global),
            Some(id) => self
                .modules
                .iter()
                .chain(self.sessions.iter())
                .find(|(sid, _)| *sid == id)
                .map(|(_, scope)| scope),
        }
    }

    pub fn scope_mut(&mut self, id: Option<ScopeId>) -> Option<&mut Scope<V>> {
        match id {
            None => Some(&mut self.global),
            Some(id) => self
                .modules
                .iter_mut()
                .chain(self.sessions.iter_mut())
                .find(|(sid, _)| *sid == id)
                .map(|(_, scope)| scope),
        }
    }

    /// All scopes in lookup order.
    pub fn scopes(&self) -> impl Iterator<Item = &Scope<V>> {
        self.modules
            .iter()
            .chain(self.sessions.iter())
            .map(|(_, scope)| scope)
            .chain(std::iter::once(&self.global))
    }

    /// All scopes in lookup order, mutably.
    pub fn scopes_mut(&mut self) -> impl Iterator<Item = &mut Scope<V>> {
        self.modules
            .iter_mut()
            .chain(self.sessions.iter_mut())
            .map(|(_, scope)| scope)
            .chain(std::iter::once(&mut self.global))
    }

    /// Register `entry` in the scope for `scope`, or globally for `None`.
    pub fn register(
        &mut self,
        scope: Option<ScopeId>,
        entry: Entry<V>,
    ) -> Result<(), RegistrationError> {
        let Self {
            settings,
            sink,
            global,
            modules,
            sessions,
            ..
        } = self;

        let target = match scope {
            None => global,
            Some(id) => modules
                .iter_mut()
                .chain(sessions.iter_mut())
                .find(|(sid, _)| *sid == id)
                .map(|(_, scope)| scope)
                .ok_or(RegistrationError::UnknownScope(id))?,
        };
        register_pretty_printer(target, entry, settings, sink.as_mut())
    }

    /// Find a formatter for `value`.
    ///
    /// `None` means no printer had an opinion and the host should fall back
    /// to its built-in display.
    pub fn lookup(&self, value: &V) -> Option<Box<dyn Formatter>> {
        self.scopes().find_map(|scope| scope.lookup(value))
    }

    fn allocate_id(&mut self) -> ScopeId {
        let id = ScopeId(self.next_id);
        self.next_id += 1;
        id
    }
}

impl<V: TypedValue + ?Sized + 'static> PrinterHost<V> {
    /// Validate a declaration, build its entry, and register it.
    pub fn register_declared(
        &mut self,
        scope: Option<ScopeId>,
        decl: &PrinterDecl,
        catalog: &FunctionCatalog<V>,
    ) -> Result<(), RegistrationError> {
        if let Some(id) = scope
            && self.scope(scope).is_none()
        {
            return Err(RegistrationError::UnknownScope(id));
        }
        let entry = entry_from_decl(decl, catalog)?;
        self.register(scope, entry)
    }

    /// Register every declaration of `manifest`, in file order.
    ///
    /// Stops at the first failure; declarations registered before it stay.
    /// Returns the number of printers registered.
    pub fn load_manifest(
        &mut self,
        scope: Option<ScopeId>,
        manifest: &ManifestFile,
        catalog: &FunctionCatalog<V>,
    ) -> Result<usize, RegistrationError> {
        for decl in &manifest.printers {
            self.register_declared(scope, decl, catalog)?;
        }
        Ok(manifest.printers.len())
    }
}

impl<V: ?Sized> fmt::Debug for PrinterHost<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PrinterHost")
            .field("settings", &self.settings)
            .field("global", &self.global)
            .field("modules", &self.modules)
            .field("sessions", &self.sessions)
            .finish_non_exhaustive()
    }
}
