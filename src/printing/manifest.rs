//! Turning declarative manifest entries into registrable printers.
//!
//! Declarations arrive as loosely typed YAML, so every capability the typed
//! API guarantees statically has to be checked here, in the same order
//! registration documents:
//!
//! 1. a name, or a function identifier standing in for one;
//! 2. an `enabled` flag on every named printer;
//! 3. something to call: sub-printers or a function;
//! 4. a textual name.
//!
//! The delimiter and uniqueness checks then happen during registration.

use std::sync::Arc;

use serde_yaml_ng::Value;
use typeprint_config::PrinterDecl;

use super::catalog::FunctionCatalog;
use super::regex_collection::RegexCollectionPrinter;
use super::registry::{Attribute, RegistrationError};
use super::traits::{LookupFn, PrettyPrinter, SubPrinter, TypedValue};
use super::types::{Entry, FunctionPrinter, LegacyLookup};

/// Build the entry a declaration describes.
///
/// A named declaration with `subprinters` becomes a
/// [`RegexCollectionPrinter`]; a named declaration with only `function`
/// becomes a [`FunctionPrinter`]; an unnamed one becomes a legacy lookup
/// function named after its identifier. When both `subprinters` and
/// `function` are present the sub-printers win.
pub fn entry_from_decl<V: TypedValue + ?Sized + 'static>(
    decl: &PrinterDecl,
    catalog: &FunctionCatalog<V>,
) -> Result<Entry<V>, RegistrationError> {
    if decl.name.is_none() && decl.function.is_none() {
        return Err(RegistrationError::MissingAttribute(Attribute::Name));
    }
    if decl.name.is_some() && decl.enabled.is_none() {
        return Err(RegistrationError::MissingAttribute(Attribute::Enabled));
    }
    if decl.subprinters.is_none() && decl.function.is_none() {
        return Err(RegistrationError::MissingAttribute(Attribute::Call));
    }

    let name = match &decl.name {
        None => None,
        Some(Value::String(name)) => Some(name.as_str()),
        Some(_) => return Err(RegistrationError::TypeMismatch(Attribute::Name)),
    };

    let Some(name) = name else {
        // Checked above: an unnamed declaration always has a function.
        let ident = decl.function.as_deref().unwrap_or_default();
        let lookup = resolve(catalog, ident)?;
        return Ok(Entry::Legacy(LegacyLookup::new(ident, lookup)));
    };
    let enabled = decl.enabled.unwrap_or(true);

    let mut printer: Box<dyn PrettyPrinter<V>> = match (&decl.subprinters, &decl.function) {
        (Some(subprinters), function) => {
            if let Some(function) = function {
                log::warn!("Printer {name}: ignoring function {function}, subprinters take precedence");
            }
            let mut collection = RegexCollectionPrinter::new(name);
            for sub in subprinters {
                let factory = resolve(catalog, &sub.factory)?;
                collection
                    .add_printer(&sub.name, &sub.pattern, factory)
                    .map_err(|source| RegistrationError::InvalidPattern {
                        name: sub.name.clone(),
                        source,
                    })?;
            }
            let states = collection.subprinters_mut().into_iter().flatten();
            for (sub, sub_decl) in states.zip(subprinters) {
                SubPrinter::set_enabled(sub, sub_decl.enabled);
            }
            Box::new(collection)
        }
        (None, Some(function)) => Box::new(FunctionPrinter::new(name, resolve(catalog, function)?)),
        (None, None) => return Err(RegistrationError::MissingAttribute(Attribute::Call)),
    };
    printer.set_enabled(enabled);
    Ok(Entry::Named(printer))
}

fn resolve<V: ?Sized>(catalog: &FunctionCatalog<V>, id: &str) -> Result<LookupFn<V>, RegistrationError> {
    catalog
        .get(id)
        .map(Arc::clone)
        .ok_or_else(|| RegistrationError::UnknownFunction(id.to_string()))
}
