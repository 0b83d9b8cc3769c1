//! A value described only by its written type name.
//!
//! Hosts with real introspection implement [`TypedValue`] on their own value
//! type. `TypeName` covers the cases where all that is known is the spelling
//! of the type, such as the command-line resolver.

use std::borrow::Cow;

use super::traits::TypedValue;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeName {
    written: Option<String>,
}

impl TypeName {
    pub fn new(written: impl Into<String>) -> Self {
        Self {
            written: Some(written.into()),
        }
    }

    /// A value whose type has no name.
    pub fn anonymous() -> Self {
        Self { written: None }
    }

    /// The type name exactly as written.
    pub fn written(&self) -> Option<&str> {
        self.written.as_deref()
    }
}

impl TypedValue for TypeName {
    fn basic_type_name(&self) -> Option<Cow<'_, str>> {
        self.written
            .as_deref()
            .and_then(strip_qualifiers)
            .map(Cow::Borrowed)
    }
}

/// Strip cv-qualifiers and references from a written type name.
///
/// Pointers are kept: `char *` is a different type from `char`.
fn strip_qualifiers(written: &str) -> Option<&str> {
    let mut name = written.trim();
    loop {
        let before = name;
        for qualifier in ["const ", "volatile "] {
            if let Some(rest) = name.strip_prefix(qualifier) {
                name = rest.trim_start();
            }
        }
        for qualifier in [" const", " volatile"] {
            if let Some(rest) = name.strip_suffix(qualifier) {
                name = rest.trim_end();
            }
        }
        if let Some(rest) = name.strip_suffix('&') {
            name = rest.trim_end();
        }
        if name == before {
            break;
        }
    }
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn basic(written: &str) -> Option<String> {
        TypeName::new(written)
            .basic_type_name()
            .map(|name| name.into_owned())
    }

    #[test]
    fn test_plain_name_unchanged() {
        assert_eq!(basic("std::string").as_deref(), Some("std::string"));
    }

    #[test]
    fn test_strips_qualifiers_and_references() {
        assert_eq!(basic("const std::string &").as_deref(), Some("std::string"));
        assert_eq!(basic("volatile int").as_deref(), Some("int"));
        assert_eq!(
            basic("std::vector<int> const&&").as_deref(),
            Some("std::vector<int>")
        );
        assert_eq!(basic("const volatile Foo").as_deref(), Some("Foo"));
    }

    #[test]
    fn test_keeps_pointers() {
        assert_eq!(basic("const char *").as_deref(), Some("char *"));
    }

    #[test]
    fn test_no_usable_name() {
        assert!(TypeName::anonymous().basic_type_name().is_none());
        assert!(basic("").is_none());
        assert!(basic("const &").is_none());
    }
}
