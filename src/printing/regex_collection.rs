//! Collection printer that dispatches on regular expressions over type names.
//!
//! `RegexCollectionPrinter` is "one" printer for a whole family of related
//! types (a standard library's containers, say). Each sub-printer pairs a
//! compiled regex with a formatter factory; lookup searches the value's basic
//! type name against the sub-printers in the order they were added and hands
//! the value to the first enabled match.

use regex::Regex;

use super::traits::{Formatter, LookupFn, PrettyPrinter, SubPrinter, TypedValue};

/// One regex-keyed sub-printer.
pub struct RegexSubprinter<V: ?Sized> {
    name: String,
    enabled: bool,
    /// The pattern as written; kept alongside the compiled form for listings.
    pattern: String,
    /// Compiled once from `pattern` when the sub-printer is added.
    compiled: Regex,
    factory: LookupFn<V>,
}

impl<V: ?Sized> RegexSubprinter<V> {
    /// Compile `pattern` and build an enabled sub-printer.
    pub fn new(
        name: impl Into<String>,
        pattern: impl Into<String>,
        factory: LookupFn<V>,
    ) -> Result<Self, regex::Error> {
        let pattern = pattern.into();
        let compiled = Regex::new(&pattern)?;
        Ok(Self {
            name: name.into(),
            enabled: true,
            pattern,
            compiled,
            factory,
        })
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Unanchored search: `vector` matches `std::vector<int>`.
    pub fn matches(&self, type_name: &str) -> bool {
        self.compiled.is_match(type_name)
    }

    pub fn make_formatter(&self, value: &V) -> Option<Box<dyn Formatter>> {
        (self.factory)(value)
    }
}

impl<V: ?Sized> SubPrinter for RegexSubprinter<V> {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

/// A printer made of regex-selected sub-printers.
///
/// ```
/// use std::sync::Arc;
/// use typeprint::printing::{Formatter, RegexCollectionPrinter, TypeName};
///
/// fn myclass_printer(_: &TypeName) -> Option<Box<dyn Formatter>> {
///     None
/// }
///
/// let mut printer = RegexCollectionPrinter::<TypeName>::new("my_library");
/// printer.add_printer("myclass1", "^myclass1$", Arc::new(myclass_printer)).unwrap();
/// printer.add_printer("myclassN", "^myclassN$", Arc::new(myclass_printer)).unwrap();
/// assert_eq!(printer.len(), 2);
/// ```
pub struct RegexCollectionPrinter<V: ?Sized> {
    name: String,
    enabled: bool,
    subprinters: Vec<RegexSubprinter<V>>,
}

impl<V: ?Sized> RegexCollectionPrinter<V> {
    /// Create an empty, enabled collection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            enabled: true,
            subprinters: Vec::new(),
        }
    }

    /// Append a sub-printer.
    ///
    /// The pattern is compiled here and never again. Earlier sub-printers take
    /// precedence at lookup time. Names and patterns are not checked for
    /// duplicates; adding the same triple twice yields two sub-printers.
    ///
    /// Nothing is appended when the pattern fails to compile.
    pub fn add_printer(
        &mut self,
        name: impl Into<String>,
        pattern: impl Into<String>,
        factory: LookupFn<V>,
    ) -> Result<&mut Self, regex::Error> {
        let subprinter = RegexSubprinter::new(name, pattern, factory)?;
        self.subprinters.push(subprinter);
        Ok(self)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegexSubprinter<V>> {
        self.subprinters.iter()
    }

    pub fn len(&self) -> usize {
        self.subprinters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subprinters.is_empty()
    }

    /// The first enabled sub-printer whose pattern is found in `type_name`.
    pub fn find_subprinter(&self, type_name: &str) -> Option<&RegexSubprinter<V>> {
        self.subprinters
            .iter()
            .find(|sub| sub.enabled && sub.matches(type_name))
    }
}

impl<V: TypedValue + ?Sized> PrettyPrinter<V> for RegexCollectionPrinter<V> {
    fn name(&self) -> &str {
        &self.name
    }

    fn enabled(&self) -> bool {
        self.enabled
    }

    fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    /// Resolve `value` by its basic type name.
    ///
    /// The first matching enabled sub-printer decides: its factory's result is
    /// returned even when the factory declines, without trying later matches.
    fn lookup(&self, value: &V) -> Option<Box<dyn Formatter>> {
        let type_name = value.basic_type_name()?;

        match self.find_subprinter(&type_name) {
            Some(sub) => {
                log::trace!(
                    "{}: '{}' matched subprinter {} ({})",
                    self.name,
                    type_name,
                    sub.name,
                    sub.pattern
                );
                sub.make_formatter(value)
            }
            None => {
                log::trace!("{}: no subprinter for '{}'", self.name, type_name);
                None
            }
        }
    }

    fn subprinters(&self) -> Option<Vec<&dyn SubPrinter>> {
        Some(
            self.subprinters
                .iter()
                .map(|sub| sub as &dyn SubPrinter)
                .collect(),
        )
    }

    fn subprinters_mut(&mut self) -> Option<Vec<&mut dyn SubPrinter>> {
        Some(
            self.subprinters
                .iter_mut()
                .map(|sub| sub as &mut dyn SubPrinter)
                .collect(),
        )
    }
}

/// Builder for collections declared in one expression.
pub struct RegexCollectionBuilder<V: ?Sized> {
    printer: RegexCollectionPrinter<V>,
}

impl<V: ?Sized> RegexCollectionBuilder<V> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            printer: RegexCollectionPrinter::new(name),
        }
    }

    /// Add a sub-printer (see [`RegexCollectionPrinter::add_printer`]).
    pub fn printer(
        mut self,
        name: impl Into<String>,
        pattern: impl Into<String>,
        factory: LookupFn<V>,
    ) -> Result<Self, regex::Error> {
        self.printer.add_printer(name, pattern, factory)?;
        Ok(self)
    }

    /// Set the collection's initial enabled state (default: true).
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.printer.enabled = enabled;
        self
    }

    pub fn build(self) -> RegexCollectionPrinter<V> {
        self.printer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::printing::testing::{TypeName, declining_factory, render, text_factory};

    fn foo_collection() -> RegexCollectionPrinter<TypeName> {
        RegexCollectionBuilder::new("foo")
            .printer("p1", "^Foo$", text_factory("f1"))
            .unwrap()
            .printer("p2", "^Foo.*$", text_factory("f2"))
            .unwrap()
            .build()
    }

    #[test]
    fn test_first_added_match_wins() {
        let printer = foo_collection();
        assert_eq!(
            render(printer.lookup(&TypeName::new("Foo"))),
            Some("f1".to_string())
        );
        assert_eq!(
            render(printer.lookup(&TypeName::new("FooBar"))),
            Some("f2".to_string())
        );
    }

    #[test]
    fn test_disabled_subprinter_is_skipped() {
        let mut printer = foo_collection();
        for sub in printer.subprinters_mut().unwrap() {
            if sub.name() == "p1" {
                sub.set_enabled(false);
            }
        }
        assert_eq!(
            render(printer.lookup(&TypeName::new("Foo"))),
            Some("f2".to_string())
        );
    }

    #[test]
    fn test_search_is_unanchored() {
        let mut printer = RegexCollectionPrinter::new("std");
        printer
            .add_printer("vector", "vector", text_factory("vec"))
            .unwrap();
        assert_eq!(
            render(printer.lookup(&TypeName::new("std::vector<int>"))),
            Some("vec".to_string())
        );
    }

    #[test]
    fn test_lookup_uses_basic_type_name() {
        let mut printer = RegexCollectionPrinter::new("std");
        printer
            .add_printer("string", "^std::string$", text_factory("str"))
            .unwrap();
        assert_eq!(
            render(printer.lookup(&TypeName::new("const std::string &"))),
            Some("str".to_string())
        );
    }

    #[test]
    fn test_no_type_name_or_no_match() {
        let printer = foo_collection();
        assert!(printer.lookup(&TypeName::anonymous()).is_none());
        assert!(printer.lookup(&TypeName::new("Bar")).is_none());
    }

    #[test]
    fn test_declining_factory_stops_the_scan() {
        let mut printer = RegexCollectionPrinter::new("foo");
        printer
            .add_printer("decline", "^Foo$", declining_factory())
            .unwrap()
            .add_printer("fallback", "Foo", text_factory("never"))
            .unwrap();
        assert!(printer.lookup(&TypeName::new("Foo")).is_none());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let mut printer = RegexCollectionPrinter::new("dup");
        let factory = text_factory("same");
        printer
            .add_printer("x", "^X$", factory.clone())
            .unwrap()
            .add_printer("x", "^X$", factory)
            .unwrap();
        assert_eq!(printer.len(), 2);

        // Disabling the first leaves the second to answer.
        printer.subprinters_mut().unwrap()[0].set_enabled(false);
        assert_eq!(
            render(printer.lookup(&TypeName::new("X"))),
            Some("same".to_string())
        );
        let names: Vec<&str> = printer.iter().map(|sub| sub.name()).collect();
        assert_eq!(names, vec!["x", "x"]);
    }

    #[test]
    fn test_invalid_pattern_appends_nothing() {
        let mut printer = RegexCollectionPrinter::<TypeName>::new("bad");
        assert!(printer.add_printer("broken", "(", text_factory("x")).is_err());
        assert!(printer.is_empty());
    }

    #[test]
    fn test_new_collection_state() {
        let printer = RegexCollectionBuilder::<TypeName>::new("empty")
            .enabled(false)
            .build();
        assert_eq!(PrettyPrinter::name(&printer), "empty");
        assert!(!PrettyPrinter::enabled(&printer));
        assert_eq!(printer.subprinters().map(|subs| subs.len()), Some(0));
    }

    #[test]
    fn test_pattern_is_kept_verbatim() {
        let printer = foo_collection();
        let patterns: Vec<&str> = printer.iter().map(RegexSubprinter::pattern).collect();
        assert_eq!(patterns, vec!["^Foo$", "^Foo.*$"]);
        assert!(printer.find_subprinter("Foo").is_some());
    }
}
