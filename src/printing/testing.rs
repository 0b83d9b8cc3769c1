//! Shared test helpers for printer registry tests.
//!
//! ```ignore
//! use crate::printing::testing::{TextFormatter, TypeName, render, text_factory};
//! ```

use std::sync::Arc;

use super::traits::{Formatter, LookupFn};
pub use super::value::TypeName;

/// Formatter that renders a fixed string.
pub struct TextFormatter(pub String);

impl TextFormatter {
    pub fn boxed(text: impl Into<String>) -> Box<dyn Formatter> {
        Box::new(TextFormatter(text.into()))
    }
}

impl Formatter for TextFormatter {
    fn render(&self) -> String {
        self.0.clone()
    }
}

/// A factory that always produces a formatter rendering `text`.
pub fn text_factory(text: &str) -> LookupFn<TypeName> {
    let text = text.to_string();
    Arc::new(move |_: &TypeName| Some(TextFormatter::boxed(text.clone())))
}

/// A factory that always declines.
pub fn declining_factory() -> LookupFn<TypeName> {
    Arc::new(|_: &TypeName| -> Option<Box<dyn Formatter>> { None })
}

/// Render a lookup result, if any.
pub fn render(result: Option<Box<dyn Formatter>>) -> Option<String> {
    result.map(|formatter| formatter.render())
}
