//! Shared integration test helpers for typeprint.
//!
//! ```ignore
//! mod common;
//! use common::{RecordingSink, render, text_factory};
//! ```
//!
//! The `#[allow(dead_code)]` below suppresses warnings when only a subset of
//! helpers are used per file.

#![allow(dead_code)]

use std::fs;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::Mutex;
use tempfile::TempDir;
use typeprint::printing::{
    DiagnosticSink, Entry, Formatter, FunctionPrinter, LookupFn, PrinterHost,
    RegexCollectionBuilder, RegistrationSettings, TypeName,
};

/// Formatter that renders a fixed string.
pub struct TextFormatter(pub String);

impl Formatter for TextFormatter {
    fn render(&self) -> String {
        self.0.clone()
    }
}

/// A factory that always produces a formatter rendering `text`.
pub fn text_factory(text: &str) -> LookupFn<TypeName> {
    let text = text.to_string();
    Arc::new(move |_: &TypeName| Some(Box::new(TextFormatter(text.clone())) as Box<dyn Formatter>))
}

/// A named printer that accepts every value.
pub fn text_printer(name: &str, text: &str) -> Entry<TypeName> {
    Entry::named(FunctionPrinter::new(name, text_factory(text)))
}

/// Render a lookup result, if any.
pub fn render(result: Option<Box<dyn Formatter>>) -> Option<String> {
    result.map(|formatter| formatter.render())
}

/// Resolve `written` against `host` and render the result.
pub fn resolve(host: &PrinterHost<TypeName>, written: &str) -> Option<String> {
    render(host.lookup(&TypeName::new(written)))
}

/// A `libstdc++` collection with `vector` and `map` sub-printers.
pub fn libstdcxx() -> Entry<TypeName> {
    let printer = RegexCollectionBuilder::new("libstdc++")
        .printer("vector", "^std::vector<", text_factory("vector"))
        .expect("valid pattern")
        .printer("map", "^std::map<", text_factory("map"))
        .expect("valid pattern")
        .build();
    Entry::named(printer)
}

/// Diagnostic sink whose notices stay readable after the host takes it.
#[derive(Clone, Default)]
pub struct RecordingSink {
    notices: Arc<Mutex<Vec<String>>>,
}

impl RecordingSink {
    pub fn notices(&self) -> Vec<String> {
        self.notices.lock().clone()
    }
}

impl DiagnosticSink for RecordingSink {
    fn write(&mut self, message: &str) -> io::Result<()> {
        self.notices.lock().push(message.to_string());
        Ok(())
    }
}

/// A host with verbose notices captured by the returned sink.
pub fn verbose_host() -> (PrinterHost<TypeName>, RecordingSink) {
    let sink = RecordingSink::default();
    let host = PrinterHost::with_sink(
        RegistrationSettings { verbose: true },
        Box::new(sink.clone()),
    );
    (host, sink)
}

/// Temp directory for manifest and settings files, removed on drop.
pub struct TestContext {
    pub dir: TempDir,
}

impl TestContext {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Write `contents` to `name` inside the temp dir and return its path.
    pub fn write(&self, name: &str, contents: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, contents).expect("Failed to write test file");
        path
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
