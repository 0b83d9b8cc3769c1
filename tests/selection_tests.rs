//! Enable/disable selections, counts and listings across scopes.

mod common;

use common::{libstdcxx, render, resolve, text_printer};
use typeprint::printing::{
    Entry, PrinterCounts, PrinterHost, RegistrationSettings, Selection, TypeName,
};

fn host() -> PrinterHost<TypeName> {
    let mut host = PrinterHost::new(RegistrationSettings::default());
    host.register(None, libstdcxx()).unwrap();
    host.register(None, Entry::legacy("legacy_lookup", |_: &TypeName| None))
        .unwrap();
    let module = host.load_module("/opt/app/libwidgets.so");
    host.register(Some(module), text_printer("widgets", "widget"))
        .unwrap();
    host
}

fn select(scope: Option<&str>, name: Option<&str>) -> Selection {
    Selection::parse(scope, name).unwrap()
}

#[test]
fn test_disable_everything_then_reenable() {
    let mut host = host();
    assert_eq!(host.counts(), PrinterCounts { enabled: 4, total: 4 });

    // vector + map + widgets; the legacy function stays on.
    assert_eq!(host.set_enabled(&Selection::all(), false), 3);
    assert_eq!(host.counts(), PrinterCounts { enabled: 1, total: 4 });
    assert!(resolve(&host, "std::vector<int>").is_none());

    assert_eq!(host.set_enabled(&Selection::all(), true), 3);
    // The module printer answers first; the global collection is back too.
    assert_eq!(resolve(&host, "std::vector<int>").as_deref(), Some("widget"));
    assert_eq!(
        render(host.global().lookup(&TypeName::new("std::vector<int>"))).as_deref(),
        Some("vector")
    );
}

#[test]
fn test_scope_regexp_limits_changes() {
    let mut host = host();
    assert_eq!(host.set_enabled(&select(Some("global"), None), false), 2);
    assert_eq!(resolve(&host, "std::vector<int>").as_deref(), Some("widget"));

    assert_eq!(host.set_enabled(&select(Some("/opt/app"), None), false), 1);
    assert!(resolve(&host, "std::vector<int>").is_none());
}

#[test]
fn test_subprinter_selection() {
    let mut host = host();
    assert_eq!(host.set_enabled(&select(None, Some("libstdc\\+\\+;map")), false), 1);

    let listing = host.listing(&select(Some("global"), Some("libstdc")));
    let printer = &listing.scopes[0].printers[0];
    assert!(printer.enabled);
    let states: Vec<_> = printer
        .subprinters
        .iter()
        .map(|sub| (sub.name.as_str(), sub.enabled))
        .collect();
    assert_eq!(states, vec![("map", false), ("vector", true)]);
}

#[test]
fn test_subprinter_selection_ignores_plain_printers() {
    let mut host = host();
    assert_eq!(host.set_enabled(&select(None, Some("widgets;.*")), false), 0);
    assert_eq!(resolve(&host, "T").as_deref(), Some("widget"));
}

#[test]
fn test_listing_text() {
    let mut host = host();
    host.set_enabled(&select(Some("/opt"), Some("widgets")), false);

    assert_eq!(
        host.listing(&Selection::all()).to_string(),
        "module /opt/app/libwidgets.so pretty-printers:\n\
         \x20 widgets [disabled]\n\
         global pretty-printers:\n\
         \x20 legacy_lookup\n\
         \x20 libstdc++\n\
         \x20   map\n\
         \x20   vector\n"
    );
}

#[test]
fn test_listing_omits_scopes_without_matches() {
    let host = host();
    let listing = host.listing(&select(None, Some("widgets")));
    assert_eq!(listing.scopes.len(), 1);
    assert_eq!(listing.scopes[0].scope, "module /opt/app/libwidgets.so");
}

#[test]
fn test_counts_display() {
    let mut host = host();
    host.set_enabled(&select(None, Some("libstdc")), false);
    assert_eq!(host.counts().to_string(), "2 of 4 printers enabled");
}
