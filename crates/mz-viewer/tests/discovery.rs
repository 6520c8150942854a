//! Integration tests: discovery and idempotent wrapping (mz-viewer ↔ mz-core).
//!
//! Drives the plugin the way a host would: mirrored inserts, lifecycle
//! signals, and repeated scans over the same document.

use mz_core::classes;
use mz_core::{Document, Element, NodeIndex, Size, ZoomConfig};
use mz_viewer::{HostSignal, Schedule, ZoomPlugin};
use pretty_assertions::assert_eq;
use std::time::Duration;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn count_class(doc: &Document, class: &str) -> usize {
    doc.descendants(doc.body)
        .into_iter()
        .filter(|&n| doc.has_class(n, class))
        .count()
}

fn add_hosted(doc: &mut Document, parent: NodeIndex) -> NodeIndex {
    let host = doc.import_child(parent, Element::div("mermaid").with_size(320.0, 240.0));
    doc.import_child(host, Element::new("svg").with_size(320.0, 240.0))
}

// ─── Idempotency ────────────────────────────────────────────────────────

#[test]
fn repeated_passes_wrap_each_diagram_once() {
    init_logging();
    let mut doc = Document::new(Size::new(1280.0, 800.0));
    let section = doc.import_child(doc.body, Element::div("markdown-preview-section"));
    let a = add_hosted(&mut doc, section);
    let b = doc.import_child(section, Element::new("svg").with_id("mermaid-1700000000"));
    let body = doc.body;
    add_hosted(&mut doc, body);

    let mut plugin = ZoomPlugin::new(ZoomConfig::default());
    assert_eq!(plugin.load(&mut doc), 3);

    for _ in 0..10 {
        plugin.scan(&mut doc);
        plugin.signal(&mut doc, HostSignal::LayoutReady);
        plugin.signal(&mut doc, HostSignal::ActiveLeafChange);
        plugin.nodes_inserted(&mut doc, &[section, a, b]);
    }
    assert_eq!(count_class(&doc, classes::CONTAINER), 3);
    assert_eq!(count_class(&doc, classes::CONTENT), 3);
    assert_eq!(plugin.registry().len(), 3);
}

#[test]
fn continuous_feed_picks_up_late_renders() {
    let mut doc = Document::new(Size::new(1280.0, 800.0));
    let mut plugin = ZoomPlugin::new(ZoomConfig::default());
    assert_eq!(plugin.load(&mut doc), 0);

    let host = doc.import_child(doc.body, Element::div("mermaid"));
    assert_eq!(plugin.nodes_inserted(&mut doc, &[host]), 0);

    // The engine renders into the host later.
    let svg = doc.import_child(host, Element::new("svg"));
    assert_eq!(plugin.nodes_inserted(&mut doc, &[svg]), 1);
    assert_eq!(count_class(&doc, classes::CONTAINER), 1);
}

#[test]
fn host_with_two_outputs_is_wrapped_once() {
    let mut doc = Document::new(Size::new(1280.0, 800.0));
    let host = doc.import_child(doc.body, Element::div("mermaid"));
    doc.import_child(host, Element::new("svg"));
    doc.import_child(host, Element::new("svg"));

    let mut plugin = ZoomPlugin::new(ZoomConfig::default());
    assert_eq!(plugin.load(&mut doc), 1);
    assert_eq!(plugin.scan(&mut doc), 0);
    assert_eq!(count_class(&doc, classes::CONTAINER), 1);
}

#[test]
fn file_open_defers_the_scan() {
    let mut doc = Document::new(Size::new(1280.0, 800.0));
    let mut plugin = ZoomPlugin::new(ZoomConfig::default());
    plugin.load(&mut doc);
    let body = doc.body;
    add_hosted(&mut doc, body);

    let schedule = plugin.signal(&mut doc, HostSignal::FileOpen);
    assert_eq!(schedule, Schedule::ScanAfter(Duration::from_millis(200)));
    assert_eq!(count_class(&doc, classes::CONTAINER), 0);

    // Host timer fires.
    assert_eq!(plugin.scan(&mut doc), 1);
}

#[test]
fn custom_matching_rules_from_config() {
    let config =
        ZoomConfig::from_json(r#"{"host_class": "diagram-host", "id_prefix": "dg-"}"#).unwrap();
    let mut doc = Document::new(Size::new(1280.0, 800.0));
    let host = doc.import_child(doc.body, Element::div("diagram-host"));
    doc.import_child(host, Element::new("svg"));
    doc.import_child(doc.body, Element::new("svg").with_id("dg-1"));
    let body = doc.body;
    add_hosted(&mut doc, body);

    let mut plugin = ZoomPlugin::new(config);
    assert_eq!(plugin.load(&mut doc), 2);
}

// ─── Overlay interplay ──────────────────────────────────────────────────

#[test]
fn overlay_copy_is_never_rewrapped() {
    let mut doc = Document::new(Size::new(1280.0, 800.0));
    doc.import_child(doc.body, Element::new("svg").with_id("mermaid-42"));
    let mut plugin = ZoomPlugin::new(ZoomConfig::default());
    plugin.load(&mut doc);

    let container = doc
        .descendants(doc.body)
        .into_iter()
        .find(|&n| doc.has_class(n, classes::CONTAINER))
        .unwrap();
    assert!(plugin.open_overlay(&mut doc, container));
    let modal = plugin.overlay().unwrap().modal().index;

    // The host's observer reports the modal insertion back to us.
    assert_eq!(plugin.nodes_inserted(&mut doc, &[modal]), 0);
    assert_eq!(plugin.scan(&mut doc), 0);
    assert_eq!(count_class(&doc, classes::CONTAINER), 1);
}

// ─── Teardown ───────────────────────────────────────────────────────────

#[test]
fn host_removal_prunes_and_reinsert_wraps_fresh_content() {
    let mut doc = Document::new(Size::new(1280.0, 800.0));
    let body = doc.body;
    add_hosted(&mut doc, body);
    let mut plugin = ZoomPlugin::new(ZoomConfig::default());
    plugin.load(&mut doc);

    // Re-render: the host throws the old output away and inserts a new one.
    let container = doc
        .descendants(doc.body)
        .into_iter()
        .find(|&n| doc.has_class(n, classes::CONTAINER))
        .unwrap();
    doc.forget_subtree(container);
    plugin.nodes_removed(&mut doc);
    assert!(plugin.registry().is_empty());

    let body = doc.body;
    let svg = add_hosted(&mut doc, body);
    assert_eq!(plugin.nodes_inserted(&mut doc, &[svg]), 1);
    assert_eq!(plugin.registry().len(), 1);
}

#[test]
fn unload_then_reload_starts_clean() {
    let mut doc = Document::new(Size::new(1280.0, 800.0));
    let body = doc.body;
    add_hosted(&mut doc, body);
    let mut plugin = ZoomPlugin::new(ZoomConfig::default());
    plugin.load(&mut doc);
    plugin.unload(&mut doc);
    assert!(!plugin.is_loaded());
    assert_eq!(plugin.signal(&mut doc, HostSignal::FileOpen), Schedule::None);

    // Scaffolds stay; the marker guard keeps a reload from double-wrapping.
    assert_eq!(plugin.load(&mut doc), 0);
    assert_eq!(count_class(&doc, classes::CONTAINER), 1);
}
