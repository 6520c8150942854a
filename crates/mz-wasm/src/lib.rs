//! WASM bridge for Mermaid Zoom: exposes the plugin to the host viewer's JS.
//!
//! The host mirrors its document into the plugin (`insert_node`,
//! `set_rect`, `remove_node`), forwards lifecycle signals and input events,
//! and replays the returned patch list onto the real DOM.
//!
//! Node keys are graph slots. A key is reused after its node is removed, so
//! the host must drop its key → element mapping on every `remove` patch and
//! every `remove_node` call. A `cloneSubtree` patch lists the keys of the
//! copy's elements in pre-order; the host pairs them with its own clone so
//! events inside the copy can be targeted.

use mz_core::{DomPatch, Document, Element, NodeIndex, Point, Rect, Size, ZoomConfig, node_key};
use mz_viewer::{HostSignal, InputEvent, Schedule, ZoomPlugin};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Reply to a lifecycle signal.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SignalReply {
    patches: Vec<DomPatch>,
    /// Delay before the host should call `scan`, if one was requested.
    scan_after_ms: Option<u64>,
}

/// Plugin instance bound to one host document.
#[wasm_bindgen]
pub struct MzPlugin {
    doc: Document,
    plugin: ZoomPlugin,
}

#[wasm_bindgen]
impl MzPlugin {
    /// Create a plugin with the default configuration for a window of the
    /// given size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();
        Self {
            doc: Document::new(Size::new(width as f32, height as f32)),
            plugin: ZoomPlugin::new(ZoomConfig::default()),
        }
    }

    /// Replace the configuration. Only allowed before `load`.
    /// Returns JSON: `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn configure(&mut self, config_json: &str) -> String {
        if self.plugin.is_loaded() {
            return error_json("configure must be called before load");
        }
        match ZoomConfig::from_json(config_json) {
            Ok(config) => {
                self.plugin = ZoomPlugin::new(config);
                r#"{"ok":true}"#.to_string()
            }
            Err(e) => error_json(&e),
        }
    }

    // ─── Document mirror ─────────────────────────────────────────────────

    /// Key of the `<body>` element.
    pub fn body(&self) -> u32 {
        node_key(self.doc.body)
    }

    /// Mirror a host-inserted element. `before` is the key of the next
    /// sibling, or `-1` to append. `classes` is space-separated.
    /// Returns the new node's key, or `-1` if `parent` is unknown.
    #[allow(clippy::too_many_arguments)]
    pub fn insert_node(
        &mut self,
        parent: u32,
        before: i32,
        tag: &str,
        id: &str,
        classes: &str,
        width: f64,
        height: f64,
    ) -> i32 {
        let Some(parent) = self.node(parent as i32) else {
            return -1;
        };
        let mut element = Element::new(tag)
            .with_classes(classes)
            .with_size(width as f32, height as f32);
        if !id.is_empty() {
            element = element.with_id(id);
        }
        let idx = match self.node(before) {
            Some(reference) => self.doc.import_before(parent, element, reference),
            None => self.doc.import_child(parent, element),
        };
        node_key(idx) as i32
    }

    /// Record a measured client rect. Setting the body's rect updates the
    /// window size.
    pub fn set_rect(&mut self, node: u32, x: f64, y: f64, width: f64, height: f64) {
        if let Some(idx) = self.node(node as i32) {
            let rect = Rect::new(x as f32, y as f32, width as f32, height as f32);
            self.doc.set_rect(idx, rect);
        }
    }

    /// Mirror a host-side removal. Returns the patch list.
    pub fn remove_node(&mut self, node: u32) -> String {
        if let Some(idx) = self.node(node as i32) {
            self.doc.forget_subtree(idx);
            self.plugin.nodes_removed(&mut self.doc);
        }
        self.drain()
    }

    // ─── Lifecycle ───────────────────────────────────────────────────────

    /// Activate and wrap existing diagrams. Returns the patch list.
    pub fn load(&mut self) -> String {
        self.plugin.load(&mut self.doc);
        self.drain()
    }

    pub fn unload(&mut self) -> String {
        self.plugin.unload(&mut self.doc);
        self.drain()
    }

    /// Lifecycle signal: `layout-ready`, `layout-change`, `active-leaf-change`
    /// or `file-open`. Returns JSON `{"patches":[...],"scanAfterMs":N|null}`.
    pub fn signal(&mut self, name: &str) -> String {
        let scan_after_ms = match parse_signal(name) {
            Some(signal) => match self.plugin.signal(&mut self.doc, signal) {
                Schedule::None => None,
                Schedule::ScanAfter(delay) => Some(delay.as_millis() as u64),
            },
            None => {
                log::warn!("unknown host signal {name:?}");
                None
            }
        };
        let reply = SignalReply {
            patches: self.doc.take_patches(),
            scan_after_ms,
        };
        serde_json::to_string(&reply)
            .unwrap_or_else(|_| r#"{"patches":[],"scanAfterMs":null}"#.to_string())
    }

    /// Full discovery pass (also the target of a deferred `scanAfterMs`).
    pub fn scan(&mut self) -> String {
        self.plugin.scan(&mut self.doc);
        self.drain()
    }

    /// Continuous discovery over nodes the host just inserted.
    pub fn nodes_inserted(&mut self, nodes: &[u32]) -> String {
        let nodes: Vec<NodeIndex> = nodes
            .iter()
            .filter_map(|&key| self.node(key as i32))
            .collect();
        self.plugin.nodes_inserted(&mut self.doc, &nodes);
        self.drain()
    }

    /// Run deferred work for this animation frame.
    pub fn animation_frame(&mut self) -> String {
        self.plugin.animation_frame(&mut self.doc);
        self.drain()
    }

    /// Whether the document-level key listener should be attached.
    pub fn wants_keys(&self) -> bool {
        self.plugin.wants_keys()
    }

    // ─── Input ───────────────────────────────────────────────────────────
    //
    // `target` is the event target's key, or `-1` when it is not mirrored.
    // Elements of an overlay copy are keyed by their `cloneSubtree` patch.
    // Coordinates are client coordinates. Each call returns the patch list.

    pub fn wheel(&mut self, target: i32, x: f32, y: f32, delta_y: f32) -> String {
        self.event(target, InputEvent::Wheel { x, y, delta_y })
    }

    pub fn pointer_down(&mut self, target: i32, x: f32, y: f32, button: i16) -> String {
        self.event(target, InputEvent::PointerDown { x, y, button })
    }

    pub fn pointer_move(&mut self, x: f32, y: f32) -> String {
        self.event(-1, InputEvent::PointerMove { x, y })
    }

    pub fn pointer_up(&mut self, x: f32, y: f32) -> String {
        self.event(-1, InputEvent::PointerUp { x, y })
    }

    /// `coords` holds `x0, y0, x1, y1, …` for every active touch.
    pub fn touch_start(&mut self, target: i32, coords: &[f32]) -> String {
        let touches = InputEvent::touches(&points(coords));
        self.event(target, InputEvent::TouchStart { touches })
    }

    pub fn touch_move(&mut self, target: i32, coords: &[f32]) -> String {
        let touches = InputEvent::touches(&points(coords));
        self.event(target, InputEvent::TouchMove { touches })
    }

    /// `coords` lists the touches still down.
    pub fn touch_end(&mut self, target: i32, coords: &[f32]) -> String {
        let touches = InputEvent::touches(&points(coords));
        self.event(target, InputEvent::TouchEnd { touches })
    }

    pub fn click(&mut self, target: i32) -> String {
        self.event(target, InputEvent::Click)
    }

    pub fn key(&mut self, key: &str) -> String {
        self.event(-1, InputEvent::Key {
            key: key.to_string(),
        })
    }
}

impl MzPlugin {
    fn node(&self, key: i32) -> Option<NodeIndex> {
        let idx = NodeIndex::new(usize::try_from(key).ok()?);
        self.doc.get(idx).map(|_| idx)
    }

    fn event(&mut self, target: i32, event: InputEvent) -> String {
        let target = self.node(target);
        self.plugin.handle_event(&mut self.doc, target, &event);
        self.drain()
    }

    /// Serialize and clear the pending patch journal.
    fn drain(&mut self) -> String {
        let patches = self.doc.take_patches();
        serde_json::to_string(&patches).unwrap_or_else(|_| "[]".to_string())
    }
}

fn parse_signal(name: &str) -> Option<HostSignal> {
    match name {
        "layout-ready" => Some(HostSignal::LayoutReady),
        "layout-change" => Some(HostSignal::LayoutChange),
        "active-leaf-change" => Some(HostSignal::ActiveLeafChange),
        "file-open" => Some(HostSignal::FileOpen),
        _ => None,
    }
}

fn points(coords: &[f32]) -> Vec<Point> {
    coords
        .chunks_exact(2)
        .map(|pair| Point::new(pair[0], pair[1]))
        .collect()
}

fn error_json(message: &str) -> String {
    let escaped = message.replace('\\', "\\\\").replace('"', "\\\"");
    format!(r#"{{"ok":false,"error":"{escaped}"}}"#)
}

/// Set up a panic hook that logs to the browser console.
fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Mermaid Zoom WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}

// ─── Standalone validation ───────────────────────────────────────────────

/// Validate a configuration object.
/// Returns JSON: `{"ok":true}` or `{"ok":false,"error":"..."}`.
#[wasm_bindgen]
pub fn validate_config(config_json: &str) -> String {
    match ZoomConfig::from_json(config_json) {
        Ok(_) => r#"{"ok":true}"#.to_string(),
        Err(e) => error_json(&e),
    }
}
