//! Mirrored host document tree.
//!
//! The host's live DOM is mirrored as an ordered tree stored in a
//! `StableDiGraph`: edges go parent → child, sibling order is kept in an
//! explicit per-parent list. Host-inserted content enters through the
//! `import_*` methods (not journaled); every mutation the plugin makes is
//! recorded as a `DomPatch` so a bridge can replay it onto the real DOM.

use crate::geom::{Rect, Size};
use crate::id::{Atom, Uid};
use petgraph::Direction;
use petgraph::graph::NodeIndex;
use petgraph::stable_graph::StableDiGraph;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::HashMap;

// ─── UI roles ────────────────────────────────────────────────────────────

/// Button kinds in the viewport and modal control bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ControlKind {
    ZoomIn,
    ZoomOut,
    Reset,
    Fullscreen,
    Close,
}

impl ControlKind {
    /// Button face text. The fullscreen button carries an icon instead.
    pub fn label(self) -> Option<&'static str> {
        match self {
            Self::ZoomIn => Some("+"),
            Self::ZoomOut => Some("-"),
            Self::Reset => Some("⟲"),
            Self::Close => Some("✕"),
            Self::Fullscreen => None,
        }
    }
}

/// The 8 resize handles: 4 corners + 4 edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum HandleEdge {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Bottom,
    Left,
    Right,
}

impl HandleEdge {
    pub const ALL: [HandleEdge; 8] = [
        Self::TopLeft,
        Self::TopRight,
        Self::BottomLeft,
        Self::BottomRight,
        Self::Top,
        Self::Bottom,
        Self::Left,
        Self::Right,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomLeft => "bottom-left",
            Self::BottomRight => "bottom-right",
            Self::Top => "top",
            Self::Bottom => "bottom",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    pub fn cursor(self) -> Cursor {
        match self {
            Self::TopLeft | Self::BottomRight => Cursor::NwseResize,
            Self::TopRight | Self::BottomLeft => Cursor::NeswResize,
            Self::Top | Self::Bottom => Cursor::NsResize,
            Self::Left | Self::Right => Cursor::EwResize,
        }
    }

    pub fn moves_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft | Self::Left)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight | Self::Right)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight | Self::Top)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Self::BottomLeft | Self::BottomRight | Self::Bottom)
    }
}

/// What a plugin-created element does when the user interacts with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Role {
    Control(ControlKind),
    ResizeHandle(HandleEdge),
    ScaleIndicator,
}

// ─── Style ───────────────────────────────────────────────────────────────

/// Pointer cursor affordances.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Cursor {
    #[serde(rename = "grab")]
    Grab,
    #[serde(rename = "grabbing")]
    Grabbing,
    #[serde(rename = "nwse-resize")]
    NwseResize,
    #[serde(rename = "nesw-resize")]
    NeswResize,
    #[serde(rename = "ns-resize")]
    NsResize,
    #[serde(rename = "ew-resize")]
    EwResize,
}

impl Cursor {
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
            Self::NwseResize => "nwse-resize",
            Self::NeswResize => "nesw-resize",
            Self::NsResize => "ns-resize",
            Self::EwResize => "ew-resize",
        }
    }
}

/// The inline style properties the plugin writes.
/// Static appearance (colors, borders, layout) lives in the host stylesheet.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub width: Option<f32>,
    pub height: Option<f32>,
    pub margin_left: Option<f32>,
    pub margin_top: Option<f32>,
    pub transform: Option<String>,
    pub transform_origin: Option<String>,
    pub cursor: Option<Cursor>,
    pub display: Option<String>,
}

/// A single inline-style write.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "prop", content = "value", rename_all = "kebab-case")]
pub enum StyleProp {
    Width(f32),
    Height(f32),
    MarginLeft(f32),
    MarginTop(f32),
    Transform(String),
    TransformOrigin(String),
    /// `None` clears the cursor back to inherited.
    Cursor(Option<Cursor>),
    Display(String),
}

impl Style {
    fn apply(&mut self, prop: &StyleProp) {
        match prop {
            StyleProp::Width(v) => self.width = Some(*v),
            StyleProp::Height(v) => self.height = Some(*v),
            StyleProp::MarginLeft(v) => self.margin_left = Some(*v),
            StyleProp::MarginTop(v) => self.margin_top = Some(*v),
            StyleProp::Transform(v) => self.transform = Some(v.clone()),
            StyleProp::TransformOrigin(v) => self.transform_origin = Some(v.clone()),
            StyleProp::Cursor(v) => self.cursor = *v,
            StyleProp::Display(v) => self.display = Some(v.clone()),
        }
    }
}

// ─── Elements ────────────────────────────────────────────────────────────

/// One node of the mirrored document.
#[derive(Debug, Clone)]
pub struct Element {
    /// Process-unique identity (never reused).
    pub uid: Uid,
    pub tag: Atom,
    /// The `id` attribute.
    pub id: Option<Atom>,
    pub classes: SmallVec<[Atom; 4]>,
    pub style: Style,
    pub text: Option<String>,
    /// Other attributes (icon geometry and the like).
    pub attrs: SmallVec<[(Atom, String); 2]>,
    pub role: Option<Role>,
    /// Last bounding rect reported by the host (zero until laid out).
    pub rect: Rect,
}

impl Element {
    pub fn new(tag: &str) -> Self {
        Self {
            uid: Uid::next(),
            tag: Atom::intern(tag),
            id: None,
            classes: SmallVec::new(),
            style: Style::default(),
            text: None,
            attrs: SmallVec::new(),
            role: None,
            rect: Rect::default(),
        }
    }

    /// A `div` with the given space-separated classes.
    pub fn div(classes: &str) -> Self {
        Self::new("div").with_classes(classes)
    }

    #[must_use]
    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(Atom::intern(id));
        self
    }

    #[must_use]
    pub fn with_classes(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            let atom = Atom::intern(class);
            if !self.classes.contains(&atom) {
                self.classes.push(atom);
            }
        }
        self
    }

    #[must_use]
    pub fn with_text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    #[must_use]
    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((Atom::intern(name), value.to_string()));
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn with_size(mut self, width: f32, height: f32) -> Self {
        self.rect.width = width;
        self.rect.height = height;
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c.as_str() == class)
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.as_str().eq_ignore_ascii_case(tag)
    }

    /// A copy with a fresh identity (used for deep clones).
    fn duplicate(&self) -> Self {
        Self {
            uid: Uid::next(),
            ..self.clone()
        }
    }
}

/// Non-owning reference to an element.
///
/// Resolves only while the same element (same `uid`) still occupies the slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementRef {
    pub index: NodeIndex,
    pub uid: Uid,
}

// ─── Patch journal ───────────────────────────────────────────────────────

/// Wire key for a node: its graph slot.
pub type NodeKey = u32;

pub fn node_key(idx: NodeIndex) -> NodeKey {
    idx.index() as NodeKey
}

/// One recorded plugin-side mutation, replayed by the host bridge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum DomPatch {
    Create {
        node: NodeKey,
        tag: Atom,
        id: Option<Atom>,
        classes: Vec<Atom>,
        text: Option<String>,
        attrs: Vec<(Atom, String)>,
        role: Option<Role>,
    },
    InsertBefore {
        parent: NodeKey,
        node: NodeKey,
        before: NodeKey,
    },
    Append {
        parent: NodeKey,
        node: NodeKey,
    },
    Remove {
        node: NodeKey,
    },
    /// Deep clone of `source`, detached, addressed as `node` from now on.
    /// `nodes` keys every element of the copy in pre-order, `node` first, so
    /// the host can pair them with the elements of its own clone.
    CloneSubtree {
        source: NodeKey,
        node: NodeKey,
        nodes: Vec<NodeKey>,
    },
    SetStyle {
        node: NodeKey,
        style: StyleProp,
    },
    SetText {
        node: NodeKey,
        text: String,
    },
    AddClass {
        node: NodeKey,
        class: Atom,
    },
    RemoveClass {
        node: NodeKey,
        class: Atom,
    },
}

// ─── Document ────────────────────────────────────────────────────────────

/// The mirrored document: an ordered tree rooted at `body`.
#[derive(Debug, Clone)]
pub struct Document {
    graph: StableDiGraph<Element, ()>,

    /// The `<body>` element; the tree root.
    pub body: NodeIndex,

    /// Ordered children per parent.
    child_order: HashMap<NodeIndex, Vec<NodeIndex>>,

    /// Window (viewport) size reported by the host.
    pub window: Size,

    patches: Vec<DomPatch>,
}

impl Document {
    #[must_use]
    pub fn new(window: Size) -> Self {
        let mut graph = StableDiGraph::new();
        let body = graph.add_node(Element::new("body").with_size(window.width, window.height));
        Self {
            graph,
            body,
            child_order: HashMap::new(),
            window,
            patches: Vec::new(),
        }
    }

    pub fn get(&self, idx: NodeIndex) -> Option<&Element> {
        self.graph.node_weight(idx)
    }

    pub fn get_mut(&mut self, idx: NodeIndex) -> Option<&mut Element> {
        self.graph.node_weight_mut(idx)
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Take a non-owning reference to a live element.
    pub fn reference(&self, idx: NodeIndex) -> Option<ElementRef> {
        self.get(idx).map(|el| ElementRef {
            index: idx,
            uid: el.uid,
        })
    }

    /// Resolve a reference; `None` once the element has been removed.
    pub fn resolve(&self, r: ElementRef) -> Option<NodeIndex> {
        self.get(r.index)
            .filter(|el| el.uid == r.uid)
            .map(|_| r.index)
    }

    // ─── Traversal ───────────────────────────────────────────────────────

    pub fn parent(&self, idx: NodeIndex) -> Option<NodeIndex> {
        self.graph
            .neighbors_directed(idx, Direction::Incoming)
            .next()
    }

    pub fn children(&self, idx: NodeIndex) -> &[NodeIndex] {
        self.child_order.get(&idx).map_or(&[], Vec::as_slice)
    }

    /// `idx` and all its descendants, in document (pre-)order.
    pub fn descendants(&self, idx: NodeIndex) -> Vec<NodeIndex> {
        let mut out = Vec::new();
        if self.get(idx).is_none() {
            return out;
        }
        let mut stack = vec![idx];
        while let Some(current) = stack.pop() {
            out.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        out
    }

    /// Nearest inclusive ancestor matching `pred` (like `Element.closest`).
    pub fn closest(
        &self,
        idx: NodeIndex,
        mut pred: impl FnMut(&Element) -> bool,
    ) -> Option<NodeIndex> {
        let mut current = Some(idx);
        while let Some(node) = current {
            if pred(self.get(node)?) {
                return Some(node);
            }
            current = self.parent(node);
        }
        None
    }

    /// True if walking up from `idx` reaches `body`.
    pub fn is_attached(&self, idx: NodeIndex) -> bool {
        if self.get(idx).is_none() {
            return false;
        }
        let mut current = idx;
        loop {
            if current == self.body {
                return true;
            }
            match self.parent(current) {
                Some(p) => current = p,
                None => return false,
            }
        }
    }

    pub fn has_class(&self, idx: NodeIndex, class: &str) -> bool {
        self.get(idx).is_some_and(|el| el.has_class(class))
    }

    // ─── Host-side mirroring (not journaled) ─────────────────────────────

    /// Mirror a host-inserted element as the last child of `parent`.
    pub fn import_child(&mut self, parent: NodeIndex, element: Element) -> NodeIndex {
        let idx = self.graph.add_node(element);
        self.link(parent, idx, None);
        idx
    }

    /// Mirror a host-inserted element placed before `reference` in `parent`.
    /// Appends when `reference` is not a child of `parent`.
    pub fn import_before(
        &mut self,
        parent: NodeIndex,
        element: Element,
        reference: NodeIndex,
    ) -> NodeIndex {
        let idx = self.graph.add_node(element);
        let before = (self.parent(reference) == Some(parent)).then_some(reference);
        self.link(parent, idx, before);
        idx
    }

    /// Record a host-reported bounding rect.
    pub fn set_rect(&mut self, idx: NodeIndex, rect: Rect) {
        if let Some(el) = self.get_mut(idx) {
            el.rect = rect;
        }
        if idx == self.body {
            self.window = rect.size();
        }
    }

    /// Mirror a host-side removal of `idx` and its subtree.
    pub fn forget_subtree(&mut self, idx: NodeIndex) {
        if idx == self.body {
            return;
        }
        self.drop_subtree(idx);
    }

    // ─── Plugin-side mutations (journaled) ───────────────────────────────

    /// Create a detached element.
    pub fn create_element(&mut self, element: Element) -> NodeIndex {
        let tag = element.tag;
        let id = element.id;
        let classes = element.classes.to_vec();
        let text = element.text.clone();
        let attrs = element.attrs.to_vec();
        let role = element.role;
        let idx = self.graph.add_node(element);
        self.patches.push(DomPatch::Create {
            node: node_key(idx),
            tag,
            id,
            classes,
            text,
            attrs,
            role,
        });
        idx
    }

    /// Create an element and append it to `parent`.
    pub fn create_child(&mut self, parent: NodeIndex, element: Element) -> NodeIndex {
        let idx = self.create_element(element);
        self.append_child(parent, idx);
        idx
    }

    /// Move (or insert) `child` as the last child of `parent`.
    pub fn append_child(&mut self, parent: NodeIndex, child: NodeIndex) {
        if self.get(parent).is_none() || self.get(child).is_none() {
            return;
        }
        self.link(parent, child, None);
        self.patches.push(DomPatch::Append {
            parent: node_key(parent),
            node: node_key(child),
        });
    }

    /// Move (or insert) `child` into `parent` immediately before `reference`.
    /// Falls back to appending when `reference` is not a child of `parent`.
    pub fn insert_before(&mut self, parent: NodeIndex, child: NodeIndex, reference: NodeIndex) {
        if self.parent(reference) != Some(parent) {
            self.append_child(parent, child);
            return;
        }
        if self.get(child).is_none() {
            return;
        }
        self.link(parent, child, Some(reference));
        self.patches.push(DomPatch::InsertBefore {
            parent: node_key(parent),
            node: node_key(child),
            before: node_key(reference),
        });
    }

    /// Remove `idx` and everything below it.
    pub fn remove_subtree(&mut self, idx: NodeIndex) {
        if self.get(idx).is_none() || idx == self.body {
            return;
        }
        self.drop_subtree(idx);
        self.patches.push(DomPatch::Remove {
            node: node_key(idx),
        });
    }

    /// Deep-copy `source` into a new detached subtree with fresh identities.
    /// The copy holds no reference back to the source.
    pub fn clone_subtree(&mut self, source: NodeIndex) -> Option<NodeIndex> {
        let mut nodes = Vec::new();
        let root = self.copy_node(source, &mut nodes)?;
        self.patches.push(DomPatch::CloneSubtree {
            source: node_key(source),
            node: node_key(root),
            nodes,
        });
        Some(root)
    }

    pub fn set_style(&mut self, idx: NodeIndex, prop: StyleProp) {
        let Some(el) = self.get_mut(idx) else {
            return;
        };
        el.style.apply(&prop);
        self.patches.push(DomPatch::SetStyle {
            node: node_key(idx),
            style: prop,
        });
    }

    pub fn set_text(&mut self, idx: NodeIndex, text: &str) {
        let Some(el) = self.get_mut(idx) else {
            return;
        };
        if el.text.as_deref() == Some(text) {
            return;
        }
        el.text = Some(text.to_string());
        self.patches.push(DomPatch::SetText {
            node: node_key(idx),
            text: text.to_string(),
        });
    }

    pub fn add_class(&mut self, idx: NodeIndex, class: &str) {
        let atom = Atom::intern(class);
        let Some(el) = self.get_mut(idx) else {
            return;
        };
        if el.classes.contains(&atom) {
            return;
        }
        el.classes.push(atom);
        self.patches.push(DomPatch::AddClass {
            node: node_key(idx),
            class: atom,
        });
    }

    pub fn remove_class(&mut self, idx: NodeIndex, class: &str) {
        let atom = Atom::intern(class);
        let Some(el) = self.get_mut(idx) else {
            return;
        };
        let before = el.classes.len();
        el.classes.retain(|c| *c != atom);
        if el.classes.len() != before {
            self.patches.push(DomPatch::RemoveClass {
                node: node_key(idx),
                class: atom,
            });
        }
    }

    /// Drain the mutation journal.
    pub fn take_patches(&mut self) -> Vec<DomPatch> {
        std::mem::take(&mut self.patches)
    }

    pub fn pending_patches(&self) -> &[DomPatch] {
        &self.patches
    }

    // ─── Internals ───────────────────────────────────────────────────────

    fn unlink(&mut self, child: NodeIndex) {
        if let Some(old_parent) = self.parent(child) {
            if let Some(edge) = self.graph.find_edge(old_parent, child) {
                self.graph.remove_edge(edge);
            }
            if let Some(siblings) = self.child_order.get_mut(&old_parent) {
                siblings.retain(|&s| s != child);
            }
        }
    }

    fn link(&mut self, parent: NodeIndex, child: NodeIndex, before: Option<NodeIndex>) {
        if self.get(parent).is_none() || parent == child {
            return;
        }
        self.unlink(child);
        self.graph.add_edge(parent, child, ());
        let siblings = self.child_order.entry(parent).or_default();
        let pos = before
            .and_then(|r| siblings.iter().position(|&s| s == r))
            .unwrap_or(siblings.len());
        siblings.insert(pos, child);
    }

    fn drop_subtree(&mut self, idx: NodeIndex) {
        self.unlink(idx);
        for node in self.descendants(idx) {
            self.child_order.remove(&node);
            self.graph.remove_node(node);
        }
    }

    fn copy_node(&mut self, source: NodeIndex, keys: &mut Vec<NodeKey>) -> Option<NodeIndex> {
        let copy = self.get(source)?.duplicate();
        let idx = self.graph.add_node(copy);
        keys.push(node_key(idx));
        let children = self.children(source).to_vec();
        for child in children {
            if let Some(child_copy) = self.copy_node(child, keys) {
                self.link(idx, child_copy, None);
            }
        }
        Some(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn doc() -> Document {
        Document::new(Size::new(1280.0, 800.0))
    }

    #[test]
    fn insert_before_keeps_sibling_order() {
        let mut d = doc();
        let a = d.import_child(d.body, Element::div("a"));
        let c = d.import_child(d.body, Element::div("c"));
        let b = d.create_element(Element::div("b"));
        d.insert_before(d.body, b, c);
        assert_eq!(d.children(d.body), &[a, b, c]);
    }

    #[test]
    fn import_before_mirrors_host_order() {
        let mut d = doc();
        let a = d.import_child(d.body, Element::div("a"));
        let c = d.import_child(d.body, Element::div("c"));
        let b = d.import_before(d.body, Element::div("b"), c);
        let stray = d.import_child(a, Element::div("x"));
        let tail = d.import_before(d.body, Element::div("tail"), stray);
        assert_eq!(d.children(d.body), &[a, b, c, tail]);
        assert!(d.pending_patches().is_empty());
    }

    #[test]
    fn moving_a_node_reparents_it() {
        let mut d = doc();
        let host = d.import_child(d.body, Element::div("mermaid"));
        let wrapper = d.create_child(d.body, Element::div("wrapper"));
        d.append_child(wrapper, host);
        assert_eq!(d.parent(host), Some(wrapper));
        assert_eq!(d.children(d.body), &[wrapper]);
        assert!(d.is_attached(host));
    }

    #[test]
    fn descendants_are_in_document_order() {
        let mut d = doc();
        let a = d.import_child(d.body, Element::div("a"));
        let a1 = d.import_child(a, Element::div("a1"));
        let a2 = d.import_child(a, Element::div("a2"));
        let b = d.import_child(d.body, Element::div("b"));
        assert_eq!(d.descendants(d.body), vec![d.body, a, a1, a2, b]);
    }

    #[test]
    fn closest_is_inclusive() {
        let mut d = doc();
        let host = d.import_child(d.body, Element::div("mermaid"));
        let svg = d.import_child(host, Element::new("svg"));
        assert_eq!(d.closest(svg, |el| el.has_class("mermaid")), Some(host));
        assert_eq!(d.closest(host, |el| el.has_class("mermaid")), Some(host));
        assert_eq!(d.closest(svg, |el| el.has_class("nope")), None);
    }

    #[test]
    fn removed_references_stop_resolving() {
        let mut d = doc();
        let host = d.import_child(d.body, Element::div("mermaid"));
        let svg = d.import_child(host, Element::new("svg"));
        let r = d.reference(svg).unwrap();
        d.remove_subtree(host);
        assert_eq!(d.resolve(r), None);
        // Slot reuse must not revive the old reference.
        let other = d.import_child(d.body, Element::new("svg"));
        if other == r.index {
            assert_eq!(d.resolve(r), None);
        }
    }

    #[test]
    fn clone_is_detached_with_fresh_identity() {
        let mut d = doc();
        let svg = d.import_child(d.body, Element::new("svg").with_id("mermaid-1"));
        let g = d.import_child(svg, Element::new("g"));
        let copy = d.clone_subtree(svg).unwrap();
        assert_eq!(d.parent(copy), None);
        assert!(!d.is_attached(copy));
        assert_ne!(d.get(copy).unwrap().uid, d.get(svg).unwrap().uid);
        assert_eq!(d.get(copy).unwrap().id, d.get(svg).unwrap().id);
        let copied_child = d.children(copy)[0];
        assert_ne!(copied_child, g);
        assert_eq!(
            d.take_patches(),
            vec![DomPatch::CloneSubtree {
                source: node_key(svg),
                node: node_key(copy),
                nodes: vec![node_key(copy), node_key(copied_child)],
            }]
        );
        // Removing the copy leaves the source intact.
        d.remove_subtree(copy);
        assert!(d.is_attached(svg));
        assert_eq!(d.children(svg), &[g]);
    }

    #[test]
    fn journal_records_plugin_mutations_only() {
        let mut d = doc();
        let host = d.import_child(d.body, Element::div("mermaid"));
        assert!(d.pending_patches().is_empty());

        let container = d.create_element(Element::div("mermaid-zoom-container"));
        d.insert_before(d.body, container, host);
        d.set_style(container, StyleProp::Width(320.0));
        d.add_class(container, "mermaid-zoom-container");

        let patches = d.take_patches();
        assert_eq!(patches.len(), 3);
        assert!(matches!(patches[0], DomPatch::Create { .. }));
        assert_eq!(
            patches[1],
            DomPatch::InsertBefore {
                parent: node_key(d.body),
                node: node_key(container),
                before: node_key(host),
            }
        );
        assert_eq!(
            patches[2],
            DomPatch::SetStyle {
                node: node_key(container),
                style: StyleProp::Width(320.0),
            }
        );
        assert_eq!(d.get(container).unwrap().style.width, Some(320.0));
        assert!(d.take_patches().is_empty());
    }

    #[test]
    fn patch_json_shape() {
        let patch = DomPatch::SetStyle {
            node: 7,
            style: StyleProp::Cursor(Some(Cursor::Grabbing)),
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(
            json,
            r#"{"op":"setStyle","node":7,"style":{"prop":"cursor","value":"grabbing"}}"#
        );
    }

    #[test]
    fn handle_edges_and_cursors() {
        assert_eq!(HandleEdge::ALL.len(), 8);
        assert!(HandleEdge::TopLeft.moves_left() && HandleEdge::TopLeft.moves_top());
        assert!(!HandleEdge::Top.moves_left() && !HandleEdge::Top.moves_right());
        assert_eq!(HandleEdge::BottomRight.cursor(), Cursor::NwseResize);
        assert_eq!(HandleEdge::Left.cursor().as_css(), "ew-resize");
    }
}
