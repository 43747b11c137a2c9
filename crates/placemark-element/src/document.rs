//! The element tree and its change-notification machinery.
//!
//! Nodes live in an arena owned by [`Document`] and are addressed by
//! [`NodeId`]. Nodes whose tag resolves to an [`ElementKind`] take part in
//! the element model: they project themselves to JSON and notify their
//! nearest model ancestor when they change.
//!
//! Notification flow:
//!
//! 1. an observed attribute or the child set of an element changes, and the
//!    element is marked dirty; the first dirtying queues one flush;
//! 2. at the next [`Document::run_microtasks`] the flush computes the
//!    projection, diffs it against the last one (for kinds that track
//!    changes) and dispatches a [`ChangeEvent`];
//! 3. dispatch walks parent pointers to the nearest model ancestor, which
//!    absorbs the event into its own pending flush. Events with no model
//!    ancestor land in the outbound queue ([`Document::take_events`]) when
//!    the element is connected to the root.

use std::collections::VecDeque;

use indexmap::IndexMap;
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::{debug, trace};

use placemark_json_patch::{diff, Patch};

use crate::kinds::ElementKind;
use crate::queue::MicrotaskQueue;
use crate::registry;
use crate::schema::{coerce_scalar, Descriptor};

/// Attribute naming the parent slot a node is assigned to.
pub const SLOT_ATTRIBUTE: &str = "slot";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A change notification. `patches: None` means "recompute everything".
#[derive(Debug, Clone, PartialEq)]
pub struct ChangeEvent {
    pub target: NodeId,
    pub patches: Option<Vec<Patch>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DocumentError {
    #[error("unknown node {0:?}")]
    UnknownNode(NodeId),
    #[error("{child:?} cannot be inserted under {parent:?}")]
    HierarchyRequest { parent: NodeId, child: NodeId },
    #[error("{reference:?} is not a child of {parent:?}")]
    NotAChild { parent: NodeId, reference: NodeId },
}

/// Per-element batching state.
#[derive(Debug, Default)]
struct Batch {
    queued: bool,
    prev: Option<Value>,
}

#[derive(Debug)]
struct Node {
    tag: String,
    kind: Option<ElementKind>,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    attributes: IndexMap<String, String>,
    batch: Batch,
}

impl Node {
    fn new(tag: &str, kind: Option<ElementKind>) -> Self {
        Self {
            tag: tag.to_string(),
            kind,
            parent: None,
            children: Vec::new(),
            attributes: IndexMap::new(),
            batch: Batch::default(),
        }
    }
}

#[derive(Debug)]
pub struct Document {
    nodes: Vec<Node>,
    tasks: MicrotaskQueue<NodeId>,
    events: VecDeque<ChangeEvent>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub const ROOT: NodeId = NodeId(0);

    pub fn new() -> Self {
        Self::with_root("#document")
    }

    /// Creates a document whose root node has the given tag. The root never
    /// takes part in the element model.
    pub fn with_root(tag: &str) -> Self {
        registry::register_defaults();
        Self {
            nodes: vec![Node::new(tag, None)],
            tasks: MicrotaskQueue::new(),
            events: VecDeque::new(),
        }
    }

    pub fn root(&self) -> NodeId {
        Self::ROOT
    }

    fn node(&self, id: NodeId) -> Result<&Node, DocumentError> {
        self.nodes.get(id.0).ok_or(DocumentError::UnknownNode(id))
    }

    fn node_mut(&mut self, id: NodeId) -> Result<&mut Node, DocumentError> {
        self.nodes.get_mut(id.0).ok_or(DocumentError::UnknownNode(id))
    }

    // ── Creation ──────────────────────────────────────────────────────────

    /// Creates a detached node. Registered tags create model elements;
    /// anything else creates a plain node.
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let kind = registry::lookup(tag);
        self.push(tag, kind)
    }

    pub fn create_element_of(&mut self, kind: ElementKind) -> NodeId {
        let tag = registry::tag_of(kind);
        self.push(&tag, Some(kind))
    }

    fn push(&mut self, tag: &str, kind: Option<ElementKind>) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node::new(tag, kind));
        id
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn tag(&self, id: NodeId) -> Option<&str> {
        self.node(id).ok().map(|n| n.tag.as_str())
    }

    pub fn kind(&self, id: NodeId) -> Option<ElementKind> {
        self.node(id).ok()?.kind
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).ok()?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    pub fn attribute(&self, id: NodeId, name: &str) -> Option<&str> {
        self.node(id).ok()?.attributes.get(name).map(String::as_str)
    }

    /// Whether `id` can be reached from the root.
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.is_inclusive_ancestor(Self::ROOT, id)
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Descendants of `id` in document order, `id` excluded.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id).iter().rev().copied().collect();
        while let Some(next) = stack.pop() {
            out.push(next);
            stack.extend(self.children(next).iter().rev());
        }
        out
    }

    /// Children assigned to slot `slot` of `id`, in document order.
    ///
    /// A child is assigned by its `slot` attribute. Children without one go
    /// to the schema's implicit slot, if it has one.
    pub fn assigned(&self, id: NodeId, slot: &str) -> Vec<NodeId> {
        let Ok(node) = self.node(id) else {
            return Vec::new();
        };
        let implicit = node.kind.and_then(|k| k.schema().implicit_slot()) == Some(slot);
        node.children
            .iter()
            .copied()
            .filter(|child| match self.attribute(*child, SLOT_ATTRIBUTE) {
                Some(name) => name == slot,
                None => implicit,
            })
            .collect()
    }

    /// Assigned children that take part in the element model.
    pub fn assigned_elements(&self, id: NodeId, slot: &str) -> Vec<NodeId> {
        self.assigned(id, slot)
            .into_iter()
            .filter(|child| self.kind(*child).is_some())
            .collect()
    }

    /// Projects `id` to JSON. `None` for plain nodes and for elements that
    /// currently contribute nothing.
    pub fn json(&self, id: NodeId) -> Option<Value> {
        let node = self.node(id).ok()?;
        let kind = node.kind?;
        let mut json = Map::new();
        for (key, descriptor) in kind.schema().entries() {
            let value = match *descriptor {
                Descriptor::Literal(literal) => Some(literal.to_value()),
                Descriptor::Array => Some(Value::Array(
                    self.assigned_elements(id, key)
                        .into_iter()
                        .filter_map(|child| self.json(child))
                        .collect(),
                )),
                // first assigned element wins, later ones are ignored
                Descriptor::Object => self
                    .assigned_elements(id, key)
                    .first()
                    .and_then(|child| self.json(*child)),
                Descriptor::Scalar { coercer, optional } => {
                    let raw = node.attributes.get(*key).map(String::as_str);
                    coerce_scalar(key, coercer, optional, raw)
                }
            };
            if let Some(value) = value {
                json.insert(key.to_string(), value);
            }
        }
        kind.finish(json, &node.attributes)
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<(), DocumentError> {
        self.insert_before(parent, child, None)
    }

    /// Inserts `child` under `parent` before `reference` (at the end when
    /// `None`), moving it out of its current parent first.
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        child: NodeId,
        reference: Option<NodeId>,
    ) -> Result<(), DocumentError> {
        self.node(parent)?;
        self.node(child)?;
        if child == Self::ROOT || self.is_inclusive_ancestor(child, parent) {
            return Err(DocumentError::HierarchyRequest { parent, child });
        }
        let reference = match reference {
            Some(r) if r == child => self.next_sibling(child),
            other => other,
        };
        if let Some(reference) = reference {
            if self.node(reference)?.parent != Some(parent) {
                return Err(DocumentError::NotAChild { parent, reference });
            }
        }

        self.detach(child);
        let siblings = &mut self.nodes[parent.0].children;
        let index = reference
            .and_then(|r| siblings.iter().position(|c| *c == r))
            .unwrap_or(siblings.len());
        siblings.insert(index, child);
        self.nodes[child.0].parent = Some(parent);

        self.children_changed(parent);
        if self.nodes[child.0].kind.is_some() {
            self.mark_dirty(child);
        }
        Ok(())
    }

    /// Detaches `id` from its parent. The node stays valid and can be
    /// re-inserted.
    pub fn remove(&mut self, id: NodeId) -> Result<(), DocumentError> {
        self.node(id)?;
        self.detach(id);
        Ok(())
    }

    fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        let siblings = self.children(self.parent(id)?);
        let index = siblings.iter().position(|c| *c == id)?;
        siblings.get(index + 1).copied()
    }

    fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|c| *c != id);
            self.children_changed(parent);
        }
    }

    pub fn set_attribute(
        &mut self,
        id: NodeId,
        name: &str,
        value: impl Into<String>,
    ) -> Result<(), DocumentError> {
        self.node_mut(id)?
            .attributes
            .insert(name.to_string(), value.into());
        self.attribute_changed(id, name);
        Ok(())
    }

    /// Removes an attribute, returning its last value.
    pub fn remove_attribute(&mut self, id: NodeId, name: &str) -> Result<Option<String>, DocumentError> {
        let removed = self.node_mut(id)?.attributes.shift_remove(name);
        if removed.is_some() {
            self.attribute_changed(id, name);
        }
        Ok(removed)
    }

    fn attribute_changed(&mut self, id: NodeId, name: &str) {
        if name == SLOT_ATTRIBUTE {
            if let Some(parent) = self.nodes[id.0].parent {
                self.children_changed(parent);
            }
        }
        if self.nodes[id.0].kind.is_some_and(|k| k.schema().observes(name)) {
            self.mark_dirty(id);
        }
    }

    fn children_changed(&mut self, parent: NodeId) {
        if self.nodes[parent.0].kind.is_some() {
            self.mark_dirty(parent);
        }
    }

    // ── Batching ──────────────────────────────────────────────────────────

    /// Queues one flush for `id` unless one is already pending.
    fn mark_dirty(&mut self, id: NodeId) {
        let batch = &mut self.nodes[id.0].batch;
        if !batch.queued {
            batch.queued = true;
            self.tasks.schedule(id);
        }
    }

    /// Whether a flush is pending for `id`.
    pub fn is_queued(&self, id: NodeId) -> bool {
        self.node(id).is_ok_and(|n| n.batch.queued)
    }

    pub fn has_pending_microtasks(&self) -> bool {
        !self.tasks.is_empty()
    }

    /// Runs queued flushes until none are left, including the ones queued
    /// by ancestors absorbing their children's notifications.
    ///
    /// An element with a pending descendant goes back to the end of the
    /// queue, so it flushes once, after everything below it has settled.
    pub fn run_microtasks(&mut self) {
        while let Some(id) = self.tasks.pop() {
            if self.has_queued_descendant(id) {
                trace!(node = ?id, "flush deferred behind a descendant");
                self.tasks.schedule(id);
                continue;
            }
            self.flush(id);
        }
    }

    fn has_queued_descendant(&self, id: NodeId) -> bool {
        self.descendants(id).into_iter().any(|d| self.is_queued(d))
    }

    /// Drains the notifications that reached the root.
    pub fn take_events(&mut self) -> Vec<ChangeEvent> {
        self.events.drain(..).collect()
    }

    fn flush(&mut self, id: NodeId) {
        let Some(kind) = self.kind(id) else {
            return;
        };
        let patches = if kind.tracks_changes() {
            let next = self.json(id).unwrap_or(Value::Null);
            let batch = &mut self.nodes[id.0].batch;
            let patches = diff(batch.prev.as_ref(), &next);
            batch.prev = Some(next);
            Some(patches)
        } else {
            None
        };
        // cleared before dispatch so that a re-entrant dirtying queues a new flush
        self.nodes[id.0].batch.queued = false;
        self.dispatch(ChangeEvent { target: id, patches });
    }

    fn dispatch(&mut self, event: ChangeEvent) {
        let mut current = self.parent(event.target);
        while let Some(ancestor) = current {
            if self.nodes[ancestor.0].kind.is_some() {
                trace!(node = ?event.target, ?ancestor, "notification absorbed");
                self.mark_dirty(ancestor);
                return;
            }
            current = self.parent(ancestor);
        }
        if self.is_connected(event.target) {
            self.events.push_back(event);
        } else {
            debug!(node = ?event.target, "dropping notification from a detached element");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unknown_tags_create_plain_nodes() {
        let mut doc = Document::new();
        let div = doc.create_element("div");
        let layer = doc.create_element("maplibre-layer");
        assert_eq!(doc.kind(div), None);
        assert_eq!(doc.kind(layer), Some(ElementKind::Layer));
        assert_eq!(doc.json(div), None);
    }

    #[test]
    fn cannot_insert_into_own_subtree() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        doc.append_child(a, b).unwrap();
        assert_eq!(
            doc.append_child(b, a),
            Err(DocumentError::HierarchyRequest { parent: b, child: a })
        );
        assert_eq!(
            doc.append_child(a, a),
            Err(DocumentError::HierarchyRequest { parent: a, child: a })
        );
    }

    #[test]
    fn insert_before_orders_children() {
        let mut doc = Document::new();
        let parent = doc.create_element("div");
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let c = doc.create_element("div");
        doc.append_child(parent, a).unwrap();
        doc.append_child(parent, c).unwrap();
        doc.insert_before(parent, b, Some(c)).unwrap();
        assert_eq!(doc.children(parent), &[a, b, c]);

        let stranger = doc.create_element("div");
        assert_eq!(
            doc.insert_before(parent, stranger, Some(stranger)),
            Ok(())
        );
        assert_eq!(doc.children(parent), &[a, b, c, stranger]);
        assert_eq!(
            doc.insert_before(a, b, Some(c)),
            Err(DocumentError::NotAChild { parent: a, reference: c })
        );
    }

    #[test]
    fn moving_a_node_detaches_it_first() {
        let mut doc = Document::new();
        let first = doc.create_element("div");
        let second = doc.create_element("div");
        let child = doc.create_element("div");
        doc.append_child(first, child).unwrap();
        doc.append_child(second, child).unwrap();
        assert!(doc.children(first).is_empty());
        assert_eq!(doc.children(second), &[child]);
        assert_eq!(doc.parent(child), Some(second));
    }

    #[test]
    fn unobserved_attributes_do_not_dirty() {
        let mut doc = Document::new();
        let layer = doc.create_element_of(ElementKind::Layer);
        doc.set_attribute(layer, "class", "wide").unwrap();
        assert!(!doc.is_queued(layer));
        doc.set_attribute(layer, "id", "a").unwrap();
        assert!(doc.is_queued(layer));
    }

    #[test]
    fn descendants_are_in_document_order() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");
        let c = doc.create_element("div");
        let root = doc.root();
        doc.append_child(root, a).unwrap();
        doc.append_child(a, b).unwrap();
        doc.append_child(root, c).unwrap();
        assert_eq!(doc.descendants(root), vec![a, b, c]);
    }

    #[test]
    fn flush_clears_queued_before_dispatch() {
        let mut doc = Document::new();
        let options = doc.create_element_of(ElementKind::Options);
        let root = doc.root();
        doc.append_child(root, options).unwrap();
        doc.run_microtasks();
        assert!(!doc.is_queued(options));
        assert_eq!(doc.take_events().len(), 1);

        doc.set_attribute(options, "zoom", "4").unwrap();
        doc.run_microtasks();
        let events = doc.take_events();
        assert_eq!(events.len(), 1);
        assert_eq!(
            events[0].patches,
            Some(vec![Patch::add("/zoom", json!(4))])
        );
    }
}
