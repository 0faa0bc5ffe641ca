//! # Document
//!
//! Arena of [`Element`]s rooted at a `<body>` node, plus the focus pointer
//! and the registry of document-level event listeners.
//!
//! Nodes are never freed: removing a node only unlinks it from its parent,
//! the same way a detached DOM subtree stays alive while referenced.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

use switcher_core::prelude::*;

use crate::event::EventKind;
use crate::html;
use crate::node::{Element, NodeId};

/// Shared, single-threaded handle to a document
pub type DocumentHandle = Rc<RefCell<Document>>;

/// Identifier of a registered document-level listener
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

#[derive(Debug)]
pub struct Document {
    nodes: Vec<Element>,
    body: NodeId,
    focused: Option<NodeId>,
    listeners: BTreeMap<ListenerId, EventKind>,
    next_listener: u64,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only `<body>`
    pub fn new() -> Self {
        Self {
            nodes: vec![Element::new("body")],
            body: NodeId::new(0),
            focused: None,
            listeners: BTreeMap::new(),
            next_listener: 0,
        }
    }

    /// Create an empty document behind a shared handle
    pub fn new_handle() -> DocumentHandle {
        Rc::new(RefCell::new(Self::new()))
    }

    pub fn body(&self) -> NodeId {
        self.body
    }

    // ─────────────────────────────────────────────────────────────
    // Element access
    // ─────────────────────────────────────────────────────────────

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Element::new(tag));
        id
    }

    pub fn get(&self, id: NodeId) -> Option<&Element> {
        self.nodes.get(id.index())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        self.nodes.get_mut(id.index())
    }

    /// Like [`Document::get`], failing with [`Error::UnknownNode`]
    pub fn element(&self, id: NodeId) -> Result<&Element> {
        self.get(id).ok_or(Error::UnknownNode { id: id.index() })
    }

    /// Like [`Document::get_mut`], failing with [`Error::UnknownNode`]
    pub fn element_mut(&mut self, id: NodeId) -> Result<&mut Element> {
        self.get_mut(id).ok_or(Error::UnknownNode { id: id.index() })
    }

    // ─────────────────────────────────────────────────────────────
    // Tree structure
    // ─────────────────────────────────────────────────────────────

    /// Append `child` as the last child of `parent`.
    ///
    /// A child that already has a parent is moved.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.element(parent)?;
        self.element(child)?;
        if parent == child || self.contains(child, parent) {
            return Err(Error::hierarchy(format!(
                "cannot append {} inside its own subtree",
                child
            )));
        }

        self.unlink(child);
        self.nodes[child.index()].parent = Some(parent);
        self.nodes[parent.index()].children.push(child);
        Ok(())
    }

    /// Unlink `id` from its parent.
    ///
    /// Returns false when the node is unknown or already detached. Focus
    /// inside the removed subtree is cleared.
    pub fn remove(&mut self, id: NodeId) -> bool {
        if self.get(id).and_then(Element::parent).is_none() {
            return false;
        }

        if self.focused.is_some_and(|f| self.contains(id, f)) {
            self.focused = None;
        }
        self.unlink(id);
        true
    }

    fn unlink(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.index()].parent.take() {
            self.nodes[parent.index()].children.retain(|c| *c != id);
        }
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.get(id).and_then(Element::parent)
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.get(id).map(Element::children).unwrap_or(&[])
    }

    /// Inclusive descendant test, as `Node.contains`
    pub fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// Whether the node is reachable from `<body>`
    pub fn is_connected(&self, id: NodeId) -> bool {
        self.contains(self.body, id)
    }

    // ─────────────────────────────────────────────────────────────
    // Focus
    // ─────────────────────────────────────────────────────────────

    pub fn focus(&mut self, id: NodeId) -> Result<()> {
        self.element(id)?;
        self.focused = Some(id);
        Ok(())
    }

    pub fn blur(&mut self) {
        self.focused = None;
    }

    pub fn focused(&self) -> Option<NodeId> {
        self.focused
    }

    // ─────────────────────────────────────────────────────────────
    // Document-level listeners
    // ─────────────────────────────────────────────────────────────

    /// Register a listener; prefer [`ListenerGuard::register`]
    pub fn add_listener(&mut self, kind: EventKind) -> ListenerId {
        let id = ListenerId(self.next_listener);
        self.next_listener += 1;
        self.listeners.insert(id, kind);
        trace!("Registered document {:?} listener {:?}", kind, id);
        id
    }

    /// Remove a listener; returns false if it was not registered
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let removed = self.listeners.remove(&id).is_some();
        if removed {
            trace!("Removed document listener {:?}", id);
        }
        removed
    }

    pub fn has_listener(&self, id: ListenerId) -> bool {
        self.listeners.contains_key(&id)
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listener_count_for(&self, kind: EventKind) -> usize {
        self.listeners.values().filter(|k| **k == kind).count()
    }

    // ─────────────────────────────────────────────────────────────
    // Serialisation
    // ─────────────────────────────────────────────────────────────

    /// Serialise `id` and its subtree as HTML
    pub fn outer_html(&self, id: NodeId) -> String {
        html::outer_html(self, id)
    }
}

/// Document-level listener registration that unregisters itself on drop.
///
/// The document does not call listeners itself: the host routes events to
/// the owner, which checks [`is_registered`](Self::is_registered) before
/// acting on document-wide events. Holds only a weak reference, so an
/// outstanding guard never keeps a document alive.
#[derive(Debug)]
pub struct ListenerGuard {
    document: Weak<RefCell<Document>>,
    id: ListenerId,
}

impl ListenerGuard {
    pub fn register(document: &DocumentHandle, kind: EventKind) -> Self {
        let id = document.borrow_mut().add_listener(kind);
        Self {
            document: Rc::downgrade(document),
            id,
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Whether the document still holds this registration
    pub fn is_registered(&self) -> bool {
        self.document.upgrade().is_some_and(|document| {
            document
                .try_borrow()
                .is_ok_and(|doc| doc.has_listener(self.id))
        })
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        let Some(document) = self.document.upgrade() else {
            return;
        };
        match document.try_borrow_mut() {
            Ok(mut doc) => {
                doc.remove_listener(self.id);
            }
            Err(_) => warn!(
                "Document busy while dropping listener {:?}; listener leaked",
                self.id
            ),
        };
    }
}
