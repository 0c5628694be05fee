#![forbid(unsafe_code)]

//! DOM seam: the narrow view of the document the engine is allowed to see.
//!
//! The engine never owns markup. It asks the host three kinds of questions:
//! where focus is, whether one node contains another, and which focusable
//! elements live under a container (in tree order). [`DomView`] and
//! [`DomFocus`] are those questions; [`Document`] is an in-memory arena that
//! answers them for headless use and tests.
//!
//! # Invariants
//!
//! - `descendants` yields nodes in tree (pre-order) order, excluding the
//!   container itself.
//! - A removed node and its subtree are detached: `is_attached` is false and
//!   `contains` from an attached ancestor is false.
//! - Focus only ever lands on an attached node. Removing the focused node
//!   leaves the document with no active element.

use crate::member::MemberId;

/// Identifier for a node in a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NodeId(u32);

impl NodeId {
    /// Wrap a host-assigned raw identifier.
    #[must_use]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// The raw identifier.
    #[inline]
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Element tag, reduced to what focusability depends on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Tag {
    /// `<button>`.
    Button,
    /// `<a>`; only focusable with an `href`.
    Anchor {
        /// Whether the anchor carries an `href` attribute.
        has_href: bool,
    },
    /// `<input>`.
    Input,
    /// `<select>`.
    Select,
    /// `<textarea>`.
    Textarea,
    /// Anything else (`div`, `li`, `td`, ...).
    Generic(String),
}

/// Element descriptor stored per node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Element tag.
    pub tag: Tag,
    /// `id` attribute, used as the member identifier.
    pub id: Option<MemberId>,
    /// `disabled` attribute.
    pub disabled: bool,
    /// Explicit `tabindex` attribute.
    pub tabindex: Option<i32>,
}

impl Element {
    /// Create an element with the given tag.
    #[must_use]
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            id: None,
            disabled: false,
            tabindex: None,
        }
    }

    /// `<button>`.
    #[must_use]
    pub fn button() -> Self {
        Self::new(Tag::Button)
    }

    /// `<a href>`.
    #[must_use]
    pub fn link() -> Self {
        Self::new(Tag::Anchor { has_href: true })
    }

    /// `<input>`.
    #[must_use]
    pub fn input() -> Self {
        Self::new(Tag::Input)
    }

    /// Generic container element (`div`, `ul`, ...).
    #[must_use]
    pub fn generic(name: impl Into<String>) -> Self {
        Self::new(Tag::Generic(name.into()))
    }

    /// Set the `id` attribute.
    #[must_use]
    pub fn with_id(mut self, id: impl Into<MemberId>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the `disabled` attribute.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set an explicit `tabindex`.
    #[must_use]
    pub fn with_tabindex(mut self, tabindex: i32) -> Self {
        self.tabindex = Some(tabindex);
        self
    }

    /// Whether the element belongs in the sequential focus order.
    ///
    /// Matches the union {button, link with href, input, select, textarea,
    /// any element with a non-negative explicit tabindex}, minus disabled
    /// elements. A negative explicit tabindex removes a natively focusable
    /// element from the order.
    #[must_use]
    pub fn is_focusable(&self) -> bool {
        if self.disabled {
            return false;
        }
        if let Some(tabindex) = self.tabindex {
            return tabindex >= 0;
        }
        matches!(
            self.tag,
            Tag::Button | Tag::Anchor { has_href: true } | Tag::Input | Tag::Select | Tag::Textarea
        )
    }
}

/// Read-only view of a document.
pub trait DomView {
    /// The element that currently has focus, if any.
    fn active_element(&self) -> Option<NodeId>;

    /// Whether `node` is connected to the document root.
    fn is_attached(&self, node: NodeId) -> bool;

    /// Whether `node` is `ancestor` or lies in its subtree.
    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool;

    /// All descendants of `container` in tree order, excluding `container`.
    fn descendants(&self, container: NodeId) -> Vec<NodeId>;

    /// Element descriptor for `node`.
    fn element(&self, node: NodeId) -> Option<&Element>;

    /// Focusable descendants of `container` in tree order.
    ///
    /// Queried fresh every call; nothing is memoized.
    fn focusable_within(&self, container: NodeId) -> Vec<NodeId> {
        self.descendants(container)
            .into_iter()
            .filter(|&node| self.element(node).is_some_and(Element::is_focusable))
            .collect()
    }
}

/// Ability to move focus.
pub trait DomFocus {
    /// Focus `node`. Returns `false` if the node cannot take focus.
    fn focus(&mut self, node: NodeId) -> bool;

    /// Clear focus.
    fn blur(&mut self);
}

#[derive(Debug, Clone)]
struct Slot {
    element: Element,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// In-memory arena document.
///
/// Node 0 is the root (`body`). Nodes are never freed; [`Document::remove`]
/// detaches a subtree so stale ids stay safe to query.
#[derive(Debug, Clone)]
pub struct Document {
    slots: Vec<Slot>,
    active: Option<NodeId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document holding only the root.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![Slot {
                element: Element::generic("body"),
                parent: None,
                children: Vec::new(),
            }],
            active: None,
        }
    }

    /// The document root.
    #[must_use]
    pub const fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Create a detached element.
    pub fn create(&mut self, element: Element) -> NodeId {
        let id = NodeId(self.slots.len() as u32);
        self.slots.push(Slot {
            element,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create an element and append it under `parent`.
    pub fn append(&mut self, parent: NodeId, element: Element) -> NodeId {
        let id = self.create(element);
        self.append_child(parent, id);
        id
    }

    /// Move `child` to the end of `parent`'s children.
    ///
    /// Appending a node under its own subtree is refused.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        if parent.idx() >= self.slots.len()
            || child.idx() >= self.slots.len()
            || child == self.root()
            || self.contains(child, parent)
        {
            return false;
        }
        self.unlink(child);
        self.slots[child.idx()].parent = Some(parent);
        self.slots[parent.idx()].children.push(child);
        true
    }

    /// Detach `node` and its subtree from the document.
    ///
    /// If focus was inside the subtree, the document loses focus.
    pub fn remove(&mut self, node: NodeId) -> bool {
        if node == self.root() || node.idx() >= self.slots.len() {
            return false;
        }
        if let Some(active) = self.active
            && self.contains(node, active)
        {
            #[cfg(feature = "tracing")]
            crate::debug!(message = "dom.blur", removed = node.raw(), active = active.raw());
            self.active = None;
        }
        self.unlink(node)
    }

    /// Mutable access to an element descriptor.
    pub fn element_mut(&mut self, node: NodeId) -> Option<&mut Element> {
        self.slots.get_mut(node.idx()).map(|slot| &mut slot.element)
    }

    /// Parent of `node`, if any.
    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.slots.get(node.idx()).and_then(|slot| slot.parent)
    }

    /// Children of `node` in order.
    #[must_use]
    pub fn children(&self, node: NodeId) -> &[NodeId] {
        self.slots
            .get(node.idx())
            .map_or(&[], |slot| slot.children.as_slice())
    }

    /// Find the first attached node whose `id` attribute matches.
    #[must_use]
    pub fn find_by_id(&self, id: &MemberId) -> Option<NodeId> {
        self.descendants(self.root())
            .into_iter()
            .find(|&node| self.element(node).and_then(|el| el.id.as_ref()) == Some(id))
    }

    fn unlink(&mut self, node: NodeId) -> bool {
        let Some(parent) = self.slots[node.idx()].parent.take() else {
            return false;
        };
        self.slots[parent.idx()].children.retain(|&c| c != node);
        true
    }
}

impl DomView for Document {
    fn active_element(&self) -> Option<NodeId> {
        self.active
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.contains(self.root(), node)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        if node.idx() >= self.slots.len() {
            return false;
        }
        let mut cursor = Some(node);
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            cursor = self.slots[current.idx()].parent;
        }
        false
    }

    fn descendants(&self, container: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(container).iter().rev().copied().collect();
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(self.children(node).iter().rev().copied());
        }
        out
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        self.slots.get(node.idx()).map(|slot| &slot.element)
    }
}

impl DomFocus for Document {
    fn focus(&mut self, node: NodeId) -> bool {
        if !self.is_attached(node) || node == self.root() {
            return false;
        }
        self.active = Some(node);
        true
    }

    fn blur(&mut self) {
        self.active = None;
    }
}
