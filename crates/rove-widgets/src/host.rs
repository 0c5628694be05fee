#![forbid(unsafe_code)]

//! The renderer seam.
//!
//! The engine never builds markup. It asks the [`Host`] for the live member
//! list of a widget and hands back an [`AttributeSet`] to write after every
//! accepted transition. The host is also the document, so it provides the
//! DOM view and focus operations.

use ahash::AHashMap;
use rove_core::{Document, DomFocus, DomView, Element, Member, MemberId, NodeId};

use crate::aria::AttributeSet;
use crate::state::WidgetId;

/// Renderer and document collaborator of an [`crate::Engine`].
pub trait Host: DomView + DomFocus {
    /// Ordered members of `widget`, reflecting current DOM state.
    fn members(&self, widget: WidgetId) -> Vec<Member>;

    /// Write the attributes of `widget`.
    fn apply_state(&mut self, widget: WidgetId, attributes: &AttributeSet);

    /// DOM node of a member, used to move real focus with the roving
    /// tabindex. Hosts that manage focus themselves return `None`.
    fn member_node(&self, widget: WidgetId, member: &MemberId) -> Option<NodeId> {
        let _ = (widget, member);
        None
    }
}

/// In-memory [`Host`]: a [`Document`] plus per-widget member lists and a
/// record of every attribute write.
#[derive(Debug, Default)]
pub struct MemoryHost {
    document: Document,
    members: AHashMap<WidgetId, Vec<Member>>,
    applied: AHashMap<WidgetId, AttributeSet>,
    apply_counts: AHashMap<WidgetId, usize>,
}

impl MemoryHost {
    /// An empty host with a fresh document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Host over an existing document.
    #[must_use]
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            ..Self::default()
        }
    }

    /// The document.
    #[must_use]
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Mutable document access, for DOM mutations between interactions.
    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    /// Replace the member list of `widget`.
    pub fn set_members(&mut self, widget: WidgetId, members: Vec<Member>) {
        self.members.insert(widget, members);
    }

    /// Mutable member list of `widget`, created empty if missing.
    pub fn members_mut(&mut self, widget: WidgetId) -> &mut Vec<Member> {
        self.members.entry(widget).or_default()
    }

    /// Append a member element under `parent` and to `widget`'s list.
    pub fn add_member(&mut self, widget: WidgetId, parent: NodeId, member: Member) -> NodeId {
        let element = Element::generic("div")
            .with_id(member.id.clone())
            .with_tabindex(-1)
            .disabled(member.disabled);
        let node = self.document.append(parent, element);
        self.members_mut(widget).push(member);
        node
    }

    /// Last attribute set written for `widget`.
    #[must_use]
    pub fn applied(&self, widget: WidgetId) -> Option<&AttributeSet> {
        self.applied.get(&widget)
    }

    /// Number of attribute writes for `widget`.
    #[must_use]
    pub fn apply_count(&self, widget: WidgetId) -> usize {
        self.apply_counts.get(&widget).copied().unwrap_or(0)
    }
}

impl DomView for MemoryHost {
    fn active_element(&self) -> Option<NodeId> {
        self.document.active_element()
    }

    fn is_attached(&self, node: NodeId) -> bool {
        self.document.is_attached(node)
    }

    fn contains(&self, ancestor: NodeId, node: NodeId) -> bool {
        self.document.contains(ancestor, node)
    }

    fn descendants(&self, container: NodeId) -> Vec<NodeId> {
        self.document.descendants(container)
    }

    fn element(&self, node: NodeId) -> Option<&Element> {
        self.document.element(node)
    }
}

impl DomFocus for MemoryHost {
    fn focus(&mut self, node: NodeId) -> bool {
        self.document.focus(node)
    }

    fn blur(&mut self) {
        self.document.blur();
    }
}

impl Host for MemoryHost {
    fn members(&self, widget: WidgetId) -> Vec<Member> {
        self.members.get(&widget).cloned().unwrap_or_default()
    }

    fn apply_state(&mut self, widget: WidgetId, attributes: &AttributeSet) {
        self.applied.insert(widget, attributes.clone());
        *self.apply_counts.entry(widget).or_default() += 1;
    }

    fn member_node(&self, _widget: WidgetId, member: &MemberId) -> Option<NodeId> {
        self.document.find_by_id(member)
    }
}
