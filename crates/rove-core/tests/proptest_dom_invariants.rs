//! Property-based invariant tests for the in-memory document.
//!
//! 1. `descendants` visits every attached node under the root exactly once
//! 2. Removed subtrees are detached and never contain the active element
//! 3. `focusable_within` is a tree-order subsequence of `descendants`

use proptest::prelude::*;
use rove_core::{Document, DomFocus, DomView, Element, NodeId};

#[derive(Debug, Clone)]
enum Op {
    Append { parent: usize, focusable: bool },
    Remove(usize),
    Focus(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0usize..64, any::<bool>()).prop_map(|(parent, focusable)| Op::Append { parent, focusable }),
        1 => (0usize..64).prop_map(Op::Remove),
        2 => (0usize..64).prop_map(Op::Focus),
    ]
}

fn build(ops: &[Op]) -> (Document, Vec<NodeId>) {
    let mut doc = Document::new();
    let mut nodes = vec![doc.root()];
    for op in ops {
        match *op {
            Op::Append { parent, focusable } => {
                let parent = nodes[parent % nodes.len()];
                let element = if focusable {
                    Element::button()
                } else {
                    Element::generic("div")
                };
                nodes.push(doc.append(parent, element));
            }
            Op::Remove(i) => {
                doc.remove(nodes[i % nodes.len()]);
            }
            Op::Focus(i) => {
                doc.focus(nodes[i % nodes.len()]);
            }
        }
    }
    (doc, nodes)
}

proptest! {
    #[test]
    fn descendants_match_attachment(ops in proptest::collection::vec(op_strategy(), 0..80)) {
        let (doc, nodes) = build(&ops);
        let all = doc.descendants(doc.root());
        let mut seen = std::collections::HashSet::new();
        for node in &all {
            prop_assert!(seen.insert(*node), "node visited twice");
        }
        for node in nodes.iter().skip(1) {
            prop_assert_eq!(doc.is_attached(*node), seen.contains(node));
        }
    }

    #[test]
    fn active_element_is_always_attached(ops in proptest::collection::vec(op_strategy(), 0..80)) {
        let (doc, _) = build(&ops);
        if let Some(active) = doc.active_element() {
            prop_assert!(doc.is_attached(active));
        }
    }

    #[test]
    fn focusable_is_tree_order_subsequence(ops in proptest::collection::vec(op_strategy(), 0..80)) {
        let (doc, _) = build(&ops);
        let all = doc.descendants(doc.root());
        let focusable = doc.focusable_within(doc.root());
        let mut cursor = all.iter();
        for node in &focusable {
            prop_assert!(cursor.any(|n| n == node), "focusable order diverges from tree order");
        }
    }
}
