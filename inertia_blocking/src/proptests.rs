// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests: random trees and random operation sequences, checked
//! against a from-scratch recomputation of which nodes must be inert.
//!
//! Tree mutations queue records without delivering them, so stack operations
//! regularly run against a document that changed since the last delivery.

use alloc::vec::Vec;

use inertia_tree::{LocalNode, NodeId, Tree};
use proptest::prelude::*;
use proptest::sample::Index;

use crate::BlockingElements;
use crate::adapters::tree::deliver_mutations;

const NAMES: [&str; 3] = ["div", "section", "script"];

/// Parent pick, name, and whether the node starts out inert.
type NodeSpec = (Index, usize, bool);

#[derive(Clone, Debug)]
enum Op {
    Push(Index),
    Remove(Index),
    Pop,
    Insert(NodeSpec),
    Detach(Index),
    /// Node, then new parent (the document or an existing node).
    Move(Index, Index),
    Deliver,
}

fn arb_node() -> impl Strategy<Value = NodeSpec> {
    (any::<Index>(), 0..NAMES.len(), prop::bool::weighted(0.15))
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<Index>().prop_map(Op::Push),
        1 => any::<Index>().prop_map(Op::Remove),
        2 => Just(Op::Pop),
        2 => arb_node().prop_map(Op::Insert),
        1 => any::<Index>().prop_map(Op::Detach),
        2 => (any::<Index>(), any::<Index>()).prop_map(|(n, p)| Op::Move(n, p)),
        2 => Just(Op::Deliver),
    ]
}

struct Fixture {
    tree: Tree,
    nodes: Vec<NodeId>,
    pre_inert: Vec<NodeId>,
}

impl Fixture {
    fn build(layout: &[NodeSpec]) -> Self {
        let mut fx = Self {
            tree: Tree::new(),
            nodes: Vec::new(),
            pre_inert: Vec::new(),
        };
        for node in layout {
            fx.insert(node);
        }
        fx
    }

    /// The document or an existing node.
    fn pick_parent(&self, index: &Index) -> NodeId {
        let pick = index.index(self.nodes.len() + 1);
        if pick == 0 {
            self.tree.document()
        } else {
            self.nodes[pick - 1]
        }
    }

    /// Append a new element under the document or an existing node.
    fn insert(&mut self, (parent, name, inert): &NodeSpec) -> NodeId {
        let parent = self.pick_parent(parent);
        let id = self.tree.insert(None, LocalNode::element(NAMES[*name]));
        if *inert {
            self.tree.set_inert(id, true);
            self.pre_inert.push(id);
        }
        self.tree.append_child(parent, id);
        self.nodes.push(id);
        id
    }

    fn pick(&self, index: &Index) -> NodeId {
        self.nodes[index.index(self.nodes.len())]
    }

    fn actual(&self) -> Vec<bool> {
        self.nodes.iter().map(|n| self.tree.is_inert(*n)).collect()
    }

    /// Inert flags implied by `top`, computed from parent links alone.
    fn expected(&self, top: Option<NodeId>) -> Vec<bool> {
        let mut chain = Vec::new();
        let mut cur = top;
        while let Some(c) = cur {
            if c == self.tree.document() {
                break;
            }
            chain.push(c);
            cur = self.tree.parent(c);
        }
        self.nodes
            .iter()
            .map(|n| {
                if self.pre_inert.contains(n) {
                    return true;
                }
                if chain.contains(n) || self.tree.local_name(*n) == Some("script") {
                    return false;
                }
                let parent = self.tree.parent(*n);
                chain.iter().any(|c| self.tree.parent(*c) == parent)
            })
            .collect()
    }
}

/// Deliver pending records and check the stack against the model.
fn settle(
    fx: &mut Fixture,
    blocking: &mut BlockingElements<Tree>,
    model: &mut Vec<NodeId>,
) -> Result<(), TestCaseError> {
    deliver_mutations(&mut fx.tree, blocking);
    // Implicit pops only ever drop entries.
    model.retain(|n| blocking.has(n));
    prop_assert_eq!(blocking.iter().collect::<Vec<_>>(), model.clone());
    if let Some(top) = blocking.top() {
        prop_assert!(fx.tree.is_connected(top), "top left the document");
    }
    prop_assert_eq!(fx.actual(), fx.expected(blocking.top()));
    Ok(())
}

proptest! {
    #[test]
    fn inertness_matches_recomputation(
        layout in prop::collection::vec(arb_node(), 1..20),
        ops in prop::collection::vec(arb_op(), 1..40),
    ) {
        let mut fx = Fixture::build(&layout);
        let mut blocking = BlockingElements::new();
        let mut model: Vec<NodeId> = Vec::new();

        for op in &ops {
            match op {
                Op::Push(i) => {
                    let n = fx.pick(i);
                    let result = blocking.push(&mut fx.tree, n);
                    if model.last() == Some(&n) {
                        prop_assert!(result.is_ok(), "pushing the top is a no-op");
                    } else if fx.tree.is_connected(n) {
                        prop_assert!(result.is_ok());
                        model.retain(|m| *m != n);
                        model.push(n);
                    } else {
                        prop_assert!(result.is_err(), "detached nodes are rejected");
                    }
                    settle(&mut fx, &mut blocking, &mut model)?;
                }
                Op::Remove(i) => {
                    let n = fx.pick(i);
                    let present = model.contains(&n);
                    model.retain(|m| *m != n);
                    prop_assert_eq!(blocking.remove(&mut fx.tree, &n), present);
                    settle(&mut fx, &mut blocking, &mut model)?;
                }
                Op::Pop => {
                    prop_assert_eq!(blocking.pop(&mut fx.tree), model.pop());
                    settle(&mut fx, &mut blocking, &mut model)?;
                }
                Op::Insert(node) => {
                    fx.insert(node);
                }
                Op::Detach(i) => {
                    let n = fx.pick(i);
                    fx.tree.detach(n);
                }
                Op::Move(i, parent) => {
                    let (n, parent) = (fx.pick(i), fx.pick_parent(parent));
                    // Cycles are ignored by the tree.
                    fx.tree.append_child(parent, n);
                }
                Op::Deliver => {
                    settle(&mut fx, &mut blocking, &mut model)?;
                }
            }
        }

        while blocking.pop(&mut fx.tree).is_some() {}
        deliver_mutations(&mut fx.tree, &mut blocking);
        prop_assert_eq!(fx.actual(), fx.expected(None));
        prop_assert_eq!(fx.tree.observer_count(), 0);
    }

    #[test]
    fn double_push_is_idempotent(
        layout in prop::collection::vec(arb_node(), 1..20),
        first in any::<Index>(),
        second in any::<Index>(),
    ) {
        let mut once = Fixture::build(&layout);
        let mut twice = Fixture::build(&layout);
        let mut b1 = BlockingElements::new();
        let mut b2 = BlockingElements::new();
        for (fx, blocking, repeat) in [(&mut once, &mut b1, 1), (&mut twice, &mut b2, 2)] {
            let (a, b) = (fx.pick(&first), fx.pick(&second));
            blocking.push(&mut fx.tree, a).unwrap();
            for _ in 0..repeat {
                blocking.push(&mut fx.tree, b).unwrap();
            }
        }
        prop_assert_eq!(once.actual(), twice.actual());
        prop_assert_eq!(b1.iter().collect::<Vec<_>>(), b2.iter().collect::<Vec<_>>());
        prop_assert_eq!(once.tree.observer_count(), twice.tree.observer_count());
    }
}
