// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapter for the Inertia reference tree.
//!
//! ## Feature
//!
//! Enable with `tree_adapter`.
//!
//! ## Notes
//!
//! [`Tree`] implements [`Document`](crate::types::Document) with
//! [`NodeId`] keys and [`ObserverKey`] subscriptions. Slots are elements named
//! [`SLOT_NAME`]. The tree queues child-list records as it is mutated;
//! [`deliver_mutations`] takes them and hands them to the stack, which is the
//! notification cycle of a host event loop.
//!
//! ## Example
//!
//! ```
//! use inertia_blocking::BlockingElements;
//! use inertia_blocking::adapters::tree::deliver_mutations;
//! use inertia_tree::{LocalNode, Tree};
//!
//! let mut tree = Tree::new();
//! let body = tree.document();
//! let page = tree.insert(Some(body), LocalNode::element("main"));
//! let dialog = tree.insert(Some(body), LocalNode::element("dialog"));
//!
//! let mut blocking = BlockingElements::new();
//! blocking.push(&mut tree, dialog).unwrap();
//! assert!(tree.is_inert(page));
//!
//! // Removing the dialog from the document pops it on the next delivery.
//! tree.remove(dialog);
//! deliver_mutations(&mut tree, &mut blocking);
//! assert!(blocking.is_empty());
//! assert!(!tree.is_inert(page));
//! ```

use alloc::vec::Vec;

use inertia_tree::{ChildListChange, NodeId, NodeKind, ObserverKey, SLOT_NAME, Tree};

use crate::stack::BlockingElements;
use crate::types::{ChildListObserver, ChildListRecord, DocumentTree, InertFlags};

impl DocumentTree for Tree {
    type Node = NodeId;

    fn root(&self) -> NodeId {
        self.document()
    }

    fn parent_of(&self, node: &NodeId) -> Option<NodeId> {
        self.parent(*node)
    }

    fn shadow_host_of(&self, node: &NodeId) -> Option<NodeId> {
        self.shadow_host(*node)
    }

    fn children_of(&self, node: &NodeId) -> Vec<NodeId> {
        self.children(*node).to_vec()
    }

    fn is_element(&self, node: &NodeId) -> bool {
        matches!(self.kind(*node), Some(NodeKind::Element { .. }))
    }

    fn local_name(&self, node: &NodeId) -> Option<&str> {
        Self::local_name(self, *node)
    }

    fn shadow_root_of(&self, node: &NodeId) -> Option<NodeId> {
        self.shadow_root(*node)
    }

    fn assigned_slot_of(&self, node: &NodeId) -> Option<NodeId> {
        self.assigned_slot(*node)
    }

    fn assigned_nodes_of(&self, slot: &NodeId) -> Vec<NodeId> {
        self.assigned_nodes(*slot).to_vec()
    }

    fn is_slot(&self, node: &NodeId) -> bool {
        Self::local_name(self, *node) == Some(SLOT_NAME)
    }
}

impl InertFlags for Tree {
    fn is_inert(&self, node: &NodeId) -> bool {
        Self::is_inert(self, *node)
    }

    fn set_inert(&mut self, node: &NodeId, inert: bool) {
        Self::set_inert(self, *node, inert);
    }
}

impl ChildListObserver for Tree {
    type Subscription = ObserverKey;

    fn observe_child_list(&mut self, target: &NodeId) -> ObserverKey {
        Self::observe_child_list(self, *target)
    }

    fn disconnect(&mut self, subscription: ObserverKey) {
        Self::disconnect(self, subscription);
    }
}

impl From<ChildListChange> for ChildListRecord<NodeId> {
    fn from(change: ChildListChange) -> Self {
        Self {
            target: change.target,
            added: change.added,
            removed: change.removed,
        }
    }
}

/// Take every pending record from `tree` and apply it to `blocking`.
pub fn deliver_mutations(tree: &mut Tree, blocking: &mut BlockingElements<Tree>) {
    let records: Vec<ChildListRecord<NodeId>> =
        tree.take_records().into_iter().map(Into::into).collect();
    if records.is_empty() {
        return;
    }
    blocking.handle_mutations(tree, &records);
}
