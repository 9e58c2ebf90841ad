// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Capability traits the stack needs from a document host, plus the record type
//! hosts use to deliver child-list changes.
//!
//! ## Overview
//!
//! The stack never owns nodes. It reads structure through [`DocumentTree`],
//! flips interactivity through [`InertFlags`], and watches parents through
//! [`ChildListObserver`]. [`Document`] is the blanket combination that
//! [`BlockingElements`](crate::stack::BlockingElements) is generic over.

use alloc::vec::Vec;

/// Read access to the document structure.
///
/// Node keys are small copyable handles (ids, indices, or reference-counted
/// pointers). All methods must tolerate keys of nodes that have since been
/// removed, returning `None`/empty/false.
pub trait DocumentTree {
    /// Node key.
    type Node: Copy + Eq + core::fmt::Debug;

    /// The document root. Ancestor chains stop just below it.
    fn root(&self) -> Self::Node;

    /// Physical parent of `node`. For children of a shadow root this is the shadow root.
    fn parent_of(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Host element of a shadow root; `None` for anything else.
    fn shadow_host_of(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Direct children of `node`, in order. May include non-elements.
    fn children_of(&self, node: &Self::Node) -> Vec<Self::Node>;

    /// Whether `node` is an element (as opposed to text or a shadow root).
    fn is_element(&self, node: &Self::Node) -> bool;

    /// Local name of an element, e.g. `"div"`.
    fn local_name(&self, node: &Self::Node) -> Option<&str>;

    /// Shadow root attached to `node`, if it is a host.
    fn shadow_root_of(&self, node: &Self::Node) -> Option<Self::Node>;

    /// The distribution point `node` is currently assigned to.
    fn assigned_slot_of(&self, node: &Self::Node) -> Option<Self::Node>;

    /// Nodes directly assigned to a distribution point, unflattened.
    fn assigned_nodes_of(&self, slot: &Self::Node) -> Vec<Self::Node>;

    /// Whether `node` is a distribution point.
    fn is_slot(&self, node: &Self::Node) -> bool;
}

/// Per-node interactivity flag.
pub trait InertFlags: DocumentTree {
    /// Whether the node itself is flagged inert.
    fn is_inert(&self, node: &Self::Node) -> bool;

    /// Set or clear the node's own inert flag. Must be idempotent.
    fn set_inert(&mut self, node: &Self::Node, inert: bool);
}

/// Subscriptions to direct child-list changes.
///
/// Hosts queue a [`ChildListRecord`] for every insertion or removal under an
/// observed target and deliver them later, in a batch, through
/// [`BlockingElements::handle_mutations`](crate::stack::BlockingElements::handle_mutations).
pub trait ChildListObserver: DocumentTree {
    /// Handle identifying one observation.
    type Subscription;

    /// Start observing the direct children of `target`.
    fn observe_child_list(&mut self, target: &Self::Node) -> Self::Subscription;

    /// Stop an observation. Undelivered records for it should be dropped.
    fn disconnect(&mut self, subscription: Self::Subscription);
}

/// Everything [`BlockingElements`](crate::stack::BlockingElements) needs from a host.
pub trait Document: InertFlags + ChildListObserver {}

impl<T: InertFlags + ChildListObserver> Document for T {}

/// A delivered child-list change.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildListRecord<N> {
    /// The observed node whose children changed.
    pub target: N,
    /// Nodes inserted under `target`.
    pub added: Vec<N>,
    /// Nodes removed from `target`.
    pub removed: Vec<N>,
}

impl<N> ChildListRecord<N> {
    /// A record for `target` with no changes yet.
    pub fn new(target: N) -> Self {
        Self {
            target,
            added: Vec::new(),
            removed: Vec::new(),
        }
    }

    /// Append an added node.
    #[must_use]
    pub fn with_added(mut self, node: N) -> Self {
        self.added.push(node);
        self
    }

    /// Append a removed node.
    #[must_use]
    pub fn with_removed(mut self, node: N) -> Self {
        self.removed.push(node);
        self
    }
}
