// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Child-list observation: observer registrations and the pending record queue.
//!
//! Records are queued as mutations happen and handed out in one batch by
//! [`Tree::take_records`](crate::Tree::take_records), which plays the role of a
//! microtask checkpoint. Nothing is delivered synchronously.

use alloc::vec::Vec;

use crate::types::NodeId;

/// Handle returned by [`Tree::observe_child_list`](crate::Tree::observe_child_list).
///
/// Keys are never reused within one tree.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ObserverKey(pub(crate) u32);

/// One batch entry: the direct children of `target` changed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChildListChange {
    /// The node whose child list changed.
    pub target: NodeId,
    /// Children inserted under `target`, in insertion order.
    pub added: Vec<NodeId>,
    /// Children removed from `target`, in removal order.
    pub removed: Vec<NodeId>,
}

#[derive(Clone, Debug, Default)]
pub(crate) struct Observers {
    active: Vec<(ObserverKey, NodeId)>,
    next_key: u32,
    pending: Vec<ChildListChange>,
}

impl Observers {
    pub(crate) fn observe(&mut self, target: NodeId) -> ObserverKey {
        let key = ObserverKey(self.next_key);
        self.next_key = self.next_key.wrapping_add(1);
        self.active.push((key, target));
        key
    }

    /// Returns false if `key` was not active.
    pub(crate) fn disconnect(&mut self, key: ObserverKey) -> bool {
        let Some(pos) = self.active.iter().position(|(k, _)| *k == key) else {
            return false;
        };
        let (_, target) = self.active.remove(pos);
        // Undelivered records die with the last observer of their target.
        if !self.is_observed(target) {
            self.pending.retain(|r| r.target != target);
        }
        true
    }

    pub(crate) fn is_observed(&self, target: NodeId) -> bool {
        self.active.iter().any(|(_, t)| *t == target)
    }

    pub(crate) fn observer_count(&self) -> usize {
        self.active.len()
    }

    pub(crate) fn record_added(&mut self, target: NodeId, child: NodeId) {
        if self.is_observed(target) {
            self.pending.push(ChildListChange {
                target,
                added: alloc::vec![child],
                removed: Vec::new(),
            });
        }
    }

    pub(crate) fn record_removed(&mut self, target: NodeId, child: NodeId) {
        if self.is_observed(target) {
            self.pending.push(ChildListChange {
                target,
                added: Vec::new(),
                removed: alloc::vec![child],
            });
        }
    }

    pub(crate) fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    pub(crate) fn take(&mut self) -> Vec<ChildListChange> {
        core::mem::take(&mut self.pending)
    }
}
