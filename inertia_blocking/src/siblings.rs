// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Sibling inerting and restoration along an ancestor chain.
//!
//! Each chain position owns a [`ChainLink`]. Once its siblings have been
//! processed, the link carries a [`Tracked`] record: the parent it watches,
//! the live subscription on that parent, and exactly the siblings this crate
//! flipped to inert on its behalf.

use alloc::vec::Vec;
use core::fmt::{self, Debug};

use crate::config::BlockingConfig;
use crate::types::Document;

/// Bookkeeping for one processed chain position.
pub(crate) struct Tracked<D: Document> {
    /// Physical parent whose child list is observed. May be a shadow root.
    pub(crate) observed: D::Node,
    pub(crate) subscription: D::Subscription,
    /// Siblings inerted by this crate, restored when the position is dropped.
    pub(crate) inerted: Vec<D::Node>,
}

/// One member of the current ancestor chain.
pub(crate) struct ChainLink<D: Document> {
    pub(crate) node: D::Node,
    pub(crate) tracked: Option<Tracked<D>>,
}

impl<D: Document> ChainLink<D> {
    pub(crate) fn new(node: D::Node) -> Self {
        Self {
            node,
            tracked: None,
        }
    }

    pub(crate) fn observes(&self, parent: &D::Node) -> bool {
        self.tracked.as_ref().is_some_and(|t| t.observed == *parent)
    }
}

impl<D: Document> Debug for ChainLink<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("ChainLink");
        s.field("node", &self.node);
        if let Some(t) = &self.tracked {
            s.field("observed", &t.observed).field("inerted", &t.inerted);
        }
        s.finish_non_exhaustive()
    }
}

/// Whether any link recorded `node` as a sibling it inerted.
pub(crate) fn is_recorded<D: Document>(links: &[ChainLink<D>], node: &D::Node) -> bool {
    links
        .iter()
        .filter_map(|l| l.tracked.as_ref())
        .any(|t| t.inerted.contains(node))
}

/// Whether a link observing some parent other than `parent` recorded `node`.
fn is_recorded_elsewhere<D: Document>(
    links: &[ChainLink<D>],
    node: &D::Node,
    parent: &D::Node,
) -> bool {
    links
        .iter()
        .filter_map(|l| l.tracked.as_ref())
        .any(|t| t.observed != *parent && t.inerted.contains(node))
}

/// Tear down each link's subscription and clear inert on what it recorded.
pub(crate) fn restore_siblings<D: Document>(doc: &mut D, links: &mut [ChainLink<D>]) {
    for link in links {
        let Some(tracked) = link.tracked.take() else {
            continue;
        };
        doc.disconnect(tracked.subscription);
        for sibling in &tracked.inerted {
            doc.set_inert(sibling, false);
        }
    }
}

/// Clear inert on chain members that some link recorded as a sibling.
///
/// Only happens when two members share a parent, as a slotted node and the
/// slot it is assigned to can.
pub(crate) fn release_members<D: Document>(doc: &mut D, links: &mut [ChainLink<D>]) {
    let members: Vec<D::Node> = links.iter().map(|l| l.node).collect();
    for tracked in links.iter_mut().filter_map(|l| l.tracked.as_mut()) {
        tracked.inerted.retain(|n| {
            let member = members.contains(n);
            if member {
                doc.set_inert(n, false);
            }
            !member
        });
    }
}

/// State shared by every inerting step of one top change or mutation batch.
pub(crate) struct SiblingPass<'a, D: Document> {
    pub(crate) doc: &'a mut D,
    pub(crate) config: &'a BlockingConfig,
    /// Distribution targets of the top; never inerted.
    pub(crate) to_skip: &'a [D::Node],
    pub(crate) already_inert: &'a mut Vec<D::Node>,
}

impl<D: Document> SiblingPass<'_, D> {
    /// Whether `sibling` should be inerted on behalf of some link in `links`.
    ///
    /// Chain members, distribution targets, non-inertable nodes, and nodes some
    /// link already recorded are left alone.
    pub(crate) fn qualifies(&self, links: &[ChainLink<D>], sibling: &D::Node) -> bool {
        !links.iter().any(|l| l.node == *sibling)
            && !self.to_skip.contains(sibling)
            && self.config.is_inertable(&*self.doc, sibling)
            && !is_recorded(links, sibling)
    }

    /// Inert `sibling`, or note it as already inert when something else got there first.
    pub(crate) fn claim(&mut self, sibling: D::Node, inerted: &mut Vec<D::Node>) {
        if self.doc.is_inert(&sibling) {
            if !self.already_inert.contains(&sibling) {
                self.already_inert.push(sibling);
            }
        } else {
            self.already_inert.retain(|n| *n != sibling);
            self.doc.set_inert(&sibling, true);
            inerted.push(sibling);
        }
    }

    /// Inert every qualifying sibling of `links[index]` and start watching its parent.
    ///
    /// A link that is already tracked keeps its subscription and only picks up
    /// siblings nobody recorded yet. Siblings still recorded under a parent they
    /// have since left are taken over. Links without a parent are skipped.
    pub(crate) fn fill(&mut self, links: &mut [ChainLink<D>], index: usize) {
        let node = links[index].node;
        let Some(parent) = self.doc.parent_of(&node) else {
            return;
        };
        let children = self.doc.children_of(&parent);
        for child in &children {
            if is_recorded_elsewhere(links, child, &parent) {
                self.rehome(links, child);
            }
        }
        let candidates: Vec<D::Node> = children
            .into_iter()
            .filter(|c| self.qualifies(links, c))
            .collect();
        let mut inerted = Vec::new();
        for sibling in candidates {
            self.claim(sibling, &mut inerted);
        }
        if let Some(tracked) = &mut links[index].tracked {
            tracked.inerted.extend(inerted);
            return;
        }
        let subscription = self.doc.observe_child_list(&parent);
        links[index].tracked = Some(Tracked {
            observed: parent,
            subscription,
            inerted,
        });
    }

    /// Drop `node` from every record kept for a parent it no longer has.
    ///
    /// If its current parent is observed by some link and it still qualifies,
    /// it moves to that link's record and stays inert. Otherwise it is made
    /// interactive again.
    pub(crate) fn rehome(&mut self, links: &mut [ChainLink<D>], node: &D::Node) {
        let parent = self.doc.parent_of(node);
        let mut dropped = false;
        for tracked in links.iter_mut().filter_map(|l| l.tracked.as_mut()) {
            if Some(tracked.observed) == parent {
                continue;
            }
            if let Some(pos) = tracked.inerted.iter().position(|n| n == node) {
                tracked.inerted.swap_remove(pos);
                dropped = true;
            }
        }
        if !dropped || is_recorded(links, node) {
            return;
        }
        let home = parent.and_then(|p| links.iter().position(|l| l.observes(&p)));
        match home {
            Some(index) if self.qualifies(links, node) => {
                if let Some(tracked) = &mut links[index].tracked {
                    tracked.inerted.push(*node);
                }
            }
            _ => self.doc.set_inert(node, false),
        }
    }

    /// Hand the tracked position of `old` over to `links[index]`, its sibling.
    ///
    /// The old member becomes an inerted sibling, unless it has left the parent,
    /// and the new one is restored if it had been recorded. Returns false, leaving
    /// both untouched, when the two do not share the observed parent.
    pub(crate) fn swap(
        &mut self,
        old: &mut ChainLink<D>,
        links: &mut [ChainLink<D>],
        index: usize,
    ) -> bool {
        let new_node = links[index].node;
        let shares_parent = old
            .tracked
            .as_ref()
            .is_some_and(|t| self.doc.parent_of(&new_node) == Some(t.observed));
        if !shares_parent {
            return false;
        }
        let Some(mut tracked) = old.tracked.take() else {
            return false;
        };
        if let Some(pos) = tracked.inerted.iter().position(|n| *n == new_node) {
            tracked.inerted.swap_remove(pos);
            self.doc.set_inert(&new_node, false);
        }
        let still_sibling = self.doc.parent_of(&old.node) == Some(tracked.observed);
        if still_sibling && self.qualifies(links, &old.node) {
            self.claim(old.node, &mut tracked.inerted);
        }
        links[index].tracked = Some(tracked);
        true
    }
}
