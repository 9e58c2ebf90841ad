// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The blocking-element stack.
//!
//! ## Top changes
//!
//! Whenever the top changes, the new top's ancestor chain is diffed against the
//! stored one, outermost entries first, the same way a hover path diff finds
//! the lowest common ancestor:
//!
//! - Shared outer members keep their tracked siblings and subscriptions as is.
//! - At the first divergence, two siblings hand the tracked position over
//!   directly: the old member is inerted and the new one restored.
//! - The old chain's remaining inner members are restored.
//! - The new chain's remaining inner members have their siblings inerted.

use alloc::vec::Vec;
use core::fmt::{self, Debug};

use tracing::{debug, info};

use crate::config::BlockingConfig;
use crate::distribution::distributed_nodes;
use crate::error::BlockingError;
use crate::path::ancestor_chain;
use crate::siblings::{ChainLink, SiblingPass, release_members, restore_siblings};
use crate::types::Document;

/// An ordered stack of blocking nodes over a document `D`.
///
/// While the stack is non-empty, the top node, its ancestor chain, and the
/// nodes distributed into it are the only interactive region: every inertable
/// sibling along the chain is inert. Nodes found inert beforehand are never
/// made interactive again by this type.
///
/// The stack does not own the document. Every mutating call takes it
/// explicitly, and child-list records must be fed back through
/// [`BlockingElements::handle_mutations`].
pub struct BlockingElements<D: Document> {
    pub(crate) stack: Vec<D::Node>,
    pub(crate) chain: Vec<ChainLink<D>>,
    pub(crate) to_skip: Vec<D::Node>,
    pub(crate) already_inert: Vec<D::Node>,
    pub(crate) config: BlockingConfig,
}

impl<D: Document> Debug for BlockingElements<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BlockingElements")
            .field("stack", &self.stack)
            .field("chain", &self.chain)
            .field("already_inert", &self.already_inert)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<D: Document> Default for BlockingElements<D> {
    fn default() -> Self {
        Self::new()
    }
}

impl<D: Document> BlockingElements<D> {
    /// Create an empty stack with the default configuration.
    pub fn new() -> Self {
        Self::with_config(BlockingConfig::default())
    }

    /// Create an empty stack with an explicit configuration.
    pub fn with_config(config: BlockingConfig) -> Self {
        Self {
            stack: Vec::new(),
            chain: Vec::new(),
            to_skip: Vec::new(),
            already_inert: Vec::new(),
            config,
        }
    }

    /// The configuration this stack was created with.
    pub fn config(&self) -> &BlockingConfig {
        &self.config
    }

    /// The current top, if any.
    pub fn top(&self) -> Option<D::Node> {
        self.stack.last().copied()
    }

    /// Whether `node` is anywhere in the stack.
    pub fn has(&self, node: &D::Node) -> bool {
        self.stack.contains(node)
    }

    /// Number of blocking nodes.
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    /// Returns true if nothing is blocking.
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Blocking nodes from the bottom of the stack to the top.
    pub fn iter(&self) -> impl Iterator<Item = D::Node> + '_ {
        self.stack.iter().copied()
    }

    /// Make `node` the top, moving it there if it is already in the stack.
    ///
    /// Pushing the current top is a no-op. A node that does not reach the
    /// document root is rejected before anything changes.
    pub fn push(&mut self, doc: &mut D, node: D::Node) -> Result<(), BlockingError> {
        if self.top() == Some(node) {
            return Ok(());
        }
        let chain = ancestor_chain(doc, &node)?;
        self.stack.retain(|n| *n != node);
        self.stack.push(node);
        self.apply_chain(doc, &node, chain);
        Ok(())
    }

    /// Remove `node` from wherever it is in the stack.
    ///
    /// Returns false if it was not there. Removing the top hands blocking to the
    /// node below it.
    pub fn remove(&mut self, doc: &mut D, node: &D::Node) -> bool {
        let Some(index) = self.stack.iter().position(|n| n == node) else {
            return false;
        };
        self.stack.remove(index);
        if index == self.stack.len() {
            self.settle_top(doc);
        }
        true
    }

    /// Remove and return the top.
    pub fn pop(&mut self, doc: &mut D) -> Option<D::Node> {
        let top = self.stack.pop()?;
        self.settle_top(doc);
        Some(top)
    }

    /// Empty the stack, restore every node it inerted, and drop all subscriptions.
    pub fn teardown(mut self, doc: &mut D) {
        debug!(len = self.stack.len(), "tearing down blocking elements");
        self.stack.clear();
        self.clear_chain(doc);
    }

    /// Apply whatever is now on top, dropping tops that were detached while buried.
    fn settle_top(&mut self, doc: &mut D) {
        while let Some(top) = self.top() {
            match ancestor_chain(doc, &top) {
                Ok(chain) => {
                    self.apply_chain(doc, &top, chain);
                    return;
                }
                Err(err) => {
                    info!(?top, %err, "dropping detached blocking element");
                    self.stack.pop();
                }
            }
        }
        self.clear_chain(doc);
    }

    fn clear_chain(&mut self, doc: &mut D) {
        restore_siblings(doc, &mut self.chain);
        self.chain.clear();
        self.to_skip.clear();
        self.already_inert.clear();
    }

    /// Move inertness from the stored chain to `nodes`, the chain of `top`.
    fn apply_chain(&mut self, doc: &mut D, top: &D::Node, nodes: Vec<D::Node>) {
        let to_skip = distributed_nodes(&*doc, top).unwrap_or_default();
        let mut old = core::mem::take(&mut self.chain);
        let mut new: Vec<ChainLink<D>> = nodes.into_iter().map(ChainLink::new).collect();
        let mut pass = SiblingPass {
            doc,
            config: &self.config,
            to_skip: &to_skip,
            already_inert: &mut self.already_inert,
        };

        if old.is_empty() {
            debug!(new = new.len(), "first blocking chain");
            for index in 0..new.len() {
                pass.fill(&mut new, index);
            }
        } else {
            let (mut i, mut j) = (old.len() - 1, new.len() - 1);
            while i > 0 && j > 0 && old[i].node == new[j].node {
                i -= 1;
                j -= 1;
            }
            for (o, n) in old[i + 1..].iter_mut().zip(&mut new[j + 1..]) {
                n.tracked = o.tracked.take();
            }
            let (old_end, new_end) = if old[i].node == new[j].node {
                new[j].tracked = old[i].tracked.take();
                (i, j)
            } else if pass.swap(&mut old[i], &mut new, j) {
                (i, j)
            } else {
                (i + 1, j + 1)
            };
            debug!(
                old = old.len(),
                new = new.len(),
                restored = old_end,
                inerted = new_end,
                "blocking chain changed"
            );

            release_members(&mut *pass.doc, &mut new);

            let restored_parents: Vec<D::Node> = old[..old_end]
                .iter()
                .filter_map(|l| l.tracked.as_ref().map(|t| t.observed))
                .collect();
            restore_siblings(&mut *pass.doc, &mut old[..old_end]);
            // A kept member sharing a parent with a restored one may have lost
            // siblings it never recorded, including the restored member itself.
            for index in new_end..new.len() {
                if restored_parents.iter().any(|p| new[index].observes(p)) {
                    pass.fill(&mut new, index);
                }
            }
            for index in 0..new_end {
                pass.fill(&mut new, index);
            }
        }

        self.chain = new;
        self.to_skip = to_skip;
    }
}
