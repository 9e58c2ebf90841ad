// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reactive maintenance from delivered child-list records.
//!
//! Records arrive in a batch some time after the mutations that produced them,
//! possibly after further pushes or pops. Each record is matched to the chain
//! member whose parent it observes; records for parents nobody tracks any more
//! are skipped.

use alloc::vec::Vec;

use tracing::{info, trace};

use crate::siblings::{SiblingPass, restore_siblings};
use crate::stack::BlockingElements;
use crate::types::{ChildListRecord, Document};

impl<D: Document> BlockingElements<D> {
    /// Apply a batch of child-list records for parents this stack observes.
    ///
    /// - A removed chain member means the top left the document: the stack
    ///   pops it, ignores the rest of the batch, and rebuilds the new chain's
    ///   records from the document as it is now.
    /// - A removed sibling that was inerted here is restored, unless it now
    ///   sits under another observed parent, which takes it over.
    /// - An added inertable node is inerted, or noted as already inert.
    pub fn handle_mutations(&mut self, doc: &mut D, records: &[ChildListRecord<D::Node>]) {
        for record in records {
            let target = record.target;
            let Some(index) = self.chain.iter().position(|l| l.observes(&target)) else {
                trace!(?target, "record for an untracked parent");
                continue;
            };

            // Re-inserted before delivery: the chain still holds.
            let left = record.removed.iter().find(|removed| {
                self.chain
                    .iter()
                    .any(|l| l.node == **removed && l.observes(&target))
                    && doc.parent_of(removed) != Some(target)
            });
            if let Some(removed) = left {
                info!(?removed, "blocking element removed from the document");
                self.pop(doc);
                self.resync(doc);
                return;
            }

            let mut pass = SiblingPass {
                doc: &mut *doc,
                config: &self.config,
                to_skip: &self.to_skip,
                already_inert: &mut self.already_inert,
            };
            for removed in &record.removed {
                pass.rehome(&mut self.chain, removed);
            }
            for added in &record.added {
                // Moved away again before delivery.
                if pass.doc.parent_of(added) != Some(target) {
                    continue;
                }
                if !pass.qualifies(&self.chain, added) {
                    continue;
                }
                if let Some(tracked) = &mut self.chain[index].tracked {
                    pass.claim(*added, &mut tracked.inerted);
                }
            }
        }
    }

    /// Bring every link's record in line with the document.
    ///
    /// A link whose member moved to another parent starts over. Every observed
    /// parent is then rescanned for siblings nobody recorded.
    fn resync(&mut self, doc: &mut D) {
        let mut pass = SiblingPass {
            doc,
            config: &self.config,
            to_skip: &self.to_skip,
            already_inert: &mut self.already_inert,
        };
        for link in &mut self.chain {
            let moved = link
                .tracked
                .as_ref()
                .is_some_and(|t| pass.doc.parent_of(&link.node) != Some(t.observed));
            if moved {
                restore_siblings(&mut *pass.doc, core::slice::from_mut(link));
            }
        }
        let recorded: Vec<D::Node> = self
            .chain
            .iter()
            .filter_map(|l| l.tracked.as_ref())
            .flat_map(|t| t.inerted.iter().copied())
            .collect();
        for node in &recorded {
            pass.rehome(&mut self.chain, node);
        }
        for index in 0..self.chain.len() {
            pass.fill(&mut self.chain, index);
        }
    }
}
