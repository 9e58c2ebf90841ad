// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ancestor chain resolution.
//!
//! The chain of a node is the list of elements from the node itself up to, but
//! excluding, the document root. It follows the flat tree rather than the node
//! tree:
//!
//! - A node assigned to a distribution point continues at that point. When the
//!   point is itself assigned onwards, every hop is collected and the walk
//!   resumes at the outermost one.
//! - Shadow roots are skipped; the walk continues at their host.
//!
//! Index 0 is the node itself. The last entry's parent is the document root.

use alloc::vec::Vec;

use crate::error::BlockingError;
use crate::types::DocumentTree;

/// Resolve the ancestor chain of `node`.
///
/// Fails with [`BlockingError::DocumentRoot`] when `node` is the root, with
/// [`BlockingError::NotElement`] when it is not an element, and with
/// [`BlockingError::Unattached`] when the walk runs out of parents before it
/// meets the document root. A successful chain is never empty.
pub fn ancestor_chain<D: DocumentTree + ?Sized>(
    doc: &D,
    node: &D::Node,
) -> Result<Vec<D::Node>, BlockingError> {
    let root = doc.root();
    if *node == root {
        return Err(BlockingError::DocumentRoot);
    }
    if !doc.is_element(node) {
        let attached = doc.parent_of(node).is_some() || doc.shadow_host_of(node).is_some();
        return Err(if attached {
            BlockingError::NotElement
        } else {
            BlockingError::Unattached
        });
    }
    let mut chain = Vec::new();
    let mut current = Some(*node);
    while let Some(cur) = current {
        if cur == root {
            return Ok(chain);
        }
        if doc.is_element(&cur) {
            chain.push(cur);
        }
        if let Some(mut slot) = doc.assigned_slot_of(&cur) {
            // Collect every intermediate hop; the outermost one is pushed on the next turn.
            while let Some(next) = doc.assigned_slot_of(&slot) {
                chain.push(slot);
                slot = next;
            }
            current = Some(slot);
            continue;
        }
        current = doc.parent_of(&cur).or_else(|| doc.shadow_host_of(&cur));
    }
    Err(BlockingError::Unattached)
}
