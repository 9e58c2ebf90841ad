// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Distribution targets: the nodes projected into a host through its slots.
//!
//! These render inside the blocking element, so they must stay interactive
//! even where they are physically siblings of a chain member.

use alloc::vec::Vec;

use crate::types::DocumentTree;

/// Collect the elements currently distributed into `node` through the slots of
/// its shadow tree, flattened through nested slots.
///
/// Returns `None` when `node` has no shadow root. The result is in tree order
/// of the slots, without duplicates.
pub fn distributed_nodes<D: DocumentTree + ?Sized>(
    doc: &D,
    node: &D::Node,
) -> Option<Vec<D::Node>> {
    let shadow = doc.shadow_root_of(node)?;
    let mut out = Vec::new();
    // Depth-first, pre-order; nested shadow roots are not children and are never entered.
    let mut pending = doc.children_of(&shadow);
    pending.reverse();
    while let Some(cur) = pending.pop() {
        if doc.is_slot(&cur) {
            flatten_into(doc, &cur, &mut out);
        }
        let mut children = doc.children_of(&cur);
        children.reverse();
        pending.extend(children);
    }
    Some(out)
}

/// Append the flattened contents of `slot`: its assigned nodes, or its own
/// children as fallback when nothing is assigned.
fn flatten_into<D: DocumentTree + ?Sized>(doc: &D, slot: &D::Node, out: &mut Vec<D::Node>) {
    let assigned = doc.assigned_nodes_of(slot);
    let nodes = if assigned.is_empty() {
        doc.children_of(slot)
    } else {
        assigned
    };
    for n in nodes {
        if doc.is_slot(&n) {
            flatten_into(doc, &n, out);
        } else if doc.is_element(&n) && !out.contains(&n) {
            out.push(n);
        }
    }
}
