// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inertia Tree: a small reference document tree for blocking-element stacks.
//!
//! It models just enough of a rendered document to exercise
//! [`inertia_blocking`](https://docs.rs/inertia_blocking):
//!
//! - A single document root element plus detached nodes, with generational [`NodeId`] handles.
//! - Elements, text nodes, and shadow roots attached to element hosts.
//! - Manual slot assignment: a light child of a host can be assigned to a `slot`
//!   element inside the host's shadow tree, which redirects its flat-tree parent.
//! - Per-node [`NodeFlags`]: `INERT` and `PICKABLE`.
//! - Child-list observation. Mutations queue [`ChildListChange`] records for observed
//!   targets; [`Tree::take_records`] hands them out as one batch, like a microtask checkpoint.
//! - World-space bounds and [`Tree::hit_test_point`], which never returns a node inside an
//!   inert region, so tests can check that blocking actually blocks.
//!
//! ## Not a DOM
//!
//! There is no attribute storage, no named slot matching, and no layout.
//! Bounds are supplied by the caller and are already in world space.
//!
//! ## API overview
//!
//! - [`Tree`]: container managing nodes, slotting, flags, and observers.
//! - [`LocalNode`]: payload supplied on insert (kind, bounds, flags).
//! - [`NodeKind`]: element, text, or shadow root.
//! - [`NodeId`]: generational handle of a node.
//! - [`ObserverKey`] / [`ChildListChange`]: observation handle and delivered record.
//!
//! ### Minimal usage
//!
//! ```
//! use inertia_tree::{LocalNode, Tree};
//! use kurbo::{Point, Rect};
//!
//! let mut tree = Tree::new();
//! let body = tree.document();
//!
//! let page = tree.insert(
//!     Some(body),
//!     LocalNode::element("main").with_bounds(Rect::new(0.0, 0.0, 200.0, 200.0)),
//! );
//! let dialog = tree.insert(
//!     Some(body),
//!     LocalNode::element("dialog").with_bounds(Rect::new(50.0, 50.0, 150.0, 150.0)),
//! );
//!
//! // Watch the root for child-list changes.
//! let key = tree.observe_child_list(body);
//! let toast = tree.insert(Some(body), LocalNode::element("div"));
//! let records = tree.take_records();
//! assert_eq!(records[0].added, vec![toast]);
//! tree.disconnect(key);
//!
//! // Inert regions are invisible to hit testing.
//! tree.set_inert(dialog, true);
//! let hit = tree.hit_test_point(Point::new(60.0, 60.0)).unwrap();
//! assert_eq!(hit.node, page);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod mutations;
mod tree;
mod types;

pub use mutations::{ChildListChange, ObserverKey};
pub use tree::{DOCUMENT_ROOT_NAME, Hit, SLOT_NAME, Tree};
pub use types::{LocalNode, NodeFlags, NodeId, NodeKind};
