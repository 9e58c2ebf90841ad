// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the document tree: node identifiers, flags, and node payloads.

use alloc::string::String;

use kurbo::Rect;

/// Identifier for a node in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `NodeId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `NodeId`.
///
/// Detaching a node (see [`Tree::detach`](crate::Tree::detach)) does not free its slot;
/// the handle stays live and the node can be attached again.
///
/// ### Liveness
///
/// Use [`Tree::is_alive`](crate::Tree::is_alive) to check whether a `NodeId` still refers to a live node.
/// Stale `NodeId`s never alias a different live node because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

bitflags::bitflags! {
    /// Node flags controlling interactivity.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct NodeFlags: u8 {
        /// Node and its flat-tree descendants are excluded from interaction.
        const INERT    = 0b0000_0001;
        /// Node participates in hit testing.
        const PICKABLE = 0b0000_0010;
    }
}

impl Default for NodeFlags {
    fn default() -> Self {
        Self::PICKABLE
    }
}

/// What a node is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeKind {
    /// An element with a local name such as `div` or `slot`.
    Element {
        /// Lowercase local name.
        local_name: String,
    },
    /// A text node. Never an element, never inertable.
    Text,
    /// The root of a shadow tree. Created by [`Tree::attach_shadow`](crate::Tree::attach_shadow).
    ShadowRoot,
}

/// Per-node data supplied on insert.
#[derive(Clone, Debug)]
pub struct LocalNode {
    /// Node payload.
    pub kind: NodeKind,
    /// World-space bounds used by [`Tree::hit_test_point`](crate::Tree::hit_test_point).
    pub bounds: Rect,
    /// Interactivity flags.
    pub flags: NodeFlags,
}

impl LocalNode {
    /// An element with the given local name, zero bounds, and default flags.
    pub fn element(local_name: &str) -> Self {
        Self {
            kind: NodeKind::Element {
                local_name: local_name.into(),
            },
            ..Default::default()
        }
    }

    /// A text node.
    pub fn text() -> Self {
        Self {
            kind: NodeKind::Text,
            ..Default::default()
        }
    }

    /// Set the world-space bounds.
    #[must_use]
    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    /// Set the flags.
    #[must_use]
    pub fn with_flags(mut self, flags: NodeFlags) -> Self {
        self.flags = flags;
        self
    }
}

impl Default for LocalNode {
    fn default() -> Self {
        Self {
            kind: NodeKind::Text,
            bounds: Rect::ZERO,
            flags: NodeFlags::default(),
        }
    }
}
