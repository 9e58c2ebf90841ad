// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: structure, slotting, flags, observation, queries.

use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::mutations::{ChildListChange, ObserverKey, Observers};
use crate::types::{LocalNode, NodeFlags, NodeId, NodeKind};

/// Local name of the document root element.
pub const DOCUMENT_ROOT_NAME: &str = "body";

/// Local name that marks an element as a distribution point.
pub const SLOT_NAME: &str = "slot";

impl Default for Tree {
    fn default() -> Self {
        Self::new()
    }
}

/// A document tree with a single root element.
///
/// Nodes without a parent, other than the root, are detached.
pub struct Tree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    document: NodeId,
    observers: Observers,
}

impl core::fmt::Debug for Tree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("Tree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("observers", &self.observers.observer_count())
            .finish_non_exhaustive()
    }
}

/// Result of a hit test.
#[derive(Clone, Debug)]
pub struct Hit {
    /// The matched node.
    pub node: NodeId,
    /// Flat-tree path from the document root to node (inclusive).
    pub path: Vec<NodeId>,
}

#[derive(Clone, Debug)]
struct Node {
    generation: u32,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    local: LocalNode,
    // Shadow roots point at their host; hosts point at their shadow root.
    shadow_host: Option<NodeId>,
    shadow_root: Option<NodeId>,
    assigned_slot: Option<NodeId>,
    // Only populated on slots.
    assigned: Vec<NodeId>,
}

impl Node {
    fn new(generation: u32, local: LocalNode) -> Self {
        Self {
            generation,
            parent: None,
            children: Vec::new(),
            local,
            shadow_host: None,
            shadow_root: None,
            assigned_slot: None,
            assigned: Vec::new(),
        }
    }

    fn local_name(&self) -> Option<&str> {
        match &self.local.kind {
            NodeKind::Element { local_name } => Some(local_name),
            _ => None,
        }
    }
}

impl Tree {
    /// Create a tree holding only the document root element.
    pub fn new() -> Self {
        let mut tree = Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            document: NodeId::new(0, 0),
            observers: Observers::default(),
        };
        tree.document = tree.allocate(LocalNode::element(DOCUMENT_ROOT_NAME));
        tree
    }

    /// The document root. Blocking chains stop just below it.
    pub fn document(&self) -> NodeId {
        self.document
    }

    fn allocate(&mut self, local: LocalNode) -> NodeId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, local));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, local)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "NodeId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        NodeId::new(idx, generation)
    }

    /// Insert a new node as the last child of `parent` (or detached if `None`).
    pub fn insert(&mut self, parent: Option<NodeId>, local: LocalNode) -> NodeId {
        let id = self.allocate(local);
        if let Some(p) = parent {
            self.append_child(p, id);
        }
        id
    }

    /// Move `child` to the end of `parent`'s children.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.insert_before(parent, child, None);
    }

    /// Move `child` under `parent`, before `reference` (or last if `None`).
    ///
    /// Ignored when either node is stale, when `parent` cannot hold children,
    /// when `child` is a shadow root or the document root, or when the move would
    /// create a cycle.
    pub fn insert_before(&mut self, parent: NodeId, child: NodeId, reference: Option<NodeId>) {
        if !self.is_alive(parent) || !self.is_alive(child) || child == self.document {
            return;
        }
        if matches!(self.node(parent).local.kind, NodeKind::Text)
            || matches!(self.node(child).local.kind, NodeKind::ShadowRoot)
            || self.is_inclusive_ancestor(child, parent)
        {
            return;
        }
        if reference == Some(child) {
            return;
        }
        if self.node(child).parent.is_some() {
            self.detach(child);
        }
        let siblings = &mut self.node_mut(parent).children;
        let at = reference
            .and_then(|r| siblings.iter().position(|c| *c == r))
            .unwrap_or(siblings.len());
        siblings.insert(at, child);
        self.node_mut(child).parent = Some(parent);
        self.observers.record_added(parent, child);
    }

    /// Unlink `id` from its parent, keeping it (and its subtree) alive.
    ///
    /// A detached node also loses its slot assignment.
    pub fn detach(&mut self, id: NodeId) {
        if !self.is_alive(id) {
            return;
        }
        self.unassign(id);
        let Some(parent) = self.node(id).parent else {
            return;
        };
        self.node_mut(parent).children.retain(|c| *c != id);
        self.node_mut(id).parent = None;
        self.observers.record_removed(parent, id);
    }

    /// Remove a node, its subtree, and any attached shadow tree.
    ///
    /// The document root cannot be removed.
    pub fn remove(&mut self, id: NodeId) {
        if !self.is_alive(id) || id == self.document {
            return;
        }
        self.detach(id);
        self.destroy(id);
    }

    fn destroy(&mut self, id: NodeId) {
        let (children, shadow_root, assigned) = {
            let n = self.node_mut(id);
            (
                core::mem::take(&mut n.children),
                n.shadow_root.take(),
                core::mem::take(&mut n.assigned),
            )
        };
        for child in children {
            self.destroy(child);
        }
        if let Some(sr) = shadow_root {
            self.destroy(sr);
        }
        for node in assigned {
            if let Some(n) = self.node_opt_mut(node) {
                n.assigned_slot = None;
            }
        }
        self.unassign(id);
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    /// Attach a shadow root to an element host and return it.
    ///
    /// Returns `None` if `host` is stale, not an element, or already a host.
    pub fn attach_shadow(&mut self, host: NodeId) -> Option<NodeId> {
        let node = self.node_opt(host)?;
        if node.local_name().is_none() || node.shadow_root.is_some() {
            return None;
        }
        let root = self.allocate(LocalNode {
            kind: NodeKind::ShadowRoot,
            ..Default::default()
        });
        self.node_mut(root).shadow_host = Some(host);
        self.node_mut(host).shadow_root = Some(root);
        Some(root)
    }

    /// Assign `node` to `slot`, or clear its assignment with `None`.
    ///
    /// Ignored unless `slot` is a live `slot` element inside a shadow tree.
    pub fn assign_slot(&mut self, node: NodeId, slot: Option<NodeId>) {
        if !self.is_alive(node) {
            return;
        }
        if let Some(s) = slot {
            let is_slot = self.node_opt(s).and_then(Node::local_name) == Some(SLOT_NAME);
            if !is_slot || self.containing_shadow_root(s).is_none() {
                return;
            }
        }
        self.unassign(node);
        if let Some(s) = slot {
            self.node_mut(s).assigned.push(node);
            self.node_mut(node).assigned_slot = Some(s);
        }
    }

    fn unassign(&mut self, node: NodeId) {
        if let Some(prev) = self.node_mut(node).assigned_slot.take()
            && let Some(slot) = self.node_opt_mut(prev)
        {
            slot.assigned.retain(|n| *n != node);
        }
    }

    /// Update node flags.
    pub fn set_flags(&mut self, id: NodeId, flags: NodeFlags) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.flags = flags;
        }
    }

    /// Set or clear [`NodeFlags::INERT`] on a single node.
    pub fn set_inert(&mut self, id: NodeId, inert: bool) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.flags.set(NodeFlags::INERT, inert);
        }
    }

    /// Update world-space bounds.
    pub fn set_bounds(&mut self, id: NodeId, bounds: Rect) {
        if let Some(node) = self.node_opt_mut(id) {
            node.local.bounds = bounds;
        }
    }

    // --- observation ---

    /// Start observing direct child-list changes of `target`.
    pub fn observe_child_list(&mut self, target: NodeId) -> ObserverKey {
        self.observers.observe(target)
    }

    /// Stop an observation. Returns false if the key was not active.
    ///
    /// Records not yet taken for the target are dropped once no observer remains.
    pub fn disconnect(&mut self, key: ObserverKey) -> bool {
        self.observers.disconnect(key)
    }

    /// Take every pending child-list record, oldest first.
    pub fn take_records(&mut self) -> Vec<ChildListChange> {
        self.observers.take()
    }

    /// Whether records are waiting for [`Tree::take_records`].
    pub fn has_pending_records(&self) -> bool {
        self.observers.has_pending()
    }

    /// Number of active child-list observations.
    pub fn observer_count(&self) -> usize {
        self.observers.observer_count()
    }

    // --- queries ---

    /// Returns true if `id` refers to a live node.
    pub fn is_alive(&self, id: NodeId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Node payload, if live.
    pub fn kind(&self, id: NodeId) -> Option<&NodeKind> {
        self.node_opt(id).map(|n| &n.local.kind)
    }

    /// Local name of a live element.
    pub fn local_name(&self, id: NodeId) -> Option<&str> {
        self.node_opt(id).and_then(Node::local_name)
    }

    /// Physical parent. Children of a shadow root report the shadow root.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.parent)
    }

    /// Direct children in order. Empty for stale ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node_opt(id).map(|n| n.children.as_slice()).unwrap_or(&[])
    }

    /// Shadow root attached to a host.
    pub fn shadow_root(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.shadow_root)
    }

    /// Host of a shadow root.
    pub fn shadow_host(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.shadow_host)
    }

    /// Slot a node is assigned to.
    pub fn assigned_slot(&self, id: NodeId) -> Option<NodeId> {
        self.node_opt(id).and_then(|n| n.assigned_slot)
    }

    /// Nodes assigned to a slot, in assignment order.
    pub fn assigned_nodes(&self, slot: NodeId) -> &[NodeId] {
        self.node_opt(slot)
            .map(|n| n.assigned.as_slice())
            .unwrap_or(&[])
    }

    /// Flags of a live node.
    pub fn flags(&self, id: NodeId) -> Option<NodeFlags> {
        self.node_opt(id).map(|n| n.local.flags)
    }

    /// Whether the node itself carries [`NodeFlags::INERT`].
    pub fn is_inert(&self, id: NodeId) -> bool {
        self.flags(id).is_some_and(|f| f.contains(NodeFlags::INERT))
    }

    /// Whether the node or any flat-tree ancestor is inert.
    ///
    /// Slotted nodes inherit from their slot rather than from their host.
    pub fn is_inert_within(&self, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if self.is_inert(c) {
                return true;
            }
            cur = self.flat_parent(c);
        }
        false
    }

    /// Whether the node reaches the document root through parents and shadow hosts.
    pub fn is_connected(&self, id: NodeId) -> bool {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if c == self.document {
                return true;
            }
            cur = self.parent(c).or_else(|| self.shadow_host(c));
        }
        false
    }

    /// Shadow root whose tree contains `id`, if any.
    pub fn containing_shadow_root(&self, id: NodeId) -> Option<NodeId> {
        let mut cur = self.parent(id)?;
        while let Some(p) = self.parent(cur) {
            cur = p;
        }
        self.shadow_host(cur).map(|_| cur)
    }

    /// Returns the topmost pickable, non-inert node whose bounds contain `pt`.
    ///
    /// Later nodes in composed tree order (shadow tree before light children)
    /// paint over earlier ones.
    pub fn hit_test_point(&self, pt: Point) -> Option<Hit> {
        let mut best = None;
        for id in self.composed_order(self.document) {
            let node = self.node(id);
            if !node.local.flags.contains(NodeFlags::PICKABLE)
                || !node.local.bounds.contains(pt)
                || self.is_inert_within(id)
            {
                continue;
            }
            best = Some(id);
        }
        best.map(|node| Hit {
            node,
            path: self.flat_path(node),
        })
    }

    // --- internals ---

    fn node(&self, id: NodeId) -> &Node {
        self.nodes[id.idx()].as_ref().expect("dangling NodeId")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node {
        self.nodes[id.idx()].as_mut().expect("dangling NodeId")
    }

    fn node_opt(&self, id: NodeId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        (n.generation == id.1).then_some(n)
    }

    fn node_opt_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn is_inclusive_ancestor(&self, ancestor: NodeId, mut id: NodeId) -> bool {
        loop {
            if id == ancestor {
                return true;
            }
            match self.parent(id).or_else(|| self.shadow_host(id)) {
                Some(p) => id = p,
                None => return false,
            }
        }
    }

    fn flat_parent(&self, id: NodeId) -> Option<NodeId> {
        self.assigned_slot(id)
            .or_else(|| self.parent(id))
            .or_else(|| self.shadow_host(id))
    }

    fn flat_path(&self, mut id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        loop {
            out.push(id);
            match self.flat_parent(id) {
                Some(p) => id = p,
                None => break,
            }
        }
        out.reverse();
        out
    }

    fn composed_order(&self, from: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = alloc::vec![from];
        while let Some(id) = stack.pop() {
            out.push(id);
            let node = self.node(id);
            // Push in reverse so the shadow tree comes out first, then children in order.
            for child in node.children.iter().rev() {
                stack.push(*child);
            }
            if let Some(sr) = node.shadow_root {
                stack.push(sr);
            }
        }
        out
    }
}
