// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inertia Blocking: a deterministic, `no_std` stack of blocking elements.
//!
//! ## Overview
//!
//! A blocking element is a node that, while it is on top of the stack, is the
//! only interactive region of its document. Its ancestor chain stays
//! interactive; every sibling of every chain member is marked inert. This is
//! the mechanism behind modal dialogs, focus traps, and nested overlays.
//! Popping hands the interactive region back to the node below.
//!
//! This crate does not decide what should block, and it does not move focus.
//!
//! ## Document model
//!
//! The stack never owns nodes. It talks to the host document through
//! capability traits in [`types`]:
//!
//! - [`DocumentTree`](crate::types::DocumentTree): parents, children, shadow hosts, and slot assignment.
//! - [`InertFlags`](crate::types::InertFlags): read and write a node's own inert flag.
//! - [`ChildListObserver`](crate::types::ChildListObserver): subscribe to direct child-list changes.
//!
//! Ancestor chains follow the flat tree: a node assigned to a slot continues at
//! that slot, and shadow roots are transparent. See [`path`].
//! Elements distributed into the top through its slots are never inerted. See
//! [`distribution`].
//!
//! ## Incremental maintenance
//!
//! On every top change, the new chain is diffed against the stored one from the
//! outside in. Shared ancestors keep their bookkeeping, diverging siblings
//! swap places, and only the unique inner parts are restored or inerted.
//!
//! Hosts queue child-list records as the document mutates and deliver them
//! later, in a batch, through
//! [`BlockingElements::handle_mutations`](crate::stack::BlockingElements::handle_mutations).
//! New siblings are inerted, removed ones restored, and removal of the top from
//! the document pops it.
//!
//! Nodes that were already inert before the stack reached them are remembered
//! and never made interactive by a restore.
//!
//! ## Example
//!
//! A host with a root and three flat children:
//!
//! ```
//! use inertia_blocking::BlockingElements;
//! use inertia_blocking::types::{ChildListObserver, DocumentTree, InertFlags};
//!
//! struct Flat {
//!     inert: Vec<bool>,
//! }
//!
//! impl DocumentTree for Flat {
//!     type Node = usize;
//!     fn root(&self) -> usize { 0 }
//!     fn parent_of(&self, n: &usize) -> Option<usize> { (*n != 0).then_some(0) }
//!     fn shadow_host_of(&self, _: &usize) -> Option<usize> { None }
//!     fn children_of(&self, n: &usize) -> Vec<usize> {
//!         if *n == 0 { (1..self.inert.len()).collect() } else { Vec::new() }
//!     }
//!     fn is_element(&self, _: &usize) -> bool { true }
//!     fn local_name(&self, _: &usize) -> Option<&str> { Some("div") }
//!     fn shadow_root_of(&self, _: &usize) -> Option<usize> { None }
//!     fn assigned_slot_of(&self, _: &usize) -> Option<usize> { None }
//!     fn assigned_nodes_of(&self, _: &usize) -> Vec<usize> { Vec::new() }
//!     fn is_slot(&self, _: &usize) -> bool { false }
//! }
//!
//! impl InertFlags for Flat {
//!     fn is_inert(&self, n: &usize) -> bool { self.inert[*n] }
//!     fn set_inert(&mut self, n: &usize, inert: bool) { self.inert[*n] = inert; }
//! }
//!
//! impl ChildListObserver for Flat {
//!     type Subscription = usize;
//!     fn observe_child_list(&mut self, n: &usize) -> usize { *n }
//!     fn disconnect(&mut self, _: usize) {}
//! }
//!
//! let mut doc = Flat { inert: vec![false; 4] };
//! let mut blocking = BlockingElements::new();
//!
//! blocking.push(&mut doc, 2).unwrap();
//! assert_eq!(doc.inert, [false, true, false, true]);
//!
//! blocking.push(&mut doc, 3).unwrap();
//! assert_eq!(doc.inert, [false, true, true, false]);
//!
//! blocking.pop(&mut doc);
//! blocking.pop(&mut doc);
//! assert_eq!(doc.inert, [false; 4]);
//! ```
//!
//! With the `tree_adapter` feature, [`inertia_tree::Tree`](https://docs.rs/inertia_tree)
//! implements these traits directly; see `adapters::tree`.
//!
//! ## Logging
//!
//! Top changes and teardown are reported at `debug`, implicit pops of removed
//! or detached tops at `info`, and ignored records at `trace`, through
//! [`tracing`](https://docs.rs/tracing).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod adapters;
pub mod config;
pub mod distribution;
pub mod error;
pub mod path;
mod siblings;
pub mod stack;
pub mod types;
mod watcher;

#[cfg(test)]
mod proptests;

pub use config::BlockingConfig;
pub use error::BlockingError;
pub use stack::BlockingElements;
