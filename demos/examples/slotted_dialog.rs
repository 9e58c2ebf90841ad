// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A dialog rendered by a shadow host.
//!
//! The page content is projected into the host's shadow tree through a slot.
//! Pushing the host keeps that slotted content interactive, and pushing the
//! slotted content itself follows the slot when walking up.
//!
//! Run:
//! - `cargo run -p inertia_demos --example slotted_dialog`

use inertia_blocking::BlockingElements;
use inertia_blocking::distribution::distributed_nodes;
use inertia_blocking::path::ancestor_chain;
use inertia_tree::{LocalNode, SLOT_NAME, Tree};

fn main() {
    let mut tree = Tree::new();
    let body = tree.document();
    let header = tree.insert(Some(body), LocalNode::element("header"));
    let host = tree.insert(Some(body), LocalNode::element("x-dialog"));
    let content = tree.insert(Some(host), LocalNode::element("p"));
    let extra = tree.insert(Some(host), LocalNode::element("p"));

    let shadow = tree.attach_shadow(host).unwrap();
    let chrome = tree.insert(Some(shadow), LocalNode::element("div"));
    let slot = tree.insert(Some(chrome), LocalNode::element(SLOT_NAME));
    let close = tree.insert(Some(chrome), LocalNode::element("button"));
    tree.assign_slot(content, Some(slot));

    println!("chain of content: {:?}", ancestor_chain(&tree, &content).unwrap());
    println!("distributed into host: {:?}", distributed_nodes(&tree, &host));

    let mut blocking = BlockingElements::new();
    blocking.push(&mut tree, host).unwrap();
    println!("== push host");
    for (label, id) in [("header", header), ("content", content), ("extra", extra)] {
        println!("{label:>8}: inert = {}", tree.is_inert(id));
    }

    blocking.push(&mut tree, content).unwrap();
    println!("== push slotted content");
    for (label, id) in [("header", header), ("close", close), ("extra", extra)] {
        println!("{label:>8}: inert = {}", tree.is_inert(id));
    }

    blocking.teardown(&mut tree);
    println!("== teardown");
    println!("observers left: {}", tree.observer_count());
}
