// Copyright 2025 the Inertia Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Nested dialogs on a page, printed as an ASCII tree after every step.
//!
//! A dialog opened from inside another dialog blocks it, and closing it hands
//! interactivity back. Hit testing at the same point shows who gets the click.
//!
//! Run:
//! - `cargo run -p inertia_demos --example dialog_stack`

use inertia_blocking::BlockingElements;
use inertia_blocking::adapters::tree::deliver_mutations;
use inertia_tree::{LocalNode, NodeId, Tree};
use kurbo::{Point, Rect};

fn main() {
    let mut tree = Tree::new();
    let body = tree.document();
    let full = Rect::new(0.0, 0.0, 400.0, 300.0);

    let nav = tree.insert(
        Some(body),
        LocalNode::element("nav").with_bounds(Rect::new(0.0, 0.0, 400.0, 40.0)),
    );
    let main = tree.insert(Some(body), LocalNode::element("main").with_bounds(full));
    let _script = tree.insert(Some(body), LocalNode::element("script"));
    let settings = tree.insert(
        Some(body),
        LocalNode::element("dialog").with_bounds(Rect::new(50.0, 50.0, 350.0, 250.0)),
    );
    let confirm = tree.insert(
        Some(settings),
        LocalNode::element("dialog").with_bounds(Rect::new(100.0, 100.0, 300.0, 200.0)),
    );
    let _form = tree.insert(
        Some(settings),
        LocalNode::element("form").with_bounds(Rect::new(50.0, 50.0, 350.0, 250.0)),
    );

    let names = [
        (body, "body"),
        (nav, "nav"),
        (main, "main"),
        (settings, "settings"),
        (confirm, "confirm"),
    ];
    let probe = Point::new(120.0, 120.0);
    let report = |tree: &Tree, label: &str| {
        println!("== {label}");
        print_tree(tree, body, 0);
        let hit = tree.hit_test_point(probe).map(|h| h.node);
        let who = names
            .iter()
            .find(|(id, _)| Some(*id) == hit)
            .map_or("<other>", |(_, name)| name);
        println!("click at {probe:?} -> {who}\n");
    };

    let mut blocking = BlockingElements::new();
    report(&tree, "initial");

    blocking.push(&mut tree, settings).unwrap();
    report(&tree, "open settings");

    blocking.push(&mut tree, confirm).unwrap();
    report(&tree, "open confirm inside settings");

    // A toast shows up while the confirm dialog is open.
    let toast = tree.insert(Some(body), LocalNode::element("aside"));
    deliver_mutations(&mut tree, &mut blocking);
    report(&tree, "toast appended to body");

    blocking.pop(&mut tree);
    report(&tree, "close confirm");

    // Removing the settings dialog from the document pops it on delivery.
    tree.detach(settings);
    deliver_mutations(&mut tree, &mut blocking);
    println!("stack empty: {}", blocking.is_empty());
    println!("toast inert: {}", tree.is_inert(toast));
}

fn print_tree(tree: &Tree, id: NodeId, depth: usize) {
    let name = tree.local_name(id).unwrap_or("#node");
    let mark = if tree.is_inert(id) { " [inert]" } else { "" };
    println!("{:indent$}{name}{mark}", "", indent = depth * 2);
    for child in tree.children(id) {
        print_tree(tree, *child, depth + 1);
    }
}
