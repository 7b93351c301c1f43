// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Indented text dumps of a backing subtree.

use std::fmt::Write;

use strata_core::node::{NodeId, NodeTree};

/// Renders the subtree rooted at `root` as indented text, one node per line.
///
/// Each line shows the node kind and slot index. Non-zero translations are
/// appended as `at (x, y)`. Children are listed in paint order.
///
/// ```
/// use strata_core::group::{Group, GroupId};
/// use strata_core::node::NodeTree;
/// use strata_debug::outline::outline;
///
/// let mut tree = NodeTree::new();
/// let mut group = Group::new(&mut tree, GroupId(0));
/// let _ = group.markup_layer(&mut tree);
/// assert_eq!(outline(&tree, group.container()), "group 0\n  markup 1\n");
/// ```
///
/// # Panics
///
/// Panics if `root` is stale.
#[must_use]
pub fn outline(tree: &NodeTree, root: NodeId) -> String {
    let mut out = String::new();
    write_node(tree, root, 0, &mut out);
    out
}

fn write_node(tree: &NodeTree, id: NodeId, depth: usize, out: &mut String) {
    let _ = write!(
        out,
        "{:indent$}{} {}",
        "",
        tree.kind(id).as_str(),
        id.index(),
        indent = depth * 2
    );
    let t = tree.translation(id);
    if t.x != 0.0 || t.y != 0.0 {
        let _ = write!(out, " at ({}, {})", t.x, t.y);
    }
    out.push('\n');
    for child in tree.children(id) {
        write_node(tree, child, depth + 1, out);
    }
}
