// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Change draining for presenters.
//!
//! [`TreeChanges`] uses raw slot indices (`u32`) rather than [`NodeId`]
//! handles so that presenters can index directly into the tree via the
//! `*_at()` accessors (e.g. [`kind_at`](super::NodeTree::kind_at)).
//!
//! [`NodeId`]: super::NodeId

use alloc::vec::Vec;

use super::id::INVALID;
use super::tree::NodeTree;
use crate::dirty;

/// The set of changes accumulated since the previous
/// [`NodeTree::take_changes`] call.
#[derive(Clone, Debug, Default)]
pub struct TreeChanges {
    /// Nodes created since the last drain.
    pub added: Vec<u32>,
    /// Nodes destroyed since the last drain.
    pub removed: Vec<u32>,
    /// Live nodes that were removed from their parent and are still parentless.
    pub detached: Vec<u32>,
    /// Nodes whose child list changed (insertions, removals, reorders).
    pub reordered: Vec<u32>,
    /// Nodes whose translation changed.
    pub translated: Vec<u32>,
}

impl TreeChanges {
    /// Clears all change lists.
    pub fn clear(&mut self) {
        self.added.clear();
        self.removed.clear();
        self.detached.clear();
        self.reordered.clear();
        self.translated.clear();
    }

    /// Returns `true` if nothing changed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.added.is_empty()
            && self.removed.is_empty()
            && self.detached.is_empty()
            && self.reordered.is_empty()
            && self.translated.is_empty()
    }
}

impl NodeTree {
    /// Drains accumulated changes.
    pub fn take_changes(&mut self) -> TreeChanges {
        let mut changes = TreeChanges::default();
        self.take_changes_into(&mut changes);
        changes
    }

    /// Like [`take_changes`](Self::take_changes), but reuses a caller-provided
    /// buffer.
    pub fn take_changes_into(&mut self, changes: &mut TreeChanges) {
        changes.clear();

        changes.reordered = self
            .dirty
            .drain(dirty::CHILDREN)
            .deterministic()
            .run()
            .collect();

        changes.translated = self
            .dirty
            .drain(dirty::TRANSLATION)
            .deterministic()
            .run()
            .collect();

        core::mem::swap(&mut self.pending_added, &mut changes.added);
        core::mem::swap(&mut self.pending_removed, &mut changes.removed);

        // Keep only nodes that are still alive and parentless; anything that
        // was reattached is covered by its new parent's reorder entry. A
        // generation mismatch means the node was destroyed since.
        let mut detached = core::mem::take(&mut self.pending_detached);
        detached.sort_unstable();
        detached.dedup();
        changes.detached.extend(
            detached
                .iter()
                .filter(|&&(idx, generation)| {
                    self.generation[idx as usize] == generation
                        && self.parent[idx as usize] == INVALID
                })
                .map(|&(idx, _)| idx),
        );
        detached.clear();
        self.pending_detached = detached;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use kurbo::Vec2;

    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn additions_are_reported_once() {
        let mut tree = NodeTree::new();
        let a = tree.create_node(NodeKind::Group);
        let b = tree.create_node(NodeKind::Markup);

        let changes = tree.take_changes();
        assert_eq!(changes.added, vec![a.index(), b.index()]);
        assert!(tree.take_changes().is_empty(), "second drain is empty");
    }

    #[test]
    fn append_marks_parent_reordered() {
        let mut tree = NodeTree::new();
        let parent = tree.create_node(NodeKind::Group);
        let child = tree.create_node(NodeKind::Markup);
        let _ = tree.take_changes();

        tree.append_child(parent, child);
        let changes = tree.take_changes();
        assert_eq!(changes.reordered, vec![parent.index()]);
        assert!(changes.added.is_empty(), "no new nodes");
    }

    #[test]
    fn created_then_destroyed_is_invisible() {
        let mut tree = NodeTree::new();
        let _ = tree.take_changes();

        let node = tree.create_node(NodeKind::Markup);
        tree.destroy_node(node);
        let changes = tree.take_changes();
        assert!(changes.added.is_empty(), "never presented");
        assert!(changes.removed.is_empty(), "nothing to tear down");
    }

    #[test]
    fn destroy_after_drain_reports_removal() {
        let mut tree = NodeTree::new();
        let node = tree.create_node(NodeKind::Markup);
        let _ = tree.take_changes();

        tree.destroy_node(node);
        let changes = tree.take_changes();
        assert_eq!(changes.removed, vec![node.index()]);
    }

    #[test]
    fn detached_excludes_reattached_nodes() {
        let mut tree = NodeTree::new();
        let p1 = tree.create_node(NodeKind::Group);
        let p2 = tree.create_node(NodeKind::Group);
        let moved = tree.create_node(NodeKind::Markup);
        let dropped = tree.create_node(NodeKind::Markup);
        tree.append_child(p1, moved);
        tree.append_child(p1, dropped);
        let _ = tree.take_changes();

        tree.remove_from_parent(moved);
        tree.append_child(p2, moved);
        tree.remove_from_parent(dropped);

        let mut changes = tree.take_changes();
        assert_eq!(changes.detached, vec![dropped.index()]);
        changes.reordered.sort_unstable();
        assert_eq!(changes.reordered, vec![p1.index(), p2.index()]);
    }

    #[test]
    fn detached_skips_destroyed_and_reused_slots() {
        let mut tree = NodeTree::new();
        let parent = tree.create_node(NodeKind::Group);
        let gone = tree.create_node(NodeKind::Markup);
        tree.append_child(parent, gone);
        let _ = tree.take_changes();

        tree.remove_from_parent(gone);
        tree.destroy_node(gone);
        let changes = tree.take_changes();
        assert!(changes.detached.is_empty(), "destroyed node is not detached");
        assert_eq!(changes.removed, vec![gone.index()]);

        // Detach, destroy, then reuse the slot for a node that is detached in
        // turn: the slot is reported once, for the new node.
        let first = tree.create_node(NodeKind::Markup);
        tree.append_child(parent, first);
        tree.remove_from_parent(first);
        tree.destroy_node(first);
        let second = tree.create_node(NodeKind::Markup);
        assert_eq!(second.index(), first.index());
        tree.append_child(parent, second);
        tree.remove_from_parent(second);
        let changes = tree.take_changes();
        assert_eq!(changes.detached, vec![second.index()]);
    }

    #[test]
    fn translation_changes_are_drained() {
        let mut tree = NodeTree::new();
        let group = tree.create_node(NodeKind::Group);
        let _ = tree.take_changes();

        tree.set_translation(group, Vec2::new(1.0, 2.0));
        let changes = tree.take_changes();
        assert_eq!(changes.translated, vec![group.index()]);

        tree.set_translation(group, Vec2::new(1.0, 2.0));
        assert!(
            tree.take_changes().translated.is_empty(),
            "unchanged value is not marked"
        );
    }
}
