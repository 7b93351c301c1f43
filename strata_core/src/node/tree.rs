// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Struct-of-arrays node storage with allocation, topology, and property management.

use alloc::vec::Vec;

use kurbo::Vec2;
use understory_dirty::{CycleHandling, DirtyTracker};

use super::id::{INVALID, NodeId, NodeKind};
use super::traverse::Children;
use crate::dirty;

/// Struct-of-arrays storage for all backing nodes.
///
/// Nodes are addressed by [`NodeId`] handles. Internally, each node occupies a
/// slot in parallel arrays. Destroyed nodes are recycled via a free list, and
/// generation counters prevent stale handle access.
#[derive(Debug)]
pub struct NodeTree {
    // -- Topology --
    pub(crate) parent: Vec<u32>,
    pub(crate) first_child: Vec<u32>,
    pub(crate) last_child: Vec<u32>,
    pub(crate) next_sibling: Vec<u32>,
    pub(crate) prev_sibling: Vec<u32>,

    // -- Properties --
    pub(crate) kind: Vec<NodeKind>,
    pub(crate) translation: Vec<Vec2>,

    // -- Allocation --
    pub(crate) generation: Vec<u32>,
    pub(crate) free_list: Vec<u32>,
    pub(crate) len: u32,

    // -- Dirty tracking --
    pub(crate) dirty: DirtyTracker<u32>,

    // -- Lifecycle tracking --
    pub(crate) pending_added: Vec<u32>,
    pub(crate) pending_removed: Vec<u32>,
    pub(crate) pending_detached: Vec<(u32, u32)>,
}

impl Default for NodeTree {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeTree {
    /// Creates an empty node tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            parent: Vec::new(),
            first_child: Vec::new(),
            last_child: Vec::new(),
            next_sibling: Vec::new(),
            prev_sibling: Vec::new(),
            kind: Vec::new(),
            translation: Vec::new(),
            generation: Vec::new(),
            free_list: Vec::new(),
            len: 0,
            dirty: DirtyTracker::with_cycle_handling(CycleHandling::Error),
            pending_added: Vec::new(),
            pending_removed: Vec::new(),
            pending_detached: Vec::new(),
        }
    }

    // -- Allocation API --

    /// Creates a new, detached node of the given kind and returns its handle.
    pub fn create_node(&mut self, kind: NodeKind) -> NodeId {
        let idx = if let Some(idx) = self.free_list.pop() {
            // Reuse a freed slot.
            let i = idx as usize;
            self.generation[i] += 1;
            self.parent[i] = INVALID;
            self.first_child[i] = INVALID;
            self.last_child[i] = INVALID;
            self.next_sibling[i] = INVALID;
            self.prev_sibling[i] = INVALID;
            self.kind[i] = kind;
            self.translation[i] = Vec2::ZERO;
            idx
        } else {
            let idx = self.len;
            self.len += 1;
            self.parent.push(INVALID);
            self.first_child.push(INVALID);
            self.last_child.push(INVALID);
            self.next_sibling.push(INVALID);
            self.prev_sibling.push(INVALID);
            self.kind.push(kind);
            self.translation.push(Vec2::ZERO);
            self.generation.push(0);
            idx
        };

        self.pending_added.push(idx);

        NodeId {
            idx,
            generation: self.generation[idx as usize],
        }
    }

    /// Destroys a node, freeing its slot for reuse.
    ///
    /// # Panics
    ///
    /// Panics if the node has children (remove or destroy them first) or if
    /// the handle is stale.
    pub fn destroy_node(&mut self, id: NodeId) {
        self.validate(id);
        let idx = id.idx;
        assert!(
            self.first_child[idx as usize] == INVALID,
            "cannot destroy node with children"
        );

        if self.parent[idx as usize] != INVALID {
            let p = self.parent[idx as usize];
            self.unlink_from_parent(idx);
            self.dirty.mark(p, dirty::CHILDREN);
        }

        self.dirty.remove_key(idx);

        // Bump generation so old handles immediately fail validation.
        self.generation[idx as usize] += 1;
        self.free_list.push(idx);

        // A node created and destroyed between two drains never reaches a
        // presenter.
        if let Some(pos) = self.pending_added.iter().position(|&a| a == idx) {
            self.pending_added.swap_remove(pos);
        } else {
            self.pending_removed.push(idx);
        }
    }

    /// Destroys a node together with all of its descendants.
    ///
    /// Descendants are destroyed children-first, so each node is childless by
    /// the time it is freed.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale.
    pub fn destroy_subtree(&mut self, id: NodeId) {
        self.validate(id);
        let mut stack = Vec::new();
        let mut post_order = Vec::new();
        stack.push(id.idx);
        while let Some(idx) = stack.pop() {
            post_order.push(idx);
            let mut child = self.first_child[idx as usize];
            while child != INVALID {
                stack.push(child);
                child = self.next_sibling[child as usize];
            }
        }
        for &idx in post_order.iter().rev() {
            let node = NodeId {
                idx,
                generation: self.generation[idx as usize],
            };
            self.destroy_node(node);
        }
    }

    /// Returns whether the given handle refers to a live node.
    #[must_use]
    pub fn is_alive(&self, id: NodeId) -> bool {
        // Destroying a node bumps its generation, so freed slots never match.
        (id.idx < self.len) && self.generation[id.idx as usize] == id.generation
    }

    /// Returns the number of live nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.len as usize - self.free_list.len()
    }

    // -- Topology API --

    /// Adds `child` as the last child of `parent`.
    ///
    /// # Panics
    ///
    /// Panics if either handle is stale, if `child` already has a parent, if
    /// `child` and `parent` are the same node, or if `child` is an ancestor
    /// of `parent`.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) {
        self.validate(parent);
        self.validate(child);
        let p = parent.idx;
        let c = child.idx;
        assert!(p != c, "node cannot be its own child");
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        assert!(!self.is_ancestor_of(c, p), "append would create a cycle");

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = INVALID;

        let last = self.last_child[p as usize];
        if last == INVALID {
            self.first_child[p as usize] = c;
        } else {
            self.next_sibling[last as usize] = c;
        }
        self.prev_sibling[c as usize] = last;
        self.last_child[p as usize] = c;

        self.dirty.mark(p, dirty::CHILDREN);
    }

    /// Inserts `child` immediately before `sibling` in the sibling list.
    ///
    /// `child` must not already have a parent. `sibling` must have a parent.
    ///
    /// # Panics
    ///
    /// Panics if handles are stale, `child` already has a parent, `sibling`
    /// has no parent, or `child` is an ancestor of `sibling`.
    pub fn insert_before(&mut self, child: NodeId, sibling: NodeId) {
        self.validate(child);
        self.validate(sibling);
        let c = child.idx;
        let s = sibling.idx;
        assert!(
            self.parent[c as usize] == INVALID,
            "child already has a parent"
        );
        let p = self.parent[s as usize];
        assert!(p != INVALID, "sibling has no parent");
        assert!(!self.is_ancestor_of(c, p), "insert would create a cycle");

        self.parent[c as usize] = p;
        self.next_sibling[c as usize] = s;
        self.prev_sibling[c as usize] = self.prev_sibling[s as usize];

        if self.prev_sibling[s as usize] != INVALID {
            self.next_sibling[self.prev_sibling[s as usize] as usize] = c;
        } else {
            // `sibling` was the first child.
            self.first_child[p as usize] = c;
        }
        self.prev_sibling[s as usize] = c;

        self.dirty.mark(p, dirty::CHILDREN);
    }

    /// Removes `child` from its current parent. The node stays alive.
    ///
    /// # Panics
    ///
    /// Panics if the handle is stale or the node has no parent.
    pub fn remove_from_parent(&mut self, child: NodeId) {
        self.validate(child);
        let c = child.idx;
        assert!(self.parent[c as usize] != INVALID, "node has no parent");

        let p = self.parent[c as usize];
        self.unlink_from_parent(c);
        self.pending_detached.push((c, child.generation));
        self.dirty.mark(p, dirty::CHILDREN);
    }

    /// Returns the parent of a node, if any.
    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle(self.parent[id.idx as usize])
    }

    /// Returns the first child of a node, if any.
    #[must_use]
    pub fn first_child(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle(self.first_child[id.idx as usize])
    }

    /// Returns the last child of a node, if any.
    #[must_use]
    pub fn last_child(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle(self.last_child[id.idx as usize])
    }

    /// Returns the sibling following a node, if any.
    #[must_use]
    pub fn next_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle(self.next_sibling[id.idx as usize])
    }

    /// Returns the sibling preceding a node, if any.
    #[must_use]
    pub fn prev_sibling(&self, id: NodeId) -> Option<NodeId> {
        self.validate(id);
        self.handle(self.prev_sibling[id.idx as usize])
    }

    /// Returns an iterator over the direct children of a node.
    #[must_use]
    pub fn children(&self, id: NodeId) -> Children<'_> {
        self.validate(id);
        Children::new(self, self.first_child[id.idx as usize])
    }

    /// Returns the number of direct children of a node.
    #[must_use]
    pub fn child_count(&self, id: NodeId) -> usize {
        self.children(id).count()
    }

    // -- Properties --

    /// Returns the kind of a node.
    #[must_use]
    pub fn kind(&self, id: NodeId) -> NodeKind {
        self.validate(id);
        self.kind[id.idx as usize]
    }

    /// Returns the translation offset of a node.
    #[must_use]
    pub fn translation(&self, id: NodeId) -> Vec2 {
        self.validate(id);
        self.translation[id.idx as usize]
    }

    /// Sets the translation offset of a node.
    ///
    /// Marks the TRANSLATION channel. No-op if the value is unchanged.
    pub fn set_translation(&mut self, id: NodeId, translation: Vec2) {
        self.validate(id);
        if self.translation[id.idx as usize] != translation {
            self.translation[id.idx as usize] = translation;
            self.dirty.mark(id.idx, dirty::TRANSLATION);
        }
    }

    // -- Raw-index accessors for presenters --
    //
    // These accept raw slot indices (as found in `TreeChanges`) rather than
    // `NodeId` handles, skipping generation validation.

    /// Returns the kind at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn kind_at(&self, idx: u32) -> NodeKind {
        self.check_slot(idx);
        self.kind[idx as usize]
    }

    /// Returns the translation at raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn translation_at(&self, idx: u32) -> Vec2 {
        self.check_slot(idx);
        self.translation[idx as usize]
    }

    /// Returns the parent slot of raw slot `idx`, if it has one.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn parent_at(&self, idx: u32) -> Option<u32> {
        self.check_slot(idx);
        let p = self.parent[idx as usize];
        (p != INVALID).then_some(p)
    }

    /// Returns an iterator over the children of raw slot `idx`.
    ///
    /// # Panics
    ///
    /// Panics if `idx >= self.len`.
    #[must_use]
    pub fn children_at(&self, idx: u32) -> Children<'_> {
        self.check_slot(idx);
        Children::new(self, self.first_child[idx as usize])
    }

    // -- Internal helpers --

    /// Panics if the handle is stale.
    /// Whether `ancestor` is `idx` or lies on its parent chain.
    fn is_ancestor_of(&self, ancestor: u32, mut idx: u32) -> bool {
        while idx != INVALID {
            if idx == ancestor {
                return true;
            }
            idx = self.parent[idx as usize];
        }
        false
    }

    fn validate(&self, id: NodeId) {
        assert!(
            id.idx < self.len && self.generation[id.idx as usize] == id.generation,
            "stale NodeId: {id:?} (current gen: {})",
            if id.idx < self.len {
                self.generation[id.idx as usize]
            } else {
                u32::MAX
            }
        );
    }

    fn check_slot(&self, idx: u32) {
        assert!(
            idx < self.len,
            "slot index {idx} out of range (len {})",
            self.len
        );
    }

    fn handle(&self, idx: u32) -> Option<NodeId> {
        (idx != INVALID).then(|| NodeId {
            idx,
            generation: self.generation[idx as usize],
        })
    }

    /// Removes `idx` from its parent's child list without touching dirty state.
    fn unlink_from_parent(&mut self, idx: u32) {
        let p = self.parent[idx as usize];
        let prev = self.prev_sibling[idx as usize];
        let next = self.next_sibling[idx as usize];

        if prev != INVALID {
            self.next_sibling[prev as usize] = next;
        } else {
            self.first_child[p as usize] = next;
        }

        if next != INVALID {
            self.prev_sibling[next as usize] = prev;
        } else {
            self.last_child[p as usize] = prev;
        }

        self.parent[idx as usize] = INVALID;
        self.prev_sibling[idx as usize] = INVALID;
        self.next_sibling[idx as usize] = INVALID;
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec;

    use super::*;

    #[test]
    fn create_and_destroy() {
        let mut tree = NodeTree::new();
        let id = tree.create_node(NodeKind::Markup);
        assert!(tree.is_alive(id));
        assert_eq!(tree.node_count(), 1);
        tree.destroy_node(id);
        assert!(!tree.is_alive(id));
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn generation_prevents_stale_access() {
        let mut tree = NodeTree::new();
        let id1 = tree.create_node(NodeKind::Markup);
        tree.destroy_node(id1);
        let id2 = tree.create_node(NodeKind::VectorSurface);
        // id2 reuses the same slot but has a different generation.
        assert!(!tree.is_alive(id1));
        assert!(tree.is_alive(id2));
        assert_eq!(id1.idx, id2.idx);
        assert_ne!(id1.generation, id2.generation);
        assert_eq!(tree.kind(id2), NodeKind::VectorSurface);
    }

    #[test]
    fn append_child_tracks_first_and_last() {
        let mut tree = NodeTree::new();
        let parent = tree.create_node(NodeKind::Group);
        let a = tree.create_node(NodeKind::Markup);
        let b = tree.create_node(NodeKind::VectorSurface);

        tree.append_child(parent, a);
        assert_eq!(tree.first_child(parent), Some(a));
        assert_eq!(tree.last_child(parent), Some(a));

        tree.append_child(parent, b);
        assert_eq!(tree.first_child(parent), Some(a));
        assert_eq!(tree.last_child(parent), Some(b));
        assert_eq!(tree.parent(b), Some(parent));

        let kids: Vec<_> = tree.children(parent).collect();
        assert_eq!(kids, vec![a, b]);
    }

    #[test]
    fn insert_before_first_child() {
        let mut tree = NodeTree::new();
        let parent = tree.create_node(NodeKind::Group);
        let a = tree.create_node(NodeKind::Markup);
        let b = tree.create_node(NodeKind::Markup);

        tree.append_child(parent, b);
        tree.insert_before(a, b);

        let kids: Vec<_> = tree.children(parent).collect();
        assert_eq!(kids, vec![a, b]);
        assert_eq!(tree.first_child(parent), Some(a));
        assert_eq!(tree.last_child(parent), Some(b));
        assert_eq!(tree.prev_sibling(b), Some(a));
        assert_eq!(tree.next_sibling(a), Some(b));
    }

    #[test]
    fn insert_before_middle_child() {
        let mut tree = NodeTree::new();
        let parent = tree.create_node(NodeKind::Group);
        let a = tree.create_node(NodeKind::Markup);
        let b = tree.create_node(NodeKind::Markup);
        let c = tree.create_node(NodeKind::Markup);

        tree.append_child(parent, a);
        tree.append_child(parent, c);
        tree.insert_before(b, c);

        let kids: Vec<_> = tree.children(parent).collect();
        assert_eq!(kids, vec![a, b, c]);
    }

    #[test]
    fn remove_last_child_updates_last() {
        let mut tree = NodeTree::new();
        let parent = tree.create_node(NodeKind::Group);
        let a = tree.create_node(NodeKind::Markup);
        let b = tree.create_node(NodeKind::Markup);
        tree.append_child(parent, a);
        tree.append_child(parent, b);

        tree.remove_from_parent(b);
        assert_eq!(tree.last_child(parent), Some(a));
        assert_eq!(tree.parent(b), None);
        assert!(tree.is_alive(b));

        tree.remove_from_parent(a);
        assert_eq!(tree.first_child(parent), None);
        assert_eq!(tree.last_child(parent), None);
    }

    #[test]
    fn destroy_attached_node_unlinks_it() {
        let mut tree = NodeTree::new();
        let parent = tree.create_node(NodeKind::Group);
        let a = tree.create_node(NodeKind::Markup);
        let b = tree.create_node(NodeKind::Markup);
        tree.append_child(parent, a);
        tree.append_child(parent, b);

        tree.destroy_node(b);
        let kids: Vec<_> = tree.children(parent).collect();
        assert_eq!(kids, vec![a]);
        assert_eq!(tree.last_child(parent), Some(a));
    }

    #[test]
    fn destroy_subtree_frees_descendants() {
        let mut tree = NodeTree::new();
        let surface = tree.create_node(NodeKind::VectorSurface);
        let defs = tree.create_node(NodeKind::Defs);
        let shape = tree.create_node(NodeKind::Shape);
        tree.append_child(surface, defs);
        tree.append_child(surface, shape);

        tree.destroy_subtree(surface);
        assert!(!tree.is_alive(surface));
        assert!(!tree.is_alive(defs));
        assert!(!tree.is_alive(shape));
        assert_eq!(tree.node_count(), 0);
    }

    #[test]
    fn set_translation_round_trips() {
        let mut tree = NodeTree::new();
        let id = tree.create_node(NodeKind::Group);
        assert_eq!(tree.translation(id), Vec2::ZERO);
        tree.set_translation(id, Vec2::new(4.0, -2.5));
        assert_eq!(tree.translation(id), Vec2::new(4.0, -2.5));
        assert_eq!(tree.translation_at(id.index()), Vec2::new(4.0, -2.5));
    }

    #[test]
    fn raw_accessors_follow_topology() {
        let mut tree = NodeTree::new();
        let parent = tree.create_node(NodeKind::Group);
        let child = tree.create_node(NodeKind::Markup);
        tree.append_child(parent, child);

        assert_eq!(tree.parent_at(child.index()), Some(parent.index()));
        assert_eq!(tree.parent_at(parent.index()), None);
        assert_eq!(tree.kind_at(child.index()), NodeKind::Markup);
        let kids: Vec<_> = tree.children_at(parent.index()).collect();
        assert_eq!(kids, vec![child]);
    }

    #[test]
    #[should_panic(expected = "cannot destroy node with children")]
    fn destroy_with_children_panics() {
        let mut tree = NodeTree::new();
        let parent = tree.create_node(NodeKind::Group);
        let child = tree.create_node(NodeKind::Markup);
        tree.append_child(parent, child);
        tree.destroy_node(parent);
    }

    #[test]
    #[should_panic(expected = "child already has a parent")]
    fn append_attached_child_panics() {
        let mut tree = NodeTree::new();
        let p1 = tree.create_node(NodeKind::Group);
        let p2 = tree.create_node(NodeKind::Group);
        let child = tree.create_node(NodeKind::Markup);
        tree.append_child(p1, child);
        tree.append_child(p2, child);
    }

    #[test]
    #[should_panic(expected = "node cannot be its own child")]
    fn append_to_self_panics() {
        let mut tree = NodeTree::new();
        let node = tree.create_node(NodeKind::Group);
        tree.append_child(node, node);
    }

    #[test]
    #[should_panic(expected = "sibling has no parent")]
    fn insert_before_detached_sibling_panics() {
        let mut tree = NodeTree::new();
        let a = tree.create_node(NodeKind::Markup);
        let b = tree.create_node(NodeKind::Markup);
        tree.insert_before(a, b);
    }

    #[test]
    #[should_panic(expected = "append would create a cycle")]
    fn append_ancestor_panics() {
        let mut tree = NodeTree::new();
        let outer = tree.create_node(NodeKind::Group);
        let inner = tree.create_node(NodeKind::Group);
        let leaf = tree.create_node(NodeKind::Group);
        tree.append_child(outer, inner);
        tree.append_child(inner, leaf);
        tree.append_child(leaf, outer);
    }

    #[test]
    #[should_panic(expected = "insert would create a cycle")]
    fn insert_ancestor_before_descendant_panics() {
        let mut tree = NodeTree::new();
        let outer = tree.create_node(NodeKind::Group);
        let inner = tree.create_node(NodeKind::Group);
        let leaf = tree.create_node(NodeKind::Markup);
        tree.append_child(outer, inner);
        tree.append_child(inner, leaf);
        tree.remove_from_parent(inner);
        tree.insert_before(inner, leaf);
    }

    #[test]
    fn freed_slot_is_dead_until_reused() {
        let mut tree = NodeTree::new();
        let old = tree.create_node(NodeKind::Markup);
        tree.destroy_node(old);
        assert!(!tree.is_alive(old));

        let new = tree.create_node(NodeKind::Markup);
        assert_eq!(new.index(), old.index(), "slot reused");
        assert!(tree.is_alive(new));
        assert!(!tree.is_alive(old), "old handle stays stale");
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_parent() {
        let mut tree = NodeTree::new();
        let id = tree.create_node(NodeKind::Markup);
        tree.destroy_node(id);
        let _ = tree.parent(id);
    }

    #[test]
    #[should_panic(expected = "stale NodeId")]
    fn destroyed_handle_panics_on_append() {
        let mut tree = NodeTree::new();
        let root = tree.create_node(NodeKind::Group);
        let id = tree.create_node(NodeKind::Markup);
        tree.destroy_node(id);
        tree.append_child(root, id);
    }
}
