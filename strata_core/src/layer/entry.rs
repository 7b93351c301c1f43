// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layer record and its identity.

use core::fmt;

use super::kind::LayerKind;
use crate::group::GroupId;
use crate::node::{NodeId, NodeTree};

/// Identity of a layer.
///
/// A layer is identified by its backing node, so the handle goes stale as
/// soon as the layer is destroyed.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayerId(pub(crate) NodeId);

impl LayerId {
    /// Returns the backing node of the layer.
    #[inline]
    #[must_use]
    pub const fn node(self) -> NodeId {
        self.0
    }
}

impl fmt::Debug for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LayerId({}@gen{})", self.0.idx, self.0.generation)
    }
}

/// One rendering surface in a group's layer stack.
///
/// A `Layer` exclusively owns its backing node (and, for a resources layer,
/// the defs node inside it). Values are produced detached by
/// [`Group::create_layer`](crate::group::Group::create_layer) or handed back
/// by [`Group::remove_layer`](crate::group::Group::remove_layer); a group
/// takes ownership again on insertion.
#[derive(Debug, PartialEq, Eq)]
pub struct Layer {
    pub(crate) kind: LayerKind,
    pub(crate) node: NodeId,
    pub(crate) resources: Option<NodeId>,
    pub(crate) group: GroupId,
}

impl Layer {
    /// Returns the identity of this layer.
    #[inline]
    #[must_use]
    pub const fn id(&self) -> LayerId {
        LayerId(self.node)
    }

    /// Returns the backend kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> LayerKind {
        self.kind
    }

    /// Returns the backing surface node.
    #[inline]
    #[must_use]
    pub const fn node(&self) -> NodeId {
        self.node
    }

    /// Returns the resources (defs) node, if this is a resources layer.
    #[inline]
    #[must_use]
    pub const fn resources(&self) -> Option<NodeId> {
        self.resources
    }

    /// Whether this layer hosts the resources section.
    #[inline]
    #[must_use]
    pub const fn is_resources(&self) -> bool {
        self.resources.is_some()
    }

    /// Returns the group that owns (or last owned) this layer.
    #[inline]
    #[must_use]
    pub const fn group(&self) -> GroupId {
        self.group
    }

    /// Destroys the backing node and everything attached to it.
    ///
    /// # Panics
    ///
    /// Panics if the backing node was already destroyed through the tree.
    pub fn destroy(self, tree: &mut NodeTree) {
        tree.destroy_subtree(self.node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeKind;

    #[test]
    fn identity_follows_backing_node() {
        let mut tree = NodeTree::new();
        let node = tree.create_node(NodeKind::Markup);
        let layer = Layer {
            kind: LayerKind::Markup,
            node,
            resources: None,
            group: GroupId(0),
        };
        assert_eq!(layer.id().node(), node);
        assert!(!layer.is_resources());
    }

    #[test]
    fn destroy_frees_surface_and_defs() {
        let mut tree = NodeTree::new();
        let node = tree.create_node(NodeKind::VectorSurface);
        let defs = tree.create_node(NodeKind::Defs);
        tree.append_child(node, defs);
        let layer = Layer {
            kind: LayerKind::Vector,
            node,
            resources: Some(defs),
            group: GroupId(0),
        };
        assert!(layer.is_resources());

        layer.destroy(&mut tree);
        assert!(!tree.is_alive(node));
        assert!(!tree.is_alive(defs));
    }
}
