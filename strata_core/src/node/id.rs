// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node identity and kind types.

use core::fmt;

/// Sentinel value indicating "no node" in index fields.
pub const INVALID: u32 = u32::MAX;

/// A handle to a node in a [`NodeTree`](super::NodeTree).
///
/// Contains both a slot index and a generation counter so that stale handles
/// can be detected after a node is destroyed and the slot is reused.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId {
    /// Slot index into the tree's arrays.
    pub(crate) idx: u32,
    /// Generation counter, must match the tree's generation for this slot.
    pub(crate) generation: u32,
}

impl NodeId {
    /// Returns the raw slot index (for diagnostics and presenters).
    #[inline]
    #[must_use]
    pub const fn index(self) -> u32 {
        self.idx
    }

    /// Returns the generation counter.
    #[inline]
    #[must_use]
    pub const fn generation(self) -> u32 {
        self.generation
    }
}

impl fmt::Debug for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NodeId({}@gen{})", self.idx, self.generation)
    }
}

/// What a backing node represents.
///
/// Presenters use the kind to pick a native element; the layer stack uses it
/// to tell layer surfaces apart from nested group containers that share the
/// same parent.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeKind {
    /// Container of a scene-graph group. Parents layer surfaces and nested
    /// group containers.
    Group,
    /// Retained vector-graphics surface backing a vector layer.
    VectorSurface,
    /// Plain markup node backing a markup layer.
    Markup,
    /// Reusable definitions region inside a vector surface.
    Defs,
    /// Vector content attached to a vector surface.
    Shape,
    /// Markup content attached to a markup layer.
    Element,
}

impl NodeKind {
    /// Whether this node is the backing surface of a layer.
    #[must_use]
    pub const fn is_layer_surface(self) -> bool {
        matches!(self, Self::VectorSurface | Self::Markup)
    }

    /// Whether this node lives in the vector-graphics namespace.
    #[must_use]
    pub const fn is_vector(self) -> bool {
        matches!(self, Self::VectorSurface | Self::Defs | Self::Shape)
    }

    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Group => "group",
            Self::VectorSurface => "vector",
            Self::Markup => "markup",
            Self::Defs => "defs",
            Self::Shape => "shape",
            Self::Element => "element",
        }
    }
}
