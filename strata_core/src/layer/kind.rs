// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend kinds.

use crate::node::NodeKind;

/// Which rendering backend a layer draws through.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LayerKind {
    /// Retained vector-graphics surface.
    Vector,
    /// Plain hierarchical-markup surface.
    Markup,
}

impl LayerKind {
    /// Both kinds, in declaration order.
    pub const ALL: [Self; 2] = [Self::Vector, Self::Markup];

    /// Returns the node kind used for this layer's backing surface.
    #[must_use]
    pub const fn surface_kind(self) -> NodeKind {
        match self {
            Self::Vector => NodeKind::VectorSurface,
            Self::Markup => NodeKind::Markup,
        }
    }

    /// Returns the layer kind a backing node of `kind` belongs to, if it is a
    /// layer surface.
    #[must_use]
    pub const fn from_surface(kind: NodeKind) -> Option<Self> {
        match kind {
            NodeKind::VectorSurface => Some(Self::Vector),
            NodeKind::Markup => Some(Self::Markup),
            _ => None,
        }
    }

    /// Returns a short lowercase label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Vector => "vector",
            Self::Markup => "markup",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn surface_kind_round_trips() {
        for kind in LayerKind::ALL {
            assert_eq!(LayerKind::from_surface(kind.surface_kind()), Some(kind));
        }
        assert_eq!(LayerKind::from_surface(NodeKind::Group), None);
        assert_eq!(LayerKind::from_surface(NodeKind::Defs), None);
    }
}
