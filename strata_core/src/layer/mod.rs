// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layers.
//!
//! A *layer* is one physical rendering surface of a single backend kind,
//! holding a contiguous run of same-backend children. It wraps exactly one
//! backing node in the [`NodeTree`](crate::node::NodeTree): an
//! [`VectorSurface`](crate::node::NodeKind::VectorSurface) for
//! [`LayerKind::Vector`], or a [`Markup`](crate::node::NodeKind::Markup) node
//! for [`LayerKind::Markup`].
//!
//! A vector layer may host a single resources section (a
//! [`Defs`](crate::node::NodeKind::Defs) child) for reusable definitions.
//! Such a layer is never handed out as a target for ordinary content.
//!
//! Layers are created and owned by a [`Group`](crate::group::Group).

mod entry;
mod kind;

pub use entry::{Layer, LayerId};
pub use kind::LayerKind;
