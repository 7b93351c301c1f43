// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backend contract for platform integrations.
//!
//! `strata_core` owns the backing [`NodeTree`] and the layer stacks built on
//! top of it. Backend crates mirror that tree into something a platform can
//! draw: the web backend builds `<svg>` surfaces for vector layers and plain
//! `<div>`s for markup layers, spliced into the same container element.
//!
//! Application code mutates groups, drains the tree once per update, and hands
//! the changes to a presenter:
//!
//! ```rust,ignore
//! fn update(scene: &mut Scene, presenter: &mut impl Presenter) {
//!     // Route new content through the layer stack.
//!     scene.root.attach_child(&mut scene.tree, LayerKind::Vector, shape);
//!
//!     // Drain: collect additions, removals and child-order changes.
//!     let changes = scene.tree.take_changes();
//!
//!     // Present: apply incremental changes to the native tree.
//!     presenter.apply(&scene.tree, &changes);
//! }
//! ```

use crate::node::{NodeTree, TreeChanges};

/// Applies drained tree changes to a platform-native presentation tree.
pub trait Presenter {
    /// Applies the given [`TreeChanges`] to the backing presentation tree,
    /// reading current node state from `tree` as needed.
    fn apply(&mut self, tree: &NodeTree, changes: &TreeChanges);
}
