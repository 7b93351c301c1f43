// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Backing node tree.
//!
//! Every layer and every group is represented by a *backing node* in a
//! [`NodeTree`]. The tree mirrors the platform tree a presenter builds (DOM
//! elements, for the web backend). Each node has:
//!
//! - An identity ([`NodeId`]), a generational handle that becomes stale when
//!   the node is destroyed.
//! - Topology: parent, first-child, last-child, and sibling links forming an
//!   ordered tree. Sibling order is paint order.
//! - A [`NodeKind`] telling presenters which native element to build.
//! - A translation offset, used by groups.
//!
//! Nodes are stored in struct-of-arrays layout with index-based handles.
//!
//! # Change draining
//!
//! Mutations mark dirty channels (see [`dirty`](crate::dirty)) and record
//! lifecycle events. [`NodeTree::take_changes`] drains them into a
//! [`TreeChanges`] that presenters consume.

mod changes;
mod id;
mod traverse;
mod tree;

pub use changes::TreeChanges;
pub use id::{INVALID, NodeId, NodeKind};
pub use traverse::Children;
pub use tree::NodeTree;
