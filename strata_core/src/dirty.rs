// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dirty-tracking channel constants.
//!
//! Strata uses multi-channel dirty tracking (via [`understory_dirty`]) to
//! record which backing nodes a presenter has to revisit. Both channels are
//! local-only: marking a node never marks its descendants.
//!
//! - [`CHILDREN`] is marked on the *parent* whenever its child list changes
//!   (append, insert-before, remove, destroy of an attached child). A
//!   presenter re-syncs the native child order of every marked node.
//! - [`TRANSLATION`] is marked when a node's translation offset changes.
//!
//! # Consumption
//!
//! Callers never query dirty state directly. Each
//! [`NodeTree::take_changes`](crate::node::NodeTree::take_changes) call drains
//! both channels and surfaces the results as
//! [`TreeChanges`](crate::node::TreeChanges).

use understory_dirty::Channel;

/// A node's child list changed.
pub const CHILDREN: Channel = Channel::new(0);

/// A node's translation offset changed.
pub const TRANSLATION: Channel = Channel::new(1);
