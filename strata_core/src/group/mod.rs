// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Groups and their layer stacks.
//!
//! A [`Group`] is a scene-graph node that owns an ordered stack of
//! [`Layer`](crate::layer::Layer)s and a backing container node. Every layer's
//! surface is a direct child of the container, in stack order. Nested group
//! containers may sit between layer surfaces as siblings.
//!
//! # Adjacency
//!
//! Consecutive content of the same backend shares one surface. A request for
//! a layer of some kind reuses the top of the stack only while that surface
//! is still the container's last child: once a nested group has been appended
//! after it, new content must go into a fresh surface above the nested group
//! or it would paint behind it.
//!
//! # Ordering invariant
//!
//! The order of the stack equals the relative sibling order of the layer
//! surfaces under the container. Every mutation goes through one splice that
//! updates the stack and the backing tree together; the stack itself is not
//! exposed mutably.

mod error;
mod id;
mod stack;

pub use error::{InsertError, StackError};
pub use id::GroupId;
pub use stack::Group;
