// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer stacks for scene graphs that interleave vector and markup surfaces.
//!
//! A renderer that draws some content through a retained vector surface
//! (SVG-like) and other content through plain markup (HTML-like) cannot put
//! both in one physical surface. `strata_core` keeps, for every scene-graph
//! group, an ordered stack of single-backend *layers* under one container
//! node, decides when new content can join the top layer and when it needs a
//! fresh one, and keeps the backing tree's sibling order identical to the
//! stack order. It is `no_std` compatible (with `alloc`).
//!
//! # Architecture
//!
//! ```text
//!   scene code ──► Group::compatible_layer(kind) ──► LayerId
//!                      │  reuse top layer, or splice a new one
//!                      ▼
//!                  NodeTree (backing nodes, sibling order = paint order)
//!                      │
//!                      ▼
//!   NodeTree::take_changes() ──► TreeChanges ──► Presenter::apply()
//! ```
//!
//! **[`node`]**: struct-of-arrays backing tree with generational handles.
//! Layer surfaces, defs regions, group containers and content all live here.
//!
//! **[`layer`]**: the [`Layer`](layer::Layer) record, tagged with a
//! [`LayerKind`](layer::LayerKind).
//!
//! **[`group`]**: the layer stack manager. Reuse decisions, directed
//! insertion and removal, resources layers, and iteration by kind.
//!
//! **[`dirty`]**: channels for change draining via `understory_dirty`.
//!
//! **[`backend`]**: the [`Presenter`](backend::Presenter) trait that platform
//! backends implement.
//!
//! **[`trace`]**: [`TraceSink`](trace::TraceSink) trait and event types for
//! layer-stack instrumentation, with the zero-overhead
//! [`Tracer`](trace::Tracer) wrapper.
//!
//! # Example
//!
//! ```
//! use strata_core::group::{Group, GroupId};
//! use strata_core::layer::LayerKind;
//! use strata_core::node::{NodeKind, NodeTree};
//!
//! let mut tree = NodeTree::new();
//! let mut root = Group::new(&mut tree, GroupId(0));
//!
//! let circle = tree.create_node(NodeKind::Shape);
//! let square = tree.create_node(NodeKind::Shape);
//! let a = root.attach_child(&mut tree, LayerKind::Vector, circle);
//! let b = root.attach_child(&mut tree, LayerKind::Vector, square);
//! assert_eq!(a, b);
//!
//! let label = tree.create_node(NodeKind::Element);
//! let c = root.attach_child(&mut tree, LayerKind::Markup, label);
//! assert_ne!(a, c);
//! assert_eq!(root.len(), 2);
//! ```
//!
//! # Crate features
//!
//! - `std` (disabled by default): Enables `std` support in dependencies.
//! - `trace` (disabled by default): Enables `Tracer` method bodies and the
//!   per-group event journal.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod backend;
pub mod dirty;
pub mod group;
pub mod layer;
pub mod node;
pub mod trace;
