// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tracing and diagnostics for layer-stack decisions.
//!
//! This module provides a [`TraceSink`] trait with per-event methods. All
//! method bodies default to no-ops, so implementing only the events you care
//! about is fine.
//!
//! [`Tracer`] wraps an optional `&mut dyn TraceSink`. When the `trace` feature
//! is **off**, every `Tracer` method compiles to nothing. When **on**, each
//! method performs a single `Option` branch before dispatching.
//!
//! Groups journal their decisions while the `trace` feature is on and forward
//! them with [`Group::flush_trace`](crate::group::Group::flush_trace).
//!
//! # Crate features
//!
//! - `trace` enables the `Tracer` method bodies and the group journals.

use crate::group::GroupId;
use crate::layer::{LayerId, LayerKind};
use crate::node::TreeChanges;

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted when a group synthesizes a new layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerCreatedEvent {
    /// Owning group.
    pub group: GroupId,
    /// The new layer.
    pub layer: LayerId,
    /// Backend kind of the new layer.
    pub kind: LayerKind,
    /// Whether the layer hosts the resources section.
    pub resources: bool,
}

/// Emitted when a compatible-layer request is satisfied by the top layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerReusedEvent {
    /// Owning group.
    pub group: GroupId,
    /// The reused layer.
    pub layer: LayerId,
    /// Backend kind requested.
    pub kind: LayerKind,
}

/// Emitted when a layer is spliced into a group's stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerInsertedEvent {
    /// Owning group.
    pub group: GroupId,
    /// The inserted layer.
    pub layer: LayerId,
    /// Backend kind of the layer.
    pub kind: LayerKind,
    /// Position in the stack after insertion.
    pub index: usize,
}

/// Emitted when a layer leaves a group's stack.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LayerRemovedEvent {
    /// Group the layer was removed from.
    pub group: GroupId,
    /// The removed layer.
    pub layer: LayerId,
    /// Backend kind of the layer.
    pub kind: LayerKind,
    /// Position the layer occupied before removal.
    pub index: usize,
}

/// Emitted after a tree drain, with per-category counts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TreeChangesEvent {
    /// Nodes created.
    pub added: u32,
    /// Nodes destroyed.
    pub removed: u32,
    /// Nodes left parentless.
    pub detached: u32,
    /// Nodes whose child list changed.
    pub reordered: u32,
    /// Nodes whose translation changed.
    pub translated: u32,
}

impl From<&TreeChanges> for TreeChangesEvent {
    fn from(changes: &TreeChanges) -> Self {
        let count = |v: &[u32]| u32::try_from(v.len()).unwrap_or(u32::MAX);
        Self {
            added: count(&changes.added),
            removed: count(&changes.removed),
            detached: count(&changes.detached),
            reordered: count(&changes.reordered),
            translated: count(&changes.translated),
        }
    }
}

/// Any layer-stack event, as journaled by a group.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StackEvent {
    /// See [`LayerCreatedEvent`].
    Created(LayerCreatedEvent),
    /// See [`LayerReusedEvent`].
    Reused(LayerReusedEvent),
    /// See [`LayerInsertedEvent`].
    Inserted(LayerInsertedEvent),
    /// See [`LayerRemovedEvent`].
    Removed(LayerRemovedEvent),
}

impl StackEvent {
    /// Returns the group the event belongs to.
    #[must_use]
    pub const fn group(&self) -> GroupId {
        match self {
            Self::Created(e) => e.group,
            Self::Reused(e) => e.group,
            Self::Inserted(e) => e.group,
            Self::Removed(e) => e.group,
        }
    }

    /// Returns the layer the event is about.
    #[must_use]
    pub const fn layer(&self) -> LayerId {
        match self {
            Self::Created(e) => e.layer,
            Self::Reused(e) => e.layer,
            Self::Inserted(e) => e.layer,
            Self::Removed(e) => e.layer,
        }
    }
}

// ---------------------------------------------------------------------------
// TraceSink trait
// ---------------------------------------------------------------------------

/// Receives trace events from layer stacks and tree drains.
///
/// All methods have default no-op implementations, so you only need to
/// override the events you care about.
pub trait TraceSink {
    /// Called when a layer is synthesized.
    fn on_layer_created(&mut self, e: &LayerCreatedEvent) {
        _ = e;
    }

    /// Called when the top layer satisfies a compatible-layer request.
    fn on_layer_reused(&mut self, e: &LayerReusedEvent) {
        _ = e;
    }

    /// Called when a layer is spliced into a stack.
    fn on_layer_inserted(&mut self, e: &LayerInsertedEvent) {
        _ = e;
    }

    /// Called when a layer is removed from a stack.
    fn on_layer_removed(&mut self, e: &LayerRemovedEvent) {
        _ = e;
    }

    /// Called after the backing tree is drained.
    fn on_tree_changes(&mut self, e: &TreeChangesEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// NoopSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that discards all events.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopSink;

impl TraceSink for NoopSink {}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Thin wrapper around an optional [`TraceSink`].
///
/// When the `trace` feature is **off**, every method compiles to nothing. When
/// **on**, each method checks the inner `Option` (one branch) before
/// dispatching to the sink.
pub struct Tracer<'a> {
    #[cfg(feature = "trace")]
    sink: Option<&'a mut dyn TraceSink>,
    #[cfg(not(feature = "trace"))]
    _marker: core::marker::PhantomData<&'a mut dyn TraceSink>,
}

impl core::fmt::Debug for Tracer<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

impl<'a> Tracer<'a> {
    /// Creates a tracer that dispatches to the given sink.
    #[inline]
    #[must_use]
    pub fn new(sink: &'a mut dyn TraceSink) -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: Some(sink) }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        #[cfg(feature = "trace")]
        {
            Self { sink: None }
        }
        #[cfg(not(feature = "trace"))]
        {
            Self {
                _marker: core::marker::PhantomData,
            }
        }
    }

    /// Dispatches a journaled [`StackEvent`] to the matching sink method.
    #[inline]
    pub fn stack_event(&mut self, e: &StackEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            match e {
                StackEvent::Created(e) => s.on_layer_created(e),
                StackEvent::Reused(e) => s.on_layer_reused(e),
                StackEvent::Inserted(e) => s.on_layer_inserted(e),
                StackEvent::Removed(e) => s.on_layer_removed(e),
            }
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }

    /// Emits a [`TreeChangesEvent`].
    #[inline]
    pub fn tree_changes(&mut self, e: &TreeChangesEvent) {
        #[cfg(feature = "trace")]
        if let Some(s) = &mut self.sink {
            s.on_tree_changes(e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = e;
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
