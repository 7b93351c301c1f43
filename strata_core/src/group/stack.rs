// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The layer stack manager.

use alloc::vec::Vec;

use kurbo::Vec2;

use super::error::{InsertError, StackError};
use super::id::GroupId;
use crate::layer::{Layer, LayerId, LayerKind};
use crate::node::{NodeId, NodeKind, NodeTree};
#[cfg(feature = "trace")]
use crate::trace::{LayerCreatedEvent, LayerInsertedEvent, LayerRemovedEvent, LayerReusedEvent};
use crate::trace::{StackEvent, Tracer};

/// A scene-graph group with its ordered stack of layers.
///
/// All operations take the [`NodeTree`] holding the group's container
/// explicitly. Every layer in the stack has its surface attached directly to
/// [`container`](Self::container).
#[derive(Debug)]
pub struct Group {
    id: GroupId,
    container: NodeId,
    layers: Vec<Layer>,
    #[cfg(feature = "trace")]
    journal: Vec<StackEvent>,
}

impl Group {
    /// Creates an empty group and its (detached) container node.
    pub fn new(tree: &mut NodeTree, id: GroupId) -> Self {
        Self {
            id,
            container: tree.create_node(NodeKind::Group),
            layers: Vec::new(),
            #[cfg(feature = "trace")]
            journal: Vec::new(),
        }
    }

    /// Returns the group identifier.
    #[must_use]
    pub const fn id(&self) -> GroupId {
        self.id
    }

    /// Returns the backing container node.
    #[must_use]
    pub const fn container(&self) -> NodeId {
        self.container
    }

    /// Returns the group's translation offset.
    ///
    /// The offset is stored on the container node for presenters; the layer
    /// stack does not interpret it.
    #[must_use]
    pub fn translation(&self, tree: &NodeTree) -> Vec2 {
        tree.translation(self.container)
    }

    /// Sets the group's translation offset.
    pub fn set_translation(&self, tree: &mut NodeTree, translation: Vec2) {
        tree.set_translation(self.container, translation);
    }

    // -- Queries --

    /// Returns the layers in stack order (bottom first).
    #[must_use]
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Returns the number of layers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns `true` if the stack has no layers.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Returns the layer with the given identity, if it is in the stack.
    #[must_use]
    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.iter().find(|l| l.id() == id)
    }

    /// Returns the stack position of a layer, if it is in the stack.
    #[must_use]
    pub fn index_of(&self, id: LayerId) -> Option<usize> {
        self.layers.iter().position(|l| l.id() == id)
    }

    /// Returns the topmost layer.
    #[must_use]
    pub fn top_layer(&self) -> Option<&Layer> {
        self.layers.last()
    }

    /// Calls `f` once for every layer of `kind`, in stack order.
    pub fn for_each_layer_of_kind(&self, kind: LayerKind, mut f: impl FnMut(&Layer)) {
        for layer in self.layers_of_kind(kind) {
            f(layer);
        }
    }

    /// Returns an iterator over the layers of `kind`, in stack order.
    pub fn layers_of_kind(&self, kind: LayerKind) -> impl Iterator<Item = &Layer> + '_ {
        self.layers.iter().filter(move |l| l.kind == kind)
    }

    // -- Layer acquisition --

    /// Returns a layer of `kind` that the next child can be appended to.
    ///
    /// The top layer is reused when it has the requested kind, is not a
    /// resources layer, and its surface is still the container's last child.
    /// Otherwise a new layer is appended and returned.
    pub fn compatible_layer(&mut self, tree: &mut NodeTree, kind: LayerKind) -> LayerId {
        if let Some(top) = self.layers.last()
            && top.kind == kind
            && !top.is_resources()
            && tree.last_child(self.container) == Some(top.node)
        {
            let layer = top.id();
            #[cfg(feature = "trace")]
            self.journal.push(StackEvent::Reused(LayerReusedEvent {
                group: self.id,
                layer,
                kind,
            }));
            return layer;
        }
        self.add_layer(tree, kind)
    }

    /// Shorthand for [`compatible_layer`](Self::compatible_layer) with
    /// [`LayerKind::Vector`].
    pub fn vector_layer(&mut self, tree: &mut NodeTree) -> LayerId {
        self.compatible_layer(tree, LayerKind::Vector)
    }

    /// Shorthand for [`compatible_layer`](Self::compatible_layer) with
    /// [`LayerKind::Markup`].
    pub fn markup_layer(&mut self, tree: &mut NodeTree) -> LayerId {
        self.compatible_layer(tree, LayerKind::Markup)
    }

    /// Appends a new vector layer hosting a resources (defs) section.
    ///
    /// Never reuses an existing layer, so later content can never land in the
    /// same surface as the definitions.
    pub fn resources_layer(&mut self, tree: &mut NodeTree) -> LayerId {
        let mut layer = self.new_layer(tree, LayerKind::Vector, true);
        let defs = tree.create_node(NodeKind::Defs);
        tree.append_child(layer.node, defs);
        layer.resources = Some(defs);
        let end = self.layers.len();
        self.splice(tree, layer, end, None)
    }

    /// Routes a content node into the layer stack.
    ///
    /// Appends `child` to the surface of
    /// [`compatible_layer(kind)`](Self::compatible_layer) and returns that
    /// layer.
    ///
    /// # Panics
    ///
    /// Panics if `child` already has a parent.
    pub fn attach_child(&mut self, tree: &mut NodeTree, kind: LayerKind, child: NodeId) -> LayerId {
        let layer = self.compatible_layer(tree, kind);
        tree.append_child(layer.node(), child);
        layer
    }

    /// Appends a nested group's container as the last child of this group's
    /// container.
    ///
    /// The stack is left untouched, so the next
    /// [`compatible_layer`](Self::compatible_layer) call starts a new surface
    /// above the nested group.
    ///
    /// # Panics
    ///
    /// Panics if `nested` is this group, its container already has a parent,
    /// or it already contains this group.
    pub fn append_group(&self, tree: &mut NodeTree, nested: &Self) {
        assert!(
            nested.container != self.container,
            "group cannot contain itself"
        );
        tree.append_child(self.container, nested.container);
    }

    // -- Creation --

    /// Creates a detached layer of `kind` owned by this group.
    ///
    /// Neither the stack nor the container is touched; attach the layer with
    /// [`insert_layer_before`](Self::insert_layer_before) or
    /// [`insert_layer_after`](Self::insert_layer_after).
    pub fn create_layer(&mut self, tree: &mut NodeTree, kind: LayerKind) -> Layer {
        self.new_layer(tree, kind, false)
    }

    /// Appends a new layer of `kind` unconditionally.
    pub fn add_layer(&mut self, tree: &mut NodeTree, kind: LayerKind) -> LayerId {
        let layer = self.new_layer(tree, kind, false);
        let end = self.layers.len();
        self.splice(tree, layer, end, None)
    }

    /// Inserts a new layer of `kind` immediately below `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::NotInStack`] if `reference` is not in this stack.
    /// Nothing is created in that case.
    pub fn add_layer_before(
        &mut self,
        tree: &mut NodeTree,
        kind: LayerKind,
        reference: LayerId,
    ) -> Result<LayerId, StackError> {
        let index = self
            .index_of(reference)
            .ok_or(StackError::NotInStack(reference))?;
        let layer = self.new_layer(tree, kind, false);
        Ok(self.splice(tree, layer, index, Some(reference.node())))
    }

    /// Inserts a new layer of `kind` immediately above `reference`.
    ///
    /// # Errors
    ///
    /// Returns [`StackError::NotInStack`] if `reference` is not in this stack.
    /// Nothing is created in that case.
    pub fn add_layer_after(
        &mut self,
        tree: &mut NodeTree,
        kind: LayerKind,
        reference: LayerId,
    ) -> Result<LayerId, StackError> {
        let index = self
            .index_of(reference)
            .ok_or(StackError::NotInStack(reference))?;
        let layer = self.new_layer(tree, kind, false);
        let next = self.layers.get(index + 1).map(Layer::node);
        Ok(self.splice(tree, layer, index + 1, next))
    }

    // -- Directed insertion and removal --

    /// Inserts `layer` immediately below `reference`, or on top of the stack
    /// when `reference` is `None`.
    ///
    /// The layer's surface is placed immediately before the reference's
    /// surface among the container's children, or appended as the last child.
    ///
    /// # Errors
    ///
    /// Returns an [`InsertError`] carrying `layer` back if `reference` is not
    /// in this stack.
    pub fn insert_layer_before(
        &mut self,
        tree: &mut NodeTree,
        layer: Layer,
        reference: Option<LayerId>,
    ) -> Result<LayerId, InsertError> {
        match reference {
            None => {
                let end = self.layers.len();
                Ok(self.splice(tree, layer, end, None))
            }
            Some(reference) => match self.index_of(reference) {
                Some(index) => Ok(self.splice(tree, layer, index, Some(reference.node()))),
                None => Err(InsertError {
                    layer,
                    error: StackError::NotInStack(reference),
                }),
            },
        }
    }

    /// Inserts `layer` immediately above `reference`.
    ///
    /// Equivalent to inserting before the layer following `reference`, or
    /// appending when `reference` is the top layer.
    ///
    /// # Errors
    ///
    /// Returns an [`InsertError`] carrying `layer` back if `reference` is not
    /// in this stack.
    pub fn insert_layer_after(
        &mut self,
        tree: &mut NodeTree,
        layer: Layer,
        reference: LayerId,
    ) -> Result<LayerId, InsertError> {
        let Some(index) = self.index_of(reference) else {
            return Err(InsertError {
                layer,
                error: StackError::NotInStack(reference),
            });
        };
        let next = self.layers.get(index + 1).map(Layer::id);
        self.insert_layer_before(tree, layer, next)
    }

    /// Removes a layer from the stack and detaches its surface.
    ///
    /// Returns the layer, still alive and detached, so it can be inserted into
    /// another group or [destroyed](Layer::destroy). Returns `None` if the
    /// layer is not in this stack.
    pub fn remove_layer(&mut self, tree: &mut NodeTree, id: LayerId) -> Option<Layer> {
        let index = self.index_of(id)?;
        let layer = self.layers.remove(index);
        tree.remove_from_parent(layer.node);
        #[cfg(feature = "trace")]
        self.journal.push(StackEvent::Removed(LayerRemovedEvent {
            group: self.id,
            layer: id,
            kind: layer.kind,
            index,
        }));
        Some(layer)
    }

    /// Destroys every layer, then the container.
    ///
    /// Nested group containers are detached first so the groups that own them
    /// stay intact.
    pub fn destroy(mut self, tree: &mut NodeTree) {
        for layer in self.layers.drain(..) {
            layer.destroy(tree);
        }
        while let Some(child) = tree.first_child(self.container) {
            tree.remove_from_parent(child);
        }
        tree.destroy_node(self.container);
    }

    // -- Tracing --

    /// Forwards journaled events to `tracer` and clears the journal.
    ///
    /// Without the `trace` feature nothing is journaled and this is a no-op.
    pub fn flush_trace(&mut self, tracer: &mut Tracer<'_>) {
        #[cfg(feature = "trace")]
        for e in self.journal.drain(..) {
            tracer.stack_event(&e);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = tracer;
        }
    }

    /// Takes the journaled events without dispatching them.
    #[must_use]
    pub fn take_trace(&mut self) -> Vec<StackEvent> {
        #[cfg(feature = "trace")]
        {
            core::mem::take(&mut self.journal)
        }
        #[cfg(not(feature = "trace"))]
        {
            Vec::new()
        }
    }

    // -- Internal helpers --

    fn new_layer(&mut self, tree: &mut NodeTree, kind: LayerKind, resources: bool) -> Layer {
        let node = tree.create_node(kind.surface_kind());
        #[cfg(feature = "trace")]
        self.journal.push(StackEvent::Created(LayerCreatedEvent {
            group: self.id,
            layer: LayerId(node),
            kind,
            resources,
        }));
        #[cfg(not(feature = "trace"))]
        {
            _ = resources;
        }
        Layer {
            kind,
            node,
            resources: None,
            group: self.id,
        }
    }

    /// The only place the stack and the container's children are mutated
    /// together. `before` must be the surface of `self.layers[index]`, or
    /// `None` when `index` is the end of the stack.
    fn splice(
        &mut self,
        tree: &mut NodeTree,
        mut layer: Layer,
        index: usize,
        before: Option<NodeId>,
    ) -> LayerId {
        debug_assert_eq!(
            before,
            self.layers.get(index).map(Layer::node),
            "splice reference must be the surface at the insertion index"
        );
        match before {
            Some(sibling) => tree.insert_before(layer.node, sibling),
            None => tree.append_child(self.container, layer.node),
        }
        layer.group = self.id;
        let id = layer.id();
        #[cfg(feature = "trace")]
        self.journal.push(StackEvent::Inserted(LayerInsertedEvent {
            group: self.id,
            layer: id,
            kind: layer.kind,
            index,
        }));
        self.layers.insert(index, layer);
        id
    }
}
