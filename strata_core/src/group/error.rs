// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Layer-stack errors.

use crate::layer::{Layer, LayerId};

/// Failure of a directed layer-stack operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StackError {
    /// The reference layer is not a member of this group's stack.
    #[error("reference layer {0:?} is not in this stack")]
    NotInStack(LayerId),
}

/// A rejected insertion, handing the layer back to the caller.
#[derive(Debug, thiserror::Error)]
#[error("cannot insert layer {:?}: {error}", .layer.id())]
pub struct InsertError {
    /// The layer that was not inserted. It is still detached.
    pub layer: Layer,
    /// Why the insertion was rejected.
    #[source]
    pub error: StackError,
}

impl InsertError {
    /// Returns the layer that was not inserted.
    #[must_use]
    pub fn into_layer(self) -> Layer {
        self.layer
    }
}
