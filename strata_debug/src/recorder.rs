// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compact binary event recording and decoding.
//!
//! [`RecorderSink`] implements [`TraceSink`] and encodes events into a
//! `Vec<u8>` as fixed-size little-endian records. [`decode`] reads them back
//! as an iterator of [`RecordedEvent`].
//!
//! Layer and group handles are recorded as raw numbers; a recording outlives
//! the tree it was taken from.

use strata_core::layer::{LayerId, LayerKind};
use strata_core::trace::{
    LayerCreatedEvent, LayerInsertedEvent, LayerRemovedEvent, LayerReusedEvent, TraceSink,
    TreeChangesEvent,
};

// ---------------------------------------------------------------------------
// Event type discriminants
// ---------------------------------------------------------------------------

const TAG_LAYER_CREATED: u8 = 1;
const TAG_LAYER_REUSED: u8 = 2;
const TAG_LAYER_INSERTED: u8 = 3;
const TAG_LAYER_REMOVED: u8 = 4;
const TAG_TREE_CHANGES: u8 = 5;

// ---------------------------------------------------------------------------
// RecorderSink
// ---------------------------------------------------------------------------

/// A [`TraceSink`] that encodes events into a compact binary buffer.
#[derive(Debug, Default)]
pub struct RecorderSink {
    buf: Vec<u8>,
}

impl RecorderSink {
    /// Creates an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a view of the recorded bytes.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consumes the recorder and returns the recorded bytes.
    #[must_use]
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    // -- encoding helpers --------------------------------------------------

    fn write_u8(&mut self, v: u8) {
        self.buf.push(v);
    }

    fn write_u32(&mut self, v: u32) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_u64(&mut self, v: u64) {
        self.buf.extend_from_slice(&v.to_le_bytes());
    }

    fn write_layer(&mut self, id: LayerId) {
        self.write_u32(id.node().index());
        self.write_u32(id.node().generation());
    }

    fn write_kind(&mut self, kind: LayerKind) {
        self.write_u8(match kind {
            LayerKind::Vector => 0,
            LayerKind::Markup => 1,
        });
    }

    fn write_index(&mut self, index: usize) {
        self.write_u64(u64::try_from(index).unwrap_or(u64::MAX));
    }
}

impl TraceSink for RecorderSink {
    fn on_layer_created(&mut self, e: &LayerCreatedEvent) {
        self.write_u8(TAG_LAYER_CREATED);
        self.write_u32(e.group.0);
        self.write_layer(e.layer);
        self.write_kind(e.kind);
        self.write_u8(u8::from(e.resources));
    }

    fn on_layer_reused(&mut self, e: &LayerReusedEvent) {
        self.write_u8(TAG_LAYER_REUSED);
        self.write_u32(e.group.0);
        self.write_layer(e.layer);
        self.write_kind(e.kind);
    }

    fn on_layer_inserted(&mut self, e: &LayerInsertedEvent) {
        self.write_u8(TAG_LAYER_INSERTED);
        self.write_u32(e.group.0);
        self.write_layer(e.layer);
        self.write_kind(e.kind);
        self.write_index(e.index);
    }

    fn on_layer_removed(&mut self, e: &LayerRemovedEvent) {
        self.write_u8(TAG_LAYER_REMOVED);
        self.write_u32(e.group.0);
        self.write_layer(e.layer);
        self.write_kind(e.kind);
        self.write_index(e.index);
    }

    fn on_tree_changes(&mut self, e: &TreeChangesEvent) {
        self.write_u8(TAG_TREE_CHANGES);
        self.write_u32(e.added);
        self.write_u32(e.removed);
        self.write_u32(e.detached);
        self.write_u32(e.reordered);
        self.write_u32(e.translated);
    }
}

// ---------------------------------------------------------------------------
// Decoder
// ---------------------------------------------------------------------------

/// A layer handle as recorded: slot index and generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecordedLayer {
    /// Slot index of the backing node.
    pub index: u32,
    /// Generation of the backing node.
    pub generation: u32,
}

/// A decoded event from a binary recording.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RecordedEvent {
    /// A [`LayerCreatedEvent`].
    LayerCreated {
        /// Owning group.
        group: u32,
        /// The new layer.
        layer: RecordedLayer,
        /// Backend kind.
        kind: LayerKind,
        /// Whether the layer hosts the resources section.
        resources: bool,
    },
    /// A [`LayerReusedEvent`].
    LayerReused {
        /// Owning group.
        group: u32,
        /// The reused layer.
        layer: RecordedLayer,
        /// Backend kind.
        kind: LayerKind,
    },
    /// A [`LayerInsertedEvent`].
    LayerInserted {
        /// Owning group.
        group: u32,
        /// The inserted layer.
        layer: RecordedLayer,
        /// Backend kind.
        kind: LayerKind,
        /// Stack position after insertion.
        index: u64,
    },
    /// A [`LayerRemovedEvent`].
    LayerRemoved {
        /// Group the layer left.
        group: u32,
        /// The removed layer.
        layer: RecordedLayer,
        /// Backend kind.
        kind: LayerKind,
        /// Stack position before removal.
        index: u64,
    },
    /// A [`TreeChangesEvent`].
    TreeChanges(TreeChangesEvent),
}

/// Decodes a byte slice produced by [`RecorderSink`] into an iterator of
/// [`RecordedEvent`].
pub fn decode(bytes: &[u8]) -> DecodeIter<'_> {
    DecodeIter {
        data: bytes,
        pos: 0,
    }
}

/// Iterator over decoded events.
#[derive(Debug)]
pub struct DecodeIter<'a> {
    data: &'a [u8],
    pos: usize,
}

impl DecodeIter<'_> {
    fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    fn read_u8(&mut self) -> Option<u8> {
        if self.remaining() < 1 {
            return None;
        }
        let v = self.data[self.pos];
        self.pos += 1;
        Some(v)
    }

    fn read_u32(&mut self) -> Option<u32> {
        if self.remaining() < 4 {
            return None;
        }
        let v = u32::from_le_bytes(self.data[self.pos..self.pos + 4].try_into().ok()?);
        self.pos += 4;
        Some(v)
    }

    fn read_u64(&mut self) -> Option<u64> {
        if self.remaining() < 8 {
            return None;
        }
        let v = u64::from_le_bytes(self.data[self.pos..self.pos + 8].try_into().ok()?);
        self.pos += 8;
        Some(v)
    }

    fn read_layer(&mut self) -> Option<RecordedLayer> {
        Some(RecordedLayer {
            index: self.read_u32()?,
            generation: self.read_u32()?,
        })
    }

    fn read_kind(&mut self) -> Option<LayerKind> {
        Some(match self.read_u8()? {
            0 => LayerKind::Vector,
            _ => LayerKind::Markup,
        })
    }

    fn decode_layer_created(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LayerCreated {
            group: self.read_u32()?,
            layer: self.read_layer()?,
            kind: self.read_kind()?,
            resources: self.read_u8()? != 0,
        })
    }

    fn decode_layer_reused(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LayerReused {
            group: self.read_u32()?,
            layer: self.read_layer()?,
            kind: self.read_kind()?,
        })
    }

    fn decode_layer_inserted(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LayerInserted {
            group: self.read_u32()?,
            layer: self.read_layer()?,
            kind: self.read_kind()?,
            index: self.read_u64()?,
        })
    }

    fn decode_layer_removed(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::LayerRemoved {
            group: self.read_u32()?,
            layer: self.read_layer()?,
            kind: self.read_kind()?,
            index: self.read_u64()?,
        })
    }

    fn decode_tree_changes(&mut self) -> Option<RecordedEvent> {
        Some(RecordedEvent::TreeChanges(TreeChangesEvent {
            added: self.read_u32()?,
            removed: self.read_u32()?,
            detached: self.read_u32()?,
            reordered: self.read_u32()?,
            translated: self.read_u32()?,
        }))
    }
}

impl Iterator for DecodeIter<'_> {
    type Item = RecordedEvent;

    fn next(&mut self) -> Option<RecordedEvent> {
        let tag = self.read_u8()?;
        match tag {
            TAG_LAYER_CREATED => self.decode_layer_created(),
            TAG_LAYER_REUSED => self.decode_layer_reused(),
            TAG_LAYER_INSERTED => self.decode_layer_inserted(),
            TAG_LAYER_REMOVED => self.decode_layer_removed(),
            TAG_TREE_CHANGES => self.decode_tree_changes(),
            // Unknown tag: stop decoding.
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use strata_core::group::{Group, GroupId};
    use strata_core::node::NodeTree;
    use strata_core::trace::Tracer;

    use super::*;

    #[test]
    fn group_journal_round_trips() {
        let mut tree = NodeTree::new();
        let mut group = Group::new(&mut tree, GroupId(7));
        let resources = group.resources_layer(&mut tree);
        let markup = group.markup_layer(&mut tree);
        let _ = group.markup_layer(&mut tree);
        let _ = group.remove_layer(&mut tree, resources);

        let mut rec = RecorderSink::new();
        group.flush_trace(&mut Tracer::new(&mut rec));

        let events: Vec<_> = decode(rec.as_bytes()).collect();
        assert_eq!(events.len(), 6);
        assert!(matches!(
            events[0],
            RecordedEvent::LayerCreated {
                group: 7,
                kind: LayerKind::Vector,
                resources: true,
                ..
            }
        ));
        assert!(matches!(
            events[1],
            RecordedEvent::LayerInserted { index: 0, .. }
        ));
        assert_eq!(
            events[4],
            RecordedEvent::LayerReused {
                group: 7,
                layer: RecordedLayer {
                    index: markup.node().index(),
                    generation: markup.node().generation(),
                },
                kind: LayerKind::Markup,
            }
        );
        assert!(matches!(
            events[5],
            RecordedEvent::LayerRemoved { index: 0, .. }
        ));
    }

    #[test]
    fn tree_changes_round_trip() {
        let mut rec = RecorderSink::new();
        let evt = TreeChangesEvent {
            added: 4,
            removed: 1,
            detached: 0,
            reordered: 2,
            translated: 1,
        };
        rec.on_tree_changes(&evt);
        let events: Vec<_> = decode(&rec.into_bytes()).collect();
        assert_eq!(events, vec![RecordedEvent::TreeChanges(evt)]);
    }

    #[test]
    fn truncated_recording_stops_cleanly() {
        let mut rec = RecorderSink::new();
        rec.on_tree_changes(&TreeChangesEvent::default());
        let bytes = rec.into_bytes();
        assert_eq!(decode(&bytes[..bytes.len() - 1]).count(), 0);
    }
}
