// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chrome Trace Event Format exporter.
//!
//! [`export`] reads recorded bytes from a [`RecorderSink`](super::recorder::RecorderSink)
//! and writes [Chrome Trace Event Format][format] JSON to the given writer.
//!
//! Layer stacks have no clock, so each event's `ts` is its position in the
//! recording. Each group becomes its own process row (`pid`); tree drains go
//! to their own row, [`TREE_PID`], under the `Tree` category.
//!
//! [format]: https://docs.google.com/document/d/1CvAClvFfyA5R-PhYUmn5OOQtYMH4h6I0nSsKchNAySU

use std::io::{self, Write};

use serde_json::{Value, json};

use crate::recorder::{RecordedEvent, RecordedLayer, decode};

/// Process row for tree-drain events. Group rows use the group id.
pub const TREE_PID: u32 = u32::MAX;

/// Exports recorded events as Chrome Trace Event Format JSON.
///
/// The output is a complete JSON array of trace event objects, suitable for
/// loading into `chrome://tracing` or [Perfetto](https://ui.perfetto.dev/).
pub fn export(bytes: &[u8], writer: &mut dyn Write) -> io::Result<()> {
    let mut events: Vec<Value> = Vec::new();

    for (ts, recorded) in decode(bytes).enumerate() {
        match recorded {
            RecordedEvent::LayerCreated {
                group,
                layer,
                kind,
                resources,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "LayerCreated",
                    "cat": "Stack",
                    "ts": ts,
                    "pid": group,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "layer": layer_label(layer),
                        "kind": kind.as_str(),
                        "resources": resources,
                    }
                }));
            }
            RecordedEvent::LayerReused { group, layer, kind } => {
                events.push(json!({
                    "ph": "i",
                    "name": "LayerReused",
                    "cat": "Stack",
                    "ts": ts,
                    "pid": group,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "layer": layer_label(layer),
                        "kind": kind.as_str(),
                    }
                }));
            }
            RecordedEvent::LayerInserted {
                group,
                layer,
                kind,
                index,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "LayerInserted",
                    "cat": "Stack",
                    "ts": ts,
                    "pid": group,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "layer": layer_label(layer),
                        "kind": kind.as_str(),
                        "index": index,
                    }
                }));
            }
            RecordedEvent::LayerRemoved {
                group,
                layer,
                kind,
                index,
            } => {
                events.push(json!({
                    "ph": "i",
                    "name": "LayerRemoved",
                    "cat": "Stack",
                    "ts": ts,
                    "pid": group,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "layer": layer_label(layer),
                        "kind": kind.as_str(),
                        "index": index,
                    }
                }));
            }
            RecordedEvent::TreeChanges(e) => {
                events.push(json!({
                    "ph": "i",
                    "name": "TreeChanges",
                    "cat": "Tree",
                    "ts": ts,
                    "pid": TREE_PID,
                    "tid": 0,
                    "s": "g",
                    "args": {
                        "added": e.added,
                        "removed": e.removed,
                        "detached": e.detached,
                        "reordered": e.reordered,
                        "translated": e.translated,
                    }
                }));
            }
        }
    }

    serde_json::to_writer_pretty(writer, &events)?;
    Ok(())
}

fn layer_label(layer: RecordedLayer) -> String {
    format!("{}@{}", layer.index, layer.generation)
}

#[cfg(test)]
mod tests {
    use strata_core::group::{Group, GroupId};
    use strata_core::node::NodeTree;
    use strata_core::trace::{TraceSink, Tracer, TreeChangesEvent};

    use super::*;
    use crate::recorder::RecorderSink;

    #[test]
    fn export_produces_valid_json() {
        let mut tree = NodeTree::new();
        let mut group = Group::new(&mut tree, GroupId(3));
        let _ = group.resources_layer(&mut tree);
        let _ = group.markup_layer(&mut tree);

        let mut rec = RecorderSink::new();
        group.flush_trace(&mut Tracer::new(&mut rec));
        rec.on_tree_changes(&TreeChangesEvent::from(&tree.take_changes()));

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();

        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed.len(), 5);
        assert_eq!(parsed[0]["name"], "LayerCreated");
        assert_eq!(parsed[0]["pid"], 3);
        assert_eq!(parsed[0]["args"]["resources"], true);
        assert_eq!(parsed[3]["args"]["kind"], "markup");
        assert_eq!(parsed[3]["args"]["index"], 1);
        assert_eq!(parsed[4]["cat"], "Tree");
        assert_eq!(parsed[4]["ts"], 4);
    }

    #[test]
    fn tree_drains_do_not_share_the_root_group_row() {
        let mut tree = NodeTree::new();
        let mut root = Group::new(&mut tree, GroupId(0));
        let _ = root.markup_layer(&mut tree);

        let mut rec = RecorderSink::new();
        root.flush_trace(&mut Tracer::new(&mut rec));
        rec.on_tree_changes(&TreeChangesEvent::from(&tree.take_changes()));

        let mut out = Vec::new();
        export(rec.as_bytes(), &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed[0]["pid"], 0);
        assert_eq!(parsed[2]["cat"], "Tree");
        assert_eq!(parsed[2]["pid"], TREE_PID);
    }

    #[test]
    fn export_empty_recording() {
        let mut out = Vec::new();
        export(&[], &mut out).unwrap();
        let parsed: Vec<Value> = serde_json::from_slice(&out).unwrap();
        assert!(parsed.is_empty());
    }
}
