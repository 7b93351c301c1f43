// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable trace output.
//!
//! [`PrettyPrintSink`] formats each event as a single line and writes it to
//! an [`io::Write`] destination (stderr by default).

use std::io::{self, Write};

use strata_core::layer::LayerId;
use strata_core::trace::{
    LayerCreatedEvent, LayerInsertedEvent, LayerRemovedEvent, LayerReusedEvent, TraceSink,
    TreeChangesEvent,
};

/// A [`TraceSink`] that prints one line per event.
///
/// Defaults to writing to stderr. Use [`with_writer`](Self::with_writer) to
/// direct output elsewhere.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl core::fmt::Debug for PrettyPrintSink {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(io::stderr()),
        }
    }

    /// Creates a sink that writes to stderr.
    ///
    /// Alias for [`stderr`](Self::stderr).
    #[must_use]
    pub fn new() -> Self {
        Self::stderr()
    }
}

impl Default for PrettyPrintSink {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given writer.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns the writer.
    #[must_use]
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn layer(id: LayerId) -> String {
    format!("{}@{}", id.node().index(), id.node().generation())
}

impl<W: Write> TraceSink for PrettyPrintSink<W> {
    fn on_layer_created(&mut self, e: &LayerCreatedEvent) {
        let _ = writeln!(
            self.writer,
            "[layer:create] group={} layer={} kind={} resources={}",
            e.group.0,
            layer(e.layer),
            e.kind.as_str(),
            e.resources,
        );
    }

    fn on_layer_reused(&mut self, e: &LayerReusedEvent) {
        let _ = writeln!(
            self.writer,
            "[layer:reuse] group={} layer={} kind={}",
            e.group.0,
            layer(e.layer),
            e.kind.as_str(),
        );
    }

    fn on_layer_inserted(&mut self, e: &LayerInsertedEvent) {
        let _ = writeln!(
            self.writer,
            "[layer:insert] group={} layer={} kind={} index={}",
            e.group.0,
            layer(e.layer),
            e.kind.as_str(),
            e.index,
        );
    }

    fn on_layer_removed(&mut self, e: &LayerRemovedEvent) {
        let _ = writeln!(
            self.writer,
            "[layer:remove] group={} layer={} kind={} index={}",
            e.group.0,
            layer(e.layer),
            e.kind.as_str(),
            e.index,
        );
    }

    fn on_tree_changes(&mut self, e: &TreeChangesEvent) {
        let _ = writeln!(
            self.writer,
            "[tree] added={} removed={} detached={} reordered={} translated={}",
            e.added, e.removed, e.detached, e.reordered, e.translated,
        );
    }
}

#[cfg(test)]
mod tests {
    use strata_core::group::{Group, GroupId};
    use strata_core::layer::LayerKind;
    use strata_core::node::NodeTree;
    use strata_core::trace::Tracer;

    use super::*;

    #[test]
    fn writes_one_line_per_event() {
        let mut tree = NodeTree::new();
        let mut group = Group::new(&mut tree, GroupId(1));
        let _ = group.vector_layer(&mut tree);
        let _ = group.vector_layer(&mut tree);

        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        {
            let mut tracer = Tracer::new(&mut sink);
            group.flush_trace(&mut tracer);
            tracer.tree_changes(&TreeChangesEvent::from(&tree.take_changes()));
        }

        let output = String::from_utf8(sink.into_inner()).unwrap();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("[layer:create] group=1 "));
        assert!(lines[0].ends_with("kind=vector resources=false"));
        assert!(lines[1].ends_with("kind=vector index=0"));
        assert!(lines[2].starts_with("[layer:reuse] group=1 "));
        assert!(lines[3].starts_with("[tree] added=2 "));
    }

    #[test]
    fn removal_reports_previous_index() {
        let mut tree = NodeTree::new();
        let mut group = Group::new(&mut tree, GroupId(2));
        let _ = group.add_layer(&mut tree, LayerKind::Markup);
        let top = group.add_layer(&mut tree, LayerKind::Markup);
        let _ = group.take_trace();
        let _ = group.remove_layer(&mut tree, top);

        let mut sink = PrettyPrintSink::with_writer(Vec::new());
        group.flush_trace(&mut Tracer::new(&mut sink));
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.starts_with("[layer:remove] group=2 "));
        assert!(output.trim_end().ends_with("kind=markup index=1"));
    }
}
