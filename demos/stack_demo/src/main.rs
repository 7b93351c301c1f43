// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Builds a small scene that alternates vector and markup content, nests a
//! translated group, then reorders and removes layers.
//!
//! Every stack decision is printed through a
//! [`PrettyPrintSink`](strata_debug::pretty::PrettyPrintSink) and recorded with a
//! [`RecorderSink`](strata_debug::recorder::RecorderSink), which is exported
//! as a Chrome trace file at the end.

use std::fs::File;
use std::io::{self, BufWriter};

use kurbo::Vec2;
use strata_core::group::{Group, GroupId};
use strata_core::layer::LayerKind;
use strata_core::node::{NodeKind, NodeTree};
use strata_core::trace::{TraceSink, Tracer, TreeChangesEvent};

use strata_debug::outline::outline;
use strata_debug::pretty::PrettyPrintSink;
use strata_debug::recorder::RecorderSink;

fn flush(
    group: &mut Group,
    pretty: &mut PrettyPrintSink<io::Stdout>,
    recorder: &mut RecorderSink,
) {
    for e in group.take_trace() {
        Tracer::new(&mut *pretty).stack_event(&e);
        Tracer::new(&mut *recorder).stack_event(&e);
    }
}

fn main() -> io::Result<()> {
    let mut pretty = PrettyPrintSink::with_writer(io::stdout());
    let mut recorder = RecorderSink::new();
    let mut tree = NodeTree::new();

    // -- root stack ---------------------------------------------------------
    let mut root = Group::new(&mut tree, GroupId(0));
    let _ = root.resources_layer(&mut tree);
    for kind in [
        LayerKind::Vector,
        LayerKind::Vector,
        LayerKind::Markup,
        LayerKind::Vector,
    ] {
        let node_kind = match kind {
            LayerKind::Vector => NodeKind::Shape,
            LayerKind::Markup => NodeKind::Element,
        };
        let child = tree.create_node(node_kind);
        let _ = root.attach_child(&mut tree, kind, child);
    }

    // -- nested group -------------------------------------------------------
    let mut panel = Group::new(&mut tree, GroupId(1));
    panel.set_translation(&mut tree, Vec2::new(40.0, 24.0));
    let label = tree.create_node(NodeKind::Element);
    let _ = panel.attach_child(&mut tree, LayerKind::Markup, label);
    root.append_group(&mut tree, &panel);

    let overlay = tree.create_node(NodeKind::Shape);
    let _ = root.attach_child(&mut tree, LayerKind::Vector, overlay);

    flush(&mut root, &mut pretty, &mut recorder);
    flush(&mut panel, &mut pretty, &mut recorder);
    let changes = TreeChangesEvent::from(&tree.take_changes());
    pretty.on_tree_changes(&changes);
    recorder.on_tree_changes(&changes);

    println!("\n{}", outline(&tree, root.container()));

    // -- directed insertion and removal -------------------------------------
    let markup = root
        .layers_of_kind(LayerKind::Markup)
        .map(|l| l.id())
        .next();
    if let Some(markup) = markup {
        if let Ok(inserted) = root.add_layer_before(&mut tree, LayerKind::Vector, markup) {
            println!("inserted {inserted:?} below {markup:?}");
        }
        if let Some(layer) = root.remove_layer(&mut tree, markup) {
            layer.destroy(&mut tree);
        }
    }

    flush(&mut root, &mut pretty, &mut recorder);
    let changes = TreeChangesEvent::from(&tree.take_changes());
    pretty.on_tree_changes(&changes);
    recorder.on_tree_changes(&changes);

    println!("\n{}", outline(&tree, root.container()));

    // -- export Chrome trace ------------------------------------------------
    let path = "stack_trace.json";
    let mut writer = BufWriter::new(File::create(path)?);
    strata_debug::chrome::export(recorder.as_bytes(), &mut writer)?;

    println!("Wrote {path} ({} layers in root)", root.len());
    Ok(())
}
