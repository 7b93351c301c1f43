// Copyright 2026 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! DOM element management.
//!
//! Translates [`NodeTree`] state into live DOM by applying incremental updates
//! from [`TreeChanges`]. Each node slot maps to at most one element.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Vec2;
use strata_core::backend::Presenter;
use strata_core::node::{NodeKind, NodeTree, TreeChanges};
use wasm_bindgen::JsCast as _;
use web_sys::{Document, Element, HtmlElement};

/// The SVG namespace URI used for vector surfaces and their content.
pub const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Maps a [`NodeTree`] to live DOM elements, applying incremental updates
/// from [`TreeChanges`].
///
/// The presenter owns a host `HtmlElement`. Parentless group containers are
/// mounted directly under the host; everything else is placed under the
/// element of its parent node. Call [`apply`](Presenter::apply) after each
/// [`NodeTree::take_changes`] to synchronize the DOM with the tree.
pub struct DomPresenter {
    host: HtmlElement,
    elements: Vec<Option<Element>>,
}

impl core::fmt::Debug for DomPresenter {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DomPresenter")
            .field("host", &"HtmlElement")
            .field("elements_len", &self.elements.len())
            .finish()
    }
}

impl DomPresenter {
    /// Creates a new presenter that mounts root groups under `host`.
    #[must_use]
    pub fn new(host: HtmlElement) -> Self {
        Self {
            host,
            elements: Vec::new(),
        }
    }

    /// Returns a reference to the host element.
    #[must_use]
    pub fn host(&self) -> &HtmlElement {
        &self.host
    }

    /// Returns the DOM element for the given slot index, if it exists.
    #[must_use]
    pub fn get_element(&self, idx: u32) -> Option<&Element> {
        self.elements
            .get(idx as usize)
            .and_then(|slot| slot.as_ref())
    }

    fn take_element(&mut self, idx: u32) -> Option<Element> {
        self.elements.get_mut(idx as usize)?.take()
    }

    fn put_element(&mut self, idx: u32, el: Element) {
        let slot = idx as usize;
        if self.elements.len() <= slot {
            self.elements.resize_with(slot + 1, || None);
        }
        self.elements[slot] = Some(el);
    }

    fn create(doc: &Document, kind: NodeKind) -> Option<Element> {
        let (ns, tag) = element_tag(kind);
        let el = match ns {
            Some(ns) => doc.create_element_ns(Some(ns), tag).ok()?,
            None => doc.create_element(tag).ok()?,
        };
        if kind.is_layer_surface() || kind == NodeKind::Group {
            // Layers and containers all share the parent's origin and stack
            // in document order.
            let _ = el.set_attribute("style", SURFACE_STYLE);
        }
        if kind == NodeKind::VectorSurface {
            let _ = el.set_attribute("overflow", "visible");
        }
        Some(el)
    }
}

const SURFACE_STYLE: &str = "position:absolute;left:0;top:0;overflow:visible;";

/// Returns the namespace and tag name used to present `kind`.
fn element_tag(kind: NodeKind) -> (Option<&'static str>, &'static str) {
    match kind {
        NodeKind::Group | NodeKind::Markup | NodeKind::Element => (None, "div"),
        NodeKind::VectorSurface => (Some(SVG_NS), "svg"),
        NodeKind::Defs => (Some(SVG_NS), "defs"),
        NodeKind::Shape => (Some(SVG_NS), "g"),
    }
}

/// Formats a translation for the CSS `transform` property.
fn css_translate(t: Vec2) -> String {
    format!("translate({}px, {}px)", t.x, t.y)
}

/// Formats a translation for the SVG `transform` attribute.
fn svg_translate(t: Vec2) -> String {
    format!("translate({} {})", t.x, t.y)
}

impl Presenter for DomPresenter {
    /// Applies incremental changes from a [`TreeChanges`] to the DOM.
    fn apply(&mut self, tree: &NodeTree, changes: &TreeChanges) {
        // 1. Removals
        for &idx in &changes.removed {
            if let Some(el) = self.take_element(idx) {
                el.remove();
            }
        }

        // 2. Additions
        if !changes.added.is_empty() {
            let Some(doc) = self.host.owner_document() else {
                return;
            };
            for &idx in &changes.added {
                let kind = tree.kind_at(idx);
                let Some(el) = Self::create(&doc, kind) else {
                    continue;
                };
                if kind == NodeKind::Group && tree.parent_at(idx).is_none() {
                    let _ = self.host.append_child(&el);
                }
                self.put_element(idx, el);
            }
        }

        // 3. Detached
        for &idx in &changes.detached {
            if let Some(el) = self.get_element(idx) {
                el.remove();
            }
        }

        // 4. Child order
        for &idx in &changes.reordered {
            let Some(parent) = self.get_element(idx) else {
                continue;
            };
            for child in tree.children_at(idx) {
                if let Some(el) = self.get_element(child.index()) {
                    // DOM re-append moves an existing child, reordering it.
                    let _ = parent.append_child(el);
                }
            }
        }

        // 5. Translations
        for &idx in &changes.translated {
            let Some(el) = self.get_element(idx) else {
                continue;
            };
            let t = tree.translation_at(idx);
            if let Some(html) = el.dyn_ref::<HtmlElement>() {
                let _ = html.style().set_property("transform", &css_translate(t));
            } else {
                let _ = el.set_attribute("transform", &svg_translate(t));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vector_kinds_use_svg_namespace() {
        for kind in [NodeKind::VectorSurface, NodeKind::Defs, NodeKind::Shape] {
            assert_eq!(element_tag(kind).0, Some(SVG_NS), "{kind:?}");
        }
        assert_eq!(element_tag(NodeKind::VectorSurface).1, "svg");
        assert_eq!(element_tag(NodeKind::Defs).1, "defs");
    }

    #[test]
    fn markup_kinds_are_plain_divs() {
        for kind in [NodeKind::Group, NodeKind::Markup, NodeKind::Element] {
            assert_eq!(element_tag(kind), (None, "div"), "{kind:?}");
        }
    }

    #[test]
    fn translations_format_per_namespace() {
        let t = Vec2::new(12.5, -3.0);
        assert_eq!(css_translate(t), "translate(12.5px, -3px)");
        assert_eq!(svg_translate(t), "translate(12.5 -3)");
    }
}
