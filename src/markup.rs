//! SVG markup serialization.
//!
//! Pure string building: the document serializer is what lands on the
//! clipboard, and the element serializer backs both the document and the
//! per-row canvas display. Decoration for display is a separate stage that
//! copies a shape before touching it, so highlight attributes can never leak
//! into stored state or the clipboard output.
//!
//! Values are interpolated verbatim, no escaping: a quote inside a value
//! corrupts the output. Accepted limitation.

use std::fmt::Write;

use crate::catalog::{AttrMap, AttrValue};
use crate::document::{Document, ShapeId, ShapeInstance};

/// Stroke forced onto the display copy of the selected shape.
pub const HIGHLIGHT_STROKE: &str = "deepskyblue";
pub const HIGHLIGHT_STROKE_WIDTH: &str = "2";

/// Serialize a single element: `<tag id="..." a1="v1" a2="v2"></tag>`.
///
/// Attributes appear in map order; `tag` and `id` are structural, never
/// generic attributes.
pub fn element(tag: &str, id: Option<&ShapeId>, attrs: &AttrMap) -> String {
    let mut out = String::new();
    write!(&mut out, "<{tag}").unwrap();
    if let Some(id) = id {
        write!(&mut out, " id=\"{id}\"").unwrap();
    }
    for (name, AttrValue { value, .. }) in attrs.iter() {
        write!(&mut out, " {name}=\"{value}\"").unwrap();
    }
    write!(&mut out, "></{tag}>").unwrap();
    out
}

/// Serialize one shape instance, id included.
pub fn shape(shape: &ShapeInstance) -> String {
    element(&shape.tag, Some(&shape.id), &shape.attrs)
}

/// Serialize a sequence of shapes as a complete `<svg>` document.
pub fn shapes(shapes: &[ShapeInstance]) -> String {
    let mut out = String::from("<svg>");
    for s in shapes {
        out.push_str(&shape(s));
    }
    out.push_str("</svg>");
    out
}

/// Serialize the whole document, undecorated. This is the clipboard payload.
pub fn document(doc: &Document) -> String {
    shapes(doc.shapes())
}

/// Produce a display-only copy of a shape with the selection highlight
/// injected. The stored instance is never touched.
pub fn decorate_selected(shape: &ShapeInstance) -> ShapeInstance {
    let mut copy = shape.clone();
    copy.attrs
        .insert("stroke", AttrValue::text(HIGHLIGHT_STROKE));
    copy.attrs
        .insert("stroke-width", AttrValue::text(HIGHLIGHT_STROKE_WIDTH));
    copy
}
