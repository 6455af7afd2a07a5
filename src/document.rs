//! Document state - THE source of truth for all shape data.
//!
//! Every edit goes through this document: adding a catalog shape, selecting,
//! deleting the selection, and overwriting attribute values. Failed lookups
//! log a diagnostic and leave the document untouched.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::catalog::{self, AttrMap};

/// Shape identifier - UUID v7, so each id carries a timestamp component on
/// top of randomness. Uniqueness is probabilistic, which is plenty for a
/// single-session document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ShapeId(pub Uuid);

impl ShapeId {
    pub fn new() -> Self {
        Self(Uuid::now_v7())
    }
}

impl Default for ShapeId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live, independently editable copy of a catalog template.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShapeInstance {
    pub tag: String,
    pub id: ShapeId,
    pub attrs: AttrMap,
}

impl ShapeInstance {
    /// Deep-copy a template and assign a fresh id.
    fn from_template(template: &catalog::ShapeTemplate) -> Self {
        Self {
            tag: template.tag.to_string(),
            id: ShapeId::new(),
            attrs: template.attrs.clone(),
        }
    }
}

/// Failure modes of document operations. All of them leave the document
/// unchanged; callers log and carry on.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum DocumentError {
    #[error("no shape template with tag {0:?}")]
    UnknownTag(String),
    #[error("no shape selected")]
    NoSelection,
    #[error("selected shape has no attribute {0:?}")]
    UnknownAttribute(String),
}

/// The editable document: shapes in paint order plus a single selection.
///
/// Invariant: `selected`, when `Some`, indexes a live shape. Every mutation
/// that removes the selected shape resets the selection to `None`.
#[derive(Debug, Default)]
pub struct Document {
    shapes: Vec<ShapeInstance>,
    selected: Option<usize>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shapes in paint order (later entries paint on top).
    pub fn shapes(&self) -> &[ShapeInstance] {
        &self.shapes
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_shape(&self) -> Option<&ShapeInstance> {
        self.selected.map(|i| &self.shapes[i])
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    /// Add a deep copy of the catalog template for `tag` and select it.
    pub fn add_shape(&mut self, tag: &str) -> Result<ShapeId, DocumentError> {
        let Some(template) = catalog::template(tag) else {
            warn!(tag, "add ignored: no shape template with that tag");
            return Err(DocumentError::UnknownTag(tag.to_string()));
        };

        let shape = ShapeInstance::from_template(template);
        let id = shape.id;
        self.shapes.push(shape);
        self.selected = Some(self.shapes.len() - 1);
        debug!(%id, tag, "shape added");
        Ok(id)
    }

    /// Select the shape with `id`, or clear the selection if no live shape
    /// carries it (a click on empty canvas resolves here too).
    pub fn select_shape(&mut self, id: ShapeId) {
        self.selected = self.shapes.iter().position(|s| s.id == id);
        if self.selected.is_none() {
            debug!(%id, "select: id not found, selection cleared");
        }
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    /// Delete every shape carrying the selected id (exactly one in practice)
    /// and clear the selection. Returns false when nothing was selected.
    pub fn delete_selected(&mut self) -> bool {
        let Some(index) = self.selected else {
            debug!("delete ignored: no selection");
            return false;
        };
        let id = self.shapes[index].id;
        self.shapes.retain(|s| s.id != id);
        self.selected = None;
        debug!(%id, "shape deleted");
        true
    }

    /// Overwrite an attribute on the selected shape with raw user text.
    /// The attribute must already exist; the kind tag is left unchanged.
    pub fn set_attribute(
        &mut self,
        name: &str,
        raw: impl Into<String>,
    ) -> Result<(), DocumentError> {
        let Some(index) = self.selected else {
            warn!(attribute = name, "edit ignored: no shape selected");
            return Err(DocumentError::NoSelection);
        };
        let shape = &mut self.shapes[index];
        if !shape.attrs.set(name, raw) {
            warn!(
                attribute = name,
                tag = %shape.tag,
                "edit ignored: shape has no such attribute"
            );
            return Err(DocumentError::UnknownAttribute(name.to_string()));
        }
        Ok(())
    }
}
