//! Application state and the mutations behind every UI event.
//!
//! The App owns the document, the interaction mode, and the clipboard
//! writer; the event router in `main` translates raw terminal events into
//! the methods here. Every mutation is synchronous and is followed by a
//! full redraw of both panes on the next frame.

use crate::clipboard::{ClipboardWriter, CopyOutcome};
use crate::document::{Document, ShapeId};
use crate::markup;

/// Control id of the copy button.
pub const COPY_CONTROL: &str = "copy";
/// Control id of the delete button.
pub const DELETE_CONTROL: &str = "delete";

/// Marker prefix of add-shape control ids ("addcircle", "addrect", ...).
const ADD_PREFIX: &str = "add";

/// Extract the shape tag from an add-control id, length-guarded so a short
/// id like "add" or an attribute named "a" can never match.
pub fn add_control_tag(id: &str) -> Option<&str> {
    if id.len() <= ADD_PREFIX.len() {
        return None;
    }
    id.strip_prefix(ADD_PREFIX)
}

/// Interaction mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Normal,
    /// An inspector field has focus; the buffer holds the uncommitted text.
    EditAttribute { name: String, buffer: String },
    /// Blocking modal notice (clipboard outcome). Any key dismisses it.
    Notice { message: String },
}

/// Main application state.
pub struct App {
    pub document: Document,
    pub mode: Mode,
    pub clipboard: ClipboardWriter,
    pub status_message: Option<String>,
    pub running: bool,
}

impl App {
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            mode: Mode::Normal,
            clipboard: ClipboardWriter::new(),
            status_message: None,
            running: true,
        }
    }

    /// Set a status message to display
    pub fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = Some(msg.into());
    }

    /// Clear the status message
    pub fn clear_status(&mut self) {
        self.status_message = None;
    }

    // --- Canvas events ---

    /// A click inside the canvas pane: on an element row it selects that
    /// shape, anywhere else it deselects. A pending field edit is committed
    /// first, like a browser input losing focus.
    pub fn click_canvas(&mut self, hit: Option<ShapeId>) {
        self.commit_edit();
        match hit {
            Some(id) => self.document.select_shape(id),
            None => self.document.clear_selection(),
        }
    }

    // --- Inspector / toolbar events ---

    /// A click on a control, routed by its id string.
    pub fn click_control(&mut self, id: &str) {
        // Clicking the field already being edited keeps the edit alive.
        if let Mode::EditAttribute { name, .. } = &self.mode {
            if name.as_str() == id {
                return;
            }
        }
        self.commit_edit();

        if id == COPY_CONTROL {
            self.copy_markup();
        } else if id == DELETE_CONTROL {
            self.delete_selected_shape();
        } else if let Some(tag) = add_control_tag(id) {
            self.add_shape(tag);
        } else {
            self.start_edit(id);
        }
    }

    /// Add a catalog shape. Unknown tags are logged by the document and
    /// surface only in the status bar.
    pub fn add_shape(&mut self, tag: &str) {
        match self.document.add_shape(tag) {
            Ok(_) => self.set_status(format!("Added {tag}")),
            Err(e) => self.set_status(e.to_string()),
        }
    }

    /// Delete the selected shape, if any.
    pub fn delete_selected_shape(&mut self) {
        // Deleting the shape a field edit targets would strand the edit.
        if matches!(self.mode, Mode::EditAttribute { .. }) {
            self.mode = Mode::Normal;
        }
        if self.document.delete_selected() {
            self.set_status("Shape deleted");
        }
    }

    // --- Attribute editing ---

    /// Focus an attribute field of the selected shape. Ignored when the id
    /// does not name one of its attributes.
    pub fn start_edit(&mut self, name: &str) {
        let Some(shape) = self.document.selected_shape() else {
            return;
        };
        let Some(attr) = shape.attrs.get(name) else {
            return;
        };
        self.mode = Mode::EditAttribute {
            name: name.to_string(),
            buffer: attr.value.clone(),
        };
    }

    pub fn push_edit_char(&mut self, c: char) {
        if let Mode::EditAttribute { buffer, .. } = &mut self.mode {
            buffer.push(c);
        }
    }

    pub fn backspace_edit(&mut self) {
        if let Mode::EditAttribute { buffer, .. } = &mut self.mode {
            buffer.pop();
        }
    }

    /// Commit the focused field into the document (the attribute-change
    /// event). No-op outside edit mode.
    pub fn commit_edit(&mut self) {
        if let Mode::EditAttribute { name, buffer } = std::mem::replace(&mut self.mode, Mode::Normal)
        {
            // Lookup failures log inside the document and leave it unchanged.
            let _ = self.document.set_attribute(&name, buffer);
        }
    }

    /// Abandon the focused field without writing anything back.
    pub fn cancel_edit(&mut self) {
        if matches!(self.mode, Mode::EditAttribute { .. }) {
            self.mode = Mode::Normal;
        }
    }

    // --- Clipboard ---

    /// Serialize the document without decoration and hand it to the
    /// clipboard writer. The outcome arrives later via `poll_clipboard`.
    pub fn copy_markup(&mut self) {
        let text = markup::document(&self.document);
        self.clipboard.copy(text);
        self.set_status("Copying to clipboard...");
    }

    /// Drain one finished copy, if any, into a modal notice.
    pub fn poll_clipboard(&mut self) {
        if let Some(outcome) = self.clipboard.poll() {
            self.show_copy_outcome(outcome);
        }
    }

    pub fn show_copy_outcome(&mut self, outcome: CopyOutcome) {
        let message = match outcome {
            CopyOutcome::Copied(text) => format!("SVG code copied!\n{text}"),
            CopyOutcome::Failed(err) => format!("Copy failed\n{err}"),
        };
        self.mode = Mode::Notice { message };
    }

    pub fn dismiss_notice(&mut self) {
        if matches!(self.mode, Mode::Notice { .. }) {
            self.mode = Mode::Normal;
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_control_ids_are_length_guarded() {
        assert_eq!(add_control_tag("addcircle"), Some("circle"));
        assert_eq!(add_control_tag("addrect"), Some("rect"));
        assert_eq!(add_control_tag("add"), None);
        assert_eq!(add_control_tag("ad"), None);
        assert_eq!(add_control_tag(""), None);
        assert_eq!(add_control_tag("delete"), None);
        assert_eq!(add_control_tag("radd"), None);
    }

    #[test]
    fn clicking_an_add_control_adds_and_selects() {
        let mut app = App::new();
        app.click_control("addrect");
        assert_eq!(app.document.len(), 1);
        assert_eq!(app.document.selected_shape().unwrap().tag, "rect");
    }

    #[test]
    fn clicking_delete_clears_the_document() {
        let mut app = App::new();
        app.click_control("addcircle");
        app.click_control(DELETE_CONTROL);
        assert!(app.document.is_empty());
        assert_eq!(app.document.selected_index(), None);
    }

    #[test]
    fn canvas_click_selects_and_empty_click_deselects() {
        let mut app = App::new();
        app.click_control("addcircle");
        app.click_control("addrect");
        let circle = app.document.shapes()[0].id;

        app.click_canvas(Some(circle));
        assert_eq!(app.document.selected_index(), Some(0));

        app.click_canvas(None);
        assert_eq!(app.document.selected_index(), None);
    }

    #[test]
    fn field_click_starts_an_edit_seeded_with_the_stored_value() {
        let mut app = App::new();
        app.click_control("addcircle");
        app.click_control("cx");
        assert_eq!(
            app.mode,
            Mode::EditAttribute {
                name: "cx".into(),
                buffer: "25".into()
            }
        );
    }

    #[test]
    fn clicking_a_control_id_that_is_no_attribute_changes_nothing() {
        let mut app = App::new();
        app.click_control("addcircle");
        app.click_control("bogus");
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn committing_an_edit_writes_through() {
        let mut app = App::new();
        app.click_control("addcircle");
        app.start_edit("cx");
        app.backspace_edit();
        app.backspace_edit();
        for c in "99".chars() {
            app.push_edit_char(c);
        }
        app.commit_edit();
        assert_eq!(app.mode, Mode::Normal);
        let shape = app.document.selected_shape().unwrap();
        assert_eq!(shape.attrs.get("cx").unwrap().value, "99");
    }

    #[test]
    fn cancelling_an_edit_leaves_the_stored_value() {
        let mut app = App::new();
        app.click_control("addcircle");
        app.start_edit("cx");
        app.push_edit_char('7');
        app.cancel_edit();
        let shape = app.document.selected_shape().unwrap();
        assert_eq!(shape.attrs.get("cx").unwrap().value, "25");
    }

    #[test]
    fn selecting_elsewhere_commits_the_pending_edit_first() {
        let mut app = App::new();
        app.click_control("addcircle");
        app.start_edit("cx");
        app.push_edit_char('0');
        app.click_canvas(None);
        assert_eq!(app.mode, Mode::Normal);
        assert_eq!(
            app.document.shapes()[0].attrs.get("cx").unwrap().value,
            "250"
        );
    }

    #[test]
    fn copy_outcome_becomes_a_blocking_notice() {
        let mut app = App::new();
        app.show_copy_outcome(crate::clipboard::CopyOutcome::Copied("<svg></svg>".into()));
        assert!(matches!(app.mode, Mode::Notice { .. }));
        app.dismiss_notice();
        assert_eq!(app.mode, Mode::Normal);
    }

    #[test]
    fn deleting_while_editing_drops_the_edit() {
        let mut app = App::new();
        app.click_control("addcircle");
        app.start_edit("cx");
        app.delete_selected_shape();
        assert_eq!(app.mode, Mode::Normal);
        assert!(app.document.is_empty());
    }
}
