//! Terminal UI: canvas pane, inspector pane, toolbar, status/help bars.
//!
//! Rendering fully replaces both panes every frame and returns a HitMap so
//! the event router can resolve mouse clicks back to shape ids and control
//! ids. Control ids reuse the classic namespaces: `add<tag>`, `delete`,
//! `copy`, and bare attribute names for inspector fields.

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::{App, Mode, COPY_CONTROL, DELETE_CONTROL};
use crate::catalog;
use crate::document::ShapeId;
use crate::markup;

/// Width of the inspector pane.
const INSPECTOR_WIDTH: u16 = 34;

/// Maps screen positions back to identities for the event router: element
/// rows carry their shape's id, controls carry their id string.
#[derive(Debug, Default)]
pub struct HitMap {
    canvas: Rect,
    rows: Vec<(u16, ShapeId)>,
    controls: Vec<(Rect, String)>,
}

impl HitMap {
    fn push_control(&mut self, rect: Rect, id: impl Into<String>) {
        self.controls.push((rect, id.into()));
    }

    fn push_row(&mut self, row: u16, id: ShapeId) {
        self.rows.push((row, id));
    }

    /// The control under a screen position, if any.
    pub fn control_at(&self, column: u16, row: u16) -> Option<&str> {
        self.controls
            .iter()
            .find(|(rect, _)| contains(*rect, column, row))
            .map(|(_, id)| id.as_str())
    }

    /// Canvas resolution: `None` when the position is outside the canvas
    /// pane, `Some(Some(id))` on an element row, `Some(None)` on empty
    /// canvas (a deselect click).
    pub fn canvas_hit(&self, column: u16, row: u16) -> Option<Option<ShapeId>> {
        if !contains(self.canvas, column, row) {
            return None;
        }
        Some(
            self.rows
                .iter()
                .find(|(r, _)| *r == row)
                .map(|(_, id)| *id),
        )
    }
}

fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.x
        && column < rect.x + rect.width
        && row >= rect.y
        && row < rect.y + rect.height
}

/// Render the entire UI and report the frame's hit regions.
pub fn render(frame: &mut Frame, app: &App) -> HitMap {
    let mut hits = HitMap::default();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Toolbar (copy button)
            Constraint::Min(1),    // Canvas + inspector
            Constraint::Length(1), // Status bar
            Constraint::Length(1), // Help bar
        ])
        .split(frame.area());

    render_toolbar(frame, chunks[0], &mut hits);

    let main = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(INSPECTOR_WIDTH)])
        .split(chunks[1]);

    render_canvas(frame, app, main[0], &mut hits);
    render_inspector(frame, app, main[1], &mut hits);
    render_status_bar(frame, app, chunks[2]);
    render_help_bar(frame, app, chunks[3]);

    // Modal notice on top of everything
    if let Mode::Notice { message } = &app.mode {
        render_notice(frame, message, chunks[1]);
    }

    hits
}

/// Render the one-row toolbar holding the copy button.
fn render_toolbar(frame: &mut Frame, area: Rect, hits: &mut HitMap) {
    let label = " [ Copy SVG ] ";
    let button_style = Style::default()
        .fg(Color::Black)
        .bg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let spans = vec![
        Span::styled(label, button_style),
        Span::styled("  svged", Style::default().fg(Color::DarkGray)),
    ];
    frame.render_widget(Paragraph::new(Line::from(spans)), area);

    let width = (label.len() as u16).min(area.width);
    hits.push_control(Rect::new(area.x, area.y, width, 1), COPY_CONTROL);
}

/// Render the canvas pane: the live markup, one element per row, with the
/// selected element decorated and highlighted.
fn render_canvas(frame: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let block = Block::default()
        .title(" Canvas ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);

    let frame_style = Style::default().fg(Color::DarkGray);
    let selected_style = Style::default()
        .fg(Color::Cyan)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = vec![Line::styled("<svg>", frame_style)];
    let selected = app.document.selected_index();

    for (i, shape) in app.document.shapes().iter().enumerate() {
        let is_selected = selected == Some(i);
        // Display-only decoration; stored shapes and the clipboard payload
        // stay undecorated.
        let text = if is_selected {
            markup::shape(&markup::decorate_selected(shape))
        } else {
            markup::shape(shape)
        };
        let style = if is_selected {
            selected_style
        } else {
            Style::default()
        };
        lines.push(Line::styled(format!("  {text}"), style));

        let row = inner.y + 1 + i as u16;
        if row < inner.y + inner.height {
            hits.push_row(row, shape.id);
        }
    }
    lines.push(Line::styled("</svg>", frame_style));

    frame.render_widget(Paragraph::new(lines).block(block), area);
    hits.canvas = area;
}

/// Render the inspector pane: add buttons, delete button, and one field per
/// attribute of the selected shape.
fn render_inspector(frame: &mut Frame, app: &App, area: Rect, hits: &mut HitMap) {
    let block = Block::default()
        .title(" Inspector ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);

    let button_style = Style::default().fg(Color::Yellow);
    let label_style = Style::default().fg(Color::DarkGray);
    let editing_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);

    let mut lines: Vec<Line> = Vec::new();
    let mut row = inner.y;
    let control_row = |hits: &mut HitMap, row: u16, id: String| {
        if row < inner.y + inner.height {
            hits.push_control(Rect::new(inner.x, row, inner.width, 1), id);
        }
    };

    for template in catalog::catalog() {
        lines.push(Line::styled(format!("[+] Add {}", template.tag), button_style));
        control_row(hits, row, format!("add{}", template.tag));
        row += 1;
    }

    lines.push(Line::raw(""));
    row += 1;

    if let Some(shape) = app.document.selected_shape() {
        lines.push(Line::styled(
            format!("[x] Delete {}", shape.tag),
            Style::default().fg(Color::Red),
        ));
        control_row(hits, row, DELETE_CONTROL.to_string());
        row += 1;

        lines.push(Line::raw(""));
        row += 1;

        for (name, attr) in shape.attrs.iter() {
            let value_span = match &app.mode {
                Mode::EditAttribute { name: n, buffer } if n == name => {
                    Span::styled(format!("{buffer}▏"), editing_style)
                }
                _ => Span::raw(attr.value.clone()),
            };
            lines.push(Line::from(vec![
                Span::styled(format!("{name:<14}"), label_style),
                value_span,
            ]));
            control_row(hits, row, name.to_string());
            row += 1;
        }
    } else {
        lines.push(Line::styled("No shape selected", label_style));
    }

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Render the status bar with a mode indicator, document info, and any
/// transient message.
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (mode_name, mode_bg) = match &app.mode {
        Mode::Normal => ("NOR", Color::Blue),
        Mode::EditAttribute { .. } => ("INS", Color::Green),
        Mode::Notice { .. } => ("MSG", Color::Magenta),
    };

    let mode_style = Style::default()
        .fg(Color::Black)
        .bg(mode_bg)
        .add_modifier(Modifier::BOLD);

    let selection = match app.document.selected_shape() {
        Some(shape) => format!(" {} {}", shape.tag, shape.id),
        None => String::new(),
    };

    let status_text = app
        .status_message
        .as_ref()
        .map(|m| format!(" | {m}"))
        .unwrap_or_default();

    let spans = vec![
        Span::styled(format!(" {mode_name} "), mode_style),
        Span::raw(format!(
            " {} shape{}{}{}",
            app.document.len(),
            if app.document.len() == 1 { "" } else { "s" },
            selection,
            status_text
        )),
    ];

    let paragraph = Paragraph::new(Line::from(spans))
        .style(Style::default().bg(Color::DarkGray).fg(Color::White));
    frame.render_widget(paragraph, area);
}

/// Render the help bar
fn render_help_bar(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = match &app.mode {
        Mode::Normal => {
            "click markup to select | click inspector to add/edit | [y] copy [Del] delete [Esc] deselect [q] quit"
        }
        Mode::EditAttribute { .. } => "type value | [Enter] apply [Esc] cancel [Backspace] delete",
        Mode::Notice { .. } => "press any key to dismiss",
    };

    let paragraph = Paragraph::new(help_text).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

/// Render the centered modal notice popup.
fn render_notice(frame: &mut Frame, message: &str, area: Rect) {
    let width = 60.min(area.width.saturating_sub(4)).max(20);
    let text_width = width.saturating_sub(2) as usize;

    // Hard-wrap so the height estimate matches what Paragraph renders.
    let mut lines: Vec<Line> = Vec::new();
    for raw in message.lines() {
        if raw.is_empty() {
            lines.push(Line::raw(""));
            continue;
        }
        let chars: Vec<char> = raw.chars().collect();
        for chunk in chars.chunks(text_width.max(1)) {
            lines.push(Line::raw(chunk.iter().collect::<String>()));
        }
    }

    let height = (lines.len() as u16 + 2).min(area.height.saturating_sub(2)).max(3);
    let x = area.x + (area.width.saturating_sub(width)) / 2;
    let y = area.y + (area.height.saturating_sub(height)) / 2;
    let popup = Rect::new(x, y, width, height);

    // Clear the popup area
    for py in popup.y..popup.y + popup.height {
        for px in popup.x..popup.x + popup.width {
            frame.buffer_mut()[(px, py)].set_char(' ').set_style(Style::default());
        }
    }

    let block = Block::default()
        .title(" Clipboard ")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(Paragraph::new(lines).block(block), popup);
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn draw(app: &App) -> HitMap {
        let backend = TestBackend::new(100, 30);
        let mut terminal = Terminal::new(backend).unwrap();
        let mut hits = HitMap::default();
        terminal.draw(|frame| hits = render(frame, app)).unwrap();
        hits
    }

    #[test]
    fn element_rows_resolve_to_shape_ids() {
        let mut app = App::new();
        app.add_shape("circle");
        app.add_shape("rect");
        let hits = draw(&app);

        let circle = app.document.shapes()[0].id;
        let rect = app.document.shapes()[1].id;

        // Canvas starts below the toolbar; first element row sits under the
        // border and the `<svg>` header row.
        assert_eq!(hits.canvas_hit(5, 3), Some(Some(circle)));
        assert_eq!(hits.canvas_hit(5, 4), Some(Some(rect)));
        // Header row and empty area below the footer deselect.
        assert_eq!(hits.canvas_hit(5, 2), Some(None));
        assert_eq!(hits.canvas_hit(5, 20), Some(None));
    }

    #[test]
    fn toolbar_and_inspector_controls_are_addressable() {
        let mut app = App::new();
        app.add_shape("circle");
        let hits = draw(&app);

        assert_eq!(hits.control_at(2, 0), Some("copy"));

        // Inspector occupies the rightmost 34 columns; its rows start below
        // the border: 7 add buttons, a blank, then delete, blank, fields.
        let x = 100 - INSPECTOR_WIDTH + 2;
        assert_eq!(hits.control_at(x, 2), Some("addcircle"));
        assert_eq!(hits.control_at(x, 8), Some("addrect"));
        assert_eq!(hits.control_at(x, 10), Some("delete"));
        assert_eq!(hits.control_at(x, 12), Some("cx"));
        assert_eq!(hits.control_at(x, 14), Some("r"));
    }

    #[test]
    fn no_attribute_controls_without_a_selection() {
        let app = App::new();
        let hits = draw(&app);
        let ids: Vec<&str> = hits.controls.iter().map(|(_, id)| id.as_str()).collect();
        assert!(ids.contains(&"addpolyline"));
        assert!(!ids.contains(&"delete"));
        assert!(ids.iter().all(|id| *id == "copy" || id.starts_with("add")));
    }

    #[test]
    fn clicks_outside_the_canvas_do_not_resolve() {
        let mut app = App::new();
        app.add_shape("circle");
        let hits = draw(&app);
        assert_eq!(hits.canvas_hit(99, 5), None); // inspector column
        assert_eq!(hits.canvas_hit(5, 0), None); // toolbar row
    }
}
