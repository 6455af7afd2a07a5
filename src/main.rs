mod app;
mod catalog;
mod clipboard;
mod document;
mod markup;
mod ui;

use std::fs::File;
use std::io::stdout;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind,
        KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use tracing_subscriber::EnvFilter;

use app::{App, Mode};
use ui::HitMap;

/// Terminal SVG shape editor
#[derive(Parser, Debug)]
#[command(name = "svged")]
#[command(version, about, long_about = None)]
struct Args {
    /// Write logs to this file (RUST_LOG controls the filter)
    #[arg(long, value_name = "PATH")]
    log_file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // The alternate screen owns stdout, so logs go to a file or nowhere.
    if let Some(path) = &args.log_file {
        let file = File::create(path)?;
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .init();
    }

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = run_app(&mut terminal, &mut app);

    // Cleanup terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(e) = result {
        eprintln!("Error: {e:?}");
    }

    Ok(())
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut hits = HitMap::default();

    while app.running {
        terminal.draw(|frame| hits = ui::render(frame, app))?;

        // Finished clipboard writes surface as a modal notice.
        app.poll_clipboard();

        // Poll with a timeout so clipboard outcomes keep flowing even when
        // the user is idle.
        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    match &app.mode {
                        // The notice is modal: any key dismisses it, nothing
                        // else happens.
                        Mode::Notice { .. } => app.dismiss_notice(),
                        Mode::EditAttribute { .. } => handle_edit_key(app, key),
                        Mode::Normal => handle_normal_key(app, key),
                    }
                }
                Event::Mouse(mouse) => handle_mouse(app, &hits, mouse),
                _ => {}
            }
        }
    }

    Ok(())
}

fn handle_normal_key(app: &mut App, key: event::KeyEvent) {
    app.clear_status();
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.running = false;
        }
        KeyCode::Esc => app.document.clear_selection(),
        KeyCode::Delete | KeyCode::Backspace => app.delete_selected_shape(),
        KeyCode::Char('y') => app.copy_markup(),
        _ => {}
    }
}

fn handle_edit_key(app: &mut App, key: event::KeyEvent) {
    match key.code {
        KeyCode::Enter => app.commit_edit(),
        KeyCode::Esc => app.cancel_edit(),
        KeyCode::Backspace => app.backspace_edit(),
        KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.push_edit_char(c);
        }
        _ => {}
    }
}

fn handle_mouse(app: &mut App, hits: &HitMap, mouse: MouseEvent) {
    if !matches!(mouse.kind, MouseEventKind::Down(MouseButton::Left)) {
        return;
    }
    // Clicks behind the modal notice are swallowed with it.
    if matches!(app.mode, Mode::Notice { .. }) {
        app.dismiss_notice();
        return;
    }
    app.clear_status();

    if let Some(control) = hits.control_at(mouse.column, mouse.row) {
        let control = control.to_string();
        app.click_control(&control);
    } else if let Some(hit) = hits.canvas_hit(mouse.column, mouse.row) {
        app.click_canvas(hit);
    }
}
