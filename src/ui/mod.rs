//! Terminal UI using ratatui
//!
//! Thin layer responsible only for terminal I/O. All state lives in App;
//! the log pane renders the repainted snapshot of the pipeline's display.

pub mod theme;
pub mod widgets;

use crate::app::App;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use framelog::constants::{FRAME_DURATION_MS, WIDE_THRESHOLD};
use framelog::error::{LogError, Result};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout},
    Frame, Terminal,
};
use std::io;
use widgets::{actions::ActionsWidget, log::LogPane, status::StatusWidget};

/// Map io::Error to LogError::Runtime
fn map_io_err(e: io::Error) -> LogError {
    LogError::Runtime { source: e }
}

/// Run the TUI event loop
pub async fn run(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode().map_err(map_io_err)?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture).map_err(map_io_err)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).map_err(map_io_err)?;

    let result = event_loop(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode().map_err(map_io_err)?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )
    .map_err(map_io_err)?;
    terminal.show_cursor().map_err(map_io_err)?;

    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    loop {
        app.poll();

        terminal.draw(|f| draw(f, app)).map_err(map_io_err)?;

        if event::poll(std::time::Duration::ZERO).map_err(map_io_err)? {
            match event::read().map_err(map_io_err)? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if app.handle_key(key) {
                        break;
                    }
                }
                Event::Mouse(mouse) => match mouse.kind {
                    MouseEventKind::ScrollUp => app.handle_scroll(true),
                    MouseEventKind::ScrollDown => app.handle_scroll(false),
                    _ => {}
                },
                _ => {}
            }
        }

        if app.should_quit() {
            break;
        }

        // Yield to the job tasks between frames
        tokio::time::sleep(std::time::Duration::from_millis(FRAME_DURATION_MS)).await;
    }
    Ok(())
}

fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let is_wide = area.width > WIDE_THRESHOLD;

    // Status: border(2) + 4 rows; narrow terminals drop the last-log row
    let status_height = if is_wide { 6 } else { 5 };

    let chunks = Layout::vertical([
        Constraint::Length(status_height),
        Constraint::Min(5),
        Constraint::Length(3),
    ])
    .split(area);

    let state = app.state();

    frame.render_widget(StatusWidget::new(&state), chunks[0]);

    let text = app.visible_text();
    let log = LogPane::new(&text, app.scroll_position(), app.is_following());
    frame.render_widget(log, chunks[1]);

    frame.render_widget(ActionsWidget::new(&state), chunks[2]);
}
