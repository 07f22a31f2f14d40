//! Input event handling
//!
//! Translates keyboard events into app commands.

use crossterm::event::{KeyCode, KeyEvent};

/// Command to execute on the App
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    Quit,

    // Scrolling
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollToTop,
    ScrollToBottom,

    // Display actions
    ClearDisplay,
    RemoveLastLine,

    // Jobs
    RestartJobs,

    None,
}

/// Translate a key press into an AppCommand
pub fn translate_key(key: KeyEvent) -> AppCommand {
    match key.code {
        // Quit
        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => AppCommand::Quit,

        // Scrolling
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('K') => AppCommand::ScrollUp,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('J') => AppCommand::ScrollDown,
        KeyCode::PageUp => AppCommand::ScrollPageUp,
        KeyCode::PageDown => AppCommand::ScrollPageDown,
        KeyCode::Home => AppCommand::ScrollToTop,
        KeyCode::End => AppCommand::ScrollToBottom,

        // Display
        KeyCode::Char('c') | KeyCode::Char('C') => AppCommand::ClearDisplay,
        KeyCode::Backspace => AppCommand::RemoveLastLine,

        // Jobs
        KeyCode::Char('r') | KeyCode::Char('R') => AppCommand::RestartJobs,

        _ => AppCommand::None,
    }
}
