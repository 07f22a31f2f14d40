//! UI theme constants - Minimalist dark theme

use ratatui::style::{Color, Modifier, Style};

// Base colors - muted grays
pub const COLOR_DIM: Color = Color::Rgb(80, 80, 80); // Very dim gray for borders, secondary
pub const COLOR_MUTED: Color = Color::Rgb(120, 120, 120); // Muted gray for labels
pub const COLOR_TEXT: Color = Color::Rgb(180, 180, 180); // Normal text
pub const COLOR_BRIGHT: Color = Color::Rgb(220, 220, 220); // Bright text for emphasis

// Accent colors - used sparingly
pub const COLOR_ACCENT: Color = Color::Rgb(100, 180, 220); // Cyan-ish for keys, progress
pub const COLOR_SUCCESS: Color = Color::Rgb(100, 180, 100); // Green for running jobs
pub const COLOR_WARNING: Color = Color::Yellow;

// Semantic aliases
pub const COLOR_BORDER: Color = COLOR_DIM;
pub const COLOR_TITLE: Color = COLOR_BRIGHT;
pub const COLOR_LABEL: Color = COLOR_MUTED;
pub const COLOR_VALUE: Color = COLOR_TEXT;

// Job states
pub const COLOR_RUNNING: Color = COLOR_SUCCESS;
pub const COLOR_STOPPED: Color = COLOR_MUTED;

// Log colors
pub const COLOR_LOG_PROGRESS: Color = COLOR_ACCENT;

// Styles
pub const STYLE_BORDER: Style = Style::new().fg(COLOR_BORDER);
pub const STYLE_LABEL: Style = Style::new().fg(COLOR_LABEL);
pub const STYLE_TEXT: Style = Style::new().fg(COLOR_TEXT);
pub const STYLE_DIM: Style = Style::new().fg(COLOR_DIM);
pub const STYLE_KEY: Style = Style::new().fg(COLOR_ACCENT);
pub const STYLE_ACTION: Style = Style::new().fg(COLOR_MUTED);

/// Bold style in the given color
pub fn style_bold(color: Color) -> Style {
    Style::new().fg(color).add_modifier(Modifier::BOLD)
}

// Status symbols
pub const SYMBOL_RUNNING: &str = "●";
pub const SYMBOL_STOPPED: &str = "○";
