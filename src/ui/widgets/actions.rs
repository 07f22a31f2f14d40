//! Actions widget - displays keyboard shortcuts bar
//!
//! Shows available commands based on current state.

use crate::app::AppState;
use crate::ui::theme::{style_bold, COLOR_BRIGHT, STYLE_ACTION, STYLE_DIM, STYLE_KEY};
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct ActionsWidget<'a> {
    state: &'a AppState,
}

impl<'a> ActionsWidget<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for ActionsWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let mut spans = vec![Span::raw("  "), Span::styled("R", STYLE_KEY)];

        if self.state.jobs_running {
            spans.push(Span::styled(" Restart:–  ", STYLE_DIM));
        } else {
            spans.push(Span::styled(" Restart  ", STYLE_ACTION));
        }

        spans.extend(vec![
            Span::styled("C", STYLE_KEY),
            Span::styled(" Clear  ", STYLE_ACTION),
            Span::styled("⌫", STYLE_KEY),
            Span::styled(" Drop line  ", STYLE_ACTION),
            Span::styled("↑↓", STYLE_KEY),
            Span::styled(" Scroll  ", STYLE_ACTION),
            Span::styled("Q", STYLE_KEY),
            Span::styled(" Quit", STYLE_ACTION),
        ]);

        if let Some(message) = &self.state.status_message {
            spans.push(Span::raw("   "));
            spans.push(Span::styled(message.clone(), style_bold(COLOR_BRIGHT)));
        }

        let block = Block::default().borders(Borders::ALL).border_style(STYLE_DIM);
        Paragraph::new(Line::from(spans))
            .block(block)
            .render(area, buf);
    }
}
