//! Status widget - delivery mode, jobs, last visible and last logged line

use crate::app::AppState;
use crate::ui::theme::*;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

pub struct StatusWidget<'a> {
    state: &'a AppState,
}

impl<'a> StatusWidget<'a> {
    pub fn new(state: &'a AppState) -> Self {
        Self { state }
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (jobs_symbol, jobs_color, jobs_text) = if self.state.jobs_running {
            (SYMBOL_RUNNING, COLOR_RUNNING, "Running".to_string())
        } else if let Some(summary) = &self.state.summary {
            (
                SYMBOL_STOPPED,
                COLOR_STOPPED,
                format!(
                    "Done: {} jobs, {} frames in {:.1}s",
                    summary.jobs,
                    summary.frames,
                    summary.elapsed.as_secs_f64()
                ),
            )
        } else {
            (SYMBOL_STOPPED, COLOR_STOPPED, "Idle".to_string())
        };

        let delivery_info = format!("{} ({} queued)", self.state.mode, self.state.pending);

        let lines = vec![
            Line::from(vec![
                Span::styled("  Jobs       ", Style::default().fg(COLOR_LABEL)),
                Span::styled(format!("{} ", jobs_symbol), Style::default().fg(jobs_color)),
                Span::styled(jobs_text, Style::default().fg(COLOR_VALUE)),
            ]),
            Line::from(vec![
                Span::styled("  Delivery   ", Style::default().fg(COLOR_LABEL)),
                Span::styled(delivery_info, Style::default().fg(COLOR_VALUE)),
            ]),
            Line::from(vec![
                Span::styled("  Last UI    ", Style::default().fg(COLOR_LABEL)),
                Span::styled(self.state.last_ui_line.clone(), Style::default().fg(COLOR_VALUE)),
            ]),
            Line::from(vec![
                Span::styled("  Last log   ", Style::default().fg(COLOR_LABEL)),
                Span::styled(self.state.last_log_line.clone(), Style::default().fg(COLOR_VALUE)),
            ]),
        ];

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(COLOR_BORDER))
            .title(Span::styled(
                " FRAMELOG ",
                Style::default()
                    .fg(COLOR_TITLE)
                    .add_modifier(Modifier::BOLD),
            ));

        let paragraph = Paragraph::new(lines).block(block);
        paragraph.render(area, buf);
    }
}
