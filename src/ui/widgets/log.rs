//! Log pane - renders the repainted display text with a scrollbar
//!
//! Progress lines (`Processing frame ...`) are highlighted.

use crate::ui::theme::{
    COLOR_LOG_PROGRESS, COLOR_WARNING, STYLE_BORDER, STYLE_DIM, STYLE_LABEL, STYLE_TEXT,
};
use framelog::logging::display;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{
        Block, Borders, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState, StatefulWidget,
        Widget,
    },
};

const PROGRESS_PREFIX: &str = "Processing frame";

pub struct LogPane<'a> {
    text: &'a str,
    scroll: usize,
    following: bool,
}

impl<'a> LogPane<'a> {
    pub fn new(text: &'a str, scroll: usize, following: bool) -> Self {
        Self {
            text,
            scroll,
            following,
        }
    }
}

impl Widget for LogPane<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let inner_height = area.height.saturating_sub(2) as usize;
        let inner_width = area.width.saturating_sub(3) as usize; // -2 for borders, -1 for scrollbar

        let all = display::split_lines(self.text);
        let total_lines = all.len();

        let (start, end) = visible_range(total_lines, self.scroll, inner_height);
        let lines: Vec<Line> = all[start..end]
            .iter()
            .map(|line| format_line(line, inner_width))
            .collect();

        let title_right = if self.following {
            Line::from(Span::styled("End Follow ", STYLE_DIM))
        } else {
            Line::from(vec![
                Span::styled("SCROLLED ", Style::new().fg(COLOR_WARNING)),
                Span::styled("End Follow ", STYLE_DIM),
            ])
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(STYLE_BORDER)
            .title(Span::styled(" Log ", STYLE_LABEL))
            .title_bottom(title_right);

        Paragraph::new(lines).block(block).render(area, buf);

        if total_lines > inner_height && area.width > 0 {
            let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
                .begin_symbol(Some("▲"))
                .end_symbol(Some("▼"));

            let mut scrollbar_state = ScrollbarState::new(total_lines).position(self.scroll);

            let scrollbar_area = Rect {
                x: area.x + area.width - 1,
                y: area.y + 1,
                width: 1,
                height: area.height.saturating_sub(2),
            };

            scrollbar.render(scrollbar_area, buf, &mut scrollbar_state);
        }
    }
}

/// Lines `[start, end)` shown when `scroll` is the bottom visible line
fn visible_range(total: usize, scroll: usize, height: usize) -> (usize, usize) {
    let start = scroll.saturating_sub(height.saturating_sub(1)).min(total);
    let end = (start + height).min(total);
    (start, end)
}

fn format_line(line: &str, max_width: usize) -> Line<'static> {
    let style = if line.starts_with(PROGRESS_PREFIX) {
        Style::new().fg(COLOR_LOG_PROGRESS)
    } else {
        STYLE_TEXT
    };
    Line::from(vec![
        Span::raw(" "),
        Span::styled(truncate(line, max_width.saturating_sub(1)), style),
    ])
}

/// Truncate on a char boundary, marking the cut with `...`
fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        s.to_string()
    } else if width > 3 {
        let kept: String = s.chars().take(width - 3).collect();
        format!("{}...", kept)
    } else {
        s.chars().take(width).collect()
    }
}
