//! Application state and orchestration
//!
//! Owns the terminal display surface and the demo jobs. The pipeline renders
//! into a shared `TextBuffer`; the UI only ever reads its repainted snapshot.

use crate::input::{self, AppCommand};
use crossterm::event::KeyEvent;
use framelog::config::{Config, DeliveryMode};
use framelog::constants::{PAGE_SCROLL_LINES, STATUS_MESSAGE_TIMEOUT_SECS};
use framelog::jobs::{self, JobsSummary};
use framelog::logging::{display, LogHandle, TextBuffer};
use std::time::Instant;
use tokio::sync::oneshot;

/// Application state snapshot for rendering
#[derive(Debug, Clone)]
pub struct AppState {
    pub mode: DeliveryMode,
    pub last_ui_line: String,
    pub last_log_line: String,
    pub pending: usize,
    pub jobs_running: bool,
    pub summary: Option<JobsSummary>,
    pub status_message: Option<String>,
}

/// Main application
pub struct App {
    config: Config,
    log: LogHandle,
    display: TextBuffer,

    // Jobs
    jobs: Option<oneshot::Receiver<JobsSummary>>,
    summary: Option<JobsSummary>,

    // Scroll (index of the bottom visible line)
    scroll: usize,
    auto_scroll: bool,

    // UI state
    status_message: Option<(String, Instant)>,
    should_quit: bool,
}

impl App {
    /// Create the app and attach its display surface to the pipeline
    pub fn new(config: Config, log: LogHandle) -> Self {
        let display = TextBuffer::new();
        log.attach_display(Box::new(display.clone()));

        Self {
            config,
            log,
            display,
            jobs: None,
            summary: None,
            scroll: 0,
            auto_scroll: true,
            status_message: None,
            should_quit: false,
        }
    }

    /// Spawn the demo jobs on the current tokio runtime
    pub fn start_jobs(&mut self) {
        if self.jobs.is_some() {
            self.set_status("Jobs already running");
            return;
        }

        let (tx, rx) = oneshot::channel();
        let log = self.log.clone();
        let demo = self.config.demo.clone();
        tokio::spawn(async move {
            let summary = jobs::run_jobs(log, &demo).await;
            let _ = tx.send(summary);
        });

        self.jobs = Some(rx);
        self.summary = None;
    }

    /// Collect finished jobs and follow new output
    pub fn poll(&mut self) {
        if let Some(rx) = self.jobs.as_mut() {
            match rx.try_recv() {
                Ok(summary) => {
                    self.summary = Some(summary);
                    self.jobs = None;
                }
                Err(oneshot::error::TryRecvError::Closed) => {
                    self.set_status("Jobs aborted");
                    self.jobs = None;
                }
                Err(oneshot::error::TryRecvError::Empty) => {}
            }
        }

        let line_count = self.line_count();
        if self.auto_scroll {
            self.scroll = line_count.saturating_sub(1);
        } else {
            self.scroll = self.scroll.min(line_count.saturating_sub(1));
        }

        if let Some((_, since)) = &self.status_message {
            if since.elapsed().as_secs() >= STATUS_MESSAGE_TIMEOUT_SECS {
                self.status_message = None;
            }
        }
    }

    // =========================================================================
    // Input
    // =========================================================================

    /// Handle a key press, returns true to quit
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        self.execute(input::translate_key(key));
        self.should_quit
    }

    pub fn handle_scroll(&mut self, up: bool) {
        if up {
            self.scroll_up(1);
        } else {
            self.scroll_down(1);
        }
    }

    fn execute(&mut self, command: AppCommand) {
        match command {
            AppCommand::Quit => self.should_quit = true,
            AppCommand::ScrollUp => self.scroll_up(1),
            AppCommand::ScrollDown => self.scroll_down(1),
            AppCommand::ScrollPageUp => self.scroll_up(PAGE_SCROLL_LINES),
            AppCommand::ScrollPageDown => self.scroll_down(PAGE_SCROLL_LINES),
            AppCommand::ScrollToTop => {
                self.auto_scroll = false;
                self.scroll = 0;
            }
            AppCommand::ScrollToBottom => {
                self.auto_scroll = true;
                self.scroll = self.line_count().saturating_sub(1);
            }
            AppCommand::ClearDisplay => match self.log.clear_display() {
                Ok(()) => self.set_status("Display cleared"),
                Err(e) => self.set_status(e.to_string()),
            },
            AppCommand::RemoveLastLine => match self.log.remove_last_line() {
                Ok(()) => self.set_status("Last line removed"),
                Err(e) => self.set_status(e.to_string()),
            },
            AppCommand::RestartJobs => self.start_jobs(),
            AppCommand::None => {}
        }
    }

    // =========================================================================
    // Scroll
    // =========================================================================

    fn scroll_up(&mut self, lines: usize) {
        self.auto_scroll = false;
        self.scroll = self.scroll.saturating_sub(lines);
    }

    fn scroll_down(&mut self, lines: usize) {
        let last = self.line_count().saturating_sub(1);
        self.scroll = (self.scroll + lines).min(last);
        if self.scroll == last {
            self.auto_scroll = true;
        }
    }

    fn line_count(&self) -> usize {
        display::split_lines(&self.display.visible()).len()
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn scroll_position(&self) -> usize {
        self.scroll
    }

    pub fn is_following(&self) -> bool {
        self.auto_scroll
    }

    /// Display text as last repainted
    pub fn visible_text(&self) -> String {
        self.display.visible()
    }

    pub fn state(&self) -> AppState {
        AppState {
            mode: self.log.mode(),
            last_ui_line: self.log.last_ui_line(),
            last_log_line: self.log.last_log_line(),
            pending: self.log.pending(),
            jobs_running: self.jobs.is_some(),
            summary: self.summary,
            status_message: self.status_message.as_ref().map(|(m, _)| m.clone()),
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.log.detach_display();
    }
}
