//! Terminal User Interface for cview
//!
//! An interactive candidate browser:
//! - Filter sidebar (search, application type, job, source)
//! - Paged candidate list with loading, error and empty states
//! - Dual-channel event architecture (priority input, request completions)
//! - Keyboard-driven navigation

pub mod app;
pub mod event;
pub mod runtime;
pub mod theme;
pub mod ui;

use std::io::{self, IsTerminal, stdout};
use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::{Result, bail};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;

use crate::api::HttpCandidateSource;
use crate::models::CviewConfig;
use crate::tui::app::App;
use crate::tui::runtime::{
    TuiRuntime, create_channels, run_event_loop, spawn_animation_tick, spawn_input_task,
};

/// Terminal capability requirements for TUI mode
#[derive(Debug)]
pub struct TerminalCapabilities {
    pub is_tty: bool,
    pub term_type: String,
    pub supports_alternate_screen: bool,
}

impl TerminalCapabilities {
    /// Detect terminal capabilities
    pub fn detect() -> Self {
        let is_tty = stdout().is_terminal();
        let term_type = std::env::var("TERM").unwrap_or_default();
        Self::from_parts(is_tty, term_type)
    }

    fn from_parts(is_tty: bool, term_type: String) -> Self {
        let supports_alternate_screen = !matches!(term_type.as_str(), "dumb" | "" | "unknown");
        Self {
            is_tty,
            term_type,
            supports_alternate_screen,
        }
    }

    /// Check if terminal is suitable for TUI mode
    pub fn is_suitable(&self) -> bool {
        self.is_tty && self.supports_alternate_screen
    }

    /// Get error message for unsuitable terminal
    pub fn error_message(&self) -> String {
        if !self.is_tty {
            "TUI mode requires an interactive terminal (stdout is not a TTY).\n\
             Hint: Use 'cview list' instead."
                .to_string()
        } else if !self.supports_alternate_screen {
            format!(
                "Terminal type '{}' may not support TUI mode.\n\
                 Hint: Set TERM to a supported value (e.g., xterm-256color) or use 'cview list'.",
                if self.term_type.is_empty() {
                    "(unset)"
                } else {
                    &self.term_type
                }
            )
        } else {
            "Unknown terminal capability issue.".to_string()
        }
    }
}

/// Run the TUI application
pub async fn run_tui(
    source: HttpCandidateSource,
    config: CviewConfig,
    config_warnings: Vec<String>,
) -> Result<()> {
    let capabilities = TerminalCapabilities::detect();
    if !capabilities.is_suitable() {
        bail!("{}", capabilities.error_message());
    }

    let mut terminal = setup_terminal()?;

    let (input_tx, input_rx, data_tx, data_rx) = create_channels();

    let mut app = App::new(Arc::new(source), data_tx.clone(), config, config_warnings);
    app.start();

    let mut runtime = TuiRuntime::new();
    let animation_visible = Arc::new(AtomicBool::new(true));

    runtime.track(spawn_input_task(input_tx, runtime.cancel_token()));
    runtime.track(spawn_animation_tick(
        data_tx,
        runtime.cancel_token(),
        animation_visible.clone(),
    ));

    let result = run_event_loop(app, input_rx, data_rx, animation_visible, |app| {
        terminal.draw(|frame| ui::render(app, frame))?;
        Ok(())
    })
    .await;

    runtime.shutdown().await;

    restore_terminal(&mut terminal)?;

    result
}

/// Setup the terminal for TUI mode
fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore the terminal to normal mode
fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>) -> Result<()> {
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;
    Ok(())
}

/// Run the TUI with the tokio runtime (entry point from main)
pub fn run(
    source: HttpCandidateSource,
    config: CviewConfig,
    config_warnings: Vec<String>,
) -> Result<()> {
    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_tui(source, config, config_warnings))
}
