//! Terminal user interface (TUI) for timelines.
//!
//! ## Entry points
//!
//! - [`run_timeline_tui`]: interactive lane view with zoom and inline rename.

pub mod timeline;

use std::io::{self, stdout};
use std::time::Duration;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::prelude::*;
use timeline_core::config::LayoutConfig;
use timeline_core::view::ViewState;
use tracing::debug;

use timeline::TimelineApp;

const POLL_INTERVAL: Duration = Duration::from_millis(250);

/// Run the interactive view until the user quits.
///
/// Returns the final view state so callers can report renames.
///
/// # Errors
///
/// Fails if the terminal cannot be switched into or out of raw mode, or if
/// drawing or reading events fails.
pub fn run_timeline_tui(view: ViewState, layout: LayoutConfig) -> Result<ViewState> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen).context("Failed to enter alternate screen")?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;

    let mut app = TimelineApp::new(view, layout);
    let result = run_event_loop(&mut terminal, &mut app);

    disable_raw_mode().context("Failed to disable raw mode")?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)
        .context("Failed to leave alternate screen")?;
    terminal.show_cursor().context("Failed to show cursor")?;

    result.map(|()| app.into_view())
}

fn run_event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut TimelineApp,
) -> Result<()> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.render(frame, area);
        })?;

        if event::poll(POLL_INTERVAL)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.handle_key(key);
        }

        if app.should_quit() {
            debug!("timeline view closed");
            return Ok(());
        }
    }
}
