//! `tl view`: interactive terminal timeline.

use clap::Args;
use timeline_core::config::ProjectConfig;
use timeline_core::view::ViewState;
use tracing::info;

use super::{InputArgs, load_or_report};
use crate::output::OutputMode;
use crate::tui::run_timeline_tui;

/// Arguments for `tl view`.
#[derive(Args, Debug, Default)]
pub struct ViewArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute `tl view`.
///
/// Without a FILE the built-in launch plan is shown, since stdin is needed
/// for the keyboard.
pub fn run_view(args: &ViewArgs, output: OutputMode, config: &ProjectConfig) -> anyhow::Result<()> {
    let mut input = args.input.clone();
    if input.is_unspecified() {
        input.sample = true;
    }

    let items = load_or_report(&input, output)?;
    let initial = items.clone();
    let view = run_timeline_tui(ViewState::new(items, config.zoom), config.layout)?;

    let renamed = view
        .items()
        .iter()
        .zip(&initial)
        .filter(|(now, before)| now.name() != before.name())
        .count();
    info!(renamed, "timeline view finished");
    Ok(())
}
