//! `tl rename`: rename one item and print the updated collection.
//!
//! The input is never modified; the updated items go to stdout.

use std::io::Write;

use clap::Args;
use timeline_core::config::ZoomConfig;
use timeline_core::model::ItemId;
use timeline_core::model::ingest::to_json;
use timeline_core::view::{EditOutcome, ViewState};
use tracing::info;

use super::{InputArgs, load_or_report};
use crate::output::{CliError, OutputMode, render_error};

/// Arguments for `tl rename`.
#[derive(Args, Debug)]
pub struct RenameArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Id of the item to rename.
    #[arg(long)]
    pub id: ItemId,

    /// New display name; surrounding whitespace is trimmed.
    #[arg(long)]
    pub name: String,
}

/// Execute `tl rename`.
pub fn run_rename(args: &RenameArgs, output: OutputMode, quiet: bool) -> anyhow::Result<()> {
    let items = load_or_report(&args.input, output)?;
    let mut view = ViewState::new(items, ZoomConfig::default());

    let outcome = match view.rename(args.id, args.name.clone()) {
        Ok(outcome) => outcome,
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            return Err(err.into());
        }
    };

    match &outcome {
        EditOutcome::Rejected { id } => {
            render_error(
                output,
                &CliError::with_details(
                    format!("new name for item {id} is blank"),
                    "pass a --name with at least one non-space character",
                    "blank_name",
                ),
            )?;
            anyhow::bail!("blank name");
        }
        EditOutcome::Renamed { id, old, new } => {
            info!(%id, %old, %new, "rename applied");
            if output.is_pretty() && !quiet {
                eprintln!("✓ renamed #{id}: {old} → {new}");
            }
        }
        EditOutcome::Unchanged { id } => {
            if output.is_pretty() && !quiet {
                eprintln!("✓ #{id} already has that name");
            }
        }
    }

    let json = to_json(view.items())?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{json}")?;
    Ok(())
}
