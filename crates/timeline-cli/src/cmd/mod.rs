pub mod chart;
pub mod completions;
pub mod lanes;
pub mod rename;
pub mod sample;
pub mod stats;
pub mod view;

use std::io::Read;
use std::path::PathBuf;

use clap::Args;
use timeline_core::error::TimelineError;
use timeline_core::model::TimelineItem;
use timeline_core::model::ingest::{load_items, parse_items};
use timeline_core::sample::launch_plan;
use tracing::debug;

use crate::output::{CliError, OutputMode, render_error};

/// Where a command reads its items from.
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    /// JSON file of items; `-` or omitted reads stdin.
    #[arg(value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Use the built-in launch plan instead of reading input.
    #[arg(long, conflicts_with = "file")]
    pub sample: bool,
}

impl InputArgs {
    /// Load and validate items from the selected source.
    ///
    /// # Errors
    ///
    /// Returns the ingestion error for unreadable or malformed input.
    pub fn load(&self) -> Result<Vec<TimelineItem>, TimelineError> {
        if self.sample {
            return launch_plan();
        }
        match self.file.as_deref() {
            Some(path) if path.as_os_str() != "-" => load_items(path),
            _ => read_stdin(),
        }
    }

    /// True when neither a file nor `--sample` was given.
    pub const fn is_unspecified(&self) -> bool {
        self.file.is_none() && !self.sample
    }
}

fn read_stdin() -> Result<Vec<TimelineItem>, TimelineError> {
    let mut content = String::new();
    std::io::stdin()
        .read_to_string(&mut content)
        .map_err(|source| TimelineError::Io {
            path: "<stdin>".to_string(),
            source,
        })?;
    let items = parse_items(&content)?;
    debug!(count = items.len(), "loaded timeline items from stdin");
    Ok(items)
}

/// Load items, rendering any failure in the active output mode.
///
/// # Errors
///
/// Returns the ingestion error after it has been rendered to stderr.
pub fn load_or_report(input: &InputArgs, output: OutputMode) -> anyhow::Result<Vec<TimelineItem>> {
    match input.load() {
        Ok(items) => Ok(items),
        Err(err) => {
            render_error(output, &CliError::from(&err))?;
            Err(err.into())
        }
    }
}
