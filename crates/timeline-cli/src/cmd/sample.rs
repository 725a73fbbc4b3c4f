//! `tl sample`: print the built-in launch plan as item JSON.

use std::io::Write;

use clap::Args;
use timeline_core::model::ingest::to_json;
use timeline_core::sample::launch_plan;

/// Arguments for `tl sample`.
#[derive(Args, Debug, Default)]
pub struct SampleArgs {}

/// Execute `tl sample`.
///
/// Output is always item JSON so it can be piped back into other commands.
pub fn run_sample(_args: &SampleArgs) -> anyhow::Result<()> {
    let json = to_json(&launch_plan()?)?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{json}")?;
    Ok(())
}
