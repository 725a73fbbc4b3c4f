//! `tl lanes`: print the lane assignment for a set of items.

use std::io::{self, Write};

use clap::Args;
use timeline_core::lanes::{Lane, assign_lanes};

use super::{InputArgs, load_or_report};
use crate::output::{OutputMode, pretty_rule, render_mode};

/// Arguments for `tl lanes`.
#[derive(Args, Debug, Default)]
pub struct LanesArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Execute `tl lanes`.
pub fn run_lanes(args: &LanesArgs, output: OutputMode) -> anyhow::Result<()> {
    let items = load_or_report(&args.input, output)?;
    let lanes = assign_lanes(&items);
    render_mode(output, &lanes, |lanes, w| render_text(lanes, w), |lanes, w| {
        render_pretty(lanes, w)
    })
}

/// One tab-separated row per item: `lane id start end name`.
fn render_text(lanes: &[Lane], w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "lane\tid\tstart\tend\tname")?;
    for (index, lane) in lanes.iter().enumerate() {
        for item in lane {
            writeln!(
                w,
                "{}\t{}\t{}\t{}\t{}",
                index + 1,
                item.id(),
                item.start(),
                item.end(),
                item.name()
            )?;
        }
    }
    Ok(())
}

fn render_pretty(lanes: &[Lane], w: &mut dyn Write) -> io::Result<()> {
    if lanes.is_empty() {
        return writeln!(w, "No items.");
    }
    for (index, lane) in lanes.iter().enumerate() {
        if index > 0 {
            writeln!(w)?;
        }
        writeln!(w, "Lane {} ({} items)", index + 1, lane.len())?;
        pretty_rule(w)?;
        for item in lane {
            writeln!(
                w,
                "  #{:<4} {} → {}  {}",
                item.id(), item.start(), item.end(), item.name()
            )?;
        }
    }
    Ok(())
}
