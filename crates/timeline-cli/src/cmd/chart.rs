//! `tl chart`: static text Gantt chart with a weekly time scale.

use std::io::{self, Write};

use clap::Args;
use serde::Serialize;
use timeline_core::config::ProjectConfig;
use timeline_core::view::{ViewState, ViewSummary};

use super::{InputArgs, load_or_report};
use crate::gantt::Gantt;
use crate::output::{CliError, OutputMode, render_error, render_mode};

/// Arguments for `tl chart`.
#[derive(Args, Debug)]
pub struct ChartArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Zoom multiplier; defaults to the configured reset level.
    #[arg(long)]
    pub zoom: Option<f64>,

    /// Canvas width in columns at zoom 1.
    #[arg(long, default_value_t = 80)]
    pub width: u16,
}

/// Report payload for `tl chart`.
#[derive(Debug, Serialize)]
pub struct ChartReport {
    pub zoom: f64,
    pub summary: ViewSummary,
    pub chart: Gantt,
}

/// Execute `tl chart`.
pub fn run_chart(
    args: &ChartArgs,
    output: OutputMode,
    config: &ProjectConfig,
) -> anyhow::Result<()> {
    let bounds = config.zoom;
    let zoom = args.zoom.unwrap_or(bounds.reset);
    if !(bounds.min..=bounds.max).contains(&zoom) {
        render_error(
            output,
            &CliError::with_details(
                format!("zoom {zoom} is outside [{}, {}]", bounds.min, bounds.max),
                "pick a zoom within the configured bounds or widen [zoom] in .timeline/config.toml",
                "zoom_out_of_range",
            ),
        )?;
        anyhow::bail!("zoom out of range");
    }
    if args.width == 0 {
        render_error(
            output,
            &CliError::with_details(
                "width must be at least 1 column",
                "pass --width with a positive column count",
                "invalid_width",
            ),
        )?;
        anyhow::bail!("invalid width");
    }

    let items = load_or_report(&args.input, output)?;
    let view = ViewState::new(items, bounds);
    let report = ChartReport {
        zoom,
        summary: view.summary(),
        chart: Gantt::build(
            view.lanes(),
            args.width,
            zoom,
            config.layout.min_width_percent,
        ),
    };

    render_mode(output, &report, render_chart_text, render_chart_pretty)
}

fn render_chart_text(report: &ChartReport, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "{}", report.chart.scale_line())?;
    for line in report.chart.lane_lines() {
        writeln!(w, "{line}")?;
    }
    Ok(())
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn render_chart_pretty(report: &ChartReport, w: &mut dyn Write) -> io::Result<()> {
    let summary = &report.summary;
    let range = summary
        .span
        .map_or_else(|| "-".to_string(), |s| format!("{} → {}", s.start, s.end));
    writeln!(
        w,
        "{} items · {} lanes · {} days · {} · Zoom: {}%",
        summary.items,
        summary.lanes,
        summary.total_days,
        range,
        (report.zoom * 100.0).round() as u32
    )?;
    writeln!(w, "{:-<width$}", "", width = report.chart.columns)?;
    render_chart_text(report, w)
}
