//! `tl stats`: header statistics for a set of items.

use std::io::{self, Write};

use chrono::NaiveDate;
use clap::Args;
use serde::Serialize;
use timeline_core::config::ZoomConfig;
use timeline_core::lanes::peak_overlap;
use timeline_core::view::ViewState;

use super::{InputArgs, load_or_report};
use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `tl stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {
    #[command(flatten)]
    pub input: InputArgs,
}

/// Report payload for `tl stats`.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct TimelineStats {
    pub items: usize,
    pub lanes: usize,
    pub total_days: i64,
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub peak_overlap: usize,
}

impl TimelineStats {
    pub fn from_view(view: &ViewState) -> Self {
        let summary = view.summary();
        Self {
            items: summary.items,
            lanes: summary.lanes,
            total_days: summary.total_days,
            start: summary.span.map(|span| span.start),
            end: summary.span.map(|span| span.end),
            peak_overlap: peak_overlap(view.items()),
        }
    }

    fn range_label(&self) -> String {
        match (self.start, self.end) {
            (Some(start), Some(end)) => format!("{start} → {end}"),
            _ => "-".to_string(),
        }
    }
}

/// Execute `tl stats`.
pub fn run_stats(args: &StatsArgs, output: OutputMode) -> anyhow::Result<()> {
    let items = load_or_report(&args.input, output)?;
    let view = ViewState::new(items, ZoomConfig::default());
    let stats = TimelineStats::from_view(&view);
    render_mode(output, &stats, render_stats_text, render_stats_pretty)
}

fn render_stats_text(stats: &TimelineStats, w: &mut dyn Write) -> io::Result<()> {
    writeln!(w, "items\t{}", stats.items)?;
    writeln!(w, "lanes\t{}", stats.lanes)?;
    writeln!(w, "days\t{}", stats.total_days)?;
    writeln!(w, "range\t{}", stats.range_label())?;
    writeln!(w, "peak\t{}", stats.peak_overlap)
}

fn render_stats_pretty(stats: &TimelineStats, w: &mut dyn Write) -> io::Result<()> {
    pretty_section(w, "Timeline")?;
    pretty_kv(w, "Items", stats.items.to_string())?;
    pretty_kv(w, "Lanes", stats.lanes.to_string())?;
    pretty_kv(w, "Days", stats.total_days.to_string())?;
    pretty_kv(w, "Range", stats.range_label())?;
    pretty_kv(w, "Peak", stats.peak_overlap.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use timeline_core::sample::launch_plan;

    #[test]
    fn sample_stats() {
        let view = ViewState::new(launch_plan().expect("sample"), ZoomConfig::default());
        let stats = TimelineStats::from_view(&view);
        assert_eq!(stats.items, 16);
        assert_eq!(stats.lanes, 4);
        assert_eq!(stats.peak_overlap, 4);
        assert_eq!(stats.total_days, 108);
        assert_eq!(stats.range_label(), "2021-01-14 → 2021-05-01");
    }

    #[test]
    fn empty_stats_have_no_range() {
        let view = ViewState::new(Vec::new(), ZoomConfig::default());
        let stats = TimelineStats::from_view(&view);
        assert_eq!(stats.items, 0);
        assert_eq!(stats.start, None);
        assert_eq!(stats.range_label(), "-");

        let mut buf = Vec::new();
        render_stats_text(&stats, &mut buf).expect("render");
        let text = String::from_utf8(buf).expect("utf8");
        assert!(text.contains("lanes\t0"));
        assert!(text.contains("range\t-"));
    }
}
