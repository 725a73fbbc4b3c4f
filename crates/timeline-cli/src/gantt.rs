//! Column geometry for character-cell Gantt charts.
//!
//! Maps the percentage layout from [`timeline_core::layout`] onto a fixed
//! number of terminal columns. Shared by `tl chart` and the interactive view.

use serde::Serialize;
use timeline_core::lanes::Lane;
use timeline_core::layout::{TimelineSpan, content_width};
use timeline_core::model::ItemId;
use timeline_core::palette::{ColorBucket, bucket_for_name};

/// One item bar positioned on the canvas.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub lane: usize,
    pub id: ItemId,
    pub name: String,
    pub color: ColorBucket,
    pub start_col: usize,
    pub len: usize,
}

impl Bar {
    /// Bar face: `[name---]`, truncated to the bar length.
    pub fn label(&self) -> String {
        match self.len {
            0 => String::new(),
            1 => "|".to_string(),
            2 => "[]".to_string(),
            len => {
                let inner = len - 2;
                let mut face: String = self.name.chars().take(inner).collect();
                let used = face.chars().count();
                face.extend(std::iter::repeat_n('-', inner - used));
                format!("[{face}]")
            }
        }
    }

    pub const fn end_col(&self) -> usize {
        self.start_col + self.len
    }
}

/// A dated marker on the time scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TickLabel {
    pub col: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Gantt {
    pub columns: usize,
    pub lane_count: usize,
    pub bars: Vec<Bar>,
    pub ticks: Vec<TickLabel>,
}

impl Gantt {
    /// Lay out `lanes` on a canvas `base_width` columns wide at zoom 1.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn build(lanes: &[Lane], base_width: u16, zoom: f64, min_width_percent: f64) -> Self {
        let items: Vec<_> = lanes.iter().flat_map(|lane| lane.iter().cloned()).collect();
        let columns = content_width(f64::from(base_width), zoom).round().max(1.0) as usize;

        let Some(span) = TimelineSpan::from_items(&items) else {
            return Self {
                columns,
                lane_count: 0,
                bars: Vec::new(),
                ticks: Vec::new(),
            };
        };

        let to_col = |percent: f64| (percent / 100.0 * columns as f64).floor() as usize;

        let bars = lanes
            .iter()
            .enumerate()
            .flat_map(|(lane_index, lane)| {
                lane.iter().map(move |item| (lane_index, item))
            })
            .map(|(lane, item)| {
                let placement = span.place(item);
                let start_col = to_col(placement.left_percent).min(columns - 1);
                let wanted = (placement.display_width_percent(min_width_percent) / 100.0
                    * columns as f64)
                    .round()
                    .max(1.0) as usize;
                Bar {
                    lane,
                    id: item.id(),
                    name: item.name().to_string(),
                    color: bucket_for_name(item.name()),
                    start_col,
                    len: wanted.min(columns - start_col),
                }
            })
            .collect();

        let ticks = tick_labels(&span, zoom, columns, to_col);

        Self {
            columns,
            lane_count: lanes.len(),
            bars,
            ticks,
        }
    }

    pub fn bars_in_lane(&self, lane: usize) -> impl Iterator<Item = &Bar> {
        self.bars.iter().filter(move |bar| bar.lane == lane)
    }

    pub fn bar(&self, id: ItemId) -> Option<&Bar> {
        self.bars.iter().find(|bar| bar.id == id)
    }

    /// The time-scale row as plain text.
    pub fn scale_line(&self) -> String {
        let mut row = vec![' '; self.columns];
        for tick in &self.ticks {
            for (offset, ch) in tick.label.chars().enumerate() {
                if let Some(cell) = row.get_mut(tick.col + offset) {
                    *cell = ch;
                }
            }
        }
        row.into_iter().collect::<String>().trim_end().to_string()
    }

    /// One text row per lane.
    pub fn lane_lines(&self) -> Vec<String> {
        (0..self.lane_count)
            .map(|lane| {
                let mut row = vec![' '; self.columns];
                for bar in self.bars_in_lane(lane) {
                    for (offset, ch) in bar.label().chars().enumerate() {
                        if let Some(cell) = row.get_mut(bar.start_col + offset) {
                            *cell = ch;
                        }
                    }
                }
                row.into_iter().collect::<String>().trim_end().to_string()
            })
            .collect()
    }
}

/// Tick labels such as `Jan 14`, dropping any that would collide with the
/// previous label.
fn tick_labels(
    span: &TimelineSpan,
    zoom: f64,
    columns: usize,
    to_col: impl Fn(f64) -> usize,
) -> Vec<TickLabel> {
    let mut labels: Vec<TickLabel> = Vec::new();
    for tick in span.scale_ticks(zoom) {
        let label = tick.date.format("%b %-d").to_string();
        let col = to_col(tick.position);
        let width = label.chars().count();
        if col + width > columns {
            break;
        }
        let clear = labels
            .last()
            .is_none_or(|prev| prev.col + prev.label.chars().count() < col);
        if clear {
            labels.push(TickLabel { col, label });
        }
    }
    labels
}
