//! Geometry handed to the rendering layer.
//!
//! Positions are percentages of the overall span so a renderer can map them
//! onto any canvas width. All math is in whole days.

use chrono::{Duration, NaiveDate};
use serde::Serialize;

use crate::model::item::{ItemId, TimelineItem};

/// Minimum visible bar width, in percent of the canvas.
pub const DEFAULT_MIN_WIDTH_PERCENT: f64 = 3.0;

/// Weekly ticks aimed for at zoom 1.0.
const TICKS_PER_CANVAS: f64 = 8.0;

/// The inclusive day range covered by a set of items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TimelineSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Where one item sits on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ItemPlacement {
    pub id: ItemId,
    pub offset_days: i64,
    pub duration_days: i64,
    pub left_percent: f64,
    pub width_percent: f64,
}

impl ItemPlacement {
    #[must_use]
    pub const fn is_single_day(&self) -> bool {
        self.duration_days == 1
    }

    /// Bar width after applying the minimum visible width.
    #[must_use]
    pub fn display_width_percent(&self, min_percent: f64) -> f64 {
        self.width_percent.max(min_percent)
    }
}

/// One time-scale marker.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleTick {
    pub date: NaiveDate,
    pub position: f64,
}

impl TimelineSpan {
    /// Earliest and latest day mentioned by any item, or `None` when empty.
    #[must_use]
    pub fn from_items(items: &[TimelineItem]) -> Option<Self> {
        let days = items.iter().flat_map(|item| [item.start(), item.end()]);
        let start = days.clone().min()?;
        let end = days.max()?;
        Some(Self { start, end })
    }

    /// Days in the span, counting both endpoints.
    #[must_use]
    pub fn total_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn place(&self, item: &TimelineItem) -> ItemPlacement {
        let total = self.total_days() as f64;
        let offset_days = (item.start() - self.start).num_days();
        let duration_days = item.duration_days().max(1);

        ItemPlacement {
            id: item.id(),
            offset_days,
            duration_days,
            left_percent: offset_days as f64 / total * 100.0,
            width_percent: duration_days as f64 / total * 100.0,
        }
    }

    /// Weekly time-scale ticks for the given zoom level.
    ///
    /// Higher zoom shows more ticks: the stride in weeks is
    /// `weeks / (8 * zoom)`, halved again from 4x up, and at least doubled
    /// at 0.5x and below.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    pub fn scale_ticks(&self, zoom: f64) -> Vec<ScaleTick> {
        let total_days = self.total_days();
        let weeks = (total_days + 6) / 7;

        // Non-positive or NaN zoom falls back to a single tick at the start.
        let mut interval = if zoom > 0.0 {
            ((weeks as f64 / (TICKS_PER_CANVAS * zoom)).floor() as i64).max(1)
        } else {
            weeks.max(1).saturating_add(1)
        };
        if zoom >= 4.0 {
            interval = (interval / 2).max(1);
        }
        if zoom <= 0.5 {
            interval = interval.saturating_mul(2).max(2);
        }

        let mut ticks = Vec::new();
        let mut week = 0;
        while week <= weeks {
            let date = self.start + Duration::days(week * 7);
            if date > self.end {
                break;
            }
            ticks.push(ScaleTick {
                date,
                position: (week * 7) as f64 / total_days as f64 * 100.0,
            });
            week += interval;
        }
        ticks
    }
}

/// Width of the zoomed canvas: never narrower than the base width.
#[must_use]
pub fn content_width(base: f64, zoom: f64) -> f64 {
    base.max(base * zoom)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date")
    }

    fn item(id: i64, start: &str, end: &str) -> TimelineItem {
        TimelineItem::new(id, day(start), day(end), "x").expect("valid item")
    }

    #[test]
    fn span_of_nothing_is_none() {
        assert_eq!(TimelineSpan::from_items(&[]), None);
    }

    #[test]
    fn span_covers_all_items() {
        let items = vec![
            item(1, "2021-01-06", "2021-01-10"),
            item(2, "2021-01-01", "2021-01-05"),
        ];
        let span = TimelineSpan::from_items(&items).expect("non-empty");
        assert_eq!(span.start, day("2021-01-01"));
        assert_eq!(span.end, day("2021-01-10"));
        assert_eq!(span.total_days(), 10);
    }

    #[test]
    fn placement_is_proportional() {
        let items = vec![
            item(1, "2021-01-01", "2021-01-05"),
            item(2, "2021-01-06", "2021-01-10"),
        ];
        let span = TimelineSpan::from_items(&items).expect("non-empty");
        let second = span.place(&items[1]);
        assert_eq!(second.offset_days, 5);
        assert_eq!(second.duration_days, 5);
        assert!((second.left_percent - 50.0).abs() < f64::EPSILON);
        assert!((second.width_percent - 50.0).abs() < f64::EPSILON);
        assert!(!second.is_single_day());
    }

    #[test]
    fn single_day_item_gets_minimum_display_width() {
        let items = vec![
            item(1, "2021-01-01", "2021-04-10"),
            item(2, "2021-02-13", "2021-02-13"),
        ];
        let span = TimelineSpan::from_items(&items).expect("non-empty");
        let placement = span.place(&items[1]);
        assert!(placement.is_single_day());
        assert_eq!(placement.duration_days, 1);
        assert!(placement.width_percent < 3.0);
        assert!(
            (placement.display_width_percent(DEFAULT_MIN_WIDTH_PERCENT) - 3.0).abs()
                < f64::EPSILON
        );
    }

    #[test]
    fn ticks_start_at_span_start_and_stay_inside() {
        let span = TimelineSpan {
            start: day("2021-01-14"),
            end: day("2021-05-01"),
        };
        let ticks = span.scale_ticks(1.0);
        assert_eq!(ticks[0].date, span.start);
        assert!(ticks[0].position.abs() < f64::EPSILON);
        assert!(ticks.iter().all(|t| t.date <= span.end));
        assert!(ticks.iter().all(|t| t.position < 100.0));
    }

    #[test]
    fn zooming_in_adds_ticks() {
        let span = TimelineSpan {
            start: day("2021-01-01"),
            end: day("2022-12-31"),
        };
        let coarse = span.scale_ticks(1.0).len();
        let fine = span.scale_ticks(4.0).len();
        assert!(fine > coarse, "{fine} should exceed {coarse}");
    }

    #[test]
    fn interval_math_matches_weekly_stride() {
        // 105 days -> 15 weeks; 15 / 8 floors to 1, so every week is marked.
        let span = TimelineSpan {
            start: day("2021-01-01"),
            end: day("2021-04-15"),
        };
        assert_eq!(span.total_days(), 105);
        assert_eq!(span.scale_ticks(1.0).len(), 15);

        // 730 days -> 105 weeks; 105 / 8 floors to 13.
        let long = TimelineSpan {
            start: day("2021-01-01"),
            end: day("2022-12-31"),
        };
        let ticks = long.scale_ticks(1.0);
        assert_eq!(ticks[1].date - ticks[0].date, Duration::days(13 * 7));
    }

    #[test]
    fn degenerate_zoom_yields_only_the_first_tick() {
        let span = TimelineSpan {
            start: day("2021-01-14"),
            end: day("2021-05-01"),
        };
        for zoom in [0.0, -2.0, f64::NAN, 1e-300] {
            let ticks = span.scale_ticks(zoom);
            assert_eq!(ticks.len(), 1, "zoom {zoom}");
            assert_eq!(ticks[0].date, span.start);
        }
    }

    #[test]
    fn low_zoom_stride_is_at_least_two_weeks() {
        let span = TimelineSpan {
            start: day("2021-01-01"),
            end: day("2021-02-01"),
        };
        let ticks = span.scale_ticks(0.5);
        assert_eq!(ticks[1].date - ticks[0].date, Duration::days(14));
    }

    #[test]
    fn content_width_never_shrinks() {
        assert!((content_width(1000.0, 1.0) - 1000.0).abs() < f64::EPSILON);
        assert!((content_width(1000.0, 2.25) - 2250.0).abs() < f64::EPSILON);
        assert!((content_width(1000.0, 0.5) - 1000.0).abs() < f64::EPSILON);
    }
}
