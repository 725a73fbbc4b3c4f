use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::TimelineError;

/// Stable identity of a timeline item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ItemId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

impl From<i64> for ItemId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

/// A time-bounded item: inclusive start and end days plus a display name.
///
/// Constructed only through [`TimelineItem::new`] or ingestion, so
/// `end >= start` always holds. Only the name can change afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TimelineItem {
    id: ItemId,
    start: NaiveDate,
    end: NaiveDate,
    name: String,
}

impl TimelineItem {
    /// Build an item, rejecting an end date before the start date.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::EndBeforeStart`] when `end < start`.
    pub fn new(
        id: impl Into<ItemId>,
        start: NaiveDate,
        end: NaiveDate,
        name: impl Into<String>,
    ) -> Result<Self, TimelineError> {
        let id = id.into();
        if end < start {
            return Err(TimelineError::EndBeforeStart { id, start, end });
        }
        Ok(Self {
            id,
            start,
            end,
            name: name.into(),
        })
    }

    #[must_use]
    pub const fn id(&self) -> ItemId {
        self.id
    }

    #[must_use]
    pub const fn start(&self) -> NaiveDate {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> NaiveDate {
        self.end
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Replace the display name, returning the previous one.
    pub(crate) fn set_name(&mut self, name: String) -> String {
        std::mem::replace(&mut self.name, name)
    }

    /// Number of calendar days covered, counting both endpoints.
    #[must_use]
    pub fn duration_days(&self) -> i64 {
        (self.end - self.start).num_days() + 1
    }

    #[must_use]
    pub fn is_single_day(&self) -> bool {
        self.start == self.end
    }

    /// True when both items share at least one day.
    ///
    /// Touching endpoints (`a.end == b.start`) count as overlapping.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start <= other.end && other.start <= self.end
    }
}

impl fmt::Display for TimelineItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{} {} ({} → {})", self.id, self.name, self.start, self.end)
    }
}

/// Wire shape of an item: `{ id, start: "YYYY-MM-DD", end: "YYYY-MM-DD", name }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ItemRecord {
    pub id: i64,
    pub start: String,
    pub end: String,
    pub name: String,
}

impl ItemRecord {
    /// Validate this record and convert it into a typed item.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::InvalidDate`] for a date that is not a real
    /// `YYYY-MM-DD` calendar day, and [`TimelineError::EndBeforeStart`] for an
    /// inverted span.
    pub fn into_item(self) -> Result<TimelineItem, TimelineError> {
        let id = ItemId(self.id);
        let start = parse_day(id, "start", &self.start)?;
        let end = parse_day(id, "end", &self.end)?;
        TimelineItem::new(id, start, end, self.name)
    }
}

impl From<&TimelineItem> for ItemRecord {
    fn from(item: &TimelineItem) -> Self {
        Self {
            id: item.id.0,
            start: item.start.format(DAY_FORMAT).to_string(),
            end: item.end.format(DAY_FORMAT).to_string(),
            name: item.name.clone(),
        }
    }
}

impl<'de> Deserialize<'de> for TimelineItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        ItemRecord::deserialize(deserializer)?
            .into_item()
            .map_err(serde::de::Error::custom)
    }
}

const DAY_FORMAT: &str = "%Y-%m-%d";

/// Parse a strict `YYYY-MM-DD` day.
///
/// chrono alone accepts single-digit months and days, so the shape is checked
/// first.
fn parse_day(id: ItemId, field: &'static str, raw: &str) -> Result<NaiveDate, TimelineError> {
    let invalid = || TimelineError::InvalidDate {
        id,
        field,
        value: raw.to_string(),
    };

    if !has_day_shape(raw) {
        return Err(invalid());
    }
    NaiveDate::parse_from_str(raw, DAY_FORMAT).map_err(|_| invalid())
}

fn has_day_shape(raw: &str) -> bool {
    let bytes = raw.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(i, b)| match i {
            4 | 7 => *b == b'-',
            _ => b.is_ascii_digit(),
        })
}
