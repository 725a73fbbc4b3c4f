//! Lane assignment: greedy first-fit interval partitioning.
//!
//! Items are visited in start order and dropped into the first existing lane
//! whose last item ends strictly before the new item starts. A new lane is
//! opened only when no lane fits. Visiting in start order and scanning lanes
//! in creation order makes the lane count equal to [`peak_overlap`], the
//! largest number of items sharing a single day, which is optimal.
//!
//! # Ordering
//!
//! Items with equal start dates are ordered by end date, then by [`ItemId`].
//! The result therefore depends only on the set of items, never on the order
//! of the input slice.
//!
//! # Complexity
//!
//! O(N·L) for N items and L lanes.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::model::item::{ItemId, TimelineItem};

/// One visual track: items in start order, no two sharing a day.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Lane {
    items: Vec<TimelineItem>,
}

impl Lane {
    fn starting_with(item: TimelineItem) -> Self {
        Self { items: vec![item] }
    }

    #[must_use]
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TimelineItem> {
        self.items.iter()
    }

    /// End date of the most recently added item.
    #[must_use]
    pub fn last_end(&self) -> Option<NaiveDate> {
        self.items.last().map(|item| item.end())
    }

    /// True when `item` can be appended without sharing a day with the
    /// lane's last item.
    #[must_use]
    pub fn accepts(&self, item: &TimelineItem) -> bool {
        self.last_end().is_none_or(|end| end < item.start())
    }

    #[must_use]
    pub fn ids(&self) -> Vec<ItemId> {
        self.items.iter().map(|item| item.id()).collect()
    }
}

impl<'a> IntoIterator for &'a Lane {
    type Item = &'a TimelineItem;
    type IntoIter = std::slice::Iter<'a, TimelineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

/// Partition `items` into the minimum number of non-overlapping lanes.
///
/// The caller's slice is left untouched; sorting happens on a vector of
/// references.
#[must_use]
pub fn assign_lanes(items: &[TimelineItem]) -> Vec<Lane> {
    let mut ordered: Vec<&TimelineItem> = items.iter().collect();
    ordered.sort_by(|a, b| start_order(a, b));

    let mut lanes: Vec<Lane> = Vec::new();
    for item in ordered {
        match lanes.iter_mut().find(|lane| lane.accepts(item)) {
            Some(lane) => lane.items.push(item.clone()),
            None => lanes.push(Lane::starting_with(item.clone())),
        }
    }

    debug!(items = items.len(), lanes = lanes.len(), "assigned lanes");
    lanes
}

/// Visiting order of the assigner: start, then end, then id.
#[must_use]
pub fn start_order(a: &TimelineItem, b: &TimelineItem) -> Ordering {
    a.start()
        .cmp(&b.start())
        .then_with(|| a.end().cmp(&b.end()))
        .then_with(|| a.id().cmp(&b.id()))
}

/// Largest number of items that share one day.
///
/// This is the lower bound on the number of lanes for any valid partition.
#[must_use]
pub fn peak_overlap(items: &[TimelineItem]) -> usize {
    // (day, 0) opens and (day, 1) closes, so on a shared day every opening
    // is counted before any closing: touching endpoints overlap.
    let mut events: Vec<(NaiveDate, u8)> = items
        .iter()
        .flat_map(|item| [(item.start(), 0), (item.end(), 1)])
        .collect();
    events.sort_unstable();

    let mut open = 0_usize;
    let mut peak = 0_usize;
    for (_, kind) in events {
        if kind == 0 {
            open += 1;
            peak = peak.max(open);
        } else {
            open -= 1;
        }
    }
    peak
}

/// Map every item id to the index of the lane holding it.
#[must_use]
pub fn lane_index_by_item(lanes: &[Lane]) -> BTreeMap<ItemId, usize> {
    lanes
        .iter()
        .enumerate()
        .flat_map(|(index, lane)| lane.iter().map(move |item| (item.id(), index)))
        .collect()
}
