//! Bundled demo dataset: a sixteen-item product launch plan.

use crate::error::TimelineError;
use crate::model::ingest::parse_items;
use crate::model::item::TimelineItem;

const LAUNCH_PLAN: &str = include_str!("../data/launch_plan.json");

/// The bundled launch plan, parsed and validated.
///
/// # Errors
///
/// Only fails if the bundled data itself is corrupt.
pub fn launch_plan() -> Result<Vec<TimelineItem>, TimelineError> {
    parse_items(LAUNCH_PLAN)
}
