pub mod ingest;
pub mod item;

pub use item::{ItemId, ItemRecord, TimelineItem};
