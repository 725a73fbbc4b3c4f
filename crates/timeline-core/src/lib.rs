//! timeline-core library.
//!
//! Packs dated items into the fewest non-overlapping horizontal lanes and
//! holds the state a timeline view needs around that: zoom, inline rename,
//! layout geometry, and per-name colors.
//!
//! # Conventions
//!
//! - **Errors**: [`error::TimelineError`] for ingestion and view operations;
//!   `anyhow::Result` for config loading.
//! - **Logging**: Use `tracing` macros (`info!`, `warn!`, `error!`, `debug!`, `trace!`).

pub mod config;
pub mod error;
pub mod lanes;
pub mod layout;
pub mod model;
pub mod palette;
pub mod sample;
pub mod view;

pub use error::{ErrorCode, TimelineError};
pub use lanes::{Lane, assign_lanes, peak_overlap};
pub use model::{ItemId, ItemRecord, TimelineItem};
pub use view::{EditOutcome, EditState, ViewState, Zoom};
