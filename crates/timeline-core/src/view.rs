//! Timeline view state: the live item collection, its lanes, the zoom level,
//! and the inline-rename state machine.
//!
//! The rendering layer owns one [`ViewState`] and feeds it discrete user
//! actions. Lanes are recomputed whenever the item collection changes and
//! are read back through [`ViewState::lanes`].
//!
//! # Edit lifecycle
//!
//! ```text
//! Idle --begin_edit(id)--> Editing { id, draft }
//! Editing --commit (non-blank draft) / cancel / blur--> Idle
//! Editing(a) --begin_edit(b)--> Editing(b)      (a's draft is discarded)
//! ```

use serde::Serialize;
use tracing::{debug, info};

use crate::config::ZoomConfig;
use crate::error::TimelineError;
use crate::lanes::{Lane, assign_lanes};
use crate::layout::TimelineSpan;
use crate::model::item::{ItemId, TimelineItem};

/// Bounded zoom multiplier.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Zoom {
    level: f64,
    config: ZoomConfig,
}

impl Default for Zoom {
    fn default() -> Self {
        Self::new(ZoomConfig::default())
    }
}

impl Zoom {
    #[must_use]
    pub const fn new(config: ZoomConfig) -> Self {
        Self {
            level: config.reset,
            config,
        }
    }

    #[must_use]
    pub const fn level(&self) -> f64 {
        self.level
    }

    #[must_use]
    pub const fn config(&self) -> &ZoomConfig {
        &self.config
    }

    /// Zoom level as a whole percentage, e.g. `225` for 2.25x.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u32 {
        (self.level * 100.0).round() as u32
    }

    pub fn zoom_in(&mut self) {
        self.level = (self.level * self.config.step).min(self.config.max);
    }

    pub fn zoom_out(&mut self) {
        self.level = (self.level / self.config.step).max(self.config.min);
    }

    pub const fn reset(&mut self) {
        self.level = self.config.reset;
    }

    #[must_use]
    pub fn can_zoom_in(&self) -> bool {
        self.level < self.config.max
    }

    #[must_use]
    pub fn can_zoom_out(&self) -> bool {
        self.level > self.config.min
    }
}

/// At most one item is being renamed at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EditState {
    #[default]
    Idle,
    Editing { id: ItemId, draft: String },
}

impl EditState {
    #[must_use]
    pub const fn editing_id(&self) -> Option<ItemId> {
        match self {
            Self::Idle => None,
            Self::Editing { id, .. } => Some(*id),
        }
    }

    #[must_use]
    pub fn draft(&self) -> Option<&str> {
        match self {
            Self::Idle => None,
            Self::Editing { draft, .. } => Some(draft),
        }
    }

    #[must_use]
    pub fn is_editing(&self, id: ItemId) -> bool {
        self.editing_id() == Some(id)
    }
}

/// Result of committing an edit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum EditOutcome {
    Renamed {
        id: ItemId,
        old: String,
        new: String,
    },
    /// The trimmed draft equals the current name; the editor closes.
    Unchanged { id: ItemId },
    /// The trimmed draft is blank; the editor stays open.
    Rejected { id: ItemId },
}

/// Header statistics for the current items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ViewSummary {
    pub items: usize,
    pub lanes: usize,
    pub total_days: i64,
    pub span: Option<TimelineSpan>,
}

#[derive(Debug, Clone)]
pub struct ViewState {
    items: Vec<TimelineItem>,
    lanes: Vec<Lane>,
    zoom: Zoom,
    edit: EditState,
}

impl ViewState {
    #[must_use]
    pub fn new(items: Vec<TimelineItem>, zoom: ZoomConfig) -> Self {
        let lanes = assign_lanes(&items);
        Self {
            items,
            lanes,
            zoom: Zoom::new(zoom),
            edit: EditState::Idle,
        }
    }

    #[must_use]
    pub fn items(&self) -> &[TimelineItem] {
        &self.items
    }

    #[must_use]
    pub fn lanes(&self) -> &[Lane] {
        &self.lanes
    }

    #[must_use]
    pub const fn zoom(&self) -> &Zoom {
        &self.zoom
    }

    pub const fn zoom_mut(&mut self) -> &mut Zoom {
        &mut self.zoom
    }

    #[must_use]
    pub const fn edit(&self) -> &EditState {
        &self.edit
    }

    #[must_use]
    pub fn find(&self, id: ItemId) -> Option<&TimelineItem> {
        self.items.iter().find(|item| item.id() == id)
    }

    #[must_use]
    pub fn span(&self) -> Option<TimelineSpan> {
        TimelineSpan::from_items(&self.items)
    }

    #[must_use]
    pub fn summary(&self) -> ViewSummary {
        let span = self.span();
        ViewSummary {
            items: self.items.len(),
            lanes: self.lanes.len(),
            total_days: span.map_or(0, |s| s.total_days()),
            span,
        }
    }

    /// Swap in a new item snapshot.
    ///
    /// An edit in progress survives only if its item is still present.
    pub fn replace_items(&mut self, items: Vec<TimelineItem>) {
        self.items = items;
        if let Some(id) = self.edit.editing_id()
            && self.find(id).is_none()
        {
            debug!(%id, "edited item disappeared; cancelling edit");
            self.edit = EditState::Idle;
        }
        self.refresh_lanes();
    }

    /// Open the editor for `id`, closing any other editor.
    ///
    /// Re-opening the item already being edited keeps its draft.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::ItemNotFound`] for an unknown id.
    pub fn begin_edit(&mut self, id: ItemId) -> Result<(), TimelineError> {
        if self.edit.is_editing(id) {
            return Ok(());
        }
        let name = self
            .find(id)
            .map(|item| item.name().to_string())
            .ok_or(TimelineError::ItemNotFound(id))?;
        self.edit = EditState::Editing { id, draft: name };
        Ok(())
    }

    /// Replace the draft text.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::NotEditing`] when no editor is open.
    pub fn set_draft(&mut self, text: impl Into<String>) -> Result<(), TimelineError> {
        *self.draft_mut()? = text.into();
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`TimelineError::NotEditing`] when no editor is open.
    pub fn push_draft_char(&mut self, ch: char) -> Result<(), TimelineError> {
        self.draft_mut()?.push(ch);
        Ok(())
    }

    /// # Errors
    ///
    /// Returns [`TimelineError::NotEditing`] when no editor is open.
    pub fn pop_draft_char(&mut self) -> Result<(), TimelineError> {
        self.draft_mut()?.pop();
        Ok(())
    }

    /// Apply the trimmed draft as the item's new name.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::NotEditing`] when no editor is open, and
    /// [`TimelineError::ItemNotFound`] if the item vanished underneath it.
    pub fn commit_edit(&mut self) -> Result<EditOutcome, TimelineError> {
        let EditState::Editing { id, draft } = &self.edit else {
            return Err(TimelineError::NotEditing);
        };
        let id = *id;
        let new_name = draft.trim().to_string();

        if new_name.is_empty() {
            return Ok(EditOutcome::Rejected { id });
        }

        let item = self
            .items
            .iter_mut()
            .find(|item| item.id() == id)
            .ok_or(TimelineError::ItemNotFound(id))?;
        self.edit = EditState::Idle;

        if item.name() == new_name {
            return Ok(EditOutcome::Unchanged { id });
        }

        let old = item.set_name(new_name.clone());
        info!(%id, old = %old, new = %new_name, "renamed item");
        self.refresh_lanes();
        Ok(EditOutcome::Renamed {
            id,
            old,
            new: new_name,
        })
    }

    /// Close the editor without saving. Returns whether one was open.
    pub fn cancel_edit(&mut self) -> bool {
        let was_editing = self.edit != EditState::Idle;
        self.edit = EditState::Idle;
        was_editing
    }

    /// Focus left the editor: commit if one is open.
    pub fn blur(&mut self) -> Option<EditOutcome> {
        if self.edit == EditState::Idle {
            return None;
        }
        self.commit_edit().ok()
    }

    /// Rename through the edit lifecycle in one step.
    ///
    /// # Errors
    ///
    /// Returns [`TimelineError::ItemNotFound`] for an unknown id.
    pub fn rename(
        &mut self,
        id: ItemId,
        name: impl Into<String>,
    ) -> Result<EditOutcome, TimelineError> {
        self.begin_edit(id)?;
        self.set_draft(name)?;
        let outcome = self.commit_edit()?;
        if matches!(outcome, EditOutcome::Rejected { .. }) {
            self.cancel_edit();
        }
        Ok(outcome)
    }

    fn draft_mut(&mut self) -> Result<&mut String, TimelineError> {
        match &mut self.edit {
            EditState::Editing { draft, .. } => Ok(draft),
            EditState::Idle => Err(TimelineError::NotEditing),
        }
    }

    fn refresh_lanes(&mut self) {
        self.lanes = assign_lanes(&self.items);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn item(id: i64, start: &str, end: &str, name: &str) -> TimelineItem {
        let day = |s: &str| NaiveDate::parse_from_str(s, "%Y-%m-%d").expect("valid date");
        TimelineItem::new(id, day(start), day(end), name).expect("valid item")
    }

    fn view() -> ViewState {
        ViewState::new(
            vec![
                item(1, "2021-01-01", "2021-01-05", "Test Task 1"),
                item(2, "2021-01-06", "2021-01-10", "Test Task 2"),
            ],
            ZoomConfig::default(),
        )
    }

    #[test]
    fn zoom_steps_and_clamps() {
        let mut zoom = Zoom::default();
        assert_eq!(zoom.percent(), 100);
        assert!(!zoom.can_zoom_out());

        zoom.zoom_in();
        assert_eq!(zoom.percent(), 150);
        zoom.zoom_in();
        assert_eq!(zoom.percent(), 225);

        for _ in 0..10 {
            zoom.zoom_in();
        }
        assert!((zoom.level() - 8.0).abs() < f64::EPSILON);
        assert!(!zoom.can_zoom_in());

        zoom.zoom_out();
        assert!(zoom.level() < 8.0);
        zoom.reset();
        assert!((zoom.level() - 1.0).abs() < f64::EPSILON);

        zoom.zoom_out();
        assert!((zoom.level() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn new_view_computes_lanes() {
        let view = view();
        assert_eq!(view.lanes().len(), 1);
        let summary = view.summary();
        assert_eq!(summary.items, 2);
        assert_eq!(summary.lanes, 1);
        assert_eq!(summary.total_days, 10);
    }

    #[test]
    fn empty_view_summary() {
        let view = ViewState::new(Vec::new(), ZoomConfig::default());
        let summary = view.summary();
        assert_eq!(summary.items, 0);
        assert_eq!(summary.lanes, 0);
        assert_eq!(summary.total_days, 0);
        assert!(summary.span.is_none());
    }

    #[test]
    fn commit_trims_and_renames() {
        let mut view = view();
        view.begin_edit(ItemId(1)).expect("known item");
        assert_eq!(view.edit().draft(), Some("Test Task 1"));
        view.set_draft("  Updated Task  ").expect("editing");

        let outcome = view.commit_edit().expect("commit");
        assert_eq!(
            outcome,
            EditOutcome::Renamed {
                id: ItemId(1),
                old: "Test Task 1".to_string(),
                new: "Updated Task".to_string(),
            }
        );
        assert_eq!(view.edit(), &EditState::Idle);
        assert_eq!(view.lanes()[0].items()[0].name(), "Updated Task");
    }

    #[test]
    fn blank_draft_keeps_editor_open() {
        let mut view = view();
        view.begin_edit(ItemId(2)).expect("known item");
        view.set_draft("   ").expect("editing");
        assert_eq!(
            view.commit_edit().expect("commit"),
            EditOutcome::Rejected { id: ItemId(2) }
        );
        assert!(view.edit().is_editing(ItemId(2)));
        assert_eq!(view.find(ItemId(2)).expect("item").name(), "Test Task 2");
    }

    #[test]
    fn editing_another_item_discards_the_first_draft() {
        let mut view = view();
        view.begin_edit(ItemId(1)).expect("known item");
        view.push_draft_char('!').expect("editing");
        view.begin_edit(ItemId(2)).expect("known item");

        assert_eq!(view.edit().editing_id(), Some(ItemId(2)));
        assert_eq!(view.edit().draft(), Some("Test Task 2"));
        assert_eq!(view.find(ItemId(1)).expect("item").name(), "Test Task 1");
    }

    #[test]
    fn reopening_same_item_keeps_draft() {
        let mut view = view();
        view.begin_edit(ItemId(1)).expect("known item");
        view.pop_draft_char().expect("editing");
        view.begin_edit(ItemId(1)).expect("known item");
        assert_eq!(view.edit().draft(), Some("Test Task "));
    }

    #[test]
    fn cancel_restores_idle_without_saving() {
        let mut view = view();
        view.begin_edit(ItemId(1)).expect("known item");
        view.set_draft("Nope").expect("editing");
        assert!(view.cancel_edit());
        assert!(!view.cancel_edit());
        assert_eq!(view.find(ItemId(1)).expect("item").name(), "Test Task 1");
    }

    #[test]
    fn blur_commits_only_while_editing() {
        let mut view = view();
        assert_eq!(view.blur(), None);
        view.begin_edit(ItemId(1)).expect("known item");
        view.set_draft("Blurred").expect("editing");
        assert!(matches!(view.blur(), Some(EditOutcome::Renamed { .. })));
        assert_eq!(view.find(ItemId(1)).expect("item").name(), "Blurred");
    }

    #[test]
    fn unknown_item_cannot_be_edited() {
        let mut view = view();
        let err = view.begin_edit(ItemId(99)).expect_err("unknown id");
        assert!(matches!(err, TimelineError::ItemNotFound(ItemId(99))));
        assert_eq!(view.edit(), &EditState::Idle);
    }

    #[test]
    fn draft_ops_require_an_open_editor() {
        let mut view = view();
        assert!(matches!(
            view.set_draft("x"),
            Err(TimelineError::NotEditing)
        ));
        assert!(matches!(view.commit_edit(), Err(TimelineError::NotEditing)));
    }

    #[test]
    fn renaming_to_same_name_leaves_lanes_identical() {
        let mut view = view();
        let before = view.lanes().to_vec();
        let outcome = view.rename(ItemId(2), "Test Task 2").expect("rename");
        assert_eq!(outcome, EditOutcome::Unchanged { id: ItemId(2) });
        assert_eq!(view.lanes(), before.as_slice());
    }

    #[test]
    fn rename_with_blank_name_closes_editor() {
        let mut view = view();
        let outcome = view.rename(ItemId(1), "").expect("rename");
        assert_eq!(outcome, EditOutcome::Rejected { id: ItemId(1) });
        assert_eq!(view.edit(), &EditState::Idle);
    }

    #[test]
    fn replace_items_recomputes_lanes_and_drops_stale_edit() {
        let mut view = view();
        view.begin_edit(ItemId(2)).expect("known item");
        view.replace_items(vec![
            item(1, "2021-01-01", "2021-01-10", "A"),
            item(3, "2021-01-05", "2021-01-15", "B"),
        ]);
        assert_eq!(view.lanes().len(), 2);
        assert_eq!(view.edit(), &EditState::Idle);
    }

    #[test]
    fn replace_items_keeps_edit_of_surviving_item() {
        let mut view = view();
        view.begin_edit(ItemId(1)).expect("known item");
        view.replace_items(vec![item(1, "2021-01-01", "2021-01-10", "A")]);
        assert!(view.edit().is_editing(ItemId(1)));
    }
}
