use std::fmt;

use chrono::NaiveDate;

use crate::model::item::ItemId;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    InvalidDate,
    EndBeforeStart,
    DuplicateId,
    MalformedInput,
    ItemNotFound,
    NotEditing,
    InputReadFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::InvalidDate => "E1001",
            Self::EndBeforeStart => "E1002",
            Self::DuplicateId => "E1003",
            Self::MalformedInput => "E1004",
            Self::ItemNotFound => "E2001",
            Self::NotEditing => "E2002",
            Self::InputReadFailed => "E5001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::InvalidDate => "Invalid calendar date",
            Self::EndBeforeStart => "Item ends before it starts",
            Self::DuplicateId => "Duplicate item ID",
            Self::MalformedInput => "Malformed item input",
            Self::ItemNotFound => "Item not found",
            Self::NotEditing => "No edit in progress",
            Self::InputReadFailed => "Input read failed",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::InvalidDate => Some("Use real calendar dates in YYYY-MM-DD form."),
            Self::EndBeforeStart => Some("Swap the dates or move the end on or after the start."),
            Self::DuplicateId => Some("Give every item a unique integer id."),
            Self::MalformedInput => Some(
                "Provide a JSON array of {\"id\", \"start\", \"end\", \"name\"} objects.",
            ),
            Self::ItemNotFound => Some("Run `tl lanes` to list the known item ids."),
            Self::NotEditing => None,
            Self::InputReadFailed => Some("Check the path and read permissions."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Errors raised at the ingestion boundary and by the view state.
///
/// Lane assignment itself is infallible; every variant here is produced
/// before items reach it or by an edit command aimed at the wrong item.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error("item {id}: {field} date '{value}' is not a valid YYYY-MM-DD calendar date")]
    InvalidDate {
        id: ItemId,
        field: &'static str,
        value: String,
    },

    #[error("item {id}: end {end} is before start {start}")]
    EndBeforeStart {
        id: ItemId,
        start: NaiveDate,
        end: NaiveDate,
    },

    #[error("item id {0} appears more than once")]
    DuplicateId(ItemId),

    #[error("item {0} not found")]
    ItemNotFound(ItemId),

    #[error("no edit in progress")]
    NotEditing,

    #[error("malformed item input: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl TimelineError {
    /// The machine-readable code for this error.
    #[must_use]
    pub const fn error_code(&self) -> ErrorCode {
        match self {
            Self::InvalidDate { .. } => ErrorCode::InvalidDate,
            Self::EndBeforeStart { .. } => ErrorCode::EndBeforeStart,
            Self::DuplicateId(_) => ErrorCode::DuplicateId,
            Self::ItemNotFound(_) => ErrorCode::ItemNotFound,
            Self::NotEditing => ErrorCode::NotEditing,
            Self::Json(_) => ErrorCode::MalformedInput,
            Self::Io { .. } => ErrorCode::InputReadFailed,
        }
    }

    /// Remediation text for terminal and JSON error output.
    #[must_use]
    pub fn suggestion(&self) -> String {
        let code = self.error_code();
        code.hint().unwrap_or(code.message()).to_string()
    }
}
