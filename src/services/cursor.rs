use crate::config::CursorMode;
use crate::error::{CameraRollError, Result};
use media_store::{AssetRecord, Predicate};
use std::fmt;
use std::str::FromStr;

/// Resume point in `modifiedAt DESC, id DESC` order.
///
/// Encoded either as `"<modifiedAt>"` or as `"<modifiedAt>:<id>"`. The bare timestamp
/// resumes strictly below that timestamp; the composite form resumes strictly after
/// the exact row, so rows sharing a timestamp are neither skipped nor repeated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageCursor {
    Timestamp(i64),
    Position { modified_at: i64, id: i64 },
}

impl PageCursor {
    /// Parses the `after` parameter; an empty string means "from the start"
    pub fn parse_after(after: Option<&str>) -> Result<Option<Self>> {
        match after.map(str::trim) {
            None | Some("") => Ok(None),
            Some(s) => s.parse().map(Some),
        }
    }

    /// Cursor pointing at `record`, encoded per `mode`
    pub fn for_record(record: &AssetRecord, mode: CursorMode) -> Self {
        Self::at(record.modified_at, record.id, mode)
    }

    /// Cursor pointing at the row `(modified_at, id)`, encoded per `mode`
    pub fn at(modified_at: i64, id: i64, mode: CursorMode) -> Self {
        match mode {
            CursorMode::Timestamp => PageCursor::Timestamp(modified_at),
            CursorMode::Composite => PageCursor::Position { modified_at, id },
        }
    }

    /// Store predicate selecting everything after this cursor
    pub fn predicate(self) -> Predicate {
        match self {
            PageCursor::Timestamp(t) => Predicate::ModifiedBefore(t),
            PageCursor::Position { modified_at, id } => {
                Predicate::PositionBefore { modified_at, id }
            }
        }
    }
}

impl fmt::Display for PageCursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PageCursor::Timestamp(t) => write!(f, "{}", t),
            PageCursor::Position { modified_at, id } => write!(f, "{}:{}", modified_at, id),
        }
    }
}

impl FromStr for PageCursor {
    type Err = CameraRollError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CameraRollError::InvalidArgument(format!("Invalid cursor: {:?}", s));

        match s.split_once(':') {
            None => s.parse().map(PageCursor::Timestamp).map_err(|_| invalid()),
            Some((modified_at, id)) => Ok(PageCursor::Position {
                modified_at: modified_at.parse().map_err(|_| invalid())?,
                id: id.parse().map_err(|_| invalid())?,
            }),
        }
    }
}
