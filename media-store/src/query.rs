use crate::models::MediaKind;

/// A single restriction on the records a query returns
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// `media kind IN (..)`
    MediaKindIn(Vec<MediaKind>),
    /// `modified_at < t`
    ModifiedBefore(i64),
    /// `modified_at < t OR (modified_at = t AND id < id)`, strictly after a position
    /// in `modified_at DESC, id DESC` order
    PositionBefore { modified_at: i64, id: i64 },
    /// `bucket_id = ?`
    BucketEquals(String),
    /// `mime_type IN (..)`
    MimeTypeIn(Vec<String>),
}

/// Ordering applied to the result set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// `modified_at DESC`, ties broken by `id DESC`
    #[default]
    ModifiedDescending,
}

/// Everything a record store needs to produce a cursor
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecordQuery {
    /// All predicates must hold (AND semantics)
    pub predicates: Vec<Predicate>,
    pub sort: SortOrder,
    /// Maximum number of rows; `None` returns every matching row
    pub limit: Option<usize>,
    /// Whether the width/height columns are read
    pub include_dimensions: bool,
}

impl RecordQuery {
    pub fn new() -> Self {
        Self {
            include_dimensions: true,
            ..Self::default()
        }
    }

    pub fn with(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn include_dimensions(mut self, include: bool) -> Self {
        self.include_dimensions = include;
        self
    }

    /// Same query, continuing strictly after the given position and capped at `limit` rows
    pub fn continue_after(&self, modified_at: i64, id: i64, limit: usize) -> Self {
        let mut next = self.clone();
        next.predicates.retain(|p| {
            !matches!(p, Predicate::ModifiedBefore(_) | Predicate::PositionBefore { .. })
        });
        next.predicates.push(Predicate::PositionBefore { modified_at, id });
        next.limit = Some(limit);
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_continue_after_replaces_bound() {
        let query = RecordQuery::new()
            .with(Predicate::MediaKindIn(vec![MediaKind::Photo]))
            .with(Predicate::ModifiedBefore(100))
            .limit(5);

        let next = query.continue_after(40, 7, 3);
        assert_eq!(next.limit, Some(3));
        assert_eq!(
            next.predicates,
            vec![
                Predicate::MediaKindIn(vec![MediaKind::Photo]),
                Predicate::PositionBefore {
                    modified_at: 40,
                    id: 7
                },
            ]
        );
    }
}
