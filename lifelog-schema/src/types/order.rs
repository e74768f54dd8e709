//! Reorder request and outcome types shared by categories and fields

use serde::{Deserialize, Serialize};

/// A new `sort_order` for one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortItem<I> {
    pub id: I,
    pub sort_order: i64,
}

impl<I> SortItem<I> {
    pub fn new(id: impl Into<I>, sort_order: i64) -> Self {
        Self {
            id: id.into(),
            sort_order,
        }
    }
}

/// What a reorder actually changed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReorderOutcome<I> {
    /// Number of records written
    pub applied: usize,
    /// Ids that matched no record
    pub skipped: Vec<I>,
}

impl<I> Default for ReorderOutcome<I> {
    fn default() -> Self {
        Self {
            applied: 0,
            skipped: Vec::new(),
        }
    }
}
