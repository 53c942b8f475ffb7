//! # Grid Ranges
//!
//! Rectangular, inclusive cell ranges and the set operations the copy
//! workflow needs on them.

use serde::{Deserialize, Serialize};

/// An inclusive rectangle of cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridRange {
    pub start_column: usize,
    pub start_row: usize,
    pub end_column: usize,
    pub end_row: usize,
}

impl GridRange {
    /// Create a range, normalizing so start <= end on both axes
    pub fn new(start_column: usize, start_row: usize, end_column: usize, end_row: usize) -> Self {
        Self {
            start_column: start_column.min(end_column),
            start_row: start_row.min(end_row),
            end_column: start_column.max(end_column),
            end_row: start_row.max(end_row),
        }
    }

    /// A range covering a single cell
    pub fn cell(column: usize, row: usize) -> Self {
        Self::new(column, row, column, row)
    }

    /// Number of rows covered by this range, saturating at `usize::MAX`
    pub fn row_count(&self) -> usize {
        (self.end_row - self.start_row).saturating_add(1)
    }

    /// Number of columns covered by this range, saturating at `usize::MAX`
    pub fn column_count(&self) -> usize {
        (self.end_column - self.start_column).saturating_add(1)
    }

    pub fn contains_column(&self, column: usize) -> bool {
        (self.start_column..=self.end_column).contains(&column)
    }

    /// Whether both ranges cover exactly the same columns
    pub fn same_columns(&self, other: &GridRange) -> bool {
        self.start_column == other.start_column && self.end_column == other.end_column
    }

    /// Same rows, different column span
    pub fn with_columns(&self, start_column: usize, end_column: usize) -> Self {
        Self::new(start_column, self.start_row, end_column, self.end_row)
    }
}

/// Total row count across all ranges
pub fn row_count(ranges: &[GridRange]) -> usize {
    ranges
        .iter()
        .map(GridRange::row_count)
        .fold(0, usize::saturating_add)
}

/// Remove whole columns from a set of ranges
///
/// Each range is split around the removed columns; ranges left with no
/// columns disappear.
pub fn subtract_columns(ranges: &[GridRange], columns: &[usize]) -> Vec<GridRange> {
    if columns.is_empty() {
        return ranges.to_vec();
    }

    let mut result = Vec::with_capacity(ranges.len());
    for range in ranges {
        let mut span_start: Option<usize> = None;
        for column in range.start_column..=range.end_column {
            let removed = columns.contains(&column);
            match (span_start, removed) {
                (None, false) => span_start = Some(column),
                (Some(start), true) => {
                    result.push(range.with_columns(start, column - 1));
                    span_start = None;
                }
                _ => {}
            }
        }
        if let Some(start) = span_start {
            result.push(range.with_columns(start, range.end_column));
        }
    }
    result
}
