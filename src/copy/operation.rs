//! # Copy Operations
//!
//! Immutable descriptions of what a copy cycle should place on the
//! clipboard. A handler compares operations by `Arc` identity: handing it
//! a new `Arc` starts a new cycle even if the contents are equal.

use std::collections::HashMap;

use crate::grid::{row_count, GridRange, MovedColumn};

/// Copy a set of cell ranges
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RangesCopy {
    pub moved_columns: Vec<MovedColumn>,
    /// Ranges in visible coordinates
    pub ranges: Vec<GridRange>,
    pub include_headers: bool,
    pub format_values: bool,
    /// Width overrides keyed by model column; a width of 0 hides the column
    pub user_column_widths: HashMap<usize, u32>,
    pub error: Option<String>,
}

impl RangesCopy {
    /// Model columns hidden by a zero width override, ascending
    pub fn hidden_columns(&self) -> Vec<usize> {
        let mut hidden: Vec<usize> = self
            .user_column_widths
            .iter()
            .filter(|(_, &width)| width == 0)
            .map(|(&column, _)| column)
            .collect();
        hidden.sort_unstable();
        hidden
    }
}

/// Copy the text of one column header cell
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HeaderCopy {
    pub moved_columns: Vec<MovedColumn>,
    /// Visible column index
    pub column_index: usize,
    pub column_depth: usize,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CopyOperation {
    Ranges(RangesCopy),
    Header(HeaderCopy),
}

impl CopyOperation {
    /// Error set by the caller before the operation reached the handler
    pub fn error(&self) -> Option<&str> {
        match self {
            CopyOperation::Ranges(op) => op.error.as_deref(),
            CopyOperation::Header(op) => op.error.as_deref(),
        }
    }

    pub fn moved_columns(&self) -> &[MovedColumn] {
        match self {
            CopyOperation::Ranges(op) => &op.moved_columns,
            CopyOperation::Header(op) => &op.moved_columns,
        }
    }

    /// Rows this operation copies; a header counts as one
    pub fn row_count(&self) -> usize {
        match self {
            CopyOperation::Ranges(op) => row_count(&op.ranges),
            CopyOperation::Header(_) => 1,
        }
    }
}

impl From<RangesCopy> for CopyOperation {
    fn from(op: RangesCopy) -> Self {
        CopyOperation::Ranges(op)
    }
}

impl From<HeaderCopy> for CopyOperation {
    fn from(op: HeaderCopy) -> Self {
        CopyOperation::Header(op)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_columns_should_only_include_zero_widths() {
        let op = RangesCopy {
            user_column_widths: HashMap::from([(4, 0), (1, 120), (2, 0)]),
            ..Default::default()
        };
        assert_eq!(op.hidden_columns(), vec![2, 4]);
    }

    #[test]
    fn row_count_should_count_header_as_one_row() {
        let header: CopyOperation = HeaderCopy::default().into();
        assert_eq!(header.row_count(), 1);

        let ranges: CopyOperation = RangesCopy {
            ranges: vec![GridRange::new(0, 0, 3, 9), GridRange::new(0, 20, 3, 24)],
            ..Default::default()
        }
        .into();
        assert_eq!(ranges.row_count(), 15);
    }

    #[test]
    fn error_should_come_from_either_variant() {
        let op: CopyOperation = HeaderCopy {
            error: Some("nope".into()),
            ..Default::default()
        }
        .into();
        assert_eq!(op.error(), Some("nope"));
        assert_eq!(CopyOperation::from(RangesCopy::default()).error(), None);
    }
}
