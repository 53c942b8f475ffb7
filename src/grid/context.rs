//! # Grid Context
//!
//! The grid-side state key handlers act on: what is selected, how columns
//! have been rearranged, and the copy operation waiting to be picked up by
//! the copy handler.

use std::collections::HashMap;
use std::sync::Arc;

use super::moved_columns::MovedColumn;
use super::range::GridRange;
use crate::copy::{CopyOperation, HeaderCopy, RangesCopy};

pub const MULTIPLE_RANGES_ERROR: &str = "Multiple selections with different columns cannot be copied.";

#[derive(Debug, Clone, Default)]
pub struct GridContext {
    /// Selection in visible coordinates
    pub selected_ranges: Vec<GridRange>,
    pub moved_columns: Vec<MovedColumn>,
    /// Width overrides keyed by model column
    pub user_column_widths: HashMap<usize, u32>,
    /// Copy display-formatted values instead of raw values
    pub format_values: bool,
    pending_copy: Option<Arc<CopyOperation>>,
}

impl GridContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn select(&mut self, ranges: Vec<GridRange>) {
        self.selected_ranges = ranges;
    }

    pub fn has_selection(&self) -> bool {
        !self.selected_ranges.is_empty()
    }

    /// Queue a copy of the current selection
    ///
    /// Returns `false` when nothing is selected. A selection whose ranges do
    /// not share one column span is still queued, carrying an error, so the
    /// copy UI can report it.
    pub fn copy_selection(&mut self, include_headers: bool) -> bool {
        let Some(first) = self.selected_ranges.first() else {
            return false;
        };

        let error = if self
            .selected_ranges
            .iter()
            .all(|range| range.same_columns(first))
        {
            None
        } else {
            tracing::debug!(
                "Rejecting copy of {} ranges with different columns",
                self.selected_ranges.len()
            );
            Some(MULTIPLE_RANGES_ERROR.to_string())
        };

        self.queue(CopyOperation::Ranges(RangesCopy {
            moved_columns: self.moved_columns.clone(),
            ranges: self.selected_ranges.clone(),
            include_headers,
            format_values: self.format_values,
            user_column_widths: self.user_column_widths.clone(),
            error,
        }));
        true
    }

    /// Queue a copy of one header cell at a visible column
    pub fn copy_header(&mut self, column_index: usize, column_depth: usize) {
        self.queue(CopyOperation::Header(HeaderCopy {
            moved_columns: self.moved_columns.clone(),
            column_index,
            column_depth,
            error: None,
        }));
    }

    /// Take the queued copy operation, if any
    pub fn take_copy_operation(&mut self) -> Option<Arc<CopyOperation>> {
        self.pending_copy.take()
    }

    fn queue(&mut self, operation: CopyOperation) {
        if self.pending_copy.is_some() {
            tracing::debug!("Replacing queued copy operation");
        }
        self.pending_copy = Some(Arc::new(operation));
    }
}
