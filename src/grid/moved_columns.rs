//! # Moved Columns
//!
//! Columns can be reordered in the rendered grid without touching the
//! model. Each reorder is recorded as a [`MovedColumn`]; replaying them in
//! reverse maps a visible index back to the model index.

use serde::{Deserialize, Serialize};

use super::range::GridRange;

/// A single column move, in the order it was applied
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovedColumn {
    pub from: usize,
    pub to: usize,
}

impl MovedColumn {
    pub fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }
}

/// Map a visible column index to its model index
pub fn resolve_model_index(visible_index: usize, moved_columns: &[MovedColumn]) -> usize {
    let mut index = visible_index;
    for moved in moved_columns.iter().rev() {
        if index == moved.to {
            index = moved.from;
        } else if moved.from < moved.to && index >= moved.from && index < moved.to {
            index += 1;
        } else if moved.to < moved.from && index > moved.to && index <= moved.from {
            index -= 1;
        }
    }
    index
}

/// Map visible ranges to model ranges
///
/// Columns that are adjacent on screen need not be adjacent in the model,
/// so one visible range can become several model ranges.
pub fn resolve_model_ranges(ranges: &[GridRange], moved_columns: &[MovedColumn]) -> Vec<GridRange> {
    if moved_columns.is_empty() {
        return ranges.to_vec();
    }

    let mut result = Vec::new();
    for range in ranges {
        let mut model_columns: Vec<usize> = (range.start_column..=range.end_column)
            .map(|column| resolve_model_index(column, moved_columns))
            .collect();
        model_columns.sort_unstable();

        let mut span: Option<(usize, usize)> = None;
        for column in model_columns {
            span = match span {
                Some((start, end)) if column == end + 1 => Some((start, column)),
                Some((start, end)) => {
                    result.push(range.with_columns(start, end));
                    Some((column, column))
                }
                None => Some((column, column)),
            };
        }
        if let Some((start, end)) = span {
            result.push(range.with_columns(start, end));
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_model_index_should_be_identity_without_moves() {
        for i in 0..5 {
            assert_eq!(resolve_model_index(i, &[]), i);
        }
    }

    #[test]
    fn resolve_model_index_should_follow_forward_move() {
        // [A, B, C] with A moved to the end renders as [B, C, A]
        let moved = [MovedColumn::new(0, 2)];
        assert_eq!(resolve_model_index(0, &moved), 1);
        assert_eq!(resolve_model_index(1, &moved), 2);
        assert_eq!(resolve_model_index(2, &moved), 0);
        assert_eq!(resolve_model_index(3, &moved), 3);
    }

    #[test]
    fn resolve_model_index_should_follow_backward_move() {
        // [A, B, C] with C moved to the front renders as [C, A, B]
        let moved = [MovedColumn::new(2, 0)];
        assert_eq!(resolve_model_index(0, &moved), 2);
        assert_eq!(resolve_model_index(1, &moved), 0);
        assert_eq!(resolve_model_index(2, &moved), 1);
    }

    #[test]
    fn resolve_model_index_should_replay_moves_in_reverse() {
        // [A, B, C, D] -> move 0 to 3 -> [B, C, D, A] -> move 3 to 1 -> [B, A, C, D]
        let moved = [MovedColumn::new(0, 3), MovedColumn::new(3, 1)];
        let visible: Vec<usize> = (0..4).map(|i| resolve_model_index(i, &moved)).collect();
        assert_eq!(visible, vec![1, 0, 2, 3]);
    }

    #[test]
    fn resolve_model_ranges_should_split_non_contiguous_columns() {
        // [B, C, A, D]: visible 1..=2 is C and A, model columns 2 and 0
        let moved = [MovedColumn::new(0, 2)];
        let ranges = [GridRange::new(1, 0, 2, 4)];
        let result = resolve_model_ranges(&ranges, &moved);
        assert_eq!(
            result,
            vec![GridRange::new(0, 0, 0, 4), GridRange::new(2, 0, 2, 4)]
        );
    }

    #[test]
    fn resolve_model_ranges_should_merge_contiguous_columns() {
        let moved = [MovedColumn::new(0, 2)];
        let ranges = [GridRange::new(0, 3, 2, 3)];
        assert_eq!(
            resolve_model_ranges(&ranges, &moved),
            vec![GridRange::new(0, 3, 2, 3)]
        );
    }
}
