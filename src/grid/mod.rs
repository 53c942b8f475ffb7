//! # Grid Module
//!
//! Grid coordinates, column reordering, the model abstraction and the
//! selection context key handlers operate on.

pub mod context;
pub mod model;
pub mod moved_columns;
pub mod range;

pub use context::{GridContext, MULTIPLE_RANGES_ERROR};
pub use model::{
    display_formatter, plain_formatter, CellValue, Column, ColumnGroup, GridError, GridModel,
    MemoryGridModel, ValueFormatter,
};
pub use moved_columns::{resolve_model_index, resolve_model_ranges, MovedColumn};
pub use range::{row_count, subtract_columns, GridRange};
