//! # Grid Model
//!
//! The data-source side of the grid. The copy workflow only needs three
//! capabilities from it: header text for a column, a text snapshot of a set
//! of ranges, and display formatting of individual values.

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;

use super::range::GridRange;
use crate::format::{format_decimal, format_integer};

/// Column types rendered with fixed decimals by the display formatter
const DECIMAL_COLUMN_TYPES: [&str; 4] = ["double", "float", "decimal", "bigdecimal"];

/// Decimals shown for floating point columns
const DISPLAY_DECIMALS: usize = 4;

/// Errors raised by grid models
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("Row {row} is outside the model ({row_count} rows)")]
    RowOutOfBounds { row: usize, row_count: usize },
    #[error("Column {column} is outside the model ({column_count} columns)")]
    ColumnOutOfBounds { column: usize, column_count: usize },
    #[error("Row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        found: usize,
        expected: usize,
    },
}

/// A single cell value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    Null,
    Bool(bool),
    Integer(i64),
    Float(f64),
    Text(String),
}

/// Plain string conversion, used when values are copied unformatted
impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Null => Ok(()),
            CellValue::Bool(value) => write!(f, "{value}"),
            CellValue::Integer(value) => write!(f, "{value}"),
            CellValue::Float(value) => write!(f, "{value}"),
            CellValue::Text(value) => f.write_str(value),
        }
    }
}

/// Column metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type", default = "default_column_type")]
    pub column_type: String,
}

fn default_column_type() -> String {
    "string".to_string()
}

impl Column {
    pub fn new(name: impl Into<String>, column_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
        }
    }
}

/// Converts a cell value to the text placed on the clipboard
pub type ValueFormatter = Arc<dyn Fn(&CellValue, &Column) -> String + Send + Sync>;

/// Formatter that uses the plain `Display` conversion of each value
pub fn plain_formatter() -> ValueFormatter {
    Arc::new(|value: &CellValue, _column: &Column| value.to_string())
}

/// Formatter that defers to the model's display formatting
pub fn display_formatter(model: Arc<dyn GridModel>) -> ValueFormatter {
    Arc::new(move |value: &CellValue, column: &Column| {
        model.display_string(value, &column.column_type, &column.name)
    })
}

/// The data source behind a grid
#[async_trait]
pub trait GridModel: Send + Sync {
    /// Model columns, in model order
    fn columns(&self) -> &[Column];

    fn row_count(&self) -> usize;

    /// Header text at a model column and header depth
    ///
    /// Depth 0 is the column name; deeper levels are column groups. Returns
    /// `None` when nothing is displayed at that position.
    fn text_for_column_header(&self, column: usize, depth: usize) -> Option<String>;

    /// Format a value the way the grid displays it
    fn display_string(&self, value: &CellValue, column_type: &str, column_name: &str) -> String;

    /// Serialize the given model ranges to text
    async fn text_snapshot(
        &self,
        ranges: Vec<GridRange>,
        include_headers: bool,
        formatter: ValueFormatter,
    ) -> Result<String>;
}

/// A named group spanning model columns, displayed above the column names
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnGroup {
    pub name: String,
    pub depth: usize,
    pub start_column: usize,
    pub end_column: usize,
}

/// In-memory grid model
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryGridModel {
    columns: Vec<Column>,
    rows: Vec<Vec<CellValue>>,
    #[serde(default)]
    column_groups: Vec<ColumnGroup>,
}

impl MemoryGridModel {
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<CellValue>>) -> Result<Self> {
        let model = Self {
            columns,
            rows,
            column_groups: Vec::new(),
        };
        model.validate()?;
        Ok(model)
    }

    pub fn with_column_groups(mut self, groups: Vec<ColumnGroup>) -> Self {
        self.column_groups = groups;
        self
    }

    /// Parse a model from its JSON representation
    pub fn from_json(json: &str) -> Result<Self> {
        let model: Self = serde_json::from_str(json)?;
        model.validate()?;
        tracing::debug!(
            "Loaded model with {} columns and {} rows",
            model.columns.len(),
            model.rows.len()
        );
        Ok(model)
    }

    /// Load a model from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        Self::from_json(&json)
    }

    fn validate(&self) -> Result<(), GridError> {
        let expected = self.columns.len();
        for (row, cells) in self.rows.iter().enumerate() {
            if cells.len() != expected {
                return Err(GridError::RaggedRow {
                    row,
                    found: cells.len(),
                    expected,
                });
            }
        }
        Ok(())
    }

    fn check_bounds(&self, range: &GridRange) -> Result<(), GridError> {
        if range.end_row >= self.rows.len() {
            return Err(GridError::RowOutOfBounds {
                row: range.end_row,
                row_count: self.rows.len(),
            });
        }
        if range.end_column >= self.columns.len() {
            return Err(GridError::ColumnOutOfBounds {
                column: range.end_column,
                column_count: self.columns.len(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl GridModel for MemoryGridModel {
    fn columns(&self) -> &[Column] {
        &self.columns
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn text_for_column_header(&self, column: usize, depth: usize) -> Option<String> {
        if depth == 0 {
            return self.columns.get(column).map(|c| c.name.clone());
        }
        self.column_groups
            .iter()
            .find(|group| {
                group.depth == depth && (group.start_column..=group.end_column).contains(&column)
            })
            .map(|group| group.name.clone())
    }

    fn display_string(&self, value: &CellValue, column_type: &str, _column_name: &str) -> String {
        let is_decimal_column = DECIMAL_COLUMN_TYPES
            .iter()
            .any(|t| t.eq_ignore_ascii_case(column_type));
        match value {
            CellValue::Null => String::new(),
            CellValue::Bool(value) => value.to_string(),
            CellValue::Integer(value) if is_decimal_column => {
                format_decimal(*value as f64, DISPLAY_DECIMALS)
            }
            CellValue::Integer(value) => format_integer(*value),
            CellValue::Float(value) => format_decimal(*value, DISPLAY_DECIMALS),
            CellValue::Text(value) => value.clone(),
        }
    }

    async fn text_snapshot(
        &self,
        ranges: Vec<GridRange>,
        include_headers: bool,
        formatter: ValueFormatter,
    ) -> Result<String> {
        for range in &ranges {
            self.check_bounds(range)?;
        }

        let columns: BTreeSet<usize> = ranges
            .iter()
            .flat_map(|r| r.start_column..=r.end_column)
            .collect();
        let rows: BTreeSet<usize> = ranges
            .iter()
            .flat_map(|r| r.start_row..=r.end_row)
            .collect();

        let mut lines = Vec::with_capacity(rows.len() + 1);
        if include_headers {
            let header: Vec<&str> = columns
                .iter()
                .map(|&c| self.columns[c].name.as_str())
                .collect();
            lines.push(header.join("\t"));
        }
        for &row in &rows {
            let cells: Vec<String> = columns
                .iter()
                .map(|&c| formatter(&self.rows[row][c], &self.columns[c]))
                .collect();
            lines.push(cells.join("\t"));
        }

        tracing::debug!(
            "Snapshot of {} rows x {} columns produced",
            rows.len(),
            columns.len()
        );
        Ok(lines.join("\n"))
    }
}
