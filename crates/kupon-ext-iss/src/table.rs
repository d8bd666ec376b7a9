//! Positional ISS tables.
//!
//! ISS serves every table as
//!
//! ```text
//! { "<table>": { "columns": ["a", "b", ...], "data": [[1, "x", ...], ...] } }
//! ```
//!
//! Rows are untyped tuples. A [`TableSchema`] names the positions a record
//! needs and the JSON type each must have; [`decode_rows`] checks every row
//! against it once, so the record mappers only ever see well-typed cells.

use serde_json::Value;

use kupon_traits::error::{SourceError, SourceResult};

/// Expected JSON type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnKind {
    /// String
    Text,
    /// String or null
    OptText,
    /// Any number
    Number,
    /// Any number or null
    OptNumber,
    /// Whole number
    Integer,
}

impl ColumnKind {
    fn expected(self) -> &'static str {
        match self {
            ColumnKind::Text => "string",
            ColumnKind::OptText => "string or null",
            ColumnKind::Number => "number",
            ColumnKind::OptNumber => "number or null",
            ColumnKind::Integer => "integer",
        }
    }

    fn accept(self, value: &Value) -> Option<Cell> {
        match (self, value) {
            (ColumnKind::OptText | ColumnKind::OptNumber, Value::Null) => Some(Cell::Null),
            (ColumnKind::Text | ColumnKind::OptText, Value::String(s)) => Some(Cell::Text(s.clone())),
            (ColumnKind::Number | ColumnKind::OptNumber, Value::Number(n)) => {
                n.as_f64().map(Cell::Number)
            }
            (ColumnKind::Integer, Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64))
                .map(Cell::Integer),
            _ => None,
        }
    }
}

/// One named position of a table.
#[derive(Debug, Clone, Copy)]
pub struct Column {
    /// Position in the row
    pub index: usize,
    /// ISS column name
    pub name: &'static str,
    /// Expected type
    pub kind: ColumnKind,
}

impl Column {
    /// Creates a column.
    pub const fn new(index: usize, name: &'static str, kind: ColumnKind) -> Self {
        Self { index, name, kind }
    }
}

/// The positions a record is read from.
#[derive(Debug, Clone, Copy)]
pub struct TableSchema {
    /// Table key in the document
    pub table: &'static str,
    /// Columns read, in any order
    pub columns: &'static [Column],
}

impl TableSchema {
    fn width(&self) -> usize {
        self.columns.iter().map(|c| c.index + 1).max().unwrap_or(0)
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Cell {
    Text(String),
    Number(f64),
    Integer(i64),
    Null,
}

/// A validated row; accessors look cells up by column name.
#[derive(Debug, Clone)]
pub struct Row {
    schema: TableSchema,
    cells: Vec<Cell>,
}

impl Row {
    fn cell(&self, name: &str) -> Option<&Cell> {
        self.schema
            .columns
            .iter()
            .position(|c| c.name == name)
            .and_then(|slot| self.cells.get(slot))
    }

    /// A `Text` column.
    pub fn text(&self, name: &str) -> String {
        self.opt_text(name).unwrap_or_default()
    }

    /// An `OptText` column.
    pub fn opt_text(&self, name: &str) -> Option<String> {
        match self.cell(name) {
            Some(Cell::Text(s)) => Some(s.clone()),
            _ => None,
        }
    }

    /// A `Number` column.
    pub fn number(&self, name: &str) -> f64 {
        self.opt_number(name).unwrap_or_default()
    }

    /// An `OptNumber` column.
    pub fn opt_number(&self, name: &str) -> Option<f64> {
        match self.cell(name) {
            Some(Cell::Number(n)) => Some(*n),
            Some(Cell::Integer(n)) => Some(*n as f64),
            _ => None,
        }
    }

    /// An `Integer` column.
    pub fn integer(&self, name: &str) -> i64 {
        match self.cell(name) {
            Some(Cell::Integer(n)) => *n,
            _ => 0,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Decodes every row of `schema.table` in `document`, in served order.
///
/// # Errors
///
/// - `Decode` if the table or its `data` array is missing
/// - `MalformedSchedule` if a row is not an array or is too short
/// - `SchemaMismatch` if a cell has the wrong JSON type
pub fn decode_rows(document: &Value, schema: TableSchema) -> SourceResult<Vec<Row>> {
    let data = document
        .get(schema.table)
        .and_then(|table| table.get("data"))
        .and_then(Value::as_array)
        .ok_or_else(|| SourceError::Decode(format!("no `{}.data` array in response", schema.table)))?;

    let width = schema.width();
    data.iter()
        .enumerate()
        .map(|(row_no, raw)| {
            let values = raw.as_array().ok_or_else(|| {
                SourceError::malformed(format!("{} row {row_no} is not an array", schema.table))
            })?;
            if values.len() < width {
                return Err(SourceError::malformed(format!(
                    "{} row {row_no} has {} columns, expected at least {width}",
                    schema.table,
                    values.len()
                )));
            }

            let cells = schema
                .columns
                .iter()
                .map(|column| {
                    let value = &values[column.index];
                    column.kind.accept(value).ok_or_else(|| SourceError::SchemaMismatch {
                        table: schema.table.to_string(),
                        row: row_no,
                        index: column.index,
                        column: column.name.to_string(),
                        expected: column.kind.expected().to_string(),
                        found: json_kind(value).to_string(),
                    })
                })
                .collect::<SourceResult<Vec<_>>>()?;

            Ok(Row { schema, cells })
        })
        .collect()
}
