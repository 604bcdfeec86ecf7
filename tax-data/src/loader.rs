//! CSV loader for worksheet inputs.
//!
//! ## CSV Format
//!
//! One row per cell. Column order does **not** matter (headers are matched
//! by name); whitespace around values is ignored and lines starting with `#`
//! are comments.
//!
//! | Column  | Required | Notes |
//! |---------|----------|-------|
//! | `cell`  | yes      | Coordinate such as `C17`; letter case is ignored |
//! | `value` | yes      | Amount (`1,500,000`, `1.5e6`) or `Yes`/`No` for `D6` and `C142`; empty is zero |
//!
//! ### Example
//!
//! ```csv
//! cell,value
//! C4,"100,000,000"
//! D6,Yes
//! E147,1000000
//! ```
//!
//! Only input and flag cells may be assigned. Unlike the engine, which
//! coerces bad entries to zero, the loader rejects the whole file on the
//! first bad row.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tax_core::cells::layout::{self, CellKind};
use tax_core::utils::{parse_amount, try_parse_amount};
use tax_core::{CellId, CellValue, TaxEngine, YesNo};
use tracing::debug;

// ---------------------------------------------------------------------------
// Serde-compatible row that mirrors the CSV layout exactly
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct CsvRow {
    cell: String,
    value: String,
}

// ---------------------------------------------------------------------------
// Public types
// ---------------------------------------------------------------------------

/// A validated write of a raw entry into an input or flag cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellAssignment {
    pub cell: CellId,
    pub value: String,
}

impl CellAssignment {
    /// The typed value this assignment writes.
    pub fn cell_value(&self) -> CellValue {
        match layout::kind(self.cell) {
            CellKind::Flag => YesNo::parse(&self.value)
                .map(CellValue::from)
                .unwrap_or_default(),
            _ => CellValue::from(parse_amount(&self.value)),
        }
    }
}

/// Errors that can occur while loading CSV data.
#[derive(Debug, thiserror::Error)]
pub enum CsvLoadError {
    /// The underlying CSV deserialisation failed (bad structure, missing
    /// column, etc.).
    #[error("CSV parse error: {0}")]
    Parse(#[from] csv::Error),

    /// The `cell` column does not name a worksheet coordinate. `row` is the
    /// 1-based data row (header = row 0).
    #[error("invalid cell '{cell}' on row {row}")]
    InvalidCell { cell: String, row: usize },

    /// The cell exists but is computed by the engine or read by no formula.
    #[error("cell {cell} on row {row} is not an input and cannot be assigned")]
    DerivedCell { cell: CellId, row: usize },

    /// The value is not an amount, or not `Yes`/`No` for a flag cell.
    #[error("invalid value '{value}' for cell {cell} on row {row}")]
    InvalidValue {
        cell: CellId,
        value: String,
        row: usize,
    },

    /// The file could not be read.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

// ---------------------------------------------------------------------------
// Core loader
// ---------------------------------------------------------------------------

/// Convert a single CSV row into a validated assignment.
///
/// `row_number` is 1-based (for error messages).
fn convert_row(
    row: CsvRow,
    row_number: usize,
) -> Result<CellAssignment, CsvLoadError> {
    let cell: CellId = row.cell.parse().map_err(|_| CsvLoadError::InvalidCell {
        cell: row.cell.clone(),
        row: row_number,
    })?;

    let valid = match layout::kind(cell) {
        CellKind::Input => try_parse_amount(&row.value).is_ok(),
        CellKind::Flag => YesNo::parse(&row.value).is_some(),
        CellKind::Derived | CellKind::Unused => {
            return Err(CsvLoadError::DerivedCell {
                cell,
                row: row_number,
            });
        }
    };
    if !valid {
        return Err(CsvLoadError::InvalidValue {
            cell,
            value: row.value,
            row: row_number,
        });
    }

    Ok(CellAssignment {
        cell,
        value: row.value,
    })
}

/// Parse CSV text and return the assignments in file order.
///
/// # Errors
///
/// * [`CsvLoadError::Parse`] if the CSV is structurally invalid.
/// * [`CsvLoadError::InvalidCell`], [`CsvLoadError::DerivedCell`] or
///   [`CsvLoadError::InvalidValue`] for the first row that cannot be applied.
pub fn load_from_str(input: &str) -> Result<Vec<CellAssignment>, CsvLoadError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .comment(Some(b'#'))
        .flexible(false)
        .from_reader(input.as_bytes());

    let assignments = reader
        .deserialize::<CsvRow>()
        .enumerate()
        .map(|(idx, result)| {
            let row = result?;
            convert_row(row, idx + 1)
        })
        .collect::<Result<Vec<_>, _>>()?;

    debug!(count = assignments.len(), "loaded cell assignments");
    Ok(assignments)
}

/// Read a file from disk and delegate to [`load_from_str`].
///
/// # Errors
///
/// Returns [`CsvLoadError::Io`] when the file cannot be read, or any error
/// of [`load_from_str`] when the contents are invalid.
pub fn load_from_file(path: &Path) -> Result<Vec<CellAssignment>, CsvLoadError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CsvLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    load_from_str(&contents)
}

/// Writes every assignment into the engine and recomputes once.
pub fn apply(
    engine: &mut TaxEngine,
    assignments: &[CellAssignment],
) {
    engine.set_inputs(
        assignments
            .iter()
            .map(|assignment| (assignment.cell, assignment.cell_value())),
    );
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
