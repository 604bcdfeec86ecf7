use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Highest row of the worksheet.
pub const MAX_ROW: u16 = 160;

/// Semantic column of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Column {
    /// `C`: the full amount of a line item.
    Total,
    /// `D`: the tax-exempt portion.
    Exempt,
    /// `E`: the portion subject to normal tax.
    Taxable,
}

impl Column {
    pub const ALL: [Column; 3] = [Column::Total, Column::Exempt, Column::Taxable];

    pub fn letter(&self) -> char {
        match self {
            Self::Total => 'C',
            Self::Exempt => 'D',
            Self::Taxable => 'E',
        }
    }

    pub fn from_letter(letter: char) -> Option<Self> {
        match letter.to_ascii_uppercase() {
            'C' => Some(Self::Total),
            'D' => Some(Self::Exempt),
            'E' => Some(Self::Taxable),
            _ => None,
        }
    }

    const fn offset(self) -> usize {
        match self {
            Self::Total => 0,
            Self::Exempt => 1,
            Self::Taxable => 2,
        }
    }
}

/// Errors returned when a coordinate string does not name a worksheet cell.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CellIdError {
    #[error("cell identifier is empty")]
    Empty,

    #[error("unknown column '{0}' (expected C, D or E)")]
    UnknownColumn(char),

    #[error("invalid row '{0}'")]
    InvalidRow(String),

    #[error("row {0} is outside the worksheet (1..=160)")]
    RowOutOfRange(u32),
}

/// A validated worksheet coordinate such as `C17`.
///
/// # Example
///
/// ```
/// use tax_core::cells::{CellId, Column};
///
/// let cell: CellId = "e126".parse().unwrap();
///
/// assert_eq!(cell.column(), Column::Taxable);
/// assert_eq!(cell.row(), 126);
/// assert_eq!(cell.to_string(), "E126");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId {
    column: Column,
    row: u16,
}

impl CellId {
    /// Builds a coordinate, checking the row against the worksheet bounds.
    pub fn new(
        column: Column,
        row: u16,
    ) -> Result<Self, CellIdError> {
        if row == 0 || row > MAX_ROW {
            return Err(CellIdError::RowOutOfRange(u32::from(row)));
        }
        Ok(Self { column, row })
    }

    /// `C{row}`. Intended for layout constants.
    ///
    /// # Panics
    ///
    /// Panics when `row` is outside `1..=MAX_ROW`; use [`CellId::new`] for
    /// rows that are not known in advance.
    pub const fn total(row: u16) -> Self {
        Self::fixed(Column::Total, row)
    }

    /// `D{row}`. Intended for layout constants.
    ///
    /// # Panics
    ///
    /// Panics when `row` is outside `1..=MAX_ROW`; use [`CellId::new`] for
    /// rows that are not known in advance.
    pub const fn exempt(row: u16) -> Self {
        Self::fixed(Column::Exempt, row)
    }

    /// `E{row}`. Intended for layout constants.
    ///
    /// # Panics
    ///
    /// Panics when `row` is outside `1..=MAX_ROW`; use [`CellId::new`] for
    /// rows that are not known in advance.
    pub const fn taxable(row: u16) -> Self {
        Self::fixed(Column::Taxable, row)
    }

    /// Same row, another column.
    pub const fn with_column(
        self,
        column: Column,
    ) -> Self {
        Self {
            column,
            row: self.row,
        }
    }

    const fn fixed(
        column: Column,
        row: u16,
    ) -> Self {
        assert!(row >= 1 && row <= MAX_ROW, "worksheet row out of range");
        Self { column, row }
    }

    pub fn column(&self) -> Column {
        self.column
    }

    pub fn row(&self) -> u16 {
        self.row
    }

    /// Dense index used by [`super::CellStore`].
    pub(crate) const fn index(&self) -> usize {
        (self.row as usize - 1) * Column::ALL.len() + self.column.offset()
    }

    /// Every coordinate of the worksheet, row by row.
    pub fn all() -> impl Iterator<Item = CellId> {
        (1..=MAX_ROW).flat_map(|row| {
            Column::ALL
                .into_iter()
                .map(move |column| CellId { column, row })
        })
    }
}

impl FromStr for CellId {
    type Err = CellIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let mut chars = s.chars();
        let letter = chars.next().ok_or(CellIdError::Empty)?;
        let column = Column::from_letter(letter).ok_or(CellIdError::UnknownColumn(letter))?;

        let digits = chars.as_str();
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CellIdError::InvalidRow(digits.to_string()));
        }
        let row: u32 = digits
            .parse()
            .map_err(|_| CellIdError::InvalidRow(digits.to_string()))?;
        let row = u16::try_from(row).map_err(|_| CellIdError::RowOutOfRange(row))?;

        Self::new(column, row)
    }
}

impl fmt::Display for CellId {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{}{}", self.column.letter(), self.row)
    }
}
