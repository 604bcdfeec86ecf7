use rust_decimal::Decimal;

use super::YesNo;

/// The value held by a single cell: an amount, or a flag for the two
/// Yes/No cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellValue {
    Number(Decimal),
    Flag(YesNo),
}

impl Default for CellValue {
    fn default() -> Self {
        Self::Number(Decimal::ZERO)
    }
}

impl From<Decimal> for CellValue {
    fn from(value: Decimal) -> Self {
        Self::Number(value)
    }
}

impl From<YesNo> for CellValue {
    fn from(value: YesNo) -> Self {
        Self::Flag(value)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Flag(flag) => write!(f, "{flag}"),
        }
    }
}
