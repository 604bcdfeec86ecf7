//! `CELL=VALUE` edits given on the command line.

use std::str::FromStr;

use tax_core::{CellId, CellIdError, TaxEngine};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EditError {
    #[error("expected CELL=VALUE, got '{0}'")]
    MissingSeparator(String),

    #[error(transparent)]
    Cell(#[from] CellIdError),
}

/// A raw entry for one cell, applied with the engine's lenient parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub cell: CellId,
    pub value: String,
}

impl Edit {
    pub fn apply(
        &self,
        engine: &mut TaxEngine,
    ) {
        engine.set_value(&self.cell.to_string(), &self.value);
    }
}

impl FromStr for Edit {
    type Err = EditError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (cell, value) = s
            .split_once('=')
            .ok_or_else(|| EditError::MissingSeparator(s.to_string()))?;
        Ok(Self {
            cell: cell.parse()?,
            value: value.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parses_cell_and_value() {
        let edit: Edit = "c17 = 1,500,000".parse().unwrap();

        assert_eq!(
            edit,
            Edit {
                cell: CellId::total(17),
                value: "1,500,000".to_string(),
            }
        );
    }

    #[test]
    fn value_may_contain_equals_sign() {
        let edit: Edit = "C4==5".parse().unwrap();

        assert_eq!(edit.value, "=5");
    }

    #[test]
    fn rejects_missing_separator() {
        assert_eq!(
            "C17".parse::<Edit>(),
            Err(EditError::MissingSeparator("C17".to_string()))
        );
    }

    #[test]
    fn rejects_unknown_cell() {
        assert_eq!(
            "X1=5".parse::<Edit>(),
            Err(EditError::Cell(CellIdError::UnknownColumn('X')))
        );
    }

    #[test]
    fn apply_writes_through_the_engine() {
        let mut engine = TaxEngine::new();

        "C4=2,000".parse::<Edit>().unwrap().apply(&mut engine);

        assert_eq!(engine.amount(CellId::total(4)), dec!(2000));
        assert_eq!(engine.amount(CellId::total(3)), dec!(2000));
    }
}
