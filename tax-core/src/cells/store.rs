use std::ops::RangeInclusive;

use rust_decimal::Decimal;

use super::layout::{DEFAULT_REGISTRATION, DEFAULT_STARTUP, REGISTRATION_FLAG, STARTUP_FLAG};
use super::{CellId, Column, MAX_ROW};
use crate::models::{CellValue, YesNo};

/// Dense store of every worksheet cell.
///
/// Amounts live in a flat vector indexed by coordinate; the two flag cells
/// are held separately so a flag can never be read as an amount by mistake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CellStore {
    amounts: Vec<Decimal>,
    registered: YesNo,
    startup: YesNo,
}

impl CellStore {
    /// A store with every amount at zero and both flags at their defaults.
    pub fn new() -> Self {
        Self {
            amounts: vec![Decimal::ZERO; usize::from(MAX_ROW) * Column::ALL.len()],
            registered: DEFAULT_REGISTRATION,
            startup: DEFAULT_STARTUP,
        }
    }

    pub fn amount(
        &self,
        cell: CellId,
    ) -> Decimal {
        self.amounts
            .get(cell.index())
            .copied()
            .unwrap_or(Decimal::ZERO)
    }

    pub fn set_amount(
        &mut self,
        cell: CellId,
        value: Decimal,
    ) {
        if let Some(slot) = self.amounts.get_mut(cell.index()) {
            *slot = value;
        }
    }

    /// The value of a cell as the caller sees it: flags for the two flag
    /// cells, amounts everywhere else.
    pub fn value(
        &self,
        cell: CellId,
    ) -> CellValue {
        if cell == REGISTRATION_FLAG {
            CellValue::Flag(self.registered)
        } else if cell == STARTUP_FLAG {
            CellValue::Flag(self.startup)
        } else {
            CellValue::Number(self.amount(cell))
        }
    }

    pub fn registered(&self) -> YesNo {
        self.registered
    }

    pub fn set_registered(
        &mut self,
        flag: YesNo,
    ) {
        self.registered = flag;
    }

    pub fn startup(&self) -> YesNo {
        self.startup
    }

    pub fn set_startup(
        &mut self,
        flag: YesNo,
    ) {
        self.startup = flag;
    }

    /// Sum of one column over a contiguous row range. Saturates at the
    /// `Decimal` bounds.
    pub fn sum(
        &self,
        column: Column,
        rows: RangeInclusive<u16>,
    ) -> Decimal {
        rows.filter_map(|row| CellId::new(column, row).ok())
            .map(|cell| self.amount(cell))
            .fold(Decimal::ZERO, |acc, value| acc.saturating_add(value))
    }

    /// Every cell with its current value, in worksheet order.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, CellValue)> + '_ {
        CellId::all().map(move |cell| (cell, self.value(cell)))
    }
}

impl Default for CellStore {
    fn default() -> Self {
        Self::new()
    }
}
