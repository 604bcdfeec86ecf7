//! Row-level helpers shared by the derivation steps.

use rust_decimal::Decimal;

use super::common::proportional_split;
use crate::cells::layout::{EXPORT_RATIO, Section};
use crate::cells::{CellId, CellStore, Column};

/// Amount at `column`/`row`.
pub(super) fn at(
    store: &CellStore,
    column: Column,
    row: u16,
) -> Decimal {
    store.amount(CellId::total(row).with_column(column))
}

/// Export ratio as last derived into D7.
pub(super) fn export_ratio(store: &CellStore) -> Decimal {
    store.amount(CellId::exempt(EXPORT_RATIO))
}

/// Sets the exempt part of a line and makes the taxable part the remainder
/// of its total.
pub(super) fn set_exempt(
    store: &mut CellStore,
    row: u16,
    exempt: Decimal,
) {
    let total = store.amount(CellId::total(row));
    store.set_amount(CellId::exempt(row), exempt);
    store.set_amount(CellId::taxable(row), total.saturating_sub(exempt));
}

/// Taxable part of a line whose exempt part is entered by the caller.
pub(super) fn taxable_remainder(
    store: &mut CellStore,
    row: u16,
) {
    let exempt = store.amount(CellId::exempt(row));
    set_exempt(store, row, exempt);
}

/// Splits a line total by the export ratio.
pub(super) fn split_line(
    store: &mut CellStore,
    row: u16,
    ratio: Decimal,
) {
    let (exempt, taxable) = proportional_split(store.amount(CellId::total(row)), ratio);
    store.set_amount(CellId::exempt(row), exempt);
    store.set_amount(CellId::taxable(row), taxable);
}

/// Writes `formula` evaluated per column into every column of `row`.
pub(super) fn derive_row(
    store: &mut CellStore,
    row: u16,
    formula: impl Fn(&CellStore, Column) -> Decimal,
) {
    for column in Column::ALL {
        let value = formula(store, column);
        store.set_amount(CellId::total(row).with_column(column), value);
    }
}

/// Column-wise total of a section's line items.
pub(super) fn total_section(
    store: &mut CellStore,
    section: Section,
) {
    derive_row(store, section.total_row, |store, column| {
        store.sum(column, section.rows())
    });
}

/// Splits every line of a section by the export ratio, then totals it.
pub(super) fn split_section(
    store: &mut CellStore,
    section: Section,
) {
    let ratio = export_ratio(store);
    for row in section.rows() {
        split_line(store, row, ratio);
    }
    total_section(store, section);
}

/// `row = minuend - subtrahend` in every column.
pub(super) fn difference(
    store: &mut CellStore,
    row: u16,
    minuend: u16,
    subtrahend: u16,
) {
    derive_row(store, row, |store, column| {
        at(store, column, minuend).saturating_sub(at(store, column, subtrahend))
    });
}
