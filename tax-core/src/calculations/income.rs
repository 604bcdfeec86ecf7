//! Tax adjustments from accounting profit down to taxable income.

use rust_decimal::Decimal;

use super::lines::{at, derive_row, difference, split_section, taxable_remainder, total_section};
use crate::cells::layout::{
    ACCOUNTING_PROFIT, ADMISSIBLE_DEDUCTIONS, BUSINESS_INCOME, DEDUCTIBLE_ALLOWANCES,
    INADMISSIBLE_DEDUCTIONS, INCOME_BEFORE_DEPRECIATION, LINKED_ADD_BACKS, OTHER_INCOME_HEADS,
    TAX_DEPRECIATION, TAXABLE_INCOME, TOTAL_INCOME,
};
use crate::cells::{CellId, CellStore};
use crate::models::TaxRates;

/// Copies linked expense and revenue lines into their add-back rows, then
/// splits and totals the whole section.
pub(super) fn derive_inadmissible_deductions(
    store: &mut CellStore,
    _rates: &TaxRates,
) {
    for (target, sources) in LINKED_ADD_BACKS {
        let linked = sources
            .iter()
            .map(|row| store.amount(CellId::total(*row)))
            .fold(Decimal::ZERO, |acc, value| acc.saturating_add(value));
        store.set_amount(CellId::total(target), linked);
    }

    split_section(store, INADMISSIBLE_DEDUCTIONS);
}

/// Accounting profit plus add-backs less admissible deductions.
pub(super) fn derive_admissible_deductions(
    store: &mut CellStore,
    _rates: &TaxRates,
) {
    split_section(store, ADMISSIBLE_DEDUCTIONS);

    derive_row(store, INCOME_BEFORE_DEPRECIATION, |store, column| {
        at(store, column, ACCOUNTING_PROFIT)
            .saturating_add(at(store, column, INADMISSIBLE_DEDUCTIONS.total_row))
            .saturating_sub(at(store, column, ADMISSIBLE_DEDUCTIONS.total_row))
    });
}

pub(super) fn derive_tax_depreciation(
    store: &mut CellStore,
    _rates: &TaxRates,
) {
    split_section(store, TAX_DEPRECIATION);
    difference(
        store,
        BUSINESS_INCOME,
        INCOME_BEFORE_DEPRECIATION,
        TAX_DEPRECIATION.total_row,
    );
}

/// Other income heads carry a caller-entered exemption; business income
/// joins them in the total.
pub(super) fn derive_total_income(
    store: &mut CellStore,
    _rates: &TaxRates,
) {
    for row in OTHER_INCOME_HEADS {
        taxable_remainder(store, row);
    }
    total_section(store, TOTAL_INCOME);
}

pub(super) fn derive_taxable_income(
    store: &mut CellStore,
    _rates: &TaxRates,
) {
    for row in DEDUCTIBLE_ALLOWANCES.rows() {
        taxable_remainder(store, row);
    }
    total_section(store, DEDUCTIBLE_ALLOWANCES);
    difference(
        store,
        TAXABLE_INCOME,
        TOTAL_INCOME.total_row,
        DEDUCTIBLE_ALLOWANCES.total_row,
    );
}
