//! Revenue block: export ratio, gross revenue, selling expenses, net revenue.

use rust_decimal::Decimal;

use super::common::ratio;
use super::lines::{difference, export_ratio, set_exempt, split_line, total_section};
use crate::cells::layout::{
    DOMESTIC_COMMISSION, DOMESTIC_SALES, EXPORT_RATIO, EXPORT_SALES, FOREIGN_COMMISSION,
    GROSS_REVENUE, NET_REVENUE, REBATE_DRAWBACK, SALES, SELLING_EXPENSES,
};
use crate::cells::{CellId, CellStore};
use crate::models::TaxRates;

/// D7 = export / (domestic + export); zero when there are no sales.
pub(super) fn derive_export_ratio(
    store: &mut CellStore,
    _rates: &TaxRates,
) {
    let domestic = store.amount(CellId::total(DOMESTIC_SALES));
    let export = store.amount(CellId::total(EXPORT_SALES));
    let share = ratio(export, domestic.saturating_add(export));

    store.set_amount(CellId::total(EXPORT_RATIO), Decimal::ONE);
    store.set_amount(CellId::exempt(EXPORT_RATIO), share);
    store.set_amount(CellId::taxable(EXPORT_RATIO), Decimal::ONE.saturating_sub(share));
}

/// Domestic sales are always taxable; export sales are exempt only for a
/// registered company.
pub(super) fn derive_gross_revenue(
    store: &mut CellStore,
    _rates: &TaxRates,
) {
    set_exempt(store, DOMESTIC_SALES, Decimal::ZERO);

    let exempt_export = if store.registered().is_yes() {
        store.amount(CellId::total(EXPORT_SALES))
    } else {
        Decimal::ZERO
    };
    set_exempt(store, EXPORT_SALES, exempt_export);

    total_section(store, SALES);
}

/// Domestic commission is fully taxable, foreign commission fully exempt,
/// and rebate/duty drawback is split by the export ratio.
pub(super) fn derive_selling_expenses(
    store: &mut CellStore,
    _rates: &TaxRates,
) {
    set_exempt(store, DOMESTIC_COMMISSION, Decimal::ZERO);

    let foreign = store.amount(CellId::total(FOREIGN_COMMISSION));
    set_exempt(store, FOREIGN_COMMISSION, foreign);

    let share = export_ratio(store);
    split_line(store, REBATE_DRAWBACK, share);

    total_section(store, SELLING_EXPENSES);
    difference(store, NET_REVENUE, GROSS_REVENUE, SELLING_EXPENSES.total_row);
}
