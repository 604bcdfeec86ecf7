//! Profit and loss block: cost of sales through accounting profit.

use super::lines::{at, derive_row, difference, split_section};
use crate::cells::CellStore;
use crate::cells::layout::{
    ACCOUNTING_PROFIT, COST_OF_SALES, GROSS_PROFIT, MANAGEMENT_EXPENSES, NET_REVENUE,
    OTHER_REVENUES,
};
use crate::models::TaxRates;

pub(super) fn derive_cost_of_sales(
    store: &mut CellStore,
    _rates: &TaxRates,
) {
    split_section(store, COST_OF_SALES);
    difference(store, GROSS_PROFIT, NET_REVENUE, COST_OF_SALES.total_row);
}

pub(super) fn derive_management_expenses(
    store: &mut CellStore,
    _rates: &TaxRates,
) {
    split_section(store, MANAGEMENT_EXPENSES);
}

pub(super) fn derive_other_revenues(
    store: &mut CellStore,
    _rates: &TaxRates,
) {
    split_section(store, OTHER_REVENUES);
}

/// Gross profit less management expenses plus other revenues.
pub(super) fn derive_accounting_profit(
    store: &mut CellStore,
    _rates: &TaxRates,
) {
    derive_row(store, ACCOUNTING_PROFIT, |store, column| {
        at(store, column, GROSS_PROFIT)
            .saturating_sub(at(store, column, MANAGEMENT_EXPENSES.total_row))
            .saturating_add(at(store, column, OTHER_REVENUES.total_row))
    });
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::cells::layout::EXPORT_RATIO;
    use crate::cells::{CellId, Column};

    fn store_with_ratio(ratio: rust_decimal::Decimal) -> CellStore {
        let mut store = CellStore::new();
        store.set_amount(CellId::exempt(EXPORT_RATIO), ratio);
        store
    }

    #[test]
    fn gross_profit_is_net_revenue_less_cost_of_sales() {
        let mut store = store_with_ratio(dec!(0.1));
        store.set_amount(CellId::total(NET_REVENUE), dec!(1000));
        store.set_amount(CellId::exempt(NET_REVENUE), dec!(100));
        store.set_amount(CellId::taxable(NET_REVENUE), dec!(900));
        store.set_amount(CellId::total(17), dec!(300));
        store.set_amount(CellId::total(25), dec!(200));

        derive_cost_of_sales(&mut store, &TaxRates::default());

        assert_eq!(store.amount(CellId::total(15)), dec!(500));
        assert_eq!(store.amount(CellId::exempt(15)), dec!(50));
        assert_eq!(store.amount(CellId::total(26)), dec!(500));
        assert_eq!(store.amount(CellId::exempt(26)), dec!(50));
        assert_eq!(store.amount(CellId::taxable(26)), dec!(450));
    }

    #[test]
    fn management_expenses_are_split_and_totalled() {
        let mut store = store_with_ratio(dec!(0.5));
        for row in MANAGEMENT_EXPENSES.rows() {
            store.set_amount(CellId::total(row), dec!(2));
        }

        derive_management_expenses(&mut store, &TaxRates::default());

        assert_eq!(store.amount(CellId::total(28)), dec!(52));
        assert_eq!(store.amount(CellId::exempt(28)), dec!(26));
        assert_eq!(store.amount(CellId::taxable(54)), dec!(1));
    }

    #[test]
    fn accounting_profit_combines_every_column() {
        let mut store = CellStore::new();
        for column in Column::ALL {
            store.set_amount(CellId::total(GROSS_PROFIT).with_column(column), dec!(90));
            store.set_amount(CellId::total(28).with_column(column), dec!(40));
            store.set_amount(CellId::total(56).with_column(column), dec!(15));
        }

        derive_accounting_profit(&mut store, &TaxRates::default());

        for column in Column::ALL {
            assert_eq!(at(&store, column, ACCOUNTING_PROFIT), dec!(65));
        }
    }

    #[test]
    fn other_revenues_split_by_ratio() {
        let mut store = store_with_ratio(dec!(0.2));
        store.set_amount(CellId::total(57), dec!(50));

        derive_other_revenues(&mut store, &TaxRates::default());

        assert_eq!(store.amount(CellId::exempt(57)), dec!(10));
        assert_eq!(store.amount(CellId::taxable(56)), dec!(40));
    }
}
