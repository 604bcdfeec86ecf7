//! Tax computation: chargeable tax, credits, and reconciliation against
//! tax already paid.

use rust_decimal::Decimal;

use super::common::{excess_over, floor_at_zero, max};
use crate::cells::layout::{
    ACCOUNTING_PROFIT, ADMITTED_TAX, ALTERNATE_TAX, ALTERNATE_TAX_EXCESS, DEEMED_INCOME_TAX,
    DONATION_CREDIT, DONATIONS, EXPORT_SALES, FINAL_TAX, GROSS_REVENUE, HIGH_EARNERS_TAX,
    MINIMUM_TAX, MINIMUM_TAX_CHARGEABLE_EXCESS, MINIMUM_TAX_EXCESS, NET_TAX_LIABILITY, NORMAL_TAX,
    OTHER_CREDITS, OTHER_CREDITS_INPUT, REFUNDABLE_TAX, TAX_CHARGEABLE, TAX_PAID,
    TAX_PAYMENT_ROWS, TAXABLE_INCOME, TOTAL_CREDITS,
};
use crate::cells::{CellId, CellStore, Column};
use crate::models::TaxRates;

/// The competing tax regimes for one return.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct TaxBrackets {
    normal: Decimal,
    final_tax: Decimal,
    alternate: Decimal,
    minimum: Decimal,
}

impl TaxBrackets {
    fn compute(
        store: &CellStore,
        rates: &TaxRates,
    ) -> Self {
        let taxable_income = store.amount(CellId::taxable(TAXABLE_INCOME));
        let exempt_exports = store.amount(CellId::exempt(EXPORT_SALES));
        let accounting_profit = store.amount(CellId::total(ACCOUNTING_PROFIT));
        let taxable_turnover = store.amount(CellId::taxable(GROSS_REVENUE));

        let minimum = if taxable_turnover > rates.minimum_tax_threshold {
            floor_at_zero(taxable_turnover.saturating_mul(rates.minimum_rate))
        } else {
            Decimal::ZERO
        };

        Self {
            normal: floor_at_zero(taxable_income.saturating_mul(rates.normal_rate)),
            final_tax: exempt_exports.saturating_mul(rates.final_rate),
            alternate: floor_at_zero(accounting_profit.saturating_mul(rates.alternate_rate)),
            minimum,
        }
    }

    fn highest(&self) -> Decimal {
        max(max(self.normal, self.alternate), self.minimum)
    }
}

/// Brackets, the excess lines over normal tax, and the chargeable total.
///
/// Tax chargeable is the highest of normal, alternate and minimum tax, plus
/// final tax, plus every excess line. The excess of the winning bracket is
/// therefore counted on top of the bracket itself.
pub(super) fn derive_tax_chargeable(
    store: &mut CellStore,
    rates: &TaxRates,
) {
    let brackets = TaxBrackets::compute(store, rates);

    let minimum_excess = excess_over(brackets.minimum, brackets.normal);
    let alternate_excess = excess_over(brackets.alternate, brackets.normal);

    store.set_amount(NORMAL_TAX, brackets.normal);
    store.set_amount(FINAL_TAX, brackets.final_tax);
    store.set_amount(ALTERNATE_TAX, brackets.alternate);
    store.set_amount(MINIMUM_TAX, brackets.minimum);
    store.set_amount(MINIMUM_TAX_EXCESS, minimum_excess);
    store.set_amount(HIGH_EARNERS_TAX, Decimal::ZERO);
    store.set_amount(DEEMED_INCOME_TAX, Decimal::ZERO);
    store.set_amount(ALTERNATE_TAX_EXCESS, alternate_excess);
    store.set_amount(MINIMUM_TAX_CHARGEABLE_EXCESS, Decimal::ZERO);

    let chargeable = [
        brackets.final_tax,
        minimum_excess,
        store.amount(HIGH_EARNERS_TAX),
        store.amount(DEEMED_INCOME_TAX),
        alternate_excess,
        store.amount(MINIMUM_TAX_CHARGEABLE_EXCESS),
    ]
    .into_iter()
    .fold(brackets.highest(), |acc, value| acc.saturating_add(value));

    store.set_amount(TAX_CHARGEABLE, chargeable);
}

/// Credit for charitable donations: the average tax rate applied to the
/// donation, capped at a share of taxable income. Zero unless taxable
/// income is positive.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::calculations::tax::donation_credit;
///
/// // average rate 30% on a donation of 100
/// assert_eq!(donation_credit(dec!(300), dec!(1000), dec!(100), dec!(0.2)), dec!(30));
/// // capped at 20% of taxable income
/// assert_eq!(donation_credit(dec!(300), dec!(1000), dec!(5000), dec!(0.2)), dec!(200));
/// ```
pub fn donation_credit(
    chargeable: Decimal,
    taxable_income: Decimal,
    donations: Decimal,
    cap_rate: Decimal,
) -> Decimal {
    if taxable_income <= Decimal::ZERO {
        return Decimal::ZERO;
    }

    let cap = taxable_income.saturating_mul(cap_rate);
    let proportional = chargeable
        .checked_div(taxable_income)
        .and_then(|average_rate| average_rate.checked_mul(donations));

    let credit = match proportional {
        Some(amount) => amount.min(cap),
        // Out of range: the sign alone decides between the cap and nothing.
        None if chargeable.is_sign_negative() == donations.is_sign_negative() => cap,
        None => Decimal::ZERO,
    };
    floor_at_zero(credit)
}

/// Donation credit, other credits (all of tax chargeable under startup
/// relief), and the net liability.
pub(super) fn derive_tax_credits(
    store: &mut CellStore,
    rates: &TaxRates,
) {
    let chargeable = store.amount(TAX_CHARGEABLE);
    let taxable_income = store.amount(CellId::taxable(TAXABLE_INCOME));

    let donation = donation_credit(
        chargeable,
        taxable_income,
        store.amount(DONATIONS),
        rates.donation_cap_rate,
    );
    let other = if store.startup().is_yes() {
        chargeable
    } else {
        store.amount(OTHER_CREDITS_INPUT)
    };
    let total_credits = donation.saturating_add(other);

    store.set_amount(DONATION_CREDIT, donation);
    store.set_amount(OTHER_CREDITS, other);
    store.set_amount(TOTAL_CREDITS, total_credits);
    store.set_amount(NET_TAX_LIABILITY, chargeable.saturating_sub(total_credits));
}

/// Reconciles the net liability against tax already paid. At most one of
/// admitted and refundable tax is positive.
pub(super) fn derive_tax_payments(
    store: &mut CellStore,
    _rates: &TaxRates,
) {
    let paid = store.sum(Column::Taxable, TAX_PAYMENT_ROWS);
    let liability = store.amount(NET_TAX_LIABILITY);

    let admitted = if paid > liability {
        Decimal::ZERO
    } else {
        liability.saturating_sub(paid)
    };
    let refundable = if admitted > Decimal::ZERO {
        Decimal::ZERO
    } else {
        paid.saturating_sub(liability)
    };

    store.set_amount(TAX_PAID, paid);
    store.set_amount(ADMITTED_TAX, admitted);
    store.set_amount(REFUNDABLE_TAX, refundable);
}
