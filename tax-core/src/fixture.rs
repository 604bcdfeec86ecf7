//! The worked example: a registered software exporter with Rs. 100 million
//! of domestic and Rs. 15 million of export sales.
//!
//! [`test_data`] holds its inputs and [`REFERENCE_FIGURES`] the results it
//! must produce, rounded to the paisa.

use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::calculations::common::round_half_up;
use crate::cells::layout::{
    ADMISSIBLE_DEDUCTIONS, ADMITTED_TAX, ALTERNATE_TAX, COST_OF_SALES, DONATION_CREDIT, DONATIONS,
    FINAL_TAX, INADMISSIBLE_DEDUCTIONS, LINKED_ADD_BACKS, MANAGEMENT_EXPENSES, MINIMUM_TAX,
    NET_TAX_LIABILITY, NORMAL_TAX, OTHER_CREDITS_INPUT, OTHER_REVENUES, REFUNDABLE_TAX,
    REGISTRATION_FLAG, SELLING_EXPENSES, STARTUP_FLAG, TAX_CHARGEABLE, TAX_DEPRECIATION, TAX_PAID,
};
use crate::cells::{CellId, Section};
use crate::engine::TaxEngine;
use crate::models::{CellValue, YesNo};

/// Inputs of the worked example, in worksheet order.
pub fn test_data() -> Vec<(CellId, CellValue)> {
    let amount = |cell: CellId, value: Decimal| (cell, CellValue::from(value));
    let lines = |section: Section, value: Decimal| {
        section
            .rows()
            .filter(|row| !LINKED_ADD_BACKS.iter().any(|(target, _)| target == row))
            .map(move |row| amount(CellId::total(row), value))
    };

    let mut inputs = vec![
        amount(CellId::total(4), dec!(100000000)),
        amount(CellId::total(5), dec!(15000000)),
        (REGISTRATION_FLAG, CellValue::from(YesNo::Yes)),
    ];

    inputs.extend(lines(SELLING_EXPENSES, dec!(1000000)));
    inputs.extend(lines(COST_OF_SALES, dec!(1500000)));
    inputs.extend(lines(MANAGEMENT_EXPENSES, dec!(1500000)));
    inputs.extend(lines(OTHER_REVENUES, dec!(1500000)));
    inputs.extend(lines(INADMISSIBLE_DEDUCTIONS, dec!(1000000)));
    inputs.extend(lines(ADMISSIBLE_DEDUCTIONS, dec!(1500000)));
    inputs.extend(lines(TAX_DEPRECIATION, dec!(1500000)));

    inputs.extend([
        amount(CellId::total(124), dec!(1500000)),
        amount(CellId::exempt(124), dec!(0)),
        amount(DONATIONS, dec!(1500000)),
        amount(OTHER_CREDITS_INPUT, dec!(0)),
        (STARTUP_FLAG, CellValue::from(YesNo::No)),
        amount(CellId::taxable(147), dec!(1000000)),
        amount(CellId::taxable(148), dec!(10000000)),
        amount(CellId::taxable(149), dec!(0)),
        amount(CellId::taxable(150), dec!(0)),
    ]);

    inputs
}

/// An expected figure of the worked example.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceFigure {
    pub label: &'static str,
    pub cell: CellId,
    pub expected: Decimal,
}

const fn figure(
    label: &'static str,
    cell: CellId,
    expected: Decimal,
) -> ReferenceFigure {
    ReferenceFigure {
        label,
        cell,
        expected,
    }
}

/// Expected results of the worked example.
pub const REFERENCE_FIGURES: [ReferenceFigure; 28] = [
    figure("Export ratio", CellId::exempt(7), dec!(0.13)),
    figure("Gross revenue", CellId::total(3), dec!(115000000)),
    figure("Selling expenses", CellId::total(8), dec!(3000000)),
    figure("Net revenue", CellId::total(13), dec!(112000000)),
    figure("Net revenue (taxable)", CellId::taxable(13), dec!(98130434.78)),
    figure("Gross profit", CellId::total(26), dec!(98500000)),
    figure("Gross profit (taxable)", CellId::taxable(26), dec!(86391304.35)),
    figure("Accounting profit", CellId::total(66), dec!(73000000)),
    figure("Accounting profit (taxable)", CellId::taxable(66), dec!(64217391.30)),
    figure("Inadmissible deductions", CellId::total(68), dec!(37000000)),
    figure("Inadmissible deductions (taxable)", CellId::taxable(68), dec!(32173913.04)),
    figure("Income before depreciation", CellId::total(108), dec!(102500000)),
    figure("Income before depreciation (taxable)", CellId::taxable(108), dec!(89869565.22)),
    figure("Business income", CellId::total(115), dec!(98000000)),
    figure("Business income (taxable)", CellId::taxable(115), dec!(85956521.74)),
    figure("Taxable income", CellId::total(126), dec!(96500000)),
    figure("Taxable income (taxable)", CellId::taxable(126), dec!(84456521.74)),
    figure("Normal tax", NORMAL_TAX, dec!(24492391.30)),
    figure("Final tax", FINAL_TAX, dec!(375000)),
    figure("Alternate tax", ALTERNATE_TAX, dec!(12410000)),
    figure("Minimum tax", MINIMUM_TAX, dec!(0)),
    figure("Tax chargeable", TAX_CHARGEABLE, dec!(24867391.30)),
    figure("Donation credit", DONATION_CREDIT, dec!(441660.23)),
    figure("Other credits", CellId::taxable(141), dec!(0)),
    figure("Net tax liability", NET_TAX_LIABILITY, dec!(24425731.07)),
    figure("Tax paid", TAX_PAID, dec!(11000000)),
    figure("Admitted tax", ADMITTED_TAX, dec!(13425731.07)),
    figure("Refundable tax", REFUNDABLE_TAX, dec!(0)),
];

/// A reference figure the engine did not reproduce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mismatch {
    pub label: &'static str,
    pub cell: CellId,
    pub expected: Decimal,
    pub actual: Decimal,
}

impl fmt::Display for Mismatch {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(
            f,
            "{} ({}): expected {}, got {}",
            self.label, self.cell, self.expected, self.actual
        )
    }
}

/// Compares the engine against [`REFERENCE_FIGURES`], rounding each value
/// half-up to two decimals first. An empty result means every figure matches.
pub fn verify(engine: &TaxEngine) -> Vec<Mismatch> {
    REFERENCE_FIGURES
        .iter()
        .filter_map(|figure| {
            let actual = round_half_up(engine.amount(figure.cell));
            (actual != figure.expected).then_some(Mismatch {
                label: figure.label,
                cell: figure.cell,
                expected: figure.expected,
                actual,
            })
        })
        .collect()
}
