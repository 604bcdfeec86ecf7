//! Properties that hold for any combination of inputs.

use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tax_core::cells::layout::{
    self, ADMITTED_TAX, ALTERNATE_TAX, DONATION_CREDIT, MINIMUM_TAX, NORMAL_TAX, REFUNDABLE_TAX,
    STATEMENT_TOTALS, Section, TAX_PAID, TAX_PAYMENT_ROWS, TAXABLE_INCOME,
};
use tax_core::{CellId, CellValue, TaxEngine, YesNo};

/// Amounts up to ten billion rupees with paisa precision.
fn amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000i64..1_000_000_000_000i64).prop_map(|units| Decimal::new(units, 2))
}

fn inputs() -> impl Strategy<Value = (Vec<(usize, Decimal)>, bool, bool)> {
    (
        prop::collection::vec((any::<usize>(), amount()), 0..60),
        any::<bool>(),
        any::<bool>(),
    )
}

fn engine_from(
    writes: &[(usize, Decimal)],
    registered: bool,
    startup: bool,
) -> TaxEngine {
    let cells: Vec<CellId> = layout::input_cells().collect();
    let mut engine = TaxEngine::new();
    engine.set_inputs(
        writes
            .iter()
            .map(|(pick, value)| (cells[pick % cells.len()], CellValue::Number(*value))),
    );
    engine.set_registered(YesNo::from(registered));
    engine.set_startup(YesNo::from(startup));
    engine
}

/// Equal up to the rounding of 28-digit intermediate results.
fn close(
    a: Decimal,
    b: Decimal,
) -> bool {
    (a - b).abs() <= dec!(0.000001)
}

fn split_rows() -> impl Iterator<Item = u16> {
    let lines = layout::PROPORTIONAL_SECTIONS
        .into_iter()
        .chain([layout::SALES, layout::SELLING_EXPENSES])
        .flat_map(|section| section.rows());
    lines.chain(STATEMENT_TOTALS)
}

/// Every section whose total row is the plain sum of its lines.
fn summed_sections() -> impl Iterator<Item = Section> {
    layout::PROPORTIONAL_SECTIONS.into_iter().chain([
        layout::SALES,
        layout::SELLING_EXPENSES,
        layout::TOTAL_INCOME,
        layout::DEDUCTIBLE_ALLOWANCES,
    ])
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn recomputation_is_idempotent((writes, registered, startup) in inputs()) {
        let mut engine = engine_from(&writes, registered, startup);
        let once = engine.clone();

        engine.calculate_all();

        prop_assert_eq!(engine, once);
    }

    #[test]
    fn exempt_and_taxable_parts_add_up((writes, registered, startup) in inputs()) {
        let engine = engine_from(&writes, registered, startup);

        for row in split_rows() {
            let total = engine.amount(CellId::total(row));
            let parts = engine.amount(CellId::exempt(row)) + engine.amount(CellId::taxable(row));
            prop_assert!(close(total, parts), "row {}: {} != {}", row, total, parts);
        }
    }

    #[test]
    fn section_totals_match_their_lines((writes, registered, startup) in inputs()) {
        let engine = engine_from(&writes, registered, startup);

        for section in summed_sections() {
            for column in tax_core::Column::ALL {
                let total = engine.amount(CellId::total(section.total_row).with_column(column));
                let lines: Decimal = section
                    .rows()
                    .map(|row| engine.amount(CellId::total(row).with_column(column)))
                    .sum();
                prop_assert!(
                    close(total, lines),
                    "row {} column {:?}: {} != {}",
                    section.total_row,
                    column,
                    total,
                    lines
                );
            }
        }

        let payments: Decimal = TAX_PAYMENT_ROWS
            .map(|row| engine.amount(CellId::taxable(row)))
            .sum();
        prop_assert_eq!(engine.amount(TAX_PAID), payments);
    }

    #[test]
    fn export_ratio_is_a_fraction_for_non_negative_sales(
        domestic in 0i64..1_000_000_000_000i64,
        export in 0i64..1_000_000_000_000i64,
    ) {
        let mut engine = TaxEngine::new();
        engine.set_amount(CellId::total(4), Decimal::new(domestic, 2));
        engine.set_amount(CellId::total(5), Decimal::new(export, 2));

        let ratio = engine.amount(CellId::exempt(7));

        prop_assert!(ratio >= Decimal::ZERO && ratio <= Decimal::ONE);
        prop_assert_eq!(engine.amount(CellId::taxable(7)), Decimal::ONE - ratio);
    }

    #[test]
    fn brackets_and_credits_are_never_negative((writes, registered, startup) in inputs()) {
        let engine = engine_from(&writes, registered, startup);

        for cell in [NORMAL_TAX, ALTERNATE_TAX, MINIMUM_TAX, DONATION_CREDIT] {
            prop_assert!(engine.amount(cell) >= Decimal::ZERO, "{} is negative", cell);
        }
    }

    #[test]
    fn donation_credit_respects_cap((writes, registered, startup) in inputs()) {
        let engine = engine_from(&writes, registered, startup);
        let taxable_income = engine.amount(CellId::taxable(TAXABLE_INCOME));
        let cap = taxable_income.max(Decimal::ZERO) * engine.rates().donation_cap_rate;

        prop_assert!(engine.amount(DONATION_CREDIT) <= cap);
    }

    #[test]
    fn at_most_one_of_admitted_and_refundable((writes, registered, startup) in inputs()) {
        let engine = engine_from(&writes, registered, startup);
        let admitted = engine.amount(ADMITTED_TAX);
        let refundable = engine.amount(REFUNDABLE_TAX);

        prop_assert!(admitted >= Decimal::ZERO && refundable >= Decimal::ZERO);
        prop_assert!(admitted.is_zero() || refundable.is_zero());
    }

    #[test]
    fn reset_always_returns_to_defaults((writes, registered, startup) in inputs()) {
        let mut engine = engine_from(&writes, registered, startup);

        engine.reset_all();

        prop_assert_eq!(engine, TaxEngine::new());
    }
}
