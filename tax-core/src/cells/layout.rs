//! Fixed row layout of the corporate return worksheet.
//!
//! | Rows     | Block |
//! |----------|-------|
//! | 3–7      | Gross revenue, registration flag (D6), export ratio (D7) |
//! | 8–13     | Selling expenses and net revenue |
//! | 15–26    | Cost of sales and gross profit |
//! | 28–66    | Management expenses, other revenues, accounting profit |
//! | 68–99    | Inadmissible deductions (add-backs) |
//! | 101–108  | Admissible deductions, income before depreciation |
//! | 110–115  | Tax depreciation, business income |
//! | 116–126  | Other income heads, allowances, taxable income |
//! | 128–137  | Tax brackets and tax chargeable |
//! | 139–144  | Credits, startup flag (C142), net liability |
//! | 146–153  | Tax already paid, admitted and refundable tax |

use std::ops::RangeInclusive;

use super::{CellId, Column};
use crate::models::YesNo;

/// A total row and the contiguous line-item rows it sums.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub total_row: u16,
    pub first_row: u16,
    pub last_row: u16,
}

impl Section {
    const fn new(
        total_row: u16,
        first_row: u16,
        last_row: u16,
    ) -> Self {
        Self {
            total_row,
            first_row,
            last_row,
        }
    }

    pub fn rows(&self) -> RangeInclusive<u16> {
        self.first_row..=self.last_row
    }

    pub fn contains(
        &self,
        row: u16,
    ) -> bool {
        self.rows().contains(&row)
    }
}

// ─── revenue ─────────────────────────────────────────────────────────────────

pub const GROSS_REVENUE: u16 = 3;
pub const DOMESTIC_SALES: u16 = 4;
pub const EXPORT_SALES: u16 = 5;
pub const EXPORT_RATIO: u16 = 7;

pub const DOMESTIC_COMMISSION: u16 = 9;
pub const FOREIGN_COMMISSION: u16 = 10;
pub const REBATE_DRAWBACK: u16 = 11;
pub const NET_REVENUE: u16 = 13;
pub const GROSS_PROFIT: u16 = 26;
pub const ACCOUNTING_PROFIT: u16 = 66;

/// Domestic and export sales summed into gross revenue.
pub const SALES: Section = Section::new(GROSS_REVENUE, DOMESTIC_SALES, EXPORT_SALES);
pub const SELLING_EXPENSES: Section = Section::new(8, 9, 11);
pub const COST_OF_SALES: Section = Section::new(15, 17, 25);
pub const MANAGEMENT_EXPENSES: Section = Section::new(28, 29, 54);
pub const OTHER_REVENUES: Section = Section::new(56, 57, 65);

// ─── income ──────────────────────────────────────────────────────────────────

pub const INADMISSIBLE_DEDUCTIONS: Section = Section::new(68, 69, 99);
pub const ADMISSIBLE_DEDUCTIONS: Section = Section::new(101, 102, 106);
pub const INCOME_BEFORE_DEPRECIATION: u16 = 108;
pub const TAX_DEPRECIATION: Section = Section::new(110, 111, 113);
pub const BUSINESS_INCOME: u16 = 115;

/// Business income (115) plus property, capital gains, other sources,
/// foreign and agricultural income (116–120).
pub const TOTAL_INCOME: Section = Section::new(121, 115, 120);
pub const OTHER_INCOME_HEADS: RangeInclusive<u16> = 116..=120;

/// Workers' welfare fund is the single allowance line.
pub const DEDUCTIBLE_ALLOWANCES: Section = Section::new(123, 124, 124);
pub const TAXABLE_INCOME: u16 = 126;

/// Inadmissible add-backs whose totals mirror expense and revenue lines
/// reported elsewhere: accounting losses on disposals, accounting
/// amortisation and depreciation, and accounting gains on disposals.
pub const LINKED_ADD_BACKS: [(u16, &[u16]); 6] = [
    (94, &[51]),
    (95, &[52]),
    (96, &[53, 24]),
    (97, &[54, 25]),
    (98, &[63]),
    (99, &[64]),
];

/// Sections whose every line is split by the export ratio.
pub const PROPORTIONAL_SECTIONS: [Section; 6] = [
    COST_OF_SALES,
    MANAGEMENT_EXPENSES,
    OTHER_REVENUES,
    INADMISSIBLE_DEDUCTIONS,
    ADMISSIBLE_DEDUCTIONS,
    TAX_DEPRECIATION,
];

/// Rows carrying a total or a difference in all three columns.
pub const STATEMENT_TOTALS: [u16; 16] = [
    GROSS_REVENUE,
    SELLING_EXPENSES.total_row,
    NET_REVENUE,
    COST_OF_SALES.total_row,
    GROSS_PROFIT,
    MANAGEMENT_EXPENSES.total_row,
    OTHER_REVENUES.total_row,
    ACCOUNTING_PROFIT,
    INADMISSIBLE_DEDUCTIONS.total_row,
    ADMISSIBLE_DEDUCTIONS.total_row,
    INCOME_BEFORE_DEPRECIATION,
    TAX_DEPRECIATION.total_row,
    BUSINESS_INCOME,
    TOTAL_INCOME.total_row,
    DEDUCTIBLE_ALLOWANCES.total_row,
    TAXABLE_INCOME,
];

// ─── tax ─────────────────────────────────────────────────────────────────────

pub const TAX_CHARGEABLE: CellId = CellId::taxable(128);
pub const NORMAL_TAX: CellId = CellId::taxable(129);
pub const FINAL_TAX: CellId = CellId::taxable(130);
pub const ALTERNATE_TAX: CellId = CellId::taxable(131);
pub const MINIMUM_TAX: CellId = CellId::taxable(132);
pub const MINIMUM_TAX_EXCESS: CellId = CellId::taxable(133);
pub const HIGH_EARNERS_TAX: CellId = CellId::taxable(134);
pub const DEEMED_INCOME_TAX: CellId = CellId::taxable(135);
pub const ALTERNATE_TAX_EXCESS: CellId = CellId::taxable(136);
pub const MINIMUM_TAX_CHARGEABLE_EXCESS: CellId = CellId::taxable(137);

pub const TOTAL_CREDITS: CellId = CellId::taxable(139);
pub const DONATIONS: CellId = CellId::total(140);
pub const DONATION_CREDIT: CellId = CellId::taxable(140);
pub const OTHER_CREDITS_INPUT: CellId = CellId::total(141);
pub const OTHER_CREDITS: CellId = CellId::taxable(141);
pub const NET_TAX_LIABILITY: CellId = CellId::taxable(144);

pub const TAX_PAID: CellId = CellId::taxable(146);
/// Withholding, advance, advance u/s 147(A) and advance u/s 147(5B).
pub const TAX_PAYMENT_ROWS: RangeInclusive<u16> = 147..=150;
pub const ADMITTED_TAX: CellId = CellId::taxable(152);
pub const REFUNDABLE_TAX: CellId = CellId::taxable(153);

// ─── flags ───────────────────────────────────────────────────────────────────

/// Whether the company is registered with the software export board (D6).
pub const REGISTRATION_FLAG: CellId = CellId::exempt(6);
pub const DEFAULT_REGISTRATION: YesNo = YesNo::Yes;

/// Whether the company claims startup relief (C142).
pub const STARTUP_FLAG: CellId = CellId::total(142);
pub const DEFAULT_STARTUP: YesNo = YesNo::No;

/// Role of a cell in the worksheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKind {
    /// Entered by the caller.
    Input,
    /// Overwritten on every recomputation.
    Derived,
    /// One of the two Yes/No cells.
    Flag,
    /// Part of the grid but read by no formula.
    Unused,
}

/// Classifies a cell by the fixed layout.
pub fn kind(cell: CellId) -> CellKind {
    use CellKind::{Derived, Input, Unused};
    use Column::{Taxable, Total};

    if cell == REGISTRATION_FLAG || cell == STARTUP_FLAG {
        return CellKind::Flag;
    }

    let row = cell.row();
    let column = cell.column();

    if STATEMENT_TOTALS.contains(&row) || row == EXPORT_RATIO {
        return Derived;
    }

    if row == DOMESTIC_SALES || row == EXPORT_SALES || SELLING_EXPENSES.contains(row) {
        return if column == Total { Input } else { Derived };
    }

    if PROPORTIONAL_SECTIONS.iter().any(|s| s.contains(row)) {
        let linked = LINKED_ADD_BACKS.iter().any(|(target, _)| *target == row);
        return if column == Total && !linked { Input } else { Derived };
    }

    if OTHER_INCOME_HEADS.contains(&row) || DEDUCTIBLE_ALLOWANCES.contains(row) {
        return if column == Taxable { Derived } else { Input };
    }

    match (column, row) {
        (Total, 140 | 141) => Input,
        (Taxable, 128..=137 | 139..=141 | 144 | 146 | 152 | 153) => Derived,
        (Taxable, r) if TAX_PAYMENT_ROWS.contains(&r) => Input,
        _ => Unused,
    }
}

/// Every input cell, in worksheet order.
pub fn input_cells() -> impl Iterator<Item = CellId> {
    CellId::all().filter(|cell| kind(*cell) == CellKind::Input)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn flags_are_classified_as_flags() {
        assert_eq!(kind(REGISTRATION_FLAG), CellKind::Flag);
        assert_eq!(kind(STARTUP_FLAG), CellKind::Flag);
    }

    #[test]
    fn revenue_inputs_and_splits() {
        assert_eq!(kind(CellId::total(4)), CellKind::Input);
        assert_eq!(kind(CellId::total(5)), CellKind::Input);
        assert_eq!(kind(CellId::exempt(5)), CellKind::Derived);
        assert_eq!(kind(CellId::taxable(4)), CellKind::Derived);
        assert_eq!(kind(CellId::total(3)), CellKind::Derived);
        assert_eq!(kind(CellId::exempt(7)), CellKind::Derived);
    }

    #[test]
    fn proportional_lines_take_totals_only() {
        for section in PROPORTIONAL_SECTIONS {
            assert_eq!(kind(CellId::total(section.first_row)), CellKind::Input);
            assert_eq!(kind(CellId::exempt(section.first_row)), CellKind::Derived);
            assert_eq!(kind(CellId::taxable(section.last_row)), CellKind::Derived);
            assert_eq!(kind(CellId::total(section.total_row)), CellKind::Derived);
        }
    }

    #[test]
    fn linked_add_backs_are_derived() {
        for (row, _) in LINKED_ADD_BACKS {
            assert_eq!(kind(CellId::total(row)), CellKind::Derived, "C{row}");
        }
        assert_eq!(kind(CellId::total(93)), CellKind::Input);
    }

    #[test]
    fn other_income_heads_take_total_and_exempt() {
        for row in OTHER_INCOME_HEADS {
            assert_eq!(kind(CellId::total(row)), CellKind::Input);
            assert_eq!(kind(CellId::exempt(row)), CellKind::Input);
            assert_eq!(kind(CellId::taxable(row)), CellKind::Derived);
        }
        assert_eq!(kind(CellId::exempt(124)), CellKind::Input);
    }

    #[test]
    fn tax_section_classification() {
        assert_eq!(kind(TAX_CHARGEABLE), CellKind::Derived);
        assert_eq!(kind(DONATIONS), CellKind::Input);
        assert_eq!(kind(OTHER_CREDITS_INPUT), CellKind::Input);
        assert_eq!(kind(CellId::taxable(147)), CellKind::Input);
        assert_eq!(kind(CellId::taxable(150)), CellKind::Input);
        assert_eq!(kind(ADMITTED_TAX), CellKind::Derived);
        assert_eq!(kind(REFUNDABLE_TAX), CellKind::Derived);
    }

    #[test]
    fn gaps_in_the_grid_are_unused() {
        assert_eq!(kind(CellId::total(1)), CellKind::Unused);
        assert_eq!(kind(CellId::total(14)), CellKind::Unused);
        assert_eq!(kind(CellId::taxable(138)), CellKind::Unused);
        assert_eq!(kind(CellId::total(160)), CellKind::Unused);
    }

    #[test]
    fn input_cell_count_matches_layout() {
        // 2 sales + 3 selling + 9 + 26 + 9 + 25 + 5 + 3 line items
        // + 10 other income cells + 2 allowance cells + 2 credit inputs
        // + 4 payments
        assert_eq!(input_cells().count(), 100);
    }
}
