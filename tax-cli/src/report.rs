//! Plain-text rendering of engine output in Pakistani rupees.

use rust_decimal::Decimal;
use tax_core::calculations::common::round_half_up;
use tax_core::fixture::Mismatch;
use tax_core::{CellId, CellValue, TaxResults};

/// Formats an amount as rupees with thousands separators and two decimals.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_cli::report::format_pkr;
///
/// assert_eq!(format_pkr(dec!(24867391.304)), "Rs. 24,867,391.30");
/// assert_eq!(format_pkr(dec!(-441660.235)), "-Rs. 441,660.24");
/// ```
pub fn format_pkr(amount: Decimal) -> String {
    let rounded = round_half_up(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((&digits, "00"));

    format!("{sign}Rs. {}.{fraction}", group_thousands(whole))
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (idx, digit) in whole.chars().enumerate() {
        if idx > 0 && (whole.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Formats a ratio as a percentage with two decimals.
///
/// Ratios beyond the decimal range saturate rather than overflow.
pub fn format_percent(ratio: Decimal) -> String {
    format!("{:.2}%", round_half_up(ratio.saturating_mul(Decimal::ONE_HUNDRED)))
}

/// One `CELL  value` line.
pub fn format_cell(
    cell: CellId,
    value: CellValue,
) -> String {
    let cell = cell.to_string();
    match value {
        CellValue::Number(amount) => format!("{cell:<6}{}", format_pkr(amount)),
        CellValue::Flag(flag) => format!("{cell:<6}{flag}"),
    }
}

/// Labelled summary of the headline results.
pub fn format_results(results: &TaxResults) -> String {
    let rows = [
        ("Domestic sales", format_pkr(results.domestic_sales)),
        ("Export sales", format_pkr(results.export_sales)),
        ("Gross revenue", format_pkr(results.gross_revenue)),
        ("Export ratio", format_percent(results.export_ratio)),
        ("Registered exporter", results.registered.to_string()),
        ("Startup relief", results.startup.to_string()),
        ("Accounting profit", format_pkr(results.accounting_profit)),
        ("Taxable income", format_pkr(results.taxable_income)),
        ("Normal tax", format_pkr(results.normal_tax)),
        ("Final tax", format_pkr(results.final_tax)),
        ("Alternate tax", format_pkr(results.alternate_tax)),
        ("Minimum tax", format_pkr(results.minimum_tax)),
        ("Tax chargeable", format_pkr(results.tax_chargeable)),
        ("Donation credit", format_pkr(results.donation_credit)),
        ("Other credits", format_pkr(results.other_credits)),
        ("Total credits", format_pkr(results.total_credits)),
        ("Net tax liability", format_pkr(results.net_tax_liability)),
        ("Tax already paid", format_pkr(results.tax_paid)),
        ("Admitted tax", format_pkr(results.admitted_tax)),
        ("Refundable tax", format_pkr(results.refundable_tax)),
    ];

    rows.into_iter()
        .map(|(label, value)| format!("{label:<22}{value:>24}\n"))
        .collect()
}

/// One line per mismatch, or a single confirmation line.
pub fn format_verification(mismatches: &[Mismatch]) -> String {
    if mismatches.is_empty() {
        return "All reference figures match.\n".to_string();
    }
    mismatches
        .iter()
        .map(|mismatch| {
            format!(
                "MISMATCH {} ({}): expected {}, got {}\n",
                mismatch.label,
                mismatch.cell,
                format_pkr(mismatch.expected),
                format_pkr(mismatch.actual)
            )
        })
        .collect()
}
