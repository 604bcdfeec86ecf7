use rust_decimal::Decimal;

use super::YesNo;

/// Headline figures of a completed calculation.
///
/// Produced by [`crate::TaxEngine::get_tax_results`]; every amount is read
/// from the recomputed cell store, so a summary is never stale relative to
/// the engine it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaxResults {
    /// Taxable portion of taxable income (E126).
    pub taxable_income: Decimal,

    /// Normal income tax (E129).
    pub normal_tax: Decimal,

    /// Final/fixed tax on exempt export sales (E130).
    pub final_tax: Decimal,

    /// Alternate corporate tax on accounting profit (E131).
    pub alternate_tax: Decimal,

    /// Minimum tax on taxable turnover (E132).
    pub minimum_tax: Decimal,

    /// Tax chargeable before credits (E128).
    pub tax_chargeable: Decimal,

    /// Charitable donation credit (E140).
    pub donation_credit: Decimal,

    /// Other credits, including startup relief (E141).
    pub other_credits: Decimal,

    /// Sum of all credits (E139).
    pub total_credits: Decimal,

    /// Tax chargeable net of credits (E144).
    pub net_tax_liability: Decimal,

    /// Withholding and advance tax already paid (E146).
    pub tax_paid: Decimal,

    /// Amount still payable (E152). Zero whenever a refund is due.
    pub admitted_tax: Decimal,

    /// Amount refundable (E153). Zero whenever tax is payable.
    pub refundable_tax: Decimal,

    /// Export sales over gross revenue (D7).
    pub export_ratio: Decimal,

    /// Registration flag (D6).
    pub registered: YesNo,

    /// Startup flag (C142).
    pub startup: YesNo,

    pub accounting_profit: Decimal,
    pub domestic_sales: Decimal,
    pub export_sales: Decimal,
    pub gross_revenue: Decimal,
}

impl std::fmt::Display for TaxResults {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        writeln!(f, "Gross revenue:            {}", self.gross_revenue)?;
        writeln!(f, "Export ratio:             {}", self.export_ratio)?;
        writeln!(f, "Registered:               {}", self.registered)?;
        writeln!(f, "Accounting profit:        {}", self.accounting_profit)?;
        writeln!(f, "Taxable income:           {}", self.taxable_income)?;
        writeln!(f, "Normal tax:               {}", self.normal_tax)?;
        writeln!(f, "Final tax:                {}", self.final_tax)?;
        writeln!(f, "Alternate tax:            {}", self.alternate_tax)?;
        writeln!(f, "Minimum tax:              {}", self.minimum_tax)?;
        writeln!(f, "Tax chargeable:           {}", self.tax_chargeable)?;
        writeln!(f, "Total credits:            {}", self.total_credits)?;
        writeln!(f, "Tax paid:                 {}", self.tax_paid)?;
        writeln!(f, "Admitted tax:             {}", self.admitted_tax)?;
        write!(f, "Refundable tax:           {}", self.refundable_tax)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn sample() -> TaxResults {
        TaxResults {
            taxable_income: dec!(1000000),
            normal_tax: dec!(290000),
            final_tax: dec!(0),
            alternate_tax: dec!(170000),
            minimum_tax: dec!(2500000),
            tax_chargeable: dec!(4710000),
            donation_credit: dec!(0),
            other_credits: dec!(0),
            total_credits: dec!(0),
            net_tax_liability: dec!(4710000),
            tax_paid: dec!(5000000),
            admitted_tax: dec!(0),
            refundable_tax: dec!(290000),
            export_ratio: dec!(0),
            registered: YesNo::Yes,
            startup: YesNo::No,
            accounting_profit: dec!(1000000),
            domestic_sales: dec!(200000000),
            export_sales: dec!(0),
            gross_revenue: dec!(200000000),
        }
    }

    #[test]
    fn display_lists_labelled_figures() {
        let text = sample().to_string();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 14);
        assert_eq!(lines[0], "Gross revenue:            200000000");
        assert_eq!(lines[2], "Registered:               Yes");
        assert_eq!(lines[8], "Minimum tax:              2500000");
        assert_eq!(lines[13], "Refundable tax:           290000");
    }

    #[test]
    fn display_has_no_trailing_newline() {
        assert!(!sample().to_string().ends_with('\n'));
    }
}
