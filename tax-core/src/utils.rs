use std::str::FromStr;

use rust_decimal::Decimal;

/// Normalizes input for decimal parsing: trims whitespace and removes commas (thousands separator).
fn normalize_decimal_input(s: &str) -> String {
    s.trim().replace(',', "")
}

/// Parses a decimal amount, rejecting anything that is not a number.
///
/// Accepts comma as thousands separator (e.g. `"1,234.56"`) and scientific
/// notation (e.g. `"1.5e6"`). Empty or whitespace-only input is zero.
///
/// # Errors
///
/// Returns the [`rust_decimal::Error`] of the scientific-notation parse when
/// neither plain nor scientific notation fits.
pub fn try_parse_amount(s: &str) -> Result<Decimal, rust_decimal::Error> {
    let normalized = normalize_decimal_input(s);
    if normalized.is_empty() {
        return Ok(Decimal::ZERO);
    }
    Decimal::from_str(&normalized).or_else(|_| Decimal::from_scientific(&normalized))
}

/// Parses a raw cell entry into an amount, coercing anything unusable to zero.
///
/// Same grammar as [`try_parse_amount`], but unparsable input is zero with a
/// warning in the log; this function never fails.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::utils::parse_amount;
///
/// assert_eq!(parse_amount("1,500,000"), dec!(1500000));
/// assert_eq!(parse_amount("2.5e3"), dec!(2500));
/// assert_eq!(parse_amount("abc"), dec!(0));
/// ```
pub fn parse_amount(s: &str) -> Decimal {
    try_parse_amount(s).unwrap_or_else(|e| {
        tracing::warn!(input = %s, "invalid amount coerced to zero: {}", e);
        Decimal::ZERO
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn parse_amount_accepts_comma_thousands_separator() {
        assert_eq!(parse_amount("1,234.56"), dec!(1234.56));
        assert_eq!(parse_amount("100,000,000"), dec!(100000000));
    }

    #[test]
    fn parse_amount_trims_whitespace() {
        assert_eq!(parse_amount("  123.45  "), dec!(123.45));
    }

    #[test]
    fn parse_amount_empty_is_zero() {
        assert_eq!(parse_amount(""), Decimal::ZERO);
        assert_eq!(parse_amount("   "), Decimal::ZERO);
    }

    #[test]
    fn parse_amount_accepts_negative_and_scientific() {
        assert_eq!(parse_amount("-250"), dec!(-250));
        assert_eq!(parse_amount("1.5e6"), dec!(1500000));
    }

    #[test]
    fn parse_amount_coerces_garbage_to_zero() {
        for raw in ["abc", "12abc", "NaN", "inf", "--1", "1.2.3", "Yes"] {
            assert_eq!(parse_amount(raw), Decimal::ZERO, "input {raw:?}");
        }
    }

    #[test]
    fn try_parse_amount_reports_garbage() {
        assert!(try_parse_amount("12abc").is_err());
        assert_eq!(try_parse_amount(" 1,000 "), Ok(dec!(1000)));
        assert_eq!(try_parse_amount(""), Ok(dec!(0)));
    }

    #[test]
    fn parse_amount_coerces_out_of_range_to_zero() {
        assert_eq!(parse_amount("1e40"), Decimal::ZERO);
    }

    proptest! {
        #[test]
        fn parse_amount_never_panics(raw in ".*") {
            let _ = parse_amount(&raw);
        }

        #[test]
        fn parse_amount_reads_back_rendered_amounts(units in -1_000_000_000_000i64..1_000_000_000_000i64) {
            let amount = Decimal::new(units, 2);

            prop_assert_eq!(parse_amount(&amount.to_string()), amount);
        }
    }
}
