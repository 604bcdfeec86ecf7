//! Statutory rates used by the tax-bracket and credit steps.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by [`TaxRates::validate`].
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TaxRatesError {
    /// The normal corporate rate must be between 0 and 1.
    #[error("normal tax rate must be between 0 and 1, got {0}")]
    InvalidNormalRate(Decimal),

    /// The final/fixed rate on exempt export sales must be between 0 and 1.
    #[error("final tax rate must be between 0 and 1, got {0}")]
    InvalidFinalRate(Decimal),

    /// The alternate corporate rate must be between 0 and 1.
    #[error("alternate tax rate must be between 0 and 1, got {0}")]
    InvalidAlternateRate(Decimal),

    /// The minimum turnover rate must be between 0 and 1.
    #[error("minimum tax rate must be between 0 and 1, got {0}")]
    InvalidMinimumRate(Decimal),

    /// The turnover threshold for minimum tax must be non-negative.
    #[error("minimum tax threshold must be non-negative, got {0}")]
    InvalidMinimumThreshold(Decimal),

    /// The donation credit cap must be between 0 and 1.
    #[error("donation cap rate must be between 0 and 1, got {0}")]
    InvalidDonationCapRate(Decimal),
}

/// Rates and limits applied after taxable income is known.
///
/// [`Default`] holds the rates of the worked example: 29% normal tax, 2.5%
/// final tax on exempt exports, 17% alternate corporate tax, 1.25% minimum
/// tax on taxable turnover above Rs. 100 million, and a donation credit
/// capped at 20% of taxable income.
///
/// # Example
///
/// ```
/// use rust_decimal_macros::dec;
/// use tax_core::TaxRates;
///
/// let rates = TaxRates {
///     minimum_tax_threshold: dec!(0),
///     ..TaxRates::default()
/// };
///
/// assert_eq!(rates.validate(), Ok(()));
/// assert_eq!(rates.normal_rate, dec!(0.29));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaxRates {
    /// Rate applied to the taxable portion of taxable income (E129).
    pub normal_rate: Decimal,

    /// Rate applied to exempt export sales (E130).
    pub final_rate: Decimal,

    /// Rate applied to raw accounting profit (E131).
    pub alternate_rate: Decimal,

    /// Rate applied to taxable gross revenue (E132).
    pub minimum_rate: Decimal,

    /// Minimum tax applies only when taxable gross revenue is strictly
    /// greater than this amount.
    pub minimum_tax_threshold: Decimal,

    /// Upper bound of the donation credit as a share of taxable income.
    pub donation_cap_rate: Decimal,
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            normal_rate: dec!(0.29),
            final_rate: dec!(0.025),
            alternate_rate: dec!(0.17),
            minimum_rate: dec!(0.0125),
            minimum_tax_threshold: dec!(100000000),
            donation_cap_rate: dec!(0.20),
        }
    }
}

impl TaxRates {
    /// Validates that every rate is a fraction and the threshold is not negative.
    ///
    /// # Errors
    ///
    /// Returns the [`TaxRatesError`] for the first field out of range.
    pub fn validate(&self) -> Result<(), TaxRatesError> {
        if !is_fraction(self.normal_rate) {
            return Err(TaxRatesError::InvalidNormalRate(self.normal_rate));
        }
        if !is_fraction(self.final_rate) {
            return Err(TaxRatesError::InvalidFinalRate(self.final_rate));
        }
        if !is_fraction(self.alternate_rate) {
            return Err(TaxRatesError::InvalidAlternateRate(self.alternate_rate));
        }
        if !is_fraction(self.minimum_rate) {
            return Err(TaxRatesError::InvalidMinimumRate(self.minimum_rate));
        }
        if self.minimum_tax_threshold < Decimal::ZERO {
            return Err(TaxRatesError::InvalidMinimumThreshold(
                self.minimum_tax_threshold,
            ));
        }
        if !is_fraction(self.donation_cap_rate) {
            return Err(TaxRatesError::InvalidDonationCapRate(
                self.donation_cap_rate,
            ));
        }
        Ok(())
    }
}

fn is_fraction(rate: Decimal) -> bool {
    rate >= Decimal::ZERO && rate <= Decimal::ONE
}
