use std::path::Path;

use anyhow::{Context, Result};
use tax_core::TaxRates;
use tracing::debug;

/// Reads a TOML rates file. Keys left out keep their defaults.
///
/// # Errors
///
/// Returns an error when the file cannot be read, is not valid TOML for
/// [`TaxRates`], or holds a rate out of range.
pub fn load_rates(path: &Path) -> Result<TaxRates> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read rates file {}", path.display()))?;
    let rates = parse_rates(&text)
        .with_context(|| format!("invalid rates file {}", path.display()))?;
    debug!(?rates, "loaded tax rates");
    Ok(rates)
}

/// Parses and validates TOML rates text.
///
/// # Errors
///
/// Returns an error for malformed TOML or a rate out of range.
pub fn parse_rates(text: &str) -> Result<TaxRates> {
    let rates: TaxRates = toml::from_str(text)?;
    rates.validate()?;
    Ok(rates)
}
