mod cell_value;
mod tax_rates;
mod tax_results;
mod yes_no;

pub use cell_value::CellValue;
pub use tax_rates::{TaxRates, TaxRatesError};
pub use tax_results::TaxResults;
pub use yes_no::YesNo;
