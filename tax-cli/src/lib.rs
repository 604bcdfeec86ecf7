pub mod edit;
pub mod logging;
pub mod rates;
pub mod report;
