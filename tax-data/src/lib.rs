//! Loading of worksheet inputs from CSV files.

mod loader;

pub use loader::{CellAssignment, CsvLoadError, apply, load_from_file, load_from_str};
