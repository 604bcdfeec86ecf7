pub mod calculations;
pub mod cells;
pub mod engine;
pub mod fixture;
pub mod models;
pub mod utils;

pub use cells::{CellId, CellIdError, CellKind, CellStore, Column};
pub use engine::TaxEngine;
pub use models::*;
