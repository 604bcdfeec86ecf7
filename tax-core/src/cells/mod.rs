//! Cell addressing and storage.
//!
//! Cells are addressed the way the worksheet addresses them: a column letter
//! naming the role of the amount (`C` total, `D` exempt, `E` taxable) followed
//! by the line-item row. Those coordinates are the public contract shared
//! with forms and fixture files.

mod cell_id;
pub mod layout;
mod store;

pub use cell_id::{CellId, CellIdError, Column, MAX_ROW};
pub use layout::{CellKind, Section};
pub use store::CellStore;
