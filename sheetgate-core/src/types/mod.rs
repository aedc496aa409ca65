//! Domain types for Sheetgate.
//!
//! - [`Grid`]: raw cell rows as returned by the spreadsheet service
//! - [`Record`]: one data row keyed by the trimmed header names
//! - [`SheetData`]: the `{ "data": [...] }` payload served and cached per dataset

mod grid;
mod dataset;

pub use grid::*;
pub use dataset::*;
