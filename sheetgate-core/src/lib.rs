//! # Sheetgate Core
//!
//! Core types, errors, and traits shared by the Sheetgate crates.
//!
//! - **Types**: raw grids, header-keyed records, the served dataset payload
//! - **Mapper**: grid to record conversion
//! - **Errors**: tagged failure kinds for auth, remote and data problems
//! - **Traits**: the [`SheetFetcher`] seam used by the request handler
//!
//! ## Example
//!
//! ```rust
//! use sheetgate_core::rows_to_records;
//!
//! let grid = vec![
//!     vec!["Name".to_string(), "Age".to_string()],
//!     vec!["Alice".to_string(), "30".to_string()],
//! ];
//! let records = rows_to_records(&grid).unwrap();
//! assert_eq!(records[0]["Name"], "Alice");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms, clippy::all)]

pub mod constants;
pub mod error;
pub mod mapper;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use constants::*;
pub use error::{Result, SheetError};
pub use mapper::{into_sheet_data, rows_to_records, trim_header};
pub use traits::*;
pub use types::*;
