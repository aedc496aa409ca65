//! Raw grid and record types.

use indexmap::IndexMap;

/// A single spreadsheet row: cell strings in column order.
pub type Row = Vec<String>;

/// Rows of cell strings for a fixed range. The first row is the header.
pub type Grid = Vec<Row>;

/// One data row keyed by header name.
///
/// Keys keep header order so the JSON body lists fields left to right.
pub type Record = IndexMap<String, String>;
