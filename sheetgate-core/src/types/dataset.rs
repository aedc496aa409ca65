//! Dataset payload served by every route.

use serde::{Deserialize, Serialize};

use super::Record;

/// Mapped records for one dataset, serialized as `{ "data": [...] }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SheetData {
    /// One record per non-header row
    pub data: Vec<Record>,
}

impl SheetData {
    /// Wraps mapped records.
    pub fn new(data: Vec<Record>) -> Self {
        Self { data }
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the sheet had a header but no data rows.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
