//! Google Sheets access for Sheetgate.
//!
//! - [`ServiceAccountKey`]: the JSON key file issued for a service account
//! - [`ServiceAccountAuth`]: mints and caches OAuth access tokens from that key
//! - [`SheetsClient`]: Sheets v4 REST client, the production [`SheetFetcher`]
//!
//! [`SheetFetcher`]: sheetgate_core::SheetFetcher

mod auth;
mod client;
mod credentials;
mod types;

pub use auth::{ServiceAccountAuth, StaticToken, TokenSource};
pub use client::{SheetsClient, SheetsConfig};
pub use credentials::ServiceAccountKey;
pub use types::{SpreadsheetMetadata, ValueRange};
