//! Fixed values shared by the Sheetgate crates.

use std::time::Duration;

// ═══════════════════════════════════════════════════════════════════════════════
// CACHE
// ═══════════════════════════════════════════════════════════════════════════════

/// Lifetime of a cached dataset in seconds.
pub const CACHE_TTL_SECONDS: u64 = 300;

/// Lifetime of a cached dataset.
pub const CACHE_TTL: Duration = Duration::from_secs(CACHE_TTL_SECONDS);

// ═══════════════════════════════════════════════════════════════════════════════
// GOOGLE SHEETS
// ═══════════════════════════════════════════════════════════════════════════════

/// Range read from every spreadsheet: columns A to Z of the first sheet, all used rows.
pub const DEFAULT_RANGE: &str = "Sheet1!A1:Z";

/// Sheets v4 API root.
pub const SHEETS_API_BASE_URL: &str = "https://sheets.googleapis.com";

/// Read-only OAuth scope for the Sheets API.
pub const SHEETS_READONLY_SCOPE: &str = "https://www.googleapis.com/auth/spreadsheets.readonly";

/// Default OAuth token endpoint when the key file omits `token_uri`.
pub const GOOGLE_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// Service-account key file, relative to the working directory.
pub const DEFAULT_CREDENTIALS_FILE: &str = "sheet.json";

// ═══════════════════════════════════════════════════════════════════════════════
// HTTP SERVER
// ═══════════════════════════════════════════════════════════════════════════════

/// Listening port.
pub const DEFAULT_PORT: u16 = 3000;

/// Dataset key for the United School roster.
pub const UNITED_SCHOOL_KEY: &str = "united-school";

/// Dataset key for the St. Mary roster.
pub const ST_MARY_KEY: &str = "st-mary";

/// Body text of every failure response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal Server Error";
