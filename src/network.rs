//! Network URL constants.

/// Default REST API base URL.
pub const DEFAULT_API_URL: &str = "https://ftx.com/api";
