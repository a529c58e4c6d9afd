//! Utility functions shared by the HTTP handlers

use chrono::{DateTime, Utc};

/// Formats a DateTime as RFC 3339 with millisecond precision
///
/// Example output: "2025-06-14T10:03:54.374Z"
pub fn format_timestamp(dt: DateTime<Utc>) -> String {
    dt.format("%Y-%m-%dT%H:%M:%S%.3fZ").to_string()
}

/// Gets the current time formatted for API responses
pub fn current_timestamp() -> String {
    format_timestamp(Utc::now())
}
