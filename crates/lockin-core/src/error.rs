//! Typed failures the CLI maps to exit codes.
//!
//! Operation failures (hosts file I/O, script install, `at` submission) stay
//! `anyhow::Error` with context; only the kinds below change how a run ends.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LockinError {
    /// Missing or contradictory arguments.
    #[error("{0}")]
    Usage(String),

    /// Site string is not a syntactically valid domain name.
    #[error("Invalid site: {site}")]
    InvalidSite { site: String },

    /// Duration unit tag outside `m|h|d|w`.
    #[error("Invalid time unit: {0}")]
    InvalidUnit(String),

    /// Unblock time does not fit the calendar.
    #[error("unblock time out of range: {minutes} minutes from now")]
    TimeOutOfRange { minutes: i64 },
}
