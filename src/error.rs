//! Errors raised while loading, aggregating and exporting P&L reports.

/// Error while decoding a back-office response or exporting a report.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    /// I/O error while reading a response or writing an export.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The response body is not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// The CSV writer rejected a record.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    /// The spreadsheet encoder failed.
    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),
    /// The PDF encoder failed.
    #[error("PDF error: {0}")]
    Pdf(String),
    /// The configuration file could not be parsed.
    #[error("Config error: {0}")]
    Config(#[from] toml::de::Error),
    /// The back office answered with a failure.
    #[error("Fetch failed: {0}")]
    Fetch(String),
    /// The session token is no longer valid.
    #[error("Session expired")]
    SessionExpired,
    /// A date could not be parsed.
    #[error("Invalid date '{value}'")]
    Date {
        /// The rejected input.
        value: String,
    },
    /// The requested end date lies outside the financial year.
    #[error("Date {to} is outside financial year {label}")]
    PeriodOutOfRange {
        /// Financial year label.
        label: String,
        /// The rejected end date.
        to: chrono::NaiveDate,
    },
    /// No column with this id exists.
    #[error("Unknown column '{0}'")]
    UnknownColumn(String),
    /// The column cannot be toggled.
    #[error("Column '{0}' cannot be toggled")]
    ColumnLocked(String),
    /// The debouncer worker is no longer running.
    #[error("Debouncer is closed")]
    DebouncerClosed,
}
