//! Data sources feeding the report engine.

use std::fs::File;
use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::ReportError;
use crate::period::ReportPeriod;
use crate::raw::{FetchedRows, RawResponse};

/// Something that can answer a P&L request for a period.
///
/// Implementations wrap the back-office client; an invalid session must be
/// reported as [`ReportError::SessionExpired`].
pub trait RowSource {
    /// Fetches the raw response for `period`.
    fn fetch(&self, period: &ReportPeriod) -> Result<RawResponse, ReportError>;
}

/// Source reading a saved response from disk, whatever the period.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    /// Source backed by the file at `path`.
    #[inline]
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl RowSource for JsonFileSource {
    fn fetch(&self, _period: &ReportPeriod) -> Result<RawResponse, ReportError> {
        RawResponse::from_reader(File::open(&self.path)?)
    }
}

/// Fetches and splits the rows of a period.
///
/// Any failure aborts the report as a whole; an expired session is passed
/// through untouched so callers can tell it apart from other failures.
pub fn fetch_rows<S: RowSource + ?Sized>(
    source: &S,
    period: &ReportPeriod,
) -> Result<FetchedRows, ReportError> {
    let result = source.fetch(period).and_then(RawResponse::into_rows);
    match &result {
        Err(ReportError::SessionExpired) => warn!(period = %period.label, "session expired"),
        Err(err) => warn!(period = %period.label, error = %err, "fetch failed"),
        Ok(_) => {}
    }
    result
}
