//! Decoding of back-office responses into rows.

use std::io::Read;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ReportError;
use crate::types::Row;

/// Message used when a failed response carries no description.
const DEFAULT_FAILURE: &str = "Failed to fetch data.";

/// Response envelope of the P&L endpoints.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawResponse {
    /// `"True"` on success.
    #[serde(rename = "Success", default)]
    pub success: Option<String>,
    /// Rows of a successful response.
    #[serde(rename = "Success Description", default)]
    pub rows: Vec<Row>,
    /// Failure message.
    #[serde(rename = "Error Description", default)]
    pub error: Option<String>,
}

impl RawResponse {
    /// Reads a response from any `Read`.
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ReportError> {
        let mut body = String::new();
        reader.read_to_string(&mut body)?;
        Self::from_str(&body)
    }

    /// Decodes a response body. A body that is itself a JSON string is
    /// decoded a second time, as some endpoints double-encode the envelope.
    pub fn from_str(body: &str) -> Result<Self, ReportError> {
        match serde_json::from_str::<Value>(body)? {
            Value::String(inner) => Ok(serde_json::from_str(&inner)?),
            value => Ok(serde_json::from_value(value)?),
        }
    }

    /// Whether the back office reported success.
    #[inline]
    pub fn is_success(&self) -> bool {
        self.success.as_deref() == Some("True")
    }

    /// Splits a successful response into report rows and expense rows.
    pub fn into_rows(self) -> Result<FetchedRows, ReportError> {
        if !self.is_success() {
            let message = self
                .error
                .filter(|e| !e.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE.to_string());
            return Err(ReportError::Fetch(message));
        }
        Ok(FetchedRows::split(self.rows))
    }
}

/// Rows of one fetch, expenses already separated.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FetchedRows {
    /// Non-expense rows in response order.
    pub rows: Vec<Row>,
    /// Expense rows in response order.
    pub expenses: Vec<Row>,
}

impl FetchedRows {
    /// Partitions rows on their `TR_TYPE`, matching `expenses` in any case.
    pub fn split(all: Vec<Row>) -> Self {
        let (expenses, rows) = all.into_iter().partition(Row::is_expense);
        Self { rows, expenses }
    }

    /// No rows of either kind.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty() && self.expenses.is_empty()
    }
}
