#![warn(missing_docs)]
//! Aggregation of broker profit & loss reports and their export to CSV,
//! XLSX and PDF.

mod aggregate;
mod columns;
mod config;
mod debounce;
mod document;
mod error;
mod expenses;
mod export;
mod format;
mod period;
mod portfolio;
mod raw;
mod report;
mod source;
mod summary;
mod types;
mod utils;
mod value;

pub use crate::aggregate::aggregate;
pub use crate::columns::{CellRenderer, CellValue, ColumnDef, ColumnKind, ColumnSet};
pub use crate::config::{DebounceConfig, PdfConfig, ReportConfig};
pub use crate::debounce::Debouncer;
pub use crate::document::{Amount, DocumentColumn, ReportDocument, Section};
pub use crate::error::ReportError;
pub use crate::expenses::{clean_code, consolidate};
pub use crate::export::{ExportFormat, Exporter};
pub use crate::format::{
    CsvRenderer, PdfLayout, PdfRenderer, Renderer, TextOp, Tint, XlsxRenderer,
};
pub use crate::period::{FinancialYear, ReportPeriod};
pub use crate::portfolio::{PortfolioDraft, Side};
pub use crate::raw::{FetchedRows, RawResponse};
pub use crate::report::{Report, ReportBuilder};
pub use crate::source::{JsonFileSource, RowSource, fetch_rows};
pub use crate::summary::summarize;
pub use crate::types::*;
pub use crate::utils::{
    export_timestamp, format_date, format_indian, format_inr, format_inr_plain, format_plain,
    parse_date,
};
pub use crate::value::{DisplayValue, amount_or_zero, normalize, normalize_str, number_or_zero};
