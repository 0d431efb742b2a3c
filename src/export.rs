//! Export orchestration: picks a renderer and names the output file.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::columns::ColumnSet;
use crate::config::PdfConfig;
use crate::document::ReportDocument;
use crate::error::ReportError;
use crate::format::{CsvRenderer, PdfRenderer, Renderer, XlsxRenderer};
use crate::report::Report;
use crate::types::ReportContext;
use crate::utils::export_timestamp;

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    /// Comma-separated values.
    Csv,
    /// Excel workbook.
    Xlsx,
    /// A4 PDF.
    Pdf,
}

impl ExportFormat {
    /// Every format, in menu order.
    pub const ALL: [Self; 3] = [Self::Csv, Self::Xlsx, Self::Pdf];

    /// File extension without the dot.
    #[inline]
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "xlsx" | "excel" => Ok(Self::Xlsx),
            "pdf" => Ok(Self::Pdf),
            other => Err(format!("unknown export format '{other}'")),
        }
    }
}

/// Snapshot of a report ready to be written in any format.
///
/// The column visibility is captured when the exporter is created; later
/// toggles do not affect it.
///
/// # Example
///
/// ```
/// # use equity_pl_report::*;
/// let period = ReportPeriod::full_year(FinancialYear { start_year: 2024 }).unwrap();
/// let context = ReportConfig::default().context(ClientContext::default(), period);
/// let report = Report::build(&FetchedRows::default());
/// let exporter = Exporter::new(&report, &ColumnSet::equity(), &context);
/// let csv = exporter.render(ExportFormat::Csv).unwrap();
/// assert!(csv.starts_with("\u{feff}".as_bytes()));
/// ```
#[derive(Debug, Clone)]
pub struct Exporter {
    document: ReportDocument,
    pdf: PdfConfig,
}

impl Exporter {
    /// Lays out `report` with the columns currently visible.
    pub fn new(report: &Report, columns: &ColumnSet, context: &ReportContext) -> Self {
        Self {
            document: ReportDocument::new(report, columns, context),
            pdf: PdfConfig::default(),
        }
    }

    /// Uses custom PDF page settings.
    #[must_use]
    pub fn with_pdf_config(mut self, config: PdfConfig) -> Self {
        self.pdf = config;
        self
    }

    /// The laid-out document.
    #[inline]
    pub const fn document(&self) -> &ReportDocument {
        &self.document
    }

    /// Encodes the report in memory.
    pub fn render(&self, format: ExportFormat) -> Result<Vec<u8>, ReportError> {
        match format {
            ExportFormat::Csv => CsvRenderer.render(&self.document),
            ExportFormat::Xlsx => XlsxRenderer.render(&self.document),
            ExportFormat::Pdf => PdfRenderer::new(self.pdf.clone()).render(&self.document),
        }
    }

    /// `<base>_<timestamp>.<ext>` for an export made at `now`.
    pub fn file_name(&self, format: ExportFormat, now: DateTime<Utc>) -> String {
        format!(
            "{}_{}.{}",
            self.document.kind.file_stem(),
            export_timestamp(now),
            format.extension()
        )
    }

    /// Renders and writes the report into `dir`, returning the file path.
    pub fn export_as<P: AsRef<Path>>(
        &self,
        format: ExportFormat,
        dir: P,
        now: DateTime<Utc>,
    ) -> Result<PathBuf, ReportError> {
        let bytes = self.render(format)?;
        let path = dir.as_ref().join(self.file_name(format, now));
        fs::write(&path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), %format, "export written");
        Ok(path)
    }
}
