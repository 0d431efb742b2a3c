//! Renderers turning a [`ReportDocument`] into file bytes.

mod csv;
mod pdf;
mod xlsx;

pub use self::csv::CsvRenderer;
pub use self::pdf::{PdfLayout, PdfRenderer, TextOp, Tint};
pub use self::xlsx::XlsxRenderer;

use crate::columns::CellValue;
use crate::document::ReportDocument;
use crate::error::ReportError;
use crate::types::Money;
use crate::utils::format_plain;

/// Writes a report document in one output format.
pub trait Renderer {
    /// Encodes the whole document.
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ReportError>;
}

/// Text of a cell; `currency` formats rupee amounts.
pub(crate) fn cell_text<F>(cell: &CellValue, currency: F) -> String
where
    F: Fn(Money) -> String,
{
    match cell {
        CellValue::Placeholder => "-".to_string(),
        CellValue::Text(text) => text.clone(),
        CellValue::Number(n) => format_plain(*n),
        CellValue::Currency(n) => currency(*n),
    }
}

/// Whether an amount is shown in the loss color.
#[inline]
pub(crate) fn is_loss(value: Money) -> bool {
    value.is_sign_negative() && !value.is_zero()
}
