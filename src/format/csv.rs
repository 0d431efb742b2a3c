//! CSV export: every field quoted, UTF-8 BOM, LF line endings.

use csv::{QuoteStyle, Terminator, WriterBuilder};

use super::{Renderer, cell_text};
use crate::document::ReportDocument;
use crate::error::ReportError;
use crate::utils::format_inr;

const BOM: &str = "\u{feff}";
const META_SEPARATOR: &str = "          ";

/// Renders reports as CSV.
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvRenderer;

/// Output buffer written record by record.
struct Sheet {
    out: Vec<u8>,
    width: usize,
}

impl Sheet {
    fn new(width: usize) -> Self {
        Self {
            out: BOM.as_bytes().to_vec(),
            width: width.max(1),
        }
    }

    fn record<I, S>(&mut self, fields: I) -> Result<(), ReportError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .flexible(true)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut self.out);
        writer.write_record(fields)?;
        writer.flush()?;
        Ok(())
    }

    fn blank(&mut self) {
        self.out.push(b'\n');
    }

    /// Row as wide as the detail table with `text` in the middle cell.
    fn centered(&mut self, text: &str) -> Result<(), ReportError> {
        let mut fields = vec![""; self.width];
        fields[self.width / 2] = text;
        self.record(fields)
    }
}

impl Renderer for CsvRenderer {
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
        let mut sheet = Sheet::new(document.columns.len());

        sheet.centered(&document.title)?;
        sheet.blank();
        sheet.centered(&document.meta_line(META_SEPARATOR))?;
        sheet.blank();

        sheet.record(["Summary"])?;
        for pair in document.summary.chunks(2) {
            let mut fields = vec![pair[0].label.clone(), format_inr(pair[0].value), String::new()];
            match pair.get(1) {
                Some(second) => {
                    fields.push(second.label.clone());
                    fields.push(format_inr(second.value));
                }
                None => fields.extend([String::new(), String::new()]),
            }
            sheet.record(fields)?;
        }
        sheet.blank();

        sheet.record(
            std::iter::once("Total Data Summary".to_string()).chain(
                document
                    .totals
                    .iter()
                    .map(|t| format!("{}: {}", t.label, format_inr(t.value))),
            ),
        )?;
        sheet.blank();

        sheet.record(["Expenses"])?;
        for line in &document.expenses {
            sheet.record([line.key.clone(), format_inr(line.amount)])?;
        }
        sheet.record([
            "Total Expenses".to_string(),
            format_inr(document.expenses_total),
        ])?;
        sheet.blank();

        sheet.centered("Detailed Report")?;
        sheet.record(document.headers())?;
        for section in &document.sections {
            sheet.blank();
            sheet.centered(&section.heading(&format_inr(section.sum.abs())))?;
            for row in &section.rows {
                sheet.record(row.iter().map(|cell| cell_text(cell, format_inr)))?;
            }
        }

        Ok(sheet.out)
    }
}
