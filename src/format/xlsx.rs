//! XLSX export: one sheet with merged headings, a freeze pane and colored
//! amounts.

use rust_xlsxwriter::{Color, Format, FormatAlign, Workbook, Worksheet};

use super::{Renderer, cell_text, is_loss};
use crate::document::ReportDocument;
use crate::error::ReportError;
use crate::types::Money;
use crate::utils::format_inr;

const SHEET_NAME: &str = "Sheet1";
const META_SEPARATOR: &str = "          ";
const PROFIT_COLOR: u32 = 0x0000_8000;
const LOSS_COLOR: u32 = 0x00FF_0000;
const COLUMN_WIDTH: f64 = 18.0;
/// The summary blocks use five columns (`cat, amt, gap, cat, amt` and the
/// totals label with four figures) whatever the detail width.
const SUMMARY_WIDTH: usize = 5;

/// Renders reports as an Excel workbook.
#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxRenderer;

/// Formats shared by the whole sheet.
struct Styles {
    title: Format,
    centered: Format,
    label: Format,
    header: Format,
    section: Format,
    profit: Format,
    loss: Format,
}

impl Styles {
    fn new() -> Self {
        let centered = Format::new().set_bold().set_align(FormatAlign::Center);
        Self {
            title: centered.clone().set_font_size(16),
            section: centered.clone().set_font_size(10),
            centered: centered.set_font_size(12),
            label: Format::new().set_bold().set_font_size(12),
            header: Format::new().set_bold(),
            profit: Format::new()
                .set_align(FormatAlign::Left)
                .set_font_color(Color::RGB(PROFIT_COLOR)),
            loss: Format::new()
                .set_align(FormatAlign::Left)
                .set_font_color(Color::RGB(LOSS_COLOR)),
        }
    }

    fn amount(&self, value: Money) -> &Format {
        if is_loss(value) { &self.loss } else { &self.profit }
    }
}

fn col(index: usize) -> u16 {
    u16::try_from(index).unwrap_or(u16::MAX)
}

/// Writes `text` across columns `0..=last`, merging when there is more than
/// one column.
fn merged(
    sheet: &mut Worksheet,
    row: u32,
    last: u16,
    text: &str,
    format: &Format,
) -> Result<(), ReportError> {
    if last == 0 {
        sheet.write_string_with_format(row, 0, text, format)?;
    } else {
        sheet.merge_range(row, 0, row, last, text, format)?;
    }
    Ok(())
}

impl Renderer for XlsxRenderer {
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
        let styles = Styles::new();
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        sheet.set_name(SHEET_NAME)?;

        let last = col(document.columns.len().max(1) - 1);
        for c in 0..document.columns.len().max(SUMMARY_WIDTH) {
            sheet.set_column_width(col(c), COLUMN_WIDTH)?;
        }

        merged(sheet, 0, last, &document.title, &styles.title)?;
        merged(sheet, 1, last, "", &Format::new())?;
        merged(
            sheet,
            2,
            last,
            &document.meta_line(META_SEPARATOR),
            &styles.centered,
        )?;
        let mut row: u32 = 4;

        sheet.write_string_with_format(row, 0, "Summary", &styles.label)?;
        row += 1;
        for pair in document.summary.chunks(2) {
            for (i, entry) in pair.iter().enumerate() {
                let c = col(i * 3);
                sheet.write_string(row, c, &entry.label)?;
                sheet.write_string_with_format(
                    row,
                    c + 1,
                    format_inr(entry.value),
                    styles.amount(entry.value),
                )?;
            }
            row += 1;
        }
        row += 1;

        sheet.write_string_with_format(row, 0, "Total Data Summary", &styles.label)?;
        for (i, total) in document.totals.iter().enumerate() {
            sheet.write_string_with_format(
                row,
                col(i + 1),
                format!("{}: {}", total.label, format_inr(total.value)),
                styles.amount(total.value),
            )?;
        }
        row += 2;

        sheet.write_string_with_format(row, 0, "Expenses", &styles.label)?;
        row += 1;
        for line in &document.expenses {
            sheet.write_string(row, 0, &line.key)?;
            sheet.write_string_with_format(
                row,
                1,
                format_inr(line.amount),
                styles.amount(line.amount),
            )?;
            row += 1;
        }
        sheet.write_string_with_format(row, 0, "Total Expenses", &styles.header)?;
        sheet.write_string_with_format(
            row,
            1,
            format_inr(document.expenses_total),
            styles.amount(document.expenses_total),
        )?;
        row += 2;

        merged(sheet, row, last, "Detailed Report", &styles.centered)?;
        row += 1;

        let header_row = row;
        for (i, header) in document.headers().enumerate() {
            sheet.write_string_with_format(row, col(i), header, &styles.header)?;
        }
        sheet.set_freeze_panes(header_row, 0)?;
        row += 1;

        for section in &document.sections {
            row += 1;
            merged(
                sheet,
                row,
                last,
                &section.heading(&format_inr(section.sum.abs())),
                &styles.section,
            )?;
            row += 1;
            for cells in &section.rows {
                for (i, (cell, column)) in cells.iter().zip(&document.columns).enumerate() {
                    let text = cell_text(cell, format_inr);
                    match cell.amount().filter(|_| column.profit_loss) {
                        Some(value) => {
                            sheet.write_string_with_format(row, col(i), text, styles.amount(value))?
                        }
                        None => sheet.write_string(row, col(i), text)?,
                    };
                }
                row += 1;
            }
        }

        Ok(workbook.save_to_buffer()?)
    }
}
