//! PDF export on A4 pages.
//!
//! Layout and encoding are separate steps: [`PdfRenderer::layout`] places
//! every string on a page with a vertical cursor, the encoder then writes
//! the positioned text with the built-in Helvetica fonts. Table columns are
//! sized to their content and long cells wrap inside their column; amounts
//! always stay on one line.

use std::io::BufWriter;

use printpdf::{BuiltinFont, Color, Mm, PdfDocument, Rgb};

use super::{Renderer, cell_text, is_loss};
use crate::config::PdfConfig;
use crate::document::ReportDocument;
use crate::error::ReportError;
use crate::types::Money;
use crate::utils::format_inr_plain;

const META_SEPARATOR: &str = "    ";
/// Millimetres per typographic point.
const PT_TO_MM: f64 = 0.3528;
/// Average Helvetica glyph width relative to the font size.
const GLYPH_WIDTH: f64 = 0.5;
/// Baseline distance of wrapped lines relative to the font size.
const LEADING: f64 = 1.25;
const CELL_PADDING: f64 = 1.0;
const WIDTH_TOLERANCE: f64 = 1e-6;

/// Text color of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tint {
    /// Default black.
    Plain,
    /// Green, non-negative amounts.
    Profit,
    /// Red, negative amounts.
    Loss,
}

impl Tint {
    fn of(value: Money) -> Self {
        if is_loss(value) { Self::Loss } else { Self::Profit }
    }

    fn color(self) -> Color {
        let (r, g, b) = match self {
            Self::Plain => (0.0, 0.0, 0.0),
            Self::Profit => (0.0, 0.5, 0.0),
            Self::Loss => (1.0, 0.0, 0.0),
        };
        Color::Rgb(Rgb::new(r, g, b, None))
    }
}

/// One positioned string.
#[derive(Debug, Clone, PartialEq)]
pub struct TextOp {
    /// One printed line; wrapped cells span several runs.
    pub text: String,
    /// Distance from the left page edge, mm.
    pub x: f64,
    /// Baseline distance from the top page edge, mm.
    pub y: f64,
    /// Font size, pt.
    pub size: f64,
    /// Helvetica-Bold instead of Helvetica.
    pub bold: bool,
    /// Text color.
    pub tint: Tint,
}

/// Positioned text of every page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PdfLayout {
    /// Pages in order, each with its text runs.
    pub pages: Vec<Vec<TextOp>>,
}

impl PdfLayout {
    /// Number of pages.
    #[inline]
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Whether any run on any page contains `needle`.
    pub fn contains(&self, needle: &str) -> bool {
        self.pages
            .iter()
            .flatten()
            .any(|op| op.text.contains(needle))
    }
}

/// Renders reports as PDF.
#[derive(Debug, Clone, Default)]
pub struct PdfRenderer {
    config: PdfConfig,
}

fn glyph_width(size: f64) -> f64 {
    size * PT_TO_MM * GLYPH_WIDTH
}

#[allow(clippy::cast_precision_loss)]
fn char_count(text: &str) -> f64 {
    text.chars().count() as f64
}

/// Estimated width of `text` in mm.
fn text_width(text: &str, size: f64) -> f64 {
    char_count(text) * glyph_width(size)
}

fn fits(text: &str, width: f64, size: f64) -> bool {
    text_width(text, size) <= width + WIDTH_TOLERANCE
}

/// Splits `text` at spaces into lines no wider than `width` mm. A word wider
/// than `width` gets a line of its own; nothing is dropped.
fn wrap(text: &str, width: f64, size: f64) -> Vec<String> {
    if fits(text, width, size) {
        return vec![text.to_string()];
    }
    let mut lines = Vec::new();
    let mut line = String::new();
    for word in text.split_whitespace() {
        if line.is_empty() {
            line.push_str(word);
            continue;
        }
        let candidate = format!("{line} {word}");
        if fits(&candidate, width, size) {
            line = candidate;
        } else {
            lines.push(std::mem::replace(&mut line, word.to_string()));
        }
    }
    if !line.is_empty() || lines.is_empty() {
        lines.push(line);
    }
    lines
}

/// A table cell before placement.
struct Cell {
    text: String,
    tint: Tint,
    /// Printed on one line whatever the column width.
    atomic: bool,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tint: Tint::Plain,
            atomic: false,
        }
    }

    fn number(text: String) -> Self {
        Self {
            text,
            tint: Tint::Plain,
            atomic: true,
        }
    }

    fn amount(text: String, value: Money) -> Self {
        Self {
            text,
            tint: Tint::of(value),
            atomic: true,
        }
    }

    fn chars(&self) -> usize {
        self.text.chars().count()
    }

    /// Length of the longest run that may not be split.
    fn unbreakable_chars(&self) -> usize {
        if self.atomic {
            return self.chars();
        }
        self.text
            .split_whitespace()
            .map(|word| word.chars().count())
            .max()
            .unwrap_or(0)
    }

    fn lines(&self, width: f64, size: f64) -> Vec<String> {
        if self.atomic {
            vec![self.text.clone()]
        } else {
            wrap(&self.text, width, size)
        }
    }
}

/// Column widths (mm, padding included) and font size of one table.
struct Grid {
    widths: Vec<f64>,
    size: f64,
}

impl Grid {
    /// Every column gets room for its longest unbreakable run; spare width
    /// goes to columns whose text would otherwise wrap. The font shrinks
    /// when the unbreakable runs alone overflow `usable`.
    #[allow(clippy::cast_precision_loss)]
    fn fit(header: &[Cell], rows: &[Vec<Cell>], usable: f64, size: f64) -> Self {
        let count = header.len().max(1);
        let mut min = vec![1_usize; count];
        let mut natural = vec![1_usize; count];
        for cells in std::iter::once(header).chain(rows.iter().map(Vec::as_slice)) {
            for (i, cell) in cells.iter().enumerate().take(count) {
                min[i] = min[i].max(cell.unbreakable_chars());
                natural[i] = natural[i].max(cell.chars());
            }
        }

        let padding = 2.0 * CELL_PADDING;
        let available = padding.mul_add(-(count as f64), usable).max(0.0);
        let min_total: usize = min.iter().sum();
        let size = size.min(available / (min_total as f64 * PT_TO_MM * GLYPH_WIDTH));
        let glyph = glyph_width(size);

        let mut widths: Vec<f64> = min.iter().map(|&m| m as f64 * glyph).collect();
        let spare = available - widths.iter().sum::<f64>();
        let growth: Vec<f64> = natural
            .iter()
            .zip(&min)
            .map(|(&n, &m)| n.saturating_sub(m) as f64 * glyph)
            .collect();
        let demand: f64 = growth.iter().sum();
        let share = if demand > 0.0 { (spare / demand).min(1.0) } else { 0.0 };
        for (width, grow) in widths.iter_mut().zip(&growth) {
            *width += grow * share;
        }
        let leftover = ((available - widths.iter().sum::<f64>()) / count as f64).max(0.0);
        let widths = widths.into_iter().map(|w| w + leftover + padding).collect();
        Self { widths, size }
    }

    /// Wrapped lines of every cell of a row.
    fn lines(&self, cells: &[Cell]) -> Vec<Vec<String>> {
        cells
            .iter()
            .zip(&self.widths)
            .map(|(cell, width)| cell.lines(width - 2.0 * CELL_PADDING, self.size))
            .collect()
    }
}

/// Vertical cursor over a growing list of pages.
struct Cursor<'c> {
    config: &'c PdfConfig,
    pages: Vec<Vec<TextOp>>,
    y: f64,
}

impl<'c> Cursor<'c> {
    fn new(config: &'c PdfConfig) -> Self {
        Self {
            config,
            pages: vec![Vec::new()],
            y: config.margin_y,
        }
    }

    fn usable_width(&self) -> f64 {
        self.config.margin_x.mul_add(-2.0, self.config.page_width)
    }

    fn bottom(&self) -> f64 {
        self.config.page_height - self.config.margin_y
    }

    fn new_page(&mut self) {
        self.pages.push(Vec::new());
        self.y = self.config.margin_y;
    }

    /// Starts a new page unless `height` mm still fit.
    fn ensure(&mut self, height: f64) {
        if self.y + height > self.bottom() {
            self.new_page();
        }
    }

    fn put(&mut self, text: String, x: f64, size: f64, bold: bool, tint: Tint) {
        let op = TextOp {
            text,
            x,
            y: self.y + size * PT_TO_MM,
            size,
            bold,
            tint,
        };
        if let Some(page) = self.pages.last_mut() {
            page.push(op);
        }
    }

    fn centered(&mut self, text: &str, size: f64, bold: bool) {
        let width = self.usable_width();
        let lines = wrap(text, width, size);
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.into_iter().enumerate() {
            let x = self.config.margin_x + (width - text_width(&line, size)).max(0.0) / 2.0;
            self.put(line, x, size, bold, Tint::Plain);
            if i < last {
                self.y += size * PT_TO_MM * LEADING;
            }
        }
    }

    fn left(&mut self, text: &str, size: f64, bold: bool) {
        let lines = wrap(text, self.usable_width(), size);
        let last = lines.len().saturating_sub(1);
        for (i, line) in lines.into_iter().enumerate() {
            self.put(line, self.config.margin_x, size, bold, Tint::Plain);
            if i < last {
                self.y += size * PT_TO_MM * LEADING;
            }
        }
    }

    /// Lines of `parts` joined with `separator`, wrapped to the page width.
    fn wrapped(&mut self, parts: &[String], separator: &str, size: f64, advance: f64) {
        let width = self.usable_width();
        let mut line = String::new();
        for part in parts {
            let candidate = if line.is_empty() {
                part.clone()
            } else {
                format!("{line}{separator}{part}")
            };
            if !line.is_empty() && text_width(&candidate, size) > width {
                self.centered(&line, size, false);
                self.y += advance;
                line = part.clone();
            } else {
                line = candidate;
            }
        }
        if !line.is_empty() {
            self.centered(&line, size, false);
        }
    }

    /// Height of a row whose tallest cell has `lines` lines.
    #[allow(clippy::cast_precision_loss)]
    fn row_height(&self, lines: &[Vec<String>], size: f64) -> f64 {
        let tallest = lines.iter().map(Vec::len).max().unwrap_or(1).max(1);
        (size * PT_TO_MM * LEADING).mul_add((tallest - 1) as f64, self.config.line_height)
    }

    #[allow(clippy::cast_precision_loss)]
    fn row(&mut self, cells: &[Cell], lines: Vec<Vec<String>>, grid: &Grid, bold: bool) {
        let height = self.row_height(&lines, grid.size);
        let step = grid.size * PT_TO_MM * LEADING;
        let top = self.y;
        let mut x = self.config.margin_x;
        for ((cell, cell_lines), width) in cells.iter().zip(lines).zip(&grid.widths) {
            for (i, line) in cell_lines.into_iter().enumerate() {
                self.y = step.mul_add(i as f64, top);
                self.put(line, x + CELL_PADDING, grid.size, bold, cell.tint);
            }
            x += width;
        }
        self.y = top + height;
    }

    /// Table at the cursor; the header row is repeated on every page.
    fn table(&mut self, headers: &[&str], rows: Vec<Vec<Cell>>) {
        if headers.is_empty() {
            return;
        }
        let header = headers_of(headers);
        let grid = Grid::fit(&header, &rows, self.usable_width(), self.config.table_font_size);
        let header_lines = grid.lines(&header);
        let header_height = self.row_height(&header_lines, grid.size);

        self.ensure(header_height + self.config.line_height);
        self.row(&header, header_lines.clone(), &grid, true);
        for cells in &rows {
            let lines = grid.lines(cells);
            if self.y + self.row_height(&lines, grid.size) > self.bottom() {
                self.new_page();
                self.row(&header, header_lines.clone(), &grid, true);
            }
            self.row(cells, lines, &grid, false);
        }
        self.y += 10.0;
    }
}

fn headers_of(headers: &[&str]) -> Vec<Cell> {
    headers.iter().map(|h| Cell::plain(*h)).collect()
}

impl PdfRenderer {
    /// Renderer with custom page settings.
    #[inline]
    pub const fn new(config: PdfConfig) -> Self {
        Self { config }
    }

    fn money(&self, value: Money) -> String {
        format_inr_plain(value, &self.config.currency_symbol)
    }

    /// Places every string of the document on pages.
    pub fn layout(&self, document: &ReportDocument) -> PdfLayout {
        let config = &self.config;
        let mut cursor = Cursor::new(config);

        cursor.centered(&document.title, config.title_font_size, true);
        cursor.y += 10.0;
        cursor.wrapped(&document.meta, META_SEPARATOR, config.heading_font_size, 6.0);
        cursor.y += 10.0;

        cursor.left("Summary", config.heading_font_size, true);
        cursor.y += 8.0;
        let summary = ["Category", "Amount"];
        let rows = document
            .summary
            .iter()
            .map(|s| vec![Cell::plain(&s.label), Cell::amount(self.money(s.value), s.value)])
            .collect();
        cursor.table(&summary, rows);

        cursor.ensure(8.0 + config.line_height * 2.0);
        cursor.left("Total Data Summary", config.heading_font_size, true);
        cursor.y += 8.0;
        let totals = ["Particulars", "Amount"];
        let rows = document
            .totals
            .iter()
            .map(|t| vec![Cell::plain(&t.label), Cell::amount(self.money(t.value), t.value)])
            .collect();
        cursor.table(&totals, rows);

        cursor.ensure(8.0 + config.line_height * 2.0);
        cursor.left("Expenses", config.heading_font_size, true);
        cursor.y += 8.0;
        let expenses = ["Company Code", "Amount"];
        let mut rows: Vec<Vec<Cell>> = document
            .expenses
            .iter()
            .map(|l| vec![Cell::plain(&l.key), Cell::amount(self.money(l.amount), l.amount)])
            .collect();
        rows.push(vec![
            Cell::plain("Total Expenses"),
            Cell::amount(self.money(document.expenses_total), document.expenses_total),
        ]);
        cursor.table(&expenses, rows);

        cursor.ensure(8.0 + config.line_height * 2.0);
        cursor.centered("Detailed Report", config.heading_font_size + 2.0, true);
        cursor.y += 8.0;

        let headers: Vec<&str> = document.headers().collect();
        for section in &document.sections {
            cursor.ensure(8.0 + config.line_height * 2.0);
            let heading = section.heading(&self.money(section.sum.abs()));
            cursor.left(&heading, config.heading_font_size - 1.0, true);
            cursor.y += 8.0;
            let rows = section
                .rows
                .iter()
                .map(|cells| {
                    cells
                        .iter()
                        .zip(&document.columns)
                        .map(|(cell, column)| {
                            let text = cell_text(cell, |v| self.money(v));
                            match (cell.amount(), column.profit_loss) {
                                (Some(value), true) => Cell::amount(text, value),
                                (Some(_), false) => Cell::number(text),
                                (None, _) => Cell::plain(text),
                            }
                        })
                        .collect()
                })
                .collect();
            cursor.table(&headers, rows);
        }

        PdfLayout {
            pages: cursor.pages,
        }
    }

    fn encode(&self, document: &ReportDocument, layout: &PdfLayout) -> Result<Vec<u8>, ReportError> {
        let config = &self.config;
        let width = Mm(config.page_width);
        let height = Mm(config.page_height);
        let (doc, first_page, first_layer) =
            PdfDocument::new(document.title.as_str(), width, height, "Layer 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| ReportError::Pdf(format!("{e:?}")))?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| ReportError::Pdf(format!("{e:?}")))?;

        for (index, ops) in layout.pages.iter().enumerate() {
            let (page, layer) = if index == 0 {
                (first_page, first_layer)
            } else {
                doc.add_page(width, height, "Layer 1")
            };
            let layer = doc.get_page(page).get_layer(layer);
            let mut tint = Tint::Plain;
            for op in ops {
                if op.tint != tint {
                    layer.set_fill_color(op.tint.color());
                    tint = op.tint;
                }
                let font = if op.bold { &bold } else { &regular };
                layer.use_text(
                    op.text.as_str(),
                    op.size,
                    Mm(op.x),
                    Mm(config.page_height - op.y),
                    font,
                );
            }
        }

        let mut writer = BufWriter::new(Vec::new());
        doc.save(&mut writer)
            .map_err(|e| ReportError::Pdf(format!("{e:?}")))?;
        writer
            .into_inner()
            .map_err(|e| ReportError::Io(e.into_error()))
    }
}

impl Renderer for PdfRenderer {
    fn render(&self, document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
        let layout = self.layout(document);
        self.encode(document, &layout)
    }
}
