//! Format-independent layout of a report, shared by all renderers.

use crate::columns::{CellValue, ColumnSet};
use crate::report::Report;
use crate::types::{Category, ExpenseLine, Money, ReportContext, ReportKind, profit_or_loss};

/// A labeled amount (summary entry or headline total).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Amount {
    /// Caption, e.g. `SHORTTERM` or `Realized Loss`.
    pub label: String,
    /// Signed value.
    pub value: Money,
}

impl Amount {
    fn new(label: impl Into<String>, value: Money) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// Header of a detail column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentColumn {
    /// Field id.
    pub id: String,
    /// Header label.
    pub header: String,
    /// Cells are colored by sign.
    pub profit_loss: bool,
}

/// Detail table of one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    /// Category of the rows.
    pub category: Category,
    /// `OPENING ASSETS`, `SHORTTERM`, ...
    pub display_name: String,
    /// `Unrealized Profit`, `LIABILITIES`, `Loss`, ...
    pub total_label: String,
    /// Signed category total.
    pub sum: Money,
    /// One cell per visible column for each row.
    pub rows: Vec<Vec<CellValue>>,
}

impl Section {
    /// Heading line `<DISPLAY NAME> (<label>: <amount>)`, with the absolute
    /// sum already formatted by the caller.
    pub fn heading(&self, amount: &str) -> String {
        format!("{} ({}: {amount})", self.display_name, self.total_label)
    }
}

/// Everything a renderer prints, in print order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportDocument {
    /// Report kind, picks the export file name.
    pub kind: ReportKind,
    /// `<Broker> Limited`.
    pub title: String,
    /// `Name: ..`, `FINANCIAL YEAR REPORT: ..`, `Date Range: ..`, `Client ID: ..`.
    pub meta: Vec<String>,
    /// One entry per category, labeled with its code.
    pub summary: Vec<Amount>,
    /// Unrealized, realized, liabilities and expenses.
    pub totals: Vec<Amount>,
    /// Consolidated expense lines.
    pub expenses: Vec<ExpenseLine>,
    /// Sum of all expense rows.
    pub expenses_total: Money,
    /// Visible detail columns.
    pub columns: Vec<DocumentColumn>,
    /// Detail tables in category order.
    pub sections: Vec<Section>,
}

impl ReportDocument {
    /// Lays out a report with the current column visibility.
    pub fn new(report: &Report, columns: &ColumnSet, context: &ReportContext) -> Self {
        let visible = columns.visible(report.categories.iter().flat_map(|(_, g)| &g.rows));

        let sections = report
            .categories
            .iter()
            .map(|(category, group)| Section {
                category: category.clone(),
                display_name: category.display_name(),
                total_label: category.total_label(group.sum),
                sum: group.sum,
                rows: group
                    .rows
                    .iter()
                    .map(|row| visible.iter().map(|c| c.cell(row)).collect())
                    .collect(),
            })
            .collect();

        let totals = &report.totals;
        Self {
            kind: report.kind,
            title: format!("{} Limited", context.broker_name),
            meta: vec![
                format!("Name: {}", context.client.client_name),
                format!("FINANCIAL YEAR REPORT: {}", context.period.label),
                format!(
                    "Date Range: {} to {}",
                    context.period.from_label(),
                    context.period.to_label()
                ),
                format!("Client ID: {}", context.client.client_id),
            ],
            summary: report
                .categories
                .iter()
                .map(|(category, group)| Amount::new(category.code(), group.sum))
                .collect(),
            totals: vec![
                Amount::new(
                    format!("Unrealized {}", profit_or_loss(totals.unrealized)),
                    totals.unrealized,
                ),
                Amount::new(
                    format!("Realized {}", profit_or_loss(totals.realized)),
                    totals.realized,
                ),
                Amount::new("Liabilities", totals.liabilities),
                Amount::new("Expenses", totals.expenses_total),
            ],
            expenses: report.expenses.lines.clone(),
            expenses_total: report.expenses.total,
            columns: visible
                .iter()
                .map(|c| DocumentColumn {
                    id: c.id.clone(),
                    header: c.header.clone(),
                    profit_loss: c.profit_loss,
                })
                .collect(),
            sections,
        }
    }

    /// Metadata parts joined with `separator`.
    #[inline]
    pub fn meta_line(&self, separator: &str) -> String {
        self.meta.join(separator)
    }

    /// Column headers in order.
    pub fn headers(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.header.as_str())
    }
}
