//! Column definitions and the visibility state exports snapshot.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use crate::error::ReportError;
use crate::types::{Money, PL_AMT, ReportKind, Row};
use crate::utils::format_plain;
use crate::value::{DisplayValue, normalize};

/// Canonical value of one cell, independent of the output format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    /// Missing value, rendered as `-`.
    Placeholder,
    /// Free text.
    Text(String),
    /// Plain number such as a quantity.
    Number(Money),
    /// Rupee amount.
    Currency(Money),
}

impl CellValue {
    /// Numeric value of number and currency cells.
    #[inline]
    pub const fn amount(&self) -> Option<Money> {
        match self {
            Self::Number(n) | Self::Currency(n) => Some(*n),
            Self::Placeholder | Self::Text(_) => None,
        }
    }
}

impl From<DisplayValue> for CellValue {
    fn from(value: DisplayValue) -> Self {
        match value {
            DisplayValue::Placeholder => Self::Placeholder,
            DisplayValue::Number(n) => Self::Number(n),
            DisplayValue::Text(s) => Self::Text(s),
        }
    }
}

/// Renderer of a custom column; returns a plain value every export can use.
pub type CellRenderer = Arc<dyn Fn(&Row) -> CellValue + Send + Sync>;

/// How a column turns a row into a cell.
#[derive(Clone)]
pub enum ColumnKind {
    /// Normalized field value.
    Text,
    /// Normalized field value; numbers are shown as rupees.
    Currency,
    /// Computed by a renderer.
    Custom(CellRenderer),
}

impl fmt::Debug for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text => f.write_str("Text"),
            Self::Currency => f.write_str("Currency"),
            Self::Custom(_) => f.write_str("Custom(..)"),
        }
    }
}

/// One column of the detail tables.
#[derive(Debug, Clone)]
pub struct ColumnDef {
    /// Field the column reads (accessor key).
    pub id: String,
    /// Header label.
    pub header: String,
    /// Cell rendering.
    pub kind: ColumnKind,
    /// Never shown.
    pub hidden: bool,
    /// Shown only after the user opts in.
    pub deselected: bool,
    /// Visibility cannot be toggled.
    pub disabled: bool,
    /// Whether the grid may sort by this column.
    pub sortable: bool,
    /// Cells are colored by sign where the format supports it.
    pub profit_loss: bool,
    /// Fields listed in the cell's secondary popover.
    pub overflow: Vec<String>,
    /// The column is dropped when any row has one of these field values.
    pub exclude_when: Vec<(String, Value)>,
}

impl ColumnDef {
    fn with_kind(id: &str, header: &str, kind: ColumnKind) -> Self {
        Self {
            id: id.to_string(),
            header: header.to_string(),
            kind,
            hidden: false,
            deselected: false,
            disabled: false,
            sortable: true,
            profit_loss: false,
            overflow: Vec::new(),
            exclude_when: Vec::new(),
        }
    }

    /// Text column.
    #[inline]
    pub fn text(id: &str, header: &str) -> Self {
        Self::with_kind(id, header, ColumnKind::Text)
    }

    /// Rupee column.
    #[inline]
    pub fn currency(id: &str, header: &str) -> Self {
        Self::with_kind(id, header, ColumnKind::Currency)
    }

    /// Column computed by `render`.
    pub fn custom<F>(id: &str, header: &str, render: F) -> Self
    where
        F: Fn(&Row) -> CellValue + Send + Sync + 'static,
    {
        Self::with_kind(id, header, ColumnKind::Custom(Arc::new(render)))
    }

    /// Marks the column as never shown.
    #[inline]
    #[must_use]
    pub const fn hidden(mut self) -> Self {
        self.hidden = true;
        self
    }

    /// Marks the column as off until selected.
    #[inline]
    #[must_use]
    pub const fn deselected(mut self) -> Self {
        self.deselected = true;
        self
    }

    /// Locks the column's visibility.
    #[inline]
    #[must_use]
    pub const fn disabled(mut self) -> Self {
        self.disabled = true;
        self
    }

    /// Disables sorting.
    #[inline]
    #[must_use]
    pub const fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }

    /// Colors cells green or red by sign.
    #[inline]
    #[must_use]
    pub const fn profit_loss(mut self) -> Self {
        self.profit_loss = true;
        self
    }

    /// Lists extra fields in the cell's popover.
    #[must_use]
    pub fn overflow<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.overflow = fields.into_iter().map(Into::into).collect();
        self
    }

    /// Drops the column when a row has `field == value`.
    #[must_use]
    pub fn exclude_when(mut self, field: &str, value: Value) -> Self {
        self.exclude_when.push((field.to_string(), value));
        self
    }

    /// Cell of this column for `row`.
    pub fn cell(&self, row: &Row) -> CellValue {
        match &self.kind {
            ColumnKind::Text => normalize(row.get(&self.id)).into(),
            ColumnKind::Currency => match normalize(row.get(&self.id)) {
                DisplayValue::Number(n) => CellValue::Currency(n),
                other => other.into(),
            },
            ColumnKind::Custom(render) => render(row),
        }
    }

    fn excluded_by(&self, rows: &[&Row]) -> bool {
        self.exclude_when.iter().any(|(field, value)| {
            rows.iter().any(|row| row.get(field) == Some(value))
        })
    }
}

/// Column definitions plus the user's current visibility choices.
#[derive(Debug, Clone)]
pub struct ColumnSet {
    columns: Vec<ColumnDef>,
    visible: Vec<bool>,
}

impl ColumnSet {
    /// Column set with the initial visibility of each definition.
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        let visible = columns.iter().map(|c| !c.hidden && !c.deselected).collect();
        Self { columns, visible }
    }

    /// Default columns of a report kind.
    pub fn for_kind(kind: ReportKind) -> Self {
        match kind {
            ReportKind::Equity => Self::equity(),
            ReportKind::Summarized => Self::summarized(),
        }
    }

    /// Columns of the itemized equity report.
    pub fn equity() -> Self {
        Self::new(vec![
            ColumnDef::text("scrip_name1", "Scrip Name")
                .disabled()
                .overflow(["scrip_name", "SCRIP_SYMBOL"]),
            ColumnDef::text("SCRIP_SYMBOL", "Symbol"),
            ColumnDef::text("BUY_TRADE_DATE", "Buy Date"),
            ColumnDef::text("BUY_QTY", "Buy Qty"),
            ColumnDef::currency("BUY_RATE", "Buy Rate"),
            ColumnDef::currency("BUY_AMT", "Buy Amount"),
            ColumnDef::text("SALE_TRADE_DATE", "Sale Date"),
            ColumnDef::text("SALE_QTY", "Sale Qty"),
            ColumnDef::currency("SALE_RATE", "Sale Rate"),
            ColumnDef::currency("SALE_AMT", "Sale Amount"),
            ColumnDef::text("NET_QTY", "Net Qty").deselected(),
            ColumnDef::currency("CURR_AMOUNT", "Current Value").deselected(),
            ColumnDef::custom("Closing_Price", "Closing Price", closing_price).unsortable(),
            ColumnDef::currency(PL_AMT, "P/L").profit_loss(),
            ColumnDef::text("scrip_name", "ISIN").hidden(),
        ])
    }

    /// Columns of the summarized P&L report.
    pub fn summarized() -> Self {
        Self::new(vec![
            ColumnDef::text("scrip_name1", "Scrip Name").disabled(),
            ColumnDef::text("SCRIP_SYMBOL", "Symbol"),
            ColumnDef::text("BUY_QTY", "Buy Qty"),
            ColumnDef::currency("BUY_AMT", "Buy Amount"),
            ColumnDef::text("SALE_QTY", "Sale Qty"),
            ColumnDef::currency("SALE_AMT", "Sale Amount"),
            ColumnDef::currency(PL_AMT, "P/L").profit_loss(),
        ])
    }

    /// All definitions, visible or not.
    #[inline]
    pub fn definitions(&self) -> &[ColumnDef] {
        &self.columns
    }

    /// Definition by id.
    pub fn get(&self, id: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.id == id)
    }

    fn position(&self, id: &str) -> Result<usize, ReportError> {
        self.columns
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| ReportError::UnknownColumn(id.to_string()))
    }

    /// Current visibility of a column; unknown ids are not visible.
    pub fn is_visible(&self, id: &str) -> bool {
        self.position(id).is_ok_and(|idx| self.visible[idx])
    }

    /// Shows or hides a column.
    ///
    /// Disabled columns keep their state and hidden columns can never be
    /// shown; both report [`ReportError::ColumnLocked`].
    pub fn set_visible(&mut self, id: &str, visible: bool) -> Result<(), ReportError> {
        let idx = self.position(id)?;
        let column = &self.columns[idx];
        if self.visible[idx] == visible {
            return Ok(());
        }
        if column.disabled || (column.hidden && visible) {
            return Err(ReportError::ColumnLocked(id.to_string()));
        }
        self.visible[idx] = visible;
        Ok(())
    }

    /// Flips a column's visibility and returns the new state.
    pub fn toggle(&mut self, id: &str) -> Result<bool, ReportError> {
        let visible = !self.is_visible(id);
        self.set_visible(id, visible)?;
        Ok(visible)
    }

    /// Columns an export includes for the given rows: currently visible and
    /// not excluded by a row value.
    pub fn visible<'a, 'r, I>(&'a self, rows: I) -> Vec<&'a ColumnDef>
    where
        I: IntoIterator<Item = &'r Row>,
    {
        let rows: Vec<&Row> = rows.into_iter().collect();
        self.columns
            .iter()
            .zip(&self.visible)
            .filter(|(column, visible)| **visible && !column.hidden && !column.excluded_by(&rows))
            .map(|(column, _)| column)
            .collect()
    }

    /// `(header, value)` pairs of a column's popover for `row`, skipping
    /// unknown ids and fields the row does not have.
    pub fn overflow_values(&self, column_id: &str, row: &Row) -> Vec<(String, DisplayValue)> {
        let Some(column) = self.get(column_id) else {
            return Vec::new();
        };
        column
            .overflow
            .iter()
            .filter_map(|field| {
                let def = self.get(field)?;
                let value = row.get(field)?;
                Some((def.header.clone(), normalize(Some(value))))
            })
            .collect()
    }
}

/// Closing price followed by its quote date when the back office sends one.
fn closing_price(row: &Row) -> CellValue {
    let price = normalize(row.get("Closing_Price"));
    let date = normalize(row.get("Closing_Date"));
    match (price, date) {
        (DisplayValue::Number(p), DisplayValue::Text(d)) => {
            CellValue::Text(format!("{} ({d})", format_plain(p)))
        }
        (DisplayValue::Number(p), _) => CellValue::Currency(p),
        (other, _) => other.into(),
    }
}
