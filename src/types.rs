//! Domain types shared by the aggregation and export stages.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::period::ReportPeriod;

/// Monetary value; `Decimal` keeps the totals footing across exports.
pub type Money = Decimal;

/// Field holding the category code of a row.
pub const TR_TYPE: &str = "TR_TYPE";
/// Profit/loss amount of a row.
pub const PL_AMT: &str = "PL_AMT";
/// Sale amount, used instead of `PL_AMT` for liabilities.
pub const SALE_AMT: &str = "SALE_AMT";

/// One record as returned by the back office.
///
/// Rows are open-ended: besides `TR_TYPE` and the amount fields they carry
/// whatever display fields the endpoint returns.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Row(Map<String, Value>);

impl Row {
    /// Raw value of a field, `None` when the field is absent.
    #[inline]
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    /// String value of a field; numbers and other JSON types yield `None`.
    #[inline]
    pub fn text(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    /// Raw category code.
    #[inline]
    pub fn tr_type(&self) -> Option<&str> {
        self.text(TR_TYPE)
    }

    /// Whether this is an expense record (`Expenses`/`EXPENSES`, any case).
    pub fn is_expense(&self) -> bool {
        self.tr_type()
            .is_some_and(|t| t.trim().eq_ignore_ascii_case("expenses"))
    }
}

impl<K: Into<String>> FromIterator<(K, Value)> for Row {
    fn from_iter<I: IntoIterator<Item = (K, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Category of a row (`TR_TYPE`) after alias normalization.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Category {
    /// Holdings carried forward from before the period (`OP_ASSETS`).
    OpeningAssets,
    /// Holdings acquired during the period (`ASSETS`).
    Assets,
    /// Realized short-term gains (`SHORTTERM`, `OP_SHORTTERM`).
    ShortTerm,
    /// Realized long-term gains (`LONGTERM`, `OP LONGTERM`).
    LongTerm,
    /// Sales lacking a matched buy record (`LIABILITIES`).
    Liabilities,
    /// Intraday trades (`TRADING`).
    Trading,
    /// Charges and taxes (`Expenses`/`EXPENSES`).
    Expenses,
    /// Any other code, kept verbatim.
    Other(String),
}

impl Category {
    /// Placeholder code for rows without `TR_TYPE`.
    pub const UNCATEGORIZED: &'static str = "UNCATEGORIZED";

    /// Normalizes a raw `TR_TYPE`, folding the legacy aliases.
    pub fn from_code(code: &str) -> Self {
        match code {
            "OP_ASSETS" => Self::OpeningAssets,
            "ASSETS" => Self::Assets,
            "SHORTTERM" | "OP_SHORTTERM" => Self::ShortTerm,
            "LONGTERM" | "OP LONGTERM" => Self::LongTerm,
            "LIABILITIES" => Self::Liabilities,
            "TRADING" => Self::Trading,
            other if other.trim().eq_ignore_ascii_case("expenses") => Self::Expenses,
            other => Self::Other(other.to_string()),
        }
    }

    /// Category of a row; a missing `TR_TYPE` becomes [`Self::UNCATEGORIZED`].
    pub fn of(row: &Row) -> Self {
        row.tr_type()
            .map_or_else(|| Self::Other(Self::UNCATEGORIZED.into()), Self::from_code)
    }

    /// Canonical code as used by the back office.
    pub fn code(&self) -> &str {
        match self {
            Self::OpeningAssets => "OP_ASSETS",
            Self::Assets => "ASSETS",
            Self::ShortTerm => "SHORTTERM",
            Self::LongTerm => "LONGTERM",
            Self::Liabilities => "LIABILITIES",
            Self::Trading => "TRADING",
            Self::Expenses => "EXPENSES",
            Self::Other(code) => code,
        }
    }

    /// Heading shown above the category's detail table.
    pub fn display_name(&self) -> String {
        match self {
            Self::OpeningAssets => "OPENING ASSETS".to_string(),
            other => other.code().to_uppercase(),
        }
    }

    /// Whether the category holds still-open positions.
    #[inline]
    pub const fn is_unrealized(&self) -> bool {
        matches!(self, Self::OpeningAssets | Self::Assets)
    }

    /// Field whose value is summed for this category.
    #[inline]
    pub const fn amount_field(&self) -> &'static str {
        match self {
            Self::Liabilities => SALE_AMT,
            _ => PL_AMT,
        }
    }

    /// Label preceding the category total, e.g. `Unrealized Loss`.
    pub fn total_label(&self, sum: Money) -> String {
        let word = profit_or_loss(sum);
        match self {
            Self::Liabilities => "LIABILITIES".to_string(),
            unrealized if unrealized.is_unrealized() => format!("Unrealized {word}"),
            _ => word.to_string(),
        }
    }

    /// Explanatory text shown next to the category heading.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::OpeningAssets => {
                "Holdings acquired before the beginning of the current financial year. These assets have been carried forward from previous periods and are part of the portfolio's opening balance."
            }
            Self::Assets => {
                "Holdings purchased during the current financial year. These represent new acquisitions added to the portfolio after the start of the financial year."
            }
            Self::ShortTerm => {
                "The profit earned from selling assets held for a period of less than 12 months, subject to applicable short-term capital gains tax."
            }
            Self::LongTerm => {
                "The profit earned from selling assets held for a period of 12 months or more, typically eligible for preferential tax rates"
            }
            Self::Liabilities => {
                "Represents stocks that have been sold but lack corresponding buy trade records in the back-office system. This indicates a discrepancy requiring reconciliation to ensure accurate transaction history and financial reporting."
            }
            Self::Trading => {
                "Represents transactions where stocks are bought and sold on the same trading day. These trades are settled without carrying positions overnight and are typically considered for intraday profit or loss calculations."
            }
            Self::Expenses | Self::Other(_) => "",
        }
    }
}

/// `Profit` for non-negative amounts, `Loss` otherwise.
#[inline]
pub fn profit_or_loss(amount: Money) -> &'static str {
    if amount.is_sign_negative() && !amount.is_zero() {
        "Loss"
    } else {
        "Profit"
    }
}

/// Rows of one category and their signed total.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryGroup {
    /// Rows in encounter order.
    pub rows: Vec<Row>,
    /// Sum of the category's amount field over `rows`.
    pub sum: Money,
}

/// Categories in presentation order: `OP_ASSETS`, `ASSETS`, then the rest
/// in first-encounter order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SortedCategoryMap {
    pub(crate) entries: Vec<(Category, CategoryGroup)>,
}

impl SortedCategoryMap {
    /// Group of a category, if any row had it.
    pub fn get(&self, category: &Category) -> Option<&CategoryGroup> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, g)| g)
    }

    /// Categories with their groups in presentation order.
    pub fn iter(&self) -> impl Iterator<Item = (&Category, &CategoryGroup)> {
        self.entries.iter().map(|(c, g)| (c, g))
    }

    /// Categories in presentation order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.entries.iter().map(|(c, _)| c)
    }

    /// Number of categories.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// No rows at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One consolidated expense bucket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpenseLine {
    /// Cleaned company/tax code, e.g. `STT` or `GST`.
    pub key: String,
    /// Accumulated amount.
    pub amount: Money,
}

/// Consolidated expenses with the grand total of the raw rows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExpenseSummary {
    /// Buckets in presentation order.
    pub lines: Vec<ExpenseLine>,
    /// Sum over the raw expense rows.
    pub total: Money,
}

/// Headline figures of a report.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SummaryTotals {
    /// Opening plus in-period holdings.
    pub unrealized: Money,
    /// Closed positions net of expenses.
    pub realized: Money,
    /// Total of the `LIABILITIES` category.
    pub liabilities: Money,
    /// Grand total of expenses.
    pub expenses_total: Money,
}

/// Which back-office report the rows came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportKind {
    /// Itemized equity P&L ("IT Report Equity").
    #[default]
    Equity,
    /// Per-scrip summarized P&L.
    Summarized,
}

impl ReportKind {
    /// Field naming the expense bucket.
    #[inline]
    pub const fn expense_key_field(self) -> &'static str {
        match self {
            Self::Equity => "BUY_COMPANY_CODE",
            Self::Summarized => "SCRIP_SYMBOL",
        }
    }

    /// Field carrying the expense amount.
    #[inline]
    pub const fn expense_amount_field(self) -> &'static str {
        PL_AMT
    }

    /// Base name of exported files.
    #[inline]
    pub const fn file_stem(self) -> &'static str {
        match self {
            Self::Equity => "IT_REPORT_EQUITY",
            Self::Summarized => "Summarized_P&L_Equity",
        }
    }
}

/// Signed-in client the report is produced for.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientContext {
    /// Client display name.
    pub client_name: String,
    /// Back-office client code.
    pub client_id: String,
}

/// Read-only context the formatters print in the letterhead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportContext {
    /// Broker name; the title reads `<broker_name> Limited`.
    pub broker_name: String,
    /// Client the report belongs to.
    pub client: ClientContext,
    /// Reporting period.
    pub period: ReportPeriod,
}
