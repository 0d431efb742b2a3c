//! Aggregated report state built from one fetch.

use crate::aggregate::aggregate;
use crate::expenses::consolidate;
use crate::raw::FetchedRows;
use crate::summary::summarize;
use crate::types::{ExpenseSummary, ReportKind, SortedCategoryMap, SummaryTotals};

/// Fields used to consolidate expenses (internal type).
#[derive(Debug, Clone)]
pub(crate) struct BuildOptions {
    pub kind: ReportKind,
    pub expense_key_field: String,
    pub expense_amount_field: String,
}

impl BuildOptions {
    /// Defaults of a report kind.
    pub fn for_kind(kind: ReportKind) -> Self {
        Self {
            kind,
            expense_key_field: kind.expense_key_field().to_string(),
            expense_amount_field: kind.expense_amount_field().to_string(),
        }
    }
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self::for_kind(ReportKind::default())
    }
}

/// Everything the formatters need, recomputed on every fetch.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Report the rows came from.
    pub kind: ReportKind,
    /// Detail rows grouped by category.
    pub categories: SortedCategoryMap,
    /// Consolidated expenses.
    pub expenses: ExpenseSummary,
    /// Headline figures.
    pub totals: SummaryTotals,
}

impl Report {
    /// Builds an equity report with default expense fields.
    #[inline]
    pub fn build(fetched: &FetchedRows) -> Self {
        Self::build_with_options(fetched, &BuildOptions::default())
    }

    pub(crate) fn build_with_options(fetched: &FetchedRows, options: &BuildOptions) -> Self {
        let categories = aggregate(&fetched.rows);
        let expenses = consolidate(
            &fetched.expenses,
            &options.expense_key_field,
            &options.expense_amount_field,
        );
        let totals = summarize(&categories, expenses.total);
        Self {
            kind: options.kind,
            categories,
            expenses,
            totals,
        }
    }
}

/// Builder choosing the report kind and expense fields.
pub struct ReportBuilder<'a> {
    fetched: &'a FetchedRows,
    options: BuildOptions,
}

impl<'a> ReportBuilder<'a> {
    /// Creates a builder for the given rows.
    ///
    /// # Example
    ///
    /// ```
    /// # use equity_pl_report::{FetchedRows, ReportBuilder, ReportKind};
    /// let fetched = FetchedRows::default();
    /// let report = ReportBuilder::new(&fetched)
    ///     .kind(ReportKind::Summarized)
    ///     .build();
    /// assert!(report.categories.is_empty());
    /// ```
    #[inline]
    pub fn new(fetched: &'a FetchedRows) -> Self {
        Self {
            fetched,
            options: BuildOptions::default(),
        }
    }

    /// Sets the report kind, resetting the expense fields to its defaults.
    #[inline]
    pub fn kind(mut self, kind: ReportKind) -> Self {
        self.options = BuildOptions::for_kind(kind);
        self
    }

    /// Overrides the field naming expense buckets.
    #[inline]
    pub fn expense_key_field(mut self, field: impl Into<String>) -> Self {
        self.options.expense_key_field = field.into();
        self
    }

    /// Overrides the field holding expense amounts.
    #[inline]
    pub fn expense_amount_field(mut self, field: impl Into<String>) -> Self {
        self.options.expense_amount_field = field.into();
        self
    }

    /// Aggregates the rows with the current settings.
    #[inline]
    pub fn build(self) -> Report {
        Report::build_with_options(self.fetched, &self.options)
    }
}
