//! Headline figures of a report.

use crate::types::{Category, Money, SortedCategoryMap, SummaryTotals};

/// Derives unrealized and realized P/L and liabilities.
///
/// Expenses reduce realized profit by their absolute value, whatever sign
/// the back office books them with.
pub fn summarize(categories: &SortedCategoryMap, expenses_total: Money) -> SummaryTotals {
    let mut unrealized = Money::ZERO;
    let mut realized = Money::ZERO;
    let mut liabilities = Money::ZERO;

    for (category, group) in categories.iter() {
        if category.is_unrealized() {
            unrealized += group.sum;
        } else if *category == Category::Liabilities {
            liabilities += group.sum;
        } else {
            realized += group.sum;
        }
    }

    SummaryTotals {
        unrealized,
        realized: realized - expenses_total.abs(),
        liabilities,
        expenses_total,
    }
}
