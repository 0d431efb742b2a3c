//! Grouping of report rows by category.

use tracing::debug;

use crate::types::{Category, CategoryGroup, Row, SortedCategoryMap};
use crate::value::amount_or_zero;

/// Groups rows by normalized `TR_TYPE` and sums each group.
///
/// Liabilities sum `SALE_AMT`, every other category `PL_AMT`. An amount that
/// is missing or not numeric counts as zero; the row is kept either way.
/// Expense rows are expected to be split off beforehand.
pub fn aggregate(rows: &[Row]) -> SortedCategoryMap {
    let mut entries: Vec<(Category, CategoryGroup)> = Vec::new();

    for row in rows {
        let category = Category::of(row);
        let amount = amount_or_zero(row.get(category.amount_field()));
        let idx = match entries.iter().position(|(c, _)| *c == category) {
            Some(idx) => idx,
            None => {
                entries.push((category, CategoryGroup::default()));
                entries.len() - 1
            }
        };
        let group = &mut entries[idx].1;
        group.rows.push(row.clone());
        group.sum += amount;
    }

    // Stable sort: opening assets, assets, then encounter order.
    entries.sort_by_key(|(c, _)| rank(c));

    debug!(
        rows = rows.len(),
        categories = entries.len(),
        "aggregated report rows"
    );
    SortedCategoryMap { entries }
}

const fn rank(category: &Category) -> u8 {
    match category {
        Category::OpeningAssets => 0,
        Category::Assets => 1,
        _ => 2,
    }
}
