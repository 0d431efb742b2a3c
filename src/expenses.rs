//! Consolidation of expense rows into tax buckets.

use tracing::debug;

use crate::types::{ExpenseLine, ExpenseSummary, Money, Row};
use crate::value::number_or_zero;

/// Buckets listed before all others, in this order.
const PRIORITY: [&str; 3] = ["STT", "STAMP DUTY", "GST"];

/// Codes folded into the `GST` bucket.
const GST_COMPONENTS: [&str; 2] = ["CGST", "SGST"];

/// Strips one leading and one trailing `*` from a code.
pub fn clean_code(code: &str) -> &str {
    let code = code.strip_prefix('*').unwrap_or(code);
    code.strip_suffix('*').unwrap_or(code)
}

/// Bucket a cleaned code is accounted under.
fn bucket(code: &str) -> &str {
    if GST_COMPONENTS.contains(&code) {
        "GST"
    } else {
        code
    }
}

/// Merges expense rows into one line per cleaned code.
///
/// `CGST` and `SGST` fold into `GST`; `STT`, `STAMP DUTY` and `GST` lead,
/// other buckets keep first-encounter order. The total is summed over the
/// raw rows, so merging never changes it.
pub fn consolidate(rows: &[Row], key_field: &str, amount_field: &str) -> ExpenseSummary {
    let mut lines: Vec<ExpenseLine> = Vec::new();
    let mut total = Money::ZERO;

    for row in rows {
        let amount = number_or_zero(row.get(amount_field));
        total += amount;

        let key = bucket(clean_code(row.text(key_field).unwrap_or_default()));
        match lines.iter_mut().find(|line| line.key == key) {
            Some(line) => line.amount += amount,
            None => lines.push(ExpenseLine {
                key: key.to_string(),
                amount,
            }),
        }
    }

    lines.sort_by_key(|line| {
        PRIORITY
            .iter()
            .position(|p| *p == line.key)
            .unwrap_or(PRIORITY.len())
    });

    debug!(rows = rows.len(), lines = lines.len(), %total, "consolidated expenses");
    ExpenseSummary { lines, total }
}
