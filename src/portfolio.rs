//! Draft portfolio entry pre-filled from a report row.

use serde::Serialize;

use crate::types::{Money, Row};
use crate::value::number_or_zero;

/// Trade direction of a portfolio entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum Side {
    /// Buy (`B`).
    #[default]
    #[serde(rename = "B")]
    Buy,
    /// Sell (`S`).
    #[serde(rename = "S")]
    Sell,
}

/// Values the "add to portfolio" dialog opens with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDraft {
    /// Left empty for the user.
    pub trade_date: String,
    /// Display name of the scrip.
    pub scrip_name: String,
    /// Exchange symbol.
    #[serde(rename = "scrip")]
    pub symbol: String,
    /// ISIN, taken from the part of `scrip_name` before the first `-`.
    pub isin: String,
    /// Always [`Side::Buy`] for a new draft.
    #[serde(rename = "buySell")]
    pub side: Side,
    /// Left empty for the user.
    pub narration: String,
    /// Quantity sold in the row.
    pub quantity: Money,
    /// Left empty for the user.
    pub rate: String,
}

impl PortfolioDraft {
    /// Draft for `row`; `None` when the row has no `scrip_name`.
    pub fn from_row(row: &Row) -> Option<Self> {
        let scrip = row.text("scrip_name").filter(|s| !s.is_empty())?;
        let isin = scrip.split('-').next().unwrap_or_default().trim();
        Some(Self {
            scrip_name: row.text("scrip_name1").unwrap_or_default().to_string(),
            symbol: row.text("SCRIP_SYMBOL").unwrap_or_default().to_string(),
            isin: isin.to_string(),
            side: Side::Buy,
            quantity: number_or_zero(row.get("SALE_QTY")),
            ..Self::default()
        })
    }
}
