use std::str::FromStr;

use equity_pl_report::{
    CellValue, ColumnDef, ColumnSet, DisplayValue, Money, PortfolioDraft, ReportError, Row, Side,
};
use serde_json::{Value, json};

fn row(value: Value) -> Row {
    serde_json::from_value(value).expect("row object")
}

fn ids(columns: &[&ColumnDef]) -> Vec<String> {
    columns.iter().map(|c| c.id.clone()).collect()
}

#[test]
fn initial_visibility_skips_hidden_and_deselected() {
    let columns = ColumnSet::equity();
    let visible = ids(&columns.visible(Vec::<&Row>::new()));
    assert!(visible.contains(&"PL_AMT".to_string()));
    assert!(!visible.contains(&"NET_QTY".to_string()));
    assert!(!visible.contains(&"CURR_AMOUNT".to_string()));
    assert!(!visible.contains(&"scrip_name".to_string()));

    let hidden: Vec<&str> = columns
        .definitions()
        .iter()
        .filter(|c| c.hidden)
        .map(|c| c.id.as_str())
        .collect();
    assert_eq!(hidden, ["scrip_name"]);
    assert!(hidden.iter().all(|id| !columns.is_visible(id)));
}

#[test]
fn toggling_rules() {
    let mut columns = ColumnSet::equity();

    assert_eq!(columns.toggle("NET_QTY").ok(), Some(true));
    assert!(columns.is_visible("NET_QTY"));
    assert_eq!(columns.toggle("NET_QTY").ok(), Some(false));

    assert!(matches!(
        columns.toggle("scrip_name1"),
        Err(ReportError::ColumnLocked(_))
    ));
    assert!(matches!(
        columns.set_visible("scrip_name", true),
        Err(ReportError::ColumnLocked(_))
    ));
    assert!(columns.set_visible("scrip_name", false).is_ok());
    assert!(matches!(
        columns.set_visible("NOPE", true),
        Err(ReportError::UnknownColumn(_))
    ));
    assert!(!columns.is_visible("NOPE"));
}

#[test]
fn conditional_column_is_dropped() {
    let columns = ColumnSet::new(vec![
        ColumnDef::text("SCRIP_SYMBOL", "Symbol"),
        ColumnDef::currency("SALE_RATE", "Sale Rate").exclude_when("TR_TYPE", json!("ASSETS")),
    ]);
    let sold = row(json!({"TR_TYPE": "SHORTTERM"}));
    let held = row(json!({"TR_TYPE": "ASSETS"}));

    assert_eq!(ids(&columns.visible([&sold])), ["SCRIP_SYMBOL", "SALE_RATE"]);
    assert_eq!(ids(&columns.visible([&sold, &held])), ["SCRIP_SYMBOL"]);
}

#[test]
fn cells_follow_column_kind() {
    let columns = ColumnSet::equity();
    let r = row(json!({
        "BUY_QTY": "10",
        "BUY_RATE": "2500.5",
        "SCRIP_SYMBOL": "TCS",
        "Closing_Price": "3900",
        "Closing_Date": "2025-03-28",
    }));
    let cell = |id: &str| columns.get(id).expect("column").cell(&r);

    let ten = Money::from_str("10").expect("decimal");
    assert_eq!(cell("BUY_QTY"), CellValue::Number(ten));
    assert!(matches!(cell("BUY_RATE"), CellValue::Currency(_)));
    assert_eq!(cell("SCRIP_SYMBOL"), CellValue::Text("TCS".into()));
    assert_eq!(cell("SALE_QTY"), CellValue::Placeholder);
    assert_eq!(cell("Closing_Price"), CellValue::Text("3900 (2025-03-28)".into()));

    let no_date = row(json!({"Closing_Price": "3900"}));
    assert!(matches!(
        columns.get("Closing_Price").expect("column").cell(&no_date),
        CellValue::Currency(_)
    ));
}

#[test]
fn overflow_values_skip_absent_fields() {
    let columns = ColumnSet::equity();
    let r = row(json!({"scrip_name": "INE467B01029-TCS", "scrip_name1": "TCS LTD"}));
    let values = columns.overflow_values("scrip_name1", &r);
    assert_eq!(
        values,
        vec![(
            "ISIN".to_string(),
            DisplayValue::Text("INE467B01029-TCS".into())
        )]
    );
    assert!(columns.overflow_values("UNKNOWN", &r).is_empty());
}

#[test]
fn portfolio_draft_from_row() {
    let r = row(json!({
        "scrip_name": "INE002A01018 - RELIANCE INDUSTRIES LTD",
        "scrip_name1": "RELIANCE INDUSTRIES LTD",
        "SCRIP_SYMBOL": "RELIANCE",
        "SALE_QTY": "10",
    }));
    let draft = PortfolioDraft::from_row(&r).expect("draft");
    assert_eq!(draft.isin, "INE002A01018");
    assert_eq!(draft.scrip_name, "RELIANCE INDUSTRIES LTD");
    assert_eq!(draft.symbol, "RELIANCE");
    assert_eq!(draft.side, Side::Buy);
    assert_eq!(draft.quantity, Money::from_str("10").expect("decimal"));
    assert!(draft.trade_date.is_empty() && draft.rate.is_empty() && draft.narration.is_empty());

    let json = serde_json::to_value(&draft).expect("serialize");
    assert_eq!(json["buySell"], "B");
    assert_eq!(json["scrip"], "RELIANCE");
    assert_eq!(serde_json::to_value(Side::Sell).expect("serialize"), "S");

    assert!(PortfolioDraft::from_row(&row(json!({"SCRIP_SYMBOL": "X"}))).is_none());
}
