use std::str::FromStr;

use equity_pl_report::{
    Category, FetchedRows, Money, RawResponse, Report, ReportBuilder, ReportKind, Row, aggregate,
    clean_code, consolidate, summarize,
};
use serde_json::{Value, json};

fn money(s: &str) -> Money {
    Money::from_str(s).expect("valid decimal")
}

fn row(value: Value) -> Row {
    serde_json::from_value(value).expect("row object")
}

fn load_fixture(name: &str) -> FetchedRows {
    let path = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name);
    let body = std::fs::read_to_string(path).expect("read fixture");
    RawResponse::from_str(&body)
        .and_then(RawResponse::into_rows)
        .expect("decode fixture")
}

#[test]
fn category_sums_cover_every_row() {
    let rows = vec![
        row(json!({"TR_TYPE": "SHORTTERM", "PL_AMT": "100.25"})),
        row(json!({"TR_TYPE": "LONGTERM", "PL_AMT": -40})),
        row(json!({"TR_TYPE": "SHORTTERM", "PL_AMT": "12abc"})),
        row(json!({"TR_TYPE": "TRADING", "PL_AMT": "n/a"})),
        row(json!({"TR_TYPE": "LIABILITIES", "SALE_AMT": "300", "PL_AMT": "999"})),
        row(json!({"TR_TYPE": "TRADING"})),
    ];
    let map = aggregate(&rows);

    let kept: usize = map.iter().map(|(_, g)| g.rows.len()).sum();
    assert_eq!(kept, rows.len());

    let short = map.get(&Category::ShortTerm).expect("short term");
    assert_eq!(short.sum, money("112.25"));
    assert_eq!(map.get(&Category::LongTerm).map(|g| g.sum), Some(money("-40")));
    assert_eq!(map.get(&Category::Trading).map(|g| g.sum), Some(Money::ZERO));
    assert_eq!(map.get(&Category::Trading).map(|g| g.rows.len()), Some(2));
    assert_eq!(map.get(&Category::Liabilities).map(|g| g.sum), Some(money("300")));
}

#[test]
fn opening_assets_and_assets_lead() {
    let rows = vec![
        row(json!({"TR_TYPE": "TRADING", "PL_AMT": "1"})),
        row(json!({"TR_TYPE": "ASSETS", "PL_AMT": "2"})),
        row(json!({"TR_TYPE": "SHORTTERM", "PL_AMT": "3"})),
        row(json!({"TR_TYPE": "OP_ASSETS", "PL_AMT": "4"})),
        row(json!({"TR_TYPE": "LONGTERM", "PL_AMT": "5"})),
    ];
    let report = aggregate(&rows);
    let order: Vec<&str> = report.categories().map(Category::code).collect();
    assert_eq!(
        order,
        ["OP_ASSETS", "ASSETS", "TRADING", "SHORTTERM", "LONGTERM"]
    );
}

#[test]
fn legacy_codes_fold_into_their_category() {
    let rows = vec![
        row(json!({"TR_TYPE": "OP_SHORTTERM", "PL_AMT": "10"})),
        row(json!({"TR_TYPE": "SHORTTERM", "PL_AMT": "5"})),
        row(json!({"TR_TYPE": "OP LONGTERM", "PL_AMT": "7"})),
        row(json!({"PL_AMT": "1"})),
    ];
    let map = aggregate(&rows);
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&Category::ShortTerm).map(|g| g.sum), Some(money("15")));
    assert_eq!(map.get(&Category::LongTerm).map(|g| g.sum), Some(money("7")));
    let uncategorized = Category::Other(Category::UNCATEGORIZED.to_string());
    assert_eq!(map.get(&uncategorized).map(|g| g.rows.len()), Some(1));
}

#[test]
fn gst_components_merge() {
    let rows = vec![
        row(json!({"TR_TYPE": "Expenses", "BUY_COMPANY_CODE": "CGST", "PL_AMT": "120"})),
        row(json!({"TR_TYPE": "Expenses", "BUY_COMPANY_CODE": "SGST", "PL_AMT": "80"})),
    ];
    let summary = consolidate(&rows, "BUY_COMPANY_CODE", "PL_AMT");
    assert_eq!(summary.lines.len(), 1);
    assert_eq!(summary.lines[0].key, "GST");
    assert_eq!(summary.lines[0].amount, money("200"));
    assert_eq!(summary.total, money("200"));
}

#[test]
fn priority_buckets_lead_and_total_is_preserved() {
    let rows = vec![
        row(json!({"BUY_COMPANY_CODE": "TURNOVER", "PL_AMT": "3"})),
        row(json!({"BUY_COMPANY_CODE": "*GST*", "PL_AMT": "4"})),
        row(json!({"BUY_COMPANY_CODE": "SEBI FEE", "PL_AMT": "1.5"})),
        row(json!({"BUY_COMPANY_CODE": "*STT", "PL_AMT": "10"})),
        row(json!({"BUY_COMPANY_CODE": "STAMP DUTY*", "PL_AMT": "2"})),
        row(json!({"BUY_COMPANY_CODE": "STT", "PL_AMT": "not a number"})),
    ];
    let summary = consolidate(&rows, "BUY_COMPANY_CODE", "PL_AMT");
    let keys: Vec<&str> = summary.lines.iter().map(|l| l.key.as_str()).collect();
    assert_eq!(keys, ["STT", "STAMP DUTY", "GST", "TURNOVER", "SEBI FEE"]);

    let lines: Money = summary.lines.iter().map(|l| l.amount).sum();
    assert_eq!(lines, summary.total);
    assert_eq!(summary.total, money("20.5"));
}

#[test]
fn code_cleaning_strips_one_star_each_side() {
    assert_eq!(clean_code("*STT*"), "STT");
    assert_eq!(clean_code("**STT**"), "*STT*");
    assert_eq!(clean_code("STAMP DUTY"), "STAMP DUTY");
    assert_eq!(clean_code("*"), "");
}

#[test]
fn summary_totals_match_worked_example() {
    let rows = vec![
        row(json!({"TR_TYPE": "OP_ASSETS", "PL_AMT": "1000"})),
        row(json!({"TR_TYPE": "ASSETS", "PL_AMT": "500"})),
        row(json!({"TR_TYPE": "SHORTTERM", "PL_AMT": "-200"})),
        row(json!({"TR_TYPE": "LIABILITIES", "SALE_AMT": "300"})),
    ];
    let totals = summarize(&aggregate(&rows), money("50"));
    assert_eq!(totals.unrealized, money("1500"));
    assert_eq!(totals.liabilities, money("300"));
    assert_eq!(totals.realized, money("-250"));
    assert_eq!(totals.expenses_total, money("50"));

    // Negative bookings are deducted by magnitude as well.
    let totals = summarize(&aggregate(&rows), money("-50"));
    assert_eq!(totals.realized, money("-250"));
}

#[test]
fn fixture_builds_full_report() {
    let fetched = load_fixture("equity_response.json");
    assert_eq!(fetched.rows.len(), 4);
    assert_eq!(fetched.expenses.len(), 4);

    let report = Report::build(&fetched);
    assert_eq!(report.kind, ReportKind::Equity);
    assert_eq!(report.totals.unrealized, money("1500"));
    assert_eq!(report.totals.liabilities, money("300"));
    assert_eq!(report.totals.realized, money("-250"));
    assert_eq!(report.expenses.total, money("50"));

    let keys: Vec<&str> = report.expenses.lines.iter().map(|l| l.key.as_str()).collect();
    assert_eq!(keys, ["STT", "STAMP DUTY", "GST"]);
    assert_eq!(report.expenses.lines[2].amount, money("25"));
}

#[test]
fn summarized_kind_keys_expenses_by_symbol() {
    let fetched = FetchedRows::split(vec![
        row(json!({"TR_TYPE": "EXPENSES", "SCRIP_SYMBOL": "*STT*", "PL_AMT": "7"})),
        row(json!({"TR_TYPE": "EXPENSES", "SCRIP_SYMBOL": "SGST", "PL_AMT": "3"})),
        row(json!({"TR_TYPE": "SHORTTERM", "PL_AMT": "100"})),
    ]);
    let report = ReportBuilder::new(&fetched)
        .kind(ReportKind::Summarized)
        .build();
    assert_eq!(report.kind, ReportKind::Summarized);
    let keys: Vec<&str> = report.expenses.lines.iter().map(|l| l.key.as_str()).collect();
    assert_eq!(keys, ["STT", "GST"]);
    assert_eq!(report.totals.realized, money("90"));
}

#[test]
fn builder_accepts_custom_expense_fields() {
    let fetched = FetchedRows::split(vec![row(
        json!({"TR_TYPE": "expenses", "CODE": "GST", "AMOUNT": "12"}),
    )]);
    let report = ReportBuilder::new(&fetched)
        .expense_key_field("CODE")
        .expense_amount_field("AMOUNT")
        .build();
    assert_eq!(report.expenses.lines[0].key, "GST");
    assert_eq!(report.expenses.total, money("12"));
}

#[test]
fn empty_input_yields_zero_totals() {
    let report = Report::build(&FetchedRows::default());
    assert!(report.categories.is_empty());
    assert!(report.expenses.lines.is_empty());
    assert_eq!(report.totals, Default::default());
}

#[test]
fn category_labels_and_descriptions() {
    assert_eq!(Category::OpeningAssets.display_name(), "OPENING ASSETS");
    assert_eq!(Category::from_code("TRADING").display_name(), "TRADING");
    assert_eq!(Category::Assets.total_label(money("-1")), "Unrealized Loss");
    assert_eq!(Category::Liabilities.total_label(money("5")), "LIABILITIES");
    assert_eq!(Category::LongTerm.total_label(Money::ZERO), "Profit");
    assert!(
        Category::Liabilities
            .description()
            .starts_with("Represents stocks that have been sold")
    );
    assert!(Category::Other("X".into()).description().is_empty());
}
