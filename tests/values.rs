use std::str::FromStr;

use chrono::{NaiveDate, TimeZone, Utc};
use equity_pl_report::{
    DisplayValue, FinancialYear, Money, ReportConfig, ReportError, ReportPeriod, amount_or_zero,
    export_timestamp, format_indian, format_inr, format_inr_plain, normalize, number_or_zero,
    parse_date,
};
use serde_json::{Value, json};

fn money(s: &str) -> Money {
    Money::from_str(s).expect("valid decimal")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

#[test]
fn normalizer_cases() {
    let text = |s: &str| DisplayValue::Text(s.to_string());

    assert_eq!(normalize(Some(&json!("0012"))), text("0012"));
    assert_eq!(normalize(Some(&json!("12.50"))), DisplayValue::Number(money("12.5")));
    assert_eq!(
        normalize(Some(&json!("2024-01-05 10:20:30.123"))),
        text("2024-01-05")
    );
    assert_eq!(normalize(Some(&Value::Null)), DisplayValue::Placeholder);
    assert_eq!(normalize(None), DisplayValue::Placeholder);
    assert_eq!(normalize(Some(&json!(""))), DisplayValue::Placeholder);
    assert_eq!(normalize(Some(&json!(42))), DisplayValue::Number(money("42")));
    assert_eq!(normalize(Some(&json!("RELIANCE"))), text("RELIANCE"));
    assert_eq!(normalize(Some(&json!("2024-01-05"))), text("2024-01-05"));
    assert_eq!(normalize(Some(&Value::Null)).to_string(), "-");
}

#[test]
fn normalizer_ignores_surrounding_whitespace() {
    assert_eq!(normalize(Some(&json!(" 12"))), DisplayValue::Number(money("12")));
    assert_eq!(normalize(Some(&json!("12 "))), DisplayValue::Number(money("12")));
    assert_eq!(
        normalize(Some(&json!(" 007"))),
        DisplayValue::Text(" 007".to_string())
    );
    assert_eq!(
        normalize(Some(&json!("  "))),
        DisplayValue::Text("  ".to_string())
    );
}

#[test]
fn lenient_amounts() {
    assert_eq!(amount_or_zero(Some(&json!("12.5abc"))), money("12.5"));
    assert_eq!(amount_or_zero(Some(&json!("  -7"))), money("-7"));
    assert_eq!(amount_or_zero(Some(&json!("abc"))), Money::ZERO);
    assert_eq!(amount_or_zero(Some(&json!(3.25))), money("3.25"));
    assert_eq!(amount_or_zero(None), Money::ZERO);

    assert_eq!(number_or_zero(Some(&json!(" 15 "))), money("15"));
    assert_eq!(number_or_zero(Some(&json!("12.5abc"))), Money::ZERO);
    assert_eq!(number_or_zero(Some(&json!(""))), Money::ZERO);
    assert_eq!(number_or_zero(Some(&json!("1e2"))), money("100"));
}

#[test]
fn rupee_formatting() {
    assert_eq!(format_inr(money("1234567.891")), "₹12,34,567.89");
    assert_eq!(format_inr(money("-250")), "-₹250.00");
    assert_eq!(format_inr(money("0.005")), "₹0.01");
    assert_eq!(format_inr(money("-0.001")), "₹0.00");
    assert_eq!(format_inr(Money::ZERO), "₹0.00");
    assert_eq!(format_indian(money("100000")), "1,00,000.00");
    assert_eq!(format_indian(money("999")), "999.00");

    assert_eq!(format_inr_plain(money("1500"), "Rs."), "Rs. 1,500.00");
    assert_eq!(format_inr_plain(money("-250"), "Rs."), "Rs. 250.00 CR");
}

#[test]
fn export_timestamp_format() {
    let now = Utc
        .with_ymd_and_hms(2024, 1, 5, 10, 20, 30)
        .single()
        .expect("valid instant");
    assert_eq!(export_timestamp(now), "2024-01-05T10-20-30");
}

#[test]
fn financial_years() {
    assert_eq!(FinancialYear::containing(date(2025, 3, 31)).start_year, 2024);
    assert_eq!(FinancialYear::containing(date(2025, 4, 1)).start_year, 2025);

    let years = FinancialYear::recent(date(2025, 2, 1), 3);
    let labels: Vec<String> = years.into_iter().map(FinancialYear::label).collect();
    assert_eq!(labels, ["2024-2025", "2023-2024", "2022-2023"]);

    assert_eq!(
        "2024-2025".parse::<FinancialYear>().ok(),
        Some(FinancialYear { start_year: 2024 })
    );
    assert_eq!(
        "2024".parse::<FinancialYear>().ok(),
        Some(FinancialYear { start_year: 2024 })
    );
    assert!("2024-2026".parse::<FinancialYear>().is_err());

    assert!(matches!(
        "2147483647-1".parse::<FinancialYear>(),
        Err(ReportError::Date { .. })
    ));
    assert!("2147483647".parse::<FinancialYear>().is_err());
    let last = FinancialYear {
        start_year: i32::MAX,
    };
    assert_eq!(last.label(), "2147483647-2147483648");
    assert!(matches!(last.to(), Err(ReportError::Date { .. })));
}

#[test]
fn report_period_bounds() {
    let year = FinancialYear { start_year: 2024 };
    let period = ReportPeriod::full_year(year).expect("full year");
    assert_eq!(period.label, "2024-2025");
    assert_eq!(period.from_label(), "01/04/2024");
    assert_eq!(period.to_label(), "31/03/2025");

    let partial = ReportPeriod::new(year, date(2024, 12, 31)).expect("in range");
    assert_eq!(partial.to, date(2024, 12, 31));

    assert!(matches!(
        ReportPeriod::new(year, date(2025, 4, 1)),
        Err(ReportError::PeriodOutOfRange { .. })
    ));
    assert!(matches!(
        ReportPeriod::new(year, date(2024, 3, 31)),
        Err(ReportError::PeriodOutOfRange { .. })
    ));
}

#[test]
fn date_parsing() {
    assert_eq!(parse_date("05/01/2024").ok(), Some(date(2024, 1, 5)));
    assert_eq!(parse_date("2024-01-05").ok(), Some(date(2024, 1, 5)));
    assert!(matches!(parse_date("yesterday"), Err(ReportError::Date { .. })));
}

#[test]
fn config_defaults_and_overrides() {
    let defaults = ReportConfig::default();
    assert_eq!(defaults.broker_name, "Pune e Stock Broking");
    assert_eq!(defaults.debounce.selection_ms, 200);
    assert_eq!(defaults.debounce.filter_ms, 300);
    assert_eq!(defaults.pdf.currency_symbol, "Rs.");

    let config = ReportConfig::from_toml(
        r#"
        broker_name = "Acme Securities"

        [pdf]
        table_font_size = 7.5

        [debounce]
        filter_ms = 500
        "#,
    )
    .expect("valid config");
    assert_eq!(config.broker_name, "Acme Securities");
    assert!((config.pdf.table_font_size - 7.5).abs() < f64::EPSILON);
    assert!((config.pdf.page_width - 210.0).abs() < f64::EPSILON);
    assert_eq!(config.debounce.filter_ms, 500);
    assert_eq!(config.debounce.selection_ms, 200);

    assert!(matches!(
        ReportConfig::from_toml("broker_name = 5"),
        Err(ReportError::Config(_))
    ));
}
