//! Indian financial years (April to March) and reporting periods.

use chrono::{Datelike, NaiveDate};

use crate::error::ReportError;
use crate::utils::format_date;

/// Financial year starting on 1 April of `start_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FinancialYear {
    /// Calendar year the financial year starts in.
    pub start_year: i32,
}

impl FinancialYear {
    /// Financial year a date falls into; January to March belong to the
    /// year that started the previous April.
    pub fn containing(date: NaiveDate) -> Self {
        let start_year = if date.month() < 4 {
            date.year() - 1
        } else {
            date.year()
        };
        Self { start_year }
    }

    /// The `count` most recent financial years, newest first.
    pub fn recent(today: NaiveDate, count: usize) -> Vec<Self> {
        let current = Self::containing(today).start_year;
        (0..count)
            .map_while(|offset| i32::try_from(offset).ok())
            .map(|offset| Self {
                start_year: current - offset,
            })
            .collect()
    }

    /// Label such as `2024-2025`.
    pub fn label(self) -> String {
        format!("{}-{}", self.start_year, i64::from(self.start_year) + 1)
    }

    /// 1 April of the start year.
    pub fn from(self) -> Result<NaiveDate, ReportError> {
        ymd(self.start_year, 4, 1)
    }

    /// 31 March of the following year.
    pub fn to(self) -> Result<NaiveDate, ReportError> {
        let year = self.start_year.checked_add(1).ok_or_else(|| ReportError::Date {
            value: self.label(),
        })?;
        ymd(year, 3, 31)
    }
}

impl std::str::FromStr for FinancialYear {
    type Err = ReportError;

    /// Accepts `2024-2025` or just the start year `2024`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ReportError::Date {
            value: s.to_string(),
        };
        let (start, end) = match s.trim().split_once('-') {
            Some((start, end)) => (start, Some(end)),
            None => (s.trim(), None),
        };
        let start_year: i32 = start.trim().parse().map_err(|_| invalid())?;
        let next_year = start_year.checked_add(1).ok_or_else(invalid)?;
        if let Some(end) = end {
            let end_year: i32 = end.trim().parse().map_err(|_| invalid())?;
            if end_year != next_year {
                return Err(invalid());
            }
        }
        Ok(Self { start_year })
    }
}

/// Date range a report is requested for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPeriod {
    /// Financial year label printed in the letterhead.
    pub label: String,
    /// First day of the period.
    pub from: NaiveDate,
    /// Last day of the period.
    pub to: NaiveDate,
}

impl ReportPeriod {
    /// Period from the start of `year` to `to`, which must lie within the
    /// financial year.
    pub fn new(year: FinancialYear, to: NaiveDate) -> Result<Self, ReportError> {
        let from = year.from()?;
        if to < from || to > year.to()? {
            return Err(ReportError::PeriodOutOfRange {
                label: year.label(),
                to,
            });
        }
        Ok(Self {
            label: year.label(),
            from,
            to,
        })
    }

    /// The whole financial year.
    pub fn full_year(year: FinancialYear) -> Result<Self, ReportError> {
        Self::new(year, year.to()?)
    }

    /// Start date as `dd/mm/yyyy`.
    #[inline]
    pub fn from_label(&self) -> String {
        format_date(self.from)
    }

    /// End date as `dd/mm/yyyy`.
    #[inline]
    pub fn to_label(&self) -> String {
        format_date(self.to)
    }
}

fn ymd(year: i32, month: u32, day: u32) -> Result<NaiveDate, ReportError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| ReportError::Date {
        value: format!("{year:04}-{month:02}-{day:02}"),
    })
}
