//! Calendar rules: which days accrue interest, and how a run length is reported.

use chrono::{Datelike, NaiveDate, Weekday};
use std::fmt;

pub const DAYS_PER_YEAR: u32 = 365;
pub const DAYS_PER_MONTH: u32 = 30;

/// Days on which interest is charged.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AccrualCalendar {
    /// Monday through Friday; weekends are interest free but still take a payment.
    #[default]
    Weekdays,
    EveryDay,
}

impl AccrualCalendar {
    pub fn accrues_on(&self, date: &NaiveDate) -> bool {
        match self {
            AccrualCalendar::Weekdays => !matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            AccrualCalendar::EveryDay => true,
        }
    }
}

impl fmt::Display for AccrualCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AccrualCalendar::Weekdays => write!(f, "weekdays"),
            AccrualCalendar::EveryDay => write!(f, "every day"),
        }
    }
}

/// Length of a run split into 365-day years and 30-day months.
///
/// `days` is the total modulo 30, not the remainder after years and months, so the three parts
/// need not add back up to `total_days` once a run passes a year.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanDuration {
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub total_days: u32,
}

impl LoanDuration {
    pub fn from_days(total_days: u32) -> Self {
        Self {
            years: total_days / DAYS_PER_YEAR,
            months: (total_days % DAYS_PER_YEAR) / DAYS_PER_MONTH,
            days: total_days % DAYS_PER_MONTH,
            total_days,
        }
    }
}

impl fmt::Display for LoanDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} years, {} months, {} days ({} days total)",
            self.years, self.months, self.days, self.total_days
        )
    }
}

#[cfg(test)]
mod tests {
    use super::{AccrualCalendar, LoanDuration};
    use chrono::NaiveDate;
    use test_log::test;

    #[test]
    fn test_weekday_accrual() {
        // 2024-01-01 is a Monday
        let monday = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let accrues: Vec<bool> = monday
            .iter_days()
            .take(7)
            .map(|d| AccrualCalendar::Weekdays.accrues_on(&d))
            .collect();

        assert_eq!(accrues, vec![true, true, true, true, true, false, false]);
        assert!(monday
            .iter_days()
            .take(7)
            .all(|d| AccrualCalendar::EveryDay.accrues_on(&d)));
    }

    #[test]
    fn test_duration_split() {
        assert_eq!(
            LoanDuration::from_days(0),
            LoanDuration { years: 0, months: 0, days: 0, total_days: 0 }
        );
        assert_eq!(
            LoanDuration::from_days(29),
            LoanDuration { years: 0, months: 0, days: 29, total_days: 29 }
        );
        assert_eq!(
            LoanDuration::from_days(30),
            LoanDuration { years: 0, months: 1, days: 0, total_days: 30 }
        );
        assert_eq!(
            LoanDuration::from_days(365),
            LoanDuration { years: 1, months: 0, days: 5, total_days: 365 }
        );
        assert_eq!(
            LoanDuration::from_days(400),
            LoanDuration { years: 1, months: 1, days: 10, total_days: 400 }
        );
        // the last 5 days of a year still fit twelve 30-day months
        assert_eq!(
            LoanDuration::from_days(729),
            LoanDuration { years: 1, months: 12, days: 9, total_days: 729 }
        );
    }

    #[test]
    fn test_duration_day_remainder_ignores_years() {
        for total in 0..2000 {
            let d = LoanDuration::from_days(total);
            assert_eq!(d.days, total % 30);
            assert_eq!(d.months, (total % 365) / 30);
            assert!(d.months <= 12 && d.days < 30);
        }
    }

    #[test]
    fn test_duration_display() {
        assert_eq!(
            LoanDuration::from_days(400).to_string(),
            "1 years, 1 months, 10 days (400 days total)"
        );
    }
}
