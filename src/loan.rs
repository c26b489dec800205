use crate::calendar::LoanDuration;
use crate::config::{InterestBasis, SimulationConfig};
use crate::error::LoanError;
use chrono::NaiveDate;
use log::{debug, info, trace, warn};
use std::fmt;

/// Accrual days in a full calendar week are only uniform in steps of seven days.
const CHECKPOINT_DAYS: u32 = 7;

/// One day of the ledger.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LedgerRow {
    pub day: u32,
    pub date: NaiveDate,
    pub opening_balance: f64,
    pub interest: f64,
    pub payment: f64,
    pub closing_balance: f64,
}

impl LedgerRow {
    pub fn new(
        day: u32,
        date: NaiveDate,
        opening_balance: f64,
        interest: f64,
        payment: f64,
        closing_balance: f64,
    ) -> Self {
        Self {
            day,
            date,
            opening_balance,
            interest,
            payment,
            closing_balance,
        }
    }
}

impl fmt::Display for LedgerRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "day {}, date {}, opening balance {:.4}, interest {:.4}, payment {:.4}, closing balance {:.4}",
            self.day,
            self.date,
            self.opening_balance,
            self.interest,
            self.payment,
            self.closing_balance
        )
    }
}

/// Totals for a completed run.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanSummary {
    pub principal: f64,
    pub daily_rate: f64,
    /// Charge for one accrual day on the original principal
    pub daily_interest: f64,
    pub total_interest: f64,
    pub total_paid: f64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub duration: LoanDuration,
}

#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Loan {
    pub principal: f64,
    pub daily_payment: f64,
    pub start_date: NaiveDate,
}

impl Loan {
    pub fn new(principal: f64, daily_payment: f64, start_date: NaiveDate) -> Self {
        Self {
            principal,
            daily_payment,
            start_date,
        }
    }

    pub fn validate(&self) -> Result<(), LoanError> {
        if !self.principal.is_finite() || self.principal < 0. {
            return Err(LoanError::invalid(
                "principal",
                format!("must not be negative, got {}", self.principal),
            ));
        }
        if !self.daily_payment.is_finite() || self.daily_payment <= 0. {
            return Err(LoanError::invalid(
                "daily_payment",
                format!("must be greater than zero, got {}", self.daily_payment),
            ));
        }
        Ok(())
    }

    /// Run the day-by-day ledger until the debt is cleared.
    ///
    /// A zero principal is already cleared: the ledger is empty and `end_date` is the start date.
    ///
    /// Each day accrues interest if the calendar says so, then takes the daily payment capped at
    /// what is owed. Returns [`LoanError::NotAmortizing`] as soon as a weekly checkpoint shows
    /// the balance has stopped falling, since the same week would then repeat forever.
    pub fn simulate(&self, config: &SimulationConfig) -> Result<Schedule, LoanError> {
        self.validate()?;
        config.validate()?;

        debug!(
            "simulating principal {} payment {} from {}, rate {} on {} ({})",
            self.principal,
            self.daily_payment,
            self.start_date,
            config.daily_rate,
            config.basis,
            config.calendar
        );

        let mut rows: Vec<LedgerRow> = Vec::new();
        let mut balance = self.principal;
        let mut checkpoint_balance = balance;
        let mut total_interest = 0.;
        let mut total_paid = 0.;
        let mut date = self.start_date;
        let mut day = 0;

        while balance > 0. {
            if day == config.max_days {
                warn!("balance {:.2} still open after {} days", balance, day);
                return Err(LoanError::TooManyDays(day));
            }
            if day > 0 {
                date = date.succ_opt().ok_or(LoanError::DateOverflow(date))?;
            }
            day += 1;

            let interest = self.interest_for(&date, balance, config);
            let payment = self.daily_payment.min(balance + interest);
            let opening_balance = balance;
            balance = balance + interest - payment;

            total_interest += interest;
            total_paid += payment;

            trace!(
                "day {}, {}, opening {}, interest {}, payment {}, closing {}",
                day,
                date,
                opening_balance,
                interest,
                payment,
                balance
            );

            rows.push(LedgerRow::new(
                day,
                date,
                opening_balance,
                interest,
                payment,
                balance.max(0.),
            ));

            if balance > 0. && day % CHECKPOINT_DAYS == 0 {
                if balance >= checkpoint_balance {
                    warn!(
                        "balance {:.2} on day {} did not fall below {:.2}",
                        balance, day, checkpoint_balance
                    );
                    return Err(LoanError::NotAmortizing { day, balance });
                }
                checkpoint_balance = balance;
            }
        }

        let summary = LoanSummary {
            principal: self.principal,
            daily_rate: config.daily_rate,
            daily_interest: self.principal * config.daily_rate,
            total_interest,
            total_paid,
            start_date: self.start_date,
            end_date: date,
            duration: LoanDuration::from_days(day),
        };
        info!(
            "paid off on {} after {} days, total interest {:.2}",
            summary.end_date, day, total_interest
        );

        Ok(Schedule { rows, summary })
    }

    fn interest_for(&self, date: &NaiveDate, balance: f64, config: &SimulationConfig) -> f64 {
        if !config.calendar.accrues_on(date) {
            return 0.;
        }
        match config.basis {
            InterestBasis::OriginalPrincipal => self.principal * config.daily_rate,
            InterestBasis::OutstandingBalance => balance * config.daily_rate,
        }
    }
}

/// A finished ledger and its summary.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    rows: Vec<LedgerRow>,
    summary: LoanSummary,
}

impl Schedule {
    pub fn rows(&self) -> &[LedgerRow] {
        &self.rows
    }

    pub fn summary(&self) -> &LoanSummary {
        &self.summary
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for a 1-based day number.
    pub fn get_row(&self, day: usize) -> Option<&LedgerRow> {
        day.checked_sub(1).and_then(|i| self.rows.get(i))
    }

    pub fn get_row_info(&self, day: usize) -> String {
        match self.get_row(day) {
            Some(row) => row.to_string(),
            None => "No ledger entry.".to_string(),
        }
    }
}
