//! Simulation parameters for a daily amortization run.

use crate::calendar::AccrualCalendar;
use crate::error::LoanError;
use std::fmt;

/// Two-sevenths of one percent of the loan amount per accrual day.
pub const DEFAULT_DAILY_RATE: f64 = 2. / 7. / 100.;

/// Rows a single run may produce before it is abandoned (roughly a century).
pub const DEFAULT_MAX_DAYS: u32 = 36_500;

/// Which balance the daily rate is applied to.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InterestBasis {
    /// Flat charge: every accrual day costs `principal * rate`, however much has been repaid.
    #[default]
    OriginalPrincipal,
    /// Charge on the debt outstanding at the start of the day.
    OutstandingBalance,
}

impl fmt::Display for InterestBasis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterestBasis::OriginalPrincipal => write!(f, "original principal"),
            InterestBasis::OutstandingBalance => write!(f, "outstanding balance"),
        }
    }
}

/// Configuration for a simulation run
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimulationConfig {
    /// Daily rate as a decimal (0.01 = 1% per accrual day)
    pub daily_rate: f64,

    /// Days on which interest accrues
    pub calendar: AccrualCalendar,

    /// Balance the rate is applied to
    pub basis: InterestBasis,

    /// Upper bound on ledger length
    pub max_days: u32,

    /// Decimal places used when amounts are rendered
    pub dec_places: usize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            daily_rate: DEFAULT_DAILY_RATE,
            calendar: AccrualCalendar::default(),
            basis: InterestBasis::default(),
            max_days: DEFAULT_MAX_DAYS,
            dec_places: 0,
        }
    }
}

impl SimulationConfig {
    /// Build a config from a daily rate given in percent (e.g. `0.5` for half a percent).
    pub fn with_rate_pct(rate_pct: f64) -> Self {
        Self {
            daily_rate: rate_pct / 100.,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), LoanError> {
        if !self.daily_rate.is_finite() || self.daily_rate < 0. {
            return Err(LoanError::invalid(
                "daily_rate",
                format!("must be a non-negative number, got {}", self.daily_rate),
            ));
        }
        if self.max_days == 0 {
            return Err(LoanError::invalid("max_days", "must be at least 1"));
        }
        Ok(())
    }
}
