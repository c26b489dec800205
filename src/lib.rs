//! Daily amortization of a fixed-payment loan.
//!
//! A [`Loan`] is run day by day under a [`SimulationConfig`]: interest accrues on configured
//! days, the fixed payment is capped at what is owed, and the run stops once the balance is
//! cleared. The resulting [`Schedule`] holds one [`LedgerRow`] per day plus a [`LoanSummary`].

pub mod calendar;
pub mod config;
pub mod error;
pub mod loan;
pub mod report;

pub use calendar::{AccrualCalendar, LoanDuration};
pub use config::{InterestBasis, SimulationConfig, DEFAULT_DAILY_RATE};
pub use error::LoanError;
pub use loan::{LedgerRow, Loan, LoanSummary, Schedule};
