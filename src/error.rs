use chrono::NaiveDate;
use thiserror::Error;

/// Failures raised while validating or running a daily amortization.
#[derive(Debug, Error)]
pub enum LoanError {
    #[error("invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("payment never outpaces interest: balance {balance:.2} on day {day} is not below the prior week")]
    NotAmortizing { day: u32, balance: f64 },

    #[error("loan is not paid off after {0} days")]
    TooManyDays(u32),

    #[error("{0} has no following calendar day")]
    DateOverflow(NaiveDate),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl LoanError {
    pub fn invalid(field: &str, reason: impl Into<String>) -> Self {
        LoanError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}
