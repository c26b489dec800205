//! Text and CSV rendering of a finished schedule.

use crate::error::LoanError;
use crate::loan::{LoanSummary, Schedule};
use chrono::NaiveDate;
use std::fmt;
use std::io;

pub const CURRENCY_PREFIX: &str = "Rp ";

/// Parse an amount typed the way it is displayed, e.g. `Rp 1,500,000`.
///
/// Every character that is not an ASCII digit is dropped before parsing, so separators and the
/// currency prefix are ignored. Fractions are not supported.
pub fn parse_amount(input: &str) -> Result<f64, LoanError> {
    let digits: String = input.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(LoanError::invalid(
            "amount",
            format!("no digits in {:?}", input),
        ));
    }
    digits
        .parse::<u64>()
        .map(|v| v as f64)
        .map_err(|e| LoanError::invalid("amount", format!("{:?}: {}", input, e)))
}

/// Round half away from zero, so 2.5 shows as 3 rather than 2.
fn round(amt: f64, dec_places: usize) -> f64 {
    let scale = 10_f64.powi(dec_places as i32);
    (amt * scale).round() / scale
}

pub fn format_amount(amount: f64, dec_places: usize) -> String {
    let fixed = format!("{:.*}", dec_places, round(amount.abs(), dec_places));
    let (int_part, frac_part) = match fixed.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (fixed.as_str(), None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if amount < 0. && fixed.chars().any(|c| c != '0' && c != '.') {
        "-"
    } else {
        ""
    };
    match frac_part {
        Some(frac) => format!("{}{}{}.{}", sign, CURRENCY_PREFIX, grouped, frac),
        None => format!("{}{}{}", sign, CURRENCY_PREFIX, grouped),
    }
}

/// `Monday, January 1, 2024`
pub fn format_date(date: &NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Ledger rendered as an aligned text table.
pub struct LedgerTable<'a> {
    pub schedule: &'a Schedule,
    pub dec_places: usize,
}

impl fmt::Display for LedgerTable<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:>5}  {:<29} {:>18} {:>18} {:>18} {:>18}",
            "Day", "Date", "Remaining Debt", "Interest", "Payment", "New Balance"
        )?;
        writeln!(f, "{}", "-".repeat(112))?;
        for row in self.schedule.rows() {
            writeln!(
                f,
                "{:>5}  {:<29} {:>18} {:>18} {:>18} {:>18}",
                row.day,
                format_date(&row.date),
                format_amount(row.opening_balance, self.dec_places),
                format_amount(row.interest, self.dec_places),
                format_amount(row.payment, self.dec_places),
                format_amount(row.closing_balance, self.dec_places),
            )?;
        }
        Ok(())
    }
}

pub struct SummaryReport<'a> {
    pub summary: &'a LoanSummary,
    pub dec_places: usize,
}

impl fmt::Display for SummaryReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = self.summary;
        let dp = self.dec_places;
        writeln!(f, "Simulation Result")?;
        writeln!(f, "  Initial Loan:         {}", format_amount(s.principal, dp))?;
        writeln!(
            f,
            "  Daily Interest:       {} ({:.4}% per day)",
            format_amount(s.daily_interest, dp),
            s.daily_rate * 100.
        )?;
        writeln!(f, "  Total Interest Paid:  {}", format_amount(s.total_interest, dp))?;
        writeln!(f, "  Total Paid:           {}", format_amount(s.total_paid, dp))?;
        writeln!(f, "  Start Date:           {}", format_date(&s.start_date))?;
        writeln!(f, "  End Date:             {}", format_date(&s.end_date))?;
        writeln!(f, "  Total Duration:       {}", s.duration)
    }
}

pub fn render_table(schedule: &Schedule, dec_places: usize) -> String {
    LedgerTable {
        schedule,
        dec_places,
    }
    .to_string()
}

pub fn render_summary(summary: &LoanSummary, dec_places: usize) -> String {
    SummaryReport {
        summary,
        dec_places,
    }
    .to_string()
}

/// Write the ledger as CSV with unrounded amounts.
pub fn write_csv<W: io::Write>(schedule: &Schedule, writer: W) -> Result<(), LoanError> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record([
        "day",
        "date",
        "opening_balance",
        "interest",
        "payment",
        "closing_balance",
    ])?;
    for row in schedule.rows() {
        wtr.write_record([
            row.day.to_string(),
            row.date.to_string(),
            row.opening_balance.to_string(),
            row.interest.to_string(),
            row.payment.to_string(),
            row.closing_balance.to_string(),
        ])?;
    }
    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{format_amount, format_date, parse_amount, render_summary, render_table, write_csv};
    use crate::config::SimulationConfig;
    use crate::error::LoanError;
    use crate::loan::Loan;
    use chrono::NaiveDate;
    use test_log::test;

    fn sample_schedule() -> crate::loan::Schedule {
        let config = SimulationConfig {
            daily_rate: 0.0078125,
            ..SimulationConfig::default()
        };
        Loan::new(5000., 10000., NaiveDate::from_ymd_opt(2024, 1, 1).unwrap())
            .simulate(&config)
            .unwrap()
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("Rp 1,500,000").unwrap(), 1_500_000.);
        assert_eq!(parse_amount("250000").unwrap(), 250_000.);
        // the decimal point is a separator like any other
        assert_eq!(parse_amount("12.50").unwrap(), 1250.);
        assert!(matches!(
            parse_amount("Rp "),
            Err(LoanError::InvalidInput { .. })
        ));
        assert!(parse_amount("99999999999999999999999").is_err());
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(0., 0), "Rp 0");
        assert_eq!(format_amount(999., 0), "Rp 999");
        assert_eq!(format_amount(1000., 0), "Rp 1,000");
        assert_eq!(format_amount(1234567.6, 0), "Rp 1,234,568");
        assert_eq!(format_amount(20000.000000000004, 0), "Rp 20,000");
        assert_eq!(format_amount(39.0625, 4), "Rp 39.0625");
        assert_eq!(format_amount(1234.567, 2), "Rp 1,234.57");
        assert_eq!(format_amount(123456.5, 2), "Rp 123,456.50");
        assert_eq!(format_amount(-2500., 0), "-Rp 2,500");
        assert_eq!(format_amount(-0.2, 0), "Rp 0");
    }

    #[test]
    fn test_format_amount_rounds_halves_up() {
        assert_eq!(format_amount(2.5, 0), "Rp 3");
        assert_eq!(format_amount(0.5, 0), "Rp 1");
        assert_eq!(format_amount(1499.5, 0), "Rp 1,500");
        assert_eq!(format_amount(0.25, 1), "Rp 0.3");
        assert_eq!(format_amount(-2.5, 0), "-Rp 3");
    }

    #[test]
    fn test_format_date() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        assert_eq!(format_date(&date), "Monday, January 1, 2024");
    }

    #[test]
    fn test_render_table() {
        let table = render_table(&sample_schedule(), 0);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Remaining Debt"));
        assert!(lines[2].contains("Monday, January 1, 2024"));
        assert!(lines[2].contains("Rp 5,039"));
        assert!(lines[2].trim_end().ends_with("Rp 0"));
    }

    #[test]
    fn test_render_summary() {
        let schedule = sample_schedule();
        let text = render_summary(schedule.summary(), 4);

        assert!(text.contains("Initial Loan:         Rp 5,000.0000"));
        assert!(text.contains("Daily Interest:       Rp 39.0625 ("));
        assert!(text.contains("Total Interest Paid:  Rp 39.0625"));
        assert!(text.contains("Total Paid:           Rp 5,039.0625"));
        assert!(text.contains("End Date:             Monday, January 1, 2024"));
        assert!(text.contains("0 years, 0 months, 1 days (1 days total)"));
    }

    #[test]
    fn test_write_csv() {
        let mut buf = Vec::new();
        write_csv(&sample_schedule(), &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();

        assert_eq!(
            text,
            "day,date,opening_balance,interest,payment,closing_balance\n\
             1,2024-01-01,5000,39.0625,5039.0625,0\n"
        );
    }
}
