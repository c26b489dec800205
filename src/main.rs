use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, ValueEnum};
use daily_loan::report::{parse_amount, render_summary, render_table, write_csv};
use daily_loan::{AccrualCalendar, InterestBasis, Loan, SimulationConfig};
use log::{info, LevelFilter};
use simple_logger::SimpleLogger;
use std::io;
use std::process;

/// Simulate day-by-day repayment of a loan with a fixed daily payment
#[derive(Parser, Debug)]
#[command(name = "daily-loan", version, about)]
struct Cli {
    /// Loan amount, e.g. 5000000 or "Rp 5,000,000"
    #[arg(long, value_parser = parse_amount)]
    principal: f64,

    /// Payment made every calendar day
    #[arg(long, value_parser = parse_amount)]
    payment: f64,

    /// First day of the ledger (YYYY-MM-DD), defaults to today
    #[arg(long)]
    start_date: Option<NaiveDate>,

    /// Daily interest rate in percent, defaults to 2/7 (about 0.2857)
    #[arg(long)]
    rate_pct: Option<f64>,

    #[arg(long, value_enum, default_value_t = CalendarArg::Weekdays)]
    calendar: CalendarArg,

    #[arg(long, value_enum, default_value_t = BasisArg::Principal)]
    basis: BasisArg,

    /// Give up once the ledger reaches this many days
    #[arg(long)]
    max_days: Option<u32>,

    /// Decimal places shown for amounts
    #[arg(long, default_value_t = 0)]
    decimals: usize,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    output: OutputFormat,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum CalendarArg {
    Weekdays,
    EveryDay,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum BasisArg {
    Principal,
    Balance,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum OutputFormat {
    Table,
    Csv,
    Summary,
}

impl Cli {
    fn config(&self) -> SimulationConfig {
        let base = self
            .rate_pct
            .map_or_else(SimulationConfig::default, SimulationConfig::with_rate_pct);
        SimulationConfig {
            calendar: match self.calendar {
                CalendarArg::Weekdays => AccrualCalendar::Weekdays,
                CalendarArg::EveryDay => AccrualCalendar::EveryDay,
            },
            basis: match self.basis {
                BasisArg::Principal => InterestBasis::OriginalPrincipal,
                BasisArg::Balance => InterestBasis::OutstandingBalance,
            },
            max_days: self.max_days.unwrap_or(base.max_days),
            dec_places: self.decimals,
            ..base
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let config = cli.config();
    let start_date = cli
        .start_date
        .unwrap_or_else(|| Local::now().date_naive());
    let loan = Loan::new(cli.principal, cli.payment, start_date);

    let schedule = loan
        .simulate(&config)
        .with_context(|| format!("simulating loan starting {}", start_date))?;
    info!("{} ledger rows", schedule.len());

    match cli.output {
        OutputFormat::Table => {
            print!("{}", render_summary(schedule.summary(), config.dec_places));
            println!();
            print!("{}", render_table(&schedule, config.dec_places));
        }
        OutputFormat::Summary => {
            print!("{}", render_summary(schedule.summary(), config.dec_places));
        }
        OutputFormat::Csv => {
            write_csv(&schedule, io::stdout().lock()).context("writing CSV to stdout")?;
        }
    }
    Ok(())
}

/// Log level, and whether `RUST_LOG` may override it.
///
/// simple_logger writes to stdout, so CSV output stays at `Warn` whatever the environment says.
fn log_settings(output: OutputFormat) -> (LevelFilter, bool) {
    match output {
        OutputFormat::Csv => (LevelFilter::Warn, false),
        OutputFormat::Table | OutputFormat::Summary => (LevelFilter::Info, true),
    }
}

fn main() {
    let cli = Cli::parse();

    let (level, honour_env) = log_settings(cli.output);
    let logger = SimpleLogger::new().with_level(level);
    let logger = if honour_env { logger.env() } else { logger };
    if let Err(e) = logger.init() {
        eprintln!("logger unavailable: {}", e);
    }

    if let Err(e) = run(&cli) {
        eprintln!("error: {:#}", e);
        process::exit(1);
    }
}
