use std::{io, path::PathBuf, str::FromStr};

use anyhow::Result;
use clap::Parser;
use tracing::debug;

use loan_core::{AmortizationCalculator, TotalFigure};
use loan_ui::{
    FormController, app,
    config::{AppConfig, ConfigOverrides},
    logging,
};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Fixed-rate loan installment calculator.
///
/// With `--principal`, `--term` and `--rate` the result is printed once.
/// Without them an interactive session reads commands from standard input.
#[derive(Debug, Parser)]
#[command(name = "LoanCalculator", version, about)]
struct Cli {
    /// TOML configuration file.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Amount borrowed (e.g. `1000` or `1,000.00`).
    #[arg(long)]
    principal: Option<String>,

    /// Number of monthly installments.
    #[arg(long)]
    term: Option<String>,

    /// Annual interest rate in percent.
    #[arg(long)]
    rate: Option<String>,

    /// Second result figure: repaid, installment or interest.
    #[arg(long, value_parser = TotalFigure::from_str)]
    total: Option<TotalFigure>,

    /// Log filter (overrides the config file; `RUST_LOG` overrides both).
    #[arg(long)]
    log_level: Option<String>,

    /// Append logs to this file.
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Do not print logs to the terminal.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

impl Cli {
    fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            total_figure: self.total,
            log_level: self.log_level.clone(),
            log_file: self.log_file.clone(),
            quiet: self.quiet,
        }
    }

    fn is_one_shot(&self) -> bool {
        self.principal.is_some() || self.term.is_some() || self.rate.is_some()
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref())?;
    config.apply(&cli.overrides());
    logging::init_logging(&config.log_settings())?;
    debug!(?config, "configuration loaded");

    let mut controller = FormController::new(AmortizationCalculator::new(config.total_figure));

    if cli.is_one_shot() {
        // A missing flag stays an empty field and raises the missing-input alert.
        app::run_once(
            &mut controller,
            cli.principal.as_deref().unwrap_or_default(),
            cli.term.as_deref().unwrap_or_default(),
            cli.rate.as_deref().unwrap_or_default(),
            io::stdout().lock(),
        )
    } else {
        app::run_interactive(&mut controller, io::stdin().lock(), io::stdout().lock())
    }
}
