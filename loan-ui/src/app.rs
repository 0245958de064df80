//! Terminal session driving a [`FormController`].
//!
//! Two modes share the same controller: [`run_once`] fills the three fields
//! from command-line values and calculates once, [`run_interactive`] reads
//! one command per line until `quit` or end of input.

use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use loan_core::FormField;
use tracing::{error, info};

use crate::{
    FormController,
    commands::{Command, HELP, LogCommand, parse_command},
    csv_export, logging, render,
};

const PROMPT: &str = "> ";

/// Fills the form from `principal`, `term` and `rate`, calculates, and writes
/// both result fields.
///
/// # Errors
///
/// Fails with the alert message when the calculation is refused, or when
/// `output` cannot be written.
pub fn run_once<W: Write>(
    controller: &mut FormController,
    principal: &str,
    term: &str,
    rate: &str,
    mut output: W,
) -> Result<()> {
    controller.on_change(FormField::Principal, principal);
    controller.on_change(FormField::Term, term);
    controller.on_change(FormField::Rate, rate);

    let state = controller.calculate();
    if let Some(kind) = state.alert() {
        anyhow::bail!("{}", kind.message());
    }

    let figure = controller.calculator().total_figure();
    output
        .write_all(render::render_results(controller.state(), figure).as_bytes())
        .context("cannot write results")?;
    Ok(())
}

/// Reads commands from `input` until `quit` or end of input.
pub fn run_interactive<R: BufRead, W: Write>(
    controller: &mut FormController,
    input: R,
    mut output: W,
) -> Result<()> {
    info!("interactive session started");
    writeln!(output, "Loan calculator. Type 'help' for commands.")?;
    write!(output, "{PROMPT}")?;
    output.flush()?;

    for line in input.lines() {
        let line = line.context("cannot read input")?;
        if line.trim().is_empty() {
            write!(output, "{PROMPT}")?;
            output.flush()?;
            continue;
        }

        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(command) => execute(controller, command, &mut output)?,
            Err(e) => writeln!(output, "error: {e}")?,
        }

        write!(output, "{PROMPT}")?;
        output.flush()?;
    }

    writeln!(output)?;
    info!("interactive session ended");
    Ok(())
}

fn execute<W: Write>(
    controller: &mut FormController,
    command: Command,
    output: &mut W,
) -> Result<()> {
    let figure = controller.calculator().total_figure();

    if let Some(kind) = controller.state().alert() {
        if !command.allowed_during_alert() {
            output.write_all(render::render_alert(kind).as_bytes())?;
            return Ok(());
        }
    }

    match command {
        Command::Set(field, text) => {
            controller.on_change(field, text);
        }
        Command::Calculate => {
            let state = controller.calculate();
            let text = match state.alert() {
                Some(kind) => render::render_alert(kind),
                None => render::render_results(state, figure),
            };
            output.write_all(text.as_bytes())?;
        }
        Command::Clear => {
            let state = controller.clear();
            output.write_all(render::render_results(state, figure).as_bytes())?;
        }
        Command::Dismiss => {
            controller.dismiss_alert();
        }
        Command::Show => {
            output.write_all(render::render_state(controller.state(), figure).as_bytes())?;
        }
        Command::Schedule => match controller.schedule() {
            None => writeln!(output, "Nothing calculated yet.")?,
            Some(Err(e)) => writeln!(output, "error: {e}")?,
            Some(Ok(schedule)) => {
                output.write_all(render::render_schedule(&schedule).as_bytes())?
            }
        },
        Command::Export(path) => match controller.schedule() {
            None => writeln!(output, "Nothing calculated yet.")?,
            Some(Err(e)) => writeln!(output, "error: {e}")?,
            Some(Ok(schedule)) => match csv_export::write_to_file(&path, &schedule) {
                Ok(()) => writeln!(output, "Schedule written to {}", path.display())?,
                Err(e) => {
                    error!(path = %path.display(), %e, "schedule export failed");
                    writeln!(output, "error: {e}")?;
                }
            },
        },
        Command::Log(log) => match apply_log_command(&log) {
            Ok(note) => writeln!(output, "{note}")?,
            Err(e) => writeln!(output, "error: {e:#}")?,
        },
        Command::Help => writeln!(output, "{HELP}")?,
        Command::Quit => {}
    }
    Ok(())
}

fn apply_log_command(command: &LogCommand) -> Result<String> {
    let note = match command {
        LogCommand::Level(level) => {
            logging::set_log_level(level)?;
            format!("Log level set to '{level}'")
        }
        LogCommand::Terminal(enabled) => {
            logging::set_stdout_enabled(*enabled)?;
            format!("Terminal logging {}", if *enabled { "on" } else { "off" })
        }
        LogCommand::File(Some(path)) => {
            logging::enable_file_logging(path)?;
            format!("Logging to {}", path.display())
        }
        LogCommand::File(None) => {
            logging::disable_file_logging();
            "Log file closed".to_string()
        }
    };
    info!(%note, "log settings changed");
    Ok(note)
}
