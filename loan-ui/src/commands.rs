//! Line commands accepted by the interactive terminal screen.
//!
//! | Input                             | Command                        |
//! |-----------------------------------|--------------------------------|
//! | `set <field> [text]`              | edit a field (empty clears it) |
//! | `<field> [text]`                  | same as `set`                  |
//! | `calc`, `calculate`               | run the calculation            |
//! | `clear`                           | reset the form                 |
//! | `ok`, `dismiss`                   | acknowledge the alert          |
//! | `show`                            | print fields and results       |
//! | `schedule`                        | print the amortization table   |
//! | `export <path>`                   | write the table as CSV         |
//! | `log <level>`                     | change the log filter          |
//! | `log on`, `log off`               | show or hide terminal logs     |
//! | `log file <path>`, `log file off` | attach or close a log file     |
//! | `help`, `?`                       | list commands                  |
//! | `quit`, `exit`                    | end the session                |
//!
//! Field names are `principal`, `term` and `rate`.

use std::path::PathBuf;

use loan_core::FormField;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  set <field> [text]   edit a field (principal, term, rate)
  <field> [text]       shorthand for set
  calc                 calculate installment and total
  clear                empty all fields and results
  ok                   acknowledge the alert
  show                 print fields and results
  schedule             print the amortization schedule
  export <path>        write the schedule as CSV
  log <level>          change the log filter (e.g. debug, warn)
  log on|off           show or hide logs on the terminal
  log file <path>|off  append logs to a file, or stop
  help                 show this list
  quit                 leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Set(FormField, String),
    Calculate,
    Clear,
    Dismiss,
    Show,
    Schedule,
    Export(PathBuf),
    Log(LogCommand),
    Help,
    Quit,
}

impl Command {
    /// Commands still accepted while an alert blocks the form.
    pub fn allowed_during_alert(&self) -> bool {
        matches!(self, Self::Dismiss | Self::Help | Self::Quit)
    }
}

/// Runtime change to where and how much is logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogCommand {
    /// Filter directive, from a bare level to `warn,loan_core=trace`.
    Level(String),
    Terminal(bool),
    /// Attach a file, or close the current one with `None`.
    File(Option<PathBuf>),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("empty command")]
    Empty,

    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("unknown field '{0}' (expected principal, term or rate)")]
    UnknownField(String),

    #[error("'{command}' needs {argument}")]
    MissingArgument {
        command: &'static str,
        argument: &'static str,
    },
}

/// Parses one line of terminal input.
pub fn parse_command(line: &str) -> Result<Command, CommandError> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    if word.is_empty() {
        return Err(CommandError::Empty);
    }

    if let Some(field) = FormField::parse(word) {
        return Ok(Command::Set(field, rest.to_string()));
    }

    match word.to_ascii_lowercase().as_str() {
        "set" => parse_set(rest),
        "calc" | "calculate" => Ok(Command::Calculate),
        "clear" => Ok(Command::Clear),
        "ok" | "dismiss" => Ok(Command::Dismiss),
        "show" => Ok(Command::Show),
        "schedule" => Ok(Command::Schedule),
        "export" if rest.is_empty() => Err(CommandError::MissingArgument {
            command: "export",
            argument: "a file path",
        }),
        "export" => Ok(Command::Export(PathBuf::from(rest))),
        "log" => parse_log(rest).map(Command::Log),
        "help" | "?" => Ok(Command::Help),
        "quit" | "exit" => Ok(Command::Quit),
        _ => Err(CommandError::Unknown(word.to_string())),
    }
}

fn parse_set(rest: &str) -> Result<Command, CommandError> {
    let (name, value) = match rest.split_once(char::is_whitespace) {
        Some((name, value)) => (name, value.trim()),
        None => (rest, ""),
    };

    if name.is_empty() {
        return Err(CommandError::MissingArgument {
            command: "set",
            argument: "a field name",
        });
    }

    FormField::parse(name)
        .map(|field| Command::Set(field, value.to_string()))
        .ok_or_else(|| CommandError::UnknownField(name.to_string()))
}

fn parse_log(rest: &str) -> Result<LogCommand, CommandError> {
    let (word, value) = match rest.split_once(char::is_whitespace) {
        Some((word, value)) => (word, value.trim()),
        None => (rest, ""),
    };

    match word.to_ascii_lowercase().as_str() {
        "" => Err(CommandError::MissingArgument {
            command: "log",
            argument: "a level, 'on', 'off' or 'file <path>'",
        }),
        "on" => Ok(LogCommand::Terminal(true)),
        "off" => Ok(LogCommand::Terminal(false)),
        "file" if value.is_empty() => Err(CommandError::MissingArgument {
            command: "log file",
            argument: "a file path or 'off'",
        }),
        "file" if value.eq_ignore_ascii_case("off") => Ok(LogCommand::File(None)),
        "file" => Ok(LogCommand::File(Some(PathBuf::from(value)))),
        _ => Ok(LogCommand::Level(rest.to_string())),
    }
}
