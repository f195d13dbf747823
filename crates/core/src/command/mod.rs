//! The command contract and the commands compiled into the calculator
//!
//! Every dispatchable action, built-in or plugin-provided, implements
//! [`Command`]. The registry stores them as `Arc<dyn Command>` so a single
//! instance can sit under several names (`exit` and `quit`).

pub mod builtin;
pub mod menu;

use crate::error::{Error, Result};
use std::fmt;

// Re-export commonly used types
pub use builtin::{ArithmeticCommand, ExitCommand};
pub use menu::MenuCommand;

/// Interface every registered command implements
pub trait Command: Send + Sync {
    /// Run the command with the arguments that followed its name
    fn execute(&self, args: &[String]) -> Result<CommandOutput>;

    /// One-line summary shown in the menu
    fn description(&self) -> &str;

    /// Invocation syntax shown in the menu
    fn usage(&self) -> &str;
}

/// Value produced by a command
#[derive(Debug, Clone, PartialEq)]
pub enum CommandOutput {
    Number(f64),
    /// `Flag(false)` asks the REPL to stop
    Flag(bool),
    Text(String),
}

impl CommandOutput {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            CommandOutput::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn is_exit_signal(&self) -> bool {
        matches!(self, CommandOutput::Flag(false))
    }
}

impl fmt::Display for CommandOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandOutput::Number(n) => f.write_str(&format_number(*n)),
            CommandOutput::Flag(true) => f.write_str("True"),
            CommandOutput::Flag(false) => f.write_str("False"),
            CommandOutput::Text(text) => f.write_str(text),
        }
    }
}

/// Render a float the way the transcript shows it.
///
/// Uses the `Debug` form: zero and magnitudes in `[1e-4, 1e16)` print in
/// plain decimal with at least one fractional digit (`5.0`, `2.5`). Other
/// finite values use exponent form (`1e16`, `1e-5`).
pub fn format_number(value: f64) -> String {
    format!("{value:?}")
}

/// Parse one argument as a float
pub fn parse_number(text: &str) -> Result<f64> {
    text.trim().parse::<f64>().map_err(|_| {
        Error::InvalidArgument(format!("could not convert string to float: '{text}'"))
    })
}

/// Parse every argument, failing on the first one that is not a number
pub fn parse_numbers(args: &[String]) -> Result<Vec<f64>> {
    args.iter().map(|arg| parse_number(arg)).collect()
}
