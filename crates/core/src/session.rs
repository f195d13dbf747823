//! REPL session: dispatch, history recording and the running/stopped state

use crate::command::{CommandOutput, parse_numbers};
use crate::config::Config;
use crate::error::Error;
use crate::history::{Calculation, History};
use crate::input::parse_input;
use crate::operations::Operation;
use crate::registry::CommandRegistry;
use tracing::{debug, error, info};

/// Message printed whenever the session stops
pub const GOODBYE: &str = "Exiting calculator application. Goodbye!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplState {
    Running,
    Stopped,
}

/// One interactive calculator session
pub struct Session {
    registry: CommandRegistry,
    history: History,
    state: ReplState,
}

impl Session {
    pub fn new(registry: CommandRegistry) -> Self {
        Self {
            registry,
            history: History::new(),
            state: ReplState::Running,
        }
    }

    /// Session over a registry assembled from `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(CommandRegistry::assemble(config))
    }

    pub fn state(&self) -> ReplState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == ReplState::Running
    }

    /// Stop without dispatching anything (end of input, interrupt)
    pub fn stop(&mut self) {
        info!("Session stopped");
        self.state = ReplState::Stopped;
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Tokenize and dispatch one input line.
    ///
    /// Returns `None` for a blank line.
    pub fn handle_line(&mut self, line: &str) -> Option<String> {
        match parse_input(line) {
            Ok((name, _)) if name.is_empty() => None,
            Ok((name, args)) => Some(self.execute_command(&name, &args)),
            Err(e) => Some(format!("Error: {e}")),
        }
    }

    /// Run the named command and render its outcome as one transcript entry
    pub fn execute_command(&mut self, command_name: &str, args: &[String]) -> String {
        let name = command_name.to_lowercase();
        let Some(command) = self.registry.get(&name) else {
            debug!("Unknown command requested: {}", command_name);
            return Error::UnknownCommand(command_name.to_string()).to_string();
        };

        debug!("Executing '{}' with {} argument(s)", name, args.len());
        match command.execute(args) {
            Ok(output) => {
                if output.as_number().is_some() {
                    self.record_calculation(&name, args);
                }

                if output.is_exit_signal() {
                    info!("Exit requested via '{}'", name);
                    self.state = ReplState::Stopped;
                    return GOODBYE.to_string();
                }

                output.to_string()
            }
            Err(e) if e.is_user_error() => format!("Error: {e}"),
            Err(e) => {
                error!("Command '{}' failed: {}", name, e);
                format!("Unexpected error: {e}")
            }
        }
    }

    fn record_calculation(&mut self, name: &str, args: &[String]) {
        if name.parse::<Operation>().is_err() {
            return;
        }

        if let Ok(operands) = parse_numbers(args) {
            if let [a, b, ..] = operands.as_slice() {
                self.history.push(Calculation::new(*a, *b, name));
            }
        }
    }

    /// Listing produced by the `menu` command, if one is registered
    pub fn menu(&self) -> Option<String> {
        self.registry
            .get("menu")
            .and_then(|menu| menu.execute(&[]).ok())
            .map(|out: CommandOutput| out.to_string())
    }
}
