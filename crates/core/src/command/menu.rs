use super::{Command, CommandOutput};
use crate::error::{Error, Result};
use crate::registry::CommandTable;
use std::fmt::Write;
use std::sync::{RwLock, Weak};

const RULE_WIDTH: usize = 40;

/// Lists every registered command with its usage.
///
/// Holds a weak handle on the registry table it lives in, so the listing
/// reflects whatever the table holds at execution time, this command
/// included.
pub struct MenuCommand {
    table: Weak<RwLock<CommandTable>>,
}

impl MenuCommand {
    pub(crate) fn new(table: Weak<RwLock<CommandTable>>) -> Self {
        Self { table }
    }
}

impl Command for MenuCommand {
    fn execute(&self, _args: &[String]) -> Result<CommandOutput> {
        let table = self
            .table
            .upgrade()
            .ok_or_else(|| Error::Other("command registry is no longer available".into()))?;
        let table = table
            .read()
            .map_err(|_| Error::Other("command registry lock poisoned".into()))?;

        Ok(CommandOutput::Text(render_menu(
            table
                .iter()
                .map(|(name, cmd)| (name.as_str(), cmd.description(), cmd.usage())),
        )))
    }

    fn description(&self) -> &str {
        "Display available commands and their usage"
    }

    fn usage(&self) -> &str {
        "menu"
    }
}

/// Format `(name, description, usage)` rows; rows are expected in name order
pub(crate) fn render_menu<'a>(
    rows: impl IntoIterator<Item = (&'a str, &'a str, &'a str)>,
) -> String {
    let mut out = String::from("Available Commands:\n");
    out.push_str(&"=".repeat(RULE_WIDTH));
    out.push('\n');

    for (name, description, usage) in rows {
        let _ = writeln!(out, "{name:<15} - {description}");
        let _ = writeln!(out, "{:<15} {usage}", "Usage:");
        out.push_str(&"-".repeat(RULE_WIDTH));
        out.push('\n');
    }

    out
}
