//! Terminal side of the REPL: line editing, banner and the read loop

use anyhow::{Result, anyhow};
use calcrepl_core::{Config, GOODBYE, Session};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use std::io::Write;

pub const PROMPT: &str = "calculator> ";

/// Result of one attempt to read a line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    Interrupted,
    Eof,
}

/// Source of input lines for [`run_repl`]
pub trait LineInput {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome>;
}

/// Interactive input backed by rustyline
pub struct EditorInput {
    editor: DefaultEditor,
}

impl EditorInput {
    pub fn new() -> Result<Self> {
        let editor = DefaultEditor::new().map_err(|e| anyhow!("failed to init rustyline: {e}"))?;
        Ok(Self { editor })
    }
}

impl LineInput for EditorInput {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome> {
        match self.editor.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    self.editor
                        .add_history_entry(line.as_str())
                        .map_err(|e| anyhow!("failed to record history: {e}"))?;
                }
                Ok(ReadOutcome::Line(line))
            }
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(anyhow!("readline error: {e}")),
        }
    }
}

/// Welcome text printed before the first prompt
pub fn banner(config: &Config, session: &Session) -> String {
    let mut out = String::new();
    out.push_str("Welcome to the Calculator Application!\n");
    out.push_str("Type 'menu' to see available commands or 'exit' to quit.\n");
    out.push_str(&"=".repeat(50));
    out.push('\n');

    if !config.is_production() {
        out.push_str(&format!("Environment: {}\n", config.app_env));
    }

    if config.enable_advanced_operations {
        let extensions = session.registry().extension_names();
        if extensions.is_empty() {
            out.push_str("Advanced operations enabled (no plugin commands loaded)\n");
        } else {
            out.push_str(&format!(
                "Advanced operations enabled: {}\n",
                extensions.join(", ")
            ));
        }
    }

    if let Some(menu) = session.menu() {
        out.push_str(&menu);
        out.push('\n');
    }

    out
}

/// Read, dispatch and print until the session stops.
///
/// End of input and interrupts stop the session without dispatching.
pub fn run_repl(
    session: &mut Session,
    input: &mut impl LineInput,
    out: &mut impl Write,
) -> Result<()> {
    while session.is_running() {
        match input.read_line(PROMPT)? {
            ReadOutcome::Line(line) => {
                if let Some(reply) = session.handle_line(&line) {
                    writeln!(out, "{reply}")?;
                }
            }
            ReadOutcome::Interrupted | ReadOutcome::Eof => {
                writeln!(out, "\n{GOODBYE}")?;
                session.stop();
            }
        }
        out.flush()?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use calcrepl_core::{
        AppEnv, Calculation, CollisionPolicy, CommandRegistry, ReplState,
        plugin::PowerCommand,
    };
    use std::collections::VecDeque;
    use std::sync::Arc;

    struct ScriptedInput {
        lines: VecDeque<ReadOutcome>,
        prompts: usize,
    }

    impl ScriptedInput {
        fn new(lines: &[&str], end: ReadOutcome) -> Self {
            let mut lines: VecDeque<ReadOutcome> = lines
                .iter()
                .map(|l| ReadOutcome::Line(l.to_string()))
                .collect();
            lines.push_back(end);
            Self { lines, prompts: 0 }
        }
    }

    impl LineInput for ScriptedInput {
        fn read_line(&mut self, _prompt: &str) -> Result<ReadOutcome> {
            self.prompts += 1;
            Ok(self.lines.pop_front().unwrap_or(ReadOutcome::Eof))
        }
    }

    fn session() -> Session {
        let registry = CommandRegistry::with_builtins(CollisionPolicy::Override);
        registry.install_menu();
        Session::new(registry)
    }

    fn transcript(session: &mut Session, input: &mut ScriptedInput) -> String {
        let mut out = Vec::new();
        run_repl(session, input, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_command_then_interrupt() {
        let mut session = session();
        let mut input = ScriptedInput::new(&["add 2 3"], ReadOutcome::Interrupted);

        let out = transcript(&mut session, &mut input);
        assert_eq!(out, format!("5.0\n\n{GOODBYE}\n"));
        assert_eq!(session.state(), ReplState::Stopped);
        assert_eq!(
            session.history().entries(),
            vec![Calculation::new(2.0, 3.0, "add")]
        );
    }

    #[test]
    fn test_exit_stops_before_remaining_input() {
        let mut session = session();
        let mut input = ScriptedInput::new(&["", "exit", "add 1 1"], ReadOutcome::Eof);

        let out = transcript(&mut session, &mut input);
        assert_eq!(out, format!("{GOODBYE}\n"));
        assert_eq!(input.prompts, 2);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_errors_keep_the_loop_alive() {
        let mut session = session();
        let mut input = ScriptedInput::new(
            &["divide 5 0", "unknown 1 2", "add x 1", "multiply 2 3"],
            ReadOutcome::Eof,
        );

        let out = transcript(&mut session, &mut input);
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "Error: Cannot divide by zero");
        assert!(lines[1].starts_with("Unknown command: unknown."));
        assert!(lines[2].starts_with("Error: could not convert"));
        assert_eq!(lines[3], "6.0");
        assert_eq!(lines.last(), Some(&GOODBYE));
    }

    #[test]
    fn test_banner_mentions_environment_and_plugins() {
        let registry = CommandRegistry::with_builtins(CollisionPolicy::Override);
        registry.insert("power", Arc::new(PowerCommand));
        registry.install_menu();
        let session = Session::new(registry);

        let config = Config {
            enable_advanced_operations: true,
            ..Default::default()
        };
        let text = banner(&config, &session);
        assert!(text.starts_with("Welcome to the Calculator Application!\n"));
        assert!(text.contains("Environment: development"));
        assert!(text.contains("Advanced operations enabled: power"));
        assert!(text.contains("Available Commands:"));

        let config = Config {
            app_env: AppEnv::Production,
            ..Default::default()
        };
        let text = banner(&config, &session);
        assert!(!text.contains("Environment:"));
        assert!(!text.contains("Advanced operations"));
    }
}
