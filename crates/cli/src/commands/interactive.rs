use anyhow::{Context, Result};
use calcrepl_core::{Config, Session};
use std::io::{self, Write};
use tracing::info;

use crate::repl::{EditorInput, banner, run_repl};

pub fn interactive_command(config: &Config) -> Result<()> {
    info!(
        "Starting interactive session (env: {}, plugins: {})",
        config.app_env,
        config.plugins_dir.display()
    );

    let mut session = Session::from_config(config);
    let mut input = EditorInput::new().context("Failed to initialise line editor")?;
    let mut out = io::stdout();

    write!(out, "{}", banner(config, &session))?;
    run_repl(&mut session, &mut input, &mut out).context("REPL terminated abnormally")?;

    info!(
        "Session ended after {} calculation(s)",
        session.history().len()
    );
    Ok(())
}
