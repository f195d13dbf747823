use anyhow::{Context, Result};
use calcrepl_core::Config;
use clap::Parser;
use std::path::PathBuf;

use crate::commands::{demo_command, interactive_command, oneshot_command};
use crate::logging::init_tracing;

pub const USAGE: &str = "Usage: calcrepl <number1> <number2> <operation>";

#[derive(Parser, Debug)]
#[command(name = "calcrepl")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    \
    APP_ENV=development|production|testing\n    \
    ENABLE_ADVANCED_OPERATIONS=true      Announce plugin commands at startup\n    \
    CALCREPL_PLUGINS_DIR=<dir>           Plugin manifest directory\n    \
    LOG_LEVEL=info                       Log file level (RUST_LOG takes precedence)")]
pub struct Cli {
    /// Omit to start the interactive calculator, or pass `<number1> <number2> <operation>`
    #[arg(allow_negative_numbers = true)]
    pub args: Vec<String>,

    /// Directory scanned for plugin manifests
    #[arg(short, long = "plugins-dir")]
    pub plugins_dir: Option<PathBuf>,

    /// Config file to use instead of searching for .calcrepl.json
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Run the calculator demonstration and exit
    #[arg(long, conflicts_with = "args")]
    pub demo: bool,
}

/// How the binary was asked to run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Interactive,
    OneShot {
        a: String,
        b: String,
        operation: String,
    },
    Demo,
    /// Wrong number of positional arguments
    Usage,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.demo {
            return Mode::Demo;
        }

        match self.args.as_slice() {
            [] => Mode::Interactive,
            [a, b, operation] => Mode::OneShot {
                a: a.clone(),
                b: b.clone(),
                operation: operation.clone(),
            },
            _ => Mode::Usage,
        }
    }

    /// Resolve configuration and run; returns the process exit code
    pub fn execute(self) -> Result<i32> {
        let mut config = Config::load(self.config.as_deref())
            .context("Failed to load configuration")?;
        if let Some(dir) = &self.plugins_dir {
            config.plugins_dir = dir.clone();
        }

        let _guard = init_tracing(&config)?;

        match self.mode() {
            Mode::Interactive => interactive_command(&config).map(|_| 0),
            Mode::OneShot { a, b, operation } => {
                println!("{}", oneshot_command(&a, &b, &operation));
                Ok(0)
            }
            Mode::Demo => demo_command().map(|_| 0),
            Mode::Usage => {
                println!("{USAGE}");
                Ok(1)
            }
        }
    }
}
