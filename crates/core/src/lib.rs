//! calcrepl - a command-line calculator built around a pluggable command registry
//!
//! This crate provides:
//! - The four arithmetic operations and an append-only calculation history
//! - The [`Command`] contract with the built-in commands
//! - A case-insensitive [`CommandRegistry`] assembled from built-ins and plugins
//! - A [`PluginLoader`] that discovers plugin manifests in a directory
//! - The REPL [`Session`] state machine that dispatches input lines
pub mod command;
pub mod config;
pub mod error;
pub mod history;
pub mod input;
pub mod operations;
pub mod plugin;
pub mod registry;
pub mod session;
pub mod utils;

// Re-export commonly used types and traits
pub use error::{Error, Result};

// Re-export main API components
pub use command::{Command, CommandOutput, format_number};
pub use config::{AppEnv, Config};
pub use history::{Calculation, History};
pub use input::{parse_input, split_command_line};
pub use operations::Operation;
pub use plugin::{PluginCatalog, PluginLoader, derive_command_name};
pub use registry::{BUILTIN_NAMES, CollisionPolicy, CommandRegistry, CommandTable};
pub use session::{GOODBYE, ReplState, Session};
