pub mod cli;
pub mod commands;
pub mod logging;
pub mod repl;

// Re-export commonly used items
pub use cli::{Cli, Mode};
