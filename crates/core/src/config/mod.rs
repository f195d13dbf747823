//! Configuration management for calcrepl

mod app_env;
mod settings;

// Re-export main types
pub use app_env::AppEnv;
pub use settings::{CONFIG_FILE_NAMES, Config, env_var};
