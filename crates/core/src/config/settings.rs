use super::AppEnv;
use crate::{
    error::{Error, Result},
    registry::CollisionPolicy,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Config file names searched for, in order, in each directory
pub const CONFIG_FILE_NAMES: [&str; 2] = [".calcrepl.json", "calcrepl.json"];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "snake_case")]
pub struct Config {
    pub app_env: AppEnv,
    /// Announce plugin commands in the startup banner
    pub enable_advanced_operations: bool,
    pub plugins_dir: PathBuf,
    pub collision_policy: CollisionPolicy,

    // Logging
    pub log_level: String,
    pub log_dir: PathBuf,
    pub log_file: String,

    pub demo_api_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_env: AppEnv::Development,
            enable_advanced_operations: false,
            plugins_dir: PathBuf::from("plugins"),
            collision_policy: CollisionPolicy::Override,
            log_level: "info".to_string(),
            log_dir: PathBuf::from("logs"),
            log_file: "calculator_app.log".to_string(),
            demo_api_key: "default_key".to_string(),
        }
    }
}

impl Config {
    /// Defaults, then the config file (explicit or discovered), then the
    /// environment
    pub fn load(explicit_file: Option<&Path>) -> Result<Self> {
        let file = match explicit_file {
            Some(path) => Some(path.to_path_buf()),
            None => Self::find_config_file(&std::env::current_dir()?),
        };

        let mut config = match file {
            Some(path) => {
                debug!("Loading config from {}", path.display());
                Self::load_from_file(&path)?
            }
            None => Self::default(),
        };

        config.apply_env();
        Ok(config)
    }

    /// Read a JSON config file; relative paths inside it resolve against the
    /// file's directory
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_json::from_str(&contents)
            .map_err(|e| Error::ConfigError(format!("Failed to parse config: {e}")))?;

        if let Some(base) = path.parent() {
            if config.plugins_dir.is_relative() {
                config.plugins_dir = base.join(&config.plugins_dir);
            }
            if config.log_dir.is_relative() {
                config.log_dir = base.join(&config.log_dir);
            }
        }

        Ok(config)
    }

    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| Error::ConfigError(format!("Failed to serialize config: {e}")))?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// Walk up from `start_path` looking for a config file
    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path;

        loop {
            for name in CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.is_file() {
                    return Some(config_path);
                }
            }

            current = current.parent()?;
        }
    }

    /// Override fields from process environment variables
    pub fn apply_env(&mut self) {
        self.apply_env_with(|key| std::env::var(key).ok());
    }

    /// Override fields from `lookup`, which maps a variable name to its value.
    ///
    /// Unrecognised mode tags and collision policies are logged and fall back
    /// to their defaults.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(value) = lookup("APP_ENV") {
            self.app_env = AppEnv::parse(&value).unwrap_or_else(|| {
                warn!("Unrecognised APP_ENV '{}', using {}", value, AppEnv::default());
                AppEnv::default()
            });
        }
        if let Some(value) = lookup("ENABLE_ADVANCED_OPERATIONS") {
            self.enable_advanced_operations = value.trim().eq_ignore_ascii_case("true");
        }
        if let Some(value) = lookup("CALCREPL_PLUGINS_DIR") {
            self.plugins_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("CALCREPL_COLLISION_POLICY") {
            self.collision_policy = value.parse().unwrap_or_else(|e| {
                warn!("{}; using {:?}", e, CollisionPolicy::default());
                CollisionPolicy::default()
            });
        }
        if let Some(value) = lookup("LOG_LEVEL") {
            self.log_level = value.to_lowercase();
        }
        if let Some(value) = lookup("CALCREPL_LOG_DIR") {
            self.log_dir = PathBuf::from(value);
        }
        if let Some(value) = lookup("LOG_FILE") {
            self.log_file = value;
        }
        if let Some(value) = lookup("DEMO_API_KEY") {
            self.demo_api_key = value;
        }
    }

    pub fn is_development(&self) -> bool {
        self.app_env == AppEnv::Development
    }

    pub fn is_production(&self) -> bool {
        self.app_env == AppEnv::Production
    }

    pub fn is_testing(&self) -> bool {
        self.app_env == AppEnv::Testing
    }

    /// Path prefix of the log files; each day's file is `<prefix>.YYYY-MM-DD`
    pub fn log_file_prefix(&self) -> PathBuf {
        self.log_dir.join(&self.log_file)
    }
}

/// Value of an environment variable, or `default` when unset
pub fn env_var(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert!(config.is_development());
        assert!(!config.is_production());
        assert!(!config.is_testing());
        assert!(!config.enable_advanced_operations);
        assert_eq!(config.plugins_dir, PathBuf::from("plugins"));
        assert_eq!(
            config.log_file_prefix(),
            PathBuf::from("logs/calculator_app.log")
        );
        assert_eq!(config.collision_policy, CollisionPolicy::Override);
    }

    #[test]
    fn test_apply_env() {
        let mut config = Config::default();
        config
            .apply_env_with(lookup(&[
                ("APP_ENV", "Production"),
                ("ENABLE_ADVANCED_OPERATIONS", "TRUE"),
                ("CALCREPL_PLUGINS_DIR", "/opt/calc/plugins"),
                ("CALCREPL_COLLISION_POLICY", "keep_existing"),
                ("LOG_LEVEL", "DEBUG"),
                ("LOG_FILE", "calc.log"),
                ("DEMO_API_KEY", "secret"),
            ]));

        assert!(config.is_production());
        assert!(config.enable_advanced_operations);
        assert_eq!(config.plugins_dir, PathBuf::from("/opt/calc/plugins"));
        assert_eq!(config.collision_policy, CollisionPolicy::KeepExisting);
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.log_file, "calc.log");
        assert_eq!(config.demo_api_key, "secret");
    }

    #[test]
    fn test_feature_flag_only_true_enables() {
        let mut config = Config::default();
        config.apply_env_with(lookup(&[("ENABLE_ADVANCED_OPERATIONS", "yes")]));
        assert!(!config.enable_advanced_operations);
    }

    #[test]
    fn test_unrecognised_env_values_fall_back() {
        let mut config = Config {
            app_env: AppEnv::Testing,
            collision_policy: CollisionPolicy::KeepExisting,
            ..Default::default()
        };
        config.apply_env_with(lookup(&[
            ("APP_ENV", "staging"),
            ("CALCREPL_COLLISION_POLICY", "reject"),
        ]));

        assert!(config.is_development());
        assert_eq!(config.collision_policy, CollisionPolicy::Override);
    }

    #[test]
    fn test_config_file_round_trip_and_relative_paths() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".calcrepl.json");

        let config = Config {
            app_env: AppEnv::Testing,
            enable_advanced_operations: true,
            plugins_dir: PathBuf::from("extensions"),
            ..Default::default()
        };
        config.save_to_file(&path).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert!(loaded.is_testing());
        assert!(loaded.enable_advanced_operations);
        assert_eq!(loaded.plugins_dir, temp.path().join("extensions"));
        assert_eq!(loaded.log_dir, temp.path().join("logs"));
    }

    #[test]
    fn test_partial_config_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("calcrepl.json");
        std::fs::write(&path, r#"{ "app_env": "PRODUCTION" }"#).unwrap();

        let loaded = Config::load_from_file(&path).unwrap();
        assert!(loaded.is_production());
        assert_eq!(loaded.log_file, "calculator_app.log");
    }

    #[test]
    fn test_invalid_config_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(".calcrepl.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load_from_file(&path).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: Failed to parse config"));
    }

    #[test]
    fn test_find_config_file_walks_up() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();
        std::fs::write(temp.path().join("calcrepl.json"), "{}").unwrap();

        let found = Config::find_config_file(&nested).unwrap();
        assert_eq!(found, temp.path().join("calcrepl.json"));

        // Dotted name wins within the same directory
        std::fs::write(temp.path().join(".calcrepl.json"), "{}").unwrap();
        let found = Config::find_config_file(&nested).unwrap();
        assert_eq!(found, temp.path().join(".calcrepl.json"));
    }

    #[test]
    fn test_env_var_default() {
        assert_eq!(
            env_var("CALCREPL_TEST_SURELY_UNSET_VARIABLE", "default_value"),
            "default_value"
        );
    }
}
