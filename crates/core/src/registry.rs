//! Command registry
//!
//! Maps lowercase command names to command instances. Assembly happens once
//! at startup: built-ins first, then plugin-discovered commands, then the menu
//! so its listing covers the final set.

use crate::command::{ArithmeticCommand, Command, ExitCommand, MenuCommand};
use crate::config::Config;
use crate::operations::Operation;
use crate::plugin::PluginLoader;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::{debug, info, warn};

/// Name → command table, ordered by name
pub type CommandTable = BTreeMap<String, Arc<dyn Command>>;

/// Names registered by the registry itself rather than by plugins
pub const BUILTIN_NAMES: [&str; 7] = [
    "add", "subtract", "multiply", "divide", "exit", "quit", "menu",
];

/// What happens when a name is registered twice
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CollisionPolicy {
    /// Later registration replaces the earlier one (logged)
    #[default]
    Override,
    /// First registration stays, later ones are ignored (logged)
    KeepExisting,
}

crate::impl_case_insensitive_deserialize!(
    CollisionPolicy,
    Override => "override",
    KeepExisting => "keep_existing",
);

impl std::str::FromStr for CollisionPolicy {
    type Err = crate::Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "override" => Ok(Self::Override),
            "keep_existing" => Ok(Self::KeepExisting),
            other => Err(crate::Error::ConfigError(format!(
                "unknown collision policy '{other}', expected override or keep_existing"
            ))),
        }
    }
}

/// Registry used by the REPL for dispatch
pub struct CommandRegistry {
    commands: Arc<RwLock<CommandTable>>,
    policy: CollisionPolicy,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::with_policy(CollisionPolicy::default())
    }

    pub fn with_policy(policy: CollisionPolicy) -> Self {
        Self {
            commands: Arc::new(RwLock::new(BTreeMap::new())),
            policy,
        }
    }

    /// Registry holding the arithmetic commands plus `exit` and its `quit` alias
    pub fn with_builtins(policy: CollisionPolicy) -> Self {
        let registry = Self::with_policy(policy);

        for op in Operation::ALL {
            registry.insert(op.name(), Arc::new(ArithmeticCommand::new(op)));
        }

        let exit: Arc<dyn Command> = Arc::new(ExitCommand);
        registry.insert("exit", Arc::clone(&exit));
        registry.insert("quit", exit);

        registry
    }

    /// Full startup assembly: built-ins, plugins from `config.plugins_dir`, menu
    pub fn assemble(config: &Config) -> Self {
        let mut loader = PluginLoader::new(&config.plugins_dir);
        Self::assemble_with(config.collision_policy, &mut loader)
    }

    /// Assembly with a caller-provided loader
    pub fn assemble_with(policy: CollisionPolicy, loader: &mut PluginLoader) -> Self {
        let registry = Self::with_builtins(policy);
        registry.merge_plugins(loader.load_plugins());
        registry.install_menu();

        info!("Command registry ready with {} commands", registry.len());
        registry
    }

    /// Insert under the lowercased `name`, returning the command it replaced
    pub fn insert(&self, name: &str, command: Arc<dyn Command>) -> Option<Arc<dyn Command>> {
        let key = name.to_lowercase();
        let mut table = self.write();

        if table.contains_key(&key) {
            match self.policy {
                CollisionPolicy::Override => {
                    warn!("Command '{}' is being replaced by a later registration", key);
                }
                CollisionPolicy::KeepExisting => {
                    warn!("Command '{}' already registered, ignoring new registration", key);
                    return None;
                }
            }
        }

        debug!("Registered command: {}", key);
        table.insert(key, command)
    }

    /// Merge commands discovered by the plugin loader
    pub fn merge_plugins(&self, plugins: CommandTable) {
        for (name, command) in plugins {
            self.insert(&name, command);
        }
    }

    /// Insert the `menu` command, bound to this registry's table
    pub fn install_menu(&self) {
        let menu = MenuCommand::new(Arc::downgrade(&self.commands));
        self.insert("menu", Arc::new(menu));
    }

    /// Case-insensitive lookup
    pub fn get(&self, name: &str) -> Option<Arc<dyn Command>> {
        self.read().get(&name.to_lowercase()).cloned()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(&name.to_lowercase())
    }

    /// Registered names in ascending order
    pub fn names(&self) -> Vec<String> {
        self.read().keys().cloned().collect()
    }

    /// Names that are not built-ins, i.e. contributed by plugins or hosts
    pub fn extension_names(&self) -> Vec<String> {
        self.read()
            .keys()
            .filter(|name| !BUILTIN_NAMES.contains(&name.as_str()))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    fn read(&self) -> RwLockReadGuard<'_, CommandTable> {
        self.commands.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CommandTable> {
        self.commands.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}
