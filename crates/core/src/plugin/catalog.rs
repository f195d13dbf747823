use super::power::PowerCommand;
use crate::command::Command;
use std::collections::HashMap;
use std::sync::Arc;

/// Creates a fresh command instance
pub type CommandFactory = fn() -> Arc<dyn Command>;

/// Implementations bundled with the crate, keyed by identifier
const BUNDLED: &[(&str, CommandFactory)] = &[("PowerCommand", power)];

fn power() -> Arc<dyn Command> {
    Arc::new(PowerCommand)
}

/// Command implementations a plugin file may refer to by identifier
#[derive(Clone)]
pub struct PluginCatalog {
    factories: HashMap<String, CommandFactory>,
}

impl PluginCatalog {
    pub fn empty() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Catalog of the implementations that ship with calcrepl
    pub fn bundled() -> Self {
        let mut catalog = Self::empty();
        for (identifier, factory) in BUNDLED {
            catalog.register(identifier, *factory);
        }
        catalog
    }

    /// Make an implementation available to plugin files
    pub fn register(&mut self, identifier: &str, factory: CommandFactory) {
        self.factories.insert(identifier.to_string(), factory);
    }

    pub fn instantiate(&self, identifier: &str) -> Option<Arc<dyn Command>> {
        self.factories.get(identifier).map(|factory| factory())
    }

    pub fn contains(&self, identifier: &str) -> bool {
        self.factories.contains_key(identifier)
    }

    /// Known identifiers, sorted
    pub fn identifiers(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }
}

impl Default for PluginCatalog {
    fn default() -> Self {
        Self::bundled()
    }
}
