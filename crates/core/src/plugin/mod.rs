//! Plugin discovery and loading
//!
//! A plugin is a TOML manifest dropped into the plugins directory. Each
//! manifest names one or more command implementations from the
//! [`PluginCatalog`]; every resolved implementation is registered under a name
//! derived from its identifier (`PowerCommand` → `power`).
//!
//! Discovery, manifest loading and registration are separate steps so each can
//! be exercised on its own. A broken plugin file is logged and skipped; it
//! never stops the remaining files from loading.

pub mod catalog;
pub mod manifest;
pub mod power;

pub use catalog::{CommandFactory, PluginCatalog};
pub use manifest::{CommandDeclaration, PluginManifest};
pub use power::PowerCommand;

use crate::command::Command;
use crate::error::{Error, Result};
use crate::registry::CommandTable;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Extension of plugin files
pub const PLUGIN_EXTENSION: &str = "toml";

/// Files starting with this prefix are never loaded
pub const RESERVED_PREFIX: &str = "_";

/// Strip a trailing `command` from the lowercased identifier
pub fn derive_command_name(identifier: &str) -> String {
    let lower = identifier.to_lowercase();
    match lower.strip_suffix("command") {
        Some(stem) => stem.to_string(),
        None => lower,
    }
}

/// Loads plugin commands from a directory
pub struct PluginLoader {
    plugins_dir: PathBuf,
    catalog: PluginCatalog,
    commands: CommandTable,
}

impl PluginLoader {
    pub fn new(plugins_dir: impl Into<PathBuf>) -> Self {
        Self::with_catalog(plugins_dir, PluginCatalog::bundled())
    }

    pub fn with_catalog(plugins_dir: impl Into<PathBuf>, catalog: PluginCatalog) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
            catalog,
            commands: CommandTable::new(),
        }
    }

    pub fn plugins_dir(&self) -> &Path {
        &self.plugins_dir
    }

    pub fn catalog_mut(&mut self) -> &mut PluginCatalog {
        &mut self.catalog
    }

    /// Plugin files in the plugins directory, sorted by file name.
    ///
    /// A missing directory yields no files.
    pub fn discover_plugins(&self) -> Vec<PathBuf> {
        if !self.plugins_dir.is_dir() {
            debug!("Plugins directory {} not found", self.plugins_dir.display());
            return Vec::new();
        }

        let mut plugin_files = Vec::new();
        for entry in WalkDir::new(&self.plugins_dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable plugin entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_file() && is_plugin_file(entry.path()) {
                plugin_files.push(entry.into_path());
            }
        }

        plugin_files
    }

    /// Load every discovered plugin and return all commands known to the loader
    pub fn load_plugins(&mut self) -> CommandTable {
        for plugin_path in self.discover_plugins() {
            match self.load_plugin_file(&plugin_path) {
                Ok(loaded) => {
                    for (name, command) in loaded {
                        info!("Loaded plugin command: {}", name);
                        self.commands.insert(name, command);
                    }
                }
                Err(e) => warn!("{}", e),
            }
        }

        self.commands.clone()
    }

    /// Resolve every command a single plugin file declares.
    ///
    /// All-or-nothing: if any declaration fails, the file contributes no
    /// commands.
    pub fn load_plugin_file(&self, path: &Path) -> Result<Vec<(String, Arc<dyn Command>)>> {
        let module = path
            .file_stem()
            .and_then(|s| s.to_str())
            .ok_or_else(|| Error::plugin_load(path, "file name is not valid UTF-8"))?;
        debug!("Loading plugin module '{}' from {}", module, path.display());

        let manifest = PluginManifest::load_from_file(path)?;
        if manifest.commands.is_empty() {
            debug!("Plugin module '{}' declares no commands", module);
        }

        manifest
            .commands
            .iter()
            .map(|decl| -> Result<(String, Arc<dyn Command>)> {
                let command = self.catalog.instantiate(&decl.type_name).ok_or_else(|| {
                    Error::plugin_load(
                        path,
                        format!(
                            "module '{module}' refers to unknown command type '{}'",
                            decl.type_name
                        ),
                    )
                })?;
                Ok((derive_command_name(&decl.type_name), command))
            })
            .collect()
    }

    /// Register a command without a plugin file
    pub fn register(&mut self, name: &str, command: Arc<dyn Command>) {
        self.commands.insert(name.to_string(), command);
    }

    pub fn get_all(&self) -> &CommandTable {
        &self.commands
    }
}

fn is_plugin_file(path: &Path) -> bool {
    let has_extension = path.extension().and_then(|e| e.to_str()) == Some(PLUGIN_EXTENSION);
    let reserved = path
        .file_name()
        .and_then(|n| n.to_str())
        .is_none_or(|n| n.starts_with(RESERVED_PREFIX));
    has_extension && !reserved
}
