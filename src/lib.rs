//! Fixtures shared by the workspace integration tests

use calcrepl_core::{CollisionPolicy, CommandRegistry, PluginLoader, Session};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Manifest declaring the bundled power command
pub const POWER_MANIFEST: &str = "[[commands]]\ntype = \"PowerCommand\"\n";

/// A scratch plugins directory that is removed on drop
pub struct PluginDir {
    dir: TempDir,
}

impl PluginDir {
    pub fn new() -> std::io::Result<Self> {
        Ok(Self {
            dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Write `contents` to `file_name` inside the directory
    pub fn write(&self, file_name: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(file_name);
        fs::write(&path, contents)?;
        Ok(path)
    }

    /// Registry assembled from built-ins plus this directory's plugins
    pub fn registry(&self, policy: CollisionPolicy) -> CommandRegistry {
        let mut loader = PluginLoader::new(self.path());
        CommandRegistry::assemble_with(policy, &mut loader)
    }

    /// Running session over [`PluginDir::registry`] with the default policy
    pub fn session(&self) -> Session {
        Session::new(self.registry(CollisionPolicy::default()))
    }
}

/// Feed each line to the session until it stops, collecting the replies
pub fn drive(session: &mut Session, lines: &[&str]) -> Vec<String> {
    let mut replies = Vec::new();
    for line in lines {
        if !session.is_running() {
            break;
        }
        if let Some(reply) = session.handle_line(line) {
            replies.push(reply);
        }
    }
    replies
}
