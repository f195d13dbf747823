use crate::error::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Contents of one plugin file.
///
/// ```toml
/// description = "Exponentiation"
///
/// [[commands]]
/// type = "PowerCommand"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginManifest {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub commands: Vec<CommandDeclaration>,
}

/// A command implementation the plugin asks to register
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommandDeclaration {
    /// Identifier of the implementation, e.g. `PowerCommand`
    #[serde(rename = "type")]
    pub type_name: String,
}

impl PluginManifest {
    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        toml::from_str(contents).map_err(|e| Error::plugin_load(path, e.message()))
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents =
            std::fs::read_to_string(path).map_err(|e| Error::plugin_load(path, e))?;
        Self::parse(&contents, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let manifest = PluginManifest::parse(
            r#"
                description = "Exponentiation"

                [[commands]]
                type = "PowerCommand"
            "#,
            Path::new("power.toml"),
        )
        .unwrap();

        assert_eq!(manifest.description.as_deref(), Some("Exponentiation"));
        assert_eq!(manifest.commands.len(), 1);
        assert_eq!(manifest.commands[0].type_name, "PowerCommand");
    }

    #[test]
    fn test_empty_manifest_declares_nothing() {
        let manifest = PluginManifest::parse("", Path::new("empty.toml")).unwrap();
        assert!(manifest.commands.is_empty());
    }

    #[test]
    fn test_malformed_manifest() {
        let err = PluginManifest::parse("[[commands]\ntype = ", Path::new("broken.toml"))
            .unwrap_err();
        assert!(matches!(err, Error::PluginLoad { .. }));
        assert!(err.to_string().contains("broken.toml"));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = PluginManifest::parse(
            "[[commands]]\nclass = \"PowerCommand\"\n",
            Path::new("typo.toml"),
        )
        .unwrap_err();
        assert!(matches!(err, Error::PluginLoad { .. }));
    }
}
