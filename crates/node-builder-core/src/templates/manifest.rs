//! Template manifest types and parsing

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Manifest of a local template directory (`template.yaml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TemplateManifest {
    /// Logical template path -> file path relative to the manifest
    #[serde(default)]
    pub files: BTreeMap<String, String>,
}

impl TemplateManifest {
    pub fn parse(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

/// Logical keys a file path is reachable under when no manifest exists:
/// the path itself and the path without its extension.
pub fn logical_keys(relative: &str) -> Vec<String> {
    let normalized = relative.replace('\\', "/");
    let mut keys = vec![normalized.clone()];

    let file_start = normalized.rfind('/').map(|i| i + 1).unwrap_or(0);
    if let Some(dot) = normalized[file_start..].rfind('.') {
        // A leading dot (".gitignore") is not an extension
        if dot > 0 {
            keys.push(normalized[..file_start + dot].to_string());
        }
    }

    keys
}
