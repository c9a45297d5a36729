//! Template lookup from the embedded set or a local directory
//!
//! Both sources end up as the same in-memory map from logical path to bytes,
//! so the builder behaves identically whichever one is in use.

use super::manifest::{logical_keys, TemplateManifest};
use crate::error::{Result, ScaffoldError};
use anyhow::Context;
use std::borrow::Cow;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Environment variable overriding the template source with a local directory
pub const TEMPLATE_DIR_ENV: &str = "NODE_BUILDER_TEMPLATE_DIR";

/// Manifest file name inside a local template directory
pub const MANIFEST_FILE: &str = "template.yaml";

/// Templates compiled into the binary
const EMBEDDED: &[(&str, &[u8])] = &[
    (
        "main/express",
        include_bytes!("../../templates/main/express.ts"),
    ),
    (
        "main/fastify",
        include_bytes!("../../templates/main/fastify.ts"),
    ),
    (
        "config/db/drizzle-mysql",
        include_bytes!("../../templates/config/db/drizzle-mysql.ts"),
    ),
    (
        "config/db/drizzle-postgresql",
        include_bytes!("../../templates/config/db/drizzle-postgresql.ts"),
    ),
    (
        "config/db/drizzle-sqlite",
        include_bytes!("../../templates/config/db/drizzle-sqlite.ts"),
    ),
    (
        "config/db/sequelize",
        include_bytes!("../../templates/config/db/sequelize.ts"),
    ),
    ("gitignore", include_bytes!("../../templates/gitignore")),
    ("package.json", include_bytes!("../../templates/package.json")),
];

/// Template source - either the embedded set or a local directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    Embedded,
    Local(PathBuf),
}

impl TemplateSource {
    /// An explicit directory wins, then [`TEMPLATE_DIR_ENV`], then the embedded set
    pub fn resolve(template_dir: Option<PathBuf>) -> Self {
        template_dir
            .or_else(|| {
                std::env::var_os(TEMPLATE_DIR_ENV)
                    .filter(|v| !v.is_empty())
                    .map(PathBuf::from)
            })
            .map(Self::Local)
            .unwrap_or(Self::Embedded)
    }
}

/// Read-only mapping from logical template path to content
#[derive(Debug, Clone)]
pub struct TemplateStore {
    files: HashMap<String, Cow<'static, [u8]>>,
}

impl TemplateStore {
    pub fn embedded() -> Self {
        Self {
            files: EMBEDDED
                .iter()
                .map(|(key, bytes)| (key.to_string(), Cow::Borrowed(*bytes)))
                .collect(),
        }
    }

    /// Load every template of a local directory up front
    pub fn from_local(dir: &Path) -> anyhow::Result<Self> {
        if !dir.is_dir() {
            anyhow::bail!("Template directory not found: {}", dir.display());
        }

        let manifest_path = dir.join(MANIFEST_FILE);
        let mut files = HashMap::new();

        if manifest_path.exists() {
            let content = std::fs::read_to_string(&manifest_path)
                .with_context(|| format!("Failed to read {}", manifest_path.display()))?;
            let manifest = TemplateManifest::parse(&content)
                .with_context(|| format!("Failed to parse {}", manifest_path.display()))?;

            for (logical, relative) in &manifest.files {
                let path = dir.join(relative);
                // Declared but absent files surface later as TemplateMissing
                if path.is_file() {
                    let bytes = std::fs::read(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?;
                    files.insert(logical.clone(), Cow::Owned(bytes));
                }
            }
        } else {
            for entry in WalkDir::new(dir).into_iter().filter_map(|e| e.ok()) {
                if !entry.file_type().is_file() {
                    continue;
                }
                let relative = match entry.path().strip_prefix(dir) {
                    Ok(rel) => rel.to_string_lossy().into_owned(),
                    Err(_) => continue,
                };
                let bytes = std::fs::read(entry.path())
                    .with_context(|| format!("Failed to read {}", entry.path().display()))?;
                for key in logical_keys(&relative) {
                    files.entry(key).or_insert_with(|| Cow::Owned(bytes.clone()));
                }
            }
        }

        Ok(Self { files })
    }

    pub fn from_source(source: &TemplateSource) -> anyhow::Result<Self> {
        match source {
            TemplateSource::Embedded => Ok(Self::embedded()),
            TemplateSource::Local(dir) => Self::from_local(dir),
        }
    }

    /// Content of an optional template
    pub fn get(&self, logical: &str) -> Option<&[u8]> {
        self.files.get(logical).map(|c| c.as_ref())
    }

    /// Content of a required template; a miss is fatal
    pub fn require(&self, logical: &str) -> Result<&[u8]> {
        self.get(logical)
            .ok_or_else(|| ScaffoldError::TemplateMissing(logical.to_string()))
    }

    pub fn contains(&self, logical: &str) -> bool {
        self.files.contains_key(logical)
    }

    /// Copy of this store without `logical`
    pub fn without(mut self, logical: &str) -> Self {
        self.files.remove(logical);
        self
    }
}

impl Default for TemplateStore {
    fn default() -> Self {
        Self::embedded()
    }
}
