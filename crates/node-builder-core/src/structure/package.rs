//! package.json name patching

use crate::error::{Result, ScaffoldError};
use crate::install::runner::{CommandRunner, Invocation};
use serde_json::Value;
use std::path::Path;
use tokio::fs;

/// How the generated manifest gets its `name`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NamePatch {
    /// `npm pkg set name=<project>`, whatever package manager was chosen
    #[default]
    Npm,
    /// Rewrite the `name` field directly
    InPlace,
}

impl NamePatch {
    pub async fn apply<C: CommandRunner>(
        self,
        runner: &mut C,
        root: &Path,
        name: &str,
    ) -> Result<()> {
        match self {
            NamePatch::Npm => {
                let invocation = Invocation::new(
                    "npm",
                    ["pkg".to_string(), "set".to_string(), format!("name={}", name)],
                );
                runner.run(&invocation, root).await
            }
            NamePatch::InPlace => set_name_in_place(&root.join("package.json"), name).await,
        }
    }
}

/// Set `name` in a package.json, keeping every other key and their order
pub async fn set_name_in_place(path: &Path, name: &str) -> Result<()> {
    let content = fs::read_to_string(path)
        .await
        .map_err(|e| ScaffoldError::from_io(path, e))?;

    let mut manifest: Value = serde_json::from_str(&content)
        .map_err(|e| ScaffoldError::Manifest(format!("{}: {}", path.display(), e)))?;

    let object = manifest.as_object_mut().ok_or_else(|| {
        ScaffoldError::Manifest(format!("{}: top level is not an object", path.display()))
    })?;
    object.insert("name".to_string(), Value::String(name.to_string()));

    let mut rendered = serde_json::to_string_pretty(&manifest)
        .map_err(|e| ScaffoldError::Manifest(e.to_string()))?;
    rendered.push('\n');

    fs::write(path, rendered)
        .await
        .map_err(|e| ScaffoldError::from_io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingRunner;

    #[tokio::test]
    async fn test_set_name_in_place_keeps_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(
            &path,
            r#"{"name": "app", "version": "1.0.0", "scripts": {"dev": "ts-node main.ts"}}"#,
        )
        .unwrap();

        set_name_in_place(&path, "myapp").await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["name"], "myapp");
        assert_eq!(value["scripts"]["dev"], "ts-node main.ts");
        assert!(content.find("\"name\"").unwrap() < content.find("\"version\"").unwrap());
    }

    #[tokio::test]
    async fn test_set_name_rejects_non_object() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("package.json");
        std::fs::write(&path, "[]").unwrap();

        assert!(matches!(
            set_name_in_place(&path, "myapp").await,
            Err(ScaffoldError::Manifest(_))
        ));
    }

    #[tokio::test]
    async fn test_npm_patch_runs_pkg_set() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"name": "app"}"#).unwrap();
        let mut runner = RecordingRunner::default();

        NamePatch::Npm.apply(&mut runner, dir.path(), "shop-api").await.unwrap();

        assert_eq!(runner.calls.len(), 1);
        assert_eq!(runner.calls[0].0.to_string(), "npm pkg set name=shop-api");
        assert_eq!(runner.calls[0].1, dir.path());
    }

    #[tokio::test]
    async fn test_in_place_patch_spawns_nothing() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"name": "app"}"#).unwrap();
        let mut runner = RecordingRunner::default();

        NamePatch::InPlace.apply(&mut runner, dir.path(), "shop-api").await.unwrap();

        assert!(runner.calls.is_empty());
        let content = std::fs::read_to_string(dir.path().join("package.json")).unwrap();
        assert!(content.contains("\"shop-api\""));
    }
}
