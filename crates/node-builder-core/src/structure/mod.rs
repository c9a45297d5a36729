//! Project structure creation
//!
//! Lays out the directory skeleton and writes every generated file for a
//! [`ProjectChoice`]. The routing is fixed:
//!
//! - `main.ts` comes from `main/<framework>` (optional template)
//! - `config/db.ts` comes from `config/db/drizzle-<database>` or
//!   `config/db/sequelize`; TypeORM gets a generated `data-source.ts`;
//!   Prisma gets nothing at this stage
//! - `.gitignore` and `package.json` come from required templates
//!
//! Paths are always joined onto the resolved project root; the process
//! working directory is left alone.

pub mod files;
pub mod package;
pub mod readme;
pub mod typeorm;

use crate::choice::{Orm, ProjectChoice, ProjectName};
use crate::error::{Result, ScaffoldError};
use crate::install::runner::CommandRunner;
use crate::reporter::Reporter;
use crate::templates::{self, TemplateStore};
use files::{ensure_dir, is_empty_dir, write_file, WriteOutcome};
use std::path::{Path, PathBuf};

pub use package::NamePatch;

/// Folders every project gets
pub const BASE_FOLDERS: &[&str] = &[
    "controllers",
    "routes",
    "services",
    "utils",
    "models",
    "middlewares",
    "config",
];

/// Extra folders referenced by the TypeORM data source
pub const TYPEORM_FOLDERS: &[&str] = &["entities", "migrations", "subscribers"];

pub fn folders_for(orm: Orm) -> Vec<&'static str> {
    let mut folders = BASE_FOLDERS.to_vec();
    if orm == Orm::Typeorm {
        folders.extend_from_slice(TYPEORM_FOLDERS);
    }
    folders
}

/// Where source folders and `main.ts` go
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Layout {
    /// Everything under `src/`
    #[default]
    Src,
    /// Folders and `main.ts` at the project root
    Flat,
}

impl Layout {
    pub fn source_dir(&self, root: &Path) -> PathBuf {
        match self {
            Layout::Src => root.join("src"),
            Layout::Flat => root.to_path_buf(),
        }
    }

    /// Path prefix of the source directory, relative to the project root
    pub fn prefix(&self) -> &'static str {
        match self {
            Layout::Src => "src/",
            Layout::Flat => "",
        }
    }

    /// Entry file relative to the project root
    pub fn entry(&self) -> String {
        format!("{}main.ts", self.prefix())
    }
}

/// Resolve (and create if needed) the project root.
///
/// `.` is `cwd` itself. A named project is created under `cwd`; an existing
/// empty directory is reused, anything else there is a conflict.
pub async fn resolve_target(name: &ProjectName, cwd: &Path) -> Result<PathBuf> {
    let dir = match name {
        ProjectName::CurrentDir => return Ok(cwd.to_path_buf()),
        ProjectName::Named(n) => cwd.join(n),
    };

    match tokio::fs::metadata(&dir).await {
        Ok(meta) if !meta.is_dir() => return Err(ScaffoldError::DirectoryConflict(dir)),
        Ok(_) => {
            if !is_empty_dir(&dir).await? {
                return Err(ScaffoldError::DirectoryConflict(dir));
            }
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tokio::fs::create_dir(&dir)
                .await
                .map_err(|e| match e.kind() {
                    std::io::ErrorKind::AlreadyExists => {
                        ScaffoldError::DirectoryConflict(dir.clone())
                    }
                    _ => ScaffoldError::from_io(&dir, e),
                })?;
        }
        Err(e) => return Err(ScaffoldError::from_io(&dir, e)),
    }

    Ok(dir)
}

/// Result of a structure build
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub root: PathBuf,
    /// Name written into README and package.json
    pub project_name: String,
    pub created_dirs: usize,
    pub files: Vec<(PathBuf, WriteOutcome)>,
}

impl BuildSummary {
    pub fn written(&self) -> usize {
        self.files
            .iter()
            .filter(|(_, o)| *o != WriteOutcome::Skipped)
            .count()
    }

    /// Files recorded so far below `dir`, relative with `/` separators
    fn sources_under(&self, dir: &Path) -> Vec<String> {
        self.files
            .iter()
            .filter_map(|(p, _)| p.strip_prefix(dir).ok())
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect()
    }

    pub fn outcome(&self, path: &Path) -> Option<WriteOutcome> {
        self.files
            .iter()
            .find(|(p, _)| p == path)
            .map(|(_, o)| *o)
    }
}

/// Creates the on-disk layout for a [`ProjectChoice`]
pub struct ProjectBuilder<'a> {
    templates: &'a TemplateStore,
    layout: Layout,
    name_patch: NamePatch,
}

impl<'a> ProjectBuilder<'a> {
    pub fn new(templates: &'a TemplateStore) -> Self {
        Self {
            templates,
            layout: Layout::default(),
            name_patch: NamePatch::default(),
        }
    }

    pub fn layout(mut self, layout: Layout) -> Self {
        self.layout = layout;
        self
    }

    pub fn name_patch(mut self, name_patch: NamePatch) -> Self {
        self.name_patch = name_patch;
        self
    }

    /// Run every structure step in order, stopping at the first fatal error
    pub async fn build<R: Reporter, C: CommandRunner>(
        &self,
        choice: &ProjectChoice,
        cwd: &Path,
        reporter: &mut R,
        runner: &mut C,
    ) -> Result<BuildSummary> {
        let root = resolve_target(&choice.name, cwd).await?;
        let project_name = choice.name.resolve(&root);
        let mut summary = BuildSummary {
            project_name: project_name.clone(),
            root: root.clone(),
            created_dirs: 0,
            files: Vec::new(),
        };
        let source_dir = self.layout.source_dir(&root);

        reporter.update("Creating folders...");
        for folder in folders_for(choice.orm) {
            if ensure_dir(&source_dir.join(folder)).await? {
                summary.created_dirs += 1;
            }
        }

        reporter.update("Writing entry point...");
        let entry_key = format!("main/{}", choice.framework);
        match self.templates.get(&entry_key) {
            Some(content) => {
                let path = source_dir.join("main.ts");
                let outcome = write_file(reporter, &path, content).await?;
                summary.files.push((path, outcome));
            }
            None => reporter.warning(&format!(
                "Template for {} not found. Skipping main.ts creation.",
                choice.framework.display_name()
            )),
        }

        self.write_orm_config(choice, &source_dir, &project_name, reporter, &mut summary)
            .await?;
        let sources = summary.sources_under(&source_dir);

        reporter.update("Writing project files...");
        let env_path = root.join(".env");
        let outcome = write_file(reporter, &env_path, b"").await?;
        summary.files.push((env_path, outcome));

        let gitignore = self.templates.require("gitignore")?;
        let path = root.join(".gitignore");
        let outcome = write_file(reporter, &path, gitignore).await?;
        summary.files.push((path, outcome));

        let readme = readme::render(choice, &project_name, self.layout, &sources);
        let path = root.join("README.md");
        let outcome = write_file(reporter, &path, readme.as_bytes()).await?;
        summary.files.push((path, outcome));

        let entry = self.layout.entry();
        let manifest = templates::render(
            "package.json",
            self.templates.require("package.json")?,
            &[("entry", entry.as_str())],
        )?;
        let path = root.join("package.json");
        let outcome = write_file(reporter, &path, &manifest).await?;
        summary.files.push((path, outcome));

        // A declined overwrite keeps the operator's manifest untouched
        if outcome != WriteOutcome::Skipped {
            self.name_patch.apply(runner, &root, &project_name).await?;
        }

        Ok(summary)
    }

    async fn write_orm_config<R: Reporter>(
        &self,
        choice: &ProjectChoice,
        source_dir: &Path,
        project_name: &str,
        reporter: &mut R,
        summary: &mut BuildSummary,
    ) -> Result<()> {
        let db_config = source_dir.join("config").join("db.ts");

        let (path, content) = match choice.orm {
            Orm::Drizzle => {
                reporter.update("Setting up Drizzle ORM configuration...");
                let key = format!("config/db/drizzle-{}", choice.database);
                (db_config, self.templates.require(&key)?.to_vec())
            }
            Orm::Sequelize => {
                reporter.update("Setting up Sequelize ORM configuration...");
                (db_config, self.templates.require("config/db/sequelize")?.to_vec())
            }
            Orm::Typeorm => {
                reporter.update("Setting up TypeORM configuration...");
                let content = typeorm::data_source(choice, project_name, self.layout.prefix());
                (source_dir.join("data-source.ts"), content.into_bytes())
            }
            Orm::Prisma => return Ok(()),
        };

        let outcome = write_file(reporter, &path, &content).await?;
        summary.files.push((path, outcome));
        Ok(())
    }
}
