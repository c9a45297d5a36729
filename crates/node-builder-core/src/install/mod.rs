//! Dependency installation
//!
//! This module provides:
//! - The package routing table (package manager verbs, ORM/database drivers)
//! - [`InstallPlan`]: every package-manager invocation for a choice, computed
//!   before anything is spawned
//! - [`Installer`]: runs a plan step by step under an [`InstallFailurePolicy`]
//! - The lint step, which also writes `.eslintrc.json`

pub mod runner;
pub mod table;

use crate::choice::ProjectChoice;
use crate::error::{Result, ScaffoldError};
use crate::reporter::Reporter;
use crate::structure::files::{write_file, WriteOutcome};
use runner::{CommandRunner, Invocation};
use std::fmt;
use std::path::Path;
use table::{PackageTable, BASE_DEV_PACKAGES, LINT_DEV_PACKAGES};

/// Static ESLint configuration written with the lint toolchain
pub const ESLINT_CONFIG: &str = r#"{
  "parser": "@typescript-eslint/parser",
  "plugins": ["@typescript-eslint"],
  "extends": [
    "eslint:recommended",
    "plugin:@typescript-eslint/recommended"
  ]
}
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    BaseToolchain,
    Framework,
    Database,
    Lint,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            StepKind::BaseToolchain => "base packages",
            StepKind::Framework => "framework",
            StepKind::Database => "database and ORM",
            StepKind::Lint => "ESLint",
        };
        write!(f, "{}", label)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallStep {
    pub kind: StepKind,
    pub invocation: Invocation,
}

/// What to do when a package-manager call exits non-zero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallFailurePolicy {
    /// Stop at the first failed step and fail the run
    #[default]
    Abort,
    /// Report the failure as a warning and carry on with the next step
    Warn,
}

/// Every invocation needed for a choice, in order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallPlan {
    pub dependencies: Vec<InstallStep>,
    /// Present only when lint was requested
    pub lint: Option<InstallStep>,
}

impl InstallPlan {
    /// Build the whole plan up front; a routing miss fails before any
    /// process is spawned.
    pub fn for_choice(choice: &ProjectChoice, table: &PackageTable) -> Result<Self> {
        let pm = choice.package_manager.key();
        let (verb, dev_flag) = table.commands_for(choice.package_manager);

        let dev = |packages: &[&str]| {
            let mut args = vec![verb.to_string(), dev_flag.to_string()];
            args.extend(packages.iter().map(|p| p.to_string()));
            Invocation::new(pm, args)
        };
        let runtime = |packages: &[&str]| {
            let mut args = vec![verb.to_string()];
            args.extend(packages.iter().map(|p| p.to_string()));
            Invocation::new(pm, args)
        };

        let orm_packages = table.orm_packages(choice.orm, choice.database)?;

        let dependencies = vec![
            InstallStep {
                kind: StepKind::BaseToolchain,
                invocation: dev(BASE_DEV_PACKAGES),
            },
            InstallStep {
                kind: StepKind::Framework,
                invocation: runtime(&[choice.framework.key()]),
            },
            InstallStep {
                kind: StepKind::Database,
                invocation: runtime(orm_packages),
            },
        ];

        let lint = choice.use_lint.then(|| InstallStep {
            kind: StepKind::Lint,
            invocation: dev(LINT_DEV_PACKAGES),
        });

        Ok(Self { dependencies, lint })
    }
}

/// Outcome of running a group of steps
#[derive(Debug, Default)]
pub struct InstallReport {
    /// Steps that failed under [`InstallFailurePolicy::Warn`]
    pub failed: Vec<StepKind>,
}

pub struct Installer {
    policy: InstallFailurePolicy,
}

impl Installer {
    pub fn new(policy: InstallFailurePolicy) -> Self {
        Self { policy }
    }

    /// Base toolchain, framework, then ORM and database driver
    pub async fn install_dependencies<R: Reporter, C: CommandRunner>(
        &self,
        plan: &InstallPlan,
        root: &Path,
        reporter: &mut R,
        runner: &mut C,
    ) -> Result<InstallReport> {
        let mut report = InstallReport::default();
        for step in &plan.dependencies {
            self.run_step(step, root, reporter, runner, &mut report)
                .await?;
        }
        Ok(report)
    }

    /// Install the lint toolchain and write `.eslintrc.json`.
    /// Does nothing when the plan has no lint step.
    pub async fn install_lint<R: Reporter, C: CommandRunner>(
        &self,
        plan: &InstallPlan,
        root: &Path,
        reporter: &mut R,
        runner: &mut C,
    ) -> Result<InstallReport> {
        let mut report = InstallReport::default();
        let Some(step) = &plan.lint else {
            return Ok(report);
        };

        self.run_step(step, root, reporter, runner, &mut report)
            .await?;

        let path = root.join(".eslintrc.json");
        if write_file(reporter, &path, ESLINT_CONFIG.as_bytes()).await? == WriteOutcome::Skipped {
            reporter.info("Kept existing .eslintrc.json");
        }

        Ok(report)
    }

    async fn run_step<R: Reporter, C: CommandRunner>(
        &self,
        step: &InstallStep,
        root: &Path,
        reporter: &mut R,
        runner: &mut C,
        report: &mut InstallReport,
    ) -> Result<()> {
        reporter.info(&format!("Installing {}...", step.kind));

        match runner.run(&step.invocation, root).await {
            Ok(()) => {
                reporter.success(&format!("Installed {}", step.kind));
                Ok(())
            }
            Err(e @ ScaffoldError::ExternalCommandFailure { .. }) => match self.policy {
                InstallFailurePolicy::Abort => Err(e),
                InstallFailurePolicy::Warn => {
                    reporter.warning(&format!("Failed to install {}: {}", step.kind, e));
                    report.failed.push(step.kind);
                    Ok(())
                }
            },
            Err(e) => Err(e),
        }
    }
}

impl Default for Installer {
    fn default() -> Self {
        Self::new(InstallFailurePolicy::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::choice::{Database, Framework, Orm, PackageManager, ProjectName};
    use crate::testing::{RecordingReporter, RecordingRunner};

    fn choice(pm: PackageManager, orm: Orm, database: Database) -> ProjectChoice {
        ProjectChoice::new(
            ProjectName::Named("myapp".to_string()),
            pm,
            Framework::Express,
            database,
            orm,
        )
    }

    fn lines(plan: &InstallPlan) -> Vec<String> {
        plan.dependencies
            .iter()
            .chain(plan.lint.iter())
            .map(|s| s.invocation.to_string())
            .collect()
    }

    #[test]
    fn test_npm_plan() {
        let plan = InstallPlan::for_choice(
            &choice(PackageManager::Npm, Orm::Prisma, Database::Sqlite),
            &PackageTable::standard(),
        )
        .unwrap();

        assert_eq!(
            lines(&plan),
            vec![
                "npm install --save-dev typescript@latest ts-node@latest @types/node@latest prettier",
                "npm install express",
                "npm install prisma",
            ]
        );
        assert!(plan.lint.is_none());
    }

    #[test]
    fn test_yarn_plan_with_lint() {
        let plan = InstallPlan::for_choice(
            &choice(PackageManager::Yarn, Orm::Drizzle, Database::Postgresql).with_lint(true),
            &PackageTable::standard(),
        )
        .unwrap();

        assert_eq!(
            lines(&plan),
            vec![
                "yarn add --dev typescript@latest ts-node@latest @types/node@latest prettier",
                "yarn add express",
                "yarn add drizzle-orm pg",
                "yarn add --dev eslint @typescript-eslint/parser @typescript-eslint/eslint-plugin",
            ]
        );
    }

    #[test]
    fn test_drizzle_sqlite_requests_better_sqlite3() {
        let plan = InstallPlan::for_choice(
            &choice(PackageManager::Bun, Orm::Drizzle, Database::Sqlite),
            &PackageTable::standard(),
        )
        .unwrap();
        let db = &plan.dependencies[2].invocation;
        assert_eq!(db.program, "bun");
        assert!(db.has_arg("better-sqlite3"));
        assert!(db.has_arg("drizzle-orm"));
    }

    #[test]
    fn test_unsupported_pair_fails_before_planning() {
        let table = PackageTable::with_orm_routes(&[]);
        let project = choice(PackageManager::Npm, Orm::Typeorm, Database::Mysql);

        assert!(matches!(
            InstallPlan::for_choice(&project, &table),
            Err(ScaffoldError::UnsupportedCombination(_))
        ));
    }

    #[tokio::test]
    async fn test_abort_policy_stops_at_first_failure() {
        let dir = tempfile::tempdir().unwrap();
        let plan = InstallPlan::for_choice(
            &choice(PackageManager::Npm, Orm::Sequelize, Database::Mysql),
            &PackageTable::standard(),
        )
        .unwrap();
        let mut reporter = RecordingReporter::default();
        let mut runner = RecordingRunner::failing_on("express");

        let result = Installer::new(InstallFailurePolicy::Abort)
            .install_dependencies(&plan, dir.path(), &mut reporter, &mut runner)
            .await;

        assert!(matches!(result, Err(ScaffoldError::ExternalCommandFailure { .. })));
        assert_eq!(runner.calls.len(), 2);
    }

    #[tokio::test]
    async fn test_warn_policy_continues() {
        let dir = tempfile::tempdir().unwrap();
        let plan = InstallPlan::for_choice(
            &choice(PackageManager::Npm, Orm::Sequelize, Database::Mysql),
            &PackageTable::standard(),
        )
        .unwrap();
        let mut reporter = RecordingReporter::default();
        let mut runner = RecordingRunner::failing_on("express");

        let report = Installer::new(InstallFailurePolicy::Warn)
            .install_dependencies(&plan, dir.path(), &mut reporter, &mut runner)
            .await
            .unwrap();

        assert_eq!(runner.calls.len(), 3);
        assert_eq!(report.failed, vec![StepKind::Framework]);
        assert_eq!(reporter.warnings().len(), 1);
    }

    #[tokio::test]
    async fn test_steps_run_in_project_root() {
        let dir = tempfile::tempdir().unwrap();
        let plan = InstallPlan::for_choice(
            &choice(PackageManager::Pnpm, Orm::Prisma, Database::Mysql),
            &PackageTable::standard(),
        )
        .unwrap();
        let mut reporter = RecordingReporter::default();
        let mut runner = RecordingRunner::default();

        Installer::default()
            .install_dependencies(&plan, dir.path(), &mut reporter, &mut runner)
            .await
            .unwrap();

        assert!(runner.calls.iter().all(|(_, cwd)| cwd == dir.path()));
    }

    #[tokio::test]
    async fn test_lint_writes_config() {
        let dir = tempfile::tempdir().unwrap();
        let plan = InstallPlan::for_choice(
            &choice(PackageManager::Npm, Orm::Prisma, Database::Sqlite).with_lint(true),
            &PackageTable::standard(),
        )
        .unwrap();
        let mut reporter = RecordingReporter::default();
        let mut runner = RecordingRunner::default();

        Installer::default()
            .install_lint(&plan, dir.path(), &mut reporter, &mut runner)
            .await
            .unwrap();

        assert_eq!(runner.calls.len(), 1);
        assert!(runner.calls[0].0.has_arg("eslint"));
        let config = std::fs::read_to_string(dir.path().join(".eslintrc.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&config).unwrap();
        assert_eq!(value["parser"], "@typescript-eslint/parser");
    }

    #[tokio::test]
    async fn test_lint_asks_before_overwriting_config() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".eslintrc.json"), "{}").unwrap();
        let plan = InstallPlan::for_choice(
            &choice(PackageManager::Npm, Orm::Prisma, Database::Sqlite).with_lint(true),
            &PackageTable::standard(),
        )
        .unwrap();
        let mut reporter = RecordingReporter::answering([false]);
        let mut runner = RecordingRunner::default();

        Installer::default()
            .install_lint(&plan, dir.path(), &mut reporter, &mut runner)
            .await
            .unwrap();

        assert_eq!(reporter.confirmations.len(), 1);
        assert_eq!(
            std::fs::read_to_string(dir.path().join(".eslintrc.json")).unwrap(),
            "{}"
        );
    }

    #[tokio::test]
    async fn test_lint_without_request_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let plan = InstallPlan::for_choice(
            &choice(PackageManager::Npm, Orm::Prisma, Database::Sqlite),
            &PackageTable::standard(),
        )
        .unwrap();
        let mut reporter = RecordingReporter::default();
        let mut runner = RecordingRunner::default();

        Installer::default()
            .install_lint(&plan, dir.path(), &mut reporter, &mut runner)
            .await
            .unwrap();

        assert!(runner.calls.is_empty());
        assert!(!dir.path().join(".eslintrc.json").exists());
    }
}
