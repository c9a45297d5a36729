//! Command driver
//!
//! Sequences one run through its stages:
//!
//! ```text
//! CollectChoice -> BuildStructure -> InstallDependencies -> [InstallLint] -> Done
//! ```
//!
//! Any stage can move to `Failed`, which is terminal. The driver only talks
//! to the operator through the injected [`Reporter`] and only spawns
//! processes through the injected [`CommandRunner`].

use crate::choice::ProjectChoice;
use crate::error::Result;
use crate::install::runner::CommandRunner;
use crate::install::table::PackageTable;
use crate::install::{InstallFailurePolicy, InstallPlan, Installer, StepKind};
use crate::reporter::Reporter;
use crate::runtime::RuntimeReport;
use crate::structure::{BuildSummary, Layout, NamePatch, ProjectBuilder};
use crate::templates::TemplateStore;
use std::fmt;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    CollectChoice,
    BuildStructure,
    InstallDependencies,
    InstallLint,
    Done,
    Failed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Stage::CollectChoice => "collecting choices",
            Stage::BuildStructure => "creating the project structure",
            Stage::InstallDependencies => "installing dependencies",
            Stage::InstallLint => "setting up ESLint",
            Stage::Done => "done",
            Stage::Failed => "failed",
        };
        write!(f, "{}", label)
    }
}

/// Produces the operator's selections for the `CollectChoice` stage
pub trait ChoiceSource {
    fn collect(self) -> Result<ProjectChoice>;
}

/// A fully preset choice needs no prompting
impl ChoiceSource for ProjectChoice {
    fn collect(self) -> Result<ProjectChoice> {
        Ok(self)
    }
}

#[derive(Debug, Clone)]
pub struct WorkflowOptions {
    pub layout: Layout,
    /// `None` picks a strategy from the runtime probe
    pub name_patch: Option<NamePatch>,
    pub policy: InstallFailurePolicy,
    /// Probe `node` and the package manager before building
    pub check_runtime: bool,
    pub table: PackageTable,
}

impl Default for WorkflowOptions {
    fn default() -> Self {
        Self {
            layout: Layout::default(),
            name_patch: None,
            policy: InstallFailurePolicy::default(),
            check_runtime: true,
            table: PackageTable::standard(),
        }
    }
}

/// What a finished run produced
#[derive(Debug, Clone)]
pub struct RunSummary {
    pub choice: ProjectChoice,
    pub build: BuildSummary,
    /// Install steps that failed under [`InstallFailurePolicy::Warn`]
    pub failed_steps: Vec<StepKind>,
}

pub struct Driver<'a, R: Reporter, C: CommandRunner> {
    templates: &'a TemplateStore,
    options: WorkflowOptions,
    reporter: &'a mut R,
    runner: &'a mut C,
    stage: Stage,
}

impl<'a, R: Reporter, C: CommandRunner> Driver<'a, R, C> {
    pub fn new(
        templates: &'a TemplateStore,
        options: WorkflowOptions,
        reporter: &'a mut R,
        runner: &'a mut C,
    ) -> Self {
        Self {
            templates,
            options,
            reporter,
            runner,
            stage: Stage::CollectChoice,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// Drive one run to `Done` or `Failed`.
    /// On failure the diagnostic names the stage that broke.
    pub async fn run<S: ChoiceSource>(&mut self, source: S, cwd: &Path) -> Result<RunSummary> {
        match self.drive(source, cwd).await {
            Ok(summary) => {
                self.stage = Stage::Done;
                Ok(summary)
            }
            Err(e) => {
                let failed_at = self.stage;
                self.stage = Stage::Failed;
                self.reporter
                    .error(&format!("Failed while {}: {}", failed_at, e));
                Err(e)
            }
        }
    }

    async fn drive<S: ChoiceSource>(&mut self, source: S, cwd: &Path) -> Result<RunSummary> {
        self.stage = Stage::CollectChoice;
        let choice = source.collect()?;
        // Planned up front so an unroutable pair leaves nothing on disk
        let plan = InstallPlan::for_choice(&choice, &self.options.table)?;

        self.stage = Stage::BuildStructure;
        let name_patch = self.name_patch(&choice);
        self.reporter.start("Creating project structure...");
        let build = ProjectBuilder::new(self.templates)
            .layout(self.options.layout)
            .name_patch(name_patch)
            .build(&choice, cwd, &mut *self.reporter, &mut *self.runner)
            .await?;
        self.reporter.stop(&format!(
            "Project structure created in {} ({} files written)",
            build.root.display(),
            build.written()
        ));

        self.stage = Stage::InstallDependencies;
        let installer = Installer::new(self.options.policy);
        let mut failed_steps = installer
            .install_dependencies(&plan, &build.root, &mut *self.reporter, &mut *self.runner)
            .await?
            .failed;

        if plan.lint.is_some() {
            self.stage = Stage::InstallLint;
            let report = installer
                .install_lint(&plan, &build.root, &mut *self.reporter, &mut *self.runner)
                .await?;
            failed_steps.extend(report.failed);
        }

        Ok(RunSummary {
            choice,
            build,
            failed_steps,
        })
    }

    /// Run the advisory runtime probe and settle the name patch strategy
    fn name_patch(&mut self, choice: &ProjectChoice) -> NamePatch {
        if !self.options.check_runtime {
            return self.options.name_patch.unwrap_or_default();
        }

        let report = RuntimeReport::probe(choice.package_manager);
        for warning in report.warnings() {
            self.reporter.warning(&warning);
        }
        self.options
            .name_patch
            .unwrap_or_else(|| report.name_patch())
    }
}
