//! Charm-style CLI prompts using cliclack

use super::reporter::ClackReporter;
use crate::choice::{
    preset_or_prompt, validate_project_name, Database, Framework, Orm, PackageManager,
    ProjectChoice, ProjectName,
};
use crate::error::{Result as ScaffoldResult, ScaffoldError};
use crate::install::runner::SystemRunner;
use crate::install::InstallFailurePolicy;
use crate::structure::Layout;
use crate::templates::{TemplateSource, TemplateStore};
use crate::workflow::{ChoiceSource, Driver, RunSummary, WorkflowOptions};
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// CLI arguments for the create command
#[derive(Debug, Clone, Default)]
pub struct CreateArgs {
    /// Local directory to use for templates instead of the embedded set
    pub template_dir: Option<PathBuf>,

    /// Project name (`.` for the current directory)
    pub name: Option<String>,

    pub package_manager: Option<String>,

    pub framework: Option<String>,

    pub database: Option<String>,

    pub orm: Option<String>,

    /// Install ESLint; `None` asks
    pub lint: Option<bool>,

    /// Put folders and `main.ts` at the project root instead of `src/`
    pub flat: bool,

    /// Warn and continue when an install step fails
    pub keep_going: bool,
}

/// Run the CLI with interactive prompts
pub async fn run(args: CreateArgs) -> Result<()> {
    cliclack::intro("node-builder")?;

    // Driver failures are reported by the driver itself
    let (templates, cwd) = match prepare(&args) {
        Ok(ready) => ready,
        Err(e) => {
            cliclack::log::error(format!("{:#}", e))?;
            return Err(e);
        }
    };

    let options = WorkflowOptions {
        layout: if args.flat { Layout::Flat } else { Layout::Src },
        policy: if args.keep_going {
            InstallFailurePolicy::Warn
        } else {
            InstallFailurePolicy::Abort
        },
        ..WorkflowOptions::default()
    };

    let mut reporter = ClackReporter::new();
    let mut runner = SystemRunner;
    let summary = Driver::new(&templates, options, &mut reporter, &mut runner)
        .run(Prompter { args: &args }, &cwd)
        .await?;

    if !summary.failed_steps.is_empty() {
        let names: Vec<String> = summary.failed_steps.iter().map(|s| s.to_string()).collect();
        cliclack::log::warning(format!(
            "Some packages were not installed ({}). Install them manually before running the project.",
            names.join(", ")
        ))?;
    }

    print_next_steps(&summary, &cwd)?;

    Ok(())
}

fn prepare(args: &CreateArgs) -> Result<(TemplateStore, PathBuf)> {
    let templates = load_templates(args)?;
    let cwd = std::env::current_dir().context("Failed to read the current directory")?;
    Ok((templates, cwd))
}

fn load_templates(args: &CreateArgs) -> Result<TemplateStore> {
    let source = TemplateSource::resolve(args.template_dir.clone());
    if let TemplateSource::Local(dir) = &source {
        cliclack::log::info(format!("Using local templates from {}", dir.display()))?;
    }
    TemplateStore::from_source(&source)
}

/// Presets first, prompts for everything missing or invalid
struct Prompter<'a> {
    args: &'a CreateArgs,
}

impl ChoiceSource for Prompter<'_> {
    fn collect(self) -> ScaffoldResult<ProjectChoice> {
        collect_choice(self.args)
    }
}

fn collect_choice(args: &CreateArgs) -> ScaffoldResult<ProjectChoice> {
    let name: ProjectName = preset_or_prompt(args.name.as_deref(), warn_invalid, prompt_name)?;

    let package_manager: PackageManager =
        preset_or_prompt(args.package_manager.as_deref(), warn_invalid, || {
            select(
                "Select a package manager",
                PackageManager::ALL.iter().map(|v| (*v, v.display_name())),
            )
        })?;

    let framework: Framework = preset_or_prompt(args.framework.as_deref(), warn_invalid, || {
        select(
            "Select a framework",
            Framework::ALL.iter().map(|v| (*v, v.display_name())),
        )
    })?;

    let database: Database = preset_or_prompt(args.database.as_deref(), warn_invalid, || {
        select(
            "Select a database",
            Database::ALL.iter().map(|v| (*v, v.display_name())),
        )
    })?;

    let orm: Orm = preset_or_prompt(args.orm.as_deref(), warn_invalid, || {
        select("Select an ORM", Orm::ALL.iter().map(|v| (*v, v.display_name())))
    })?;

    let use_lint = match args.lint {
        Some(lint) => lint,
        None => confirm("Set up ESLint?", false)?,
    };

    let synchronize = orm == Orm::Typeorm
        && confirm(
            "Let TypeORM synchronize the schema on startup? (not for production)",
            false,
        )?;

    cliclack::log::success(format!(
        "{} + {} + {} with {}",
        framework.display_name(),
        orm.display_name(),
        database.display_name(),
        package_manager.display_name()
    ))
    .map_err(ScaffoldError::InputClosed)?;

    Ok(
        ProjectChoice::new(name, package_manager, framework, database, orm)
            .with_lint(use_lint)
            .with_synchronize(synchronize),
    )
}

fn warn_invalid(e: &ScaffoldError) -> ScaffoldResult<()> {
    cliclack::log::warning(e.to_string()).map_err(ScaffoldError::InputClosed)
}

fn prompt_name() -> ScaffoldResult<ProjectName> {
    let input: String = cliclack::input("Project name")
        .placeholder("my-app (or . for the current directory)")
        .validate(|input: &String| validate_project_name(input.trim()).map_err(|e| e.to_string()))
        .interact()
        .map_err(ScaffoldError::InputClosed)?;

    input.trim().parse()
}

fn select<T, I>(prompt: &str, items: I) -> ScaffoldResult<T>
where
    T: Clone + Eq + 'static,
    I: IntoIterator<Item = (T, &'static str)>,
{
    let mut select = cliclack::select(prompt);
    for (value, label) in items {
        select = select.item(value, label, "");
    }
    select.interact().map_err(ScaffoldError::InputClosed)
}

fn confirm(prompt: &str, initial: bool) -> ScaffoldResult<bool> {
    cliclack::confirm(prompt)
        .initial_value(initial)
        .interact()
        .map_err(ScaffoldError::InputClosed)
}

fn next_steps(summary: &RunSummary, cwd: &Path) -> Vec<String> {
    let mut steps = Vec::new();

    if summary.build.root != cwd {
        let shown = summary
            .build
            .root
            .strip_prefix(cwd)
            .unwrap_or(&summary.build.root);
        steps.push(format!("cd {}", shown.display()));
    }

    let pm = summary.choice.package_manager.key();
    if summary.choice.orm == Orm::Prisma {
        steps.push("npx prisma init".to_string());
    }
    steps.push(format!("{} run dev", pm));
    steps.push("Open README.md to get started".to_string());

    steps
}

fn print_next_steps(summary: &RunSummary, cwd: &Path) -> Result<()> {
    let steps = next_steps(summary, cwd);

    println!();
    println!("  Next steps");
    println!();

    for (i, step) in steps.iter().enumerate() {
        println!("  {}.  {}", i + 1, step);
    }

    cliclack::outro("Happy coding!")?;

    Ok(())
}
