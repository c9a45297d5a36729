//! node-builder CLI - Project scaffolding for Node.js backends

use anyhow::Result;
use clap::{Parser, Subcommand};
use node_builder_core::tui::CreateArgs;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "node-builder")]
#[command(about = "CLI for scaffolding Node.js/TypeScript backend projects")]
#[command(version)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new Node.js project
    Create(CliCreateArgs),
}

#[derive(Parser, Debug)]
pub struct CliCreateArgs {
    /// Local directory to use for templates instead of the embedded set (for development use)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Project name, or `.` for the current directory
    #[arg(short, long)]
    pub name: Option<String>,

    /// Package manager (npm, yarn, pnpm, bun)
    #[arg(short, long = "package-manager")]
    pub package_manager: Option<String>,

    /// Web framework (express, fastify)
    #[arg(short, long)]
    pub framework: Option<String>,

    /// Database (mysql, postgresql, sqlite)
    #[arg(short, long)]
    pub database: Option<String>,

    /// ORM (prisma, drizzle, typeorm, sequelize)
    #[arg(short, long)]
    pub orm: Option<String>,

    /// Set up ESLint without asking
    #[arg(long, conflicts_with = "no_lint")]
    pub lint: bool,

    /// Skip ESLint without asking
    #[arg(long = "no-lint")]
    pub no_lint: bool,

    /// Put folders and main.ts at the project root instead of src/
    #[arg(long)]
    pub flat: bool,

    /// Warn and continue when a package install fails
    #[arg(long = "keep-going")]
    pub keep_going: bool,
}

impl From<CliCreateArgs> for CreateArgs {
    fn from(args: CliCreateArgs) -> Self {
        let lint = match (args.lint, args.no_lint) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };

        CreateArgs {
            template_dir: args.template_dir,
            name: args.name,
            package_manager: args.package_manager,
            framework: args.framework,
            database: args.database,
            orm: args.orm,
            lint,
            flat: args.flat,
            keep_going: args.keep_going,
        }
    }
}

/// Process exit code for a finished run. Failures were already shown to the
/// user, so nothing is printed here.
fn exit_code(result: &Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(_) => 1,
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();

    let create_args = match args.command {
        Some(Command::Create(create_args)) => create_args.into(),
        // No subcommand provided, default to create behavior (interactive mode)
        None => CreateArgs::default(),
    };

    let result = node_builder_core::run(create_args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    let code = exit_code(&result);
    if code != 0 {
        let _ = cliclack::outro_cancel("Project setup failed");
        std::process::exit(code);
    }
}
