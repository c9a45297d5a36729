//! Node Builder Core - scaffolding for Node.js/TypeScript backend projects
//!
//! Collects a package manager, web framework, database, ORM and lint
//! preference, lays out the project skeleton, writes the generated files and
//! shells out to the package manager for dependencies.
//!
//! # Architecture
//!
//! - **Choices** - [`choice::ProjectChoice`] and its allow-listed enums
//! - **Structure** - [`structure::ProjectBuilder`] writes folders and files from the [`templates::TemplateStore`]
//! - **Install** - [`install::InstallPlan`] and [`install::Installer`] run the package manager through a [`install::runner::CommandRunner`]
//! - **Workflow** - [`workflow::Driver`] sequences the stages and reports through a [`reporter::Reporter`]
//! - **TUI** - optional cliclack prompts and reporter (feature-gated)
//!
//! # Feature Flags
//!
//! - `tui` (default): Enables the cliclack-based prompts and reporter
//!
//! # Example Usage (without TUI)
//!
//! ```ignore
//! use node_builder_core::{choice::*, workflow::*, templates::TemplateStore};
//!
//! let choice = ProjectChoice::new(
//!     ProjectName::Named("myapp".into()),
//!     PackageManager::Npm,
//!     Framework::Express,
//!     Database::Sqlite,
//!     Orm::Prisma,
//! );
//! let templates = TemplateStore::embedded();
//! let summary = Driver::new(&templates, WorkflowOptions::default(), &mut reporter, &mut runner)
//!     .run(choice, &cwd)
//!     .await?;
//! ```

pub mod choice;
pub mod error;
pub mod install;
pub mod reporter;
pub mod runtime;
pub mod structure;
pub mod templates;
pub mod workflow;

#[cfg(feature = "tui")]
pub mod tui;

#[cfg(test)]
mod testing;

// Re-export main types for convenience
pub use choice::ProjectChoice;
pub use error::ScaffoldError;
pub use reporter::Reporter;
pub use workflow::{Driver, Stage, WorkflowOptions};

#[cfg(feature = "tui")]
pub use tui::run;
