//! External process execution
//!
//! Every package-manager call goes through [`CommandRunner`] so the installer
//! can be exercised without spawning anything.

use crate::error::{Result, ScaffoldError};
use colored::Colorize;
use std::fmt;
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command as TokioCommand;

/// A program plus its arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub program: String,
    pub args: Vec<String>,
}

impl Invocation {
    pub fn new<I, S>(program: impl Into<String>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }

    /// True when any argument equals `arg`
    pub fn has_arg(&self, arg: &str) -> bool {
        self.args.iter().any(|a| a == arg)
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Runs an invocation to completion inside `cwd`
#[allow(async_fn_in_trait)]
pub trait CommandRunner {
    async fn run(&mut self, invocation: &Invocation, cwd: &Path) -> Result<()>;
}

/// Spawns real processes with inherited stdio so output streams live
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    async fn run(&mut self, invocation: &Invocation, cwd: &Path) -> Result<()> {
        println!();
        println!("{} {}", "Running:".dimmed(), invocation.to_string().yellow());
        println!();

        let status = TokioCommand::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(cwd)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .map_err(|e| ScaffoldError::ExternalCommandFailure {
                command: invocation.to_string(),
                status: format!("failed to start: {}", e),
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(ScaffoldError::ExternalCommandFailure {
                command: invocation.to_string(),
                status: status.to_string(),
            })
        }
    }
}
