//! Test doubles for the reporter and command runner

use crate::error::{Result, ScaffoldError};
use crate::install::runner::{CommandRunner, Invocation};
use crate::reporter::Reporter;
use crate::structure::package;
use std::collections::VecDeque;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Progress,
    Info,
    Warning,
    Success,
    Error,
}

/// Records every message and answers overwrite prompts from a script.
/// Running out of answers behaves like a closed input stream.
#[derive(Debug, Default)]
pub struct RecordingReporter {
    pub messages: Vec<(Level, String)>,
    pub confirmations: Vec<PathBuf>,
    answers: VecDeque<bool>,
}

impl RecordingReporter {
    pub fn answering(answers: impl IntoIterator<Item = bool>) -> Self {
        Self {
            answers: answers.into_iter().collect(),
            ..Self::default()
        }
    }

    pub fn warnings(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|(level, _)| *level == Level::Warning)
            .map(|(_, m)| m.as_str())
            .collect()
    }
}

impl Reporter for RecordingReporter {
    fn start(&mut self, message: &str) {
        self.messages.push((Level::Progress, message.to_string()));
    }

    fn update(&mut self, message: &str) {
        self.messages.push((Level::Progress, message.to_string()));
    }

    fn stop(&mut self, message: &str) {
        self.messages.push((Level::Progress, message.to_string()));
    }

    fn info(&mut self, message: &str) {
        self.messages.push((Level::Info, message.to_string()));
    }

    fn warning(&mut self, message: &str) {
        self.messages.push((Level::Warning, message.to_string()));
    }

    fn success(&mut self, message: &str) {
        self.messages.push((Level::Success, message.to_string()));
    }

    fn error(&mut self, message: &str) {
        self.messages.push((Level::Error, message.to_string()));
    }

    fn confirm_overwrite(&mut self, path: &Path) -> io::Result<bool> {
        self.confirmations.push(path.to_path_buf());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "no more answers"))
    }
}

/// Records invocations instead of spawning them.
///
/// `npm pkg set name=<x>` is emulated against the real package.json so the
/// generated manifest can be asserted on.
#[derive(Debug, Default)]
pub struct RecordingRunner {
    pub calls: Vec<(Invocation, PathBuf)>,
    /// Fail any invocation carrying this argument
    pub fail_on: Option<String>,
}

impl RecordingRunner {
    pub fn failing_on(arg: &str) -> Self {
        Self {
            fail_on: Some(arg.to_string()),
            ..Self::default()
        }
    }

    pub fn invocations(&self) -> Vec<&Invocation> {
        self.calls.iter().map(|(inv, _)| inv).collect()
    }
}

impl CommandRunner for RecordingRunner {
    async fn run(&mut self, invocation: &Invocation, cwd: &Path) -> Result<()> {
        self.calls.push((invocation.clone(), cwd.to_path_buf()));

        if let Some(arg) = &self.fail_on {
            if invocation.has_arg(arg) {
                return Err(ScaffoldError::ExternalCommandFailure {
                    command: invocation.to_string(),
                    status: "exit status: 1".to_string(),
                });
            }
        }

        let args: Vec<&str> = invocation.args.iter().map(String::as_str).collect();
        if let ("npm", ["pkg", "set", assignment]) = (invocation.program.as_str(), args.as_slice())
        {
            if let Some(name) = assignment.strip_prefix("name=") {
                package::set_name_in_place(&cwd.join("package.json"), name).await?;
            }
        }

        Ok(())
    }
}
