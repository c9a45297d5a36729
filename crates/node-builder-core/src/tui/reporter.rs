//! cliclack-backed [`Reporter`]

use crate::reporter::Reporter;
use cliclack::ProgressBar;
use std::io;
use std::path::Path;

/// Spinner plus inline logs.
///
/// Logging or asking while the spinner runs would tear the line, so the
/// spinner is closed first and restarted with its last message afterwards.
#[derive(Default)]
pub struct ClackReporter {
    spinner: Option<(ProgressBar, String)>,
}

impl ClackReporter {
    pub fn new() -> Self {
        Self::default()
    }

    fn suspended<T>(&mut self, f: impl FnOnce() -> T) -> T {
        let resume = self.spinner.take().map(|(spinner, message)| {
            spinner.stop(&message);
            message
        });

        let out = f();

        if let Some(message) = resume {
            self.start(&message);
        }
        out
    }
}

impl Reporter for ClackReporter {
    fn start(&mut self, message: &str) {
        if let Some((spinner, last)) = self.spinner.take() {
            spinner.stop(last);
        }
        let spinner = cliclack::spinner();
        spinner.start(message);
        self.spinner = Some((spinner, message.to_string()));
    }

    fn update(&mut self, message: &str) {
        match &mut self.spinner {
            Some((spinner, last)) => {
                spinner.set_message(message);
                *last = message.to_string();
            }
            None => {
                let _ = cliclack::log::step(message);
            }
        }
    }

    fn stop(&mut self, message: &str) {
        match self.spinner.take() {
            Some((spinner, _)) => spinner.stop(message),
            None => {
                let _ = cliclack::log::step(message);
            }
        }
    }

    fn info(&mut self, message: &str) {
        self.suspended(|| cliclack::log::info(message).ok());
    }

    fn warning(&mut self, message: &str) {
        self.suspended(|| cliclack::log::warning(message).ok());
    }

    fn success(&mut self, message: &str) {
        self.suspended(|| cliclack::log::success(message).ok());
    }

    fn error(&mut self, message: &str) {
        match self.spinner.take() {
            Some((spinner, _)) => spinner.error(message),
            None => {
                let _ = cliclack::log::error(message);
            }
        }
    }

    fn confirm_overwrite(&mut self, path: &Path) -> io::Result<bool> {
        self.suspended(|| {
            cliclack::confirm(format!("{} already exists. Overwrite?", path.display()))
                .initial_value(false)
                .interact()
        })
    }
}
