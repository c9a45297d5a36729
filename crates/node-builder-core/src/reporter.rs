//! Progress and operator-interaction interface passed into each stage
//!
//! The builder, installer and driver never reach for terminal state on their
//! own: everything they want to show or ask goes through a [`Reporter`]. The
//! interactive implementation lives in `tui::reporter`; tests use a recording
//! fake.

use std::io;
use std::path::Path;

pub trait Reporter {
    /// Start a progress indicator for a long-running stage
    fn start(&mut self, message: &str);

    /// Replace the message of the running progress indicator
    fn update(&mut self, message: &str);

    /// Stop the progress indicator with a closing message
    fn stop(&mut self, message: &str);

    fn info(&mut self, message: &str);

    fn warning(&mut self, message: &str);

    fn success(&mut self, message: &str);

    /// Report a fatal problem, closing any running progress indicator
    fn error(&mut self, message: &str);

    /// Ask whether an existing file may be overwritten.
    /// An `Err` means the input stream is gone and the run must stop.
    fn confirm_overwrite(&mut self, path: &Path) -> io::Result<bool>;
}
