//! Directory and file creation with overwrite confirmation

use crate::error::{Result, ScaffoldError};
use crate::reporter::Reporter;
use std::path::Path;
use tokio::fs;

/// What happened to a single file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteOutcome {
    Created,
    Overwritten,
    /// The file existed and the operator declined to overwrite it
    Skipped,
}

/// Create `dir` (and parents) unless it already exists.
/// Returns `true` when the directory was created.
pub async fn ensure_dir(dir: &Path) -> Result<bool> {
    match fs::metadata(dir).await {
        Ok(meta) if meta.is_dir() => Ok(false),
        Ok(_) => Err(ScaffoldError::WriteFailure {
            path: dir.to_path_buf(),
            source: std::io::Error::new(
                std::io::ErrorKind::AlreadyExists,
                "a file is in the way of this directory",
            ),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            fs::create_dir_all(dir)
                .await
                .map_err(|e| ScaffoldError::from_io(dir, e))?;
            Ok(true)
        }
        Err(e) => Err(ScaffoldError::from_io(dir, e)),
    }
}

/// Write `content` to `path`, asking the operator first if it already exists
pub async fn write_file<R: Reporter>(
    reporter: &mut R,
    path: &Path,
    content: &[u8],
) -> Result<WriteOutcome> {
    let existed = match fs::metadata(path).await {
        Ok(_) => true,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => false,
        Err(e) => return Err(ScaffoldError::from_io(path, e)),
    };

    if existed {
        let overwrite = reporter
            .confirm_overwrite(path)
            .map_err(ScaffoldError::InputClosed)?;
        if !overwrite {
            reporter.info(&format!("Skipping {}", path.display()));
            return Ok(WriteOutcome::Skipped);
        }
    }

    if let Some(parent) = path.parent() {
        ensure_dir(parent).await?;
    }

    fs::write(path, content)
        .await
        .map_err(|e| ScaffoldError::from_io(path, e))?;

    Ok(if existed {
        WriteOutcome::Overwritten
    } else {
        WriteOutcome::Created
    })
}

/// True when `dir` has no entries (or does not exist)
pub async fn is_empty_dir(dir: &Path) -> Result<bool> {
    let mut entries = match fs::read_dir(dir).await {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(true),
        Err(e) => return Err(ScaffoldError::from_io(dir, e)),
    };
    let first = entries
        .next_entry()
        .await
        .map_err(|e| ScaffoldError::from_io(dir, e))?;
    Ok(first.is_none())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingReporter;

    #[tokio::test]
    async fn test_ensure_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("src/controllers");

        assert!(ensure_dir(&target).await.unwrap());
        assert!(!ensure_dir(&target).await.unwrap());
        assert!(target.is_dir());
    }

    #[tokio::test]
    async fn test_ensure_dir_rejects_file_in_the_way() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("routes");
        std::fs::write(&target, "not a dir").unwrap();

        assert!(matches!(
            ensure_dir(&target).await,
            Err(ScaffoldError::WriteFailure { .. })
        ));
    }

    #[tokio::test]
    async fn test_write_new_file_does_not_prompt() {
        let dir = tempfile::tempdir().unwrap();
        let mut reporter = RecordingReporter::default();
        let path = dir.path().join(".env");

        let outcome = write_file(&mut reporter, &path, b"").await.unwrap();
        assert_eq!(outcome, WriteOutcome::Created);
        assert!(reporter.confirmations.is_empty());
        assert_eq!(std::fs::read(&path).unwrap(), b"");
    }

    #[tokio::test]
    async fn test_existing_file_declined_is_kept() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("README.md");
        std::fs::write(&path, "keep me").unwrap();
        let mut reporter = RecordingReporter::answering([false]);

        let outcome = write_file(&mut reporter, &path, b"new").await.unwrap();
        assert_eq!(outcome, WriteOutcome::Skipped);
        assert_eq!(reporter.confirmations, vec![path.clone()]);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "keep me");
    }

    #[tokio::test]
    async fn test_existing_file_confirmed_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.ts");
        std::fs::write(&path, "old").unwrap();
        let mut reporter = RecordingReporter::answering([true]);

        let outcome = write_file(&mut reporter, &path, b"new").await.unwrap();
        assert_eq!(outcome, WriteOutcome::Overwritten);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }

    #[tokio::test]
    async fn test_closed_input_during_confirmation_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("main.ts");
        std::fs::write(&path, "old").unwrap();
        // No scripted answers: the fake behaves like a closed stdin
        let mut reporter = RecordingReporter::default();

        assert!(matches!(
            write_file(&mut reporter, &path, b"new").await,
            Err(ScaffoldError::InputClosed(_))
        ));
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "old");
    }

    #[tokio::test]
    async fn test_is_empty_dir() {
        let dir = tempfile::tempdir().unwrap();
        assert!(is_empty_dir(dir.path()).await.unwrap());
        assert!(is_empty_dir(&dir.path().join("missing")).await.unwrap());

        std::fs::write(dir.path().join("file"), "x").unwrap();
        assert!(!is_empty_dir(dir.path()).await.unwrap());
    }
}
