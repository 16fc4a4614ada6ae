//! Optional post-build steps: publishing the page with git and opening it.
//!
//! Publishing runs `git` in the gallery directory and only ever touches the
//! generated file:
//!
//! ```text
//! git status --porcelain -- index.html    # empty: nothing to publish
//! git add index.html
//! git commit -m "Update icon gallery (2026-01-15)"
//! git push
//! ```
//!
//! Steps run serially and are not retried. The page on disk is left as is
//! when any step fails.

use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Output};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },
    #[error("`{command}` failed ({status}): {stderr}")]
    CommandFailed {
        command: String,
        status: ExitStatus,
        stderr: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub enum PublishOutcome {
    /// The output file is tracked and matches the committed version.
    NoChanges,
    /// Committed and pushed with this message.
    Pushed { message: String },
}

/// Commit message for a publish on `date`.
pub fn commit_message(base: &str, date: &str) -> String {
    format!("{base} ({date})")
}

/// Commit and push `output_file` if it is untracked or differs from the
/// committed version.
pub fn publish(
    gallery_dir: &Path,
    output_file: &str,
    message: &str,
    date: &str,
) -> Result<PublishOutcome, PublishError> {
    let status = git(gallery_dir, &["status", "--porcelain", "--", output_file])?;
    if String::from_utf8_lossy(&status.stdout).trim().is_empty() {
        return Ok(PublishOutcome::NoChanges);
    }

    let message = commit_message(message, date);
    git(gallery_dir, &["add", output_file])?;
    git(gallery_dir, &["commit", "-m", &message])?;
    git(gallery_dir, &["push"])?;
    Ok(PublishOutcome::Pushed { message })
}

fn git(dir: &Path, args: &[&str]) -> Result<Output, PublishError> {
    let command = format!("git {}", args.join(" "));
    let output = Command::new("git")
        .args(args)
        .current_dir(dir)
        .output()
        .map_err(|source| PublishError::Spawn {
            command: command.clone(),
            source,
        })?;
    if !output.status.success() {
        return Err(PublishError::CommandFailed {
            command,
            status: output.status,
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }
    Ok(output)
}

/// Open the page in the platform's default viewer.
pub fn open_in_viewer(path: &Path) -> io::Result<()> {
    open::that(path)
}
