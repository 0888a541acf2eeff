//! Thin git subprocess adapter: staged diff, commit-range diff, repo root.
//! Grounded on `original_source/src/gitsafe/git/adapter.py`.

use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;

use crate::errors::VcsError;

const GIT_TIMEOUT: Duration = Duration::from_secs(30);

fn run_git(args: &[&str], cwd: &Path) -> Result<String, VcsError> {
    let mut cmd = Command::new("git");
    cmd.args(args).current_dir(cwd);

    let output = run_with_timeout(cmd, GIT_TIMEOUT)?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        let stderr = stderr.trim();
        // Empty diff is not an error — git exits non-zero for some
        // harmless conditions too; only a `fatal:` stderr is real.
        if stderr.is_empty() || !stderr.to_lowercase().contains("fatal") {
            return Ok(String::from_utf8_lossy(&output.stdout).into_owned());
        }
        return Err(VcsError::GitFailed(stderr.to_string()));
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Runs `cmd` to completion, mapping a missing `git` binary or a wall-clock
/// timeout onto [`VcsError`]. `std::process::Command` has no built-in
/// timeout, so this spawns and polls rather than blocking on `wait()`.
fn run_with_timeout(mut cmd: Command, timeout: Duration) -> Result<std::process::Output, VcsError> {
    use std::io::Read;

    let mut child = cmd
        .stdout(std::process::Stdio::piped())
        .stderr(std::process::Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => VcsError::GitNotFound,
            _ => VcsError::GitFailed(e.to_string()),
        })?;

    let start = std::time::Instant::now();
    let status = loop {
        if let Some(status) = child
            .try_wait()
            .map_err(|e| VcsError::GitFailed(e.to_string()))?
        {
            break status;
        }
        if start.elapsed() > timeout {
            let _ = child.kill();
            return Err(VcsError::Timeout {
                timeout_secs: timeout.as_secs(),
            });
        }
        std::thread::sleep(Duration::from_millis(20));
    };

    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    if let Some(mut out) = child.stdout.take() {
        let _ = out.read_to_end(&mut stdout);
    }
    if let Some(mut err) = child.stderr.take() {
        let _ = err.read_to_end(&mut stderr);
    }

    Ok(std::process::Output {
        status,
        stdout,
        stderr,
    })
}

pub fn repo_root(cwd: &Path) -> Result<PathBuf, VcsError> {
    let out = run_git(&["rev-parse", "--show-toplevel"], cwd)?;
    Ok(PathBuf::from(out.trim()))
}

/// Unified diff of staged changes (`--cached`), zero context lines.
pub fn staged_diff(repo_root: &Path) -> Result<String, VcsError> {
    run_git(&["diff", "--cached", "--unified=0", "--no-color"], repo_root)
}

/// Unified diff between two commits, for CI mode.
pub fn commit_range_diff(repo_root: &Path, base: &str, head: &str) -> Result<String, VcsError> {
    let range = format!("{base}..{head}");
    run_git(&["diff", &range, "--unified=0", "--no-color"], repo_root)
}
