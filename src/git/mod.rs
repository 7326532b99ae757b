//! Access to the git binary.
//!
//! Everything goes through the [`Backend`] trait: [`Repository`] shells out to
//! `git`, tests substitute a scripted fake. The provided methods are the
//! structured queries the commands build on.

mod parse;
mod url;

use std::fmt;
use std::path::PathBuf;
use std::process::{Command, ExitStatus, Stdio};

use color_print::cformat;

use crate::styling::{ERROR_EMOJI, format_with_gutter};

pub use parse::{Branch, BranchScope};
pub use url::{GitRemoteUrl, PullRequestHost, pull_request_url};

use parse::{BRANCH_REF_FORMAT, parse_branch_refs};

/// Exit status of a git invocation or a command handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Status(i32);

impl Status {
    pub const SUCCESS: Status = Status(0);
    pub const FAILURE: Status = Status(1);

    pub fn from_code(code: i32) -> Self {
        Self(code)
    }

    pub fn code(self) -> i32 {
        self.0
    }

    pub fn success(self) -> bool {
        self.0 == 0
    }
}

impl From<ExitStatus> for Status {
    fn from(status: ExitStatus) -> Self {
        // Killed by a signal: no code, report a plain failure
        Self(status.code().unwrap_or(1))
    }
}

#[derive(Debug)]
pub enum GitError {
    /// The working directory is not inside a git repository
    NotARepository,
    /// git exited non-zero while its output was being captured
    GitFailed { command: String, error: String },
    CommandFailed(String),
    ParseError(String),
}

impl GitError {
    /// Render for the terminal, with git's own stderr in a gutter.
    pub fn styled(&self) -> String {
        match self {
            GitError::NotARepository => {
                cformat!("{ERROR_EMOJI} <red>Not inside a git repository</>")
            }
            GitError::GitFailed { command, error } => {
                let header = cformat!("{ERROR_EMOJI} <red>Command <bold>{command}</> failed</>");
                if error.is_empty() {
                    header
                } else {
                    format!("{header}\n{}", format_with_gutter(error))
                }
            }
            GitError::CommandFailed(msg) | GitError::ParseError(msg) => {
                cformat!("{ERROR_EMOJI} <red>{msg}</>")
            }
        }
    }
}

impl fmt::Display for GitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GitError::NotARepository => write!(f, "not inside a git repository"),
            GitError::GitFailed { command, error } => write!(f, "{command} failed: {error}"),
            GitError::CommandFailed(msg) => write!(f, "{msg}"),
            GitError::ParseError(msg) => write!(f, "failed to parse git output: {msg}"),
        }
    }
}

impl std::error::Error for GitError {}

pub trait GitResultExt<T> {
    /// Convert any displayable error into a [`GitError`] with context.
    fn git_context(self, context: &str) -> Result<T, GitError>;
}

impl<T, E: fmt::Display> GitResultExt<T> for Result<T, E> {
    fn git_context(self, context: &str) -> Result<T, GitError> {
        self.map_err(|e| GitError::CommandFailed(format!("{context}: {e}")))
    }
}

/// The version-control backend.
pub trait Backend {
    /// Run git with captured output and return stdout. Non-zero exit is an error.
    fn read(&self, args: &[&str]) -> Result<String, GitError>;

    /// Run git with inherited stdio, so its output and prompts reach the operator.
    fn run(&self, args: &[&str]) -> Result<Status, GitError>;

    /// The checked-out branch, or `None` on a detached HEAD.
    fn current_branch(&self) -> Result<Option<String>, GitError> {
        match self.read(&["symbolic-ref", "--quiet", "--short", "HEAD"]) {
            Ok(output) => {
                let branch = output.trim();
                Ok((!branch.is_empty()).then(|| branch.to_string()))
            }
            Err(GitError::GitFailed { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Local and remote-tracking branches from one `for-each-ref` query.
    fn branches(&self) -> Result<Vec<Branch>, GitError> {
        let output = self.read(&[
            "for-each-ref",
            BRANCH_REF_FORMAT,
            "refs/heads",
            "refs/remotes",
        ])?;
        parse_branch_refs(&output)
    }

    /// Whether `name` is a local branch or a branch on any remote.
    fn branch_exists(&self, name: &str) -> Result<bool, GitError> {
        Ok(self.branches()?.iter().any(|branch| branch.name == name))
    }

    /// Fetch every remote's branch metadata. Failures are logged, never retried.
    fn refresh_remotes(&self) {
        if let Err(e) = self.read(&["fetch", "--all", "--prune", "--quiet"]) {
            log::debug!("Remote refresh failed: {e}");
        }
    }

    /// Commit id at the top of the stash, if any.
    fn stash_top(&self) -> Result<Option<String>, GitError> {
        match self.read(&["rev-parse", "--quiet", "--verify", "refs/stash"]) {
            Ok(output) => Ok(Some(output.trim().to_string())),
            Err(GitError::GitFailed { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn push_url(&self, remote: &str) -> Result<String, GitError> {
        Ok(self
            .read(&["remote", "get-url", "--push", remote])?
            .trim()
            .to_string())
    }
}

/// Run each step in order, stopping at the first one that fails.
///
/// Returns the failing step's status, or success when every step ran.
pub fn run_chain(backend: &dyn Backend, steps: &[&[&str]]) -> Result<Status, GitError> {
    for step in steps {
        let status = backend.run(step)?;
        if !status.success() {
            log::debug!("Stopping after failed step: git {}", display_command(step));
            return Ok(status);
        }
    }
    Ok(Status::SUCCESS)
}

/// A repository reached by running `git` in a directory.
#[derive(Debug, Clone)]
pub struct Repository {
    path: PathBuf,
}

impl Repository {
    /// The repository containing the current directory.
    pub fn current() -> Self {
        Self::at(".")
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn command(&self, args: &[&str]) -> Command {
        log::debug!("$ git {}", display_command(args));
        let mut cmd = Command::new("git");
        cmd.args(args).current_dir(&self.path);
        cmd
    }
}

impl Backend for Repository {
    fn read(&self, args: &[&str]) -> Result<String, GitError> {
        let output = self
            .command(args)
            .stdin(Stdio::null())
            .output()
            .git_context("Failed to execute git")?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            if stderr.contains("not a git repository") {
                return Err(GitError::NotARepository);
            }
            log::debug!("git exited with {:?}: {}", output.status.code(), stderr);
            return Err(GitError::GitFailed {
                command: format!("git {}", display_command(args)),
                error: stderr,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn run(&self, args: &[&str]) -> Result<Status, GitError> {
        let status = self
            .command(args)
            .status()
            .git_context("Failed to execute git")?;
        Ok(status.into())
    }
}

/// Shell-quoted argv for logs and messages.
pub fn display_command(args: &[&str]) -> String {
    use shell_escape::escape;
    use std::borrow::Cow;

    args.iter()
        .map(|arg| escape(Cow::Borrowed(*arg)).into_owned())
        .collect::<Vec<_>>()
        .join(" ")
}
