use clap::Parser;

use super::Session;
use crate::git::{Status, run_chain};

#[derive(Debug, Parser)]
#[command(about = "Stage everything and commit")]
struct CommitAllArgs {
    /// Commit message; words are joined with spaces
    #[arg(required = true, num_args = 1.., trailing_var_arg = true, allow_hyphen_values = true)]
    message: Vec<String>,
}

#[derive(Debug, Parser)]
#[command(about = "Show recent commits")]
struct CommitHistoryArgs {
    /// Number of commits (defaults to the configured history limit)
    count: Option<usize>,
}

pub(super) fn commit_all(session: &mut Session<'_>, args: &[String]) -> anyhow::Result<Status> {
    let CommitAllArgs { message } = match session.parse_args("commit-all", args)? {
        Ok(parsed) => parsed,
        Err(status) => return Ok(status),
    };
    let message = message.join(" ");

    Ok(run_chain(
        session.backend(),
        &[&["add", "--all"], &["commit", "-m", &message]],
    )?)
}

pub(super) fn commit_all_push(session: &mut Session<'_>, args: &[String]) -> anyhow::Result<Status> {
    let status = session.invoke("commit-all", args)?;
    if !status.success() {
        return Ok(status);
    }
    session.invoke("push", &[])
}

pub(super) fn commit_all_pull_request(
    session: &mut Session<'_>,
    args: &[String],
) -> anyhow::Result<Status> {
    let status = session.invoke("commit-all-push", args)?;
    if !status.success() {
        return Ok(status);
    }
    session.invoke("pull-request", &[])
}

pub(super) fn commit_history(session: &mut Session<'_>, args: &[String]) -> anyhow::Result<Status> {
    let CommitHistoryArgs { count } = match session.parse_args("commit-history", args)? {
        Ok(parsed) => parsed,
        Err(status) => return Ok(status),
    };
    let count = count.unwrap_or(session.config().history_limit).to_string();

    Ok(session
        .backend()
        .run(&["log", "--oneline", "--decorate", "-n", &count])?)
}

/// Drop every uncommitted change, including untracked files.
pub(super) fn discard(session: &mut Session<'_>, _args: &[String]) -> anyhow::Result<Status> {
    Ok(run_chain(
        session.backend(),
        &[&["reset", "--hard", "HEAD"], &["clean", "-fd"]],
    )?)
}
