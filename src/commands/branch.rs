use clap::Parser;

use super::Session;
use crate::git::{Status, run_chain};
use crate::styling::{error_message, warning_message};

#[derive(Debug, Parser)]
#[command(about = "Rename the checked-out branch")]
struct BranchRenameArgs {
    new_name: String,
    /// Also replace the branch on this remote
    remote: Option<String>,
}

#[derive(Debug, Parser)]
#[command(about = "Delete a branch")]
struct BranchDeleteArgs {
    branch: String,
    /// Also delete the branch on the configured remote
    #[arg(short, long)]
    remote: bool,
}

pub(super) fn current_branch(session: &mut Session<'_>, _args: &[String]) -> anyhow::Result<Status> {
    match session.backend().current_branch()? {
        Some(branch) => session.say(branch)?,
        None => session.say(warning_message("HEAD is detached"))?,
    }
    Ok(Status::SUCCESS)
}

/// Rename the checked-out branch locally.
///
/// Only when a remote is named is the new name pushed there (with upstream)
/// and the old name deleted from it.
pub(super) fn branch_rename(session: &mut Session<'_>, args: &[String]) -> anyhow::Result<Status> {
    let BranchRenameArgs { new_name, remote } = match session.parse_args("branch-rename", args)? {
        Ok(parsed) => parsed,
        Err(status) => return Ok(status),
    };
    let backend = session.backend();

    let Some(old_name) = backend.current_branch()? else {
        session.say(warning_message("HEAD is detached; check out a branch to rename it"))?;
        return Ok(Status::SUCCESS);
    };

    let status = backend.run(&["branch", "-m", &new_name])?;
    if !status.success() {
        return Ok(status);
    }

    match remote {
        Some(remote) => Ok(run_chain(
            backend,
            &[
                &["push", "--set-upstream", &remote, &new_name],
                &["push", &remote, "--delete", &old_name],
            ],
        )?),
        None => Ok(status),
    }
}

pub(super) fn branch_delete(session: &mut Session<'_>, args: &[String]) -> anyhow::Result<Status> {
    let BranchDeleteArgs { branch, remote } = match session.parse_args("branch-delete", args)? {
        Ok(parsed) => parsed,
        Err(status) => return Ok(status),
    };
    let backend = session.backend();

    if backend.current_branch()?.as_deref() == Some(branch.as_str()) {
        session.say(error_message(format!(
            "Cannot delete {branch} while it is checked out"
        )))?;
        return Ok(Status::SUCCESS);
    }

    let status = backend.run(&["branch", "-D", &branch])?;
    if !status.success() || !remote {
        return Ok(status);
    }

    let remote_name = session.config().remote.as_str();
    Ok(backend.run(&["push", remote_name, "--delete", &branch])?)
}
