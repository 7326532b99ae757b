use clap::Parser;

use super::Session;
use crate::git::{Status, run_chain};
use crate::resolve::{SearchDepth, search_branches};
use crate::styling::warning_message;

#[derive(Debug, Parser)]
#[command(about = "Check out a branch by exact or partial name")]
struct CheckoutArgs {
    /// Branch name, or a phrase to search for
    branch: String,
}

#[derive(Debug, Parser)]
#[command(about = "Create a branch and push it upstream")]
struct CheckoutNewArgs {
    branch: String,
}

/// Check out `branch` if it exists, otherwise search for it.
///
/// An exact name (local, or on a remote after fetching just that ref) is checked
/// out directly. Anything else is a search phrase: one match is checked out,
/// several are offered as a numbered choice, none is reported and is not a
/// failure.
pub(super) fn checkout(session: &mut Session<'_>, args: &[String]) -> anyhow::Result<Status> {
    let CheckoutArgs { branch } = match session.parse_args("checkout", args)? {
        Ok(parsed) => parsed,
        Err(status) => return Ok(status),
    };
    let backend = session.backend();
    let remote = session.config().remote.as_str();

    // Best-effort: picks up a branch pushed from elsewhere
    if let Err(e) = backend.read(&["fetch", "--quiet", remote, &branch]) {
        log::debug!("Fetch of {branch} from {remote} skipped: {e}");
    }

    if backend.branch_exists(&branch)? {
        return Ok(backend.run(&["checkout", &branch])?);
    }

    let candidates = search_branches(backend, &branch, SearchDepth::Refresh)?;
    match session.select(&candidates)? {
        Some(resolved) => Ok(backend.run(&["checkout", &resolved])?),
        None => {
            session.say(warning_message(format!("No branch found matching {branch}")))?;
            Ok(Status::SUCCESS)
        }
    }
}

pub(super) fn checkout_new(session: &mut Session<'_>, args: &[String]) -> anyhow::Result<Status> {
    let CheckoutNewArgs { branch } = match session.parse_args("checkout-new", args)? {
        Ok(parsed) => parsed,
        Err(status) => return Ok(status),
    };

    let status = session.backend().run(&["checkout", "-b", &branch])?;
    if !status.success() {
        return Ok(status);
    }
    session.invoke("push", &[])
}

/// Switch to the configured default branch and bring it up to date.
pub(super) fn master(session: &mut Session<'_>, _args: &[String]) -> anyhow::Result<Status> {
    let default_branch = session.config().default_branch.as_str();
    Ok(run_chain(
        session.backend(),
        &[&["checkout", default_branch], &["pull"]],
    )?)
}
