//! Merge one branch into another without leaving the current one.
//!
//! ```text
//! validate ─▶ stash ─▶ checkout <from> ─▶ pull ─▶ checkout <to> ─▶ pull ─▶ merge <from>
//!                                                                          │
//!                                                      push (if --push and on <to>)
//!                                                                          │
//!                                        restore branch ─▶ restore stash ◀─┘
//! ```
//!
//! The checkout/pull/merge steps form a chain: the first failure skips the rest,
//! leaving git's own output as the report. The restore steps always run, and
//! the status of the failed step (or of the push) is what the command returns.

use clap::Parser;

use super::Session;
use crate::git::{Status, run_chain};
use crate::styling::{error_message, success_message, warning_message};

#[derive(Debug, Parser)]
#[command(about = "Merge one branch into another and return to where you were")]
struct MergeArgs {
    /// Branch to merge
    from: String,
    /// Branch receiving the merge
    to: String,
    /// Push the target branch after a successful merge
    #[arg(short, long)]
    push: bool,
}

pub(super) fn merge(session: &mut Session<'_>, args: &[String]) -> anyhow::Result<Status> {
    let MergeArgs { from, to, push } = match session.parse_args("merge", args)? {
        Ok(parsed) => parsed,
        Err(status) => return Ok(status),
    };
    let backend = session.backend();

    if from == to {
        session.say(warning_message("<from> and <to> may not be equal"))?;
        return Ok(Status::SUCCESS);
    }

    let branches = backend.branches()?;
    for name in [&from, &to] {
        if !branches.iter().any(|branch| &branch.name == name) {
            session.say(error_message(format!("Branch {name} not found")))?;
            return Ok(Status::SUCCESS);
        }
    }

    let original = backend.current_branch()?;

    let stash_before = backend.stash_top()?;
    backend.read(&[
        "stash",
        "push",
        "--include-untracked",
        "--message",
        &format!("vc merge {from} into {to}"),
    ])?;
    let stashed = backend.stash_top()? != stash_before;
    if stashed {
        log::debug!("Stashed uncommitted changes before merging");
    }

    let mut status = run_chain(
        backend,
        &[
            &["checkout", &from],
            &["pull"],
            &["checkout", &to],
            &["pull"],
            &["merge", &from],
        ],
    )?;

    if status.success() {
        session.say(success_message(format!("Merged {from} into {to}")))?;

        // A partial failure could leave another branch checked out
        if push && backend.current_branch()?.as_deref() == Some(to.as_str()) {
            status = session.invoke("push", &[])?;
        }
    }

    if let Some(original) = original.filter(|original| original != &to) {
        backend.run(&["checkout", &original])?;
    }

    if stashed {
        backend.run(&["stash", "pop"])?;
    }

    Ok(status)
}
