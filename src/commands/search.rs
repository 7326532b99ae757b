use clap::Parser;

use super::Session;
use crate::git::Status;
use crate::resolve::{SearchDepth, search_branches};
use crate::styling::warning_message;

#[derive(Debug, Parser)]
#[command(about = "List branches matching a phrase")]
struct SearchArgs {
    /// Case-insensitive substring of the branch name
    phrase: String,
}

/// Print every branch matching the phrase, one per line, remote prefix removed.
pub(super) fn search(session: &mut Session<'_>, args: &[String]) -> anyhow::Result<Status> {
    let SearchArgs { phrase } = match session.parse_args("search", args)? {
        Ok(parsed) => parsed,
        Err(status) => return Ok(status),
    };

    let candidates = search_branches(session.backend(), &phrase, SearchDepth::Refresh)?;
    if candidates.is_empty() {
        session.say(warning_message(format!("No branch found matching {phrase}")))?;
        return Ok(Status::SUCCESS);
    }

    for name in candidates.iter() {
        session.say(name)?;
    }
    Ok(Status::SUCCESS)
}
