use std::process::Command;

use super::Session;
use crate::config::{VcConfig, expand_open_command};
use crate::git::{Status, pull_request_url};
use crate::styling::{error_message, hint_message, progress_message, warning_message};

/// URL openers tried in order when no `open-command` is configured.
const OPENERS: &[&str] = &["open", "xdg-open"];

pub(super) fn push(session: &mut Session<'_>, _args: &[String]) -> anyhow::Result<Status> {
    let backend = session.backend();
    let Some(branch) = backend.current_branch()? else {
        session.say(warning_message("HEAD is detached; nothing to push"))?;
        return Ok(Status::SUCCESS);
    };
    let remote = session.config().remote.as_str();

    Ok(backend.run(&["push", "--set-upstream", remote, &branch])?)
}

/// Open the hosting service's "new pull request" page for the checked-out branch.
pub(super) fn pull_request(session: &mut Session<'_>, _args: &[String]) -> anyhow::Result<Status> {
    let backend = session.backend();
    let config = session.config();

    let Some(branch) = backend.current_branch()? else {
        session.say(warning_message("HEAD is detached; check out a branch first"))?;
        return Ok(Status::SUCCESS);
    };
    let push_url = backend.push_url(&config.remote)?;

    let Some(url) = pull_request_url(&push_url, &branch) else {
        session.say(error_message(format!(
            "Pull requests are only supported for GitHub and Bitbucket remotes, not {push_url}"
        )))?;
        return Ok(Status::SUCCESS);
    };

    session.say(progress_message(format!("Opening {url}")))?;
    if !open_url(config, &url)? {
        session.say(no_opener_hint())?;
    }
    Ok(Status::SUCCESS)
}

fn no_opener_hint() -> String {
    hint_message("No URL opener found; install xdg-open or set open-command")
}

/// Open `url` with the configured command, or the first opener on `PATH`.
///
/// Returns false when there was nothing to open it with.
fn open_url(config: &VcConfig, url: &str) -> anyhow::Result<bool> {
    if let Some(template) = &config.open_command {
        let command = expand_open_command(template, url);
        log::debug!("$ sh -c {command}");
        let status = Command::new("sh").arg("-c").arg(&command).status()?;
        if !status.success() {
            log::debug!("open-command exited with {status}");
        }
        return Ok(true);
    }

    for opener in OPENERS {
        if let Ok(path) = which::which(opener) {
            log::debug!("Opening with {}", path.display());
            Command::new(path).arg(url).status()?;
            return Ok(true);
        }
    }

    Ok(false)
}
