//! Git output parsing functions

use super::GitError;

/// Where a branch lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchScope {
    Local,
    Remote { remote: String },
}

/// A branch reference from `git for-each-ref`, with the `refs/heads/` or
/// `refs/remotes/<remote>/` prefix stripped from `name`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Branch {
    pub name: String,
    pub scope: BranchScope,
    /// True for the checked-out local branch.
    pub is_head: bool,
}

impl Branch {
    /// `<remote>/<name>` for remote-tracking branches, the bare name otherwise.
    pub fn qualified_name(&self) -> String {
        match &self.scope {
            BranchScope::Local => self.name.clone(),
            BranchScope::Remote { remote } => format!("{remote}/{}", self.name),
        }
    }
}

/// Format string passed to `git for-each-ref`, producing `<HEAD marker>\t<refname>`.
pub(crate) const BRANCH_REF_FORMAT: &str = "--format=%(HEAD)%09%(refname)";

pub(crate) fn parse_branch_refs(output: &str) -> Result<Vec<Branch>, GitError> {
    let mut branches = Vec::new();

    for line in output.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let (marker, refname) = line.split_once('\t').ok_or_else(|| {
            GitError::ParseError(format!("branch listing line missing separator: {line}"))
        })?;
        let is_head = marker.trim() == "*";

        if let Some(name) = refname.strip_prefix("refs/heads/") {
            branches.push(Branch {
                name: name.to_string(),
                scope: BranchScope::Local,
                is_head,
            });
        } else if let Some(rest) = refname.strip_prefix("refs/remotes/") {
            // refs/remotes/<remote> alone names no branch
            let Some((remote, name)) = rest.split_once('/') else {
                continue;
            };
            // origin/HEAD is a symbolic pointer, not a branch
            if name == "HEAD" || name.is_empty() {
                continue;
            }
            branches.push(Branch {
                name: name.to_string(),
                scope: BranchScope::Remote {
                    remote: remote.to_string(),
                },
                is_head: false,
            });
        }
        // Other namespaces (tags, notes) are ignored
    }

    Ok(branches)
}
