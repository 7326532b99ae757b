use std::collections::BTreeSet;

use crate::git::{Backend, GitError};

/// How far a search may go to find matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchDepth {
    /// Fetch all remotes once if nothing matches locally.
    Refresh,
    /// Only consult refs already in the local repository.
    Shallow,
}

/// Branch names produced by a search, in the order they are offered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Candidates(Vec<String>);

impl Candidates {
    /// Deduplicate and sort names.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let unique: BTreeSet<String> = names.into_iter().map(Into::into).collect();
        Self(unique.into_iter().collect())
    }

    /// Split a whitespace-separated list, dropping empty tokens and keeping order.
    #[cfg(test)]
    pub(crate) fn from_combined(combined: &str) -> Self {
        Self(combined.split_whitespace().map(str::to_string).collect())
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Branches whose name contains `phrase`, ignoring case.
///
/// Remote-tracking branches also match on `<remote>/<name>`; candidates are
/// always the bare name. The checked-out branch is never a candidate. A name present both locally and
/// on a remote appears once. With [`SearchDepth::Refresh`], an empty result
/// triggers one `git fetch --all` and a shallow retry.
pub fn search_branches<B: Backend + ?Sized>(
    backend: &B,
    phrase: &str,
    depth: SearchDepth,
) -> Result<Candidates, GitError> {
    let needle = phrase.to_lowercase();
    let matches: Vec<String> = backend
        .branches()?
        .into_iter()
        .filter(|branch| !branch.is_head)
        // The qualified name ends with the bare name, so one check covers both
        .filter(|branch| branch.qualified_name().to_lowercase().contains(&needle))
        .map(|branch| branch.name)
        .collect();

    if !matches.is_empty() {
        return Ok(Candidates::from_names(matches));
    }

    match depth {
        SearchDepth::Refresh => {
            log::debug!("No branch matches {phrase:?} locally, refreshing remotes");
            backend.refresh_remotes();
            search_branches(backend, phrase, SearchDepth::Shallow)
        }
        SearchDepth::Shallow => Ok(Candidates::default()),
    }
}
