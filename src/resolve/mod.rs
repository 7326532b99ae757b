//! Branch resolution: turn a partial name into one branch.
//!
//! [`search_branches`] finds candidates by case-insensitive substring across
//! local and remote-tracking branches, refreshing remotes at most once.
//! [`select_branch`] narrows the candidates to one, prompting only when more
//! than one remains.

mod search;
mod select;

pub use search::{Candidates, SearchDepth, search_branches};
pub use select::{LinePrompter, Prompter, select_branch};
