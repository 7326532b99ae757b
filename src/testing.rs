//! Scripted backend and session harness for unit tests.

use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::io::{self, Cursor};

use crate::commands::Session;
use crate::config::VcConfig;
use crate::dispatch::CommandTable;
use crate::git::{Backend, GitError, Status};
use crate::resolve::LinePrompter;

/// Calls that only inspect the repository.
const QUERIES: &[&str] = &[
    "for-each-ref",
    "symbolic-ref",
    "rev-parse",
    "remote get-url",
    "fetch",
];

/// In-memory stand-in for git.
///
/// Every call is recorded as its space-joined argv. Refs, HEAD, the stash and
/// worktree dirtiness are simulated just far enough for the commands to drive.
#[derive(Default)]
pub(crate) struct FakeBackend {
    head: RefCell<Option<String>>,
    refs: RefCell<Vec<String>>,
    refs_after_fetch: RefCell<Vec<String>>,
    replies: HashMap<String, String>,
    failures: HashSet<String>,
    calls: RefCell<Vec<String>>,
    dirty: Cell<bool>,
    stash: RefCell<Vec<String>>,
}

impl FakeBackend {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn with_head(self, branch: &str) -> Self {
        self.head.replace(Some(branch.to_string()));
        self
    }

    pub(crate) fn with_refs(self, refs: &[&str]) -> Self {
        self.refs
            .replace(refs.iter().map(|r| r.to_string()).collect());
        self
    }

    /// Refs that only appear once `fetch --all` has run.
    pub(crate) fn with_refs_after_fetch(self, refs: &[&str]) -> Self {
        self.refs_after_fetch
            .replace(refs.iter().map(|r| r.to_string()).collect());
        self
    }

    /// Canned stdout for a captured call.
    pub(crate) fn with_reply(mut self, call: &str, output: &str) -> Self {
        self.replies.insert(call.to_string(), output.to_string());
        self
    }

    /// Make a call fail: captured calls error, inherited calls exit 1.
    pub(crate) fn with_failure(mut self, call: &str) -> Self {
        self.failures.insert(call.to_string());
        self
    }

    pub(crate) fn with_dirty_worktree(self) -> Self {
        self.dirty.set(true);
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// Number of calls starting with `prefix`.
    pub(crate) fn count(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|call| call.starts_with(prefix))
            .count()
    }

    /// Calls that change the repository, in order.
    pub(crate) fn mutations(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter(|call| !QUERIES.iter().any(|query| call.starts_with(query)))
            .cloned()
            .collect()
    }

    pub(crate) fn head(&self) -> Option<String> {
        self.head.borrow().clone()
    }

    pub(crate) fn is_dirty(&self) -> bool {
        self.dirty.get()
    }

    fn record(&self, args: &[&str]) -> String {
        let call = args.join(" ");
        self.calls.borrow_mut().push(call.clone());
        call
    }

    fn failed(call: &str) -> GitError {
        GitError::GitFailed {
            command: format!("git {call}"),
            error: "scripted failure".to_string(),
        }
    }

    fn ref_listing(&self) -> String {
        let head_ref = self
            .head
            .borrow()
            .as_ref()
            .map(|branch| format!("refs/heads/{branch}"));

        self.refs
            .borrow()
            .iter()
            .map(|refname| {
                let marker = if head_ref.as_deref() == Some(refname.as_str()) {
                    "*"
                } else {
                    " "
                };
                format!("{marker}\t{refname}\n")
            })
            .collect()
    }
}

impl Backend for FakeBackend {
    fn read(&self, args: &[&str]) -> Result<String, GitError> {
        let call = self.record(args);
        if self.failures.contains(&call) {
            return Err(Self::failed(&call));
        }
        if let Some(reply) = self.replies.get(&call) {
            return Ok(reply.clone());
        }

        match args {
            ["for-each-ref", ..] => Ok(self.ref_listing()),
            ["fetch", "--all", ..] => {
                let fetched = self.refs_after_fetch.take();
                self.refs.borrow_mut().extend(fetched);
                Ok(String::new())
            }
            ["symbolic-ref", ..] => self.head().ok_or_else(|| Self::failed(&call)),
            ["rev-parse", .., "refs/stash"] => self
                .stash
                .borrow()
                .last()
                .cloned()
                .ok_or_else(|| Self::failed(&call)),
            ["stash", "push", ..] => {
                if self.dirty.replace(false) {
                    let mut stash = self.stash.borrow_mut();
                    let entry = format!("stash{}", stash.len());
                    stash.push(entry);
                }
                Ok(String::new())
            }
            _ => Ok(String::new()),
        }
    }

    fn run(&self, args: &[&str]) -> Result<Status, GitError> {
        let call = self.record(args);
        if self.failures.contains(&call) {
            return Ok(Status::FAILURE);
        }

        match args {
            ["checkout", "-b", branch] | ["checkout", branch] => {
                self.head.replace(Some(branch.to_string()));
            }
            ["stash", "pop"] => {
                if self.stash.borrow_mut().pop().is_some() {
                    self.dirty.set(true);
                }
            }
            _ => {}
        }
        Ok(Status::SUCCESS)
    }
}

/// Run `f` in a session over `backend` with default config.
///
/// `input` feeds the selection prompt. Returns the handler result and
/// everything the session printed (prompts are discarded).
pub(crate) fn run_vc(
    backend: &FakeBackend,
    input: &str,
    f: impl FnOnce(&mut Session<'_>) -> anyhow::Result<Status>,
) -> (anyhow::Result<Status>, String) {
    let table = CommandTable::standard().unwrap();
    let config = VcConfig::default();
    let mut prompter = LinePrompter::new(Cursor::new(input.as_bytes().to_vec()), io::sink());
    let mut out = Vec::new();

    let result = {
        let mut session = Session::new(backend, &config, &mut prompter, &mut out, &table);
        f(&mut session)
    };
    (result, String::from_utf8(out).unwrap())
}

impl Session<'_> {
    pub(crate) fn dispatch_strs(&mut self, args: &[&str]) -> anyhow::Result<Status> {
        let args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
        self.dispatch(&args)
    }
}
