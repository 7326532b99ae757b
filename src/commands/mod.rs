//! Command handlers and the session they run in.

mod branch;
mod checkout;
mod commit;
mod merge;
mod push;
mod search;

use std::fmt::Display;
use std::io::{self, Write};

use clap::Parser;

use crate::config::VcConfig;
use crate::dispatch::{CommandSpec, CommandTable};
use crate::git::{Backend, Status};
use crate::resolve::{Candidates, Prompter, select_branch};

/// Everything a handler needs: the backend, settings, the operator, and the
/// command table for composing other commands.
pub struct Session<'a> {
    backend: &'a dyn Backend,
    config: &'a VcConfig,
    prompter: &'a mut dyn Prompter,
    out: &'a mut dyn Write,
    table: &'a CommandTable,
}

impl<'a> Session<'a> {
    pub fn new(
        backend: &'a dyn Backend,
        config: &'a VcConfig,
        prompter: &'a mut dyn Prompter,
        out: &'a mut dyn Write,
        table: &'a CommandTable,
    ) -> Self {
        Self {
            backend,
            config,
            prompter,
            out,
            table,
        }
    }

    pub fn backend(&self) -> &'a dyn Backend {
        self.backend
    }

    pub fn config(&self) -> &'a VcConfig {
        self.config
    }

    /// Print one line of output for the operator.
    pub fn say(&mut self, line: impl Display) -> io::Result<()> {
        writeln!(self.out, "{line}")
    }

    /// Run a full invocation, `args[0]` being the command token.
    pub fn dispatch(&mut self, args: &[String]) -> anyhow::Result<Status> {
        let table = self.table;
        table.dispatch(self, args)
    }

    /// Run another command by canonical name.
    pub fn invoke(&mut self, name: &str, args: &[String]) -> anyhow::Result<Status> {
        let table = self.table;
        table.invoke(self, name, args)
    }

    pub fn select(&mut self, candidates: &Candidates) -> io::Result<Option<String>> {
        select_branch(candidates, &mut *self.prompter)
    }

    /// Parse a handler's arguments.
    ///
    /// On a usage mistake or `--help`, clap's message is printed and its exit
    /// status (2, or 0 for help) comes back as the error.
    pub(crate) fn parse_args<T: Parser>(
        &mut self,
        name: &str,
        args: &[String],
    ) -> io::Result<Result<T, Status>> {
        match T::try_parse_from(std::iter::once(name).chain(args.iter().map(String::as_str))) {
            Ok(parsed) => Ok(Ok(parsed)),
            Err(err) => {
                write!(self.out, "{}", err.render().ansi())?;
                Ok(Err(Status::from_code(err.exit_code())))
            }
        }
    }
}

/// Every built-in command, in usage-listing order.
pub fn standard_commands() -> Vec<CommandSpec> {
    vec![
        CommandSpec {
            name: "checkout",
            alias: Some("c"),
            args: "<branch>",
            about: "Check out a branch by exact or partial name",
            handler: checkout::checkout,
        },
        CommandSpec {
            name: "checkout-new",
            alias: Some("cn"),
            args: "<branch>",
            about: "Create a branch and push it upstream",
            handler: checkout::checkout_new,
        },
        CommandSpec {
            name: "master",
            alias: Some("ma"),
            args: "",
            about: "Check out the default branch and pull",
            handler: checkout::master,
        },
        CommandSpec {
            name: "search",
            alias: Some("s"),
            args: "<phrase>",
            about: "List branches matching a phrase",
            handler: search::search,
        },
        CommandSpec {
            name: "current-branch",
            alias: Some("cb"),
            args: "",
            about: "Print the checked-out branch",
            handler: branch::current_branch,
        },
        CommandSpec {
            name: "branch-rename",
            alias: Some("br"),
            args: "<new-name> [remote]",
            about: "Rename the checked-out branch, on a remote too if given",
            handler: branch::branch_rename,
        },
        CommandSpec {
            name: "branch-delete",
            alias: Some("bd"),
            args: "<branch> [--remote]",
            about: "Delete a branch",
            handler: branch::branch_delete,
        },
        CommandSpec {
            name: "commit-all",
            alias: Some("ca"),
            args: "<message...>",
            about: "Stage everything and commit",
            handler: commit::commit_all,
        },
        CommandSpec {
            name: "commit-all-push",
            alias: Some("cap"),
            args: "<message...>",
            about: "commit-all, then push",
            handler: commit::commit_all_push,
        },
        CommandSpec {
            name: "commit-all-pull-request",
            alias: Some("capr"),
            args: "<message...>",
            about: "commit-all, push, then open a pull request",
            handler: commit::commit_all_pull_request,
        },
        CommandSpec {
            name: "commit-history",
            alias: Some("ch"),
            args: "[count]",
            about: "Show recent commits, one per line",
            handler: commit::commit_history,
        },
        CommandSpec {
            name: "discard",
            alias: Some("d"),
            args: "",
            about: "Throw away all uncommitted changes and untracked files",
            handler: commit::discard,
        },
        CommandSpec {
            name: "merge",
            alias: Some("me"),
            args: "<from> <to> [--push]",
            about: "Merge one branch into another and return to where you were",
            handler: merge::merge,
        },
        CommandSpec {
            name: "push",
            alias: Some("p"),
            args: "",
            about: "Push the checked-out branch and set its upstream",
            handler: push::push,
        },
        CommandSpec {
            name: "pull-request",
            alias: Some("pr"),
            args: "",
            about: "Open a pull request page for the checked-out branch",
            handler: push::pull_request,
        },
    ]
}
