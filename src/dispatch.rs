//! Command dispatch.
//!
//! A token is resolved in three steps: a command registered under that exact
//! name, then the alias table, then passthrough to `git` with every argument
//! unchanged. Handlers never see the token itself.

use std::collections::HashMap;
use std::fmt;

use anyhow::anyhow;
use color_print::cformat;

use crate::commands::Session;
use crate::git::Status;

pub type Handler = fn(&mut Session<'_>, &[String]) -> anyhow::Result<Status>;

/// One entry of the command table.
#[derive(Clone, Copy)]
pub struct CommandSpec {
    pub name: &'static str,
    pub alias: Option<&'static str>,
    /// Argument synopsis for the usage listing
    pub args: &'static str,
    pub about: &'static str,
    pub handler: Handler,
}

/// Reasons a command table is rejected at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    EmptyName,
    DuplicateName(&'static str),
    DuplicateAlias(&'static str),
    /// An alias equal to some command's canonical name
    AliasShadowsCommand(&'static str),
}

impl fmt::Display for TableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TableError::EmptyName => write!(f, "command registered with an empty name"),
            TableError::DuplicateName(name) => write!(f, "command {name} registered twice"),
            TableError::DuplicateAlias(alias) => write!(f, "alias {alias} registered twice"),
            TableError::AliasShadowsCommand(alias) => {
                write!(f, "alias {alias} is also the name of a command")
            }
        }
    }
}

impl std::error::Error for TableError {}

/// Immutable mapping from command names and aliases to handlers.
pub struct CommandTable {
    commands: Vec<CommandSpec>,
    by_name: HashMap<&'static str, usize>,
    /// Alias to canonical name. Values are always keys of `by_name`.
    aliases: HashMap<&'static str, &'static str>,
}

impl CommandTable {
    pub fn new(commands: Vec<CommandSpec>) -> Result<Self, TableError> {
        let mut by_name = HashMap::new();
        for (idx, spec) in commands.iter().enumerate() {
            if spec.name.is_empty() {
                return Err(TableError::EmptyName);
            }
            if by_name.insert(spec.name, idx).is_some() {
                return Err(TableError::DuplicateName(spec.name));
            }
        }

        let mut aliases = HashMap::new();
        for spec in &commands {
            let Some(alias) = spec.alias else {
                continue;
            };
            if by_name.contains_key(alias) {
                return Err(TableError::AliasShadowsCommand(alias));
            }
            if aliases.insert(alias, spec.name).is_some() {
                return Err(TableError::DuplicateAlias(alias));
            }
        }

        Ok(Self {
            commands,
            by_name,
            aliases,
        })
    }

    /// The built-in command set.
    pub fn standard() -> Result<Self, TableError> {
        Self::new(crate::commands::standard_commands())
    }

    /// Resolve a token by literal name, then by alias. Aliases are never chained.
    pub fn resolve(&self, token: &str) -> Option<&CommandSpec> {
        self.lookup(token).or_else(|| {
            self.aliases
                .get(token)
                .and_then(|canonical| self.lookup(canonical))
        })
    }

    fn lookup(&self, name: &str) -> Option<&CommandSpec> {
        self.by_name.get(name).map(|&idx| &self.commands[idx])
    }

    /// Run a full invocation: `args[0]` is the command token.
    pub fn dispatch(&self, session: &mut Session<'_>, args: &[String]) -> anyhow::Result<Status> {
        let Some((token, rest)) = args.split_first() else {
            session.say(self.usage())?;
            return Ok(Status::SUCCESS);
        };

        if token.is_empty() || is_help_flag(token) {
            session.say(self.usage())?;
            return Ok(Status::SUCCESS);
        }

        match self.resolve(token) {
            Some(spec) => {
                log::debug!("Dispatching {token} to {}", spec.name);
                (spec.handler)(session, rest)
            }
            None => {
                log::debug!("{token} is not a vc command, passing through to git");
                let argv: Vec<&str> = args.iter().map(String::as_str).collect();
                Ok(session.backend().run(&argv)?)
            }
        }
    }

    /// Run a command by canonical name, as handlers do to compose commands.
    pub fn invoke(
        &self,
        session: &mut Session<'_>,
        name: &str,
        args: &[String],
    ) -> anyhow::Result<Status> {
        let spec = self
            .lookup(name)
            .ok_or_else(|| anyhow!("no command named {name}"))?;
        (spec.handler)(session, args)
    }

    /// Static usage text listing every command.
    pub fn usage(&self) -> String {
        let width = self
            .commands
            .iter()
            .map(|spec| spec.name.len() + spec.args.len() + 1)
            .max()
            .unwrap_or(0);

        let mut out = format!("{} vc <command|alias> [args...]\n\n", cformat!("<bold>Usage:</>"));
        out.push_str(&cformat!("<green>Commands:</>\n"));
        for spec in &self.commands {
            let synopsis = if spec.args.is_empty() {
                spec.name.to_string()
            } else {
                format!("{} {}", spec.name, spec.args)
            };
            let alias = spec.alias.unwrap_or("");
            out.push_str(&format!("  {alias:<5} {synopsis:<width$}  {}\n", spec.about));
        }
        out.push_str(&cformat!(
            "\n<dim>Anything else is passed to git unchanged, e.g. `vc status`.</>"
        ));
        out
    }
}

fn is_help_flag(token: &str) -> bool {
    matches!(token, "-h" | "--help" | "help")
}
