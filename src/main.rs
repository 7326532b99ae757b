use std::io::Write;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use vc::config::VcConfig;
use vc::git::{GitError, Repository, Status};
use vc::resolve::LinePrompter;
use vc::styling::error_message;
use vc::{CommandTable, Session};

#[derive(Parser)]
#[command(
    name = "vc",
    about = "Mnemonic git shortcuts with fuzzy branch search",
    disable_help_flag = true,
    disable_help_subcommand = true
)]
struct Cli {
    /// Log every git invocation to stderr
    #[arg(short, long)]
    verbose: bool,

    /// Command or alias, then its arguments. Anything unknown goes to git.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    args: Vec<String>,
}

fn main() -> ExitCode {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => err.exit(),
    };

    init_logging(cli.verbose);

    match run(&cli.args) {
        Ok(status) => exit_code(status),
        Err(err) => {
            let message = match err.downcast_ref::<GitError>() {
                Some(git_err) => git_err.styled(),
                None => error_message(format!("{err:#}")),
            };
            let _ = writeln!(anstream::stderr(), "{message}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &[String]) -> anyhow::Result<Status> {
    let table = CommandTable::standard().context("Invalid command table")?;
    let config = VcConfig::load().context("Failed to load config")?;
    let repo = Repository::current();
    let mut prompter = LinePrompter::stdio();
    let mut out = anstream::stdout();

    let mut session = Session::new(&repo, &config, &mut prompter, &mut out, &table);
    session.dispatch(args)
}

/// `RUST_LOG` wins; otherwise `--verbose` turns on debug output.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .format_timestamp(None)
        .format_target(false)
        .init();
}

fn exit_code(status: Status) -> ExitCode {
    // Exit codes are a byte; anything outside maps to a plain failure
    u8::try_from(status.code())
        .map(ExitCode::from)
        .unwrap_or(ExitCode::FAILURE)
}
