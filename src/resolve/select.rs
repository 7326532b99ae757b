use std::io::{self, BufRead, Write};

use super::Candidates;
use crate::styling::{PROMPT_EMOJI, warning_message};

/// Asks the operator to pick one of several options.
pub trait Prompter {
    /// Index into `options` of the choice, or `None` if the operator gave up.
    fn choose(&mut self, options: &[String]) -> io::Result<Option<usize>>;
}

/// Numbered-list prompt reading one line at a time.
///
/// Invalid answers re-prompt; end of input gives up.
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompter<io::StdinLock<'static>, anstream::Stderr> {
    /// Prompt on stderr so stdout stays clean for piping.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), anstream::stderr())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn choose(&mut self, options: &[String]) -> io::Result<Option<usize>> {
        for (idx, option) in options.iter().enumerate() {
            writeln!(self.output, "  {}) {option}", idx + 1)?;
        }

        let count = options.len();
        loop {
            write!(self.output, "{PROMPT_EMOJI} Select a branch [1-{count}]: ")?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                writeln!(self.output)?;
                return Ok(None);
            }

            match line.trim().parse::<usize>() {
                Ok(choice) if (1..=count).contains(&choice) => return Ok(Some(choice - 1)),
                _ => writeln!(
                    self.output,
                    "{}",
                    warning_message(format!("Enter a number between 1 and {count}"))
                )?,
            }
        }
    }
}

/// Narrow `candidates` to one branch name.
///
/// Zero candidates yields `None`; one is returned without prompting. The chosen
/// name comes back with all whitespace removed.
pub fn select_branch(
    candidates: &Candidates,
    prompter: &mut dyn Prompter,
) -> io::Result<Option<String>> {
    let chosen = match candidates.as_slice() {
        [] => return Ok(None),
        [only] => only,
        options => match prompter.choose(options)? {
            Some(idx) => match options.get(idx) {
                Some(option) => option,
                None => return Ok(None),
            },
            None => return Ok(None),
        },
    };

    Ok(Some(chosen.chars().filter(|c| !c.is_whitespace()).collect()))
}
