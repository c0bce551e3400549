//! Interactive prompt shown when no subcommand is given.
use anyhow::Result;
use std::io::{self, BufRead, Write};
use std::sync::Arc;

use crate::cli::GlobalOpts;
use crate::logging::{Log as _, Logger};

/// Question printed before reading the choice.
pub const PROMPT: &str = "[B]uild and merge mods, [D]elete deployed folders, or [Q]uit? ";

/// Action chosen at the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    /// Build the output tree and deploy it.
    BuildAndDeploy,
    /// Remove managed folders from the target.
    Undeploy,
    /// Exit without doing anything.
    Quit,
    /// Anything else; nothing happens.
    Unknown(String),
}

impl Choice {
    /// Interpret a line of user input (case-insensitive, surrounding
    /// whitespace ignored).
    #[must_use]
    pub fn parse(input: &str) -> Self {
        let answer = input.trim().to_lowercase();
        match answer.as_str() {
            "b" => Self::BuildAndDeploy,
            "d" => Self::Undeploy,
            "q" => Self::Quit,
            _ => Self::Unknown(answer),
        }
    }
}

/// Write [`PROMPT`] to `output` and read one line from `input`.
///
/// # Errors
///
/// Returns an error if writing the prompt or reading the answer fails.
pub fn read_choice<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<Choice> {
    output.write_all(PROMPT.as_bytes())?;
    output.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(Choice::parse(&line))
}

/// Ask what to do and dispatch to `install` or `uninstall`.
///
/// # Errors
///
/// Returns an error if the prompt cannot be read or the chosen command fails.
pub fn run(global: &GlobalOpts, log: &Arc<Logger>) -> Result<()> {
    let choice = read_choice(&mut io::stdin().lock(), &mut io::stdout())?;
    match choice {
        Choice::BuildAndDeploy => super::install::run(global, log),
        Choice::Undeploy => super::uninstall::run(global, log),
        Choice::Quit => {
            log.info("quitting");
            Ok(())
        }
        Choice::Unknown(answer) => {
            log.debug(&format!("unrecognised choice: {answer:?}"));
            Ok(())
        }
    }
}
