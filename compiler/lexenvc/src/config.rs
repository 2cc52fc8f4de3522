//! Command-line parsing for the `lexenv` binary.
//!
//! ```text
//! lexenv list
//! lexenv run <scenario>|all [--dump] [-v|--verbose]
//! lexenv help
//! ```

/// Parsed command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    List,
    Run { target: RunTarget, config: RunConfig },
    Help,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RunTarget {
    All,
    One(String),
}

/// Options accepted by `lexenv run`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunConfig {
    /// Print scope snapshots after each transcript.
    pub dump: bool,
    /// Trace engine events to stderr even without `RUST_LOG`.
    pub verbose: bool,
}

impl RunConfig {
    /// Merge one option argument. Returns `false` if it is not recognized.
    fn apply(&mut self, arg: &str) -> bool {
        match arg {
            "--dump" => self.dump = true,
            "-v" | "--verbose" => self.verbose = true,
            _ => return false,
        }
        true
    }
}

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum UsageError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("unknown option `{0}`")]
    UnknownOption(String),
    #[error("missing scenario name")]
    MissingScenario,
    #[error("unexpected argument `{0}`")]
    UnexpectedArgument(String),
    #[error("unknown scenario `{0}`")]
    UnknownScenario(String),
}

/// Parse arguments, not including the program name.
///
/// No arguments means `help`.
pub fn parse_args(args: &[String]) -> Result<Command, UsageError> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(Command::Help);
    };
    match command.as_str() {
        "help" | "--help" | "-h" => Ok(Command::Help),
        "list" => match rest.first() {
            None => Ok(Command::List),
            Some(arg) => Err(UsageError::UnexpectedArgument(arg.clone())),
        },
        "run" => parse_run(rest),
        other => Err(UsageError::UnknownCommand(other.to_owned())),
    }
}

fn parse_run(args: &[String]) -> Result<Command, UsageError> {
    let mut config = RunConfig::default();
    let mut target = None;
    for arg in args {
        if arg.starts_with('-') {
            if !config.apply(arg) {
                return Err(UsageError::UnknownOption(arg.clone()));
            }
        } else if target.is_none() {
            target = Some(if arg == "all" {
                RunTarget::All
            } else {
                RunTarget::One(arg.clone())
            });
        } else {
            return Err(UsageError::UnexpectedArgument(arg.clone()));
        }
    }
    let target = target.ok_or(UsageError::MissingScenario)?;
    Ok(Command::Run { target, config })
}
