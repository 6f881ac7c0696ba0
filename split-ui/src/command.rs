//! Commands typed at the `MySplit` prompt.
//!
//! One command per line: a keyword, then an optional argument that runs to
//! the end of the line. Keywords are case-insensitive.
//!
//! | Command          | Effect                                           |
//! |------------------|--------------------------------------------------|
//! | `add <cost>`     | add an item                                      |
//! | `delete <id>`    | remove an item                                   |
//! | `city <name>`    | set the location (empty clears it)               |
//! | `tax <rate>`     | set the sales-tax percentage (empty clears it)   |
//! | `lookup`         | look up the sales tax for the current city       |
//! | `tip <amount>`   | set the tip amount (empty clears it)             |
//! | `tip% <n>`       | press the `n`% tip button                        |
//! | `split`          | find my split                                    |
//! | `close`          | hide the split result                            |
//! | `new`            | start a new split                                |
//! | `show`           | redraw the bill (also an empty line)             |
//! | `log <level>`    | change the log level                             |
//! | `logfile <path>` | log to a file (`logfile off` stops)              |
//! | `help`           | list commands                                    |
//! | `quit`           | leave                                            |

use std::{path::PathBuf, str::FromStr};

use rust_decimal::Decimal;
use split_core::ItemId;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  add <cost>       add an item
  delete <id>      remove an item
  city <name>      set the city
  tax <rate>       set the sales tax percentage
  lookup           look up sales tax for the city
  tip <amount>     set the tip amount
  tip% <n>         press the n% tip button
  split            find my split
  close            hide the split result
  new              start a new split
  show             redraw the bill
  log <level>      change the log level
  logfile <path>   log to a file (`logfile off` stops)
  help             show this list
  quit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    AddItem(String),
    DeleteItem(ItemId),
    SetLocation(String),
    SetTaxRate(String),
    LookupTax,
    SetTip(String),
    /// A tip button press, as a fraction (`0.15` for the 15% button).
    TipPreset(Decimal),
    ComputeSplit,
    CloseResult,
    NewSplit,
    Show,
    Help,
    LogLevel(String),
    LogFile(Option<PathBuf>),
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("unknown command '{0}' (type `help` for a list)")]
    Unknown(String),

    #[error("`{0}` needs an argument")]
    MissingArgument(&'static str),

    #[error("'{0}' is not an item id")]
    InvalidItemId(String),

    #[error("'{0}' is not a tip percentage")]
    InvalidPercent(String),
}

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        line.parse()
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (keyword, arg) = match line.split_once(char::is_whitespace) {
            Some((keyword, rest)) => (keyword, rest.trim()),
            None => (line, ""),
        };

        let command = match keyword.to_ascii_lowercase().as_str() {
            "" | "show" => Self::Show,
            "add" => Self::AddItem(arg.to_string()),
            "delete" | "del" | "rm" => {
                let arg = required("delete", arg)?;
                let id = arg
                    .trim_start_matches('#')
                    .parse()
                    .map_err(|_| CommandError::InvalidItemId(arg.to_string()))?;
                Self::DeleteItem(id)
            }
            "city" => Self::SetLocation(arg.to_string()),
            "tax" => Self::SetTaxRate(arg.to_string()),
            "lookup" => Self::LookupTax,
            "tip" => Self::SetTip(arg.to_string()),
            "tip%" => {
                let arg = required("tip%", arg)?;
                let percent: Decimal = arg
                    .trim_end_matches('%')
                    .trim()
                    .parse()
                    .map_err(|_| CommandError::InvalidPercent(arg.to_string()))?;
                Self::TipPreset(percent / Decimal::ONE_HUNDRED)
            }
            "split" => Self::ComputeSplit,
            "close" | "back" => Self::CloseResult,
            "new" => Self::NewSplit,
            "help" | "?" => Self::Help,
            "log" => Self::LogLevel(required("log", arg)?.to_string()),
            "logfile" => {
                let arg = required("logfile", arg)?;
                if arg.eq_ignore_ascii_case("off") {
                    Self::LogFile(None)
                } else {
                    Self::LogFile(Some(PathBuf::from(arg)))
                }
            }
            "quit" | "exit" => Self::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}

fn required<'a>(
    keyword: &'static str,
    arg: &'a str,
) -> Result<&'a str, CommandError> {
    if arg.is_empty() {
        Err(CommandError::MissingArgument(keyword))
    } else {
        Ok(arg)
    }
}
