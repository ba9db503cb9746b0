//! Parsing of interactive input lines.

use std::path::PathBuf;

use crate::error::{Error, Result};
use crate::form::{parse_date, FieldChange, Sex};
use crate::session::Event;

/// Help text listing every interactive command.
pub const HELP: &str = "\
Commands:
  name <text>                     set the full name
  parent <text>                   set the parent name
  dob <YYYY-MM-DD>                set the date of birth
  sex <male|female>               select sex
  married <on|off>                tick or clear \"Married\"
  unmarried <on|off>              tick or clear \"Unmarried\"
  status <married|unmarried|both|none>
                                  set both marital boxes at once
  kids <n>                        select number of kids (married only)
  submit                          store the form and reset it
  show                            show the form and stored records
  download [DIR]                  save the records as CSV
  help                            show this help
  quit                            end the session";

/// One parsed line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// An event for the session.
    Event(Event),
    /// Save the CSV download, optionally into the given directory.
    Download(Option<PathBuf>),
    /// Redisplay the current view.
    Show,
    /// Print the command list.
    Help,
    /// End the session.
    Quit,
    /// A blank line.
    Empty,
}

/// Parse one line typed by the user.
///
/// Text fields take the rest of the line verbatim, so `name` alone clears the
/// name.
///
/// # Errors
///
/// Returns [`Error::InvalidInput`] or [`Error::InvalidDate`] if the line is not
/// a recognised command with a valid argument.
pub fn parse_line(line: &str) -> Result<Input> {
    let line = line.trim_end_matches(['\r', '\n']);
    let trimmed = line.trim_start();
    if trimmed.trim().is_empty() {
        return Ok(Input::Empty);
    }

    let (command, rest) = match trimmed.split_once(char::is_whitespace) {
        Some((command, rest)) => (command, rest),
        None => (trimmed, ""),
    };
    let arg = rest.trim();

    let change = match command.to_ascii_lowercase().as_str() {
        "name" => FieldChange::Name(arg.to_string()),
        "parent" => FieldChange::ParentName(arg.to_string()),
        "dob" => FieldChange::Dob(parse_date(arg)?),
        "sex" => FieldChange::Sex(arg.parse::<Sex>()?),
        "married" => FieldChange::Married(parse_switch(arg)?),
        "unmarried" => FieldChange::Unmarried(parse_switch(arg)?),
        "status" => parse_status(arg)?,
        "kids" => FieldChange::Kids(
            arg.parse()
                .map_err(|_| Error::invalid_input(format!("kids must be a number, got '{arg}'")))?,
        ),
        "submit" => return no_argument(command, arg, Input::Event(Event::Submit)),
        "show" => return no_argument(command, arg, Input::Show),
        "help" | "?" => return Ok(Input::Help),
        "quit" | "exit" => return Ok(Input::Quit),
        "download" => {
            let dir = (!arg.is_empty()).then(|| PathBuf::from(arg));
            return Ok(Input::Download(dir));
        }
        other => {
            return Err(Error::invalid_input(format!(
                "unknown command '{other}', type 'help' for a list"
            )))
        }
    };
    Ok(Input::Event(Event::FieldChanged(change)))
}

fn no_argument(command: &str, arg: &str, input: Input) -> Result<Input> {
    if arg.is_empty() {
        Ok(input)
    } else {
        Err(Error::invalid_input(format!(
            "'{command}' takes no argument"
        )))
    }
}

fn parse_switch(arg: &str) -> Result<bool> {
    match arg.to_ascii_lowercase().as_str() {
        "on" | "yes" | "y" | "true" | "1" => Ok(true),
        "off" | "no" | "n" | "false" | "0" => Ok(false),
        other => Err(Error::invalid_input(format!(
            "expected 'on' or 'off', got '{other}'"
        ))),
    }
}

fn parse_status(arg: &str) -> Result<FieldChange> {
    let (married, unmarried) = match arg.to_ascii_lowercase().as_str() {
        "married" => (true, false),
        "unmarried" => (false, true),
        "both" => (true, true),
        "none" => (false, false),
        other => {
            return Err(Error::invalid_input(format!(
                "status must be married, unmarried, both or none, got '{other}'"
            )))
        }
    };
    Ok(FieldChange::MaritalStatus { married, unmarried })
}
