use oncoscope_core::field::field_key;

use crate::error::CommandError;

/// One line typed at the interactive prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Empty,
    Fields,
    /// `key` is already normalised with [`field_key`].
    Set { key: String, value: String },
    Unset { key: String },
    Example,
    Submit,
    Say(String),
    History,
    Status,
    Clear,
    Reset,
    Health,
    Help,
    Quit,
}

pub const HELP: &str = "\
commands:
  fields              list the form fields and their values
  set <key> <value>   set a field (decimal comma accepted)
  unset <key>         clear a field
  example             fill every field with its example value
  submit              predict and open the supportive chat
  say <text>          send a message on the chat thread
  history             show the conversation
  status              show the session state
  clear               discard the form, prediction and conversation
  reset               clear the form values only
  health              probe the backend
  help                show this list
  quit                leave";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "" => Command::Empty,
            "fields" | "f" => Command::Fields,
            "set" => {
                let (key, value) = rest
                    .split_once(char::is_whitespace)
                    .ok_or(CommandError::MissingArgument {
                        command: "set",
                        argument: "a key and a value",
                    })?;
                Command::Set {
                    key: field_key(key),
                    value: value.trim().to_string(),
                }
            }
            "unset" => {
                if rest.is_empty() {
                    return Err(CommandError::MissingArgument {
                        command: "unset",
                        argument: "a key",
                    });
                }
                Command::Unset {
                    key: field_key(rest),
                }
            }
            "example" => Command::Example,
            "submit" => Command::Submit,
            // Blank text goes through; the controller treats it as a no-op.
            "say" => Command::Say(rest.to_string()),
            "history" => Command::History,
            "status" => Command::Status,
            "clear" => Command::Clear,
            "reset" => Command::Reset,
            "health" => Command::Health,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(CommandError::Unknown(other.to_string())),
        };
        Ok(command)
    }
}
