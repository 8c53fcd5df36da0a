//! Parsing of terminal command lines into board actions.

use patient_board_core::commands::{actions, ActionArgs};
use patient_board_core::models::RecordField;
use patient_board_core::text::normalize_text_casing;

/// One parsed line of user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    /// Forward to the dispatch table
    Action { name: &'static str, args: ActionArgs },
    /// Redraw the table
    List,
    Help,
    Quit,
    Empty,
}

pub const HELP: &str = "\
commands:
  add                        add a blank record
  del <id>                   delete a record (asks for confirmation)
  set <id> <field> <value>   edit a field (iea names age ci nh phone diagnosis plan specialist comment)
  done <id> <true|false>     mark a record done or not done
  open <id>                  start a new checklist entry for a record
  accept <text>              save the open checklist entry
  cancel                     discard the open checklist entry
  toggle <id> <index>        flip a checklist entry
  attach <id>                attachment control (not supported)
  list                       redraw the table
  help                       show this text
  quit                       exit";

/// Parse a line. Argument values are passed through as text; the dispatch
/// table validates them.
pub fn parse_line(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let action = |name: &'static str, args: ActionArgs| -> Result<Input, String> {
        Ok(Input::Action { name, args })
    };
    let id_only = |name: &'static str| -> Result<Input, String> {
        let id = first_word(rest).ok_or_else(|| format!("usage: {verb} <id>"))?;
        action(name, ActionArgs::new().with("id", id))
    };

    match verb {
        "" => Ok(Input::Empty),
        "add" => action(actions::ADD_RECORD, ActionArgs::new()),
        "del" | "delete" => id_only(actions::DELETE_RECORD),
        "open" => id_only(actions::OPEN_PENDING),
        "attach" => id_only(actions::ATTACH),
        "cancel" => action(actions::CLOSE_PENDING, ActionArgs::new()),
        "accept" => action(actions::ACCEPT_PENDING, ActionArgs::new().with("text", rest)),
        "set" => parse_set(rest),
        "done" => {
            let mut words = rest.split_whitespace();
            match (words.next(), words.next()) {
                (Some(id), Some(flag)) => action(
                    actions::UPDATE_FIELD,
                    ActionArgs::new()
                        .with("id", id)
                        .with("field", RecordField::Completed.as_str())
                        .with("value", flag),
                ),
                _ => Err("usage: done <id> <true|false>".to_string()),
            }
        }
        "toggle" => {
            let mut words = rest.split_whitespace();
            match (words.next(), words.next()) {
                (Some(id), Some(index)) => action(
                    actions::TOGGLE_PENDIENTE,
                    ActionArgs::new().with("id", id).with("index", index),
                ),
                _ => Err("usage: toggle <id> <index>".to_string()),
            }
        }
        "list" | "ls" => Ok(Input::List),
        "help" | "?" => Ok(Input::Help),
        "quit" | "exit" | "q" => Ok(Input::Quit),
        other => Err(format!("unknown command: {other} (try 'help')")),
    }
}

fn first_word(text: &str) -> Option<&str> {
    text.split_whitespace().next()
}

/// `set <id> <field> <value...>`. Text is cased the way live typing would
/// case it; the value may be empty to clear a field.
fn parse_set(rest: &str) -> Result<Input, String> {
    const USAGE: &str = "usage: set <id> <field> <value>";
    let (id, rest) = rest.split_once(char::is_whitespace).ok_or(USAGE)?;
    let rest = rest.trim_start();
    let (field, value) = match rest.split_once(char::is_whitespace) {
        Some((field, value)) => (field, value.trim()),
        None => (rest, ""),
    };
    if field.is_empty() {
        return Err(USAGE.to_string());
    }

    let value = match field.parse::<RecordField>() {
        Ok(known) if known.takes_casing() => normalize_text_casing(value),
        // Unknown names still go through so the dispatch table reports them.
        _ => value.to_string(),
    };
    Ok(Input::Action {
        name: actions::UPDATE_FIELD,
        args: ActionArgs::new()
            .with("id", id)
            .with("field", field)
            .with("value", value),
    })
}
