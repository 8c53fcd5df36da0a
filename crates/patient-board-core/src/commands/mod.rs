//! Action-name dispatch table.
//!
//! A host view binds elements declaratively (`data-action="toggle-pendiente"`,
//! `data-id="3"`, `data-index="0"`) and forwards the action name plus the
//! element's attributes here. Errors describe wiring mistakes in the host;
//! misses inside the store stay silent.

use std::collections::{BTreeMap, HashMap};

use thiserror::Error;
use tracing::{debug, info};

use crate::board::{Board, View};
use crate::models::{FieldValue, RecordField, RecordId, UnknownField};

/// Action names understood by [`CommandTable::standard`].
pub mod actions {
    pub const ADD_RECORD: &str = "add-record";
    pub const DELETE_RECORD: &str = "delete-record";
    pub const UPDATE_FIELD: &str = "update-field";
    pub const OPEN_PENDING: &str = "open-pending";
    pub const CLOSE_PENDING: &str = "close-pending";
    pub const ACCEPT_PENDING: &str = "accept-pending";
    pub const TOGGLE_PENDIENTE: &str = "toggle-pendiente";
    pub const ATTACH: &str = "attach";
}

/// Dispatch errors.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum CommandError {
    #[error("Unknown action: {0}")]
    UnknownAction(String),

    #[error("Missing argument '{name}' for action '{action}'")]
    MissingArgument { action: String, name: &'static str },

    #[error("Invalid value for '{name}': {value}")]
    InvalidArgument { name: &'static str, value: String },

    #[error(transparent)]
    UnknownField(#[from] UnknownField),
}

pub type CommandResult<T> = Result<T, CommandError>;

/// Attribute bag read off the element that fired an action.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActionArgs {
    action: String,
    values: BTreeMap<String, String>,
}

impl ActionArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    fn require(&self, name: &'static str) -> CommandResult<&str> {
        self.get(name).ok_or_else(|| CommandError::MissingArgument {
            action: self.action.clone(),
            name,
        })
    }

    fn parse<T: std::str::FromStr>(&self, name: &'static str) -> CommandResult<T> {
        let raw = self.require(name)?;
        raw.trim().parse().map_err(|_| CommandError::InvalidArgument {
            name,
            value: raw.to_string(),
        })
    }

    fn id(&self) -> CommandResult<RecordId> {
        self.parse("id")
    }

    fn index(&self) -> CommandResult<usize> {
        self.parse("index")
    }

    fn field(&self) -> CommandResult<RecordField> {
        Ok(self.require("field")?.parse()?)
    }

    /// Checkbox state as a DOM would report it.
    fn flag(&self, name: &'static str) -> CommandResult<bool> {
        let raw = self.require(name)?;
        match raw.trim() {
            "true" | "on" | "checked" | "1" => Ok(true),
            "false" | "off" | "" | "0" => Ok(false),
            _ => Err(CommandError::InvalidArgument {
                name,
                value: raw.to_string(),
            }),
        }
    }
}

impl<K: Into<String>, S: Into<String>> FromIterator<(K, S)> for ActionArgs {
    fn from_iter<I: IntoIterator<Item = (K, S)>>(iter: I) -> Self {
        let mut args = ActionArgs::new();
        for (key, value) in iter {
            args.insert(key, value);
        }
        args
    }
}

/// What a dispatched action did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatched {
    Added(RecordId),
    /// True when a row was removed
    Deleted(bool),
    /// True when the field was written
    Updated(bool),
    PendingOpened(RecordId),
    PendingClosed,
    /// True when a checklist entry was appended
    PendingAccepted(bool),
    /// True when an entry was flipped
    Toggled(bool),
    /// The attachment control has no backing behaviour
    AttachmentIgnored(RecordId),
}

/// Interactive yes/no gate for destructive actions.
pub type Confirm<'a> = &'a mut dyn FnMut(&str) -> bool;

/// Handler signature stored in the table.
pub type Handler<V> = fn(&mut Board<V>, &ActionArgs, Confirm<'_>) -> CommandResult<Dispatched>;

/// Maps action names to handlers.
pub struct CommandTable<V: View> {
    handlers: HashMap<&'static str, Handler<V>>,
}

impl<V: View> Default for CommandTable<V> {
    fn default() -> Self {
        Self::standard()
    }
}

impl<V: View> CommandTable<V> {
    /// An empty table.
    pub fn empty() -> Self {
        Self {
            handlers: HashMap::new(),
        }
    }

    /// The table with every board action registered.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.register(actions::ADD_RECORD, add_record);
        table.register(actions::DELETE_RECORD, delete_record);
        table.register(actions::UPDATE_FIELD, update_field);
        table.register(actions::OPEN_PENDING, open_pending);
        table.register(actions::CLOSE_PENDING, close_pending);
        table.register(actions::ACCEPT_PENDING, accept_pending);
        table.register(actions::TOGGLE_PENDIENTE, toggle_pendiente);
        table.register(actions::ATTACH, attach);
        table
    }

    /// Add or replace a handler.
    pub fn register(&mut self, action: &'static str, handler: Handler<V>) {
        self.handlers.insert(action, handler);
    }

    pub fn contains(&self, action: &str) -> bool {
        self.handlers.contains_key(action)
    }

    /// Registered action names, sorted.
    pub fn actions(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.handlers.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Run `action` against `board`.
    pub fn dispatch(
        &self,
        board: &mut Board<V>,
        action: &str,
        args: &ActionArgs,
        confirm: Confirm<'_>,
    ) -> CommandResult<Dispatched> {
        let handler = self
            .handlers
            .get(action)
            .ok_or_else(|| CommandError::UnknownAction(action.to_string()))?;
        let mut args = args.clone();
        args.action = action.to_string();
        let outcome = handler(board, &args, confirm)?;
        debug!(action, ?outcome, "action dispatched");
        Ok(outcome)
    }
}

fn add_record<V: View>(
    board: &mut Board<V>,
    _args: &ActionArgs,
    _confirm: Confirm<'_>,
) -> CommandResult<Dispatched> {
    Ok(Dispatched::Added(board.add_record()))
}

fn delete_record<V: View>(
    board: &mut Board<V>,
    args: &ActionArgs,
    confirm: Confirm<'_>,
) -> CommandResult<Dispatched> {
    let id = args.id()?;
    Ok(Dispatched::Deleted(board.delete_record(id, |prompt| confirm(prompt))))
}

fn update_field<V: View>(
    board: &mut Board<V>,
    args: &ActionArgs,
    _confirm: Confirm<'_>,
) -> CommandResult<Dispatched> {
    let id = args.id()?;
    let field = args.field()?;
    let value = match field {
        RecordField::Completed => FieldValue::Flag(args.flag("value")?),
        _ => FieldValue::Text(args.require("value")?.to_string()),
    };
    Ok(Dispatched::Updated(board.update_field(id, field, value)))
}

fn open_pending<V: View>(
    board: &mut Board<V>,
    args: &ActionArgs,
    _confirm: Confirm<'_>,
) -> CommandResult<Dispatched> {
    let id = args.id()?;
    board.open_pending_entry(id);
    Ok(Dispatched::PendingOpened(id))
}

fn close_pending<V: View>(
    board: &mut Board<V>,
    _args: &ActionArgs,
    _confirm: Confirm<'_>,
) -> CommandResult<Dispatched> {
    board.close_pending_entry();
    Ok(Dispatched::PendingClosed)
}

fn accept_pending<V: View>(
    board: &mut Board<V>,
    args: &ActionArgs,
    _confirm: Confirm<'_>,
) -> CommandResult<Dispatched> {
    // A missing text is the same as an empty input box.
    let text = args.get("text").unwrap_or_default();
    Ok(Dispatched::PendingAccepted(board.accept_pending_entry(text)))
}

fn toggle_pendiente<V: View>(
    board: &mut Board<V>,
    args: &ActionArgs,
    _confirm: Confirm<'_>,
) -> CommandResult<Dispatched> {
    let id = args.id()?;
    let index = args.index()?;
    Ok(Dispatched::Toggled(board.toggle_pendiente(id, index)))
}

fn attach<V: View>(
    _board: &mut Board<V>,
    args: &ActionArgs,
    _confirm: Confirm<'_>,
) -> CommandResult<Dispatched> {
    let id = args.id()?;
    info!(id, "attachment requested; attachments are not supported");
    Ok(Dispatched::AttachmentIgnored(id))
}
