//! Patient Board Core Library
//!
//! In-memory patient record editor: an ordered record store bound to a
//! display surface.
//!
//! # Architecture
//!
//! ```text
//!   host UI event (data-action + attributes)
//!                 │
//!                 ▼
//!          CommandTable ──► Board ──► RecordStore
//!                             │
//!             render / focus / restyle signals
//!                             │
//!                             ▼
//!                     View (HtmlView, terminal, ...)
//! ```
//!
//! # Core Principle
//!
//! **The view is always re-derived from the store.** Every structural change
//! redraws every row; nothing is read back from what was previously drawn.
//!
//! # Modules
//!
//! - [`models`]: Domain types (PatientRecord, Pendiente, RecordField)
//! - [`store`]: Ordered record store with session-unique ids
//! - [`board`]: View binder, pending-entry state and the `View` trait
//! - [`commands`]: Action-name dispatch table
//! - [`text`]: Sentence casing and field auto-sizing
//! - [`render`]: HTML row rendering
//! - [`config`]: Board configuration

pub mod board;
pub mod commands;
pub mod config;
pub mod models;
pub mod render;
pub mod store;
pub mod text;

// Re-export commonly used types
pub use board::{Board, FocusRequest, NullView, PendingEntry, View};
pub use commands::{ActionArgs, CommandError, CommandTable, Dispatched};
pub use config::{BoardConfig, ConfigError};
pub use models::{FieldValue, PatientRecord, Pendiente, RecordField, RecordId};
pub use render::{HtmlRowRenderer, HtmlUpdate, HtmlView};
pub use store::RecordStore;
pub use text::{normalize_text_casing, FieldSize, SizingPolicy};

// UniFFI setup - using proc macros
uniffi::setup_scaffolding!();

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

// =========================================================================
// FFI Error Type
// =========================================================================

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum PatientBoardError {
    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl From<ConfigError> for PatientBoardError {
    fn from(e: ConfigError) -> Self {
        PatientBoardError::ConfigError(e.to_string())
    }
}

impl From<CommandError> for PatientBoardError {
    fn from(e: CommandError) -> Self {
        PatientBoardError::InvalidInput(e.to_string())
    }
}

impl From<serde_json::Error> for PatientBoardError {
    fn from(e: serde_json::Error) -> Self {
        PatientBoardError::SerializationError(e.to_string())
    }
}

impl<T> From<std::sync::PoisonError<T>> for PatientBoardError {
    fn from(e: std::sync::PoisonError<T>) -> Self {
        PatientBoardError::InternalError(format!("Lock poisoned: {}", e))
    }
}

// =========================================================================
// Factory Functions (exported to FFI)
// =========================================================================

/// Create a board with default configuration.
#[uniffi::export]
pub fn open_board() -> Arc<PatientBoardCore> {
    PatientBoardCore::build(BoardConfig::default())
}

/// Create a board from a JSON configuration document.
#[uniffi::export]
pub fn open_board_with_config(config_json: String) -> Result<Arc<PatientBoardCore>, PatientBoardError> {
    let config = BoardConfig::from_json_str(&config_json)?;
    Ok(PatientBoardCore::build(config))
}

/// Sentence-case text as the user types.
#[uniffi::export]
pub fn normalize_casing(text: String) -> String {
    normalize_text_casing(&text)
}

// =========================================================================
// Main API Object
// =========================================================================

/// Thread-safe board wrapper for FFI.
#[derive(uniffi::Object)]
pub struct PatientBoardCore {
    board: Arc<Mutex<Board<HtmlView>>>,
    commands: CommandTable<HtmlView>,
}

impl PatientBoardCore {
    fn build(config: BoardConfig) -> Arc<Self> {
        let view = HtmlView::new(config.sizing);
        Arc::new(Self {
            board: Arc::new(Mutex::new(Board::new(config, view))),
            commands: CommandTable::standard(),
        })
    }

    fn with_board<T>(
        &self,
        f: impl FnOnce(&mut Board<HtmlView>) -> T,
    ) -> Result<(T, FfiBoardUpdate), PatientBoardError> {
        let mut board = self.board.lock()?;
        let out = f(&mut *board);
        let update = board.view_mut().take_update();
        Ok((out, update.into()))
    }
}

#[uniffi::export]
impl PatientBoardCore {
    // =========================================================================
    // Record Operations
    // =========================================================================

    /// Append a blank record dated today.
    pub fn add_record(&self) -> Result<FfiBoardUpdate, PatientBoardError> {
        Ok(self.with_board(|board| board.add_record())?.1)
    }

    /// Delete a record. The host shows the confirmation prompt first and
    /// passes the user's answer.
    pub fn delete_record(&self, id: u64, confirmed: bool) -> Result<FfiBoardUpdate, PatientBoardError> {
        Ok(self.with_board(|board| board.delete_record(id, |_| confirmed))?.1)
    }

    /// Write a text field back to the store.
    pub fn update_text_field(
        &self,
        id: u64,
        field: String,
        value: String,
    ) -> Result<FfiBoardUpdate, PatientBoardError> {
        let field = parse_field(&field)?;
        Ok(self
            .with_board(|board| board.update_field(id, field, FieldValue::Text(value)))?
            .1)
    }

    /// Mark a record done or not done.
    pub fn set_completed(&self, id: u64, completed: bool) -> Result<FfiBoardUpdate, PatientBoardError> {
        Ok(self
            .with_board(|board| board.update_field(id, RecordField::Completed, completed.into()))?
            .1)
    }

    /// Flip one checklist entry.
    pub fn toggle_pendiente(&self, id: u64, index: u32) -> Result<FfiBoardUpdate, PatientBoardError> {
        Ok(self
            .with_board(|board| board.toggle_pendiente(id, index as usize))?
            .1)
    }

    // =========================================================================
    // Pending Entry Operations
    // =========================================================================

    pub fn open_pending_entry(&self, id: u64) -> Result<FfiBoardUpdate, PatientBoardError> {
        Ok(self.with_board(|board| board.open_pending_entry(id))?.1)
    }

    pub fn close_pending_entry(&self) -> Result<FfiBoardUpdate, PatientBoardError> {
        Ok(self.with_board(|board| board.close_pending_entry())?.1)
    }

    pub fn accept_pending_entry(&self, text: String) -> Result<FfiBoardUpdate, PatientBoardError> {
        Ok(self.with_board(|board| board.accept_pending_entry(&text))?.1)
    }

    // =========================================================================
    // Dispatch & Snapshot
    // =========================================================================

    /// Run a named action with the element's attributes.
    pub fn dispatch(
        &self,
        action: String,
        args: HashMap<String, String>,
        confirmed: bool,
    ) -> Result<FfiBoardUpdate, PatientBoardError> {
        let args: ActionArgs = args.into_iter().collect();
        let (result, update) = self.with_board(|board| {
            self.commands
                .dispatch(board, &action, &args, &mut |_: &str| confirmed)
        })?;
        result?;
        Ok(update)
    }

    /// Full table body markup from the latest render.
    pub fn rows_html(&self) -> Result<String, PatientBoardError> {
        let board = self.board.lock()?;
        Ok(board.view().rows_html().to_string())
    }

    /// Current records.
    pub fn records(&self) -> Result<Vec<FfiPatientRecord>, PatientBoardError> {
        let board = self.board.lock()?;
        Ok(board.records().iter().cloned().map(Into::into).collect())
    }

    /// Size for an editable cell under this board's sizing policy.
    ///
    /// `content_height_px` is the host-measured scroll height; it only
    /// matters for multi-line fields.
    pub fn auto_size_field(
        &self,
        field: String,
        value: String,
        content_height_px: u32,
    ) -> Result<FfiFieldSize, PatientBoardError> {
        let field = parse_field(&field)?;
        let board = self.board.lock()?;
        let size = board
            .config()
            .sizing
            .auto_size(field.kind(), &value, content_height_px);
        Ok(size.into())
    }

    /// Current records as JSON.
    pub fn snapshot_json(&self) -> Result<String, PatientBoardError> {
        let board = self.board.lock()?;
        Ok(serde_json::to_string(board.records())?)
    }
}

fn parse_field(name: &str) -> Result<RecordField, PatientBoardError> {
    name.parse()
        .map_err(|e: models::UnknownField| PatientBoardError::InvalidInput(e.to_string()))
}

// =========================================================================
// FFI Types
// =========================================================================

/// FFI-safe checklist entry.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPendiente {
    pub text: String,
    pub completed: bool,
}

impl From<Pendiente> for FfiPendiente {
    fn from(item: Pendiente) -> Self {
        Self {
            text: item.text,
            completed: item.completed,
        }
    }
}

/// FFI-safe patient record.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiPatientRecord {
    pub id: u64,
    pub iea: String,
    pub names: String,
    pub age: String,
    pub ci: String,
    pub nh: String,
    pub phone: String,
    pub diagnosis: String,
    pub plan: String,
    pub specialist: String,
    pub comment: String,
    pub pendientes: Vec<FfiPendiente>,
    pub completed: bool,
    pub attachment: bool,
}

impl From<PatientRecord> for FfiPatientRecord {
    fn from(record: PatientRecord) -> Self {
        Self {
            id: record.id,
            iea: record.iea,
            names: record.names,
            age: record.age,
            ci: record.ci,
            nh: record.nh,
            phone: record.phone,
            diagnosis: record.diagnosis,
            plan: record.plan,
            specialist: record.specialist,
            comment: record.comment,
            pendientes: record.pendientes.into_iter().map(Into::into).collect(),
            completed: record.completed,
            attachment: record.attachment,
        }
    }
}

/// FFI-safe focus request.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiFocusRequest {
    pub record_id: u64,
    pub field: String,
    pub delay_ms: u64,
}

impl From<FocusRequest> for FfiFocusRequest {
    fn from(request: FocusRequest) -> Self {
        Self {
            record_id: request.record_id,
            field: request.field.as_str().to_string(),
            delay_ms: request.delay.as_millis() as u64,
        }
    }
}

/// FFI-safe cell size.
#[derive(Debug, Clone, PartialEq, Eq, uniffi::Enum)]
pub enum FfiFieldSize {
    Height { px: u32 },
    Width { px: u32 },
    Natural,
}

impl From<FieldSize> for FfiFieldSize {
    fn from(size: FieldSize) -> Self {
        match size {
            FieldSize::Height(px) => FfiFieldSize::Height { px },
            FieldSize::Width(px) => FfiFieldSize::Width { px },
            FieldSize::Natural => FfiFieldSize::Natural,
        }
    }
}

/// FFI-safe targeted row restyle.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiRowCompleted {
    pub record_id: u64,
    pub completed: bool,
}

/// What the host should apply after a call.
#[derive(Debug, Clone, uniffi::Record)]
pub struct FfiBoardUpdate {
    /// Replacement table body, when a full render happened
    pub rows_html: Option<String>,
    pub focus: Option<FfiFocusRequest>,
    pub row_completed: Vec<FfiRowCompleted>,
    /// Set while the checklist input is open
    pub pending_target: Option<u64>,
}

impl From<HtmlUpdate> for FfiBoardUpdate {
    fn from(update: HtmlUpdate) -> Self {
        Self {
            rows_html: update.rows_html,
            focus: update.focus.map(Into::into),
            row_completed: update
                .row_completed
                .into_iter()
                .map(|(record_id, completed)| FfiRowCompleted {
                    record_id,
                    completed,
                })
                .collect(),
            pending_target: update.pending_target,
        }
    }
}
