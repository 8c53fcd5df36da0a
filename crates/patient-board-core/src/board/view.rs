//! The seam between the board and whatever draws it.

use std::time::Duration;

use crate::models::{PatientRecord, RecordField, RecordId};

/// Ask the view to focus a field once the new row exists.
///
/// The view schedules this itself after `delay`. If the row is gone by then,
/// the request is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusRequest {
    pub record_id: RecordId,
    pub field: RecordField,
    pub delay: Duration,
}

/// Signals a board sends to its display surface.
pub trait View {
    /// Redraw every row from `records`, discarding whatever was shown.
    fn render(&mut self, records: &[PatientRecord]);

    fn request_focus(&mut self, request: FocusRequest);

    /// Restyle a single row's completed state without a full redraw.
    fn set_row_completed(&mut self, id: RecordId, completed: bool);

    /// Clear and show the checklist entry input for `id`.
    fn show_pending_entry(&mut self, id: RecordId);

    fn hide_pending_entry(&mut self);
}

/// A view that draws nothing. Useful for headless use of the board.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullView;

impl View for NullView {
    fn render(&mut self, _records: &[PatientRecord]) {}
    fn request_focus(&mut self, _request: FocusRequest) {}
    fn set_row_completed(&mut self, _id: RecordId, _completed: bool) {}
    fn show_pending_entry(&mut self, _id: RecordId) {}
    fn hide_pending_entry(&mut self) {}
}
