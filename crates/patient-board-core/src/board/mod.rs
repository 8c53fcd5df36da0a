//! View binder: applies UI actions to the store and keeps the view in step.
//!
//! Structural changes (add, delete, new or toggled checklist entry) redraw
//! every row from the store. Text edits are written back without a redraw;
//! the view already shows what the user typed.

mod pending;
mod view;

pub use pending::*;
pub use view::*;

use tracing::{debug, trace};

use crate::config::BoardConfig;
use crate::models::{FieldValue, PatientRecord, RecordField, RecordId};
use crate::store::RecordStore;

/// A record store bound to a view.
pub struct Board<V: View> {
    store: RecordStore,
    pending: PendingEntry,
    config: BoardConfig,
    view: V,
}

impl<V: View> Board<V> {
    /// Create a board over an empty store, seeding it when the config asks.
    /// The initial rows are drawn immediately.
    pub fn new(config: BoardConfig, view: V) -> Self {
        let mut store = RecordStore::new();
        if config.seed_sample_data {
            store.seed_sample_data();
        }
        Self::with_store(store, config, view)
    }

    /// Bind an existing store. The initial rows are drawn immediately.
    pub fn with_store(store: RecordStore, config: BoardConfig, view: V) -> Self {
        let mut board = Self {
            store,
            pending: PendingEntry::Closed,
            config,
            view,
        };
        board.render_all();
        board
    }

    pub fn store(&self) -> &RecordStore {
        &self.store
    }

    pub fn records(&self) -> &[PatientRecord] {
        self.store.records()
    }

    pub fn pending(&self) -> PendingEntry {
        self.pending
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Add a blank row, redraw, and ask for focus on its first field.
    pub fn add_record(&mut self) -> RecordId {
        let id = self.store.add_record();
        self.after_add(id)
    }

    /// Like [`add_record`](Self::add_record) with an explicit admission date.
    pub fn add_record_on(&mut self, date: chrono::NaiveDate) -> RecordId {
        let id = self.store.add_record_on(date);
        self.after_add(id)
    }

    fn after_add(&mut self, id: RecordId) -> RecordId {
        self.render_all();
        self.view.request_focus(FocusRequest {
            record_id: id,
            field: RecordField::FIRST_EDITABLE,
            delay: self.config.focus_delay(),
        });
        id
    }

    /// Delete a row once `confirm` accepts the configured prompt.
    ///
    /// The prompt is always shown. Once confirmed, the rows are redrawn even
    /// when `id` matched nothing.
    pub fn delete_record<F>(&mut self, id: RecordId, confirm: F) -> bool
    where
        F: FnOnce(&str) -> bool,
    {
        if !confirm(self.config.delete_prompt.as_str()) {
            debug!(id, "delete declined");
            return false;
        }
        let removed = self.store.remove(id);
        self.render_all();
        removed
    }

    /// Write a field back to the store.
    ///
    /// Changing `completed` restyles just that row.
    pub fn update_field(&mut self, id: RecordId, field: RecordField, value: FieldValue) -> bool {
        let completed = match (&field, &value) {
            (RecordField::Completed, FieldValue::Flag(flag)) => Some(*flag),
            _ => None,
        };
        let applied = self.store.update_field(id, field, value);
        if let (true, Some(flag)) = (applied, completed) {
            self.view.set_row_completed(id, flag);
        }
        applied
    }

    /// Open the checklist entry input for `id`.
    pub fn open_pending_entry(&mut self, id: RecordId) {
        self.pending.open(id);
        self.view.show_pending_entry(id);
        debug!(id, "pending entry opened");
    }

    /// Hide the input and forget the target.
    pub fn close_pending_entry(&mut self) {
        self.pending.close();
        self.view.hide_pending_entry();
    }

    /// Append `text` (trimmed) to the open target's checklist, then close.
    ///
    /// Blank input, a closed input, or a target that no longer exists add
    /// nothing. The input closes in every case. Returns true when an entry
    /// was added.
    pub fn accept_pending_entry(&mut self, text: &str) -> bool {
        let text = text.trim();
        let added = match self.pending.target() {
            Some(id) if !text.is_empty() => self.store.add_pendiente(id, text),
            Some(id) => {
                trace!(id, "pending entry blank, discarded");
                false
            }
            None => {
                trace!("pending entry accepted while closed");
                false
            }
        };
        if added {
            self.render_all();
        }
        self.close_pending_entry();
        added
    }

    /// Flip one checklist entry and redraw.
    pub fn toggle_pendiente(&mut self, id: RecordId, index: usize) -> bool {
        let toggled = self.store.toggle_pendiente(id, index);
        if toggled {
            self.render_all();
        }
        toggled
    }

    /// Redraw every row from the store.
    pub fn render_all(&mut self) {
        self.view.render(self.store.records());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct CountingView {
        renders: usize,
        rows_completed: Vec<(RecordId, bool)>,
        focus: Vec<FocusRequest>,
        visible: bool,
    }

    impl View for CountingView {
        fn render(&mut self, _records: &[PatientRecord]) {
            self.renders += 1;
        }
        fn request_focus(&mut self, request: FocusRequest) {
            self.focus.push(request);
        }
        fn set_row_completed(&mut self, id: RecordId, completed: bool) {
            self.rows_completed.push((id, completed));
        }
        fn show_pending_entry(&mut self, _id: RecordId) {
            self.visible = true;
        }
        fn hide_pending_entry(&mut self) {
            self.visible = false;
        }
    }

    fn board() -> Board<CountingView> {
        Board::new(BoardConfig::default(), CountingView::default())
    }

    #[test]
    fn test_text_edit_does_not_render() {
        let mut board = board();
        let before = board.view().renders;
        assert!(board.update_field(1, RecordField::Names, "ana".into()));
        assert_eq!(board.view().renders, before);
        assert!(board.view().rows_completed.is_empty());
    }

    #[test]
    fn test_completed_edit_restyles_row() {
        let mut board = board();
        let before = board.view().renders;
        assert!(board.update_field(1, RecordField::Completed, true.into()));
        assert_eq!(board.view().renders, before);
        assert_eq!(board.view().rows_completed, vec![(1, true)]);
        assert!(board.records()[0].completed);
    }

    #[test]
    fn test_add_requests_focus() {
        let mut board = board();
        let id = board.add_record();
        let focus = board.view().focus.last().copied().unwrap();
        assert_eq!(focus.record_id, id);
        assert_eq!(focus.field, RecordField::Iea);
        assert_eq!(focus.delay.as_millis(), 100);
    }

    #[test]
    fn test_delete_passes_prompt() {
        let mut board = board();
        let mut seen = String::new();
        assert!(board.delete_record(1, |prompt| {
            seen = prompt.to_string();
            true
        }));
        assert_eq!(seen, crate::config::DEFAULT_DELETE_PROMPT);
        assert!(board.records().is_empty());
    }

    #[test]
    fn test_declined_delete_keeps_row_and_skips_render() {
        let mut board = board();
        let before = board.view().renders;
        assert!(!board.delete_record(1, |_| false));
        assert_eq!(board.records().len(), 1);
        assert_eq!(board.view().renders, before);
    }

    #[test]
    fn test_accept_always_closes() {
        let mut board = board();
        board.open_pending_entry(1);
        assert!(board.view().visible);
        assert!(!board.accept_pending_entry("   "));
        assert!(!board.view().visible);
        assert_eq!(board.pending(), PendingEntry::Closed);
    }

    #[test]
    fn test_accept_while_closed_adds_nothing() {
        let mut board = board();
        assert!(!board.accept_pending_entry("Algo"));
        assert_eq!(board.records()[0].pendientes.len(), 2);
    }

    #[test]
    fn test_accept_after_target_deleted() {
        let mut board = board();
        board.open_pending_entry(1);
        assert!(board.delete_record(1, |_| true));
        assert!(!board.accept_pending_entry("Algo"));
        assert_eq!(board.pending(), PendingEntry::Closed);
    }

    #[test]
    fn test_delete_missing_prompts_and_renders() {
        let mut board = board();
        let before = board.view().renders;
        let mut asked = false;
        assert!(!board.delete_record(42, |_| {
            asked = true;
            true
        }));
        assert!(asked);
        assert_eq!(board.view().renders, before + 1);
        assert_eq!(board.records().len(), 1);
    }
}
