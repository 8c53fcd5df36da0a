//! Terminal view: prints the whole table on every render.

use std::collections::HashSet;
use std::io::Write;

use patient_board_core::board::{FocusRequest, View};
use patient_board_core::models::{PatientRecord, RecordId};
use patient_board_core::render::HtmlRowRenderer;
use tracing::warn;

/// How rows are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Text,
    Html,
}

pub struct TerminalView<W: Write> {
    out: W,
    format: Format,
    html: HtmlRowRenderer,
    /// Ids in the last drawn frame, for guarding focus requests
    shown: HashSet<RecordId>,
}

impl<W: Write> TerminalView<W> {
    pub fn new(out: W, format: Format, html: HtmlRowRenderer) -> Self {
        Self {
            out,
            format,
            html,
            shown: HashSet::new(),
        }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = writeln!(self.out, "{text}").and_then(|_| self.out.flush()) {
            warn!("failed to write to terminal: {e}");
        }
    }
}

fn text_row(record: &PatientRecord) -> String {
    let mark = if record.completed { "x" } else { " " };
    let mut row = format!(
        "#{id} [{mark}] {iea} | {names} | edad {age} | CI {ci} NH {nh} | tel {phone}",
        id = record.id,
        iea = record.iea,
        names = record.names,
        age = record.age,
        ci = record.ci,
        nh = record.nh,
        phone = record.phone,
    );
    for (label, value) in [
        ("dx", &record.diagnosis),
        ("plan", &record.plan),
        ("esp", &record.specialist),
        ("nota", &record.comment),
    ] {
        if !value.is_empty() {
            row.push_str(&format!("\n    {label}: {value}"));
        }
    }
    if record.attachment {
        row.push_str("\n    adjunto");
    }
    for (index, item) in record.pendientes.iter().enumerate() {
        let mark = if item.completed { "x" } else { " " };
        row.push_str(&format!("\n    {index}. [{mark}] {}", item.text));
    }
    row
}

impl<W: Write> View for TerminalView<W> {
    fn render(&mut self, records: &[PatientRecord]) {
        self.shown = records.iter().map(|r| r.id).collect();
        let body = match self.format {
            Format::Html => self.html.render_rows(records),
            Format::Text if records.is_empty() => "(sin pacientes)".to_string(),
            Format::Text => records
                .iter()
                .map(text_row)
                .collect::<Vec<_>>()
                .join("\n"),
        };
        self.emit(&body);
    }

    fn request_focus(&mut self, request: FocusRequest) {
        // The row may already be gone; focusing nothing is fine.
        if self.shown.contains(&request.record_id) {
            let line = format!("editing #{} {}", request.record_id, request.field);
            self.emit(&line);
        }
    }

    fn set_row_completed(&mut self, id: RecordId, completed: bool) {
        let state = if completed { "done" } else { "open" };
        let line = format!("#{id} marked {state}");
        self.emit(&line);
    }

    fn show_pending_entry(&mut self, id: RecordId) {
        let line = format!("new checklist entry for #{id}: type 'accept <text>' or 'cancel'");
        self.emit(&line);
    }

    fn hide_pending_entry(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use patient_board_core::models::{Pendiente, RecordField};
    use std::time::Duration;

    fn record() -> PatientRecord {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut record = PatientRecord::blank(1, date);
        record.names = "Ana".into();
        record.plan = "Reposo".into();
        record.pendientes.push(Pendiente::new("Labs"));
        record
    }

    fn output(view: TerminalView<Vec<u8>>) -> String {
        String::from_utf8(view.into_inner()).unwrap()
    }

    #[test]
    fn test_text_render() {
        let mut view = TerminalView::new(Vec::new(), Format::Text, HtmlRowRenderer::default());
        view.render(&[record()]);
        let out = output(view);
        assert!(out.starts_with("#1 [ ] 2024-01-15 | Ana |"));
        assert!(out.contains("    plan: Reposo"));
        assert!(out.contains("    0. [ ] Labs"));
        assert!(!out.contains("dx:"));
    }

    #[test]
    fn test_focus_guarded() {
        let mut view = TerminalView::new(Vec::new(), Format::Text, HtmlRowRenderer::default());
        view.render(&[]);
        view.request_focus(FocusRequest {
            record_id: 5,
            field: RecordField::Iea,
            delay: Duration::from_millis(100),
        });
        assert_eq!(output(view), "(sin pacientes)\n");
    }
}
