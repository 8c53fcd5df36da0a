//! Full-replace HTML rendering of the record table body.
//!
//! Controls carry `data-action` and argument attributes instead of inline
//! handlers; the host forwards them to the dispatch table.

use std::fmt::Write;

use super::escape_html;
use crate::board::{FocusRequest, View};
use crate::commands::actions;
use crate::models::{FieldKind, PatientRecord, RecordField, RecordId};
use crate::text::{normalize_text_casing, SizingPolicy};

/// Renders `<tr>` rows for every record.
#[derive(Debug, Clone, Default)]
pub struct HtmlRowRenderer {
    sizing: SizingPolicy,
}

impl HtmlRowRenderer {
    pub fn new(sizing: SizingPolicy) -> Self {
        Self { sizing }
    }

    /// Markup for the whole table body, one row per record, in store order.
    pub fn render_rows(&self, records: &[PatientRecord]) -> String {
        let mut out = String::new();
        for record in records {
            self.render_row(&mut out, record);
        }
        out
    }

    fn render_row(&self, out: &mut String, record: &PatientRecord) {
        let id = record.id;
        let class = if record.completed {
            "patient-row completed"
        } else {
            "patient-row"
        };
        let _ = write!(out, r#"<tr class="{class}" data-id="{id}">"#);
        let _ = write!(out, r#"<td class="row-id">{id}</td>"#);

        for field in [
            RecordField::Iea,
            RecordField::Names,
            RecordField::Age,
            RecordField::Ci,
            RecordField::Nh,
            RecordField::Phone,
            RecordField::Diagnosis,
            RecordField::Plan,
        ] {
            self.field_cell(out, record, field);
        }
        self.pendientes_cell(out, record);
        self.attachment_cell(out, record);
        for field in [RecordField::Specialist, RecordField::Comment] {
            self.field_cell(out, record, field);
        }

        let checked = if record.completed { " checked" } else { "" };
        let _ = write!(
            out,
            r#"<td><input type="checkbox" class="row-completed"{checked} data-action="{action}" data-id="{id}" data-field="completed"></td>"#,
            action = actions::UPDATE_FIELD,
        );
        let _ = write!(
            out,
            r#"<td><button class="delete-btn" data-action="{action}" data-id="{id}">🗑️</button></td>"#,
            action = actions::DELETE_RECORD,
        );
        out.push_str("</tr>");
    }

    fn field_cell(&self, out: &mut String, record: &PatientRecord, field: RecordField) {
        let raw = record.text(field).unwrap_or_default();
        let shown = if field.takes_casing() {
            normalize_text_casing(raw)
        } else {
            raw.to_string()
        };
        let value = escape_html(&shown);
        let id = record.id;
        let action = actions::UPDATE_FIELD;
        let name = field.as_str();
        out.push_str("<td>");
        match field.kind() {
            FieldKind::Date => {
                let _ = write!(
                    out,
                    r#"<input type="date" class="editable-cell date-input" value="{value}" data-action="{action}" data-id="{id}" data-field="{name}">"#
                );
            }
            FieldKind::MultiLine => {
                let _ = write!(
                    out,
                    r#"<textarea class="editable-cell {name}-input" rows="2" style="max-height: {max_height}px" data-action="{action}" data-id="{id}" data-field="{name}">{value}</textarea>"#,
                    max_height = self.sizing.multiline_max_height_px,
                );
            }
            FieldKind::SingleLine => {
                let input_type = match field {
                    RecordField::Age => "number",
                    RecordField::Phone => "tel",
                    _ => "text",
                };
                let width = self.sizing.single_line_width(&shown);
                let _ = write!(
                    out,
                    r#"<input type="{input_type}" class="editable-cell" style="width: {width}px" value="{value}" data-action="{action}" data-id="{id}" data-field="{name}">"#
                );
            }
            FieldKind::Checkbox => {}
        }
        out.push_str("</td>");
    }

    fn pendientes_cell(&self, out: &mut String, record: &PatientRecord) {
        let id = record.id;
        out.push_str(r#"<td><div class="pendientes">"#);
        for (index, item) in record.pendientes.iter().enumerate() {
            let (checked, done) = if item.completed {
                (" checked", " completed")
            } else {
                ("", "")
            };
            let _ = write!(
                out,
                r#"<div class="pendiente-item"><input type="checkbox" class="pendiente-checkbox"{checked} data-action="{action}" data-id="{id}" data-index="{index}"><span class="pendiente-text{done}">{text}</span></div>"#,
                action = actions::TOGGLE_PENDIENTE,
                text = escape_html(&item.text),
            );
        }
        let _ = write!(
            out,
            r#"<button class="add-pendiente-btn" data-action="{action}" data-id="{id}">+</button></div></td>"#,
            action = actions::OPEN_PENDING,
        );
    }

    fn attachment_cell(&self, out: &mut String, record: &PatientRecord) {
        let (class, label) = if record.attachment {
            ("attachment-indicator has-attachment", "Adjunto")
        } else {
            ("attachment-indicator", "Adjuntar")
        };
        let _ = write!(
            out,
            r#"<td><button class="{class}" data-action="{action}" data-id="{id}">📎 {label}</button></td>"#,
            action = actions::ATTACH,
            id = record.id,
        );
    }
}

/// Signals an [`HtmlView`] collected since the last [`HtmlView::take_update`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HtmlUpdate {
    /// New table body markup, if a full render happened
    pub rows_html: Option<String>,
    pub focus: Option<FocusRequest>,
    /// Targeted completed-state restyles, in order
    pub row_completed: Vec<(RecordId, bool)>,
    /// `Some(id)` while the checklist input is open
    pub pending_target: Option<RecordId>,
}

/// A view that renders markup and buffers the result for a host to pick up.
#[derive(Debug, Clone, Default)]
pub struct HtmlView {
    renderer: HtmlRowRenderer,
    rows_html: String,
    dirty: bool,
    focus: Option<FocusRequest>,
    row_completed: Vec<(RecordId, bool)>,
    pending_target: Option<RecordId>,
}

impl HtmlView {
    pub fn new(sizing: SizingPolicy) -> Self {
        Self {
            renderer: HtmlRowRenderer::new(sizing),
            ..Self::default()
        }
    }

    /// Markup from the most recent render.
    pub fn rows_html(&self) -> &str {
        &self.rows_html
    }

    /// Drain buffered signals.
    pub fn take_update(&mut self) -> HtmlUpdate {
        let rows_html = std::mem::take(&mut self.dirty).then(|| self.rows_html.clone());
        HtmlUpdate {
            rows_html,
            focus: self.focus.take(),
            row_completed: std::mem::take(&mut self.row_completed),
            pending_target: self.pending_target,
        }
    }
}

impl View for HtmlView {
    fn render(&mut self, records: &[PatientRecord]) {
        self.rows_html = self.renderer.render_rows(records);
        self.dirty = true;
        // Restyles are subsumed by the fresh markup.
        self.row_completed.clear();
    }

    fn request_focus(&mut self, request: FocusRequest) {
        self.focus = Some(request);
    }

    fn set_row_completed(&mut self, id: RecordId, completed: bool) {
        self.row_completed.push((id, completed));
    }

    fn show_pending_entry(&mut self, id: RecordId) {
        self.pending_target = Some(id);
    }

    fn hide_pending_entry(&mut self) {
        self.pending_target = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Pendiente;

    fn record() -> PatientRecord {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let mut record = PatientRecord::blank(4, date);
        record.names = "ana <b>".into();
        record.diagnosis = "fiebre. tos".into();
        record.pendientes = vec![
            Pendiente {
                text: "Rx".into(),
                completed: true,
            },
            Pendiente::new("Labs"),
        ];
        record
    }

    #[test]
    fn test_row_markup() {
        let html = HtmlRowRenderer::default().render_rows(&[record()]);

        assert!(html.starts_with(r#"<tr class="patient-row" data-id="4">"#));
        assert!(html.contains(r#"value="2024-01-15""#));
        assert!(html.contains(r#"value="Ana &lt;b&gt;""#));
        assert!(html.contains(">Fiebre. Tos</textarea>"));
        assert!(html.contains(r#"style="max-height: 400px" data-action="update-field" data-id="4" data-field="diagnosis""#));
        assert!(html.contains(r#"data-action="toggle-pendiente" data-id="4" data-index="1""#));
        assert!(html.contains(r#"<span class="pendiente-text completed">Rx</span>"#));
        assert!(html.contains("📎 Adjuntar"));
        assert!(html.ends_with("</tr>"));
    }

    #[test]
    fn test_rows_follow_store_order() {
        let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        let records = vec![PatientRecord::blank(9, date), PatientRecord::blank(2, date)];
        let html = HtmlRowRenderer::default().render_rows(&records);
        let first = html.find(r#"data-id="9">"#).unwrap();
        let second = html.find(r#"data-id="2">"#).unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_view_update_drains() {
        let mut view = HtmlView::default();
        view.render(&[record()]);
        view.set_row_completed(4, true);
        view.show_pending_entry(4);

        let update = view.take_update();
        assert!(update.rows_html.is_some());
        assert_eq!(update.row_completed, vec![(4, true)]);
        assert_eq!(update.pending_target, Some(4));

        let again = view.take_update();
        assert!(again.rows_html.is_none());
        assert!(again.row_completed.is_empty());
        assert_eq!(again.pending_target, Some(4));
    }
}
