//! Patient record models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{FieldValue, RecordField};

/// Session-unique record identifier. Assigned by the store, never reused.
pub type RecordId = u64;

/// Format used for the admission (`iea`) date.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single checklist entry attached to a record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pendiente {
    pub text: String,
    pub completed: bool,
}

impl Pendiente {
    /// Create an open (not yet completed) entry.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            completed: false,
        }
    }
}

/// One patient's editable row.
///
/// Every field is always present; an empty string is a valid unset value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatientRecord {
    /// Store-assigned identifier
    pub id: RecordId,
    /// Admission date, `YYYY-MM-DD` when set by the store
    pub iea: String,
    /// Full name
    pub names: String,
    /// Age, numeric-as-text
    pub age: String,
    /// Identity card number
    pub ci: String,
    /// Clinical history number
    pub nh: String,
    pub phone: String,
    pub diagnosis: String,
    pub plan: String,
    pub specialist: String,
    pub comment: String,
    /// Checklist, in insertion order
    pub pendientes: Vec<Pendiente>,
    /// Whole record marked as done
    pub completed: bool,
    /// Presentation-only flag; nothing ever attaches a file
    #[serde(default)]
    pub attachment: bool,
}

impl PatientRecord {
    /// Create a record with empty fields and the given admission date.
    pub fn blank(id: RecordId, date: NaiveDate) -> Self {
        Self {
            id,
            iea: date.format(DATE_FORMAT).to_string(),
            names: String::new(),
            age: String::new(),
            ci: String::new(),
            nh: String::new(),
            phone: String::new(),
            diagnosis: String::new(),
            plan: String::new(),
            specialist: String::new(),
            comment: String::new(),
            pendientes: Vec::new(),
            completed: false,
            attachment: false,
        }
    }

    /// Read a text field. Returns `None` for `completed`.
    pub fn text(&self, field: RecordField) -> Option<&str> {
        let value = match field {
            RecordField::Iea => &self.iea,
            RecordField::Names => &self.names,
            RecordField::Age => &self.age,
            RecordField::Ci => &self.ci,
            RecordField::Nh => &self.nh,
            RecordField::Phone => &self.phone,
            RecordField::Diagnosis => &self.diagnosis,
            RecordField::Plan => &self.plan,
            RecordField::Specialist => &self.specialist,
            RecordField::Comment => &self.comment,
            RecordField::Completed => return None,
        };
        Some(value.as_str())
    }

    fn text_mut(&mut self, field: RecordField) -> Option<&mut String> {
        let value = match field {
            RecordField::Iea => &mut self.iea,
            RecordField::Names => &mut self.names,
            RecordField::Age => &mut self.age,
            RecordField::Ci => &mut self.ci,
            RecordField::Nh => &mut self.nh,
            RecordField::Phone => &mut self.phone,
            RecordField::Diagnosis => &mut self.diagnosis,
            RecordField::Plan => &mut self.plan,
            RecordField::Specialist => &mut self.specialist,
            RecordField::Comment => &mut self.comment,
            RecordField::Completed => return None,
        };
        Some(value)
    }

    /// Overwrite a field. Returns false when the value kind does not fit the
    /// field (text into `completed`, flag into a text field).
    pub fn set(&mut self, field: RecordField, value: FieldValue) -> bool {
        match (field, value) {
            (RecordField::Completed, FieldValue::Flag(flag)) => {
                self.completed = flag;
                true
            }
            (field, FieldValue::Text(text)) => match self.text_mut(field) {
                Some(slot) => {
                    *slot = text;
                    true
                }
                None => false,
            },
            (_, FieldValue::Flag(_)) => false,
        }
    }
}
