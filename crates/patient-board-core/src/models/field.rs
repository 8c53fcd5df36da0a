//! Editable field names and values.

use std::fmt;
use std::str::FromStr;

/// The closed set of fields a view may write back to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    Iea,
    Names,
    Age,
    Ci,
    Nh,
    Phone,
    Diagnosis,
    Plan,
    Specialist,
    Comment,
    Completed,
}

/// How a field is presented, which drives auto-sizing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Date,
    SingleLine,
    MultiLine,
    Checkbox,
}

impl RecordField {
    /// Every field, in row display order.
    pub const ALL: [RecordField; 11] = [
        RecordField::Iea,
        RecordField::Names,
        RecordField::Age,
        RecordField::Ci,
        RecordField::Nh,
        RecordField::Phone,
        RecordField::Diagnosis,
        RecordField::Plan,
        RecordField::Specialist,
        RecordField::Comment,
        RecordField::Completed,
    ];

    /// The field that receives focus after a row is added.
    pub const FIRST_EDITABLE: RecordField = RecordField::Iea;

    /// Wire name, as used by the dispatch table and the rendered markup.
    pub fn as_str(&self) -> &'static str {
        match self {
            RecordField::Iea => "iea",
            RecordField::Names => "names",
            RecordField::Age => "age",
            RecordField::Ci => "ci",
            RecordField::Nh => "nh",
            RecordField::Phone => "phone",
            RecordField::Diagnosis => "diagnosis",
            RecordField::Plan => "plan",
            RecordField::Specialist => "specialist",
            RecordField::Comment => "comment",
            RecordField::Completed => "completed",
        }
    }

    pub fn kind(&self) -> FieldKind {
        match self {
            RecordField::Iea => FieldKind::Date,
            RecordField::Diagnosis | RecordField::Plan | RecordField::Comment => {
                FieldKind::MultiLine
            }
            RecordField::Completed => FieldKind::Checkbox,
            _ => FieldKind::SingleLine,
        }
    }

    /// Whether the live casing transform applies while typing.
    pub fn takes_casing(&self) -> bool {
        matches!(self.kind(), FieldKind::SingleLine | FieldKind::MultiLine)
    }
}

impl fmt::Display for RecordField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown field name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown field: {0}")]
pub struct UnknownField(pub String);

impl FromStr for RecordField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RecordField::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// A value written into a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Flag(bool),
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field_names() {
        for field in RecordField::ALL {
            assert_eq!(field.as_str().parse::<RecordField>(), Ok(field));
        }
        assert_eq!(
            "Names".parse::<RecordField>(),
            Err(UnknownField("Names".into()))
        );
    }

    #[test]
    fn test_field_kinds() {
        assert_eq!(RecordField::Iea.kind(), FieldKind::Date);
        assert_eq!(RecordField::Names.kind(), FieldKind::SingleLine);
        assert_eq!(RecordField::Plan.kind(), FieldKind::MultiLine);
        assert_eq!(RecordField::Completed.kind(), FieldKind::Checkbox);
        assert!(!RecordField::Iea.takes_casing());
        assert!(RecordField::Comment.takes_casing());
    }
}
