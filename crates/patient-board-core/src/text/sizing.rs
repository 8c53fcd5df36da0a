//! Presentation-only sizing for editable cells.

use serde::{Deserialize, Serialize};

use crate::models::FieldKind;

/// Limits used when growing a cell to fit its content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SizingPolicy {
    /// Cap for multi-line cells, in pixels
    pub multiline_max_height_px: u32,
    pub single_line_min_width_px: u32,
    pub single_line_max_width_px: u32,
    /// Approximate advance of one character
    pub char_width_px: u32,
}

impl Default for SizingPolicy {
    fn default() -> Self {
        Self {
            multiline_max_height_px: 400,
            single_line_min_width_px: 60,
            single_line_max_width_px: 300,
            char_width_px: 8,
        }
    }
}

/// Size a view should apply to a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSize {
    /// Multi-line cells grow downward
    Height(u32),
    /// Single-line cells grow sideways
    Width(u32),
    /// Date pickers and checkboxes keep their natural size
    Natural,
}

impl SizingPolicy {
    /// Width for a single-line cell holding `value`.
    ///
    /// One spare character is reserved for the caret.
    pub fn single_line_width(&self, value: &str) -> u32 {
        let chars = value.chars().count() as u32;
        let approx = chars.saturating_add(1).saturating_mul(self.char_width_px);
        approx.clamp(
            self.single_line_min_width_px,
            self.single_line_max_width_px.max(self.single_line_min_width_px),
        )
    }

    /// Height for a multi-line cell whose content measures `content_height_px`.
    pub fn multiline_height(&self, content_height_px: u32) -> u32 {
        content_height_px.min(self.multiline_max_height_px)
    }

    /// Size a cell. `content_height_px` is the host-measured scroll height and
    /// only matters for multi-line cells.
    pub fn auto_size(&self, kind: FieldKind, value: &str, content_height_px: u32) -> FieldSize {
        match kind {
            FieldKind::MultiLine => FieldSize::Height(self.multiline_height(content_height_px)),
            FieldKind::SingleLine => FieldSize::Width(self.single_line_width(value)),
            FieldKind::Date | FieldKind::Checkbox => FieldSize::Natural,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_line_bounds() {
        let policy = SizingPolicy::default();
        assert_eq!(policy.single_line_width(""), 60);
        assert_eq!(policy.single_line_width("abcdefghij"), 88);
        assert_eq!(policy.single_line_width(&"x".repeat(100)), 300);
    }

    #[test]
    fn test_width_counts_chars_not_bytes() {
        let policy = SizingPolicy::default();
        assert_eq!(
            policy.single_line_width("ñññññññññ"),
            policy.single_line_width("nnnnnnnnn")
        );
    }

    #[test]
    fn test_multiline_cap() {
        let policy = SizingPolicy::default();
        assert_eq!(policy.auto_size(FieldKind::MultiLine, "", 120), FieldSize::Height(120));
        assert_eq!(policy.auto_size(FieldKind::MultiLine, "", 900), FieldSize::Height(400));
    }

    #[test]
    fn test_natural_kinds() {
        let policy = SizingPolicy::default();
        assert_eq!(policy.auto_size(FieldKind::Date, "2024-01-15", 0), FieldSize::Natural);
        assert_eq!(policy.auto_size(FieldKind::Checkbox, "", 0), FieldSize::Natural);
    }
}
