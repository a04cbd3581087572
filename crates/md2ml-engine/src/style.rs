//! Run- and cell-level formatting attributes handed to the document sink.

use serde::Serialize;

/// Underline mode of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Underline {
    #[default]
    None,
    Single,
}

/// Vertical placement of a run relative to the baseline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum VerticalPosition {
    #[default]
    Baseline,
    Superscript,
    Subscript,
}

/// A 24-bit RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    /// Formats the colour as `#RRGGBB`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Formatting applied to a single text run.
///
/// The default value is plain text: every flag off, no font or colour
/// overrides, baseline position.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunStyle {
    pub bold: bool,
    pub italic: bool,
    pub underline: Underline,
    pub strikeout: bool,
    pub code_style: bool,
    pub font_name: Option<String>,
    pub font_size: Option<String>,
    pub color: Option<Rgb>,
    pub vertical_position: VerticalPosition,
}

impl RunStyle {
    /// Returns true if no attribute differs from the plain default.
    #[must_use]
    pub fn is_plain(&self) -> bool {
        *self == Self::default()
    }

    /// Short human-readable list of the active attributes, e.g. `bold+italic`.
    ///
    /// Returns `plain` when nothing is set. Font, size and colour overrides
    /// are not included.
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if self.bold {
            parts.push("bold");
        }
        if self.italic {
            parts.push("italic");
        }
        if self.underline == Underline::Single {
            parts.push("underline");
        }
        if self.strikeout {
            parts.push("strike");
        }
        if self.code_style {
            parts.push("code");
        }
        match self.vertical_position {
            VerticalPosition::Baseline => {}
            VerticalPosition::Superscript => parts.push("sup"),
            VerticalPosition::Subscript => parts.push("sub"),
        }
        if parts.is_empty() {
            "plain".to_string()
        } else {
            parts.join("+")
        }
    }
}

/// Horizontal alignment of a table column.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
}
