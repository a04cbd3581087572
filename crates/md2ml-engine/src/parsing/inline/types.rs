use crate::style::{RunStyle, Underline};

/// Inline construct recognised inside a block's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StyleKind {
    Bold,
    Italic,
    BoldItalic,
    Image,
    Link,
    Code,
    Tab,
    Strikethrough,
    Underline,
    /// No construct found; the whole text is a plain run.
    PlainText,
}

impl StyleKind {
    /// Derives the style of the matched span from the surrounding style.
    ///
    /// Kinds that are not rendered as styled runs (images, links, tabs,
    /// plain text) return `base` unchanged.
    pub fn apply(self, base: &RunStyle) -> RunStyle {
        let mut style = base.clone();
        match self {
            StyleKind::Bold => style.bold = true,
            StyleKind::Italic => style.italic = true,
            StyleKind::BoldItalic => {
                style.bold = true;
                style.italic = true;
            }
            StyleKind::Code => style.code_style = true,
            StyleKind::Strikethrough => style.strikeout = true,
            StyleKind::Underline => style.underline = Underline::Single,
            StyleKind::Image | StyleKind::Link | StyleKind::Tab | StyleKind::PlainText => {}
        }
        style
    }
}

/// One application of the style search to a text span.
///
/// `before` and `after` are reprocessed by the formatter; `inner` is the
/// captured content of the construct (link text, image alt text, or the
/// delimited text for styled spans). `target` is set for links and images.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSplit<'a> {
    pub kind: StyleKind,
    pub before: &'a str,
    pub inner: &'a str,
    pub target: Option<&'a str>,
    pub after: &'a str,
}

impl<'a> StyleSplit<'a> {
    /// The split used when no construct matches.
    pub fn plain(text: &'a str) -> Self {
        Self {
            kind: StyleKind::PlainText,
            before: "",
            inner: text,
            target: None,
            after: "",
        }
    }
}
