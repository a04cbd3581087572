//! # Pattern Registry
//!
//! The two ordered matcher tables driving recognition:
//!
//! - **block patterns**, tried against a whole line in priority order; the
//!   last entry is a catch-all so classification never fails
//! - **style patterns**, searched for inside block text; the formatter picks
//!   the earliest-starting match and breaks ties by table order
//!
//! The registry is built once and passed by reference to the classifier and
//! the formatter. It is never mutated after construction.

use regex::{Captures, Regex};

use super::blocks::{BlockKind, PropertyMarker};
use super::inline::StyleKind;

/// A block kind and the line matcher that recognises it.
pub struct BlockPattern {
    pub kind: BlockKind,
    regex: Regex,
}

impl BlockPattern {
    fn new(kind: BlockKind, pattern: &str) -> Self {
        Self {
            kind,
            regex: Regex::new(pattern).expect("Invalid block pattern"),
        }
    }

    /// Matches `line`, returning capture groups 1.. in order.
    ///
    /// Groups that did not participate are returned as `""`.
    pub fn captures<'l>(&self, line: &'l str) -> Option<Vec<&'l str>> {
        let caps = self.regex.captures(line)?;
        Some(
            (1..caps.len())
                .map(|i| caps.get(i).map_or("", |m| m.as_str()))
                .collect(),
        )
    }
}

/// A style kind and the inline matcher that recognises it.
pub struct StylePattern {
    pub kind: StyleKind,
    regex: Regex,
    /// Reject candidates immediately preceded by `*`.
    ///
    /// Stands in for a `(?<!\*)` look-behind, which the `regex` crate does
    /// not support.
    not_after_star: bool,
}

impl StylePattern {
    fn new(kind: StyleKind, pattern: &str) -> Self {
        Self {
            kind,
            regex: Regex::new(pattern).expect("Invalid style pattern"),
            not_after_star: false,
        }
    }

    fn not_after_star(mut self) -> Self {
        self.not_after_star = true;
        self
    }

    pub fn rejects_after_star(&self) -> bool {
        self.not_after_star
    }

    /// Finds the leftmost match in `text`.
    pub fn find<'t>(&self, text: &'t str) -> Option<Captures<'t>> {
        let mut at = 0;
        while at <= text.len() {
            let caps = self.regex.captures_at(text, at)?;
            let start = caps.get(0)?.start();
            if self.not_after_star && text[..start].ends_with('*') {
                // Resume one character later, as a failed look-behind would.
                at = start + text[start..].chars().next().map_or(1, char::len_utf8);
                continue;
            }
            return Some(caps);
        }
        None
    }
}

/// Immutable, ordered block and style matcher tables.
pub struct PatternRegistry {
    blocks: Vec<BlockPattern>,
    styles: Vec<StylePattern>,
}

impl PatternRegistry {
    pub fn new() -> Self {
        let blocks = vec![
            BlockPattern::new(BlockKind::Heading, r"^(#+[\s|#]+)(.*)"),
            BlockPattern::new(BlockKind::CodeBlock, r"^( {4}|\t)(.*)"),
            BlockPattern::new(BlockKind::Image, r"^!\[([\w|\s]*)\]\(([\w|\S]*)\) *$"),
            BlockPattern::new(BlockKind::OrderedList, r"^( *)\d+\. (.*)"),
            BlockPattern::new(BlockKind::UnorderedList, r"^( *)[*+-] (.*)"),
            BlockPattern::new(BlockKind::Quote, r"^(>+)(.*)"),
            BlockPattern::new(BlockKind::TableSeparator, r"^(\|\W+\|)"),
            BlockPattern::new(BlockKind::Table, r"\|(.*)\|"),
            BlockPattern::new(
                BlockKind::RequirementTitle,
                r"^(\[\w+-\w+-REQ-\d+\])([\w|\s]+)",
            ),
            BlockPattern::new(
                BlockKind::RequirementProperty(PropertyMarker::At),
                r"^(@[\w|\s]+:)(.+)",
            ),
            BlockPattern::new(
                BlockKind::RequirementProperty(PropertyMarker::Percent),
                r"^(%[\w|\s]+:)(.+)",
            ),
            BlockPattern::new(BlockKind::PlainText, r"(.*)"),
        ];

        let styles = vec![
            StylePattern::new(StyleKind::Bold, r"\*\*([^*].+?)\*\*").not_after_star(),
            StylePattern::new(StyleKind::Italic, r"\*([^*].+?)\*").not_after_star(),
            StylePattern::new(StyleKind::BoldItalic, r"\*\*\*([^*].+?)\*\*\*").not_after_star(),
            StylePattern::new(StyleKind::Image, r"!\[([\w|\s]*)\]\(([\w|\S]*)\)"),
            StylePattern::new(StyleKind::Link, r"\[(.+?)\]\((.+)\)"),
            StylePattern::new(StyleKind::Code, r"`([^`]+)`"),
            StylePattern::new(StyleKind::Strikethrough, r"~~(.*)~{2,}"),
            StylePattern::new(StyleKind::Tab, r"\t"),
            StylePattern::new(StyleKind::Underline, r"__(.*)_{2,}"),
        ];

        Self { blocks, styles }
    }

    /// Block patterns, highest priority first. The last one is the catch-all.
    pub fn block_patterns(&self) -> &[BlockPattern] {
        &self.blocks
    }

    /// The pattern for one specific block kind.
    pub fn block_pattern(&self, kind: BlockKind) -> Option<&BlockPattern> {
        self.blocks.iter().find(|p| p.kind == kind)
    }

    /// Style patterns in tie-break order.
    pub fn style_patterns(&self) -> &[StylePattern] {
        &self.styles
    }
}

impl Default for PatternRegistry {
    fn default() -> Self {
        Self::new()
    }
}
