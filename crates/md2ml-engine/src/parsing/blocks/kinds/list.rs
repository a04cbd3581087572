use crate::parsing::blocks::types::{BlockKind, BlockMatch};

/// Ordered and unordered list items.
pub struct List;

/// One list line, ready to hand to the sink.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem<'a> {
    pub level: usize,
    pub ordered: bool,
    pub text: &'a str,
}

impl List {
    /// Number of leading spaces per nesting level.
    pub const INDENT_WIDTH: usize = 3;

    /// Nesting level of an item with the given leading indentation.
    pub fn level(indent: &str) -> usize {
        indent.len() / Self::INDENT_WIDTH
    }

    /// Builds an item from a list-kind match. Returns `None` for other kinds.
    pub fn item<'a>(m: &BlockMatch<'a>) -> Option<ListItem<'a>> {
        if !m.kind.is_list() {
            return None;
        }
        Some(ListItem {
            level: Self::level(m.capture(0)),
            ordered: m.kind == BlockKind::OrderedList,
            text: m.capture(1),
        })
    }
}
