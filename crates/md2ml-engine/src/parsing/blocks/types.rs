/// Which delimiter introduced a requirement property line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PropertyMarker {
    /// `@key: value`
    At,
    /// `%key: value`
    Percent,
}

/// The kind of a line, and of the block that line opens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// `#`-prefixed heading. Any number of `#` is accepted.
    Heading,
    /// A line holding a single `![alt](target)` image.
    Image,
    /// A table row (any line with two pipes).
    Table,
    /// A table header separator such as `|:--|--:|`.
    TableSeparator,
    /// A `>`-prefixed quote line.
    Quote,
    /// `-`, `+` or `*` list item.
    UnorderedList,
    /// `1.` list item.
    OrderedList,
    /// A line indented by four spaces or a tab.
    CodeBlock,
    /// `[XX-YY-REQ-123]title`
    RequirementTitle,
    /// `@key: value` or `%key: value`
    RequirementProperty(PropertyMarker),
    /// Catch-all; matches every line including the empty one.
    PlainText,
}

impl BlockKind {
    /// True for both list kinds.
    pub fn is_list(self) -> bool {
        matches!(self, BlockKind::OrderedList | BlockKind::UnorderedList)
    }

    /// Kinds whose block is always exactly one physical line.
    pub fn is_single_line(self) -> bool {
        matches!(self, BlockKind::Heading | BlockKind::Image)
    }

    /// Whether continuation lines are joined with `\n` (structured blocks)
    /// rather than the soft-break separator (paragraph prose).
    pub fn joins_with_newline(self) -> bool {
        !matches!(self, BlockKind::PlainText)
    }
}

/// A classified line: the kind plus the kind-specific capture groups.
///
/// Capture layout per kind:
///
/// | kind | 0 | 1 |
/// |---|---|---|
/// | Heading | marker run (`## `) | title |
/// | CodeBlock | indent | content |
/// | Image | alt text | target |
/// | OrderedList / UnorderedList | leading spaces | item text |
/// | Quote | `>` run | content |
/// | TableSeparator | the row | |
/// | Table | inner text | |
/// | RequirementTitle | `[ID]` | title |
/// | RequirementProperty | `@key:` | value |
/// | PlainText | the line | |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockMatch<'a> {
    pub kind: BlockKind,
    pub captures: Vec<&'a str>,
}

impl<'a> BlockMatch<'a> {
    /// Returns capture `index`, or `""` when the group did not participate.
    pub fn capture(&self, index: usize) -> &'a str {
        self.captures.get(index).copied().unwrap_or("")
    }
}

/// One logical block rebuilt from one or more physical lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReconstructedBlock {
    pub kind: BlockKind,
    /// The block text; continuation lines are already joined.
    pub text: String,
    /// Exact number of physical lines folded into `text` (always >= 1).
    pub lines_consumed: usize,
}
