use crate::parsing::patterns::PatternRegistry;

use super::types::{BlockKind, BlockMatch};

/// Classifies single lines against the ordered block patterns.
///
/// Classification only looks at the line itself; deciding which lines
/// belong together is the reconstructor's job.
#[derive(Clone, Copy)]
pub struct BlockClassifier<'r> {
    registry: &'r PatternRegistry,
}

impl<'r> BlockClassifier<'r> {
    pub fn new(registry: &'r PatternRegistry) -> Self {
        Self { registry }
    }

    /// Returns the first matching block kind and its captures.
    ///
    /// Total: the catch-all pattern accepts every line, the empty one included.
    pub fn classify<'l>(&self, line: &'l str) -> BlockMatch<'l> {
        self.registry
            .block_patterns()
            .iter()
            .find_map(|pattern| {
                pattern.captures(line).map(|captures| BlockMatch {
                    kind: pattern.kind,
                    captures,
                })
            })
            .unwrap_or_else(|| BlockMatch {
                kind: BlockKind::PlainText,
                captures: vec![line],
            })
    }

    /// Re-tests `line` against one specific kind.
    pub fn classify_as<'l>(&self, line: &'l str, kind: BlockKind) -> Option<BlockMatch<'l>> {
        let pattern = self.registry.block_pattern(kind)?;
        pattern
            .captures(line)
            .map(|captures| BlockMatch { kind, captures })
    }

    /// Forces a list reading of `line`: ordered first, then unordered.
    ///
    /// Used for indented list items that otherwise classify as code.
    pub fn classify_as_list<'l>(&self, line: &'l str) -> Option<BlockMatch<'l>> {
        self.classify_as(line, BlockKind::OrderedList)
            .or_else(|| self.classify_as(line, BlockKind::UnorderedList))
    }
}
