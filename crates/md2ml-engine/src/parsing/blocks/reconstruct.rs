use super::classify::BlockClassifier;
use super::kinds::{BlockQuote, Paragraph};
use super::types::{BlockKind, BlockMatch, ReconstructedBlock};

/// Folds continuation lines into the block opened by the first line.
#[derive(Clone, Copy)]
pub struct BlockReconstructor<'r> {
    classifier: BlockClassifier<'r>,
    soft_break: &'r str,
}

impl<'r> BlockReconstructor<'r> {
    /// `soft_break` is placed between joined paragraph lines.
    pub fn new(classifier: BlockClassifier<'r>, soft_break: &'r str) -> Self {
        Self {
            classifier,
            soft_break,
        }
    }

    /// Rebuilds the block starting at `lines[0]`, already classified as `first`.
    ///
    /// Never consumes the empty line that ends a block, and always consumes
    /// at least the first line. Returns `None` only for an empty slice.
    pub fn reconstruct(&self, first: &BlockMatch<'_>, lines: &[&str]) -> Option<ReconstructedBlock> {
        let (&first_line, rest) = lines.split_first()?;
        let kind = first.kind;

        let mut text = Self::line_text(kind, first_line).to_string();
        if first_line.is_empty() || kind.is_single_line() {
            return Some(ReconstructedBlock {
                kind,
                text,
                lines_consumed: 1,
            });
        }

        let separator = if kind.joins_with_newline() {
            "\n"
        } else {
            self.soft_break
        };

        let mut previous = first_line;
        let folded = rest
            .iter()
            .take_while(|&&next| {
                let continues = !next.is_empty() && self.continues(kind, previous, next);
                previous = next;
                continues
            })
            .fold(0usize, |count, &next| {
                text.push_str(separator);
                text.push_str(Self::line_text(kind, next));
                count + 1
            });

        Some(ReconstructedBlock {
            kind,
            text,
            lines_consumed: 1 + folded,
        })
    }

    fn line_text(kind: BlockKind, line: &str) -> &str {
        match kind {
            BlockKind::Quote => BlockQuote::content(line),
            _ => line,
        }
    }

    /// Whether `next` extends a block of `kind` whose last line was `previous`.
    fn continues(&self, kind: BlockKind, previous: &str, next: &str) -> bool {
        let next_kind = self.classifier.classify(next).kind;
        match kind {
            BlockKind::Table => matches!(next_kind, BlockKind::Table | BlockKind::TableSeparator),
            BlockKind::Quote => matches!(next_kind, BlockKind::Quote | BlockKind::PlainText),
            BlockKind::OrderedList | BlockKind::UnorderedList => {
                next_kind.is_list()
                    || (next_kind == BlockKind::CodeBlock
                        && self.classifier.classify_as_list(next).is_some())
            }
            BlockKind::PlainText => {
                !Paragraph::ends_with_hard_break(previous) && next_kind == BlockKind::PlainText
            }
            other => next_kind == other,
        }
    }
}
