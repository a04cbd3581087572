use std::ops::Range;

use crate::parsing::patterns::{PatternRegistry, StylePattern};

use super::types::{StyleKind, StyleSplit};

/// Splits `text` around its earliest style construct.
///
/// Every style pattern is searched; the match starting first wins and ties
/// go to the pattern listed first in the registry. Returns
/// [`StyleSplit::plain`] when nothing matches.
pub fn find_split<'a>(registry: &PatternRegistry, text: &'a str) -> StyleSplit<'a> {
    SplitScanner::new(registry, text).split_at(0)
}

/// A pattern match, as byte ranges into the scanned text.
#[derive(Debug, Clone)]
struct Hit {
    whole: Range<usize>,
    inner: Range<usize>,
    target: Option<Range<usize>>,
}

/// Repeated [`find_split`] over successive suffixes of one text.
///
/// Each pattern's last result is kept and the pattern is only searched again
/// once the cursor has moved past the start of its match. A pattern that
/// found nothing stays silent for the rest of the text, so walking a line
/// costs one search per construct instead of one per pattern per construct.
pub struct SplitScanner<'r, 'a> {
    registry: &'r PatternRegistry,
    text: &'a str,
    /// `None` until searched; `Some(None)` when the pattern has no match.
    found: Vec<Option<Option<Hit>>>,
}

impl<'r, 'a> SplitScanner<'r, 'a> {
    pub fn new(registry: &'r PatternRegistry, text: &'a str) -> Self {
        Self {
            registry,
            text,
            found: vec![None; registry.style_patterns().len()],
        }
    }

    /// Same result as `find_split(registry, &text[offset..])`.
    ///
    /// `offset` must not decrease between calls.
    pub fn split_at(&mut self, offset: usize) -> StyleSplit<'a> {
        let text = self.text;
        let rest = &text[offset..];
        // A suffix has no character before it, so star-sensitive patterns
        // may now accept a candidate at `offset` they rejected before.
        let after_star = text[..offset].ends_with('*');

        let mut best: Option<(StyleKind, Hit)> = None;
        for (pattern, found) in self.registry.style_patterns().iter().zip(&mut self.found) {
            let stale = match found {
                None => true,
                Some(Some(hit)) => hit.whole.start < offset,
                Some(None) => false,
            };
            if stale || (after_star && pattern.rejects_after_star()) {
                *found = Some(Self::search(pattern, rest, offset));
            }

            let Some(Some(hit)) = found else {
                continue;
            };
            if best
                .as_ref()
                .is_some_and(|(_, b)| hit.whole.start >= b.whole.start)
            {
                continue;
            }
            best = Some((pattern.kind, hit.clone()));
        }

        match best {
            Some((kind, hit)) => StyleSplit {
                kind,
                before: &text[offset..hit.whole.start],
                inner: &text[hit.inner],
                target: hit.target.map(|range| &text[range]),
                after: &text[hit.whole.end..],
            },
            None => StyleSplit::plain(rest),
        }
    }

    fn search(pattern: &StylePattern, rest: &str, offset: usize) -> Option<Hit> {
        let caps = pattern.find(rest)?;
        let whole = caps.get(0)?.range();
        let shift = |r: Range<usize>| r.start + offset..r.end + offset;
        let group = |i: usize| caps.get(i).map_or(whole.end..whole.end, |m| m.range());
        let target = matches!(pattern.kind, StyleKind::Image | StyleKind::Link)
            .then(|| shift(group(2)));
        Some(Hit {
            inner: shift(group(1)),
            target,
            whole: shift(whole),
        })
    }
}
