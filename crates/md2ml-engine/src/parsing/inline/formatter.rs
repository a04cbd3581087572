use crate::error::ConvertError;
use crate::io::ImageResolver;
use crate::parsing::patterns::PatternRegistry;
use crate::sink::DocumentSink;
use crate::style::RunStyle;

use super::split::SplitScanner;
use super::types::StyleKind;

/// Turns block text into styled runs on a sink.
///
/// Text is consumed left to right: the prefix before the earliest construct
/// is a run in the surrounding style, the construct's content is formatted
/// again with the derived style, and the remainder is searched next.
#[derive(Clone, Copy)]
pub struct InlineFormatter<'r> {
    registry: &'r PatternRegistry,
    resolver: &'r dyn ImageResolver,
}

impl<'r> InlineFormatter<'r> {
    pub fn new(registry: &'r PatternRegistry, resolver: &'r dyn ImageResolver) -> Self {
        Self { registry, resolver }
    }

    pub fn format(
        &self,
        text: &str,
        base: &RunStyle,
        sink: &mut dyn DocumentSink,
    ) -> Result<(), ConvertError> {
        let mut scanner = SplitScanner::new(self.registry, text);
        let mut offset = 0;
        loop {
            let split = scanner.split_at(offset);
            if split.kind == StyleKind::PlainText {
                return Self::write(split.inner, base, sink);
            }
            log::trace!(
                "{:?} split: {:?} | {:?} | {:?}",
                split.kind,
                split.before,
                split.inner,
                split.after
            );

            Self::write(split.before, base, sink)?;
            match split.kind {
                StyleKind::Image => {
                    let source = self.resolver.resolve(split.target.unwrap_or_default())?;
                    sink.insert_inline_image(&source)?;
                }
                StyleKind::Link => {
                    sink.write_link(split.inner, split.target.unwrap_or_default(), base)?;
                }
                StyleKind::Tab => sink.insert_tab(base)?,
                kind => self.format(split.inner, &kind.apply(base), sink)?,
            }
            offset = text.len() - split.after.len();
        }
    }

    fn write(text: &str, style: &RunStyle, sink: &mut dyn DocumentSink) -> Result<(), ConvertError> {
        if !text.is_empty() {
            sink.write_run(text, style)?;
        }
        Ok(())
    }
}
