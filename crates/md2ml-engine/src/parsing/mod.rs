pub mod blocks;
pub mod inline;
pub mod lines;
pub mod patterns;

#[cfg(test)]
mod tests;

use crate::error::ConvertError;
use crate::io::ImageResolver;
use crate::sink::DocumentSink;

use blocks::{BlockClassifier, BlockDispatcher, BlockReconstructor, ReconstructedBlock};
use inline::InlineFormatter;
use lines::split_lines;
use patterns::PatternRegistry;

/// Knobs that change how blocks are reconstructed and dispatched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseOptions {
    /// Separator placed between soft-wrapped paragraph lines.
    pub soft_break: String,
    /// Drop blank lines instead of emitting empty paragraphs.
    pub skip_blank_lines: bool,
}

/// Counters for one conversion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertStats {
    pub blocks: usize,
    pub lines: usize,
}

/// Drives the classify, reconstruct, dispatch loop over a document.
pub struct Converter<'r> {
    registry: &'r PatternRegistry,
    options: &'r ParseOptions,
}

impl<'r> Converter<'r> {
    pub fn new(registry: &'r PatternRegistry, options: &'r ParseOptions) -> Self {
        Self { registry, options }
    }

    fn reconstructor(&self) -> BlockReconstructor<'r> {
        BlockReconstructor::new(BlockClassifier::new(self.registry), &self.options.soft_break)
    }

    /// Splits `markdown` into its logical blocks without dispatching them.
    pub fn reconstruct_all(&self, markdown: &str) -> Vec<ReconstructedBlock> {
        let classifier = BlockClassifier::new(self.registry);
        let reconstructor = self.reconstructor();
        let lines = split_lines(markdown);

        let mut blocks = Vec::new();
        let mut remaining = lines.as_slice();
        while let Some(&first_line) = remaining.first() {
            let first = classifier.classify(first_line);
            let Some(block) = reconstructor.reconstruct(&first, remaining) else {
                break;
            };
            remaining = &remaining[block.lines_consumed..];
            blocks.push(block);
        }
        blocks
    }

    /// Converts `markdown`, issuing every command to `sink` in document order.
    ///
    /// Stops at the first unresolvable image or sink failure.
    pub fn convert(
        &self,
        markdown: &str,
        sink: &mut dyn DocumentSink,
        resolver: &dyn ImageResolver,
    ) -> Result<ConvertStats, ConvertError> {
        let classifier = BlockClassifier::new(self.registry);
        let formatter = InlineFormatter::new(self.registry, resolver);
        let dispatcher = BlockDispatcher::new(classifier, formatter, resolver)
            .skip_blank_lines(self.options.skip_blank_lines);

        let mut stats = ConvertStats::default();
        for block in self.reconstruct_all(markdown) {
            dispatcher.dispatch(&block, sink)?;
            stats.blocks += 1;
            stats.lines += block.lines_consumed;
        }
        log::debug!(
            "Converted {} lines into {} blocks",
            stats.lines,
            stats.blocks
        );
        Ok(stats)
    }
}

/// Convenience: converts with a fresh registry.
pub fn convert(
    markdown: &str,
    options: &ParseOptions,
    sink: &mut dyn DocumentSink,
    resolver: &dyn ImageResolver,
) -> Result<ConvertStats, ConvertError> {
    let registry = PatternRegistry::new();
    Converter::new(&registry, options).convert(markdown, sink, resolver)
}
