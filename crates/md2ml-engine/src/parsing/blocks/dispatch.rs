use crate::error::ConvertError;
use crate::io::ImageResolver;
use crate::parsing::inline::InlineFormatter;
use crate::sink::DocumentSink;
use crate::style::RunStyle;

use super::classify::BlockClassifier;
use super::kinds::{Heading, List, TableShape};
use super::types::{BlockKind, ReconstructedBlock};

/// Emits the sink commands for one reconstructed block.
pub struct BlockDispatcher<'r> {
    classifier: BlockClassifier<'r>,
    formatter: InlineFormatter<'r>,
    resolver: &'r dyn ImageResolver,
    skip_blank_lines: bool,
}

impl<'r> BlockDispatcher<'r> {
    pub fn new(
        classifier: BlockClassifier<'r>,
        formatter: InlineFormatter<'r>,
        resolver: &'r dyn ImageResolver,
    ) -> Self {
        Self {
            classifier,
            formatter,
            resolver,
            skip_blank_lines: false,
        }
    }

    /// Drop blank paragraphs instead of emitting them empty.
    pub fn skip_blank_lines(mut self, skip: bool) -> Self {
        self.skip_blank_lines = skip;
        self
    }

    pub fn dispatch(
        &self,
        block: &ReconstructedBlock,
        sink: &mut dyn DocumentSink,
    ) -> Result<(), ConvertError> {
        log::debug!(
            "Dispatching {:?} block ({} lines)",
            block.kind,
            block.lines_consumed
        );
        let plain = RunStyle::default();

        match block.kind {
            BlockKind::Heading => {
                let heading = self.classifier.classify_as(&block.text, BlockKind::Heading);
                let (level, title) = match heading {
                    Some(m) => (Heading::level(m.capture(0)), m.capture(1)),
                    None => (1, block.text.as_str()),
                };
                sink.create_heading(level, title)?;
                self.formatter.format(title, &plain, sink)
            }
            BlockKind::Image => {
                let target = self
                    .classifier
                    .classify_as(&block.text, BlockKind::Image)
                    .map_or("", |m| m.capture(1));
                let source = self.resolver.resolve(target)?;
                sink.insert_image(&source)?;
                Ok(())
            }
            BlockKind::Table => self.dispatch_table(&block.text, sink),
            BlockKind::OrderedList | BlockKind::UnorderedList => {
                for line in block.text.split('\n') {
                    let item = self
                        .classifier
                        .classify_as_list(line)
                        .as_ref()
                        .and_then(List::item);
                    let Some(item) = item else {
                        log::warn!("Skipping unreadable list line {line:?}");
                        continue;
                    };
                    sink.add_list_item(item.level, item.ordered, item.text)?;
                    self.formatter.format(item.text, &plain, sink)?;
                }
                Ok(())
            }
            BlockKind::CodeBlock => {
                sink.create_code_block(&block.text)?;
                self.formatter.format(&block.text, &plain, sink)
            }
            BlockKind::Quote => {
                for line in block.text.split('\n') {
                    sink.append_quote_line(line)?;
                    self.formatter.format(line, &plain, sink)?;
                }
                Ok(())
            }
            BlockKind::PlainText
            | BlockKind::TableSeparator
            | BlockKind::RequirementTitle
            | BlockKind::RequirementProperty(_) => {
                if block.text.is_empty() && self.skip_blank_lines {
                    return Ok(());
                }
                sink.create_paragraph()?;
                self.formatter.format(&block.text, &plain, sink)
            }
        }
    }

    fn dispatch_table(&self, text: &str, sink: &mut dyn DocumentSink) -> Result<(), ConvertError> {
        let shape = TableShape::parse(text, &self.classifier);
        sink.create_table(shape.column_count())?;
        sink.add_row(&shape.header, None)?;

        if !shape.well_formed {
            log::warn!(
                "Table {:?} has no header separator, data rows dropped",
                shape.header
            );
            return Ok(());
        }

        for row in &shape.rows {
            let alignments = shape.alignments_for(row.len());
            sink.add_row(row, Some(&alignments))?;
        }
        Ok(())
    }
}
