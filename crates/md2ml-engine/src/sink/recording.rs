use std::fmt;

use serde::Serialize;

use super::{DocumentSink, SinkError};
use crate::io::ImageSource;
use crate::style::{Alignment, RunStyle};

/// One command received by a [`RecordingSink`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum SinkCommand {
    Heading {
        level: u8,
        text: String,
    },
    Paragraph,
    CodeBlock {
        text: String,
    },
    Table {
        columns: usize,
    },
    Row {
        cells: Vec<String>,
        alignments: Option<Vec<Alignment>>,
    },
    ListItem {
        level: usize,
        ordered: bool,
        text: String,
    },
    QuoteLine {
        text: String,
    },
    Run {
        text: String,
        style: RunStyle,
    },
    Image {
        source: ImageSource,
    },
    InlineImage {
        source: ImageSource,
    },
    Link {
        text: String,
        target: String,
        style: RunStyle,
    },
    Tab {
        style: RunStyle,
    },
}

impl SinkCommand {
    /// True for commands that open a new block.
    pub fn opens_block(&self) -> bool {
        !matches!(
            self,
            SinkCommand::Run { .. }
                | SinkCommand::InlineImage { .. }
                | SinkCommand::Link { .. }
                | SinkCommand::Tab { .. }
                | SinkCommand::Row { .. }
        )
    }
}

impl fmt::Display for SinkCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkCommand::Heading { level, text } => write!(f, "heading({level}, {text:?})"),
            SinkCommand::Paragraph => write!(f, "paragraph"),
            SinkCommand::CodeBlock { text } => write!(f, "code_block({text:?})"),
            SinkCommand::Table { columns } => write!(f, "table({columns})"),
            SinkCommand::Row { cells, alignments } => match alignments {
                Some(alignments) => write!(f, "row({cells:?}, {alignments:?})"),
                None => write!(f, "row({cells:?})"),
            },
            SinkCommand::ListItem {
                level,
                ordered,
                text,
            } => {
                let marker = if *ordered { "ordered" } else { "unordered" };
                write!(f, "list_item({level}, {marker}, {text:?})")
            }
            SinkCommand::QuoteLine { text } => write!(f, "quote_line({text:?})"),
            SinkCommand::Run { text, style } => write!(f, "run({text:?}, {})", style.describe()),
            SinkCommand::Image { source } => write!(f, "image({source})"),
            SinkCommand::InlineImage { source } => write!(f, "inline_image({source})"),
            SinkCommand::Link {
                text,
                target,
                style,
            } => write!(f, "link({text:?}, {target:?}, {})", style.describe()),
            SinkCommand::Tab { style } => write!(f, "tab({})", style.describe()),
        }
    }
}

/// Sink that records every command in order.
///
/// Rejects commands that have nothing to attach to: runs before the first
/// block and rows outside a table.
#[derive(Debug, Default)]
pub struct RecordingSink {
    commands: Vec<SinkCommand>,
    has_block: bool,
    table_open: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[SinkCommand] {
        &self.commands
    }

    pub fn into_commands(self) -> Vec<SinkCommand> {
        self.commands
    }

    /// The command log, one command per line.
    pub fn render(&self) -> String {
        self.commands
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Every text run with its style, links and tabs included.
    pub fn runs(&self) -> Vec<(&str, &RunStyle)> {
        self.commands
            .iter()
            .filter_map(|c| match c {
                SinkCommand::Run { text, style } | SinkCommand::Link { text, style, .. } => {
                    Some((text.as_str(), style))
                }
                SinkCommand::Tab { style } => Some(("\t", style)),
                _ => None,
            })
            .collect()
    }

    /// Concatenated text of all runs.
    pub fn plain_text(&self) -> String {
        self.runs().into_iter().map(|(text, _)| text).collect()
    }

    fn open_block(&mut self, command: SinkCommand) -> Result<(), SinkError> {
        self.table_open = matches!(command, SinkCommand::Table { .. });
        self.has_block = true;
        self.commands.push(command);
        Ok(())
    }

    fn push_inline(&mut self, command: SinkCommand) -> Result<(), SinkError> {
        if !self.has_block {
            return Err(SinkError::InvalidState(format!(
                "{command} issued before any block"
            )));
        }
        self.commands.push(command);
        Ok(())
    }
}

impl DocumentSink for RecordingSink {
    fn create_heading(&mut self, level: u8, text: &str) -> Result<(), SinkError> {
        self.open_block(SinkCommand::Heading {
            level,
            text: text.to_string(),
        })
    }

    fn create_paragraph(&mut self) -> Result<(), SinkError> {
        self.open_block(SinkCommand::Paragraph)
    }

    fn create_code_block(&mut self, text: &str) -> Result<(), SinkError> {
        self.open_block(SinkCommand::CodeBlock {
            text: text.to_string(),
        })
    }

    fn create_table(&mut self, column_count: usize) -> Result<(), SinkError> {
        self.open_block(SinkCommand::Table {
            columns: column_count,
        })
    }

    fn add_row(
        &mut self,
        cells: &[String],
        alignments: Option<&[Alignment]>,
    ) -> Result<(), SinkError> {
        if !self.table_open {
            return Err(SinkError::InvalidState(
                "row added outside a table".to_string(),
            ));
        }
        self.commands.push(SinkCommand::Row {
            cells: cells.to_vec(),
            alignments: alignments.map(<[Alignment]>::to_vec),
        });
        Ok(())
    }

    fn add_list_item(
        &mut self,
        level: usize,
        ordered: bool,
        text: &str,
    ) -> Result<(), SinkError> {
        self.open_block(SinkCommand::ListItem {
            level,
            ordered,
            text: text.to_string(),
        })
    }

    fn append_quote_line(&mut self, text: &str) -> Result<(), SinkError> {
        self.open_block(SinkCommand::QuoteLine {
            text: text.to_string(),
        })
    }

    fn write_run(&mut self, text: &str, style: &RunStyle) -> Result<(), SinkError> {
        self.push_inline(SinkCommand::Run {
            text: text.to_string(),
            style: style.clone(),
        })
    }

    fn insert_image(&mut self, source: &ImageSource) -> Result<(), SinkError> {
        self.open_block(SinkCommand::Image {
            source: source.clone(),
        })
    }

    fn insert_inline_image(&mut self, source: &ImageSource) -> Result<(), SinkError> {
        self.push_inline(SinkCommand::InlineImage {
            source: source.clone(),
        })
    }

    fn write_link(&mut self, text: &str, target: &str, style: &RunStyle) -> Result<(), SinkError> {
        self.push_inline(SinkCommand::Link {
            text: text.to_string(),
            target: target.to_string(),
            style: style.clone(),
        })
    }

    fn insert_tab(&mut self, style: &RunStyle) -> Result<(), SinkError> {
        self.push_inline(SinkCommand::Tab {
            style: style.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use insta::assert_snapshot;
    use std::path::PathBuf;

    #[test]
    fn renders_one_command_per_line() {
        let mut sink = RecordingSink::new();
        let bold = RunStyle {
            bold: true,
            ..RunStyle::default()
        };
        sink.create_heading(2, "Intro").unwrap();
        sink.write_run("Intro", &RunStyle::default()).unwrap();
        sink.create_table(2).unwrap();
        sink.add_row(&["A".to_string(), "B".to_string()], None)
            .unwrap();
        sink.add_row(
            &["1".to_string(), "2".to_string()],
            Some(&[Alignment::Left, Alignment::Right]),
        )
        .unwrap();
        sink.add_list_item(1, true, "step").unwrap();
        sink.write_run("step", &bold).unwrap();
        sink.insert_image(&ImageSource::Local(PathBuf::from("img/a.png")))
            .unwrap();

        assert_snapshot!(sink.render(), @r#"
        heading(2, "Intro")
        run("Intro", plain)
        table(2)
        row(["A", "B"])
        row(["1", "2"], [Left, Right])
        list_item(1, ordered, "step")
        run("step", bold)
        image(img/a.png)
        "#);
    }

    #[test]
    fn run_before_any_block_is_rejected() {
        let mut sink = RecordingSink::new();
        let err = sink.write_run("orphan", &RunStyle::default()).unwrap_err();
        assert!(matches!(err, SinkError::InvalidState(_)));
    }

    #[test]
    fn row_outside_table_is_rejected() {
        let mut sink = RecordingSink::new();
        sink.create_paragraph().unwrap();
        let err = sink.add_row(&["x".to_string()], None).unwrap_err();
        assert!(matches!(err, SinkError::InvalidState(_)));
    }

    #[test]
    fn plain_text_includes_links_and_tabs() {
        let mut sink = RecordingSink::new();
        let style = RunStyle::default();
        sink.create_paragraph().unwrap();
        sink.write_run("see ", &style).unwrap();
        sink.write_link("docs", "http://example.com", &style).unwrap();
        sink.insert_tab(&style).unwrap();
        sink.write_run("end", &style).unwrap();
        assert_eq!(sink.plain_text(), "see docs\tend");
    }

    /// Forwards everything to a `RecordingSink` but keeps the trait's
    /// default link and tab handling.
    struct RunsOnly(RecordingSink);

    impl DocumentSink for RunsOnly {
        fn create_heading(&mut self, level: u8, text: &str) -> Result<(), SinkError> {
            self.0.create_heading(level, text)
        }
        fn create_paragraph(&mut self) -> Result<(), SinkError> {
            self.0.create_paragraph()
        }
        fn create_code_block(&mut self, text: &str) -> Result<(), SinkError> {
            self.0.create_code_block(text)
        }
        fn create_table(&mut self, column_count: usize) -> Result<(), SinkError> {
            self.0.create_table(column_count)
        }
        fn add_row(
            &mut self,
            cells: &[String],
            alignments: Option<&[Alignment]>,
        ) -> Result<(), SinkError> {
            self.0.add_row(cells, alignments)
        }
        fn add_list_item(
            &mut self,
            level: usize,
            ordered: bool,
            text: &str,
        ) -> Result<(), SinkError> {
            self.0.add_list_item(level, ordered, text)
        }
        fn append_quote_line(&mut self, text: &str) -> Result<(), SinkError> {
            self.0.append_quote_line(text)
        }
        fn write_run(&mut self, text: &str, style: &RunStyle) -> Result<(), SinkError> {
            self.0.write_run(text, style)
        }
        fn insert_image(&mut self, source: &ImageSource) -> Result<(), SinkError> {
            self.0.insert_image(source)
        }
        fn insert_inline_image(&mut self, source: &ImageSource) -> Result<(), SinkError> {
            self.0.insert_inline_image(source)
        }
    }

    #[test]
    fn default_link_and_tab_fall_back_to_runs() {
        let mut sink = RunsOnly(RecordingSink::new());
        let style = RunStyle::default();
        sink.create_paragraph().unwrap();
        sink.write_link("docs", "http://example.com", &style).unwrap();
        sink.insert_tab(&style).unwrap();
        assert_snapshot!(sink.0.render(), @r#"
        paragraph
        run("docs", plain)
        run("\t", plain)
        "#);
    }
}
