//! # Document Sinks
//!
//! The converter never builds a document itself. It issues ordered
//! construction commands to a [`DocumentSink`], which owns whatever output
//! format it produces.
//!
//! - **`recording`**: `RecordingSink` keeps the command log in memory
//! - **`html`**: `HtmlSink` renders the commands into an HTML fragment

pub mod html;
pub mod recording;

pub use html::HtmlSink;
pub use recording::{RecordingSink, SinkCommand};

use crate::io::ImageSource;
use crate::style::{Alignment, RunStyle};

#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// A command arrived with nothing to attach to, e.g. a row with no
    /// open table.
    #[error("Invalid sink state: {0}")]
    InvalidState(String),
}

/// Receiver of document construction commands.
///
/// Commands arrive strictly in document order. Text runs and inline images
/// belong to the most recently opened heading, paragraph, code block, list
/// item, quote line or table row.
pub trait DocumentSink {
    /// Opens a heading. `text` is the raw title; its runs follow.
    fn create_heading(&mut self, level: u8, text: &str) -> Result<(), SinkError>;

    fn create_paragraph(&mut self) -> Result<(), SinkError>;

    /// Opens a code block. `text` is the raw block, indentation included.
    fn create_code_block(&mut self, text: &str) -> Result<(), SinkError>;

    fn create_table(&mut self, column_count: usize) -> Result<(), SinkError>;

    /// Appends a row to the open table. The header row has no alignments.
    fn add_row(
        &mut self,
        cells: &[String],
        alignments: Option<&[Alignment]>,
    ) -> Result<(), SinkError>;

    fn add_list_item(&mut self, level: usize, ordered: bool, text: &str)
    -> Result<(), SinkError>;

    fn append_quote_line(&mut self, text: &str) -> Result<(), SinkError>;

    fn write_run(&mut self, text: &str, style: &RunStyle) -> Result<(), SinkError>;

    /// A block-level image on its own line.
    fn insert_image(&mut self, source: &ImageSource) -> Result<(), SinkError>;

    /// An image inside running text.
    fn insert_inline_image(&mut self, source: &ImageSource) -> Result<(), SinkError>;

    /// A hyperlink. Sinks without link support get the text as a plain run.
    fn write_link(&mut self, text: &str, _target: &str, style: &RunStyle) -> Result<(), SinkError> {
        self.write_run(text, style)
    }

    /// A tab stop.
    fn insert_tab(&mut self, style: &RunStyle) -> Result<(), SinkError> {
        self.write_run("\t", style)
    }
}
