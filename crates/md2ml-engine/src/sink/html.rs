use html_escape::{encode_double_quoted_attribute, encode_text};

use super::{DocumentSink, SinkError};
use crate::io::ImageSource;
use crate::style::{Alignment, RunStyle, Underline, VerticalPosition};

struct ListFrame {
    ordered: bool,
    item_open: bool,
}

impl ListFrame {
    fn tag(&self) -> &'static str {
        if self.ordered { "ol" } else { "ul" }
    }
}

#[derive(Default)]
struct TableState {
    body_open: bool,
}

/// Renders sink commands as an HTML fragment.
///
/// Code block content is written from the raw block text, so the styled
/// runs that follow a code block are not rendered again.
#[derive(Default)]
pub struct HtmlSink {
    out: String,
    /// Closing tag of the element currently receiving runs.
    closer: Option<String>,
    /// Runs are dropped until the next block opens.
    raw: bool,
    has_block: bool,
    lists: Vec<ListFrame>,
    in_quote: bool,
    table: Option<TableState>,
}

impl HtmlSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Closes every open element and returns the fragment.
    pub fn finish(mut self) -> String {
        self.close_containers();
        self.out
    }

    /// Closes every open element and wraps the fragment in a full page.
    pub fn finish_document(self, title: &str) -> String {
        let body = self.finish();
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n</head>\n<body>\n{body}</body>\n</html>\n",
            encode_text(title)
        )
    }

    fn close_inline(&mut self) {
        if let Some(closer) = self.closer.take() {
            self.out.push_str(&closer);
            self.out.push('\n');
        }
        self.raw = false;
    }

    fn close_lists_to(&mut self, depth: usize) {
        while self.lists.len() > depth {
            if let Some(frame) = self.lists.pop() {
                if frame.item_open {
                    self.out.push_str("</li>\n");
                }
                self.out.push_str(&format!("</{}>\n", frame.tag()));
            }
        }
    }

    fn close_quote(&mut self) {
        if self.in_quote {
            self.out.push_str("</blockquote>\n");
            self.in_quote = false;
        }
    }

    fn close_table(&mut self) {
        if let Some(table) = self.table.take() {
            if table.body_open {
                self.out.push_str("</tbody>\n");
            }
            self.out.push_str("</table>\n");
        }
    }

    fn close_containers(&mut self) {
        self.close_inline();
        self.close_lists_to(0);
        self.close_quote();
        self.close_table();
    }

    /// Starts a top-level block: everything still open is closed first.
    fn open_block(&mut self, open: &str, closer: Option<&str>) {
        self.close_containers();
        self.out.push_str(open);
        self.closer = closer.map(str::to_string);
        self.has_block = true;
    }

    fn styled(text: &str, style: &RunStyle) -> String {
        if style.is_plain() {
            return encode_text(text).into_owned();
        }

        let mut open = String::new();
        let mut close = Vec::new();
        let mut tag = |name: &'static str, open: &mut String| {
            open.push_str(&format!("<{name}>"));
            close.push(name);
        };

        if style.code_style {
            tag("code", &mut open);
        }
        if style.bold {
            tag("strong", &mut open);
        }
        if style.italic {
            tag("em", &mut open);
        }
        if style.underline == Underline::Single {
            tag("u", &mut open);
        }
        if style.strikeout {
            tag("s", &mut open);
        }
        match style.vertical_position {
            VerticalPosition::Baseline => {}
            VerticalPosition::Superscript => tag("sup", &mut open),
            VerticalPosition::Subscript => tag("sub", &mut open),
        }

        let mut css = Vec::new();
        if let Some(font) = &style.font_name {
            css.push(format!("font-family: {font}"));
        }
        if let Some(size) = &style.font_size {
            css.push(format!("font-size: {size}"));
        }
        if let Some(color) = style.color {
            css.push(format!("color: {}", color.to_hex()));
        }
        if !css.is_empty() {
            open.push_str(&format!(
                "<span style=\"{}\">",
                encode_double_quoted_attribute(&css.join("; "))
            ));
            close.push("span");
        }

        let mut html = open;
        html.push_str(&encode_text(text));
        for name in close.iter().rev() {
            html.push_str(&format!("</{name}>"));
        }
        html
    }

    fn push_inline(&mut self, html: &str) -> Result<(), SinkError> {
        if !self.has_block {
            return Err(SinkError::InvalidState(
                "inline content before any block".to_string(),
            ));
        }
        if !self.raw {
            self.out.push_str(html);
        }
        Ok(())
    }

    fn img(source: &ImageSource) -> String {
        format!(
            "<img src=\"{}\">",
            encode_double_quoted_attribute(&source.to_string())
        )
    }
}

impl DocumentSink for HtmlSink {
    fn create_heading(&mut self, level: u8, _text: &str) -> Result<(), SinkError> {
        let level = level.clamp(1, 6);
        self.open_block(&format!("<h{level}>"), Some(&format!("</h{level}>")));
        Ok(())
    }

    fn create_paragraph(&mut self) -> Result<(), SinkError> {
        self.open_block("<p>", Some("</p>"));
        Ok(())
    }

    fn create_code_block(&mut self, text: &str) -> Result<(), SinkError> {
        self.open_block(
            &format!("<pre><code>{}</code></pre>\n", encode_text(text)),
            None,
        );
        self.raw = true;
        Ok(())
    }

    fn create_table(&mut self, _column_count: usize) -> Result<(), SinkError> {
        self.open_block("<table>\n", None);
        self.table = Some(TableState::default());
        Ok(())
    }

    fn add_row(
        &mut self,
        cells: &[String],
        alignments: Option<&[Alignment]>,
    ) -> Result<(), SinkError> {
        let Some(table) = self.table.as_mut() else {
            return Err(SinkError::InvalidState(
                "row added outside a table".to_string(),
            ));
        };

        let mut row = String::from("<tr>");
        match alignments {
            None => {
                for cell in cells {
                    row.push_str(&format!("<th>{}</th>", encode_text(cell)));
                }
                self.out.push_str(&format!("<thead>{row}</tr></thead>\n"));
            }
            Some(alignments) => {
                for (i, cell) in cells.iter().enumerate() {
                    let style = match alignments.get(i).copied().unwrap_or_default() {
                        Alignment::Left => "",
                        Alignment::Center => " style=\"text-align: center\"",
                        Alignment::Right => " style=\"text-align: right\"",
                    };
                    row.push_str(&format!("<td{style}>{}</td>", encode_text(cell)));
                }
                if !table.body_open {
                    table.body_open = true;
                    self.out.push_str("<tbody>\n");
                }
                self.out.push_str(&format!("{row}</tr>\n"));
            }
        }
        Ok(())
    }

    fn add_list_item(
        &mut self,
        level: usize,
        ordered: bool,
        _text: &str,
    ) -> Result<(), SinkError> {
        self.close_inline();
        self.close_quote();
        self.close_table();

        let depth = level + 1;
        self.close_lists_to(depth);
        if self.lists.len() == depth && self.lists.last().is_some_and(|f| f.ordered != ordered) {
            self.close_lists_to(depth - 1);
        }
        while self.lists.len() < depth {
            let frame = ListFrame {
                ordered,
                item_open: false,
            };
            self.out.push_str(&format!("<{}>\n", frame.tag()));
            self.lists.push(frame);
        }

        if let Some(frame) = self.lists.last_mut() {
            if frame.item_open {
                self.out.push_str("</li>\n");
            }
            frame.item_open = true;
        }
        self.out.push_str("<li>");
        self.has_block = true;
        Ok(())
    }

    fn append_quote_line(&mut self, _text: &str) -> Result<(), SinkError> {
        self.close_inline();
        if !self.in_quote {
            self.close_containers();
            self.out.push_str("<blockquote>\n");
            self.in_quote = true;
        }
        self.out.push_str("<p>");
        self.closer = Some("</p>".to_string());
        self.has_block = true;
        Ok(())
    }

    fn write_run(&mut self, text: &str, style: &RunStyle) -> Result<(), SinkError> {
        self.push_inline(&Self::styled(text, style))
    }

    fn insert_image(&mut self, source: &ImageSource) -> Result<(), SinkError> {
        self.open_block(&format!("<p>{}</p>\n", Self::img(source)), None);
        Ok(())
    }

    fn insert_inline_image(&mut self, source: &ImageSource) -> Result<(), SinkError> {
        self.push_inline(&Self::img(source))
    }

    fn write_link(&mut self, text: &str, target: &str, style: &RunStyle) -> Result<(), SinkError> {
        let html = format!(
            "<a href=\"{}\">{}</a>",
            encode_double_quoted_attribute(target),
            Self::styled(text, style)
        );
        self.push_inline(&html)
    }

    fn insert_tab(&mut self, _style: &RunStyle) -> Result<(), SinkError> {
        self.push_inline("&emsp;")
    }
}
