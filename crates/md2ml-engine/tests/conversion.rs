use std::fs;

use insta::assert_snapshot;
use md2ml_engine::parsing::lines::split_lines;
use md2ml_engine::{
    Alignment, ConvertError, DocumentSink, FsImageResolver, HtmlSink, ImageSource, ParseOptions,
    RecordingSink, ResolveError, RunStyle, SinkCommand, SinkError, convert,
};
use pretty_assertions::assert_eq;
use rstest::rstest;
use tempfile::TempDir;

fn commands(markdown: &str) -> String {
    let mut sink = RecordingSink::new();
    convert(
        markdown,
        &ParseOptions::default(),
        &mut sink,
        &FsImageResolver::new(),
    )
    .unwrap();
    sink.render()
}

#[test]
fn heading() {
    assert_snapshot!(commands("# Title"), @r#"
    heading(1, "Title")
    run("Title", plain)
    "#);
}

#[test]
fn bold_run_inside_paragraph() {
    assert_snapshot!(commands("Hello **world**!"), @r#"
    paragraph
    run("Hello ", plain)
    run("world", bold)
    run("!", plain)
    "#);
}

#[test]
fn aligned_table() {
    assert_snapshot!(commands("| A | B |\n|:--|--:|\n| 1 | 2 |"), @r#"
    table(2)
    row(["A", "B"])
    row(["1", "2"], [Left, Right])
    "#);
}

#[test]
fn hard_break_splits_paragraphs() {
    assert_snapshot!(commands("Line one  \nLine two"), @r#"
    paragraph
    run("Line one  ", plain)
    paragraph
    run("Line two", plain)
    "#);
}

#[test]
fn nested_unordered_list() {
    assert_snapshot!(commands("- top\n   - nested"), @r#"
    list_item(0, unordered, "top")
    run("top", plain)
    list_item(1, unordered, "nested")
    run("nested", plain)
    "#);
}

#[rstest]
#[case("one", 1)]
#[case("one\ntwo", 2)]
#[case("# a\nb\n\n- c\n- d\n\n| x |\n|---|\n| y |\n> q\n    code\n", 11)]
#[case("\r\n\r\n", 2)]
#[case("a  \nb  \nc", 3)]
#[case("a\rb\rc", 3)]
#[case("- x\r- y\r\rplain\r", 4)]
fn every_line_is_consumed_once(#[case] markdown: &str, #[case] line_count: usize) {
    let registry = md2ml_engine::PatternRegistry::new();
    let options = ParseOptions::default();
    let converter = md2ml_engine::Converter::new(&registry, &options);
    let blocks = converter.reconstruct_all(markdown);
    let consumed: usize = blocks.iter().map(|b| b.lines_consumed).sum();
    assert_eq!(split_lines(markdown).len(), line_count);
    assert_eq!(consumed, line_count);
}

#[test]
fn carriage_return_only_input_converts() {
    assert_snapshot!(commands("# T\r- x\r- y\rend"), @r#"
    heading(1, "T")
    run("T", plain)
    list_item(0, unordered, "x")
    run("x", plain)
    list_item(0, unordered, "y")
    run("y", plain)
    paragraph
    run("end", plain)
    "#);
}

#[test]
fn block_image_resolved_next_to_document() {
    let temp_dir = TempDir::new().unwrap();
    fs::create_dir_all(temp_dir.path().join("img")).unwrap();
    fs::write(temp_dir.path().join("img/chart.png"), b"png").unwrap();
    let doc = temp_dir.path().join("report.md");
    fs::write(&doc, "![Chart](img/chart.png)\n").unwrap();

    let markdown = md2ml_engine::read_markdown(&doc).unwrap();
    let mut sink = RecordingSink::new();
    convert(
        &markdown,
        &ParseOptions::default(),
        &mut sink,
        &FsImageResolver::for_document(&doc),
    )
    .unwrap();

    assert_eq!(
        sink.into_commands(),
        vec![SinkCommand::Image {
            source: ImageSource::Local(temp_dir.path().join("img/chart.png")),
        }]
    );
}

#[test]
fn missing_image_aborts_conversion() {
    let temp_dir = TempDir::new().unwrap();
    let mut sink = RecordingSink::new();
    let result = convert(
        "before\n\n![Chart](missing.png)\n\nafter",
        &ParseOptions::default(),
        &mut sink,
        &FsImageResolver::with_base_dir(temp_dir.path()),
    );

    match result {
        Err(ConvertError::Image(ResolveError::NotFound(path))) => {
            assert_eq!(path, temp_dir.path().join("missing.png"));
        }
        other => panic!("expected missing image error, got {other:?}"),
    }
    // Nothing after the failing block is emitted
    assert!(!sink.plain_text().contains("after"));
}

/// Records everything except tables, which it refuses.
struct NoTables(RecordingSink);

impl DocumentSink for NoTables {
    fn create_heading(&mut self, level: u8, text: &str) -> Result<(), SinkError> {
        self.0.create_heading(level, text)
    }
    fn create_paragraph(&mut self) -> Result<(), SinkError> {
        self.0.create_paragraph()
    }
    fn create_code_block(&mut self, text: &str) -> Result<(), SinkError> {
        self.0.create_code_block(text)
    }
    fn create_table(&mut self, _column_count: usize) -> Result<(), SinkError> {
        Err(SinkError::InvalidState("tables are not supported".to_string()))
    }
    fn add_row(&mut self, cells: &[String], alignments: Option<&[Alignment]>) -> Result<(), SinkError> {
        self.0.add_row(cells, alignments)
    }
    fn add_list_item(&mut self, level: usize, ordered: bool, text: &str) -> Result<(), SinkError> {
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
fn sink_rejection_aborts_conversion() {
    let mut sink = NoTables(RecordingSink::new());
    let result = convert(
        "intro\n| a | b |\n|---|---|\nafter",
        &ParseOptions::default(),
        &mut sink,
        &FsImageResolver::new(),
    );

    assert!(matches!(
        result,
        Err(ConvertError::Sink(SinkError::InvalidState(_)))
    ));
    assert_eq!(sink.0.plain_text(), "intro");
}

#[test]
fn remote_image_passes_through() {
    assert_snapshot!(commands("![logo](https://example.com/logo.png)"), @"image(https://example.com/logo.png)");
}

#[test]
fn html_rendering_of_a_document() {
    let markdown = "# Notes\n\nSome *emphasis* and a [link](https://docs.rs).\n\n- one\n- two";
    let mut sink = HtmlSink::new();
    convert(
        markdown,
        &ParseOptions {
            skip_blank_lines: true,
            ..ParseOptions::default()
        },
        &mut sink,
        &FsImageResolver::new(),
    )
    .unwrap();
    assert_snapshot!(sink.finish(), @r#"
    <h1>Notes</h1>
    <p>Some <em>emphasis</em> and a <a href="https://docs.rs">link</a>.</p>
    <ul>
    <li>one</li>
    <li>two</li>
    </ul>
    "#);
}
