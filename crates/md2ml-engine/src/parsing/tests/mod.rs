//! Integration tests for the parsing module.
//!
//! Fixtures (.md) live in `fixtures/`; their command logs are checked with
//! inline snapshots.


use std::path::PathBuf;

use crate::io::{ImageResolver, ImageSource, ResolveError};
use crate::parsing::{ConvertStats, Converter, ParseOptions, patterns::PatternRegistry};
use crate::sink::RecordingSink;

/// Maps every reference to `assets/<reference>`.
struct AssetsResolver;

impl ImageResolver for AssetsResolver {
    fn resolve(&self, reference: &str) -> Result<ImageSource, ResolveError> {
        Ok(ImageSource::Local(PathBuf::from("assets").join(reference)))
    }
}

fn load_fixture(name: &str) -> String {
    let fixtures_dir = format!("{}/src/parsing/tests/fixtures", env!("CARGO_MANIFEST_DIR"));
    std::fs::read_to_string(format!("{fixtures_dir}/{name}.md")).unwrap()
}

fn run(markdown: &str, options: &ParseOptions) -> (RecordingSink, ConvertStats) {
    let registry = PatternRegistry::new();
    let converter = Converter::new(&registry, options);
    invariants::check(markdown, &converter.reconstruct_all(markdown));

    let mut sink = RecordingSink::new();
    let stats = converter
        .convert(markdown, &mut sink, &AssetsResolver)
        .unwrap();
    (sink, stats)
}

// Fixture-based snapshot tests

#[test]
fn fixture_mixed_document() {
    let md = load_fixture("mixed_document");
    let options = ParseOptions {
        soft_break: " ".to_string(),
        skip_blank_lines: true,
    };
    let (sink, stats) = run(&md, &options);
    assert_eq!(stats, ConvertStats { blocks: 11, lines: 19 });
    insta::assert_snapshot!(sink.render(), @r#"
    heading(1, "Release Notes")
    run("Release Notes", plain)
    paragraph
    run("Version ", plain)
    run("2.0", bold)
    run(" ships ", plain)
    run("today", italic)
    run(". It replaces the ", plain)
    run("legacy", code)
    run(" importer.", plain)
    table(2)
    row(["Feature", "Status"])
    row(["Tables", "done"], [Left, Center])
    row(["Lists", "~~todo~~ done"], [Left, Center])
    list_item(0, unordered, "parsing")
    run("parsing", plain)
    list_item(1, unordered, "block classifier")
    run("block classifier", plain)
    list_item(1, ordered, "ordered child")
    run("ordered child", plain)
    list_item(0, unordered, "output")
    run("output", plain)
    quote_line("Quoted **advice**")
    run("Quoted ", plain)
    run("advice", bold)
    quote_line("still quoted")
    run("still quoted", plain)
    code_block("    fn main() {}")
    run("    fn main() {}", plain)
    "#);
}

#[test]
fn fixture_requirements() {
    let md = load_fixture("requirements");
    let (sink, stats) = run(&md, &ParseOptions::default());
    assert_eq!(stats, ConvertStats { blocks: 3, lines: 4 });
    insta::assert_snapshot!(sink.render(), @r#"
    paragraph
    run("[SYS-AUTH-REQ-001] User login", plain)
    paragraph
    run("@Priority: high\n@Owner: platform team", plain)
    paragraph
    run("%Verified: yes", plain)
    "#);
}

#[test]
fn fixture_line_breaks_default_options() {
    let md = load_fixture("line_breaks");
    let (sink, stats) = run(&md, &ParseOptions::default());
    assert_eq!(stats, ConvertStats { blocks: 4, lines: 5 });
    insta::assert_snapshot!(sink.render(), @r#"
    paragraph
    run("first line  ", plain)
    paragraph
    run("second linethird line", plain)
    paragraph
    paragraph
    run("after blank", plain)
    "#);
}

#[test]
fn fixture_line_breaks_with_soft_break() {
    let md = load_fixture("line_breaks");
    let options = ParseOptions {
        soft_break: " ".to_string(),
        skip_blank_lines: true,
    };
    let (sink, _) = run(&md, &options);
    insta::assert_snapshot!(sink.render(), @r#"
    paragraph
    run("first line  ", plain)
    paragraph
    run("second line third line", plain)
    paragraph
    run("after blank", plain)
    "#);
}

// Invariant tests

/// Test empty document produces no blocks.
#[test]
fn empty_document() {
    let (sink, stats) = run("", &ParseOptions::default());
    assert!(sink.commands().is_empty());
    assert_eq!(stats, ConvertStats::default());
}

/// Test blank lines become empty paragraphs.
#[test]
fn blank_lines_only() {
    let (sink, stats) = run("\n\n\n", &ParseOptions::default());
    assert_eq!(sink.render(), "paragraph\nparagraph\nparagraph");
    assert_eq!(stats.lines, 3);
}

/// Test that run text is the input minus style markers.
#[test]
fn runs_reproduce_text_without_markers() {
    let (sink, _) = run(
        "Hello **world** and *it* plus `code`, ~~old~~ __new__ ***all***",
        &ParseOptions::default(),
    );
    assert_eq!(
        sink.plain_text(),
        "Hello world and it plus code, old new all"
    );
}

/// Test an indented list item continues the list instead of opening code.
#[test]
fn indented_item_continues_list() {
    let registry = PatternRegistry::new();
    let options = ParseOptions::default();
    let blocks = Converter::new(&registry, &options).reconstruct_all("- a\n    - b\n    code");
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0].lines_consumed, 2);
    assert_eq!(blocks[1].text, "    code");
}
