// Benchmark helper functions - Rust's dead code analysis doesn't understand
// that these are used by benchmark files in the same directory
#[allow(dead_code)]
pub fn generate_markdown_content(size: usize) -> String {
    let base = "# Title\n\n## Section\n\nParagraph with **bold** and *italic* content,\nwrapped onto a `second` line.\n\n- Bullet point\n   - Nested item\n- Another item\n\n| Name | Value |\n|:--|--:|\n| a | 1 |\n| b | 2 |\n\n> Quoted ~~old~~ text\n\n    fn example() {}\n\n";
    base.repeat(size)
}

#[allow(dead_code)]
pub fn generate_styled_line(spans: usize) -> String {
    let mut line = String::new();
    for i in 0..spans {
        match i % 4 {
            0 => line.push_str(&format!("plain {i} ")),
            1 => line.push_str(&format!("**bold {i}** ")),
            2 => line.push_str(&format!("*italic {i}* ")),
            _ => line.push_str(&format!("`code {i}` ")),
        }
    }
    line
}
