/// Plain paragraph prose.
pub struct Paragraph;

impl Paragraph {
    /// Trailing marker that forces a line break after a paragraph line.
    pub const HARD_BREAK: &'static str = "  ";

    pub fn ends_with_hard_break(line: &str) -> bool {
        line.ends_with(Self::HARD_BREAK)
    }
}
