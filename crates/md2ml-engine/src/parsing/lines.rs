/// Splits the input into physical lines.
///
/// `\r\n`, `\n` and a lone `\r` are all treated as line terminators and are
/// not included in the returned slices. A terminator at the very end of the
/// input does not start an extra empty line, so `"a\n"` is one line and
/// `"a\n\n"` is two (`"a"` and `""`).
pub fn split_lines(text: &str) -> Vec<&str> {
    let bytes = text.as_bytes();
    let mut lines = Vec::new();
    let mut start = 0usize;
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'\n' => {
                lines.push(&text[start..i]);
                i += 1;
                start = i;
            }
            b'\r' => {
                lines.push(&text[start..i]);
                i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                start = i;
            }
            _ => i += 1,
        }
    }

    if start < bytes.len() {
        lines.push(&text[start..]);
    }
    lines
}
