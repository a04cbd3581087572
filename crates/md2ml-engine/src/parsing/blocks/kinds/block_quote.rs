/// Quote block with its owned delimiter.
pub struct BlockQuote;

impl BlockQuote {
    /// The quote prefix character.
    pub const PREFIX: char = '>';

    /// Strips quote markers from a line, returning (depth, byte_offset).
    ///
    /// Accepts `> text`, `>> nested` and `> > spaced nested`. A single space
    /// after each marker is part of the marker. Lines that do not start with
    /// the prefix are left untouched, so lazy continuation lines keep their
    /// leading whitespace.
    pub fn strip_prefixes(s: &str) -> (u8, usize) {
        let b = s.as_bytes();
        let mut i = 0usize;
        let mut depth = 0u8;

        while i < b.len() && b[i] == Self::PREFIX as u8 {
            depth = depth.saturating_add(1);
            i += 1;
            if i < b.len() && b[i] == b' ' {
                i += 1;
            }
            // `> >`: spaces between markers belong to the marker run
            let mut j = i;
            while j < b.len() && b[j] == b' ' {
                j += 1;
            }
            if j < b.len() && b[j] == Self::PREFIX as u8 {
                i = j;
            }
        }
        (depth, i)
    }

    /// The line content after its quote markers.
    pub fn content(line: &str) -> &str {
        let (_, offset) = Self::strip_prefixes(line);
        &line[offset..]
    }
}
