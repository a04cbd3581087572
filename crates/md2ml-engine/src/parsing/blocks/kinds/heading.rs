/// ATX-style heading.
pub struct Heading;

impl Heading {
    pub const MARKER: char = '#';

    /// Deepest heading level a sink is asked to create.
    pub const MAX_LEVEL: u8 = 9;

    /// Heading level from the captured marker run (`"## "`, `"# # "`).
    ///
    /// Counts every `#` in the run, clamped to [`Self::MAX_LEVEL`].
    pub fn level(marker_run: &str) -> u8 {
        let count = marker_run.chars().filter(|&c| c == Self::MARKER).count();
        count.clamp(1, Self::MAX_LEVEL as usize) as u8
    }
}
