//! # Inline Formatting
//!
//! Recursive style tokenizing of block text into runs.
//!
//! - **`types`**: `StyleKind` and `StyleSplit`
//! - **`split`**: `find_split` picks the earliest construct in a span;
//!   `SplitScanner` repeats it over the suffixes of one span
//! - **`formatter`**: `InlineFormatter` walks a span and emits runs to a sink

pub mod formatter;
pub mod split;
pub mod types;

pub use formatter::InlineFormatter;
pub use split::{SplitScanner, find_split};
pub use types::{StyleKind, StyleSplit};
