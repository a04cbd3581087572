pub mod error;
pub mod io;
pub mod parsing;
pub mod sink;
pub mod style;

// Re-export key types for easier usage
pub use error::ConvertError;
pub use io::*;
pub use parsing::{ConvertStats, Converter, ParseOptions, convert, patterns::PatternRegistry};
pub use sink::*;
pub use style::*;
