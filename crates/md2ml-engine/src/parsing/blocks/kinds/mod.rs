//! Block kinds with owned delimiter knowledge.

pub mod block_quote;
pub mod heading;
pub mod list;
pub mod paragraph;
pub mod table;

pub use block_quote::BlockQuote;
pub use heading::Heading;
pub use list::{List, ListItem};
pub use paragraph::Paragraph;
pub use table::{Table, TableShape};
