//! # Block Parsing
//!
//! Line-oriented block recognition in three steps per block.
//!
//! ## Steps
//!
//! 1. **Classification** (`classify`): the first remaining line is matched
//!    against the ordered block patterns, yielding a `BlockMatch`
//!
//! 2. **Reconstruction** (`reconstruct`): continuation lines are folded into
//!    one `ReconstructedBlock`, honouring the soft/hard line break rule
//!
//! 3. **Dispatch** (`dispatch`): the block becomes sink commands, with its
//!    text handed to the inline formatter
//!
//! ## Modules
//!
//! - **`types`**: `BlockKind`, `BlockMatch`, `ReconstructedBlock`
//! - **`kinds`**: per-kind delimiter knowledge (quote markers, heading
//!   levels, list indentation, table cells, hard breaks)
//!
//! ## Key Invariants
//!
//! - Classification is total; the last pattern accepts any line
//! - A block consumes at least one line and never the blank line ending it

pub mod classify;
pub mod dispatch;
pub mod kinds;
pub mod reconstruct;
pub mod types;

pub use classify::BlockClassifier;
pub use dispatch::BlockDispatcher;
pub use reconstruct::BlockReconstructor;
pub use types::{BlockKind, BlockMatch, PropertyMarker, ReconstructedBlock};
