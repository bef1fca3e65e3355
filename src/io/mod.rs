//! Textual I/O: the transaction-database reader and the pattern-result
//! writers (spec §4.I, §4.J). Kept out of scope for the core mining
//! engine itself, per spec.md's Non-goals, but part of this crate's
//! ambient stack the same way the teacher ships `input.rs`/`output.rs`
//! alongside its algorithms.

pub mod reader;
pub mod writer;

pub use reader::{ReadStats, TransactionReader};
pub use writer::{OutputMode, ResultWriter, TransactionNames};
