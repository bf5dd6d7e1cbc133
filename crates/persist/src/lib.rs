//! Warp persistence: the `warps.ini` line format and the shared warp store.
//!
//! # Invariants
//! - Names are unique; iteration follows insertion order.
//! - Every successful mutation rewrites the whole file; failures never undo
//!   the in-memory change.
//! - Comment lines are read past and never written.

pub mod format;
pub mod store;
pub mod table;

pub use format::{FormatError, LineIssue, check_document, format_line, parse_line};
pub use store::{WARPS_FILE_NAME, WarpStore};
pub use table::WarpTable;
