#![forbid(unsafe_code)]

//! Undo/redo history for the editor's ring collection.
//!
//! The editor snapshots its whole ring collection after every committed
//! change rather than recording reversible commands. Ring collections are
//! small, so a bounded log of deep copies is simple and cannot drift out of
//! sync with the document.
//!
//! # Module Structure
//!
//! - [`snapshot_store`]: the bounded cursor-based snapshot log

pub mod snapshot_store;

pub use snapshot_store::{DEFAULT_HISTORY_DEPTH, SnapshotConfig, SnapshotStore};
