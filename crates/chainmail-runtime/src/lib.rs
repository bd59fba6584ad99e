#![forbid(unsafe_code)]

//! Chainmail Runtime
//!
//! Stateful components of the chainmail weave editor, built on the document
//! types in `chainmail-core`.
//!
//! # Key Components
//!
//! - [`EditorStore`] - Sole mutation surface over the tutorial being edited
//! - [`SnapshotStore`] - Bounded undo/redo log of ring-collection snapshots
//! - [`CommandRouter`] - Key chord to editor command table
//! - [`TutorialPlayer`] - Step-by-step playback of a finished tutorial
//! - [`EditorConfig`] - Tunables loadable from env, TOML or JSON
//!
//! # Role in the editor
//! The presentation layer owns rendering, gizmos and persistence. It holds an
//! `EditorStore`, forwards user gestures as store calls (or key chords through
//! the router), and reads state back for display. Everything here runs
//! synchronously on the caller's thread.
//!
//! # Logging
//! Events go through `tracing` under the `chainmail.editor`,
//! `chainmail.history`, `chainmail.keys` and `chainmail.player` targets. No
//! subscriber is installed by this crate.

pub mod config;
pub mod editor;
pub mod keybinding;
pub mod player;
pub mod undo;

pub use config::{ConfigError, EditorConfig};
pub use editor::{Axis, EditorStore, HistoryMode, TransformMode, TransformPhase};
pub use keybinding::{CommandRouter, EditorAction, KeyContext, PrimaryModifier};
pub use player::{PlayerAction, TutorialPlayer};
pub use undo::{SnapshotConfig, SnapshotStore};
