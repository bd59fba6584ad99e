#![forbid(unsafe_code)]

//! Chainmail Core
//!
//! Plain data and pure functions shared by the chainmail weave editor and
//! player.
//!
//! # Key Components
//!
//! - [`Tutorial`] - The exchange document: metadata, camera, rings, steps
//! - [`TutorialIndex`] - Catalog of available tutorials
//! - [`RingIdGenerator`] - Collision-free `ring-<n>` ids
//! - [`synthesize_steps`] - Default narrative for a bare ring collection
//! - [`KeyEvent`] - Platform-neutral key input for the command router
//!
//! # Role in the editor
//! `chainmail-core` owns no mutable lifecycle. The stateful pieces (undo
//! history, the editor store, key routing, playback) live in
//! `chainmail-runtime` and are built from these types.

pub mod error;
pub mod event;
pub mod ids;
pub mod index;
pub mod steps;
pub mod tutorial;

pub use error::{DocumentError, Result};
pub use event::{KeyCode, KeyEvent, KeyEventKind, Modifiers};
pub use ids::{RingIdGenerator, parse_ring_number};
pub use index::{IndexEntryPatch, TutorialIndex, TutorialIndexEntry};
pub use steps::synthesize_steps;
pub use tutorial::{
    AspectRatio, CameraConfig, Difficulty, Ring, RingPatch, Step, StepPatch, Tutorial, Vec3,
    WeaveMetadata, is_valid_tutorial_name, to_dash_case,
};
