#![forbid(unsafe_code)]

//! Bounded value-snapshot undo/redo log.
//!
//! [`SnapshotStore`] keeps an ordered sequence of snapshots plus a cursor
//! pointing at the one that matches the live state. Snapshots are deep
//! copies: `record` clones the caller's state in, `undo`/`redo` clone it
//! back out, so nothing the caller does afterwards can reach a recorded
//! entry.
//!
//! # Architecture
//!
//! ```text
//! record(s3)
//! ┌──────────────────────────────────────────┐
//! │ Entries: [s0, s1, s2, s3]                │
//! │ Cursor:                  ^               │
//! └──────────────────────────────────────────┘
//!
//! undo() x2
//! ┌──────────────────────────────────────────┐
//! │ Entries: [s0, s1, s2, s3]                │
//! │ Cursor:       ^                          │
//! └──────────────────────────────────────────┘
//!
//! record(s4): new branch, s2 and s3 are discarded
//! ┌──────────────────────────────────────────┐
//! │ Entries: [s0, s1, s4]                    │
//! │ Cursor:           ^                      │
//! └──────────────────────────────────────────┘
//! ```
//!
//! # Memory Model
//!
//! Every entry is a full clone of `T`. That keeps "recorded snapshots never
//! change" trivially true and is cheap for the small ring collections the
//! editor works with. The store enforces a depth limit by evicting the
//! oldest entries.

use std::collections::VecDeque;
use std::fmt;

/// Default number of retained snapshots.
pub const DEFAULT_HISTORY_DEPTH: usize = 50;

/// Configuration for the snapshot store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotConfig {
    /// Maximum number of snapshots to retain (including the current one).
    /// Oldest snapshots are evicted when this limit is exceeded. Values
    /// below 1 behave as 1.
    pub max_depth: usize,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_HISTORY_DEPTH,
        }
    }
}

impl SnapshotConfig {
    /// Create a new configuration with the given depth limit.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self { max_depth }
    }

    /// Create an unlimited configuration (for testing).
    #[must_use]
    pub fn unlimited() -> Self {
        Self {
            max_depth: usize::MAX,
        }
    }
}

/// A cursor-based undo/redo log of owned snapshots.
///
/// # Invariants
///
/// 1. `cursor < entries.len()` whenever the store is non-empty.
/// 2. `entries.len() <= max(config.max_depth, 1)` after any operation.
/// 3. Entries after the cursor are discarded on every `record`.
/// 4. `current()` is the most recently recorded or restored snapshot.
pub struct SnapshotStore<T> {
    entries: VecDeque<T>,
    cursor: usize,
    config: SnapshotConfig,
}

impl<T> fmt::Debug for SnapshotStore<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotStore")
            .field("len", &self.entries.len())
            .field("cursor", &self.cursor)
            .field("config", &self.config)
            .finish()
    }
}

impl<T: Clone> SnapshotStore<T> {
    /// Create a new snapshot store with the given configuration.
    #[must_use]
    pub fn new(config: SnapshotConfig) -> Self {
        Self {
            entries: VecDeque::new(),
            cursor: 0,
            config,
        }
    }

    /// Create a new snapshot store with default configuration.
    #[must_use]
    pub fn with_default_config() -> Self {
        Self::new(SnapshotConfig::default())
    }

    // ====================================================================
    // Core Operations
    // ====================================================================

    /// Drop all history and start over from `baseline`.
    pub fn reset(&mut self, baseline: &T) {
        self.entries.clear();
        self.entries.push_back(baseline.clone());
        self.cursor = 0;
    }

    /// Record a copy of `state`, discarding any redo branch.
    ///
    /// If the log exceeds `max_depth`, the oldest snapshot is evicted and
    /// the cursor stays on the entry just recorded.
    pub fn record(&mut self, state: &T) {
        self.entries.truncate(self.cursor + 1);
        self.entries.push_back(state.clone());
        let evicted = self.enforce_depth();
        self.cursor = self.entries.len() - 1;
        tracing::trace!(
            target: "chainmail.history",
            len = self.entries.len(),
            evicted,
            "snapshot recorded"
        );
    }

    /// Step back and return a copy of the snapshot now under the cursor.
    ///
    /// Returns `None` at the oldest retained snapshot or when empty.
    pub fn undo(&mut self) -> Option<T> {
        if self.cursor == 0 {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Step forward and return a copy of the snapshot now under the cursor.
    ///
    /// Returns `None` if there is nothing to redo.
    pub fn redo(&mut self) -> Option<T> {
        if self.cursor + 1 >= self.entries.len() {
            return None;
        }
        self.cursor += 1;
        self.entries.get(self.cursor).cloned()
    }

    /// The snapshot under the cursor.
    #[must_use]
    pub fn current(&self) -> Option<&T> {
        self.entries.get(self.cursor)
    }

    // ====================================================================
    // Query
    // ====================================================================

    /// Check if undo is available.
    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    /// Check if redo is available.
    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    /// Snapshots at or before the cursor (including current).
    #[must_use]
    pub fn undo_depth(&self) -> usize {
        if self.entries.is_empty() {
            0
        } else {
            self.cursor + 1
        }
    }

    /// Snapshots after the cursor.
    #[must_use]
    pub fn redo_depth(&self) -> usize {
        self.entries.len() - self.undo_depth()
    }

    /// Total number of retained snapshots.
    #[must_use]
    pub fn total_snapshots(&self) -> usize {
        self.entries.len()
    }

    /// Get the configuration.
    #[must_use]
    pub fn config(&self) -> &SnapshotConfig {
        &self.config
    }

    /// Check if the store is empty (no snapshots at all).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ====================================================================
    // Maintenance
    // ====================================================================

    /// Clear all snapshots.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
    }

    /// Evict the oldest snapshots until the depth limit holds.
    fn enforce_depth(&mut self) -> usize {
        let limit = self.config.max_depth.max(1);
        let mut evicted = 0;
        while self.entries.len() > limit {
            self.entries.pop_front();
            evicted += 1;
        }
        evicted
    }
}

// ============================================================================
// Tests
// ============================================================================
