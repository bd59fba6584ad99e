#![forbid(unsafe_code)]

//! The editor state store.
//!
//! [`EditorStore`] is the only mutation surface over a tutorial being
//! edited. It owns the ring collection, the step sequence, metadata,
//! camera, scale and version, plus transient UI state (selection, hidden
//! rings, transform mode).
//!
//! # History
//!
//! Every operation that changes the ring collection records a snapshot in
//! the undo log once it has been applied. Steps, metadata and visibility
//! are not part of the spatial document and never touch history.
//!
//! ```text
//!            ┌────────────┐  record(rings)   ┌───────────────┐
//!  op ──────▶│ EditorStore│ ───────────────▶ │ SnapshotStore │
//!            │            │ ◀─────────────── │               │
//!            └────────────┘   undo()/redo()  └───────────────┘
//!                  │
//!                  └─ mode = ApplyingHistory while a snapshot is assigned,
//!                     so the assignment does not record itself
//! ```
//!
//! # Missing ids
//!
//! Every id-keyed operation treats an unknown id as a silent no-op. Nothing
//! here returns an error or panics on business input.

use std::collections::BTreeSet;

use chainmail_core::{
    CameraConfig, DocumentError, Ring, RingIdGenerator, RingPatch, Step, StepPatch, Tutorial,
    Vec3, WeaveMetadata, synthesize_steps,
};
use chainmail_core::tutorial::DEFAULT_VERSION;

use crate::config::EditorConfig;
use crate::undo::{SnapshotConfig, SnapshotStore};

const TARGET: &str = "chainmail.editor";

/// Which gizmo the presentation layer shows for the selected ring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransformMode {
    #[default]
    Translate,
    Rotate,
}

impl TransformMode {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Translate => "translate",
            Self::Rotate => "rotate",
        }
    }
}

/// A rotation axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Index into a [`Vec3`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }
}

/// Whether a transform update is an intermediate drag frame or final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TransformPhase {
    /// Update live state only.
    Preview,
    /// Update and record history.
    #[default]
    Commit,
}

/// Recording state of the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum HistoryMode {
    /// Changes to the ring collection are recorded.
    #[default]
    Idle,
    /// A snapshot from the undo log is being assigned; records are dropped.
    ApplyingHistory,
}

/// Mutable editing model over one tutorial.
#[derive(Debug)]
pub struct EditorStore {
    rings: Vec<Ring>,
    steps: Vec<Step>,
    metadata: WeaveMetadata,
    camera: CameraConfig,
    scale: f64,
    version: String,

    selected_ring_id: Option<String>,
    transform_mode: TransformMode,
    hidden_ring_ids: BTreeSet<String>,

    history: SnapshotStore<Vec<Ring>>,
    history_mode: HistoryMode,
    ids: RingIdGenerator,
    config: EditorConfig,
}

impl EditorStore {
    /// Build a store over `initial_rings`.
    ///
    /// Steps, metadata, camera, scale and version come from `base` when
    /// given; `base.rings` is ignored in favor of `initial_rings`. Without a
    /// base, steps are synthesized from the rings. A base with an empty step
    /// list keeps it empty.
    #[must_use]
    pub fn new(initial_rings: Vec<Ring>, base: Option<Tutorial>) -> Self {
        Self::with_config(EditorConfig::default(), initial_rings, base)
    }

    /// Like [`new`](Self::new) with explicit configuration.
    #[must_use]
    pub fn with_config(config: EditorConfig, initial_rings: Vec<Ring>, base: Option<Tutorial>) -> Self {
        let config = config.validated();
        let mut store = Self {
            rings: Vec::new(),
            steps: Vec::new(),
            metadata: WeaveMetadata::default(),
            camera: CameraConfig::default(),
            scale: 1.0,
            version: DEFAULT_VERSION.to_string(),
            selected_ring_id: None,
            transform_mode: TransformMode::default(),
            hidden_ring_ids: BTreeSet::new(),
            history: SnapshotStore::new(SnapshotConfig::new(config.history_depth)),
            history_mode: HistoryMode::Idle,
            ids: RingIdGenerator::new(),
            config,
        };
        store.load(initial_rings, base);
        store
    }

    /// Build a store from a complete document.
    #[must_use]
    pub fn from_tutorial(mut tutorial: Tutorial) -> Self {
        let rings = std::mem::take(&mut tutorial.rings);
        Self::new(rings, Some(tutorial))
    }

    /// Replace the whole document, e.g. when switching tutorials.
    ///
    /// Resets the undo log to the new rings and clears selection and
    /// visibility. The id generator keeps counting, re-seeded past the new
    /// ring ids.
    pub fn load(&mut self, initial_rings: Vec<Ring>, base: Option<Tutorial>) {
        let mut steps = match base {
            Some(base) => {
                self.metadata = base.metadata;
                self.camera = base.default_camera;
                self.scale = base.scale;
                self.version = base.version;
                base.steps
            }
            None => {
                self.metadata = WeaveMetadata::default();
                self.camera = CameraConfig::default();
                self.scale = 1.0;
                self.version = DEFAULT_VERSION.to_string();
                synthesize_steps(&initial_rings)
            }
        };
        steps.sort_by_key(|s| s.step_number);

        self.ids.reseed(initial_rings.iter().map(|r| r.id.as_str()));
        self.rings = initial_rings;
        self.steps = steps;
        self.selected_ring_id = None;
        self.hidden_ring_ids.clear();
        self.history_mode = HistoryMode::Idle;
        self.history.reset(&self.rings);

        tracing::debug!(
            target: TARGET,
            tutorial_id = %self.metadata.id,
            ring_count = self.rings.len(),
            step_count = self.steps.len(),
            "document loaded"
        );
    }

    // ====================================================================
    // Read views
    // ====================================================================

    #[must_use]
    pub fn rings(&self) -> &[Ring] {
        &self.rings
    }

    #[must_use]
    pub fn ring(&self, id: &str) -> Option<&Ring> {
        self.rings.iter().find(|r| r.id == id)
    }

    #[must_use]
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    #[must_use]
    pub fn step(&self, step_number: u32) -> Option<&Step> {
        self.steps.iter().find(|s| s.step_number == step_number)
    }

    #[must_use]
    pub fn metadata(&self) -> &WeaveMetadata {
        &self.metadata
    }

    #[must_use]
    pub fn camera(&self) -> &CameraConfig {
        &self.camera
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    #[must_use]
    pub fn selected_ring_id(&self) -> Option<&str> {
        self.selected_ring_id.as_deref()
    }

    /// The selected ring, if the selection resolves.
    #[must_use]
    pub fn selected_ring(&self) -> Option<&Ring> {
        self.selected_ring_id.as_deref().and_then(|id| self.ring(id))
    }

    #[must_use]
    pub fn transform_mode(&self) -> TransformMode {
        self.transform_mode
    }

    #[must_use]
    pub fn hidden_ring_ids(&self) -> &BTreeSet<String> {
        &self.hidden_ring_ids
    }

    #[must_use]
    pub fn is_ring_hidden(&self, id: &str) -> bool {
        self.hidden_ring_ids.contains(id)
    }

    /// Rings not in the hidden set, in collection order.
    pub fn visible_rings(&self) -> impl Iterator<Item = &Ring> + '_ {
        self.rings
            .iter()
            .filter(|r| !self.hidden_ring_ids.contains(&r.id))
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    #[must_use]
    pub fn history(&self) -> &SnapshotStore<Vec<Ring>> {
        &self.history
    }

    #[must_use]
    pub fn history_mode(&self) -> HistoryMode {
        self.history_mode
    }

    #[must_use]
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    // ====================================================================
    // Selection and mode
    // ====================================================================

    /// Select `id`, or clear the selection with `None`.
    ///
    /// The id is not checked; an unknown id just resolves to no ring.
    pub fn select_ring(&mut self, id: Option<&str>) {
        self.selected_ring_id = id.map(str::to_owned);
    }

    pub fn clear_selection(&mut self) {
        self.selected_ring_id = None;
    }

    pub fn set_transform_mode(&mut self, mode: TransformMode) {
        self.transform_mode = mode;
    }

    // ====================================================================
    // Ring operations (recorded)
    // ====================================================================

    /// Merge `patch` into the ring `id`.
    ///
    /// An empty patch changes nothing and is not recorded.
    pub fn update_ring(&mut self, id: &str, patch: &RingPatch) {
        if patch.is_empty() {
            return;
        }
        let Some(ring) = self.ring_mut(id) else {
            tracing::trace!(target: TARGET, ring_id = id, "update_ring: no such ring");
            return;
        };
        patch.apply_to(ring);
        self.record_history("update_ring");
    }

    /// Replace the transform of ring `id`.
    ///
    /// A drag sends many `Preview` updates followed by one `Commit`; only
    /// the commit lands in the undo log.
    pub fn update_ring_transform(
        &mut self,
        id: &str,
        position: Vec3,
        rotation: Vec3,
        phase: TransformPhase,
    ) {
        let Some(ring) = self.ring_mut(id) else {
            tracing::trace!(target: TARGET, ring_id = id, "update_ring_transform: no such ring");
            return;
        };
        ring.position = position;
        ring.rotation = rotation;
        match phase {
            TransformPhase::Commit => self.record_history("update_ring_transform"),
            TransformPhase::Preview => {
                tracing::trace!(target: TARGET, ring_id = id, "transform preview");
            }
        }
    }

    /// Append a default ring just above the origin and select it.
    pub fn add_ring(&mut self) -> String {
        let id = self.fresh_ring_id();
        let ring = Ring::with_default_geometry(id.clone()).at([0.0, self.config.new_ring_height, 0.0]);
        self.rings.push(ring);
        self.selected_ring_id = Some(id.clone());
        self.record_history("add_ring");
        tracing::debug!(target: TARGET, ring_id = %id, "ring added");
        id
    }

    /// Clone ring `id` with a fresh id, offset along X, and select the copy.
    pub fn duplicate_ring(&mut self, id: &str) -> Option<String> {
        let Some(source) = self.ring(id) else {
            tracing::trace!(target: TARGET, ring_id = id, "duplicate_ring: no such ring");
            return None;
        };
        let mut copy = source.clone();
        copy.id = self.fresh_ring_id();
        copy.position[0] += self.config.duplicate_offset;

        let new_id = copy.id.clone();
        self.rings.push(copy);
        self.selected_ring_id = Some(new_id.clone());
        self.record_history("duplicate_ring");
        tracing::debug!(target: TARGET, source_id = id, ring_id = %new_id, "ring duplicated");
        Some(new_id)
    }

    /// Remove ring `id`.
    ///
    /// Steps that reference the id are left untouched.
    pub fn delete_ring(&mut self, id: &str) {
        let Some(index) = self.rings.iter().position(|r| r.id == id) else {
            tracing::trace!(target: TARGET, ring_id = id, "delete_ring: no such ring");
            return;
        };
        self.rings.remove(index);
        self.hidden_ring_ids.remove(id);
        if self.selected_ring_id.as_deref() == Some(id) {
            self.selected_ring_id = None;
        }
        self.record_history("delete_ring");
        tracing::debug!(target: TARGET, ring_id = id, "ring deleted");
    }

    /// Negate every rotation component of ring `id`.
    pub fn invert_ring_rotation(&mut self, id: &str) {
        let Some(ring) = self.ring_mut(id) else {
            return;
        };
        for angle in &mut ring.rotation {
            *angle = -*angle;
        }
        self.record_history("invert_ring_rotation");
    }

    /// Negate one rotation component of ring `id`.
    pub fn invert_ring_rotation_axis(&mut self, id: &str, axis: Axis) {
        let Some(ring) = self.ring_mut(id) else {
            return;
        };
        let angle = &mut ring.rotation[axis.index()];
        *angle = -*angle;
        self.record_history("invert_ring_rotation_axis");
    }

    /// Replace the whole ring collection.
    pub fn set_rings(&mut self, rings: Vec<Ring>) {
        self.assign_rings(rings);
    }

    // ====================================================================
    // Undo / redo
    // ====================================================================

    /// Restore the previous ring collection. Returns false at the oldest
    /// retained snapshot.
    pub fn undo(&mut self) -> bool {
        match self.history.undo() {
            Some(rings) => {
                self.apply_history_snapshot(rings);
                tracing::debug!(
                    target: TARGET,
                    ring_count = self.rings.len(),
                    can_undo = self.can_undo(),
                    "undo applied"
                );
                true
            }
            None => false,
        }
    }

    /// Re-apply the most recently undone ring collection.
    pub fn redo(&mut self) -> bool {
        match self.history.redo() {
            Some(rings) => {
                self.apply_history_snapshot(rings);
                tracing::debug!(
                    target: TARGET,
                    ring_count = self.rings.len(),
                    can_redo = self.can_redo(),
                    "redo applied"
                );
                true
            }
            None => false,
        }
    }

    fn apply_history_snapshot(&mut self, rings: Vec<Ring>) {
        self.history_mode = HistoryMode::ApplyingHistory;
        self.assign_rings(rings);
        self.history_mode = HistoryMode::Idle;
    }

    /// Single assignment path for whole collections.
    fn assign_rings(&mut self, rings: Vec<Ring>) {
        self.ids.reseed(rings.iter().map(|r| r.id.as_str()));
        self.rings = rings;
        self.record_history("assign_rings");
    }

    fn record_history(&mut self, operation: &'static str) {
        if self.history_mode == HistoryMode::ApplyingHistory {
            tracing::trace!(target: TARGET, operation, "history record suppressed");
            return;
        }
        self.history.record(&self.rings);
        tracing::debug!(
            target: TARGET,
            operation,
            ring_count = self.rings.len(),
            undo_depth = self.history.undo_depth(),
            "document change recorded"
        );
    }

    fn ring_mut(&mut self, id: &str) -> Option<&mut Ring> {
        self.rings.iter_mut().find(|r| r.id == id)
    }

    fn fresh_ring_id(&mut self) -> String {
        let rings = &self.rings;
        self.ids.next_unused_id(|candidate| rings.iter().any(|r| r.id == candidate))
    }

    // ====================================================================
    // Visibility (not recorded)
    // ====================================================================

    pub fn toggle_ring_visibility(&mut self, id: &str) {
        if self.ring(id).is_none() {
            return;
        }
        if !self.hidden_ring_ids.remove(id) {
            self.hidden_ring_ids.insert(id.to_owned());
        }
    }

    /// Hide every ring except `id`.
    pub fn hide_other_rings(&mut self, id: &str) {
        if self.ring(id).is_none() {
            return;
        }
        self.hidden_ring_ids = self
            .rings
            .iter()
            .filter(|r| r.id != id)
            .map(|r| r.id.clone())
            .collect();
    }

    pub fn show_all_rings(&mut self) {
        self.hidden_ring_ids.clear();
    }

    // ====================================================================
    // Steps (not recorded)
    // ====================================================================

    pub fn update_step(&mut self, step_number: u32, patch: &StepPatch) {
        if let Some(step) = self.steps.iter_mut().find(|s| s.step_number == step_number) {
            patch.apply_to(step);
        }
    }

    /// Append a blank step and return its number.
    ///
    /// When the highest number is already `u32::MAX` the existing steps are
    /// renumbered `1..=N` first.
    pub fn add_step(&mut self) -> u32 {
        let highest = self.steps.iter().map(|s| s.step_number).max().unwrap_or(0);
        let next = match highest.checked_add(1) {
            Some(next) => next,
            None => {
                self.renumber_steps();
                self.steps.last().map_or(1, |s| s.step_number.saturating_add(1))
            }
        };
        self.steps.push(Step::blank(next));
        next
    }

    /// Remove step `step_number` and renumber the rest `1..=N`.
    pub fn delete_step(&mut self, step_number: u32) {
        let before = self.steps.len();
        self.steps.retain(|s| s.step_number != step_number);
        if self.steps.len() == before {
            return;
        }
        self.renumber_steps();
    }

    fn renumber_steps(&mut self) {
        for (step, number) in self.steps.iter_mut().zip(1u32..) {
            step.step_number = number;
        }
    }

    // ====================================================================
    // Document fields (not recorded)
    // ====================================================================

    pub fn set_metadata(&mut self, metadata: WeaveMetadata) {
        self.metadata = metadata;
    }

    pub fn set_camera(&mut self, camera: CameraConfig) {
        self.camera = camera;
    }

    pub fn set_scale(&mut self, scale: f64) {
        self.scale = scale;
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    // ====================================================================
    // Export
    // ====================================================================

    /// Snapshot of the exportable document.
    #[must_use]
    pub fn to_tutorial(&self) -> Tutorial {
        Tutorial {
            version: self.version.clone(),
            metadata: self.metadata.clone(),
            default_camera: self.camera,
            scale: self.scale,
            rings: self.rings.clone(),
            steps: self.steps.clone(),
        }
    }

    /// The document as pretty-printed exchange JSON.
    pub fn export_json(&self) -> Result<String, DocumentError> {
        self.to_tutorial().to_json_pretty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainmail_core::tutorial::SEED_COLOR_ROLE;

    fn seed_ring() -> Ring {
        let mut ring = Ring::with_default_geometry("ring-1");
        ring.color_role = SEED_COLOR_ROLE.to_string();
        ring.starts_open = Some(false);
        ring
    }

    fn seeded_store() -> EditorStore {
        EditorStore::new(vec![seed_ring()], None)
    }

    #[test]
    fn add_ring_then_undo_redo() {
        let mut store = seeded_store();
        let id = store.add_ring();

        assert_eq!(id, "ring-2");
        assert_eq!(store.ring("ring-2").unwrap().position, [0.0, 0.5, 0.0]);
        assert_eq!(store.selected_ring_id(), Some("ring-2"));
        assert!(store.can_undo());

        let after_add = store.rings().to_vec();
        assert!(store.undo());
        assert_eq!(store.rings(), &[seed_ring()]);
        assert!(store.can_redo());

        assert!(store.redo());
        assert_eq!(store.rings(), after_add.as_slice());
    }

    #[test]
    fn duplicate_offsets_along_x() {
        let mut store = seeded_store();
        store.update_ring("ring-1", &RingPatch::new().position([1.0, 0.0, 0.0]));

        let copy_id = store.duplicate_ring("ring-1").unwrap();
        assert_ne!(copy_id, "ring-1");
        let copy = store.ring(&copy_id).unwrap();
        assert_eq!(copy.position, [1.3, 0.0, 0.0]);
        assert_eq!(copy.color_role, SEED_COLOR_ROLE);
        assert_eq!(store.selected_ring_id(), Some(copy_id.as_str()));
    }

    #[test]
    fn duplicate_missing_is_noop() {
        let mut store = seeded_store();
        assert_eq!(store.duplicate_ring("ring-404"), None);
        assert_eq!(store.rings().len(), 1);
        assert!(!store.can_undo());
    }

    #[test]
    fn invert_all_axes() {
        let mut store = seeded_store();
        store.update_ring("ring-1", &RingPatch::new().rotation([0.5, -1.2, 0.0]));
        store.invert_ring_rotation("ring-1");

        let rotation = store.ring("ring-1").unwrap().rotation;
        assert_eq!(rotation, [-0.5, 1.2, -0.0]);
        assert!(rotation[2].is_sign_negative());
    }

    #[test]
    fn invert_single_axis() {
        let mut store = seeded_store();
        store.update_ring("ring-1", &RingPatch::new().rotation([0.5, -1.2, 0.3]));
        store.invert_ring_rotation_axis("ring-1", Axis::Y);
        assert_eq!(store.ring("ring-1").unwrap().rotation, [0.5, 1.2, 0.3]);
        assert!(store.undo());
        assert_eq!(store.ring("ring-1").unwrap().rotation, [0.5, -1.2, 0.3]);
    }

    #[test]
    fn delete_clears_selection_and_keeps_steps() {
        let mut store = seeded_store();
        let id = store.add_ring();
        store.add_step();
        store.update_step(2, &StepPatch::new().rings_to_add(vec![id.clone()]));

        store.delete_ring(&id);
        assert!(store.ring(&id).is_none());
        assert_eq!(store.selected_ring_id(), None);
        assert_eq!(store.step(2).unwrap().rings_to_add, vec![id]);
    }

    #[test]
    fn delete_keeps_other_selection() {
        let mut store = seeded_store();
        let second = store.add_ring();
        store.select_ring(Some("ring-1"));
        store.delete_ring(&second);
        assert_eq!(store.selected_ring_id(), Some("ring-1"));
    }

    #[test]
    fn missing_ids_do_not_record() {
        let mut store = seeded_store();
        store.update_ring("nope", &RingPatch::new().wire_gauge(1.0));
        store.update_ring_transform("nope", [1.0; 3], [0.0; 3], TransformPhase::Commit);
        store.delete_ring("nope");
        store.invert_ring_rotation("nope");
        store.invert_ring_rotation_axis("nope", Axis::X);
        assert_eq!(store.history().total_snapshots(), 1);
        assert!(!store.can_undo());
    }

    #[test]
    fn preview_transforms_are_not_recorded() {
        let mut store = seeded_store();
        for i in 0..10 {
            let x = f64::from(i) * 0.1;
            store.update_ring_transform("ring-1", [x, 0.0, 0.0], [0.0; 3], TransformPhase::Preview);
        }
        assert_eq!(store.history().total_snapshots(), 1);
        store.update_ring_transform("ring-1", [2.0, 0.0, 0.0], [0.0; 3], TransformPhase::Commit);
        assert_eq!(store.history().total_snapshots(), 2);

        assert!(store.undo());
        assert_eq!(store.ring("ring-1").unwrap().position, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn undo_does_not_record_itself() {
        let mut store = seeded_store();
        store.add_ring();
        store.add_ring();
        assert_eq!(store.history().total_snapshots(), 3);

        store.undo();
        store.undo();
        assert_eq!(store.history().total_snapshots(), 3);
        assert_eq!(store.history_mode(), HistoryMode::Idle);
        assert!(store.redo());
        assert!(store.redo());
        assert!(!store.redo());
    }

    #[test]
    fn new_mutation_discards_redo() {
        let mut store = seeded_store();
        store.add_ring();
        store.undo();
        assert!(store.can_redo());
        store.add_ring();
        assert!(!store.can_redo());
        assert!(!store.redo());
    }

    #[test]
    fn ids_stay_unique_after_undo() {
        let mut store = seeded_store();
        let first = store.add_ring();
        store.undo();
        let second = store.add_ring();
        assert_ne!(first, second);
    }

    #[test]
    fn set_rings_records_and_reseeds() {
        let mut store = seeded_store();
        store.set_rings(vec![Ring::with_default_geometry("ring-30")]);
        assert!(store.can_undo());
        assert_eq!(store.add_ring(), "ring-31");
    }

    #[test]
    fn visibility_is_view_state() {
        let mut store = seeded_store();
        let second = store.add_ring();
        let third = store.add_ring();
        let depth = store.history().total_snapshots();

        store.toggle_ring_visibility(&second);
        assert!(store.is_ring_hidden(&second));
        let visible: Vec<&str> = store.visible_rings().map(|r| r.id.as_str()).collect();
        assert_eq!(visible, vec!["ring-1", third.as_str()]);

        store.hide_other_rings(&third);
        assert!(store.is_ring_hidden("ring-1"));
        assert!(store.is_ring_hidden(&second));
        assert!(!store.is_ring_hidden(&third));

        store.toggle_ring_visibility("ghost");
        assert!(!store.is_ring_hidden("ghost"));

        store.show_all_rings();
        assert_eq!(store.visible_rings().count(), 3);
        assert_eq!(store.history().total_snapshots(), depth);
    }

    #[test]
    fn deleting_hidden_ring_forgets_it() {
        let mut store = seeded_store();
        let id = store.add_ring();
        store.toggle_ring_visibility(&id);
        store.delete_ring(&id);
        assert!(store.hidden_ring_ids().is_empty());
    }

    #[test]
    fn steps_add_and_renumber() {
        let mut store = EditorStore::new(
            (1..=4)
                .map(|i| Ring::with_default_geometry(format!("ring-{i}")))
                .collect(),
            None,
        );
        assert_eq!(store.steps().len(), 4);
        assert_eq!(store.add_step(), 5);

        store.delete_step(2);
        let numbers: Vec<u32> = store.steps().iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        let adds: Vec<Vec<String>> = store.steps().iter().map(|s| s.rings_to_add.clone()).collect();
        assert_eq!(adds[1], vec!["ring-3".to_string()]);
        assert!(adds[3].is_empty());

        store.delete_step(99);
        assert_eq!(store.steps().len(), 4);
        assert!(!store.can_undo());
    }

    #[test]
    fn base_tutorial_supplies_document_fields() {
        let mut base = Tutorial::new_named("Box Chain");
        base.scale = 2.5;
        base.version = "2.0.0".into();
        let rings = base.rings.clone();
        let store = EditorStore::new(rings, Some(base.clone()));

        assert_eq!(store.metadata(), &base.metadata);
        assert_eq!(store.steps(), base.steps.as_slice());
        assert_eq!(store.scale(), 2.5);
        assert_eq!(store.version(), "2.0.0");
        assert_eq!(store.camera(), &base.default_camera);
    }

    #[test]
    fn empty_authored_steps_stay_empty() {
        let mut base = Tutorial::new_named("Box Chain");
        base.steps.clear();
        let store = EditorStore::from_tutorial(base);
        assert!(store.steps().is_empty());
    }

    #[test]
    fn deleting_every_step_survives_export_and_reload() {
        let mut store = EditorStore::new(vec![Ring::with_default_geometry("ring-1")], None);
        assert_eq!(store.steps().len(), 1);
        store.delete_step(1);
        assert!(store.steps().is_empty());

        let json = store.export_json().unwrap();
        let reloaded = EditorStore::from_tutorial(Tutorial::from_json_str(&json).unwrap());
        assert!(reloaded.steps().is_empty());
        assert_eq!(reloaded.rings(), store.rings());
    }

    #[test]
    fn add_ring_after_highest_possible_id_stays_unique() {
        let max = format!("ring-{}", u64::MAX);
        let mut store = EditorStore::new(vec![Ring::with_default_geometry(max.clone())], None);

        let added = store.add_ring();
        assert_eq!(added, format!("{max}-1"));
        let copy = store.duplicate_ring(&max).unwrap();
        assert_eq!(copy, format!("{max}-2"));

        let mut ids: Vec<&str> = store.rings().iter().map(|r| r.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn add_step_after_highest_step_number_renumbers() {
        let mut base = Tutorial::new_named("Box Chain");
        base.steps[0].step_number = u32::MAX;
        let mut store = EditorStore::from_tutorial(base);

        assert_eq!(store.add_step(), 2);
        let numbers: Vec<u32> = store.steps().iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, vec![1, 2]);
    }

    #[test]
    fn empty_patch_is_not_recorded() {
        let mut store = seeded_store();
        let id = store.add_ring();
        let before = store.history().total_snapshots();

        store.update_ring(&id, &RingPatch::new());
        assert_eq!(store.history().total_snapshots(), before);

        assert!(store.undo());
        assert!(store.ring(&id).is_none());
    }

    #[test]
    fn load_resets_transient_state_and_history() {
        let mut store = seeded_store();
        let id = store.add_ring();
        store.toggle_ring_visibility(&id);
        store.set_transform_mode(TransformMode::Rotate);

        store.load(vec![Ring::with_default_geometry("ring-1")], None);
        assert_eq!(store.selected_ring_id(), None);
        assert!(store.hidden_ring_ids().is_empty());
        assert!(!store.can_undo());
        assert!(!store.can_redo());
        assert_eq!(store.transform_mode(), TransformMode::Rotate);
        assert_eq!(store.add_ring(), "ring-3");
    }

    #[test]
    fn selecting_unknown_id_resolves_to_none() {
        let mut store = seeded_store();
        store.select_ring(Some("ring-77"));
        assert_eq!(store.selected_ring_id(), Some("ring-77"));
        assert!(store.selected_ring().is_none());
    }

    #[test]
    fn export_is_parseable_and_pure() {
        let store = seeded_store();
        let json = store.export_json().unwrap();
        let tutorial = Tutorial::from_json_str(&json).unwrap();
        assert_eq!(tutorial, store.to_tutorial());
        assert_eq!(store.history().total_snapshots(), 1);
    }

    #[test]
    fn history_depth_comes_from_config() {
        let config = EditorConfig::default().with_history_depth(3);
        let mut store = EditorStore::with_config(config, vec![seed_ring()], None);
        for _ in 0..5 {
            store.add_ring();
        }
        assert_eq!(store.history().total_snapshots(), 3);
        assert!(store.undo());
        assert!(store.undo());
        assert!(!store.undo());
        assert_eq!(store.rings().len(), 4);
    }
}
