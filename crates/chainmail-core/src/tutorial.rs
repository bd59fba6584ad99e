#![forbid(unsafe_code)]

//! Tutorial document model.
//!
//! These types mirror the JSON exchange format one to one. Field names are
//! camelCase on the wire, optional fields are omitted when absent, and the
//! top-level field order is `version, metadata, defaultCamera, scale, rings,
//! steps`.
//!
//! The editor trusts documents handed to it: dimensions are not range
//! checked and step references are not resolved against the ring list.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::steps::{SEED_STEP_DESCRIPTION, SEED_STEP_TIP, SEED_STEP_TITLE};

/// World-space triple: position offset or Euler rotation in radians.
pub type Vec3 = [f64; 3];

/// Version stamped on freshly created documents.
pub const DEFAULT_VERSION: &str = "1.0.0";

/// Color role marking the structural seed of a weave.
pub const SEED_COLOR_ROLE: &str = "seed";

/// Color role given to rings created in the editor.
pub const CONNECTOR_COLOR_ROLE: &str = "connector";

// ---------------------------------------------------------------------------
// Ring
// ---------------------------------------------------------------------------

/// A single torus-shaped weave element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ring {
    /// Unique within a ring collection; referenced by steps.
    pub id: String,
    pub position: Vec3,
    pub rotation: Vec3,
    pub inner_diameter: f64,
    pub outer_diameter: f64,
    pub wire_gauge: f64,
    /// Presentation category (`seed`, `connector`, ...). Open set.
    pub color_role: String,
    /// Render as animating from open to closed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starts_open: Option<bool>,
}

impl Ring {
    /// A ring with the editor's default geometry at the origin.
    #[must_use]
    pub fn with_default_geometry(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            position: [0.0, 0.0, 0.0],
            rotation: [0.0, 0.0, 0.0],
            inner_diameter: 0.6,
            outer_diameter: 0.8,
            wire_gauge: 0.1,
            color_role: CONNECTOR_COLOR_ROLE.to_string(),
            starts_open: Some(true),
        }
    }

    /// Move to `position`.
    #[must_use]
    pub fn at(mut self, position: Vec3) -> Self {
        self.position = position;
        self
    }

    /// Whether the color role marks this ring as the weave's seed.
    #[must_use]
    pub fn is_seed(&self) -> bool {
        self.color_role == SEED_COLOR_ROLE
    }
}

/// Partial update for a [`Ring`].
///
/// Every field except `id` can be replaced; ring identity is fixed for the
/// ring's lifetime.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RingPatch {
    pub position: Option<Vec3>,
    pub rotation: Option<Vec3>,
    pub inner_diameter: Option<f64>,
    pub outer_diameter: Option<f64>,
    pub wire_gauge: Option<f64>,
    pub color_role: Option<String>,
    /// `Some(None)` clears the flag.
    pub starts_open: Option<Option<bool>>,
}

impl RingPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn position(mut self, position: Vec3) -> Self {
        self.position = Some(position);
        self
    }

    #[must_use]
    pub fn rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = Some(rotation);
        self
    }

    #[must_use]
    pub fn inner_diameter(mut self, value: f64) -> Self {
        self.inner_diameter = Some(value);
        self
    }

    #[must_use]
    pub fn outer_diameter(mut self, value: f64) -> Self {
        self.outer_diameter = Some(value);
        self
    }

    #[must_use]
    pub fn wire_gauge(mut self, value: f64) -> Self {
        self.wire_gauge = Some(value);
        self
    }

    #[must_use]
    pub fn color_role(mut self, role: impl Into<String>) -> Self {
        self.color_role = Some(role.into());
        self
    }

    #[must_use]
    pub fn starts_open(mut self, starts_open: Option<bool>) -> Self {
        self.starts_open = Some(starts_open);
        self
    }

    /// True when applying the patch would change nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge the present fields into `ring`.
    pub fn apply_to(&self, ring: &mut Ring) {
        if let Some(position) = self.position {
            ring.position = position;
        }
        if let Some(rotation) = self.rotation {
            ring.rotation = rotation;
        }
        if let Some(value) = self.inner_diameter {
            ring.inner_diameter = value;
        }
        if let Some(value) = self.outer_diameter {
            ring.outer_diameter = value;
        }
        if let Some(value) = self.wire_gauge {
            ring.wire_gauge = value;
        }
        if let Some(role) = &self.color_role {
            ring.color_role.clone_from(role);
        }
        if let Some(starts_open) = self.starts_open {
            ring.starts_open = starts_open;
        }
    }
}

// ---------------------------------------------------------------------------
// Step
// ---------------------------------------------------------------------------

/// An ordered tutorial beat.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    /// 1-based, unique, contiguous by convention.
    pub step_number: u32,
    pub title: String,
    pub description: String,
    pub rings_to_add: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rings_to_highlight: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<Vec<String>>,
}

impl Step {
    /// A blank step with no rings.
    #[must_use]
    pub fn blank(step_number: u32) -> Self {
        Self {
            step_number,
            title: String::new(),
            description: String::new(),
            rings_to_add: Vec::new(),
            rings_to_highlight: None,
            tips: None,
        }
    }
}

/// Partial update for a [`Step`]. The step number is not patchable.
///
/// The optional list fields are tri-state: `None` leaves the field alone,
/// `Some(None)` clears it, `Some(Some(list))` replaces it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StepPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    pub rings_to_add: Option<Vec<String>>,
    pub rings_to_highlight: Option<Option<Vec<String>>>,
    pub tips: Option<Option<Vec<String>>>,
}

impl StepPatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn rings_to_add(mut self, ids: Vec<String>) -> Self {
        self.rings_to_add = Some(ids);
        self
    }

    #[must_use]
    pub fn rings_to_highlight(mut self, ids: Option<Vec<String>>) -> Self {
        self.rings_to_highlight = Some(ids);
        self
    }

    #[must_use]
    pub fn tips(mut self, tips: Option<Vec<String>>) -> Self {
        self.tips = Some(tips);
        self
    }

    pub fn apply_to(&self, step: &mut Step) {
        if let Some(title) = &self.title {
            step.title.clone_from(title);
        }
        if let Some(description) = &self.description {
            step.description.clone_from(description);
        }
        if let Some(ids) = &self.rings_to_add {
            step.rings_to_add.clone_from(ids);
        }
        if let Some(ids) = &self.rings_to_highlight {
            step.rings_to_highlight.clone_from(ids);
        }
        if let Some(tips) = &self.tips {
            step.tips.clone_from(tips);
        }
    }
}

// ---------------------------------------------------------------------------
// Metadata and camera
// ---------------------------------------------------------------------------

/// Weave difficulty rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
    Expert,
}

impl Difficulty {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }
}

/// Aspect-ratio hints (inner diameter over wire gauge).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectRatio {
    pub minimum: f64,
    pub recommended: f64,
    pub maximum: f64,
}

/// Descriptive record for the whole tutorial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeaveMetadata {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alternate_names: Option<Vec<String>>,
    pub difficulty: Difficulty,
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub history: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
}

impl Default for WeaveMetadata {
    fn default() -> Self {
        Self {
            id: "untitled-weave".to_string(),
            name: "Untitled Weave".to_string(),
            alternate_names: None,
            difficulty: Difficulty::Beginner,
            description: String::new(),
            history: None,
            aspect_ratio: None,
            tags: None,
        }
    }
}

/// Default viewing position for presentation. Opaque to the editor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    pub position: Vec3,
    pub target: Vec3,
    pub fov: f64,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: [0.0, 5.0, 10.0],
            target: [0.0, 0.0, 0.0],
            fov: 50.0,
        }
    }
}

// ---------------------------------------------------------------------------
// Tutorial document
// ---------------------------------------------------------------------------

/// A complete tutorial document as exchanged with loaders and savers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tutorial {
    pub version: String,
    pub metadata: WeaveMetadata,
    pub default_camera: CameraConfig,
    pub scale: f64,
    pub rings: Vec<Ring>,
    pub steps: Vec<Step>,
}

impl Tutorial {
    /// Decode a tutorial document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Encode as two-space indented JSON.
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Start a custom weave: one closed seed ring and its introductory step.
    #[must_use]
    pub fn new_named(name: &str) -> Self {
        let seed = Ring {
            id: "ring-1".to_string(),
            position: [0.0, 0.0, 0.0],
            rotation: [1.5708, 0.0, 0.7854],
            inner_diameter: 0.6,
            outer_diameter: 0.8,
            wire_gauge: 0.1,
            color_role: SEED_COLOR_ROLE.to_string(),
            starts_open: Some(false),
        };
        let intro = Step {
            step_number: 1,
            title: SEED_STEP_TITLE.to_string(),
            description: SEED_STEP_DESCRIPTION.to_string(),
            rings_to_add: vec![seed.id.clone()],
            rings_to_highlight: None,
            tips: Some(vec![SEED_STEP_TIP.to_string()]),
        };

        Self {
            version: DEFAULT_VERSION.to_string(),
            metadata: WeaveMetadata {
                id: to_dash_case(name),
                name: name.to_string(),
                difficulty: Difficulty::Beginner,
                description: format!("A custom chainmail weave: {name}"),
                tags: Some(vec!["custom".to_string()]),
                ..WeaveMetadata::default()
            },
            default_camera: CameraConfig {
                position: [0.0, 3.0, 6.0],
                target: [0.0, 0.0, 0.0],
                fov: 50.0,
            },
            scale: 1.0,
            rings: vec![seed],
            steps: vec![intro],
        }
    }

    /// File name a saver should suggest for this document.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.json", self.metadata.id)
    }
}

/// Normalize a display name into a file-safe id.
///
/// Lower-cases, trims, drops everything outside `[a-z0-9-]` and whitespace,
/// turns whitespace runs into `-` and collapses repeated dashes.
#[must_use]
pub fn to_dash_case(name: &str) -> String {
    let lowered = name.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    for ch in lowered.trim().chars() {
        let ch = if ch.is_whitespace() { '-' } else { ch };
        if !(ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-') {
            continue;
        }
        if ch == '-' && out.ends_with('-') {
            continue;
        }
        out.push(ch);
    }
    out
}

/// A name is usable when it yields a non-empty id.
#[must_use]
pub fn is_valid_tutorial_name(name: &str) -> bool {
    !to_dash_case(name).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EUROPEAN_JSON: &str = r#"{
        "version": "1.0.0",
        "metadata": {
            "id": "european-4-in-1",
            "name": "European 4-in-1",
            "alternateNames": ["E4-1"],
            "difficulty": "beginner",
            "description": "The classic.",
            "aspectRatio": { "minimum": 3.8, "recommended": 4.2, "maximum": 5.5 },
            "tags": ["classic"]
        },
        "defaultCamera": { "position": [0, 5, 10], "target": [0, 0, 0], "fov": 50 },
        "scale": 1.0,
        "rings": [
            { "id": "ring-1", "position": [0, 0, 0], "rotation": [1.5708, 0, 0],
              "innerDiameter": 0.6, "outerDiameter": 0.8, "wireGauge": 0.1, "colorRole": "seed" },
            { "id": "ring-2", "position": [0.3, 0, 0], "rotation": [0, 0, 0],
              "innerDiameter": 0.6, "outerDiameter": 0.8, "wireGauge": 0.1, "colorRole": "connector",
              "startsOpen": true }
        ],
        "steps": [
            { "stepNumber": 1, "title": "Seed", "description": "Start.", "ringsToAdd": ["ring-1"] },
            { "stepNumber": 2, "title": "Link", "description": "Thread.", "ringsToAdd": ["ring-2"],
              "ringsToHighlight": ["ring-1"], "tips": ["Go through both"] }
        ]
    }"#;

    #[test]
    fn parses_exchange_document() {
        let tutorial = Tutorial::from_json_str(EUROPEAN_JSON).unwrap();
        assert_eq!(tutorial.metadata.difficulty, Difficulty::Beginner);
        assert_eq!(tutorial.metadata.alternate_names.as_deref(), Some(&["E4-1".to_string()][..]));
        assert_eq!(tutorial.rings.len(), 2);
        assert!(tutorial.rings[0].is_seed());
        assert_eq!(tutorial.rings[0].starts_open, None);
        assert_eq!(tutorial.rings[1].starts_open, Some(true));
        assert_eq!(tutorial.steps[1].rings_to_highlight, Some(vec!["ring-1".to_string()]));
        assert_eq!(tutorial.default_camera.fov, 50.0);
    }

    #[test]
    fn serializes_camel_case_in_exchange_order() {
        let json = Tutorial::from_json_str(EUROPEAN_JSON)
            .unwrap()
            .to_json_pretty()
            .unwrap();
        let version = json.find("\"version\"").unwrap();
        let metadata = json.find("\"metadata\"").unwrap();
        let camera = json.find("\"defaultCamera\"").unwrap();
        let scale = json.find("\"scale\"").unwrap();
        let rings = json.find("\"rings\"").unwrap();
        let steps = json.find("\"steps\"").unwrap();
        assert!(version < metadata && metadata < camera && camera < scale);
        assert!(scale < rings && rings < steps);
        assert!(json.contains("\"innerDiameter\""));
        assert!(json.contains("\"ringsToAdd\""));
        assert!(json.contains("\n  \"version\""), "two-space indentation");
    }

    #[test]
    fn absent_optionals_are_omitted() {
        let json = Tutorial::from_json_str(EUROPEAN_JSON)
            .unwrap()
            .to_json_pretty()
            .unwrap();
        assert!(!json.contains("\"history\""));
        assert_eq!(json.matches("\"startsOpen\"").count(), 1);
        assert_eq!(json.matches("\"tips\"").count(), 1);
    }

    #[test]
    fn rejects_unknown_difficulty() {
        let bad = EUROPEAN_JSON.replace("\"beginner\"", "\"legendary\"");
        assert!(Tutorial::from_json_str(&bad).is_err());
    }

    #[test]
    fn ring_patch_leaves_id_and_absent_fields() {
        let mut ring = Ring::with_default_geometry("ring-7");
        RingPatch::new()
            .wire_gauge(0.12)
            .color_role("bronze")
            .starts_open(None)
            .apply_to(&mut ring);
        assert_eq!(ring.id, "ring-7");
        assert_eq!(ring.wire_gauge, 0.12);
        assert_eq!(ring.color_role, "bronze");
        assert_eq!(ring.starts_open, None);
        assert_eq!(ring.inner_diameter, 0.6);
        assert!(RingPatch::new().is_empty());
    }

    #[test]
    fn step_patch_tri_state_lists() {
        let mut step = Step::blank(3);
        step.tips = Some(vec!["old".into()]);

        StepPatch::new().title("Close it").apply_to(&mut step);
        assert_eq!(step.tips, Some(vec!["old".to_string()]));

        StepPatch::new().tips(None).apply_to(&mut step);
        assert_eq!(step.tips, None);
        assert_eq!(step.title, "Close it");
        assert_eq!(step.step_number, 3);
    }

    #[test]
    fn dash_case_matches_file_naming() {
        assert_eq!(to_dash_case("Byzantine 3-in-3"), "byzantine-3-in-3");
        assert_eq!(to_dash_case("  European   4 in 1 "), "european-4-in-1");
        assert_eq!(to_dash_case("Hello -- World!"), "hello-world");
        assert_eq!(to_dash_case("!!!"), "");
        assert!(!is_valid_tutorial_name("  ?? "));
        assert!(is_valid_tutorial_name("Box Chain"));
    }

    #[test]
    fn new_named_builds_seed_document() {
        let tutorial = Tutorial::new_named("Box Chain");
        assert_eq!(tutorial.metadata.id, "box-chain");
        assert_eq!(tutorial.metadata.description, "A custom chainmail weave: Box Chain");
        assert_eq!(tutorial.metadata.tags, Some(vec!["custom".to_string()]));
        assert_eq!(tutorial.rings.len(), 1);
        assert!(tutorial.rings[0].is_seed());
        assert_eq!(tutorial.rings[0].starts_open, Some(false));
        assert_eq!(tutorial.steps[0].rings_to_add, vec!["ring-1".to_string()]);
        assert_eq!(tutorial.default_camera.position, [0.0, 3.0, 6.0]);
        assert_eq!(tutorial.file_name(), "box-chain.json");
    }
}
