#![forbid(unsafe_code)]

//! Keyboard command routing for the editor.
//!
//! The presentation layer feeds every key chord it receives into a
//! [`CommandRouter`]. The router resolves the chord to an [`EditorAction`]
//! using a fixed table and two gates, then optionally executes the action
//! against an [`EditorStore`].
//!
//! # Key Concepts
//!
//! - **KeyContext**: Focus and selection flags queried when a key resolves.
//! - **EditorAction**: The editor command a chord stands for.
//! - **PrimaryModifier**: Which modifier turns `z`/`y` into undo/redo
//!   (Ctrl on most platforms, Command on macOS).
//!
//! # Resolution Order
//!
//! ```text
//! key ──▶ release? ──yes──▶ None
//!            │
//!            no
//!            ▼
//!   primary modifier + z / y ──────────▶ Undo / Redo   (ignores focus)
//!            │
//!            ▼
//!   text field focused? ──yes──▶ None
//!            │
//!            no
//!            ▼
//!   other Ctrl/Alt/Super chord? ──yes──▶ None
//!            │
//!            no
//!            ▼
//!   binding table ──▶ needs selection and none selected? ──yes──▶ None
//!                                │
//!                                no ──▶ Some(action)
//! ```
//!
//! # Bindings
//!
//! | Key | Action |
//! |-----|--------|
//! | `t` | Translate mode |
//! | `r` | Rotate mode |
//! | `d` | Duplicate selection |
//! | `Delete` / `Backspace` | Delete selection |
//! | `Escape` | Clear selection |
//! | `i` | Invert all rotation axes |
//! | `x` / `y` / `z` | Invert one rotation axis |
//! | primary + `z` | Undo |
//! | primary + `y`, primary + Shift + `z` | Redo |
//!
//! # Example
//!
//! ```
//! use chainmail_core::{KeyCode, KeyEvent, Modifiers};
//! use chainmail_runtime::keybinding::{CommandRouter, EditorAction, KeyContext};
//!
//! let router = CommandRouter::with_defaults();
//! let undo = KeyEvent::new(KeyCode::Char('z')).with_modifiers(Modifiers::CTRL);
//!
//! // Undo fires even while typing in a text field.
//! let typing = KeyContext::new().with_text_input(true);
//! assert_eq!(router.map(&undo, &typing), Some(EditorAction::Undo));
//! ```

use serde::{Deserialize, Serialize};

use chainmail_core::{KeyCode, KeyEvent, KeyEventKind};

use crate::config::EditorConfig;
use crate::editor::{Axis, EditorStore, TransformMode};

const TARGET: &str = "chainmail.keys";

// ---------------------------------------------------------------------------
// Primary modifier
// ---------------------------------------------------------------------------

/// The modifier that turns `z`/`y` into undo/redo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryModifier {
    /// Control only.
    Ctrl,
    /// Super/Command only.
    Super,
    /// Either Control or Super.
    #[default]
    Either,
}

impl PrimaryModifier {
    /// Parse from string (environment variable value).
    #[must_use]
    pub fn from_str_opt(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "ctrl" | "control" => Some(Self::Ctrl),
            "super" | "cmd" | "command" | "meta" => Some(Self::Super),
            "either" | "any" | "both" => Some(Self::Either),
            _ => None,
        }
    }

    /// Whether `event` holds this primary modifier.
    #[must_use]
    pub const fn is_held(self, event: &KeyEvent) -> bool {
        match self {
            Self::Ctrl => event.ctrl(),
            Self::Super => event.super_key(),
            Self::Either => event.ctrl() || event.super_key(),
        }
    }
}

// ---------------------------------------------------------------------------
// Context
// ---------------------------------------------------------------------------

/// Runtime flags that affect key resolution.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyContext {
    /// True if keyboard focus is in a text-entry field.
    pub text_input_focused: bool,

    /// True if a ring is selected.
    pub has_selection: bool,
}

impl KeyContext {
    /// Create a context with all flags false.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            text_input_focused: false,
            has_selection: false,
        }
    }

    #[must_use]
    pub const fn with_text_input(mut self, focused: bool) -> Self {
        self.text_input_focused = focused;
        self
    }

    #[must_use]
    pub const fn with_selection(mut self, selected: bool) -> Self {
        self.has_selection = selected;
        self
    }
}

// ---------------------------------------------------------------------------
// Actions
// ---------------------------------------------------------------------------

/// Editor commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorAction {
    SetTransformMode(TransformMode),
    DuplicateSelection,
    DeleteSelection,
    ClearSelection,
    /// Negate every rotation component of the selection.
    InvertRotation,
    /// Negate one rotation component of the selection.
    InvertRotationAxis(Axis),
    Undo,
    Redo,
}

impl EditorAction {
    /// Check if this action operates on the selected ring.
    #[must_use]
    pub const fn needs_selection(&self) -> bool {
        matches!(
            self,
            Self::DuplicateSelection
                | Self::DeleteSelection
                | Self::InvertRotation
                | Self::InvertRotationAxis(_)
        )
    }
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

/// Maps key chords to editor actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CommandRouter {
    primary: PrimaryModifier,
}

impl CommandRouter {
    #[must_use]
    pub const fn new(primary: PrimaryModifier) -> Self {
        Self { primary }
    }

    /// Router with the default primary modifier.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn from_config(config: &EditorConfig) -> Self {
        Self::new(config.primary_modifier)
    }

    #[must_use]
    pub const fn primary_modifier(&self) -> PrimaryModifier {
        self.primary
    }

    /// Resolve a key event to an action.
    ///
    /// Returns `None` when the key is unbound, suppressed by focus, or
    /// selection-dependent with nothing selected.
    #[must_use]
    pub fn map(&self, event: &KeyEvent, ctx: &KeyContext) -> Option<EditorAction> {
        if event.kind == KeyEventKind::Release {
            return None;
        }

        // Undo/redo chords are checked first so plain `y`/`z` never see them.
        if self.primary.is_held(event) {
            return match event.lowercase_char() {
                Some('z') if event.shift() => Some(EditorAction::Redo),
                Some('z') => Some(EditorAction::Undo),
                Some('y') => Some(EditorAction::Redo),
                _ => None,
            };
        }

        if ctx.text_input_focused {
            return None;
        }

        if event.ctrl() || event.alt() || event.super_key() {
            return None;
        }

        let action = match event.code {
            KeyCode::Delete | KeyCode::Backspace => EditorAction::DeleteSelection,
            KeyCode::Escape => EditorAction::ClearSelection,
            KeyCode::Char(_) => match event.lowercase_char()? {
                't' => EditorAction::SetTransformMode(TransformMode::Translate),
                'r' => EditorAction::SetTransformMode(TransformMode::Rotate),
                'd' => EditorAction::DuplicateSelection,
                'i' => EditorAction::InvertRotation,
                'x' => EditorAction::InvertRotationAxis(Axis::X),
                'y' => EditorAction::InvertRotationAxis(Axis::Y),
                'z' => EditorAction::InvertRotationAxis(Axis::Z),
                _ => return None,
            },
            _ => return None,
        };

        if action.needs_selection() && !ctx.has_selection {
            return None;
        }
        Some(action)
    }

    /// Resolve `event` against `store` and run the resulting action.
    ///
    /// Returns the action that ran, if any.
    pub fn dispatch(
        &self,
        event: &KeyEvent,
        text_input_focused: bool,
        store: &mut EditorStore,
    ) -> Option<EditorAction> {
        let ctx = KeyContext::new()
            .with_text_input(text_input_focused)
            .with_selection(store.selected_ring().is_some());
        let action = self.map(event, &ctx)?;
        tracing::trace!(target: TARGET, ?action, code = ?event.code, "key resolved");
        execute(action, store);
        Some(action)
    }
}

/// Run `action` against `store`.
///
/// Selection-dependent actions do nothing without a resolvable selection.
pub fn execute(action: EditorAction, store: &mut EditorStore) {
    let selected = store.selected_ring().map(|r| r.id.clone());
    match (action, selected) {
        (EditorAction::SetTransformMode(mode), _) => store.set_transform_mode(mode),
        (EditorAction::ClearSelection, _) => store.clear_selection(),
        (EditorAction::Undo, _) => {
            store.undo();
        }
        (EditorAction::Redo, _) => {
            store.redo();
        }
        (EditorAction::DuplicateSelection, Some(id)) => {
            store.duplicate_ring(&id);
        }
        (EditorAction::DeleteSelection, Some(id)) => store.delete_ring(&id),
        (EditorAction::InvertRotation, Some(id)) => store.invert_ring_rotation(&id),
        (EditorAction::InvertRotationAxis(axis), Some(id)) => {
            store.invert_ring_rotation_axis(&id, axis);
        }
        (_, None) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chainmail_core::{Modifiers, Ring};

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c))
    }

    fn chord(c: char, modifiers: Modifiers) -> KeyEvent {
        key(c).with_modifiers(modifiers)
    }

    fn selected() -> KeyContext {
        KeyContext::new().with_selection(true)
    }

    #[test]
    fn plain_letters_map_to_editing_commands() {
        let router = CommandRouter::with_defaults();
        let ctx = selected();
        assert_eq!(
            router.map(&key('t'), &ctx),
            Some(EditorAction::SetTransformMode(TransformMode::Translate))
        );
        assert_eq!(
            router.map(&key('R'), &ctx),
            Some(EditorAction::SetTransformMode(TransformMode::Rotate))
        );
        assert_eq!(router.map(&key('d'), &ctx), Some(EditorAction::DuplicateSelection));
        assert_eq!(router.map(&key('i'), &ctx), Some(EditorAction::InvertRotation));
        assert_eq!(
            router.map(&key('x'), &ctx),
            Some(EditorAction::InvertRotationAxis(Axis::X))
        );
        assert_eq!(
            router.map(&key('y'), &ctx),
            Some(EditorAction::InvertRotationAxis(Axis::Y))
        );
        assert_eq!(
            router.map(&key('z'), &ctx),
            Some(EditorAction::InvertRotationAxis(Axis::Z))
        );
        assert_eq!(router.map(&key('q'), &ctx), None);
    }

    #[test]
    fn special_keys() {
        let router = CommandRouter::with_defaults();
        let ctx = selected();
        for code in [KeyCode::Delete, KeyCode::Backspace] {
            assert_eq!(
                router.map(&KeyEvent::new(code), &ctx),
                Some(EditorAction::DeleteSelection)
            );
        }
        assert_eq!(
            router.map(&KeyEvent::new(KeyCode::Escape), &KeyContext::new()),
            Some(EditorAction::ClearSelection)
        );
        assert_eq!(router.map(&KeyEvent::new(KeyCode::Enter), &ctx), None);
    }

    #[test]
    fn primary_chords_take_precedence() {
        let router = CommandRouter::with_defaults();
        let ctx = selected();
        assert_eq!(router.map(&chord('z', Modifiers::CTRL), &ctx), Some(EditorAction::Undo));
        assert_eq!(router.map(&chord('z', Modifiers::SUPER), &ctx), Some(EditorAction::Undo));
        assert_eq!(router.map(&chord('y', Modifiers::CTRL), &ctx), Some(EditorAction::Redo));
        assert_eq!(
            router.map(&chord('Z', Modifiers::CTRL | Modifiers::SHIFT), &ctx),
            Some(EditorAction::Redo)
        );
        assert_eq!(router.map(&chord('t', Modifiers::CTRL), &ctx), None);
    }

    #[test]
    fn undo_ignores_focus_but_letters_do_not() {
        let router = CommandRouter::with_defaults();
        let typing = selected().with_text_input(true);
        assert_eq!(router.map(&chord('z', Modifiers::CTRL), &typing), Some(EditorAction::Undo));
        assert_eq!(router.map(&key('z'), &typing), None);
        assert_eq!(router.map(&key('d'), &typing), None);
        assert_eq!(router.map(&KeyEvent::new(KeyCode::Backspace), &typing), None);
    }

    #[test]
    fn selection_gate() {
        let router = CommandRouter::with_defaults();
        let none = KeyContext::new();
        assert_eq!(router.map(&key('d'), &none), None);
        assert_eq!(router.map(&key('x'), &none), None);
        assert_eq!(router.map(&KeyEvent::new(KeyCode::Delete), &none), None);
        assert_eq!(
            router.map(&key('t'), &none),
            Some(EditorAction::SetTransformMode(TransformMode::Translate))
        );
        assert_eq!(router.map(&chord('z', Modifiers::CTRL), &none), Some(EditorAction::Undo));
    }

    #[test]
    fn foreign_chords_are_unbound() {
        let router = CommandRouter::with_defaults();
        let ctx = selected();
        assert_eq!(router.map(&chord('d', Modifiers::ALT), &ctx), None);
        assert_eq!(router.map(&chord('x', Modifiers::ALT | Modifiers::SHIFT), &ctx), None);
        assert_eq!(
            router.map(&chord('T', Modifiers::SHIFT), &ctx),
            Some(EditorAction::SetTransformMode(TransformMode::Translate))
        );
    }

    #[test]
    fn ctrl_only_router_leaves_super_chords_alone() {
        let router = CommandRouter::new(PrimaryModifier::Ctrl);
        assert_eq!(router.map(&chord('z', Modifiers::SUPER), &selected()), None);
        assert_eq!(router.map(&chord('z', Modifiers::CTRL), &selected()), Some(EditorAction::Undo));
    }

    #[test]
    fn release_is_ignored_repeat_is_not() {
        let router = CommandRouter::with_defaults();
        let release = key('t').with_kind(KeyEventKind::Release);
        let repeat = key('t').with_kind(KeyEventKind::Repeat);
        assert_eq!(router.map(&release, &selected()), None);
        assert!(router.map(&repeat, &selected()).is_some());
    }

    #[test]
    fn primary_modifier_parsing() {
        assert_eq!(PrimaryModifier::from_str_opt("Ctrl"), Some(PrimaryModifier::Ctrl));
        assert_eq!(PrimaryModifier::from_str_opt(" cmd "), Some(PrimaryModifier::Super));
        assert_eq!(PrimaryModifier::from_str_opt("either"), Some(PrimaryModifier::Either));
        assert_eq!(PrimaryModifier::from_str_opt("hyper"), None);
    }

    #[test]
    fn dispatch_runs_against_store() {
        let router = CommandRouter::with_defaults();
        let mut store = EditorStore::new(vec![Ring::with_default_geometry("ring-1")], None);

        assert_eq!(router.dispatch(&key('d'), false, &mut store), None);

        store.select_ring(Some("ring-1"));
        assert_eq!(
            router.dispatch(&key('d'), false, &mut store),
            Some(EditorAction::DuplicateSelection)
        );
        assert_eq!(store.rings().len(), 2);

        router.dispatch(&chord('z', Modifiers::CTRL), true, &mut store);
        assert_eq!(store.rings().len(), 1);
        router.dispatch(&chord('y', Modifiers::CTRL), false, &mut store);
        assert_eq!(store.rings().len(), 2);

        router.dispatch(&KeyEvent::new(KeyCode::Escape), false, &mut store);
        assert_eq!(store.selected_ring_id(), None);
    }

    #[test]
    fn dangling_selection_counts_as_none() {
        let router = CommandRouter::with_defaults();
        let mut store = EditorStore::new(vec![Ring::with_default_geometry("ring-1")], None);
        store.select_ring(Some("ring-9"));
        assert_eq!(router.dispatch(&key('i'), false, &mut store), None);
        assert!(!store.can_undo());
    }
}
