#![forbid(unsafe_code)]

//! Step-by-step tutorial playback.
//!
//! [`TutorialPlayer`] walks a tutorial's steps in order and derives which
//! rings are on screen at each step. It owns no timer: the host calls
//! [`TutorialPlayer::on_interval_elapsed`] every
//! [`playback_interval`](TutorialPlayer::playback_interval) while
//! [`is_playing`](TutorialPlayer::is_playing) is true.
//!
//! Ring ids are taken from the steps as written. Ids that no longer resolve
//! to a ring are passed through; the renderer skips them.

use std::time::Duration;

use chainmail_core::{KeyCode, KeyEvent, KeyEventKind, Step, Tutorial};

const TARGET: &str = "chainmail.player";

/// Default time each step stays on screen while playing.
pub const DEFAULT_PLAYBACK_INTERVAL: Duration = Duration::from_millis(2000);

/// Playback commands reachable from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    TogglePlay,
    NextStep,
    PrevStep,
    Reset,
}

impl PlayerAction {
    /// Resolve a key event. Text-field focus suppresses every binding.
    #[must_use]
    pub fn from_key(event: &KeyEvent, text_input_focused: bool) -> Option<Self> {
        if text_input_focused || event.kind == KeyEventKind::Release {
            return None;
        }
        match event.code {
            KeyCode::Space | KeyCode::Char(' ') => Some(Self::TogglePlay),
            KeyCode::Right => Some(Self::NextStep),
            KeyCode::Left => Some(Self::PrevStep),
            KeyCode::Home => Some(Self::Reset),
            _ => None,
        }
    }
}

/// Playback state over an optional tutorial.
#[derive(Debug, Clone)]
pub struct TutorialPlayer {
    tutorial: Option<Tutorial>,
    current_step: u32,
    is_playing: bool,
    playback_interval: Duration,
}

impl Default for TutorialPlayer {
    fn default() -> Self {
        Self {
            tutorial: None,
            current_step: 1,
            is_playing: false,
            playback_interval: DEFAULT_PLAYBACK_INTERVAL,
        }
    }
}

impl TutorialPlayer {
    #[must_use]
    pub fn new(tutorial: Option<Tutorial>) -> Self {
        Self {
            tutorial,
            ..Self::default()
        }
    }

    /// Swap in another tutorial.
    ///
    /// Position and play state reset only when the tutorial id changes, so
    /// reloading an edited copy of the same weave keeps the current step.
    pub fn load(&mut self, tutorial: Option<Tutorial>) {
        let old_id = self.tutorial.as_ref().map(|t| t.metadata.id.as_str());
        let new_id = tutorial.as_ref().map(|t| t.metadata.id.as_str());
        let changed = old_id != new_id;
        self.tutorial = tutorial;
        if changed {
            self.reset();
        }
    }

    #[must_use]
    pub fn tutorial(&self) -> Option<&Tutorial> {
        self.tutorial.as_ref()
    }

    // ---------------------------------------------------------------------
    // Derived state
    // ---------------------------------------------------------------------

    #[must_use]
    pub fn current_step(&self) -> u32 {
        self.current_step
    }

    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.is_playing
    }

    #[must_use]
    pub fn playback_interval(&self) -> Duration {
        self.playback_interval
    }

    #[must_use]
    pub fn playback_interval_ms(&self) -> u64 {
        u64::try_from(self.playback_interval.as_millis()).unwrap_or(u64::MAX)
    }

    #[must_use]
    pub fn total_steps(&self) -> u32 {
        self.steps()
            .len()
            .try_into()
            .unwrap_or(u32::MAX)
    }

    #[must_use]
    pub fn can_go_next(&self) -> bool {
        self.current_step < self.total_steps()
    }

    #[must_use]
    pub fn can_go_prev(&self) -> bool {
        self.current_step > 1
    }

    #[must_use]
    pub fn current_step_data(&self) -> Option<&Step> {
        self.steps()
            .iter()
            .find(|s| s.step_number == self.current_step)
    }

    /// Every ring introduced up to and including the current step.
    #[must_use]
    pub fn visible_ring_ids(&self) -> Vec<&str> {
        self.steps()
            .iter()
            .filter(|s| s.step_number <= self.current_step)
            .flat_map(|s| s.rings_to_add.iter().map(String::as_str))
            .collect()
    }

    /// Rings introduced by the current step.
    #[must_use]
    pub fn new_ring_ids(&self) -> &[String] {
        self.current_step_data()
            .map(|s| s.rings_to_add.as_slice())
            .unwrap_or(&[])
    }

    #[must_use]
    pub fn highlighted_ring_ids(&self) -> &[String] {
        self.current_step_data()
            .and_then(|s| s.rings_to_highlight.as_deref())
            .unwrap_or(&[])
    }

    fn steps(&self) -> &[Step] {
        self.tutorial
            .as_ref()
            .map(|t| t.steps.as_slice())
            .unwrap_or(&[])
    }

    // ---------------------------------------------------------------------
    // Transport
    // ---------------------------------------------------------------------

    pub fn play(&mut self) {
        self.is_playing = true;
    }

    pub fn pause(&mut self) {
        self.is_playing = false;
    }

    pub fn toggle_play(&mut self) {
        self.is_playing = !self.is_playing;
    }

    /// Advance one step; at the last step, stop playing instead.
    pub fn next_step(&mut self) {
        if self.can_go_next() {
            self.current_step += 1;
            tracing::trace!(target: TARGET, step = self.current_step, "step advanced");
        } else {
            self.is_playing = false;
        }
    }

    pub fn prev_step(&mut self) {
        if self.can_go_prev() {
            self.current_step -= 1;
        }
    }

    /// Jump to `step`. Out-of-range steps are ignored.
    pub fn go_to_step(&mut self, step: u32) {
        if (1..=self.total_steps()).contains(&step) {
            self.current_step = step;
        }
    }

    pub fn reset(&mut self) {
        self.current_step = 1;
        self.is_playing = false;
    }

    pub fn set_playback_interval(&mut self, interval: Duration) {
        self.playback_interval = interval;
    }

    /// Timer callback for auto-advance. Does nothing while paused.
    pub fn on_interval_elapsed(&mut self) {
        if self.is_playing {
            self.next_step();
        }
    }

    /// Run `action`.
    pub fn apply(&mut self, action: PlayerAction) {
        match action {
            PlayerAction::TogglePlay => self.toggle_play(),
            PlayerAction::NextStep => self.next_step(),
            PlayerAction::PrevStep => self.prev_step(),
            PlayerAction::Reset => self.reset(),
        }
    }

    /// Resolve and run a key event. Returns the action that ran.
    pub fn handle_key(&mut self, event: &KeyEvent, text_input_focused: bool) -> Option<PlayerAction> {
        let action = PlayerAction::from_key(event, text_input_focused)?;
        tracing::trace!(target: TARGET, ?action, "key resolved");
        self.apply(action);
        Some(action)
    }
}
