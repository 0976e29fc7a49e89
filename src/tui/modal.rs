//! Dialog shell lifecycle: `Closed → Opening → Open → Closing → Closed`.
//!
//! The controller is driven by explicit intents (`open`, `close`, key and
//! backdrop input) plus `tick` calls from the event loop, which complete the
//! enter/exit transitions once their delays have elapsed. It never looks at
//! the clock itself.

use std::fmt::Debug;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::layout::Rect;

/// Delay between an open request and the dialog becoming interactive
pub const ENTER_DELAY: Duration = Duration::from_millis(10);
/// Length of the exit transition before focus is restored
pub const EXIT_DELAY: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalSize {
    Small,
    #[default]
    Medium,
    Large,
    Fullscreen,
}

impl ModalSize {
    /// Popup rectangle for this size, centered in `area`
    pub fn rect(self, area: Rect) -> Rect {
        let (w, h) = match self {
            ModalSize::Small => (44, 9),
            ModalSize::Medium => (64, 20),
            ModalSize::Large => (90, 28),
            ModalSize::Fullscreen => (area.width, area.height),
        };
        let w = w.min(area.width);
        let h = h.min(area.height);
        Rect::new(
            area.x + (area.width - w) / 2,
            area.y + (area.height - h) / 2,
            w,
            h,
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ModalAnimation {
    #[default]
    Fade,
    Slide,
    Zoom,
}

/// Dialog configuration. Every field has a default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalConfig {
    pub title: Option<String>,
    pub size: ModalSize,
    pub close_on_backdrop_click: bool,
    pub close_on_escape: bool,
    pub show_close_button: bool,
    /// Extra theme style key applied to the dialog border
    pub custom_class: Option<String>,
    pub animation: ModalAnimation,
}

impl Default for ModalConfig {
    fn default() -> Self {
        ModalConfig {
            title: None,
            size: ModalSize::Medium,
            close_on_backdrop_click: true,
            close_on_escape: true,
            show_close_button: true,
            custom_class: None,
            animation: ModalAnimation::Fade,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Opening { since: Instant },
    Open,
    Closing { since: Instant },
}

/// Notifications produced by `tick`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalEvent<F> {
    Opened,
    /// Exit transition finished; `restore_focus` is the target focused before opening
    Closed { restore_focus: Option<F> },
    /// Emitted right after `Closed`, for owners that track an "is open" flag
    CloseRequested,
}

/// A dialog over focus targets of type `F`
#[derive(Debug, Clone)]
pub struct Modal<F> {
    config: ModalConfig,
    phase: ModalPhase,
    /// Focus set handed to `open`, installed when the dialog becomes Open
    pending_focusables: Vec<F>,
    focusables: Vec<F>,
    focus_index: Option<usize>,
    previous_focus: Option<F>,
    key_listener: bool,
    scroll_locked: bool,
}

impl<F: Copy + PartialEq + Debug> Modal<F> {
    pub fn new(config: ModalConfig) -> Self {
        Modal {
            config,
            phase: ModalPhase::Closed,
            pending_focusables: Vec::new(),
            focusables: Vec::new(),
            focus_index: None,
            previous_focus: None,
            key_listener: false,
            scroll_locked: false,
        }
    }

    pub fn config(&self) -> &ModalConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ModalConfig {
        &mut self.config
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    /// Fully open and accepting input
    pub fn is_open(&self) -> bool {
        self.phase == ModalPhase::Open
    }

    /// Anything to draw (open or mid-transition)
    pub fn is_rendered(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    pub fn scroll_locked(&self) -> bool {
        self.scroll_locked
    }

    /// The focused target while Open
    pub fn focused(&self) -> Option<F> {
        if !self.is_open() {
            return None;
        }
        self.focus_index.and_then(|i| self.focusables.get(i).copied())
    }

    /// Request the dialog to open. `current_focus` is restored after it closes.
    pub fn open(&mut self, current_focus: F, focusables: Vec<F>, now: Instant) {
        match self.phase {
            ModalPhase::Closed => {
                self.previous_focus = Some(current_focus);
                self.pending_focusables = focusables;
                self.phase = ModalPhase::Opening { since: now };
                tracing::trace!(title = ?self.config.title, "modal opening");
            }
            // Reopened before the exit transition finished: the pending close is dropped
            ModalPhase::Closing { .. } => {
                self.pending_focusables = focusables;
                self.phase = ModalPhase::Opening { since: now };
                tracing::trace!(title = ?self.config.title, "modal reopening");
            }
            ModalPhase::Opening { .. } | ModalPhase::Open => {}
        }
    }

    /// Request the dialog to close. Hides immediately; focus is restored when
    /// the exit transition completes.
    pub fn close(&mut self, now: Instant) {
        match self.phase {
            ModalPhase::Open => {
                self.key_listener = false;
                self.scroll_locked = false;
                self.focus_index = None;
                self.phase = ModalPhase::Closing { since: now };
                tracing::trace!(title = ?self.config.title, "modal closing");
            }
            // Closed again before it ever became visible: nothing to undo
            ModalPhase::Opening { .. } => {
                self.previous_focus = None;
                self.pending_focusables.clear();
                self.phase = ModalPhase::Closed;
            }
            ModalPhase::Closed | ModalPhase::Closing { .. } => {}
        }
    }

    /// Complete any transition whose delay has elapsed
    pub fn tick(&mut self, now: Instant) -> Vec<ModalEvent<F>> {
        let mut events = Vec::new();
        match self.phase {
            ModalPhase::Opening { since } if now.saturating_duration_since(since) >= ENTER_DELAY => {
                self.focusables = std::mem::take(&mut self.pending_focusables);
                self.focus_index = if self.focusables.is_empty() {
                    None
                } else {
                    Some(0)
                };
                self.key_listener = true;
                self.scroll_locked = true;
                self.phase = ModalPhase::Open;
                events.push(ModalEvent::Opened);
            }
            ModalPhase::Closing { since } if now.saturating_duration_since(since) >= EXIT_DELAY => {
                self.phase = ModalPhase::Closed;
                self.focusables.clear();
                events.push(ModalEvent::Closed {
                    restore_focus: self.previous_focus.take(),
                });
                events.push(ModalEvent::CloseRequested);
            }
            _ => {}
        }
        events
    }

    /// Keys the dialog itself handles: Escape (if enabled) and Tab/BackTab.
    /// Returns true when the key was consumed. Only active while Open.
    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> bool {
        if !self.key_listener {
            return false;
        }
        match key.code {
            KeyCode::Esc => {
                if self.config.close_on_escape {
                    self.close(now);
                }
                true
            }
            KeyCode::BackTab => {
                self.focus_prev();
                true
            }
            KeyCode::Tab if key.modifiers.contains(KeyModifiers::SHIFT) => {
                self.focus_prev();
                true
            }
            KeyCode::Tab => {
                self.focus_next();
                true
            }
            _ => false,
        }
    }

    /// Click outside the dialog
    pub fn backdrop_click(&mut self, now: Instant) {
        if self.is_open() && self.config.close_on_backdrop_click {
            self.close(now);
        }
    }

    /// Move focus straight to `target` if it belongs to the dialog
    pub fn set_focus(&mut self, target: F) -> bool {
        if !self.is_open() {
            return false;
        }
        match self.focusables.iter().position(|f| *f == target) {
            Some(i) => {
                self.focus_index = Some(i);
                true
            }
            None => false,
        }
    }

    pub fn focus_next(&mut self) {
        let len = self.focusables.len();
        if len == 0 {
            return;
        }
        self.focus_index = Some(match self.focus_index {
            Some(i) if i + 1 < len => i + 1,
            Some(_) => 0,
            None => 0,
        });
    }

    pub fn focus_prev(&mut self) {
        let len = self.focusables.len();
        if len == 0 {
            return;
        }
        self.focus_index = Some(match self.focus_index {
            Some(i) if i > 0 => i - 1,
            _ => len - 1,
        });
    }

    /// 0.0 (hidden) to 1.0 (fully shown), for drawing transitions
    pub fn visibility(&self, now: Instant) -> f32 {
        match self.phase {
            ModalPhase::Closed => 0.0,
            ModalPhase::Open => 1.0,
            ModalPhase::Opening { since } => {
                let t = now.saturating_duration_since(since).as_secs_f32() / ENTER_DELAY.as_secs_f32();
                t.clamp(0.0, 1.0)
            }
            ModalPhase::Closing { since } => {
                let t = now.saturating_duration_since(since).as_secs_f32() / EXIT_DELAY.as_secs_f32();
                1.0 - t.clamp(0.0, 1.0)
            }
        }
    }
}
