//! Side effects for the hosting shell, plus the small pieces of control state
//! that exist outside a meeting.

use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::Instant;

pub const START_LABEL: &str = "Start Meeting";
pub const STARTING_LABEL: &str = "Starting...";
pub const JOIN_LABEL: &str = "Join Meeting";
pub const JOINING_LABEL: &str = "Joining...";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sound {
    Chat,
    Hand,
}

/// Platform I/O the controller cannot do itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEffect {
    /// blocking alert
    Alert(String),
    /// prime audio elements once so later sounds pass autoplay rules
    UnlockAudio,
    PlaySound(Sound),
    CopyToClipboard(String),
}

/// Audio may only play after one unlock gesture.
#[derive(Debug, Default)]
pub struct AudioGate {
    unlocked: bool,
}

impl AudioGate {
    /// true the first time only
    pub fn unlock(&mut self) -> bool {
        !std::mem::replace(&mut self.unlocked, true)
    }
}

/// Sends [`UiEffect`]s to the shell. A shell that went away is not an error.
#[derive(Debug)]
pub struct Notifier {
    tx: mpsc::UnboundedSender<UiEffect>,
    audio: AudioGate,
}

impl Notifier {
    pub fn new(tx: mpsc::UnboundedSender<UiEffect>) -> Self {
        Self {
            tx,
            audio: AudioGate::default(),
        }
    }

    fn emit(&self, effect: UiEffect) {
        tracing::trace!(?effect, "ui effect");
        if self.tx.send(effect).is_err() {
            tracing::debug!("ui effect dropped, no shell listening");
        }
    }

    pub fn alert(&self, message: impl Into<String>) {
        self.emit(UiEffect::Alert(message.into()));
    }

    pub fn copy_to_clipboard(&self, text: impl Into<String>) {
        self.emit(UiEffect::CopyToClipboard(text.into()));
    }

    pub fn unlock_audio(&mut self) {
        if self.audio.unlock() {
            self.emit(UiEffect::UnlockAudio);
        }
    }

    pub fn play(&mut self, sound: Sound) {
        self.unlock_audio();
        self.emit(UiEffect::PlaySound(sound));
    }

    /// new page, new gesture
    pub fn reset(&mut self) {
        self.audio = AudioGate::default();
    }
}

/// Auto-dismissing error banner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub message: String,
    pub expires_at: Instant,
}

#[derive(Debug)]
pub struct BannerSlot {
    ttl: Duration,
    current: Option<Banner>,
}

impl BannerSlot {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, current: None }
    }

    pub fn show(&mut self, message: impl Into<String>) {
        let message = message.into();
        tracing::warn!(%message, "banner");
        self.current = Some(Banner {
            message,
            expires_at: Instant::now() + self.ttl,
        });
    }

    /// the banner, unless it already dismissed itself
    pub fn visible(&self) -> Option<&str> {
        self.current
            .as_ref()
            .filter(|b| Instant::now() < b.expires_at)
            .map(|b| b.message.as_str())
    }

    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonState {
    pub label: String,
    pub enabled: bool,
}

impl ButtonState {
    fn idle(label: &str) -> Self {
        Self {
            label: label.into(),
            enabled: true,
        }
    }
}

/// Which dashboard button started a join.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    Start,
    Join,
}

/// The two dashboard buttons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardControls {
    pub start: ButtonState,
    pub join: ButtonState,
}

impl Default for DashboardControls {
    fn default() -> Self {
        Self {
            start: ButtonState::idle(START_LABEL),
            join: ButtonState::idle(JOIN_LABEL),
        }
    }
}

impl DashboardControls {
    pub fn set_busy(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Start => {
                self.start = ButtonState {
                    label: STARTING_LABEL.into(),
                    enabled: false,
                }
            }
            Trigger::Join => {
                self.join = ButtonState {
                    label: JOINING_LABEL.into(),
                    enabled: false,
                }
            }
        }
    }

    pub fn restore(&mut self, trigger: Trigger) {
        match trigger {
            Trigger::Start => self.start = ButtonState::idle(START_LABEL),
            Trigger::Join => self.join = ButtonState::idle(JOIN_LABEL),
        }
    }
}
