use crate::error::Result;
use crate::protocol::{RoomMessage, ShareAction};
use crate::room::{RoomConnection, RoomEvent};
use tokio::sync::mpsc;
use tokio::time::Instant;

/// Sender name of lines this client writes itself.
pub const ME: &str = "Me";
pub const SYSTEM: &str = "System";

/// Page lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Joining,
    InMeeting,
    Left,
}

/// A video element bound to a tile.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttachedVideo {
    pub track_sid: String,
    /// self-originated media plays muted
    pub muted: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantView {
    pub identity: String,
    pub video: Option<AttachedVideo>,
    pub hand_raised: bool,
}

impl ParticipantView {
    pub fn new(identity: impl Into<String>) -> Self {
        Self {
            identity: identity.into(),
            video: None,
            hand_raised: false,
        }
    }

    pub fn placeholder_visible(&self) -> bool {
        self.video.is_none()
    }
}

/// Screen track shown in the presentation area.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Presented {
    pub identity: String,
    pub track_sid: String,
}

/// Single-owner screen share bookkeeping, driven by `screen_share_control`
/// messages and screen track events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScreenShareState {
    owner: Option<String>,
    presenting: Option<Presented>,
}

impl ScreenShareState {
    pub fn owner(&self) -> Option<&str> {
        self.owner.as_deref()
    }

    pub fn presenting(&self) -> Option<&Presented> {
        self.presenting.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.owner.is_some()
    }

    /// Returns whether the state changed. A stop from anyone but the owner is stale.
    pub fn apply(&mut self, action: ShareAction, sharer: &str) -> bool {
        match action {
            ShareAction::Start => {
                let changed = self.owner.as_deref() != Some(sharer);
                self.owner = Some(sharer.to_string());
                changed
            }
            ShareAction::Stop if self.owner.as_deref() == Some(sharer) => {
                self.owner = None;
                true
            }
            ShareAction::Stop => {
                tracing::debug!(sharer, owner = ?self.owner, "ignoring stale screen share stop");
                false
            }
        }
    }

    pub fn present(&mut self, identity: &str, track_sid: &str) {
        self.presenting = Some(Presented {
            identity: identity.to_string(),
            track_sid: track_sid.to_string(),
        });
    }

    /// Clears the presentation area, and ownership too when the leaving track was the owner's.
    pub fn withdraw(&mut self, identity: &str) {
        if self.presenting.as_ref().map(|p| p.identity.as_str()) == Some(identity) {
            self.presenting = None;
        }
        if self.owner.as_deref() == Some(identity) {
            self.owner = None;
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Chat,
    File,
    System,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub sender: String,
    pub kind: LogKind,
    /// chat text, system text or a file's data URL
    pub payload: String,
    pub file_name: Option<String>,
    /// rendered as a hand notification
    pub highlight: bool,
}

impl LogEntry {
    pub fn chat(sender: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            sender: sender.into(),
            kind: LogKind::Chat,
            payload: text.into(),
            file_name: None,
            highlight: false,
        }
    }

    pub fn file(
        sender: impl Into<String>,
        file_name: impl Into<String>,
        data_url: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            kind: LogKind::File,
            payload: data_url.into(),
            file_name: Some(file_name.into()),
            highlight: false,
        }
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self {
            sender: SYSTEM.into(),
            kind: LogKind::System,
            payload: text.into(),
            file_name: None,
            highlight: false,
        }
    }

    pub fn highlighted(mut self) -> Self {
        self.highlight = true;
        self
    }
}

/// Local capture state as last confirmed by the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MediaState {
    pub camera: bool,
    pub microphone: bool,
    pub screen_share: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Panels {
    pub chat: bool,
    pub participants: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Panel {
    Chat,
    Participants,
}

/// Everything that lives exactly as long as one joined meeting.
pub struct Session {
    pub(crate) room: Box<dyn RoomConnection>,
    pub(crate) events: mpsc::UnboundedReceiver<RoomEvent>,
    pub local_identity: String,
    pub is_host: bool,
    pub room_code: String,
    pub title: String,
    pub local: ParticipantView,
    pub participants: Vec<ParticipantView>,
    pub screen_share: ScreenShareState,
    pub media: MediaState,
    pub is_recording: bool,
    pub rec_status_visible: bool,
    pub log: Vec<LogEntry>,
    pub panels: Panels,
    /// pending participant list re-sync
    pub(crate) refresh_at: Option<Instant>,
}

impl Session {
    pub(crate) fn new(
        room: Box<dyn RoomConnection>,
        events: mpsc::UnboundedReceiver<RoomEvent>,
        is_host: bool,
        room_code: String,
        title: String,
    ) -> Self {
        let local_identity = room.local_identity();
        Self {
            local: ParticipantView::new(local_identity.clone()),
            room,
            events,
            local_identity,
            is_host,
            room_code,
            title,
            participants: Vec::new(),
            screen_share: ScreenShareState::default(),
            media: MediaState::default(),
            is_recording: false,
            rec_status_visible: false,
            log: Vec::new(),
            panels: Panels::default(),
            refresh_at: None,
        }
    }

    pub fn refresh_pending(&self) -> bool {
        self.refresh_at.is_some()
    }

    /// Tile of `identity`, created on first use. The local tile is never created here.
    pub(crate) fn tile_mut(&mut self, identity: &str) -> &mut ParticipantView {
        if identity == self.local_identity {
            return &mut self.local;
        }
        let idx = match self.participants.iter().position(|p| p.identity == identity) {
            Some(idx) => idx,
            None => {
                self.participants.push(ParticipantView::new(identity));
                self.participants.len() - 1
            }
        };
        &mut self.participants[idx]
    }

    pub(crate) fn remove_participant(&mut self, identity: &str) -> bool {
        let before = self.participants.len();
        self.participants.retain(|p| p.identity != identity);
        self.screen_share.withdraw(identity);
        before != self.participants.len()
    }

    /// Makes the remote list match the engine's, keeping existing tile state.
    pub(crate) fn sync_participants(&mut self) {
        let remote = self.room.remote_participants();
        self.participants
            .retain(|p| remote.iter().any(|identity| identity == &p.identity));
        for identity in remote {
            if identity != self.local_identity
                && !self.participants.iter().any(|p| p.identity == identity)
            {
                self.participants.push(ParticipantView::new(identity));
            }
        }
    }

    /// Sends `message` to every participant over the reliable channel.
    pub(crate) async fn broadcast(&mut self, message: &RoomMessage) -> Result<()> {
        let payload = message.encode()?;
        tracing::debug!(kind = message.kind(), bytes = payload.len(), "broadcast");
        self.room.publish_data(payload).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_stop_keeps_owner() {
        let mut share = ScreenShareState::default();
        assert!(share.apply(ShareAction::Start, "alice"));
        assert!(!share.apply(ShareAction::Stop, "bob"));
        assert_eq!(share.owner(), Some("alice"));
        assert!(share.is_active());

        assert!(share.apply(ShareAction::Stop, "alice"));
        assert_eq!(share.owner(), None);
        assert!(!share.apply(ShareAction::Stop, "alice"));
    }

    #[test]
    fn newer_start_takes_over() {
        let mut share = ScreenShareState::default();
        share.apply(ShareAction::Start, "alice");
        assert!(share.apply(ShareAction::Start, "host"));
        assert!(!share.apply(ShareAction::Start, "host"));
        assert!(!share.apply(ShareAction::Stop, "alice"));
        assert_eq!(share.owner(), Some("host"));
    }

    #[test]
    fn withdraw_only_touches_that_participant() {
        let mut share = ScreenShareState::default();
        share.apply(ShareAction::Start, "alice");
        share.present("alice", "TR_screen");

        share.withdraw("bob");
        assert_eq!(share.presenting().unwrap().track_sid, "TR_screen");

        share.withdraw("alice");
        assert!(share.presenting().is_none());
        assert!(!share.is_active());
    }

    #[test]
    fn log_entries_carry_their_kind() {
        let entry = LogEntry::file(ME, "notes.txt", "data:text/plain;base64,aGk=");
        assert_eq!(entry.kind, LogKind::File);
        assert_eq!(entry.file_name.as_deref(), Some("notes.txt"));

        let hand = LogEntry::system("bob raised their hand.").highlighted();
        assert_eq!(hand.sender, SYSTEM);
        assert!(hand.highlight);
    }
}
