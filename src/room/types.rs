use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Where a track's media comes from.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TrackSource {
    Camera,
    Microphone,
    ScreenShare,
    Unknown,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Audio,
    Video,
}

/// Published track as the engine describes it. `sid` is what a renderer attaches.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TrackInfo {
    pub sid: String,
    pub source: TrackSource,
    pub kind: TrackKind,
}

impl TrackInfo {
    pub fn is_screen(&self) -> bool {
        self.source == TrackSource::ScreenShare
    }

    pub fn is_camera_video(&self) -> bool {
        self.kind == TrackKind::Video && !self.is_screen()
    }
}

/// Room construction options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomOptions {
    pub adaptive_stream: bool,
    pub dynacast: bool,
}

impl Default for RoomOptions {
    fn default() -> Self {
        Self {
            adaptive_stream: true,
            dynacast: true,
        }
    }
}

/// Everything the engine reports about a connected room.
#[derive(Debug, Clone, PartialEq)]
pub enum RoomEvent {
    TrackSubscribed {
        track: TrackInfo,
        participant: String,
    },
    TrackUnsubscribed {
        track: TrackInfo,
        participant: String,
    },
    /// the engine finished publishing one of our own tracks
    LocalTrackPublished { track: TrackInfo },
    LocalTrackUnpublished { track: TrackInfo },
    ParticipantConnected { identity: String },
    ParticipantDisconnected { identity: String },
    DataReceived {
        payload: Bytes,
        participant: Option<String>,
    },
}
