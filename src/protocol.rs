use crate::error::ProtocolError;
use bytes::Bytes;
use serde::{Deserialize, Serialize};

/// Screen share announcement carried by `screen_share_control`.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ShareAction {
    Start,
    Stop,
}

/// Application message broadcast over the reliable data channel.
///
/// The wire form is a UTF-8 JSON object discriminated by `type`. Types this
/// client does not know decode to [`RoomMessage::Unknown`] and are ignored.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum RoomMessage {
    Chat {
        msg: String,
    },
    HandToggle {
        raised: bool,
    },
    File {
        #[serde(rename = "fileName")]
        file_name: String,
        /// base64 data URL
        #[serde(rename = "fileData")]
        file_data: String,
    },
    HostSharing,
    RecSync {
        status: bool,
    },
    MuteAll,
    ScreenShareControl {
        action: ShareAction,
        sharer: String,
    },
    #[serde(other)]
    Unknown,
}

impl RoomMessage {
    pub fn decode(payload: &[u8]) -> Result<Self, ProtocolError> {
        let text = std::str::from_utf8(payload)?;
        Ok(serde_json::from_str(text)?)
    }

    pub fn encode(&self) -> Result<Bytes, serde_json::Error> {
        serde_json::to_vec(self).map(Bytes::from)
    }

    /// wire name, for logs
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Chat { .. } => "chat",
            Self::HandToggle { .. } => "hand_toggle",
            Self::File { .. } => "file",
            Self::HostSharing => "host_sharing",
            Self::RecSync { .. } => "rec_sync",
            Self::MuteAll => "mute_all",
            Self::ScreenShareControl { .. } => "screen_share_control",
            Self::Unknown => "unknown",
        }
    }
}
