//! Render model. Everything here is computed from controller state and never
//! fed back into it.

use crate::session::{AttachedVideo, LogEntry, ParticipantView, Presented, Session};
use crate::ui::DashboardControls;
use crate::utils::initials;

pub const MUTE_LABEL: &str = "Mute";
pub const UNMUTE_LABEL: &str = "Unmute";
pub const VIDEO_OFF_LABEL: &str = "Video Off";
pub const VIDEO_ON_LABEL: &str = "Video On";
pub const SHARE_LABEL: &str = "Share";
pub const STOP_SHARE_LABEL: &str = "Stop";
pub const RAISE_HAND_LABEL: &str = "Raise Hand";
pub const LOWER_HAND_LABEL: &str = "Lower Hand";
pub const RECORD_LABEL: &str = "Record";
pub const STOP_RECORD_LABEL: &str = "Stop Rec";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    MeetingRoom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileView {
    pub identity: String,
    pub initials: String,
    pub caption: String,
    pub is_local: bool,
    pub placeholder_visible: bool,
    pub video: Option<AttachedVideo>,
    pub hand_badge_visible: bool,
}

impl TileView {
    fn project(participant: &ParticipantView, is_local: bool) -> Self {
        let caption = if is_local {
            format!("{} (Me)", participant.identity)
        } else {
            participant.identity.clone()
        };
        Self {
            identity: participant.identity.clone(),
            initials: initials(&participant.identity),
            caption,
            is_local,
            placeholder_visible: participant.placeholder_visible(),
            video: participant.video.clone(),
            hand_badge_visible: participant.hand_raised,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsView {
    pub mic_label: &'static str,
    pub cam_label: &'static str,
    pub share_label: &'static str,
    pub hand_label: &'static str,
    pub hand_active: bool,
    /// host only
    pub record_label: Option<&'static str>,
    pub mute_all_visible: bool,
    pub copy_code_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MeetingView {
    pub display_code: String,
    pub tiles: Vec<TileView>,
    /// grid collapses to a single tile
    pub solo: bool,
    pub participant_rows: Vec<String>,
    pub participant_count: usize,
    pub presentation: Option<Presented>,
    pub sharing_active: bool,
    pub rec_status_visible: bool,
    pub controls: ControlsView,
    pub chat_panel_open: bool,
    pub participant_panel_open: bool,
    pub log: Vec<LogEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomView {
    pub screen: Screen,
    pub dashboard: DashboardControls,
    pub banner: Option<String>,
    pub meeting: Option<MeetingView>,
}

pub(crate) fn display_code(session: &Session) -> String {
    if session.is_host {
        format!("Meeting Code: {}", session.room_code)
    } else if session.title.is_empty() {
        "Meeting".to_string()
    } else {
        format!("Meeting: {}", session.title)
    }
}

impl MeetingView {
    pub(crate) fn project(session: &Session) -> Self {
        let mut tiles = vec![TileView::project(&session.local, true)];
        tiles.extend(
            session
                .participants
                .iter()
                .map(|p| TileView::project(p, false)),
        );

        let mut participant_rows = vec![format!("{} (Me)", session.local_identity)];
        participant_rows.extend(session.participants.iter().map(|p| p.identity.clone()));

        let controls = ControlsView {
            mic_label: if session.media.microphone {
                MUTE_LABEL
            } else {
                UNMUTE_LABEL
            },
            cam_label: if session.media.camera {
                VIDEO_OFF_LABEL
            } else {
                VIDEO_ON_LABEL
            },
            share_label: if session.media.screen_share {
                STOP_SHARE_LABEL
            } else {
                SHARE_LABEL
            },
            hand_label: if session.local.hand_raised {
                LOWER_HAND_LABEL
            } else {
                RAISE_HAND_LABEL
            },
            hand_active: session.local.hand_raised,
            record_label: session.is_host.then_some(if session.is_recording {
                STOP_RECORD_LABEL
            } else {
                RECORD_LABEL
            }),
            mute_all_visible: session.is_host,
            copy_code_visible: session.is_host,
        };

        let presentation = session.screen_share.presenting().cloned();
        Self {
            display_code: display_code(session),
            solo: tiles.len() <= 1,
            participant_count: tiles.len(),
            tiles,
            participant_rows,
            sharing_active: presentation.is_some(),
            presentation,
            rec_status_visible: session.rec_status_visible,
            controls,
            chat_panel_open: session.panels.chat,
            participant_panel_open: session.panels.participants,
            log: session.log.clone(),
        }
    }
}
