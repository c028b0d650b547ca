use crate::controller::SessionController;
use crate::protocol::{RoomMessage, ShareAction};
use crate::room::{RoomEvent, TrackSource};
use crate::session::{AttachedVideo, LogEntry};
use crate::ui::Sound;
use bytes::Bytes;

pub const HOST_SHARING_ALERT: &str = "Host started sharing. Your screen share has been stopped.";
pub const MUTED_BY_HOST: &str = "Host has muted everyone.";

impl SessionController {
    /// Reflects one engine event into session state.
    pub(crate) async fn handle_event(&mut self, event: RoomEvent) {
        let Some(session) = self.session.as_mut() else {
            tracing::debug!(?event, "event without a session, dropped");
            return;
        };

        match event {
            RoomEvent::TrackSubscribed { track, participant } => {
                tracing::debug!(%participant, sid = %track.sid, source = ?track.source, "track subscribed");
                if track.is_screen() {
                    session.screen_share.present(&participant, &track.sid);
                } else if track.is_camera_video() {
                    let muted = participant == session.local_identity;
                    session.tile_mut(&participant).video = Some(AttachedVideo {
                        track_sid: track.sid,
                        muted,
                    });
                }
            }

            RoomEvent::TrackUnsubscribed { track, participant } => {
                tracing::debug!(%participant, sid = %track.sid, "track unsubscribed");
                if track.is_screen() {
                    session.screen_share.withdraw(&participant);
                } else if track.is_camera_video() {
                    if let Some(tile) = session
                        .participants
                        .iter_mut()
                        .find(|p| p.identity == participant)
                    {
                        // a newer track may already have replaced this one
                        if tile.video.as_ref().map(|v| v.track_sid.as_str()) == Some(&track.sid) {
                            tile.video = None;
                        }
                    }
                }
            }

            RoomEvent::LocalTrackPublished { track } => {
                tracing::debug!(sid = %track.sid, source = ?track.source, "local track published");
                if track.source == TrackSource::Camera && session.media.camera {
                    session.local.video = Some(AttachedVideo {
                        track_sid: track.sid,
                        muted: true,
                    });
                }
            }

            RoomEvent::LocalTrackUnpublished { track } if track.is_screen() => {
                // capture ended outside our controls
                if !session.media.screen_share {
                    return;
                }
                tracing::info!(sid = %track.sid, "screen share ended by the engine");
                session.media.screen_share = false;
                let me = session.local_identity.clone();
                session.screen_share.apply(ShareAction::Stop, &me);
                let stop = RoomMessage::ScreenShareControl {
                    action: ShareAction::Stop,
                    sharer: me,
                };
                if let Err(e) = session.broadcast(&stop).await {
                    tracing::warn!(error = %e, "could not announce screen share stop");
                }
            }

            RoomEvent::LocalTrackUnpublished { track } => {
                if track.source == TrackSource::Camera
                    && session.local.video.as_ref().map(|v| v.track_sid.as_str())
                        == Some(&track.sid)
                {
                    session.local.video = None;
                }
            }

            RoomEvent::ParticipantConnected { identity } => {
                tracing::info!(%identity, "participant connected");
                session.sync_participants();
                if identity != session.local_identity {
                    session.tile_mut(&identity);
                }
            }

            RoomEvent::ParticipantDisconnected { identity } => {
                tracing::info!(%identity, "participant disconnected");
                session.remove_participant(&identity);
                session.sync_participants();
            }

            RoomEvent::DataReceived {
                payload,
                participant,
            } => self.on_data(payload, participant).await,
        }
    }

    async fn on_data(&mut self, payload: Bytes, participant: Option<String>) {
        let message = match RoomMessage::decode(&payload) {
            Ok(message) => message,
            Err(e) => {
                tracing::debug!(error = %e, len = payload.len(), "dropping malformed data packet");
                return;
            }
        };
        let Some(sender) = participant else {
            tracing::debug!(kind = message.kind(), "data packet without sender, dropped");
            return;
        };

        let Self {
            session,
            notifier,
            banner,
            ..
        } = self;
        let Some(session) = session.as_mut() else {
            return;
        };
        tracing::debug!(%sender, kind = message.kind(), "room message");

        match message {
            RoomMessage::Chat { msg } => {
                session.log.push(LogEntry::chat(&sender, msg));
                notifier.play(Sound::Chat);
            }

            RoomMessage::HandToggle { raised } => {
                session.tile_mut(&sender).hand_raised = raised;
                if raised {
                    session.log.push(
                        LogEntry::system(format!("{sender} raised their hand.")).highlighted(),
                    );
                    notifier.play(Sound::Hand);
                }
            }

            RoomMessage::File {
                file_name,
                file_data,
            } => {
                session
                    .log
                    .push(LogEntry::file(&sender, file_name, file_data));
                notifier.play(Sound::Chat);
            }

            RoomMessage::HostSharing => {
                if session.is_host || !session.room.is_screen_share_enabled() {
                    return;
                }
                if let Err(e) = session.room.set_screen_share_enabled(false).await {
                    tracing::error!(error = %e, "could not stop screen share for host");
                    banner.show(format!("Could not stop screen share: {e}"));
                    return;
                }
                session.media.screen_share = false;
                let me = session.local_identity.clone();
                session.screen_share.apply(ShareAction::Stop, &me);
                let stop = RoomMessage::ScreenShareControl {
                    action: ShareAction::Stop,
                    sharer: me,
                };
                if let Err(e) = session.broadcast(&stop).await {
                    tracing::warn!(error = %e, "could not announce screen share stop");
                }
                notifier.alert(HOST_SHARING_ALERT);
            }

            RoomMessage::RecSync { status } => {
                session.rec_status_visible = status;
            }

            RoomMessage::MuteAll => {
                if session.is_host {
                    return;
                }
                match session.room.set_microphone_enabled(false).await {
                    Ok(()) => session.media.microphone = false,
                    Err(e) => tracing::error!(error = %e, "could not mute for host"),
                }
                session.log.push(LogEntry::system(MUTED_BY_HOST));
            }

            RoomMessage::ScreenShareControl { action, sharer } => {
                session.screen_share.apply(action, &sharer);
            }

            RoomMessage::Unknown => {
                tracing::debug!(%sender, "ignoring unknown room message");
            }
        }
    }
}
