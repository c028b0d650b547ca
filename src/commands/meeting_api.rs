use crate::backend::{CreateMeetingRequest, TokenRequest};
use crate::controller::SessionController;
use crate::error::{Error, Result};
use crate::room::{PublishOutcome, RoomConnection, RoomOptions, TrackSource};
use crate::session::{Phase, Session};
use crate::ui::{DashboardControls, Trigger};
use crate::utils::normalize_code;
use tokio::time::Instant;

pub const NAME_AND_TITLE_REQUIRED: &str = "Enter Name and Title";
pub const NAME_AND_CODE_REQUIRED: &str = "Enter Name and Code!";

impl SessionController {
    /// Host flow: mint a room code, then join it as host.
    pub async fn start_meeting(&mut self, user: &str, title: &str) -> Result<()> {
        let (user, title) = (user.trim(), title.trim());
        if user.is_empty() || title.is_empty() {
            return Err(self.reject_input(NAME_AND_TITLE_REQUIRED));
        }
        self.ensure_idle()?;

        self.phase = Phase::Joining;
        self.dashboard.set_busy(Trigger::Start);

        let request = CreateMeetingRequest {
            user: user.to_string(),
            title: title.to_string(),
            start: self.config.meeting_start.clone(),
            end: self.config.meeting_end.clone(),
        };
        let code = match self.backend.create_meeting(request).await {
            Ok(code) => code,
            Err(e) => {
                return Err(self
                    .abort_join(Trigger::Start, None, e.into(), "Could not create meeting")
                    .await)
            }
        };
        tracing::info!(%code, %title, "meeting created");

        self.connect_session(user, &code, true, title, Trigger::Start)
            .await
    }

    /// Participant flow: join an existing room by code.
    pub async fn join_meeting(&mut self, user: &str, code: &str) -> Result<()> {
        let (user, code) = (user.trim(), normalize_code(code));
        if user.is_empty() || code.is_empty() {
            return Err(self.reject_input(NAME_AND_CODE_REQUIRED));
        }
        self.ensure_idle()?;

        self.phase = Phase::Joining;
        self.dashboard.set_busy(Trigger::Join);
        self.connect_session(user, &code, false, "", Trigger::Join)
            .await
    }

    /// Joins `room_code` directly. The busy/restored button follows the role.
    pub async fn join(
        &mut self,
        identity: &str,
        room_code: &str,
        as_host: bool,
        title: &str,
    ) -> Result<()> {
        if identity.trim().is_empty() || room_code.trim().is_empty() {
            return Err(self.reject_input(NAME_AND_CODE_REQUIRED));
        }
        self.ensure_idle()?;

        let trigger = if as_host { Trigger::Start } else { Trigger::Join };
        self.phase = Phase::Joining;
        self.dashboard.set_busy(trigger);
        self.connect_session(identity.trim(), room_code.trim(), as_host, title, trigger)
            .await
    }

    /// Disconnects and returns to a fresh dashboard.
    pub async fn leave_room(&mut self) {
        let was_in_meeting = match self.session.take() {
            Some(mut session) => {
                session.room.disconnect().await;
                tracing::info!(room = %session.room_code, "left meeting");
                true
            }
            None => false,
        };
        self.reset_page();
        self.phase = if was_in_meeting {
            Phase::Left
        } else {
            Phase::Idle
        };
    }

    fn reject_input(&self, message: &str) -> Error {
        self.notifier.alert(message);
        Error::Validation(message.to_string())
    }

    fn ensure_idle(&self) -> Result<()> {
        match self.phase {
            Phase::Idle | Phase::Left => Ok(()),
            Phase::Joining | Phase::InMeeting => {
                Err(Error::Validation("already in a meeting".into()))
            }
        }
    }

    // Token, subscribe, connect: in that order.
    async fn connect_session(
        &mut self,
        identity: &str,
        room_code: &str,
        as_host: bool,
        title: &str,
        trigger: Trigger,
    ) -> Result<()> {
        let request = TokenRequest {
            room: room_code.to_string(),
            user: identity.to_string(),
            is_host: as_host,
        };
        let token = match self.backend.issue_token(request).await {
            Ok(token) => token,
            Err(e) => return Err(self.abort_join(trigger, None, e.into(), "Error joining").await),
        };

        let mut room = self.engine.create_room(RoomOptions::default());
        // handlers are bound before connecting so no event is missed
        let events = room.subscribe();
        if let Err(e) = room.connect(&self.config.livekit_url, &token).await {
            return Err(self
                .abort_join(trigger, Some(room), e.into(), "Error joining")
                .await);
        }

        let session = Session::new(
            room,
            events,
            as_host,
            room_code.to_string(),
            title.to_string(),
        );
        tracing::info!(
            identity = %session.local_identity,
            room = %room_code,
            host = as_host,
            "joined meeting"
        );
        self.session = Some(session);
        self.phase = Phase::InMeeting;
        self.dashboard = DashboardControls::default();

        self.refresh_participants();
        self.enable_local_media().await;

        // late participant events can race the first list
        let refresh_at = Instant::now() + self.config.participant_refresh_delay();
        if let Some(session) = self.session.as_mut() {
            session.refresh_at = Some(refresh_at);
        }
        Ok(())
    }

    async fn abort_join(
        &mut self,
        trigger: Trigger,
        room: Option<Box<dyn RoomConnection>>,
        err: Error,
        context: &str,
    ) -> Error {
        tracing::error!(error = %err, "{context}");
        if let Some(mut room) = room {
            room.disconnect().await;
        }
        if let Some(mut session) = self.session.take() {
            session.room.disconnect().await;
        }
        self.phase = Phase::Idle;
        self.dashboard.restore(trigger);
        self.banner.show(format!("{context}: {err}"));
        err
    }

    // Camera or microphone refusal is not fatal; the placeholder stays.
    async fn enable_local_media(&mut self) {
        let camera_on = {
            let Self {
                session, banner, ..
            } = self;
            let Some(session) = session.as_mut() else {
                return;
            };

            let camera_on = match session.room.set_camera_enabled(true).await {
                Ok(()) => {
                    session.media.camera = true;
                    true
                }
                Err(e) => {
                    banner.show(format!("Camera unavailable: {e}"));
                    false
                }
            };
            match session.room.set_microphone_enabled(true).await {
                Ok(()) => session.media.microphone = true,
                Err(e) => banner.show(format!("Microphone unavailable: {e}")),
            }
            camera_on
        };

        if camera_on {
            match self.wait_for_local_publish(TrackSource::Camera).await {
                Ok(PublishOutcome::Published(_)) | Ok(PublishOutcome::TimedOut) => {}
                Err(e) => tracing::warn!(error = %e, "waiting for camera publish failed"),
            }
        }
    }
}
