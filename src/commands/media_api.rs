use crate::controller::SessionController;
use crate::error::{Error, Result};
use crate::protocol::{RoomMessage, ShareAction};
use crate::room::TrackSource;

impl SessionController {
    /// Flips the microphone. Returns the new state.
    pub async fn toggle_mic(&mut self) -> Result<bool> {
        let Self {
            session, banner, ..
        } = self;
        let session = session.as_mut().ok_or(Error::NotInMeeting)?;

        let enable = !session.room.is_microphone_enabled();
        if let Err(e) = session.room.set_microphone_enabled(enable).await {
            tracing::error!(error = %e, enable, "microphone toggle failed");
            banner.show(format!("Could not toggle microphone: {e}"));
            return Err(e.into());
        }
        session.media.microphone = enable;
        Ok(enable)
    }

    /// Flips the camera. Turning it back on waits for the new publication so
    /// the local tile gets its video again.
    pub async fn toggle_cam(&mut self) -> Result<bool> {
        let enable = {
            let Self {
                session, banner, ..
            } = self;
            let session = session.as_mut().ok_or(Error::NotInMeeting)?;

            let enable = !session.room.is_camera_enabled();
            if let Err(e) = session.room.set_camera_enabled(enable).await {
                tracing::error!(error = %e, enable, "camera toggle failed");
                banner.show(format!("Could not toggle camera: {e}"));
                return Err(e.into());
            }
            session.media.camera = enable;
            if !enable {
                session.local.video = None;
            }
            enable
        };

        if enable {
            self.wait_for_local_publish(TrackSource::Camera).await?;
        }
        Ok(enable)
    }

    /// Starts or stops sharing our screen and tells everyone who owns the share.
    /// A host starting to share preempts any participant's share.
    pub async fn share_screen(&mut self) -> Result<bool> {
        let Self {
            session, banner, ..
        } = self;
        let session = session.as_mut().ok_or(Error::NotInMeeting)?;

        // the engine may have ended the share on its own
        let enable = !session.room.is_screen_share_enabled();
        if enable && session.is_host {
            if let Err(e) = session.broadcast(&RoomMessage::HostSharing).await {
                banner.show(format!("Could not share screen: {e}"));
                return Err(e);
            }
        }

        if let Err(e) = session.room.set_screen_share_enabled(enable).await {
            tracing::error!(error = %e, enable, "screen share toggle failed");
            banner.show(format!("Could not share screen: {e}"));
            return Err(e.into());
        }
        session.media.screen_share = enable;

        let me = session.local_identity.clone();
        let action = if enable {
            ShareAction::Start
        } else {
            ShareAction::Stop
        };
        session.screen_share.apply(action, &me);
        session
            .broadcast(&RoomMessage::ScreenShareControl { action, sharer: me })
            .await?;
        Ok(enable)
    }
}
