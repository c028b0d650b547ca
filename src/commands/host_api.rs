use crate::controller::SessionController;
use crate::error::{Error, Result};
use crate::protocol::RoomMessage;
use crate::session::LogEntry;

pub const YOU_MUTED_EVERYONE: &str = "You muted everyone.";
pub const CODE_COPIED: &str = "Code Copied!";

// Host-only actions. Called by anyone else they return quietly.
impl SessionController {
    /// Returns the new recording flag, or None when not host.
    pub async fn toggle_record(&mut self) -> Result<Option<bool>> {
        let Self {
            session, banner, ..
        } = self;
        let session = session.as_mut().ok_or(Error::NotInMeeting)?;
        if !session.is_host {
            return Ok(None);
        }

        // status indicator only; nothing is captured
        let status = !session.is_recording;
        if let Err(e) = session.broadcast(&RoomMessage::RecSync { status }).await {
            tracing::error!(error = %e, status, "recording toggle failed");
            banner.show(format!("Could not toggle recording: {e}"));
            return Err(e);
        }
        session.is_recording = status;
        session.rec_status_visible = status;
        tracing::info!(status, "recording toggled");
        Ok(Some(status))
    }

    /// Returns whether the mute request went out.
    pub async fn mute_all(&mut self) -> Result<bool> {
        let session = self.session.as_mut().ok_or(Error::NotInMeeting)?;
        if !session.is_host {
            return Ok(false);
        }

        session.broadcast(&RoomMessage::MuteAll).await?;
        session.log.push(LogEntry::system(YOU_MUTED_EVERYONE));
        Ok(true)
    }

    pub fn copy_code(&self) -> bool {
        let Some(session) = self.session.as_ref().filter(|s| s.is_host) else {
            return false;
        };
        self.notifier.copy_to_clipboard(session.room_code.clone());
        self.notifier.alert(CODE_COPIED);
        true
    }
}
