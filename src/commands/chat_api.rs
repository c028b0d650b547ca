use crate::controller::SessionController;
use crate::error::{Error, Result};
use crate::protocol::RoomMessage;
use crate::session::{LogEntry, Panel, ME};
use crate::utils::data_url;

/// Alert shown for a file over `max_file_size` bytes.
pub fn file_too_large(max_file_size: usize) -> String {
    format!("File too large (Max {}MB)", max_file_size / 1_000_000)
}

/// A file picked for sending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl SessionController {
    /// Empty messages are ignored.
    pub async fn send_chat(&mut self, text: &str) -> Result<bool> {
        if text.trim().is_empty() {
            return Ok(false);
        }
        let Self {
            session, notifier, ..
        } = self;
        let session = session.as_mut().ok_or(Error::NotInMeeting)?;
        notifier.unlock_audio();

        session
            .broadcast(&RoomMessage::Chat {
                msg: text.to_string(),
            })
            .await?;
        session.log.push(LogEntry::chat(ME, text));
        Ok(true)
    }

    /// Sends a whole file inline in one message. Returns false when it was
    /// over the size limit and nothing was sent.
    pub async fn send_file(&mut self, file: FileUpload) -> Result<bool> {
        if self.session.is_none() {
            return Err(Error::NotInMeeting);
        }
        if file.bytes.len() > self.config.max_file_size {
            tracing::info!(name = %file.name, size = file.bytes.len(), "file over size limit");
            self.notifier.alert(file_too_large(self.config.max_file_size));
            return Ok(false);
        }

        let FileUpload { name, mime, bytes } = file;
        let encoded = tokio::task::spawn_blocking(move || data_url(&mime, &bytes)).await?;

        let Self {
            session, notifier, ..
        } = self;
        let session = session.as_mut().ok_or(Error::NotInMeeting)?;
        notifier.unlock_audio();

        session
            .broadcast(&RoomMessage::File {
                file_name: name.clone(),
                file_data: encoded.clone(),
            })
            .await?;
        session.log.push(LogEntry::file(ME, name, encoded));
        Ok(true)
    }

    /// Returns the new hand state.
    pub async fn toggle_hand(&mut self) -> Result<bool> {
        let Self {
            session, banner, ..
        } = self;
        let session = session.as_mut().ok_or(Error::NotInMeeting)?;
        let raised = !session.local.hand_raised;
        if let Err(e) = session.broadcast(&RoomMessage::HandToggle { raised }).await {
            tracing::error!(error = %e, raised, "hand toggle failed");
            banner.show(format!("Could not toggle hand: {e}"));
            return Err(e);
        }
        session.local.hand_raised = raised;
        Ok(raised)
    }

    /// Opens or closes a side panel. Opening the participant list re-reads it.
    pub fn toggle_panel(&mut self, panel: Panel) -> Result<bool> {
        let session = self.session.as_mut().ok_or(Error::NotInMeeting)?;
        let open = match panel {
            Panel::Chat => {
                session.panels.chat = !session.panels.chat;
                session.panels.chat
            }
            Panel::Participants => {
                session.panels.participants = !session.panels.participants;
                session.panels.participants
            }
        };
        if panel == Panel::Participants && open {
            session.sync_participants();
        }
        Ok(open)
    }
}
