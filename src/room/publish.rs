use crate::controller::SessionController;
use crate::error::{EngineError, Error, Result};
use crate::room::{RoomEvent, TrackSource};
use tokio::time::timeout;

/// Result of waiting for one of our tracks to be published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PublishOutcome {
    Published(String),
    TimedOut,
}

impl SessionController {
    /// Waits until the engine confirms publication of our `source` track.
    ///
    /// Gives up after `publish_wait_attempts` quiet intervals of
    /// `publish_wait_interval`. Other events that arrive meanwhile are handled
    /// as usual, so nothing is lost while waiting.
    pub async fn wait_for_local_publish(&mut self, source: TrackSource) -> Result<PublishOutcome> {
        let attempts = self.config.publish_wait_attempts;
        let interval = self.config.publish_wait_interval();

        if source == TrackSource::Camera {
            let attached = self
                .session
                .as_ref()
                .and_then(|s| s.local.video.as_ref())
                .map(|v| v.track_sid.clone());
            if let Some(sid) = attached {
                return Ok(PublishOutcome::Published(sid));
            }
        }

        let mut misses = 0;
        while misses < attempts {
            let next = {
                let session = self.session.as_mut().ok_or(Error::NotInMeeting)?;
                timeout(interval, session.events.recv()).await
            };

            match next {
                Ok(Some(event)) => {
                    let confirmed = match &event {
                        RoomEvent::LocalTrackPublished { track } if track.source == source => {
                            Some(track.sid.clone())
                        }
                        _ => None,
                    };
                    self.handle_event(event).await;
                    if let Some(sid) = confirmed {
                        tracing::debug!(?source, %sid, "publish confirmed");
                        return Ok(PublishOutcome::Published(sid));
                    }
                }
                Ok(None) => return Err(EngineError::NotConnected.into()),
                Err(_) => {
                    misses += 1;
                    tracing::trace!(?source, misses, "still waiting for publish");
                }
            }
        }

        tracing::warn!(?source, attempts, "local track was not published in time");
        Ok(PublishOutcome::TimedOut)
    }
}
