use crate::backend::Backend;
use crate::config::Config;
use crate::room::MediaEngine;
use crate::session::{Phase, Session};
use crate::ui::{BannerSlot, DashboardControls, Notifier, UiEffect};
use crate::view::{MeetingView, RoomView, Screen};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::time::{sleep_until, Instant};

/// Owns the page state of one meeting client and sequences calls into the
/// backend and the media engine.
///
/// The controller is driven from one task: user actions are its `async`
/// methods, engine events are consumed through [`process_pending`] or
/// [`next_event`].
///
/// [`process_pending`]: SessionController::process_pending
/// [`next_event`]: SessionController::next_event
pub struct SessionController {
    pub(crate) config: Config,
    pub(crate) backend: Arc<dyn Backend>,
    pub(crate) engine: Arc<dyn MediaEngine>,
    pub(crate) phase: Phase,
    pub(crate) dashboard: DashboardControls,
    pub(crate) session: Option<Session>,
    pub(crate) banner: BannerSlot,
    pub(crate) notifier: Notifier,
}

impl SessionController {
    /// Returns the controller and the stream of effects the shell has to perform.
    pub fn new(
        config: Config,
        backend: Arc<dyn Backend>,
        engine: Arc<dyn MediaEngine>,
    ) -> (Self, mpsc::UnboundedReceiver<UiEffect>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let banner = BannerSlot::new(config.banner_ttl());
        let controller = Self {
            config,
            backend,
            engine,
            phase: Phase::Idle,
            dashboard: DashboardControls::default(),
            session: None,
            banner,
            notifier: Notifier::new(tx),
        };
        (controller, rx)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn view(&self) -> RoomView {
        let meeting = self.session.as_ref().map(MeetingView::project);
        RoomView {
            screen: if meeting.is_some() {
                Screen::MeetingRoom
            } else {
                Screen::Dashboard
            },
            dashboard: self.dashboard.clone(),
            banner: self.banner.visible().map(str::to_string),
            meeting,
        }
    }

    /// Handles every engine event already queued, then a due participant re-sync.
    /// Returns the number of events handled.
    pub async fn process_pending(&mut self) -> usize {
        let mut handled = 0;
        loop {
            let event = match self.session.as_mut().map(|s| s.events.try_recv()) {
                Some(Ok(event)) => event,
                _ => break,
            };
            self.handle_event(event).await;
            handled += 1;
        }

        let due = self
            .session
            .as_ref()
            .and_then(|s| s.refresh_at)
            .is_some_and(|at| at <= Instant::now());
        if due {
            self.run_scheduled_refresh();
        }
        handled
    }

    /// Waits for the next engine event or the scheduled participant re-sync.
    /// Returns false once there is no session or the engine closed the stream.
    pub async fn next_event(&mut self) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };

        let refresh_at = session.refresh_at;
        let received = match refresh_at {
            Some(deadline) => tokio::select! {
                event = session.events.recv() => Some(event),
                _ = sleep_until(deadline) => None,
            },
            None => Some(session.events.recv().await),
        };

        match received {
            Some(Some(event)) => {
                self.handle_event(event).await;
                true
            }
            Some(None) => {
                tracing::warn!("engine event stream closed");
                false
            }
            None => {
                self.run_scheduled_refresh();
                true
            }
        }
    }

    /// Re-reads the remote participant list from the engine.
    pub fn refresh_participants(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.sync_participants();
            tracing::debug!(count = session.participants.len(), "participants refreshed");
        }
    }

    fn run_scheduled_refresh(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.refresh_at = None;
        }
        self.refresh_participants();
    }

    /// Back to the state of a freshly loaded page.
    pub(crate) fn reset_page(&mut self) {
        self.dashboard = DashboardControls::default();
        self.banner.clear();
        self.notifier.reset();
        self.session = None;
    }
}
