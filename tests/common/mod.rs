#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use mini_zoom_lib::backend::{Backend, CreateMeetingRequest, MemoryBackend, TokenRequest};
use mini_zoom_lib::room::{
    MediaEngine, RoomConnection, RoomEvent, RoomOptions, TrackInfo, TrackKind,
    TrackSource,
};
use mini_zoom_lib::{BackendError, Config, EngineError, RoomMessage, SessionController, UiEffect};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// What the scripted engine has seen and is set up to do.
#[derive(Debug, Default)]
pub struct EngineState {
    pub rooms_created: usize,
    pub options: Option<RoomOptions>,
    pub subscribed: bool,
    pub connected: bool,
    pub url: Option<String>,
    pub identity: String,
    pub camera: bool,
    pub microphone: bool,
    pub screen_share: bool,
    pub mic_calls: Vec<bool>,
    pub remote: Vec<String>,
    pub published: Vec<Bytes>,
    pub disconnects: usize,
    pub camera_track: Option<String>,
    publications: u32,
    tx: Option<mpsc::UnboundedSender<RoomEvent>>,

    pub fail_connect: Option<EngineError>,
    pub deny_camera: bool,
    pub fail_screen_share: bool,
    /// announce camera publications
    pub publish_camera: bool,
}

pub struct FakeEngine {
    pub state: Arc<Mutex<EngineState>>,
}

impl FakeEngine {
    pub fn new() -> Arc<Self> {
        Self::with(|_| {})
    }

    pub fn with(setup: impl FnOnce(&mut EngineState)) -> Arc<Self> {
        let mut state = EngineState {
            publish_camera: true,
            ..Default::default()
        };
        setup(&mut state);
        Arc::new(Self {
            state: Arc::new(Mutex::new(state)),
        })
    }

    pub fn state(&self) -> std::sync::MutexGuard<'_, EngineState> {
        self.state.lock().unwrap()
    }

    pub fn emit(&self, event: RoomEvent) {
        let state = self.state();
        state
            .tx
            .as_ref()
            .expect("no subscriber")
            .send(event)
            .expect("receiver dropped");
    }

    pub fn join_remote(&self, identity: &str) {
        self.state().remote.push(identity.to_string());
        self.emit(RoomEvent::ParticipantConnected {
            identity: identity.to_string(),
        });
    }

    pub fn leave_remote(&self, identity: &str) {
        self.state().remote.retain(|p| p != identity);
        self.emit(RoomEvent::ParticipantDisconnected {
            identity: identity.to_string(),
        });
    }

    /// Capture stopped from outside the app, as a browser's own stop button does.
    pub fn end_screen_share(&self) {
        self.state().screen_share = false;
        self.emit(RoomEvent::LocalTrackUnpublished {
            track: TrackInfo {
                sid: "TR_screen".into(),
                source: TrackSource::ScreenShare,
                kind: TrackKind::Video,
            },
        });
    }

    pub fn deliver(&self, from: &str, message: &RoomMessage) {
        self.deliver_raw(from, message.encode().unwrap());
    }

    pub fn deliver_raw(&self, from: &str, payload: impl Into<Bytes>) {
        self.emit(RoomEvent::DataReceived {
            payload: payload.into(),
            participant: Some(from.to_string()),
        });
    }

    /// Data packets this client broadcast, decoded.
    pub fn sent(&self) -> Vec<RoomMessage> {
        self.state()
            .published
            .iter()
            .map(|payload| RoomMessage::decode(payload).unwrap())
            .collect()
    }

    pub fn sent_raw(&self) -> Vec<Bytes> {
        self.state().published.clone()
    }
}

impl MediaEngine for FakeEngine {
    fn create_room(&self, options: RoomOptions) -> Box<dyn RoomConnection> {
        let mut state = self.state();
        state.rooms_created += 1;
        state.options = Some(options);
        Box::new(FakeRoom {
            state: self.state.clone(),
        })
    }
}

struct FakeRoom {
    state: Arc<Mutex<EngineState>>,
}

impl FakeRoom {
    fn lock(&self) -> std::sync::MutexGuard<'_, EngineState> {
        self.state.lock().unwrap()
    }
}

fn camera_track(sid: &str) -> TrackInfo {
    TrackInfo {
        sid: sid.to_string(),
        source: TrackSource::Camera,
        kind: TrackKind::Video,
    }
}

#[async_trait]
impl RoomConnection for FakeRoom {
    fn subscribe(&mut self) -> mpsc::UnboundedReceiver<RoomEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        let mut state = self.lock();
        state.subscribed = true;
        state.tx = Some(tx);
        rx
    }

    async fn connect(&mut self, url: &str, token: &str) -> Result<(), EngineError> {
        let mut state = self.lock();
        if !state.subscribed {
            return Err(EngineError::NoSubscriber);
        }
        if let Some(err) = state.fail_connect.clone() {
            return Err(err);
        }
        state.identity = MemoryBackend::claims(token)
            .map(|c| c.identity)
            .unwrap_or_else(|| token.to_string());
        state.url = Some(url.to_string());
        state.connected = true;
        Ok(())
    }

    fn local_identity(&self) -> String {
        self.lock().identity.clone()
    }

    fn remote_participants(&self) -> Vec<String> {
        self.lock().remote.clone()
    }

    async fn set_camera_enabled(&mut self, enabled: bool) -> Result<(), EngineError> {
        let mut state = self.lock();
        if enabled && state.deny_camera {
            return Err(EngineError::PermissionDenied("camera".into()));
        }
        state.camera = enabled;
        let event = if enabled {
            state.publications += 1;
            let sid = format!("TR_cam{}", state.publications);
            state.camera_track = Some(sid.clone());
            state
                .publish_camera
                .then(|| RoomEvent::LocalTrackPublished {
                    track: camera_track(&sid),
                })
        } else {
            state
                .camera_track
                .take()
                .map(|sid| RoomEvent::LocalTrackUnpublished {
                    track: camera_track(&sid),
                })
        };
        if let (Some(event), Some(tx)) = (event, state.tx.as_ref()) {
            let _ = tx.send(event);
        }
        Ok(())
    }

    async fn set_microphone_enabled(&mut self, enabled: bool) -> Result<(), EngineError> {
        let mut state = self.lock();
        state.microphone = enabled;
        state.mic_calls.push(enabled);
        Ok(())
    }

    async fn set_screen_share_enabled(&mut self, enabled: bool) -> Result<(), EngineError> {
        let mut state = self.lock();
        if state.fail_screen_share {
            return Err(EngineError::Transport("screen capture failed".into()));
        }
        state.screen_share = enabled;
        Ok(())
    }

    fn is_camera_enabled(&self) -> bool {
        self.lock().camera
    }

    fn is_microphone_enabled(&self) -> bool {
        self.lock().microphone
    }

    fn is_screen_share_enabled(&self) -> bool {
        self.lock().screen_share
    }

    async fn publish_data(&mut self, payload: Bytes) -> Result<(), EngineError> {
        let mut state = self.lock();
        if !state.connected {
            return Err(EngineError::NotConnected);
        }
        state.published.push(payload);
        Ok(())
    }

    async fn disconnect(&mut self) {
        let mut state = self.lock();
        state.connected = false;
        state.disconnects += 1;
        state.tx = None;
    }
}

/// Backend that refuses every request with `message`.
pub struct RefusingBackend {
    pub message: String,
}

#[async_trait]
impl Backend for RefusingBackend {
    async fn create_meeting(&self, _: CreateMeetingRequest) -> Result<String, BackendError> {
        Err(BackendError::Rejected(self.message.clone()))
    }

    async fn issue_token(&self, _: TokenRequest) -> Result<String, BackendError> {
        Err(BackendError::Status {
            status: 500,
            message: self.message.clone(),
        })
    }
}

pub fn test_config() -> Config {
    Config {
        publish_wait_attempts: 3,
        publish_wait_interval_ms: 10,
        ..Config::default()
    }
}

pub fn controller(
    backend: Arc<dyn Backend>,
    engine: Arc<FakeEngine>,
) -> (SessionController, mpsc::UnboundedReceiver<UiEffect>) {
    SessionController::new(test_config(), backend, engine)
}

/// Host `alice` in a fresh meeting.
pub async fn host_in_meeting() -> (
    SessionController,
    mpsc::UnboundedReceiver<UiEffect>,
    Arc<FakeEngine>,
    Arc<MemoryBackend>,
) {
    let backend = Arc::new(MemoryBackend::new());
    let engine = FakeEngine::new();
    let (mut ctl, effects) = controller(backend.clone(), engine.clone());
    ctl.start_meeting("alice", "standup").await.unwrap();
    (ctl, effects, engine, backend)
}

/// Non-host `identity` in room `AB12CD34`.
pub async fn guest_in_meeting(
    identity: &str,
) -> (
    SessionController,
    mpsc::UnboundedReceiver<UiEffect>,
    Arc<FakeEngine>,
) {
    let engine = FakeEngine::new();
    let (mut ctl, effects) = controller(Arc::new(MemoryBackend::new()), engine.clone());
    ctl.join_meeting(identity, "ab12cd34").await.unwrap();
    (ctl, effects, engine)
}

pub fn drain(effects: &mut mpsc::UnboundedReceiver<UiEffect>) -> Vec<UiEffect> {
    let mut out = Vec::new();
    while let Ok(effect) = effects.try_recv() {
        out.push(effect);
    }
    out
}
