pub mod backend;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod logger;
pub mod protocol;
pub mod room;
pub mod session;
pub mod ui;
pub mod utils;
pub mod view;

pub use backend::{Backend, HttpBackend, MemoryBackend};
pub use commands::FileUpload;
pub use config::Config;
pub use controller::SessionController;
pub use error::{BackendError, EngineError, Error, Result};
pub use protocol::{RoomMessage, ShareAction};
pub use room::{MediaEngine, PublishOutcome, RoomConnection, RoomEvent, TrackSource};
pub use session::{Panel, Phase, Session};
pub use ui::{Sound, UiEffect};
pub use view::{RoomView, Screen};
