use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures talking to the room/token service.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("backend returned status {status}: {message}")]
    Status { status: u16, message: String },
    #[error("{0}")]
    Rejected(String),
    #[error("response carried no {0}")]
    MissingField(&'static str),
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// Failures reported by the media engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("permission denied: {0}")]
    PermissionDenied(String),
    #[error("transport error: {0}")]
    Transport(String),
    #[error("room is not connected")]
    NotConnected,
    #[error("no event subscriber registered before connect")]
    NoSubscriber,
}

/// Failures decoding an inbound data-channel payload. Never surfaced to the user.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error("payload is not utf-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("payload is not a room message: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error("not in a meeting")]
    NotInMeeting,
    #[error("could not encode message: {0}")]
    Encode(#[from] serde_json::Error),
    #[error("encoding task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}
