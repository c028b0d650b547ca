//! Room code and join token issuance.

pub mod http;
pub mod memory;

use crate::error::BackendError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use http::HttpBackend;
pub use memory::MemoryBackend;

/// Body of `POST /create_meeting`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CreateMeetingRequest {
    pub user: String,
    pub title: String,
    pub start: String,
    pub end: String,
}

/// Body of `POST /get_token`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TokenRequest {
    pub room: String,
    pub user: String,
    #[serde(rename = "isHost")]
    pub is_host: bool,
}

/// Either half of a backend reply; the service answers `{code}`, `{token}` or `{error}`.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct BackendReply {
    pub status: Option<String>,
    pub code: Option<String>,
    pub token: Option<String>,
    pub error: Option<String>,
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Mints a room code for a new meeting.
    async fn create_meeting(&self, request: CreateMeetingRequest) -> Result<String, BackendError>;

    /// Mints a join credential for `user` in `room`.
    async fn issue_token(&self, request: TokenRequest) -> Result<String, BackendError>;
}
