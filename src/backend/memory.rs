use super::{Backend, CreateMeetingRequest, TokenRequest};
use crate::error::BackendError;
use crate::utils::{meeting_code, random_id};
use async_trait::async_trait;
use base64::{engine::general_purpose, Engine as _};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// A meeting recorded by [`MemoryBackend`].
#[derive(Debug, Clone, PartialEq)]
pub struct MeetingRecord {
    pub code: String,
    pub title: String,
    pub start: String,
    pub end: String,
    pub created_at: DateTime<Utc>,
}

/// What a [`MemoryBackend`] token grants.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TokenClaims {
    pub room: String,
    pub identity: String,
    pub is_host: bool,
    pub nonce: String,
    pub issued_at: DateTime<Utc>,
}

/// In-process meeting service with the same validation rules as the HTTP one.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    meetings: Mutex<Vec<MeetingRecord>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn meetings(&self) -> Vec<MeetingRecord> {
        self.meetings.lock().map(|m| m.clone()).unwrap_or_default()
    }

    /// Reads back a token minted by this backend.
    pub fn claims(token: &str) -> Option<TokenClaims> {
        let raw = general_purpose::URL_SAFE_NO_PAD.decode(token).ok()?;
        serde_json::from_slice(&raw).ok()
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    async fn create_meeting(&self, request: CreateMeetingRequest) -> Result<String, BackendError> {
        if request.title.is_empty() {
            return Err(BackendError::Rejected("Meeting title is required".into()));
        }

        let mut meetings = self
            .meetings
            .lock()
            .map_err(|_| BackendError::Rejected("meeting store poisoned".into()))?;

        // codes are unique
        let code = loop {
            let candidate = meeting_code();
            if !meetings.iter().any(|m| m.code == candidate) {
                break candidate;
            }
        };

        meetings.push(MeetingRecord {
            code: code.clone(),
            title: request.title,
            start: request.start,
            end: request.end,
            created_at: Utc::now(),
        });
        tracing::info!(%code, "meeting created");
        Ok(code)
    }

    async fn issue_token(&self, request: TokenRequest) -> Result<String, BackendError> {
        if request.room.is_empty() || request.user.is_empty() {
            return Err(BackendError::Rejected("Missing room or user".into()));
        }

        let claims = TokenClaims {
            room: request.room,
            identity: request.user,
            is_host: request.is_host,
            nonce: random_id(),
            issued_at: Utc::now(),
        };
        let raw = serde_json::to_vec(&claims)
            .map_err(|e| BackendError::Rejected(format!("could not sign token: {e}")))?;
        Ok(general_purpose::URL_SAFE_NO_PAD.encode(raw))
    }
}
