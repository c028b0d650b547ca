use super::{Backend, BackendReply, CreateMeetingRequest, TokenRequest};
use crate::error::BackendError;
use async_trait::async_trait;
use serde::Serialize;

/// JSON-over-HTTP client of the meeting service.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    pub fn with_client(client: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<BackendReply, BackendError> {
        let url = self.endpoint(path);
        tracing::debug!(%url, "backend request");

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        let raw = response.bytes().await?;
        // error bodies are not always JSON
        let reply: BackendReply = serde_json::from_slice(&raw).unwrap_or_default();

        if !status.is_success() {
            let message = reply
                .error
                .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_string());
            tracing::warn!(%url, status = status.as_u16(), %message, "backend refused");
            return Err(BackendError::Status {
                status: status.as_u16(),
                message,
            });
        }
        if let Some(error) = reply.error {
            return Err(BackendError::Rejected(error));
        }
        Ok(reply)
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn create_meeting(&self, request: CreateMeetingRequest) -> Result<String, BackendError> {
        let reply = self.post("create_meeting", &request).await?;
        if let Some(status) = reply.status.as_deref() {
            if status != "success" {
                return Err(BackendError::Rejected(format!("status {status}")));
            }
        }
        reply
            .code
            .filter(|code| !code.is_empty())
            .ok_or(BackendError::MissingField("code"))
    }

    async fn issue_token(&self, request: TokenRequest) -> Result<String, BackendError> {
        let reply = self.post("get_token", &request).await?;
        reply
            .token
            .filter(|token| !token.is_empty())
            .ok_or(BackendError::MissingField("token"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{http::StatusCode, routing::post, Json, Router};
    use serde_json::{json, Value};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}/")
    }

    fn meeting_request() -> CreateMeetingRequest {
        CreateMeetingRequest {
            user: "alice".into(),
            title: "standup".into(),
            start: "now".into(),
            end: "later".into(),
        }
    }

    #[tokio::test]
    async fn creates_meeting_and_issues_token() {
        let router = Router::new()
            .route(
                "/create_meeting",
                post(|Json(body): Json<Value>| async move {
                    assert_eq!(body["title"], "standup");
                    assert_eq!(body["start"], "now");
                    Json(json!({"status": "success", "code": "AB12CD34"}))
                }),
            )
            .route(
                "/get_token",
                post(|Json(body): Json<Value>| async move {
                    assert_eq!(body["isHost"], true);
                    Json(json!({"token": format!("tok-{}-{}", body["room"].as_str().unwrap(), body["user"].as_str().unwrap())}))
                }),
            );
        let backend = HttpBackend::new(serve(router).await);

        let code = backend.create_meeting(meeting_request()).await.unwrap();
        assert_eq!(code, "AB12CD34");

        let token = backend
            .issue_token(TokenRequest {
                room: code,
                user: "alice".into(),
                is_host: true,
            })
            .await
            .unwrap();
        assert_eq!(token, "tok-AB12CD34-alice");
    }

    #[tokio::test]
    async fn error_status_carries_server_message() {
        let router = Router::new().route(
            "/get_token",
            post(|| async {
                (
                    StatusCode::BAD_REQUEST,
                    Json(json!({"error": "Missing room or user"})),
                )
            }),
        );
        let backend = HttpBackend::new(serve(router).await);

        let err = backend
            .issue_token(TokenRequest {
                room: String::new(),
                user: "bob".into(),
                is_host: false,
            })
            .await
            .unwrap_err();
        match err {
            BackendError::Status { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Missing room or user");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[tokio::test]
    async fn success_without_token_is_a_failure() {
        let router = Router::new().route("/get_token", post(|| async { Json(json!({})) }));
        let backend = HttpBackend::new(serve(router).await);

        let err = backend
            .issue_token(TokenRequest {
                room: "AB12CD34".into(),
                user: "bob".into(),
                is_host: false,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::MissingField("token")));
    }

    #[tokio::test]
    async fn unreachable_service_is_http_error() {
        let backend = HttpBackend::new("http://127.0.0.1:9");
        let err = backend.create_meeting(meeting_request()).await.unwrap_err();
        assert!(matches!(err, BackendError::Http(_)));
    }
}
