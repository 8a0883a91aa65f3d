//! REST gateway to the CodeArena backend.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;

use crate::{
    domain::{
        AuthGateway, AuthSession, Credentials, GatewayError, LocalStorage, NewRoom, Registration,
        RoomGateway, RoomRecord, TOKEN_KEY,
    },
    infrastructure::dto::http::{
        AuthResponseDto, CreateRoomRequestDto, CreateRoomResponseDto, ErrorResponseDto,
        LoginRequestDto, RegisterRequestDto,
    },
};

/// OAuth providers offered on the sign-in page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    Github,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuthProvider::Google => "google",
            OAuthProvider::Github => "github",
        }
    }
}

impl std::str::FromStr for OAuthProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "google" => Ok(OAuthProvider::Google),
            "github" => Ok(OAuthProvider::Github),
            other => Err(format!("unknown OAuth provider: {other}")),
        }
    }
}

#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
    storage: Arc<dyn LocalStorage>,
}

impl HttpGateway {
    pub fn new(base_url: &str, storage: Arc<dyn LocalStorage>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            storage,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Browser hand-off URL for an OAuth provider
    pub fn oauth_url(&self, provider: OAuthProvider) -> String {
        format!("{}/auth/{}", self.base_url, provider.as_str())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Attach the stored session token, if any
    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.storage.get(TOKEN_KEY) {
            Some(token) if !token.is_empty() => request.bearer_auth(token),
            _ => request,
        }
    }

    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }
        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponseDto>(&text)
            .ok()
            .and_then(|body| body.message)
            .unwrap_or(text);
        Err(GatewayError::Api {
            status: status.as_u16(),
            message,
        })
    }

    /// Auth replies carry `success`; a refusal becomes `Rejected` whatever the status
    async fn read_auth(response: Response) -> Result<AuthSession, GatewayError> {
        let status = response.status();
        let text = response.text().await?;
        let body: AuthResponseDto = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(_) if !status.is_success() => {
                return Err(GatewayError::Api {
                    status: status.as_u16(),
                    message: text,
                });
            }
            Err(e) => {
                return Err(GatewayError::Api {
                    status: status.as_u16(),
                    message: format!("unexpected response: {e}"),
                });
            }
        };
        if status.is_success() && body.success {
            Ok(body.into_session())
        } else {
            Err(GatewayError::Rejected(
                body.message
                    .unwrap_or_else(|| "Authentication failed".to_string()),
            ))
        }
    }
}

#[async_trait]
impl RoomGateway for HttpGateway {
    async fn list_rooms(&self) -> Result<Vec<RoomRecord>, GatewayError> {
        let url = self.url("/api/room");
        tracing::debug!("GET {}", url);
        let response = self.authorized(self.client.get(&url)).send().await?;
        let rooms: Vec<RoomRecord> = Self::read_json(response).await?;
        tracing::info!("Fetched {} room(s)", rooms.len());
        Ok(rooms)
    }

    async fn create_room(&self, room: NewRoom) -> Result<RoomRecord, GatewayError> {
        let url = self.url("/api/room/create");
        tracing::debug!("POST {}", url);
        let body = CreateRoomRequestDto::from(&room);
        let response = self
            .authorized(self.client.post(&url))
            .json(&body)
            .send()
            .await?;
        let created: CreateRoomResponseDto = Self::read_json(response).await?;
        tracing::info!("Created room '{}' ({})", created.room.name, created.room.id);
        Ok(created.room)
    }
}

#[async_trait]
impl AuthGateway for HttpGateway {
    async fn login(&self, credentials: Credentials) -> Result<AuthSession, GatewayError> {
        let url = self.url("/api/auth/login");
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(&LoginRequestDto::from(&credentials))
            .send()
            .await?;
        Self::read_auth(response).await
    }

    async fn register(&self, registration: Registration) -> Result<AuthSession, GatewayError> {
        let url = self.url("/api/auth/register");
        tracing::debug!("POST {}", url);
        let response = self
            .client
            .post(&url)
            .json(&RegisterRequestDto::from(&registration))
            .send()
            .await?;
        Self::read_auth(response).await
    }
}
