use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

use crate::models::{AuthorizedUser, LoginRequest, Token};

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("server answered {status}: {message}")]
    Status { status: u16, message: String },
    #[error("no stored auth token")]
    MissingToken,
}

/// The server calls the user store depends on.
#[async_trait]
pub trait AuthApi: Send + Sync {
    async fn authorize(&self, token: &str) -> Result<AuthorizedUser, ClientError>;
    async fn login(&self, credentials: &LoginRequest) -> Result<Token, ClientError>;
}

/// `AuthApi` over HTTP against this crate's own server.
#[derive(Debug, Clone)]
pub struct HttpApi {
    base_url: String,
    http: reqwest::Client,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

async fn into_status_error(response: reqwest::Response) -> ClientError {
    let status = response.status().as_u16();
    let message = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => "unreadable error body".to_string(),
    };
    ClientError::Status { status, message }
}

#[async_trait]
impl AuthApi for HttpApi {
    async fn authorize(&self, token: &str) -> Result<AuthorizedUser, ClientError> {
        let response = self
            .http
            .get(self.url("/api/user/authorize"))
            .bearer_auth(token)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(into_status_error(response).await);
        }
        Ok(response.json().await?)
    }

    async fn login(&self, credentials: &LoginRequest) -> Result<Token, ClientError> {
        let response = self
            .http
            .post(self.url("/api/user/login"))
            .json(credentials)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(into_status_error(response).await);
        }
        Ok(response.json().await?)
    }
}
