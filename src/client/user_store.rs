//! Authenticated-user state for the web client.
//!
//! The store owns no I/O of its own: token persistence, navigation and
//! user-facing alerts are injected, so the same logic runs against a browser
//! shell or the in-memory fakes in the tests below.

use std::sync::{Arc, Mutex};

use super::api::{AuthApi, ClientError};
use crate::models::{AuthorizedUser, LoginRequest};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/today";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please sign in again.";

pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: &str);
    fn remove_token(&self);
}

pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn push(&self, path: &str);
}

pub trait Alerter: Send + Sync {
    fn alert(&self, message: &str);
}

#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: Mutex<Option<String>>,
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        self.token.lock().ok().and_then(|slot| slot.clone())
    }

    fn set_token(&self, token: &str) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = Some(token.to_string());
        }
    }

    fn remove_token(&self) {
        if let Ok(mut slot) = self.token.lock() {
            *slot = None;
        }
    }
}

/// Where to go after a successful authorize: the entry pages forward to the
/// home view, anything else stays put.
pub fn landing_path(current: &str) -> &str {
    match current {
        "/" | LOGIN_PATH => HOME_PATH,
        other => other,
    }
}

pub struct UserStore {
    api: Arc<dyn AuthApi>,
    tokens: Arc<dyn TokenStore>,
    navigator: Arc<dyn Navigator>,
    alerts: Arc<dyn Alerter>,
    user: Option<AuthorizedUser>,
}

impl UserStore {
    pub fn new(
        api: Arc<dyn AuthApi>,
        tokens: Arc<dyn TokenStore>,
        navigator: Arc<dyn Navigator>,
        alerts: Arc<dyn Alerter>,
    ) -> Self {
        Self {
            api,
            tokens,
            navigator,
            alerts,
            user: None,
        }
    }

    pub fn user(&self) -> Option<&AuthorizedUser> {
        self.user.as_ref()
    }

    /// Ask the server who the stored token belongs to. Returns whether a user
    /// was committed.
    pub async fn check_user(&mut self) -> bool {
        let result = match self.tokens.token() {
            Some(token) => self.api.authorize(&token).await,
            None => Err(ClientError::MissingToken),
        };

        match result {
            Ok(user) => {
                tracing::debug!(user_id = user.id, "user authorized");
                self.user = Some(user);
                let current = self.navigator.current_path();
                self.navigator.push(landing_path(&current));
                true
            }
            Err(err) => {
                tracing::warn!("authorize failed: {}", err);
                self.user = None;
                self.alerts.alert(LOGIN_FAILED_MESSAGE);
                self.navigator.push(LOGIN_PATH);
                false
            }
        }
    }

    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool, ClientError> {
        let credentials = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.api.login(&credentials).await {
            Ok(token) => {
                self.tokens.set_token(&token.access_token);
                Ok(self.check_user().await)
            }
            Err(err) => {
                self.alerts.alert(LOGIN_FAILED_MESSAGE);
                Err(err)
            }
        }
    }

    /// Local only; the server keeps no session to end.
    pub fn logout(&mut self) {
        self.tokens.remove_token();
        self.user = None;
        self.navigator.push(LOGIN_PATH);
    }
}
