use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use skyway_core::services::{AccessToken, AuthService};
use skyway_core::validation::{validate_login, validate_password_change, validate_registration};
use skyway_core::{CoreError, CoreResult};
use skyway_shared::models::{ChangePasswordRequest, LoginRequest, RegisterRequest, User};
use skyway_shared::Masked;

use crate::token_store::TokenStore;

pub const AUTH_FAILED_MESSAGE: &str = "Authentication failed. Please login again.";
pub const LOGIN_FAILED_MESSAGE: &str = "Login failed. Please check your credentials.";
pub const NO_TOKEN_MESSAGE: &str = "No token received from server";
pub const NOT_LOGGED_IN_MESSAGE: &str = "Please login to continue";

/// Profile refresh period, one minute short of the upstream's 15-minute
/// token lifetime.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(14 * 60);

#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub user: Option<User>,
    pub error: Option<String>,
    pub loading: bool,
}

/// Logged-in user, token and last auth error, shared across tasks.
pub struct AuthSession {
    auth: Arc<dyn AuthService>,
    tokens: Arc<dyn TokenStore>,
    state: RwLock<SessionState>,
}

impl AuthSession {
    pub fn new(auth: Arc<dyn AuthService>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            auth,
            tokens,
            state: RwLock::new(SessionState {
                loading: true,
                ..Default::default()
            }),
        }
    }

    pub async fn snapshot(&self) -> SessionState {
        self.state.read().await.clone()
    }

    pub async fn user(&self) -> Option<User> {
        self.state.read().await.user.clone()
    }

    pub fn token(&self) -> Option<AccessToken> {
        self.tokens.load()
    }

    pub async fn set_error(&self, error: Option<String>) {
        self.state.write().await.error = error;
    }

    pub async fn is_authenticated(&self) -> bool {
        self.tokens.load().is_some() && self.state.read().await.user.is_some()
    }

    /// Restores the session from a stored token, if any.
    pub async fn initialize(&self) -> Option<User> {
        let user = match self.tokens.load() {
            Some(token) => self.fetch_user(&token).await.ok(),
            None => None,
        };
        self.state.write().await.loading = false;
        user
    }

    async fn fetch_user(&self, token: &AccessToken) -> CoreResult<User> {
        match self.auth.me(token).await {
            Ok(user) => {
                let mut state = self.state.write().await;
                state.user = Some(user.clone());
                state.error = None;
                Ok(user)
            }
            Err(e) => {
                warn!("Error fetching user data: {}", e);
                self.handle_auth_error().await;
                Err(e)
            }
        }
    }

    async fn handle_auth_error(&self) {
        self.tokens.clear();
        let mut state = self.state.write().await;
        state.user = None;
        state.error = Some(AUTH_FAILED_MESSAGE.to_string());
    }

    pub async fn login(&self, email: &str, password: &str) -> CoreResult<User> {
        let request = LoginRequest {
            email: email.to_string(),
            password: Masked::from(password),
        };

        {
            let mut state = self.state.write().await;
            if let Err(e) = validate_login(&request) {
                state.loading = false;
                state.error = Some(e.user_message());
                return Err(e);
            }
            state.loading = true;
            state.error = None;
        }

        let result = self.login_inner(&request).await;

        let mut state = self.state.write().await;
        state.loading = false;
        if let Err(e) = &result {
            state.error = Some(e.user_message());
        }
        result
    }

    async fn login_inner(&self, request: &LoginRequest) -> CoreResult<User> {
        let response = self.auth.login(request).await.map_err(|e| match e {
            failure @ CoreError::RemoteFailure { explained: true, .. } => failure,
            other => {
                warn!("Login request failed: {}", other);
                CoreError::RemoteFailure {
                    status: other.status(),
                    message: LOGIN_FAILED_MESSAGE.to_string(),
                    explained: false,
                }
            }
        })?;

        let token = response.token.ok_or_else(|| CoreError::remote(NO_TOKEN_MESSAGE))?;
        self.tokens.save(token.clone());
        info!("User {} logged in", request.email);

        self.fetch_user(&token).await
    }

    /// Creates the account. When the upstream returns a token the new user
    /// is logged in straight away.
    pub async fn register(&self, request: &RegisterRequest) -> CoreResult<Option<User>> {
        validate_registration(request)?;
        let response = self.auth.register(request).await?;
        info!("Registered {}", request.email);

        match response.token {
            Some(token) => {
                self.tokens.save(token.clone());
                self.fetch_user(&token).await.map(Some)
            }
            None => Ok(response.user),
        }
    }

    pub async fn logout(&self) {
        self.tokens.clear();
        let mut state = self.state.write().await;
        state.user = None;
        state.error = None;
        state.loading = false;
    }

    /// Re-fetches the profile of a logged-in user. A rejected token ends
    /// the session.
    pub async fn refresh(&self) -> CoreResult<()> {
        let Some(token) = self.tokens.load() else {
            return Ok(());
        };
        if self.state.read().await.user.is_none() {
            return Ok(());
        }
        self.fetch_user(&token).await.map(|_| ())
    }

    /// Calls [`refresh`](Self::refresh) every `period` until the handle is
    /// aborted.
    pub fn spawn_refresh(self: &Arc<Self>, period: Duration) -> JoinHandle<()> {
        let session = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(tokio::time::Instant::now() + period, period);
            loop {
                ticker.tick().await;
                if let Err(e) = session.refresh().await {
                    warn!("Session refresh failed: {}", e);
                }
            }
        })
    }

    pub async fn change_password(&self, request: &ChangePasswordRequest) -> CoreResult<()> {
        validate_password_change(request)?;
        let token = self
            .tokens
            .load()
            .ok_or_else(|| CoreError::validation(NOT_LOGGED_IN_MESSAGE))?;
        self.auth.change_password(&token, request).await
    }
}
