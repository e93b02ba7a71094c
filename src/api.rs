//! HTTP client for the economic dashboard backend.
//!
//! Attaches the session's bearer token to every request and handles 401
//! centrally: the session is torn down and the call returns
//! [`ApiError::AuthRequired`]. There are no retries, no backoff and no token
//! refresh; every other non-success status is surfaced unmodified to the
//! caller. In-flight sibling requests are never cancelled by a 401.
//!
//! Typical usage:
//! ```no_run
//! # use std::sync::Arc;
//! # use econdash_rs::{ApiClient, SessionStore};
//! let session = Arc::new(SessionStore::open(SessionStore::default_path()));
//! let client = ApiClient::new("http://127.0.0.1:8000", session);
//! client.login("demo", "demo")?;
//! let me = client.current_user()?;
//! # Ok::<(), econdash_rs::ApiError>(())
//! ```

use crate::models::{LoginRequest, LoginResponse, UserInfo};
use crate::session::SessionStore;
use reqwest::StatusCode;
use reqwest::blocking::{Client as HttpClient, RequestBuilder, Response};
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Error taxonomy for one request attempt. Every failure is terminal for
/// that attempt; retrying is a caller decision (in practice, a user action).
#[derive(Debug, Error)]
pub enum ApiError {
    /// Server answered 401. The session has already been cleared.
    #[error("authentication required")]
    AuthRequired,
    /// Any non-success status other than 401, surfaced unmodified.
    #[error("request failed with HTTP {status}")]
    Http { status: u16 },
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),
    /// Rejected client-side before any request was sent.
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("session storage error: {0}")]
    Session(#[from] std::io::Error),
}

/// Blocking client bound to one backend and one injected [`SessionStore`].
///
/// The client owns no data beyond its configuration; it is a stateless
/// transport with a read dependency on the session.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: HttpClient,
    session: Arc<SessionStore>,
}

impl ApiClient {
    /// Build a client against `base_url` (no trailing slash) using the given
    /// session for bearer tokens and 401 teardown.
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("econdash_rs/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("reqwest client build");
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    /// Authenticate against `POST /auth/login` and persist the issued token.
    ///
    /// The login request itself carries no bearer header. On success all
    /// subsequent requests from any client sharing this session attach the
    /// new token.
    pub fn login(&self, username: &str, password: &str) -> Result<LoginResponse, ApiError> {
        let url = format!("{}/auth/login", self.base_url);
        let body = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        log::debug!("POST {}", url);
        let resp = self.http.post(&url).json(&body).send()?;
        let resp = self.check_status(resp, self.session.generation())?;
        let login: LoginResponse = resp.json()?;
        self.session.login(&login.access_token)?;
        Ok(login)
    }

    /// `GET /auth/me` for the session's user.
    pub fn current_user(&self) -> Result<UserInfo, ApiError> {
        self.get_json("/auth/me", &[])
    }

    /// `GET /health`, always unauthenticated; payload shape is up to the
    /// server.
    pub fn health(&self) -> Result<serde_json::Value, ApiError> {
        let url = format!("{}/health", self.base_url);
        log::debug!("GET {}", url);
        let resp = self.http.get(&url).send()?;
        let resp = self.check_status(resp, self.session.generation())?;
        Ok(resp.json()?)
    }

    /// Authenticated GET of `path` (leading slash) with query pairs, decoded
    /// as JSON.
    pub fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {} {:?}", url, query);
        // Capture the generation before sending so a 401 raced by a fresh
        // login cannot clear the newer session.
        let generation = self.session.generation();
        let req = self.http.get(&url).query(query);
        let resp = self.authorize(req).send()?;
        let resp = self.check_status(resp, generation)?;
        Ok(resp.json()?)
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        // No token means the request proceeds unauthenticated; the server
        // decides whether to reject.
        match self.session.token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    fn check_status(&self, resp: Response, generation: u64) -> Result<Response, ApiError> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            self.session.expire(generation);
            return Err(ApiError::AuthRequired);
        }
        if !status.is_success() {
            return Err(ApiError::Http {
                status: status.as_u16(),
            });
        }
        Ok(resp)
    }
}
