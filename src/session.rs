//! # Request Sessions
//!
//! [`UserSession`] is the per-request view of the caller's session. It is
//! extracted from the session cookie (starting a fresh session when the cookie
//! is missing, unknown or expired) and answers the login checks handlers make
//! before doing anything else.
//!
//! A fresh session is not stored, and gets no cookie, until a handler saves
//! it. Anonymous page views leave nothing behind in the session store.
//!
//! ## Keys
//!
//! Values live under the string keys below. `loggedIn`, `storeAdminUser` and
//! `customerUser` only count when they hold a JSON `true`.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::{COOKIE, SET_COOKIE};
use axum::http::request::Parts;
use axum::http::{HeaderMap, HeaderValue};
use axum::response::{IntoResponse, Response};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use session_actor::{Session, SessionClient, SessionError, SessionId};
use store_api::model::{self, CustomerId, Headers};
use tracing::{debug, warn};

use crate::config::StoreApiSettings;
use crate::error::WebError;
use crate::handlers::AppState;

pub const USERNAME: &str = "username";
pub const PASSWORD: &str = "password";
pub const LOGGED_IN: &str = "loggedIn";
pub const STORE_ADMIN_USER: &str = "storeAdminUser";
pub const CUSTOMER_USER: &str = "customerUser";
pub const CUSTOMER_ID: &str = "customerId";

pub struct UserSession {
    pub session: Session,
    cookie_name: String,
    saved: bool,
}

impl UserSession {
    pub fn new(session: Session, cookie_name: impl Into<String>) -> Self {
        Self {
            session,
            cookie_name: cookie_name.into(),
            saved: false,
        }
    }

    pub fn is_store_admin_logged_in(&self) -> bool {
        self.session.get_bool(LOGGED_IN) && self.session.get_bool(STORE_ADMIN_USER)
    }

    pub fn is_customer_logged_in(&self) -> bool {
        self.session.get_bool(LOGGED_IN) && self.session.get_bool(CUSTOMER_USER)
    }

    pub fn username(&self) -> &str {
        self.session.get_str(USERNAME).unwrap_or_default()
    }

    pub fn customer_id(&self) -> CustomerId {
        CustomerId(self.session.get_i64(CUSTOMER_ID).unwrap_or_default())
    }

    /// Marks the session as a logged-in customer.
    pub fn log_in_customer(&mut self, username: &str, password: &str, customer_id: CustomerId) {
        self.session.insert(USERNAME, username);
        self.session.insert(PASSWORD, password);
        self.session.insert(LOGGED_IN, true);
        self.session.insert(CUSTOMER_USER, true);
        self.session.insert(CUSTOMER_ID, customer_id.0);
    }

    /// Headers for store calls made on behalf of this session.
    ///
    /// Credentials are sent as HTTP Basic auth when the session holds both a
    /// username and a password.
    pub fn headers(&self, store: &StoreApiSettings) -> Headers {
        let mut headers = Headers::new()
            .with(model::STORE_NAME, store.store_name.as_str())
            .with(model::LOCAL_DOMAIN, store.local_domain.as_str());

        if let (Some(username), Some(password)) = (
            self.session.get_str(USERNAME),
            self.session.get_str(PASSWORD),
        ) {
            let credentials = STANDARD.encode(format!("{username}:{password}"));
            headers.set(model::AUTHORIZATION, format!("Basic {credentials}"));
        }
        headers
    }

    pub async fn save(&mut self, sessions: &SessionClient) -> Result<(), SessionError> {
        sessions.save(&self.session).await?;
        self.saved = true;
        Ok(())
    }

    /// Finishes `response`, issuing the session cookie for a new session that
    /// has been saved during this request.
    pub fn respond(&self, response: impl IntoResponse) -> Response {
        let mut response = response.into_response();
        if self.session.is_new() && self.saved {
            let cookie = format!(
                "{}={}; Path=/; HttpOnly; SameSite=Lax",
                self.cookie_name, self.session.id
            );
            match HeaderValue::from_str(&cookie) {
                Ok(value) => {
                    response.headers_mut().append(SET_COOKIE, value);
                }
                Err(e) => warn!(error = %e, "Session cookie not issued"),
            }
        }
        response
    }
}

/// The session id carried by the `name` cookie, if any.
pub fn session_cookie(headers: &HeaderMap, name: &str) -> Option<SessionId> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, id)| SessionId::from(id))
}

#[async_trait]
impl FromRequestParts<AppState> for UserSession {
    type Rejection = WebError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let cookie_name = &state.config.session.cookie_name;
        let id = session_cookie(&parts.headers, cookie_name);
        let session = state.sessions.load_or_create(id.as_ref()).await?;
        debug!(id = %session.id, new = session.is_new(), "Session resolved");
        Ok(Self::new(session, cookie_name.as_str()))
    }
}
