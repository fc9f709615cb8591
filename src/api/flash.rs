//! One-shot flash messages carried across a redirect.
//!
//! A redirect stores its message server-side under a random token and hands the
//! token to the browser in the `flash` cookie. The next view that consumes the
//! [`Flash`] takes the message out of the store, so it is shown exactly once.

use std::convert::Infallible;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::FromRequestParts;
use axum::http::header::LOCATION;
use axum::http::request::Parts;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use dashmap::DashMap;
use uuid::Uuid;

use crate::state::AppState;

/// Cookie holding the flash token.
pub const FLASH_COOKIE: &str = "flash";

/// Concurrent token → message store shared by all requests.
#[derive(Debug, Clone)]
pub struct FlashStore {
    entries: Arc<DashMap<Uuid, (String, Instant)>>,
    ttl: Duration,
}

impl FlashStore {
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
            ttl,
        }
    }

    /// Stores `message` and returns its token. Expired entries are purged first.
    pub fn put(&self, message: impl Into<String>) -> Uuid {
        let ttl = self.ttl;
        self.entries
            .retain(|_, (_, created_at)| created_at.elapsed() < ttl);

        let token = Uuid::new_v4();
        self.entries.insert(token, (message.into(), Instant::now()));
        token
    }

    /// Removes and returns the message for `token`, unless it has expired.
    pub fn take(&self, token: &Uuid) -> Option<String> {
        let (_, (message, created_at)) = self.entries.remove(token)?;
        (created_at.elapsed() < self.ttl).then_some(message)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// `302 Found` to `location`, carrying `message` to the next request.
    pub fn redirect(&self, location: &str, message: &str) -> Response {
        let token = self.put(message);
        tracing::debug!(location, %token, "Redirect with flash message");

        let mut cookie = Cookie::new(FLASH_COOKIE, token.to_string());
        cookie.set_path("/");
        cookie.set_http_only(true);
        cookie.set_same_site(SameSite::Lax);
        let jar = CookieJar::new().add(cookie);

        (StatusCode::FOUND, jar, [(LOCATION, location.to_string())]).into_response()
    }
}

/// The flash token presented by the current request.
///
/// Extracting it does not consume the message; [`Flash::take`] does, so a
/// handler that fails before rendering leaves the message for the next view.
#[derive(Debug, Clone)]
pub struct Flash {
    jar: CookieJar,
    token: Option<Uuid>,
    store: FlashStore,
}

impl Flash {
    pub fn from_headers(headers: &HeaderMap, store: FlashStore) -> Self {
        let jar = CookieJar::from_headers(headers);
        let token = jar
            .get(FLASH_COOKIE)
            .and_then(|cookie| Uuid::parse_str(cookie.value()).ok());

        Self { jar, token, store }
    }

    /// Takes the pending message out of the store.
    ///
    /// The returned jar expires the `flash` cookie whenever the request sent one.
    pub fn take(self) -> (Option<String>, CookieJar) {
        let Some(token) = self.token else {
            return (None, self.jar);
        };

        let mut removal = Cookie::from(FLASH_COOKIE);
        removal.set_path("/");
        (self.store.take(&token), self.jar.remove(removal))
    }
}

impl FromRequestParts<AppState> for Flash {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        Ok(Flash::from_headers(&parts.headers, state.flash.clone()))
    }
}
