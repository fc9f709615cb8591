//! View responses.
//!
//! Template rendering lives outside this service: a handler answers with the
//! name of the view to render plus the model it needs, serialised as JSON.

use axum::Json;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Serialize;
use serde_json::{Map, Value};

use crate::api::flash::Flash;
use crate::error::AppResult;

/// Model key the flash message is exposed under.
pub const SUCCESS_MESSAGE_KEY: &str = "success_message";

/// A view name and its model, answered with status 200.
#[derive(Debug, Clone, Serialize)]
pub struct ModelAndView {
    view: String,
    model: Map<String, Value>,
    #[serde(skip)]
    cookies: CookieJar,
}

impl ModelAndView {
    pub fn new(view: impl Into<String>) -> Self {
        Self {
            view: view.into(),
            model: Map::new(),
            cookies: CookieJar::new(),
        }
    }

    /// Adds `value` to the model under `key`.
    pub fn with<V: Serialize + ?Sized>(mut self, key: &str, value: &V) -> AppResult<Self> {
        self.model.insert(key.to_string(), serde_json::to_value(value)?);
        Ok(self)
    }

    /// Consumes the pending flash message, if any, and expires its cookie.
    pub fn with_flash(mut self, flash: Flash) -> Self {
        let (message, cookies) = flash.take();
        if let Some(message) = message {
            self.model
                .insert(SUCCESS_MESSAGE_KEY.to_string(), Value::String(message));
        }
        self.cookies = cookies;
        self
    }

    pub fn extend(mut self, model: Map<String, Value>) -> Self {
        self.model.extend(model);
        self
    }

    pub fn view(&self) -> &str {
        &self.view
    }

    pub fn model(&self) -> &Map<String, Value> {
        &self.model
    }
}

impl IntoResponse for ModelAndView {
    fn into_response(mut self) -> Response {
        let cookies = std::mem::replace(&mut self.cookies, CookieJar::new());
        (cookies, Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use axum::http::header::{COOKIE, SET_COOKIE};
    use axum::http::{HeaderMap, HeaderValue, StatusCode};
    use axum_extra::extract::cookie::Cookie;
    use http_body_util::BodyExt;

    use crate::api::flash::{FLASH_COOKIE, FlashStore};

    fn flash_for(store: &FlashStore, cookie: Option<String>) -> Flash {
        let mut headers = HeaderMap::new();
        if let Some(cookie) = cookie {
            headers.insert(COOKIE, HeaderValue::from_str(&cookie).unwrap());
        }
        Flash::from_headers(&headers, store.clone())
    }

    #[test]
    fn test_with_inserts_serialised_value() {
        let mav = ModelAndView::new("categories/categories")
            .with("keyword", &Some("abc"))
            .unwrap();

        assert_eq!(mav.view(), "categories/categories");
        assert_eq!(mav.model()["keyword"], "abc");
    }

    #[test]
    fn test_with_flash_without_cookie_is_noop() {
        let store = FlashStore::new(Duration::from_secs(60));
        let response = ModelAndView::new("v")
            .with_flash(flash_for(&store, None))
            .into_response();

        assert!(response.headers().get(SET_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_response_body_and_cookie_reset() {
        let store = FlashStore::new(Duration::from_secs(60));
        let token = store.put("更新に成功しました");

        let response = ModelAndView::new("brands/brands")
            .with_flash(flash_for(&store, Some(format!("{FLASH_COOKIE}={token}"))))
            .into_response();

        assert_eq!(response.status(), StatusCode::OK);
        let header = response.headers()[SET_COOKIE].to_str().unwrap().to_string();
        let cookie = Cookie::parse(header).unwrap();
        assert_eq!(cookie.name(), FLASH_COOKIE);
        assert_eq!(cookie.value(), "");
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.max_age().map(|age| age.whole_seconds()), Some(0));

        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["view"], "brands/brands");
        assert_eq!(json["model"][SUCCESS_MESSAGE_KEY], "更新に成功しました");
        assert!(store.is_empty());
    }
}
