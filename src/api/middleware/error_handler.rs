//! Error handler for converting AppError to HTTP responses.
//!
//! Form-level problems never reach this point: the submit handlers re-render
//! the form instead. What arrives here are lookups of unknown ids, storage
//! failures and malformed requests.

use axum::{
    Json,
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};

use super::RequestId;
use crate::api::dto::ErrorResponse;
use crate::error::AppError;

impl AppError {
    /// HTTP status for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Duplicate { .. } => StatusCode::CONFLICT,
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::ConnectionPool { .. } => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database { .. }
            | AppError::Configuration { .. }
            | AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn to_error_response(&self) -> ErrorResponse {
        match self {
            AppError::NotFound {
                entity,
                field,
                value,
            } => ErrorResponse::not_found_error(entity, field, value),
            AppError::Duplicate {
                entity,
                field,
                value,
            } => ErrorResponse::duplicate_error(entity, field, value),
            AppError::Validation { field, reason } => {
                ErrorResponse::validation_error(field, reason)
            }
            AppError::Database { operation, .. } => ErrorResponse::new(
                "DATABASE_ERROR",
                &format!("Database operation failed: {operation}"),
            ),
            AppError::Configuration { key, .. } => {
                ErrorResponse::new("CONFIGURATION_ERROR", &format!("Configuration error: {key}"))
            }
            AppError::ConnectionPool { .. } => {
                ErrorResponse::new("SERVICE_UNAVAILABLE", "Database connection unavailable")
            }
            AppError::Internal { .. } => {
                ErrorResponse::new("INTERNAL_ERROR", "An internal error occurred")
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(error = %self, "Request failed");
        } else {
            tracing::debug!(error = %self, "Request rejected");
        }

        let mut response = (status, Json(self.to_error_response())).into_response();
        response.extensions_mut().insert(ErrorMarker);
        response
    }
}

/// Marks responses produced from an `AppError`.
#[derive(Clone, Copy, Debug)]
struct ErrorMarker;

/// Stamps the request id into JSON error bodies produced by `AppError`.
///
/// Runs inside the request id layer so the id is already in the extensions.
pub async fn error_request_id_middleware(request: Request, next: Next) -> Response {
    let request_id = request.extensions().get::<RequestId>().cloned();
    let response = next.run(request).await;

    let Some(RequestId(request_id)) = request_id else {
        return response;
    };
    if response.extensions().get::<ErrorMarker>().is_none() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let Ok(bytes) = axum::body::to_bytes(body, usize::MAX).await else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let Ok(mut json) = serde_json::from_slice::<serde_json::Value>(&bytes) else {
        return Response::from_parts(parts, axum::body::Body::from(bytes));
    };

    json["request_id"] = serde_json::Value::String(request_id);
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    Response::from_parts(parts, axum::body::Body::from(json.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_not_found_maps_to_404() {
        let response = AppError::not_found("product", 9).into_response();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let json = body_json(response).await;
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["details"]["value"], "9");
    }

    #[tokio::test]
    async fn test_duplicate_maps_to_409() {
        let response = AppError::Duplicate {
            entity: "categories".into(),
            field: "name".into(),
            value: "categoryA".into(),
        }
        .into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::not_found("brand", 3).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Validation {
                field: "brand_id".into(),
                reason: "missing".into()
            }
            .status_code(),
            StatusCode::BAD_REQUEST
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_source() {
        let response = AppError::from(anyhow::anyhow!("secret detail")).into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let json = body_json(response).await;
        assert_eq!(json["message"], "An internal error occurred");
    }
}
