//! Error responses.
//!
//! Errors are written as `text/plain` bodies. The status follows the error
//! kind: caller mistakes are 4xx, deadline overruns 504, the rest 500.

use std::time::Duration;

use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use fleetreg_auth::PasswordError;
use fleetreg_core::DomainError;
use fleetreg_infra::StoreError;

pub const TEXT_PLAIN: &str = "text/plain; charset=utf-8";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing request input.
    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("response serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The whole request outlived its deadline.
    #[error("request did not complete within {0:?}")]
    RequestTimeout(Duration),

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::Store(err) => store_status(err),
            Self::RequestTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            Self::Serialization(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

fn store_status(err: &StoreError) -> StatusCode {
    match err {
        StoreError::Validation(_) | StoreError::Reference { .. } => StatusCode::BAD_REQUEST,
        StoreError::NotFound { .. } => StatusCode::NOT_FOUND,
        StoreError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
        StoreError::Connection(_) | StoreError::Storage(_) | StoreError::Hashing(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        Self::BadRequest(value.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(value: PasswordError) -> Self {
        match value {
            PasswordError::Empty => Self::BadRequest(value.to_string()),
            other => Self::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), error = %self, "request failed");
        } else {
            tracing::warn!(status = status.as_u16(), error = %self, "request rejected");
        }

        (status, [(header::CONTENT_TYPE, TEXT_PLAIN)], self.to_string()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_errors_map_to_distinct_statuses() {
        let cases = [
            (StoreError::Validation("bad date".into()), StatusCode::BAD_REQUEST),
            (StoreError::Reference { owner_id: 3 }, StatusCode::BAD_REQUEST),
            (StoreError::not_found("user", 3), StatusCode::NOT_FOUND),
            (
                StoreError::Timeout {
                    operation: "get_user",
                    after: Duration::from_secs(15),
                },
                StatusCode::GATEWAY_TIMEOUT,
            ),
            (
                StoreError::Connection(sqlx_pool_closed()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                StoreError::Hashing("rng".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(ApiError::from(err).status(), expected);
        }
    }

    #[test]
    fn empty_password_is_a_client_error() {
        assert_eq!(
            ApiError::from(PasswordError::Empty).status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::from(PasswordError::Hash("boom".into())).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn request_deadline_is_a_gateway_timeout() {
        let err = ApiError::RequestTimeout(Duration::from_millis(250));
        assert_eq!(err.status(), StatusCode::GATEWAY_TIMEOUT);
        assert_eq!(err.to_string(), "request did not complete within 250ms");
    }

    #[test]
    fn body_is_plain_text_error_message() {
        let res = ApiError::from(StoreError::Reference { owner_id: 7 }).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(res.headers()[header::CONTENT_TYPE], TEXT_PLAIN);
    }

    fn sqlx_pool_closed() -> fleetreg_infra::error::SqlxError {
        fleetreg_infra::error::SqlxError::PoolClosed
    }
}
