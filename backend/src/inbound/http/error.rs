//! HTTP error envelope and mapping from domain errors.
//!
//! Keeps the domain free of transport concerns by translating
//! [`Error`](crate::domain::Error) into Actix responses here. Store and
//! render failures keep their error code but have their internal messages
//! redacted before leaving the process.

use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use serde_json::Value;
use tracing::error;
use utoipa::ToSchema;

use crate::domain::{Error, ErrorCode};

/// Standard error envelope returned by HTTP handlers.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    #[schema(example = "invalid_payload")]
    code: ErrorCode,
    #[schema(example = "payload must not be empty")]
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<Value>,
}

impl ApiError {
    /// Stable machine-readable error code.
    pub fn code(&self) -> ErrorCode {
        self.code
    }

    /// Human readable message.
    pub fn message(&self) -> &str {
        self.message.as_str()
    }

    fn status(&self) -> StatusCode {
        match self.code {
            ErrorCode::InvalidPayload => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthenticated => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::StoreFailure | ErrorCode::RenderFailure => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn is_internal(&self) -> bool {
        matches!(self.code, ErrorCode::StoreFailure | ErrorCode::RenderFailure)
    }
}

impl From<Error> for ApiError {
    fn from(value: Error) -> Self {
        Self {
            code: value.code(),
            message: value.message().to_owned(),
            details: value.details().cloned(),
        }
    }
}

impl From<actix_web::Error> for ApiError {
    fn from(err: actix_web::Error) -> Self {
        error!(error = %err, "actix error promoted to API error");
        Self {
            code: ErrorCode::StoreFailure,
            message: "internal server error".to_owned(),
            details: None,
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        if self.is_internal() {
            error!(code = ?self.code, message = %self.message, "request failed");
            let mut redacted = self.clone();
            redacted.message = match self.code {
                ErrorCode::RenderFailure => "barcode rendering failed".to_owned(),
                _ => "barcode store unavailable".to_owned(),
            };
            redacted.details = None;
            return HttpResponse::build(self.status()).json(redacted);
        }
        HttpResponse::build(self.status()).json(self)
    }
}

/// Convenience alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use actix_web::body::to_bytes;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case(Error::invalid_payload("bad"), StatusCode::BAD_REQUEST)]
    #[case(Error::unauthenticated("who"), StatusCode::UNAUTHORIZED)]
    #[case(Error::not_found("gone"), StatusCode::NOT_FOUND)]
    #[case(Error::store_failure("down"), StatusCode::INTERNAL_SERVER_ERROR)]
    #[case(Error::render_failure("nope"), StatusCode::INTERNAL_SERVER_ERROR)]
    fn status_mapping(#[case] err: Error, #[case] expected: StatusCode) {
        let api: ApiError = err.into();
        assert_eq!(api.status_code(), expected);
    }

    #[rstest]
    #[tokio::test]
    async fn store_failures_are_redacted() {
        let api: ApiError = Error::store_failure("connection string leaked").into();
        let response = api.error_response();
        let body = to_bytes(response.into_body()).await.expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(json["code"], "store_failure");
        assert_eq!(json["message"], "barcode store unavailable");
    }

    #[rstest]
    #[tokio::test]
    async fn validation_failures_keep_their_message() {
        let api: ApiError = Error::invalid_payload("payload must not be empty").into();
        let body = to_bytes(api.error_response().into_body())
            .await
            .expect("body");
        let json: serde_json::Value = serde_json::from_slice(&body).expect("json");
        assert_eq!(json["message"], "payload must not be empty");
    }
}
