//! HTTP error response conversion
//!
//! Handlers return `Result<impl IntoResponse, HttpAppError>`. Errors from the storage and
//! processing layers convert into `HttpAppError` through the `From` impls below, so each
//! failure is translated once, here.

use axum::{
    extract::multipart::{MultipartError, MultipartRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tubely_core::{AppError, ErrorMetadata, LogLevel};
use tubely_processing::ProcessingError;
use tubely_storage::StorageError;
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
    /// Machine-readable error code for programmatic handling
    pub code: String,
    /// Whether this error is recoverable (can be retried)
    pub recoverable: bool,
}

/// Wrapper type for AppError to implement IntoResponse
///
/// Needed because of the orphan rule: `IntoResponse` and `AppError` are both foreign here.
#[derive(Debug)]
pub struct HttpAppError(pub AppError);

impl From<AppError> for HttpAppError {
    fn from(err: AppError) -> Self {
        HttpAppError(err)
    }
}

impl From<anyhow::Error> for HttpAppError {
    fn from(err: anyhow::Error) -> Self {
        HttpAppError(AppError::from(err))
    }
}

fn log_error(error: &AppError) {
    let error_type = error.error_type();
    let details = error.detailed_message();
    match error.log_level() {
        LogLevel::Debug => {
            tracing::debug!(error = %details, error_type = error_type, "Request failed");
        }
        LogLevel::Warn => {
            tracing::warn!(error = %details, error_type = error_type, "Request failed");
        }
        LogLevel::Error => {
            tracing::error!(error = %details, error_type = error_type, "Request failed");
        }
    }
}

impl IntoResponse for HttpAppError {
    fn into_response(self) -> Response {
        let app_error = &self.0;

        let status = StatusCode::from_u16(app_error.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        log_error(app_error);

        let body = Json(ErrorResponse {
            error: app_error.client_message(),
            code: app_error.error_code().to_string(),
            recoverable: app_error.is_recoverable(),
        });

        (status, body).into_response()
    }
}

// Convert domain errors to HttpAppError (avoids orphan rule: we impl for local HttpAppError)

impl From<StorageError> for HttpAppError {
    fn from(err: StorageError) -> Self {
        let app = match err {
            StorageError::UploadFailed(msg) => AppError::ExternalService(msg),
            StorageError::WriteFailed(msg) => AppError::Internal(msg),
            StorageError::InvalidKey(msg) => AppError::Internal(format!("Invalid key: {}", msg)),
            StorageError::IoError(err) => AppError::Internal(format!("IO error: {}", err)),
            StorageError::ConfigError(msg) => AppError::Internal(msg),
        };
        HttpAppError(app)
    }
}

impl From<ProcessingError> for HttpAppError {
    fn from(err: ProcessingError) -> Self {
        let app = match err {
            ProcessingError::NoVideoStream(msg) => AppError::UnprocessableMedia(format!(
                "Uploaded file has no usable video stream: {}",
                msg
            )),
            other => AppError::ExternalTool(other.to_string()),
        };
        HttpAppError(app)
    }
}

/// Multipart read failures: a tripped body limit is 413, anything else is a malformed form.
impl From<MultipartError> for HttpAppError {
    fn from(err: MultipartError) -> Self {
        if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
            HttpAppError(AppError::PayloadTooLarge(
                "Request body exceeds the upload size limit".to_string(),
            ))
        } else {
            HttpAppError(AppError::BadRequest(format!(
                "Unable to parse form file: {}",
                err.body_text()
            )))
        }
    }
}

impl From<MultipartRejection> for HttpAppError {
    fn from(rejection: MultipartRejection) -> Self {
        HttpAppError(AppError::BadRequest(format!(
            "Unable to parse form file: {}",
            rejection.body_text()
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remote_storage_failure_is_external_service() {
        let HttpAppError(err) = StorageError::UploadFailed("AccessDenied".to_string()).into();
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "EXTERNAL_SERVICE_ERROR");
        assert_eq!(err.client_message(), "Failed to store media file");
    }

    #[test]
    fn test_local_write_failure_is_internal() {
        let HttpAppError(err) = StorageError::WriteFailed("disk full".to_string()).into();
        assert_eq!(err.error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_missing_video_stream_is_bad_request() {
        let HttpAppError(err) = ProcessingError::NoVideoStream("audio only".to_string()).into();
        assert_eq!(err.http_status_code(), 400);
        assert_eq!(err.error_code(), "UNPROCESSABLE_MEDIA");
    }

    #[test]
    fn test_tool_failures_are_external_tool() {
        let HttpAppError(err) = ProcessingError::TimedOut {
            tool: "ffmpeg".to_string(),
            secs: 300,
        }
        .into();
        assert_eq!(err.http_status_code(), 500);
        assert_eq!(err.error_code(), "EXTERNAL_TOOL_ERROR");
    }

    #[tokio::test]
    async fn test_response_body_shape() {
        let response =
            HttpAppError(AppError::Forbidden("User unauthorized for current video".into()))
                .into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.error, "User unauthorized for current video");
        assert_eq!(parsed.code, "FORBIDDEN");
        assert!(!parsed.recoverable);
    }
}
