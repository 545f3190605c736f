use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use kratko_core::{ErrorKind, KratkoError};
use serde::Serialize;

#[derive(Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

/// Pipeline failure rendered as `{ "detail": ... }` with a matching status.
pub struct ApiError(pub KratkoError);

impl From<KratkoError> for ApiError {
    fn from(err: KratkoError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0.kind() {
            ErrorKind::TranscriptUnavailable => StatusCode::NOT_FOUND,
            ErrorKind::BackendUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self.0, status = status.as_u16(), "request failed");
        } else {
            tracing::warn!(error = %self.0, status = status.as_u16(), "request rejected");
        }
        (
            status,
            Json(ErrorResponse {
                detail: self.0.to_string(),
            }),
        )
            .into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_error_kinds_to_status_codes() {
        assert_eq!(
            ApiError(KratkoError::EmptyTranscript).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError(KratkoError::RemoteUnavailable {
                reason: "down".to_string()
            })
            .status(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ApiError(KratkoError::from(std::io::Error::other("disk full"))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
