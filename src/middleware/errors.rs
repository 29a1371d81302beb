use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::error::ApiError;

pub const REDACTED_MESSAGE: &str = "Internal Server Error";

/// Replace the body of any 500 with a generic message.
///
/// Installed only when internal error text must not leave the process; the
/// original error has already been logged where it was converted.
pub async fn redact_internal_errors(response: Response) -> Response {
    if response.status() == StatusCode::INTERNAL_SERVER_ERROR {
        return ApiError::internal_server_error(REDACTED_MESSAGE).into_response();
    }
    response
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn replaces_internal_error_text() {
        let response = ApiError::internal_server_error("password authentication failed for user \"app\"")
            .into_response();
        let redacted = redact_internal_errors(response).await;
        assert_eq!(redacted.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_text(redacted).await, REDACTED_MESSAGE);
    }

    #[tokio::test]
    async fn leaves_other_responses_alone() {
        let response = ApiError::user_not_found().into_response();
        let passed = redact_internal_errors(response).await;
        assert_eq!(passed.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_text(passed).await, "User not found");
    }
}
