use airline_core::CoreError;
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

#[derive(Debug)]
pub enum AppError {
    AuthenticationError(String),
    AuthorizationError(String),
    ValidationError(String),
    NotFoundError(String),
    ConflictError(String),
    InternalServerError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            AppError::AuthenticationError(msg) => {
                let body = Json(json!({ "error": msg }));
                return (
                    StatusCode::UNAUTHORIZED,
                    [(header::WWW_AUTHENTICATE, "Basic realm=\"airline\"")],
                    body,
                )
                    .into_response();
            }
            AppError::AuthorizationError(msg) => (StatusCode::FORBIDDEN, msg),
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFoundError(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::ConflictError(msg) => (StatusCode::CONFLICT, msg),
            AppError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
        }));

        (status, body).into_response()
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match &err {
            CoreError::NotFound(_) => AppError::NotFoundError(err.to_string()),
            CoreError::Conflict(_) => AppError::ConflictError(err.to_string()),
            CoreError::Validation(_) => AppError::ValidationError(err.to_string()),
            // Never echo vault details to the client
            CoreError::Vault(e) => AppError::InternalServerError(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use airline_core::VaultError;

    #[test]
    fn test_core_error_status_mapping() {
        let cases = [
            (CoreError::NotFound("Flight IB100".into()), StatusCode::NOT_FOUND),
            (CoreError::Conflict("Flight IB100".into()), StatusCode::CONFLICT),
            (CoreError::Validation("bad".into()), StatusCode::BAD_REQUEST),
            (
                CoreError::Vault(VaultError::CryptoFailure("padding".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];
        for (err, status) in cases {
            assert_eq!(AppError::from(err).into_response().status(), status);
        }
    }

    #[test]
    fn test_unauthenticated_carries_challenge() {
        let resp = AppError::AuthenticationError("missing credentials".into()).into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert!(resp.headers().contains_key(header::WWW_AUTHENTICATE));
    }
}
