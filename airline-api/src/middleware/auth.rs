use airline_core::policy::{Access, Method};
use axum::{
    extract::{RawPathParams, Request, State},
    middleware::Next,
    response::Response,
    RequestExt,
};
use axum_extra::headers::{authorization::Basic, Authorization, HeaderMapExt};

use crate::error::AppError;
use crate::state::AppState;

// ============================================================================
// Authorization Middleware
// ============================================================================

/// Resolves the caller from HTTP Basic credentials and checks the request against the
/// route table and the per-user subject rules. On success the [`Principal`] is
/// available to handlers as a request extension.
///
/// Runs as a route layer, so the router has already captured path parameters. The
/// subject of a per-user rule is the last capture, percent-decoded exactly as the
/// handler's `Path` extractor sees it.
///
/// [`Principal`]: airline_core::Principal
pub async fn authorize_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 1. Authenticate, if credentials were sent
    let principal = match req.headers().typed_get::<Authorization<Basic>>() {
        Some(credentials) => Some(
            state
                .users
                .authenticate(credentials.username(), credentials.password())
                .await
                .ok_or_else(|| AppError::AuthenticationError("Invalid credentials".to_string()))?,
        ),
        None => None,
    };

    // 2. Route table + subject rules
    let params = req.extract_parts::<RawPathParams>().await.ok();
    let subject = params
        .as_ref()
        .and_then(|params| params.iter().last().map(|(_, value)| value));
    let method = req.method().as_str().parse::<Method>().ok();
    let path = req.uri().path();
    match state.policy.check(method, path, subject, principal.as_ref()) {
        Access::Granted => {}
        Access::Unauthenticated => {
            return Err(AppError::AuthenticationError("Authentication required".to_string()));
        }
        Access::Forbidden => {
            tracing::debug!(
                user = principal.as_ref().map(|p| p.username.as_str()),
                "Access denied to {} {}",
                req.method(),
                path
            );
            return Err(AppError::AuthorizationError("Access denied".to_string()));
        }
    }

    // 3. Inject principal
    if let Some(principal) = principal {
        req.extensions_mut().insert(principal);
    }

    Ok(next.run(req).await)
}
