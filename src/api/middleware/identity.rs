//! Email header identity middleware.
//!
//! There is no session or token layer: vocabulary requests identify their
//! caller with a plaintext `X-Email` header. The middleware resolves the
//! email to a user record (provisioning one on first contact) and injects
//! the resolved user into the request extensions.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use crate::api::AppState;
use crate::config::HEADER_EMAIL;
use crate::errors::AppError;

/// Resolve the `X-Email` header to a user and attach it to the request.
pub async fn identity_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let email = request
        .headers()
        .get(HEADER_EMAIL)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned)
        .ok_or(AppError::Unauthorized)?;

    let user = state.identity_service.resolve(&email).await?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
