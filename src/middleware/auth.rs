use anyhow::anyhow;
use axum::{extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::CookieJar;

use crate::backend::ResolvedSession;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Extractor that resolves the caller's session for API handlers.
///
/// Rejects anonymous callers with 401. Page navigation is gated by the
/// session router instead; this is for the `/api` surface, where a
/// redirect would be the wrong answer.
#[derive(Debug, Clone)]
pub struct CurrentSession(pub ResolvedSession);

impl FromRequestParts<AppState> for CurrentSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let resolution = state
            .backend
            .resolve_session(&jar)
            .await
            .map_err(AppError::backend)?;

        let session = resolution
            .session
            .ok_or_else(|| AppError::unauthorized(anyhow!("Not signed in")))?;

        Ok(CurrentSession(session))
    }
}
