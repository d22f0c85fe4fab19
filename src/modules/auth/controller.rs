use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use tracing::instrument;

use crate::middleware::auth::CurrentSession;
use crate::middleware::session::apply_cookie_mutations;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{LoginRequest, LoginResponse, MeResponse, MessageResponse, RegisterRequest};
use super::service::AuthService;

/// Sign in with email and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Signed in; session cookies set", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<LoginRequest>,
) -> Result<Response, AppError> {
    let signed_in = AuthService::login(state.backend.as_ref(), dto).await?;

    let mut response = Json(LoginResponse {
        user: signed_in.identity,
    })
    .into_response();
    apply_cookie_mutations(&mut response, &signed_in.cookies);
    Ok(response)
}

/// Register a new account with a marketplace role
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created; verification email sent", body = MessageResponse),
        (status = 400, description = "Unknown role code or backend rejection"),
        (status = 422, description = "Validation failed")
    ),
    tag = "Authentication"
)]
#[instrument(skip(state, dto))]
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<RegisterRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), AppError> {
    AuthService::register(state.backend.as_ref(), dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "Check your email to verify your account.".to_string(),
        }),
    ))
}

/// Sign out and clear the session cookies
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 200, description = "Signed out; session cookies cleared", body = MessageResponse),
        (status = 401, description = "Not signed in")
    ),
    security(("session_cookie" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn logout(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Response, AppError> {
    let cookies = AuthService::logout(state.backend.as_ref(), &session).await?;

    let mut response = Json(MessageResponse {
        message: "Signed out.".to_string(),
    })
    .into_response();
    apply_cookie_mutations(&mut response, &cookies);
    Ok(response)
}

/// Refetch the authenticated caller and their profile
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "The caller and their profile", body = MeResponse),
        (status = 401, description = "Not signed in")
    ),
    security(("session_cookie" = [])),
    tag = "Authentication"
)]
#[instrument(skip(state))]
pub async fn me(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<MeResponse>, AppError> {
    let profile = AuthService::current_profile(state.backend.as_ref(), &session).await?;

    Ok(Json(MeResponse {
        user: session.identity,
        profile,
    }))
}
