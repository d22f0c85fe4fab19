use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use tracing::instrument;

use crate::middleware::auth::CurrentSession;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{Profile, UpdateAddressDto, UpdateDescriptionDto, UpdateSkillsDto};
use super::service::ProfilesService;

/// Get the caller's own profile
#[utoipa::path(
    get,
    path = "/api/profiles/me",
    responses(
        (status = 200, description = "The caller's profile", body = Profile),
        (status = 401, description = "Not signed in"),
        (status = 404, description = "No profile row yet")
    ),
    security(("session_cookie" = [])),
    tag = "Profiles"
)]
#[instrument(skip(state))]
pub async fn get_me(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Profile>, AppError> {
    let profile = ProfilesService::me(state.backend.as_ref(), &session).await?;
    Ok(Json(profile))
}

/// Get a public profile by username
#[utoipa::path(
    get,
    path = "/api/profiles/{username}",
    params(("username" = String, Path, description = "Profile username")),
    responses(
        (status = 200, description = "The profile", body = Profile),
        (status = 404, description = "Unknown username")
    ),
    tag = "Profiles"
)]
#[instrument(skip(state))]
pub async fn get_by_username(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Result<Json<Profile>, AppError> {
    let profile = ProfilesService::by_username(state.backend.as_ref(), &username).await?;
    Ok(Json(profile))
}

/// Update the caller's profile descriptions
#[utoipa::path(
    patch,
    path = "/api/profiles/me/description",
    request_body = UpdateDescriptionDto,
    responses(
        (status = 200, description = "Updated profile", body = Profile),
        (status = 401, description = "Not signed in"),
        (status = 422, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Profiles"
)]
#[instrument(skip(state))]
pub async fn update_description(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ValidatedJson(dto): ValidatedJson<UpdateDescriptionDto>,
) -> Result<Json<Profile>, AppError> {
    let profile =
        ProfilesService::update_description(state.backend.as_ref(), &session, dto).await?;
    Ok(Json(profile))
}

/// Replace the caller's skill list
#[utoipa::path(
    put,
    path = "/api/profiles/me/skills",
    request_body = UpdateSkillsDto,
    responses(
        (status = 204, description = "Skills replaced"),
        (status = 401, description = "Not signed in"),
        (status = 422, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Profiles"
)]
#[instrument(skip(state))]
pub async fn update_skills(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ValidatedJson(dto): ValidatedJson<UpdateSkillsDto>,
) -> Result<StatusCode, AppError> {
    ProfilesService::update_skills(state.backend.as_ref(), &session, dto).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Update the caller's address
#[utoipa::path(
    patch,
    path = "/api/profiles/me/address",
    request_body = UpdateAddressDto,
    responses(
        (status = 200, description = "Updated profile", body = Profile),
        (status = 401, description = "Not signed in"),
        (status = 422, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Profiles"
)]
#[instrument(skip(state))]
pub async fn update_address(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ValidatedJson(dto): ValidatedJson<UpdateAddressDto>,
) -> Result<Json<Profile>, AppError> {
    let profile = ProfilesService::update_address(state.backend.as_ref(), &session, dto).await?;
    Ok(Json(profile))
}

/// Mark the caller's profile setup as finished
#[utoipa::path(
    post,
    path = "/api/profiles/me/complete",
    responses(
        (status = 200, description = "Profile marked complete", body = Profile),
        (status = 401, description = "Not signed in"),
        (status = 422, description = "Required setup fields still missing")
    ),
    security(("session_cookie" = [])),
    tag = "Profiles"
)]
#[instrument(skip(state))]
pub async fn complete(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
) -> Result<Json<Profile>, AppError> {
    let profile = ProfilesService::complete(state.backend.as_ref(), &session).await?;
    Ok(Json(profile))
}
