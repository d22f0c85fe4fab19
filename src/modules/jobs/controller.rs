use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentSession;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

use super::model::{CreateJobDto, Job, JobFilter};
use super::service::JobsService;

/// List job postings, newest first
#[utoipa::path(
    get,
    path = "/api/jobs",
    params(JobFilter),
    responses(
        (status = 200, description = "Matching jobs", body = [Job])
    ),
    tag = "Jobs"
)]
#[instrument(skip(state))]
pub async fn list_jobs(
    State(state): State<AppState>,
    Query(filter): Query<JobFilter>,
) -> Result<Json<Vec<Job>>, AppError> {
    let jobs = JobsService::list(state.backend.as_ref(), &filter).await?;
    Ok(Json(jobs))
}

/// Get one job posting
#[utoipa::path(
    get,
    path = "/api/jobs/{id}",
    params(("id" = Uuid, Path, description = "Job id")),
    responses(
        (status = 200, description = "The job", body = Job),
        (status = 404, description = "Unknown job id")
    ),
    tag = "Jobs"
)]
#[instrument(skip(state))]
pub async fn get_job(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Job>, AppError> {
    let job = JobsService::get(state.backend.as_ref(), id).await?;
    Ok(Json(job))
}

/// Post a new job
#[utoipa::path(
    post,
    path = "/api/jobs",
    request_body = CreateJobDto,
    responses(
        (status = 201, description = "Job created", body = Job),
        (status = 401, description = "Not signed in"),
        (status = 403, description = "Caller is not a provider"),
        (status = 422, description = "Validation failed")
    ),
    security(("session_cookie" = [])),
    tag = "Jobs"
)]
#[instrument(skip(state))]
pub async fn create_job(
    State(state): State<AppState>,
    CurrentSession(session): CurrentSession,
    ValidatedJson(dto): ValidatedJson<CreateJobDto>,
) -> Result<(StatusCode, Json<Job>), AppError> {
    let job = JobsService::create(state.backend.as_ref(), &session, dto).await?;
    Ok((StatusCode::CREATED, Json(job)))
}
