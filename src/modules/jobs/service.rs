use anyhow::anyhow;
use tracing::instrument;
use uuid::Uuid;

use crate::backend::{Backend, BackendError, ResolvedSession, RoleCode};
use crate::utils::errors::AppError;

use super::model::{CreateJobDto, Job, JobFilter};

pub struct JobsService;

impl JobsService {
    pub async fn list(backend: &dyn Backend, filter: &JobFilter) -> Result<Vec<Job>, AppError> {
        backend.list_jobs(filter).await.map_err(AppError::backend)
    }

    pub async fn get(backend: &dyn Backend, id: Uuid) -> Result<Job, AppError> {
        backend.fetch_job(id).await.map_err(|err| match err {
            BackendError::RowNotFound { .. } => AppError::not_found(anyhow!("Job not found")),
            other => AppError::backend(other),
        })
    }

    /// Posting is a provider capability; the session's role marker is the
    /// authority, same as the page router.
    #[instrument(skip(backend, session, dto), fields(user_id = %session.identity.id))]
    pub async fn create(
        backend: &dyn Backend,
        session: &ResolvedSession,
        dto: CreateJobDto,
    ) -> Result<Job, AppError> {
        if session.identity.role() != Some(RoleCode::Provider) {
            return Err(AppError::forbidden(anyhow!("Only providers can post jobs")));
        }

        backend
            .create_job(session, &dto)
            .await
            .map_err(AppError::backend)
    }
}
