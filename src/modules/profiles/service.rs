use anyhow::anyhow;
use tracing::instrument;

use crate::backend::{Backend, BackendError, ResolvedSession};
use crate::utils::errors::AppError;

use super::model::{
    Profile, ProfileChanges, UpdateAddressDto, UpdateDescriptionDto, UpdateSkillsDto,
};

pub struct ProfilesService;

impl ProfilesService {
    pub async fn me(
        backend: &dyn Backend,
        session: &ResolvedSession,
    ) -> Result<Profile, AppError> {
        backend
            .fetch_profile(session.identity.id)
            .await
            .map_err(AppError::backend)
    }

    pub async fn by_username(backend: &dyn Backend, username: &str) -> Result<Profile, AppError> {
        backend
            .fetch_profile_by_username(username)
            .await
            .map_err(|err| match err {
                BackendError::RowNotFound { .. } => {
                    AppError::not_found(anyhow!("No profile for username {username}"))
                }
                other => AppError::backend(other),
            })
    }

    #[instrument(skip(backend, session), fields(user_id = %session.identity.id))]
    pub async fn update_description(
        backend: &dyn Backend,
        session: &ResolvedSession,
        dto: UpdateDescriptionDto,
    ) -> Result<Profile, AppError> {
        backend
            .update_profile(session, &ProfileChanges::from(dto))
            .await
            .map_err(AppError::backend)
    }

    #[instrument(skip(backend, session), fields(user_id = %session.identity.id))]
    pub async fn update_address(
        backend: &dyn Backend,
        session: &ResolvedSession,
        dto: UpdateAddressDto,
    ) -> Result<Profile, AppError> {
        backend
            .update_profile(session, &ProfileChanges::from(dto))
            .await
            .map_err(AppError::backend)
    }

    #[instrument(skip(backend, session), fields(user_id = %session.identity.id))]
    pub async fn update_skills(
        backend: &dyn Backend,
        session: &ResolvedSession,
        dto: UpdateSkillsDto,
    ) -> Result<(), AppError> {
        backend
            .set_profile_skills(session, &dto.skill_ids)
            .await
            .map_err(AppError::backend)
    }

    /// Mark setup finished. Refused while required fields are still empty,
    /// so the completion flag the session router trusts can't lie.
    #[instrument(skip(backend, session), fields(user_id = %session.identity.id))]
    pub async fn complete(
        backend: &dyn Backend,
        session: &ResolvedSession,
    ) -> Result<Profile, AppError> {
        let profile = Self::me(backend, session).await?;
        if !Self::setup_complete(&profile) {
            return Err(AppError::unprocessable(anyhow!(
                "Profile is missing required setup fields"
            )));
        }

        backend
            .update_profile(
                session,
                &ProfileChanges {
                    is_completed: Some(true),
                    ..ProfileChanges::default()
                },
            )
            .await
            .map_err(AppError::backend)
    }

    fn setup_complete(profile: &Profile) -> bool {
        let filled =
            |field: &Option<String>| field.as_deref().is_some_and(|v| !v.trim().is_empty());

        filled(&profile.short_description)
            && filled(&profile.long_description)
            && filled(&profile.province)
            && filled(&profile.city_muni)
            && filled(&profile.barangay)
    }
}
