//! Client boundary to the hosted auth-and-database service.
//!
//! Everything the application knows about persistence and sessions goes
//! through the [`Backend`] trait: session resolution and the profile
//! completion flag for the router, plus the single-table queries the API
//! modules proxy. [`HostedBackend`] is the HTTP implementation; tests swap
//! in an in-memory fake.

pub mod error;
pub mod hosted;
pub mod session;

use async_trait::async_trait;
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

pub use error::BackendError;
pub use hosted::HostedBackend;
pub use session::{
    CookieMutation, Identity, ProfileCompletion, ResolvedSession, RoleCode, SessionResolution,
    UserMetadata,
};

use crate::modules::jobs::model::{CreateJobDto, Job, JobFilter};
use crate::modules::lookups::model::{AddressOption, Skill};
use crate::modules::profiles::model::{Profile, ProfileChanges};

/// A freshly signed-in caller: the identity and the session cookies the
/// backend issued for it.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub identity: Identity,
    pub cookies: Vec<CookieMutation>,
}

/// Sign-up payload forwarded to the backend's identity store.
#[derive(Debug, Clone, serde::Serialize)]
pub struct SignUpPayload {
    pub email: String,
    pub password: String,
    pub data: UserMetadata,
}

#[async_trait]
pub trait Backend: Send + Sync {
    /// Resolve the caller's session from their request cookies, refreshing
    /// rotated tokens against the identity store. `session: None` means an
    /// anonymous caller; transport failures are errors.
    async fn resolve_session(&self, jar: &CookieJar) -> Result<SessionResolution, BackendError>;

    /// Single-row lookup of the caller's onboarding completion flag, run
    /// under the caller's own credentials. A missing row is an error.
    async fn profile_completion(
        &self,
        session: &ResolvedSession,
    ) -> Result<ProfileCompletion, BackendError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn, BackendError>;
    async fn sign_up(&self, payload: &SignUpPayload) -> Result<(), BackendError>;
    /// Revokes the session server-side and returns the cookie mutations
    /// that clear it client-side.
    async fn sign_out(&self, session: &ResolvedSession)
    -> Result<Vec<CookieMutation>, BackendError>;

    async fn fetch_profile(&self, user_id: Uuid) -> Result<Profile, BackendError>;
    async fn fetch_profile_by_username(&self, username: &str) -> Result<Profile, BackendError>;
    async fn update_profile(
        &self,
        session: &ResolvedSession,
        changes: &ProfileChanges,
    ) -> Result<Profile, BackendError>;
    async fn set_profile_skills(
        &self,
        session: &ResolvedSession,
        skill_ids: &[Uuid],
    ) -> Result<(), BackendError>;

    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, BackendError>;
    async fn fetch_job(&self, id: Uuid) -> Result<Job, BackendError>;
    async fn create_job(
        &self,
        session: &ResolvedSession,
        job: &CreateJobDto,
    ) -> Result<Job, BackendError>;

    async fn list_skills(&self, query: Option<&str>) -> Result<Vec<Skill>, BackendError>;
    async fn list_provinces(&self) -> Result<Vec<AddressOption>, BackendError>;
    async fn list_cities(&self, province: &str) -> Result<Vec<AddressOption>, BackendError>;
    async fn list_barangays(&self, city_muni: &str) -> Result<Vec<AddressOption>, BackendError>;
}
