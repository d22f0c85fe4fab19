//! Shared test fixtures: an in-memory stand-in for the hosted backend and
//! helpers for building the app around it.

// Each test binary uses a different slice of these helpers.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum_extra::extract::cookie::CookieJar;
use uuid::Uuid;

use hanapbuhay::backend::session::{
    ACCESS_TOKEN_COOKIE, CookieMutation, Identity, ProfileCompletion, REFRESH_TOKEN_COOKIE,
    ResolvedSession, SessionResolution, UserMetadata,
};
use hanapbuhay::backend::{Backend, BackendError, SignUpPayload, SignedIn};
use hanapbuhay::config::cors::CorsConfig;
use hanapbuhay::config::session::SessionConfig;
use hanapbuhay::modules::jobs::model::{CreateJobDto, Job, JobFilter};
use hanapbuhay::modules::lookups::model::{AddressOption, Skill};
use hanapbuhay::modules::profiles::model::{Profile, ProfileChanges};
use hanapbuhay::router::init_router;
use hanapbuhay::state::AppState;

#[derive(Default)]
pub struct FakeBackend {
    /// access token → identity
    users: HashMap<String, Identity>,
    /// email → (password, access token)
    credentials: HashMap<String, (String, String)>,
    completion: HashMap<Uuid, ProfileCompletion>,
    /// Forces every completion lookup to fail with this message.
    completion_error: Option<String>,
    /// Mutations queued on every session resolution, as a rotated token
    /// pair would be.
    resolution_cookies: Vec<CookieMutation>,
    profiles: Mutex<HashMap<Uuid, Profile>>,
    jobs: Mutex<Vec<Job>>,
    skills: Vec<Skill>,
    pub sign_ups: Mutex<Vec<SignUpPayload>>,
}

pub fn identity_with_role(role_code: Option<&str>) -> Identity {
    Identity {
        id: Uuid::new_v4(),
        email: Some(format!("{}@test.ph", Uuid::new_v4())),
        user_metadata: UserMetadata {
            role_code: role_code.map(str::to_string),
            first_name: Some("Test".to_string()),
            last_name: Some("User".to_string()),
        },
    }
}

pub fn empty_profile(user_id: Uuid) -> Profile {
    Profile {
        user_id,
        username: None,
        first_name: Some("Test".to_string()),
        last_name: Some("User".to_string()),
        short_description: None,
        long_description: None,
        province: None,
        city_muni: None,
        barangay: None,
        address_1: None,
        address_2: None,
        postal_code: None,
        skill_ids: vec![],
        is_completed: false,
        created_at: None,
    }
}

pub fn filled_profile(user_id: Uuid) -> Profile {
    Profile {
        username: Some("juandc".to_string()),
        short_description: Some("Electrician".to_string()),
        long_description: Some("Residential and commercial wiring.".to_string()),
        province: Some("Cebu".to_string()),
        city_muni: Some("Cebu City".to_string()),
        barangay: Some("Lahug".to_string()),
        ..empty_profile(user_id)
    }
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an identity reachable via `token`, with a completion flag
    /// for the session router to look up.
    pub fn add_user(
        &mut self,
        token: &str,
        role_code: Option<&str>,
        completion: ProfileCompletion,
    ) -> Uuid {
        let identity = identity_with_role(role_code);
        let user_id = identity.id;
        self.users.insert(token.to_string(), identity);
        self.completion.insert(user_id, completion);
        user_id
    }

    /// An identity the session resolver accepts but whose profile row is
    /// missing, so completion lookups fail.
    pub fn add_user_without_profile(&mut self, token: &str, role_code: Option<&str>) -> Uuid {
        let identity = identity_with_role(role_code);
        let user_id = identity.id;
        self.users.insert(token.to_string(), identity);
        user_id
    }

    pub fn add_credentials(&mut self, email: &str, password: &str, token: &str) {
        self.credentials
            .insert(email.to_string(), (password.to_string(), token.to_string()));
    }

    pub fn insert_profile(&mut self, profile: Profile) {
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.user_id, profile);
    }

    pub fn insert_job(&mut self, job: Job) {
        self.jobs.lock().unwrap().push(job);
    }

    pub fn with_skills(&mut self, names: &[&str]) -> Vec<Uuid> {
        self.skills = names
            .iter()
            .map(|name| Skill {
                id: Uuid::new_v4(),
                name: name.to_string(),
            })
            .collect();
        self.skills.iter().map(|s| s.id).collect()
    }

    pub fn queue_resolution_cookies(&mut self, cookies: Vec<CookieMutation>) {
        self.resolution_cookies = cookies;
    }

    pub fn fail_completion_lookups(&mut self, message: &str) {
        self.completion_error = Some(message.to_string());
    }

    pub fn job(&self, index: usize) -> Job {
        self.jobs.lock().unwrap()[index].clone()
    }

    pub fn profile(&self, user_id: Uuid) -> Profile {
        self.profiles.lock().unwrap()[&user_id].clone()
    }

    fn session_for(&self, token: &str) -> Option<ResolvedSession> {
        self.users.get(token).map(|identity| ResolvedSession {
            identity: identity.clone(),
            access_token: token.to_string(),
        })
    }
}

#[async_trait]
impl Backend for FakeBackend {
    async fn resolve_session(&self, jar: &CookieJar) -> Result<SessionResolution, BackendError> {
        let session = jar
            .get(ACCESS_TOKEN_COOKIE)
            .and_then(|cookie| self.session_for(cookie.value()));
        Ok(SessionResolution {
            session,
            cookies: self.resolution_cookies.clone(),
        })
    }

    async fn profile_completion(
        &self,
        session: &ResolvedSession,
    ) -> Result<ProfileCompletion, BackendError> {
        if let Some(message) = &self.completion_error {
            return Err(BackendError::api(500, message.clone()));
        }
        self.completion
            .get(&session.identity.id)
            .copied()
            .ok_or(BackendError::RowNotFound { table: "profiles" })
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn, BackendError> {
        let (expected, token) = self
            .credentials
            .get(email)
            .ok_or_else(|| BackendError::api(400, "invalid_grant"))?;
        if expected != password {
            return Err(BackendError::api(400, "invalid_grant"));
        }
        let identity = self.users[token].clone();
        Ok(SignedIn {
            identity,
            cookies: vec![
                CookieMutation::session(ACCESS_TOKEN_COOKIE, token.clone()),
                CookieMutation::session(REFRESH_TOKEN_COOKIE, format!("refresh-{token}")),
            ],
        })
    }

    async fn sign_up(&self, payload: &SignUpPayload) -> Result<(), BackendError> {
        self.sign_ups.lock().unwrap().push(payload.clone());
        Ok(())
    }

    async fn sign_out(
        &self,
        _session: &ResolvedSession,
    ) -> Result<Vec<CookieMutation>, BackendError> {
        Ok(vec![
            CookieMutation::removal(ACCESS_TOKEN_COOKIE),
            CookieMutation::removal(REFRESH_TOKEN_COOKIE),
        ])
    }

    async fn fetch_profile(&self, user_id: Uuid) -> Result<Profile, BackendError> {
        self.profiles
            .lock()
            .unwrap()
            .get(&user_id)
            .cloned()
            .ok_or(BackendError::RowNotFound { table: "profiles" })
    }

    async fn fetch_profile_by_username(&self, username: &str) -> Result<Profile, BackendError> {
        self.profiles
            .lock()
            .unwrap()
            .values()
            .find(|p| p.username.as_deref() == Some(username))
            .cloned()
            .ok_or(BackendError::RowNotFound { table: "profiles" })
    }

    async fn update_profile(
        &self,
        session: &ResolvedSession,
        changes: &ProfileChanges,
    ) -> Result<Profile, BackendError> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .get_mut(&session.identity.id)
            .ok_or(BackendError::RowNotFound { table: "profiles" })?;

        macro_rules! apply {
            ($($field:ident),*) => {
                $(if let Some(value) = &changes.$field {
                    profile.$field = Some(value.clone());
                })*
            };
        }
        apply!(
            short_description,
            long_description,
            province,
            city_muni,
            barangay,
            address_1,
            address_2,
            postal_code
        );
        if let Some(is_completed) = changes.is_completed {
            profile.is_completed = is_completed;
        }

        Ok(profile.clone())
    }

    async fn set_profile_skills(
        &self,
        session: &ResolvedSession,
        skill_ids: &[Uuid],
    ) -> Result<(), BackendError> {
        let mut profiles = self.profiles.lock().unwrap();
        let profile = profiles
            .get_mut(&session.identity.id)
            .ok_or(BackendError::RowNotFound { table: "profiles" })?;
        profile.skill_ids = skill_ids.to_vec();
        Ok(())
    }

    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, BackendError> {
        let jobs = self.jobs.lock().unwrap();
        Ok(jobs
            .iter()
            .filter(|job| {
                filter
                    .province
                    .as_ref()
                    .is_none_or(|province| &job.province == province)
                    && filter
                        .city_muni
                        .as_ref()
                        .is_none_or(|city| &job.city_muni == city)
                    && filter
                        .skill_id
                        .is_none_or(|skill| job.skill_ids.contains(&skill))
            })
            .cloned()
            .collect())
    }

    async fn fetch_job(&self, id: Uuid) -> Result<Job, BackendError> {
        self.jobs
            .lock()
            .unwrap()
            .iter()
            .find(|job| job.id == id)
            .cloned()
            .ok_or(BackendError::RowNotFound { table: "jobs" })
    }

    async fn create_job(
        &self,
        session: &ResolvedSession,
        dto: &CreateJobDto,
    ) -> Result<Job, BackendError> {
        let job = Job {
            id: Uuid::new_v4(),
            provider_id: session.identity.id,
            name: dto.name.clone(),
            description: dto.description.clone(),
            price: dto.price,
            province: dto.province.clone(),
            city_muni: dto.city_muni.clone(),
            barangay: dto.barangay.clone(),
            skill_ids: dto.skill_ids.clone(),
            created_at: None,
        };
        self.jobs.lock().unwrap().push(job.clone());
        Ok(job)
    }

    async fn list_skills(&self, query: Option<&str>) -> Result<Vec<Skill>, BackendError> {
        Ok(self
            .skills
            .iter()
            .filter(|skill| {
                query.is_none_or(|q| skill.name.to_lowercase().contains(&q.to_lowercase()))
            })
            .cloned()
            .collect())
    }

    async fn list_provinces(&self) -> Result<Vec<AddressOption>, BackendError> {
        Ok(vec![
            AddressOption {
                code: "0722".to_string(),
                name: "Cebu".to_string(),
            },
            AddressOption {
                code: "1339".to_string(),
                name: "Metro Manila".to_string(),
            },
        ])
    }

    async fn list_cities(&self, province: &str) -> Result<Vec<AddressOption>, BackendError> {
        Ok(match province {
            "0722" => vec![AddressOption {
                code: "072217".to_string(),
                name: "Cebu City".to_string(),
            }],
            _ => vec![],
        })
    }

    async fn list_barangays(&self, city_muni: &str) -> Result<Vec<AddressOption>, BackendError> {
        Ok(match city_muni {
            "072217" => vec![AddressOption {
                code: "072217040".to_string(),
                name: "Lahug".to_string(),
            }],
            _ => vec![],
        })
    }
}

pub fn test_state(backend: Arc<FakeBackend>) -> AppState {
    test_state_with_config(backend, SessionConfig::default())
}

pub fn test_state_with_config(backend: Arc<FakeBackend>, session_config: SessionConfig) -> AppState {
    AppState {
        backend,
        session_config,
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        },
    }
}

pub fn test_app(backend: Arc<FakeBackend>) -> axum::Router {
    init_router(test_state(backend))
}

/// Cookie header value for a session under `token`.
pub fn session_cookie(token: &str) -> String {
    format!("{ACCESS_TOKEN_COOKIE}={token}")
}
