//! HTTP client for the hosted backend.
//!
//! Auth endpoints live under `/auth/v1`, single-table queries under
//! `/rest/v1` with PostgREST filter syntax. Every request carries the
//! project's public API key; row queries additionally run under the
//! caller's access token so row-level policies apply.

use async_trait::async_trait;
use axum_extra::extract::cookie::CookieJar;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::debug;
use uuid::Uuid;

use crate::config::backend::BackendConfig;
use crate::modules::jobs::model::{CreateJobDto, Job, JobFilter};
use crate::modules::lookups::model::{AddressOption, Skill};
use crate::modules::profiles::model::{Profile, ProfileChanges};

use super::error::BackendError;
use super::session::{
    ACCESS_TOKEN_COOKIE, CookieMutation, Identity, ProfileCompletion, REFRESH_TOKEN_COOKIE,
    ResolvedSession, SessionResolution,
};
use super::{Backend, SignUpPayload, SignedIn};

/// Single-object row semantics: exactly one row or the backend answers 406.
const PGRST_OBJECT: &str = "application/vnd.pgrst.object+json";

pub struct HostedBackend {
    http: reqwest::Client,
    config: BackendConfig,
}

/// Token-grant payload from the identity endpoints.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    refresh_token: String,
    user: Identity,
}

#[derive(Debug, Deserialize)]
struct CompletionRow {
    #[serde(default)]
    is_completed: bool,
}

impl HostedBackend {
    pub fn new(config: BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{}", self.config.base_url, path)
    }

    fn rest_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.base_url, table)
    }

    /// Base headers for any backend call; `token` defaults to the public
    /// key for anonymous access.
    fn request(&self, method: Method, url: String, token: Option<&str>) -> RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(token.unwrap_or(&self.config.anon_key))
    }

    /// Turn a non-success answer into a typed error, pulling the message
    /// out of the backend's error body when present.
    async fn api_error(response: Response) -> BackendError {
        let status = response.status().as_u16();
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<serde_json::Value>(&body)
                .ok()
                .and_then(|v| {
                    ["message", "msg", "error_description", "error"]
                        .iter()
                        .find_map(|key| v.get(key).and_then(|m| m.as_str()).map(str::to_string))
                })
                .unwrap_or(body),
            Err(_) => String::new(),
        };
        if message.is_empty() {
            BackendError::api(status, format!("backend returned status {status}"))
        } else {
            BackendError::api(status, message)
        }
    }

    /// Fetch the identity behind an access token. `None` when the backend
    /// rejects the token (expired or revoked).
    async fn fetch_user(&self, access_token: &str) -> Result<Option<Identity>, BackendError> {
        let response = self
            .request(Method::GET, self.auth_url("user"), Some(access_token))
            .send()
            .await?;
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            _ => Err(Self::api_error(response).await),
        }
    }

    /// Exchange a refresh token for a rotated pair. `None` when the token
    /// is no longer valid.
    async fn refresh(&self, refresh_token: &str) -> Result<Option<TokenResponse>, BackendError> {
        let response = self
            .request(
                Method::POST,
                self.auth_url("token?grant_type=refresh_token"),
                None,
            )
            .json(&json!({ "refresh_token": refresh_token }))
            .send()
            .await?;
        match response.status() {
            StatusCode::BAD_REQUEST | StatusCode::UNAUTHORIZED => Ok(None),
            status if status.is_success() => Ok(Some(response.json().await?)),
            _ => Err(Self::api_error(response).await),
        }
    }

    fn session_cookies(tokens: &TokenResponse) -> Vec<CookieMutation> {
        vec![
            CookieMutation::session(ACCESS_TOKEN_COOKIE, tokens.access_token.clone()),
            CookieMutation::session(REFRESH_TOKEN_COOKIE, tokens.refresh_token.clone()),
        ]
    }

    fn clear_session_cookies() -> Vec<CookieMutation> {
        vec![
            CookieMutation::removal(ACCESS_TOKEN_COOKIE),
            CookieMutation::removal(REFRESH_TOKEN_COOKIE),
        ]
    }

    async fn rest_one<T: DeserializeOwned>(
        &self,
        table: &'static str,
        query: &[(&str, String)],
        token: Option<&str>,
    ) -> Result<T, BackendError> {
        let response = self
            .request(Method::GET, self.rest_url(table), token)
            .header(reqwest::header::ACCEPT, PGRST_OBJECT)
            .query(query)
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_ACCEPTABLE | StatusCode::NOT_FOUND => {
                Err(BackendError::RowNotFound { table })
            }
            status if status.is_success() => Ok(response.json().await?),
            _ => Err(Self::api_error(response).await),
        }
    }

    async fn rest_list<T: DeserializeOwned>(
        &self,
        table: &'static str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, BackendError> {
        let response = self
            .request(Method::GET, self.rest_url(table), None)
            .query(query)
            .send()
            .await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::api_error(response).await)
        }
    }

    async fn rest_insert<T: DeserializeOwned>(
        &self,
        table: &'static str,
        body: &serde_json::Value,
        token: &str,
    ) -> Result<T, BackendError> {
        let response = self
            .request(Method::POST, self.rest_url(table), Some(token))
            .header(reqwest::header::ACCEPT, PGRST_OBJECT)
            .header("Prefer", "return=representation")
            .json(body)
            .send()
            .await?;
        if response.status().is_success() {
            Ok(response.json().await?)
        } else {
            Err(Self::api_error(response).await)
        }
    }

    async fn rest_patch<T: DeserializeOwned>(
        &self,
        table: &'static str,
        query: &[(&str, String)],
        body: &serde_json::Value,
        token: &str,
    ) -> Result<T, BackendError> {
        let response = self
            .request(Method::PATCH, self.rest_url(table), Some(token))
            .header(reqwest::header::ACCEPT, PGRST_OBJECT)
            .header("Prefer", "return=representation")
            .query(query)
            .json(body)
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_ACCEPTABLE | StatusCode::NOT_FOUND => {
                Err(BackendError::RowNotFound { table })
            }
            status if status.is_success() => Ok(response.json().await?),
            _ => Err(Self::api_error(response).await),
        }
    }

    fn eq(value: impl std::fmt::Display) -> String {
        format!("eq.{value}")
    }
}

#[async_trait]
impl Backend for HostedBackend {
    async fn resolve_session(&self, jar: &CookieJar) -> Result<SessionResolution, BackendError> {
        let access_token = jar.get(ACCESS_TOKEN_COOKIE).map(|c| c.value().to_string());
        let refresh_token = jar.get(REFRESH_TOKEN_COOKIE).map(|c| c.value().to_string());

        if access_token.is_none() && refresh_token.is_none() {
            return Ok(SessionResolution::default());
        }

        if let Some(token) = access_token
            && let Some(identity) = self.fetch_user(&token).await?
        {
            return Ok(SessionResolution {
                session: Some(ResolvedSession {
                    identity,
                    access_token: token,
                }),
                cookies: Vec::new(),
            });
        }

        // Access token missing or rejected; one refresh attempt.
        if let Some(token) = refresh_token
            && let Some(tokens) = self.refresh(&token).await?
        {
            debug!(user_id = %tokens.user.id, "session tokens rotated");
            let cookies = Self::session_cookies(&tokens);
            return Ok(SessionResolution {
                session: Some(ResolvedSession {
                    identity: tokens.user,
                    access_token: tokens.access_token,
                }),
                cookies,
            });
        }

        // Stale pair: caller is anonymous, clear what they sent.
        Ok(SessionResolution {
            session: None,
            cookies: Self::clear_session_cookies(),
        })
    }

    async fn profile_completion(
        &self,
        session: &ResolvedSession,
    ) -> Result<ProfileCompletion, BackendError> {
        let row: CompletionRow = self
            .rest_one(
                "profiles",
                &[
                    ("select", "is_completed".to_string()),
                    ("user_id", Self::eq(session.identity.id)),
                ],
                Some(&session.access_token),
            )
            .await?;
        Ok(ProfileCompletion::from(row.is_completed))
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<SignedIn, BackendError> {
        let response = self
            .request(
                Method::POST,
                self.auth_url("token?grant_type=password"),
                None,
            )
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(Self::api_error(response).await);
        }
        let tokens: TokenResponse = response.json().await?;
        let cookies = Self::session_cookies(&tokens);
        Ok(SignedIn {
            identity: tokens.user,
            cookies,
        })
    }

    async fn sign_up(&self, payload: &SignUpPayload) -> Result<(), BackendError> {
        let response = self
            .request(Method::POST, self.auth_url("signup"), None)
            .json(payload)
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::api_error(response).await)
        }
    }

    async fn sign_out(
        &self,
        session: &ResolvedSession,
    ) -> Result<Vec<CookieMutation>, BackendError> {
        let response = self
            .request(
                Method::POST,
                self.auth_url("logout"),
                Some(&session.access_token),
            )
            .send()
            .await?;
        // A token the backend no longer knows is already signed out.
        if !response.status().is_success() && response.status() != StatusCode::UNAUTHORIZED {
            return Err(Self::api_error(response).await);
        }
        Ok(Self::clear_session_cookies())
    }

    async fn fetch_profile(&self, user_id: Uuid) -> Result<Profile, BackendError> {
        self.rest_one(
            "profiles",
            &[("select", "*".to_string()), ("user_id", Self::eq(user_id))],
            None,
        )
        .await
    }

    async fn fetch_profile_by_username(&self, username: &str) -> Result<Profile, BackendError> {
        self.rest_one(
            "profiles",
            &[("select", "*".to_string()), ("username", Self::eq(username))],
            None,
        )
        .await
    }

    async fn update_profile(
        &self,
        session: &ResolvedSession,
        changes: &ProfileChanges,
    ) -> Result<Profile, BackendError> {
        self.rest_patch(
            "profiles",
            &[("user_id", Self::eq(session.identity.id))],
            &serde_json::to_value(changes)?,
            &session.access_token,
        )
        .await
    }

    async fn set_profile_skills(
        &self,
        session: &ResolvedSession,
        skill_ids: &[Uuid],
    ) -> Result<(), BackendError> {
        let _: Profile = self
            .rest_patch(
                "profiles",
                &[("user_id", Self::eq(session.identity.id))],
                &json!({ "skill_ids": skill_ids }),
                &session.access_token,
            )
            .await?;
        Ok(())
    }

    async fn list_jobs(&self, filter: &JobFilter) -> Result<Vec<Job>, BackendError> {
        let mut query = vec![
            ("select", "*".to_string()),
            ("order", "created_at.desc".to_string()),
        ];
        if let Some(province) = &filter.province {
            query.push(("province", Self::eq(province)));
        }
        if let Some(city_muni) = &filter.city_muni {
            query.push(("city_muni", Self::eq(city_muni)));
        }
        if let Some(skill_id) = filter.skill_id {
            query.push(("skill_ids", format!("cs.{{{skill_id}}}")));
        }
        self.rest_list("jobs", &query).await
    }

    async fn fetch_job(&self, id: Uuid) -> Result<Job, BackendError> {
        self.rest_one(
            "jobs",
            &[("select", "*".to_string()), ("id", Self::eq(id))],
            None,
        )
        .await
    }

    async fn create_job(
        &self,
        session: &ResolvedSession,
        job: &CreateJobDto,
    ) -> Result<Job, BackendError> {
        let mut body = serde_json::to_value(job)?;
        body["provider_id"] = json!(session.identity.id);
        self.rest_insert("jobs", &body, &session.access_token).await
    }

    async fn list_skills(&self, query: Option<&str>) -> Result<Vec<Skill>, BackendError> {
        let mut params = vec![
            ("select", "*".to_string()),
            ("order", "name.asc".to_string()),
        ];
        if let Some(q) = query {
            params.push(("name", format!("ilike.*{q}*")));
        }
        self.rest_list("skills", &params).await
    }

    async fn list_provinces(&self) -> Result<Vec<AddressOption>, BackendError> {
        self.rest_list(
            "provinces",
            &[
                ("select", "code,name".to_string()),
                ("order", "name.asc".to_string()),
            ],
        )
        .await
    }

    async fn list_cities(&self, province: &str) -> Result<Vec<AddressOption>, BackendError> {
        self.rest_list(
            "cities",
            &[
                ("select", "code,name".to_string()),
                ("order", "name.asc".to_string()),
                ("province_code", Self::eq(province)),
            ],
        )
        .await
    }

    async fn list_barangays(&self, city_muni: &str) -> Result<Vec<AddressOption>, BackendError> {
        self.rest_list(
            "barangays",
            &[
                ("select", "code,name".to_string()),
                ("order", "name.asc".to_string()),
                ("city_code", Self::eq(city_muni)),
            ],
        )
        .await
    }
}
