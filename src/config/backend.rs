use std::env;

/// Connection settings for the hosted backend.
///
/// The key here is the project's public ("anon") API key: it only grants
/// whatever the backend's row-level policies allow, with per-user access
/// coming from the caller's own session token.
#[derive(Clone, Debug)]
pub struct BackendConfig {
    pub base_url: String,
    pub anon_key: String,
}

impl BackendConfig {
    /// # Panics
    ///
    /// Panics when `BACKEND_URL` or `BACKEND_ANON_KEY` is unset; the
    /// service cannot do anything without its backend.
    pub fn from_env() -> Self {
        let base_url = env::var("BACKEND_URL").expect("BACKEND_URL must be set");
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: env::var("BACKEND_ANON_KEY").expect("BACKEND_ANON_KEY must be set"),
        }
    }
}
