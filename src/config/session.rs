use std::env;

/// Policy knobs for the session router.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Paths an anonymous caller may visit, matched exactly.
    pub public_routes: Vec<String>,
    /// Where to send an authenticated caller whose role marker is absent or
    /// unrecognized. Unset preserves the historical behavior: no redirect,
    /// the request passes through.
    pub unknown_role_redirect: Option<String>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            public_routes: vec!["/".to_string(), "/about/".to_string()],
            unknown_role_redirect: None,
        }
    }
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let public_routes = env::var("PUBLIC_ROUTES")
            .map(|raw| {
                raw.split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect()
            })
            .unwrap_or(defaults.public_routes);

        Self {
            public_routes,
            unknown_role_redirect: env::var("UNKNOWN_ROLE_REDIRECT")
                .ok()
                .filter(|s| !s.is_empty()),
        }
    }
}
