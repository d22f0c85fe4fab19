//! Session principal types shared by the router and the backend client.
//!
//! The hosted backend owns identity records and session tokens; this module
//! only models what the service reads from them: who the caller is, which
//! role namespace they belong to, and which cookies the backend wants echoed
//! back to the client.

use cookie::{Cookie, SameSite, time::Duration};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Cookie pair the backend issues for a browser session.
pub const ACCESS_TOKEN_COOKIE: &str = "sb-access-token";
pub const REFRESH_TOKEN_COOKIE: &str = "sb-refresh-token";

/// Lifetime for refreshed session cookies, in seconds.
pub const SESSION_COOKIE_MAX_AGE: i64 = 60 * 60 * 24 * 7;

/// Free-form metadata the backend stores alongside an identity at sign-up.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct UserMetadata {
    pub role_code: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// The authenticated caller's backend-issued principal. Read-only here.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub id: Uuid,
    pub email: Option<String>,
    #[serde(default)]
    pub user_metadata: UserMetadata,
}

impl Identity {
    /// Role marker embedded in the identity's metadata, if recognized.
    pub fn role(&self) -> Option<RoleCode> {
        self.user_metadata
            .role_code
            .as_deref()
            .and_then(RoleCode::parse)
    }
}

/// Closed set of role markers a profile can carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoleCode {
    Seeker,
    Provider,
    Admin,
}

/// Per-role path namespace: where the role lives, and where its onboarding
/// flow lives when it has one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RolePolicy {
    pub home: &'static str,
    pub setup: Option<&'static str>,
}

impl RoleCode {
    pub fn parse(code: &str) -> Option<Self> {
        match code {
            "SKR" => Some(Self::Seeker),
            "PDR" => Some(Self::Provider),
            "admin" => Some(Self::Admin),
            _ => None,
        }
    }

    pub fn as_code(self) -> &'static str {
        match self {
            Self::Seeker => "SKR",
            Self::Provider => "PDR",
            Self::Admin => "admin",
        }
    }

    pub fn policy(self) -> RolePolicy {
        match self {
            Self::Seeker => RolePolicy {
                home: "/skr",
                setup: Some("/skr/setup"),
            },
            Self::Provider => RolePolicy {
                home: "/pdr",
                setup: Some("/pdr/setup"),
            },
            // Admins have no onboarding concept, only a namespace.
            Self::Admin => RolePolicy {
                home: "/admin",
                setup: None,
            },
        }
    }
}

/// Whether the caller's onboarding profile is marked complete.
///
/// Lookup failure is a [`super::BackendError`], never a default: the router
/// refuses to guess when completion state is unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileCompletion {
    Completed,
    Incomplete,
}

impl From<bool> for ProfileCompletion {
    fn from(is_completed: bool) -> Self {
        if is_completed {
            Self::Completed
        } else {
            Self::Incomplete
        }
    }
}

/// A validated session: the identity plus the access token the follow-up
/// row lookups must run under.
#[derive(Debug, Clone)]
pub struct ResolvedSession {
    pub identity: Identity,
    pub access_token: String,
}

/// Outcome of resolving the inbound request's session cookies.
///
/// `cookies` holds every mutation the backend produced during resolution
/// (token rotation, stale-cookie clearing). The response rewriter copies
/// them onto the outgoing response no matter how the request is routed.
#[derive(Debug, Clone, Default)]
pub struct SessionResolution {
    pub session: Option<ResolvedSession>,
    pub cookies: Vec<CookieMutation>,
}

/// A cookie the backend wants set on the outgoing response.
#[derive(Debug, Clone, PartialEq)]
pub struct CookieMutation {
    pub name: String,
    pub value: String,
    pub options: CookieOptions,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CookieOptions {
    pub path: String,
    /// Seconds; `Some(0)` clears the cookie.
    pub max_age: Option<i64>,
    pub http_only: bool,
    pub secure: bool,
    pub same_site: SameSite,
}

impl Default for CookieOptions {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            max_age: None,
            http_only: true,
            secure: true,
            same_site: SameSite::Lax,
        }
    }
}

impl CookieMutation {
    /// A session cookie with the standard browser-session options.
    pub fn session(name: &str, value: impl Into<String>) -> Self {
        Self {
            name: name.to_string(),
            value: value.into(),
            options: CookieOptions {
                max_age: Some(SESSION_COOKIE_MAX_AGE),
                ..CookieOptions::default()
            },
        }
    }

    /// An expired cookie that clears `name` on the client.
    pub fn removal(name: &str) -> Self {
        Self {
            name: name.to_string(),
            value: String::new(),
            options: CookieOptions {
                max_age: Some(0),
                ..CookieOptions::default()
            },
        }
    }

    pub fn to_cookie(&self) -> Cookie<'static> {
        let mut builder = Cookie::build((self.name.clone(), self.value.clone()))
            .path(self.options.path.clone())
            .http_only(self.options.http_only)
            .secure(self.options.secure)
            .same_site(self.options.same_site);
        if let Some(seconds) = self.options.max_age {
            builder = builder.max_age(Duration::seconds(seconds));
        }
        builder.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_role_codes() {
        assert_eq!(RoleCode::parse("SKR"), Some(RoleCode::Seeker));
        assert_eq!(RoleCode::parse("PDR"), Some(RoleCode::Provider));
        assert_eq!(RoleCode::parse("admin"), Some(RoleCode::Admin));
    }

    #[test]
    fn rejects_unknown_role_codes() {
        assert_eq!(RoleCode::parse(""), None);
        assert_eq!(RoleCode::parse("skr"), None);
        assert_eq!(RoleCode::parse("ADMIN"), None);
        assert_eq!(RoleCode::parse("moderator"), None);
    }

    #[test]
    fn seeker_and_provider_have_setup_namespaces() {
        assert_eq!(RoleCode::Seeker.policy().setup, Some("/skr/setup"));
        assert_eq!(RoleCode::Provider.policy().setup, Some("/pdr/setup"));
        assert_eq!(RoleCode::Admin.policy().setup, None);
    }

    #[test]
    fn identity_role_comes_from_metadata() {
        let identity = Identity {
            id: Uuid::new_v4(),
            email: Some("worker@example.com".to_string()),
            user_metadata: UserMetadata {
                role_code: Some("SKR".to_string()),
                ..UserMetadata::default()
            },
        };
        assert_eq!(identity.role(), Some(RoleCode::Seeker));

        let no_role = Identity {
            id: Uuid::new_v4(),
            email: None,
            user_metadata: UserMetadata::default(),
        };
        assert_eq!(no_role.role(), None);
    }

    #[test]
    fn removal_mutation_expires_immediately() {
        let cookie = CookieMutation::removal(ACCESS_TOKEN_COOKIE).to_cookie();
        assert_eq!(cookie.max_age(), Some(Duration::seconds(0)));
        assert_eq!(cookie.value(), "");
    }

    #[test]
    fn session_mutation_keeps_options() {
        let cookie = CookieMutation::session(ACCESS_TOKEN_COOKIE, "token").to_cookie();
        assert_eq!(cookie.path(), Some("/"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.secure(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(
            cookie.max_age(),
            Some(Duration::seconds(SESSION_COOKIE_MAX_AGE))
        );
    }
}
