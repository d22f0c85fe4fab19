//! Per-request routing policy.
//!
//! A pure decision function: no I/O, no state. Rules are evaluated top to
//! bottom and the first applicable rule wins; no two redirects ever
//! combine.

use axum::http::Uri;

use crate::backend::session::{ProfileCompletion, RoleCode};
use crate::config::session::SessionConfig;

/// What the router knows about an authenticated caller when it decides.
#[derive(Debug, Clone, Copy)]
pub struct Principal {
    pub role: Option<RoleCode>,
    pub completion: ProfileCompletion,
}

/// Classification of the requested path, derived before any rule runs.
#[derive(Debug, Clone, Copy)]
pub struct RouteContext<'a> {
    pub path: &'a str,
    pub is_auth_route: bool,
    pub is_public_route: bool,
    /// The URL names an explicit logout action, in the path or the query.
    pub is_logout: bool,
}

impl<'a> RouteContext<'a> {
    pub fn classify(uri: &'a Uri, config: &SessionConfig) -> Self {
        let path = uri.path();
        Self {
            path,
            is_auth_route: path.starts_with("/auth"),
            is_public_route: config.public_routes.iter().any(|route| route == path),
            is_logout: path.contains("logout")
                || uri.query().is_some_and(|q| q.contains("logout")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteDecision {
    Allow,
    Redirect(String),
}

impl RouteDecision {
    fn redirect(target: impl Into<String>) -> Self {
        Self::Redirect(target.into())
    }
}

/// Decide how to route one request. `principal` is `None` for anonymous
/// callers.
///
/// Rule order is the contract:
/// 1. authenticated callers don't revisit auth pages (except to log out)
/// 2. each known role is confined to its own path namespace
/// 3. incomplete profiles are forced through the role's setup flow
/// 4. completed profiles can't re-enter setup
/// 5. authenticated callers with no recognized role follow the configured
///    fallback, or pass through when none is configured
/// 6. anonymous callers only reach auth and public routes
pub fn route_decision(
    principal: Option<&Principal>,
    ctx: &RouteContext,
    config: &SessionConfig,
) -> RouteDecision {
    if let Some(principal) = principal {
        if ctx.is_auth_route && !ctx.is_logout {
            return RouteDecision::redirect("/");
        }

        match principal.role {
            Some(role) => {
                let policy = role.policy();
                if !ctx.path.starts_with(policy.home) {
                    return RouteDecision::redirect(policy.home);
                }
                if let Some(setup) = policy.setup {
                    match principal.completion {
                        ProfileCompletion::Incomplete if !ctx.path.starts_with(setup) => {
                            return RouteDecision::redirect(setup);
                        }
                        ProfileCompletion::Completed if ctx.path.starts_with(setup) => {
                            return RouteDecision::redirect(policy.home);
                        }
                        _ => {}
                    }
                }
            }
            None => {
                if let Some(target) = &config.unknown_role_redirect {
                    return RouteDecision::Redirect(target.clone());
                }
            }
        }

        return RouteDecision::Allow;
    }

    if !ctx.is_auth_route && !ctx.is_public_route {
        return RouteDecision::redirect("/auth/login");
    }

    RouteDecision::Allow
}
