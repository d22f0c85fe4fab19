//! The session router.
//!
//! One middleware, layered over every page route: resolves the caller's
//! session against the hosted backend, looks up onboarding completion for
//! authenticated callers, applies the routing policy, and copies every
//! cookie mutation the backend produced onto whichever response goes out —
//! pass-through, redirect, or error. A redirect built without those
//! cookies would silently drop a refreshed session and log the user out.

use axum::{
    Json,
    extract::{Request, State},
    http::{HeaderValue, StatusCode, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;
use tracing::{debug, error};

use crate::backend::{BackendError, CookieMutation};
use crate::state::AppState;

use super::policy::{Principal, RouteContext, RouteDecision, route_decision};

pub async fn update_session(
    State(state): State<AppState>,
    jar: CookieJar,
    req: Request,
    next: Next,
) -> Response {
    let resolution = match state.backend.resolve_session(&jar).await {
        Ok(resolution) => resolution,
        Err(err) => {
            error!(error = %err, "session resolution failed");
            return lookup_failure(&err);
        }
    };

    let principal = match &resolution.session {
        Some(session) => match state.backend.profile_completion(session).await {
            Ok(completion) => Some(Principal {
                role: session.identity.role(),
                completion,
            }),
            Err(err) => {
                // Deliberate fail-fast: the router never guesses a default
                // route when completion state is unknown.
                error!(user_id = %session.identity.id, error = %err, "profile completion lookup failed");
                let mut response = lookup_failure(&err);
                apply_cookie_mutations(&mut response, &resolution.cookies);
                return response;
            }
        },
        None => None,
    };

    let path = req.uri().path().to_string();
    let decision = {
        let ctx = RouteContext::classify(req.uri(), &state.session_config);
        route_decision(principal.as_ref(), &ctx, &state.session_config)
    };

    let mut response = match decision {
        RouteDecision::Allow => next.run(req).await,
        RouteDecision::Redirect(target) => {
            debug!(%path, %target, "session router redirect");
            Redirect::temporary(&target).into_response()
        }
    };

    apply_cookie_mutations(&mut response, &resolution.cookies);
    response
}

/// Append one `Set-Cookie` header per queued mutation, options intact.
pub fn apply_cookie_mutations(response: &mut Response, mutations: &[CookieMutation]) {
    for mutation in mutations {
        match HeaderValue::from_str(&mutation.to_cookie().to_string()) {
            Ok(value) => {
                response.headers_mut().append(header::SET_COOKIE, value);
            }
            Err(err) => {
                error!(cookie = %mutation.name, error = %err, "dropping malformed cookie mutation");
            }
        }
    }
}

fn lookup_failure(err: &BackendError) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": err.to_string() })),
    )
        .into_response()
}
