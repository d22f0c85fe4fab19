use crate::docs::ApiDoc;
use crate::logging::logging_middleware;
use crate::middleware::session::update_session;
use crate::modules::auth::router::init_auth_router;
use crate::modules::jobs::router::init_jobs_router;
use crate::modules::lookups::router::init_lookups_router;
use crate::modules::pages::app_shell;
use crate::modules::profiles::router::init_profiles_router;
use crate::state::AppState;
use axum::http::{HeaderValue, Method};
use axum::routing::get;
use axum::{Router, middleware};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_scalar::{Scalar, Servable as _};
use utoipa_swagger_ui::SwaggerUi;

pub fn init_router(state: AppState) -> Router {
    // Page navigations go through the session router; the /api surface
    // authenticates per-handler instead, where a redirect would be wrong.
    let pages = Router::new()
        .route("/", get(app_shell))
        .route("/{*path}", get(app_shell))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            update_session,
        ))
        .with_state(state.clone());

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .merge(Scalar::with_url("/scalar", ApiDoc::openapi()))
        .nest(
            "/api",
            Router::new()
                .nest("/auth", init_auth_router())
                .nest("/profiles", init_profiles_router())
                .nest("/jobs", init_jobs_router())
                .nest("/lookups", init_lookups_router()),
        )
        .with_state(state.clone())
        .fallback_service(pages)
        .layer({
            let allowed_origins: Vec<HeaderValue> = state
                .cors_config
                .allowed_origins
                .iter()
                .filter_map(|origin| origin.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(allowed_origins)
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::PATCH,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([
                    axum::http::header::AUTHORIZATION,
                    axum::http::header::CONTENT_TYPE,
                    axum::http::header::ACCEPT,
                ])
                .allow_credentials(true)
        })
        .layer(middleware::from_fn(logging_middleware))
}
