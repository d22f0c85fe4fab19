use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{create_job, get_job, list_jobs};

pub fn init_jobs_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_jobs).post(create_job))
        .route("/{id}", get(get_job))
}
