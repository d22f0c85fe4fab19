use axum::{
    Router,
    routing::{get, patch, post, put},
};

use crate::state::AppState;

use super::controller::{
    complete, get_by_username, get_me, update_address, update_description, update_skills,
};

pub fn init_profiles_router() -> Router<AppState> {
    Router::new()
        .route("/me", get(get_me))
        .route("/me/description", patch(update_description))
        .route("/me/skills", put(update_skills))
        .route("/me/address", patch(update_address))
        .route("/me/complete", post(complete))
        .route("/{username}", get(get_by_username))
}
