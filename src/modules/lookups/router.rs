use axum::{Router, routing::get};

use crate::state::AppState;

use super::controller::{list_barangays, list_cities, list_provinces, list_skills};

pub fn init_lookups_router() -> Router<AppState> {
    Router::new()
        .route("/skills", get(list_skills))
        .route("/provinces", get(list_provinces))
        .route("/cities", get(list_cities))
        .route("/barangays", get(list_barangays))
}
