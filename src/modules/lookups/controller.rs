use axum::Json;
use axum::extract::{Query, State};
use tracing::instrument;

use crate::state::AppState;
use crate::utils::errors::AppError;

use super::model::{AddressOption, BarangaysQuery, CitiesQuery, Skill, SkillsQuery};
use super::service::LookupsService;

/// List skills, optionally filtered by name
#[utoipa::path(
    get,
    path = "/api/lookups/skills",
    params(SkillsQuery),
    responses((status = 200, description = "Matching skills", body = [Skill])),
    tag = "Lookups"
)]
#[instrument(skip(state))]
pub async fn list_skills(
    State(state): State<AppState>,
    Query(query): Query<SkillsQuery>,
) -> Result<Json<Vec<Skill>>, AppError> {
    let skills = LookupsService::skills(state.backend.as_ref(), query.q.as_deref()).await?;
    Ok(Json(skills))
}

/// List provinces
#[utoipa::path(
    get,
    path = "/api/lookups/provinces",
    responses((status = 200, description = "All provinces", body = [AddressOption])),
    tag = "Lookups"
)]
#[instrument(skip(state))]
pub async fn list_provinces(
    State(state): State<AppState>,
) -> Result<Json<Vec<AddressOption>>, AppError> {
    let provinces = LookupsService::provinces(state.backend.as_ref()).await?;
    Ok(Json(provinces))
}

/// List cities/municipalities of a province
#[utoipa::path(
    get,
    path = "/api/lookups/cities",
    params(CitiesQuery),
    responses((status = 200, description = "Cities in the province", body = [AddressOption])),
    tag = "Lookups"
)]
#[instrument(skip(state))]
pub async fn list_cities(
    State(state): State<AppState>,
    Query(query): Query<CitiesQuery>,
) -> Result<Json<Vec<AddressOption>>, AppError> {
    let cities = LookupsService::cities(state.backend.as_ref(), &query.province).await?;
    Ok(Json(cities))
}

/// List barangays of a city/municipality
#[utoipa::path(
    get,
    path = "/api/lookups/barangays",
    params(BarangaysQuery),
    responses((status = 200, description = "Barangays in the city", body = [AddressOption])),
    tag = "Lookups"
)]
#[instrument(skip(state))]
pub async fn list_barangays(
    State(state): State<AppState>,
    Query(query): Query<BarangaysQuery>,
) -> Result<Json<Vec<AddressOption>>, AppError> {
    let barangays = LookupsService::barangays(state.backend.as_ref(), &query.city).await?;
    Ok(Json(barangays))
}
