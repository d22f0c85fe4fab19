use crate::backend::Backend;
use crate::utils::errors::AppError;

use super::model::{AddressOption, Skill};

/// Filtered list queries against the backend's reference tables. No
/// authentication; these feed public pickers.
pub struct LookupsService;

impl LookupsService {
    pub async fn skills(backend: &dyn Backend, query: Option<&str>) -> Result<Vec<Skill>, AppError> {
        backend.list_skills(query).await.map_err(AppError::backend)
    }

    pub async fn provinces(backend: &dyn Backend) -> Result<Vec<AddressOption>, AppError> {
        backend.list_provinces().await.map_err(AppError::backend)
    }

    pub async fn cities(
        backend: &dyn Backend,
        province: &str,
    ) -> Result<Vec<AddressOption>, AppError> {
        backend
            .list_cities(province)
            .await
            .map_err(AppError::backend)
    }

    pub async fn barangays(
        backend: &dyn Backend,
        city_muni: &str,
    ) -> Result<Vec<AddressOption>, AppError> {
        backend
            .list_barangays(city_muni)
            .await
            .map_err(AppError::backend)
    }
}
