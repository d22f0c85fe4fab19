use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Skill {
    pub id: Uuid,
    pub name: String,
}

/// One entry of the PSGC-style address hierarchy
/// (province → city/municipality → barangay).
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AddressOption {
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct SkillsQuery {
    /// Case-insensitive name filter.
    pub q: Option<String>,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct CitiesQuery {
    /// Province code to list cities/municipalities for.
    pub province: String,
}

#[derive(Debug, Clone, Deserialize, IntoParams)]
pub struct BarangaysQuery {
    /// City/municipality code to list barangays for.
    pub city: String,
}
