use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A job posting, addressed the way the rest of the marketplace is:
/// province / city-municipality / barangay.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Job {
    pub id: Uuid,
    pub provider_id: Uuid,
    pub name: String,
    pub description: String,
    pub price: Option<f64>,
    pub province: String,
    pub city_muni: String,
    pub barangay: String,
    #[serde(default)]
    pub skill_ids: Vec<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateJobDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 10, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 0.0, message = "Price cannot be negative"))]
    pub price: Option<f64>,
    #[validate(length(min = 1, message = "Province is required"))]
    pub province: String,
    #[validate(length(min = 1, message = "City/Municipality is required"))]
    pub city_muni: String,
    #[validate(length(min = 1, message = "Barangay is required"))]
    pub barangay: String,
    #[validate(length(min = 1, message = "At least one skill is required"))]
    pub skill_ids: Vec<Uuid>,
}

/// Query-string filters for the job list.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
pub struct JobFilter {
    pub province: Option<String>,
    pub city_muni: Option<String>,
    pub skill_id: Option<Uuid>,
}
