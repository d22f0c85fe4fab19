//! Profile data models and DTOs.
//!
//! A profile is the onboarding record the hosted backend keeps per user:
//! who they are, where they are, what they can do, and whether setup is
//! finished. The `is_completed` flag is what the session router reads to
//! force incomplete profiles through the setup flow.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// A user's profile row.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Profile {
    pub user_id: Uuid,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub short_description: Option<String>,
    pub long_description: Option<String>,
    pub province: Option<String>,
    pub city_muni: Option<String>,
    pub barangay: Option<String>,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub postal_code: Option<String>,
    #[serde(default)]
    pub skill_ids: Vec<Uuid>,
    #[serde(default)]
    pub is_completed: bool,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateDescriptionDto {
    #[validate(length(min = 1, message = "Description is required"))]
    pub short_description: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub long_description: String,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateSkillsDto {
    #[validate(length(min = 1, message = "At least one skill is required"))]
    pub skill_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct UpdateAddressDto {
    #[validate(length(min = 1, message = "Province is required"))]
    pub province: String,
    #[validate(length(min = 1, message = "City/Municipality is required"))]
    pub city_muni: String,
    #[validate(length(min = 1, message = "Barangay is required"))]
    pub barangay: String,
    pub address_1: Option<String>,
    pub address_2: Option<String>,
    pub postal_code: Option<String>,
}

/// Partial update sent to the backend; only present fields are written.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProfileChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub province: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_muni: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub barangay: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_1: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address_2: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_completed: Option<bool>,
}

impl From<UpdateDescriptionDto> for ProfileChanges {
    fn from(dto: UpdateDescriptionDto) -> Self {
        Self {
            short_description: Some(dto.short_description),
            long_description: Some(dto.long_description),
            ..Self::default()
        }
    }
}

impl From<UpdateAddressDto> for ProfileChanges {
    fn from(dto: UpdateAddressDto) -> Self {
        Self {
            province: Some(dto.province),
            city_muni: Some(dto.city_muni),
            barangay: Some(dto.barangay),
            address_1: dto.address_1,
            address_2: dto.address_2,
            postal_code: dto.postal_code,
            ..Self::default()
        }
    }
}
