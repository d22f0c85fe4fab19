use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::backend::Identity;
use crate::modules::profiles::model::Profile;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(email(message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub user: Identity,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[validate(email(message = "Email is required"))]
    pub email: String,
    #[validate(length(min = 8, message = "Password must be at least 8 characters"))]
    pub password: String,
    pub confirm_password: String,
    /// Requested role marker; only seeker and provider codes are accepted.
    pub role_code: String,
    /// Terms-and-conditions acceptance.
    pub terms: bool,
}

/// The refreshed view of the signed-in caller, profile included when one
/// exists already.
#[derive(Debug, Serialize, ToSchema)]
pub struct MeResponse {
    pub user: Identity,
    pub profile: Option<Profile>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct MessageResponse {
    pub message: String,
}
