use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::backend::session::{ACCESS_TOKEN_COOKIE, Identity, UserMetadata};
use crate::modules::auth::model::{
    LoginRequest, LoginResponse, MeResponse, MessageResponse, RegisterRequest,
};
use crate::modules::jobs::model::{CreateJobDto, Job};
use crate::modules::lookups::model::{AddressOption, Skill};
use crate::modules::profiles::model::{
    Profile, UpdateAddressDto, UpdateDescriptionDto, UpdateSkillsDto,
};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::modules::auth::controller::login,
        crate::modules::auth::controller::register,
        crate::modules::auth::controller::logout,
        crate::modules::auth::controller::me,
        crate::modules::profiles::controller::get_me,
        crate::modules::profiles::controller::get_by_username,
        crate::modules::profiles::controller::update_description,
        crate::modules::profiles::controller::update_skills,
        crate::modules::profiles::controller::update_address,
        crate::modules::profiles::controller::complete,
        crate::modules::jobs::controller::list_jobs,
        crate::modules::jobs::controller::get_job,
        crate::modules::jobs::controller::create_job,
        crate::modules::lookups::controller::list_skills,
        crate::modules::lookups::controller::list_provinces,
        crate::modules::lookups::controller::list_cities,
        crate::modules::lookups::controller::list_barangays,
    ),
    components(
        schemas(
            Identity,
            UserMetadata,
            LoginRequest,
            LoginResponse,
            RegisterRequest,
            MeResponse,
            MessageResponse,
            Profile,
            UpdateDescriptionDto,
            UpdateSkillsDto,
            UpdateAddressDto,
            Job,
            CreateJobDto,
            Skill,
            AddressOption,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Authentication", description = "Sign in, sign up, and session management"),
        (name = "Profiles", description = "Profile setup and public profiles"),
        (name = "Jobs", description = "Job postings"),
        (name = "Lookups", description = "Reference data for pickers"),
    ),
    info(
        title = "Hanapbuhay API",
        description = "Job-marketplace gateway: role-gated page routing plus the API surface, all backed by the hosted auth-and-database service."
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "session_cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::new(ACCESS_TOKEN_COOKIE))),
            );
        }
    }
}
