use anyhow::anyhow;
use tracing::instrument;

use crate::backend::{
    Backend, BackendError, CookieMutation, ResolvedSession, RoleCode, SignUpPayload, SignedIn,
    UserMetadata,
};
use crate::modules::profiles::model::Profile;
use crate::utils::errors::AppError;

use super::model::{LoginRequest, RegisterRequest};

pub struct AuthService;

impl AuthService {
    #[instrument(skip(backend, dto), fields(email = %dto.email))]
    pub async fn login(backend: &dyn Backend, dto: LoginRequest) -> Result<SignedIn, AppError> {
        backend
            .sign_in(&dto.email, &dto.password)
            .await
            .map_err(|err| match &err {
                // The backend answers 400 for bad credentials on the
                // password grant; don't leak which part was wrong.
                BackendError::Api { status, .. } if *status == 400 || *status == 401 => {
                    AppError::unauthorized(anyhow!("Invalid email or password"))
                }
                _ => AppError::backend(err),
            })
    }

    #[instrument(skip(backend, dto), fields(email = %dto.email))]
    pub async fn register(backend: &dyn Backend, dto: RegisterRequest) -> Result<(), AppError> {
        if !dto.terms {
            return Err(AppError::unprocessable(anyhow!(
                "You must agree to the terms and conditions"
            )));
        }
        if dto.password != dto.confirm_password {
            return Err(AppError::unprocessable(anyhow!(
                "The passwords did not match"
            )));
        }
        check_password_strength(&dto.password)?;

        // Admins are provisioned out of band; self-registration only hands
        // out the marketplace roles.
        let role = RoleCode::parse(&dto.role_code)
            .filter(|role| matches!(role, RoleCode::Seeker | RoleCode::Provider))
            .ok_or_else(|| AppError::bad_request(anyhow!("Unknown role code")))?;

        let payload = SignUpPayload {
            email: dto.email,
            password: dto.password,
            data: UserMetadata {
                role_code: Some(role.as_code().to_string()),
                first_name: Some(dto.first_name),
                last_name: Some(dto.last_name),
            },
        };

        backend.sign_up(&payload).await.map_err(AppError::backend)
    }

    pub async fn logout(
        backend: &dyn Backend,
        session: &ResolvedSession,
    ) -> Result<Vec<CookieMutation>, AppError> {
        backend.sign_out(session).await.map_err(AppError::backend)
    }

    /// The caller's profile, if a row exists already. Right after email
    /// confirmation there may be none; that's a normal answer.
    pub async fn current_profile(
        backend: &dyn Backend,
        session: &ResolvedSession,
    ) -> Result<Option<Profile>, AppError> {
        match backend.fetch_profile(session.identity.id).await {
            Ok(profile) => Ok(Some(profile)),
            Err(BackendError::RowNotFound { .. }) => Ok(None),
            Err(err) => Err(AppError::backend(err)),
        }
    }
}

fn check_password_strength(password: &str) -> Result<(), AppError> {
    let rules: [(&str, fn(char) -> bool); 4] = [
        ("an uppercase letter", char::is_uppercase),
        ("a lowercase letter", char::is_lowercase),
        ("a digit", |c| c.is_ascii_digit()),
        ("a special character", |c: char| !c.is_alphanumeric()),
    ];

    for (label, rule) in rules {
        if !password.chars().any(rule) {
            return Err(AppError::unprocessable(anyhow!(
                "Password must contain at least {label}"
            )));
        }
    }

    Ok(())
}
