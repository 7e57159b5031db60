use sha2::{Digest, Sha256};
use uuid::Uuid;

use crate::{
    db::ContentStore,
    error::{AppError, AppResult},
    models::{NewUser, RegisterResponse, RegisterUserInput},
};

const MIN_PASSWORD_LENGTH: usize = 8;

/// Registers a new user
///
/// Fails with [`AppError::DuplicateUser`] when the email is already taken.
/// The password is stored as `<salt>$<sha256(salt || password)>`.
pub async fn register_user(
    store: &dyn ContentStore,
    input: RegisterUserInput,
) -> AppResult<RegisterResponse> {
    validate(&input)?;

    if store.find_user_by_email(&input.email).await?.is_some() {
        tracing::info!(email = %input.email, "Registration rejected, email already registered");
        return Err(AppError::DuplicateUser);
    }

    let user = store
        .create_user(NewUser {
            name: input.name,
            email: input.email,
            password_hash: hash_password(&input.password),
        })
        .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok(RegisterResponse { user })
}

fn validate(input: &RegisterUserInput) -> AppResult<()> {
    if input.name.trim().is_empty() {
        return Err(AppError::InvalidInput("name is required".to_string()));
    }
    if input.email.trim().is_empty() {
        return Err(AppError::InvalidInput("email is required".to_string()));
    }
    if input.password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AppError::InvalidInput(format!(
            "password must be at least {} characters",
            MIN_PASSWORD_LENGTH
        )));
    }
    Ok(())
}

fn hash_password(password: &str) -> String {
    let salt = Uuid::new_v4().simple().to_string();
    let mut hasher = Sha256::new();
    hasher.update(salt.as_bytes());
    hasher.update(password.as_bytes());
    format!("{}${:x}", salt, hasher.finalize())
}
