//! Authentication Handlers
//!
//! Login, registration and current-user introspection.

use std::time::Duration;

use axum::{Extension, Json, extract::State};
use serde::Serialize;

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::{AppUser, LoginRequest, LoginResponse, RegisterRequest};
use crate::security_log;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_PASSWORD_LEN, MAX_SHORT_TEXT_LEN, validate_required_text,
};
use crate::utils::{AppError, AppResult};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfo {
    pub id: i64,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub employee_id: Option<i64>,
}

/// Login handler
///
/// Authenticates credentials and returns a JWT token
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    let user = state
        .store
        .find_user_by_email(&req.email)
        .await
        .map_err(|e| AppError::database(e.to_string()))?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Unified error message to prevent email enumeration
    let user = match user {
        Some(u) => {
            let password_valid = u
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {e}")))?;

            if !password_valid {
                security_log!(
                    "WARN",
                    "login_failed",
                    email = req.email.clone(),
                    reason = "invalid_password"
                );
                return Err(AppError::invalid_credentials());
            }

            u
        }
        None => {
            security_log!(
                "WARN",
                "login_failed",
                email = req.email.clone(),
                reason = "user_not_found"
            );
            return Err(AppError::invalid_credentials());
        }
    };

    let user_id = user.id.unwrap_or_default();
    let token = state
        .jwt_service()
        .generate_token(&user_id.to_string(), &user.username, user.employee_id)
        .map_err(|e| AppError::internal(format!("Failed to generate token: {e}")))?;

    tracing::info!(user_id, username = %user.username, "User logged in successfully");

    Ok(Json(LoginResponse { token }))
}

/// Register handler
///
/// Creates a login account not tied to any employee record
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<Json<UserInfo>> {
    validate_required_text(&req.username, "username", MAX_SHORT_TEXT_LEN)?;
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_required_text(&req.password, "password", MAX_PASSWORD_LEN)?;

    let hash_pass = AppUser::hash_password(&req.password)
        .map_err(|e| AppError::internal(format!("Failed to hash password: {e}")))?;

    let user = state
        .store
        .insert_user(AppUser {
            id: None,
            username: req.username,
            email: req.email,
            hash_pass,
            employee_id: None,
        })
        .await
        .map_err(crate::registry::RegistryError::from)
        .map_err(AppError::from)?;

    tracing::info!(username = %user.username, "User registered");

    Ok(Json(UserInfo {
        id: user.id.unwrap_or_default(),
        username: user.username,
        email: Some(user.email),
        employee_id: user.employee_id,
    }))
}

/// Current-user introspection (requires a valid token)
pub async fn me(Extension(user): Extension<CurrentUser>) -> AppResult<Json<UserInfo>> {
    let id = user
        .id
        .parse::<i64>()
        .map_err(|_| AppError::invalid_token("Malformed subject claim"))?;

    Ok(Json(UserInfo {
        id,
        username: user.username,
        email: None,
        employee_id: user.employee_id,
    }))
}
