//! HTTP Handlers

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use kernel::id::AccountId;
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::credentials::{CredentialStore, RegisterInput};
use crate::application::session_token::CallerIdentity;
use crate::application::{LoginUseCase, ProfileUseCase};
use crate::domain::repository::AccountRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    AccountResponse, ChangePasswordRequest, LoginRequest, LoginResponse, LoginUser,
    MessageResponse, RegisterRequest, UpdateProfileRequest,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
}

// ============================================================================
// Register / Login
// ============================================================================

/// POST /api/users/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<RegisterRequest>,
) -> AuthResult<(StatusCode, Json<AccountResponse>)>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let profile = req.profile();
    let account = CredentialStore::new(state.repo.clone())
        .register(RegisterInput {
            email: req.email,
            password: req.password,
            profile,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(AccountResponse::from(&account))))
}

/// POST /api/users/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    Json(req): Json<LoginRequest>,
) -> AuthResult<Json<LoginResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let output = LoginUseCase::new(state.repo.clone(), state.config.clone())
        .execute(&req.email, req.password)
        .await?;

    Ok(Json(LoginResponse {
        token: output.token.token,
        expires_at: output.token.expires_at,
        user: LoginUser::from(&output.account),
    }))
}

// ============================================================================
// Profile (protected)
// ============================================================================

/// GET /api/users/me
pub async fn me<R>(
    State(state): State<AuthAppState<R>>,
    caller: CallerIdentity,
) -> AuthResult<Json<AccountResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account = ProfileUseCase::new(state.repo.clone())
        .get(&caller.user_id)
        .await?;

    Ok(Json(AccountResponse::from(&account)))
}

/// PUT /api/users/me
pub async fn update_me<R>(
    State(state): State<AuthAppState<R>>,
    caller: CallerIdentity,
    Json(req): Json<UpdateProfileRequest>,
) -> AuthResult<Json<AccountResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account = ProfileUseCase::new(state.repo.clone())
        .update(&caller.user_id, req.into())
        .await?;

    Ok(Json(AccountResponse::from(&account)))
}

/// PUT /api/users/me/password
pub async fn change_password<R>(
    State(state): State<AuthAppState<R>>,
    caller: CallerIdentity,
    Json(req): Json<ChangePasswordRequest>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    ProfileUseCase::new(state.repo.clone())
        .change_password(&caller.user_id, req.current_password, req.new_password)
        .await?;

    Ok(Json(MessageResponse::new("Password updated")))
}

/// DELETE /api/users/{id}
pub async fn delete_account<R>(
    State(state): State<AuthAppState<R>>,
    caller: CallerIdentity,
    Path(id): Path<String>,
) -> AuthResult<Json<MessageResponse>>
where
    R: AccountRepository + Clone + Send + Sync + 'static,
{
    let account_id: AccountId = id
        .parse()
        .map_err(|_| AuthError::Validation("Invalid user id".to_string()))?;

    ProfileUseCase::new(state.repo.clone())
        .delete(&account_id)
        .await?;

    tracing::info!(deleted_by = %caller.user_id, account_id = %account_id, "Account removed");

    Ok(Json(MessageResponse::new("User deleted")))
}
