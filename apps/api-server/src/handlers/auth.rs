//! Account and session handlers.

use actix_web::{HttpResponse, web};

use remindme_core::DomainError;
use remindme_shared::ApiResponse;
use remindme_shared::dto::{
    AccountResponse, DetailResponse, LoginRequest, SignupRequest, TokenResponse,
};

use super::parse_body;
use crate::middleware::auth::{Caller, OptionalCaller};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /signup
pub async fn signup(state: web::Data<AppState>, body: web::Bytes) -> AppResult<HttpResponse> {
    let req: SignupRequest = parse_body(&body)?;

    state
        .auth
        .signup(req.username.as_deref(), req.password.as_deref())
        .await
        .map_err(|e| match e {
            // Account endpoints report every field problem in the envelope.
            DomainError::Validation(errors) => AppError::FieldErrors(errors),
            other => other.into(),
        })?;

    Ok(HttpResponse::Created().json(ApiResponse::ok(DetailResponse::new("User Created."))))
}

/// POST /login
pub async fn login(state: web::Data<AppState>, body: web::Bytes) -> AppResult<HttpResponse> {
    let req: LoginRequest = parse_body(&body)?;

    let token = state
        .auth
        .login(req.username.as_deref(), req.password.as_deref())
        .await?;

    Ok(HttpResponse::Ok().json(ApiResponse::ok(TokenResponse { token: token.key })))
}

/// POST /logout
pub async fn logout(
    state: web::Data<AppState>,
    caller: OptionalCaller,
) -> AppResult<HttpResponse> {
    let Some(identity) = caller.0 else {
        return Ok(HttpResponse::Unauthorized()
            .json(DetailResponse::new("Authentication credentials required")));
    };

    state.auth.logout(&identity).await?;

    Ok(HttpResponse::Ok().json(DetailResponse::new("Logout Successful")))
}

/// GET /me
pub async fn me(state: web::Data<AppState>, caller: Caller) -> AppResult<HttpResponse> {
    let account = state.auth.account(&caller).await?;

    Ok(HttpResponse::Ok().json(AccountResponse {
        id: account.id,
        username: account.username,
        date_joined: account.created_at,
    }))
}
