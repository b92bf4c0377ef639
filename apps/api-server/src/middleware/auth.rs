//! Authentication extractors.

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use remindme_core::domain::Identity;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// Authenticated caller extractor.
///
/// Use this in handlers to require a valid session token:
/// ```ignore
/// async fn protected_route(caller: Caller) -> impl Responder {
///     format!("Hello, {}!", caller.username)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Caller(pub Identity);

impl std::ops::Deref for Caller {
    type Target = Identity;

    fn deref(&self) -> &Identity {
        &self.0
    }
}

/// Pull the token key out of `Authorization: Bearer <key>` (or `Token <key>`).
///
/// Headers using any other scheme are treated as absent.
fn token_from_header(req: &HttpRequest) -> Result<String, AppError> {
    let header = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AppError::NotAuthenticated)?;

    let value = header.to_str().map_err(|_| {
        AppError::AuthenticationFailed(
            "Invalid token header. Token string should not contain invalid characters."
                .to_string(),
        )
    })?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next().unwrap_or_default();
    if !(scheme.eq_ignore_ascii_case("bearer") || scheme.eq_ignore_ascii_case("token")) {
        return Err(AppError::NotAuthenticated);
    }

    match (parts.next(), parts.next()) {
        (Some(key), None) => Ok(key.to_string()),
        (None, _) => Err(AppError::AuthenticationFailed(
            "Invalid token header. No credentials provided.".to_string(),
        )),
        (Some(_), Some(_)) => Err(AppError::AuthenticationFailed(
            "Invalid token header. Token string should not contain spaces.".to_string(),
        )),
    }
}

impl FromRequest for Caller {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = token_from_header(req);

        Box::pin(async move {
            let Some(state) = state else {
                tracing::error!("AppState not found in app data");
                return Err(AppError::Internal("Server configuration error".to_string()));
            };

            let identity = state.auth.authenticate(&token?).await?;
            Ok(Caller(identity))
        })
    }
}

/// Optional caller extractor - resolves to `None` instead of failing when the
/// request carries no valid session. Server-side failures still propagate.
pub struct OptionalCaller(pub Option<Identity>);

impl FromRequest for OptionalCaller {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let caller = Caller::from_request(req, payload);

        Box::pin(async move {
            match caller.await {
                Ok(Caller(identity)) => Ok(OptionalCaller(Some(identity))),
                Err(AppError::Internal(detail)) => Err(AppError::Internal(detail)),
                Err(_) => Ok(OptionalCaller(None)),
            }
        })
    }
}
