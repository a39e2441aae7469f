use axum::{extract::FromRequestParts, http::header};
use subtle::ConstantTimeEq;

use crate::{error::AppError, state::AppState};

/// Proof that the request carried the admin bearer secret.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    _private: (),
}

pub fn ensure_admin(
    authorization: Option<&str>,
    secret: Option<&str>,
) -> Result<AdminAuth, AppError> {
    let Some(secret) = secret else {
        tracing::warn!("admin request rejected: ADMIN_PASSWORD is not configured");
        return Err(AppError::Unauthorized);
    };

    let token = authorization
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::Unauthorized)?;

    let matches =
        token.len() == secret.len() && bool::from(token.as_bytes().ct_eq(secret.as_bytes()));
    if !matches {
        tracing::warn!("admin request rejected: bad bearer secret");
        return Err(AppError::Unauthorized);
    }

    Ok(AdminAuth { _private: () })
}

impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorization = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        ensure_admin(authorization, state.config.admin_password.as_deref())
    }
}
