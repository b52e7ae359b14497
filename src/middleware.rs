use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};
use jsonwebtoken::{decode, DecodingKey, Validation};

use crate::{
    error::AppError,
    models::{Claims, User},
    AppState,
};

/// The user behind the request's bearer token.
pub struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::AuthError("Missing Authorization header".to_string()))?
            .to_str()
            .map_err(|_| AppError::AuthError("Invalid Authorization header".to_string()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(AppError::AuthError("Invalid token format".to_string()))?;

        let state = AppState::from_ref(state);

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(state.config.secret_key.as_bytes()),
            &Validation::default(),
        )
        .map_err(|e| AppError::AuthError(format!("Invalid token: {}", e)))?;

        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
            .bind(token_data.claims.sub)
            .fetch_optional(&state.pool)
            .await?;

        match user {
            Some(user) if user.is_active => Ok(CurrentUser(user)),
            Some(_) => Err(AppError::AuthError("User is inactive".to_string())),
            None => Err(AppError::AuthError("User not found".to_string())),
        }
    }
}
