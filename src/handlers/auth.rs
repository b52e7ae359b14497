use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use axum::{extract::State, Json};
use jsonwebtoken::{encode, EncodingKey, Header};
use rand_core::OsRng;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{
    config::Config,
    error::AppError,
    middleware::CurrentUser,
    models::{AuthorizedUser, Claims, CreateUser, LoginRequest, Token, User},
    AppState,
};

/// Sign a bearer token for `email` that expires after the configured TTL.
pub fn issue_token(config: &Config, email: &str) -> Result<Token, AppError> {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_err(|e| AppError::InternalError(format!("clock error: {}", e)))?
        .as_secs();
    let expiration = now + config.token_ttl_minutes * 60;

    let claims = Claims {
        sub: email.to_string(),
        exp: expiration as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret_key.as_bytes()),
    )
    .map_err(|e| AppError::AuthError(format!("Token creation failed: {}", e)))?;

    Ok(Token {
        access_token: token,
        token_type: "bearer".to_string(),
    })
}

#[utoipa::path(
    post,
    path = "/api/user",
    request_body = CreateUser,
    responses(
        (status = 200, description = "User created successfully", body = AuthorizedUser),
        (status = 400, description = "Email already registered")
    ),
    tag = "auth"
)]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CreateUser>,
) -> Result<Json<AuthorizedUser>, AppError> {
    if payload.name.trim().is_empty() || payload.email.trim().is_empty() {
        return Err(AppError::ValidationError("name and email are required".to_string()));
    }

    // 1. Reject duplicate emails
    let user_exists = sqlx::query("SELECT 1 FROM users WHERE email = ?")
        .bind(&payload.email)
        .fetch_optional(&state.pool)
        .await?;

    if user_exists.is_some() {
        return Err(AppError::ValidationError("Email already registered".to_string()));
    }

    // 2. Hash the password
    let salt = SaltString::generate(&mut OsRng);
    let password_hash = Argon2::default()
        .hash_password(payload.password.as_bytes(), &salt)
        .map_err(|e| AppError::ValidationError(e.to_string()))?
        .to_string();

    // 3. Insert the user
    let id = sqlx::query("INSERT INTO users (name, email, hashed_password) VALUES (?, ?, ?)")
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&password_hash)
        .execute(&state.pool)
        .await?
        .last_insert_rowid();

    tracing::info!(user_id = id, "user registered");

    Ok(Json(AuthorizedUser {
        id,
        name: payload.name,
        email: payload.email,
    }))
}

#[utoipa::path(
    post,
    path = "/api/user/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = Token),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Token>, AppError> {
    // 1. Look up the user
    let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE email = ?")
        .bind(&payload.email)
        .fetch_optional(&state.pool)
        .await?
        .ok_or(AppError::AuthError("Invalid credentials".to_string()))?;

    // 2. Verify the password
    let parsed_hash = PasswordHash::new(&user.hashed_password)
        .map_err(|_| AppError::AuthError("Invalid password hash in DB".to_string()))?;

    Argon2::default()
        .verify_password(payload.password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::AuthError("Invalid credentials".to_string()))?;

    // 3. Issue the JWT
    Ok(Json(issue_token(&state.config, &user.email)?))
}

#[utoipa::path(
    get,
    path = "/api/user/authorize",
    responses(
        (status = 200, description = "The authenticated user", body = AuthorizedUser),
        (status = 401, description = "Unauthorized")
    ),
    security(
        ("bearer" = [])
    ),
    tag = "auth"
)]
pub async fn authorize(CurrentUser(user): CurrentUser) -> Json<AuthorizedUser> {
    Json(user.into())
}
