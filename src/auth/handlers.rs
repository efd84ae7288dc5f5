use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AuthError};
use crate::AppState;
use tracing::{error, info};

/// Pulls the bearer token out of the Authorization header. Transporting the
/// token is the client's concern; everything after this is the auth core.
pub(crate) fn bearer_token(req: &HttpRequest) -> Result<&str, AppError> {
    req.headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AppError::AuthError(AuthError::MissingToken))
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received login request for email: {}", req.email);
    match state.auth.login(&req.email, &req.password).await {
        Ok(identity) => {
            let token = state.auth.issue_token(&identity)?;
            info!("Login successful for user {}", identity.id);
            Ok(HttpResponse::Ok().json(AuthResponse { token }))
        }
        Err(e) => {
            error!("Login failed for email: {}: {}", req.email, e);
            Err(e)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    info!("Received registration request for email: {}", req.email);

    match state
        .auth
        .register(&req.name, &req.email, &req.password)
        .await
    {
        Ok(_) => {
            info!("Registration successful for email: {}", req.email);
        }
        Err(e) => {
            error!("Registration failed for email: {}: {}", req.email, e);
            return Err(e);
        }
    }

    // Log the new account in right away so the client starts with a token.
    let identity = state.auth.login(&req.email, &req.password).await?;
    let token = state.auth.issue_token(&identity)?;
    Ok(HttpResponse::Created().json(AuthResponse { token }))
}

/// Logout is client-side only: tokens are not revocable server-side and stay
/// valid until expiry, so all this does is confirm the client should drop
/// its copy.
pub async fn logout(req: HttpRequest) -> Result<HttpResponse, AppError> {
    let _ = bearer_token(&req)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Successfully logged out"
    })))
}

#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: uuid::Uuid,
    pub name: String,
    pub email: String,
}

pub async fn profile(
    req: HttpRequest,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let token = bearer_token(&req)?;
    let user = state.auth.current_user(token).await?;

    Ok(HttpResponse::Ok().json(ProfileResponse {
        id: user.id,
        name: user.name,
        email: user.email,
    }))
}
