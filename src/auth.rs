/// Bearer-token authentication for blog-service
///
/// Tokens are issued by an external identity provider and validated here
/// with a shared HS256 secret. The decoding key is loaded once at startup
/// and immutable afterwards. Handlers that require an authenticated
/// requester take the [`AuthUser`] extractor; public read endpoints simply
/// do not.
use actix_web::{dev::Payload, FromRequest, HttpRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::error::AppError;

const TOKEN_EXPIRY_HOURS: i64 = 24;

static JWT_SECRET: OnceCell<String> = OnceCell::new();

/// JWT claims carried by access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID as UUID string)
    pub sub: String,
    /// Username of the subject
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
}

/// Store the shared secret used for token validation.
///
/// Must be called once during startup before any request is served.
pub fn initialize(secret: &str) -> anyhow::Result<()> {
    JWT_SECRET
        .set(secret.to_string())
        .map_err(|_| anyhow::anyhow!("JWT secret already initialized"))
}

fn secret() -> Result<&'static str, AppError> {
    JWT_SECRET
        .get()
        .map(|s| s.as_str())
        .ok_or_else(|| AppError::Internal("JWT secret not initialized".to_string()))
}

/// Issue a token for the given user. Used by tests and local tooling;
/// production tokens come from the identity provider with the same secret.
pub fn generate_token(user_id: Uuid, username: &str) -> Result<String, AppError> {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id.to_string(),
        username: username.to_string(),
        iat: now.timestamp(),
        exp: (now + Duration::hours(TOKEN_EXPIRY_HOURS)).timestamp(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(secret()?.as_bytes()),
    )
    .map_err(|e| AppError::Internal(format!("token encoding failed: {}", e)))
}

/// Validate a bearer token and return its claims.
pub fn validate_token(token: &str) -> Result<Claims, AppError> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret()?.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::Unauthorized("Invalid or expired token".to_string()))
}

/// The authenticated requester, extracted from the Authorization header.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    pub username: String,
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(extract_user(req))
    }
}

fn extract_user(req: &HttpRequest) -> Result<AuthUser, AppError> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid Authorization scheme".to_string()))?;

    let claims = validate_token(token)?;

    let id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::Unauthorized("Invalid user ID in token".to_string()))?;

    Ok(AuthUser {
        id,
        username: claims.username,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn init_secret() {
        let _ = JWT_SECRET.set("unit-test-secret".to_string());
    }

    #[test]
    fn test_token_round_trip() {
        init_secret();
        let user_id = Uuid::new_v4();
        let token = generate_token(user_id, "alice").unwrap();
        let claims = validate_token(&token).unwrap();

        assert_eq!(claims.sub, user_id.to_string());
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_garbage_token_rejected() {
        init_secret();
        let err = validate_token("not.a.token").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[actix_web::test]
    async fn test_extractor_accepts_bearer_token() {
        init_secret();
        let user_id = Uuid::new_v4();
        let token = generate_token(user_id, "bob").unwrap();

        let req = TestRequest::default()
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();

        let user = extract_user(&req).unwrap();
        assert_eq!(user.id, user_id);
        assert_eq!(user.username, "bob");
    }

    #[actix_web::test]
    async fn test_extractor_rejects_missing_header() {
        init_secret();
        let req = TestRequest::default().to_http_request();
        assert!(matches!(
            extract_user(&req),
            Err(AppError::Unauthorized(_))
        ));
    }

    #[actix_web::test]
    async fn test_extractor_rejects_wrong_scheme() {
        init_secret();
        let req = TestRequest::default()
            .insert_header(("Authorization", "Basic abc123"))
            .to_http_request();
        assert!(matches!(
            extract_user(&req),
            Err(AppError::Unauthorized(_))
        ));
    }
}
