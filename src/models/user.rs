//! User model, auth wire types, and JWT claims

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A user account known to the server
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub username: String,
    pub email: String,
    pub display_name: String,
    /// Hashed password (argon2)
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub avatar: Option<String>,
}

/// Public view of a user, returned by login and `/auth/me`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub email: String,
    pub avatar: Option<String>,
}

impl From<&User> for UserDto {
    fn from(user: &User) -> Self {
        UserDto {
            id: user.id.clone(),
            username: user.username.clone(),
            display_name: user.display_name.clone(),
            email: user.email.clone(),
            avatar: user.avatar.clone(),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserDto,
}

/// JWT Claims for authenticated users
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    /// Username
    pub sub: String,
    /// Owner identity every book operation is scoped to
    pub user_id: String,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and verify a JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod claims_tests {
    use super::*;
    use chrono::Utc;

    #[test]
    fn token_round_trips_through_the_same_secret() {
        let now = Utc::now().timestamp();
        let claims = UserClaims {
            sub: "demo".to_string(),
            user_id: "demo123".to_string(),
            exp: now + 3600,
            iat: now,
        };

        let token = claims.create_token("test-secret").expect("encode failed");
        let parsed = UserClaims::from_token(&token, "test-secret").expect("decode failed");

        assert_eq!(parsed.sub, "demo");
        assert_eq!(parsed.user_id, "demo123");
    }

    #[test]
    fn token_is_refused_with_the_wrong_secret() {
        let now = Utc::now().timestamp();
        let claims = UserClaims {
            sub: "demo".to_string(),
            user_id: "demo123".to_string(),
            exp: now + 3600,
            iat: now,
        };

        let token = claims.create_token("test-secret").expect("encode failed");
        assert!(UserClaims::from_token(&token, "other-secret").is_err());
    }
}
