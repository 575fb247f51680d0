//! Authentication service: demo-user table, password checks, token issuance

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{User, UserClaims, UserDto},
};

/// The fixed demo accounts: id, username, email, display name, password
const DEMO_USERS: &[(&str, &str, &str, &str, &str)] = &[
    ("user123", "testuser", "test@example.com", "Test User", "testpass"),
    ("demo123", "demo", "demo@example.com", "Demo User", "demo123"),
    ("admin123", "admin", "admin@example.com", "Admin User", "admin123"),
];

#[derive(Clone)]
pub struct AuthService {
    users: Vec<User>,
    config: AuthConfig,
}

impl AuthService {
    /// Build the service, hashing the demo passwords up front
    pub fn new(config: AuthConfig) -> AppResult<Self> {
        let users = DEMO_USERS
            .iter()
            .map(|(id, username, email, display_name, password)| {
                Ok(User {
                    id: id.to_string(),
                    username: username.to_string(),
                    email: email.to_string(),
                    display_name: display_name.to_string(),
                    password_hash: hash_password(password)?,
                    avatar: None,
                })
            })
            .collect::<AppResult<Vec<_>>>()?;

        Ok(Self { users, config })
    }

    /// Verify credentials and issue a JWT. Unknown users and bad passwords
    /// get the same answer.
    pub fn login(&self, username: &str, password: &str) -> AppResult<(String, UserDto)> {
        let user = self
            .users
            .iter()
            .find(|u| u.username == username)
            .ok_or_else(|| AppError::Authentication("Invalid username or password".to_string()))?;

        if !verify_password(&user.password_hash, password)? {
            return Err(AppError::Authentication(
                "Invalid username or password".to_string(),
            ));
        }

        let now = Utc::now().timestamp();
        let claims = UserClaims {
            sub: user.username.clone(),
            user_id: user.id.clone(),
            exp: now + (self.config.jwt_expiration_hours as i64 * 3600),
            iat: now,
        };

        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))?;

        tracing::info!(user = %user.username, "login succeeded");
        Ok((token, UserDto::from(user)))
    }

    /// Resolve the account behind verified claims
    pub fn user_for_claims(&self, claims: &UserClaims) -> AppResult<UserDto> {
        self.users
            .iter()
            .find(|u| u.id == claims.user_id)
            .map(UserDto::from)
            .ok_or_else(|| AppError::Authentication("Unknown user".to_string()))
    }

    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt_secret
    }
}

fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
}

fn verify_password(hash: &str, password: &str) -> AppResult<bool> {
    let parsed = PasswordHash::new(hash)
        .map_err(|e| AppError::Internal(format!("Corrupt password hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod auth_service_tests {
    use super::*;

    fn service() -> AuthService {
        AuthService::new(AuthConfig::default()).expect("service construction failed")
    }

    #[test]
    fn login_issues_a_verifiable_token() {
        let auth = service();
        let (token, user) = auth.login("demo", "demo123").expect("login failed");

        assert_eq!(user.id, "demo123");
        assert_eq!(user.username, "demo");

        let claims = UserClaims::from_token(&token, auth.jwt_secret()).expect("bad token");
        assert_eq!(claims.user_id, "demo123");
        assert_eq!(claims.sub, "demo");
        assert!(claims.exp > claims.iat);

        assert_eq!(auth.user_for_claims(&claims).unwrap(), user);
    }

    #[test]
    fn wrong_password_and_unknown_user_fail_the_same_way() {
        let auth = service();

        let e1 = auth.login("demo", "not-the-password").unwrap_err();
        let e2 = auth.login("nobody", "demo123").unwrap_err();

        assert!(matches!(e1, AppError::Authentication(_)));
        assert!(matches!(e2, AppError::Authentication(_)));
        assert_eq!(e1.to_string(), e2.to_string());
    }
}
