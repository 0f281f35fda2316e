//! JWT session-token generation and validation.
//!
//! Session tokens are HS256-signed JWTs containing a [`Claims`] payload. The
//! same token travels either in the `token` cookie or as a Bearer header;
//! logout simply overwrites the cookie, there is no server-side revocation.

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use leadhub_core::types::DbId;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims carried by every session token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// User id (subject).
    pub sub: DbId,
    /// Role name at issue time, e.g. `"supportAgent"`. Role-gated routes
    /// re-check the database rather than trusting this copy.
    pub role: String,
    /// Expiry (Unix seconds).
    pub exp: i64,
    /// Issued at (Unix seconds).
    pub iat: i64,
    /// Per-token UUID, for correlating log lines.
    pub jti: String,
}

/// Default session lifetime in days.
const DEFAULT_EXPIRY_DAYS: i64 = 1;

/// Signing secret and token lifetime.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// HMAC-SHA256 signing secret.
    pub secret: String,
    /// Session lifetime in days.
    pub expiry_days: i64,
}

impl JwtConfig {
    /// Load JWT configuration from environment variables.
    ///
    /// | Env Var           | Required | Default |
    /// |-------------------|----------|---------|
    /// | `JWT_SECRET`      | **yes**  | --      |
    /// | `JWT_EXPIRY_DAYS` | no       | `1`     |
    ///
    /// # Panics
    ///
    /// Panics if `JWT_SECRET` is not set or is empty.
    pub fn from_env() -> Self {
        let secret =
            std::env::var("JWT_SECRET").expect("JWT_SECRET must be set in the environment");
        assert!(!secret.is_empty(), "JWT_SECRET must not be empty");

        let expiry_days: i64 = std::env::var("JWT_EXPIRY_DAYS")
            .unwrap_or_else(|_| DEFAULT_EXPIRY_DAYS.to_string())
            .parse()
            .expect("JWT_EXPIRY_DAYS must be a valid i64");

        Self {
            secret,
            expiry_days,
        }
    }

    /// Lifetime of a fresh token in whole seconds (used for cookie Max-Age).
    pub fn expiry_secs(&self) -> i64 {
        self.expiry_days * 24 * 60 * 60
    }
}

/// Issue a signed session token for a user.
pub fn generate_token(
    user_id: DbId,
    role: &str,
    config: &JwtConfig,
) -> Result<String, jsonwebtoken::errors::Error> {
    let iat = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id,
        role: role.to_string(),
        exp: iat + config.expiry_secs(),
        iat,
        jti: Uuid::new_v4().to_string(),
    };

    // Header::default() is HS256.
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
}

/// Check a token's signature and expiry, returning the embedded [`Claims`].
pub fn validate_token(
    token: &str,
    config: &JwtConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )?;
    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_days: 1,
        }
    }

    #[test]
    fn round_trip_preserves_claims() {
        let config = test_config();
        let token = generate_token(42, "superAdmin", &config)
            .expect("token generation should succeed");

        let claims = validate_token(&token, &config).expect("token validation should succeed");
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.role, "superAdmin");
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
        assert!(!claims.jti.is_empty());
    }

    #[test]
    fn expired_token_is_rejected() {
        let config = test_config();

        // Hand-roll a token that expired well past the 60s default leeway.
        let now = chrono::Utc::now().timestamp();
        let claims = Claims {
            sub: 1,
            role: "supportAgent".to_string(),
            exp: now - 300,
            iat: now - 600,
            jti: Uuid::new_v4().to_string(),
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .expect("encoding should succeed");

        assert!(validate_token(&token, &config).is_err());
    }

    #[test]
    fn foreign_secret_is_rejected() {
        let mut config = test_config();
        let token =
            generate_token(1, "subAdmin", &config).expect("token generation should succeed");

        config.secret = "a-completely-different-secret".to_string();
        assert!(validate_token(&token, &config).is_err());
    }
}
