//! Signed access tokens.
//!
//! An access token is an HS256 JWT naming the account and its role. Requests
//! are authorized from the claims alone, so a role change or deactivation
//! reaches the holder once the token expires and refresh re-reads the account.

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use shelter_core::roles::UserRole;
use shelter_core::types::{DbId, Timestamp};
use uuid::Uuid;

use crate::config::TokenConfig;

/// Payload of every access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Account id.
    pub sub: DbId,
    pub role: UserRole,
    pub iat: i64,
    pub exp: i64,
    pub jti: Uuid,
}

/// A signed access token and its lifetime in seconds.
#[derive(Debug)]
pub struct AccessToken {
    pub token: String,
    pub expires_in: i64,
}

/// Sign an access token for `user_id` valid from `issued_at`.
pub fn issue_access_token(
    user_id: DbId,
    role: UserRole,
    issued_at: Timestamp,
    config: &TokenConfig,
) -> Result<AccessToken, jsonwebtoken::errors::Error> {
    let ttl = config.access_ttl();
    let claims = Claims {
        sub: user_id,
        role,
        iat: issued_at.timestamp(),
        exp: (issued_at + ttl).timestamp(),
        jti: Uuid::new_v4(),
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )?;
    Ok(AccessToken {
        token,
        expires_in: ttl.num_seconds(),
    })
}

/// Verify signature and expiry and return the claims. Tokens naming a role
/// outside [`UserRole`] fail to decode.
pub fn decode_access_token(
    token: &str,
    config: &TokenConfig,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let validation = Validation::new(Algorithm::HS256);
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};

    use super::*;

    fn config(secret: &str) -> TokenConfig {
        TokenConfig {
            secret: secret.to_string(),
            access_expiry_mins: 15,
            refresh_expiry_days: 7,
        }
    }

    #[test]
    fn staff_token_decodes_with_role() {
        let config = config("kennel-secret");
        let now = Utc::now();
        let access = issue_access_token(7, UserRole::Staff, now, &config).unwrap();
        assert_eq!(access.expires_in, 15 * 60);

        let claims = decode_access_token(&access.token, &config).unwrap();
        assert_eq!(claims.sub, 7);
        assert_eq!(claims.role, UserRole::Staff);
        assert_eq!(claims.exp - claims.iat, 15 * 60);
    }

    #[test]
    fn token_issued_long_ago_is_expired() {
        let config = config("kennel-secret");
        let issued_at = Utc::now() - Duration::hours(2);
        let access = issue_access_token(7, UserRole::Admin, issued_at, &config).unwrap();
        assert!(decode_access_token(&access.token, &config).is_err());
    }

    #[test]
    fn token_from_another_deployment_is_rejected() {
        let access =
            issue_access_token(1, UserRole::Admin, Utc::now(), &config("shelter-a")).unwrap();
        assert!(decode_access_token(&access.token, &config("shelter-b")).is_err());
    }

    #[test]
    fn unknown_role_claim_is_rejected() {
        let config = config("kennel-secret");
        let now = Utc::now().timestamp();
        let forged = serde_json::json!({
            "sub": 1,
            "role": "volunteer",
            "iat": now,
            "exp": now + 600,
            "jti": Uuid::new_v4(),
        });
        let token = encode(
            &Header::new(Algorithm::HS256),
            &forged,
            &EncodingKey::from_secret(config.secret.as_bytes()),
        )
        .unwrap();
        assert!(decode_access_token(&token, &config).is_err());
    }
}
