//! HS256 session token codec.
//!
//! Issues self-contained signed tokens carrying the subject id, the global
//! role at issuance, and issue/expiry timestamps. Verification proves the
//! token came from this deployment and has not expired; it deliberately
//! proves nothing about the subject's current state, which principal
//! resolution re-reads from storage.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use punchlist_application::{SESSION_TOKEN_TTL_DAYS, SessionClaims, SessionTokenCodec};
use punchlist_core::{AppError, AppResult};
use punchlist_domain::{GlobalRole, UserId};

/// JWT implementation of the session token codec.
pub struct JwtSessionTokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

#[derive(Debug, Serialize, Deserialize)]
struct TokenClaims {
    sub: uuid::Uuid,
    role: String,
    iat: i64,
    exp: i64,
}

impl JwtSessionTokenCodec {
    /// Creates a codec signing and verifying with the given secret.
    #[must_use]
    pub fn new(signing_secret: &str) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(signing_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(signing_secret.as_bytes()),
            validation: Validation::new(Algorithm::HS256),
        }
    }
}

impl SessionTokenCodec for JwtSessionTokenCodec {
    fn issue(&self, subject_id: UserId, global_role: GlobalRole) -> AppResult<String> {
        let issued_at = Utc::now();
        let expires_at = issued_at + Duration::days(SESSION_TOKEN_TTL_DAYS);

        let claims = TokenClaims {
            sub: subject_id.as_uuid(),
            role: global_role.as_str().to_owned(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        jsonwebtoken::encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|error| AppError::Internal(format!("failed to sign session token: {error}")))
    }

    fn verify(&self, token: &str) -> AppResult<SessionClaims> {
        let decoded =
            jsonwebtoken::decode::<TokenClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|_| AppError::InvalidToken)?;

        let claims = decoded.claims;
        let global_role = claims.role.parse().map_err(|_| AppError::InvalidToken)?;
        let issued_at = DateTime::from_timestamp(claims.iat, 0).ok_or(AppError::InvalidToken)?;
        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or(AppError::InvalidToken)?;

        Ok(SessionClaims {
            subject_id: UserId::from_uuid(claims.sub),
            global_role,
            issued_at,
            expires_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-signing-secret-at-least-32-chars";

    #[test]
    fn issue_then_verify_round_trips_the_claims() -> AppResult<()> {
        let codec = JwtSessionTokenCodec::new(SECRET);
        let subject_id = UserId::new();

        let token = codec.issue(subject_id, GlobalRole::Developer)?;
        let claims = codec.verify(&token)?;

        assert_eq!(claims.subject_id, subject_id);
        assert_eq!(claims.global_role, GlobalRole::Developer);
        assert_eq!(
            claims.expires_at - claims.issued_at,
            Duration::days(SESSION_TOKEN_TTL_DAYS)
        );
        Ok(())
    }

    #[test]
    fn tampered_tokens_are_rejected() -> AppResult<()> {
        let codec = JwtSessionTokenCodec::new(SECRET);
        let token = codec.issue(UserId::new(), GlobalRole::User)?;

        let tampered = format!("{token}x");
        assert!(matches!(
            codec.verify(&tampered),
            Err(AppError::InvalidToken)
        ));
        Ok(())
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() -> AppResult<()> {
        let codec = JwtSessionTokenCodec::new(SECRET);
        let forger = JwtSessionTokenCodec::new("a-different-signing-secret-32-chars");

        let forged = forger.issue(UserId::new(), GlobalRole::Admin)?;
        assert!(matches!(codec.verify(&forged), Err(AppError::InvalidToken)));
        Ok(())
    }

    #[test]
    fn garbage_is_rejected() {
        let codec = JwtSessionTokenCodec::new(SECRET);
        assert!(matches!(
            codec.verify("not-a-token"),
            Err(AppError::InvalidToken)
        ));
        assert!(matches!(codec.verify(""), Err(AppError::InvalidToken)));
    }

    #[test]
    fn expired_tokens_are_rejected() -> AppResult<()> {
        let codec = JwtSessionTokenCodec::new(SECRET);
        let issued_at = Utc::now() - Duration::days(8);
        let claims = TokenClaims {
            sub: UserId::new().as_uuid(),
            role: GlobalRole::User.as_str().to_owned(),
            iat: issued_at.timestamp(),
            exp: (issued_at + Duration::days(SESSION_TOKEN_TTL_DAYS)).timestamp(),
        };
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .map_err(|error| AppError::Internal(error.to_string()))?;

        assert!(matches!(codec.verify(&token), Err(AppError::InvalidToken)));
        Ok(())
    }
}
