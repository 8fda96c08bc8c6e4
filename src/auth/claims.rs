use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Signed token payload: subject id and admin flag, both copied from the
/// user row at issuance. The admin flag is not re-checked against the store
/// on later requests; it stays whatever it was when the token was minted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32,
    pub admin: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn new(user_id: i32, is_admin: bool, ttl_secs: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user_id,
            admin: is_admin,
            iat: now.timestamp(),
            exp: (now + Duration::seconds(ttl_secs)).timestamp(),
        }
    }
}

/// Why a presented token was refused. `Display` doubles as the client-facing
/// message, which stays deliberately generic for the invalid cases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("token is expired")]
    Expired,
    #[error("invalid token")]
    Invalid,
    #[error("invalid token")]
    Malformed,
    #[error("failed to authenticate token")]
    Verification,
}

/// HS256 signer/verifier around the process-wide secret. Stateless; every
/// verification recomputes everything from the token.
#[derive(Clone)]
pub struct TokenCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl_secs: i64,
}

impl TokenCodec {
    pub fn new(secret: &str, ttl_secs: i64) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl_secs,
        }
    }

    pub fn issue(&self, user_id: i32, is_admin: bool) -> Result<String, jsonwebtoken::errors::Error> {
        let claims = Claims::new(user_id, is_admin, self.ttl_secs);
        encode(&Header::default(), &claims, &self.encoding)
    }

    pub fn verify(&self, token: &str) -> Result<Claims, TokenRejection> {
        let mut validation = Validation::default();
        // Expiry is issuedAt + ttl, compared against our wall clock with no
        // skew tolerance.
        validation.leeway = 0;

        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => TokenRejection::Expired,
                ErrorKind::InvalidSignature => TokenRejection::Invalid,
                ErrorKind::InvalidToken
                | ErrorKind::Base64(_)
                | ErrorKind::Json(_)
                | ErrorKind::Utf8(_) => TokenRejection::Malformed,
                _ => TokenRejection::Verification,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-key-12345";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, 3600)
    }

    fn encode_raw(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn issue_then_verify_preserves_subject_and_admin_flag() {
        let codec = codec();
        let token = codec.issue(42, true).unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.sub, 42);
        assert!(claims.admin);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn verify_is_idempotent() {
        let codec = codec();
        let token = codec.issue(7, false).unwrap();

        let first = codec.verify(&token).unwrap();
        let second = codec.verify(&token).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn expired_token_rejected_as_expired() {
        let codec = codec();
        let now = Utc::now().timestamp();
        let stale = Claims {
            sub: 1,
            admin: false,
            iat: now - 7200,
            exp: now - 3600,
        };

        let token = encode_raw(&stale, SECRET);
        assert_eq!(codec.verify(&token), Err(TokenRejection::Expired));
    }

    #[test]
    fn garbage_token_rejected_as_malformed_not_expired() {
        let codec = codec();
        assert_eq!(codec.verify("garbage"), Err(TokenRejection::Malformed));
        assert_eq!(
            codec.verify("still.not-a.token"),
            Err(TokenRejection::Malformed)
        );
    }

    #[test]
    fn token_signed_with_other_secret_rejected_as_invalid() {
        let codec = codec();
        let claims = Claims::new(9, false, 3600);
        let token = encode_raw(&claims, "some-other-secret");

        assert_eq!(codec.verify(&token), Err(TokenRejection::Invalid));
    }
}
