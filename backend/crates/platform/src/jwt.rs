//! Session Token Codec
//!
//! HS256 JSON Web Tokens. Claims are generic; callers define their own
//! struct as long as it carries an `exp` timestamp.

use std::fmt;

use jsonwebtoken::errors::ErrorKind as JwtErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Token signing/verification failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Token expired")]
    Expired,

    #[error("Invalid token signature")]
    InvalidSignature,

    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token signing failed: {0}")]
    Signing(String),
}

/// Signs and verifies HS256 tokens with one shared secret
#[derive(Clone)]
pub struct JwtCodec {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl JwtCodec {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // expiry is exact, no clock skew allowance
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn sign<C: Serialize>(&self, claims: &C) -> Result<String, TokenError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding)
            .map_err(|e| TokenError::Signing(e.to_string()))
    }

    pub fn verify<C: DeserializeOwned>(&self, token: &str) -> Result<C, TokenError> {
        decode::<C>(token, &self.decoding, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                JwtErrorKind::ExpiredSignature => TokenError::Expired,
                JwtErrorKind::InvalidSignature => TokenError::InvalidSignature,
                _ => TokenError::Malformed(e.to_string()),
            })
    }
}

impl fmt::Debug for JwtCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtCodec")
            .field("algorithm", &"HS256")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct TestClaims {
        sub: String,
        email: String,
        iat: i64,
        exp: i64,
    }

    fn claims(ttl: Duration) -> TestClaims {
        let now = Utc::now();
        TestClaims {
            sub: "user-1".to_string(),
            email: "test@test.fr".to_string(),
            iat: now.timestamp(),
            exp: (now + ttl).timestamp(),
        }
    }

    #[test]
    fn test_sign_and_verify() {
        let codec = JwtCodec::new(b"test-secret-with-enough-entropy");
        let original = claims(Duration::days(30));

        let token = codec.sign(&original).unwrap();
        assert_eq!(token.split('.').count(), 3);

        let decoded: TestClaims = codec.verify(&token).unwrap();
        assert_eq!(decoded, original);
    }

    #[test]
    fn test_expired_token() {
        let codec = JwtCodec::new(b"test-secret-with-enough-entropy");
        let token = codec.sign(&claims(Duration::seconds(-5))).unwrap();

        assert_eq!(
            codec.verify::<TestClaims>(&token),
            Err(TokenError::Expired)
        );
    }

    #[test]
    fn test_wrong_secret() {
        let signer = JwtCodec::new(b"first-secret");
        let verifier = JwtCodec::new(b"second-secret");
        let token = signer.sign(&claims(Duration::days(1))).unwrap();

        assert_eq!(
            verifier.verify::<TestClaims>(&token),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn test_tampered_signature() {
        let codec = JwtCodec::new(b"test-secret-with-enough-entropy");
        let token = codec.sign(&claims(Duration::days(1))).unwrap();

        let (head, signature) = token.rsplit_once('.').unwrap();
        let flipped = if signature.starts_with('A') { 'B' } else { 'A' };
        let tampered = format!("{head}.{flipped}{}", &signature[1..]);

        assert!(codec.verify::<TestClaims>(&tampered).is_err());
    }

    #[test]
    fn test_garbage_token() {
        let codec = JwtCodec::new(b"test-secret-with-enough-entropy");
        assert!(matches!(
            codec.verify::<TestClaims>("not-a-token"),
            Err(TokenError::Malformed(_))
        ));
    }

    #[test]
    fn test_debug_hides_secret() {
        let codec = JwtCodec::new(b"super-secret");
        assert!(!format!("{codec:?}").contains("super-secret"));
    }
}
