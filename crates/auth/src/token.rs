use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use factura_core::Error;

use crate::claims::{AccessClaims, TokenValidationError, validate_claims};

/// Verifies a bearer token and yields its claims.
///
/// Implementations check the signature only; the time window is validated
/// separately and deterministically against the injected clock.
pub trait TokenVerifier: Send + Sync {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenError>;
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token is malformed, has the wrong shape, or fails signature
    /// verification. Collapsed to one variant so responses do not leak which
    /// part of verification failed.
    #[error("token is malformed or its signature is invalid")]
    Invalid,

    #[error(transparent)]
    Window(#[from] TokenValidationError),
}

impl From<TokenError> for Error {
    fn from(err: TokenError) -> Self {
        Error::unauthenticated(err.to_string())
    }
}

/// HS256 verifier over a shared secret.
pub struct Hs256TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl Hs256TokenVerifier {
    pub fn new(secret: &str) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Claims carry RFC 3339 timestamps, not numeric exp/iat; the time
        // window is checked in validate_claims with an injected clock.
        validation.required_spec_claims.clear();
        validation.validate_exp = false;
        validation.validate_aud = false;
        validation.leeway = 0;

        Self {
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
        }
    }
}

impl TokenVerifier for Hs256TokenVerifier {
    fn verify(&self, token: &str, now: DateTime<Utc>) -> Result<AccessClaims, TokenError> {
        let data =
            jsonwebtoken::decode::<AccessClaims>(token, &self.decoding_key, &self.validation)
                .map_err(|_| TokenError::Invalid)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}
