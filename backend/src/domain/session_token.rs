//! Signed, time-bound session tokens.
//!
//! Tokens are HS256 JWTs produced by `jsonwebtoken`. The claims carry the
//! user identifier and an `exp` instant in Unix seconds. Expiry is checked
//! against the injected [`Clock`] rather than the system time so callers (and
//! tests) control the notion of "now".

use std::fmt;
use std::sync::Arc;

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use mockable::Clock;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use zeroize::Zeroizing;

use crate::domain::UserId;

/// Lifetime shared by the `exp` claim and the session cookie `Max-Age`.
pub const TOKEN_LIFETIME_SECS: i64 = 7 * 24 * 60 * 60;

/// Length of generated ephemeral keys, in bytes.
pub const GENERATED_KEY_LEN: usize = 64;

/// Length of the key fingerprint in bytes before hex encoding.
const FINGERPRINT_BYTES: usize = 8;

const ALGORITHM: Algorithm = Algorithm::HS256;

/// Errors raised while building a [`SigningKey`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SigningKeyError {
    #[error("signing key must not be empty")]
    Empty,
}

/// Secret HMAC key material. Zeroed on drop and never printed.
#[derive(Clone)]
pub struct SigningKey(Zeroizing<Vec<u8>>);

impl SigningKey {
    /// Wrap raw key bytes.
    pub fn new(bytes: Vec<u8>) -> Result<Self, SigningKeyError> {
        let bytes = Zeroizing::new(bytes);
        if bytes.is_empty() {
            return Err(SigningKeyError::Empty);
        }
        Ok(Self(bytes))
    }

    /// Random key for development runs. Tokens die with the process.
    pub fn generate() -> Self {
        let mut bytes = Zeroizing::new(vec![0_u8; GENERATED_KEY_LEN]);
        rand::rngs::OsRng.fill_bytes(bytes.as_mut_slice());
        Self(bytes)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn as_bytes(&self) -> &[u8] {
        self.0.as_slice()
    }

    /// Truncated SHA-256 of the key as 16 hex characters.
    ///
    /// Safe to log; lets operators tell keys apart without exposing them.
    ///
    /// # Examples
    /// ```
    /// use aqua::domain::SigningKey;
    ///
    /// let key = SigningKey::new(vec![b'a'; 64]).expect("non-empty key");
    /// let fp = key.fingerprint();
    /// assert_eq!(fp.len(), 16);
    /// assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    /// ```
    #[must_use]
    pub fn fingerprint(&self) -> String {
        let digest = Sha256::digest(self.as_bytes());
        hex::encode(&digest[..FINGERPRINT_BYTES])
    }
}

impl fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SigningKey").field(&"<redacted>").finish()
    }
}

/// Reasons a token failed to issue or validate.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TokenError {
    #[error("token is malformed")]
    Malformed,
    #[error("token algorithm is not supported")]
    UnsupportedAlgorithm,
    #[error("token signature is invalid")]
    BadSignature,
    #[error("token has expired")]
    Expired,
    #[error("token could not be encoded: {0}")]
    Encoding(String),
}

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    user_id: UserId,
    exp: i64,
}

/// Issues and validates session tokens.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use aqua::domain::{SessionTokenCodec, SigningKey, UserId};
/// use mockable::DefaultClock;
///
/// let codec = SessionTokenCodec::new(SigningKey::generate(), Arc::new(DefaultClock));
/// let user = UserId::random();
/// let token = codec.issue(&user).expect("token issues");
/// assert_eq!(codec.validate(&token).expect("token validates"), user);
/// ```
#[derive(Clone)]
pub struct SessionTokenCodec {
    key: SigningKey,
    clock: Arc<dyn Clock>,
    lifetime_secs: i64,
    validation: Validation,
}

impl SessionTokenCodec {
    pub fn new(key: SigningKey, clock: Arc<dyn Clock>) -> Self {
        // `exp` must be present but is compared against `clock`, not the
        // system time.
        let mut validation = Validation::new(ALGORITHM);
        validation.validate_exp = false;
        Self {
            key,
            clock,
            lifetime_secs: TOKEN_LIFETIME_SECS,
            validation,
        }
    }

    /// Token lifetime in seconds.
    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    /// Fingerprint of the active key.
    pub fn key_fingerprint(&self) -> String {
        self.key.fingerprint()
    }

    /// Sign a token for `user_id` expiring one lifetime from now.
    pub fn issue(&self, user_id: &UserId) -> Result<String, TokenError> {
        let claims = Claims {
            user_id: *user_id,
            exp: self.clock.utc().timestamp().saturating_add(self.lifetime_secs),
        };
        jsonwebtoken::encode(
            &Header::new(ALGORITHM),
            &claims,
            &EncodingKey::from_secret(self.key.as_bytes()),
        )
        .map_err(|err| TokenError::Encoding(err.to_string()))
    }

    /// Check signature and expiry, returning the subject.
    pub fn validate(&self, token: &str) -> Result<UserId, TokenError> {
        let data = jsonwebtoken::decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.key.as_bytes()),
            &self.validation,
        )
        .map_err(|err| map_jwt_error(err.kind()))?;

        if self.clock.utc().timestamp() >= data.claims.exp {
            return Err(TokenError::Expired);
        }
        Ok(data.claims.user_id)
    }
}

impl fmt::Debug for SessionTokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionTokenCodec")
            .field("key", &self.key)
            .field("lifetime_secs", &self.lifetime_secs)
            .finish_non_exhaustive()
    }
}

fn map_jwt_error(kind: &ErrorKind) -> TokenError {
    match kind {
        ErrorKind::InvalidSignature => TokenError::BadSignature,
        ErrorKind::InvalidAlgorithm | ErrorKind::InvalidAlgorithmName => {
            TokenError::UnsupportedAlgorithm
        }
        ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Malformed,
    }
}
