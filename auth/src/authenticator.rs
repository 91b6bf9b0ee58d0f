use chrono::Duration;

use crate::jwt::JwtError;
use crate::pin::PinError;
use crate::pin::PinHasher;
use crate::token::IssuedToken;
use crate::token::SharedClock;
use crate::token::TokenIssuer;
use crate::token::Unauthorized;

/// Authentication coordinator combining PIN hashing and session tokens.
///
/// One instance is built at startup from configuration and shared by the
/// domain service (hash, issue) and the HTTP middleware (verify).
pub struct Authenticator {
    pin_hasher: PinHasher,
    token_issuer: TokenIssuer,
}

impl Authenticator {
    /// Create a new authenticator.
    ///
    /// # Arguments
    /// * `jwt_secret` - Secret key for token signing
    /// * `token_lifetime` - Validity window of issued tokens
    /// * `clock` - Time source for issuance and expiry checks
    ///
    /// # Returns
    /// Configured Authenticator instance
    pub fn new(jwt_secret: &[u8], token_lifetime: Duration, clock: SharedClock) -> Self {
        Self {
            pin_hasher: PinHasher::new(),
            token_issuer: TokenIssuer::new(jwt_secret, token_lifetime, clock),
        }
    }

    /// Hash a PIN for storage.
    ///
    /// # Errors
    /// * `PinError` - Hashing operation failed
    pub fn hash_pin(&self, pin: &str) -> Result<String, PinError> {
        self.pin_hasher.hash(pin)
    }

    /// Issue a session token for `subject`.
    ///
    /// # Errors
    /// * `JwtError` - Token generation failed
    pub fn issue_token(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        self.token_issuer.issue(subject)
    }

    /// Verify a session token and return its subject.
    ///
    /// # Errors
    /// * `Unauthorized` - Token is malformed, forged or expired
    pub fn verify_token(&self, token: &str) -> Result<String, Unauthorized> {
        self.token_issuer.verify(token)
    }

    /// Configured token lifetime.
    pub fn token_lifetime(&self) -> Duration {
        self.token_issuer.lifetime()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use mockable::DefaultClock;

    use super::*;

    fn authenticator() -> Authenticator {
        Authenticator::new(
            b"test_secret_key_at_least_32_bytes!",
            Duration::hours(24),
            Arc::new(DefaultClock),
        )
    }

    #[test]
    fn test_hash_pin_is_verifiable() {
        let authenticator = authenticator();

        let hash = authenticator.hash_pin("1234").expect("Failed to hash PIN");

        assert!(PinHasher::new().verify("1234", &hash).unwrap());
        assert!(!PinHasher::new().verify("4321", &hash).unwrap());
    }

    #[test]
    fn test_issue_and_verify_token() {
        let authenticator = authenticator();

        let issued = authenticator
            .issue_token("user123")
            .expect("Failed to issue token");

        assert_eq!(
            authenticator.verify_token(&issued.token),
            Ok("user123".to_string())
        );
        assert_eq!(authenticator.token_lifetime(), Duration::hours(24));
    }

    #[test]
    fn test_verify_invalid_token() {
        let authenticator = authenticator();

        let result = authenticator.verify_token("invalid.token.here");
        assert_eq!(result, Err(Unauthorized));
    }
}
