use std::sync::Arc;

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use mockable::Clock;
use thiserror::Error;

use crate::jwt::Claims;
use crate::jwt::JwtError;
use crate::jwt::JwtHandler;

/// Clock shared between the token issuer and its callers.
pub type SharedClock = Arc<dyn Clock + Send + Sync>;

/// A freshly minted session token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    /// Signed JWT
    pub token: String,
    /// Instant after which the token is rejected
    pub expires_at: DateTime<Utc>,
}

/// Opaque token rejection.
///
/// Deliberately carries no reason: a bad signature, a malformed token and an
/// expired token all look the same to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Unauthorized")]
pub struct Unauthorized;

/// Issues and verifies stateless, time-limited session tokens.
pub struct TokenIssuer {
    jwt_handler: JwtHandler,
    lifetime: Duration,
    clock: SharedClock,
}

impl TokenIssuer {
    /// Create a new token issuer.
    ///
    /// # Arguments
    /// * `secret` - HS256 signing secret
    /// * `lifetime` - Validity window of every issued token
    /// * `clock` - Time source for `iat`/`exp` and for expiry checks
    pub fn new(secret: &[u8], lifetime: Duration, clock: SharedClock) -> Self {
        Self {
            jwt_handler: JwtHandler::new(secret),
            lifetime,
            clock,
        }
    }

    /// Configured token lifetime.
    pub fn lifetime(&self) -> Duration {
        self.lifetime
    }

    /// Mint a token for `subject`.
    ///
    /// # Errors
    /// * `EncodingFailed` - Signing failed or the expiry is out of range
    pub fn issue(&self, subject: &str) -> Result<IssuedToken, JwtError> {
        let claims = Claims::for_subject(subject, self.clock.utc(), self.lifetime)?;
        let token = self.jwt_handler.encode(&claims)?;
        let expires_at = claims
            .expires_at()
            .ok_or_else(|| JwtError::EncodingFailed("expiry out of range".to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Verify `token` and return the subject it was issued to.
    ///
    /// Signature is checked before expiry.
    ///
    /// # Errors
    /// * `Unauthorized` - Any verification failure
    pub fn verify(&self, token: &str) -> Result<String, Unauthorized> {
        self.verified_claims(token)
            .map(|claims| claims.sub)
            .map_err(|e| {
                tracing::debug!(reason = %e, "Session token rejected");
                Unauthorized
            })
    }

    fn verified_claims(&self, token: &str) -> Result<Claims, JwtError> {
        let claims: Claims = self.jwt_handler.decode(token)?;

        if claims.is_expired(self.clock.utc().timestamp()) {
            return Err(JwtError::TokenExpired);
        }

        if claims.sub.is_empty() {
            return Err(JwtError::MissingClaim("sub".to_string()));
        }

        Ok(claims)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use chrono::Local;
    use chrono::TimeZone;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_at_least_32_bytes!";

    struct MovableClock {
        now: Mutex<DateTime<Utc>>,
    }

    impl MovableClock {
        fn at(now: DateTime<Utc>) -> Arc<Self> {
            Arc::new(Self {
                now: Mutex::new(now),
            })
        }

        fn advance(&self, by: Duration) {
            let mut now = self.now.lock().unwrap();
            *now = *now + by;
        }
    }

    impl Clock for MovableClock {
        fn local(&self) -> DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            *self.now.lock().unwrap()
        }
    }

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0)
            .single()
            .expect("valid fixture timestamp")
    }

    #[test]
    fn test_issue_then_verify_returns_subject() {
        let clock = MovableClock::at(start());
        let issuer = TokenIssuer::new(SECRET, Duration::hours(1), clock);

        let issued = issuer.issue("user123").expect("Failed to issue token");

        assert_eq!(issued.expires_at, start() + Duration::hours(1));
        assert_eq!(issuer.verify(&issued.token), Ok("user123".to_string()));
    }

    #[test]
    fn test_issue_with_huge_lifetime_is_an_error() {
        let clock = MovableClock::at(start());
        let issuer = TokenIssuer::new(SECRET, Duration::hours(2_000_000_000_000), clock);

        let result = issuer.issue("user123");

        assert!(matches!(result, Err(JwtError::EncodingFailed(_))));
    }

    #[test]
    fn test_token_rejected_after_expiry() {
        let clock = MovableClock::at(start());
        let issuer = TokenIssuer::new(SECRET, Duration::hours(1), clock.clone());
        let issued = issuer.issue("user123").unwrap();

        clock.advance(Duration::hours(1));
        assert!(issuer.verify(&issued.token).is_ok());

        clock.advance(Duration::seconds(1));
        assert_eq!(issuer.verify(&issued.token), Err(Unauthorized));
    }

    #[test]
    fn test_token_from_other_secret_rejected() {
        let clock = MovableClock::at(start());
        let issuer = TokenIssuer::new(SECRET, Duration::hours(1), clock.clone());
        let other = TokenIssuer::new(b"another_secret_key_at_least_32_bytes", Duration::hours(1), clock);

        let issued = other.issue("user123").unwrap();
        assert_eq!(issuer.verify(&issued.token), Err(Unauthorized));
    }

    #[test]
    fn test_tampered_payload_rejected() {
        let clock = MovableClock::at(start());
        let issuer = TokenIssuer::new(SECRET, Duration::hours(1), clock);
        let issued = issuer.issue("user123").unwrap();
        let forged = issuer.issue("user456").unwrap();

        // Splice the second token's payload under the first token's signature.
        let mut parts: Vec<&str> = issued.token.split('.').collect();
        let forged_parts: Vec<&str> = forged.token.split('.').collect();
        parts[1] = forged_parts[1];

        assert_eq!(issuer.verify(&parts.join(".")), Err(Unauthorized));
    }

    #[test]
    fn test_garbage_and_expired_look_the_same() {
        let clock = MovableClock::at(start());
        let issuer = TokenIssuer::new(SECRET, Duration::minutes(5), clock.clone());
        let issued = issuer.issue("user123").unwrap();
        clock.advance(Duration::hours(2));

        let expired = issuer.verify(&issued.token).unwrap_err();
        let garbage = issuer.verify("not-a-token").unwrap_err();

        assert_eq!(expired, garbage);
        assert_eq!(expired.to_string(), garbage.to_string());
    }
}
