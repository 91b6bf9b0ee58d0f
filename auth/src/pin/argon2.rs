use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher as _;
use argon2::password_hash::PasswordVerifier as _;
use argon2::password_hash::SaltString;
use argon2::Algorithm;
use argon2::Argon2;
use argon2::Params;
use argon2::Version;

use super::errors::PinError;

/// Memory cost in KiB.
const MEMORY_KIB: u32 = 32 * 1024;
const ITERATIONS: u32 = 3;
const LANES: u32 = 1;

/// PIN hashing implementation.
///
/// A 4-6 digit PIN has at most a million values, so every stolen hash is
/// brute-forceable eventually. The cost parameters are raised above the
/// Argon2 crate defaults to make each guess as expensive as a login can
/// afford.
pub struct PinHasher {
    argon2: Argon2<'static>,
}

impl PinHasher {
    /// Create a PIN hasher using Argon2id with this crate's PIN cost.
    pub fn new() -> Self {
        Self::with_params(Self::pin_params())
    }

    fn with_params(params: Params) -> Self {
        Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    fn pin_params() -> Params {
        match Params::new(MEMORY_KIB, ITERATIONS, LANES, None) {
            Ok(params) => params,
            // The constants above are inside Argon2's accepted ranges.
            Err(_) => Params::default(),
        }
    }

    /// Hash a plaintext PIN with a fresh random salt.
    ///
    /// # Returns
    /// PHC string (algorithm, parameters, salt and hash)
    ///
    /// # Errors
    /// * `HashingFailed` - Hashing operation failed
    pub fn hash(&self, pin: &str) -> Result<String, PinError> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2
            .hash_password(pin.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| PinError::HashingFailed(e.to_string()))
    }

    /// Check `pin` against a stored PHC hash.
    ///
    /// The cost recorded in `hash` is the one used, so hashes stored under
    /// older parameters keep verifying.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored hash is not a valid PHC string
    pub fn verify(&self, pin: &str, hash: &str) -> Result<bool, PinError> {
        let stored = PasswordHash::new(hash)
            .map_err(|e| PinError::VerificationFailed(format!("Invalid PIN hash: {}", e)))?;

        Ok(self.argon2.verify_password(pin.as_bytes(), &stored).is_ok())
    }
}

impl Default for PinHasher {
    fn default() -> Self {
        Self::new()
    }
}
