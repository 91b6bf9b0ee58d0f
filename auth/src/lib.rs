//! Authentication utilities library
//!
//! Provides the credential plumbing used by the account service:
//! - PIN hashing (Argon2id)
//! - Stateless session tokens (JWT, HS256) with clock-driven expiry
//! - Authentication coordination
//!
//! Nothing here knows about users, phone numbers or HTTP. The service defines
//! its own ports and adapts these implementations.
//!
//! # Examples
//!
//! ## PIN Hashing
//! ```
//! use auth::PinHasher;
//!
//! let hasher = PinHasher::new();
//! let hash = hasher.hash("1234").unwrap();
//! assert!(hasher.verify("1234", &hash).unwrap());
//! assert!(!hasher.verify("0000", &hash).unwrap());
//! ```
//!
//! ## Session Tokens
//! ```
//! use std::sync::Arc;
//!
//! use auth::TokenIssuer;
//! use chrono::Duration;
//! use mockable::DefaultClock;
//!
//! let issuer = TokenIssuer::new(
//!     b"secret_key_at_least_32_bytes_long!",
//!     Duration::hours(24),
//!     Arc::new(DefaultClock),
//! );
//! let issued = issuer.issue("user123").unwrap();
//! assert_eq!(issuer.verify(&issued.token).unwrap(), "user123");
//! ```

pub mod authenticator;
pub mod jwt;
pub mod pin;
pub mod token;

// Re-export commonly used items
pub use authenticator::Authenticator;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use pin::PinError;
pub use pin::PinHasher;
pub use token::IssuedToken;
pub use token::SharedClock;
pub use token::TokenIssuer;
pub use token::Unauthorized;
