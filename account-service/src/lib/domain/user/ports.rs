use async_trait::async_trait;

use crate::domain::home::models::HomeData;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Pin;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::phone::PhoneNumber;

/// Port for registration and sign-in.
#[async_trait]
pub trait AuthServicePort: Send + Sync + 'static {
    /// Open a new account and start a session for it.
    ///
    /// # Arguments
    /// * `command` - Validated name, normalized phone and PIN
    ///
    /// # Returns
    /// Issued token and the created user
    ///
    /// # Errors
    /// * `DuplicatePhone` - Phone is already registered
    /// * `DatabaseError` - Storage failed
    /// * `Unknown` - Hashing or signing failed
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError>;

    /// Check phone + PIN and start a session.
    ///
    /// # Arguments
    /// * `command` - Normalized phone and validated PIN
    ///
    /// # Returns
    /// Issued token and the authenticated user
    ///
    /// # Errors
    /// * `InvalidCredentials` - Unknown phone or wrong PIN (indistinguishable)
    /// * `AccountDeactivated` - Account exists but is switched off
    /// * `DatabaseError` - Storage failed
    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError>;

    /// End a session.
    ///
    /// Tokens are stateless, so nothing is revoked; the client drops its token.
    async fn logout(&self, user_id: &UserId) -> Result<(), UserError>;
}

/// Port for reads on behalf of an already authenticated user.
#[async_trait]
pub trait AccountServicePort: Send + Sync + 'static {
    /// Retrieve the account behind a verified token.
    ///
    /// # Errors
    /// * `NotFound` - Account vanished after the token was issued
    /// * `DatabaseError` - Storage failed
    async fn get_profile(&self, user_id: &UserId) -> Result<User, UserError>;

    /// Retrieve the account plus the home screen catalog.
    ///
    /// # Errors
    /// * `NotFound` - Account vanished after the token was issued
    /// * `DatabaseError` - Storage failed
    async fn get_home_data(&self, user_id: &UserId) -> Result<HomeData, UserError>;
}

/// Persistence for user credentials and balances.
///
/// Canonical phone uniqueness is enforced here, atomically, not by callers.
#[async_trait]
pub trait CredentialStore: Send + Sync + 'static {
    /// Persist a new user.
    ///
    /// # Arguments
    /// * `user` - User entity with an already hashed PIN
    ///
    /// # Returns
    /// Created user entity
    ///
    /// # Errors
    /// * `DuplicatePhone` - Canonical phone already exists
    /// * `DatabaseError` - Database operation failed
    async fn create(&self, user: User) -> Result<User, UserError>;

    /// Retrieve user by canonical phone.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Option<User>, UserError>;

    /// Retrieve user by identifier.
    ///
    /// # Returns
    /// Optional user entity (None if not found)
    ///
    /// # Errors
    /// * `DatabaseError` - Database operation failed
    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;

    /// Check a raw PIN against the user's stored salted hash.
    ///
    /// # Errors
    /// * `Unknown` - Stored hash is unreadable
    fn verify_pin(&self, user: &User, pin: &Pin) -> Result<bool, UserError> {
        auth::PinHasher::new()
            .verify(pin.expose(), &user.pin_hash)
            .map_err(|e| UserError::Unknown(e.to_string()))
    }
}
