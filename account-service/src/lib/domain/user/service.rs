use std::sync::Arc;

use async_trait::async_trait;
use auth::Authenticator;
use auth::IssuedToken;
use auth::SharedClock;

use crate::domain::home::models::HomeData;
use crate::domain::home::ports::HomeCatalog;
use crate::domain::user::models::AuthSession;
use crate::domain::user::models::Balance;
use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::Pin;
use crate::domain::user::models::RegisterCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::AccountServicePort;
use crate::user::ports::AuthServicePort;
use crate::user::ports::CredentialStore;

/// Account policy handed to the service at construction.
#[derive(Debug, Clone, Copy)]
pub struct AuthSettings {
    /// Balance every new account starts with
    pub default_balance: Balance,
}

/// Domain service implementation for authentication and account reads.
///
/// Concrete implementation of AuthServicePort and AccountServicePort with
/// dependency injection.
pub struct UserService<CS, HC>
where
    CS: CredentialStore,
    HC: HomeCatalog,
{
    store: Arc<CS>,
    catalog: Arc<HC>,
    authenticator: Arc<Authenticator>,
    settings: AuthSettings,
    clock: SharedClock,
}

impl<CS, HC> UserService<CS, HC>
where
    CS: CredentialStore,
    HC: HomeCatalog,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `store` - Credential persistence implementation
    /// * `catalog` - Home screen content source
    /// * `authenticator` - PIN hashing and token issuance
    /// * `settings` - Account policy
    /// * `clock` - Time source for account creation timestamps
    ///
    /// # Returns
    /// Configured user service instance
    pub fn new(
        store: Arc<CS>,
        catalog: Arc<HC>,
        authenticator: Arc<Authenticator>,
        settings: AuthSettings,
        clock: SharedClock,
    ) -> Self {
        Self {
            store,
            catalog,
            authenticator,
            settings,
            clock,
        }
    }

    // Argon2 is CPU-bound for tens of milliseconds; keep it off the async workers.
    async fn hash_pin(&self, pin: &Pin) -> Result<String, UserError> {
        let authenticator = Arc::clone(&self.authenticator);
        let pin = pin.clone();

        tokio::task::spawn_blocking(move || authenticator.hash_pin(pin.expose()))
            .await
            .map_err(|e| UserError::Unknown(format!("PIN hashing task failed: {}", e)))?
            .map_err(|e| UserError::Unknown(format!("PIN hashing failed: {}", e)))
    }

    async fn verify_pin(&self, user: &User, pin: &Pin) -> Result<bool, UserError> {
        let store = Arc::clone(&self.store);
        let user = user.clone();
        let pin = pin.clone();

        tokio::task::spawn_blocking(move || store.verify_pin(&user, &pin))
            .await
            .map_err(|e| UserError::Unknown(format!("PIN verification task failed: {}", e)))?
    }

    fn issue_token(&self, user: &User) -> Result<IssuedToken, UserError> {
        self.authenticator
            .issue_token(&user.id.to_string())
            .map_err(|e| UserError::Unknown(format!("Token generation failed: {}", e)))
    }
}

#[async_trait]
impl<CS, HC> AuthServicePort for UserService<CS, HC>
where
    CS: CredentialStore,
    HC: HomeCatalog,
{
    async fn register(&self, command: RegisterCommand) -> Result<AuthSession, UserError> {
        if self.store.find_by_phone(&command.phone).await?.is_some() {
            tracing::info!(
                phone = %command.phone.masked(),
                "Registration rejected: phone already registered"
            );
            return Err(UserError::DuplicatePhone);
        }

        let pin_hash = self.hash_pin(&command.pin).await?;

        let user = User {
            id: UserId::new(),
            name: command.name,
            phone: command.phone,
            pin_hash,
            balance: self.settings.default_balance,
            is_active: true,
            created_at: self.clock.utc(),
        };

        // A concurrent registration can still win between the lookup and here;
        // the store's unique constraint turns that into DuplicatePhone.
        let created_user = self.store.create(user).await?;
        let token = self.issue_token(&created_user)?;

        tracing::info!(
            user_id = %created_user.id,
            phone = %created_user.phone.masked(),
            "Account registered"
        );

        Ok(AuthSession {
            token,
            user: created_user,
        })
    }

    async fn login(&self, command: LoginCommand) -> Result<AuthSession, UserError> {
        let Some(user) = self.store.find_by_phone(&command.phone).await? else {
            // Pay the hashing cost anyway so timing does not reveal an unknown phone.
            let _ = self.hash_pin(&command.pin).await;
            tracing::info!(phone = %command.phone.masked(), "Login rejected: unknown phone");
            return Err(UserError::InvalidCredentials);
        };

        if !user.is_active {
            tracing::warn!(user_id = %user.id, "Login rejected: account deactivated");
            return Err(UserError::AccountDeactivated);
        }

        if !self.verify_pin(&user, &command.pin).await? {
            tracing::info!(user_id = %user.id, "Login rejected: wrong PIN");
            return Err(UserError::InvalidCredentials);
        }

        let token = self.issue_token(&user)?;
        tracing::info!(user_id = %user.id, "Login successful");

        Ok(AuthSession { token, user })
    }

    async fn logout(&self, user_id: &UserId) -> Result<(), UserError> {
        tracing::info!(user_id = %user_id, "Session ended by client");
        Ok(())
    }
}

#[async_trait]
impl<CS, HC> AccountServicePort for UserService<CS, HC>
where
    CS: CredentialStore,
    HC: HomeCatalog,
{
    async fn get_profile(&self, user_id: &UserId) -> Result<User, UserError> {
        self.store
            .find_by_id(user_id)
            .await?
            .ok_or(UserError::NotFound(user_id.to_string()))
    }

    async fn get_home_data(&self, user_id: &UserId) -> Result<HomeData, UserError> {
        let user = self.get_profile(user_id).await?;

        Ok(HomeData {
            user,
            services: self.catalog.services(),
            offers: self.catalog.offers(),
            bundles: self.catalog.bundles(),
        })
    }
}
