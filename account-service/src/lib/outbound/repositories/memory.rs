use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::CredentialStore;
use crate::user::errors::UserError;
use crate::user::phone::PhoneNumber;

#[derive(Debug, Default)]
struct Tables {
    users: HashMap<UserId, User>,
    /// Canonical phone -> owning user; plays the role of the unique index
    phone_index: HashMap<PhoneNumber, UserId>,
}

/// Process-local credential store.
///
/// Used by tests and for running the service without PostgreSQL. Contents
/// are lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    tables: RwLock<Tables>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn create(&self, user: User) -> Result<User, UserError> {
        // Check and insert under one write guard so concurrent registrations
        // of the same phone cannot both pass.
        let mut tables = self.tables.write().await;

        if tables.phone_index.contains_key(&user.phone) {
            return Err(UserError::DuplicatePhone);
        }

        tables.phone_index.insert(user.phone.clone(), user.id);
        tables.users.insert(user.id, user.clone());

        Ok(user)
    }

    async fn find_by_phone(&self, phone: &PhoneNumber) -> Result<Option<User>, UserError> {
        let tables = self.tables.read().await;

        Ok(tables
            .phone_index
            .get(phone)
            .and_then(|id| tables.users.get(id))
            .cloned())
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }
}
