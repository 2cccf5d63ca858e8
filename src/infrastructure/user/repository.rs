//! In-memory user repository implementation

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tracing::debug;

use crate::domain::user::{AddressId, User, UserId, UserRepository, UserUniquenessService};
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Store {
    users: BTreeMap<UserId, User>,
    last_user_id: i64,
    last_address_id: i64,
}

impl Store {
    /// Reject phone numbers and emails held by a different user
    fn check_unique(&self, user: &User) -> Result<(), DomainError> {
        for other in self.users.values().filter(|u| u.id() != user.id()) {
            if other.phone_number() == user.phone_number() {
                return Err(DomainError::conflict(format!(
                    "Phone number '{}' is already registered",
                    user.phone_number()
                )));
            }

            if other.email().is_some() && other.email() == user.email() {
                return Err(DomainError::conflict(format!(
                    "Email '{}' is already registered",
                    other.email().unwrap_or_default()
                )));
            }
        }

        Ok(())
    }

    fn assign_address_ids(&mut self, user: &mut User) {
        let last = &mut self.last_address_id;
        user.assign_address_ids(|| {
            *last += 1;
            AddressId::new(*last)
        });
    }
}

/// In-memory implementation of UserRepository.
///
/// Also answers uniqueness lookups, so one instance can back both ports.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: RwLock<Store>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Store>, DomainError> {
        self.store
            .read()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Store>, DomainError> {
        self.store
            .write()
            .map_err(|_| DomainError::internal("Failed to acquire lock"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        let store = self.read()?;
        Ok(store.users.get(&id).cloned())
    }

    async fn get_by_phone_number(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        let store = self.read()?;
        Ok(store
            .users
            .values()
            .find(|u| u.phone_number() == phone_number)
            .cloned())
    }

    async fn create(&self, mut user: User) -> Result<User, DomainError> {
        let mut store = self.write()?;

        if user.id().is_assigned() {
            return Err(DomainError::conflict(format!(
                "User '{}' is already stored",
                user.id()
            )));
        }

        store.check_unique(&user)?;

        store.last_user_id += 1;
        let id = UserId::new(store.last_user_id);
        user.assign_id(id);
        store.assign_address_ids(&mut user);

        debug!(user_id = %id, "Stored new user");
        store.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, mut user: User) -> Result<User, DomainError> {
        let mut store = self.write()?;
        let id = user.id();

        if !store.users.contains_key(&id) {
            return Err(DomainError::not_found(format!("User '{}' not found", id)));
        }

        store.check_unique(&user)?;
        store.assign_address_ids(&mut user);

        debug!(user_id = %id, "Updated user");
        store.users.insert(id, user.clone());
        Ok(user)
    }

    async fn delete(&self, id: UserId) -> Result<bool, DomainError> {
        let mut store = self.write()?;
        Ok(store.users.remove(&id).is_some())
    }

    async fn list(&self, active_only: bool) -> Result<Vec<User>, DomainError> {
        let store = self.read()?;
        Ok(store
            .users
            .values()
            .filter(|u| !active_only || u.is_active())
            .cloned()
            .collect())
    }
}

impl UserUniquenessService for InMemoryUserRepository {
    fn is_phone_number_registered(&self, phone_number: &str) -> bool {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store
            .users
            .values()
            .any(|u| u.phone_number() == phone_number)
    }

    fn is_email_registered(&self, email: &str) -> bool {
        let store = self.store.read().unwrap_or_else(PoisonError::into_inner);
        store.users.values().any(|u| u.email() == Some(email))
    }
}
