//! User service: loads the aggregate, applies one operation and saves it

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::user::{
    AddressDetails, AddressId, Gender, RoleId, User, UserAddress, UserId, UserRepository,
    UserRole, UserUniquenessService, Wallet,
};
use crate::domain::DomainError;

use super::password::PasswordHasher;

/// Shortest raw password accepted when none is configured
pub const DEFAULT_MIN_PASSWORD_LENGTH: usize = 6;

/// Request for a full registration
#[derive(Debug, Clone)]
pub struct CreateUserRequest {
    pub name: String,
    pub family: String,
    pub phone_number: String,
    pub email: String,
    pub password: String,
    pub gender: Gender,
}

/// Request for replacing a user's identity fields
#[derive(Debug, Clone)]
pub struct EditUserRequest {
    pub name: String,
    pub family: String,
    pub phone_number: String,
    pub email: Option<String>,
    pub gender: Gender,
}

/// Request for updating a user's password
#[derive(Debug, Clone)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    pub new_password: String,
}

/// User service for registration and profile management
#[derive(Debug)]
pub struct UserService<R, H>
where
    R: UserRepository + UserUniquenessService,
    H: PasswordHasher,
{
    repository: Arc<R>,
    hasher: Arc<H>,
    min_password_length: usize,
}

impl<R, H> UserService<R, H>
where
    R: UserRepository + UserUniquenessService,
    H: PasswordHasher,
{
    pub fn new(repository: Arc<R>, hasher: Arc<H>) -> Self {
        Self {
            repository,
            hasher,
            min_password_length: DEFAULT_MIN_PASSWORD_LENGTH,
        }
    }

    pub fn with_min_password_length(mut self, length: usize) -> Self {
        self.min_password_length = length;
        self
    }

    /// Phone-only registration
    pub async fn register(&self, phone_number: &str, password: &str) -> Result<User, DomainError> {
        self.check_password(password)?;
        let mut user = User::register(phone_number, String::new(), self.repository.as_ref())
            .inspect_err(|e| warn!(phone_number, error = %e, "Registration rejected"))?;
        user.change_password(self.hasher.hash(password)?)?;

        let user = self.repository.create(user).await?;
        info!(user_id = %user.id(), "Registered user");
        Ok(user)
    }

    /// Full registration
    pub async fn create(&self, request: CreateUserRequest) -> Result<User, DomainError> {
        self.check_password(&request.password)?;
        let mut user = User::create(
            request.name,
            request.family,
            &request.phone_number,
            &request.email,
            String::new(),
            request.gender,
            self.repository.as_ref(),
        )
        .inspect_err(|e| {
            warn!(phone_number = %request.phone_number, error = %e, "Registration rejected")
        })?;
        user.change_password(self.hasher.hash(&request.password)?)?;

        let user = self.repository.create(user).await?;
        info!(user_id = %user.id(), "Created user");
        Ok(user)
    }

    pub async fn edit(&self, id: UserId, request: EditUserRequest) -> Result<User, DomainError> {
        let mut user = self.load(id).await?;

        user.edit(
            request.name,
            request.family,
            &request.phone_number,
            request.email.as_deref(),
            request.gender,
            self.repository.as_ref(),
        )
        .inspect_err(|e| warn!(user_id = %id, error = %e, "Edit rejected"))?;

        self.save(user, "Edited user").await
    }

    pub async fn change_password(
        &self,
        id: UserId,
        request: ChangePasswordRequest,
    ) -> Result<User, DomainError> {
        let mut user = self.load(id).await?;

        if !self.hasher.verify(&request.current_password, user.password()) {
            return Err(DomainError::validation("Current password is incorrect"));
        }

        self.check_password(&request.new_password)?;
        user.change_password(self.hasher.hash(&request.new_password)?)?;
        self.save(user, "Changed password").await
    }

    pub async fn set_active(&self, id: UserId, active: bool) -> Result<User, DomainError> {
        let mut user = self.load(id).await?;
        user.set_active(active);
        self.save(user, "Changed activation").await
    }

    pub async fn add_address(
        &self,
        id: UserId,
        details: AddressDetails,
    ) -> Result<User, DomainError> {
        let mut user = self.load(id).await?;
        user.add_address(UserAddress::new(details)?);
        self.save(user, "Added address").await
    }

    pub async fn edit_address(
        &self,
        id: UserId,
        address_id: AddressId,
        details: AddressDetails,
    ) -> Result<User, DomainError> {
        let mut user = self.load(id).await?;
        user.edit_address(UserAddress::new(details)?.with_id(address_id))?;
        self.save(user, "Edited address").await
    }

    pub async fn delete_address(
        &self,
        id: UserId,
        address_id: AddressId,
    ) -> Result<User, DomainError> {
        let mut user = self.load(id).await?;
        user.delete_address(address_id)?;
        self.save(user, "Deleted address").await
    }

    pub async fn set_active_address(
        &self,
        id: UserId,
        address_id: AddressId,
    ) -> Result<User, DomainError> {
        let mut user = self.load(id).await?;
        user.set_active_address(address_id)?;
        self.save(user, "Changed active address").await
    }

    pub async fn charge_wallet(&self, id: UserId, wallet: Wallet) -> Result<User, DomainError> {
        let mut user = self.load(id).await?;
        user.charge_wallet(wallet);
        self.save(user, "Charged wallet").await
    }

    pub async fn set_roles(&self, id: UserId, role_ids: Vec<RoleId>) -> Result<User, DomainError> {
        let mut user = self.load(id).await?;
        user.set_roles(role_ids.into_iter().map(UserRole::new).collect());
        self.save(user, "Replaced roles").await
    }

    pub async fn get(&self, id: UserId) -> Result<Option<User>, DomainError> {
        self.repository.get(id).await
    }

    pub async fn get_by_phone_number(&self, phone_number: &str) -> Result<Option<User>, DomainError> {
        self.repository.get_by_phone_number(phone_number).await
    }

    pub async fn list(&self, active_only: bool) -> Result<Vec<User>, DomainError> {
        self.repository.list(active_only).await
    }

    async fn load(&self, id: UserId) -> Result<User, DomainError> {
        debug!(user_id = %id, "Loading user");
        self.repository
            .get(id)
            .await?
            .ok_or_else(|| DomainError::not_found(format!("User '{}' not found", id)))
    }

    async fn save(&self, user: User, action: &str) -> Result<User, DomainError> {
        let user = self.repository.update(user).await?;
        info!(user_id = %user.id(), "{}", action);
        Ok(user)
    }

    /// Raw password rules, checked before the aggregate guard and the hash
    fn check_password(&self, password: &str) -> Result<(), DomainError> {
        DomainError::check_string(password, "password")?;

        if password.chars().count() < self.min_password_length {
            return Err(DomainError::validation(format!(
                "Password is too short. Minimum length is {} characters",
                self.min_password_length
            )));
        }
        Ok(())
    }
}
