//! User aggregate root and related types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::address::{AddressId, UserAddress};
use super::role::UserRole;
use super::uniqueness::UserUniquenessService;
use super::validation::{is_valid_email, is_valid_phone_number, PHONE_NUMBER_LENGTH};
use super::wallet::Wallet;
use crate::domain::DomainError;

/// Avatar every new user starts with
pub const DEFAULT_AVATAR: &str = "avatar.png";

/// Surrogate user identifier assigned by persistence; `0` until saved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    pub const UNASSIGNED: UserId = UserId(0);

    pub fn new(id: i64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    pub fn is_assigned(&self) -> bool {
        self.0 != 0
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    None,
    Male,
    Female,
}

/// Shop user aggregate.
///
/// Every change to the identity fields is re-validated by the guard, and the
/// owned roles, wallets and addresses are only reachable through the methods
/// below.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "UserRecord")]
pub struct User {
    id: UserId,
    name: String,
    family: String,
    phone_number: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    /// Opaque, already hashed by the caller - never exposed in serialization
    #[serde(skip_serializing)]
    password: String,
    avatar_name: String,
    is_active: bool,
    gender: Gender,
    created_at: DateTime<Utc>,
    roles: Vec<UserRole>,
    wallets: Vec<Wallet>,
    addresses: Vec<UserAddress>,
}

/// Stored shape of a user.
///
/// Loading re-checks the phone and email formats and re-stamps the owner of
/// every address. Uniqueness is left to the store the record came from.
#[derive(Deserialize)]
pub struct UserRecord {
    id: UserId,
    name: String,
    family: String,
    phone_number: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    password: String,
    avatar_name: String,
    is_active: bool,
    gender: Gender,
    created_at: DateTime<Utc>,
    roles: Vec<UserRole>,
    wallets: Vec<Wallet>,
    addresses: Vec<UserAddress>,
}

impl TryFrom<UserRecord> for User {
    type Error = DomainError;

    fn try_from(record: UserRecord) -> Result<Self, Self::Error> {
        DomainError::check_string(&record.phone_number, "phone_number")?;
        if let Some(email) = &record.email {
            DomainError::check_string(email, "email")?;
        }
        User::check_formats(&record.phone_number, record.email.as_deref())?;

        let mut user = Self {
            id: record.id,
            name: record.name,
            family: record.family,
            phone_number: record.phone_number,
            email: record.email,
            password: record.password,
            avatar_name: record.avatar_name,
            is_active: record.is_active,
            gender: record.gender,
            created_at: record.created_at,
            roles: record.roles,
            wallets: record.wallets,
            addresses: record.addresses,
        };
        user.assign_id(record.id);
        Ok(user)
    }
}

impl User {
    /// Full registration
    pub fn create(
        name: impl Into<String>,
        family: impl Into<String>,
        phone_number: &str,
        email: &str,
        password: impl Into<String>,
        gender: Gender,
        uniqueness: &dyn UserUniquenessService,
    ) -> Result<Self, DomainError> {
        Self::build(
            name.into(),
            family.into(),
            phone_number,
            Some(email),
            password.into(),
            gender,
            uniqueness,
        )
    }

    /// Phone-only registration: no name, family or email
    pub fn register(
        phone_number: &str,
        password: impl Into<String>,
        uniqueness: &dyn UserUniquenessService,
    ) -> Result<Self, DomainError> {
        Self::build(
            String::new(),
            String::new(),
            phone_number,
            None,
            password.into(),
            Gender::None,
            uniqueness,
        )
    }

    fn build(
        name: String,
        family: String,
        phone_number: &str,
        email: Option<&str>,
        password: String,
        gender: Gender,
        uniqueness: &dyn UserUniquenessService,
    ) -> Result<Self, DomainError> {
        // A new user has no stored phone or email, so both are looked up
        Self::guard("", None, phone_number, email, uniqueness)?;

        Ok(Self {
            id: UserId::UNASSIGNED,
            name,
            family,
            phone_number: phone_number.to_string(),
            email: email.map(str::to_string),
            password,
            avatar_name: DEFAULT_AVATAR.to_string(),
            is_active: true,
            gender,
            created_at: Utc::now(),
            roles: Vec::new(),
            wallets: Vec::new(),
            addresses: Vec::new(),
        })
    }

    /// Replace the identity fields; nothing changes if the guard fails
    pub fn edit(
        &mut self,
        name: impl Into<String>,
        family: impl Into<String>,
        phone_number: &str,
        email: Option<&str>,
        gender: Gender,
        uniqueness: &dyn UserUniquenessService,
    ) -> Result<(), DomainError> {
        Self::guard(
            &self.phone_number,
            self.email.as_deref(),
            phone_number,
            email,
            uniqueness,
        )?;

        self.name = name.into();
        self.family = family.into();
        self.phone_number = phone_number.to_string();
        self.email = email.map(str::to_string);
        self.gender = gender;
        Ok(())
    }

    /// Validate candidate phone and email against the stored values.
    ///
    /// An absent email is only accepted while the user has never had one;
    /// once set it can be changed but not removed.
    fn guard(
        current_phone_number: &str,
        current_email: Option<&str>,
        phone_number: &str,
        email: Option<&str>,
        uniqueness: &dyn UserUniquenessService,
    ) -> Result<(), DomainError> {
        DomainError::check_string(phone_number, "phone_number")?;
        match email {
            Some(value) => DomainError::check_string(value, "email")?,
            None if current_email.is_some() => return Err(DomainError::missing_data("email")),
            None => {}
        }

        Self::check_formats(phone_number, email)?;

        if phone_number != current_phone_number
            && uniqueness.is_phone_number_registered(phone_number)
        {
            return Err(DomainError::conflict(format!(
                "Phone number '{}' is already registered",
                phone_number
            )));
        }

        if let Some(value) = email {
            if Some(value) != current_email && uniqueness.is_email_registered(value) {
                return Err(DomainError::conflict(format!(
                    "Email '{}' is already registered",
                    value
                )));
            }
        }

        Ok(())
    }

    fn check_formats(phone_number: &str, email: Option<&str>) -> Result<(), DomainError> {
        if !is_valid_phone_number(phone_number) {
            return Err(DomainError::invalid_format(format!(
                "Phone number must be exactly {} characters",
                PHONE_NUMBER_LENGTH
            )));
        }
        if let Some(value) = email {
            if !is_valid_email(value) {
                return Err(DomainError::invalid_format("Email isn't valid"));
            }
        }
        Ok(())
    }

    // Getters

    pub fn id(&self) -> UserId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn avatar_name(&self) -> &str {
        &self.avatar_name
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn gender(&self) -> Gender {
        self.gender
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn roles(&self) -> &[UserRole] {
        &self.roles
    }

    pub fn wallets(&self) -> &[Wallet] {
        &self.wallets
    }

    pub fn addresses(&self) -> &[UserAddress] {
        &self.addresses
    }

    pub fn address(&self, id: AddressId) -> Option<&UserAddress> {
        self.addresses.iter().find(|a| a.id() == id)
    }

    // Activation and profile

    pub fn set_active(&mut self, active: bool) {
        self.is_active = active;
    }

    pub fn activate(&mut self) {
        self.set_active(true);
    }

    pub fn deactivate(&mut self) {
        self.set_active(false);
    }

    pub fn set_avatar(&mut self, avatar_name: impl Into<String>) -> Result<(), DomainError> {
        let avatar_name = avatar_name.into();
        DomainError::check_string(&avatar_name, "avatar_name")?;
        self.avatar_name = avatar_name;
        Ok(())
    }

    /// Replace the stored password hash
    pub fn change_password(&mut self, password: impl Into<String>) -> Result<(), DomainError> {
        let password = password.into();
        DomainError::check_string(&password, "password")?;
        self.password = password;
        Ok(())
    }

    // Addresses

    /// Attach an address to this user
    pub fn add_address(&mut self, mut address: UserAddress) {
        address.attach_to(self.id);
        self.addresses.push(address);
    }

    pub fn delete_address(&mut self, address_id: AddressId) -> Result<(), DomainError> {
        let index = self.address_index(address_id)?;
        self.addresses.remove(index);
        Ok(())
    }

    /// Replace the address with the same id; the replacement moves to the end
    pub fn edit_address(&mut self, mut address: UserAddress) -> Result<(), DomainError> {
        let index = self.address_index(address.id())?;
        self.addresses.remove(index);
        address.attach_to(self.id);
        self.addresses.push(address);
        Ok(())
    }

    /// Make one address the active delivery address
    pub fn set_active_address(&mut self, address_id: AddressId) -> Result<(), DomainError> {
        self.address_index(address_id)?;
        for address in &mut self.addresses {
            address.set_active(address.id() == address_id);
        }
        Ok(())
    }

    fn address_index(&self, address_id: AddressId) -> Result<usize, DomainError> {
        self.addresses
            .iter()
            .position(|a| a.id() == address_id)
            .ok_or_else(|| DomainError::not_found(format!("Address '{}' not found", address_id)))
    }

    // Wallets and roles

    pub fn charge_wallet(&mut self, wallet: Wallet) {
        self.wallets.push(wallet);
    }

    /// Replace every role with the given ones, keeping order and duplicates
    pub fn set_roles(&mut self, roles: Vec<UserRole>) {
        self.roles.clear();
        self.roles.extend(roles);
    }

    // Persistence hooks

    pub(crate) fn assign_id(&mut self, id: UserId) {
        self.id = id;
        for address in &mut self.addresses {
            address.attach_to(id);
        }
    }

    pub(crate) fn assign_address_ids(&mut self, mut next_id: impl FnMut() -> AddressId) {
        for address in &mut self.addresses {
            if !address.id().is_assigned() {
                address.assign_id(next_id());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::user::address::fixtures;
    use crate::domain::user::role::RoleId;
    use crate::domain::user::uniqueness::MockUserUniquenessService;
    use crate::domain::user::wallet::WalletType;

    const PHONE: &str = "09123456789";
    const EMAIL: &str = "a@b.com";

    fn open_registry() -> MockUserUniquenessService {
        let mut service = MockUserUniquenessService::new();
        service
            .expect_is_phone_number_registered()
            .returning(|_| false);
        service.expect_is_email_registered().returning(|_| false);
        service
    }

    fn silent_registry() -> MockUserUniquenessService {
        let mut service = MockUserUniquenessService::new();
        service.expect_is_phone_number_registered().times(0);
        service.expect_is_email_registered().times(0);
        service
    }

    fn create_test_user() -> User {
        User::create("Ali", "Rezaei", PHONE, EMAIL, "hash", Gender::Male, &open_registry())
            .unwrap()
    }

    fn stored_address(user: &mut User, id: i64) -> AddressId {
        let id = AddressId::new(id);
        user.add_address(fixtures::address().with_id(id));
        id
    }

    #[test]
    fn test_user_creation() {
        let user = create_test_user();

        assert_eq!(user.name(), "Ali");
        assert_eq!(user.family(), "Rezaei");
        assert_eq!(user.phone_number(), PHONE);
        assert_eq!(user.email(), Some(EMAIL));
        assert_eq!(user.password(), "hash");
        assert_eq!(user.gender(), Gender::Male);
        assert_eq!(user.avatar_name(), DEFAULT_AVATAR);
        assert!(user.is_active());
        assert!(user.roles().is_empty());
        assert!(user.wallets().is_empty());
        assert!(user.addresses().is_empty());
        assert!(!user.id().is_assigned());
    }

    #[test]
    fn test_create_checks_both_values_for_uniqueness() {
        let mut service = MockUserUniquenessService::new();
        service
            .expect_is_phone_number_registered()
            .times(1)
            .returning(|_| false);
        service
            .expect_is_email_registered()
            .times(1)
            .returning(|_| false);

        assert!(User::create("", "", PHONE, EMAIL, "hash", Gender::None, &service).is_ok());
    }

    #[test]
    fn test_create_missing_phone_number() {
        let result = User::create("", "", "", EMAIL, "hash", Gender::None, &silent_registry());
        assert_eq!(result.unwrap_err(), DomainError::missing_data("phone_number"));
    }

    #[test]
    fn test_create_missing_email() {
        let result = User::create("", "", PHONE, "", "hash", Gender::None, &silent_registry());
        assert_eq!(result.unwrap_err(), DomainError::missing_data("email"));
    }

    #[test]
    fn test_create_invalid_phone_length() {
        for phone in ["12345", "123456789012"] {
            let result =
                User::create("", "", phone, EMAIL, "hash", Gender::None, &silent_registry());
            assert!(matches!(result, Err(DomainError::InvalidFormat { .. })));
        }
    }

    #[test]
    fn test_create_invalid_email() {
        let result = User::create(
            "",
            "",
            PHONE,
            "not-an-email",
            "hash",
            Gender::None,
            &silent_registry(),
        );
        assert!(matches!(result, Err(DomainError::InvalidFormat { .. })));
    }

    #[test]
    fn test_create_phone_conflict() {
        let mut service = MockUserUniquenessService::new();
        service
            .expect_is_phone_number_registered()
            .returning(|_| true);
        service.expect_is_email_registered().times(0);

        let result = User::create("", "", PHONE, EMAIL, "hash", Gender::None, &service);
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[test]
    fn test_create_email_conflict() {
        let mut service = MockUserUniquenessService::new();
        service
            .expect_is_phone_number_registered()
            .returning(|_| false);
        service.expect_is_email_registered().returning(|_| true);

        let result = User::create("", "", PHONE, EMAIL, "hash", Gender::None, &service);
        assert!(matches!(result, Err(DomainError::Conflict { .. })));
    }

    #[test]
    fn test_register_without_email() {
        let mut service = MockUserUniquenessService::new();
        service
            .expect_is_phone_number_registered()
            .times(1)
            .returning(|_| false);
        service.expect_is_email_registered().times(0);

        let user = User::register(PHONE, "hash", &service).unwrap();

        assert_eq!(user.name(), "");
        assert_eq!(user.family(), "");
        assert_eq!(user.email(), None);
        assert_eq!(user.gender(), Gender::None);
        assert!(user.is_active());
    }

    #[test]
    fn test_register_invalid_phone() {
        let result = User::register("0912", "hash", &silent_registry());
        assert!(matches!(result, Err(DomainError::InvalidFormat { .. })));
    }

    #[test]
    fn test_edit_same_values_skips_uniqueness() {
        let mut user = create_test_user();

        user.edit("Reza", "Rezaei", PHONE, Some(EMAIL), Gender::Male, &silent_registry())
            .unwrap();

        assert_eq!(user.name(), "Reza");
        assert_eq!(user.phone_number(), PHONE);
    }

    #[test]
    fn test_edit_unchanged_value_reported_taken_succeeds() {
        let mut user = create_test_user();
        let mut service = MockUserUniquenessService::new();
        service
            .expect_is_phone_number_registered()
            .returning(|_| true);
        service.expect_is_email_registered().returning(|_| true);

        assert!(
            user.edit("Ali", "Karimi", PHONE, Some(EMAIL), Gender::Male, &service)
                .is_ok()
        );
        assert_eq!(user.family(), "Karimi");
    }

    #[test]
    fn test_edit_changed_phone_conflict_leaves_state() {
        let mut user = create_test_user();
        let mut service = MockUserUniquenessService::new();
        service
            .expect_is_phone_number_registered()
            .returning(|_| true);
        service.expect_is_email_registered().times(0);

        let result = user.edit(
            "Other",
            "Name",
            "09350000000",
            Some(EMAIL),
            Gender::Female,
            &service,
        );

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(user.name(), "Ali");
        assert_eq!(user.phone_number(), PHONE);
        assert_eq!(user.gender(), Gender::Male);
    }

    #[test]
    fn test_edit_changed_email_conflict() {
        let mut user = create_test_user();
        let mut service = MockUserUniquenessService::new();
        service.expect_is_phone_number_registered().times(0);
        service.expect_is_email_registered().returning(|_| true);

        let result = user.edit("Ali", "Rezaei", PHONE, Some("c@d.com"), Gender::Male, &service);

        assert!(matches!(result, Err(DomainError::Conflict { .. })));
        assert_eq!(user.email(), Some(EMAIL));
    }

    #[test]
    fn test_edit_invalid_phone_length() {
        let mut user = create_test_user();

        for phone in ["12345", "123456789012"] {
            let result =
                user.edit("Reza", "Rezaei", phone, Some(EMAIL), Gender::Male, &silent_registry());

            assert!(matches!(result, Err(DomainError::InvalidFormat { .. })));
            assert_eq!(user.phone_number(), PHONE);
            assert_eq!(user.name(), "Ali");
        }
    }

    #[test]
    fn test_edit_invalid_email() {
        let mut user = create_test_user();

        let result = user.edit(
            "Reza",
            "Karimi",
            "09350000000",
            Some("not-an-email"),
            Gender::Female,
            &silent_registry(),
        );

        assert!(matches!(result, Err(DomainError::InvalidFormat { .. })));
        assert_eq!(user.email(), Some(EMAIL));
        assert_eq!(user.name(), "Ali");
        assert_eq!(user.family(), "Rezaei");
        assert_eq!(user.phone_number(), PHONE);
        assert_eq!(user.gender(), Gender::Male);
    }

    #[test]
    fn test_edit_cannot_remove_email() {
        let mut user = create_test_user();

        let result = user.edit("Ali", "Rezaei", PHONE, None, Gender::Male, &silent_registry());

        assert_eq!(result.unwrap_err(), DomainError::missing_data("email"));
        assert_eq!(user.email(), Some(EMAIL));
    }

    #[test]
    fn test_edit_registered_user_without_email() {
        let mut user = User::register(PHONE, "hash", &open_registry()).unwrap();

        user.edit("Ali", "Rezaei", PHONE, None, Gender::Male, &silent_registry())
            .unwrap();
        assert_eq!(user.name(), "Ali");
        assert_eq!(user.email(), None);

        user.edit("Ali", "Rezaei", PHONE, Some(EMAIL), Gender::Male, &open_registry())
            .unwrap();
        assert_eq!(user.email(), Some(EMAIL));
    }

    #[test]
    fn test_edit_keeps_password_and_avatar() {
        let mut user = create_test_user();
        user.set_avatar("me.jpg").unwrap();

        user.edit("Ali", "Rezaei", PHONE, Some(EMAIL), Gender::None, &silent_registry())
            .unwrap();

        assert_eq!(user.password(), "hash");
        assert_eq!(user.avatar_name(), "me.jpg");
    }

    #[test]
    fn test_activation_toggle() {
        let mut user = create_test_user();

        user.deactivate();
        assert!(!user.is_active());

        user.activate();
        assert!(user.is_active());

        user.set_active(false);
        assert!(!user.is_active());
    }

    #[test]
    fn test_change_password() {
        let mut user = create_test_user();

        user.change_password("new-hash").unwrap();
        assert_eq!(user.password(), "new-hash");

        assert_eq!(
            user.change_password(""),
            Err(DomainError::missing_data("password"))
        );
        assert_eq!(user.password(), "new-hash");
    }

    #[test]
    fn test_add_address_stamps_owner() {
        let mut user = create_test_user();
        user.assign_id(UserId::new(42));

        user.add_address(fixtures::address());

        assert_eq!(user.addresses().len(), 1);
        assert_eq!(user.addresses()[0].user_id(), UserId::new(42));
    }

    #[test]
    fn test_assign_id_restamps_addresses() {
        let mut user = create_test_user();
        user.add_address(fixtures::address());

        user.assign_id(UserId::new(9));

        assert!(user.addresses().iter().all(|a| a.user_id() == UserId::new(9)));
    }

    #[test]
    fn test_delete_address() {
        let mut user = create_test_user();
        let first = stored_address(&mut user, 1);
        let second = stored_address(&mut user, 2);

        user.delete_address(first).unwrap();

        assert_eq!(user.addresses().len(), 1);
        assert_eq!(user.addresses()[0].id(), second);
    }

    #[test]
    fn test_delete_unknown_address() {
        let mut user = create_test_user();
        stored_address(&mut user, 1);

        let result = user.delete_address(AddressId::new(99));

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert_eq!(user.addresses().len(), 1);
    }

    #[test]
    fn test_edit_address_replaces_and_moves_to_end() {
        let mut user = create_test_user();
        user.assign_id(UserId::new(5));
        let first = stored_address(&mut user, 1);
        stored_address(&mut user, 2);

        let replacement = UserAddress::new(crate::domain::user::AddressDetails {
            city: "Shiraz".to_string(),
            ..fixtures::details()
        })
        .unwrap()
        .with_id(first);
        user.edit_address(replacement).unwrap();

        assert_eq!(user.addresses().len(), 2);
        assert_eq!(user.addresses()[0].id(), AddressId::new(2));
        let edited = &user.addresses()[1];
        assert_eq!(edited.id(), first);
        assert_eq!(edited.city(), "Shiraz");
        assert_eq!(edited.user_id(), UserId::new(5));
        assert_eq!(user.addresses().iter().filter(|a| a.id() == first).count(), 1);
    }

    #[test]
    fn test_edit_unknown_address() {
        let mut user = create_test_user();
        stored_address(&mut user, 1);
        let before = user.addresses().to_vec();

        let result = user.edit_address(fixtures::address().with_id(AddressId::new(3)));

        assert!(matches!(result, Err(DomainError::NotFound { .. })));
        assert_eq!(user.addresses(), before.as_slice());
    }

    #[test]
    fn test_set_active_address() {
        let mut user = create_test_user();
        let first = stored_address(&mut user, 1);
        let second = stored_address(&mut user, 2);

        user.set_active_address(first).unwrap();
        user.set_active_address(second).unwrap();

        assert!(!user.address(first).unwrap().is_active());
        assert!(user.address(second).unwrap().is_active());
        assert!(matches!(
            user.set_active_address(AddressId::new(7)),
            Err(DomainError::NotFound { .. })
        ));
        assert!(user.address(second).unwrap().is_active());
    }

    #[test]
    fn test_charge_wallet_appends() {
        let mut user = create_test_user();

        user.charge_wallet(Wallet::new(1000, WalletType::Deposit, "first", true).unwrap());
        user.charge_wallet(Wallet::new(700, WalletType::Withdraw, "second", false).unwrap());

        assert_eq!(user.wallets().len(), 2);
        assert_eq!(user.wallets()[0].description(), "first");
        assert_eq!(user.wallets()[1].description(), "second");
    }

    #[test]
    fn test_set_roles_replaces_totally() {
        let mut user = create_test_user();
        let r1 = UserRole::new(RoleId::new(1));
        let r2 = UserRole::new(RoleId::new(2));
        let r3 = UserRole::new(RoleId::new(3));

        user.set_roles(vec![r1, r2]);
        user.set_roles(vec![r3.clone()]);

        assert_eq!(user.roles(), &[r3]);
    }

    #[test]
    fn test_set_roles_keeps_duplicates_and_order() {
        let mut user = create_test_user();
        let admin = UserRole::new(RoleId::new(1));
        let seller = UserRole::new(RoleId::new(2));

        user.set_roles(vec![seller.clone(), admin.clone(), seller.clone()]);

        let ids: Vec<i64> = user.roles().iter().map(|r| r.role_id().value()).collect();
        assert_eq!(ids, vec![2, 1, 2]);
    }

    #[test]
    fn test_serialization_excludes_password() {
        let user = create_test_user();

        let json = serde_json::to_string(&user).unwrap();
        assert!(!json.contains("\"password\""));
        assert!(json.contains("avatar.png"));
    }

    #[test]
    fn test_load_rejects_invalid_phone_number() {
        let mut value = serde_json::to_value(create_test_user()).unwrap();
        value["phone_number"] = serde_json::json!("0912");

        assert!(serde_json::from_value::<User>(value).is_err());
    }

    #[test]
    fn test_load_rejects_invalid_email() {
        let mut value = serde_json::to_value(create_test_user()).unwrap();
        value["email"] = serde_json::json!("not-an-email");

        assert!(serde_json::from_value::<User>(value).is_err());
    }

    #[test]
    fn test_load_restamps_address_owner() {
        let mut user = create_test_user();
        user.assign_id(UserId::new(3));
        stored_address(&mut user, 1);
        let mut value = serde_json::to_value(&user).unwrap();
        value["addresses"][0]["user_id"] = serde_json::json!(99);

        let loaded: User = serde_json::from_value(value).unwrap();

        assert_eq!(loaded.addresses()[0].user_id(), UserId::new(3));
    }

    #[test]
    fn test_load_valid_user() {
        let mut user = User::register(PHONE, "hash", &open_registry()).unwrap();
        user.assign_id(UserId::new(8));

        let loaded: User = serde_json::from_value(serde_json::to_value(&user).unwrap()).unwrap();

        assert_eq!(loaded.id(), UserId::new(8));
        assert_eq!(loaded.phone_number(), PHONE);
        assert_eq!(loaded.email(), None);
        assert_eq!(loaded.password(), "");
    }
}
