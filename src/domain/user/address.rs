//! Postal addresses owned by a user

use serde::{Deserialize, Serialize};

use super::entity::UserId;
use super::validation::{check_phone_number, is_valid_national_code};
use crate::domain::DomainError;

/// Address identifier assigned by persistence; `0` until saved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddressId(i64);

impl AddressId {
    pub const UNASSIGNED: AddressId = AddressId(0);

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

impl std::fmt::Display for AddressId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Input for building an address
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AddressDetails {
    pub province: String,
    pub city: String,
    pub postal_code: String,
    pub postal_address: String,
    pub phone_number: String,
    pub name: String,
    pub family: String,
    pub national_code: String,
}

/// A delivery address belonging to exactly one user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AddressRecord")]
pub struct UserAddress {
    id: AddressId,
    user_id: UserId,
    province: String,
    city: String,
    postal_code: String,
    postal_address: String,
    phone_number: String,
    name: String,
    family: String,
    national_code: String,
    active_address: bool,
}

/// Stored shape of an address; loading re-runs the address guard
#[derive(Deserialize)]
pub struct AddressRecord {
    id: AddressId,
    user_id: UserId,
    #[serde(flatten)]
    details: AddressDetails,
    #[serde(default)]
    active_address: bool,
}

impl TryFrom<AddressRecord> for UserAddress {
    type Error = DomainError;

    fn try_from(record: AddressRecord) -> Result<Self, Self::Error> {
        let mut address = Self::new(record.details)?;
        address.id = record.id;
        address.user_id = record.user_id;
        address.active_address = record.active_address;
        Ok(address)
    }
}

impl UserAddress {
    /// Create an unattached, inactive address
    pub fn new(details: AddressDetails) -> Result<Self, DomainError> {
        Self::guard(&details)?;

        Ok(Self {
            id: AddressId::UNASSIGNED,
            user_id: UserId::UNASSIGNED,
            province: details.province,
            city: details.city,
            postal_code: details.postal_code,
            postal_address: details.postal_address,
            phone_number: details.phone_number,
            name: details.name,
            family: details.family,
            national_code: details.national_code,
            active_address: false,
        })
    }

    /// Target an existing address, used when replacing it
    pub fn with_id(mut self, id: AddressId) -> Self {
        self.id = id;
        self
    }

    fn guard(details: &AddressDetails) -> Result<(), DomainError> {
        DomainError::check_string(&details.province, "province")?;
        DomainError::check_string(&details.city, "city")?;
        DomainError::check_string(&details.postal_code, "postal_code")?;
        DomainError::check_string(&details.postal_address, "postal_address")?;
        DomainError::check_string(&details.name, "name")?;
        DomainError::check_string(&details.family, "family")?;
        DomainError::check_string(&details.national_code, "national_code")?;
        check_phone_number(&details.phone_number)?;

        if !is_valid_national_code(&details.national_code) {
            return Err(DomainError::invalid_format("National code isn't valid"));
        }

        Ok(())
    }

    pub fn id(&self) -> AddressId {
        self.id
    }

    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    pub fn province(&self) -> &str {
        &self.province
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    pub fn postal_address(&self) -> &str {
        &self.postal_address
    }

    pub fn phone_number(&self) -> &str {
        &self.phone_number
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn family(&self) -> &str {
        &self.family
    }

    pub fn national_code(&self) -> &str {
        &self.national_code
    }

    pub fn is_active(&self) -> bool {
        self.active_address
    }

    // Owner and identity are only written by the aggregate and persistence

    pub(crate) fn attach_to(&mut self, user_id: UserId) {
        self.user_id = user_id;
    }

    pub(crate) fn assign_id(&mut self, id: AddressId) {
        self.id = id;
    }

    pub(crate) fn set_active(&mut self, active: bool) {
        self.active_address = active;
    }
}
