//! Wallet entries owned by a user

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::DomainError;

/// Smallest amount a wallet entry may carry
pub const MIN_WALLET_PRICE: i64 = 500;

/// Direction of a wallet entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WalletType {
    Deposit,
    Withdraw,
}

/// A single wallet transaction record.
///
/// Balances are computed outside the aggregate from these entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "WalletRecord")]
pub struct Wallet {
    price: i64,
    wallet_type: WalletType,
    description: String,
    is_finally: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    finally_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

/// Stored shape of a wallet entry, checked again when loaded
#[derive(Deserialize)]
pub struct WalletRecord {
    price: i64,
    wallet_type: WalletType,
    description: String,
    is_finally: bool,
    #[serde(default)]
    finally_date: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<WalletRecord> for Wallet {
    type Error = DomainError;

    fn try_from(record: WalletRecord) -> Result<Self, Self::Error> {
        Self::check_price(record.price)?;

        Ok(Self {
            price: record.price,
            wallet_type: record.wallet_type,
            description: record.description,
            is_finally: record.is_finally,
            finally_date: record.finally_date,
            created_at: record.created_at,
        })
    }
}

impl Wallet {
    /// Create a wallet entry, already final when `is_finally` is set
    pub fn new(
        price: i64,
        wallet_type: WalletType,
        description: impl Into<String>,
        is_finally: bool,
    ) -> Result<Self, DomainError> {
        Self::check_price(price)?;

        let now = Utc::now();

        Ok(Self {
            price,
            wallet_type,
            description: description.into(),
            is_finally,
            finally_date: is_finally.then_some(now),
            created_at: now,
        })
    }

    fn check_price(price: i64) -> Result<(), DomainError> {
        if price < MIN_WALLET_PRICE {
            return Err(DomainError::invalid_format(format!(
                "Wallet price must be at least {}",
                MIN_WALLET_PRICE
            )));
        }
        Ok(())
    }

    pub fn price(&self) -> i64 {
        self.price
    }

    pub fn wallet_type(&self) -> WalletType {
        self.wallet_type
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_finally(&self) -> bool {
        self.is_finally
    }

    pub fn finally_date(&self) -> Option<DateTime<Utc>> {
        self.finally_date
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Mark the entry as settled
    pub fn finalize(&mut self) {
        if !self.is_finally {
            self.is_finally = true;
            self.finally_date = Some(Utc::now());
        }
    }
}
