//! Account identities and the withdrawable-balance book.
//!
//! Maintains the invariant: no balance ever goes negative. Debits check the
//! stored balance before mutating anything.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An opaque actor identity: merchant, payer, owner or withdrawal target.
///
/// The surrounding execution environment is responsible for authenticating
/// callers; the engine only compares identities for equality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(String);

impl AccountId {
    /// Creates an identity from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        AccountId(id.into())
    }

    /// Returns the identity as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for AccountId {
    fn from(s: &str) -> Self {
        AccountId(s.to_string())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Per-merchant withdrawable balances.
///
/// Entries are created implicitly on first credit. Reads have an explicit
/// zero default for unknown merchants, unlike the registry's `Option` reads.
#[derive(Debug, Default)]
pub struct BalanceBook {
    balances: std::collections::HashMap<AccountId, u64>,
}

impl BalanceBook {
    /// Creates an empty balance book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the stored balance, or 0 for an unknown merchant.
    pub fn balance(&self, merchant: &AccountId) -> u64 {
        self.balances.get(merchant).copied().unwrap_or(0)
    }

    /// Credits `amount` to the merchant, creating the entry if needed.
    pub fn credit(&mut self, merchant: &AccountId, amount: u64) {
        *self.balances.entry(merchant.clone()).or_insert(0) += amount;
    }

    /// Debits `amount` from the merchant's balance.
    ///
    /// Returns `false` without mutating anything if `amount` exceeds the
    /// stored balance.
    pub fn debit(&mut self, merchant: &AccountId, amount: u64) -> bool {
        match self.balances.get_mut(merchant) {
            Some(balance) if *balance >= amount => {
                *balance -= amount;
                true
            }
            _ => false,
        }
    }
}
