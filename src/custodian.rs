//! The asset custodian seam.
//!
//! The engine never moves value itself; it orchestrates when and between
//! which identities a transfer occurs and leaves the mechanism to an
//! [`AssetCustodian`] implementation supplied by the host.

use crate::account::AccountId;
use std::collections::HashMap;
use thiserror::Error;

/// Errors an asset custodian may report for a transfer.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CustodianError {
    /// The source identity does not hold enough funds.
    #[error("insufficient funds in source account {0}")]
    InsufficientFunds(AccountId),

    /// The transfer was refused for a custodian-specific reason.
    #[error("transfer rejected: {0}")]
    Rejected(String),
}

/// Moves value between identities on behalf of the engine.
///
/// A transfer either fully succeeds or fails with no effect; the engine
/// treats a failure as an ordinary operation error and rolls back any
/// tentative ledger mutation of its own.
pub trait AssetCustodian {
    /// Transfers `amount` base units from `from` to `to`.
    fn transfer(&mut self, from: &AccountId, to: &AccountId, amount: u64)
        -> Result<(), CustodianError>;
}

/// A simple in-memory custodian holding per-account funds.
///
/// Suitable for tests and embedded use. Transfers fail with
/// [`CustodianError::InsufficientFunds`] when the source account cannot
/// cover the amount, which makes the engine's rollback paths observable.
#[derive(Debug, Default)]
pub struct InMemoryCustodian {
    funds: HashMap<AccountId, u64>,
}

impl InMemoryCustodian {
    /// Creates a custodian with no funded accounts.
    pub fn new() -> Self {
        Self::default()
    }

    /// Mints `amount` into `account`, creating it if needed.
    pub fn fund(&mut self, account: &AccountId, amount: u64) {
        *self.funds.entry(account.clone()).or_insert(0) += amount;
    }

    /// Returns the funds held for `account`, 0 if unknown.
    pub fn funds_of(&self, account: &AccountId) -> u64 {
        self.funds.get(account).copied().unwrap_or(0)
    }
}

impl AssetCustodian for InMemoryCustodian {
    fn transfer(
        &mut self,
        from: &AccountId,
        to: &AccountId,
        amount: u64,
    ) -> Result<(), CustodianError> {
        let available = self.funds_of(from);
        if available < amount {
            return Err(CustodianError::InsufficientFunds(from.clone()));
        }
        *self.funds.get_mut(from).expect("source account exists") -= amount;
        *self.funds.entry(to.clone()).or_insert(0) += amount;
        Ok(())
    }
}
