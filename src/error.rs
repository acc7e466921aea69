//! Error types for the escrow engine.

use crate::custodian::CustodianError;
use thiserror::Error;

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, EscrowError>;

/// Errors returned by engine operations.
///
/// Every check runs before any store is mutated, so a call that returns an
/// error leaves the registry, payment ledger, balances and config exactly as
/// they were.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EscrowError {
    /// Caller is not the contract owner
    #[error("caller is not authorized for this operation")]
    NotAuthorized,

    /// Merchant is unknown to the registry, or registered but inactive
    #[error("merchant is not registered or not active")]
    InvalidMerchant,

    /// Payment amount must be greater than zero
    #[error("payment amount must be greater than zero")]
    InvalidAmount,

    /// No payment record exists for the given id
    #[error("payment {0} not found")]
    PaymentNotFound(u64),

    /// Payment has already left the pending state
    #[error("payment {0} has already been processed")]
    AlreadyProcessed(u64),

    /// Withdrawal amount exceeds the merchant's stored balance
    #[error("withdrawal of {requested} exceeds balance of {available}")]
    InsufficientBalance { requested: u64, available: u64 },

    /// Caller has no registered withdrawal address
    #[error("caller has no registered withdrawal address")]
    NoWithdrawalAddress,

    /// Fee value lies outside the [0, 10000] basis-point range
    #[error("fee of {0} bps exceeds the maximum of 10000")]
    InvalidFeeValue(u16),

    /// The asset custodian refused or failed a transfer; any tentative
    /// ledger mutation for the call has been rolled back
    #[error("asset transfer failed: {0}")]
    Transfer(#[from] CustodianError),
}
