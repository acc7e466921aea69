//! Payment records and their lifecycle state machine.
//!
//! A payment starts `Pending` and transitions exactly once to `Completed`;
//! `Completed` is terminal. Every other field is immutable after creation.

use crate::account::AccountId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle state of a payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    /// Created but not yet settled; funds have not moved.
    Pending,

    /// Settled: funds escrowed, merchant credited, stats updated. Terminal.
    Completed,
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentStatus::Pending => f.write_str("pending"),
            PaymentStatus::Completed => f.write_str("completed"),
        }
    }
}

/// A payment record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Globally unique id, allocated monotonically from 1, never reused.
    pub id: u64,

    /// Merchant the payment settles to.
    pub merchant: AccountId,

    /// Identity that funds the payment.
    pub payer: AccountId,

    /// Gross amount in base units. Always greater than zero.
    pub amount: u64,

    /// Optional caller-supplied note.
    pub memo: Option<String>,

    /// Current lifecycle state.
    pub status: PaymentStatus,

    /// Engine operation clock at creation time.
    pub created_at: u64,
}

impl Payment {
    /// Creates a pending payment record.
    pub fn pending(
        id: u64,
        merchant: AccountId,
        payer: AccountId,
        amount: u64,
        memo: Option<String>,
        created_at: u64,
    ) -> Self {
        Payment {
            id,
            merchant,
            payer,
            amount,
            memo,
            status: PaymentStatus::Pending,
            created_at,
        }
    }

    /// Returns `true` if the payment is still awaiting settlement.
    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }

    /// Marks the payment completed.
    ///
    /// Returns `false` if the payment had already left the pending state;
    /// the record is not touched in that case.
    pub fn complete(&mut self) -> bool {
        if self.status != PaymentStatus::Pending {
            return false;
        }
        self.status = PaymentStatus::Completed;
        true
    }
}
