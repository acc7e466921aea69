//! Merchant records and the registry that owns them.

use crate::account::AccountId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A registered merchant.
///
/// Created when the merchant registers itself; mutated by the contract owner
/// (fee override, activation toggle) and by payment settlement (stats);
/// never deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Merchant {
    /// Whether the merchant may receive new payments.
    pub active: bool,

    /// Per-merchant fee in bps, taking precedence over the global fee.
    /// Always within [0, 10000] when present.
    pub fee_override_bps: Option<u16>,

    /// Where withdrawals are paid out.
    pub withdrawal_address: Option<AccountId>,

    /// Number of completed payments settled to this merchant.
    pub payment_count: u64,

    /// Sum of gross amounts over completed payments.
    pub total_volume: u64,
}

impl Merchant {
    /// Creates a fresh record as written by registration: active, no fee
    /// override, zero stats.
    pub fn new(withdrawal_address: AccountId) -> Self {
        Merchant {
            active: true,
            fee_override_bps: None,
            withdrawal_address: Some(withdrawal_address),
            payment_count: 0,
            total_volume: 0,
        }
    }

    /// Records one completed payment of the given gross amount.
    pub fn record_payment(&mut self, amount: u64) {
        self.payment_count += 1;
        self.total_volume += amount;
    }
}

/// Merchant records indexed by merchant identity.
#[derive(Debug, Default)]
pub struct MerchantRegistry {
    merchants: HashMap<AccountId, Merchant>,
}

impl MerchantRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Writes a fresh record for the merchant, overwriting any existing one.
    ///
    /// Re-registration resets stats and clears any fee override.
    pub fn register(&mut self, merchant: AccountId, withdrawal_address: AccountId) {
        self.merchants
            .insert(merchant, Merchant::new(withdrawal_address));
    }

    /// Looks up a merchant record.
    pub fn get(&self, merchant: &AccountId) -> Option<&Merchant> {
        self.merchants.get(merchant)
    }

    /// Looks up a merchant record for mutation.
    pub fn get_mut(&mut self, merchant: &AccountId) -> Option<&mut Merchant> {
        self.merchants.get_mut(merchant)
    }

    /// Returns `true` if the merchant is registered and active.
    pub fn is_active(&self, merchant: &AccountId) -> bool {
        self.merchants.get(merchant).is_some_and(|m| m.active)
    }
}
