//! Core escrow engine.
//!
//! Owns the four stores (merchant registry, payment ledger, balance book,
//! contract config) and orchestrates every public operation over them. All
//! mutating operations take `&mut self`, so access is fully serialized:
//! callers never observe another operation's partial effects, and a failing
//! call leaves every store exactly as it was.

use crate::account::{AccountId, BalanceBook};
use crate::custodian::AssetCustodian;
use crate::error::{EscrowError, Result};
use crate::fees;
use crate::merchant::{Merchant, MerchantRegistry};
use crate::payment::Payment;
use log::{debug, warn};
use serde::Serialize;
use std::collections::HashMap;

/// Singleton contract configuration.
///
/// Mutated only through owner-authorized calls on the engine.
#[derive(Debug, Clone)]
struct ContractConfig {
    /// Identity allowed to change fees and merchant status.
    owner: AccountId,

    /// The fund-holding identity payments are escrowed under.
    escrow: AccountId,

    /// Global fee in bps, applied when a merchant has no override.
    fee_bps: u16,

    /// Next payment id to allocate. Starts at 1, never reused.
    next_payment_id: u64,
}

/// Read-only view of the contract configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContractInfo {
    /// Contract owner identity.
    pub owner: AccountId,

    /// Current global fee in bps.
    pub fee_bps: u16,

    /// Next payment id to be allocated.
    pub next_payment_id: u64,
}

/// The merchant payment/escrow engine.
///
/// Generic over the [`AssetCustodian`] that performs actual value movement;
/// the engine only decides when and between which identities transfers occur.
///
/// # Transactional model
///
/// Every operation validates before it mutates. A custodian failure mid-way
/// through settlement or withdrawal aborts the call and rolls back any
/// tentative mutation, so each call is all-or-nothing.
pub struct EscrowEngine<C: AssetCustodian> {
    config: ContractConfig,
    merchants: MerchantRegistry,
    payments: HashMap<u64, Payment>,
    balances: BalanceBook,
    custodian: C,

    /// Monotone operation clock, stamped onto payments at creation.
    clock: u64,
}

impl<C: AssetCustodian> EscrowEngine<C> {
    /// Creates an engine with the default global fee
    /// ([`fees::DEFAULT_FEE_BPS`]).
    ///
    /// `owner` is the only identity allowed to run admin operations;
    /// `escrow` is the identity the custodian holds escrowed funds under.
    pub fn new(owner: AccountId, escrow: AccountId, custodian: C) -> Self {
        EscrowEngine {
            config: ContractConfig {
                owner,
                escrow,
                fee_bps: fees::DEFAULT_FEE_BPS,
                next_payment_id: 1,
            },
            merchants: MerchantRegistry::new(),
            payments: HashMap::new(),
            balances: BalanceBook::new(),
            custodian,
            clock: 0,
        }
    }

    /// Creates an engine with an explicit initial global fee.
    ///
    /// Fails with `InvalidFeeValue` if `fee_bps` exceeds 10000.
    pub fn with_fee_bps(
        owner: AccountId,
        escrow: AccountId,
        custodian: C,
        fee_bps: u16,
    ) -> Result<Self> {
        fees::validate_fee_bps(fee_bps)?;
        let mut engine = Self::new(owner, escrow, custodian);
        engine.config.fee_bps = fee_bps;
        Ok(engine)
    }

    // ---- MerchantRegistry operations ----

    /// Registers the caller as a merchant paying out to `withdrawal_address`.
    ///
    /// Always succeeds. Re-registering overwrites the existing record,
    /// resetting stats and clearing any fee override.
    pub fn register(&mut self, caller: &AccountId, withdrawal_address: &AccountId) -> Result<()> {
        self.clock += 1;
        self.merchants
            .register(caller.clone(), withdrawal_address.clone());
        debug!(
            "registered merchant {} with withdrawal address {}",
            caller, withdrawal_address
        );
        Ok(())
    }

    /// Returns the merchant record, or `None` if never registered.
    pub fn merchant_info(&self, merchant: &AccountId) -> Option<&Merchant> {
        self.merchants.get(merchant)
    }

    /// Sets or clears a merchant's fee override. Owner only.
    pub fn set_merchant_fee_override(
        &mut self,
        caller: &AccountId,
        merchant: &AccountId,
        fee_bps: Option<u16>,
    ) -> Result<()> {
        self.require_owner(caller)?;
        if self.merchants.get(merchant).is_none() {
            warn!("fee override for unknown merchant {}", merchant);
            return Err(EscrowError::InvalidMerchant);
        }
        if let Some(bps) = fee_bps {
            fees::validate_fee_bps(bps)?;
        }

        self.clock += 1;
        // Safety: existence was checked above
        self.merchants
            .get_mut(merchant)
            .expect("merchant exists")
            .fee_override_bps = fee_bps;
        debug!("set fee override for {} to {:?} bps", merchant, fee_bps);
        Ok(())
    }

    /// Flips a merchant's active flag. Owner only.
    ///
    /// Returns the new active state.
    pub fn toggle_merchant_status(
        &mut self,
        caller: &AccountId,
        merchant: &AccountId,
    ) -> Result<bool> {
        self.require_owner(caller)?;
        let record = self
            .merchants
            .get_mut(merchant)
            .ok_or(EscrowError::InvalidMerchant)?;

        self.clock += 1;
        record.active = !record.active;
        let active = record.active;
        debug!("merchant {} active flag now {}", merchant, active);
        Ok(active)
    }

    // ---- PaymentLedger operations ----

    /// Creates a pending payment from `payer` to `merchant`.
    ///
    /// Fails with `InvalidMerchant` if the merchant is unregistered or
    /// inactive, and `InvalidAmount` if `amount` is zero. On success the
    /// allocated id is returned; the id counter advances only after
    /// validation passes, so failed calls never burn ids.
    pub fn create_payment(
        &mut self,
        payer: &AccountId,
        merchant: &AccountId,
        amount: u64,
        memo: Option<String>,
    ) -> Result<u64> {
        if !self.merchants.is_active(merchant) {
            warn!("payment to unregistered or inactive merchant {}", merchant);
            return Err(EscrowError::InvalidMerchant);
        }
        if amount == 0 {
            warn!("zero-amount payment from {} to {}", payer, merchant);
            return Err(EscrowError::InvalidAmount);
        }

        self.clock += 1;
        let id = self.config.next_payment_id;
        self.config.next_payment_id += 1;
        self.payments.insert(
            id,
            Payment::pending(
                id,
                merchant.clone(),
                payer.clone(),
                amount,
                memo,
                self.clock,
            ),
        );
        debug!(
            "created payment {} of {} from {} to {}",
            id, amount, payer, merchant
        );
        Ok(id)
    }

    /// Settles a pending payment.
    ///
    /// Escrows the gross amount from the payer, credits the merchant with
    /// the net proceeds, updates merchant stats and marks the payment
    /// completed. Any caller may settle any pending payment.
    ///
    /// A custodian failure aborts the call before any ledger mutation, so a
    /// payment that fails to settle stays pending and can be retried by the
    /// caller.
    pub fn process_pending_payment(&mut self, id: u64) -> Result<()> {
        let payment = self
            .payments
            .get(&id)
            .ok_or(EscrowError::PaymentNotFound(id))?;
        if !payment.is_pending() {
            warn!("payment {} already processed", id);
            return Err(EscrowError::AlreadyProcessed(id));
        }
        let payer = payment.payer.clone();
        let merchant = payment.merchant.clone();
        let amount = payment.amount;

        // Escrow the gross amount first; a failure here leaves every store
        // untouched.
        self.custodian
            .transfer(&payer, &self.config.escrow, amount)?;

        // Funds are escrowed; everything below is infallible, so the
        // remaining mutations commit as a unit.
        self.clock += 1;
        let fee_bps = self.effective_fee_bps(&merchant);
        let net = fees::net_amount(amount, fee_bps);
        self.balances.credit(&merchant, net);

        // Safety: merchants are never deleted and the payment's merchant was
        // registered at creation time
        self.merchants
            .get_mut(&merchant)
            .expect("merchant exists for payment")
            .record_payment(amount);

        // Safety: presence was checked at the top of this method
        self.payments
            .get_mut(&id)
            .expect("payment exists")
            .complete();

        debug!(
            "settled payment {}: gross {}, fee {} bps, net {} to {}",
            id, amount, fee_bps, net, merchant
        );
        Ok(())
    }

    /// Returns the payment record, or `None` for an unknown id.
    pub fn payment(&self, id: u64) -> Option<&Payment> {
        self.payments.get(&id)
    }

    // ---- BalanceLedger operations ----

    /// Returns the merchant's withdrawable balance, 0 if unknown.
    pub fn merchant_balance(&self, merchant: &AccountId) -> u64 {
        self.balances.balance(merchant)
    }

    /// Withdraws `amount` from the caller's accumulated balance, paying out
    /// to the caller's registered withdrawal address.
    ///
    /// The balance check precedes the debit; a custodian failure on the
    /// payout rolls the debit back, so no state change survives a failed
    /// transfer.
    pub fn withdraw_balance(&mut self, caller: &AccountId, amount: u64) -> Result<()> {
        let to = self
            .merchants
            .get(caller)
            .and_then(|m| m.withdrawal_address.clone())
            .ok_or(EscrowError::NoWithdrawalAddress)?;

        let available = self.balances.balance(caller);
        if !self.balances.debit(caller, amount) {
            warn!(
                "withdrawal of {} by {} exceeds balance of {}",
                amount, caller, available
            );
            return Err(EscrowError::InsufficientBalance {
                requested: amount,
                available,
            });
        }

        if let Err(e) = self.custodian.transfer(&self.config.escrow, &to, amount) {
            // Failed payout: restore the debit
            self.balances.credit(caller, amount);
            warn!("payout of {} to {} failed: {}", amount, to, e);
            return Err(e.into());
        }

        self.clock += 1;
        debug!("merchant {} withdrew {} to {}", caller, amount, to);
        Ok(())
    }

    // ---- AdminController operations ----

    /// Updates the global fee. Owner only; values above 10000 bps are
    /// rejected before being stored.
    pub fn set_fee_percentage(&mut self, caller: &AccountId, fee_bps: u16) -> Result<()> {
        self.require_owner(caller)?;
        fees::validate_fee_bps(fee_bps)?;

        self.clock += 1;
        self.config.fee_bps = fee_bps;
        debug!("global fee set to {} bps", fee_bps);
        Ok(())
    }

    /// Returns the owner, global fee and next payment id.
    pub fn contract_info(&self) -> ContractInfo {
        ContractInfo {
            owner: self.config.owner.clone(),
            fee_bps: self.config.fee_bps,
            next_payment_id: self.config.next_payment_id,
        }
    }

    // ---- internals ----

    fn require_owner(&self, caller: &AccountId) -> Result<()> {
        if *caller != self.config.owner {
            warn!("caller {} is not the contract owner", caller);
            return Err(EscrowError::NotAuthorized);
        }
        Ok(())
    }

    /// Resolves the fee for a merchant: its override if set, else the
    /// global fee.
    fn effective_fee_bps(&self, merchant: &AccountId) -> u16 {
        self.merchants
            .get(merchant)
            .and_then(|m| m.fee_override_bps)
            .unwrap_or(self.config.fee_bps)
    }
}
