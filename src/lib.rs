//! # Escrow Engine
//!
//! A merchant payment/escrow ledger: merchants register, payers create
//! payments against them, settlement escrows funds and credits the merchant
//! net of a platform fee, and merchants withdraw accumulated balances.
//!
//! ## Design Principles
//!
//! - **Validate before mutate**: every operation checks all preconditions
//!   before touching any store, so a failing call changes nothing
//! - **Exactly-once settlement**: payments move `Pending -> Completed` at
//!   most once; reprocessing is rejected without side effects
//! - **Monotonic ids**: payment ids start at 1 and are never reused
//! - **External value movement**: actual fund transfer is delegated to an
//!   [`AssetCustodian`] supplied by the host
//!
//! ## Example
//!
//! ```
//! use escrow_engine::{AccountId, EscrowEngine, InMemoryCustodian};
//!
//! let mut custodian = InMemoryCustodian::new();
//! custodian.fund(&AccountId::from("payer"), 2_000_000);
//!
//! let mut engine = EscrowEngine::new(
//!     AccountId::from("owner"),
//!     AccountId::from("escrow"),
//!     custodian,
//! );
//! engine.register(&AccountId::from("merchant"), &AccountId::from("wallet")).unwrap();
//!
//! let id = engine
//!     .create_payment(&AccountId::from("payer"), &AccountId::from("merchant"), 2_000_000, None)
//!     .unwrap();
//! engine.process_pending_payment(id).unwrap();
//!
//! // 1% default fee: the merchant can withdraw the net amount
//! assert_eq!(engine.merchant_balance(&AccountId::from("merchant")), 1_980_000);
//! engine.withdraw_balance(&AccountId::from("merchant"), 1_980_000).unwrap();
//! ```

pub mod account;
pub mod custodian;
pub mod engine;
pub mod error;
pub mod fees;
pub mod merchant;
pub mod payment;

pub use account::{AccountId, BalanceBook};
pub use custodian::{AssetCustodian, CustodianError, InMemoryCustodian};
pub use engine::{ContractInfo, EscrowEngine};
pub use error::{EscrowError, Result};
pub use merchant::Merchant;
pub use payment::{Payment, PaymentStatus};
