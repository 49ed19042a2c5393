//! Time-locked token issuance
//!
//! The sale-side of the system: a registry of per-beneficiary locked
//! allocations and the manager that binds to a ledger, registers
//! allocations, and releases them once their unlock time has passed.
//!
//! # Example
//!
//! ```ignore
//! use token_issuance::issuance::IssuanceManager;
//! use token_issuance::ledger::{LedgerHandle, TokenLedger, TOKEN_UNIT};
//! use chrono::Utc;
//!
//! let mut manager = IssuanceManager::new("0xowner");
//! let ledger = LedgerHandle::new(TokenLedger::new("0xowner"));
//! manager.setup(ledger.clone()).unwrap();
//!
//! manager
//!     .register_time_locked_tokens("0xowner", "0xinvestor", 5_000 * TOKEN_UNIT, Utc::now())
//!     .unwrap();
//!
//! if manager.can_receive_time_locked_tokens("0xinvestor", Utc::now()) {
//!     manager.receive_time_locked_tokens("0xinvestor", Utc::now()).unwrap();
//! }
//! ```

pub mod manager;
pub mod vesting;

pub use manager::{IssuanceError, IssuanceManager};
pub use vesting::{VestingEntry, VestingRegistry};
