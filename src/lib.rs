//! Token Issuance: a pausable token ledger with time-locked allocations
//!
//! This crate provides the accounting core of a two-part token issuance
//! scheme featuring:
//! - A fixed-supply token ledger with balances, transfer, and a
//!   minter-restricted mint
//! - A single minter role per ledger/manager pairing, fixed at construction
//! - Independent pause switches for the ledger and the issuance manager
//! - A vesting registry of per-beneficiary time-locked allocations with
//!   one-shot release
//! - JSON persistence and a CLI driver for the pairing
//!
//! Time never enters the core implicitly: eligibility and release take an
//! explicit `now`, which keeps every operation deterministic and testable.
//!
//! # Example
//!
//! ```rust
//! use chrono::Utc;
//! use token_issuance::issuance::IssuanceManager;
//! use token_issuance::ledger::{LedgerHandle, TokenLedger, TOKEN_UNIT};
//!
//! let owner = "0xowner";
//!
//! // Deploy the pairing: manager, ledger credited to it, one-time binding
//! let mut manager = IssuanceManager::new(owner);
//! let ledger = LedgerHandle::new(TokenLedger::new(owner));
//! manager.setup(ledger.clone()).unwrap();
//!
//! // Lock 5000 tokens for a beneficiary, claimable immediately
//! manager
//!     .register_time_locked_tokens(owner, "0xinvestor", 5_000 * TOKEN_UNIT, Utc::now())
//!     .unwrap();
//! assert!(manager.can_receive_time_locked_tokens("0xinvestor", Utc::now()));
//!
//! // The beneficiary claims; the holding balance is drawn down
//! manager
//!     .receive_time_locked_tokens("0xinvestor", Utc::now())
//!     .unwrap();
//! assert_eq!(ledger.balance_of("0xinvestor"), 5_000 * TOKEN_UNIT);
//! ```

pub mod access;
pub mod cli;
pub mod issuance;
pub mod ledger;
pub mod storage;

// Re-export commonly used types
pub use access::{MinterRole, PauseError, PauseState, Unauthorized};
pub use issuance::{IssuanceError, IssuanceManager, VestingEntry, VestingRegistry};
pub use ledger::{LedgerError, LedgerHandle, TokenLedger, INITIAL_SUPPLY, TOKEN_UNIT};
pub use storage::{SavedState, Storage, StorageConfig, StorageError};
