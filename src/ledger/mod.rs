//! Token ledger
//!
//! Tracks balances and total supply for a single fixed-supply token with:
//! - Balances per address, summing to total supply at all times
//! - Minter-restricted mint that grows supply
//! - A pause switch gating every mutating operation
//!
//! # Example
//!
//! ```ignore
//! use token_issuance::ledger::{LedgerHandle, TokenLedger, TOKEN_UNIT};
//!
//! let ledger = LedgerHandle::new(TokenLedger::new("0xholder"));
//!
//! // Move 5 whole tokens to another account
//! ledger.transfer("0xholder", "0xrecipient", 5 * TOKEN_UNIT).unwrap();
//!
//! let balance = ledger.balance_of("0xrecipient");
//! ```

pub mod handle;
pub mod ledger;

pub use handle::LedgerHandle;
pub use ledger::{LedgerError, TokenLedger, INITIAL_SUPPLY, TOKEN_UNIT};
