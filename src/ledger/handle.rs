//! Shared ledger handle
//!
//! Wraps a ledger in a mutex so that each public operation is a single
//! critical section. Concurrent callers cannot interleave a check (pause
//! state, balance sufficiency) with another caller's mutation.

use crate::ledger::{LedgerError, TokenLedger};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// Cloneable, thread-safe handle to one ledger instance
///
/// Clones share the same underlying ledger; the issuance manager and the
/// external driver each hold one.
#[derive(Clone, Debug)]
pub struct LedgerHandle {
    inner: Arc<Mutex<TokenLedger>>,
}

impl LedgerHandle {
    /// Wrap a ledger in a shared handle
    pub fn new(ledger: TokenLedger) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    // The ledger validates before every write, so the state behind a
    // poisoned lock is still consistent and safe to recover.
    fn lock(&self) -> MutexGuard<'_, TokenLedger> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get balance of an address; unknown addresses hold zero
    pub fn balance_of(&self, account: &str) -> u128 {
        self.lock().balance_of(account)
    }

    /// Get total supply
    pub fn total_supply(&self) -> u128 {
        self.lock().total_supply()
    }

    /// Check whether the ledger is paused
    pub fn paused(&self) -> bool {
        self.lock().paused()
    }

    /// Get the minter principal
    pub fn minter(&self) -> String {
        self.lock().minter().to_string()
    }

    /// Get holder count
    pub fn holder_count(&self) -> usize {
        self.lock().holder_count()
    }

    /// Transfer base units between addresses
    pub fn transfer(&self, from: &str, to: &str, amount: u128) -> Result<(), LedgerError> {
        self.lock().transfer(from, to, amount)
    }

    /// Mint new base units; minter-only
    pub fn mint_token(&self, caller: &str, to: &str, amount: u128) -> Result<(), LedgerError> {
        self.lock().mint_token(caller, to, amount)
    }

    /// Pause the ledger; minter-only
    pub fn pause(&self, caller: &str) -> Result<(), LedgerError> {
        self.lock().pause(caller)
    }

    /// Unpause the ledger; minter-only
    pub fn unpause(&self, caller: &str) -> Result<(), LedgerError> {
        self.lock().unpause(caller)
    }

    /// Clone the current ledger state, e.g. for persistence
    pub fn snapshot(&self) -> TokenLedger {
        self.lock().clone()
    }
}
