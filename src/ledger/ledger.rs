//! Fixed-supply token ledger
//!
//! Owns the balance mapping and the total-supply counter. Transfer moves
//! balance, mint grows supply, and both are blocked while paused.

use crate::access::{MinterRole, PauseError, PauseState, Unauthorized};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// One whole token expressed in base units of 10^-18 of a token
pub const TOKEN_UNIT: u128 = 1_000_000_000_000_000_000;

/// Supply credited at construction: one billion whole tokens (10^27 base units)
pub const INITIAL_SUPPLY: u128 = 1_000_000_000 * TOKEN_UNIT;

/// Ledger-related errors
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error(transparent)]
    Unauthorized(#[from] Unauthorized),
    #[error(transparent)]
    Pause(#[from] PauseError),
    #[error("insufficient balance: have {have}, need {need}")]
    InsufficientBalance { have: u128, need: u128 },
    #[error("supply overflow: cannot mint {amount} base units")]
    SupplyOverflow { amount: u128 },
}

/// Account balances and total supply for a single token
///
/// Invariant: the sum of all balances equals `total_supply` after every
/// operation. Every mutating operation validates before writing, so a
/// failed call leaves the ledger untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TokenLedger {
    /// Balances: address -> base units
    balances: HashMap<String, u128>,
    /// Mutated only by mint; no burn exists
    total_supply: u128,
    /// The only principal allowed to mint and pause
    minter: MinterRole,
    pause: PauseState,
}

impl TokenLedger {
    /// Create a ledger with the full initial supply credited to
    /// `initial_holder`, who also receives the minter role.
    ///
    /// The ledger starts unpaused.
    pub fn new(initial_holder: &str) -> Self {
        let mut balances = HashMap::new();
        balances.insert(initial_holder.to_string(), INITIAL_SUPPLY);

        log::info!(
            "ledger created: {} base units held by {}",
            INITIAL_SUPPLY,
            initial_holder
        );

        Self {
            balances,
            total_supply: INITIAL_SUPPLY,
            minter: MinterRole::new(initial_holder),
            pause: PauseState::Active,
        }
    }

    // =========================================================================
    // View functions
    // =========================================================================

    /// Get total supply
    pub fn total_supply(&self) -> u128 {
        self.total_supply
    }

    /// Get the minter principal
    pub fn minter(&self) -> &str {
        self.minter.principal()
    }

    /// Check whether the ledger is paused
    pub fn paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// Get balance of an address; unknown addresses hold zero
    pub fn balance_of(&self, account: &str) -> u128 {
        *self.balances.get(account).unwrap_or(&0)
    }

    /// Get all accounts with a non-zero balance
    pub fn holders(&self) -> Vec<(&String, &u128)> {
        self.balances.iter().filter(|(_, &b)| b > 0).collect()
    }

    /// Get holder count
    pub fn holder_count(&self) -> usize {
        self.balances.values().filter(|&&b| b > 0).count()
    }

    // =========================================================================
    // Mutating functions
    // =========================================================================

    /// Transfer base units from one address to another
    ///
    /// A self-transfer is a no-op that still requires sufficient balance.
    /// Total supply is unchanged.
    pub fn transfer(&mut self, from: &str, to: &str, amount: u128) -> Result<(), LedgerError> {
        self.pause.ensure_active()?;

        let have = self.balance_of(from);
        if have < amount {
            return Err(LedgerError::InsufficientBalance { have, need: amount });
        }

        if from != to {
            *self.balances.entry(from.to_string()).or_insert(0) -= amount;
            *self.balances.entry(to.to_string()).or_insert(0) += amount;
        }

        log::debug!("transferred {} base units from {} to {}", amount, from, to);

        Ok(())
    }

    /// Mint new base units to an address, growing total supply
    ///
    /// Minting creates supply; releasing a vested allocation moves existing
    /// balance. The two paths coexist.
    pub fn mint_token(&mut self, caller: &str, to: &str, amount: u128) -> Result<(), LedgerError> {
        self.minter.authorize(caller)?;
        self.pause.ensure_active()?;

        let total_supply = self
            .total_supply
            .checked_add(amount)
            .ok_or(LedgerError::SupplyOverflow { amount })?;

        // A credited balance never exceeds total supply, so this add
        // cannot overflow once the supply add has been checked.
        self.total_supply = total_supply;
        *self.balances.entry(to.to_string()).or_insert(0) += amount;

        log::info!("minted {} base units to {}", amount, to);

        Ok(())
    }

    /// Pause all transfer- and mint-class operations; minter-only
    pub fn pause(&mut self, caller: &str) -> Result<(), LedgerError> {
        self.minter.authorize(caller)?;
        self.pause.pause()?;

        log::info!("ledger paused by {}", caller);

        Ok(())
    }

    /// Lift the pause; minter-only
    pub fn unpause(&mut self, caller: &str) -> Result<(), LedgerError> {
        self.minter.authorize(caller)?;
        self.pause.unpause()?;

        log::info!("ledger unpaused by {}", caller);

        Ok(())
    }
}
