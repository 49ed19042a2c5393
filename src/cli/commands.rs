//! CLI commands for the issuance driver
//!
//! Implements all command handlers for the CLI interface. The driver is
//! where wall-clock time enters the system: `Utc::now()` is sampled here
//! and passed into the core as an explicit parameter.

use crate::issuance::IssuanceManager;
use crate::ledger::{LedgerHandle, TokenLedger};
use crate::storage::{Storage, StorageConfig};
use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

/// Application state
pub struct AppState {
    pub ledger: LedgerHandle,
    pub manager: IssuanceManager,
    pub storage: Storage,
}

impl AppState {
    /// Load the persisted pairing from the data directory
    pub fn load(data_dir: &PathBuf) -> CliResult<Self> {
        let storage = Storage::new(StorageConfig {
            data_dir: data_dir.clone(),
            ..Default::default()
        })?;

        if !storage.exists() {
            return Err("no issuance state found; run `issuance init` first".into());
        }

        let (ledger, manager) = storage.load()?;

        Ok(Self {
            ledger,
            manager,
            storage,
        })
    }

    /// Save the current state
    pub fn save(&self) -> CliResult<()> {
        self.storage.save(&self.ledger, &self.manager)?;
        Ok(())
    }

    /// Resolve an optional caller to the owner principal
    fn caller_or_owner(&self, caller: Option<String>) -> String {
        caller.unwrap_or_else(|| self.manager.owner().to_string())
    }
}

/// Derive a fresh account address from random bytes
pub fn generate_address() -> String {
    let mut seed = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut seed);
    let hash = Sha256::digest(seed);
    format!("0x{}", &hex::encode(hash)[..40])
}

/// Resolve the unlock time from an absolute RFC 3339 timestamp or a
/// relative offset in seconds from now; defaults to now itself
pub fn resolve_release_at(at: Option<String>, in_secs: Option<i64>) -> CliResult<DateTime<Utc>> {
    match (at, in_secs) {
        (Some(_), Some(_)) => Err("use either --at or --in, not both".into()),
        (Some(ts), None) => Ok(ts.parse::<DateTime<Utc>>()?),
        (None, Some(secs)) => Ok(Utc::now() + Duration::seconds(secs)),
        (None, None) => Ok(Utc::now()),
    }
}

/// Initialize a ledger/manager pairing and persist it
pub fn cmd_init(data_dir: &PathBuf, owner: Option<String>) -> CliResult<()> {
    let storage = Storage::new(StorageConfig {
        data_dir: data_dir.clone(),
        ..Default::default()
    })?;

    if storage.exists() {
        println!("⚠️  Issuance state already exists at {:?}", data_dir);
        return Ok(());
    }

    let owner = owner.unwrap_or_else(generate_address);

    // Two-step deployment: the manager first, then the ledger credited
    // to the same principal, then the one-time binding.
    let mut manager = IssuanceManager::new(&owner);
    let ledger = LedgerHandle::new(TokenLedger::new(&owner));
    manager.setup(ledger.clone())?;

    storage.save(&ledger, &manager)?;

    println!("✅ Issuance pairing initialized!");
    println!("   📁 Data directory: {:?}", data_dir);
    println!("   👤 Owner / holding account: {}", owner);
    println!("   💰 Initial supply: {} base units", ledger.total_supply());

    Ok(())
}

/// Show ledger and manager status
pub fn cmd_status(state: &AppState) -> CliResult<()> {
    println!("📊 Issuance status");
    println!("   👤 Owner: {}", state.manager.owner());
    println!("   💰 Total supply: {} base units", state.ledger.total_supply());
    println!("   🏦 Holders: {}", state.ledger.holder_count());
    println!(
        "   ⏸  Ledger: {}",
        if state.ledger.paused() { "paused" } else { "active" }
    );
    println!(
        "   ⏸  Manager: {}",
        if state.manager.paused() { "paused" } else { "active" }
    );

    let now = Utc::now();
    let registry = state.manager.vesting();
    println!("   🔒 Allocations: {}", registry.len());
    for (beneficiary, entry) in registry.entries() {
        let status = if entry.released {
            "released".to_string()
        } else if entry.releasable(now) {
            "claimable".to_string()
        } else {
            format!("locked until {}", entry.release_at)
        };
        println!("      {} — {} base units, {}", beneficiary, entry.amount, status);
    }

    Ok(())
}

/// Show the balance of an account
pub fn cmd_balance(state: &AppState, address: &str) -> CliResult<()> {
    println!("{} base units", state.ledger.balance_of(address));
    Ok(())
}

/// Transfer base units between accounts
pub fn cmd_transfer(state: &mut AppState, from: &str, to: &str, amount: u128) -> CliResult<()> {
    state.ledger.transfer(from, to, amount)?;
    state.save()?;

    println!("✅ Transferred {} base units from {} to {}", amount, from, to);

    Ok(())
}

/// Mint new base units; minter-only
pub fn cmd_mint(
    state: &mut AppState,
    to: &str,
    amount: u128,
    caller: Option<String>,
) -> CliResult<()> {
    let caller = state.caller_or_owner(caller);

    state.ledger.mint_token(&caller, to, amount)?;
    state.save()?;

    println!("✅ Minted {} base units to {}", amount, to);
    println!("   💰 Total supply: {} base units", state.ledger.total_supply());

    Ok(())
}

/// Register a time-locked allocation; minter-only
pub fn cmd_register(
    state: &mut AppState,
    beneficiary: &str,
    amount: u128,
    release_at: DateTime<Utc>,
    caller: Option<String>,
) -> CliResult<()> {
    let caller = state.caller_or_owner(caller);

    state
        .manager
        .register_time_locked_tokens(&caller, beneficiary, amount, release_at)?;
    state.save()?;

    println!(
        "✅ Registered {} base units for {}, unlocking at {}",
        amount, beneficiary, release_at
    );

    Ok(())
}

/// Check whether a beneficiary can claim right now
pub fn cmd_eligible(state: &AppState, beneficiary: &str) -> CliResult<()> {
    let now = Utc::now();

    if state.manager.can_receive_time_locked_tokens(beneficiary, now) {
        println!("✅ {} can claim now", beneficiary);
    } else {
        match state.manager.vesting().get(beneficiary) {
            Some(entry) if entry.released => {
                println!("⛔ {} has already claimed", beneficiary)
            }
            Some(entry) => println!(
                "🔒 {} is locked until {}",
                beneficiary, entry.release_at
            ),
            None => println!("⛔ {} has no allocation", beneficiary),
        }
    }

    Ok(())
}

/// Claim a released allocation as the beneficiary
pub fn cmd_claim(state: &mut AppState, beneficiary: &str) -> CliResult<()> {
    state
        .manager
        .receive_time_locked_tokens(beneficiary, Utc::now())?;
    state.save()?;

    println!(
        "✅ Claimed; {} now holds {} base units",
        beneficiary,
        state.ledger.balance_of(beneficiary)
    );

    Ok(())
}

/// Pause the ledger; minter-only
pub fn cmd_pause_token(state: &mut AppState, caller: Option<String>) -> CliResult<()> {
    let caller = state.caller_or_owner(caller);

    state.manager.pause_token(&caller)?;
    state.save()?;

    println!("⏸  Ledger paused");

    Ok(())
}

/// Unpause the ledger; minter-only
pub fn cmd_unpause_token(state: &mut AppState, caller: Option<String>) -> CliResult<()> {
    let caller = state.caller_or_owner(caller);

    state.manager.unpause_token(&caller)?;
    state.save()?;

    println!("▶️  Ledger active");

    Ok(())
}

/// Pause the manager; minter-only
pub fn cmd_pause_manager(state: &mut AppState, caller: Option<String>) -> CliResult<()> {
    let caller = state.caller_or_owner(caller);

    state.manager.pause(&caller)?;
    state.save()?;

    println!("⏸  Manager paused");

    Ok(())
}

/// Unpause the manager; minter-only
pub fn cmd_unpause_manager(state: &mut AppState, caller: Option<String>) -> CliResult<()> {
    let caller = state.caller_or_owner(caller);

    state.manager.unpause(&caller)?;
    state.save()?;

    println!("▶️  Manager active");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_address_shape() {
        let address = generate_address();

        assert!(address.starts_with("0x"));
        assert_eq!(address.len(), 42);
        assert_ne!(address, generate_address());
    }

    #[test]
    fn test_resolve_release_at_absolute() {
        let at = resolve_release_at(Some("2026-01-01T00:00:00Z".to_string()), None).unwrap();

        assert_eq!(at, "2026-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap());
    }

    #[test]
    fn test_resolve_release_at_relative() {
        let before = Utc::now();
        let at = resolve_release_at(None, Some(60)).unwrap();

        assert!(at >= before + Duration::seconds(60));
        assert!(at <= Utc::now() + Duration::seconds(60));
    }

    #[test]
    fn test_resolve_release_at_conflict() {
        let result = resolve_release_at(Some("2026-01-01T00:00:00Z".to_string()), Some(60));

        assert!(result.is_err());
    }
}
