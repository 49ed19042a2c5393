//! Issuance manager
//!
//! Composes the role gate, the manager-side pause switch, and the vesting
//! registry; binds once to a token ledger and exposes the registration,
//! eligibility, release, and pause operations called by external drivers.

use crate::access::{MinterRole, PauseError, PauseState, Unauthorized};
use crate::issuance::vesting::VestingRegistry;
use crate::ledger::{LedgerError, LedgerHandle};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Issuance-related errors
#[derive(Error, Debug)]
pub enum IssuanceError {
    #[error(transparent)]
    Unauthorized(#[from] Unauthorized),
    #[error(transparent)]
    Pause(#[from] PauseError),
    #[error("already configured: a ledger is bound to this manager")]
    AlreadyConfigured,
    #[error("not configured: no ledger has been bound yet")]
    NotConfigured,
    #[error("not eligible: no releasable allocation for {beneficiary}")]
    NotEligible { beneficiary: String },
    #[error("ledger error: {0}")]
    Ledger(#[from] LedgerError),
}

/// Sale-side manager for time-locked token issuance
///
/// Starts paused; `setup` performs the one-time ledger binding and opens
/// the manager for release operations. The owner passed at construction is
/// the single privileged principal and the holding account the ledger
/// credits its initial supply to.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IssuanceManager {
    /// The only principal allowed to register, pause, and proxy to the ledger
    owner: MinterRole,
    /// Manager-side switch, independent of the ledger's
    pause: PauseState,
    registry: VestingRegistry,
    /// Set by the one-time `setup`; survives serialization
    configured: bool,
    /// The ledger link itself is process-local and not serialized
    #[serde(skip)]
    ledger: Option<LedgerHandle>,
}

impl IssuanceManager {
    /// Create a manager owned by `owner`, paused until `setup` completes
    pub fn new(owner: &str) -> Self {
        Self {
            owner: MinterRole::new(owner),
            pause: PauseState::Paused,
            registry: VestingRegistry::new(),
            configured: false,
            ledger: None,
        }
    }

    // =========================================================================
    // View functions
    // =========================================================================

    /// Get the owner principal
    pub fn owner(&self) -> &str {
        self.owner.principal()
    }

    /// Check whether the manager is paused
    pub fn paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// Check whether `setup` has completed
    pub fn configured(&self) -> bool {
        self.configured
    }

    /// Get the vesting registry
    pub fn vesting(&self) -> &VestingRegistry {
        &self.registry
    }

    /// Beneficiary-side eligibility probe: true iff an allocation exists,
    /// is not yet released, and its unlock time has passed
    pub fn can_receive_time_locked_tokens(&self, beneficiary: &str, now: DateTime<Utc>) -> bool {
        self.registry.is_releasable(beneficiary, now)
    }

    /// Owner-side introspection over the same eligibility rule as
    /// [`can_receive_time_locked_tokens`]; the two never disagree
    pub fn can_release_time_locked_tokens(&self, beneficiary: &str, now: DateTime<Utc>) -> bool {
        self.registry.is_releasable(beneficiary, now)
    }

    // =========================================================================
    // Mutating functions
    // =========================================================================

    /// Bind this manager to a ledger; callable once
    ///
    /// A second call fails with `AlreadyConfigured`. On success the manager
    /// leaves its initial paused state and release operations become
    /// callable.
    pub fn setup(&mut self, ledger: LedgerHandle) -> Result<(), IssuanceError> {
        if self.configured {
            return Err(IssuanceError::AlreadyConfigured);
        }

        self.ledger = Some(ledger);
        self.configured = true;
        self.pause = PauseState::Active;

        log::info!("issuance manager configured; releases are open");

        Ok(())
    }

    /// Re-attach the ledger link on a manager restored from storage
    ///
    /// The link is process-local and not serialized; restoring a configured
    /// manager leaves it without a handle until this is called. Has no
    /// effect on a manager that was never set up.
    pub fn reattach(&mut self, ledger: LedgerHandle) {
        if self.configured {
            self.ledger = Some(ledger);
        }
    }

    /// Register or overwrite a time-locked allocation; minter-only
    ///
    /// No balance moves at registration; tokens stay on the holding
    /// account until release.
    pub fn register_time_locked_tokens(
        &mut self,
        caller: &str,
        beneficiary: &str,
        amount: u128,
        release_at: DateTime<Utc>,
    ) -> Result<(), IssuanceError> {
        self.owner.authorize(caller)?;

        if let Some(previous) = self.registry.register(beneficiary, amount, release_at) {
            if !previous.released {
                log::warn!(
                    "overwrote unreleased allocation of {} base units for {}",
                    previous.amount,
                    beneficiary
                );
            }
        }

        log::info!(
            "registered {} base units for {} unlocking at {}",
            amount,
            beneficiary,
            release_at
        );

        Ok(())
    }

    /// Release the caller's allocation into their ledger balance
    ///
    /// Moves `amount` from the holding account to `caller` by transfer;
    /// total supply is unchanged. The released flag flips only after the
    /// transfer has succeeded, so a failed transfer can never strand a
    /// marked-but-unpaid entry.
    pub fn receive_time_locked_tokens(
        &mut self,
        caller: &str,
        now: DateTime<Utc>,
    ) -> Result<(), IssuanceError> {
        self.pause.ensure_active()?;
        let ledger = self.ledger()?.clone();

        let amount = match self.registry.get(caller) {
            Some(entry) if entry.releasable(now) => entry.amount,
            _ => {
                return Err(IssuanceError::NotEligible {
                    beneficiary: caller.to_string(),
                })
            }
        };

        ledger.transfer(self.owner.principal(), caller, amount)?;
        self.registry.mark_released(caller);

        log::info!("released {} base units to {}", amount, caller);

        Ok(())
    }

    /// Pause manager-level release operations; minter-only
    pub fn pause(&mut self, caller: &str) -> Result<(), IssuanceError> {
        self.owner.authorize(caller)?;
        self.pause.pause()?;

        log::info!("issuance manager paused by {}", caller);

        Ok(())
    }

    /// Lift the manager-level pause; minter-only
    pub fn unpause(&mut self, caller: &str) -> Result<(), IssuanceError> {
        self.owner.authorize(caller)?;
        self.pause.unpause()?;

        log::info!("issuance manager unpaused by {}", caller);

        Ok(())
    }

    /// Proxy a pause to the bound ledger; minter-only
    pub fn pause_token(&self, caller: &str) -> Result<(), IssuanceError> {
        self.owner.authorize(caller)?;
        let ledger = self.ledger()?.clone();

        // The manager acts towards the ledger as its own principal
        ledger.pause(self.owner.principal())?;

        Ok(())
    }

    /// Proxy an unpause to the bound ledger; minter-only
    pub fn unpause_token(&self, caller: &str) -> Result<(), IssuanceError> {
        self.owner.authorize(caller)?;
        let ledger = self.ledger()?.clone();

        ledger.unpause(self.owner.principal())?;

        Ok(())
    }

    fn ledger(&self) -> Result<&LedgerHandle, IssuanceError> {
        self.ledger.as_ref().ok_or(IssuanceError::NotConfigured)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::{TokenLedger, INITIAL_SUPPLY, TOKEN_UNIT};
    use chrono::Duration;

    const OWNER: &str = "0xowner";

    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    fn setup_pair() -> (LedgerHandle, IssuanceManager) {
        let mut manager = IssuanceManager::new(OWNER);
        let ledger = LedgerHandle::new(TokenLedger::new(OWNER));
        manager.setup(ledger.clone()).unwrap();
        (ledger, manager)
    }

    #[test]
    fn test_starts_paused_until_setup() {
        let mut manager = IssuanceManager::new(OWNER);

        assert!(manager.paused());
        assert!(!manager.configured());

        // Releases are blocked by the initial pause state
        let result = manager.receive_time_locked_tokens("0xinvestor", now());
        assert!(matches!(
            result,
            Err(IssuanceError::Pause(PauseError::Paused))
        ));
    }

    #[test]
    fn test_setup_unpauses() {
        let (_, manager) = setup_pair();

        assert!(manager.configured());
        assert!(!manager.paused());
    }

    #[test]
    fn test_setup_is_one_shot() {
        let (ledger, mut manager) = setup_pair();

        let result = manager.setup(ledger);
        assert!(matches!(result, Err(IssuanceError::AlreadyConfigured)));
    }

    #[test]
    fn test_pause_token_before_setup() {
        let manager = IssuanceManager::new(OWNER);

        let result = manager.pause_token(OWNER);
        assert!(matches!(result, Err(IssuanceError::NotConfigured)));
    }

    #[test]
    fn test_register_requires_minter() {
        let (_, mut manager) = setup_pair();

        let result =
            manager.register_time_locked_tokens("0xintruder", "0xintruder", TOKEN_UNIT, now());
        assert!(matches!(result, Err(IssuanceError::Unauthorized(_))));
        assert!(manager.vesting().is_empty());
    }

    #[test]
    fn test_register_moves_no_balance() {
        let (ledger, mut manager) = setup_pair();

        manager
            .register_time_locked_tokens(OWNER, "0xinvestor", 5_000 * TOKEN_UNIT, now())
            .unwrap();

        assert_eq!(ledger.balance_of("0xinvestor"), 0);
        assert_eq!(ledger.balance_of(OWNER), INITIAL_SUPPLY);
        assert_eq!(manager.vesting().len(), 1);
    }

    #[test]
    fn test_eligibility_time_gating() {
        let (_, mut manager) = setup_pair();
        let unlock = now() + Duration::seconds(2);

        manager
            .register_time_locked_tokens(OWNER, "0xinvestor", 5_000 * TOKEN_UNIT, unlock)
            .unwrap();

        // Locked strictly before the unlock time
        assert!(!manager.can_receive_time_locked_tokens("0xinvestor", now()));
        assert!(!manager.can_release_time_locked_tokens("0xinvestor", now()));

        // Claimable at and after it
        assert!(manager.can_receive_time_locked_tokens("0xinvestor", unlock));
        assert!(manager.can_release_time_locked_tokens("0xinvestor", unlock));
    }

    #[test]
    fn test_both_probes_agree() {
        let (_, mut manager) = setup_pair();
        manager
            .register_time_locked_tokens(OWNER, "0xinvestor", TOKEN_UNIT, now())
            .unwrap();

        for probe_time in [now() - Duration::seconds(1), now(), now() + Duration::days(7)] {
            assert_eq!(
                manager.can_receive_time_locked_tokens("0xinvestor", probe_time),
                manager.can_release_time_locked_tokens("0xinvestor", probe_time)
            );
        }
    }

    #[test]
    fn test_release_moves_allocation_once() {
        // The observed end-to-end scenario: 60k tokens unlocking immediately
        let (ledger, mut manager) = setup_pair();
        let amount = 60_000 * TOKEN_UNIT;

        manager
            .register_time_locked_tokens(OWNER, "0xinvestor", amount, now())
            .unwrap();

        assert!(manager.can_receive_time_locked_tokens("0xinvestor", now()));
        // Nothing is assigned automatically once time has passed
        assert_eq!(ledger.balance_of("0xinvestor"), 0);

        manager
            .receive_time_locked_tokens("0xinvestor", now())
            .unwrap();

        assert_eq!(ledger.balance_of("0xinvestor"), amount);
        assert_eq!(ledger.balance_of(OWNER), INITIAL_SUPPLY - amount);
        // Release transfers, it does not mint
        assert_eq!(ledger.total_supply(), INITIAL_SUPPLY);
    }

    #[test]
    fn test_release_is_single_shot() {
        let (ledger, mut manager) = setup_pair();
        let amount = 5_000 * TOKEN_UNIT;

        manager
            .register_time_locked_tokens(OWNER, "0xinvestor", amount, now())
            .unwrap();
        manager
            .receive_time_locked_tokens("0xinvestor", now())
            .unwrap();

        let result = manager.receive_time_locked_tokens("0xinvestor", now());
        assert!(matches!(result, Err(IssuanceError::NotEligible { .. })));

        // Balance increased exactly once
        assert_eq!(ledger.balance_of("0xinvestor"), amount);
    }

    #[test]
    fn test_release_before_unlock_rejected() {
        let (ledger, mut manager) = setup_pair();
        let unlock = now() + Duration::days(30);

        manager
            .register_time_locked_tokens(OWNER, "0xinvestor", TOKEN_UNIT, unlock)
            .unwrap();

        let result = manager.receive_time_locked_tokens("0xinvestor", now());
        assert!(matches!(result, Err(IssuanceError::NotEligible { .. })));
        assert_eq!(ledger.balance_of("0xinvestor"), 0);

        // The same call succeeds once the unlock time has been reached
        manager
            .receive_time_locked_tokens("0xinvestor", unlock)
            .unwrap();
        assert_eq!(ledger.balance_of("0xinvestor"), TOKEN_UNIT);
    }

    #[test]
    fn test_release_without_entry_rejected() {
        let (_, mut manager) = setup_pair();

        let result = manager.receive_time_locked_tokens("0xnobody", now());
        assert!(matches!(result, Err(IssuanceError::NotEligible { .. })));
    }

    #[test]
    fn test_manager_pause_blocks_release_not_probes() {
        let (ledger, mut manager) = setup_pair();
        manager
            .register_time_locked_tokens(OWNER, "0xinvestor", TOKEN_UNIT, now())
            .unwrap();

        manager.pause(OWNER).unwrap();

        let result = manager.receive_time_locked_tokens("0xinvestor", now());
        assert!(matches!(
            result,
            Err(IssuanceError::Pause(PauseError::Paused))
        ));

        // Probes keep working while paused
        assert!(manager.can_receive_time_locked_tokens("0xinvestor", now()));
        assert_eq!(ledger.balance_of("0xinvestor"), 0);

        manager.unpause(OWNER).unwrap();
        manager
            .receive_time_locked_tokens("0xinvestor", now())
            .unwrap();
        assert_eq!(ledger.balance_of("0xinvestor"), TOKEN_UNIT);
    }

    #[test]
    fn test_ledger_pause_does_not_strand_entry() {
        let (ledger, mut manager) = setup_pair();
        manager
            .register_time_locked_tokens(OWNER, "0xinvestor", TOKEN_UNIT, now())
            .unwrap();

        // Pause the ledger only; the manager itself stays active
        manager.pause_token(OWNER).unwrap();

        let result = manager.receive_time_locked_tokens("0xinvestor", now());
        assert!(matches!(
            result,
            Err(IssuanceError::Ledger(LedgerError::Pause(PauseError::Paused)))
        ));

        // The failed transfer must not have marked the entry released
        assert!(!manager.vesting().get("0xinvestor").unwrap().released);

        manager.unpause_token(OWNER).unwrap();
        manager
            .receive_time_locked_tokens("0xinvestor", now())
            .unwrap();
        assert_eq!(ledger.balance_of("0xinvestor"), TOKEN_UNIT);
    }

    #[test]
    fn test_pause_token_proxies_to_ledger() {
        let (ledger, manager) = setup_pair();

        assert!(!ledger.paused());
        manager.pause_token(OWNER).unwrap();
        assert!(ledger.paused());

        // Redundant pause surfaces the ledger's error
        let result = manager.pause_token(OWNER);
        assert!(matches!(
            result,
            Err(IssuanceError::Ledger(LedgerError::Pause(
                PauseError::AlreadyPaused
            )))
        ));

        manager.unpause_token(OWNER).unwrap();
        assert!(!ledger.paused());
    }

    #[test]
    fn test_pause_token_requires_minter() {
        let (ledger, manager) = setup_pair();

        let result = manager.pause_token("0xintruder");
        assert!(matches!(result, Err(IssuanceError::Unauthorized(_))));
        assert!(!ledger.paused());
    }

    #[test]
    fn test_manager_pause_independent_of_ledger_pause() {
        let (ledger, mut manager) = setup_pair();

        manager.pause(OWNER).unwrap();
        // Pausing the manager leaves the ledger running
        assert!(manager.paused());
        assert!(!ledger.paused());

        manager.unpause(OWNER).unwrap();
        manager.pause_token(OWNER).unwrap();
        // And vice versa
        assert!(ledger.paused());
        assert!(!manager.paused());
    }

    #[test]
    fn test_reregistration_overwrites_allocation() {
        let (ledger, mut manager) = setup_pair();

        manager
            .register_time_locked_tokens(OWNER, "0xinvestor", 1_000 * TOKEN_UNIT, now())
            .unwrap();
        manager
            .register_time_locked_tokens(OWNER, "0xinvestor", 250 * TOKEN_UNIT, now())
            .unwrap();

        manager
            .receive_time_locked_tokens("0xinvestor", now())
            .unwrap();

        // The claim pays out the latest registration, not the first
        assert_eq!(ledger.balance_of("0xinvestor"), 250 * TOKEN_UNIT);
        assert_eq!(manager.vesting().len(), 1);
    }

    #[test]
    fn test_independent_pairings() {
        let (ledger_a, mut manager_a) = setup_pair();

        let mut manager_b = IssuanceManager::new("0xother");
        let ledger_b = LedgerHandle::new(TokenLedger::new("0xother"));
        manager_b.setup(ledger_b.clone()).unwrap();

        manager_a
            .register_time_locked_tokens(OWNER, "0xinvestor", TOKEN_UNIT, now())
            .unwrap();

        // The second pairing knows nothing about the first
        assert!(!manager_b.can_receive_time_locked_tokens("0xinvestor", now()));
        assert!(manager_a.pause_token("0xother").is_err());

        manager_b.pause_token("0xother").unwrap();
        assert!(ledger_b.paused());
        assert!(!ledger_a.paused());
    }
}
