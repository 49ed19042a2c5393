//! Time-locked vesting registry
//!
//! Tracks at most one locked allocation per beneficiary. Each entry moves
//! through `Unregistered -> Locked -> Released`; `Released` is terminal and
//! entries are never deleted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A locked allocation for a single beneficiary
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VestingEntry {
    /// Allocation in base units
    pub amount: u128,
    /// Unlock time; the allocation is claimable from this instant on
    pub release_at: DateTime<Utc>,
    /// Flips to true exactly once, on successful release
    pub released: bool,
}

impl VestingEntry {
    /// The eligibility rule: not yet released and the unlock time has passed
    pub fn releasable(&self, now: DateTime<Utc>) -> bool {
        !self.released && now >= self.release_at
    }
}

/// Registry of locked allocations, keyed by beneficiary
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct VestingRegistry {
    entries: HashMap<String, VestingEntry>,
}

impl VestingRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Register an allocation for `beneficiary`, overwriting any previous
    /// entry (no merge semantics)
    ///
    /// Returns the replaced entry, if any.
    pub fn register(
        &mut self,
        beneficiary: &str,
        amount: u128,
        release_at: DateTime<Utc>,
    ) -> Option<VestingEntry> {
        self.entries.insert(
            beneficiary.to_string(),
            VestingEntry {
                amount,
                release_at,
                released: false,
            },
        )
    }

    /// Get the entry for a beneficiary
    pub fn get(&self, beneficiary: &str) -> Option<&VestingEntry> {
        self.entries.get(beneficiary)
    }

    /// The single eligibility predicate behind both manager-level probes
    pub fn is_releasable(&self, beneficiary: &str, now: DateTime<Utc>) -> bool {
        self.entries
            .get(beneficiary)
            .is_some_and(|entry| entry.releasable(now))
    }

    /// Mark the entry for `beneficiary` as released; no-op for unknown keys
    pub fn mark_released(&mut self, beneficiary: &str) {
        if let Some(entry) = self.entries.get_mut(beneficiary) {
            entry.released = true;
        }
    }

    /// Iterate over all entries
    pub fn entries(&self) -> impl Iterator<Item = (&String, &VestingEntry)> {
        self.entries.iter()
    }

    /// Number of registered beneficiaries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
