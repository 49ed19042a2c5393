//! Minter role gate
//!
//! Exactly one principal holds the minter role for a ledger/manager
//! pairing. The role is fixed at construction; no transfer of ownership
//! is supported.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Authorization failure: the caller does not hold the required role.
#[derive(Error, Debug, Clone)]
#[error("unauthorized: {caller} does not hold the minter role")]
pub struct Unauthorized {
    /// The rejected caller
    pub caller: String,
}

/// The single privileged principal of a ledger/manager pairing
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinterRole {
    principal: String,
}

impl MinterRole {
    /// Grant the minter role to `principal`
    pub fn new(principal: &str) -> Self {
        Self {
            principal: principal.to_string(),
        }
    }

    /// Get the principal holding the role
    pub fn principal(&self) -> &str {
        &self.principal
    }

    /// Check that `caller` holds the minter role
    ///
    /// Privileged operations run this check before touching any state,
    /// so a rejected caller never observes a partial mutation.
    pub fn authorize(&self, caller: &str) -> Result<(), Unauthorized> {
        if caller == self.principal {
            Ok(())
        } else {
            Err(Unauthorized {
                caller: caller.to_string(),
            })
        }
    }
}
