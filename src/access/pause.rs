//! Pause switch
//!
//! A two-state switch consulted before every transfer- and mint-class
//! operation. The ledger starts `Active`; the issuance manager starts
//! `Paused` until its setup completes. The two are independent instances,
//! never a shared flag.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Pause-related errors
#[derive(Error, Debug)]
pub enum PauseError {
    #[error("paused: mutating operations are disabled")]
    Paused,
    #[error("already paused")]
    AlreadyPaused,
    #[error("not paused")]
    NotPaused,
}

/// Operating state of a pausable component
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PauseState {
    Active,
    Paused,
}

impl PauseState {
    /// Check whether the component is paused
    pub fn is_paused(&self) -> bool {
        matches!(self, PauseState::Paused)
    }

    /// Fail with `Paused` unless the component is active
    pub fn ensure_active(&self) -> Result<(), PauseError> {
        match self {
            PauseState::Active => Ok(()),
            PauseState::Paused => Err(PauseError::Paused),
        }
    }

    /// Transition `Active` -> `Paused`
    ///
    /// A redundant pause request is surfaced as an error, never a silent
    /// success.
    pub fn pause(&mut self) -> Result<(), PauseError> {
        match self {
            PauseState::Active => {
                *self = PauseState::Paused;
                Ok(())
            }
            PauseState::Paused => Err(PauseError::AlreadyPaused),
        }
    }

    /// Transition `Paused` -> `Active`
    pub fn unpause(&mut self) -> Result<(), PauseError> {
        match self {
            PauseState::Paused => {
                *self = PauseState::Active;
                Ok(())
            }
            PauseState::Active => Err(PauseError::NotPaused),
        }
    }
}
