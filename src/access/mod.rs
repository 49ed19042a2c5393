//! Role and pause gates
//!
//! Authorization and pause primitives shared by the ledger and the
//! issuance manager. Each component holds its own instances; nothing
//! here is global state.

pub mod pause;
pub mod role;

pub use pause::{PauseError, PauseState};
pub use role::{MinterRole, Unauthorized};
