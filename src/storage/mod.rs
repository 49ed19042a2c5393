//! Storage module for issuance state persistence

pub mod persistence;

pub use persistence::{SavedState, Storage, StorageConfig, StorageError};
