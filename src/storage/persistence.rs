//! Issuance state persistence layer
//!
//! The core keeps no file format of its own; this layer lets the CLI
//! driver carry the combined ledger/manager state across invocations as a
//! single JSON file.

use crate::issuance::IssuanceManager;
use crate::ledger::{LedgerHandle, TokenLedger};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::{self, BufReader, BufWriter};
use thiserror::Error;

/// Storage errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

/// The combined on-disk state of one ledger/manager pairing
#[derive(Serialize, Deserialize)]
pub struct SavedState {
    pub ledger: TokenLedger,
    pub manager: IssuanceManager,
}

/// Storage configuration
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: std::path::PathBuf,
    pub state_file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: std::path::PathBuf::from(".issuance_data"),
            state_file: "issuance.json".to_string(),
        }
    }
}

/// Issuance state storage manager
pub struct Storage {
    config: StorageConfig,
}

impl Storage {
    /// Create a new storage manager
    pub fn new(config: StorageConfig) -> Result<Self, StorageError> {
        fs::create_dir_all(&config.data_dir)?;
        Ok(Self { config })
    }

    /// Create with default configuration
    pub fn with_defaults() -> Result<Self, StorageError> {
        Self::new(StorageConfig::default())
    }

    /// Get the state file path
    fn state_path(&self) -> std::path::PathBuf {
        self.config.data_dir.join(&self.config.state_file)
    }

    /// Save the current pairing state to disk
    pub fn save(
        &self,
        ledger: &LedgerHandle,
        manager: &IssuanceManager,
    ) -> Result<(), StorageError> {
        let state = SavedState {
            ledger: ledger.snapshot(),
            manager: manager.clone(),
        };

        // Write to temporary file first
        let temp_path = self.config.data_dir.join("issuance.tmp");
        let file = fs::File::create(&temp_path)?;
        let writer = BufWriter::new(file);

        serde_json::to_writer_pretty(writer, &state)?;

        // Atomic rename
        fs::rename(&temp_path, self.state_path())?;

        Ok(())
    }

    /// Load the saved pairing from disk
    ///
    /// The manager's ledger link is not serialized; loading wraps the
    /// ledger in a fresh handle and re-attaches it.
    pub fn load(&self) -> Result<(LedgerHandle, IssuanceManager), StorageError> {
        let path = self.state_path();

        if !path.exists() {
            return Err(StorageError::InvalidData(
                "Issuance state file not found".to_string(),
            ));
        }

        let file = fs::File::open(&path)?;
        let reader = BufReader::new(file);

        let state: SavedState = serde_json::from_reader(reader)?;

        let ledger = LedgerHandle::new(state.ledger);
        let mut manager = state.manager;
        manager.reattach(ledger.clone());

        Ok((ledger, manager))
    }

    /// Check if a saved state exists
    pub fn exists(&self) -> bool {
        self.state_path().exists()
    }

    /// Delete the saved state
    pub fn delete(&self) -> Result<(), StorageError> {
        let path = self.state_path();
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
