//! Account store
//!
//! The collaborator behind login and save: a key-value mapping from account
//! name to stored profile. `JsonAccountStore` keeps the whole map in one JSON
//! file and rewrites it on every mutation (last write wins);
//! `MemoryAccountStore` has the same semantics without a file.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{AccountError, Result};
use crate::session::AccountName;
use crate::workspace::{starter_files, FileArtifact};

/// Operations the desktop needs from account storage
pub trait AccountStore {
    /// Create an account seeded with the starter workspace
    fn register(&mut self, account: &AccountName, password: &str) -> Result<()>;

    /// Check a password against the stored profile
    fn authenticate(&self, account: &AccountName, password: &str) -> Result<()>;

    /// Saved file list for an account
    fn load_files(&self, account: &AccountName) -> Result<Vec<FileArtifact>>;

    /// Replace an account's saved file list
    fn save_files(&mut self, account: &AccountName, files: &[FileArtifact]) -> Result<()>;
}

/// Stored profile of one account
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountRecord {
    /// Account name, same as the map key
    pub username: String,
    /// Password, compared by equality; a profile without one never matches
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Saved workspace
    #[serde(default)]
    pub files: Vec<FileArtifact>,
    /// When the files were last saved
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl AccountRecord {
    /// Create a profile holding the starter workspace
    pub fn new(account: &AccountName, password: &str) -> Self {
        Self {
            username: account.to_string(),
            password: Some(password.to_string()),
            files: starter_files(),
            updated_at: Utc::now(),
        }
    }
}

/// Account map shared by both store implementations
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
struct AccountMap(HashMap<String, AccountRecord>);

impl AccountMap {
    fn register(&mut self, account: &AccountName, password: &str) -> Result<()> {
        if self.0.contains_key(account.as_str()) {
            return Err(AccountError::AlreadyExists(account.to_string()).into());
        }
        self.0
            .insert(account.to_string(), AccountRecord::new(account, password));
        Ok(())
    }

    fn authenticate(&self, account: &AccountName, password: &str) -> Result<()> {
        match self.0.get(account.as_str()) {
            Some(AccountRecord {
                password: Some(stored),
                ..
            }) if stored == password => Ok(()),
            _ => Err(AccountError::InvalidCredentials.into()),
        }
    }

    fn get(&self, account: &AccountName) -> Result<&AccountRecord> {
        self.0
            .get(account.as_str())
            .ok_or_else(|| AccountError::NotFound(account.to_string()).into())
    }

    fn get_mut(&mut self, account: &AccountName) -> Result<&mut AccountRecord> {
        self.0
            .get_mut(account.as_str())
            .ok_or_else(|| AccountError::NotFound(account.to_string()).into())
    }
}

/// Account store persisted as one JSON file
#[derive(Debug, Clone)]
pub struct JsonAccountStore {
    accounts: AccountMap,
    path: PathBuf,
}

impl JsonAccountStore {
    /// Open the store at a path; a missing file is an empty store
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        if !path.exists() {
            debug!("No account store at {:?}, starting empty", path);
            return Ok(Self {
                accounts: AccountMap::default(),
                path,
            });
        }

        let content = std::fs::read_to_string(&path).map_err(|e| {
            AccountError::LoadFailed(format!("Failed to read account store: {}", e))
        })?;

        let accounts: AccountMap = serde_json::from_str(&content).map_err(|e| {
            AccountError::LoadFailed(format!("Failed to parse account store: {}", e))
        })?;

        Ok(Self { accounts, path })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of registered accounts
    pub fn account_count(&self) -> usize {
        self.accounts.0.len()
    }

    /// Stored profile of an account
    pub fn record(&self, account: &AccountName) -> Result<&AccountRecord> {
        self.accounts.get(account)
    }

    /// Write `accounts` to disk, only adopting it once the write succeeded
    fn commit(&mut self, accounts: AccountMap) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AccountError::SaveFailed(format!("Failed to create store directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(&accounts).map_err(|e| {
            AccountError::SaveFailed(format!("Failed to serialize accounts: {}", e))
        })?;

        std::fs::write(&self.path, content).map_err(|e| {
            AccountError::SaveFailed(format!("Failed to write account store: {}", e))
        })?;

        self.accounts = accounts;
        Ok(())
    }
}

impl AccountStore for JsonAccountStore {
    fn register(&mut self, account: &AccountName, password: &str) -> Result<()> {
        let mut accounts = self.accounts.clone();
        accounts.register(account, password)?;
        self.commit(accounts)?;

        info!("Registered account {}", account);
        Ok(())
    }

    fn authenticate(&self, account: &AccountName, password: &str) -> Result<()> {
        self.accounts.authenticate(account, password)
    }

    fn load_files(&self, account: &AccountName) -> Result<Vec<FileArtifact>> {
        Ok(self.accounts.get(account)?.files.clone())
    }

    fn save_files(&mut self, account: &AccountName, files: &[FileArtifact]) -> Result<()> {
        let mut accounts = self.accounts.clone();
        let record = accounts.get_mut(account)?;
        record.files = files.to_vec();
        record.updated_at = Utc::now();
        self.commit(accounts)?;

        info!("Saved {} files for account {}", files.len(), account);
        Ok(())
    }
}

/// Account store held in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryAccountStore {
    accounts: AccountMap,
}

impl MemoryAccountStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }
}

impl AccountStore for MemoryAccountStore {
    fn register(&mut self, account: &AccountName, password: &str) -> Result<()> {
        self.accounts.register(account, password)
    }

    fn authenticate(&self, account: &AccountName, password: &str) -> Result<()> {
        self.accounts.authenticate(account, password)
    }

    fn load_files(&self, account: &AccountName) -> Result<Vec<FileArtifact>> {
        Ok(self.accounts.get(account)?.files.clone())
    }

    fn save_files(&mut self, account: &AccountName, files: &[FileArtifact]) -> Result<()> {
        let record = self.accounts.get_mut(account)?;
        record.files = files.to_vec();
        record.updated_at = Utc::now();
        Ok(())
    }
}
