use crate::domain::account::Balance;
use crate::domain::session::Session;
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "session.json";
const ACCOUNTS_FILE: &str = "accounts.json";

/// An account the client has seen, with its last-known balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedAccount {
    pub email: String,
    pub name: String,
    pub balance: Balance,
}

/// Client-local persisted state: the session record and a mirror of known
/// accounts with cached balances, stored as JSON files under a data
/// directory.
///
/// The cache is only ever a display fallback; the remote store stays the
/// authority for balances and bills.
pub struct LocalCache {
    dir: PathBuf,
}

impl LocalCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn read_json<T: for<'de> Deserialize<'de>>(&self, file: &str) -> Result<Option<T>> {
        let path = self.dir.join(file);
        if !path.exists() {
            return Ok(None);
        }
        let raw = fs::read_to_string(path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let raw = serde_json::to_string_pretty(value)?;
        fs::write(self.dir.join(file), raw)?;
        Ok(())
    }

    pub fn store_session(&self, session: &Session) -> Result<()> {
        self.write_json(SESSION_FILE, session)
    }

    pub fn load_session(&self) -> Result<Option<Session>> {
        self.read_json(SESSION_FILE)
    }

    /// Logout teardown. Removing an already-absent session is fine.
    pub fn clear_session(&self) -> Result<()> {
        let path = self.dir.join(SESSION_FILE);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Upserts the last-seen balance for an account, keyed by email.
    pub fn remember_balance(&self, email: &str, name: &str, balance: Balance) -> Result<()> {
        let mut accounts: Vec<CachedAccount> =
            self.read_json(ACCOUNTS_FILE)?.unwrap_or_default();
        match accounts.iter_mut().find(|entry| entry.email == email) {
            Some(entry) => {
                entry.name = name.to_string();
                entry.balance = balance;
            }
            None => accounts.push(CachedAccount {
                email: email.to_string(),
                name: name.to_string(),
                balance,
            }),
        }
        self.write_json(ACCOUNTS_FILE, &accounts)
    }

    /// Last-seen balance for the account, if any was ever cached.
    pub fn cached_balance(&self, email: &str) -> Result<Option<Balance>> {
        let accounts: Vec<CachedAccount> = self.read_json(ACCOUNTS_FILE)?.unwrap_or_default();
        Ok(accounts
            .into_iter()
            .find(|entry| entry.email == email)
            .map(|entry| entry.balance))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
