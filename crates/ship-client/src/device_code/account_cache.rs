use crate::{ClientError, ClientResult};

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use ship_session::store::write_atomically;

/// Account signed in at the identity provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CachedAccount {
    pub account_id: String,
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    /// When the provider-issued access token stops being valid
    pub expires_at: DateTime<Utc>,
}

impl CachedAccount {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// File-backed record of the provider account, kept beside the session record.
#[derive(Debug, Clone)]
pub struct AccountCache {
    path: PathBuf,
}

impl AccountCache {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Cached account, or `None` when absent or unreadable.
    pub fn load(&self) -> Option<CachedAccount> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Unable to read account cache {}: {e}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str(&contents) {
            Ok(account) => Some(account),
            Err(e) => {
                warn!("Discarding unreadable account cache {}: {e}", self.path.display());
                let _ = fs::remove_file(&self.path);
                None
            }
        }
    }

    pub fn store(&self, account: &CachedAccount) -> ClientResult<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| ClientError::cache(&self.path, e.to_string()))?;
        }

        let json = serde_json::to_vec_pretty(account)?;
        write_atomically(&self.path, &json)
            .map_err(|e| ClientError::cache(&self.path, e.to_string()))?;

        debug!("Cached provider account {}", account.username);
        Ok(())
    }

    /// Forget the cached account. Clearing an empty cache succeeds.
    pub fn clear(&self) -> ClientResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::cache(&self.path, e.to_string())),
        }
    }
}
