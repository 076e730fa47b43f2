use crate::store::{SessionStore, codec, decode_record};
use crate::{Identity, SessionError, SessionResult};

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};

const DATE_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Session record stored as a single file named by the storage key.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    dir: PathBuf,
    key: String,
}

impl FileSessionStore {
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            key: key.into(),
        }
    }

    /// Path of the session record.
    pub fn path(&self) -> PathBuf {
        self.dir.join(&self.key)
    }

    /// Moves a corrupt record aside as `<key>.corrupted.<timestamp>`.
    ///
    /// Falls back to deleting it so the key is always cleared.
    fn discard_corrupt(&self, path: &Path) {
        let timestamp = chrono::Utc::now().format(DATE_FORMAT);
        let backup_path = self.dir.join(format!("{}.corrupted.{timestamp}", self.key));

        match fs::rename(path, &backup_path) {
            Ok(()) => warn!("Moved corrupt session record to {}", backup_path.display()),
            Err(e) => {
                warn!("Failed to back up corrupt session record: {e}");
                if let Err(e) = fs::remove_file(path) {
                    warn!("Failed to remove corrupt session record: {e}");
                }
            }
        }
    }
}

impl SessionStore for FileSessionStore {
    fn save(&self, identity: &Identity) -> SessionResult<()> {
        fs::create_dir_all(&self.dir).map_err(|e| {
            SessionError::storage(format!("cannot create {}: {e}", self.dir.display()))
        })?;

        let encoded = codec::encode(identity)?;
        let path = self.path();
        write_atomically(&path, encoded.as_bytes())
            .map_err(|e| SessionError::storage(format!("cannot write {}: {e}", path.display())))?;

        info!("Saved session for {}", identity.subject_id);
        Ok(())
    }

    fn load(&self) -> Option<Identity> {
        let path = self.path();

        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No session record at {}", path.display());
                return None;
            }
            Err(e) => {
                warn!("Unable to read session record at {}: {e}", path.display());
                return None;
            }
        };

        let decoded = String::from_utf8(bytes)
            .map_err(|e| SessionError::corrupt_session(format!("record is not UTF-8: {e}")))
            .and_then(|contents| decode_record(&contents));

        match decoded {
            Ok(identity) => {
                debug!("Loaded session for {}", identity.subject_id);
                Some(identity)
            }
            Err(e) => {
                warn!("{e}");
                self.discard_corrupt(&path);
                None
            }
        }
    }

    fn clear(&self) -> SessionResult<()> {
        let path = self.path();
        match fs::remove_file(&path) {
            Ok(()) => {
                info!("Cleared session record at {}", path.display());
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(SessionError::storage(format!(
                "cannot remove {}: {e}",
                path.display()
            ))),
        }
    }
}

/// Writes `contents` to `path` without ever exposing a partial file.
///
/// 1. Writes to a temp file next to the target (owner-only on unix)
/// 2. Syncs to disk (fsync)
/// 3. Atomic rename to the final location
pub fn write_atomically(path: &Path, contents: &[u8]) -> std::io::Result<()> {
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| std::io::Error::new(ErrorKind::InvalidInput, "path has no file name"))?;
    let temp_path = path.with_file_name(format!("{file_name}.tmp.{}", std::process::id()));

    {
        let mut options = fs::OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&temp_path)?;
        file.write_all(contents)?;
        file.sync_all()?;
    }

    fs::rename(&temp_path, path).inspect_err(|_| {
        let _ = fs::remove_file(&temp_path);
    })
}
