use crate::store::{SessionStore, codec, decode_record};
use crate::{Identity, SessionResult};

use std::sync::{Mutex, MutexGuard, PoisonError};

use log::warn;

/// In-process session store holding the encoded record.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    record: Mutex<Option<String>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with arbitrary raw content, e.g. a corrupt record.
    pub fn with_raw(raw: impl Into<String>) -> Self {
        Self {
            record: Mutex::new(Some(raw.into())),
        }
    }

    /// The raw encoded record, if any.
    pub fn raw(&self) -> Option<String> {
        self.record().clone()
    }

    fn record(&self) -> MutexGuard<'_, Option<String>> {
        self.record.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn save(&self, identity: &Identity) -> SessionResult<()> {
        let encoded = codec::encode(identity)?;
        *self.record() = Some(encoded);
        Ok(())
    }

    fn load(&self) -> Option<Identity> {
        let mut record = self.record();
        let raw = record.as_deref()?;

        match decode_record(raw) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!("{e}");
                *record = None;
                None
            }
        }
    }

    fn clear(&self) -> SessionResult<()> {
        *self.record() = None;
        Ok(())
    }
}
