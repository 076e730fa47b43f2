//! Durable persistence of the current [`Identity`](crate::Identity).

pub mod codec;
mod file_store;
mod legacy;
mod memory_store;

pub use file_store::{FileSessionStore, write_atomically};
pub use memory_store::MemorySessionStore;

use crate::{Identity, SessionResult};

use log::info;

/// Persistence contract for the single session record.
///
/// Only the session manager writes through this trait.
pub trait SessionStore: Send + Sync {
    /// Persist `identity`, replacing any previous record.
    fn save(&self, identity: &Identity) -> SessionResult<()>;

    /// The previously saved identity, or `None` when absent or unreadable.
    ///
    /// Never fails: a corrupt record is cleared and reported as `None`.
    fn load(&self) -> Option<Identity>;

    /// Remove the persisted record. Removing an absent record succeeds.
    fn clear(&self) -> SessionResult<()>;
}

/// Decode a stored record, migrating the earlier plain-JSON user object.
pub(crate) fn decode_record(text: &str) -> SessionResult<Identity> {
    codec::decode::<Identity>(text).or_else(|e| match legacy::migrate(text) {
        Some(identity) => {
            info!("Migrated legacy session record for {}", identity.subject_id);
            Ok(identity)
        }
        None => Err(e),
    })
}
