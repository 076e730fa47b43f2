//! Client-side session core for the xenship logistics client.
//!
//! [`SessionManager`] owns the current [`Identity`], mediates between the two
//! credential sources ([`CredentialValidator`] and [`IdentityProvider`]) and the
//! [`SessionStore`], and publishes [`SessionState`] changes to observers.
//! [`route_guard::resolve`] maps that state to the screen the UI should show.

pub mod allow_list;
pub mod collaborators;
pub mod credential;
pub mod error;
pub mod identity;
pub mod route_guard;
pub mod session_manager;
pub mod session_state;
pub mod store;

pub use allow_list::DomainAllowList;
pub use collaborators::{
    CredentialValidator, IdentityProvider, ProviderAccount, ProviderProfile, ProviderSignIn,
    ValidatedCredential,
};
pub use credential::Credential;
pub use error::{Result as SessionResult, SessionError};
pub use identity::{Identity, Provider};
pub use route_guard::Route;
pub use session_manager::SessionManager;
pub use session_state::{SessionPhase, SessionState};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};

#[cfg(test)]
mod tests;
