use crate::Identity;

/// Coarse lifecycle of the session manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Startup restore has not finished
    Uninitialized,
    Unauthenticated,
    Authenticated,
}

/// Snapshot published to observers after every transition.
///
/// `error` is an overlay orthogonal to the phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    pub identity: Option<Identity>,
    pub loading: bool,
    pub error: Option<String>,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            identity: None,
            loading: true,
            error: None,
        }
    }
}

impl SessionState {
    pub fn phase(&self) -> SessionPhase {
        match (self.loading, &self.identity) {
            (_, Some(_)) => SessionPhase::Authenticated,
            (true, None) => SessionPhase::Uninitialized,
            (false, None) => SessionPhase::Unauthenticated,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}
