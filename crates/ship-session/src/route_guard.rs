//! Chooses the screen to present for a given session state.

use crate::{Identity, SessionState};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route<'a> {
    /// Startup restore still running
    Loading,
    /// No identity; `error` is the inline message from the last failed attempt
    Login { error: Option<&'a str> },
    /// Signed in
    Content(&'a Identity),
}

pub fn resolve(state: &SessionState) -> Route<'_> {
    if state.loading {
        return Route::Loading;
    }

    match &state.identity {
        Some(identity) => Route::Content(identity),
        None => Route::Login {
            error: state.error.as_deref(),
        },
    }
}
