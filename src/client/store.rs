//! Global auth state shared across views.
//!
//! DESIGN
//! ======
//! `AuthStore` is the single writer: views never mutate `AuthState` directly,
//! they dispatch an `AuthAction` and the reducer applies it. Readers take a
//! snapshot or subscribe to change notifications. The store is injected into
//! views, so it can be exercised without any network or UI.

#[cfg(test)]
#[path = "store_test.rs"]
mod store_test;

use std::sync::Arc;

use tokio::sync::watch;

use super::types::User;

/// Authentication state tracking the current user, the last error and
/// loading status.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuthState {
    pub user: Option<User>,
    pub error: Option<String>,
    pub loading: bool,
}

/// Typed state transitions. Every remote operation has a start, success and
/// failure action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AuthAction {
    SignIn(User),
    ResetError,
    SignoutStart,
    SignoutSuccess,
    SignoutFailure(String),
    DeleteUserStart,
    DeleteUserSuccess,
    DeleteUserFailure(String),
    UpdateProfileStart,
    UpdateProfileSuccess(User),
    UpdateProfileFailure(String),
}

impl AuthAction {
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::SignIn(_) => "sign_in",
            Self::ResetError => "reset_error",
            Self::SignoutStart => "signout:start",
            Self::SignoutSuccess => "signout:success",
            Self::SignoutFailure(_) => "signout:failure",
            Self::DeleteUserStart => "delete_user:start",
            Self::DeleteUserSuccess => "delete_user:success",
            Self::DeleteUserFailure(_) => "delete_user:failure",
            Self::UpdateProfileStart => "update_profile:start",
            Self::UpdateProfileSuccess(_) => "update_profile:success",
            Self::UpdateProfileFailure(_) => "update_profile:failure",
        }
    }
}

impl AuthState {
    /// Reducer. Failures keep the current user; successes clear the error.
    pub fn apply(&mut self, action: AuthAction) {
        match action {
            AuthAction::ResetError => self.error = None,
            AuthAction::SignoutStart | AuthAction::DeleteUserStart | AuthAction::UpdateProfileStart => {
                self.loading = true;
                self.error = None;
            }
            AuthAction::SignIn(user) | AuthAction::UpdateProfileSuccess(user) => {
                self.user = Some(user);
                self.loading = false;
                self.error = None;
            }
            AuthAction::SignoutSuccess | AuthAction::DeleteUserSuccess => {
                self.user = None;
                self.loading = false;
                self.error = None;
            }
            AuthAction::SignoutFailure(message)
            | AuthAction::DeleteUserFailure(message)
            | AuthAction::UpdateProfileFailure(message) => {
                self.loading = false;
                self.error = Some(message);
            }
        }
    }
}

/// Cheap-clone handle to the shared auth state.
#[derive(Clone, Debug)]
pub struct AuthStore {
    tx: Arc<watch::Sender<AuthState>>,
}

impl AuthStore {
    #[must_use]
    pub fn new(initial: AuthState) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx: Arc::new(tx) }
    }

    /// Store seeded with a signed-in user.
    #[must_use]
    pub fn signed_in(user: User) -> Self {
        Self::new(AuthState { user: Some(user), ..AuthState::default() })
    }

    pub fn dispatch(&self, action: AuthAction) {
        tracing::debug!(action = action.name(), "auth dispatch");
        self.tx.send_modify(|state| state.apply(action));
    }

    #[must_use]
    pub fn snapshot(&self) -> AuthState {
        self.tx.borrow().clone()
    }

    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.tx.borrow().user.clone()
    }

    #[must_use]
    pub fn error(&self) -> Option<String> {
        self.tx.borrow().error.clone()
    }

    /// Receiver notified after every dispatch.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<AuthState> {
        self.tx.subscribe()
    }
}

impl Default for AuthStore {
    fn default() -> Self {
        Self::new(AuthState::default())
    }
}
