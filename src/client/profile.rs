//! Profile page view-controller.
//!
//! DESIGN
//! ======
//! `ProfilePage` owns the page-local state (`ProfileView`: form fields,
//! delete-confirmation overlay, success banner, in-flight action) and talks
//! to three injected collaborators: `ProfileApi` for the network,
//! `AuthStore` for global auth state, and a `Navigator` for routing.
//!
//! Every action is `Idle -> InFlight -> Idle`. Only one action runs at a
//! time per page; a second click while a request is outstanding returns
//! `Outcome::Busy` without touching the network.
//!
//! ERROR HANDLING
//! ==============
//! Nothing here returns an error or panics. Failures land in the store's
//! single error slot as a human-readable string: the server's `message` when
//! it sent one, otherwise a fixed fallback per operation.

#[cfg(test)]
#[path = "profile_test.rs"]
mod profile_test;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{info, warn};

use super::api::{ApiError, ProfileApi};
use super::nav::{HOME_ROUTE, Navigator};
use super::store::{AuthAction, AuthStore};
use super::types::{UpdateProfileBody, User};

pub const PASSWORD_MISMATCH: &str = "New password and confirm password do not match";
pub const LOGOUT_FAILED: &str = "Logout failed";
pub const DELETE_FAILED: &str = "Account deletion failed";
pub const PASSWORD_CHECK_FAILED: &str = "Password check failed";
pub const UPDATE_FAILED: &str = "Profile update failed";
pub const UPDATE_SUCCEEDED: &str = "Profile updated successfully";

/// How long the success banner stays up before going home.
pub const REDIRECT_DELAY: Duration = Duration::from_millis(1500);

// =============================================================================
// FORM
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileField {
    Username,
    Email,
    Password,
    NewPassword,
    ConfirmPassword,
}

impl ProfileField {
    pub const ALL: [Self; 5] = [Self::Username, Self::Email, Self::Password, Self::NewPassword, Self::ConfirmPassword];

    /// Map an input element id to its field.
    #[must_use]
    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            "username" => Some(Self::Username),
            "email" => Some(Self::Email),
            "password" => Some(Self::Password),
            "newPassword" => Some(Self::NewPassword),
            "confirmPassword" => Some(Self::ConfirmPassword),
            _ => None,
        }
    }
}

/// Editable form state. `password` is the current password.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ProfileForm {
    #[must_use]
    pub fn from_user(user: Option<&User>) -> Self {
        user.map_or_else(Self::default, |u| Self {
            username: u.username.clone(),
            email: u.email.clone(),
            ..Self::default()
        })
    }

    pub fn set(&mut self, field: ProfileField, value: impl Into<String>) {
        let slot = match field {
            ProfileField::Username => &mut self.username,
            ProfileField::Email => &mut self.email,
            ProfileField::Password => &mut self.password,
            ProfileField::NewPassword => &mut self.new_password,
            ProfileField::ConfirmPassword => &mut self.confirm_password,
        };
        *slot = value.into();
    }

    #[must_use]
    pub fn get(&self, field: ProfileField) -> &str {
        match field {
            ProfileField::Username => &self.username,
            ProfileField::Email => &self.email,
            ProfileField::Password => &self.password,
            ProfileField::NewPassword => &self.new_password,
            ProfileField::ConfirmPassword => &self.confirm_password,
        }
    }

    #[must_use]
    pub fn passwords_match(&self) -> bool {
        self.new_password == self.confirm_password
    }

    /// Request body for the update call. The current password is only sent
    /// alongside a password change.
    #[must_use]
    pub fn update_body(&self) -> UpdateProfileBody<'_> {
        let current_password =
            (!self.new_password.is_empty() && !self.password.is_empty()).then_some(self.password.as_str());
        UpdateProfileBody {
            username: &self.username,
            email: &self.email,
            new_password: &self.new_password,
            current_password,
        }
    }
}

// =============================================================================
// VIEW STATE
// =============================================================================

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProfileAction {
    SignOut,
    DeleteAccount,
    UpdateProfile,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Idle,
    InFlight(ProfileAction),
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProfileView {
    pub form: ProfileForm,
    /// Delete-account confirmation overlay visibility.
    pub confirming_delete: bool,
    pub success_message: Option<String>,
    pub phase: Phase,
}

/// Result of a user action, mirrored into the store for rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    Done,
    Failed(String),
    /// Another action was still in flight; nothing was sent.
    Busy,
    /// The action was not armed (e.g. confirm without the overlay shown).
    Cancelled,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ProfileOptions {
    pub redirect_delay: Duration,
}

impl Default for ProfileOptions {
    fn default() -> Self {
        Self { redirect_delay: REDIRECT_DELAY }
    }
}

/// Resets the phase to idle when the action finishes, however it returns.
struct InFlight<'a> {
    view: &'a watch::Sender<ProfileView>,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.view.send_modify(|v| v.phase = Phase::Idle);
    }
}

// =============================================================================
// PAGE
// =============================================================================

pub struct ProfilePage {
    api: ProfileApi,
    store: AuthStore,
    nav: Arc<dyn Navigator>,
    options: ProfileOptions,
    view: Arc<watch::Sender<ProfileView>>,
    initialized: AtomicBool,
    pending_redirect: Mutex<Option<JoinHandle<()>>>,
}

impl ProfilePage {
    /// Build the page with the form seeded from the store's current user.
    #[must_use]
    pub fn new(api: ProfileApi, store: AuthStore, nav: Arc<dyn Navigator>) -> Self {
        Self::with_options(api, store, nav, ProfileOptions::default())
    }

    #[must_use]
    pub fn with_options(api: ProfileApi, store: AuthStore, nav: Arc<dyn Navigator>, options: ProfileOptions) -> Self {
        let form = ProfileForm::from_user(store.current_user().as_ref());
        let (view, _rx) = watch::channel(ProfileView { form, ..ProfileView::default() });
        Self {
            api,
            store,
            nav,
            options,
            view: Arc::new(view),
            initialized: AtomicBool::new(false),
            pending_redirect: Mutex::new(None),
        }
    }

    /// Mount hook: clears any error left over from another page. Runs once;
    /// later calls do nothing.
    pub fn init(&self) {
        if !self.initialized.swap(true, Ordering::SeqCst) {
            self.store.dispatch(AuthAction::ResetError);
        }
    }

    #[must_use]
    pub fn view(&self) -> ProfileView {
        self.view.borrow().clone()
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<ProfileView> {
        self.view.subscribe()
    }

    #[must_use]
    pub fn store(&self) -> &AuthStore {
        &self.store
    }

    pub fn set_field(&self, field: ProfileField, value: impl Into<String>) {
        let value = value.into();
        self.view.send_modify(|v| v.form.set(field, value));
    }

    fn begin(&self, action: ProfileAction) -> Option<InFlight<'_>> {
        let acquired = self.view.send_if_modified(|v| {
            if v.phase == Phase::Idle {
                v.phase = Phase::InFlight(action);
                true
            } else {
                false
            }
        });
        if acquired {
            Some(InFlight { view: &self.view })
        } else {
            tracing::debug!(?action, "action ignored, another request is in flight");
            None
        }
    }

    // -------------------------------------------------------------------------
    // Sign out
    // -------------------------------------------------------------------------

    pub async fn sign_out(&self) -> Outcome {
        let Some(_guard) = self.begin(ProfileAction::SignOut) else {
            return Outcome::Busy;
        };

        self.store.dispatch(AuthAction::SignoutStart);
        match self.api.logout().await {
            Ok(()) => {
                info!("signed out");
                self.store.dispatch(AuthAction::SignoutSuccess);
                self.nav.navigate(HOME_ROUTE);
                Outcome::Done
            }
            Err(e) => {
                warn!(error = %e, "logout failed");
                let message = failure_message(&e, LOGOUT_FAILED);
                self.store.dispatch(AuthAction::SignoutFailure(message.clone()));
                Outcome::Failed(message)
            }
        }
    }

    // -------------------------------------------------------------------------
    // Delete account
    // -------------------------------------------------------------------------

    /// Show the confirmation overlay. No request is sent.
    pub fn request_delete(&self) {
        self.view.send_modify(|v| v.confirming_delete = true);
    }

    pub fn cancel_delete(&self) {
        self.view.send_modify(|v| v.confirming_delete = false);
    }

    /// Hide the overlay and delete the account. Only armed while the overlay
    /// is shown; a busy page leaves the overlay shown.
    pub async fn confirm_delete(&self) -> Outcome {
        if !self.view.borrow().confirming_delete {
            return Outcome::Cancelled;
        }

        // The overlay stays up while another action is running.
        let Some(_guard) = self.begin(ProfileAction::DeleteAccount) else {
            return Outcome::Busy;
        };
        self.cancel_delete();

        let Some(user) = self.store.current_user() else {
            warn!("account deletion without a signed-in user");
            return self.fail(AuthAction::DeleteUserFailure, DELETE_FAILED.to_owned());
        };

        self.store.dispatch(AuthAction::DeleteUserStart);
        match self.api.delete_user(&user.id).await {
            Ok(()) => {
                info!(user_id = %user.id, "account deleted");
                self.store.dispatch(AuthAction::DeleteUserSuccess);
                self.nav.navigate(HOME_ROUTE);
                Outcome::Done
            }
            Err(e) => {
                warn!(error = %e, user_id = %user.id, "account deletion failed");
                self.fail(AuthAction::DeleteUserFailure, failure_message(&e, DELETE_FAILED))
            }
        }
    }

    // -------------------------------------------------------------------------
    // Update profile
    // -------------------------------------------------------------------------

    /// Submit the form. A password change is verified against the current
    /// password before the update is sent.
    pub async fn update_profile(&self) -> Outcome {
        let Some(_guard) = self.begin(ProfileAction::UpdateProfile) else {
            return Outcome::Busy;
        };

        let form = self.view.borrow().form.clone();
        if !form.passwords_match() {
            return self.fail(AuthAction::UpdateProfileFailure, PASSWORD_MISMATCH.to_owned());
        }

        let Some(user) = self.store.current_user() else {
            warn!("profile update without a signed-in user");
            return self.fail(AuthAction::UpdateProfileFailure, UPDATE_FAILED.to_owned());
        };

        if !form.new_password.is_empty() {
            if let Err(e) = self.api.check_password(&user.id, &form.password).await {
                warn!(error = %e, user_id = %user.id, "password check failed");
                let message = match &e {
                    ApiError::Rejected { .. } => failure_message(&e, PASSWORD_CHECK_FAILED),
                    ApiError::Transport(_) => UPDATE_FAILED.to_owned(),
                };
                return self.fail(AuthAction::UpdateProfileFailure, message);
            }
        }

        self.store.dispatch(AuthAction::UpdateProfileStart);
        match self.api.update_profile(&user.id, &form.update_body()).await {
            Ok(updated) => {
                info!(user_id = %updated.id, "profile updated");
                self.store.dispatch(AuthAction::UpdateProfileSuccess(updated));
                self.view.send_modify(|v| v.success_message = Some(UPDATE_SUCCEEDED.to_owned()));
                self.schedule_redirect();
                Outcome::Done
            }
            Err(e) => {
                warn!(error = %e, user_id = %user.id, "profile update failed");
                self.fail(AuthAction::UpdateProfileFailure, failure_message(&e, UPDATE_FAILED))
            }
        }
    }

    /// Clear the success banner and go home once the delay elapses.
    fn schedule_redirect(&self) {
        let view = Arc::clone(&self.view);
        let nav = Arc::clone(&self.nav);
        let delay = self.options.redirect_delay;
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            view.send_modify(|v| v.success_message = None);
            nav.navigate(HOME_ROUTE);
        });

        let previous = self
            .pending_redirect
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(handle);
        if let Some(previous) = previous {
            previous.abort();
        }
    }

    /// Wait for a scheduled redirect, if any, to run.
    pub async fn redirect_settled(&self) {
        let handle = self.pending_redirect.lock().unwrap_or_else(PoisonError::into_inner).take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }

    fn fail(&self, action: fn(String) -> AuthAction, message: String) -> Outcome {
        self.store.dispatch(action(message.clone()));
        Outcome::Failed(message)
    }
}

/// The server's message when it sent one, otherwise the fallback.
fn failure_message(err: &ApiError, fallback: &str) -> String {
    err.message().unwrap_or(fallback).to_owned()
}
