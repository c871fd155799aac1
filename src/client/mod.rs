//! Client side of the profile page.
//!
//! DESIGN
//! ======
//! Split by concern so the workflow in `profile` can be driven with any
//! store, token source or navigator: `store` holds global auth state,
//! `session` supplies bearer tokens, `api` speaks HTTP, `nav` routes.

pub mod api;
pub mod nav;
pub mod profile;
pub mod session;
pub mod store;
pub mod types;

pub use api::{ApiConfig, ApiError, ProfileApi};
pub use nav::{HOME_ROUTE, History, Navigator};
pub use profile::{Outcome, ProfileField, ProfileOptions, ProfilePage};
pub use session::{CookieSession, SessionToken, StaticToken};
pub use store::{AuthAction, AuthState, AuthStore};
pub use types::User;
