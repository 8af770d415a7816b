//! Authgate - minimal authentication front end
//!
//! Core modules:
//! - `platform`: Storage capability detection and the SSR-safe storage accessor
//! - `persistence`: In-memory values mirrored to storage
//! - `auth`: Backend seam, credentials and form validation
//! - `ui`: Sign-up, sign-in and landing page view-models
//! - `preferences`: Per-browser user preferences

pub mod auth;
pub mod persistence;
pub mod platform;
pub mod preferences;
pub mod ui;

pub use persistence::{BindingState, Persisted};
pub use platform::{SafeStorage, detect_storage};
pub use preferences::Preferences;

/// Application constants
pub mod consts {
    /// LocalStorage key for [`Preferences`](crate::Preferences)
    pub const PREFERENCES_KEY: &str = "authgate_preferences";
    /// LocalStorage key for the visit counter kept by the web entry point
    pub const VISITS_KEY: &str = "authgate_visits";
    /// Where successful sign-up/sign-in navigates to
    pub const HOME_PATH: &str = "/";
}
