//! Auth page view-models
//!
//! These hold form state and drive the [`AuthBackend`](crate::auth::AuthBackend);
//! drawing them is left to whatever front end hosts the crate.

pub mod landing;
pub mod views;

pub use landing::{Landing, LandingPage};
pub use views::{SignInView, SignUpView};

use crate::auth::FieldError;

/// Generic message shown when a quick action fails
pub const GENERIC_FAILURE: &str = "Something went wrong";
/// Message shown when a quick action succeeds
pub const GENERIC_SUCCESS: &str = "Success";
/// Error shown on the sign-up/sign-in views when the backend rejects them
pub const CREDENTIALS_FAILURE: &str = "Invalid email or password";

/// Result of submitting a form view
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Validation failed; the backend was not called
    Invalid(Vec<FieldError>),
    /// Backend accepted; navigate to this path
    Redirect(&'static str),
    /// Backend rejected; the view's error message is set
    Failed,
}

/// Pops a short message at the user (`window.alert` in the browser)
pub trait Notifier {
    fn notify(&mut self, message: &str);
}

/// Notifier that writes to the log
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        log::info!("{message}");
    }
}

/// `window.alert`
#[cfg(target_arch = "wasm32")]
#[derive(Debug, Default)]
pub struct AlertNotifier;

#[cfg(target_arch = "wasm32")]
impl Notifier for AlertNotifier {
    fn notify(&mut self, message: &str) {
        let shown = web_sys::window().map(|w| w.alert_with_message(message));
        if !matches!(shown, Some(Ok(()))) {
            log::warn!("Could not show alert: {message}");
        }
    }
}

/// Notifier that keeps every message, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub(crate) struct RecordingNotifier {
    pub messages: Vec<String>,
}

#[cfg(test)]
impl Notifier for RecordingNotifier {
    fn notify(&mut self, message: &str) {
        self.messages.push(message.to_string());
    }
}
