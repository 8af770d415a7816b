//! Sign-up and sign-in views

use super::{CREDENTIALS_FAILURE, SubmitOutcome};
use crate::auth::{AuthBackend, SignInForm, SignUpForm};
use crate::consts::HOME_PATH;
use crate::persistence::Persisted;
use crate::platform::SafeStorage;
use crate::preferences::Preferences;

/// "Create your account" page
#[derive(Debug, Default)]
pub struct SignUpView {
    pub form: SignUpForm,
    error: Option<String>,
}

impl SignUpView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Banner message from the last failed submit
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn submit(&mut self, backend: &mut impl AuthBackend) -> SubmitOutcome {
        self.error = None;
        let request = match self.form.validate() {
            Ok(request) => request,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        match backend.sign_up(&request) {
            Ok(()) => SubmitOutcome::Redirect(HOME_PATH),
            Err(e) => {
                log::warn!("Sign-up failed: {e}");
                self.error = Some(CREDENTIALS_FAILURE.to_string());
                SubmitOutcome::Failed
            }
        }
    }
}

/// "Welcome back" page. Remembers the last e-mail used.
#[derive(Debug)]
pub struct SignInView {
    pub form: SignInForm,
    preferences: Persisted<Preferences>,
    error: Option<String>,
}

impl Default for SignInView {
    fn default() -> Self {
        Self::new()
    }
}

impl SignInView {
    pub fn new() -> Self {
        Self {
            form: SignInForm::default(),
            preferences: Preferences::persisted(),
            error: None,
        }
    }

    /// Called once the page runs in the browser; loads preferences and
    /// pre-fills the e-mail if the user has not typed one yet.
    pub fn mount(&mut self, storage: SafeStorage) {
        if !self.preferences.activate(storage) {
            return;
        }
        if self.form.email.is_empty() {
            if let Some(email) = self.preferences.value().prefill_email() {
                self.form.email = email.to_string();
            }
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.preferences.is_ready()
    }

    pub fn preferences(&self) -> &Preferences {
        self.preferences.value()
    }

    pub fn set_remember_email(&mut self, remember: bool) {
        self.preferences.update(|p| Preferences {
            remember_email: remember,
            last_email: if remember { p.last_email.clone() } else { None },
            ..p.clone()
        });
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn submit(&mut self, backend: &mut impl AuthBackend) -> SubmitOutcome {
        self.error = None;
        let credentials = match self.form.validate() {
            Ok(credentials) => credentials,
            Err(errors) => return SubmitOutcome::Invalid(errors),
        };

        match backend.sign_in(&credentials) {
            Ok(()) => {
                self.preferences.update(|p| p.remember(&credentials.email));
                SubmitOutcome::Redirect(HOME_PATH)
            }
            Err(e) => {
                log::warn!("Sign-in failed: {e}");
                self.error = Some(CREDENTIALS_FAILURE.to_string());
                SubmitOutcome::Failed
            }
        }
    }
}
