//! Session-aware landing page
//!
//! Signed in: greets the user and offers logout. Signed out: quick
//! "Create User" and "Login" forms that report via a [`Notifier`].

use super::{GENERIC_FAILURE, GENERIC_SUCCESS, Notifier};
use crate::auth::{AuthBackend, Credentials, SignUpRequest};

/// What the landing page shows
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Landing {
    SignedIn { greeting: String },
    SignedOut,
}

/// Quick-form state shared by the create-user and login panels
#[derive(Debug, Default, Clone)]
pub struct LandingPage {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl LandingPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(&self, backend: &impl AuthBackend) -> Landing {
        match backend.current_session() {
            Some(session) => Landing::SignedIn {
                greeting: format!("Logged in as {}", session.user.name),
            },
            None => Landing::SignedOut,
        }
    }

    pub fn create_user(&self, backend: &mut impl AuthBackend, notifier: &mut impl Notifier) {
        let request = SignUpRequest {
            name: self.name.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
        };
        Self::report(backend.sign_up(&request).is_ok(), notifier);
    }

    pub fn login(&self, backend: &mut impl AuthBackend, notifier: &mut impl Notifier) {
        let credentials = Credentials {
            email: self.email.clone(),
            password: self.password.clone(),
        };
        Self::report(backend.sign_in(&credentials).is_ok(), notifier);
    }

    pub fn logout(&self, backend: &mut impl AuthBackend) {
        backend.sign_out();
    }

    fn report(ok: bool, notifier: &mut impl Notifier) {
        notifier.notify(if ok { GENERIC_SUCCESS } else { GENERIC_FAILURE });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::MemoryAuth;
    use crate::ui::RecordingNotifier;

    fn page() -> LandingPage {
        LandingPage {
            name: "Grace".into(),
            email: "grace@example.com".into(),
            password: "cobol".into(),
        }
    }

    #[test]
    fn test_signed_out_by_default() {
        let auth = MemoryAuth::new();
        assert_eq!(LandingPage::new().render(&auth), Landing::SignedOut);
    }

    #[test]
    fn test_create_user_then_logout() {
        let mut auth = MemoryAuth::new();
        let mut notifier = RecordingNotifier::default();
        let page = page();

        page.create_user(&mut auth, &mut notifier);
        assert_eq!(notifier.messages, vec!["Success"]);
        assert_eq!(
            page.render(&auth),
            Landing::SignedIn {
                greeting: "Logged in as Grace".into()
            }
        );

        page.logout(&mut auth);
        assert_eq!(page.render(&auth), Landing::SignedOut);
    }

    #[test]
    fn test_failures_are_generic() {
        let mut auth = MemoryAuth::new();
        let mut notifier = RecordingNotifier::default();
        let page = page();

        page.login(&mut auth, &mut notifier);
        page.create_user(&mut auth, &mut notifier);
        page.create_user(&mut auth, &mut notifier);
        assert_eq!(
            notifier.messages,
            vec!["Something went wrong", "Success", "Something went wrong"]
        );
    }

    #[test]
    fn test_login_after_logout() {
        let mut auth = MemoryAuth::new();
        let mut notifier = RecordingNotifier::default();
        let page = page();
        page.create_user(&mut auth, &mut notifier);
        page.logout(&mut auth);

        page.login(&mut auth, &mut notifier);
        assert_eq!(notifier.messages.last().map(String::as_str), Some("Success"));
        assert!(matches!(page.render(&auth), Landing::SignedIn { .. }));
    }
}
