//! User preferences
//!
//! Persisted in LocalStorage under [`PREFERENCES_KEY`](crate::consts::PREFERENCES_KEY).

use serde::{Deserialize, Serialize};

use crate::consts::PREFERENCES_KEY;
use crate::persistence::Persisted;

/// Per-browser preferences for the auth pages
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// Pre-fill the sign-in e-mail with the last one used
    pub remember_email: bool,
    /// Last e-mail that signed in successfully
    pub last_email: Option<String>,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            remember_email: true,
            last_email: None,
        }
    }
}

impl Preferences {
    /// Binding for the preferences slot, not yet activated
    pub fn persisted() -> Persisted<Self> {
        Persisted::new(PREFERENCES_KEY, Self::default())
    }

    /// E-mail to pre-fill on the sign-in form
    pub fn prefill_email(&self) -> Option<&str> {
        if self.remember_email {
            self.last_email.as_deref()
        } else {
            None
        }
    }

    /// Record a successful sign-in
    pub fn remember(&self, email: &str) -> Self {
        let mut next = self.clone();
        next.last_email = self.remember_email.then(|| email.to_string());
        next
    }
}
